//! External abort signal checked between pipeline stages.
//!
//! The signal is a shared [`AtomicBool`]; clones observe the same flag, so
//! one clone can live in a Ctrl-C handler while another is passed to the
//! generator running on a blocking thread.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Cloneable, thread-safe abort flag.
#[derive(Debug, Clone, Default)]
pub struct AbortSignal {
    requested: Arc<AtomicBool>,
}

impl AbortSignal {
    /// Create a signal that has not been tripped.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask the running pipeline to stop before its next stage.
    pub fn request_abort(&self) {
        self.requested.store(true, Ordering::Release);
    }

    /// Whether an abort has been requested.
    pub fn is_abort_requested(&self) -> bool {
        self.requested.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_flag() {
        let signal = AbortSignal::new();
        let handle = signal.clone();
        assert!(!signal.is_abort_requested());
        handle.request_abort();
        assert!(signal.is_abort_requested());
    }

    #[test]
    fn abort_is_visible_across_threads() {
        let signal = AbortSignal::new();
        let remote = signal.clone();
        let joined = std::thread::spawn(move || remote.request_abort()).join();
        assert!(joined.is_ok());
        assert!(signal.is_abort_requested());
    }
}
