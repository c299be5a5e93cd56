//! Error types for the engine binary.
//!
//! [`EngineError`] wraps every failure mode of a generation run so `main`
//! can propagate with `?`.

/// Top-level error for the engine binary.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: starlane_core::ConfigError,
    },

    /// Generation failed or was aborted.
    #[error("generation error: {source}")]
    Generation {
        /// The underlying generation error.
        #[from]
        source: starlane_core::GenerationError,
    },

    /// `STARLANE_SEED` was not an unsigned integer.
    #[error("invalid seed override `{value}`")]
    InvalidSeed {
        /// The rejected value.
        value: String,
    },

    /// The blocking generation task panicked or was cancelled.
    #[error("generation task failed: {message}")]
    Task {
        /// Description of the join failure.
        message: String,
    },

    /// Writing the galaxy to `STARLANE_OUTPUT` failed.
    #[error("output error: {message}")]
    Output {
        /// Description of the write failure.
        message: String,
    },
}
