//! Per-stage and pipeline-level generation metrics.
//!
//! Metrics are observational only. Counts are deterministic for a given
//! seed and configuration; wall-clock fields are not, and are left out of
//! the serialized form so two reports from identical runs serialize
//! identically.

use std::collections::BTreeMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Counters and timing for one stage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StageMetrics {
    /// Stage name.
    pub stage: String,
    /// Entities the stage produced.
    pub produced: u64,
    /// Named counters recorded by the stage.
    pub counts: BTreeMap<String, u64>,
    /// Wall-clock run time.
    #[serde(skip)]
    pub elapsed: Duration,
}

impl StageMetrics {
    /// Empty metrics for the named stage.
    pub fn new(stage: &str) -> Self {
        Self {
            stage: stage.to_owned(),
            ..Self::default()
        }
    }

    /// Record `n` more produced entities.
    pub const fn record_produced(&mut self, n: u64) {
        self.produced = self.produced.saturating_add(n);
    }

    /// Increment a named counter by one.
    pub fn increment(&mut self, key: &str) {
        self.add(key, 1);
    }

    /// Add `n` to a named counter.
    pub fn add(&mut self, key: &str, n: u64) {
        let entry = self.counts.entry(key.to_owned()).or_insert(0);
        *entry = entry.saturating_add(n);
    }

    /// Overwrite a named counter.
    pub fn set(&mut self, key: &str, value: u64) {
        self.counts.insert(key.to_owned(), value);
    }

    /// Read a named counter (zero if never recorded).
    pub fn count(&self, key: &str) -> u64 {
        self.counts.get(key).copied().unwrap_or(0)
    }

    /// Run time in whole milliseconds.
    pub fn elapsed_ms(&self) -> u64 {
        u64::try_from(self.elapsed.as_millis()).unwrap_or(u64::MAX)
    }
}

/// Metrics for a whole pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PipelineReport {
    /// Seed the run used.
    pub seed: u64,
    /// Per-stage metrics in execution order.
    pub stages: Vec<StageMetrics>,
    /// Sum of `produced` over all stages.
    pub total_produced: u64,
    /// Wall-clock run time of the whole pipeline.
    #[serde(skip)]
    pub total_elapsed: Duration,
    /// When the first stage started.
    #[serde(skip)]
    pub started_at: DateTime<Utc>,
    /// When the last stage finished.
    #[serde(skip)]
    pub finished_at: DateTime<Utc>,
}

impl PipelineReport {
    /// Metrics for the named stage, if it ran.
    pub fn stage(&self, name: &str) -> Option<&StageMetrics> {
        self.stages.iter().find(|m| m.stage == name)
    }

    /// Stage names in execution order.
    pub fn stage_names(&self) -> Vec<&str> {
        self.stages.iter().map(|m| m.stage.as_str()).collect()
    }

    /// Total run time in whole milliseconds.
    pub fn total_elapsed_ms(&self) -> u64 {
        u64::try_from(self.total_elapsed.as_millis()).unwrap_or(u64::MAX)
    }
}
