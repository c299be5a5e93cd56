//! Galaxy generation pipeline for Starlane.
//!
//! A [`GalaxyGenerator`] turns a [`GalaxyConfig`] and a seed into a
//! [`Galaxy`](starlane_world::Galaxy) by running dependency-ordered
//! [`Stage`]s. The same seed and configuration always yield the same
//! graph.
//!
//! # Modules
//!
//! - [`abort`] -- Cross-thread abort signal checked between stages.
//! - [`config`] -- YAML configuration with defaults and validation.
//! - [`context`] -- Typed state handed from stage to stage.
//! - [`generator`] -- [`GalaxyGenerator`], the entry point.
//! - [`metrics`] -- Per-stage counters and the pipeline report.
//! - [`pipeline`] -- Topological ordering and fail-fast execution.
//! - [`stage`] -- The [`Stage`] trait and its error type.
//! - [`stages`] -- The eight default stages.

pub mod abort;
pub mod config;
pub mod context;
pub mod generator;
pub mod metrics;
pub mod pipeline;
pub mod stage;
pub mod stages;

// Re-export primary types at crate root.
pub use abort::AbortSignal;
pub use config::{ConfigError, GalaxyConfig};
pub use context::GenerationContext;
pub use generator::{GalaxyGenerator, Generation, GenerationError};
pub use metrics::{PipelineReport, StageMetrics};
pub use pipeline::{Pipeline, PipelineError};
pub use stage::{Stage, StageError};
