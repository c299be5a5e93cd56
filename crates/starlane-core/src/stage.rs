//! The stage contract.

use starlane_types::SystemId;
use starlane_world::{Galaxy, WeightError, WorldError};
use thiserror::Error;

use crate::context::GenerationContext;
use crate::metrics::StageMetrics;

/// Errors a stage can fail with.
#[derive(Debug, Error)]
pub enum StageError {
    /// The galaxy rejected a mutation.
    #[error("world invariant violated: {source}")]
    World {
        /// Underlying error.
        #[from]
        source: WorldError,
    },

    /// A weight table could not be built.
    #[error("weight table error: {source}")]
    Weights {
        /// Underlying error.
        #[from]
        source: WeightError,
    },

    /// A dependency's output was not in the context.
    #[error("missing output of stage `{input}`")]
    MissingInput {
        /// The stage whose output was needed.
        input: &'static str,
    },

    /// A system could not reach the minimum degree within the retry budget.
    #[error("system {system} has degree {degree}, below the minimum of {min_degree}")]
    DegreeUnsatisfied {
        /// The under-linked system.
        system: SystemId,
        /// Its degree when the budget ran out.
        degree: usize,
        /// Configured minimum.
        min_degree: u32,
    },

    /// The network cannot be connected under the degree cap.
    #[error("system {system} cannot join the network without exceeding the maximum degree")]
    Disconnected {
        /// The first unreachable system.
        system: SystemId,
    },

    /// Any other stage-specific failure.
    #[error("{reason}")]
    Failed {
        /// Human-readable cause.
        reason: String,
    },
}

/// One unit of generation work.
///
/// Stages are stateless: everything they read comes from the galaxy and
/// the context, and everything they produce goes back into them. Entity
/// counts go into `metrics`; the pipeline times the call.
pub trait Stage: Send + Sync {
    /// Unique stage name.
    fn name(&self) -> &str;

    /// Names of stages that must complete first.
    fn dependencies(&self) -> &[&str];

    /// Do the work.
    ///
    /// # Errors
    ///
    /// Any [`StageError`]; the pipeline aborts on the first one and reports
    /// the count recorded in `metrics` so far.
    fn run(
        &self,
        galaxy: &mut Galaxy,
        ctx: &mut GenerationContext<'_>,
        metrics: &mut StageMetrics,
    ) -> Result<(), StageError>;
}
