//! The generation entry point.

use starlane_types::{GalaxyId, WarpGate};
use starlane_world::{Classifier, Galaxy, GalaxyRng, GalaxyStatistics, WorldError};
use thiserror::Error;
use tracing::info;

use crate::abort::AbortSignal;
use crate::config::{ConfigError, GalaxyConfig};
use crate::context::GenerationContext;
use crate::metrics::PipelineReport;
use crate::pipeline::{Pipeline, PipelineError};
use crate::stages;

/// RNG stream for galaxy-level identity.
const IDENTITY_STREAM: &str = "identity";

/// Errors from building a generator or running it.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// The configuration failed validation.
    #[error("configuration error: {source}")]
    Config {
        /// Underlying error.
        #[from]
        source: ConfigError,
    },

    /// The empty galaxy could not be created.
    #[error("world error: {source}")]
    World {
        /// Underlying error.
        #[from]
        source: WorldError,
    },

    /// The pipeline was malformed, failed, or was aborted.
    #[error("pipeline error: {source}")]
    Pipeline {
        /// Underlying error.
        #[from]
        source: PipelineError,
    },
}

/// A finished generation run.
#[derive(Debug)]
pub struct Generation {
    /// The generated graph.
    pub galaxy: Galaxy,
    /// Per-stage metrics.
    pub report: PipelineReport,
    /// Summary of the graph.
    pub statistics: GalaxyStatistics,
}

/// Generates galaxies from one validated configuration and seed.
///
/// Construction does all the checking: configuration constraints, weight
/// tables, and the stage graph. A generator that exists can run.
#[derive(Debug)]
pub struct GalaxyGenerator {
    config: GalaxyConfig,
    classifier: Classifier,
    seed: u64,
    pipeline: Pipeline,
}

impl GalaxyGenerator {
    /// Generator with the default stages.
    ///
    /// # Errors
    ///
    /// [`GenerationError::Config`] for an invalid configuration.
    pub fn new(config: GalaxyConfig, seed: u64) -> Result<Self, GenerationError> {
        let pipeline = Pipeline::new(stages::default_stages())?;
        Self::with_pipeline(config, seed, pipeline)
    }

    /// Generator with a caller-assembled pipeline.
    ///
    /// # Errors
    ///
    /// [`GenerationError::Config`] for an invalid configuration.
    pub fn with_pipeline(
        config: GalaxyConfig,
        seed: u64,
        pipeline: Pipeline,
    ) -> Result<Self, GenerationError> {
        config.validate()?;
        let classifier = config.classifier().map_err(ConfigError::from)?;
        Ok(Self {
            config,
            classifier,
            seed,
            pipeline,
        })
    }

    /// Seed every run uses.
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// The validated configuration.
    pub const fn config(&self) -> &GalaxyConfig {
        &self.config
    }

    /// Stage names in execution order.
    pub fn execution_order(&self) -> Vec<&str> {
        self.pipeline.execution_order()
    }

    /// Gates of `galaxy` a pilot with `sensor_level` can see, with mirror
    /// gates gated on the configured `gates.mirror_sensor_level`.
    pub fn detectable_gates<'g>(
        &self,
        galaxy: &'g Galaxy,
        sensor_level: i32,
    ) -> Vec<&'g WarpGate> {
        galaxy
            .gates()
            .iter()
            .filter(|gate| self.config.gates.detects(gate, sensor_level))
            .collect()
    }

    /// Run the pipeline to completion.
    ///
    /// # Errors
    ///
    /// [`GenerationError::Pipeline`] if a stage fails.
    pub fn generate(&self) -> Result<Generation, GenerationError> {
        self.generate_with_abort(&AbortSignal::new())
    }

    /// Run the pipeline, stopping between stages once `abort` is tripped.
    ///
    /// # Errors
    ///
    /// [`GenerationError::Pipeline`] if a stage fails or the run is aborted.
    pub fn generate_with_abort(&self, abort: &AbortSignal) -> Result<Generation, GenerationError> {
        let mut identity = GalaxyRng::for_stream(self.seed, IDENTITY_STREAM);
        let mut galaxy = Galaxy::new(
            GalaxyId::from_random_bytes(identity.id_bytes()),
            self.config.galaxy.name.clone(),
            self.seed,
            self.config.galaxy.width,
            self.config.galaxy.height,
            self.config.ores.clone(),
        )?;

        let mut ctx = GenerationContext::new(self.seed, &self.config, &self.classifier);
        let report = self.pipeline.run(&mut galaxy, &mut ctx, abort)?;
        let statistics = galaxy.statistics();

        info!(
            galaxy = %galaxy.id(),
            name = galaxy.name(),
            seed = self.seed,
            systems = statistics.systems,
            gates = galaxy.gates().len(),
            markets = statistics.markets,
            "Galaxy generated"
        );
        Ok(Generation {
            galaxy,
            report,
            statistics,
        })
    }
}
