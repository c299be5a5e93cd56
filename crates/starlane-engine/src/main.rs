//! Galaxy generator binary for Starlane.
//!
//! Loads configuration, runs the generation pipeline on a blocking thread,
//! and logs the pipeline report and graph statistics. Ctrl-C trips the
//! pipeline's abort signal, which stops the run before its next stage.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `starlane-config.yaml` (or `STARLANE_CONFIG`)
//! 2. Initialize structured logging (tracing)
//! 3. Apply the `STARLANE_SEED` override
//! 4. Build the generator (validates config and stage graph)
//! 5. Install the Ctrl-C abort handler
//! 6. Generate
//! 7. Log the report and statistics
//! 8. Write the galaxy to `STARLANE_OUTPUT`, if set

mod error;

use std::path::{Path, PathBuf};

use starlane_core::config::GatesConfig;
use starlane_core::{AbortSignal, GalaxyConfig, GalaxyGenerator, Generation, PipelineReport};
use starlane_world::GalaxyStatistics;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::error::EngineError;

/// Default configuration file, relative to the working directory.
const DEFAULT_CONFIG_PATH: &str = "starlane-config.yaml";

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration, generation, or output fails.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load configuration.
    let (config, config_found) = load_config()?;

    // 2. Initialize structured logging.
    init_tracing(&config);
    info!("starlane-engine starting");
    if !config_found {
        info!("Config file not found, using defaults");
    }

    // 3. Resolve the seed.
    let seed = resolve_seed(config.galaxy.seed)?;
    info!(
        galaxy_name = config.galaxy.name,
        seed,
        width = config.galaxy.width,
        height = config.galaxy.height,
        star_count = config.stars.count,
        "Configuration loaded"
    );

    // 4. Build the generator.
    let generator = GalaxyGenerator::new(config, seed).map_err(EngineError::from)?;
    info!(stages = ?generator.execution_order(), "Pipeline resolved");
    let gates = generator.config().gates.clone();

    // 5. Install the abort handler.
    let abort = AbortSignal::new();
    let handler_signal = abort.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Ctrl-C received, aborting after the current stage");
            handler_signal.request_abort();
        }
    });

    // 6. Generate on a blocking thread.
    let generation = tokio::task::spawn_blocking(move || generator.generate_with_abort(&abort))
        .await
        .map_err(|e| EngineError::Task {
            message: format!("{e}"),
        })?
        .map_err(EngineError::from)?;

    // 7. Log the result.
    log_report(&generation.report);
    log_statistics(&generation.statistics);
    log_detection(&generation, &gates);

    // 8. Write the galaxy if asked to.
    if let Some(path) = std::env::var_os("STARLANE_OUTPUT").map(PathBuf::from) {
        write_galaxy(&generation, &path)?;
        info!(path = %path.display(), "Galaxy written");
    }

    info!("starlane-engine finished");
    Ok(())
}

/// Load configuration, falling back to defaults when the file is absent.
///
/// Returns the config and whether a file was found.
fn load_config() -> Result<(GalaxyConfig, bool), EngineError> {
    let path = std::env::var_os("STARLANE_CONFIG")
        .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from);
    if path.exists() {
        Ok((GalaxyConfig::from_file(&path)?, true))
    } else {
        Ok((GalaxyConfig::default(), false))
    }
}

fn init_tracing(config: &GalaxyConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
    if config.logging.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    }
}

/// The configured seed, unless `STARLANE_SEED` overrides it.
fn resolve_seed(configured: u64) -> Result<u64, EngineError> {
    match std::env::var("STARLANE_SEED") {
        Ok(raw) => raw.trim().parse().map_err(|e| EngineError::InvalidSeed {
            value: format!("{raw} ({e})"),
        }),
        Err(_) => Ok(configured),
    }
}

fn log_report(report: &PipelineReport) {
    for stage in &report.stages {
        info!(
            stage = stage.stage,
            produced = stage.produced,
            elapsed_ms = stage.elapsed_ms(),
            counts = ?stage.counts,
            "Stage summary"
        );
    }
    info!(
        seed = report.seed,
        total_produced = report.total_produced,
        total_elapsed_ms = report.total_elapsed_ms(),
        started_at = %report.started_at,
        finished_at = %report.finished_at,
        "Generation ended"
    );
}

fn log_statistics(stats: &GalaxyStatistics) {
    info!(
        systems = stats.systems,
        asteroid_fields = stats.asteroid_fields,
        universe_bodies = stats.universe_bodies,
        sectors = stats.sectors,
        markets = stats.markets,
        listings = stats.listings,
        deposits = stats.deposits,
        "Galaxy contents"
    );
    info!(
        gates = ?stats.gates,
        hidden = stats.hidden_gates,
        dormant = stats.dormant_gates,
        mirror_pairs = stats.mirror_pairs,
        min_degree = stats.min_degree,
        max_degree = stats.max_degree,
        average_degree = stats.average_degree,
        "Warp network"
    );
}

/// Gates visible to entry-level sensors and to mirror-grade sensors.
fn log_detection(generation: &Generation, gates: &GatesConfig) {
    let visible_at = |level: i32| {
        generation
            .galaxy
            .gates()
            .iter()
            .filter(|gate| gates.detects(gate, level))
            .count()
    };
    info!(
        total = generation.galaxy.gates().len(),
        base_sensor = visible_at(1),
        mirror_sensor_level = gates.mirror_sensor_level,
        mirror_sensor = visible_at(gates.mirror_sensor_level),
        "Gate visibility"
    );
}

fn write_galaxy(generation: &Generation, path: &Path) -> Result<(), EngineError> {
    let json = serde_json::to_string_pretty(&generation.galaxy).map_err(|e| EngineError::Output {
        message: format!("failed to serialize galaxy: {e}"),
    })?;
    std::fs::write(path, json).map_err(|e| EngineError::Output {
        message: format!("failed to write {}: {e}", path.display()),
    })
}
