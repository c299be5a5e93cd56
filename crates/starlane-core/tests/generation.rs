//! End-to-end generation tests for `starlane-core`.
//!
//! These run the full default pipeline on small galaxies and check the
//! graph-wide guarantees: reproducibility, separation, degree bounds, ore
//! placement, mirror pairing, and fail-fast behaviour.

// Integration tests use expect/unwrap extensively for clarity -- panicking
// on failure is the correct behavior in test code.
#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::arithmetic_side_effects,
    clippy::missing_panics_doc,
    clippy::panic
)]

use std::collections::BTreeSet;

use starlane_core::stages::{STAR_FIELD, StarFieldStage, WarpNetworkStage};
use starlane_core::{
    AbortSignal, GalaxyConfig, GalaxyGenerator, Generation, GenerationContext, GenerationError,
    Pipeline, PipelineError, Stage, StageError, StageMetrics,
};
use starlane_types::{BodyScope, GateType};
use starlane_world::{Galaxy, listed_price};

// =============================================================================
// Helpers
// =============================================================================

fn small_config() -> GalaxyConfig {
    let mut config = GalaxyConfig::default();
    config.galaxy.name = String::from("Testbed");
    config.galaxy.width = 200;
    config.galaxy.height = 200;
    config.stars.count = 60;
    config.stars.min_separation = 10.0;
    config.markets.station_ratio = 0.5;
    config.gates.mirror_pairs = 2;
    config
}

fn generate(config: GalaxyConfig, seed: u64) -> Generation {
    GalaxyGenerator::new(config, seed)
        .expect("valid config")
        .generate()
        .expect("generation succeeds")
}

// =============================================================================
// Reproducibility
// =============================================================================

#[test]
fn same_seed_same_galaxy() {
    let a = generate(small_config(), 2026);
    let b = generate(small_config(), 2026);

    assert_eq!(
        serde_json::to_string(&a.galaxy).unwrap(),
        serde_json::to_string(&b.galaxy).unwrap()
    );
    assert_eq!(
        serde_json::to_string(&a.report).unwrap(),
        serde_json::to_string(&b.report).unwrap()
    );
    assert_eq!(a.galaxy.id(), b.galaxy.id());
}

#[test]
fn different_seeds_differ() {
    let a = generate(small_config(), 1);
    let b = generate(small_config(), 2);
    assert_ne!(
        serde_json::to_string(&a.galaxy).unwrap(),
        serde_json::to_string(&b.galaxy).unwrap()
    );
}

// =============================================================================
// Graph invariants
// =============================================================================

#[test]
fn systems_are_separated_and_in_bounds() {
    let config = small_config();
    let min_separation = config.stars.min_separation;
    let generation = generate(config, 7);
    let galaxy = &generation.galaxy;
    let bounds = galaxy.bounds();

    assert!(galaxy.system_count() > 0);
    let systems = galaxy.systems();
    for (i, a) in systems.iter().enumerate() {
        assert!(bounds.contains(a.position));
        assert!(a.multiplicity >= 1);
        for b in &systems[i + 1..] {
            assert!(a.position.distance_to(b.position) >= min_separation);
        }
    }
}

#[test]
fn degrees_stay_within_bounds_and_network_is_connected() {
    let config = small_config();
    let (min, max) = (config.gates.min_degree, config.gates.max_degree);
    let generation = generate(config, 8);
    let galaxy = &generation.galaxy;

    assert!(galaxy.is_connected());
    for system in galaxy.systems() {
        let degree = u32::try_from(galaxy.degree(system.id)).unwrap();
        assert!((min..=max).contains(&degree), "degree {degree}");
    }
    assert!(generation.statistics.min_degree >= usize::try_from(min).unwrap());
    assert!(generation.statistics.max_degree <= usize::try_from(max).unwrap());
}

#[test]
fn body_scopes_and_ore_origins_hold() {
    let generation = generate(small_config(), 9);
    let galaxy = &generation.galaxy;

    for body in galaxy.universe_bodies() {
        assert_eq!(body.body_type.scope(), BodyScope::Universe);
    }
    for system in galaxy.systems() {
        for body in &system.bodies {
            assert_eq!(body.body_type.what_body_type_is(), "System");
            let band = body.temperature.unwrap();
            for deposit in &body.deposits {
                assert!(galaxy.ore(&deposit.ore_key).unwrap().forms_in(band));
            }
        }
    }
}

#[test]
fn markets_list_local_ores_at_listed_price() {
    let generation = generate(small_config(), 10);
    let galaxy = &generation.galaxy;

    let mut markets = 0;
    for system in galaxy.systems() {
        let Some(market) = &system.market else {
            continue;
        };
        markets += 1;
        let local = system.local_ore_keys();
        for listing in &market.listings {
            assert!(local.contains(listing.ore_key.as_str()));
            let ore = galaxy.ore(&listing.ore_key).unwrap();
            assert_eq!(listing.listed_price, listed_price(ore.base_price, ore.rarity));
        }
    }
    assert_eq!(markets, generation.statistics.markets);
}

#[test]
fn mirror_gates_come_in_pairs() {
    let generation = generate(small_config(), 11);
    let gates = generation.galaxy.gates();

    let entries: Vec<_> = gates
        .iter()
        .filter(|g| g.gate_type == GateType::MirrorEntry)
        .collect();
    assert_eq!(entries.len(), 2);
    let ids: BTreeSet<_> = gates.iter().map(|g| g.id).collect();
    for entry in entries {
        let partner_id = entry.paired_gate.unwrap();
        assert!(ids.contains(&partner_id));
        let partner = gates.iter().find(|g| g.id == partner_id).unwrap();
        assert_eq!(partner.gate_type, GateType::MirrorReturn);
        assert_eq!(partner.paired_gate, Some(entry.id));
    }
    assert_eq!(generation.statistics.mirror_pairs, 2);
}

#[test]
fn report_covers_every_stage_in_order() {
    let generation = generate(small_config(), 12);
    let report = &generation.report;

    assert_eq!(report.seed, 12);
    assert_eq!(
        report.stage_names(),
        vec![
            "star_field",
            "sector_grid",
            "warp_network",
            "planetary_systems",
            "deep_space",
            "mineral_deposits",
            "trading_markets",
            "mirror_gates",
        ]
    );
    let sum: u64 = report.stages.iter().map(|m| m.produced).sum();
    assert_eq!(report.total_produced, sum);
    assert_eq!(
        report.stage("star_field").unwrap().produced,
        u64::try_from(generation.galaxy.system_count()).unwrap()
    );
    assert!(report.finished_at >= report.started_at);
}

#[test]
fn every_system_is_filed_under_one_sector() {
    let generation = generate(small_config(), 13);
    let galaxy = &generation.galaxy;
    let grid = small_config().sectors.grid_size;

    assert_eq!(galaxy.sectors().len(), usize::try_from(grid * grid).unwrap());
    assert_eq!(generation.statistics.sectors, galaxy.sectors().len());
    let filed: usize = galaxy.sectors().iter().map(|s| s.systems.len()).sum();
    assert_eq!(filed, galaxy.system_count());
    for system in galaxy.systems() {
        let sector = galaxy.sector_of(system.id).unwrap();
        assert!(sector.systems.contains(&system.id));
    }
}

#[test]
fn mirror_sensor_threshold_comes_from_config() {
    let mut strict = small_config();
    strict.gates.mirror_sensor_level = 6;
    let mut relaxed = small_config();
    relaxed.gates.mirror_sensor_level = 3;
    let strict = GalaxyGenerator::new(strict, 14).unwrap();
    let relaxed = GalaxyGenerator::new(relaxed, 14).unwrap();
    let galaxy = strict.generate().unwrap().galaxy;

    let mirrors = |gates: Vec<&starlane_types::WarpGate>| {
        gates
            .iter()
            .filter(|g| g.gate_type.is_mirror_gate())
            .count()
    };
    assert_eq!(mirrors(strict.detectable_gates(&galaxy, 4)), 0);
    assert_eq!(mirrors(relaxed.detectable_gates(&galaxy, 4)), 4);
    assert_eq!(mirrors(strict.detectable_gates(&galaxy, 6)), 4);
}

// =============================================================================
// Failure handling
// =============================================================================

/// A stage that always fails after producing one entity.
struct Sabotage;

impl Stage for Sabotage {
    fn name(&self) -> &str {
        "sabotage"
    }

    fn dependencies(&self) -> &[&str] {
        &[STAR_FIELD]
    }

    fn run(
        &self,
        _galaxy: &mut Galaxy,
        _ctx: &mut GenerationContext<'_>,
        metrics: &mut StageMetrics,
    ) -> Result<(), StageError> {
        metrics.record_produced(1);
        Err(StageError::Failed {
            reason: String::from("sabotaged"),
        })
    }
}

#[test]
fn stage_failure_names_the_stage() {
    let pipeline = Pipeline::new(vec![Box::new(Sabotage), Box::new(StarFieldStage)]).unwrap();
    let generator = GalaxyGenerator::with_pipeline(small_config(), 3, pipeline).unwrap();

    match generator.generate().unwrap_err() {
        GenerationError::Pipeline {
            source:
                PipelineError::StageFailed {
                    stage,
                    produced,
                    completed,
                    ..
                },
        } => {
            assert_eq!(stage, "sabotage");
            assert_eq!(produced, 1);
            assert_eq!(completed, vec!["star_field"]);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn missing_dependency_is_rejected_up_front() {
    let err = Pipeline::new(vec![Box::new(WarpNetworkStage)]).unwrap_err();
    assert!(matches!(err, PipelineError::UnknownDependency { .. }));
}

#[test]
fn unsatisfiable_degree_fails_the_warp_network_stage() {
    let mut config = small_config();
    config.stars.count = 2;
    config.gates.min_degree = 2;
    let err = GalaxyGenerator::new(config, 4)
        .unwrap()
        .generate()
        .unwrap_err();
    assert!(matches!(
        err,
        GenerationError::Pipeline {
            source: PipelineError::StageFailed { ref stage, .. }
        } if stage == "warp_network"
    ));
}

#[test]
fn abort_signal_stops_generation() {
    let generator = GalaxyGenerator::new(small_config(), 5).unwrap();
    let abort = AbortSignal::new();
    abort.request_abort();
    let err = generator.generate_with_abort(&abort).unwrap_err();
    assert!(matches!(
        err,
        GenerationError::Pipeline {
            source: PipelineError::Aborted { .. }
        }
    ));
}
