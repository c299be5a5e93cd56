//! Ore seeding.

use starlane_types::{BodyId, SystemId, TemperatureBand};
use starlane_world::{Galaxy, OreSelector, WorldError};
use tracing::debug;

use super::{MINERAL_DEPOSITS, PLANETARY_SYSTEMS};
use crate::config::DepositsConfig;
use crate::context::{GenerationContext, MineralDeposits};
use crate::metrics::StageMetrics;
use crate::stage::{Stage, StageError};

/// Places ore deposits on system-scope bodies.
///
/// A body is seeded with `deposit_chance`. Each deposit picks an ore whose
/// origin bands include the body's band, weighted by rarity abundance, so
/// an ore never lands where it cannot form. Repeated picks of one ore on a
/// body merge into a single deposit.
#[derive(Debug, Clone, Copy, Default)]
pub struct MineralDepositsStage;

impl Stage for MineralDepositsStage {
    fn name(&self) -> &str {
        MINERAL_DEPOSITS
    }

    fn dependencies(&self) -> &[&str] {
        &[PLANETARY_SYSTEMS]
    }

    fn run(
        &self,
        galaxy: &mut Galaxy,
        ctx: &mut GenerationContext<'_>,
        metrics: &mut StageMetrics,
    ) -> Result<(), StageError> {
        let config = &ctx.config.deposits;
        let catalog = galaxy.ores().to_vec();
        let selector = OreSelector::new(&catalog);
        let mut rng = ctx.stage_rng(MINERAL_DEPOSITS);
        let mut output = MineralDeposits::default();

        for &(system, body) in &ctx.require_planetary_systems()?.bodies {
            let Some(band) = band_of(galaxy, system, body)? else {
                continue;
            };
            if !rng.chance(config.deposit_chance) {
                continue;
            }
            if !selector.has_candidates(band) {
                metrics.increment("barren_bodies");
                continue;
            }

            let count = rng.range_u32(config.min_per_body, config.max_per_body);
            for _ in 0..count {
                let Some(ore) = selector.pick(band, &mut rng) else {
                    break;
                };
                let quantity = scaled_quantity(
                    config,
                    rng.range_u32(config.min_quantity, config.max_quantity),
                );
                galaxy.place_deposit(system, body, &ore.key, quantity)?;
                output.placements = output.placements.saturating_add(1);
                metrics.record_produced(1);
                metrics.increment(ore.rarity.as_str());
            }
            if count > 0 {
                output.seeded_bodies.push(body);
            }
        }

        debug!(
            placements = output.placements,
            bodies = output.seeded_bodies.len(),
            "Mineral deposits placed"
        );
        ctx.mineral_deposits = Some(output);
        Ok(())
    }
}

fn band_of(
    galaxy: &Galaxy,
    system: SystemId,
    body: BodyId,
) -> Result<Option<TemperatureBand>, WorldError> {
    galaxy
        .system(system)
        .ok_or(WorldError::SystemNotFound(system))?
        .bodies
        .iter()
        .find(|b| b.id == body)
        .map(|b| b.temperature)
        .ok_or(WorldError::BodyNotFound(body))
}

/// Raw quantity times the richness multiplier, saturating at `u32::MAX`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn scaled_quantity(config: &DepositsConfig, raw: u32) -> u32 {
    let scaled = (f64::from(raw) * config.richness_multiplier).round();
    if scaled >= f64::from(u32::MAX) {
        u32::MAX
    } else if scaled <= 0.0 {
        0
    } else {
        scaled as u32
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::BTreeSet;

    use starlane_types::GalaxyId;

    use super::*;
    use crate::config::GalaxyConfig;
    use crate::stages::{PlanetarySystemsStage, STAR_FIELD, StarFieldStage};

    #[test]
    fn quantity_scaling_saturates() {
        let mut config = GalaxyConfig::default().deposits;
        config.richness_multiplier = 2.0;
        assert_eq!(scaled_quantity(&config, 300), 600);
        config.richness_multiplier = 1e12;
        assert_eq!(scaled_quantity(&config, 300), u32::MAX);
        config.richness_multiplier = 0.0;
        assert_eq!(scaled_quantity(&config, 300), 0);
    }

    #[test]
    fn deposits_only_form_in_origin_bands() {
        let mut config = GalaxyConfig::default();
        config.stars.count = 60;
        config.deposits.deposit_chance = 1.0;
        let classifier = config.classifier().unwrap();
        let mut galaxy = Galaxy::new(
            GalaxyId::from_random_bytes([6; 16]),
            String::from("test"),
            41,
            config.galaxy.width,
            config.galaxy.height,
            config.ores.clone(),
        )
        .unwrap();
        let mut ctx = GenerationContext::new(41, &config, &classifier);
        StarFieldStage
            .run(&mut galaxy, &mut ctx, &mut StageMetrics::new(STAR_FIELD))
            .unwrap();
        PlanetarySystemsStage
            .run(
                &mut galaxy,
                &mut ctx,
                &mut StageMetrics::new(PLANETARY_SYSTEMS),
            )
            .unwrap();
        let mut metrics = StageMetrics::new(MINERAL_DEPOSITS);
        MineralDepositsStage
            .run(&mut galaxy, &mut ctx, &mut metrics)
            .unwrap();

        let output = ctx.mineral_deposits.unwrap();
        assert!(output.placements > 0);
        assert_eq!(metrics.produced, output.placements);

        let mut seen = 0_usize;
        for body in galaxy.systems().iter().flat_map(|s| s.bodies.iter()) {
            let band = body.temperature.unwrap();
            for deposit in &body.deposits {
                let ore = galaxy.ore(&deposit.ore_key).unwrap();
                assert!(ore.forms_in(band), "{} on {band:?}", ore.key);
                assert!(deposit.quantity >= config.deposits.min_quantity);
                seen += 1;
            }
            let keys: BTreeSet<_> = body.deposits.iter().map(|d| &d.ore_key).collect();
            assert_eq!(keys.len(), body.deposits.len());
        }
        assert!(seen > 0);
    }
}
