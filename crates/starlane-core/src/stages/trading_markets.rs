//! Trading stations.

use rand::seq::SliceRandom;
use starlane_types::{Market, MarketId, MarketListing, SystemId};
use starlane_world::{Galaxy, WorldError, listed_ore_count, listed_price, names, stock_range};
use tracing::debug;

use super::{MINERAL_DEPOSITS, TRADING_MARKETS, as_metric};
use crate::context::{GenerationContext, TradingMarkets};
use crate::metrics::StageMetrics;
use crate::stage::{Stage, StageError};

/// Opens markets in a `station_ratio` share of systems.
///
/// A market lists `max(1, round(n * listed_ore_fraction))` of the `n` ore
/// types deposited in its system, chosen at random, at base price times
/// rarity multiplier. A system with no deposits gets a market with no
/// listings.
#[derive(Debug, Clone, Copy, Default)]
pub struct TradingMarketsStage;

impl Stage for TradingMarketsStage {
    fn name(&self) -> &str {
        TRADING_MARKETS
    }

    fn dependencies(&self) -> &[&str] {
        &[MINERAL_DEPOSITS]
    }

    fn run(
        &self,
        galaxy: &mut Galaxy,
        ctx: &mut GenerationContext<'_>,
        metrics: &mut StageMetrics,
    ) -> Result<(), StageError> {
        ctx.require_mineral_deposits()?;
        let config = &ctx.config.markets;
        let mut rng = ctx.stage_rng(TRADING_MARKETS);
        let system_ids: Vec<SystemId> = galaxy.systems().iter().map(|s| s.id).collect();
        let mut markets: Vec<MarketId> = Vec::new();

        for system_id in system_ids {
            if !rng.chance(config.station_ratio) {
                continue;
            }
            let system = galaxy
                .system(system_id)
                .ok_or(WorldError::SystemNotFound(system_id))?;

            let mut local: Vec<&str> = system.local_ore_keys().into_iter().collect();
            local.shuffle(&mut rng);
            local.truncate(listed_ore_count(local.len(), config.listed_ore_fraction));

            let mut listings = Vec::with_capacity(local.len());
            for key in local {
                let ore = galaxy
                    .ore(key)
                    .ok_or_else(|| WorldError::UnknownOre(key.to_owned()))?;
                let stock = stock_range(ore.rarity);
                listings.push(MarketListing {
                    ore_key: ore.key.clone(),
                    rarity: ore.rarity,
                    listed_price: listed_price(ore.base_price, ore.rarity),
                    stock: rng.range_u32(*stock.start(), *stock.end()),
                });
            }

            let market = Market {
                id: MarketId::from_random_bytes(rng.id_bytes()),
                system: system_id,
                name: names::station_name(&system.name, &mut rng),
                listings,
            };
            if market.listings.is_empty() {
                metrics.increment("empty_markets");
            }
            metrics.add("listings", as_metric(market.listings.len()));
            debug!(
                market = %market.id,
                system = %system_id,
                listings = market.listings.len(),
                "Opened market"
            );

            markets.push(galaxy.open_market(market)?);
            metrics.record_produced(1);
        }

        ctx.trading_markets = Some(TradingMarkets { markets });
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use starlane_types::GalaxyId;

    use super::*;
    use crate::config::GalaxyConfig;
    use crate::stages::{
        MineralDepositsStage, PLANETARY_SYSTEMS, PlanetarySystemsStage, STAR_FIELD,
        StarFieldStage,
    };

    fn generate(config: &GalaxyConfig, seed: u64) -> (Galaxy, StageMetrics) {
        let classifier = config.classifier().unwrap();
        let mut galaxy = Galaxy::new(
            GalaxyId::from_random_bytes([7; 16]),
            String::from("test"),
            seed,
            config.galaxy.width,
            config.galaxy.height,
            config.ores.clone(),
        )
        .unwrap();
        let mut ctx = GenerationContext::new(seed, config, &classifier);
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
        MineralDepositsStage
            .run(
                &mut galaxy,
                &mut ctx,
                &mut StageMetrics::new(MINERAL_DEPOSITS),
            )
            .unwrap();
        let mut metrics = StageMetrics::new(TRADING_MARKETS);
        TradingMarketsStage
            .run(&mut galaxy, &mut ctx, &mut metrics)
            .unwrap();
        (galaxy, metrics)
    }

    #[test]
    fn listings_are_local_ores_at_listed_price() {
        let mut config = GalaxyConfig::default();
        config.stars.count = 50;
        config.markets.station_ratio = 1.0;
        let (galaxy, metrics) = generate(&config, 51);

        assert_eq!(metrics.produced, u64::try_from(galaxy.system_count()).unwrap());
        for system in galaxy.systems() {
            let market = system.market.as_ref().unwrap();
            let local = system.local_ore_keys();
            assert_eq!(
                market.listings.len(),
                listed_ore_count(local.len(), config.markets.listed_ore_fraction)
            );
            for listing in &market.listings {
                assert!(local.contains(listing.ore_key.as_str()));
                let ore = galaxy.ore(&listing.ore_key).unwrap();
                assert_eq!(listing.listed_price, listed_price(ore.base_price, ore.rarity));
                assert!(stock_range(ore.rarity).contains(&listing.stock));
            }
        }
    }

    #[test]
    fn zero_station_ratio_opens_nothing() {
        let mut config = GalaxyConfig::default();
        config.stars.count = 30;
        config.markets.station_ratio = 0.0;
        let (galaxy, metrics) = generate(&config, 52);
        assert_eq!(metrics.produced, 0);
        assert!(galaxy.systems().iter().all(|s| s.market.is_none()));
    }
}
