//! Star placement and classification.

use std::collections::BTreeSet;

use starlane_types::{System, SystemId};
use starlane_world::{Galaxy, PointSampler, names};
use tracing::{debug, warn};

use super::{STAR_FIELD, as_count, as_metric};
use crate::context::{GenerationContext, StarField};
use crate::metrics::StageMetrics;
use crate::stage::{Stage, StageError};

/// Places systems with the point generator and classifies their stars.
///
/// Each accepted point becomes a system with a weighted star class, a
/// multiplicity in `1..=max_multiplicity`, and a generated name. Names are
/// unique within the galaxy; a repeat takes the system's one-based
/// placement number as a suffix. Points the sampler could not fit are a
/// soft shortfall recorded in metrics.
#[derive(Debug, Clone, Copy, Default)]
pub struct StarFieldStage;

impl Stage for StarFieldStage {
    fn name(&self) -> &str {
        STAR_FIELD
    }

    fn dependencies(&self) -> &[&str] {
        &[]
    }

    fn run(
        &self,
        galaxy: &mut Galaxy,
        ctx: &mut GenerationContext<'_>,
        metrics: &mut StageMetrics,
    ) -> Result<(), StageError> {
        let stars = &ctx.config.stars;
        let bounds = ctx.config.placement_bounds().ok_or_else(|| StageError::Failed {
            reason: String::from("star margin leaves no placement area"),
        })?;
        let mut rng = ctx.stage_rng(STAR_FIELD);

        let sample = PointSampler::new(bounds, stars.min_separation)
            .with_attempts_per_point(stars.attempts_per_point)
            .sample(as_count(stars.count), &mut rng);

        metrics.set("requested", as_metric(sample.requested));
        metrics.set("attempts", sample.attempts);
        metrics.set("shortfall", as_metric(sample.shortfall()));
        if sample.shortfall() > 0 {
            warn!(
                requested = sample.requested,
                placed = sample.points.len(),
                min_separation = stars.min_separation,
                "Star field could not place every requested star"
            );
        }

        let max_multiplicity = u32::from(stars.max_multiplicity.max(1));
        let mut placed = Vec::with_capacity(sample.points.len());
        let mut taken = BTreeSet::new();
        for position in &sample.points {
            let star_class = ctx.classifier.star_class(&mut rng);
            let multiplicity = u8::try_from(rng.range_u32(1, max_multiplicity)).unwrap_or(1);
            let drawn = names::star_name(&mut rng);
            if taken.contains(&drawn) {
                metrics.increment("renamed");
            }
            let name = names::claim_unique(drawn, placed.len().saturating_add(1), &mut taken);
            let id = SystemId::from_random_bytes(rng.id_bytes());

            debug!(
                system = %id,
                %name,
                class = star_class.as_str(),
                x = position.x,
                y = position.y,
                "Placed system"
            );
            galaxy.add_system(System {
                id,
                name,
                position: *position,
                star_class,
                multiplicity,
                bodies: Vec::new(),
                market: None,
            })?;

            metrics.record_produced(1);
            metrics.increment(star_class.as_str());
            if multiplicity > 1 {
                metrics.increment("multi_star");
            }
            placed.push(id);
        }

        ctx.star_field = Some(StarField {
            systems: placed,
            shortfall: sample.shortfall(),
        });
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use starlane_types::GalaxyId;

    use super::*;
    use crate::config::GalaxyConfig;

    fn run(config: &GalaxyConfig) -> (Galaxy, StageMetrics, StarField) {
        let classifier = config.classifier().unwrap();
        let mut galaxy = Galaxy::new(
            GalaxyId::from_random_bytes([1; 16]),
            String::from("test"),
            3,
            config.galaxy.width,
            config.galaxy.height,
            config.ores.clone(),
        )
        .unwrap();
        let mut ctx = GenerationContext::new(3, config, &classifier);
        let mut metrics = StageMetrics::new(STAR_FIELD);
        StarFieldStage.run(&mut galaxy, &mut ctx, &mut metrics).unwrap();
        let field = ctx.star_field.take().unwrap();
        (galaxy, metrics, field)
    }

    #[test]
    fn places_separated_systems_inside_the_margin() {
        let mut config = GalaxyConfig::default();
        config.stars.count = 40;
        config.stars.margin = 10;
        let (galaxy, metrics, field) = run(&config);

        let bounds = config.placement_bounds().unwrap();
        assert_eq!(field.systems.len(), galaxy.system_count());
        assert_eq!(metrics.produced, 40);
        for (i, a) in galaxy.systems().iter().enumerate() {
            assert!(bounds.contains(a.position));
            assert!(a.multiplicity >= 1 && a.multiplicity <= config.stars.max_multiplicity);
            for b in galaxy.systems().iter().skip(i + 1) {
                assert!(a.position.distance_to(b.position) >= config.stars.min_separation);
            }
        }
    }

    #[test]
    fn system_names_are_unique_in_a_dense_field() {
        let mut config = GalaxyConfig::default();
        config.galaxy.width = 400;
        config.galaxy.height = 400;
        config.stars.count = 1500;
        config.stars.min_separation = 2.0;
        let (galaxy, metrics, _) = run(&config);

        let names: BTreeSet<&str> = galaxy.systems().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names.len(), galaxy.system_count());
        assert!(metrics.count("renamed") > 0);
    }

    #[test]
    fn overcrowded_field_records_a_shortfall() {
        let mut config = GalaxyConfig::default();
        config.galaxy.width = 20;
        config.galaxy.height = 20;
        config.stars.count = 50;
        config.stars.min_separation = 10.0;
        let (galaxy, metrics, field) = run(&config);

        assert!(galaxy.system_count() < 50);
        assert_eq!(field.shortfall, 50 - galaxy.system_count());
        assert_eq!(metrics.count("shortfall"), u64::try_from(field.shortfall).unwrap());
    }
}
