//! Black holes and nebulae.

use starlane_types::{BodyId, BodyType, CelestialBody, Coordinate};
use starlane_world::{Galaxy, PointSampler, names};
use tracing::warn;

use super::{DEEP_SPACE, STAR_FIELD, as_count, as_metric};
use crate::context::{DeepSpace, GenerationContext};
use crate::metrics::StageMetrics;
use crate::stage::{Stage, StageError};

/// Scatters universe-scope bodies between the systems.
///
/// Black holes are placed before nebulae, so a crowded galaxy loses
/// nebulae first. Every body keeps the star separation from systems and
/// from each other.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeepSpaceStage;

impl Stage for DeepSpaceStage {
    fn name(&self) -> &str {
        DEEP_SPACE
    }

    fn dependencies(&self) -> &[&str] {
        &[STAR_FIELD]
    }

    fn run(
        &self,
        galaxy: &mut Galaxy,
        ctx: &mut GenerationContext<'_>,
        metrics: &mut StageMetrics,
    ) -> Result<(), StageError> {
        ctx.require_star_field()?;
        let deep_space = &ctx.config.deep_space;
        let stars = &ctx.config.stars;
        let mut rng = ctx.stage_rng(DEEP_SPACE);

        let black_holes = as_count(deep_space.black_holes);
        let requested = black_holes.saturating_add(as_count(deep_space.nebulae));
        let obstacles: Vec<Coordinate> = galaxy.systems().iter().map(|s| s.position).collect();
        let sample = PointSampler::new(galaxy.bounds(), stars.min_separation)
            .with_attempts_per_point(stars.attempts_per_point)
            .sample_avoiding(requested, &obstacles, &mut rng);

        metrics.set("attempts", sample.attempts);
        metrics.set("shortfall", as_metric(sample.shortfall()));
        if sample.shortfall() > 0 {
            warn!(
                requested,
                placed = sample.points.len(),
                "Deep space could not place every requested body"
            );
        }

        let mut placed: Vec<BodyId> = Vec::with_capacity(sample.points.len());
        for (index, position) in sample.points.into_iter().enumerate() {
            let body_type = if index < black_holes {
                BodyType::BlackHole
            } else {
                BodyType::Nebula
            };
            let id = BodyId::from_random_bytes(rng.id_bytes());
            galaxy.add_universe_body(CelestialBody {
                id,
                name: names::deep_space_name(&mut rng),
                body_type,
                temperature: None,
                size: None,
                habitability: None,
                orbital_index: 0,
                orbits: None,
                position: Some(position),
                deposits: Vec::new(),
            })?;
            metrics.record_produced(1);
            metrics.increment(body_type.as_str());
            placed.push(id);
        }

        ctx.deep_space = Some(DeepSpace { bodies: placed });
        Ok(())
    }
}
