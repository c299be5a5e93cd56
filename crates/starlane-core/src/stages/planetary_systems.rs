//! Bodies orbiting each system.

use starlane_types::{BodyId, BodyType, CelestialBody, StarClass, SystemId};
use starlane_world::{Classifier, Galaxy, GalaxyRng, WorldError, names};
use tracing::debug;

use super::{PLANETARY_SYSTEMS, STAR_FIELD};
use crate::config::BodiesConfig;
use crate::context::{GenerationContext, PlanetarySystems};
use crate::metrics::StageMetrics;
use crate::stage::{Stage, StageError};

/// Habitability range for planets and dwarf planets.
const HABITABILITY_MIN: u32 = 10;
const HABITABILITY_MAX: u32 = 90;

/// Fills systems with planets, moons, and belts.
///
/// With `system_probability` a system gets a full set of bodies drawn from
/// the body-type weights; otherwise it becomes a loose asteroid field with a
/// single belt. Temperatures come from the table for the system's star
/// class.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlanetarySystemsStage;

impl Stage for PlanetarySystemsStage {
    fn name(&self) -> &str {
        PLANETARY_SYSTEMS
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
        let bodies_config = &ctx.config.bodies;
        let classifier = ctx.classifier;
        let mut rng = ctx.stage_rng(PLANETARY_SYSTEMS);
        let mut output = PlanetarySystems::default();

        for &system_id in &ctx.require_star_field()?.systems {
            let (star, class) = galaxy
                .system(system_id)
                .map(|s| (s.name.clone(), s.star_class))
                .ok_or(WorldError::SystemNotFound(system_id))?;

            let mut builder = BodyBuilder {
                galaxy: &mut *galaxy,
                classifier,
                rng: &mut rng,
                system: system_id,
                star: &star,
                class,
                metrics: &mut *metrics,
                created: &mut output.bodies,
            };

            if builder.rng.chance(bodies_config.system_probability) {
                builder.full_system(bodies_config)?;
            } else {
                builder.asteroid_field()?;
                output.asteroid_fields.push(system_id);
            }
        }

        debug!(
            bodies = output.bodies.len(),
            asteroid_fields = output.asteroid_fields.len(),
            "Planetary systems generated"
        );
        ctx.planetary_systems = Some(output);
        Ok(())
    }
}

/// Creates the bodies of one system.
struct BodyBuilder<'g, 'r> {
    galaxy: &'g mut Galaxy,
    classifier: &'r Classifier,
    rng: &'r mut GalaxyRng,
    system: SystemId,
    star: &'r str,
    class: StarClass,
    metrics: &'g mut StageMetrics,
    created: &'g mut Vec<(SystemId, BodyId)>,
}

impl BodyBuilder<'_, '_> {
    fn full_system(&mut self, config: &BodiesConfig) -> Result<(), StageError> {
        let count = self.rng.range_u32(config.min_bodies, config.max_bodies);
        for orbital_index in 1..=count {
            let body_type = self.classifier.body_type(self.rng);
            let name = names::planet_name(self.star, orbital_index);
            let planet = self.attach(body_type, name.clone(), orbital_index, None)?;

            if body_type == BodyType::Planet {
                for moon_index in 0..config.max_moons {
                    if !self.rng.chance(config.moon_chance) {
                        break;
                    }
                    let moon_name = names::moon_name(&name, moon_index);
                    self.attach(BodyType::Moon, moon_name, orbital_index, Some(planet))?;
                }
            }
        }
        Ok(())
    }

    fn asteroid_field(&mut self) -> Result<(), StageError> {
        let name = format!("{} Belt", self.star);
        self.attach(BodyType::AsteroidBelt, name, 1, None)?;
        self.metrics.increment("asteroid_fields");
        Ok(())
    }

    fn attach(
        &mut self,
        body_type: BodyType,
        name: String,
        orbital_index: u32,
        orbits: Option<BodyId>,
    ) -> Result<BodyId, StageError> {
        let temperature = self.classifier.temperature(self.class, self.rng);
        let size = self.classifier.size(self.rng);
        let habitability = body_type
            .is_planetary()
            .then(|| self.rng.range_u32(HABITABILITY_MIN, HABITABILITY_MAX))
            .and_then(|h| u8::try_from(h).ok());
        let id = BodyId::from_random_bytes(self.rng.id_bytes());

        self.galaxy.attach_body(
            self.system,
            CelestialBody {
                id,
                name,
                body_type,
                temperature: Some(temperature),
                size: Some(size),
                habitability,
                orbital_index,
                orbits,
                position: None,
                deposits: Vec::new(),
            },
        )?;
        self.metrics.record_produced(1);
        self.metrics.increment(body_type.as_str());
        self.created.push((self.system, id));
        Ok(id)
    }
}
