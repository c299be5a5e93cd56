//! Sector grid overlay.

use starlane_types::{Sector, SectorId, SystemId};
use starlane_world::{Galaxy, SectorLayout, WorldError, sector_name};
use tracing::debug;

use super::{SECTOR_GRID, STAR_FIELD, as_count, as_metric};
use crate::context::{GenerationContext, SectorGrid};
use crate::metrics::StageMetrics;
use crate::stage::{Stage, StageError};

/// Splits the galaxy into a square grid of named sectors and files every
/// system under the sector it lies in.
///
/// Cells are created row by row with zero danger. A system on an inner
/// cell edge belongs to the cell after it; one on the galaxy's far edge
/// belongs to the last row or column.
#[derive(Debug, Clone, Copy, Default)]
pub struct SectorGridStage;

impl Stage for SectorGridStage {
    fn name(&self) -> &str {
        SECTOR_GRID
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
        let systems = ctx.require_star_field()?.systems.clone();
        let grid_size = ctx.config.sectors.grid_size;
        let layout = SectorLayout::new(galaxy.width(), galaxy.height(), grid_size).ok_or_else(
            || StageError::Failed {
                reason: format!("cannot lay a {grid_size}x{grid_size} grid over the galaxy"),
            },
        )?;
        let mut rng = ctx.stage_rng(SECTOR_GRID);

        let cells = as_count(grid_size).saturating_mul(as_count(grid_size));
        let mut sectors = Vec::with_capacity(cells);
        for grid_y in 0..grid_size {
            for grid_x in 0..grid_size {
                let (x_min, x_max, y_min, y_max) = layout.cell_bounds(grid_x, grid_y);
                let id = SectorId::from_random_bytes(rng.id_bytes());
                galaxy.add_sector(Sector {
                    id,
                    name: sector_name(grid_x, grid_y),
                    grid_x,
                    grid_y,
                    x_min,
                    x_max,
                    y_min,
                    y_max,
                    danger_level: 0,
                    systems: Vec::new(),
                })?;
                metrics.record_produced(1);
                sectors.push(id);
            }
        }

        for &system in &systems {
            let sector = sector_for(galaxy, &layout, system)?;
            galaxy.assign_to_sector(system, sector)?;
        }

        metrics.set("grid_size", u64::from(grid_size));
        metrics.set("systems_assigned", as_metric(systems.len()));
        debug!(
            grid_size,
            sectors = sectors.len(),
            systems = systems.len(),
            "Sector grid laid"
        );
        ctx.sector_grid = Some(SectorGrid {
            grid_size,
            sectors,
            assigned: systems.len(),
        });
        Ok(())
    }
}

fn sector_for(
    galaxy: &Galaxy,
    layout: &SectorLayout,
    system: SystemId,
) -> Result<SectorId, StageError> {
    let position = galaxy
        .system(system)
        .map(|s| s.position)
        .ok_or(WorldError::SystemNotFound(system))?;
    let (grid_x, grid_y) = layout.cell_of(f64::from(position.x), f64::from(position.y));
    galaxy
        .sector_at(grid_x, grid_y)
        .map(|s| s.id)
        .ok_or_else(|| StageError::Failed {
            reason: format!("no sector at grid cell ({grid_x}, {grid_y})"),
        })
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::indexing_slicing,
    clippy::arithmetic_side_effects
)]
mod tests {
    use std::collections::BTreeMap;

    use starlane_types::{Coordinate, GalaxyId, StarClass, System};

    use super::*;
    use crate::config::GalaxyConfig;
    use crate::context::StarField;
    use crate::stages::StarFieldStage;

    fn empty_galaxy(config: &GalaxyConfig) -> Galaxy {
        Galaxy::new(
            GalaxyId::from_random_bytes([6; 16]),
            String::from("test"),
            17,
            config.galaxy.width,
            config.galaxy.height,
            config.ores.clone(),
        )
        .unwrap()
    }

    #[test]
    fn every_system_lands_in_exactly_one_sector() {
        let config = GalaxyConfig::default();
        let classifier = config.classifier().unwrap();
        let mut galaxy = empty_galaxy(&config);
        let mut ctx = GenerationContext::new(17, &config, &classifier);
        StarFieldStage
            .run(&mut galaxy, &mut ctx, &mut StageMetrics::new(STAR_FIELD))
            .unwrap();
        let mut metrics = StageMetrics::new(SECTOR_GRID);
        SectorGridStage.run(&mut galaxy, &mut ctx, &mut metrics).unwrap();

        let grid = ctx.sector_grid.unwrap();
        assert_eq!(grid.sectors.len(), 25);
        assert_eq!(metrics.produced, 25);
        assert_eq!(grid.assigned, galaxy.system_count());

        let mut memberships: BTreeMap<SystemId, usize> = BTreeMap::new();
        for sector in galaxy.sectors() {
            for &system in &sector.systems {
                *memberships.entry(system).or_default() += 1;
            }
        }
        assert_eq!(memberships.len(), galaxy.system_count());
        assert!(memberships.values().all(|&count| count == 1));
        for system in galaxy.systems() {
            let sector = galaxy.sector_of(system.id).unwrap();
            let (x, y) = (f64::from(system.position.x), f64::from(system.position.y));
            assert!(sector.contains(x, y), "{} outside {}", system.name, sector.name);
        }
    }

    #[test]
    fn boundary_systems_are_filed_by_floor_and_clamp() {
        let config = GalaxyConfig::default();
        let classifier = config.classifier().unwrap();
        let mut galaxy = empty_galaxy(&config);
        let placements = [(0, 0), (60, 60), (299, 299), (240, 0), (59, 120)];
        let mut systems = Vec::new();
        for (tag, (x, y)) in (1_u8..).zip(placements) {
            let id = galaxy
                .add_system(System {
                    id: SystemId::from_random_bytes([tag; 16]),
                    name: format!("S{tag}"),
                    position: Coordinate::new(x, y),
                    star_class: StarClass::MainSequence,
                    multiplicity: 1,
                    bodies: Vec::new(),
                    market: None,
                })
                .unwrap();
            systems.push(id);
        }
        let mut ctx = GenerationContext::new(17, &config, &classifier);
        ctx.star_field = Some(StarField {
            systems: systems.clone(),
            shortfall: 0,
        });
        SectorGridStage
            .run(&mut galaxy, &mut ctx, &mut StageMetrics::new(SECTOR_GRID))
            .unwrap();

        let cell = |id: SystemId| {
            let sector = galaxy.sector_of(id).unwrap();
            (sector.grid_x, sector.grid_y)
        };
        assert_eq!(cell(systems[0]), (0, 0));
        assert_eq!(cell(systems[1]), (1, 1));
        assert_eq!(cell(systems[2]), (4, 4));
        assert_eq!(cell(systems[3]), (4, 0));
        assert_eq!(cell(systems[4]), (0, 2));
        assert_eq!(galaxy.sector_at(4, 4).unwrap().name, "Epsilon-5");
        assert!(galaxy.sectors().iter().all(|s| s.danger_level == 0));
    }

    #[test]
    fn requires_the_star_field() {
        let config = GalaxyConfig::default();
        let classifier = config.classifier().unwrap();
        let mut galaxy = empty_galaxy(&config);
        let mut ctx = GenerationContext::new(17, &config, &classifier);
        let err = SectorGridStage
            .run(&mut galaxy, &mut ctx, &mut StageMetrics::new(SECTOR_GRID))
            .unwrap_err();
        assert!(matches!(err, StageError::MissingInput { input: "star_field" }));
        assert!(galaxy.sectors().is_empty());
    }
}
