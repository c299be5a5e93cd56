//! Typed state threaded through pipeline stages.
//!
//! Each stage owns one `Option` slot it fills on success. Downstream stages
//! read the slots of the stages they depend on; a missing slot means the
//! pipeline was assembled without that dependency and surfaces as
//! [`StageError::MissingInput`].

use starlane_types::{BodyId, GateId, MarketId, SectorId, SystemId};
use starlane_world::{Classifier, GalaxyRng};

use crate::config::GalaxyConfig;
use crate::stage::StageError;

/// Systems placed by the star field stage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StarField {
    /// System identifiers in placement order.
    pub systems: Vec<SystemId>,
    /// Stars requested but not placed.
    pub shortfall: usize,
}

/// Lanes created by the warp network stage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WarpNetwork {
    /// Lane gate identifiers in creation order.
    pub lanes: Vec<GateId>,
    /// Link passes the degree top-up needed.
    pub top_up_passes: usize,
}

/// Cells laid down by the sector grid stage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectorGrid {
    /// Cells per side.
    pub grid_size: u32,
    /// Sector identifiers, row by row.
    pub sectors: Vec<SectorId>,
    /// Systems assigned to a sector.
    pub assigned: usize,
}

/// Bodies created by the planetary systems stage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlanetarySystems {
    /// Every system-scope body with its owning system, in creation order.
    pub bodies: Vec<(SystemId, BodyId)>,
    /// Systems generated as loose asteroid fields.
    pub asteroid_fields: Vec<SystemId>,
}

/// Universe-scope bodies placed by the deep space stage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeepSpace {
    /// Body identifiers in placement order.
    pub bodies: Vec<BodyId>,
}

/// Outcome of the mineral deposit stage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MineralDeposits {
    /// Deposit placements made (merges included).
    pub placements: u64,
    /// Bodies that received at least one deposit.
    pub seeded_bodies: Vec<BodyId>,
}

/// Markets opened by the trading markets stage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TradingMarkets {
    /// Market identifiers in opening order.
    pub markets: Vec<MarketId>,
}

/// Mirror pairs created by the mirror gate stage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MirrorGates {
    /// `(entry, return)` gate identifiers.
    pub pairs: Vec<(GateId, GateId)>,
}

/// Shared generation state.
#[derive(Debug)]
pub struct GenerationContext<'a> {
    seed: u64,
    /// Validated configuration.
    pub config: &'a GalaxyConfig,
    /// Weight tables built from `config`.
    pub classifier: &'a Classifier,
    /// Filled by `star_field`.
    pub star_field: Option<StarField>,
    /// Filled by `sector_grid`.
    pub sector_grid: Option<SectorGrid>,
    /// Filled by `warp_network`.
    pub warp_network: Option<WarpNetwork>,
    /// Filled by `planetary_systems`.
    pub planetary_systems: Option<PlanetarySystems>,
    /// Filled by `deep_space`.
    pub deep_space: Option<DeepSpace>,
    /// Filled by `mineral_deposits`.
    pub mineral_deposits: Option<MineralDeposits>,
    /// Filled by `trading_markets`.
    pub trading_markets: Option<TradingMarkets>,
    /// Filled by `mirror_gates`.
    pub mirror_gates: Option<MirrorGates>,
}

impl<'a> GenerationContext<'a> {
    /// Empty context for a run.
    pub const fn new(seed: u64, config: &'a GalaxyConfig, classifier: &'a Classifier) -> Self {
        Self {
            seed,
            config,
            classifier,
            star_field: None,
            sector_grid: None,
            warp_network: None,
            planetary_systems: None,
            deep_space: None,
            mineral_deposits: None,
            trading_markets: None,
            mirror_gates: None,
        }
    }

    /// Run seed.
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// The RNG sub-stream reserved for `stage`.
    ///
    /// Streams depend only on the run seed and the stage name, so a stage
    /// draws the same sequence wherever it lands in the execution order.
    pub fn stage_rng(&self, stage: &str) -> GalaxyRng {
        GalaxyRng::for_stream(self.seed, stage)
    }

    /// Star field output, or [`StageError::MissingInput`].
    pub fn require_star_field(&self) -> Result<&StarField, StageError> {
        self.star_field
            .as_ref()
            .ok_or(StageError::MissingInput { input: "star_field" })
    }

    /// Warp network output, or [`StageError::MissingInput`].
    pub fn require_warp_network(&self) -> Result<&WarpNetwork, StageError> {
        self.warp_network
            .as_ref()
            .ok_or(StageError::MissingInput {
                input: "warp_network",
            })
    }

    /// Planetary systems output, or [`StageError::MissingInput`].
    pub fn require_planetary_systems(&self) -> Result<&PlanetarySystems, StageError> {
        self.planetary_systems
            .as_ref()
            .ok_or(StageError::MissingInput {
                input: "planetary_systems",
            })
    }

    /// Mineral deposits output, or [`StageError::MissingInput`].
    pub fn require_mineral_deposits(&self) -> Result<&MineralDeposits, StageError> {
        self.mineral_deposits
            .as_ref()
            .ok_or(StageError::MissingInput {
                input: "mineral_deposits",
            })
    }
}
