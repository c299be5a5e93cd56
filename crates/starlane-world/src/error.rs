//! Error types for the `starlane-world` crate.
//!
//! Graph mutations return [`WorldError`]; weight-table construction returns
//! [`WeightError`].

use starlane_types::{
    BodyId, BodyScope, BodyType, GateType, SectorId, SystemId, TemperatureBand,
};

/// Errors raised when a mutation would break a galaxy invariant.
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    /// Galaxy dimensions must both be positive.
    #[error("invalid galaxy dimensions {width}x{height}")]
    InvalidDimensions {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },

    /// A coordinate lies outside the galaxy bounds.
    #[error("coordinate ({x}, {y}) is outside the galaxy bounds")]
    OutOfBounds {
        /// Horizontal position.
        x: u32,
        /// Vertical position.
        y: u32,
    },

    /// A system with the same ID already exists.
    #[error("duplicate system id: {0}")]
    DuplicateSystem(SystemId),

    /// A system was not found in the galaxy.
    #[error("system not found: {0}")]
    SystemNotFound(SystemId),

    /// A body was not found where it was expected.
    #[error("body not found: {0}")]
    BodyNotFound(BodyId),

    /// A system must contain at least one star.
    #[error("system {0} has zero multiplicity")]
    InvalidMultiplicity(SystemId),

    /// A body was attached to a container of the wrong scope.
    #[error("{body_type:?} cannot be placed in {expected:?} scope")]
    ScopeMismatch {
        /// The offending body type.
        body_type: BodyType,
        /// The scope the container requires.
        expected: BodyScope,
    },

    /// A universe-scope body has no galaxy position.
    #[error("universe body {0} has no position")]
    MissingPosition(BodyId),

    /// An ore key is not present in the galaxy's catalog.
    #[error("unknown ore: {0}")]
    UnknownOre(String),

    /// Two catalog entries share one key.
    #[error("duplicate ore key: {0}")]
    DuplicateOre(String),

    /// An ore was placed on a body whose band is not among its origins.
    #[error("ore {ore} cannot form in temperature band {band:?}")]
    IncompatibleOrigin {
        /// Catalog key of the ore.
        ore: String,
        /// The body's band, if it has one.
        band: Option<TemperatureBand>,
    },

    /// The system already has a market.
    #[error("system {0} already has a market")]
    DuplicateMarket(SystemId),

    /// A gate cannot connect a system to itself.
    #[error("system {0} cannot be linked to itself")]
    SelfLink(SystemId),

    /// The two systems are already linked by a gate of this kind.
    #[error("systems {a} and {b} are already linked")]
    DuplicateLink {
        /// One endpoint.
        a: SystemId,
        /// The other endpoint.
        b: SystemId,
    },

    /// Mirror gates must be created as a pair, not as a lane.
    #[error("gate type {0} cannot be used for a lane")]
    NotALaneType(GateType),

    /// A sector with the same ID or grid cell already exists.
    #[error("sector cell ({grid_x}, {grid_y}) already exists")]
    DuplicateSector {
        /// Column of the new sector.
        grid_x: u32,
        /// Row of the new sector.
        grid_y: u32,
    },

    /// A sector was not found in the galaxy.
    #[error("sector not found: {0}")]
    SectorNotFound(SectorId),

    /// The system already belongs to a sector.
    #[error("system {0} is already assigned to a sector")]
    AlreadyInSector(SystemId),

    /// The system's position is not inside the sector.
    #[error("system {system} lies outside sector {sector}")]
    OutsideSector {
        /// The system being assigned.
        system: SystemId,
        /// The sector it was assigned to.
        sector: SectorId,
    },
}

/// Errors raised when building a weight table.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WeightError {
    /// The table has no entries at all.
    #[error("weight table `{table}` is empty")]
    Empty {
        /// Table name.
        table: String,
    },

    /// A weight is below zero.
    #[error("weight table `{table}` has negative weight {weight} for `{category}`")]
    Negative {
        /// Table name.
        table: String,
        /// Offending category.
        category: String,
        /// Offending weight.
        weight: f64,
    },

    /// A weight is NaN or infinite.
    #[error("weight table `{table}` has non-finite weight for `{category}`")]
    NonFinite {
        /// Table name.
        table: String,
        /// Offending category.
        category: String,
    },

    /// Every weight is zero.
    #[error("weight table `{table}` has no positive weight")]
    ZeroTotal {
        /// Table name.
        table: String,
    },
}
