//! Shared type definitions for the Starlane galaxy generator.
//!
//! This crate is the single source of truth for the entity graph produced
//! by a generation run and consumed by collaborators (persistence, APIs).
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe UUID wrappers for all entity identifiers
//! - [`enums`] -- Closed enumerations (star classes, body types, rarity, gates)
//! - [`structs`] -- Entity structs (systems, bodies, markets, gates, sectors, geometry)

pub mod enums;
pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{
    BodyScope, BodyType, DepositRichness, GateStatus, GateType, MineralRarity, SizeClass,
    StarClass, TemperatureBand,
};
pub use ids::{BodyId, GalaxyId, GateId, MarketId, SectorId, SystemId};
pub use structs::{
    Bounds, CelestialBody, Coordinate, Deposit, Market, MarketListing, Ore, Sector, System,
    WarpGate,
};
