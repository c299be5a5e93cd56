//! Galaxy graph, deterministic randomness, and classification for Starlane.
//!
//! This crate holds everything a generation stage needs that is not tied to
//! configuration or orchestration: the seeded random source, the point
//! sampler, weighted selection, and the galaxy container that enforces the
//! graph's invariants.
//!
//! # Modules
//!
//! - [`classify`] -- Star class, body type, temperature, and ore selection
//!   driven by weight tables.
//! - [`derived`] -- Pure calculators: sensor range, listed price, market
//!   listing counts, gate detection.
//! - [`error`] -- Error types for graph mutations and weight tables.
//! - [`galaxy`] -- The galaxy graph: systems as nodes, warp gates as edges.
//! - [`names`] -- Name generation from syllable tables.
//! - [`rng`] -- [`GalaxyRng`], a seeded `ChaCha8` source with named streams.
//! - [`sampling`] -- Rejection sampling of separated points.
//! - [`sectors`] -- Sector grid cell geometry and naming.
//! - [`weighted`] -- Cumulative-weight tables with one draw per selection.

pub mod classify;
pub mod derived;
pub mod error;
pub mod galaxy;
pub mod names;
pub mod rng;
pub mod sampling;
pub mod sectors;
pub mod weighted;

// Re-export primary types at crate root.
pub use classify::{Classifier, OreSelector};
pub use derived::{
    gate_detectable, listed_ore_count, listed_price, price_for_stock, sensor_range_ly, stock_range,
};
pub use error::{WeightError, WorldError};
pub use galaxy::{Galaxy, GalaxyStatistics, LaneSpec};
pub use rng::GalaxyRng;
pub use sampling::{PointSample, PointSampler};
pub use sectors::{SectorLayout, sector_name};
pub use weighted::WeightTable;
