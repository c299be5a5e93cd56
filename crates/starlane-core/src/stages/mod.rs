//! The default generation stages.
//!
//! | Stage               | Depends on          |
//! |---------------------|---------------------|
//! | `star_field`        |                     |
//! | `sector_grid`       | `star_field`        |
//! | `warp_network`      | `star_field`        |
//! | `planetary_systems` | `star_field`        |
//! | `deep_space`        | `star_field`        |
//! | `mineral_deposits`  | `planetary_systems` |
//! | `trading_markets`   | `mineral_deposits`  |
//! | `mirror_gates`      | `warp_network`      |

mod deep_space;
mod mineral_deposits;
mod mirror_gates;
mod planetary_systems;
mod sector_grid;
mod star_field;
mod trading_markets;
mod warp_network;

pub use deep_space::DeepSpaceStage;
pub use mineral_deposits::MineralDepositsStage;
pub use mirror_gates::MirrorGatesStage;
pub use planetary_systems::PlanetarySystemsStage;
pub use sector_grid::SectorGridStage;
pub use star_field::StarFieldStage;
pub use trading_markets::TradingMarketsStage;
pub use warp_network::WarpNetworkStage;

use crate::stage::Stage;

/// Name of the star placement stage.
pub const STAR_FIELD: &str = "star_field";
/// Name of the sector overlay stage.
pub const SECTOR_GRID: &str = "sector_grid";
/// Name of the lane network stage.
pub const WARP_NETWORK: &str = "warp_network";
/// Name of the body generation stage.
pub const PLANETARY_SYSTEMS: &str = "planetary_systems";
/// Name of the black hole and nebula stage.
pub const DEEP_SPACE: &str = "deep_space";
/// Name of the ore seeding stage.
pub const MINERAL_DEPOSITS: &str = "mineral_deposits";
/// Name of the market stage.
pub const TRADING_MARKETS: &str = "trading_markets";
/// Name of the mirror gate stage.
pub const MIRROR_GATES: &str = "mirror_gates";

/// Every default stage, in registration order.
pub fn default_stages() -> Vec<Box<dyn Stage>> {
    vec![
        Box::new(StarFieldStage),
        Box::new(SectorGridStage),
        Box::new(WarpNetworkStage),
        Box::new(PlanetarySystemsStage),
        Box::new(DeepSpaceStage),
        Box::new(MineralDepositsStage),
        Box::new(TradingMarketsStage),
        Box::new(MirrorGatesStage),
    ]
}

/// `usize` view of a configured count.
pub(crate) fn as_count(value: u32) -> usize {
    usize::try_from(value).unwrap_or(usize::MAX)
}

/// `u64` view of a collection length, for metrics.
pub(crate) fn as_metric(len: usize) -> u64 {
    u64::try_from(len).unwrap_or(u64::MAX)
}
