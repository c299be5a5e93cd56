//! Core entity structs for a generated galaxy.
//!
//! These are plain data records. Invariants that span entities (bounds,
//! scopes, origin bands, link uniqueness) are enforced by the `Galaxy`
//! container in `starlane-world`, which is the only writer during a run.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::enums::{
    BodyType, DepositRichness, GateStatus, GateType, MineralRarity, SizeClass, StarClass,
    TemperatureBand,
};
use crate::ids::{BodyId, GateId, MarketId, SectorId, SystemId};

// ---------------------------------------------------------------------------
// Geometry
// ---------------------------------------------------------------------------

/// An integer position on the galaxy plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Coordinate {
    /// Horizontal position.
    pub x: u32,
    /// Vertical position.
    pub y: u32,
}

impl Coordinate {
    /// Create a coordinate.
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another coordinate.
    pub fn distance_to(self, other: Self) -> f64 {
        let dx = f64::from(self.x) - f64::from(other.x);
        let dy = f64::from(self.y) - f64::from(other.y);
        dx.hypot(dy)
    }
}

/// Inclusive rectangle `[min_x, max_x] x [min_y, max_y]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Bounds {
    /// Smallest permitted x.
    pub min_x: u32,
    /// Smallest permitted y.
    pub min_y: u32,
    /// Largest permitted x.
    pub max_x: u32,
    /// Largest permitted y.
    pub max_y: u32,
}

impl Bounds {
    /// Bounds covering `[0, width - 1] x [0, height - 1]`.
    ///
    /// Returns `None` when either dimension is zero.
    pub const fn from_dimensions(width: u32, height: u32) -> Option<Self> {
        match (width.checked_sub(1), height.checked_sub(1)) {
            (Some(max_x), Some(max_y)) => Some(Self {
                min_x: 0,
                min_y: 0,
                max_x,
                max_y,
            }),
            _ => None,
        }
    }

    /// Shrink the rectangle by `margin` on every side.
    ///
    /// Returns `None` when nothing would remain.
    pub const fn inset(self, margin: u32) -> Option<Self> {
        let (Some(min_x), Some(min_y)) = (self.min_x.checked_add(margin), self.min_y.checked_add(margin))
        else {
            return None;
        };
        let (Some(max_x), Some(max_y)) = (self.max_x.checked_sub(margin), self.max_y.checked_sub(margin))
        else {
            return None;
        };
        if min_x > max_x || min_y > max_y {
            return None;
        }
        Some(Self {
            min_x,
            min_y,
            max_x,
            max_y,
        })
    }

    /// Whether the coordinate lies inside the rectangle (edges included).
    pub const fn contains(&self, point: Coordinate) -> bool {
        point.x >= self.min_x && point.x <= self.max_x && point.y >= self.min_y && point.y <= self.max_y
    }

    /// Geometric centre of the rectangle.
    pub fn center(&self) -> (f64, f64) {
        (
            (f64::from(self.min_x) + f64::from(self.max_x)) / 2.0,
            (f64::from(self.min_y) + f64::from(self.max_y)) / 2.0,
        )
    }

    /// Number of integer positions inside the rectangle.
    pub fn cell_count(&self) -> u64 {
        let columns = u64::from(self.max_x.saturating_sub(self.min_x)).saturating_add(1);
        let rows = u64::from(self.max_y.saturating_sub(self.min_y)).saturating_add(1);
        columns.saturating_mul(rows)
    }
}

// ---------------------------------------------------------------------------
// Minerals
// ---------------------------------------------------------------------------

/// An ore type from the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ore {
    /// Unique catalog key.
    pub key: String,
    /// Display name.
    pub name: String,
    /// Rarity tier.
    pub rarity: MineralRarity,
    /// Price before the rarity multiplier.
    pub base_price: f64,
    /// Temperature bands this ore can form in.
    pub origins: BTreeSet<TemperatureBand>,
}

impl Ore {
    /// Whether this ore can be placed on a body of the given band.
    pub fn forms_in(&self, band: TemperatureBand) -> bool {
        self.origins.contains(&band)
    }
}

/// A quantity of one ore placed on a body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deposit {
    /// Catalog key of the ore.
    pub ore_key: String,
    /// Extractable units.
    pub quantity: u32,
    /// Size tier derived from `quantity`.
    pub richness: DepositRichness,
}

// ---------------------------------------------------------------------------
// Bodies and systems
// ---------------------------------------------------------------------------

/// A planet, moon, belt, nebula, or other body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CelestialBody {
    /// Unique body identifier.
    pub id: BodyId,
    /// Display name.
    pub name: String,
    /// Kind of body. Determines its scope.
    pub body_type: BodyType,
    /// Surface temperature band. Set for system-scope bodies only.
    pub temperature: Option<TemperatureBand>,
    /// Coarse size.
    pub size: Option<SizeClass>,
    /// Habitability rating (10..=90) for planets and dwarf planets.
    pub habitability: Option<u8>,
    /// Position in the system's orbit order, starting at 1.
    pub orbital_index: u32,
    /// Parent body for moons.
    pub orbits: Option<BodyId>,
    /// Galaxy position. Set for universe-scope bodies only.
    pub position: Option<Coordinate>,
    /// Ore deposits on this body.
    pub deposits: Vec<Deposit>,
}

/// One ore offered by a market.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketListing {
    /// Catalog key of the ore.
    pub ore_key: String,
    /// Rarity tier of the ore.
    pub rarity: MineralRarity,
    /// Base price times rarity multiplier.
    pub listed_price: f64,
    /// Units in stock.
    pub stock: u32,
}

/// A trading station attached to a system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Market {
    /// Unique market identifier.
    pub id: MarketId,
    /// Owning system.
    pub system: SystemId,
    /// Display name.
    pub name: String,
    /// Ores on offer.
    pub listings: Vec<MarketListing>,
}

/// A star system placed at one coordinate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct System {
    /// Unique system identifier.
    pub id: SystemId,
    /// Display name of the primary star.
    pub name: String,
    /// Galaxy position.
    pub position: Coordinate,
    /// Class of the primary star.
    pub star_class: StarClass,
    /// Number of stars (1 = single, 2 = binary, ...).
    pub multiplicity: u8,
    /// Orbiting bodies in orbit order.
    pub bodies: Vec<CelestialBody>,
    /// Trading market, if one was opened here.
    pub market: Option<Market>,
}

impl System {
    /// True when the system holds only asteroid belts and asteroids.
    pub fn is_asteroid_field(&self) -> bool {
        !self.bodies.is_empty()
            && self
                .bodies
                .iter()
                .all(|b| matches!(b.body_type, BodyType::AsteroidBelt | BodyType::Asteroid))
    }

    /// Distinct ore keys deposited anywhere in this system, sorted.
    pub fn local_ore_keys(&self) -> BTreeSet<&str> {
        self.bodies
            .iter()
            .flat_map(|b| b.deposits.iter())
            .map(|d| d.ore_key.as_str())
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Warp gates
// ---------------------------------------------------------------------------

/// A typed link between two systems.
///
/// Lane gates (every type except the mirror pair) are undirected; `source`
/// and `destination` are stored in canonical coordinate order. Mirror gates
/// are directed and always come in pairs that reference each other.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WarpGate {
    /// Unique gate identifier.
    pub id: GateId,
    /// One endpoint (the origin for mirror gates).
    pub source: SystemId,
    /// The other endpoint (the target for mirror gates).
    pub destination: SystemId,
    /// Behavior category.
    pub gate_type: GateType,
    /// Whether the gate is open or dormant.
    pub status: GateStatus,
    /// Hidden gates do not show up without a sufficient sensor.
    pub hidden: bool,
    /// Distance between the endpoints.
    pub length: f64,
    /// The opposite half of a mirror pair.
    pub paired_gate: Option<GateId>,
}

impl WarpGate {
    /// Whether this gate connects the given system.
    pub fn touches(&self, system: SystemId) -> bool {
        self.source == system || self.destination == system
    }

    /// The endpoint opposite `system`, if the gate touches it.
    pub fn other_end(&self, system: SystemId) -> Option<SystemId> {
        if self.source == system {
            Some(self.destination)
        } else if self.destination == system {
            Some(self.source)
        } else {
            None
        }
    }

    /// Whether the gate counts toward system degree.
    pub const fn is_lane(&self) -> bool {
        !self.gate_type.is_mirror_gate()
    }
}

// ---------------------------------------------------------------------------
// Sectors
// ---------------------------------------------------------------------------

/// One cell of the square grid laid over the galaxy for navigation.
///
/// Cell extents are fractional: a 300 LY galaxy split five ways gives
/// 60 LY cells. Bounds are shared with the neighbouring cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sector {
    /// Unique sector identifier.
    pub id: SectorId,
    /// Greek-letter row and one-based column, e.g. "Gamma-4".
    pub name: String,
    /// Column index from the left edge.
    pub grid_x: u32,
    /// Row index from the top edge.
    pub grid_y: u32,
    /// Left edge.
    pub x_min: f64,
    /// Right edge.
    pub x_max: f64,
    /// Top edge.
    pub y_min: f64,
    /// Bottom edge.
    pub y_max: f64,
    /// Regional threat rating; zero at generation.
    pub danger_level: u8,
    /// Systems assigned to this sector, in assignment order.
    pub systems: Vec<SystemId>,
}

impl Sector {
    /// Whether a point lies inside the cell, edges included.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        (self.x_min..=self.x_max).contains(&x) && (self.y_min..=self.y_max).contains(&y)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn bounds_from_dimensions() {
        let bounds = Bounds::from_dimensions(100, 50).unwrap();
        assert_eq!(bounds.max_x, 99);
        assert_eq!(bounds.max_y, 49);
        assert!(bounds.contains(Coordinate::new(0, 0)));
        assert!(bounds.contains(Coordinate::new(99, 49)));
        assert!(!bounds.contains(Coordinate::new(100, 10)));
        assert_eq!(bounds.cell_count(), 5000);
        assert!(Bounds::from_dimensions(0, 10).is_none());
    }

    #[test]
    fn bounds_inset() {
        let bounds = Bounds::from_dimensions(20, 20).unwrap();
        let inner = bounds.inset(5).unwrap();
        assert_eq!((inner.min_x, inner.max_x), (5, 14));
        assert!(!inner.contains(Coordinate::new(4, 10)));
        assert!(bounds.inset(10).is_none());
        assert_eq!(bounds.inset(0), Some(bounds));
    }

    #[test]
    fn coordinate_distance() {
        let a = Coordinate::new(0, 0);
        let b = Coordinate::new(3, 4);
        assert_eq!(a.distance_to(b), 5.0);
        assert_eq!(b.distance_to(a), 5.0);
    }

    #[test]
    fn sector_contains_its_edges() {
        let sector = Sector {
            id: SectorId::from_random_bytes([1; 16]),
            name: String::from("Alpha-1"),
            grid_x: 0,
            grid_y: 0,
            x_min: 0.0,
            x_max: 60.0,
            y_min: 0.0,
            y_max: 60.0,
            danger_level: 0,
            systems: Vec::new(),
        };
        assert!(sector.contains(0.0, 0.0));
        assert!(sector.contains(60.0, 60.0));
        assert!(!sector.contains(60.5, 10.0));
    }

    #[test]
    fn ore_origin_check() {
        let ore = Ore {
            key: String::from("water_ice"),
            name: String::from("Water Ice"),
            rarity: MineralRarity::Abundant,
            base_price: 10.0,
            origins: BTreeSet::from([TemperatureBand::Cold, TemperatureBand::VeryCold]),
        };
        assert!(ore.forms_in(TemperatureBand::Cold));
        assert!(!ore.forms_in(TemperatureBand::Hot));
    }
}
