//! The galaxy graph: systems as nodes, warp gates as edges.
//!
//! [`Galaxy`] is the only writer of the entity graph during a run. Every
//! mutation checks the invariant it could break (bounds, scope, origin
//! band, link uniqueness) and returns a [`WorldError`] instead of storing
//! an inconsistent graph. Entities are only ever added or extended with
//! children; nothing is removed.
//!
//! Lane gates are indexed per endpoint in an adjacency map,
//! `BTreeMap<SystemId, Vec<usize>>`, used for degree and neighbor queries.
//! Mirror gates are kept out of that index and do not count toward degree.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use serde::Serialize;
use starlane_types::{
    BodyId, BodyScope, BodyType, Bounds, CelestialBody, Coordinate, Deposit, DepositRichness,
    GalaxyId, GateId, GateStatus, GateType, Market, MarketId, Ore, Sector, SectorId, System,
    SystemId, WarpGate,
};

use crate::error::WorldError;

/// Attributes of a lane gate other than its endpoints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LaneSpec {
    /// Must not be a mirror type.
    pub gate_type: GateType,
    /// Active or dormant.
    pub status: GateStatus,
    /// Hidden from low-level sensors.
    pub hidden: bool,
}

/// A generated galaxy.
#[derive(Debug, Clone, Serialize)]
pub struct Galaxy {
    /// Galaxy identifier.
    id: GalaxyId,
    /// Display name.
    name: String,
    /// Seed the galaxy was generated from.
    seed: u64,
    /// Horizontal extent.
    width: u32,
    /// Vertical extent.
    height: u32,
    /// `[0, width - 1] x [0, height - 1]`.
    bounds: Bounds,
    /// Systems in placement order.
    systems: Vec<System>,
    /// Black holes, nebulae, and rogue stars.
    universe_bodies: Vec<CelestialBody>,
    /// Gates in creation order.
    gates: Vec<WarpGate>,
    /// Ore catalog the galaxy was seeded with.
    ores: Vec<Ore>,
    /// Sector grid cells, row by row.
    sectors: Vec<Sector>,
    #[serde(skip)]
    system_index: BTreeMap<SystemId, usize>,
    #[serde(skip)]
    ore_index: BTreeMap<String, usize>,
    /// Lane adjacency: system -> indices into `gates`.
    #[serde(skip)]
    lanes: BTreeMap<SystemId, Vec<usize>>,
    /// Directed `(entry source, entry destination)` of every mirror pair.
    #[serde(skip)]
    mirror_links: BTreeSet<(SystemId, SystemId)>,
    #[serde(skip)]
    sector_index: BTreeMap<SectorId, usize>,
    #[serde(skip)]
    sector_cells: BTreeMap<(u32, u32), usize>,
    /// System -> index into `sectors`.
    #[serde(skip)]
    system_sectors: BTreeMap<SystemId, usize>,
}

impl Galaxy {
    /// Create an empty galaxy.
    ///
    /// # Errors
    ///
    /// [`WorldError::InvalidDimensions`] if either dimension is zero,
    /// [`WorldError::DuplicateOre`] if two catalog entries share a key.
    pub fn new(
        id: GalaxyId,
        name: String,
        seed: u64,
        width: u32,
        height: u32,
        ores: Vec<Ore>,
    ) -> Result<Self, WorldError> {
        let bounds = Bounds::from_dimensions(width, height)
            .ok_or(WorldError::InvalidDimensions { width, height })?;

        let mut ore_index = BTreeMap::new();
        for (index, ore) in ores.iter().enumerate() {
            if ore_index.insert(ore.key.clone(), index).is_some() {
                return Err(WorldError::DuplicateOre(ore.key.clone()));
            }
        }

        Ok(Self {
            id,
            name,
            seed,
            width,
            height,
            bounds,
            systems: Vec::new(),
            universe_bodies: Vec::new(),
            gates: Vec::new(),
            ores,
            sectors: Vec::new(),
            system_index: BTreeMap::new(),
            ore_index,
            lanes: BTreeMap::new(),
            mirror_links: BTreeSet::new(),
            sector_index: BTreeMap::new(),
            sector_cells: BTreeMap::new(),
            system_sectors: BTreeMap::new(),
        })
    }

    // -------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------

    /// Galaxy identifier.
    pub const fn id(&self) -> GalaxyId {
        self.id
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Seed the galaxy was generated from.
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Horizontal extent.
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Vertical extent.
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Inclusive coordinate bounds.
    pub const fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Systems in placement order.
    pub fn systems(&self) -> &[System] {
        &self.systems
    }

    /// Look up a system.
    pub fn system(&self, id: SystemId) -> Option<&System> {
        self.system_index
            .get(&id)
            .and_then(|&index| self.systems.get(index))
    }

    /// Number of systems.
    pub fn system_count(&self) -> usize {
        self.systems.len()
    }

    /// Universe-scope bodies in placement order.
    pub fn universe_bodies(&self) -> &[CelestialBody] {
        &self.universe_bodies
    }

    /// Gates in creation order.
    pub fn gates(&self) -> &[WarpGate] {
        &self.gates
    }

    /// The ore catalog.
    pub fn ores(&self) -> &[Ore] {
        &self.ores
    }

    /// Look up an ore by key.
    pub fn ore(&self, key: &str) -> Option<&Ore> {
        self.ore_index.get(key).and_then(|&index| self.ores.get(index))
    }

    /// Sector grid cells, row by row.
    pub fn sectors(&self) -> &[Sector] {
        &self.sectors
    }

    /// The sector at a grid cell.
    pub fn sector_at(&self, grid_x: u32, grid_y: u32) -> Option<&Sector> {
        self.sector_cells
            .get(&(grid_x, grid_y))
            .and_then(|&index| self.sectors.get(index))
    }

    /// The sector a system was assigned to.
    pub fn sector_of(&self, system: SystemId) -> Option<&Sector> {
        self.system_sectors
            .get(&system)
            .and_then(|&index| self.sectors.get(index))
    }

    fn system_mut(&mut self, id: SystemId) -> Result<&mut System, WorldError> {
        let index = *self
            .system_index
            .get(&id)
            .ok_or(WorldError::SystemNotFound(id))?;
        self.systems
            .get_mut(index)
            .ok_or(WorldError::SystemNotFound(id))
    }

    fn position_of(&self, id: SystemId) -> Result<Coordinate, WorldError> {
        self.system(id)
            .map(|s| s.position)
            .ok_or(WorldError::SystemNotFound(id))
    }

    // -------------------------------------------------------------------
    // Systems and bodies
    // -------------------------------------------------------------------

    /// Add a system.
    ///
    /// # Errors
    ///
    /// [`WorldError::OutOfBounds`], [`WorldError::DuplicateSystem`],
    /// [`WorldError::InvalidMultiplicity`], or [`WorldError::ScopeMismatch`]
    /// if the system arrives with universe-scope bodies.
    pub fn add_system(&mut self, system: System) -> Result<SystemId, WorldError> {
        let id = system.id;
        if !self.bounds.contains(system.position) {
            return Err(WorldError::OutOfBounds {
                x: system.position.x,
                y: system.position.y,
            });
        }
        if self.system_index.contains_key(&id) {
            return Err(WorldError::DuplicateSystem(id));
        }
        if system.multiplicity == 0 {
            return Err(WorldError::InvalidMultiplicity(id));
        }
        for body in &system.bodies {
            require_scope(body.body_type, BodyScope::System)?;
        }

        self.system_index.insert(id, self.systems.len());
        self.lanes.entry(id).or_default();
        self.systems.push(system);
        Ok(id)
    }

    /// Attach a system-scope body to a system.
    ///
    /// # Errors
    ///
    /// [`WorldError::ScopeMismatch`] for universe-scope types,
    /// [`WorldError::SystemNotFound`], or [`WorldError::BodyNotFound`] when
    /// the body orbits a parent that is not in the same system.
    pub fn attach_body(
        &mut self,
        system: SystemId,
        body: CelestialBody,
    ) -> Result<BodyId, WorldError> {
        require_scope(body.body_type, BodyScope::System)?;
        let target = self.system_mut(system)?;
        if let Some(parent) = body.orbits
            && !target.bodies.iter().any(|b| b.id == parent)
        {
            return Err(WorldError::BodyNotFound(parent));
        }
        let id = body.id;
        target.bodies.push(body);
        Ok(id)
    }

    /// Add a universe-scope body.
    ///
    /// # Errors
    ///
    /// [`WorldError::ScopeMismatch`] for system-scope types,
    /// [`WorldError::MissingPosition`], or [`WorldError::OutOfBounds`].
    pub fn add_universe_body(&mut self, body: CelestialBody) -> Result<BodyId, WorldError> {
        require_scope(body.body_type, BodyScope::Universe)?;
        let position = body.position.ok_or(WorldError::MissingPosition(body.id))?;
        if !self.bounds.contains(position) {
            return Err(WorldError::OutOfBounds {
                x: position.x,
                y: position.y,
            });
        }
        let id = body.id;
        self.universe_bodies.push(body);
        Ok(id)
    }

    /// Place `quantity` units of an ore on a body, merging with any deposit
    /// of the same ore already there. Returns the deposit's new quantity.
    ///
    /// # Errors
    ///
    /// [`WorldError::UnknownOre`], [`WorldError::SystemNotFound`],
    /// [`WorldError::BodyNotFound`], or [`WorldError::IncompatibleOrigin`]
    /// when the body's band is not among the ore's origins.
    pub fn place_deposit(
        &mut self,
        system: SystemId,
        body: BodyId,
        ore_key: &str,
        quantity: u32,
    ) -> Result<u32, WorldError> {
        let ore = self
            .ore(ore_key)
            .ok_or_else(|| WorldError::UnknownOre(ore_key.to_owned()))?;
        let origins = ore.origins.clone();

        let target = self
            .system_mut(system)?
            .bodies
            .iter_mut()
            .find(|b| b.id == body)
            .ok_or(WorldError::BodyNotFound(body))?;

        match target.temperature {
            Some(band) if origins.contains(&band) => {}
            band => {
                return Err(WorldError::IncompatibleOrigin {
                    ore: ore_key.to_owned(),
                    band,
                });
            }
        }

        if let Some(existing) = target.deposits.iter_mut().find(|d| d.ore_key == ore_key) {
            existing.quantity = existing.quantity.saturating_add(quantity);
            existing.richness = DepositRichness::from_quantity(existing.quantity);
            return Ok(existing.quantity);
        }

        target.deposits.push(Deposit {
            ore_key: ore_key.to_owned(),
            quantity,
            richness: DepositRichness::from_quantity(quantity),
        });
        Ok(quantity)
    }

    /// Attach a market to its system.
    ///
    /// # Errors
    ///
    /// [`WorldError::SystemNotFound`], [`WorldError::DuplicateMarket`], or
    /// [`WorldError::UnknownOre`] if a listing names an ore outside the
    /// catalog.
    pub fn open_market(&mut self, market: Market) -> Result<MarketId, WorldError> {
        if let Some(listing) = market
            .listings
            .iter()
            .find(|l| !self.ore_index.contains_key(&l.ore_key))
        {
            return Err(WorldError::UnknownOre(listing.ore_key.clone()));
        }
        let system_id = market.system;
        let system = self.system_mut(system_id)?;
        if system.market.is_some() {
            return Err(WorldError::DuplicateMarket(system_id));
        }
        let id = market.id;
        system.market = Some(market);
        Ok(id)
    }

    // -------------------------------------------------------------------
    // Gates
    // -------------------------------------------------------------------

    /// Link two systems with an undirected lane gate.
    ///
    /// Endpoints are stored in canonical order (lower x, then lower y), so
    /// a lane reads the same whichever end it was created from.
    ///
    /// # Errors
    ///
    /// [`WorldError::NotALaneType`] for mirror types, [`WorldError::SelfLink`],
    /// [`WorldError::SystemNotFound`], or [`WorldError::DuplicateLink`].
    pub fn link_lane(
        &mut self,
        id: GateId,
        a: SystemId,
        b: SystemId,
        spec: LaneSpec,
    ) -> Result<GateId, WorldError> {
        if spec.gate_type.is_mirror_gate() {
            return Err(WorldError::NotALaneType(spec.gate_type));
        }
        if a == b {
            return Err(WorldError::SelfLink(a));
        }
        let pos_a = self.position_of(a)?;
        let pos_b = self.position_of(b)?;
        if self.are_linked(a, b) {
            return Err(WorldError::DuplicateLink { a, b });
        }

        let (source, destination) = if (pos_a.x, pos_a.y, a) <= (pos_b.x, pos_b.y, b) {
            (a, b)
        } else {
            (b, a)
        };

        let index = self.gates.len();
        self.gates.push(WarpGate {
            id,
            source,
            destination,
            gate_type: spec.gate_type,
            status: spec.status,
            hidden: spec.hidden,
            length: pos_a.distance_to(pos_b),
            paired_gate: None,
        });
        self.lanes.entry(a).or_default().push(index);
        self.lanes.entry(b).or_default().push(index);
        Ok(id)
    }

    /// Create a mirror pair: an entry gate `from -> to` and the return gate
    /// `to -> from`, each referencing the other.
    ///
    /// # Errors
    ///
    /// [`WorldError::SelfLink`], [`WorldError::SystemNotFound`], or
    /// [`WorldError::DuplicateLink`] if the same pair already exists.
    pub fn link_mirror_pair(
        &mut self,
        entry_id: GateId,
        return_id: GateId,
        from: SystemId,
        to: SystemId,
    ) -> Result<(GateId, GateId), WorldError> {
        if from == to {
            return Err(WorldError::SelfLink(from));
        }
        let pos_from = self.position_of(from)?;
        let pos_to = self.position_of(to)?;
        if self.mirror_links.contains(&(from, to)) {
            return Err(WorldError::DuplicateLink { a: from, b: to });
        }

        let length = pos_from.distance_to(pos_to);
        self.gates.push(WarpGate {
            id: entry_id,
            source: from,
            destination: to,
            gate_type: GateType::MirrorEntry,
            status: GateStatus::Active,
            hidden: false,
            length,
            paired_gate: Some(return_id),
        });
        self.gates.push(WarpGate {
            id: return_id,
            source: to,
            destination: from,
            gate_type: GateType::MirrorReturn,
            status: GateStatus::Active,
            hidden: false,
            length,
            paired_gate: Some(entry_id),
        });
        self.mirror_links.insert((from, to));
        Ok((entry_id, return_id))
    }

    // -------------------------------------------------------------------
    // Sectors
    // -------------------------------------------------------------------

    /// Add a sector grid cell. Systems listed on the sector are assigned
    /// as if by [`Self::assign_to_sector`].
    ///
    /// # Errors
    ///
    /// [`WorldError::DuplicateSector`] if the ID or grid cell is taken, or
    /// any error from assigning the listed systems.
    pub fn add_sector(&mut self, mut sector: Sector) -> Result<SectorId, WorldError> {
        let id = sector.id;
        let cell = (sector.grid_x, sector.grid_y);
        if self.sector_index.contains_key(&id) || self.sector_cells.contains_key(&cell) {
            return Err(WorldError::DuplicateSector {
                grid_x: cell.0,
                grid_y: cell.1,
            });
        }
        let members = core::mem::take(&mut sector.systems);

        let index = self.sectors.len();
        self.sector_index.insert(id, index);
        self.sector_cells.insert(cell, index);
        self.sectors.push(sector);
        for system in members {
            self.assign_to_sector(system, id)?;
        }
        Ok(id)
    }

    /// Record that a system lies in a sector.
    ///
    /// # Errors
    ///
    /// [`WorldError::SystemNotFound`], [`WorldError::SectorNotFound`],
    /// [`WorldError::AlreadyInSector`] if the system has a sector, or
    /// [`WorldError::OutsideSector`] if its position is not within the
    /// sector's edges.
    pub fn assign_to_sector(
        &mut self,
        system: SystemId,
        sector: SectorId,
    ) -> Result<(), WorldError> {
        let position = self.position_of(system)?;
        let index = *self
            .sector_index
            .get(&sector)
            .ok_or(WorldError::SectorNotFound(sector))?;
        if self.system_sectors.contains_key(&system) {
            return Err(WorldError::AlreadyInSector(system));
        }
        let target = self
            .sectors
            .get_mut(index)
            .ok_or(WorldError::SectorNotFound(sector))?;
        if !target.contains(f64::from(position.x), f64::from(position.y)) {
            return Err(WorldError::OutsideSector { system, sector });
        }
        target.systems.push(system);
        self.system_sectors.insert(system, index);
        Ok(())
    }

    // -------------------------------------------------------------------
    // Graph queries
    // -------------------------------------------------------------------

    /// Number of lane gates touching a system.
    pub fn degree(&self, system: SystemId) -> usize {
        self.lanes.get(&system).map_or(0, Vec::len)
    }

    /// Systems reachable over one lane, in link order.
    pub fn neighbors(&self, system: SystemId) -> Vec<SystemId> {
        let Some(indices) = self.lanes.get(&system) else {
            return Vec::new();
        };
        indices
            .iter()
            .filter_map(|&i| self.gates.get(i))
            .filter_map(|gate| gate.other_end(system))
            .collect()
    }

    /// Whether a lane joins the two systems.
    pub fn are_linked(&self, a: SystemId, b: SystemId) -> bool {
        self.neighbors(a).contains(&b)
    }

    /// Whether every system can reach every other over lanes.
    pub fn is_connected(&self) -> bool {
        let Some(start) = self.systems.first().map(|s| s.id) else {
            return true;
        };
        let mut seen = BTreeSet::from([start]);
        let mut queue = VecDeque::from([start]);
        while let Some(current) = queue.pop_front() {
            for next in self.neighbors(current) {
                if seen.insert(next) {
                    queue.push_back(next);
                }
            }
        }
        seen.len() == self.systems.len()
    }

    /// Summary counts over the whole graph.
    #[allow(clippy::cast_precision_loss)]
    pub fn statistics(&self) -> GalaxyStatistics {
        let mut stats = GalaxyStatistics {
            systems: self.systems.len(),
            universe_bodies: self.universe_bodies.len(),
            sectors: self.sectors.len(),
            ..GalaxyStatistics::default()
        };

        for system in &self.systems {
            if system.is_asteroid_field() {
                stats.asteroid_fields = stats.asteroid_fields.saturating_add(1);
            }
            for body in &system.bodies {
                bump(&mut stats.bodies, body.body_type);
                stats.deposits = stats.deposits.saturating_add(body.deposits.len());
            }
            if let Some(market) = &system.market {
                stats.markets = stats.markets.saturating_add(1);
                stats.listings = stats.listings.saturating_add(market.listings.len());
            }
        }
        for body in &self.universe_bodies {
            bump(&mut stats.bodies, body.body_type);
        }

        for gate in &self.gates {
            bump(&mut stats.gates, gate.gate_type);
            if gate.hidden {
                stats.hidden_gates = stats.hidden_gates.saturating_add(1);
            }
            if gate.status == GateStatus::Dormant {
                stats.dormant_gates = stats.dormant_gates.saturating_add(1);
            }
        }
        stats.mirror_pairs = self.mirror_links.len();

        let degrees: Vec<usize> = self.systems.iter().map(|s| self.degree(s.id)).collect();
        stats.min_degree = degrees.iter().copied().min().unwrap_or(0);
        stats.max_degree = degrees.iter().copied().max().unwrap_or(0);
        if !degrees.is_empty() {
            let sum: usize = degrees.iter().sum();
            stats.average_degree = sum as f64 / degrees.len() as f64;
        }
        stats
    }
}

/// Summary counts over a finished galaxy.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GalaxyStatistics {
    /// Systems placed.
    pub systems: usize,
    /// Systems holding only asteroids.
    pub asteroid_fields: usize,
    /// Bodies of every scope, by type.
    pub bodies: BTreeMap<BodyType, usize>,
    /// Universe-scope bodies.
    pub universe_bodies: usize,
    /// Sector grid cells.
    pub sectors: usize,
    /// Gates by type.
    pub gates: BTreeMap<GateType, usize>,
    /// Hidden gates.
    pub hidden_gates: usize,
    /// Dormant gates.
    pub dormant_gates: usize,
    /// Mirror entry/return pairs.
    pub mirror_pairs: usize,
    /// Systems with a market.
    pub markets: usize,
    /// Listings across all markets.
    pub listings: usize,
    /// Deposits across all bodies.
    pub deposits: usize,
    /// Smallest lane degree.
    pub min_degree: usize,
    /// Largest lane degree.
    pub max_degree: usize,
    /// Mean lane degree.
    pub average_degree: f64,
}

fn require_scope(body_type: BodyType, expected: BodyScope) -> Result<(), WorldError> {
    if body_type.scope() == expected {
        Ok(())
    } else {
        Err(WorldError::ScopeMismatch {
            body_type,
            expected,
        })
    }
}

fn bump<K: Ord>(counts: &mut BTreeMap<K, usize>, key: K) {
    let entry = counts.entry(key).or_insert(0);
    *entry = entry.saturating_add(1);
}
