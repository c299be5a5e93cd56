//! Configuration loading and typed config structures for galaxy generation.
//!
//! The canonical configuration lives in `starlane-config.yaml` at the project
//! root. Every field has a default, so a partial file (or none at all) still
//! yields a complete [`GalaxyConfig`]. Call [`GalaxyConfig::validate`] before
//! generating; the generator does so itself and refuses to start on a
//! malformed configuration.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use serde::Deserialize;
use starlane_types::{
    BodyScope, BodyType, Bounds, MineralRarity, Ore, StarClass, TemperatureBand, WarpGate,
};
use starlane_world::{Classifier, WeightError, gate_detectable};

/// Errors that can occur when loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// A value is outside its permitted range.
    #[error("invalid config value `{field}`: {reason}")]
    Invalid {
        /// Dotted path of the offending field.
        field: String,
        /// What is wrong with it.
        reason: String,
    },

    /// A weight table is malformed.
    #[error("invalid weight table: {source}")]
    Weights {
        /// The underlying weight-table error.
        #[from]
        source: WeightError,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

fn invalid(field: &str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field: field.to_owned(),
        reason: reason.into(),
    }
}

/// Largest sector grid side.
const MAX_GRID_SIZE: u32 = 64;

fn check_probability(field: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(invalid(field, format!("{value} is not in [0, 1]")))
    }
}

/// Top-level galaxy configuration.
///
/// Mirrors the structure of `starlane-config.yaml`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GalaxyConfig {
    /// Name, seed, and dimensions.
    #[serde(default)]
    pub galaxy: GalaxySection,

    /// Star placement.
    #[serde(default)]
    pub stars: StarsConfig,

    /// Weight of each star class.
    #[serde(default = "default_star_classes")]
    pub star_classes: BTreeMap<StarClass, f64>,

    /// Temperature-band weights keyed by the parent star's class.
    #[serde(default = "default_world_weights")]
    pub world_weights: BTreeMap<StarClass, BTreeMap<TemperatureBand, f64>>,

    /// Orbiting bodies.
    #[serde(default)]
    pub bodies: BodiesConfig,

    /// Ore deposits on bodies.
    #[serde(default)]
    pub deposits: DepositsConfig,

    /// Trading markets.
    #[serde(default)]
    pub markets: MarketsConfig,

    /// Warp gate network.
    #[serde(default)]
    pub gates: GatesConfig,

    /// Universe-scope bodies.
    #[serde(default)]
    pub deep_space: DeepSpaceConfig,

    /// Sector grid overlay.
    #[serde(default)]
    pub sectors: SectorsConfig,

    /// Ore catalog.
    #[serde(default = "default_ores")]
    pub ores: Vec<Ore>,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for GalaxyConfig {
    fn default() -> Self {
        Self {
            galaxy: GalaxySection::default(),
            stars: StarsConfig::default(),
            star_classes: default_star_classes(),
            world_weights: default_world_weights(),
            bodies: BodiesConfig::default(),
            deposits: DepositsConfig::default(),
            markets: MarketsConfig::default(),
            gates: GatesConfig::default(),
            deep_space: DeepSpaceConfig::default(),
            sectors: SectorsConfig::default(),
            ores: default_ores(),
            logging: LoggingConfig::default(),
        }
    }
}

impl GalaxyConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// An empty document yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yml::from_str(yaml)?;
        Ok(config)
    }

    /// Build the weight tables this configuration describes.
    ///
    /// # Errors
    ///
    /// Returns the first malformed table.
    pub fn classifier(&self) -> Result<Classifier, WeightError> {
        Classifier::new(&self.star_classes, &self.world_weights, &self.bodies.types)
    }

    /// Inclusive bounds stars may be placed in.
    pub fn placement_bounds(&self) -> Option<Bounds> {
        Bounds::from_dimensions(self.galaxy.width, self.galaxy.height)?.inset(self.stars.margin)
    }

    /// Check every constraint, reporting the first violation.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] or [`ConfigError::Weights`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.galaxy.width == 0 || self.galaxy.height == 0 {
            return Err(invalid("galaxy", "width and height must be positive"));
        }
        let Some(area) = self.placement_bounds() else {
            return Err(invalid("stars.margin", "margin leaves no room for stars"));
        };
        if u64::from(self.stars.count) > area.cell_count() {
            return Err(invalid(
                "stars.count",
                format!(
                    "{} stars cannot fit in {} placement coordinates",
                    self.stars.count,
                    area.cell_count()
                ),
            ));
        }
        self.stars.validate()?;
        self.bodies.validate()?;
        self.deposits.validate()?;
        self.gates.validate()?;
        check_probability("markets.station_ratio", self.markets.station_ratio)?;
        check_probability("markets.listed_ore_fraction", self.markets.listed_ore_fraction)?;
        self.sectors.validate(self.galaxy.width.min(self.galaxy.height))?;
        self.classifier()?;
        validate_ores(&self.ores)
    }
}

fn validate_ores(ores: &[Ore]) -> Result<(), ConfigError> {
    let mut keys = BTreeSet::new();
    for ore in ores {
        if ore.key.trim().is_empty() {
            return Err(invalid("ores", "ore key must not be empty"));
        }
        if !keys.insert(ore.key.as_str()) {
            return Err(invalid("ores", format!("duplicate ore key `{}`", ore.key)));
        }
        if !ore.base_price.is_finite() || ore.base_price <= 0.0 {
            return Err(invalid(
                "ores",
                format!("ore `{}` must have a positive base price", ore.key),
            ));
        }
        if ore.origins.is_empty() {
            return Err(invalid(
                "ores",
                format!("ore `{}` has no origin temperature bands", ore.key),
            ));
        }
    }
    Ok(())
}

/// Name, seed, and dimensions.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GalaxySection {
    /// Human-readable galaxy name.
    #[serde(default = "default_galaxy_name")]
    pub name: String,

    /// Seed used when the caller does not supply one.
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Horizontal extent in light-years.
    #[serde(default = "default_extent")]
    pub width: u32,

    /// Vertical extent in light-years.
    #[serde(default = "default_extent")]
    pub height: u32,
}

impl Default for GalaxySection {
    fn default() -> Self {
        Self {
            name: default_galaxy_name(),
            seed: default_seed(),
            width: default_extent(),
            height: default_extent(),
        }
    }
}

/// Star placement.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StarsConfig {
    /// Number of systems to place.
    #[serde(default = "default_star_count")]
    pub count: u32,

    /// Minimum distance between any two systems.
    #[serde(default = "default_min_separation")]
    pub min_separation: f64,

    /// Empty border kept along every edge.
    #[serde(default)]
    pub margin: u32,

    /// Candidate draws allowed per requested system.
    #[serde(default = "default_attempts_per_point")]
    pub attempts_per_point: u32,

    /// Largest number of stars in one system.
    #[serde(default = "default_max_multiplicity")]
    pub max_multiplicity: u8,
}

impl Default for StarsConfig {
    fn default() -> Self {
        Self {
            count: default_star_count(),
            min_separation: default_min_separation(),
            margin: 0,
            attempts_per_point: default_attempts_per_point(),
            max_multiplicity: default_max_multiplicity(),
        }
    }
}

impl StarsConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.count == 0 {
            return Err(invalid("stars.count", "must be positive"));
        }
        if !self.min_separation.is_finite() || self.min_separation < 0.0 {
            return Err(invalid("stars.min_separation", "must be finite and non-negative"));
        }
        if self.attempts_per_point == 0 {
            return Err(invalid("stars.attempts_per_point", "must be positive"));
        }
        if self.max_multiplicity == 0 {
            return Err(invalid("stars.max_multiplicity", "must be at least 1"));
        }
        Ok(())
    }
}

/// Orbiting bodies.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BodiesConfig {
    /// Chance a system becomes a full planetary system rather than a loose
    /// asteroid field.
    #[serde(default = "default_system_probability")]
    pub system_probability: f64,

    /// Fewest bodies in a full system.
    #[serde(default = "default_min_bodies")]
    pub min_bodies: u32,

    /// Most bodies in a full system.
    #[serde(default = "default_max_bodies")]
    pub max_bodies: u32,

    /// Weight of each body type in a full system. Moons are generated
    /// around planets and may not appear here.
    #[serde(default = "default_body_types")]
    pub types: BTreeMap<BodyType, f64>,

    /// Chance per slot that a planet gains another moon.
    #[serde(default = "default_moon_chance")]
    pub moon_chance: f64,

    /// Most moons around one planet.
    #[serde(default = "default_max_moons")]
    pub max_moons: u32,
}

impl Default for BodiesConfig {
    fn default() -> Self {
        Self {
            system_probability: default_system_probability(),
            min_bodies: default_min_bodies(),
            max_bodies: default_max_bodies(),
            types: default_body_types(),
            moon_chance: default_moon_chance(),
            max_moons: default_max_moons(),
        }
    }
}

impl BodiesConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        check_probability("bodies.system_probability", self.system_probability)?;
        check_probability("bodies.moon_chance", self.moon_chance)?;
        if self.min_bodies == 0 || self.min_bodies > self.max_bodies {
            return Err(invalid(
                "bodies.min_bodies",
                "must be at least 1 and no more than max_bodies",
            ));
        }
        for body_type in self.types.keys() {
            if body_type.scope() == BodyScope::Universe {
                return Err(invalid(
                    "bodies.types",
                    format!("{body_type} is not a system-scope body"),
                ));
            }
            if *body_type == BodyType::Moon {
                return Err(invalid(
                    "bodies.types",
                    "moons are generated around planets; use moon_chance",
                ));
            }
        }
        Ok(())
    }
}

/// Ore deposits on bodies.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DepositsConfig {
    /// Chance a system-scope body carries any deposits.
    #[serde(default = "default_deposit_chance")]
    pub deposit_chance: f64,

    /// Fewest deposits on a body that has any.
    #[serde(default = "default_min_per_body")]
    pub min_per_body: u32,

    /// Most deposits on one body.
    #[serde(default = "default_max_per_body")]
    pub max_per_body: u32,

    /// Smallest raw deposit before the richness multiplier.
    #[serde(default = "default_min_quantity")]
    pub min_quantity: u32,

    /// Largest raw deposit before the richness multiplier.
    #[serde(default = "default_max_quantity")]
    pub max_quantity: u32,

    /// Scale applied to every raw quantity.
    #[serde(default = "default_richness_multiplier")]
    pub richness_multiplier: f64,
}

impl Default for DepositsConfig {
    fn default() -> Self {
        Self {
            deposit_chance: default_deposit_chance(),
            min_per_body: default_min_per_body(),
            max_per_body: default_max_per_body(),
            min_quantity: default_min_quantity(),
            max_quantity: default_max_quantity(),
            richness_multiplier: default_richness_multiplier(),
        }
    }
}

impl DepositsConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        check_probability("deposits.deposit_chance", self.deposit_chance)?;
        if self.min_per_body == 0 || self.min_per_body > self.max_per_body {
            return Err(invalid(
                "deposits.min_per_body",
                "must be at least 1 and no more than max_per_body",
            ));
        }
        if self.min_quantity == 0 || self.min_quantity > self.max_quantity {
            return Err(invalid(
                "deposits.min_quantity",
                "must be at least 1 and no more than max_quantity",
            ));
        }
        if !self.richness_multiplier.is_finite() || self.richness_multiplier <= 0.0 {
            return Err(invalid("deposits.richness_multiplier", "must be positive"));
        }
        Ok(())
    }
}

/// Trading markets.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MarketsConfig {
    /// Fraction of systems that open a market.
    #[serde(default = "default_station_ratio")]
    pub station_ratio: f64,

    /// Fraction of locally deposited ore types a market lists.
    #[serde(default = "default_listed_ore_fraction")]
    pub listed_ore_fraction: f64,
}

impl Default for MarketsConfig {
    fn default() -> Self {
        Self {
            station_ratio: default_station_ratio(),
            listed_ore_fraction: default_listed_ore_fraction(),
        }
    }
}

/// Warp gate network.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GatesConfig {
    /// Fewest lanes per system.
    #[serde(default = "default_min_degree")]
    pub min_degree: u32,

    /// Most lanes per system.
    #[serde(default = "default_max_degree")]
    pub max_degree: u32,

    /// Preferred reach when topping systems up to `min_degree`.
    #[serde(default = "default_link_distance")]
    pub link_distance: f64,

    /// Lanes longer than this start dormant.
    #[serde(default = "default_dormant_distance")]
    pub dormant_distance: f64,

    /// Chance a lane is hidden.
    #[serde(default = "default_hidden_chance")]
    pub hidden_chance: f64,

    /// Chance a hidden lane is a dead end.
    #[serde(default = "default_dead_gate_chance")]
    pub dead_gate_chance: f64,

    /// Chance a hidden lane (not a dead end) is a jackpot.
    #[serde(default = "default_jackpot_chance")]
    pub jackpot_chance: f64,

    /// Number of mirror entry/return pairs.
    #[serde(default = "default_mirror_pairs")]
    pub mirror_pairs: u32,

    /// Sensor level needed to see mirror gates.
    #[serde(default = "default_mirror_sensor_level")]
    pub mirror_sensor_level: i32,
}

impl Default for GatesConfig {
    fn default() -> Self {
        Self {
            min_degree: default_min_degree(),
            max_degree: default_max_degree(),
            link_distance: default_link_distance(),
            dormant_distance: default_dormant_distance(),
            hidden_chance: default_hidden_chance(),
            dead_gate_chance: default_dead_gate_chance(),
            jackpot_chance: default_jackpot_chance(),
            mirror_pairs: default_mirror_pairs(),
            mirror_sensor_level: default_mirror_sensor_level(),
        }
    }
}

impl GatesConfig {
    /// Whether a pilot with `sensor_level` sees `gate`, using the
    /// configured mirror sensor threshold.
    pub fn detects(&self, gate: &WarpGate, sensor_level: i32) -> bool {
        gate_detectable(gate, sensor_level, self.mirror_sensor_level)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.max_degree == 0 {
            return Err(invalid("gates.max_degree", "must be at least 1"));
        }
        if self.min_degree > self.max_degree {
            return Err(invalid("gates.min_degree", "must not exceed max_degree"));
        }
        if !self.link_distance.is_finite() || self.link_distance <= 0.0 {
            return Err(invalid("gates.link_distance", "must be positive"));
        }
        if self.dormant_distance.is_nan() || self.dormant_distance <= 0.0 {
            return Err(invalid("gates.dormant_distance", "must be positive"));
        }
        check_probability("gates.hidden_chance", self.hidden_chance)?;
        check_probability("gates.dead_gate_chance", self.dead_gate_chance)?;
        check_probability("gates.jackpot_chance", self.jackpot_chance)
    }
}

/// Universe-scope bodies.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DeepSpaceConfig {
    /// Black holes to place.
    #[serde(default = "default_black_holes")]
    pub black_holes: u32,

    /// Nebulae to place.
    #[serde(default = "default_nebulae")]
    pub nebulae: u32,
}

impl Default for DeepSpaceConfig {
    fn default() -> Self {
        Self {
            black_holes: default_black_holes(),
            nebulae: default_nebulae(),
        }
    }
}

/// Sector grid overlay.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SectorsConfig {
    /// Cells per side of the square grid.
    #[serde(default = "default_grid_size")]
    pub grid_size: u32,
}

impl Default for SectorsConfig {
    fn default() -> Self {
        Self {
            grid_size: default_grid_size(),
        }
    }
}

impl SectorsConfig {
    fn validate(&self, shortest_side: u32) -> Result<(), ConfigError> {
        if self.grid_size == 0 || self.grid_size > MAX_GRID_SIZE {
            return Err(invalid(
                "sectors.grid_size",
                format!("must be between 1 and {MAX_GRID_SIZE}"),
            ));
        }
        if self.grid_size > shortest_side {
            return Err(invalid(
                "sectors.grid_size",
                "must not exceed the galaxy's shortest side",
            ));
        }
        Ok(())
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

fn default_galaxy_name() -> String {
    String::from("Starlane")
}

const fn default_seed() -> u64 {
    42
}

const fn default_extent() -> u32 {
    300
}

const fn default_star_count() -> u32 {
    150
}

const fn default_min_separation() -> f64 {
    12.0
}

const fn default_attempts_per_point() -> u32 {
    30
}

const fn default_max_multiplicity() -> u8 {
    3
}

const fn default_system_probability() -> f64 {
    0.8
}

const fn default_min_bodies() -> u32 {
    1
}

const fn default_max_bodies() -> u32 {
    6
}

const fn default_moon_chance() -> f64 {
    0.35
}

const fn default_max_moons() -> u32 {
    3
}

const fn default_deposit_chance() -> f64 {
    0.95
}

const fn default_min_per_body() -> u32 {
    1
}

const fn default_max_per_body() -> u32 {
    3
}

const fn default_min_quantity() -> u32 {
    100
}

const fn default_max_quantity() -> u32 {
    1000
}

const fn default_richness_multiplier() -> f64 {
    2.0
}

const fn default_station_ratio() -> f64 {
    0.3
}

const fn default_listed_ore_fraction() -> f64 {
    0.5
}

const fn default_min_degree() -> u32 {
    2
}

const fn default_max_degree() -> u32 {
    4
}

const fn default_link_distance() -> f64 {
    40.0
}

const fn default_dormant_distance() -> f64 {
    60.0
}

const fn default_hidden_chance() -> f64 {
    0.1
}

const fn default_dead_gate_chance() -> f64 {
    0.05
}

const fn default_jackpot_chance() -> f64 {
    0.01
}

const fn default_mirror_pairs() -> u32 {
    1
}

const fn default_mirror_sensor_level() -> i32 {
    5
}

const fn default_grid_size() -> u32 {
    5
}

const fn default_black_holes() -> u32 {
    3
}

const fn default_nebulae() -> u32 {
    6
}

fn default_log_level() -> String {
    String::from("info")
}

fn default_star_classes() -> BTreeMap<StarClass, f64> {
    BTreeMap::from([
        (StarClass::RedGiant, 0.2),
        (StarClass::MainSequence, 0.7),
        (StarClass::WhiteDwarf, 0.1),
    ])
}

fn default_world_weights() -> BTreeMap<StarClass, BTreeMap<TemperatureBand, f64>> {
    use TemperatureBand::{Cold, Hot, Mild, VeryCold, VeryHot};
    BTreeMap::from([
        (
            StarClass::RedGiant,
            BTreeMap::from([(VeryHot, 1.0), (Hot, 2.0), (Mild, 2.0), (Cold, 3.0), (VeryCold, 2.0)]),
        ),
        (
            StarClass::MainSequence,
            BTreeMap::from([(VeryHot, 1.0), (Hot, 2.0), (Mild, 4.0), (Cold, 2.0), (VeryCold, 1.0)]),
        ),
        (
            StarClass::WhiteDwarf,
            BTreeMap::from([(VeryHot, 0.5), (Hot, 1.0), (Mild, 1.0), (Cold, 3.0), (VeryCold, 4.0)]),
        ),
    ])
}

fn default_body_types() -> BTreeMap<BodyType, f64> {
    BTreeMap::from([
        (BodyType::Planet, 5.0),
        (BodyType::DwarfPlanet, 2.0),
        (BodyType::AsteroidBelt, 1.0),
        (BodyType::Asteroid, 1.0),
        (BodyType::Comet, 1.0),
    ])
}

/// The stock ore catalog: three to four ores per rarity tier.
pub fn default_ores() -> Vec<Ore> {
    use MineralRarity::{Abundant, Common, Epic, Legendary, Mythic, Rare, Uncommon, VeryRare};
    use TemperatureBand::{Cold, Hot, Mild, VeryCold, VeryHot};

    let ore = |key: &str, name: &str, rarity, base_price, origins: &[TemperatureBand]| Ore {
        key: key.to_owned(),
        name: name.to_owned(),
        rarity,
        base_price,
        origins: origins.iter().copied().collect(),
    };

    vec![
        ore("water_ice", "Water Ice", Abundant, 10.0, &[Cold, VeryCold]),
        ore("carbon", "Carbon", Abundant, 8.0, &[VeryHot, Hot, Mild, Cold, VeryCold]),
        ore("iron_ore", "Iron Ore", Common, 25.0, &[Hot, Mild, Cold]),
        ore("silicates", "Silicates", Common, 30.0, &[VeryHot, Hot, Mild]),
        ore("nickel", "Nickel", Common, 35.0, &[Mild, Cold]),
        ore("titanium", "Titanium", Uncommon, 75.0, &[Hot, Mild]),
        ore("copper", "Copper", Uncommon, 60.0, &[Hot, Mild, Cold]),
        ore("lithium", "Lithium", Uncommon, 80.0, &[Cold, VeryCold]),
        ore("platinum", "Platinum", Rare, 200.0, &[VeryHot, Hot]),
        ore("gold", "Gold", Rare, 250.0, &[Hot, Mild]),
        ore("cobalt", "Cobalt", Rare, 180.0, &[Mild, Cold]),
        ore("rhodium", "Rhodium", VeryRare, 500.0, &[VeryHot]),
        ore("iridium", "Iridium", VeryRare, 450.0, &[Hot, VeryHot]),
        ore("tritium", "Tritium", VeryRare, 550.0, &[VeryCold]),
        ore("antimatter", "Antimatter", Epic, 1500.0, &[VeryCold]),
        ore("neutronium", "Neutronium", Epic, 2000.0, &[VeryHot]),
        ore("dark_matter_crystals", "Dark Matter Crystals", Epic, 1800.0, &[Cold, VeryCold]),
        ore("quantum_foam", "Quantum Foam", Legendary, 5000.0, &[Mild]),
        ore("exotic_matter", "Exotic Matter", Legendary, 6000.0, &[VeryHot, VeryCold]),
        ore("chronoton", "Chronoton", Legendary, 5500.0, &[Cold]),
        ore("starcore_fragments", "Starcore Fragments", Mythic, 15_000.0, &[VeryHot]),
        ore("zero_point_crystals", "Zero-Point Energy Crystals", Mythic, 20_000.0, &[VeryCold]),
        ore("primordial_elements", "Primordial Elements", Mythic, 25_000.0, &[Mild]),
    ]
}
