//! Closed enumerations for the Starlane galaxy model.
//!
//! Star classes, body types, temperature bands, rarity tiers, and gate
//! types are closed sets with behavior attached (labels, scopes, value
//! multipliers). Every decision point matches on them exhaustively.

use core::convert::Infallible;
use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Stellar classification
// ---------------------------------------------------------------------------

/// Spectral category of a system's primary star.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StarClass {
    /// Swollen, cool, late-life star.
    RedGiant,
    /// Hydrogen-burning star on the main sequence.
    MainSequence,
    /// Compact stellar remnant.
    WhiteDwarf,
}

impl StarClass {
    /// Every star class in declaration order.
    pub const ALL: [Self; 3] = [Self::RedGiant, Self::MainSequence, Self::WhiteDwarf];

    /// Canonical configuration key.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::RedGiant => "red_giant",
            Self::MainSequence => "main_sequence",
            Self::WhiteDwarf => "white_dwarf",
        }
    }
}

impl fmt::Display for StarClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Celestial bodies
// ---------------------------------------------------------------------------

/// Which container a body type belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BodyScope {
    /// Exists in the galaxy at large, independent of any system.
    Universe,
    /// Must belong to exactly one system.
    System,
}

impl BodyScope {
    /// Scope label (`"Universe"` or `"System"`).
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Universe => "Universe",
            Self::System => "System",
        }
    }
}

/// Kind of celestial body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyType {
    /// Natural satellite of a planet.
    Moon,
    /// Ring of rocky debris around a star.
    AsteroidBelt,
    /// Collapsed stellar remnant.
    BlackHole,
    /// Major planet.
    Planet,
    /// Free-standing star outside any system.
    Star,
    /// Interstellar cloud of gas and dust.
    Nebula,
    /// Icy body on an eccentric orbit.
    Comet,
    /// Single large rock.
    Asteroid,
    /// Planet-like body that has not cleared its orbit.
    DwarfPlanet,
}

impl BodyType {
    /// Every body type in declaration order.
    pub const ALL: [Self; 9] = [
        Self::Moon,
        Self::AsteroidBelt,
        Self::BlackHole,
        Self::Planet,
        Self::Star,
        Self::Nebula,
        Self::Comet,
        Self::Asteroid,
        Self::DwarfPlanet,
    ];

    /// The container this body type belongs to.
    pub const fn scope(self) -> BodyScope {
        match self {
            Self::BlackHole | Self::Nebula | Self::Star => BodyScope::Universe,
            Self::Moon
            | Self::Asteroid
            | Self::Planet
            | Self::Comet
            | Self::DwarfPlanet
            | Self::AsteroidBelt => BodyScope::System,
        }
    }

    /// Scope label for this body type: `"Universe"` or `"System"`.
    pub const fn what_body_type_is(self) -> &'static str {
        self.scope().as_str()
    }

    /// Human-readable name.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Moon => "Moon",
            Self::AsteroidBelt => "Asteroid Belt",
            Self::BlackHole => "Black Hole",
            Self::Planet => "Planet",
            Self::Star => "Star",
            Self::Nebula => "Nebula",
            Self::Comet => "Comet",
            Self::Asteroid => "Asteroid",
            Self::DwarfPlanet => "Dwarf Planet",
        }
    }

    /// Canonical configuration key.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Moon => "moon",
            Self::AsteroidBelt => "asteroid_belt",
            Self::BlackHole => "black_hole",
            Self::Planet => "planet",
            Self::Star => "star",
            Self::Nebula => "nebula",
            Self::Comet => "comet",
            Self::Asteroid => "asteroid",
            Self::DwarfPlanet => "dwarf_planet",
        }
    }

    /// Whether bodies of this type carry a habitability rating.
    pub const fn is_planetary(self) -> bool {
        matches!(self, Self::Planet | Self::DwarfPlanet)
    }
}

impl fmt::Display for BodyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Surface temperature band of a system-scope body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemperatureBand {
    /// Molten or scorched surface.
    VeryHot,
    /// Hot, arid surface.
    Hot,
    /// Temperate.
    Mild,
    /// Cold surface.
    Cold,
    /// Frozen surface.
    VeryCold,
}

impl TemperatureBand {
    /// Every band from hottest to coldest.
    pub const ALL: [Self; 5] = [
        Self::VeryHot,
        Self::Hot,
        Self::Mild,
        Self::Cold,
        Self::VeryCold,
    ];

    /// Canonical configuration key.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::VeryHot => "very_hot",
            Self::Hot => "hot",
            Self::Mild => "mild",
            Self::Cold => "cold",
            Self::VeryCold => "very_cold",
        }
    }
}

/// Coarse size of a system-scope body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizeClass {
    /// Smallest bodies.
    Tiny,
    /// Below average.
    Small,
    /// Average.
    Medium,
    /// Largest bodies.
    Large,
}

impl SizeClass {
    /// Every size class from smallest to largest.
    pub const ALL: [Self; 4] = [Self::Tiny, Self::Small, Self::Medium, Self::Large];
}

// ---------------------------------------------------------------------------
// Minerals
// ---------------------------------------------------------------------------

/// Rarity tier of an ore. Tiers are ordered from most to least common.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MineralRarity {
    /// Found almost everywhere.
    Abundant,
    /// Widely available.
    Common,
    /// Available with some effort.
    Uncommon,
    /// Scarce.
    Rare,
    /// Very scarce.
    VeryRare,
    /// Exotic matter.
    Epic,
    /// Near-mythical finds.
    Legendary,
    /// The rarest substances in the galaxy.
    Mythic,
}

impl MineralRarity {
    /// Every tier from most to least common.
    pub const ALL: [Self; 8] = [
        Self::Abundant,
        Self::Common,
        Self::Uncommon,
        Self::Rare,
        Self::VeryRare,
        Self::Epic,
        Self::Legendary,
        Self::Mythic,
    ];

    /// Price multiplier applied to an ore's base price.
    ///
    /// Strictly increasing with the tier order.
    pub const fn value_multiplier(self) -> f64 {
        match self {
            Self::Abundant => 0.5,
            Self::Common => 1.0,
            Self::Uncommon => 2.0,
            Self::Rare => 5.0,
            Self::VeryRare => 10.0,
            Self::Epic => 25.0,
            Self::Legendary => 50.0,
            Self::Mythic => 100.0,
        }
    }

    /// Relative frequency of deposits of this tier. Strictly decreasing.
    pub const fn abundance_weight(self) -> f64 {
        match self {
            Self::Abundant => 40.0,
            Self::Common => 25.0,
            Self::Uncommon => 15.0,
            Self::Rare => 8.0,
            Self::VeryRare => 5.0,
            Self::Epic => 3.0,
            Self::Legendary => 1.5,
            Self::Mythic => 0.5,
        }
    }

    /// Canonical configuration key.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Abundant => "abundant",
            Self::Common => "common",
            Self::Uncommon => "uncommon",
            Self::Rare => "rare",
            Self::VeryRare => "very_rare",
            Self::Epic => "epic",
            Self::Legendary => "legendary",
            Self::Mythic => "mythic",
        }
    }

    /// Human-readable name.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Abundant => "Abundant",
            Self::Common => "Common",
            Self::Uncommon => "Uncommon",
            Self::Rare => "Rare",
            Self::VeryRare => "Very Rare",
            Self::Epic => "Epic",
            Self::Legendary => "Legendary",
            Self::Mythic => "Mythic",
        }
    }
}

/// Size tier of a single deposit, derived from its quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DepositRichness {
    /// Under 200 units.
    Trace,
    /// 200 to 499 units.
    Moderate,
    /// 500 to 999 units.
    Rich,
    /// 1000 to 1499 units.
    Abundant,
    /// 1500 units or more.
    Legendary,
}

impl DepositRichness {
    /// Classify a deposit by quantity.
    pub const fn from_quantity(quantity: u32) -> Self {
        match quantity {
            1500.. => Self::Legendary,
            1000..=1499 => Self::Abundant,
            500..=999 => Self::Rich,
            200..=499 => Self::Moderate,
            _ => Self::Trace,
        }
    }
}

// ---------------------------------------------------------------------------
// Warp gates
// ---------------------------------------------------------------------------

/// Behavior category of a warp gate.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum GateType {
    /// Ordinary lane between two systems.
    #[default]
    Standard,
    /// Entry side of a mirror pair.
    MirrorEntry,
    /// Return side of a mirror pair.
    MirrorReturn,
    /// Hidden gate that leads nowhere useful.
    DeadEnd,
    /// Hidden gate leading to an unusually rich system.
    Jackpot,
}

impl GateType {
    /// Every gate type in declaration order.
    pub const ALL: [Self; 5] = [
        Self::Standard,
        Self::MirrorEntry,
        Self::MirrorReturn,
        Self::DeadEnd,
        Self::Jackpot,
    ];

    /// Parse a stored or user-supplied gate type.
    ///
    /// Matching ignores case and surrounding whitespace, and treats spaces
    /// and hyphens as underscores. Accepts `entry`, `return`, `dead end`,
    /// and `deadend` as synonyms. Anything unrecognized is [`Self::Standard`].
    pub fn from_string(raw: &str) -> Self {
        let normalized: String = raw
            .trim()
            .chars()
            .map(|c| match c {
                ' ' | '-' => '_',
                other => other.to_ascii_lowercase(),
            })
            .collect();

        match normalized.as_str() {
            "mirror_entry" | "entry" => Self::MirrorEntry,
            "mirror_return" | "return" => Self::MirrorReturn,
            "dead_end" | "deadend" => Self::DeadEnd,
            "jackpot" => Self::Jackpot,
            _ => Self::Standard,
        }
    }

    /// Canonical snake-case name, accepted back by [`Self::from_string`].
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::MirrorEntry => "mirror_entry",
            Self::MirrorReturn => "mirror_return",
            Self::DeadEnd => "dead_end",
            Self::Jackpot => "jackpot",
        }
    }

    /// True for every type except [`Self::Standard`].
    pub const fn is_special(self) -> bool {
        !matches!(self, Self::Standard)
    }

    /// True only for the two halves of a mirror pair.
    pub const fn is_mirror_gate(self) -> bool {
        matches!(self, Self::MirrorEntry | Self::MirrorReturn)
    }

    /// The opposite half of a mirror pair, if this is a mirror gate.
    pub const fn mirror_counterpart(self) -> Option<Self> {
        match self {
            Self::MirrorEntry => Some(Self::MirrorReturn),
            Self::MirrorReturn => Some(Self::MirrorEntry),
            Self::Standard | Self::DeadEnd | Self::Jackpot => None,
        }
    }
}

impl FromStr for GateType {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_string(s))
    }
}

impl fmt::Display for GateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a gate can currently be traversed.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum GateStatus {
    /// Open for travel.
    #[default]
    Active,
    /// Too long to hold open; needs activation before use.
    Dormant,
}
