//! Name generation from syllable tables.

use std::collections::BTreeSet;

use crate::rng::GalaxyRng;

const STAR_PREFIXES: &[&str] = &[
    "Alp", "Bet", "Gam", "Del", "Eps", "Zet", "Eta", "The", "Iot", "Kap", "Lam", "Sig", "Tau",
    "Ups", "Phi", "Chi", "Psi", "Ome", "Rig", "Veg", "Pro", "Arc", "Sir", "Pol", "Den", "Alt",
    "Cap", "Ald", "Ant", "Spi", "For", "Cen", "Lac", "Pav", "Ind", "Ara", "Nor", "Cru",
];

const STAR_MIDDLES: &[&str] = &[
    "ar", "el", "an", "or", "en", "al", "ir", "ul", "ax", "on", "is", "us", "em", "os", "in", "at",
];

const STAR_SUFFIXES: &[&str] = &["a", "us", "is", "i", "ae", "ix", "on", "um"];

const DEEP_SPACE_ADJECTIVES: &[&str] = &[
    "Silent", "Crimson", "Veiled", "Hollow", "Ashen", "Shrouded", "Drifting", "Pale", "Burning",
    "Obsidian", "Sunken", "Whispering",
];

const DEEP_SPACE_NOUNS: &[&str] = &[
    "Maw", "Veil", "Shroud", "Abyss", "Expanse", "Reach", "Eye", "Cradle", "Deep", "Drift",
];

const STATION_SUFFIXES: &[&str] = &["Exchange", "Depot", "Market", "Station", "Bazaar", "Outpost"];

const ROMAN: &[&str] = &[
    "I", "II", "III", "IV", "V", "VI", "VII", "VIII", "IX", "X", "XI", "XII",
];

fn pick<'a>(table: &[&'a str], rng: &mut GalaxyRng) -> &'a str {
    rng.index(table.len())
        .and_then(|i| table.get(i))
        .copied()
        .unwrap_or_default()
}

/// A classical-sounding star name such as "Vegaris" or "Polan".
pub fn star_name(rng: &mut GalaxyRng) -> String {
    let mut name = String::from(pick(STAR_PREFIXES, rng));
    name.push_str(pick(STAR_MIDDLES, rng));
    if rng.chance(0.5) {
        name.push_str(pick(STAR_SUFFIXES, rng));
    }
    name
}

/// Claim `name` in `taken`, suffixing the sequence number on a collision:
/// a second "Polan" placed eighth becomes "Polan 8".
///
/// Generated star names contain no spaces, so a suffixed name cannot
/// collide with an unsuffixed one. Distinct sequence numbers keep suffixed
/// names apart.
pub fn claim_unique(name: String, sequence: usize, taken: &mut BTreeSet<String>) -> String {
    let name = if taken.contains(&name) {
        format!("{name} {sequence}")
    } else {
        name
    };
    taken.insert(name.clone());
    name
}

/// A name for a black hole or nebula, e.g. "The Veiled Maw".
pub fn deep_space_name(rng: &mut GalaxyRng) -> String {
    let adjective = pick(DEEP_SPACE_ADJECTIVES, rng);
    let noun = pick(DEEP_SPACE_NOUNS, rng);
    format!("The {adjective} {noun}")
}

/// A market name for the given system.
pub fn station_name(system: &str, rng: &mut GalaxyRng) -> String {
    format!("{system} {}", pick(STATION_SUFFIXES, rng))
}

/// Planet name from the star and orbit position: "Vega III".
///
/// Positions beyond the numeral table fall back to arabic numbers.
pub fn planet_name(star: &str, orbital_index: u32) -> String {
    let numeral = usize::try_from(orbital_index)
        .ok()
        .and_then(|i| i.checked_sub(1))
        .and_then(|i| ROMAN.get(i));
    match numeral {
        Some(numeral) => format!("{star} {numeral}"),
        None => format!("{star} {orbital_index}"),
    }
}

/// Moon name from the parent and its index: "Vega III b".
pub fn moon_name(parent: &str, moon_index: u32) -> String {
    let letter = u8::try_from(moon_index)
        .ok()
        .and_then(|i| b'a'.checked_add(i.saturating_add(1)))
        .filter(u8::is_ascii_lowercase)
        .map_or('x', char::from);
    format!("{parent} {letter}")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn planet_names_use_roman_numerals() {
        assert_eq!(planet_name("Vega", 1), "Vega I");
        assert_eq!(planet_name("Vega", 4), "Vega IV");
        assert_eq!(planet_name("Vega", 12), "Vega XII");
        assert_eq!(planet_name("Vega", 13), "Vega 13");
        assert_eq!(planet_name("Vega", 0), "Vega 0");
    }

    #[test]
    fn moon_names_start_at_b() {
        assert_eq!(moon_name("Vega III", 0), "Vega III b");
        assert_eq!(moon_name("Vega III", 2), "Vega III d");
    }

    #[test]
    fn generated_names_are_deterministic_and_non_empty() {
        let a = star_name(&mut GalaxyRng::from_seed(1));
        let b = star_name(&mut GalaxyRng::from_seed(1));
        assert_eq!(a, b);
        assert!(a.len() >= 5);
        let deep = deep_space_name(&mut GalaxyRng::from_seed(2));
        assert!(deep.starts_with("The "));
        assert!(station_name("Polan", &mut GalaxyRng::from_seed(3)).starts_with("Polan "));
    }

    #[test]
    fn colliding_names_take_the_sequence_number() {
        let mut taken = BTreeSet::new();
        assert_eq!(claim_unique(String::from("Polan"), 1, &mut taken), "Polan");
        assert_eq!(claim_unique(String::from("Vegar"), 2, &mut taken), "Vegar");
        assert_eq!(claim_unique(String::from("Polan"), 8, &mut taken), "Polan 8");
        assert_eq!(claim_unique(String::from("Polan"), 9, &mut taken), "Polan 9");
        assert_eq!(taken.len(), 4);
    }
}
