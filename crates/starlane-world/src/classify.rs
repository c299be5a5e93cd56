//! Weighted classification of stars, bodies, and ores.
//!
//! The [`Classifier`] holds one validated [`WeightTable`] per categorical
//! draw the generator makes. Temperature bands are drawn from a table keyed
//! by the parent star's class; a class without its own table falls back to
//! an even hot / mild / cold split.
//!
//! [`OreSelector`] picks ores for a body: only ores whose origin set holds
//! the body's band are eligible, weighted by rarity abundance.

use std::collections::BTreeMap;

use starlane_types::{BodyType, Ore, SizeClass, StarClass, TemperatureBand};

use crate::error::WeightError;
use crate::rng::GalaxyRng;
use crate::weighted::WeightTable;

/// Validated weight tables for every categorical draw.
#[derive(Debug, Clone)]
pub struct Classifier {
    star_classes: WeightTable<StarClass>,
    temperatures: BTreeMap<StarClass, WeightTable<TemperatureBand>>,
    fallback_temperature: WeightTable<TemperatureBand>,
    body_types: WeightTable<BodyType>,
    sizes: WeightTable<SizeClass>,
}

impl Classifier {
    /// Build every table, failing on the first malformed one.
    pub fn new(
        star_weights: &BTreeMap<StarClass, f64>,
        world_weights: &BTreeMap<StarClass, BTreeMap<TemperatureBand, f64>>,
        body_weights: &BTreeMap<BodyType, f64>,
    ) -> Result<Self, WeightError> {
        let star_classes = WeightTable::new("star_classes", copied(star_weights))?;

        let mut temperatures = BTreeMap::new();
        for (class, bands) in world_weights {
            let table = WeightTable::new(&format!("world_weights.{class}"), copied(bands))?;
            temperatures.insert(*class, table);
        }

        let fallback_temperature = WeightTable::new(
            "world_weights.default",
            [
                (TemperatureBand::Hot, 1.0),
                (TemperatureBand::Mild, 1.0),
                (TemperatureBand::Cold, 1.0),
            ],
        )?;
        let body_types = WeightTable::new("bodies.types", copied(body_weights))?;
        let sizes = WeightTable::new("sizes", SizeClass::ALL.map(|s| (s, 1.0)))?;

        Ok(Self {
            star_classes,
            temperatures,
            fallback_temperature,
            body_types,
            sizes,
        })
    }

    /// Draw a star class.
    pub fn star_class(&self, rng: &mut GalaxyRng) -> StarClass {
        *self.star_classes.select(rng)
    }

    /// Draw a temperature band for a body orbiting a star of `class`.
    pub fn temperature(&self, class: StarClass, rng: &mut GalaxyRng) -> TemperatureBand {
        let table = self
            .temperatures
            .get(&class)
            .unwrap_or(&self.fallback_temperature);
        *table.select(rng)
    }

    /// Draw a body type for a full planetary system.
    pub fn body_type(&self, rng: &mut GalaxyRng) -> BodyType {
        *self.body_types.select(rng)
    }

    /// Draw a size class.
    pub fn size(&self, rng: &mut GalaxyRng) -> SizeClass {
        *self.sizes.select(rng)
    }
}

/// Picks ores that can form in a given temperature band.
#[derive(Debug, Clone)]
pub struct OreSelector<'a> {
    catalog: &'a [Ore],
    by_band: BTreeMap<TemperatureBand, WeightTable<usize>>,
}

impl<'a> OreSelector<'a> {
    /// Index the catalog by origin band.
    pub fn new(catalog: &'a [Ore]) -> Self {
        let mut by_band = BTreeMap::new();
        for band in TemperatureBand::ALL {
            let eligible = catalog
                .iter()
                .enumerate()
                .filter(|(_, ore)| ore.forms_in(band))
                .map(|(index, ore)| (index, ore.rarity.abundance_weight()));
            // Bands no ore can form in get no table.
            if let Ok(table) = WeightTable::new(band.as_str(), eligible) {
                by_band.insert(band, table);
            }
        }
        Self { catalog, by_band }
    }

    /// Draw an ore for a body of `band`, or `None` if nothing forms there.
    ///
    /// Consumes a draw only when at least one ore is eligible.
    pub fn pick(&self, band: TemperatureBand, rng: &mut GalaxyRng) -> Option<&'a Ore> {
        let table = self.by_band.get(&band)?;
        self.catalog.get(*table.select(rng))
    }

    /// Whether any ore can form in `band`.
    pub fn has_candidates(&self, band: TemperatureBand) -> bool {
        self.by_band.contains_key(&band)
    }
}

fn copied<K: Copy>(weights: &BTreeMap<K, f64>) -> impl Iterator<Item = (K, f64)> + '_ {
    weights.iter().map(|(k, w)| (*k, *w))
}
