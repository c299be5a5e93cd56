//! Proportional selection from a weight table.
//!
//! A [`WeightTable`] stores the running sum of its weights. Selection takes
//! one uniform draw `u` in `[0, total)` and returns the first category whose
//! cumulative sum exceeds `u`, so each category owns the half-open interval
//! `[previous_sum, own_sum)`. One draw per selection, whatever the shape of
//! the table.

use core::fmt;

use crate::error::WeightError;
use crate::rng::GalaxyRng;

/// Categories with cumulative weights, validated at construction.
#[derive(Debug, Clone)]
pub struct WeightTable<K> {
    /// Categories with a positive weight, in input order.
    entries: Vec<K>,
    /// Running sum of weights, parallel to `entries`.
    cumulative: Vec<f64>,
    /// Sum of all weights.
    total: f64,
    /// Returned if rounding ever pushes a draw onto the upper edge.
    last: K,
}

impl<K: Clone + fmt::Debug> WeightTable<K> {
    /// Build a table named `table` (used in error messages).
    ///
    /// Zero weights are accepted and never selected. Negative or non-finite
    /// weights, an empty table, and an all-zero table are errors.
    pub fn new(
        table: &str,
        weights: impl IntoIterator<Item = (K, f64)>,
    ) -> Result<Self, WeightError> {
        let mut entries = Vec::new();
        let mut cumulative = Vec::new();
        let mut total = 0.0_f64;
        let mut seen_any = false;

        for (category, weight) in weights {
            seen_any = true;
            if !weight.is_finite() {
                return Err(WeightError::NonFinite {
                    table: table.to_owned(),
                    category: format!("{category:?}"),
                });
            }
            if weight < 0.0 {
                return Err(WeightError::Negative {
                    table: table.to_owned(),
                    category: format!("{category:?}"),
                    weight,
                });
            }
            if weight > 0.0 {
                total += weight;
                entries.push(category);
                cumulative.push(total);
            }
        }

        if !seen_any {
            return Err(WeightError::Empty {
                table: table.to_owned(),
            });
        }
        let Some(last) = entries.last().cloned() else {
            return Err(WeightError::ZeroTotal {
                table: table.to_owned(),
            });
        };

        Ok(Self {
            entries,
            cumulative,
            total,
            last,
        })
    }

    /// Pick one category using a single uniform draw.
    pub fn select(&self, rng: &mut GalaxyRng) -> &K {
        self.select_with(rng.uniform())
    }

    /// Pick the category owning `roll * total`, for `roll` in `[0, 1)`.
    pub fn select_with(&self, roll: f64) -> &K {
        let target = roll * self.total;
        let index = self.cumulative.partition_point(|&sum| sum <= target);
        self.entries.get(index).unwrap_or(&self.last)
    }

    /// Sum of all weights.
    pub const fn total_weight(&self) -> f64 {
        self.total
    }

    /// Number of selectable (positive-weight) categories.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false: construction rejects tables with nothing selectable.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Selectable categories in input order.
    pub fn categories(&self) -> &[K] {
        &self.entries
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::float_cmp,
    clippy::cast_precision_loss,
    clippy::arithmetic_side_effects
)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    #[test]
    fn frequencies_converge_to_weights() {
        let table = WeightTable::new("stars", [("a", 1.0), ("b", 3.0), ("c", 6.0)]).unwrap();
        let mut rng = GalaxyRng::from_seed(1234);
        let mut counts: BTreeMap<&str, u32> = BTreeMap::new();
        let draws = 100_000;
        for _ in 0..draws {
            *counts.entry(*table.select(&mut rng)).or_default() += 1;
        }
        for (key, weight) in [("a", 0.1), ("b", 0.3), ("c", 0.6)] {
            let observed = f64::from(counts[key]) / f64::from(draws);
            assert!((observed - weight).abs() < 0.01, "{key}: {observed} vs {weight}");
        }
    }

    #[test]
    fn zero_weight_is_never_selected() {
        let table = WeightTable::new("t", [("x", 2.0), ("never", 0.0), ("y", 1.0)]).unwrap();
        let mut rng = GalaxyRng::from_seed(8);
        for _ in 0..50_000 {
            assert_ne!(*table.select(&mut rng), "never");
        }
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn boundaries_are_half_open() {
        let table = WeightTable::new("t", [("a", 1.0), ("b", 1.0)]).unwrap();
        assert_eq!(*table.select_with(0.0), "a");
        assert_eq!(*table.select_with(0.499_999), "a");
        // Exactly on the first cumulative sum belongs to the next bucket.
        assert_eq!(*table.select_with(0.5), "b");
        assert_eq!(*table.select_with(0.999_999), "b");
        assert_eq!(table.total_weight(), 2.0);
    }

    #[test]
    fn invalid_tables_fail_fast() {
        let empty: [(&str, f64); 0] = [];
        assert!(matches!(
            WeightTable::new("t", empty),
            Err(WeightError::Empty { .. })
        ));
        assert!(matches!(
            WeightTable::new("t", [("a", 0.0), ("b", 0.0)]),
            Err(WeightError::ZeroTotal { .. })
        ));
        assert!(matches!(
            WeightTable::new("t", [("a", 1.0), ("b", -0.5)]),
            Err(WeightError::Negative { .. })
        ));
        assert!(matches!(
            WeightTable::new("t", [("a", f64::NAN)]),
            Err(WeightError::NonFinite { .. })
        ));
    }

    #[test]
    fn one_draw_per_selection() {
        let skewed = WeightTable::new("t", [("a", 1000.0), ("b", 0.001)]).unwrap();
        let flat = WeightTable::new("t", [("a", 1.0), ("b", 1.0), ("c", 1.0)]).unwrap();
        let mut x = GalaxyRng::from_seed(4);
        let mut y = GalaxyRng::from_seed(4);
        for _ in 0..100 {
            skewed.select(&mut x);
            flat.select(&mut y);
        }
        assert_eq!(x.uniform(), y.uniform());
    }
}
