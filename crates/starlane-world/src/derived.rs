//! Pure calculators for attributes derived from generated state.
//!
//! None of these hold state; collaborators may call them at request time
//! for stored values (an equipment level, a persisted gate) without a
//! generation run. Gate-type parsing lives on
//! [`GateType::from_string`](starlane_types::GateType::from_string).

use core::ops::RangeInclusive;

use starlane_types::{MineralRarity, WarpGate};

/// Sensor detection range in light-years for an equipment level.
///
/// Level 1 sees 1 LY; every level above that sees `2 * (level - 1)` LY, so
/// level 2 sees 2, level 5 sees 8, and level 9 sees 16. Levels at or below
/// zero are treated as level 1.
pub fn sensor_range_ly(level: i32) -> f64 {
    if level <= 1 {
        return 1.0;
    }
    2.0 * f64::from(level.saturating_sub(1))
}

/// Market price of an ore: base price times its rarity multiplier.
pub const fn listed_price(base_price: f64, rarity: MineralRarity) -> f64 {
    base_price * rarity.value_multiplier()
}

/// How many of `available` local ore types a market lists.
///
/// `max(1, round(available * fraction))`, never more than `available`, and
/// zero when nothing is available.
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn listed_ore_count(available: usize, fraction: f64) -> usize {
    if available == 0 {
        return 0;
    }
    let wanted = (available as f64 * fraction.clamp(0.0, 1.0)).round() as usize;
    wanted.clamp(1, available)
}

/// Stock drawn for a listing, by rarity band.
pub const fn stock_range(rarity: MineralRarity) -> RangeInclusive<u32> {
    match rarity {
        MineralRarity::Abundant | MineralRarity::Common => 400..=1200,
        MineralRarity::Uncommon => 150..=500,
        MineralRarity::Rare => 30..=120,
        MineralRarity::VeryRare
        | MineralRarity::Epic
        | MineralRarity::Legendary
        | MineralRarity::Mythic => 10..=40,
    }
}

/// Supply-adjusted price for `stock` units on hand.
///
/// `base * (k + 1) / (stock + k)` with a rarity-dependent softening
/// constant `k`, clamped to `[0.3 * base, 5 * base]`. One unit in stock
/// sells at exactly `base`.
pub fn price_for_stock(base_price: f64, rarity: MineralRarity, stock: u32) -> f64 {
    let k = match rarity {
        MineralRarity::Abundant | MineralRarity::Common => 200.0,
        MineralRarity::Uncommon => 120.0,
        MineralRarity::Rare => 60.0,
        MineralRarity::VeryRare
        | MineralRarity::Epic
        | MineralRarity::Legendary
        | MineralRarity::Mythic => 30.0,
    };
    let price = base_price * (k + 1.0) / (f64::from(stock) + k);
    price.clamp(0.3 * base_price, 5.0 * base_price)
}

/// Whether a pilot with `sensor_level` can see `gate`.
///
/// Visible lanes are always seen. Hidden lanes are seen when the sensor
/// range covers the gate's length. Mirror gates need at least
/// `mirror_sensor_level`.
pub fn gate_detectable(gate: &WarpGate, sensor_level: i32, mirror_sensor_level: i32) -> bool {
    if gate.gate_type.is_mirror_gate() {
        return sensor_level >= mirror_sensor_level;
    }
    !gate.hidden || sensor_range_ly(sensor_level) >= gate.length
}

#[cfg(test)]
#[allow(clippy::float_cmp, clippy::unwrap_used)]
mod tests {
    use starlane_types::{GateId, GateStatus, GateType, SystemId};

    use super::*;

    #[test]
    fn sensor_range_matches_table() {
        let expected = [
            (1, 1.0),
            (2, 2.0),
            (3, 4.0),
            (4, 6.0),
            (5, 8.0),
            (6, 10.0),
            (7, 12.0),
            (8, 14.0),
            (9, 16.0),
        ];
        for (level, range) in expected {
            assert_eq!(sensor_range_ly(level), range, "level {level}");
        }
    }

    #[test]
    fn sensor_range_clamps_low_levels() {
        assert_eq!(sensor_range_ly(0), sensor_range_ly(1));
        assert_eq!(sensor_range_ly(-1), sensor_range_ly(1));
        assert_eq!(sensor_range_ly(i32::MIN), 1.0);
    }

    #[test]
    fn sensor_range_strictly_increases() {
        for level in 1..200 {
            assert!(sensor_range_ly(level) < sensor_range_ly(level + 1));
        }
        assert_eq!(sensor_range_ly(20), 38.0);
        assert!(sensor_range_ly(5) < 100.0);
    }

    #[test]
    fn epic_ore_lists_at_twenty_five_times_base() {
        assert_eq!(listed_price(100.0, MineralRarity::Epic), 2500.0);
        assert_eq!(listed_price(10.0, MineralRarity::Abundant), 5.0);
        assert_eq!(listed_price(250.0, MineralRarity::Mythic), 25_000.0);
    }

    #[test]
    fn listed_ore_count_rounds_and_clamps() {
        assert_eq!(listed_ore_count(0, 0.5), 0);
        assert_eq!(listed_ore_count(1, 0.0), 1);
        assert_eq!(listed_ore_count(4, 0.5), 2);
        assert_eq!(listed_ore_count(5, 0.5), 3);
        assert_eq!(listed_ore_count(3, 1.0), 3);
        assert_eq!(listed_ore_count(3, 7.0), 3);
    }

    #[test]
    fn price_for_stock_behaves() {
        assert_eq!(price_for_stock(100.0, MineralRarity::Common, 1), 100.0);
        let scarce = price_for_stock(100.0, MineralRarity::Rare, 0);
        let glut = price_for_stock(100.0, MineralRarity::Rare, 10_000);
        assert!(scarce > 100.0);
        assert_eq!(glut, 30.0);
        assert!(price_for_stock(100.0, MineralRarity::Mythic, 0) <= 500.0);
    }

    #[test]
    fn stock_ranges_shrink_with_rarity() {
        assert!(stock_range(MineralRarity::Common).end() > stock_range(MineralRarity::Rare).end());
        assert_eq!(stock_range(MineralRarity::Mythic), 10..=40);
    }

    fn gate(gate_type: GateType, hidden: bool, length: f64) -> WarpGate {
        WarpGate {
            id: GateId::from_random_bytes([1; 16]),
            source: SystemId::from_random_bytes([2; 16]),
            destination: SystemId::from_random_bytes([3; 16]),
            gate_type,
            status: GateStatus::Active,
            hidden,
            length,
            paired_gate: None,
        }
    }

    #[test]
    fn gate_detection() {
        assert!(gate_detectable(&gate(GateType::Standard, false, 90.0), 1, 5));
        let hidden = gate(GateType::DeadEnd, true, 7.5);
        assert!(!gate_detectable(&hidden, 4, 5));
        assert!(gate_detectable(&hidden, 5, 5));
        let mirror = gate(GateType::MirrorEntry, false, 120.0);
        assert!(!gate_detectable(&mirror, 4, 5));
        assert!(gate_detectable(&mirror, 5, 5));
    }
}
