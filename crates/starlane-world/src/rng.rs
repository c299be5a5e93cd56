//! Deterministic random source for galaxy generation.
//!
//! [`GalaxyRng`] wraps [`ChaCha8Rng`], whose output is fixed by the seed on
//! every platform. Each pipeline stage draws from its own stream, derived
//! from the run seed mixed with the stage name, so a stage's output does not
//! depend on which other stages ran before it.

use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use starlane_types::{Bounds, Coordinate};

/// Seeded random source with the draw helpers the generator needs.
#[derive(Debug, Clone)]
pub struct GalaxyRng {
    inner: ChaCha8Rng,
}

impl GalaxyRng {
    /// Create a source seeded directly from `seed`.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Create the source for a named stream of a run.
    ///
    /// Distinct names give independent streams; the same `(seed, stream)`
    /// always gives the same sequence.
    pub fn for_stream(seed: u64, stream: &str) -> Self {
        Self::from_seed(stream_seed(seed, stream))
    }

    /// Uniform float in `[0, 1)`.
    pub fn uniform(&mut self) -> f64 {
        self.inner.random::<f64>()
    }

    /// Bernoulli trial. Always consumes exactly one draw.
    pub fn chance(&mut self, probability: f64) -> bool {
        self.uniform() < probability
    }

    /// Uniform integer in `[low, high]`. Returns `low` without drawing when
    /// the range holds a single value or is inverted.
    pub fn range_u32(&mut self, low: u32, high: u32) -> u32 {
        if low >= high {
            return low;
        }
        self.inner.random_range(low..=high)
    }

    /// Uniform index into a collection of length `len`.
    pub fn index(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        Some(self.inner.random_range(0..len))
    }

    /// Uniform coordinate inside `bounds` (edges included).
    pub fn coordinate_in(&mut self, bounds: &Bounds) -> Coordinate {
        let x = self.range_u32(bounds.min_x, bounds.max_x);
        let y = self.range_u32(bounds.min_y, bounds.max_y);
        Coordinate::new(x, y)
    }

    /// Sixteen random bytes for building an entity identifier.
    pub fn id_bytes(&mut self) -> [u8; 16] {
        let mut bytes = [0_u8; 16];
        self.inner.fill_bytes(&mut bytes);
        bytes
    }
}

impl RngCore for GalaxyRng {
    fn next_u32(&mut self) -> u32 {
        self.inner.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.inner.next_u64()
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        self.inner.fill_bytes(dst);
    }
}

/// Mix a run seed with a stream name.
///
/// FNV-1a over the name, folded into the seed and finished with the
/// `SplitMix64` avalanche step.
pub const fn stream_seed(seed: u64, stream: &str) -> u64 {
    const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

    let bytes = stream.as_bytes();
    let mut hash = FNV_OFFSET;
    let mut i = 0;
    while i < bytes.len() {
        #[allow(clippy::indexing_slicing)]
        let byte = bytes[i];
        hash ^= byte as u64;
        hash = hash.wrapping_mul(FNV_PRIME);
        i = i.wrapping_add(1);
    }

    let mut z = (seed ^ hash).wrapping_add(0x9e37_79b9_7f4a_7c15);
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_sequence() {
        let mut a = GalaxyRng::from_seed(42);
        let mut b = GalaxyRng::from_seed(42);
        for _ in 0..100 {
            assert_eq!(a.next_u64(), b.next_u64());
        }
    }

    #[test]
    fn streams_are_independent() {
        let mut stars = GalaxyRng::for_stream(42, "star_field");
        let mut gates = GalaxyRng::for_stream(42, "warp_network");
        let a: Vec<u64> = (0..8).map(|_| stars.next_u64()).collect();
        let b: Vec<u64> = (0..8).map(|_| gates.next_u64()).collect();
        assert_ne!(a, b);
        assert_eq!(stream_seed(42, "star_field"), stream_seed(42, "star_field"));
        assert_ne!(stream_seed(42, "star_field"), stream_seed(43, "star_field"));
    }

    #[test]
    fn uniform_is_half_open() {
        let mut rng = GalaxyRng::from_seed(7);
        for _ in 0..10_000 {
            let v = rng.uniform();
            assert!((0.0..1.0).contains(&v));
        }
    }

    #[test]
    fn chance_extremes() {
        let mut rng = GalaxyRng::from_seed(7);
        assert!((0..1000).all(|_| !rng.chance(0.0)));
        assert!((0..1000).all(|_| rng.chance(1.0)));
    }

    #[test]
    fn range_and_coordinates_stay_inside() {
        let mut rng = GalaxyRng::from_seed(9);
        let bounds = Bounds::from_dimensions(10, 4).unwrap();
        for _ in 0..1000 {
            let c = rng.coordinate_in(&bounds);
            assert!(bounds.contains(c));
            let v = rng.range_u32(3, 5);
            assert!((3..=5).contains(&v));
        }
        assert_eq!(rng.range_u32(6, 6), 6);
        assert_eq!(rng.index(0), None);
    }
}
