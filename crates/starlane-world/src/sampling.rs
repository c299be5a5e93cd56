//! Rejection sampling of well-separated points.
//!
//! Candidates are drawn uniformly inside the bounds and accepted only when
//! they keep at least `min_separation` distance from every point accepted
//! so far (and from any obstacle points supplied by the caller). The total
//! number of candidate draws is capped at `target * attempts_per_point`, so
//! a crowded area yields fewer points instead of looping forever.

use starlane_types::{Bounds, Coordinate};

use crate::rng::GalaxyRng;

/// Candidate draws allowed per requested point.
pub const DEFAULT_ATTEMPTS_PER_POINT: u32 = 30;

/// Most points reserved up front; larger samples grow as they accept.
const PREALLOCATED_POINTS: usize = 1024;

/// Result of one sampling run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointSample {
    /// Accepted points in acceptance order.
    pub points: Vec<Coordinate>,
    /// Number of points asked for.
    pub requested: usize,
    /// Candidate draws made, accepted or not.
    pub attempts: u64,
}

impl PointSample {
    /// How many requested points could not be placed.
    pub const fn shortfall(&self) -> usize {
        self.requested.saturating_sub(self.points.len())
    }
}

/// Draws separated points inside a rectangle.
#[derive(Debug, Clone, Copy)]
pub struct PointSampler {
    bounds: Bounds,
    min_separation: f64,
    attempts_per_point: u32,
}

impl PointSampler {
    /// Create a sampler with the default attempt budget.
    pub const fn new(bounds: Bounds, min_separation: f64) -> Self {
        Self {
            bounds,
            min_separation,
            attempts_per_point: DEFAULT_ATTEMPTS_PER_POINT,
        }
    }

    /// Override the per-point attempt budget (minimum 1).
    pub const fn with_attempts_per_point(mut self, attempts: u32) -> Self {
        self.attempts_per_point = if attempts == 0 { 1 } else { attempts };
        self
    }

    /// Sample up to `target` points.
    pub fn sample(&self, target: usize, rng: &mut GalaxyRng) -> PointSample {
        self.sample_avoiding(target, &[], rng)
    }

    /// Sample up to `target` points that also keep clear of `obstacles`.
    ///
    /// `target == 0` returns immediately without touching the RNG.
    /// Coincident points are always rejected, even with a zero separation.
    pub fn sample_avoiding(
        &self,
        target: usize,
        obstacles: &[Coordinate],
        rng: &mut GalaxyRng,
    ) -> PointSample {
        let mut sample = PointSample {
            points: Vec::with_capacity(target.min(PREALLOCATED_POINTS)),
            requested: target,
            attempts: 0,
        };
        if target == 0 {
            return sample;
        }

        let budget = u64::try_from(target)
            .unwrap_or(u64::MAX)
            .saturating_mul(u64::from(self.attempts_per_point));

        while sample.points.len() < target && sample.attempts < budget {
            sample.attempts = sample.attempts.saturating_add(1);
            let candidate = rng.coordinate_in(&self.bounds);
            if self.is_clear(candidate, obstacles) && self.is_clear(candidate, &sample.points) {
                sample.points.push(candidate);
            }
        }

        if sample.shortfall() > 0 {
            tracing::debug!(
                requested = target,
                placed = sample.points.len(),
                attempts = sample.attempts,
                "Point sampling exhausted its attempt budget"
            );
        }
        sample
    }

    fn is_clear(&self, candidate: Coordinate, existing: &[Coordinate]) -> bool {
        existing
            .iter()
            .all(|&p| p != candidate && candidate.distance_to(p) >= self.min_separation)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::arithmetic_side_effects)]
mod tests {
    use rand::RngCore;

    use super::*;

    fn bounds(width: u32, height: u32) -> Bounds {
        Bounds::from_dimensions(width, height).unwrap()
    }

    #[test]
    fn accepted_points_are_separated_and_inside() {
        let area = bounds(200, 150);
        let sampler = PointSampler::new(area, 9.5);
        let mut rng = GalaxyRng::from_seed(11);
        let sample = sampler.sample(120, &mut rng);

        assert!(!sample.points.is_empty());
        for (i, a) in sample.points.iter().enumerate() {
            assert!(area.contains(*a));
            for b in &sample.points[i + 1..] {
                assert!(a.distance_to(*b) >= 9.5, "{a:?} too close to {b:?}");
            }
        }
    }

    #[test]
    fn zero_target_draws_nothing() {
        let sampler = PointSampler::new(bounds(50, 50), 2.0);
        let mut used = GalaxyRng::from_seed(5);
        let mut fresh = GalaxyRng::from_seed(5);

        let sample = sampler.sample(0, &mut used);

        assert!(sample.points.is_empty());
        assert_eq!(sample.attempts, 0);
        assert_eq!(sample.shortfall(), 0);
        assert_eq!(used.next_u64(), fresh.next_u64());
    }

    #[test]
    fn oversized_target_does_not_reserve_its_full_size() {
        let sampler = PointSampler::new(bounds(2, 2), 0.0).with_attempts_per_point(1);
        let mut rng = GalaxyRng::from_seed(8);
        let sample = sampler.sample(1_000_000, &mut rng);

        assert_eq!(sample.requested, 1_000_000);
        assert_eq!(sample.points.len(), 4);
        assert!(sample.points.capacity() <= 1024);
        assert_eq!(sample.shortfall(), 999_996);
    }

    #[test]
    fn crowded_area_reports_shortfall() {
        // A 10x10 area fits only a handful of points 6 apart.
        let sampler = PointSampler::new(bounds(10, 10), 6.0).with_attempts_per_point(50);
        let mut rng = GalaxyRng::from_seed(3);
        let sample = sampler.sample(40, &mut rng);

        assert!(sample.points.len() < 40);
        assert_eq!(sample.shortfall(), 40 - sample.points.len());
        assert_eq!(sample.attempts, 40 * 50);
    }

    #[test]
    fn obstacles_are_avoided() {
        let area = bounds(60, 60);
        let obstacles = vec![Coordinate::new(30, 30), Coordinate::new(10, 50)];
        let sampler = PointSampler::new(area, 8.0);
        let mut rng = GalaxyRng::from_seed(21);
        let sample = sampler.sample_avoiding(15, &obstacles, &mut rng);

        for p in &sample.points {
            for o in &obstacles {
                assert!(p.distance_to(*o) >= 8.0);
            }
        }
    }

    #[test]
    fn same_seed_same_points() {
        let sampler = PointSampler::new(bounds(300, 300), 12.0);
        let a = sampler.sample(80, &mut GalaxyRng::from_seed(99));
        let b = sampler.sample(80, &mut GalaxyRng::from_seed(99));
        assert_eq!(a, b);
    }

    #[test]
    fn zero_separation_still_rejects_duplicates() {
        let sampler = PointSampler::new(bounds(3, 3), 0.0).with_attempts_per_point(200);
        let mut rng = GalaxyRng::from_seed(1);
        let sample = sampler.sample(9, &mut rng);
        let mut unique = sample.points.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), sample.points.len());
    }
}
