//! Lane network construction.
//!
//! Links are planned geometrically first and only then turned into gates:
//!
//! 1. A degree-capped Prim tree connects every system, always attaching
//!    the closest outside system to a tree system with spare degree. It
//!    cannot strand a system unless `max_degree` is 1.
//! 2. Systems still below `min_degree` are linked to their nearest
//!    unlinked neighbour with spare degree. The first pass only reaches
//!    `link_distance`, the second twice that, the last is unrestricted.
//! 3. Each planned link becomes a lane gate, rolling its anomalies once.
//!
//! Planning draws no random numbers; only step 3 uses the stage stream.

use std::collections::BTreeSet;

use starlane_types::{Coordinate, GateId, GateStatus, GateType, SystemId};
use starlane_world::{Galaxy, GalaxyRng, LaneSpec, WorldError};
use tracing::debug;

use super::{STAR_FIELD, WARP_NETWORK, as_count, as_metric};
use crate::config::GatesConfig;
use crate::context::{GenerationContext, WarpNetwork};
use crate::metrics::StageMetrics;
use crate::stage::{Stage, StageError};

/// Top-up passes allowed before an under-linked system fails the stage.
const TOP_UP_PASSES: usize = 3;

/// Builds the lane network between systems.
#[derive(Debug, Clone, Copy, Default)]
pub struct WarpNetworkStage;

impl Stage for WarpNetworkStage {
    fn name(&self) -> &str {
        WARP_NETWORK
    }

    fn dependencies(&self) -> &[&str] {
        &[STAR_FIELD]
    }

    fn run(
        &self,
        galaxy: &mut Galaxy,
        ctx: &mut GenerationContext<'_>,
        metrics: &mut StageMetrics,
    ) -> Result<(), StageError> {
        let gates = &ctx.config.gates;
        let systems = ctx.require_star_field()?.systems.clone();
        let positions = systems
            .iter()
            .map(|&id| {
                galaxy
                    .system(id)
                    .map(|s| s.position)
                    .ok_or(WorldError::SystemNotFound(id))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let system_at = |index: usize| -> Result<SystemId, StageError> {
            systems.get(index).copied().ok_or_else(|| StageError::Failed {
                reason: format!("link planner returned unknown system index {index}"),
            })
        };

        let min_degree = as_count(gates.min_degree);
        let mut plan = LinkPlan::new(positions, as_count(gates.max_degree));
        if let Err(stranded) = plan.span() {
            return Err(StageError::Disconnected {
                system: system_at(stranded)?,
            });
        }
        metrics.set("tree_links", as_metric(plan.links.len()));

        let passes = plan.top_up(min_degree, gates.link_distance);
        metrics.set("top_up_passes", as_metric(passes));
        if let Some(under) = plan.first_below(min_degree) {
            return Err(StageError::DegreeUnsatisfied {
                system: system_at(under)?,
                degree: plan.degree(under),
                min_degree: gates.min_degree,
            });
        }

        let mut rng = ctx.stage_rng(WARP_NETWORK);
        let mut lanes = Vec::with_capacity(plan.links.len());
        for &(a, b) in &plan.links {
            let spec = roll_lane(gates, plan.distance(a, b), &mut rng);
            let id = GateId::from_random_bytes(rng.id_bytes());
            galaxy.link_lane(id, system_at(a)?, system_at(b)?, spec)?;

            metrics.record_produced(1);
            metrics.increment(spec.gate_type.as_str());
            if spec.hidden {
                metrics.increment("hidden");
            }
            if spec.status == GateStatus::Dormant {
                metrics.increment("dormant");
            }
            lanes.push(id);
        }

        debug!(
            lanes = lanes.len(),
            systems = systems.len(),
            passes,
            "Warp network planned"
        );
        ctx.warp_network = Some(WarpNetwork {
            lanes,
            top_up_passes: passes,
        });
        Ok(())
    }
}

/// Roll a lane's anomalies: hidden first, then dead end, then jackpot.
/// Only hidden lanes can be anomalous.
fn roll_lane(gates: &GatesConfig, length: f64, rng: &mut GalaxyRng) -> LaneSpec {
    let hidden = rng.chance(gates.hidden_chance);
    let gate_type = if !hidden {
        GateType::Standard
    } else if rng.chance(gates.dead_gate_chance) {
        GateType::DeadEnd
    } else if rng.chance(gates.jackpot_chance) {
        GateType::Jackpot
    } else {
        GateType::Standard
    };
    let status = if length > gates.dormant_distance {
        GateStatus::Dormant
    } else {
        GateStatus::Active
    };
    LaneSpec {
        gate_type,
        status,
        hidden,
    }
}

/// Undirected links planned over system indices.
#[derive(Debug)]
struct LinkPlan {
    positions: Vec<Coordinate>,
    degrees: Vec<usize>,
    max_degree: usize,
    linked: BTreeSet<(usize, usize)>,
    links: Vec<(usize, usize)>,
}

impl LinkPlan {
    fn new(positions: Vec<Coordinate>, max_degree: usize) -> Self {
        Self {
            degrees: vec![0; positions.len()],
            positions,
            max_degree,
            linked: BTreeSet::new(),
            links: Vec::new(),
        }
    }

    fn len(&self) -> usize {
        self.positions.len()
    }

    fn distance(&self, a: usize, b: usize) -> f64 {
        match (self.positions.get(a), self.positions.get(b)) {
            (Some(p), Some(q)) => p.distance_to(*q),
            _ => f64::INFINITY,
        }
    }

    fn degree(&self, index: usize) -> usize {
        self.degrees.get(index).copied().unwrap_or(usize::MAX)
    }

    fn has_capacity(&self, index: usize) -> bool {
        self.degree(index) < self.max_degree
    }

    fn is_linked(&self, a: usize, b: usize) -> bool {
        self.linked.contains(&(a.min(b), a.max(b)))
    }

    fn connect(&mut self, a: usize, b: usize) {
        self.linked.insert((a.min(b), a.max(b)));
        self.links.push((a, b));
        for index in [a, b] {
            if let Some(degree) = self.degrees.get_mut(index) {
                *degree = degree.saturating_add(1);
            }
        }
    }

    fn first_below(&self, min_degree: usize) -> Option<usize> {
        self.degrees.iter().position(|&d| d < min_degree)
    }

    /// Grow a spanning tree from system 0. Returns the first system that
    /// cannot be attached without breaking the degree cap.
    ///
    /// Any tree system may take any outside system, so with a cap of 2 or
    /// more the newest leaf always has room and the tree always completes.
    /// Only a cap of 1 with three or more systems fails, and no capped tree
    /// exists then.
    fn span(&mut self) -> Result<(), usize> {
        let n = self.len();
        if n < 2 {
            return Ok(());
        }
        let mut in_tree = vec![false; n];
        let mut best: Vec<Option<(f64, usize)>> = vec![None; n];
        if let Some(root) = in_tree.first_mut() {
            *root = true;
        }
        self.offer(0, &in_tree, &mut best);

        for _ in 1..n {
            let next = best
                .iter()
                .zip(&in_tree)
                .enumerate()
                .filter(|(_, (_, inside))| !**inside)
                .filter_map(|(v, (slot, _))| slot.map(|(d, u)| (d, v, u)))
                .min_by(|x, y| x.0.total_cmp(&y.0).then(x.1.cmp(&y.1)));
            let Some((_, v, u)) = next else {
                return Err(in_tree.iter().position(|inside| !inside).unwrap_or(0));
            };

            self.connect(u, v);
            if let Some(flag) = in_tree.get_mut(v) {
                *flag = true;
            }
            if let Some(slot) = best.get_mut(v) {
                *slot = None;
            }
            if !self.has_capacity(u) {
                self.repair(u, &in_tree, &mut best);
            }
            self.offer(v, &in_tree, &mut best);
        }
        Ok(())
    }

    /// Offer tree system `u` as the attachment point for outside systems.
    fn offer(&self, u: usize, in_tree: &[bool], best: &mut [Option<(f64, usize)>]) {
        if !self.has_capacity(u) {
            return;
        }
        for (v, (slot, &inside)) in best.iter_mut().zip(in_tree).enumerate() {
            if inside {
                continue;
            }
            let d = self.distance(u, v);
            if slot.is_none_or(|(current, _)| d < current) {
                *slot = Some((d, u));
            }
        }
    }

    /// `u` just filled up; re-home every outside system that pointed at it.
    fn repair(&self, u: usize, in_tree: &[bool], best: &mut [Option<(f64, usize)>]) {
        for (v, slot) in best.iter_mut().enumerate() {
            if !slot.is_some_and(|(_, w)| w == u) {
                continue;
            }
            *slot = in_tree
                .iter()
                .enumerate()
                .filter(|&(w, &inside)| inside && self.has_capacity(w))
                .map(|(w, _)| (self.distance(w, v), w))
                .min_by(|x, y| x.0.total_cmp(&y.0).then(x.1.cmp(&y.1)));
        }
    }

    /// Raise systems toward `min_degree`. Returns the passes used.
    fn top_up(&mut self, min_degree: usize, link_distance: f64) -> usize {
        let mut passes = 0_usize;
        for pass in 0..TOP_UP_PASSES {
            if self.first_below(min_degree).is_none() {
                break;
            }
            passes = passes.saturating_add(1);
            let reach = match pass {
                0 => link_distance,
                1 => link_distance * 2.0,
                _ => f64::INFINITY,
            };
            for i in 0..self.len() {
                while self.degree(i) < min_degree {
                    let Some(j) = self.nearest_candidate(i, reach) else {
                        break;
                    };
                    self.connect(i, j);
                }
            }
        }
        passes
    }

    /// Closest system `i` could still link to within `reach`.
    fn nearest_candidate(&self, i: usize, reach: f64) -> Option<usize> {
        (0..self.len())
            .filter(|&j| j != i && self.has_capacity(j) && !self.is_linked(i, j))
            .map(|j| (self.distance(i, j), j))
            .filter(|&(d, _)| d <= reach)
            .min_by(|x, y| x.0.total_cmp(&y.0).then(x.1.cmp(&y.1)))
            .map(|(_, j)| j)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use starlane_types::GalaxyId;

    use super::*;
    use crate::config::GalaxyConfig;
    use crate::stages::StarFieldStage;

    fn line(n: u32, spacing: u32) -> Vec<Coordinate> {
        (0..n).map(|i| Coordinate::new(i * spacing, 0)).collect()
    }

    #[test]
    fn span_connects_everything_under_the_cap() {
        let mut plan = LinkPlan::new(line(6, 10), 2);
        plan.span().unwrap();
        assert_eq!(plan.links.len(), 5);
        assert!(plan.degrees.iter().all(|&d| (1..=2).contains(&d)));
    }

    #[test]
    fn span_fails_when_the_cap_forbids_a_tree() {
        let mut plan = LinkPlan::new(line(3, 10), 1);
        assert_eq!(plan.span(), Err(2));
    }

    #[test]
    fn span_completes_on_any_layout_once_the_cap_allows_a_path() {
        for seed in 0..50 {
            let mut rng = GalaxyRng::from_seed(seed);
            let area = starlane_types::Bounds::from_dimensions(100, 100).unwrap();
            let positions: Vec<Coordinate> =
                (0..40).map(|_| rng.coordinate_in(&area)).collect();
            let mut plan = LinkPlan::new(positions, 2);
            assert_eq!(plan.span(), Ok(()), "seed {seed}");
            assert_eq!(plan.links.len(), 39);
            assert!(plan.degrees.iter().all(|&d| (1..=2).contains(&d)));
        }
    }

    #[test]
    fn star_layout_respects_cap_by_rehoming() {
        // Four points around a centre that can only take two links.
        let positions = vec![
            Coordinate::new(50, 50),
            Coordinate::new(50, 40),
            Coordinate::new(60, 50),
            Coordinate::new(50, 60),
            Coordinate::new(40, 50),
        ];
        let mut plan = LinkPlan::new(positions, 2);
        plan.span().unwrap();
        assert_eq!(plan.links.len(), 4);
        assert!(plan.degrees.iter().all(|&d| d <= 2));
    }

    #[test]
    fn top_up_reaches_min_degree() {
        let mut plan = LinkPlan::new(line(8, 10), 4);
        plan.span().unwrap();
        let passes = plan.top_up(2, 15.0);
        assert!(passes >= 1);
        assert_eq!(plan.first_below(2), None);
        assert!(plan.degrees.iter().all(|&d| d <= 4));
    }

    #[test]
    fn anomalies_only_on_hidden_lanes() {
        let mut gates = GalaxyConfig::default().gates;
        gates.hidden_chance = 0.0;
        gates.dead_gate_chance = 1.0;
        let mut rng = GalaxyRng::from_seed(4);
        for _ in 0..100 {
            let spec = roll_lane(&gates, 10.0, &mut rng);
            assert_eq!(spec.gate_type, GateType::Standard);
            assert!(!spec.hidden);
        }

        gates.hidden_chance = 1.0;
        let spec = roll_lane(&gates, 500.0, &mut rng);
        assert!(spec.hidden);
        assert_eq!(spec.gate_type, GateType::DeadEnd);
        assert_eq!(spec.status, GateStatus::Dormant);
    }

    #[test]
    fn stage_builds_a_connected_network_within_bounds() {
        let config = GalaxyConfig::default();
        let classifier = config.classifier().unwrap();
        let mut galaxy = Galaxy::new(
            GalaxyId::from_random_bytes([2; 16]),
            String::from("test"),
            11,
            config.galaxy.width,
            config.galaxy.height,
            config.ores.clone(),
        )
        .unwrap();
        let mut ctx = GenerationContext::new(11, &config, &classifier);
        let mut metrics = StageMetrics::new(STAR_FIELD);
        StarFieldStage.run(&mut galaxy, &mut ctx, &mut metrics).unwrap();

        let mut metrics = StageMetrics::new(WARP_NETWORK);
        WarpNetworkStage.run(&mut galaxy, &mut ctx, &mut metrics).unwrap();

        assert!(galaxy.is_connected());
        for system in galaxy.systems() {
            let degree = galaxy.degree(system.id);
            assert!(degree >= 2 && degree <= 4, "degree {degree}");
        }
        let network = ctx.warp_network.unwrap();
        assert_eq!(network.lanes.len(), galaxy.gates().len());
        assert_eq!(metrics.produced, u64::try_from(network.lanes.len()).unwrap());
    }

    #[test]
    fn impossible_min_degree_fails_the_stage() {
        let mut config = GalaxyConfig::default();
        config.stars.count = 3;
        config.gates.min_degree = 3;
        config.gates.max_degree = 4;
        let classifier = config.classifier().unwrap();
        let mut galaxy = Galaxy::new(
            GalaxyId::from_random_bytes([3; 16]),
            String::from("test"),
            5,
            config.galaxy.width,
            config.galaxy.height,
            config.ores.clone(),
        )
        .unwrap();
        let mut ctx = GenerationContext::new(5, &config, &classifier);
        StarFieldStage
            .run(&mut galaxy, &mut ctx, &mut StageMetrics::new(STAR_FIELD))
            .unwrap();

        let err = WarpNetworkStage
            .run(&mut galaxy, &mut ctx, &mut StageMetrics::new(WARP_NETWORK))
            .unwrap_err();
        assert!(matches!(
            err,
            StageError::DegreeUnsatisfied { degree: 2, min_degree: 3, .. }
        ));
    }
}
