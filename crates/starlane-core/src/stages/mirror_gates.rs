//! Mirror gate pairs.

use std::collections::BTreeSet;

use starlane_types::{Coordinate, GateId, SystemId};
use starlane_world::{Galaxy, GalaxyRng};
use tracing::{debug, warn};

use super::{MIRROR_GATES, WARP_NETWORK};
use crate::context::{GenerationContext, MirrorGates};
use crate::metrics::StageMetrics;
use crate::stage::{Stage, StageError};

/// Links systems to their mirror image across the galaxy centre.
///
/// Each pair picks a random entry system and connects it to the system
/// closest to the entry's reflection through the centre. A system takes
/// part in at most one pair. Pairs that cannot be placed are counted as
/// `unplaced` rather than failing the stage.
#[derive(Debug, Clone, Copy, Default)]
pub struct MirrorGatesStage;

impl Stage for MirrorGatesStage {
    fn name(&self) -> &str {
        MIRROR_GATES
    }

    fn dependencies(&self) -> &[&str] {
        &[WARP_NETWORK]
    }

    fn run(
        &self,
        galaxy: &mut Galaxy,
        ctx: &mut GenerationContext<'_>,
        metrics: &mut StageMetrics,
    ) -> Result<(), StageError> {
        ctx.require_warp_network()?;
        let wanted = ctx.config.gates.mirror_pairs;
        let mut rng = ctx.stage_rng(MIRROR_GATES);
        let systems: Vec<(SystemId, Coordinate)> =
            galaxy.systems().iter().map(|s| (s.id, s.position)).collect();
        let centre = galaxy.bounds().center();
        let mut used: BTreeSet<SystemId> = BTreeSet::new();
        let mut pairs = Vec::new();

        for _ in 0..wanted {
            let Some((from, to)) = choose_pair(&systems, centre, &used, &mut rng) else {
                metrics.increment("unplaced");
                continue;
            };
            let entry = GateId::from_random_bytes(rng.id_bytes());
            let exit = GateId::from_random_bytes(rng.id_bytes());
            pairs.push(galaxy.link_mirror_pair(entry, exit, from, to)?);
            used.insert(from);
            used.insert(to);
            metrics.record_produced(2);
            debug!(entry = %entry, from = %from, to = %to, "Linked mirror pair");
        }

        if metrics.count("unplaced") > 0 {
            warn!(
                requested = wanted,
                placed = pairs.len(),
                "Not every mirror pair could be placed"
            );
        }
        ctx.mirror_gates = Some(MirrorGates { pairs });
        Ok(())
    }
}

/// Pick an unused entry system and the unused system nearest its mirror
/// image. Draws exactly one index per call when any candidate exists.
fn choose_pair(
    systems: &[(SystemId, Coordinate)],
    centre: (f64, f64),
    used: &BTreeSet<SystemId>,
    rng: &mut GalaxyRng,
) -> Option<(SystemId, SystemId)> {
    let free: Vec<&(SystemId, Coordinate)> =
        systems.iter().filter(|(id, _)| !used.contains(id)).collect();
    if free.len() < 2 {
        return None;
    }
    let &&(entry, position) = free.get(rng.index(free.len())?)?;
    let (mx, my) = (
        2.0_f64.mul_add(centre.0, -f64::from(position.x)),
        2.0_f64.mul_add(centre.1, -f64::from(position.y)),
    );

    free.iter()
        .filter(|(id, _)| *id != entry)
        .map(|&&(id, p)| ((f64::from(p.x) - mx).hypot(f64::from(p.y) - my), id))
        .min_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)))
        .map(|(_, partner)| (entry, partner))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use starlane_types::{GalaxyId, GateType};

    use super::*;
    use crate::config::GalaxyConfig;
    use crate::stages::{STAR_FIELD, StarFieldStage, WarpNetworkStage};

    fn id(n: u8) -> SystemId {
        SystemId::from_random_bytes([n; 16])
    }

    #[test]
    fn partner_is_nearest_to_the_reflection() {
        let systems = vec![
            (id(1), Coordinate::new(10, 10)),
            (id(2), Coordinate::new(90, 90)),
            (id(3), Coordinate::new(50, 50)),
        ];
        let used = BTreeSet::from([id(3)]);
        let mut rng = GalaxyRng::from_seed(1);
        let (from, to) = choose_pair(&systems, (50.0, 50.0), &used, &mut rng).unwrap();
        assert_eq!(BTreeSet::from([from, to]), BTreeSet::from([id(1), id(2)]));
    }

    #[test]
    fn no_pair_without_two_free_systems() {
        let systems = vec![(id(1), Coordinate::new(1, 1)), (id(2), Coordinate::new(5, 5))];
        let used = BTreeSet::from([id(1)]);
        let mut rng = GalaxyRng::from_seed(2);
        assert!(choose_pair(&systems, (3.0, 3.0), &used, &mut rng).is_none());
    }

    #[test]
    fn pairs_reference_each_other() {
        let mut config = GalaxyConfig::default();
        config.stars.count = 40;
        config.gates.mirror_pairs = 3;
        let classifier = config.classifier().unwrap();
        let mut galaxy = Galaxy::new(
            GalaxyId::from_random_bytes([8; 16]),
            String::from("test"),
            61,
            config.galaxy.width,
            config.galaxy.height,
            config.ores.clone(),
        )
        .unwrap();
        let mut ctx = GenerationContext::new(61, &config, &classifier);
        StarFieldStage
            .run(&mut galaxy, &mut ctx, &mut StageMetrics::new(STAR_FIELD))
            .unwrap();
        WarpNetworkStage
            .run(&mut galaxy, &mut ctx, &mut StageMetrics::new(WARP_NETWORK))
            .unwrap();
        let degrees: Vec<usize> = galaxy.systems().iter().map(|s| galaxy.degree(s.id)).collect();

        let mut metrics = StageMetrics::new(MIRROR_GATES);
        MirrorGatesStage.run(&mut galaxy, &mut ctx, &mut metrics).unwrap();
        assert_eq!(metrics.produced, 6);

        let mirrors: Vec<_> = galaxy
            .gates()
            .iter()
            .filter(|g| g.gate_type.is_mirror_gate())
            .collect();
        assert_eq!(mirrors.len(), 6);
        for gate in &mirrors {
            let partner = galaxy
                .gates()
                .iter()
                .find(|g| Some(g.id) == gate.paired_gate)
                .unwrap();
            assert_eq!(partner.paired_gate, Some(gate.id));
            assert_eq!(Some(partner.gate_type), gate.gate_type.mirror_counterpart());
            assert_eq!(partner.source, gate.destination);
            assert_eq!(partner.destination, gate.source);
        }
        assert_eq!(
            mirrors.iter().filter(|g| g.gate_type == GateType::MirrorEntry).count(),
            3
        );

        let after: Vec<usize> = galaxy.systems().iter().map(|s| galaxy.degree(s.id)).collect();
        assert_eq!(degrees, after);
    }
}
