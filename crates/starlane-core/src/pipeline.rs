//! Dependency-ordered stage execution.
//!
//! A [`Pipeline`] is built from a list of stages. Construction resolves the
//! execution order with Kahn's algorithm, so a duplicate name, an unknown
//! dependency, or a cycle is rejected before anything runs. Stages with no
//! ordering constraint between them run in registration order.
//!
//! [`Pipeline::run`] executes every stage exactly once, checks the
//! [`AbortSignal`] between stages, and stops at the first failure. Completed
//! stages are not rolled back.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::time::Instant;

use chrono::Utc;
use starlane_world::Galaxy;
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::abort::AbortSignal;
use crate::context::GenerationContext;
use crate::metrics::{PipelineReport, StageMetrics};
use crate::stage::{Stage, StageError};

/// Errors from building or running a pipeline.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Two stages share a name.
    #[error("stage `{stage}` is registered twice")]
    DuplicateStage {
        /// The repeated name.
        stage: String,
    },

    /// A stage depends on a name no stage has.
    #[error("stage `{stage}` depends on unknown stage `{dependency}`")]
    UnknownDependency {
        /// The dependent stage.
        stage: String,
        /// The missing dependency.
        dependency: String,
    },

    /// The dependency graph has a cycle.
    #[error("dependency cycle among stages: {}", stages.join(", "))]
    Cycle {
        /// Stages left unordered, in registration order.
        stages: Vec<String>,
    },

    /// A stage failed; the run stopped there.
    #[error("stage `{stage}` failed after producing {produced} entities: {source}")]
    StageFailed {
        /// The failing stage.
        stage: String,
        /// Entities it produced before failing.
        produced: u64,
        /// Stages that completed before it.
        completed: Vec<String>,
        /// What went wrong.
        source: Box<StageError>,
    },

    /// The abort signal was tripped between stages.
    #[error("generation aborted before stage `{next_stage}`")]
    Aborted {
        /// The stage that would have run next.
        next_stage: String,
        /// Stages that completed before the abort.
        completed: Vec<String>,
    },
}

/// An ordered, validated set of stages.
pub struct Pipeline {
    stages: Vec<Box<dyn Stage>>,
    order: Vec<usize>,
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("order", &self.execution_order())
            .finish()
    }
}

impl Pipeline {
    /// Validate the stage graph and resolve its execution order.
    ///
    /// # Errors
    ///
    /// [`PipelineError::DuplicateStage`], [`PipelineError::UnknownDependency`],
    /// or [`PipelineError::Cycle`].
    pub fn new(stages: Vec<Box<dyn Stage>>) -> Result<Self, PipelineError> {
        let order = resolve_order(&stages)?;
        Ok(Self { stages, order })
    }

    /// Stage names in the order they will run.
    pub fn execution_order(&self) -> Vec<&str> {
        self.order
            .iter()
            .filter_map(|&i| self.stages.get(i))
            .map(|s| s.name())
            .collect()
    }

    /// Number of stages.
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Whether the pipeline has no stages.
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Run every stage once, in order.
    ///
    /// # Errors
    ///
    /// [`PipelineError::Aborted`] if `abort` is tripped before a stage
    /// starts, or [`PipelineError::StageFailed`] for the first stage error.
    pub fn run(
        &self,
        galaxy: &mut Galaxy,
        ctx: &mut GenerationContext<'_>,
        abort: &AbortSignal,
    ) -> Result<PipelineReport, PipelineError> {
        let started_at = Utc::now();
        let clock = Instant::now();
        let mut completed: Vec<StageMetrics> = Vec::with_capacity(self.order.len());

        info!(
            seed = ctx.seed(),
            stages = self.order.len(),
            "Pipeline starting"
        );

        for stage in self.order.iter().filter_map(|&i| self.stages.get(i)) {
            let name = stage.name();
            if abort.is_abort_requested() {
                warn!(next_stage = name, completed = completed.len(), "Pipeline aborted");
                return Err(PipelineError::Aborted {
                    next_stage: name.to_owned(),
                    completed: names_of(&completed),
                });
            }

            debug!(stage = name, "Stage starting");
            let mut metrics = StageMetrics::new(name);
            let stage_clock = Instant::now();
            let outcome = stage.run(galaxy, ctx, &mut metrics);
            metrics.elapsed = stage_clock.elapsed();

            if let Err(source) = outcome {
                error!(
                    stage = name,
                    produced = metrics.produced,
                    error = %source,
                    "Stage failed"
                );
                return Err(PipelineError::StageFailed {
                    stage: name.to_owned(),
                    produced: metrics.produced,
                    completed: names_of(&completed),
                    source: Box::new(source),
                });
            }

            info!(
                stage = name,
                produced = metrics.produced,
                elapsed_ms = metrics.elapsed_ms(),
                "Stage completed"
            );
            completed.push(metrics);
        }

        let total_produced = completed
            .iter()
            .fold(0_u64, |acc, m| acc.saturating_add(m.produced));
        let report = PipelineReport {
            seed: ctx.seed(),
            stages: completed,
            total_produced,
            total_elapsed: clock.elapsed(),
            started_at,
            finished_at: Utc::now(),
        };

        info!(
            total_produced = report.total_produced,
            total_elapsed_ms = report.total_elapsed_ms(),
            "Pipeline completed"
        );
        Ok(report)
    }
}

fn names_of(metrics: &[StageMetrics]) -> Vec<String> {
    metrics.iter().map(|m| m.stage.clone()).collect()
}

/// Kahn's algorithm over registration indices; ties go to the stage
/// registered first.
fn resolve_order(stages: &[Box<dyn Stage>]) -> Result<Vec<usize>, PipelineError> {
    let mut index_of: BTreeMap<&str, usize> = BTreeMap::new();
    for (index, stage) in stages.iter().enumerate() {
        if index_of.insert(stage.name(), index).is_some() {
            return Err(PipelineError::DuplicateStage {
                stage: stage.name().to_owned(),
            });
        }
    }

    let mut pending: Vec<usize> = vec![0; stages.len()];
    let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); stages.len()];
    for (index, stage) in stages.iter().enumerate() {
        let unique: BTreeSet<&str> = stage.dependencies().iter().copied().collect();
        for dependency in unique {
            let &parent = index_of
                .get(dependency)
                .ok_or_else(|| PipelineError::UnknownDependency {
                    stage: stage.name().to_owned(),
                    dependency: dependency.to_owned(),
                })?;
            if let Some(children) = dependents.get_mut(parent) {
                children.push(index);
            }
            if let Some(count) = pending.get_mut(index) {
                *count = count.saturating_add(1);
            }
        }
    }

    let mut ready: BTreeSet<usize> = pending
        .iter()
        .enumerate()
        .filter(|&(_, &count)| count == 0)
        .map(|(index, _)| index)
        .collect();
    let mut order = Vec::with_capacity(stages.len());

    while let Some(next) = ready.pop_first() {
        order.push(next);
        for &child in dependents.get(next).map_or(&[][..], Vec::as_slice) {
            if let Some(count) = pending.get_mut(child) {
                *count = count.saturating_sub(1);
                if *count == 0 {
                    ready.insert(child);
                }
            }
        }
    }

    if order.len() < stages.len() {
        let placed: BTreeSet<usize> = order.iter().copied().collect();
        let stuck = stages
            .iter()
            .enumerate()
            .filter(|(index, _)| !placed.contains(index))
            .map(|(_, stage)| stage.name().to_owned())
            .collect();
        return Err(PipelineError::Cycle { stages: stuck });
    }
    Ok(order)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::panic)]
mod tests {
    use std::sync::{Arc, Mutex};

    use starlane_types::GalaxyId;

    use super::*;
    use crate::config::GalaxyConfig;

    /// Records its name into a shared log when run.
    struct Probe {
        name: &'static str,
        deps: Vec<&'static str>,
        produce: u64,
        fail: bool,
        log: Arc<Mutex<Vec<&'static str>>>,
        abort_after: Option<AbortSignal>,
    }

    impl Probe {
        fn new(
            name: &'static str,
            deps: &[&'static str],
            log: &Arc<Mutex<Vec<&'static str>>>,
        ) -> Self {
            Self {
                name,
                deps: deps.to_vec(),
                produce: 1,
                fail: false,
                log: Arc::clone(log),
                abort_after: None,
            }
        }

        fn boxed(self) -> Box<dyn Stage> {
            Box::new(self)
        }
    }

    impl Stage for Probe {
        fn name(&self) -> &str {
            self.name
        }

        fn dependencies(&self) -> &[&str] {
            &self.deps
        }

        fn run(
            &self,
            _galaxy: &mut Galaxy,
            _ctx: &mut GenerationContext<'_>,
            metrics: &mut StageMetrics,
        ) -> Result<(), StageError> {
            self.log.lock().unwrap().push(self.name);
            metrics.record_produced(self.produce);
            if let Some(signal) = &self.abort_after {
                signal.request_abort();
            }
            if self.fail {
                return Err(StageError::Failed {
                    reason: String::from("probe failure"),
                });
            }
            Ok(())
        }
    }

    fn galaxy() -> Galaxy {
        Galaxy::new(
            GalaxyId::from_random_bytes([0; 16]),
            String::from("test"),
            1,
            10,
            10,
            Vec::new(),
        )
        .unwrap()
    }

    fn run(pipeline: &Pipeline, abort: &AbortSignal) -> Result<PipelineReport, PipelineError> {
        let config = GalaxyConfig::default();
        let classifier = config.classifier().unwrap();
        let mut ctx = GenerationContext::new(1, &config, &classifier);
        pipeline.run(&mut galaxy(), &mut ctx, abort)
    }

    #[test]
    fn dependencies_run_first_and_ties_keep_registration_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let pipeline = Pipeline::new(vec![
            Probe::new("markets", &["deposits"], &log).boxed(),
            Probe::new("stars", &[], &log).boxed(),
            Probe::new("deposits", &["bodies"], &log).boxed(),
            Probe::new("bodies", &["stars"], &log).boxed(),
            Probe::new("lanes", &["stars"], &log).boxed(),
        ])
        .unwrap();

        assert_eq!(
            pipeline.execution_order(),
            vec!["stars", "bodies", "deposits", "markets", "lanes"]
        );

        let report = run(&pipeline, &AbortSignal::new()).unwrap();
        assert_eq!(
            *log.lock().unwrap(),
            vec!["stars", "bodies", "deposits", "markets", "lanes"]
        );
        assert_eq!(report.stages.len(), 5);
        assert_eq!(report.total_produced, 5);
    }

    #[test]
    fn cycles_are_rejected_before_anything_runs() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let err = Pipeline::new(vec![
            Probe::new("root", &[], &log).boxed(),
            Probe::new("a", &["c"], &log).boxed(),
            Probe::new("b", &["a"], &log).boxed(),
            Probe::new("c", &["b"], &log).boxed(),
        ])
        .unwrap_err();

        match err {
            PipelineError::Cycle { stages } => assert_eq!(stages, vec!["a", "b", "c"]),
            other => panic!("expected cycle, got {other}"),
        }
        assert!(log.lock().unwrap().is_empty());
    }

    #[test]
    fn self_dependency_is_a_cycle() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let err = Pipeline::new(vec![Probe::new("a", &["a"], &log).boxed()]).unwrap_err();
        assert!(matches!(err, PipelineError::Cycle { .. }));
    }

    #[test]
    fn unknown_and_duplicate_stages_are_rejected() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let err = Pipeline::new(vec![Probe::new("a", &["ghost"], &log).boxed()]).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::UnknownDependency { ref dependency, .. } if dependency == "ghost"
        ));

        let err = Pipeline::new(vec![
            Probe::new("a", &[], &log).boxed(),
            Probe::new("a", &[], &log).boxed(),
        ])
        .unwrap_err();
        assert!(matches!(err, PipelineError::DuplicateStage { .. }));
    }

    #[test]
    fn failure_stops_the_run_and_reports_progress() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut broken = Probe::new("broken", &["first"], &log);
        broken.fail = true;
        broken.produce = 4;
        let pipeline = Pipeline::new(vec![
            Probe::new("first", &[], &log).boxed(),
            broken.boxed(),
            Probe::new("after", &["broken"], &log).boxed(),
        ])
        .unwrap();

        let err = run(&pipeline, &AbortSignal::new()).unwrap_err();
        match err {
            PipelineError::StageFailed {
                stage,
                produced,
                completed,
                ..
            } => {
                assert_eq!(stage, "broken");
                assert_eq!(produced, 4);
                assert_eq!(completed, vec!["first"]);
            }
            other => panic!("expected stage failure, got {other}"),
        }
        assert_eq!(*log.lock().unwrap(), vec!["first", "broken"]);
    }

    #[test]
    fn abort_is_checked_between_stages() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let signal = AbortSignal::new();
        let mut tripwire = Probe::new("tripwire", &[], &log);
        tripwire.abort_after = Some(signal.clone());
        let pipeline = Pipeline::new(vec![
            tripwire.boxed(),
            Probe::new("never", &["tripwire"], &log).boxed(),
        ])
        .unwrap();

        let err = run(&pipeline, &signal).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Aborted { ref next_stage, .. } if next_stage == "never"
        ));
        assert_eq!(*log.lock().unwrap(), vec!["tripwire"]);
    }

    #[test]
    fn empty_pipeline_produces_an_empty_report() {
        let pipeline = Pipeline::new(Vec::new()).unwrap();
        assert!(pipeline.is_empty());
        let report = run(&pipeline, &AbortSignal::new()).unwrap();
        assert!(report.stages.is_empty());
        assert_eq!(report.total_produced, 0);
    }
}
