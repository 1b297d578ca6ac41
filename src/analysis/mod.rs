//! Structural analysis of process graphs.
//!
//! The engine is design-time only: it never executes a process and never
//! fails. Every call to [`Analyzer::analyze`] builds a fresh, immutable
//! [`AnalysisResult`] from a borrowed [`Process`].
//!
//! ## Stages
//!
//! - [`graph`]: forward/reverse adjacency, phantom nodes, components
//! - [`reachability`]: forward from start events, backward from end events
//! - [`loops`]: elementary cycles, shared by the next two stages
//! - [`deadlock`]: incomplete joins and loops without an exit
//! - [`paths`]: start-to-end path enumeration and statistics
//! - [`metrics`]: complexity, depth, width, connectivity
//! - [`workload`]: activities per agent and balance
//!
//! ## Usage
//!
//! ```rust
//! use procmap::analysis::{AnalysisOptions, Analyzer};
//! use procmap::testkit::ProcessBuilder;
//!
//! let process = ProcessBuilder::new()
//!     .start("start")
//!     .task("review")
//!     .end("end")
//!     .chain(&["start", "review", "end"])
//!     .build();
//!
//! let result = Analyzer::new(&process).analyze();
//! assert_eq!(result.paths.path_count(), 1);
//! assert_eq!(result.metrics.complexity, 3);
//! assert!(result.is_clean());
//! ```

pub mod deadlock;
pub mod graph;
pub mod limits;
pub mod loops;
pub mod metrics;
pub mod paths;
pub mod reachability;
pub mod workload;

pub use deadlock::{DeadlockInfo, DeadlockKind};
pub use graph::ProcessGraph;
pub use limits::{AnalysisLimits, AnalysisStage, AnalysisWarning, Budget, CancellationToken};
pub use loops::{Loop, LoopKind};
pub use metrics::{ElementCount, ProcessMetrics};
pub use paths::PathInfo;
pub use reachability::ReachabilityInfo;
pub use workload::AgentWorkloadInfo;

use crate::model::Process;
use serde::{Deserialize, Serialize};
use tracing::{debug, debug_span, warn};

/// Aggregate of every stage for one process
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub reachability: ReachabilityInfo,
    pub deadlocks: Vec<DeadlockInfo>,
    pub paths: PathInfo,
    pub metrics: ProcessMetrics,
    pub agent_workload: AgentWorkloadInfo,
    #[serde(default)]
    pub warnings: Vec<AnalysisWarning>,
}

impl AnalysisResult {
    /// Any deadlock or unreachable element
    pub fn has_findings(&self) -> bool {
        !self.deadlocks.is_empty() || !self.reachability.unreachable_elements.is_empty()
    }

    pub fn is_clean(&self) -> bool {
        !self.has_findings()
    }
}

/// How a run is executed
#[derive(Debug, Clone, Default)]
pub struct AnalysisOptions {
    pub limits: AnalysisLimits,
    /// Run independent stages on the rayon pool
    pub parallel: bool,
    pub cancellation: Option<CancellationToken>,
}

impl AnalysisOptions {
    pub fn with_limits(mut self, limits: AnalysisLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }
}

/// Runs every stage over one process definition
#[derive(Debug, Clone)]
pub struct Analyzer<'a> {
    process: &'a Process,
    graph: ProcessGraph<'a>,
    starts: Vec<&'a str>,
    ends: Vec<&'a str>,
    options: AnalysisOptions,
}

impl<'a> Analyzer<'a> {
    pub fn new(process: &'a Process) -> Self {
        Self::with_options(process, AnalysisOptions::default())
    }

    pub fn with_options(process: &'a Process, options: AnalysisOptions) -> Self {
        Self {
            process,
            graph: ProcessGraph::build(process),
            starts: process.start_events().map(|e| e.id.as_str()).collect(),
            ends: process.end_events().map(|e| e.id.as_str()).collect(),
            options,
        }
    }

    pub fn graph(&self) -> &ProcessGraph<'a> {
        &self.graph
    }

    pub fn analyze(&self) -> AnalysisResult {
        let _span = debug_span!(
            "analyze",
            process = %self.process.info.id,
            nodes = self.graph.node_count(),
            flows = self.graph.flow_count()
        )
        .entered();

        let budget = Budget::new(self.options.limits.timeout, self.options.cancellation.clone());
        let mut warnings: Vec<AnalysisWarning> = self
            .graph
            .phantoms()
            .map(|id| AnalysisWarning::PhantomElement { id: id.to_string() })
            .collect();

        let scan = loops::find_loops(&self.graph, &budget);
        if scan.interrupted {
            warnings.push(AnalysisWarning::Interrupted {
                stage: AnalysisStage::Loops,
            });
        }
        debug!(loops = scan.loops.len(), "loop scan complete");

        let stages = if self.options.parallel {
            self.run_parallel(&scan.loops, &budget)
        } else {
            self.run_sequential(&scan.loops, &budget)
        };

        let Stages {
            reachability,
            deadlocks,
            paths: (paths, paths_interrupted),
            metrics: (metrics, depth_interrupted),
            workload,
        } = stages;

        if paths.truncated {
            if let Some(limit) = self.options.limits.max_paths {
                warnings.push(AnalysisWarning::PathLimitReached { limit });
            }
        }
        if paths_interrupted {
            warnings.push(AnalysisWarning::Interrupted {
                stage: AnalysisStage::Paths,
            });
        }
        if depth_interrupted {
            warnings.push(AnalysisWarning::Interrupted {
                stage: AnalysisStage::Depth,
            });
        }
        for warning in &warnings {
            warn!(%warning, "analysis warning");
        }

        debug!(
            unreachable = reachability.unreachable_elements.len(),
            deadlocks = deadlocks.len(),
            paths = paths.path_count(),
            complexity = metrics.complexity,
            "analysis complete"
        );

        AnalysisResult {
            reachability,
            deadlocks,
            paths,
            metrics,
            agent_workload: workload,
            warnings,
        }
    }

    fn reachability(&self) -> ReachabilityInfo {
        let _span = debug_span!("reachability").entered();
        reachability::analyze_reachability(&self.graph, &self.starts, &self.ends)
    }

    fn deadlocks(&self, loops: &[Loop]) -> Vec<DeadlockInfo> {
        let _span = debug_span!("deadlocks").entered();
        deadlock::detect_deadlocks(self.process, &self.graph, loops)
    }

    fn paths(&self, loops: &[Loop], budget: &Budget) -> (PathInfo, bool) {
        let _span = debug_span!("paths").entered();
        paths::analyze_paths(
            &self.graph,
            &self.starts,
            &self.ends,
            loops.to_vec(),
            self.options.limits.max_paths,
            budget,
        )
    }

    fn metrics(&self, budget: &Budget) -> (ProcessMetrics, bool) {
        let _span = debug_span!("metrics").entered();
        metrics::calculate_metrics(self.process, &self.graph, &self.starts, budget)
    }

    fn workload(&self) -> AgentWorkloadInfo {
        let _span = debug_span!("workload").entered();
        workload::analyze_workload(self.process)
    }

    fn run_sequential(&self, loops: &[Loop], budget: &Budget) -> Stages {
        Stages {
            reachability: self.reachability(),
            deadlocks: self.deadlocks(loops),
            paths: self.paths(loops, budget),
            metrics: self.metrics(budget),
            workload: self.workload(),
        }
    }

    /// Each stage only reads the shared graph and writes its own slot
    fn run_parallel(&self, loops: &[Loop], budget: &Budget) -> Stages {
        let ((reachability, deadlocks), (paths, (metrics, workload))) = rayon::join(
            || rayon::join(|| self.reachability(), || self.deadlocks(loops)),
            || {
                rayon::join(
                    || self.paths(loops, budget),
                    || rayon::join(|| self.metrics(budget), || self.workload()),
                )
            },
        );

        Stages {
            reachability,
            deadlocks,
            paths,
            metrics,
            workload,
        }
    }
}

struct Stages {
    reachability: ReachabilityInfo,
    deadlocks: Vec<DeadlockInfo>,
    paths: (PathInfo, bool),
    metrics: (ProcessMetrics, bool),
    workload: AgentWorkloadInfo,
}

/// Analyze with default options
pub fn analyze(process: &Process) -> AnalysisResult {
    Analyzer::new(process).analyze()
}
