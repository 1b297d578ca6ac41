//! Bounds for the worst-case exponential traversals.
//!
//! Path enumeration, depth calculation and loop extraction can blow up on
//! pathological graphs. A [`Budget`] carries an optional deadline and a
//! cancellation token; traversals poll it and stop early, returning what they
//! have so far. The orchestrator turns early stops into warnings.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Default cap on enumerated start-to-end paths
pub const DEFAULT_MAX_PATHS: usize = 10_000;

/// Steps between deadline checks
const CHECK_INTERVAL: usize = 256;

/// User-facing limits for one analysis run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisLimits {
    /// Stop path enumeration after this many paths (`None` = unbounded)
    pub max_paths: Option<usize>,
    /// Wall-clock budget for the whole run
    pub timeout: Option<Duration>,
}

impl Default for AnalysisLimits {
    fn default() -> Self {
        Self {
            max_paths: Some(DEFAULT_MAX_PATHS),
            timeout: None,
        }
    }
}

impl AnalysisLimits {
    pub fn unbounded() -> Self {
        Self {
            max_paths: None,
            timeout: None,
        }
    }
}

/// Cooperative cancellation flag shared between the caller and an analysis
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Deadline plus cancellation, polled by the traversals
#[derive(Debug, Clone, Default)]
pub struct Budget {
    deadline: Option<Instant>,
    token: Option<CancellationToken>,
}

impl Budget {
    /// A budget that never runs out
    pub fn unlimited() -> Self {
        Self::default()
    }

    pub fn new(timeout: Option<Duration>, token: Option<CancellationToken>) -> Self {
        Self {
            deadline: timeout.map(|t| Instant::now() + t),
            token,
        }
    }

    pub fn is_exhausted(&self) -> bool {
        if self.token.as_ref().is_some_and(|t| t.is_cancelled()) {
            return true;
        }
        self.deadline.is_some_and(|d| Instant::now() >= d)
    }

    /// Amortized check: only polls the clock every few hundred steps
    pub fn should_stop(&self, steps: usize) -> bool {
        steps % CHECK_INTERVAL == 0 && self.is_exhausted()
    }
}

/// Stages that can be cut short by the budget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisStage {
    Loops,
    Paths,
    Depth,
}

/// Non-fatal findings about the analysis run itself
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnalysisWarning {
    /// A flow references an id that is not a declared node
    PhantomElement { id: String },
    /// Path enumeration stopped at the configured cap
    PathLimitReached { limit: usize },
    /// Deadline passed or the run was cancelled during a stage
    Interrupted { stage: AnalysisStage },
}

impl std::fmt::Display for AnalysisWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PhantomElement { id } => {
                write!(f, "flow references undeclared element '{}'", id)
            }
            Self::PathLimitReached { limit } => {
                write!(f, "path enumeration truncated after {} paths", limit)
            }
            Self::Interrupted { stage } => {
                write!(f, "{:?} stage interrupted before completion", stage)
            }
        }
    }
}
