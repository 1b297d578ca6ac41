// Export modules for library usage
pub mod analysis;
pub mod cli;
pub mod commands;
pub mod config;
pub mod errors;
pub mod io;
pub mod model;
pub mod testkit;

// Re-export commonly used types
pub use crate::analysis::{
    analyze, AnalysisLimits, AnalysisOptions, AnalysisResult, AnalysisWarning, Analyzer,
    CancellationToken, DeadlockInfo, DeadlockKind, Loop, PathInfo, ProcessMetrics,
    ReachabilityInfo,
};

pub use crate::config::ProcmapConfig;

pub use crate::errors::{Error, Result};

pub use crate::io::{create_writer, load_process, parse_process, OutputFormat, OutputWriter};

pub use crate::model::{Activity, Event, Gateway, Process, SequenceFlow};
