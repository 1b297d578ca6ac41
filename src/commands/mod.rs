//! CLI command implementations.
//!
//! - **analyze**: analyze one process definition and report findings
//! - **init**: write a default `.procmap.toml`

pub mod analyze;
pub mod init;

pub use analyze::{handle_analyze, AnalyzeConfig, ExitStatus};
pub use init::init_config;
