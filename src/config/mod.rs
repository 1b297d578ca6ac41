//! Project configuration from `.procmap.toml`.
//!
//! Values from the file are defaults; command line flags override them.

mod core;
mod loader;

pub use self::core::{AnalysisConfig, OutputConfig, ProcmapConfig, CONFIG_FILE_NAME};
pub use loader::{directory_ancestors, load_config, load_config_from, parse_config};
