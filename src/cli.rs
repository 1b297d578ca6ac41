use crate::io::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "procmap")]
#[command(about = "Structural analyzer for BPMN-style process definitions", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze a process definition for reachability, deadlocks, paths and metrics
    Analyze {
        /// Process definition (JSON)
        file: PathBuf,

        /// Output format (defaults to the config file, then text)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Configuration file (defaults to the nearest .procmap.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Stop enumerating start-to-end paths after this many
        #[arg(long = "max-paths", value_parser = clap::value_parser!(u64).range(1..))]
        max_paths: Option<u64>,

        /// Abandon the slow traversals after this many milliseconds
        #[arg(long = "timeout-ms", env = "PROCMAP_TIMEOUT_MS")]
        timeout_ms: Option<u64>,

        /// Run analysis stages sequentially
        #[arg(long = "no-parallel")]
        no_parallel: bool,

        /// Disable colored output
        #[arg(long)]
        plain: bool,

        /// Increase verbosity level (can be repeated: -v, -vv, -vvv)
        #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
        verbosity: u8,
    },

    /// Initialize configuration file
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

impl Commands {
    pub fn verbosity(&self) -> u8 {
        match self {
            Commands::Analyze { verbosity, .. } => *verbosity,
            Commands::Init { .. } => 0,
        }
    }
}
