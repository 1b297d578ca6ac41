use anyhow::Result;
use clap::Parser;
use procmap::cli::{Cli, Commands};
use procmap::commands::{self, AnalyzeConfig};
use std::process::ExitCode;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> ExitCode {
    // Exit code 2 means findings, so usage errors exit 1 instead of clap's 2
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::from(1)
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    if let Err(e) = init_tracing(cli.command.verbosity()) {
        eprintln!("Warning: {e:#}");
    }

    match run(cli.command) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(1)
        }
    }
}

fn run(command: Commands) -> Result<u8> {
    match command {
        Commands::Analyze {
            file,
            format,
            output,
            config,
            max_paths,
            timeout_ms,
            no_parallel,
            plain,
            verbosity: _,
        } => {
            let config = AnalyzeConfig {
                file,
                format,
                output,
                config,
                max_paths: max_paths.map(|n| usize::try_from(n).unwrap_or(usize::MAX)),
                timeout_ms,
                no_parallel,
                plain,
            };
            let status = commands::handle_analyze(config)?;
            Ok(status.code())
        }
        Commands::Init { force } => {
            commands::init_config(force)?;
            Ok(0)
        }
    }
}

/// Logs go to stderr; `RUST_LOG` wins over `-v`
fn init_tracing(verbosity: u8) -> Result<()> {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .map_err(|e| anyhow::anyhow!("Failed to create env filter: {e}"))?;

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(env_filter)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {e}"))
}
