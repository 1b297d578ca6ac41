//! The `analyze` command: load, analyze, render, and map findings to an exit status.

use crate::analysis::{AnalysisLimits, AnalysisOptions, AnalysisResult, Analyzer};
use crate::config::{load_config, load_config_from, ProcmapConfig};
use crate::io::{self, OutputFormat};
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

/// Settings for one `analyze` invocation, as given on the command line
#[derive(Debug, Clone, Default)]
pub struct AnalyzeConfig {
    pub file: PathBuf,
    pub format: Option<OutputFormat>,
    pub output: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub max_paths: Option<usize>,
    pub timeout_ms: Option<u64>,
    pub no_parallel: bool,
    pub plain: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    Clean,
    Findings,
}

impl ExitStatus {
    pub fn code(self) -> u8 {
        match self {
            ExitStatus::Clean => 0,
            ExitStatus::Findings => 2,
        }
    }

    fn of(result: &AnalysisResult) -> Self {
        if result.has_findings() {
            ExitStatus::Findings
        } else {
            ExitStatus::Clean
        }
    }
}

/// Settings after merging the config file under the command line flags
#[derive(Debug, Clone)]
struct Resolved {
    format: OutputFormat,
    plain: bool,
    options: AnalysisOptions,
}

pub fn handle_analyze(config: AnalyzeConfig) -> Result<ExitStatus> {
    let file_config = match &config.config {
        Some(path) => load_config_from(path)
            .with_context(|| format!("Failed to load configuration {}", path.display()))?,
        None => load_config(),
    };
    let resolved = resolve(&config, &file_config);
    if resolved.plain {
        colored::control::set_override(false);
    }

    let process = io::load_process(&config.file)
        .with_context(|| format!("Failed to load process {}", config.file.display()))?;
    info!(
        process = %process.info.id,
        parallel = resolved.options.parallel,
        "analyzing {}",
        config.file.display()
    );

    let result = Analyzer::with_options(&process, resolved.options).analyze();
    write_report(&result, resolved.format, config.output.as_ref())?;

    Ok(ExitStatus::of(&result))
}

fn resolve(cli: &AnalyzeConfig, file: &ProcmapConfig) -> Resolved {
    let limits = AnalysisLimits {
        max_paths: Some(cli.max_paths.unwrap_or_else(|| file.max_paths())),
        timeout: cli.timeout_ms.map(Duration::from_millis).or(file.timeout()),
    };
    Resolved {
        format: cli.format.unwrap_or_else(|| file.default_format()),
        plain: cli.plain || file.plain(),
        options: AnalysisOptions::default()
            .with_limits(limits)
            .parallel(!cli.no_parallel && file.parallel()),
    }
}

fn write_report(
    result: &AnalysisResult,
    format: OutputFormat,
    output: Option<&PathBuf>,
) -> Result<()> {
    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file {}", path.display()))?;
            render(result, format, &mut BufWriter::new(file))
                .with_context(|| format!("Failed to write report to {}", path.display()))
        }
        None => render(result, format, &mut std::io::stdout().lock())
            .context("Failed to write report to stdout"),
    }
}

/// Write the report and flush, so buffered write errors are not lost on drop
fn render(result: &AnalysisResult, format: OutputFormat, sink: &mut dyn Write) -> Result<()> {
    io::create_writer(format, Box::new(&mut *sink)).write_results(result)?;
    sink.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AnalysisConfig, OutputConfig};
    use pretty_assertions::assert_eq;

    fn file_config() -> ProcmapConfig {
        ProcmapConfig {
            analysis: Some(AnalysisConfig {
                max_paths: Some(20),
                timeout_ms: Some(500),
                parallel: Some(true),
            }),
            output: Some(OutputConfig {
                default_format: Some(OutputFormat::Json),
                plain: Some(false),
            }),
        }
    }

    #[test]
    fn test_file_values_fill_unset_flags() {
        let resolved = resolve(&AnalyzeConfig::default(), &file_config());

        assert_eq!(resolved.format, OutputFormat::Json);
        assert_eq!(resolved.options.limits.max_paths, Some(20));
        assert_eq!(
            resolved.options.limits.timeout,
            Some(Duration::from_millis(500))
        );
        assert!(resolved.options.parallel);
    }

    #[test]
    fn test_flags_override_file() {
        let cli = AnalyzeConfig {
            format: Some(OutputFormat::Text),
            max_paths: Some(3),
            timeout_ms: Some(10),
            no_parallel: true,
            plain: true,
            ..Default::default()
        };
        let resolved = resolve(&cli, &file_config());

        assert_eq!(resolved.format, OutputFormat::Text);
        assert_eq!(resolved.options.limits.max_paths, Some(3));
        assert_eq!(
            resolved.options.limits.timeout,
            Some(Duration::from_millis(10))
        );
        assert!(!resolved.options.parallel);
        assert!(resolved.plain);
    }

    /// Accepts writes but fails on flush, like a full disk behind a buffer
    struct FailingFlush(Vec<u8>);

    impl Write for FailingFlush {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Err(std::io::Error::other("no space left on device"))
        }
    }

    #[test]
    fn test_render_reports_flush_failure() {
        let result = AnalysisResult::default();
        let mut sink = FailingFlush(Vec::new());

        let err = render(&result, OutputFormat::Json, &mut sink).unwrap_err();
        assert!(err.to_string().contains("no space left"));
        assert!(!sink.0.is_empty());
    }

    #[test]
    fn test_render_writes_json() {
        let mut buffer = Vec::new();
        render(&AnalysisResult::default(), OutputFormat::Json, &mut buffer).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(value["metrics"]["complexity"], 0);
    }

    #[test]
    fn test_defaults_without_config() {
        let resolved = resolve(&AnalyzeConfig::default(), &ProcmapConfig::default());

        assert_eq!(resolved.format, OutputFormat::Text);
        assert_eq!(resolved.options.limits, AnalysisLimits::default());
        assert!(resolved.options.parallel);
    }
}
