use crate::analysis::limits::DEFAULT_MAX_PATHS;
use crate::analysis::AnalysisLimits;
use crate::errors::{Error, Result};
use crate::io::OutputFormat;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const CONFIG_FILE_NAME: &str = ".procmap.toml";

/// Root configuration structure
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProcmapConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis: Option<AnalysisConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<OutputConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Cap on enumerated start-to-end paths
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_paths: Option<usize>,

    /// Wall-clock budget in milliseconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,

    /// Run independent stages in parallel
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parallel: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_format: Option<OutputFormat>,

    /// Disable colors
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plain: Option<bool>,
}

impl ProcmapConfig {
    pub fn validate(&self) -> Result<()> {
        if let Some(analysis) = &self.analysis {
            if analysis.max_paths == Some(0) {
                return Err(Error::configuration(
                    "analysis.max_paths must be at least 1",
                ));
            }
        }
        Ok(())
    }

    pub fn max_paths(&self) -> usize {
        self.analysis
            .as_ref()
            .and_then(|a| a.max_paths)
            .unwrap_or(DEFAULT_MAX_PATHS)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.analysis
            .as_ref()
            .and_then(|a| a.timeout_ms)
            .map(Duration::from_millis)
    }

    pub fn parallel(&self) -> bool {
        self.analysis
            .as_ref()
            .and_then(|a| a.parallel)
            .unwrap_or(true)
    }

    pub fn default_format(&self) -> OutputFormat {
        self.output
            .as_ref()
            .and_then(|o| o.default_format)
            .unwrap_or_default()
    }

    pub fn plain(&self) -> bool {
        self.output.as_ref().and_then(|o| o.plain).unwrap_or(false)
    }

    pub fn to_limits(&self) -> AnalysisLimits {
        AnalysisLimits {
            max_paths: Some(self.max_paths()),
            timeout: self.timeout(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ProcmapConfig::default();

        assert_eq!(config.max_paths(), 10_000);
        assert_eq!(config.timeout(), None);
        assert!(config.parallel());
        assert_eq!(config.default_format(), OutputFormat::Text);
        assert!(!config.plain());
        assert_eq!(config.to_limits(), AnalysisLimits::default());
    }

    #[test]
    fn test_zero_max_paths_is_rejected() {
        let config = ProcmapConfig {
            analysis: Some(AnalysisConfig {
                max_paths: Some(0),
                ..Default::default()
            }),
            output: None,
        };
        assert!(matches!(config.validate(), Err(Error::Configuration(_))));
    }

    #[test]
    fn test_timeout_converts_to_duration() {
        let config = ProcmapConfig {
            analysis: Some(AnalysisConfig {
                timeout_ms: Some(1500),
                ..Default::default()
            }),
            output: None,
        };
        assert_eq!(config.to_limits().timeout, Some(Duration::from_millis(1500)));
    }
}
