//! Error types for loading process documents and configuration.
//!
//! The analysis engine itself never fails; only the edges of the tool
//! (file I/O, JSON decoding, TOML configuration) produce errors.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for procmap operations
#[derive(Debug, Error)]
pub enum Error {
    /// File system errors with the offending path
    #[error("File system error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Process document could not be decoded
    #[error("Invalid process document{}: {source}", display_path(.path))]
    Parse {
        path: Option<PathBuf>,
        #[source]
        source: serde_json::Error,
    },

    /// Configuration file could not be decoded
    #[error("Failed to parse {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Configuration values out of range
    #[error("Configuration error: {0}")]
    Configuration(String),
}

fn display_path(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| format!(" {}", p.display()))
        .unwrap_or_default()
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn parse(path: Option<PathBuf>, source: serde_json::Error) -> Self {
        Self::Parse { path, source }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, Error>;
