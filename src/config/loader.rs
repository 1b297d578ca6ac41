use super::core::{ProcmapConfig, CONFIG_FILE_NAME};
use crate::errors::{Error, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const MAX_TRAVERSAL_DEPTH: usize = 10;

/// Parse and validate a TOML document
pub fn parse_config(contents: &str, path: &Path) -> Result<ProcmapConfig> {
    let config: ProcmapConfig = toml::from_str(contents).map_err(|source| Error::Toml {
        path: path.to_path_buf(),
        source,
    })?;
    config.validate()?;
    Ok(config)
}

/// Load an explicitly named config file. Any problem is an error.
pub fn load_config_from(path: &Path) -> Result<ProcmapConfig> {
    let contents = crate::io::read_file(path)?;
    let config = parse_config(&contents, path)?;
    debug!("Loaded config from {}", path.display());
    Ok(config)
}

/// Directory and its parents, nearest first, at most `max_depth` entries
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// Discover `.procmap.toml` from the current directory upwards.
///
/// A discovered file that cannot be read or is invalid is logged and skipped.
pub fn load_config() -> ProcmapConfig {
    let current = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            warn!("Failed to get current directory: {}. Using default config.", e);
            return ProcmapConfig::default();
        }
    };
    discover_from(current)
}

fn discover_from(start: PathBuf) -> ProcmapConfig {
    directory_ancestors(start, MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .filter(|path| path.is_file())
        .find_map(|path| match load_config_from(&path) {
            Ok(config) => Some(config),
            Err(e) => {
                warn!("Ignoring {}: {}", path.display(), e);
                None
            }
        })
        .unwrap_or_else(|| {
            debug!(
                "No config found after checking {} directories. Using default config.",
                MAX_TRAVERSAL_DEPTH
            );
            ProcmapConfig::default()
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::OutputFormat;
    use indoc::indoc;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_parse_full_config() {
        let config = parse_config(
            indoc! {r#"
                [analysis]
                max_paths = 250
                timeout_ms = 2000
                parallel = false

                [output]
                default_format = "json"
                plain = true
            "#},
            Path::new(CONFIG_FILE_NAME),
        )
        .unwrap();

        assert_eq!(config.max_paths(), 250);
        assert!(!config.parallel());
        assert_eq!(config.default_format(), OutputFormat::Json);
        assert!(config.plain());
    }

    #[test]
    fn test_explicit_invalid_config_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("custom.toml");
        fs::write(&path, "[analysis]\nmax_paths = 0\n").unwrap();

        assert!(matches!(
            load_config_from(&path),
            Err(Error::Configuration(_))
        ));
    }

    #[test]
    fn test_explicit_malformed_toml_reports_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("custom.toml");
        fs::write(&path, "[analysis\n").unwrap();

        let err = load_config_from(&path).unwrap_err();
        assert!(matches!(err, Error::Toml { .. }));
        assert!(err.to_string().contains("custom.toml"));
    }

    #[test]
    fn test_discovery_walks_up_to_parent() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a").join("b");
        fs::create_dir_all(&nested).unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "[analysis]\nmax_paths = 42\n",
        )
        .unwrap();

        assert_eq!(discover_from(nested).max_paths(), 42);
    }

    #[test]
    fn test_discovered_invalid_config_is_ignored() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "[analysis]\nmax_paths = 0\n",
        )
        .unwrap();

        assert_eq!(discover_from(dir.path().to_path_buf()), ProcmapConfig::default());
    }

    #[test]
    fn test_directory_ancestors_limit() {
        let ancestors: Vec<_> = directory_ancestors(PathBuf::from("/a/b/c"), 2).collect();
        assert_eq!(ancestors, vec![PathBuf::from("/a/b/c"), PathBuf::from("/a/b")]);
    }
}
