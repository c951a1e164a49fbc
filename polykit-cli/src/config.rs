//! CLI Configuration
//!
//! Optional JSON file passed with `--config`. Missing fields take their
//! defaults; command-line flags override file values.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use polykit::FormatOptions;
use polykit_util::DEFAULT_LEVEL;

/// Configuration for the polykit CLI.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Value rendering used by `inspect` and `dispatch`.
    pub format: FormatOptions,

    /// Compression settings used by `gzip`.
    pub gzip: GzipConfig,
}

/// Compression settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GzipConfig {
    /// Compression level, 0 to 9.
    pub level: u32,
}

impl Default for GzipConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LEVEL,
        }
    }
}

impl Config {
    /// Loads a config file, or the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_missing_path_gives_defaults() {
        let config = Config::load(None).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.gzip.level, 6);
        assert_eq!(config.format.indent, 2);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"format": {{"wrap": true, "indent_char": "\t"}}}}"#).unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert!(config.format.wrap);
        assert_eq!(config.format.indent_char, '\t');
        assert_eq!(config.format.indent, 2);
        assert_eq!(config.gzip, GzipConfig::default());
    }

    #[test]
    fn test_errors_name_the_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        let err = Config::load(Some(file.path())).unwrap_err();
        assert!(err.to_string().starts_with("Failed to parse config file"));

        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        let err = Config::load(Some(&missing)).unwrap_err();
        assert!(err.to_string().contains("missing.json"));
    }

    #[test]
    fn test_defaults_serialize() {
        let json = serde_json::to_value(Config::default()).unwrap();
        assert_eq!(json["gzip"]["level"], 6);
        assert_eq!(json["format"]["single_quotes"], false);
    }
}
