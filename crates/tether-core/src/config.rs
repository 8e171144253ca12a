//! Configuration loading and typed config structures for a Tether
//! session.
//!
//! The canonical configuration lives in a small YAML file owned by the
//! surrounding application shell. This module defines strongly-typed
//! structs that mirror the YAML structure, with per-field defaults so an
//! empty section (or no file at all) yields a working session.

use std::path::Path;

use serde::Deserialize;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level session configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TetherConfig {
    /// System-state settings.
    #[serde(default)]
    pub system: SystemConfig,
}

impl TetherConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_yml::from_str(&contents)?)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yml::from_str(yaml)?)
    }
}

/// System-state configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SystemConfig {
    /// Number of parallel input/verdict channels. Fixed for the session.
    #[serde(default = "default_channels")]
    pub channels: usize,

    /// Initial execution-speed multiplier.
    #[serde(default = "default_speed")]
    pub default_speed: f64,

    /// Key the backup snapshot is stored under in the durable store.
    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    /// Initial run mode name (`pseudorandom` or `manual`).
    #[serde(default = "default_mode")]
    pub default_mode: String,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            channels: default_channels(),
            default_speed: default_speed(),
            storage_key: default_storage_key(),
            default_mode: default_mode(),
        }
    }
}

const fn default_channels() -> usize {
    10
}

const fn default_speed() -> f64 {
    1.5
}

fn default_storage_key() -> String {
    "system".to_owned()
}

fn default_mode() -> String {
    "pseudorandom".to_owned()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_session_contract() {
        let config = TetherConfig::default();
        assert_eq!(config.system.channels, 10);
        assert_eq!(config.system.default_speed, 1.5);
        assert_eq!(config.system.storage_key, "system");
        assert_eq!(config.system.default_mode, "pseudorandom");
    }

    #[test]
    fn partial_yaml_fills_in_defaults() {
        let config = TetherConfig::parse("system:\n  channels: 4\n").unwrap();
        assert_eq!(config.system.channels, 4);
        assert_eq!(config.system.default_speed, 1.5);
    }

    #[test]
    fn empty_mapping_parses_to_defaults() {
        let config = TetherConfig::parse("{}").unwrap();
        assert_eq!(config, TetherConfig::default());
    }

    #[test]
    fn config_loads_from_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tether.yaml");
        std::fs::write(&path, "system:\n  storage_key: bench\n").unwrap();
        let config = TetherConfig::from_file(&path).unwrap();
        assert_eq!(config.system.storage_key, "bench");
    }

    #[test]
    fn invalid_yaml_is_an_error() {
        let result = TetherConfig::parse("system: [not, a, mapping]");
        assert!(matches!(result, Err(ConfigError::Yaml { .. })));
    }
}
