//! Run mode enumeration.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// How the simulation chooses channel inputs while running.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum RunMode {
    /// Inputs are drawn from a pseudorandom source (the default).
    #[default]
    Pseudorandom,
    /// Inputs are supplied one at a time by the operator.
    Manual,
}

impl RunMode {
    /// Parse a mode from its lowercase configuration name.
    ///
    /// Returns `None` for unknown names; the caller decides whether that
    /// is a configuration error.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "pseudorandom" => Some(Self::Pseudorandom),
            "manual" => Some(Self::Manual),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_mode_is_pseudorandom() {
        assert_eq!(RunMode::default(), RunMode::Pseudorandom);
    }

    #[test]
    fn mode_names_parse_case_insensitively() {
        assert_eq!(RunMode::from_name("Manual"), Some(RunMode::Manual));
        assert_eq!(
            RunMode::from_name("pseudorandom"),
            Some(RunMode::Pseudorandom)
        );
        assert_eq!(RunMode::from_name("turbo"), None);
    }
}
