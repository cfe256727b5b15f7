use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
}

/// Validation settings of a [`Registry`](super::registry::Registry).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RegistryConfig {
    /// Require every bond index to occur exactly twice per side of a rule.
    pub enforce_bond_balance: bool,
    /// Require state labels to be plain alphanumeric tokens rather than any non-empty text.
    pub strict_state_labels: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            enforce_bond_balance: true,
            strict_state_labels: true,
        }
    }
}

impl RegistryConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigLoadError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigLoadError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| ConfigLoadError::Toml {
            path: path.to_string_lossy().to_string(),
            source: e,
        })
    }
}
