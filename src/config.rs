//! TOML configuration.
//!
//! Every field has a default, so an empty file (or no file) is valid:
//!
//! ```toml
//! [log]
//! level = "info"
//! json = false
//!
//! [export]
//! pretty = true
//! file_name = "resource-allocation-config.json"
//!
//! [prioritization]
//! profile = "Fair Distribution"
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;
use crate::models::{default_weights, PriorityProfile, PriorityWeight};

/// Default export file name.
pub const DEFAULT_EXPORT_FILE: &str = "resource-allocation-config.json";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfiguratorConfig {
    pub log: LogConfig,
    pub export: ExportConfig,
    pub prioritization: PrioritizationConfig,
}

/// Log output settings. `RUST_LOG`, when set, overrides `level`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Indent the exported JSON.
    pub pretty: bool,
    pub file_name: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            pretty: true,
            file_name: DEFAULT_EXPORT_FILE.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrioritizationConfig {
    /// Name of a preset profile to start from.
    pub profile: Option<String>,
}

impl ConfiguratorConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Starting weights: the named profile's, or the defaults if none is named.
    pub fn initial_weights(&self) -> Result<Vec<PriorityWeight>, ConfigError> {
        match &self.prioritization.profile {
            Some(name) => PriorityProfile::preset(name)
                .map(|p| p.weights)
                .ok_or_else(|| ConfigError::UnknownProfile(name.clone())),
            None => Ok(default_weights()),
        }
    }
}
