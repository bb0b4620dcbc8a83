//! Coordinator configuration with TOML file support.

use serde::{Deserialize, Serialize};

use crate::CoordinatorError;

/// Configuration for the verification coordinator.
///
/// Can be loaded from a TOML file via [`CoordinatorConfig::from_toml_file`]
/// or built programmatically (e.g. for tests). The host's plugin loader
/// typically reads this at start-up and hands `table_name` to the tier
/// store.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CoordinatorConfig {
    /// Name of the storage table holding verification records.
    #[serde(default = "default_table_name")]
    pub table_name: String,

    /// Log format: "human" or "json".
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_table_name() -> String {
    "verification_tiers".to_string()
}

fn default_log_format() -> String {
    "human".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl CoordinatorConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: &str) -> Result<Self, CoordinatorError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| CoordinatorError::Config(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, CoordinatorError> {
        toml::from_str(s).map_err(|e| CoordinatorError::Config(e.to_string()))
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> String {
        toml::to_string_pretty(self).expect("CoordinatorConfig is always serializable to TOML")
    }
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            table_name: default_table_name(),
            log_format: default_log_format(),
            log_level: default_log_level(),
        }
    }
}
