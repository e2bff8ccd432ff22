//! Configuration model.
//!
//! Loading and caching live in the infrastructure crate; this module only
//! defines the shape of `config.toml` and its defaults.

use serde::{Deserialize, Serialize};

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8001";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Root of `config.toml`.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct RootConfig {
    #[serde(default)]
    pub backend: BackendSettings,
    #[serde(default)]
    pub logging: LogSettings,
}

/// Where the recommendation / persistence service lives.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct BackendSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    /// `tracing` filter directive, e.g. `"info"` or `"ophthalmos_core=debug"`
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BACKEND_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_yields_defaults() {
        let config: RootConfig = toml::from_str("").unwrap();
        assert_eq!(config, RootConfig::default());
        assert_eq!(config.backend.base_url, "http://localhost:8001");
    }

    #[test]
    fn test_partial_sections_fill_in_defaults() {
        let config: RootConfig = toml::from_str(
            r#"
            [backend]
            base_url = "https://vision.example.org"
            "#,
        )
        .unwrap();
        assert_eq!(config.backend.base_url, "https://vision.example.org");
        assert_eq!(config.backend.timeout_secs, 10);
        assert_eq!(config.logging.level, "info");
    }
}
