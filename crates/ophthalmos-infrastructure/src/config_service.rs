//! Configuration service implementation.
//!
//! Loads the root configuration from `config.toml`, writing the defaults out
//! the first time so users have a file to edit.

use crate::paths::OphthalmosPaths;
use ophthalmos_core::config::RootConfig;
use ophthalmos_core::error::{OphthalmosError, Result};
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

/// Environment variable overriding `backend.base_url`.
pub const BACKEND_URL_ENV: &str = "OPHTHALMOS_BACKEND_URL";

/// Configuration service that loads and caches the root configuration.
#[derive(Debug, Clone)]
pub struct ConfigService {
    path: PathBuf,
    /// Cached configuration loaded from file.
    /// Uses RwLock for thread-safe lazy loading.
    config: Arc<RwLock<Option<RootConfig>>>,
}

impl ConfigService {
    pub fn new(paths: &OphthalmosPaths) -> Self {
        Self::with_file(paths.config_file())
    }

    /// Reads an explicit file instead of the platform location.
    pub fn with_file(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            config: Arc::new(RwLock::new(None)),
        }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Gets the root configuration, loading from file if not cached.
    ///
    /// An unreadable or malformed file falls back to the defaults (with a
    /// warning) so a broken config never stops the application.
    pub fn get_config(&self) -> RootConfig {
        // Check if already cached
        if let Ok(read_lock) = self.config.read()
            && let Some(ref cached) = *read_lock
        {
            return cached.clone();
        }

        let mut loaded = self.load_config().unwrap_or_else(|e| {
            tracing::warn!(path = %self.path.display(), error = %e, "falling back to default configuration");
            RootConfig::default()
        });
        apply_env_overrides(&mut loaded);

        // Cache it
        if let Ok(mut write_lock) = self.config.write() {
            *write_lock = Some(loaded.clone());
        }

        loaded
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        if let Ok(mut write_lock) = self.config.write() {
            *write_lock = None;
        }
    }

    /// Reads the file, creating it with defaults if it does not exist yet.
    pub fn load_config(&self) -> Result<RootConfig> {
        if !self.path.exists() {
            let default_config = RootConfig::default();
            self.save_config(&default_config)?;
            tracing::info!(path = %self.path.display(), "wrote default configuration");
            return Ok(default_config);
        }

        let content = std::fs::read_to_string(&self.path)?;
        Ok(toml::from_str(&content)?)
    }

    pub fn save_config(&self, config: &RootConfig) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(config)?;
        std::fs::write(&self.path, content).map_err(|e| {
            OphthalmosError::io(format!("Failed to write {}: {}", self.path.display(), e))
        })?;
        self.invalidate_cache();
        Ok(())
    }
}

fn apply_env_overrides(config: &mut RootConfig) {
    if let Ok(url) = std::env::var(BACKEND_URL_ENV)
        && !url.trim().is_empty()
    {
        config.backend.base_url = url.trim().to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ophthalmos_core::config::DEFAULT_BACKEND_URL;

    #[test]
    fn test_missing_file_is_created_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let service = ConfigService::new(&OphthalmosPaths::at(dir.path()));

        let config = service.load_config().unwrap();
        assert_eq!(config, RootConfig::default());
        assert!(service.path().exists());

        let written = std::fs::read_to_string(service.path()).unwrap();
        assert!(written.contains(DEFAULT_BACKEND_URL));
    }

    #[test]
    fn test_reads_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "[logging]\nlevel = \"debug\"\n").unwrap();

        let config = ConfigService::with_file(&path).load_config().unwrap();
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.backend.timeout_secs, 10);
    }

    #[test]
    fn test_malformed_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[backend\nbase_url = ").unwrap();

        let service = ConfigService::with_file(&path);
        assert!(service.load_config().unwrap_err().is_serialization());
        assert_eq!(service.get_config().logging, RootConfig::default().logging);
    }

    #[test]
    fn test_config_is_cached_until_invalidated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[logging]\nlevel = \"warn\"\n").unwrap();

        let service = ConfigService::with_file(&path);
        assert_eq!(service.get_config().logging.level, "warn");

        std::fs::write(&path, "[logging]\nlevel = \"trace\"\n").unwrap();
        assert_eq!(service.get_config().logging.level, "warn");

        service.invalidate_cache();
        assert_eq!(service.get_config().logging.level, "trace");
    }
}
