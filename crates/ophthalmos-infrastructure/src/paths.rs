//! Path management for ophthalmos files.
//!
//! ```text
//! ~/.config/ophthalmos/        # Config directory (platform specific)
//! ├── config.toml              # Application configuration
//! └── state.json               # Account remembered between runs
//! ```

use ophthalmos_core::error::OphthalmosError;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "ophthalmos";
const CONFIG_FILE: &str = "config.toml";
const STATE_FILE: &str = "state.json";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// The platform config directory could not be determined.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot find the configuration directory"),
        }
    }
}

impl std::error::Error for PathError {}

impl From<PathError> for OphthalmosError {
    fn from(err: PathError) -> Self {
        OphthalmosError::config(err.to_string())
    }
}

/// Resolved locations of every file ophthalmos reads or writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OphthalmosPaths {
    config_dir: PathBuf,
}

impl OphthalmosPaths {
    /// Uses the platform config directory (XDG on Linux, Application Support
    /// on macOS, AppData on Windows).
    pub fn platform() -> Result<Self, PathError> {
        let base = dirs::config_dir().ok_or(PathError::ConfigDirNotFound)?;
        Ok(Self::at(base.join(APP_DIR)))
    }

    /// Roots every path at `config_dir` (tests, `--config` overrides).
    pub fn at(config_dir: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: config_dir.into(),
        }
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Path to config.toml
    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join(CONFIG_FILE)
    }

    /// Path to state.json
    pub fn state_file(&self) -> PathBuf {
        self.config_dir.join(STATE_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_files_live_under_config_dir() {
        let paths = OphthalmosPaths::at("/tmp/ophthalmos-test");
        assert_eq!(paths.config_file(), PathBuf::from("/tmp/ophthalmos-test/config.toml"));
        assert_eq!(paths.state_file(), PathBuf::from("/tmp/ophthalmos-test/state.json"));
        assert!(paths.config_file().starts_with(paths.config_dir()));
    }

    #[test]
    fn test_platform_dir_is_app_specific() {
        // Headless CI may have no config dir at all
        if let Ok(paths) = OphthalmosPaths::platform() {
            assert!(paths.config_dir().ends_with("ophthalmos"));
        }
    }
}
