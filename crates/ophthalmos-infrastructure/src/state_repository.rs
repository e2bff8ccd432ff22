//! Local account state.
//!
//! Remembers which account this machine uses between runs, as `state.json`
//! in the config directory.

use crate::paths::OphthalmosPaths;
use async_trait::async_trait;
use ophthalmos_core::error::{OphthalmosError, Result};
use ophthalmos_core::user::{AccountStore, UserAccount};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct StateFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    account: Option<UserAccount>,
}

/// File-backed [`AccountStore`].
///
/// The file is read once on first access and cached in memory.
#[derive(Debug, Clone)]
pub struct FileAccountStore {
    path: PathBuf,
    /// `None` until the file has been read.
    cache: Arc<Mutex<Option<StateFile>>>,
}

impl FileAccountStore {
    pub fn new(paths: &OphthalmosPaths) -> Self {
        Self::with_file(paths.state_file())
    }

    pub fn with_file(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cache: Arc::new(Mutex::new(None)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_file(&self) -> Result<StateFile> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) if content.trim().is_empty() => Ok(StateFile::default()),
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(StateFile::default()),
            Err(e) => Err(OphthalmosError::io(format!(
                "Failed to read {}: {}",
                self.path.display(),
                e
            ))),
        }
    }

    async fn write_file(&self, state: &StateFile) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let content = serde_json::to_string_pretty(state)?;
        tokio::fs::write(&self.path, content).await.map_err(|e| {
            OphthalmosError::io(format!("Failed to write {}: {}", self.path.display(), e))
        })
    }
}

#[async_trait]
impl AccountStore for FileAccountStore {
    async fn load_account(&self) -> Result<Option<UserAccount>> {
        let mut cache = self.cache.lock().await;
        if cache.is_none() {
            *cache = Some(self.read_file().await?);
        }
        Ok(cache.as_ref().and_then(|state| state.account.clone()))
    }

    async fn save_account(&self, account: &UserAccount) -> Result<()> {
        let mut cache = self.cache.lock().await;
        let state = StateFile {
            account: Some(account.clone()),
        };
        self.write_file(&state).await?;
        *cache = Some(state);
        tracing::debug!(path = %self.path.display(), user_id = %account.user_id, "account remembered");
        Ok(())
    }

    async fn clear_account(&self) -> Result<()> {
        let mut cache = self.cache.lock().await;
        let state = StateFile::default();
        self.write_file(&state).await?;
        *cache = Some(state);
        Ok(())
    }
}

/// Volatile [`AccountStore`] for offline sessions and tests.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAccountStore {
    account: Arc<Mutex<Option<UserAccount>>>,
}

impl InMemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountStore for InMemoryAccountStore {
    async fn load_account(&self) -> Result<Option<UserAccount>> {
        Ok(self.account.lock().await.clone())
    }

    async fn save_account(&self, account: &UserAccount) -> Result<()> {
        *self.account.lock().await = Some(account.clone());
        Ok(())
    }

    async fn clear_account(&self) -> Result<()> {
        *self.account.lock().await = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ophthalmos_core::user::UserId;

    fn ada() -> UserAccount {
        UserAccount::new(UserId::new("u-1"), "Ada")
    }

    #[tokio::test]
    async fn test_missing_file_means_no_account() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileAccountStore::new(&OphthalmosPaths::at(dir.path()));
        assert_eq!(store.load_account().await.unwrap(), None);
        assert!(!store.path().exists());
    }

    #[tokio::test]
    async fn test_account_survives_a_new_store() {
        let dir = tempfile::tempdir().unwrap();
        let paths = OphthalmosPaths::at(dir.path().join("nested"));

        FileAccountStore::new(&paths).save_account(&ada()).await.unwrap();

        let content = std::fs::read_to_string(paths.state_file()).unwrap();
        assert!(content.contains(r#""userId": "u-1""#));

        let reopened = FileAccountStore::new(&paths);
        assert_eq!(reopened.load_account().await.unwrap(), Some(ada()));
    }

    #[tokio::test]
    async fn test_clear_forgets_account() {
        let dir = tempfile::tempdir().unwrap();
        let paths = OphthalmosPaths::at(dir.path());
        let store = FileAccountStore::new(&paths);
        store.save_account(&ada()).await.unwrap();
        store.clear_account().await.unwrap();

        assert_eq!(store.load_account().await.unwrap(), None);
        assert_eq!(FileAccountStore::new(&paths).load_account().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_corrupt_file_is_a_serialization_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = FileAccountStore::with_file(&path).load_account().await.unwrap_err();
        assert!(err.is_serialization());
    }

    #[tokio::test]
    async fn test_in_memory_store_round_trip() {
        let store = InMemoryAccountStore::new();
        assert_eq!(store.load_account().await.unwrap(), None);
        store.save_account(&ada()).await.unwrap();
        assert_eq!(store.load_account().await.unwrap(), Some(ada()));
        store.clear_account().await.unwrap();
        assert_eq!(store.load_account().await.unwrap(), None);
    }
}
