//! In-process vision backend.
//!
//! Used by the CLI's `--offline` mode and by tests. It keeps everything in
//! memory and computes statistics the same way the REST service does.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use ophthalmos_core::adaptation::{AdaptationFactors, AdaptationService};
use ophthalmos_core::cone::{ProfileRepository, SensitivityProfile};
use ophthalmos_core::error::{OphthalmosError, Result};
use ophthalmos_core::performance::{PerformanceRepository, PerformanceResult, PerformanceStats};
use ophthalmos_core::user::{AccountService, UserId};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

#[derive(Debug, Clone)]
struct Timestamped<T> {
    recorded_at: DateTime<Utc>,
    value: T,
}

impl<T> Timestamped<T> {
    fn now(value: T) -> Self {
        Self {
            recorded_at: Utc::now(),
            value,
        }
    }
}

#[derive(Debug, Default)]
struct Store {
    users: HashMap<UserId, String>,
    profiles: HashMap<UserId, Vec<Timestamped<SensitivityProfile>>>,
    results: HashMap<UserId, Vec<Timestamped<PerformanceResult>>>,
}

/// Memory-backed implementation of every collaborator trait.
///
/// Clones share the same store.
#[derive(Debug, Clone)]
pub struct InMemoryVisionBackend {
    store: Arc<Mutex<Store>>,
    factors: AdaptationFactors,
}

impl InMemoryVisionBackend {
    /// Creates an empty backend that hands out neutral factors.
    pub fn new() -> Self {
        Self::with_factors(AdaptationFactors::neutral())
    }

    /// Creates an empty backend that always answers with `factors`.
    pub fn with_factors(factors: AdaptationFactors) -> Self {
        Self {
            store: Arc::new(Mutex::new(Store::default())),
            factors,
        }
    }

    /// Name registered for `user_id`, if the account exists.
    pub async fn user_name(&self, user_id: &UserId) -> Option<String> {
        self.store.lock().await.users.get(user_id).cloned()
    }

    /// Every saved result for `user_id`, oldest first.
    pub async fn results(&self, user_id: &UserId) -> Vec<PerformanceResult> {
        let store = self.store.lock().await;
        let mut entries = store.results.get(user_id).cloned().unwrap_or_default();
        entries.sort_by_key(|entry| entry.recorded_at);
        entries.into_iter().map(|entry| entry.value).collect()
    }
}

impl Default for InMemoryVisionBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AccountService for InMemoryVisionBackend {
    async fn create_account(&self, name: &str) -> Result<UserId> {
        if name.trim().is_empty() {
            return Err(OphthalmosError::invalid_input("account name must not be empty"));
        }
        let user_id = UserId::new(Uuid::new_v4().to_string());
        self.store
            .lock()
            .await
            .users
            .insert(user_id.clone(), name.to_string());

        tracing::info!(%user_id, "offline account created");
        Ok(user_id)
    }
}

#[async_trait]
impl ProfileRepository for InMemoryVisionBackend {
    async fn fetch_latest_profile(&self, user_id: &UserId) -> Result<Option<SensitivityProfile>> {
        let store = self.store.lock().await;
        // max_by_key keeps the last of equal timestamps, i.e. the newest insert
        Ok(store
            .profiles
            .get(user_id)
            .and_then(|entries| entries.iter().max_by_key(|entry| entry.recorded_at))
            .map(|entry| entry.value))
    }

    async fn save_profile(&self, user_id: &UserId, profile: &SensitivityProfile) -> Result<()> {
        self.store
            .lock()
            .await
            .profiles
            .entry(user_id.clone())
            .or_default()
            .push(Timestamped::now(*profile));
        Ok(())
    }
}

#[async_trait]
impl AdaptationService for InMemoryVisionBackend {
    async fn fetch_adaptation_factors(&self, _profile: &SensitivityProfile) -> Result<AdaptationFactors> {
        Ok(self.factors.clone())
    }
}

#[async_trait]
impl PerformanceRepository for InMemoryVisionBackend {
    async fn save_performance_result(&self, user_id: &UserId, result: &PerformanceResult) -> Result<()> {
        self.store
            .lock()
            .await
            .results
            .entry(user_id.clone())
            .or_default()
            .push(Timestamped::now(result.clone()));
        Ok(())
    }

    async fn fetch_performance_stats(&self, user_id: &UserId) -> Result<PerformanceStats> {
        Ok(PerformanceStats::summarize(&self.results(user_id).await))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ophthalmos_core::game::GameMode;

    #[tokio::test]
    async fn test_accounts_get_distinct_uuid_ids() {
        let backend = InMemoryVisionBackend::new();
        let first = backend.create_account("Ada").await.unwrap();
        let second = backend.create_account("Ada").await.unwrap();

        assert_ne!(first, second);
        assert!(Uuid::parse_str(first.as_str()).is_ok());
        assert_eq!(backend.user_name(&first).await.as_deref(), Some("Ada"));
    }

    #[tokio::test]
    async fn test_blank_name_is_rejected() {
        let backend = InMemoryVisionBackend::new();
        assert!(backend.create_account("   ").await.is_err());
    }

    #[tokio::test]
    async fn test_latest_profile_is_most_recent() {
        let backend = InMemoryVisionBackend::new();
        let user = UserId::new("u-1");
        assert_eq!(backend.fetch_latest_profile(&user).await.unwrap(), None);

        backend.save_profile(&user, &SensitivityProfile::new(33, 33, 33)).await.unwrap();
        backend.save_profile(&user, &SensitivityProfile::new(100, 67, 100)).await.unwrap();

        assert_eq!(
            backend.fetch_latest_profile(&user).await.unwrap(),
            Some(SensitivityProfile::new(100, 67, 100))
        );
        assert_eq!(backend.fetch_latest_profile(&UserId::new("other")).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_factors_are_fixed() {
        let factors = AdaptationFactors {
            red_adjustment: 0.7,
            contrast_boost: 1.3,
            ..AdaptationFactors::neutral()
        };
        let backend = InMemoryVisionBackend::with_factors(factors.clone());
        let fetched = backend
            .fetch_adaptation_factors(&SensitivityProfile::new(0, 0, 0))
            .await
            .unwrap();
        assert_eq!(fetched, factors);
    }

    #[tokio::test]
    async fn test_stats_are_per_user() {
        let backend = InMemoryVisionBackend::new();
        let user = UserId::new("u-1");
        for score in [10, 20, 30, 40, 50, 60] {
            let result = PerformanceResult::new(GameMode::ColorMatch, score, 20);
            backend.save_performance_result(&user, &result).await.unwrap();
        }

        let stats = backend.fetch_performance_stats(&user).await.unwrap();
        assert_eq!(stats.total_tests, 6);
        assert_eq!(stats.average_score, 35.0);
        assert_eq!(stats.average_time, 20.0);
        // (50 - 20) / 20 * 100
        assert_eq!(stats.improvement, 150.0);

        let empty = backend.fetch_performance_stats(&UserId::new("u-2")).await.unwrap();
        assert_eq!(empty, PerformanceStats::default());
    }
}
