//! Vision use case implementation.
//!
//! `VisionUseCase` owns the user's account, latest sensitivity profile and
//! color simulator, and coordinates them with the remote collaborators.
//! Every collaborator call degrades to a safe default on failure: the caller
//! never sees a backend outage as an error, only as "nothing available".

use ophthalmos_core::adaptation::{AdaptationFactors, AdaptationService, ColorSimulator, NamedColor};
use ophthalmos_core::color::Color;
use ophthalmos_core::cone::{ConeTest, ProfileRepository, SensitivityProfile};
use ophthalmos_core::error::Result;
use ophthalmos_core::performance::{PerformanceRepository, PerformanceResult, PerformanceStats};
use ophthalmos_core::user::{AccountService, AccountStore, UserAccount};
use ophthalmos_infrastructure::{InMemoryAccountStore, InMemoryVisionBackend};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Use case for the account, cone test, adaptation and statistics flows.
///
/// # Thread Safety
///
/// Collaborators are shared through `Arc`; local state sits behind `RwLock`
/// so the use case can be shared across tasks.
pub struct VisionUseCase {
    /// Creates accounts on the backend
    account_service: Arc<dyn AccountService>,
    /// Stores and retrieves cone test results
    profile_repository: Arc<dyn ProfileRepository>,
    /// Computes adaptation factors for a profile
    adaptation_service: Arc<dyn AdaptationService>,
    /// Stores game results and serves statistics
    performance_repository: Arc<dyn PerformanceRepository>,
    /// Remembers the account locally between runs
    account_store: Arc<dyn AccountStore>,
    account: RwLock<Option<UserAccount>>,
    profile: RwLock<Option<SensitivityProfile>>,
    simulator: RwLock<ColorSimulator>,
}

impl VisionUseCase {
    /// Creates a new `VisionUseCase` with no account or profile loaded.
    ///
    /// # Arguments
    ///
    /// * `account_service` - Creates accounts
    /// * `profile_repository` - Persists sensitivity profiles
    /// * `adaptation_service` - Computes adaptation factors
    /// * `performance_repository` - Persists game results and statistics
    /// * `account_store` - Local memory of the current account
    pub fn new(
        account_service: Arc<dyn AccountService>,
        profile_repository: Arc<dyn ProfileRepository>,
        adaptation_service: Arc<dyn AdaptationService>,
        performance_repository: Arc<dyn PerformanceRepository>,
        account_store: Arc<dyn AccountStore>,
    ) -> Self {
        Self {
            account_service,
            profile_repository,
            adaptation_service,
            performance_repository,
            account_store,
            account: RwLock::new(None),
            profile: RwLock::new(None),
            simulator: RwLock::new(ColorSimulator::new()),
        }
    }

    /// Uses one backend for every remote collaborator.
    pub fn from_backend<B>(backend: Arc<B>, account_store: Arc<dyn AccountStore>) -> Self
    where
        B: AccountService + ProfileRepository + AdaptationService + PerformanceRepository + 'static,
    {
        Self::new(
            backend.clone(),
            backend.clone(),
            backend.clone(),
            backend,
            account_store,
        )
    }

    /// Fully in-process use case: nothing leaves the machine or survives exit.
    pub fn offline(factors: AdaptationFactors) -> Self {
        Self::from_backend(
            Arc::new(InMemoryVisionBackend::with_factors(factors)),
            Arc::new(InMemoryAccountStore::new()),
        )
    }

    pub async fn account(&self) -> Option<UserAccount> {
        self.account.read().await.clone()
    }

    pub async fn profile(&self) -> Option<SensitivityProfile> {
        *self.profile.read().await
    }

    // ============================================================================
    // Account
    // ============================================================================

    /// Loads the remembered account, if any.
    pub async fn restore_account(&self) -> Option<UserAccount> {
        let account = match self.account_store.load_account().await {
            Ok(account) => account,
            Err(e) => {
                tracing::warn!(error = %e, "could not read the remembered account");
                None
            }
        };
        *self.account.write().await = account.clone();
        account
    }

    /// Creates an account named `name` and remembers it locally.
    ///
    /// Returns `None` (and leaves the current account untouched) when the
    /// name is blank or the account service is unavailable.
    pub async fn create_account(&self, name: &str) -> Option<UserAccount> {
        let name = name.trim();
        if name.is_empty() {
            tracing::debug!("ignoring blank account name");
            return None;
        }

        let user_id = match self.account_service.create_account(name).await {
            Ok(user_id) => user_id,
            Err(e) => {
                tracing::warn!(error = %e, "account creation failed");
                return None;
            }
        };

        let account = UserAccount::new(user_id, name);
        if let Err(e) = self.account_store.save_account(&account).await {
            tracing::warn!(error = %e, "account created but could not be remembered");
        }
        *self.account.write().await = Some(account.clone());
        tracing::info!(user_id = %account.user_id, "account ready");
        Some(account)
    }

    /// Forgets the local account, its profile and any loaded factors.
    pub async fn forget_account(&self) -> Result<()> {
        self.account_store.clear_account().await?;
        *self.account.write().await = None;
        *self.profile.write().await = None;
        *self.simulator.write().await = ColorSimulator::new();
        Ok(())
    }

    // ============================================================================
    // Cone test
    // ============================================================================

    /// Fetches the account's most recent profile from the backend.
    ///
    /// Without an account, or when the backend has nothing or fails, the
    /// currently held profile is kept and returned.
    pub async fn load_latest_profile(&self) -> Option<SensitivityProfile> {
        let Some(account) = self.account().await else {
            return self.profile().await;
        };

        match self.profile_repository.fetch_latest_profile(&account.user_id).await {
            Ok(Some(profile)) => {
                let previous = self.profile.write().await.replace(profile);
                if previous != Some(profile) {
                    self.simulator.write().await.clear_factors();
                }
                Some(profile)
            }
            Ok(None) => self.profile().await,
            Err(e) => {
                tracing::warn!(error = %e, "could not fetch the latest profile");
                self.profile().await
            }
        }
    }

    /// Scores a finished cone test and saves the profile for the account.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if some question is unanswered. Saving is best
    /// effort: a save failure is logged and the profile is still returned.
    pub async fn complete_cone_test(&self, test: &ConeTest) -> Result<SensitivityProfile> {
        let profile = test.finish()?;
        *self.profile.write().await = Some(profile);

        // Old factors describe the previous profile
        self.simulator.write().await.clear_factors();

        match self.account().await {
            Some(account) => {
                if let Err(e) = self.profile_repository.save_profile(&account.user_id, &profile).await {
                    tracing::warn!(error = %e, "profile could not be saved");
                }
            }
            None => tracing::debug!("no account; profile kept locally only"),
        }
        Ok(profile)
    }

    /// Replaces the held profile without running a test.
    pub async fn set_profile(&self, profile: SensitivityProfile) {
        *self.profile.write().await = Some(profile);
        self.simulator.write().await.clear_factors();
    }

    // ============================================================================
    // Adaptation
    // ============================================================================

    /// Turns adapted mode on, fetching factors for the held profile first.
    ///
    /// Returns whether adaptation is now in effect. Without a profile, or when
    /// the factors cannot be fetched, adapted mode stays off. Factors that
    /// arrive after the profile was replaced are discarded.
    pub async fn enable_adaptation(&self) -> bool {
        let Some(profile) = self.profile().await else {
            tracing::debug!("no profile; adaptation unavailable");
            return false;
        };

        if self.simulator.read().await.factors().is_none() {
            let factors = match self.adaptation_service.fetch_adaptation_factors(&profile).await {
                Ok(factors) => factors,
                Err(e) => {
                    tracing::warn!(error = %e, "adaptation factors unavailable");
                    self.simulator.write().await.set_adapted_mode(false);
                    return false;
                }
            };

            let mut simulator = self.simulator.write().await;
            if *self.profile.read().await != Some(profile) {
                tracing::debug!(?profile, "profile replaced while fetching; factors dropped");
                return false;
            }
            simulator.load_factors(factors);
            simulator.set_adapted_mode(true);
            return true;
        }

        self.simulator.write().await.set_adapted_mode(true);
        true
    }

    pub async fn disable_adaptation(&self) {
        self.simulator.write().await.set_adapted_mode(false);
    }

    /// Snapshot of the simulator state.
    pub async fn simulator(&self) -> ColorSimulator {
        self.simulator.read().await.clone()
    }

    /// `color` as it should be shown in the current mode.
    pub async fn adapt_color(&self, color: Color) -> Color {
        self.simulator.read().await.display(color)
    }

    pub async fn preview_palette(&self) -> Vec<(NamedColor, Color)> {
        self.simulator.read().await.preview()
    }

    // ============================================================================
    // Performance
    // ============================================================================

    /// Saves a finished game for the account.
    ///
    /// Returns whether the result was stored. A missing account or a backend
    /// failure is logged and otherwise ignored.
    pub async fn record_game_result(&self, result: &PerformanceResult) -> bool {
        let Some(account) = self.account().await else {
            tracing::debug!("no account; game result not saved");
            return false;
        };

        match self
            .performance_repository
            .save_performance_result(&account.user_id, result)
            .await
        {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, "game result could not be saved");
                false
            }
        }
    }

    /// Statistics for the account; all zeros when unavailable.
    pub async fn performance_stats(&self) -> PerformanceStats {
        let Some(account) = self.account().await else {
            return PerformanceStats::default();
        };

        self.performance_repository
            .fetch_performance_stats(&account.user_id)
            .await
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "performance statistics unavailable");
                PerformanceStats::default()
            })
    }
}
