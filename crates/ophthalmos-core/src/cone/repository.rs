//! Sensitivity profile repository trait.

use super::model::SensitivityProfile;
use crate::error::Result;
use crate::user::UserId;
use async_trait::async_trait;

/// An abstract store of sensitivity profiles, one history per user.
///
/// Decouples the test flow from where profiles end up (remote API,
/// in-process store, ...).
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Returns the most recently saved profile for `user_id`.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(profile))`: The latest profile
    /// - `Ok(None)`: The user has not completed a test yet
    /// - `Err(_)`: The store could not be reached
    async fn fetch_latest_profile(&self, user_id: &UserId) -> Result<Option<SensitivityProfile>>;

    /// Appends `profile` to the user's history.
    async fn save_profile(&self, user_id: &UserId, profile: &SensitivityProfile) -> Result<()>;
}
