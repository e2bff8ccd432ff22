//! Recommendation service trait.

use super::model::AdaptationFactors;
use crate::cone::SensitivityProfile;
use crate::error::Result;

/// Turns a sensitivity profile into adjustment factors.
///
/// The formula lives behind this trait; the core treats the answer as opaque.
#[async_trait::async_trait]
pub trait AdaptationService: Send + Sync {
    /// # Errors
    ///
    /// Returns an error when the service is unavailable. Adaptation must then
    /// stay disabled.
    async fn fetch_adaptation_factors(&self, profile: &SensitivityProfile) -> Result<AdaptationFactors>;
}
