//! Performance result repository trait.

use super::model::PerformanceResult;
use super::stats::PerformanceStats;
use crate::error::Result;
use crate::user::UserId;
use async_trait::async_trait;

/// Stores finished games and reports aggregate statistics.
#[async_trait]
pub trait PerformanceRepository: Send + Sync {
    /// Records a finished game for `user_id`.
    async fn save_performance_result(&self, user_id: &UserId, result: &PerformanceResult) -> Result<()>;

    /// Aggregates every saved result of `user_id`.
    ///
    /// A user with no results gets [`PerformanceStats::default`].
    async fn fetch_performance_stats(&self, user_id: &UserId) -> Result<PerformanceStats>;
}
