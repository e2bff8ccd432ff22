//! Local account store trait.

use super::model::UserAccount;
use crate::error::Result;
use async_trait::async_trait;

/// Remembers the account created on this machine between runs.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Returns the remembered account, if any.
    async fn load_account(&self) -> Result<Option<UserAccount>>;

    async fn save_account(&self, account: &UserAccount) -> Result<()>;

    /// Forgets the remembered account.
    async fn clear_account(&self) -> Result<()>;
}
