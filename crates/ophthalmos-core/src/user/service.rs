//! Account service trait.

use super::model::UserId;
use crate::error::Result;

/// Creates accounts on the external service.
///
/// There is no authentication; an account is just a name mapped to an id
/// that the other collaborators key their data by.
#[async_trait::async_trait]
pub trait AccountService: Send + Sync {
    /// Registers `name` and returns the issued id.
    ///
    /// # Errors
    ///
    /// Returns an error if the service is unreachable or rejects the request.
    /// Callers must then behave as if no account exists.
    async fn create_account(&self, name: &str) -> Result<UserId>;
}
