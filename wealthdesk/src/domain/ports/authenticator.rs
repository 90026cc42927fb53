//! Driven port for credential checks and token resolution.

use async_trait::async_trait;

use crate::domain::{AuthSession, Error, LoginCredentials, User};

/// Validates credentials and the bearer tokens issued for them.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Exchange credentials for a user and a fresh token.
    ///
    /// Rejected credentials yield [`crate::domain::ErrorCode::Unauthorized`].
    async fn login(&self, credentials: &LoginCredentials) -> Result<AuthSession, Error>;

    /// Resolve a previously issued token to its user.
    async fn current_user(&self, token: &str) -> Result<User, Error>;
}
