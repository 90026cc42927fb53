//! Driving port for login and token validation.

use async_trait::async_trait;
use pagination::Envelope;

use crate::domain::{AuthSession, LoginCredentials, User};

/// Authentication use-cases consumed by the session store.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Exchange credentials for `{user, token}`.
    async fn login(&self, credentials: &LoginCredentials) -> Envelope<AuthSession>;

    /// Resolve `token` to the user it was issued for.
    async fn current_user(&self, token: &str) -> Envelope<User>;
}
