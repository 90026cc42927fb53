//! In-memory authenticator with a single fixture operator.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use super::Latency;
use crate::domain::messages::{INVALID_CREDENTIALS, SESSION_EXPIRED};
use crate::domain::ports::Authenticator;
use crate::domain::{AuthSession, Error, LoginCredentials, User};

/// The only email the fixture authenticator accepts.
pub const FIXTURE_EMAIL: &str = "admin@example.com";
/// The only password the fixture authenticator accepts.
pub const FIXTURE_PASSWORD: &str = "admin123";

/// Authenticator accepting exactly [`FIXTURE_EMAIL`] / [`FIXTURE_PASSWORD`].
///
/// Issued tokens are random and remembered, so unknown or forged tokens are
/// rejected.
#[derive(Clone)]
pub struct FixtureAuthenticator {
    user: User,
    tokens: Arc<RwLock<HashMap<String, User>>>,
    latency: Latency,
}

impl FixtureAuthenticator {
    /// Authenticator whose operator was created at the clock's current time.
    pub fn new(clock: &dyn Clock, latency: Latency) -> Self {
        let now = clock.utc();
        Self {
            user: User {
                id: "admin-1".to_owned(),
                username: "admin".to_owned(),
                email: FIXTURE_EMAIL.to_owned(),
                first_name: Some("Super".to_owned()),
                last_name: Some("Admin".to_owned()),
                role: "admin".to_owned(),
                created_at: now,
                updated_at: now,
            },
            tokens: Arc::new(RwLock::new(HashMap::new())),
            latency,
        }
    }

    /// Forget every issued token.
    pub async fn revoke_all(&self) {
        self.tokens.write().await.clear();
    }
}

#[async_trait]
impl Authenticator for FixtureAuthenticator {
    async fn login(&self, credentials: &LoginCredentials) -> Result<AuthSession, Error> {
        self.latency.wait().await;
        if !(credentials.email().eq_ignore_ascii_case(FIXTURE_EMAIL)
            && credentials.password() == FIXTURE_PASSWORD)
        {
            debug!(email = credentials.email(), "rejected login");
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        }
        let token = Uuid::new_v4().simple().to_string();
        self.tokens
            .write()
            .await
            .insert(token.clone(), self.user.clone());
        info!(user = %self.user.id, "issued session token");
        Ok(AuthSession {
            user: self.user.clone(),
            token,
        })
    }

    async fn current_user(&self, token: &str) -> Result<User, Error> {
        self.latency.wait().await;
        self.tokens
            .read()
            .await
            .get(token)
            .cloned()
            .ok_or_else(|| Error::unauthorized(SESSION_EXPIRED))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for the fixture authenticator.
    use mockable::DefaultClock;
    use rstest::rstest;

    use super::*;
    use crate::domain::ErrorCode;

    fn authenticator() -> FixtureAuthenticator {
        FixtureAuthenticator::new(&DefaultClock, Latency::NONE)
    }

    #[rstest]
    #[case("admin@example.com", "wrong")]
    #[case("someone@example.com", "admin123")]
    #[case("admin@example.com", "ADMIN123")]
    #[tokio::test]
    async fn rejects_anything_but_the_fixture_pair(#[case] email: &str, #[case] password: &str) {
        let creds = LoginCredentials::try_from_parts(email, password).expect("shape");
        let err = authenticator().login(&creds).await.expect_err("rejected");
        assert_eq!(err.code(), ErrorCode::Unauthorized);
        assert_eq!(err.message(), INVALID_CREDENTIALS);
    }

    #[tokio::test]
    async fn issued_tokens_resolve_until_revoked() {
        let auth = authenticator();
        let creds = LoginCredentials::try_from_parts(FIXTURE_EMAIL, FIXTURE_PASSWORD).expect("shape");
        let session = auth.login(&creds).await.expect("login");

        let user = auth.current_user(&session.token).await.expect("known token");
        assert_eq!(user.role, "admin");

        auth.revoke_all().await;
        let err = auth.current_user(&session.token).await.expect_err("revoked");
        assert_eq!(err.code(), ErrorCode::Unauthorized);
    }
}
