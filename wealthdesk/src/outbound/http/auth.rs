//! Authentication service over `/auth`.

use std::sync::Arc;

use async_trait::async_trait;
use pagination::Envelope;
use reqwest::Method;

use super::client::{ApiClient, ApiError, Bearer};
use super::folded;
use crate::domain::messages::{AUTHENTICATION_REQUIRED, LOGIN_FAILED};
use crate::domain::ports::AuthService;
use crate::domain::{AuthSession, LoginCredentials, LoginRequest, User};

/// [`AuthService`] calling the REST backend.
#[derive(Clone)]
pub struct HttpAuthService {
    api: Arc<ApiClient>,
}

impl HttpAuthService {
    /// Adapter sharing `api` with the other HTTP services.
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl AuthService for HttpAuthService {
    async fn login(&self, credentials: &LoginCredentials) -> Envelope<AuthSession> {
        let body = LoginRequest::from(credentials);
        let result: Result<Envelope<AuthSession>, ApiError> = async {
            let url = self.api.endpoint(&["auth", "login"])?;
            self.api
                .execute(Method::POST, url, Some(&body), Bearer::Anonymous)
                .await
        }
        .await;
        folded(result, LOGIN_FAILED)
    }

    async fn current_user(&self, token: &str) -> Envelope<User> {
        let result: Result<Envelope<User>, ApiError> = async {
            let url = self.api.endpoint(&["auth", "me"])?;
            self.api
                .execute(Method::GET, url, None::<&()>, Bearer::Explicit(token))
                .await
        }
        .await;
        folded(result, AUTHENTICATION_REQUIRED)
    }
}
