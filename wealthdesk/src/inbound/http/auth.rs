//! Bearer-token authentication and the `/auth` endpoints.
//!
//! ```text
//! POST /api/auth/login {"email":"admin@example.com","password":"admin123"}
//! GET /api/auth/me
//! ```

use actix_web::dev::Payload;
use actix_web::http::header::AUTHORIZATION;
use actix_web::{FromRequest, HttpRequest, get, post, web};
use futures_util::future::LocalBoxFuture;
use pagination::Envelope;
use serde_json::json;
use tracing::{debug, info};

use super::ApiResult;
use super::state::HttpState;
use crate::domain::messages::{AUTHENTICATION_REQUIRED, LOGIN_SUCCESSFUL, USER_RETRIEVED};
use crate::domain::{AuthSession, Error, LoginCredentials, LoginRequest, LoginValidationError, User};

/// The user owning the request's bearer token.
///
/// Extracting this rejects the request with 401 when the `Authorization`
/// header is missing, malformed, or names an unknown token.
#[derive(Debug, Clone)]
pub struct Authenticated(pub User);

impl FromRequest for Authenticated {
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let state = req.app_data::<web::Data<HttpState>>().cloned();
        let token = bearer_token(req);
        Box::pin(async move {
            let state = state.ok_or_else(|| Error::internal("HTTP state is not registered"))?;
            let token = token.ok_or_else(|| Error::unauthorized(AUTHENTICATION_REQUIRED))?;
            let user = state.authenticator.current_user(&token).await?;
            Ok(Self(user))
        })
    }
}

fn bearer_token(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_owned)
}

fn map_login_validation_error(err: &LoginValidationError) -> Error {
    match err {
        LoginValidationError::EmptyEmail => Error::invalid_request("Email is required")
            .with_details(json!({ "field": "email", "code": "empty_email" })),
        LoginValidationError::EmptyPassword => Error::invalid_request("Password is required")
            .with_details(json!({ "field": "password", "code": "empty_password" })),
    }
}

/// Exchange credentials for a bearer token.
#[post("/auth/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<Envelope<AuthSession>>> {
    let credentials = LoginCredentials::try_from(payload.into_inner())
        .map_err(|err| map_login_validation_error(&err))?;
    let session = state.authenticator.login(&credentials).await?;
    info!(user_id = %session.user.id, "login succeeded");
    Ok(web::Json(Envelope::ok(LOGIN_SUCCESSFUL, session)))
}

/// The user owning the bearer token.
#[get("/auth/me")]
pub async fn current_user(
    Authenticated(user): Authenticated,
) -> web::Json<Envelope<User>> {
    debug!(user_id = %user.id, "resolved current user");
    web::Json(Envelope::ok(USER_RETRIEVED, user))
}
