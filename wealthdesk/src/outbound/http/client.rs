//! Reqwest-backed REST client shared by the HTTP service adapters.
//!
//! The client owns transport details only: URL building, bearer-token
//! attachment, timeouts, status mapping, and JSON decoding. Every response
//! passes through [`ApiClient::execute`], which is where a rejected session
//! is detected.

use std::sync::{Arc, PoisonError, RwLock, Weak};
use std::time::Duration;

use reqwest::{Client, Method, StatusCode, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::domain::Error;
use crate::domain::ports::{
    SessionStorage, TOKEN_KEY, USER_KEY, UnauthorizedHandler, define_port_error,
};

define_port_error! {
    /// Failures raised while talking to the REST backend.
    pub enum ApiError {
        /// The request could not be sent or the response not received.
        Transport { message: String } => "transport failure: {message}",
        /// The request exceeded the client timeout.
        Timeout { message: String } => "request timed out: {message}",
        /// The backend answered with a non-success status.
        Status { status: u16, message: String } => "status {status}: {message}",
        /// The response body did not match the expected shape.
        Decode { message: String } => "invalid response body: {message}",
        /// The endpoint could not be built from the base URL.
        InvalidUrl { message: String } => "invalid endpoint: {message}",
    }
}

impl From<ApiError> for Error {
    fn from(value: ApiError) -> Self {
        match value {
            ApiError::Status { status, message } => match StatusCode::from_u16(status) {
                Ok(StatusCode::BAD_REQUEST) => Self::invalid_request(message),
                Ok(StatusCode::UNAUTHORIZED) => Self::unauthorized(message),
                Ok(StatusCode::NOT_FOUND) => Self::not_found(message),
                Ok(StatusCode::CONFLICT) => Self::conflict(message),
                _ => Self::internal(format!("status {status}: {message}")),
            },
            ApiError::Transport { message } | ApiError::Timeout { message } => {
                Self::service_unavailable(message)
            }
            ApiError::Decode { message } | ApiError::InvalidUrl { message } => {
                Self::internal(message)
            }
        }
    }
}

/// Which bearer token a request carries.
#[derive(Debug, Clone, Copy)]
pub(super) enum Bearer<'a> {
    /// The persisted session token, when one exists.
    Stored,
    /// An explicit token, used to validate one before it is persisted.
    Explicit(&'a str),
    /// No token, for the login call itself.
    Anonymous,
}

/// REST client rooted at one base URL.
pub struct ApiClient {
    client: Client,
    base: Url,
    storage: Arc<dyn SessionStorage>,
    on_unauthorized: RwLock<Option<Weak<dyn UnauthorizedHandler>>>,
}

impl ApiClient {
    /// Build a client with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(
        base: Url,
        timeout: Duration,
        storage: Arc<dyn SessionStorage>,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base,
            storage,
            on_unauthorized: RwLock::new(None),
        })
    }

    /// Register the party told about rejected sessions.
    ///
    /// The handler usually owns this client through its services, so only a
    /// weak reference is kept.
    pub fn set_unauthorized_handler(&self, handler: Weak<dyn UnauthorizedHandler>) {
        *self
            .on_unauthorized
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(handler);
    }

    /// Base URL every endpoint is resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Resolve `segments` below the base URL, percent-encoding each one.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidUrl`] when the base URL cannot carry a path.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| ApiError::invalid_url(format!("{} cannot be a base", self.base)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Send a request and decode the JSON response body.
    ///
    /// A 401 on a request that carried a token clears the persisted session
    /// and notifies the registered [`UnauthorizedHandler`] before the error
    /// is returned.
    pub(super) async fn execute<R, B>(
        &self,
        method: Method,
        url: Url,
        body: Option<&B>,
        bearer: Bearer<'_>,
    ) -> Result<R, ApiError>
    where
        R: DeserializeOwned,
        B: Serialize + ?Sized + Sync,
    {
        let token = match bearer {
            Bearer::Stored => self.stored_token(),
            Bearer::Explicit(token) => Some(token.to_owned()),
            Bearer::Anonymous => None,
        };
        debug!(%method, %url, authenticated = token.is_some(), "api request");

        let mut request = self
            .client
            .request(method, url)
            .header(reqwest::header::ACCEPT, "application/json");
        if let Some(token) = token.as_deref() {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(map_transport_error)?;
        let status = response.status();
        let bytes = response.bytes().await.map_err(map_transport_error)?;

        if status == StatusCode::UNAUTHORIZED && token.is_some() {
            self.reject_session();
        }
        if !status.is_success() {
            return Err(map_status_error(status, bytes.as_ref()));
        }
        serde_json::from_slice(bytes.as_ref()).map_err(|err| ApiError::decode(err.to_string()))
    }

    fn stored_token(&self) -> Option<String> {
        match self.storage.get(TOKEN_KEY) {
            Ok(token) => token.filter(|token| !token.trim().is_empty()),
            Err(err) => {
                warn!(error = %err, "could not read session token");
                None
            }
        }
    }

    fn reject_session(&self) {
        warn!("backend rejected the session token");
        for key in [TOKEN_KEY, USER_KEY] {
            if let Err(err) = self.storage.remove(key) {
                warn!(key, error = %err, "could not clear session state");
            }
        }
        let handler = self
            .on_unauthorized
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .and_then(Weak::upgrade);
        if let Some(handler) = handler {
            handler.session_rejected();
        }
    }
}

fn map_transport_error(error: reqwest::Error) -> ApiError {
    if error.is_timeout() {
        ApiError::timeout(error.to_string())
    } else {
        ApiError::transport(error.to_string())
    }
}

/// Prefer the failure envelope's message; fall back to a body preview.
fn map_status_error(status: StatusCode, body: &[u8]) -> ApiError {
    let message = serde_json::from_slice::<Value>(body)
        .ok()
        .and_then(|value| {
            value
                .get("message")
                .and_then(Value::as_str)
                .filter(|message| !message.trim().is_empty())
                .map(str::to_owned)
        })
        .unwrap_or_else(|| body_preview(body));
    ApiError::status(status.as_u16(), message)
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for non-network client helpers.
    use rstest::rstest;

    use super::*;
    use crate::domain::ErrorCode;
    use crate::outbound::storage::MemorySessionStorage;

    fn client(base: &str) -> ApiClient {
        ApiClient::new(
            Url::parse(base).expect("base url"),
            Duration::from_secs(1),
            Arc::new(MemorySessionStorage::new()),
        )
        .expect("client")
    }

    #[rstest]
    #[case("http://localhost:8000/api", &["customers"], "http://localhost:8000/api/customers")]
    #[case("http://localhost:8000/api/", &["customers", "cust-1"], "http://localhost:8000/api/customers/cust-1")]
    #[case("http://localhost:8000", &["dropdowns", "tax status"], "http://localhost:8000/dropdowns/tax%20status")]
    fn endpoints_join_below_the_base(
        #[case] base: &str,
        #[case] segments: &[&str],
        #[case] expected: &str,
    ) {
        let url = client(base).endpoint(segments).expect("endpoint");
        assert_eq!(url.as_str(), expected);
    }

    #[rstest]
    #[case::bad_request(StatusCode::BAD_REQUEST, ErrorCode::InvalidRequest)]
    #[case::unauthorised(StatusCode::UNAUTHORIZED, ErrorCode::Unauthorized)]
    #[case::not_found(StatusCode::NOT_FOUND, ErrorCode::NotFound)]
    #[case::server_error(StatusCode::INTERNAL_SERVER_ERROR, ErrorCode::InternalError)]
    fn statuses_map_to_domain_codes(#[case] status: StatusCode, #[case] expected: ErrorCode) {
        let error: Error = map_status_error(status, br#"{"success":false,"message":"nope"}"#).into();
        assert_eq!(error.code(), expected);
    }

    #[test]
    fn status_errors_keep_the_envelope_message() {
        let error = map_status_error(
            StatusCode::NOT_FOUND,
            br#"{"success":false,"message":"Customer not found"}"#,
        );
        assert_eq!(error, ApiError::status(404_u16, "Customer not found"));
    }

    #[test]
    fn non_json_bodies_are_previewed() {
        let long = "x ".repeat(200);
        let ApiError::Status { message, .. } =
            map_status_error(StatusCode::BAD_GATEWAY, long.as_bytes())
        else {
            panic!("expected status error");
        };
        assert!(message.ends_with("..."));
        assert_eq!(message.chars().count(), 163);
    }

    #[test]
    fn transport_failures_are_service_unavailable() {
        let error: Error = ApiError::transport("connection refused").into();
        assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
    }
}
