//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep the domain error type HTTP-agnostic while letting Actix
//! handlers answer every failure with a status code and the failure
//! envelope clients already understand.

use actix_web::error::{JsonPayloadError, QueryPayloadError};
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, ResponseError};
use serde::Serialize;
use serde_json::Value;

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

const INTERNAL_MESSAGE: &str = "Internal server error";

/// `{ success: false, message }` plus the diagnostic fields clients may
/// ignore.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FailureBody<'a> {
    success: bool,
    message: &'a str,
    code: ErrorCode,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<&'a Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    trace_id: Option<&'a str>,
}

impl<'a> FailureBody<'a> {
    fn from_error(error: &'a Error) -> Self {
        let internal = matches!(error.code(), ErrorCode::InternalError);
        Self {
            success: false,
            message: if internal {
                INTERNAL_MESSAGE
            } else {
                error.message()
            },
            code: error.code(),
            details: if internal { None } else { error.details() },
            trace_id: error.trace_id(),
        }
    }
}

const fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }
        builder.json(FailureBody::from_error(self))
    }
}

/// Report malformed JSON bodies as failure envelopes.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    Error::invalid_request(format!("Invalid request body: {err}")).into()
}

/// Report malformed query strings as failure envelopes.
pub fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    Error::invalid_request(format!("Invalid query string: {err}")).into()
}

#[cfg(test)]
mod tests {
    //! Status mapping and body shape.
    use actix_web::body::to_bytes;
    use rstest::rstest;
    use serde_json::json;

    use super::*;
    use crate::domain::TraceId;

    async fn body_of(error: &Error) -> Value {
        let bytes = to_bytes(error.error_response().into_body())
            .await
            .expect("body bytes");
        serde_json::from_slice(&bytes).expect("json body")
    }

    #[rstest]
    #[case(ErrorCode::InvalidRequest, StatusCode::BAD_REQUEST)]
    #[case(ErrorCode::Unauthorized, StatusCode::UNAUTHORIZED)]
    #[case(ErrorCode::NotFound, StatusCode::NOT_FOUND)]
    #[case(ErrorCode::Conflict, StatusCode::CONFLICT)]
    #[case(ErrorCode::ServiceUnavailable, StatusCode::SERVICE_UNAVAILABLE)]
    #[case(ErrorCode::InternalError, StatusCode::INTERNAL_SERVER_ERROR)]
    fn codes_map_to_statuses(#[case] code: ErrorCode, #[case] expected: StatusCode) {
        assert_eq!(Error::new(code, "boom").status_code(), expected);
    }

    #[actix_web::test]
    async fn body_is_a_failure_envelope() {
        let error = Error::invalid_request("Email is required")
            .with_details(json!({ "field": "email" }));
        assert_eq!(
            body_of(&error).await,
            json!({
                "success": false,
                "message": "Email is required",
                "code": "invalid_request",
                "details": { "field": "email" },
            })
        );
    }

    #[actix_web::test]
    async fn internal_errors_are_redacted() {
        let error = Error::internal("lock poisoned at ledger.rs").with_details(json!({ "x": 1 }));
        let body = body_of(&error).await;
        assert_eq!(body.get("message"), Some(&json!(INTERNAL_MESSAGE)));
        assert!(body.get("details").is_none());
    }

    #[actix_web::test]
    async fn trace_id_is_echoed_in_header() {
        let trace_id = TraceId::generate();
        let error = TraceId::scope(trace_id, async { Error::not_found("Customer not found") }).await;
        let response = error.error_response();
        let header = response
            .headers()
            .get(TRACE_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        assert_eq!(header, Some(trace_id.to_string()));
    }
}
