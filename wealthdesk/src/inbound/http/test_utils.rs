//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::http::header::AUTHORIZATION;
use actix_web::{App, test as actix_test, web};
use example_data::SeedRegistry;
use mockable::{Clock, DefaultClock};
use pagination::Envelope;
use serde_json::json;

use super::health::HealthState;
use super::state::HttpState;
use crate::composition::MemoryBackend;
use crate::domain::AuthSession;
use crate::outbound::memory::{FIXTURE_EMAIL, FIXTURE_PASSWORD, Latency, MemoryLedger};
use crate::server::build_app;

/// Handler state over the small `quiet-quokka` seed with no latency.
pub fn test_state() -> HttpState {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let registry = SeedRegistry::builtin().expect("builtin registry");
    let ledger = MemoryLedger::seeded(&registry, "quiet-quokka", Arc::clone(&clock), Latency::NONE)
        .expect("seeded ledger");
    MemoryBackend::with_ledger(ledger, clock.as_ref()).http_state()
}

/// The server's app over [`test_state`], marked ready.
pub fn test_app() -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let health = web::Data::new(HealthState::new());
    health.mark_ready();
    build_app(health, web::Data::new(test_state()))
}

/// Log in with the fixture pair and return the bearer token.
pub async fn fixture_login(
    app: &impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    >,
) -> String {
    let request = actix_test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "email": FIXTURE_EMAIL, "password": FIXTURE_PASSWORD }))
        .to_request();
    let body: Envelope<AuthSession> = actix_test::call_and_read_body_json(app, request).await;
    body.data.expect("session").token
}

/// `Authorization: Bearer {token}` header pair.
pub fn bearer(token: &str) -> (actix_web::http::header::HeaderName, String) {
    (AUTHORIZATION, format!("Bearer {token}"))
}
