//! Mock API server construction.
//!
//! Shared by the `wealthdesk` binary and the integration tests, which bind
//! an ephemeral port and drive the HTTP service adapters against it.

use std::net::TcpListener;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use crate::inbound::http::routes::configure;
use crate::inbound::http::{HealthState, HttpState};
use crate::middleware::Trace;

/// Application with the full route table behind [`Trace`].
pub fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .wrap(Trace)
        .app_data(health_state)
        .app_data(http_state)
        .configure(configure)
}

/// Start serving `http_state` on `listener` and mark `health_state` ready.
///
/// # Errors
/// Returns [`std::io::Error`] when the listener cannot be adopted.
pub fn create_server(
    health_state: web::Data<HealthState>,
    http_state: HttpState,
    listener: TcpListener,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = web::Data::new(http_state);
    let server = HttpServer::new(move || {
        build_app(server_health_state.clone(), http_state.clone())
    })
    .listen(listener)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
