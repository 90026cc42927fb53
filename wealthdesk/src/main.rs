//! Mock API server entry-point: serves the REST surface from seeded
//! in-memory data.

use std::net::TcpListener;
use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use wealthdesk::composition::MemoryBackend;
use wealthdesk::config::AppSettings;
use wealthdesk::inbound::http::HealthState;
use wealthdesk::server::create_server;

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::from_args(std::env::args_os()).map_err(std::io::Error::other)?;
    let bind_addr = settings.bind_addr().map_err(std::io::Error::other)?;
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let backend = MemoryBackend::from_settings(&settings, clock).map_err(std::io::Error::other)?;

    let listener = TcpListener::bind(bind_addr)?;
    info!(addr = %listener.local_addr()?, seed = settings.seed_name(), "mock API listening");

    let health_state = web::Data::new(HealthState::new());
    create_server(health_state, backend.http_state(), listener)?.await
}
