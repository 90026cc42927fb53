//! Mock API server plus a console wired to it over HTTP.
//!
//! The harness owns a single-threaded Tokio runtime and a `LocalSet` because
//! Actix uses `spawn_local` internally. Dropping the [`WorldFixture`] stops
//! the server even when a step panics.

use std::cell::RefCell;
use std::net::TcpListener;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use actix_web::dev::ServerHandle;
use actix_web::{HttpServer, web};
use example_data::SeedRegistry;
use mockable::{Clock, DefaultClock};
use tokio::runtime::Runtime;
use tokio::task::LocalSet;
use url::Url;
use wealthdesk::composition::{MemoryBackend, ServiceRegistry};
use wealthdesk::domain::ports::SessionStorage;
use wealthdesk::inbound::http::{HealthState, HttpState};
use wealthdesk::outbound::http::ApiClient;
use wealthdesk::outbound::memory::{Latency, MemoryLedger};
use wealthdesk::outbound::storage::MemorySessionStorage;
use wealthdesk::pages::CustomersPage;
use wealthdesk::server::build_app;

/// Seed every suite runs against.
pub(crate) const SEED: &str = "quiet-quokka";

pub(crate) struct ConsoleWorld {
    pub(crate) runtime: Runtime,
    pub(crate) local: LocalSet,
    pub(crate) server: ServerHandle,
    /// Same ledger the server answers from, for checking side effects.
    pub(crate) backend: MemoryBackend,
    pub(crate) storage: Arc<MemorySessionStorage>,
    pub(crate) registry: ServiceRegistry,
    pub(crate) customers: Option<CustomersPage>,
    pub(crate) chosen: Option<String>,
    pub(crate) login_accepted: Option<bool>,
}

pub(crate) type SharedWorld = Rc<RefCell<ConsoleWorld>>;

pub(crate) struct WorldFixture {
    world: SharedWorld,
}

impl WorldFixture {
    pub(crate) fn world(&self) -> SharedWorld {
        self.world.clone()
    }
}

impl Drop for WorldFixture {
    fn drop(&mut self) {
        shutdown(&self.world);
    }
}

fn shutdown(world: &SharedWorld) {
    // `LocalSet` must be driven on the thread that owns it, so the world stays
    // borrowed during `block_on`. The future must not borrow the world.
    let ctx = world.borrow();
    let server = ctx.server.clone();
    ctx.local.block_on(&ctx.runtime, async move {
        server.stop(true).await;
    });
}

/// Drive `future` to completion while the server keeps serving.
pub(crate) fn run<R>(world: &SharedWorld, future: impl Future<Output = R>) -> R {
    let ctx = world.borrow();
    ctx.local.block_on(&ctx.runtime, future)
}

async fn spawn_server(http_state: HttpState) -> Result<(String, ServerHandle), String> {
    let listener = TcpListener::bind("127.0.0.1:0").map_err(|err| err.to_string())?;
    let addr = listener.local_addr().map_err(|err| err.to_string())?;

    let health = web::Data::new(HealthState::new());
    health.mark_ready();
    let http = web::Data::new(http_state);

    let server = HttpServer::new(move || build_app(health.clone(), http.clone()))
        .disable_signals()
        .workers(1)
        .listen(listener)
        .map_err(|err| err.to_string())?
        .run();

    let handle = server.handle();
    actix_web::rt::spawn(server);

    Ok((format!("http://{addr}"), handle))
}

fn seeded_backend(clock: &Arc<dyn Clock>) -> MemoryBackend {
    let registry = SeedRegistry::builtin().expect("builtin seed registry");
    let ledger = MemoryLedger::seeded(&registry, SEED, Arc::clone(clock), Latency::NONE)
        .expect("seeded ledger");
    MemoryBackend::with_ledger(ledger, clock.as_ref())
}

pub(crate) fn world() -> WorldFixture {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("tokio runtime");
    let local = LocalSet::new();

    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let backend = seeded_backend(&clock);
    let (base_url, server) = local
        .block_on(&runtime, spawn_server(backend.http_state()))
        .expect("server should start");

    let storage = Arc::new(MemorySessionStorage::new());
    let api_base = Url::parse(&format!("{base_url}/api/")).expect("api base url");
    let api = Arc::new(
        ApiClient::new(
            api_base,
            Duration::from_secs(5),
            Arc::clone(&storage) as Arc<dyn SessionStorage>,
        )
        .expect("http client"),
    );
    let registry = ServiceRegistry::over_http(
        &api,
        Arc::clone(&storage) as Arc<dyn SessionStorage>,
        clock,
    );

    WorldFixture {
        world: Rc::new(RefCell::new(ConsoleWorld {
            runtime,
            local,
            server,
            backend,
            storage,
            registry,
            customers: None,
            chosen: None,
            login_accepted: None,
        })),
    }
}
