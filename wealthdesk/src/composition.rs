//! Composition root: picks one adapter set and wires it behind the ports.
//!
//! The choice between in-memory and REST services is made here, once. Page
//! controllers and the auth store only ever see the port traits.

use std::sync::Arc;

use example_data::SeedRegistry;
use mockable::{Clock, DefaultClock};
use tracing::info;

use crate::config::{AppSettings, BackendKind, ConfigError};
use crate::domain::ports::{
    AuthService, Authenticator, CustomerRepository, CustomerService, DropdownService,
    InvestmentRepository, InvestmentService, NotificationService, SessionStorage,
    SessionStorageError, UnauthorizedHandler,
};
use crate::domain::{
    AuthEnvelopeService, CustomerEnvelopeService, DropdownEnvelopeService,
    InvestmentEnvelopeService, InvestmentType, NotificationEnvelopeService,
};
use crate::inbound::http::HttpState;
use crate::outbound::http::{
    ApiClient, HttpAuthService, HttpCustomerService, HttpDropdownService, HttpInvestmentService,
    HttpNotificationService,
};
use crate::outbound::memory::{FixtureAuthenticator, Latency, MemoryLedger, StaticDropdowns};
use crate::outbound::storage::{FileSessionStorage, MemorySessionStorage};
use crate::pages::{CustomersPage, DashboardPage, InvestmentsPage, NotificationsPage};
use crate::session::{AuthStore, Navigator};

/// Failures while assembling the service graph.
#[derive(Debug, thiserror::Error)]
pub enum CompositionError {
    /// A setting was invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The seed registry could not be loaded or the seed generated.
    #[error("failed to seed mock data: {0}")]
    Seed(String),
    /// The session file could not be opened.
    #[error(transparent)]
    Storage(#[from] SessionStorageError),
    /// The HTTP client could not be built.
    #[error("failed to build HTTP client: {0}")]
    Client(String),
}

/// One implementation per service port.
#[derive(Clone)]
pub struct PortSet {
    /// Customer CRUD and statistics.
    pub customers: Arc<dyn CustomerService>,
    /// Investment CRUD and statistics.
    pub investments: Arc<dyn InvestmentService>,
    /// Notification list and read state.
    pub notifications: Arc<dyn NotificationService>,
    /// Form choice lists.
    pub dropdowns: Arc<dyn DropdownService>,
    /// Login and token resolution.
    pub auth: Arc<dyn AuthService>,
}

/// Seeded in-memory store plus the authenticator guarding it.
#[derive(Clone)]
pub struct MemoryBackend {
    ledger: MemoryLedger,
    dropdowns: StaticDropdowns,
    authenticator: Arc<FixtureAuthenticator>,
}

impl MemoryBackend {
    /// Seed the store named by `settings`.
    ///
    /// # Errors
    /// Returns [`CompositionError::Seed`] when the registry or seed is
    /// unusable.
    pub fn from_settings(
        settings: &AppSettings,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, CompositionError> {
        let registry = match settings.registry_path() {
            Some(path) => SeedRegistry::from_file(path),
            None => SeedRegistry::builtin(),
        }
        .map_err(|err| CompositionError::Seed(err.to_string()))?;
        let latency = Latency::new(settings.latency(), settings.latency_jitter());
        let ledger = MemoryLedger::seeded(&registry, settings.seed_name(), Arc::clone(&clock), latency)
            .map_err(|err| CompositionError::Seed(err.message().to_owned()))?;
        Ok(Self {
            ledger,
            dropdowns: StaticDropdowns::new(latency),
            authenticator: Arc::new(FixtureAuthenticator::new(clock.as_ref(), latency)),
        })
    }

    /// Backend over `ledger` with no simulated latency on auth or dropdowns.
    pub fn with_ledger(ledger: MemoryLedger, clock: &dyn Clock) -> Self {
        Self {
            ledger,
            dropdowns: StaticDropdowns::new(Latency::NONE),
            authenticator: Arc::new(FixtureAuthenticator::new(clock, Latency::NONE)),
        }
    }

    /// Token validation for the REST surface.
    pub fn authenticator(&self) -> Arc<dyn Authenticator> {
        Arc::clone(&self.authenticator) as Arc<dyn Authenticator>
    }

    /// Repository ports for the mock REST server.
    pub fn http_state(&self) -> HttpState {
        let ledger = Arc::new(self.ledger.clone());
        HttpState {
            customers: Arc::clone(&ledger) as Arc<dyn CustomerRepository>,
            investments: Arc::clone(&ledger) as Arc<dyn InvestmentRepository>,
            notifications: ledger,
            dropdowns: Arc::new(self.dropdowns),
            authenticator: self.authenticator(),
        }
    }

    /// Envelope services over the store.
    pub fn ports(&self) -> PortSet {
        let ledger = Arc::new(self.ledger.clone());
        PortSet {
            customers: Arc::new(CustomerEnvelopeService::new(Arc::clone(&ledger))),
            investments: Arc::new(InvestmentEnvelopeService::new(Arc::clone(&ledger))),
            notifications: Arc::new(NotificationEnvelopeService::new(ledger)),
            dropdowns: Arc::new(DropdownEnvelopeService::new(Arc::new(self.dropdowns))),
            auth: Arc::new(AuthEnvelopeService::new(Arc::clone(&self.authenticator))),
        }
    }
}

/// Everything a console front end needs: ports, session, and clock.
pub struct ServiceRegistry {
    ports: PortSet,
    store: Arc<AuthStore>,
    clock: Arc<dyn Clock>,
}

impl ServiceRegistry {
    /// Build the adapter set named by `settings`.
    ///
    /// With the HTTP backend the auth store is registered as the client's
    /// unauthorized handler.
    ///
    /// # Errors
    /// Returns a [`CompositionError`] for invalid settings, unusable seeds, an
    /// unopenable session file, or an HTTP client that cannot be built.
    pub fn from_settings(settings: &AppSettings) -> Result<Self, CompositionError> {
        let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
        let storage: Arc<dyn SessionStorage> = match settings.session_file()? {
            Some(path) => Arc::new(FileSessionStorage::open(&path)?),
            None => Arc::new(MemorySessionStorage::new()),
        };
        let backend = settings.backend()?;
        info!(%backend, "composing services");
        match backend {
            BackendKind::Memory => {
                let memory = MemoryBackend::from_settings(settings, Arc::clone(&clock))?;
                Ok(Self::assemble(memory.ports(), storage, clock))
            }
            BackendKind::Http => {
                let api = Arc::new(
                    ApiClient::new(
                        settings.api_base_url()?,
                        settings.request_timeout(),
                        Arc::clone(&storage),
                    )
                    .map_err(|err| CompositionError::Client(err.to_string()))?,
                );
                Ok(Self::over_http(&api, storage, clock))
            }
        }
    }

    /// Registry whose services call the REST backend behind `api`.
    ///
    /// The auth store becomes the client's unauthorized handler, so a
    /// rejected token signs the operator out.
    pub fn over_http(
        api: &Arc<ApiClient>,
        storage: Arc<dyn SessionStorage>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let registry = Self::assemble(http_ports(api), storage, clock);
        let handler: Arc<dyn UnauthorizedHandler> = registry.store.clone();
        api.set_unauthorized_handler(Arc::downgrade(&handler));
        registry
    }

    /// Registry over explicit ports, for tests and embedding.
    pub fn assemble(ports: PortSet, storage: Arc<dyn SessionStorage>, clock: Arc<dyn Clock>) -> Self {
        let store = Arc::new(AuthStore::new(
            Arc::clone(&ports.auth),
            storage,
            Navigator::default(),
        ));
        store.initialize();
        Self { ports, store, clock }
    }

    /// Service ports.
    pub fn ports(&self) -> &PortSet {
        &self.ports
    }

    /// Session store.
    pub fn store(&self) -> &Arc<AuthStore> {
        &self.store
    }

    /// Customers page wired to these services.
    pub fn customers_page(&self) -> CustomersPage {
        CustomersPage::new(Arc::clone(&self.ports.customers), Arc::clone(&self.clock))
    }

    /// SIP or lumpsum page wired to these services.
    pub fn investments_page(&self, investment_type: InvestmentType) -> InvestmentsPage {
        InvestmentsPage::new(
            investment_type,
            Arc::clone(&self.ports.investments),
            Arc::clone(&self.ports.customers),
            Arc::clone(&self.clock),
        )
    }

    /// Notifications page wired to these services.
    pub fn notifications_page(&self) -> NotificationsPage {
        NotificationsPage::new(Arc::clone(&self.ports.notifications), Arc::clone(&self.clock))
    }

    /// Dashboard wired to these services.
    pub fn dashboard_page(&self) -> DashboardPage {
        DashboardPage::new(Arc::clone(&self.ports.customers), Arc::clone(&self.ports.investments))
    }
}

fn http_ports(api: &Arc<ApiClient>) -> PortSet {
    PortSet {
        customers: Arc::new(HttpCustomerService::new(Arc::clone(api))),
        investments: Arc::new(HttpInvestmentService::new(Arc::clone(api))),
        notifications: Arc::new(HttpNotificationService::new(Arc::clone(api))),
        dropdowns: Arc::new(HttpDropdownService::new(Arc::clone(api))),
        auth: Arc::new(HttpAuthService::new(Arc::clone(api))),
    }
}
