//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Repository ports return [`crate::domain::Error`] and are implemented by
//! the in-memory store. Service ports return envelopes and are implemented
//! by the envelope services in [`crate::domain`] and by the HTTP client
//! adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod auth_service;
mod authenticator;
mod customer_repository;
mod customer_service;
mod dropdown_repository;
mod dropdown_service;
mod investment_repository;
mod investment_service;
mod notification_repository;
mod notification_service;
mod session_storage;
mod unauthorized_handler;

pub use auth_service::AuthService;
#[cfg(test)]
pub use auth_service::MockAuthService;
pub use authenticator::Authenticator;
#[cfg(test)]
pub use authenticator::MockAuthenticator;
pub use customer_repository::CustomerRepository;
#[cfg(test)]
pub use customer_repository::MockCustomerRepository;
pub use customer_service::CustomerService;
#[cfg(test)]
pub use customer_service::MockCustomerService;
pub use dropdown_repository::DropdownRepository;
#[cfg(test)]
pub use dropdown_repository::MockDropdownRepository;
pub use dropdown_service::DropdownService;
#[cfg(test)]
pub use dropdown_service::MockDropdownService;
pub use investment_repository::InvestmentRepository;
#[cfg(test)]
pub use investment_repository::MockInvestmentRepository;
pub use investment_service::InvestmentService;
#[cfg(test)]
pub use investment_service::MockInvestmentService;
#[cfg(test)]
pub use notification_repository::MockNotificationRepository;
pub use notification_repository::NotificationRepository;
#[cfg(test)]
pub use notification_service::MockNotificationService;
pub use notification_service::NotificationService;
#[cfg(test)]
pub use session_storage::MockSessionStorage;
pub use session_storage::{SessionStorage, SessionStorageError, TOKEN_KEY, USER_KEY};
#[cfg(test)]
pub use unauthorized_handler::MockUnauthorizedHandler;
pub use unauthorized_handler::UnauthorizedHandler;
