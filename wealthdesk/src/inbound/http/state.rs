//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they depend only
//! on repository ports and stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    Authenticator, CustomerRepository, DropdownRepository, InvestmentRepository,
    NotificationRepository,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Customer records.
    pub customers: Arc<dyn CustomerRepository>,
    /// Investment records.
    pub investments: Arc<dyn InvestmentRepository>,
    /// Notification records.
    pub notifications: Arc<dyn NotificationRepository>,
    /// Form choice lists.
    pub dropdowns: Arc<dyn DropdownRepository>,
    /// Credential checks and bearer-token resolution.
    pub authenticator: Arc<dyn Authenticator>,
}
