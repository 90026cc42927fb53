//! HTTP service adapters for a generic REST backend.
//!
//! Each adapter implements one driving service port by calling the REST
//! surface through a shared [`ApiClient`]. The backend already answers with
//! envelopes, so successful bodies pass through untouched; transport, status,
//! and decode failures fold into `success: false` envelopes here.

mod auth;
mod client;
mod customers;
mod dropdowns;
mod investments;
mod notifications;

use pagination::{Envelope, ListEnvelope};

pub use auth::HttpAuthService;
pub use client::{ApiClient, ApiError};
pub use customers::HttpCustomerService;
pub use dropdowns::HttpDropdownService;
pub use investments::HttpInvestmentService;
pub use notifications::HttpNotificationService;

use crate::domain::services::failure_message;

fn folded<T>(result: Result<Envelope<T>, ApiError>, generic: &str) -> Envelope<T> {
    result.unwrap_or_else(|err| Envelope::failure(failure_message(&err.into(), generic)))
}

fn folded_list<T>(result: Result<ListEnvelope<T>, ApiError>, generic: &str) -> ListEnvelope<T> {
    result.unwrap_or_else(|err| ListEnvelope::failure(failure_message(&err.into(), generic)))
}
