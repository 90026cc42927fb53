//! Driving port for customer screens.
//!
//! Every call resolves to an envelope. Adapters fold transport, decode, and
//! status failures into `success: false` so callers never see raw errors.

use async_trait::async_trait;
use pagination::{Envelope, ListEnvelope};

use crate::domain::{Customer, CustomerDraft, CustomerQuery, CustomerStats};

/// Customer use-cases consumed by page controllers.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CustomerService: Send + Sync {
    /// Filtered, sorted page of customers.
    async fn list(&self, query: &CustomerQuery) -> ListEnvelope<Customer>;

    /// One customer by `_id`.
    async fn get(&self, id: &str) -> Envelope<Customer>;

    /// Create a customer from a validated draft.
    async fn create(&self, draft: &CustomerDraft) -> Envelope<Customer>;

    /// Update a customer from a validated draft.
    async fn update(&self, id: &str, draft: &CustomerDraft) -> Envelope<Customer>;

    /// Delete a customer.
    async fn delete(&self, id: &str) -> Envelope<()>;

    /// Dashboard counts.
    async fn stats(&self) -> Envelope<CustomerStats>;
}
