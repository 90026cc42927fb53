//! Driven port over the customer store.

use async_trait::async_trait;
use pagination::Page;

use crate::domain::{Customer, CustomerDraft, CustomerQuery, CustomerStats, Error};

/// Store of customer records.
///
/// Implementations filter, sort, and page before returning, and derive each
/// customer's investment summary from the investments they hold.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// One page of customers matching `query`.
    async fn list(&self, query: &CustomerQuery) -> Result<Page<Customer>, Error>;

    /// Customer by `_id`; [`crate::domain::ErrorCode::NotFound`] when absent.
    async fn get(&self, id: &str) -> Result<Customer, Error>;

    /// Insert a customer, assigning its identifiers and timestamps.
    async fn create(&self, draft: &CustomerDraft) -> Result<Customer, Error>;

    /// Overwrite the editable fields of an existing customer.
    async fn update(&self, id: &str, draft: &CustomerDraft) -> Result<Customer, Error>;

    /// Remove a customer.
    async fn delete(&self, id: &str) -> Result<(), Error>;

    /// Headline counts.
    async fn stats(&self) -> Result<CustomerStats, Error>;
}
