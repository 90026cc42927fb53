//! Driven port over the investment store.

use async_trait::async_trait;
use pagination::Page;

use crate::domain::{Error, Investment, InvestmentDraft, InvestmentQuery, InvestmentStats};

/// Store of investment records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InvestmentRepository: Send + Sync {
    /// One page of investments matching `query`.
    async fn list(&self, query: &InvestmentQuery) -> Result<Page<Investment>, Error>;

    /// Investment by `_id`.
    async fn get(&self, id: &str) -> Result<Investment, Error>;

    /// Insert an investment for an existing customer.
    async fn create(&self, draft: &InvestmentDraft) -> Result<Investment, Error>;

    /// Overwrite the editable fields of an existing investment.
    async fn update(&self, id: &str, draft: &InvestmentDraft) -> Result<Investment, Error>;

    /// Remove an investment.
    async fn delete(&self, id: &str) -> Result<(), Error>;

    /// Totals across every investment.
    async fn stats(&self) -> Result<InvestmentStats, Error>;
}
