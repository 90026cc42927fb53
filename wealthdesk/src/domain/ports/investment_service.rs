//! Driving port for investment screens.

use async_trait::async_trait;
use pagination::{Envelope, ListEnvelope};

use crate::domain::{Investment, InvestmentDraft, InvestmentQuery, InvestmentStats};

/// Investment use-cases consumed by page controllers.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InvestmentService: Send + Sync {
    /// Filtered, sorted page of investments.
    async fn list(&self, query: &InvestmentQuery) -> ListEnvelope<Investment>;

    /// One investment by `_id`.
    async fn get(&self, id: &str) -> Envelope<Investment>;

    /// Create an investment from a validated draft.
    async fn create(&self, draft: &InvestmentDraft) -> Envelope<Investment>;

    /// Update an investment from a validated draft.
    async fn update(&self, id: &str, draft: &InvestmentDraft) -> Envelope<Investment>;

    /// Delete an investment.
    async fn delete(&self, id: &str) -> Envelope<()>;

    /// Dashboard totals.
    async fn stats(&self) -> Envelope<InvestmentStats>;
}
