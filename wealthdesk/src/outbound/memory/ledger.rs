//! Shared in-memory store behind every in-memory repository.
//!
//! Customers and investments live together so customer investment summaries
//! can be derived on read and deletes can cascade.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use example_data::{SeedRegistry, generate_example_book};
use mockable::Clock;
use pagination::{Page, PageRequest, Sort, paginate};
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::info;

use super::Latency;
use super::seed::{SeededRecords, records_from_book};
use crate::domain::{Customer, Error, Investment, InvestmentType, Notification, sort_records};

#[derive(Debug, Default)]
pub(super) struct LedgerState {
    pub(super) customers: Vec<Customer>,
    pub(super) investments: Vec<Investment>,
    pub(super) notifications: Vec<Notification>,
    pub(super) next_customer: u64,
    pub(super) next_investment: u64,
    pub(super) next_notification: u64,
}

impl LedgerState {
    fn from_records(records: SeededRecords) -> Self {
        let next = |len: usize| u64::try_from(len).unwrap_or(u64::MAX).saturating_add(1);
        Self {
            next_customer: next(records.customers.len()),
            next_investment: next(records.investments.len()),
            next_notification: next(records.notifications.len()),
            customers: records.customers,
            investments: records.investments,
            notifications: records.notifications,
        }
    }

    /// Allocate the next sequence number from `counter`.
    pub(super) fn allocate(counter: &mut u64) -> u64 {
        let n = *counter;
        *counter = counter.saturating_add(1);
        n
    }

    /// `customer` with its investment summary filled in.
    pub(super) fn summarised(&self, customer: &Customer) -> Customer {
        let mut out = customer.clone();
        let (sip, lumpsum, total) = self
            .investments
            .iter()
            .filter(|inv| inv.customer_id == customer.id)
            .fold((0_u32, 0_u32, 0_u64), |(sip, lumpsum, total), inv| {
                let total = total.saturating_add(inv.amount);
                match inv.investment_type {
                    InvestmentType::Sip => (sip.saturating_add(1), lumpsum, total),
                    InvestmentType::Lumpsum => (sip, lumpsum.saturating_add(1), total),
                }
            });
        out.sip_investments = sip;
        out.lumpsum_investments = lumpsum;
        out.total_investment = total;
        out
    }
}

/// In-memory customer, investment, and notification store.
///
/// Clones share the same state.
#[derive(Clone)]
pub struct MemoryLedger {
    pub(super) state: Arc<RwLock<LedgerState>>,
    pub(super) clock: Arc<dyn Clock>,
    pub(super) latency: Latency,
}

impl MemoryLedger {
    /// Empty ledger.
    pub fn empty(clock: Arc<dyn Clock>, latency: Latency) -> Self {
        Self::with_records(SeededRecords::default(), clock, latency)
    }

    /// Ledger preloaded with `records`.
    pub fn with_records(records: SeededRecords, clock: Arc<dyn Clock>, latency: Latency) -> Self {
        Self {
            state: Arc::new(RwLock::new(LedgerState::from_records(records))),
            clock,
            latency,
        }
    }

    /// Ledger preloaded from the named seed in `registry`.
    ///
    /// # Errors
    /// Returns an internal [`Error`] when the seed is unknown or generation
    /// fails.
    pub fn seeded(
        registry: &SeedRegistry,
        seed_name: &str,
        clock: Arc<dyn Clock>,
        latency: Latency,
    ) -> Result<Self, Error> {
        let seed = registry
            .find_seed(seed_name)
            .map_err(|err| Error::internal(err.to_string()))?;
        let book = generate_example_book(registry, seed)
            .map_err(|err| Error::internal(err.to_string()))?;
        let records = records_from_book(&book, clock.utc())?;
        info!(
            seed = seed_name,
            customers = records.customers.len(),
            investments = records.investments.len(),
            notifications = records.notifications.len(),
            "seeded in-memory ledger"
        );
        Ok(Self::with_records(records, clock, latency))
    }

    pub(super) fn now(&self) -> DateTime<Utc> {
        self.clock.utc()
    }
}

/// Sort (when requested) then slice, the order every list call follows.
pub(super) fn sort_and_page<T: Serialize>(
    items: Vec<T>,
    sort: Option<&Sort>,
    page: PageRequest,
) -> Result<Page<T>, Error> {
    let sorted = match sort {
        Some(sort) => sort_records(items, sort)
            .map_err(|err| Error::internal(format!("failed to sort records: {err}")))?,
        None => items,
    };
    Ok(paginate(sorted, page))
}
