//! In-memory customer repository.

use async_trait::async_trait;
use chrono::Datelike;
use pagination::Page;
use tracing::debug;

use super::ledger::{LedgerState, MemoryLedger, sort_and_page};
use super::seed::{customer_code, customer_id};
use crate::domain::messages::CUSTOMER_NOT_FOUND;
use crate::domain::ports::CustomerRepository;
use crate::domain::{
    Customer, CustomerDraft, CustomerQuery, CustomerStats, CustomerStatus, Error,
    validate_customer,
};

#[async_trait]
impl CustomerRepository for MemoryLedger {
    async fn list(&self, query: &CustomerQuery) -> Result<Page<Customer>, Error> {
        self.latency.wait().await;
        let state = self.state.read().await;
        let matching: Vec<Customer> = state
            .customers
            .iter()
            .map(|customer| state.summarised(customer))
            .filter(|customer| query.filter.matches(customer))
            .collect();
        debug!(matched = matching.len(), "listed customers");
        sort_and_page(matching, query.sort.as_ref(), query.page)
    }

    async fn get(&self, id: &str) -> Result<Customer, Error> {
        self.latency.wait().await;
        let state = self.state.read().await;
        state
            .customers
            .iter()
            .find(|customer| customer.id == id)
            .map(|customer| state.summarised(customer))
            .ok_or_else(|| Error::not_found(CUSTOMER_NOT_FOUND))
    }

    async fn create(&self, draft: &CustomerDraft) -> Result<Customer, Error> {
        self.latency.wait().await;
        validate_customer(draft).into_result()?;
        let now = self.now();
        let mut state = self.state.write().await;
        let n = LedgerState::allocate(&mut state.next_customer);
        let customer = Customer::from_draft(customer_id(n), customer_code(n), draft.clone(), now);
        state.customers.push(customer.clone());
        debug!(id = %customer.id, "created customer");
        Ok(customer)
    }

    async fn update(&self, id: &str, draft: &CustomerDraft) -> Result<Customer, Error> {
        self.latency.wait().await;
        validate_customer(draft).into_result()?;
        let now = self.now();
        let mut state = self.state.write().await;
        let customer = state
            .customers
            .iter_mut()
            .find(|customer| customer.id == id)
            .ok_or_else(|| Error::not_found(CUSTOMER_NOT_FOUND))?;
        customer.apply_draft(draft.clone(), now);
        let updated = customer.clone();
        Ok(state.summarised(&updated))
    }

    async fn delete(&self, id: &str) -> Result<(), Error> {
        self.latency.wait().await;
        let mut state = self.state.write().await;
        let before = state.customers.len();
        state.customers.retain(|customer| customer.id != id);
        if state.customers.len() == before {
            return Err(Error::not_found(CUSTOMER_NOT_FOUND));
        }
        state.investments.retain(|inv| inv.customer_id != id);
        debug!(id, "deleted customer and their investments");
        Ok(())
    }

    async fn stats(&self) -> Result<CustomerStats, Error> {
        self.latency.wait().await;
        let now = self.now();
        let state = self.state.read().await;
        let count = |pred: &dyn Fn(&Customer) -> bool| {
            u64::try_from(state.customers.iter().filter(|c| pred(c)).count()).unwrap_or(u64::MAX)
        };
        Ok(CustomerStats {
            total: count(&|_| true),
            active: count(&|c| c.status == CustomerStatus::Active),
            new_this_month: count(&|c| {
                c.created_at.year() == now.year() && c.created_at.month() == now.month()
            }),
        })
    }
}
