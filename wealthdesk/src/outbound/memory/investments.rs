//! In-memory investment repository.

use std::collections::HashMap;

use async_trait::async_trait;
use pagination::{Page, SortDirection, paginate};
use serde_json::Value;

use super::ledger::{LedgerState, MemoryLedger, sort_and_page};
use super::seed::{investment_code, investment_id};
use crate::domain::messages::{CUSTOMER_NOT_FOUND, INVESTMENT_NOT_FOUND};
use crate::domain::ports::InvestmentRepository;
use crate::domain::{
    CUSTOMER_NAME_SORT, Error, Investment, InvestmentDraft, InvestmentQuery, InvestmentStats,
    compare_values, validate_investment,
};

fn check_customer(state: &LedgerState, customer_id: &str) -> Result<(), Error> {
    if state.customers.iter().any(|c| c.id == customer_id) {
        Ok(())
    } else {
        Err(Error::not_found(CUSTOMER_NOT_FOUND))
    }
}

/// `rows` ordered by their customer's full name, falling back to the raw id.
fn by_customer_name(
    state: &LedgerState,
    rows: Vec<Investment>,
    direction: SortDirection,
) -> Vec<Investment> {
    let names: HashMap<&str, String> = state
        .customers
        .iter()
        .map(|customer| (customer.id.as_str(), customer.full_name()))
        .collect();
    let mut keyed: Vec<(Value, Investment)> = rows
        .into_iter()
        .map(|inv| {
            let name = names
                .get(inv.customer_id.as_str())
                .cloned()
                .unwrap_or_else(|| inv.customer_id.clone());
            (Value::String(name), inv)
        })
        .collect();
    keyed.sort_by(|(a, _), (b, _)| direction.apply(compare_values(Some(a), Some(b))));
    keyed.into_iter().map(|(_, inv)| inv).collect()
}

#[async_trait]
impl InvestmentRepository for MemoryLedger {
    async fn list(&self, query: &InvestmentQuery) -> Result<Page<Investment>, Error> {
        self.latency.wait().await;
        let state = self.state.read().await;
        let matching: Vec<Investment> = state
            .investments
            .iter()
            .filter(|inv| query.filter.matches(inv))
            .cloned()
            .collect();
        match query.sort.as_ref() {
            Some(sort) if sort.field() == CUSTOMER_NAME_SORT => Ok(paginate(
                by_customer_name(&state, matching, sort.direction()),
                query.page,
            )),
            sort => sort_and_page(matching, sort, query.page),
        }
    }

    async fn get(&self, id: &str) -> Result<Investment, Error> {
        self.latency.wait().await;
        let state = self.state.read().await;
        state
            .investments
            .iter()
            .find(|inv| inv.id == id)
            .cloned()
            .ok_or_else(|| Error::not_found(INVESTMENT_NOT_FOUND))
    }

    async fn create(&self, draft: &InvestmentDraft) -> Result<Investment, Error> {
        self.latency.wait().await;
        validate_investment(draft).into_result()?;
        let now = self.now();
        let mut state = self.state.write().await;
        check_customer(&state, &draft.customer_id)?;
        let n = LedgerState::allocate(&mut state.next_investment);
        let investment =
            Investment::from_draft(investment_id(n), investment_code(n), draft.clone(), now);
        state.investments.push(investment.clone());
        Ok(investment)
    }

    async fn update(&self, id: &str, draft: &InvestmentDraft) -> Result<Investment, Error> {
        self.latency.wait().await;
        validate_investment(draft).into_result()?;
        let now = self.now();
        let mut state = self.state.write().await;
        check_customer(&state, &draft.customer_id)?;
        let investment = state
            .investments
            .iter_mut()
            .find(|inv| inv.id == id)
            .ok_or_else(|| Error::not_found(INVESTMENT_NOT_FOUND))?;
        investment.apply_draft(draft.clone(), now);
        Ok(investment.clone())
    }

    async fn delete(&self, id: &str) -> Result<(), Error> {
        self.latency.wait().await;
        let mut state = self.state.write().await;
        let before = state.investments.len();
        state.investments.retain(|inv| inv.id != id);
        if state.investments.len() == before {
            return Err(Error::not_found(INVESTMENT_NOT_FOUND));
        }
        Ok(())
    }

    async fn stats(&self) -> Result<InvestmentStats, Error> {
        self.latency.wait().await;
        let state = self.state.read().await;
        Ok(InvestmentStats::collect(&state.investments))
    }
}
