//! Dashboard headline figures and recent registrations.

use std::sync::Arc;

use pagination::{PageRequest, Sort, SortDirection};
use serde::Serialize;
use tokio::join;
use tracing::warn;

use crate::domain::ports::{CustomerService, InvestmentService};
use crate::domain::{Customer, CustomerFilter, CustomerQuery, CustomerStats, InvestmentStats};
use crate::view::format_inr;

/// Registrations listed under the headline cards.
pub const RECENT_CUSTOMERS: u32 = 5;

const NO_RECENT: &str = "No recent customer registrations found.";

/// One headline figure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatCard {
    /// Caption.
    pub label: &'static str,
    /// Figure as shown.
    pub value: String,
}

/// One slice of the SIP/lumpsum split.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationSlice {
    /// Product name.
    pub label: &'static str,
    /// Total in whole rupees.
    pub amount: u64,
    /// `amount` formatted as rupees.
    pub display: String,
}

/// One recent registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentCustomer {
    /// `first last`.
    pub name: String,
    /// Email address.
    pub email: String,
    /// `Registered on 05 Jan 2024`.
    pub registered: String,
}

/// Dashboard render model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    /// Whether figures are being fetched.
    pub loading: bool,
    /// Headline cards.
    pub cards: Vec<StatCard>,
    /// SIP and lumpsum totals.
    pub allocation: Vec<AllocationSlice>,
    /// Newest registrations.
    pub recent: Vec<RecentCustomer>,
    /// Text when there are no registrations.
    pub empty_message: Option<&'static str>,
}

/// Dashboard controller.
pub struct DashboardPage {
    customers: Arc<dyn CustomerService>,
    investments: Arc<dyn InvestmentService>,
    loading: bool,
    customer_stats: CustomerStats,
    investment_stats: InvestmentStats,
    recent: Vec<Customer>,
}

impl DashboardPage {
    /// Dashboard with zeroed figures.
    pub fn new(customers: Arc<dyn CustomerService>, investments: Arc<dyn InvestmentService>) -> Self {
        Self {
            customers,
            investments,
            loading: false,
            customer_stats: CustomerStats::default(),
            investment_stats: InvestmentStats::default(),
            recent: Vec::new(),
        }
    }

    /// Fetch all figures concurrently. Failed sections keep their last value.
    pub async fn refresh(&mut self) {
        self.loading = true;
        let recent_query = recent_query();
        let (customer_stats, investment_stats, recent) = join!(
            self.customers.stats(),
            self.investments.stats(),
            self.customers.list(&recent_query),
        );
        match customer_stats.into_result() {
            Ok(stats) => self.customer_stats = stats.unwrap_or_default(),
            Err(message) => warn!(%message, "customer stats unavailable"),
        }
        match investment_stats.into_result() {
            Ok(stats) => self.investment_stats = stats.unwrap_or_default(),
            Err(message) => warn!(%message, "investment stats unavailable"),
        }
        if recent.success {
            self.recent = recent.data;
        } else {
            warn!(message = %recent.message, "recent customers unavailable");
        }
        self.loading = false;
    }

    /// Latest customer figures.
    pub fn customer_stats(&self) -> CustomerStats {
        self.customer_stats
    }

    /// Latest investment figures.
    pub fn investment_stats(&self) -> InvestmentStats {
        self.investment_stats
    }

    /// Render model.
    pub fn view(&self) -> DashboardView {
        let cards = vec![
            StatCard {
                label: "Total Customers",
                value: self.customer_stats.total.to_string(),
            },
            StatCard {
                label: "Total Investments",
                value: self.investment_stats.total_investments.to_string(),
            },
            StatCard {
                label: "Active Investments",
                value: self.investment_stats.active_investments.to_string(),
            },
            StatCard {
                label: "New Customers (This Month)",
                value: self.customer_stats.new_this_month.to_string(),
            },
        ];
        let allocation = [
            ("SIP", self.investment_stats.total_sip_amount),
            ("Lumpsum", self.investment_stats.total_lumpsum_amount),
        ]
        .into_iter()
        .map(|(label, amount)| AllocationSlice {
            label,
            amount,
            display: format_inr(amount),
        })
        .collect();
        let recent = self
            .recent
            .iter()
            .map(|customer| RecentCustomer {
                name: customer.full_name(),
                email: customer.email.clone(),
                registered: format!("Registered on {}", customer.created_at.format("%d %b %Y")),
            })
            .collect();
        DashboardView {
            loading: self.loading,
            cards,
            allocation,
            recent,
            empty_message: self.recent.is_empty().then_some(NO_RECENT),
        }
    }
}

fn recent_query() -> CustomerQuery {
    let page = PageRequest::new(0, RECENT_CUSTOMERS).unwrap_or_default();
    CustomerQuery::new(page, CustomerFilter::default())
        .with_sort(Sort::new("createdAt", SortDirection::Desc).ok())
}
