//! Read-only detail panel.

use serde::Serialize;

use super::format::{format_date, format_inr, or_not_available};
use crate::domain::{Customer, Investment, InvestmentType};

/// One labelled value in a detail section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailField {
    /// Field label.
    pub label: &'static str,
    /// Display value, `N/A` when missing.
    pub value: String,
}

impl DetailField {
    fn new(label: &'static str, value: Option<impl Into<String>>) -> Self {
        Self {
            label,
            value: or_not_available(value),
        }
    }
}

/// A titled group of fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailSection {
    /// Section heading.
    pub title: &'static str,
    /// Fields in display order.
    pub fields: Vec<DetailField>,
}

/// A record the detail panel can read out.
pub trait DetailRecord {
    /// Lowercase noun used in the no-data message, for example `customer`.
    const NOUN: &'static str;

    /// Panel heading.
    fn heading(&self) -> String;

    /// Fields grouped as identity, contact, status, and financial summary.
    fn sections(&self) -> Vec<DetailSection>;
}

impl DetailRecord for Customer {
    const NOUN: &'static str = "customer";

    fn heading(&self) -> String {
        self.full_name()
    }

    fn sections(&self) -> Vec<DetailSection> {
        vec![
            DetailSection {
                title: "Identity",
                fields: vec![
                    DetailField::new("Customer Code", Some(self.customer_code.as_str())),
                    DetailField::new("Name", Some(self.full_name())),
                    DetailField::new("Date of Birth", self.date_of_birth.map(format_date)),
                    DetailField::new("Gender", self.gender.map(|g| g.as_str())),
                    DetailField::new("PAN Number", self.pan_number.as_deref()),
                ],
            },
            DetailSection {
                title: "Contact Information",
                fields: vec![
                    DetailField::new("Email", Some(self.email.as_str())),
                    DetailField::new("Mobile", Some(self.mobile.as_str())),
                    DetailField::new("Location", self.location()),
                ],
            },
            DetailSection {
                title: "Account Status",
                fields: vec![
                    DetailField::new("Status", Some(self.status.as_str())),
                    DetailField::new("KYC Status", self.kyc_status.as_deref()),
                    DetailField::new("Account Type", self.account_type.as_deref()),
                    DetailField::new("Tax Status", self.tax_status.as_deref()),
                    DetailField::new("Occupation", self.occupation.as_deref()),
                ],
            },
            DetailSection {
                title: "Investment Summary",
                fields: vec![
                    DetailField::new("SIP Investments", Some(self.sip_investments.to_string())),
                    DetailField::new(
                        "Lumpsum Investments",
                        Some(self.lumpsum_investments.to_string()),
                    ),
                    DetailField::new("Total Investment", Some(format_inr(self.total_investment))),
                    DetailField::new(
                        "Customer Since",
                        Some(format_date(self.created_at.date_naive())),
                    ),
                ],
            },
        ]
    }
}

impl DetailRecord for Investment {
    const NOUN: &'static str = "investment";

    fn heading(&self) -> String {
        let kind = match self.investment_type {
            InvestmentType::Sip => "SIP",
            InvestmentType::Lumpsum => "Lumpsum",
        };
        format!("{kind} Investment {}", self.investment_id)
    }

    fn sections(&self) -> Vec<DetailSection> {
        vec![
            DetailSection {
                title: "Identity",
                fields: vec![
                    DetailField::new("Investment ID", Some(self.investment_id.as_str())),
                    DetailField::new("Customer ID", Some(self.customer_id.as_str())),
                    DetailField::new("Type", Some(self.investment_type.as_str())),
                ],
            },
            DetailSection {
                title: "Schedule",
                fields: vec![
                    DetailField::new("Start Date", Some(format_date(self.start_date))),
                    DetailField::new("End Date", self.end_date.map(format_date)),
                    DetailField::new("Frequency", self.frequency.map(|f| f.as_str())),
                    DetailField::new(
                        "Duration",
                        self.duration.map(|months| format!("{months} months")),
                    ),
                ],
            },
            DetailSection {
                title: "Status",
                fields: vec![DetailField::new("Status", Some(self.status.as_str()))],
            },
            DetailSection {
                title: "Financial Summary",
                fields: vec![DetailField::new("Amount", Some(format_inr(self.amount)))],
            },
        ]
    }
}

/// Detail panel render model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum DetailView {
    /// The panel is not shown.
    Closed,
    /// Spinner.
    Loading,
    /// The record could not be loaded.
    NoData {
        /// Text to show.
        message: String,
    },
    /// A structured read-out.
    Record {
        /// Heading.
        heading: String,
        /// Grouped fields.
        sections: Vec<DetailSection>,
    },
}

/// Side panel showing one record read-only.
#[derive(Debug, Clone)]
pub struct DetailPanel<T> {
    open: bool,
    loading: bool,
    record: Option<T>,
}

impl<T> Default for DetailPanel<T> {
    fn default() -> Self {
        Self {
            open: false,
            loading: false,
            record: None,
        }
    }
}

impl<T: DetailRecord> DetailPanel<T> {
    /// Closed panel.
    pub fn new() -> Self {
        Self::default()
    }

    /// Show the panel without changing its content.
    pub fn open(&mut self) {
        self.open = true;
    }

    /// Open the panel in its loading state, dropping any previous record.
    pub fn begin_loading(&mut self) {
        self.open = true;
        self.loading = true;
        self.record = None;
    }

    /// Finish loading with `record`; `None` shows the no-data message.
    pub fn show(&mut self, record: Option<T>) {
        self.loading = false;
        self.record = record;
    }

    /// Hide the panel and forget the record.
    pub fn close(&mut self) {
        *self = Self::default();
    }

    /// Whether the panel is shown.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// The record on display.
    pub fn record(&self) -> Option<&T> {
        self.record.as_ref()
    }

    /// Render model for the current state.
    pub fn view(&self) -> DetailView {
        if !self.open {
            return DetailView::Closed;
        }
        if self.loading {
            return DetailView::Loading;
        }
        match &self.record {
            None => DetailView::NoData {
                message: format!("No {} data available", T::NOUN),
            },
            Some(record) => DetailView::Record {
                heading: record.heading(),
                sections: record.sections(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    //! Coverage for detail panel states and read-outs.
    use chrono::{NaiveDate, TimeZone, Utc};
    use rstest::rstest;

    use super::*;
    use crate::domain::{Frequency, InvestmentStatus};

    fn investment(investment_type: InvestmentType) -> Investment {
        let now = Utc.with_ymd_and_hms(2024, 1, 2, 9, 0, 0).single().expect("time");
        Investment {
            id: "inv-1".into(),
            investment_id: "INV20001".into(),
            customer_id: "cust-1".into(),
            investment_type,
            amount: 250_000,
            start_date: NaiveDate::from_ymd_opt(2024, 1, 15).expect("date"),
            end_date: None,
            frequency: (investment_type == InvestmentType::Sip).then_some(Frequency::Monthly),
            duration: None,
            status: InvestmentStatus::Active,
            created_at: now,
            updated_at: now,
        }
    }

    #[rstest]
    fn walks_closed_loading_and_no_data() {
        let mut panel = DetailPanel::<Investment>::new();
        assert_eq!(panel.view(), DetailView::Closed);

        panel.begin_loading();
        assert_eq!(panel.view(), DetailView::Loading);

        panel.show(None);
        assert_eq!(
            panel.view(),
            DetailView::NoData {
                message: "No investment data available".into()
            }
        );

        panel.close();
        assert!(!panel.is_open());
    }

    #[rstest]
    fn missing_values_read_as_not_available() {
        let mut panel = DetailPanel::new();
        panel.begin_loading();
        panel.show(Some(investment(InvestmentType::Lumpsum)));

        let DetailView::Record { heading, sections } = panel.view() else {
            panic!("record expected");
        };
        assert_eq!(heading, "Lumpsum Investment INV20001");
        let schedule = sections.iter().find(|s| s.title == "Schedule").expect("schedule");
        let end_date = schedule.fields.iter().find(|f| f.label == "End Date").expect("end date");
        assert_eq!(end_date.value, "N/A");
        let summary = sections.last().expect("summary");
        assert_eq!(summary.fields.first().map(|f| f.value.as_str()), Some("\u{20b9}2,50,000"));
    }
}
