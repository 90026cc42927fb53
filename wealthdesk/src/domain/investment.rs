//! Investment records, drafts, filters, and statistics.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::customer::{UnknownVariant, normalized};
use super::query::QueryFilter;

/// Investment product kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum InvestmentType {
    /// Systematic investment plan: recurring instalments.
    Sip,
    /// One-off purchase.
    Lumpsum,
}

impl InvestmentType {
    /// Wire representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sip => "SIP",
            Self::Lumpsum => "LUMPSUM",
        }
    }
}

impl fmt::Display for InvestmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InvestmentType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "SIP" => Ok(Self::Sip),
            "LUMPSUM" => Ok(Self::Lumpsum),
            _ => Err(UnknownVariant::new("investmentType", s)),
        }
    }
}

/// SIP instalment frequency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Frequency {
    /// Once a month.
    Monthly,
    /// Once a quarter.
    Quarterly,
    /// Once a year.
    Yearly,
}

impl Frequency {
    /// Every frequency, in display order.
    pub const ALL: [Self; 3] = [Self::Monthly, Self::Quarterly, Self::Yearly];

    /// Wire representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Monthly => "Monthly",
            Self::Quarterly => "Quarterly",
            Self::Yearly => "Yearly",
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Frequency {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|f| f.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownVariant::new("frequency", s))
    }
}

/// Investment lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InvestmentStatus {
    /// Running.
    Active,
    /// Paused or stopped.
    Inactive,
    /// Awaiting processing.
    Pending,
    /// Ran to term.
    Completed,
    /// Cancelled before term.
    Cancelled,
}

impl InvestmentStatus {
    /// Every status, in display order.
    pub const ALL: [Self; 5] = [
        Self::Active,
        Self::Inactive,
        Self::Pending,
        Self::Completed,
        Self::Cancelled,
    ];

    /// Wire representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
            Self::Pending => "Pending",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for InvestmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InvestmentStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownVariant::new("status", s))
    }
}

/// An investment as returned by the service layer.
///
/// SIP-only fields (`endDate`, `frequency`, `duration`) are absent for
/// lumpsum records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Investment {
    /// Stable identifier, `inv-{n}` in the in-memory store.
    #[serde(rename = "_id")]
    pub id: String,
    /// Human-facing code, `INV{20000+n}` in the in-memory store.
    pub investment_id: String,
    /// `_id` of the owning customer.
    pub customer_id: String,
    /// SIP or lumpsum.
    pub investment_type: InvestmentType,
    /// Amount in whole rupees.
    pub amount: u64,
    /// First instalment or purchase date.
    pub start_date: NaiveDate,
    /// Last instalment date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    /// Instalment frequency.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency: Option<Frequency>,
    /// Term in months.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    /// Lifecycle status.
    pub status: InvestmentStatus,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Investment {
    /// Build an investment from a draft.
    pub fn from_draft(
        id: impl Into<String>,
        investment_id: impl Into<String>,
        draft: InvestmentDraft,
        now: DateTime<Utc>,
    ) -> Self {
        let draft = draft.normalized();
        Self {
            id: id.into(),
            investment_id: investment_id.into(),
            customer_id: draft.customer_id,
            investment_type: draft.investment_type,
            amount: draft.amount,
            start_date: draft.start_date,
            end_date: draft.end_date,
            frequency: draft.frequency,
            duration: draft.duration,
            status: draft.status,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrite the editable fields and refresh `updated_at`.
    pub fn apply_draft(&mut self, draft: InvestmentDraft, now: DateTime<Utc>) {
        let draft = draft.normalized();
        self.customer_id = draft.customer_id;
        self.investment_type = draft.investment_type;
        self.amount = draft.amount;
        self.start_date = draft.start_date;
        self.end_date = draft.end_date;
        self.frequency = draft.frequency;
        self.duration = draft.duration;
        self.status = draft.status;
        self.updated_at = now;
    }

    /// Editable fields of this record.
    pub fn draft(&self) -> InvestmentDraft {
        InvestmentDraft {
            customer_id: self.customer_id.clone(),
            investment_type: self.investment_type,
            amount: self.amount,
            start_date: self.start_date,
            end_date: self.end_date,
            frequency: self.frequency,
            duration: self.duration,
            status: self.status,
        }
    }
}

/// Editable investment fields, used for create and update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentDraft {
    /// `_id` of the owning customer.
    pub customer_id: String,
    /// SIP or lumpsum.
    pub investment_type: InvestmentType,
    /// Amount in whole rupees.
    pub amount: u64,
    /// First instalment or purchase date.
    pub start_date: NaiveDate,
    /// Last instalment date, SIPs only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    /// Instalment frequency, SIPs only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency: Option<Frequency>,
    /// Term in months, SIPs only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    /// Lifecycle status.
    pub status: InvestmentStatus,
}

impl InvestmentDraft {
    /// Drop SIP-only fields from lumpsum drafts.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        if self.investment_type == InvestmentType::Lumpsum {
            self.end_date = None;
            self.frequency = None;
            self.duration = None;
        }
        self
    }
}

/// Sort key that orders investments by their customer's full name.
///
/// Investments only carry `customerId`, so adapters join the name in before
/// sorting. Unknown customers sort by their raw id.
pub const CUSTOMER_NAME_SORT: &str = "customerName";

/// Typed investment list filters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvestmentFilter {
    /// Owning customer `_id`.
    pub customer_id: Option<String>,
    /// Product kind.
    pub investment_type: Option<InvestmentType>,
    /// Lifecycle status.
    pub status: Option<InvestmentStatus>,
    /// Case-insensitive substring of the investment code or customer id.
    pub search: Option<String>,
    /// Earliest start date, inclusive.
    pub start_date: Option<NaiveDate>,
    /// Latest start date, inclusive.
    pub end_date: Option<NaiveDate>,
}

impl InvestmentFilter {
    /// Filter selecting one product kind.
    pub fn of_type(investment_type: InvestmentType) -> Self {
        Self {
            investment_type: Some(investment_type),
            ..Self::default()
        }
    }

    /// Whether `investment` passes every populated filter.
    pub fn matches(&self, investment: &Investment) -> bool {
        let search_ok = normalized(self.search.as_deref()).is_none_or(|needle| {
            investment.investment_id.to_lowercase().contains(&needle)
                || investment.customer_id.to_lowercase().contains(&needle)
        });
        search_ok
            && self
                .customer_id
                .as_deref()
                .is_none_or(|id| investment.customer_id == id)
            && self
                .investment_type
                .is_none_or(|kind| investment.investment_type == kind)
            && self.status.is_none_or(|status| investment.status == status)
            && self.start_date.is_none_or(|from| investment.start_date >= from)
            && self.end_date.is_none_or(|to| investment.start_date <= to)
    }
}

impl QueryFilter for InvestmentFilter {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(customer_id) = &self.customer_id {
            pairs.push(("customerId", customer_id.clone()));
        }
        if let Some(kind) = self.investment_type {
            pairs.push(("investmentType", kind.to_string()));
        }
        if let Some(status) = self.status {
            pairs.push(("status", status.to_string()));
        }
        if let Some(search) = self.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            pairs.push(("search", search.to_owned()));
        }
        if let Some(from) = self.start_date {
            pairs.push(("startDate", from.to_string()));
        }
        if let Some(to) = self.end_date {
            pairs.push(("endDate", to.to_string()));
        }
        pairs
    }
}

/// Headline investment totals for the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentStats {
    /// Number of investments.
    pub total_investments: u64,
    /// Sum of SIP amounts in whole rupees.
    pub total_sip_amount: u64,
    /// Sum of lumpsum amounts in whole rupees.
    pub total_lumpsum_amount: u64,
    /// Investments with status `Active`.
    pub active_investments: u64,
}

impl InvestmentStats {
    /// Aggregate statistics over `investments`.
    pub fn collect<'a>(investments: impl IntoIterator<Item = &'a Investment>) -> Self {
        investments.into_iter().fold(Self::default(), |mut acc, inv| {
            acc.total_investments = acc.total_investments.saturating_add(1);
            match inv.investment_type {
                InvestmentType::Sip => {
                    acc.total_sip_amount = acc.total_sip_amount.saturating_add(inv.amount);
                }
                InvestmentType::Lumpsum => {
                    acc.total_lumpsum_amount = acc.total_lumpsum_amount.saturating_add(inv.amount);
                }
            }
            if inv.status == InvestmentStatus::Active {
                acc.active_investments = acc.active_investments.saturating_add(1);
            }
            acc
        })
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for investment helpers.
    use super::*;
    use chrono::TimeZone;
    use rstest::{fixture, rstest};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[fixture]
    fn sip() -> Investment {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).single().expect("timestamp");
        Investment::from_draft(
            "inv-1",
            "INV20001",
            InvestmentDraft {
                customer_id: "cust-1".into(),
                investment_type: InvestmentType::Sip,
                amount: 5_000,
                start_date: date(2024, 1, 5),
                end_date: Some(date(2025, 1, 5)),
                frequency: Some(Frequency::Monthly),
                duration: Some(12),
                status: InvestmentStatus::Active,
            },
            now,
        )
    }

    #[rstest]
    fn lumpsum_drafts_drop_sip_fields(sip: Investment) {
        let mut draft = sip.draft();
        draft.investment_type = InvestmentType::Lumpsum;
        let normalized = draft.normalized();
        assert_eq!(normalized.frequency, None);
        assert_eq!(normalized.duration, None);
        assert_eq!(normalized.end_date, None);
    }

    #[rstest]
    #[case(InvestmentFilter::of_type(InvestmentType::Sip), true)]
    #[case(InvestmentFilter::of_type(InvestmentType::Lumpsum), false)]
    #[case(InvestmentFilter { search: Some("inv2".into()), ..InvestmentFilter::default() }, true)]
    #[case(InvestmentFilter { customer_id: Some("cust-2".into()), ..InvestmentFilter::default() }, false)]
    #[case(InvestmentFilter { start_date: Some(date(2024, 2, 1)), ..InvestmentFilter::default() }, false)]
    #[case(InvestmentFilter { end_date: Some(date(2024, 1, 5)), ..InvestmentFilter::default() }, true)]
    fn filter_matching(sip: Investment, #[case] filter: InvestmentFilter, #[case] expected: bool) {
        assert_eq!(filter.matches(&sip), expected);
    }

    #[rstest]
    fn stats_split_amounts_by_kind(sip: Investment) {
        let mut lumpsum = sip.clone();
        lumpsum.investment_type = InvestmentType::Lumpsum;
        lumpsum.amount = 20_000;
        lumpsum.status = InvestmentStatus::Completed;
        let stats = InvestmentStats::collect([&sip, &lumpsum]);
        assert_eq!(
            stats,
            InvestmentStats {
                total_investments: 2,
                total_sip_amount: 5_000,
                total_lumpsum_amount: 20_000,
                active_investments: 1,
            }
        );
    }

    #[rstest]
    fn serialises_uppercase_type(sip: Investment) {
        let value = serde_json::to_value(&sip).expect("serialise");
        assert_eq!(value["investmentType"], "SIP");
        assert_eq!(value["startDate"], "2024-01-05");
        assert_eq!(value["frequency"], "Monthly");
    }

    #[rstest]
    #[case("pending", InvestmentStatus::Pending)]
    #[case("Cancelled", InvestmentStatus::Cancelled)]
    fn parses_status_case_insensitively(#[case] raw: &str, #[case] expected: InvestmentStatus) {
        assert_eq!(raw.parse::<InvestmentStatus>().expect("known"), expected);
    }
}
