//! Generated seed record types.
//!
//! These types are independent of the console's domain types. The in-memory
//! service adapters convert them into customers, investments, and
//! notifications when they build their stores.

use serde::{Deserialize, Serialize};

/// A calendar date with a day that is valid in every month.
///
/// Generated days never exceed 28, so any year and month pair is valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SeedDate {
    /// Four-digit year.
    pub year: i32,
    /// Month, `1..=12`.
    pub month: u32,
    /// Day of month, `1..=28`.
    pub day: u32,
}

/// Customer gender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenderSeed {
    /// Male.
    Male,
    /// Female.
    Female,
    /// Other or undisclosed.
    Other,
}

/// Investment product kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum InvestmentKindSeed {
    /// Systematic investment plan.
    Sip,
    /// One-off lumpsum purchase.
    Lumpsum,
}

/// SIP instalment frequency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FrequencySeed {
    /// Once a month.
    Monthly,
    /// Once a quarter.
    Quarterly,
    /// Once a year.
    Yearly,
}

/// Investment lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InvestmentStatusSeed {
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

/// Notification severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKindSeed {
    /// Informational.
    Info,
    /// Something completed.
    Success,
    /// Needs attention.
    Warning,
    /// Something failed.
    Error,
}

/// A generated customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExampleCustomerSeed {
    /// One-based position in the generated book.
    pub index: usize,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Lowercase email address unique within the book.
    pub email: String,
    /// Ten-digit mobile number.
    pub mobile: String,
    /// Date of birth.
    pub date_of_birth: SeedDate,
    /// Gender.
    pub gender: GenderSeed,
    /// Tax-status code from the registry.
    pub tax_status: String,
    /// Occupation code from the registry.
    pub occupation: String,
    /// City from the registry.
    pub city: String,
    /// State matching `city`.
    pub state: String,
    /// Whether the customer is active.
    pub active: bool,
    /// Whether KYC has been verified.
    pub kyc_verified: bool,
    /// Whether the customer holds a premium account.
    pub premium: bool,
    /// Registration date.
    pub registered_on: SeedDate,
}

/// A generated investment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExampleInvestmentSeed {
    /// One-based position in the generated book.
    pub index: usize,
    /// One-based index of the owning customer.
    pub customer_index: usize,
    /// SIP or lumpsum.
    pub kind: InvestmentKindSeed,
    /// Amount in whole rupees.
    pub amount: u64,
    /// First instalment or purchase date.
    pub start_date: SeedDate,
    /// Last instalment date, SIPs only.
    pub end_date: Option<SeedDate>,
    /// Instalment frequency, SIPs only.
    pub frequency: Option<FrequencySeed>,
    /// Term in months, SIPs only.
    pub duration_months: Option<u32>,
    /// Lifecycle status.
    pub status: InvestmentStatusSeed,
}

/// A generated notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExampleNotificationSeed {
    /// One-based position in the generated book.
    pub index: usize,
    /// Short title.
    pub title: String,
    /// Body text.
    pub message: String,
    /// Severity.
    pub kind: NotificationKindSeed,
    /// Whether the notification has been read.
    pub read: bool,
    /// How long before generation time the notification was raised.
    pub minutes_ago: u32,
}

/// Everything generated for one seed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExampleBook {
    /// Generated customers, in index order.
    pub customers: Vec<ExampleCustomerSeed>,
    /// Generated investments, in index order.
    pub investments: Vec<ExampleInvestmentSeed>,
    /// Generated notifications, newest first.
    pub notifications: Vec<ExampleNotificationSeed>,
}
