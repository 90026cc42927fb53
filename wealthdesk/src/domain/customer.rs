//! Customer records, drafts, filters, and statistics.
//!
//! Customers carry an investment summary (`sipInvestments`,
//! `lumpsumInvestments`, `totalInvestment`) that stores derive from their
//! investments on read. Drafts never carry the summary.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::query::QueryFilter;

/// Whether a customer account is in use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CustomerStatus {
    /// Account is in use.
    #[default]
    Active,
    /// Account is dormant.
    Inactive,
}

impl CustomerStatus {
    /// Wire representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }
}

impl fmt::Display for CustomerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CustomerStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            _ => Err(UnknownVariant::new("status", s)),
        }
    }
}

/// Customer gender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    /// Male.
    Male,
    /// Female.
    Female,
    /// Other or undisclosed.
    Other,
}

impl Gender {
    /// Wire representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" => Ok(Self::Male),
            "female" => Ok(Self::Female),
            "other" => Ok(Self::Other),
            _ => Err(UnknownVariant::new("gender", s)),
        }
    }
}

/// Raised when a string names no variant of a closed set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {field} value: {value}")]
pub struct UnknownVariant {
    field: &'static str,
    value: String,
}

impl UnknownVariant {
    pub(crate) fn new(field: &'static str, value: &str) -> Self {
        Self {
            field,
            value: value.to_owned(),
        }
    }

    /// Name of the field that failed to parse.
    pub fn field(&self) -> &'static str {
        self.field
    }
}

/// A customer as returned by the service layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    /// Stable identifier, `cust-{n}` in the in-memory store.
    #[serde(rename = "_id")]
    pub id: String,
    /// Human-facing code, `CUS{10000+n}` in the in-memory store.
    pub customer_code: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Email address.
    pub email: String,
    /// Ten-digit mobile number.
    pub mobile: String,
    /// Date of birth.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<NaiveDate>,
    /// Gender.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    /// Tax-status dropdown code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_status: Option<String>,
    /// Occupation dropdown code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occupation: Option<String>,
    /// City of residence.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    /// State of residence.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    /// Account status.
    pub status: CustomerStatus,
    /// KYC verification label, for example `verified`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kyc_status: Option<String>,
    /// Account type label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_type: Option<String>,
    /// PAN number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pan_number: Option<String>,
    /// Number of SIP investments held.
    #[serde(default)]
    pub sip_investments: u32,
    /// Number of lumpsum investments held.
    #[serde(default)]
    pub lumpsum_investments: u32,
    /// Sum of all investment amounts in whole rupees.
    #[serde(default)]
    pub total_investment: u64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Customer {
    /// Build a customer from a draft with an empty investment summary.
    pub fn from_draft(
        id: impl Into<String>,
        customer_code: impl Into<String>,
        draft: CustomerDraft,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            customer_code: customer_code.into(),
            first_name: draft.first_name,
            last_name: draft.last_name,
            email: draft.email,
            mobile: draft.mobile,
            date_of_birth: draft.date_of_birth,
            gender: draft.gender,
            tax_status: draft.tax_status,
            occupation: draft.occupation,
            city: draft.city,
            state: draft.state,
            status: draft.status,
            kyc_status: draft.kyc_status,
            account_type: draft.account_type,
            pan_number: draft.pan_number,
            sip_investments: 0,
            lumpsum_investments: 0,
            total_investment: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrite the editable fields and refresh `updated_at`.
    pub fn apply_draft(&mut self, draft: CustomerDraft, now: DateTime<Utc>) {
        self.first_name = draft.first_name;
        self.last_name = draft.last_name;
        self.email = draft.email;
        self.mobile = draft.mobile;
        self.date_of_birth = draft.date_of_birth;
        self.gender = draft.gender;
        self.tax_status = draft.tax_status;
        self.occupation = draft.occupation;
        self.city = draft.city;
        self.state = draft.state;
        self.status = draft.status;
        self.kyc_status = draft.kyc_status;
        self.account_type = draft.account_type;
        self.pan_number = draft.pan_number;
        self.updated_at = now;
    }

    /// Editable fields of this record.
    pub fn draft(&self) -> CustomerDraft {
        CustomerDraft {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            mobile: self.mobile.clone(),
            date_of_birth: self.date_of_birth,
            gender: self.gender,
            tax_status: self.tax_status.clone(),
            occupation: self.occupation.clone(),
            city: self.city.clone(),
            state: self.state.clone(),
            status: self.status,
            kyc_status: self.kyc_status.clone(),
            account_type: self.account_type.clone(),
            pan_number: self.pan_number.clone(),
        }
    }

    /// `first last`.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// `city, state`, or whichever half is known.
    pub fn location(&self) -> Option<String> {
        match (self.city.as_deref(), self.state.as_deref()) {
            (Some(city), Some(state)) => Some(format!("{city}, {state}")),
            (Some(part), None) | (None, Some(part)) => Some(part.to_owned()),
            (None, None) => None,
        }
    }
}

/// Editable customer fields, used for create and update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDraft {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Email address.
    pub email: String,
    /// Ten-digit mobile number.
    pub mobile: String,
    /// Date of birth.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<NaiveDate>,
    /// Gender.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    /// Tax-status dropdown code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_status: Option<String>,
    /// Occupation dropdown code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occupation: Option<String>,
    /// City of residence.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    /// State of residence.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    /// Account status.
    #[serde(default)]
    pub status: CustomerStatus,
    /// KYC verification label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kyc_status: Option<String>,
    /// Account type label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_type: Option<String>,
    /// PAN number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pan_number: Option<String>,
}

/// Typed customer list filters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerFilter {
    /// Case-insensitive substring of first name, last name, email, or mobile.
    pub search: Option<String>,
    /// Exact status.
    pub status: Option<CustomerStatus>,
    /// Exact gender.
    pub gender: Option<Gender>,
    /// Exact tax-status code.
    pub tax_status: Option<String>,
}

impl CustomerFilter {
    /// Whether `customer` passes every populated filter.
    ///
    /// # Examples
    /// ```
    /// use wealthdesk::domain::{CustomerFilter, CustomerStatus};
    ///
    /// let filter = CustomerFilter {
    ///     status: Some(CustomerStatus::Inactive),
    ///     ..CustomerFilter::default()
    /// };
    /// assert!(!filter.is_empty());
    /// ```
    pub fn matches(&self, customer: &Customer) -> bool {
        let search_ok = normalized(self.search.as_deref()).is_none_or(|needle| {
            [
                customer.first_name.as_str(),
                customer.last_name.as_str(),
                customer.email.as_str(),
                customer.mobile.as_str(),
            ]
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
        });
        search_ok
            && self.status.is_none_or(|status| customer.status == status)
            && self.gender.is_none_or(|gender| customer.gender == Some(gender))
            && normalized(self.tax_status.as_deref())
                .is_none_or(|code| customer.tax_status.as_deref().map(str::to_lowercase) == Some(code))
    }

    /// Whether no filter is populated.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl QueryFilter for CustomerFilter {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(search) = normalized_raw(self.search.as_deref()) {
            pairs.push(("search", search));
        }
        if let Some(status) = self.status {
            pairs.push(("status", status.to_string()));
        }
        if let Some(gender) = self.gender {
            pairs.push(("gender", gender.to_string()));
        }
        if let Some(tax_status) = normalized_raw(self.tax_status.as_deref()) {
            pairs.push(("taxStatus", tax_status));
        }
        pairs
    }
}

/// Lower-cased, trimmed filter text, or `None` when blank.
pub(crate) fn normalized(value: Option<&str>) -> Option<String> {
    normalized_raw(value).map(|v| v.to_lowercase())
}

fn normalized_raw(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
}

/// Headline customer counts for the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerStats {
    /// All customers.
    pub total: u64,
    /// Customers with status `active`.
    pub active: u64,
    /// Customers created in the current calendar month.
    pub new_this_month: u64,
}
