//! Dropdown catalogue kinds and options.
//!
//! Form panels draw their choice lists from the catalogue instead of
//! hard-coding them.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::customer::UnknownVariant;

/// The choice lists the catalogue serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DropdownKind {
    /// Customer occupation.
    Occupation,
    /// Customer tax status.
    TaxStatus,
    /// Holding nature of a folio.
    HoldingNature,
    /// PAN exemption category.
    PanExemptCategory,
    /// Dividend pay mode.
    DividendPayMode,
    /// Bank account type.
    AccountType,
    /// Indian state.
    State,
    /// Country.
    Country,
    /// Preferred communication mode.
    CommunicationMode,
}

impl DropdownKind {
    /// Every kind, in catalogue order.
    pub const ALL: [Self; 9] = [
        Self::Occupation,
        Self::TaxStatus,
        Self::HoldingNature,
        Self::PanExemptCategory,
        Self::DividendPayMode,
        Self::AccountType,
        Self::State,
        Self::Country,
        Self::CommunicationMode,
    ];

    /// Path segment and JSON key for this kind.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Occupation => "occupation",
            Self::TaxStatus => "taxStatus",
            Self::HoldingNature => "holdingNature",
            Self::PanExemptCategory => "panExemptCategory",
            Self::DividendPayMode => "dividendPayMode",
            Self::AccountType => "accountType",
            Self::State => "state",
            Self::Country => "country",
            Self::CommunicationMode => "communicationMode",
        }
    }
}

impl fmt::Display for DropdownKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DropdownKind {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownVariant::new("dropdown", s))
    }
}

/// One selectable option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DropdownOption {
    /// Stable identifier, unique within a kind.
    #[serde(rename = "_id")]
    pub id: String,
    /// Stored value.
    pub code: String,
    /// Display label.
    pub name: String,
    /// Whether the option may be chosen.
    pub active: bool,
}

impl DropdownOption {
    /// Active option with the given fields.
    pub fn new(id: impl Into<String>, code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            code: code.into(),
            name: name.into(),
            active: true,
        }
    }
}

/// Every choice list keyed by kind.
pub type DropdownCatalogue = BTreeMap<DropdownKind, Vec<DropdownOption>>;

/// Label for `code` within `options`, if present.
///
/// # Examples
/// ```
/// use wealthdesk::domain::{DropdownOption, option_label};
///
/// let options = vec![DropdownOption::new("1", "NRI", "Non-Resident Indian")];
/// assert_eq!(option_label(&options, "NRI"), Some("Non-Resident Indian"));
/// assert_eq!(option_label(&options, "IND"), None);
/// ```
pub fn option_label<'a>(options: &'a [DropdownOption], code: &str) -> Option<&'a str> {
    options
        .iter()
        .find(|option| option.code == code)
        .map(|option| option.name.as_str())
}
