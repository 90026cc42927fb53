//! Field-level validation shared by form panels and stores.
//!
//! Form panels run these rules before submission; the in-memory store runs
//! them again so the mock API server rejects payloads the forms would have
//! blocked. Errors are keyed by the camelCase wire name of the field.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{CustomerDraft, Error, InvestmentDraft, InvestmentType};

/// Per-field validation messages keyed by wire field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    /// No errors.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `message` for `field`, keeping the first message per field.
    pub fn insert(&mut self, field: &str, message: impl Into<String>) {
        self.0.entry(field.to_owned()).or_insert_with(|| message.into());
    }

    /// Message for `field`, if any.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    /// Drop the message for `field`.
    pub fn clear(&mut self, field: &str) {
        self.0.remove(field);
    }

    /// Whether every rule passed.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of failing fields.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Fields and messages in field-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Merge `other` into `self`, keeping existing messages.
    pub fn extend(&mut self, other: Self) {
        for (field, message) in other.0 {
            self.0.entry(field).or_insert(message);
        }
    }

    /// `Ok(())` when empty, otherwise an invalid-request error carrying the
    /// messages as details.
    ///
    /// # Errors
    /// Returns [`Error`] with code `InvalidRequest` when any field failed.
    pub fn into_result(self) -> Result<(), Error> {
        if self.is_empty() {
            return Ok(());
        }
        let details = serde_json::to_value(&self).unwrap_or_default();
        Err(Error::invalid_request("Validation failed").with_details(details))
    }
}

/// Whether `email` has one `@`, a local part, and a dotted domain.
///
/// # Examples
/// ```
/// use wealthdesk::domain::validation::looks_like_email;
///
/// assert!(looks_like_email("admin@example.com"));
/// assert!(!looks_like_email("admin@"));
/// ```
pub fn looks_like_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && !email.chars().any(char::is_whitespace)
        && domain.split('.').count() >= 2
        && domain.split('.').all(|label| !label.is_empty())
}

/// Whether `mobile` is ten digits starting with 6 to 9.
pub fn is_mobile_number(mobile: &str) -> bool {
    mobile.len() == 10
        && mobile.chars().all(|c| c.is_ascii_digit())
        && mobile.starts_with(['6', '7', '8', '9'])
}

fn require(errors: &mut FieldErrors, field: &str, label: &str, value: &str) -> bool {
    if value.trim().is_empty() {
        errors.insert(field, format!("{label} is required"));
        false
    } else {
        true
    }
}

/// Rules for customer create and update.
pub fn validate_customer(draft: &CustomerDraft) -> FieldErrors {
    let mut errors = FieldErrors::new();
    require(&mut errors, "firstName", "First name", &draft.first_name);
    require(&mut errors, "lastName", "Last name", &draft.last_name);
    if require(&mut errors, "email", "Email", &draft.email) && !looks_like_email(draft.email.trim())
    {
        errors.insert("email", "Enter a valid email address");
    }
    if require(&mut errors, "mobile", "Mobile", &draft.mobile) && !is_mobile_number(draft.mobile.trim())
    {
        errors.insert("mobile", "Enter a valid 10-digit mobile number");
    }
    errors
}

/// Rules for investment create and update; the type tag selects the subset.
pub fn validate_investment(draft: &InvestmentDraft) -> FieldErrors {
    let mut errors = FieldErrors::new();
    require(&mut errors, "customerId", "Customer", &draft.customer_id);
    if draft.amount == 0 {
        errors.insert("amount", "Amount must be greater than zero");
    }
    if draft.investment_type == InvestmentType::Sip {
        if draft.frequency.is_none() {
            errors.insert("frequency", "Frequency is required");
        }
        match draft.duration {
            None => errors.insert("duration", "Duration is required"),
            Some(0) => errors.insert("duration", "Duration must be greater than zero"),
            Some(_) => {}
        }
        if draft.end_date.is_some_and(|end| end < draft.start_date) {
            errors.insert("endDate", "End date must not be before the start date");
        }
    }
    errors
}

#[cfg(test)]
mod tests {
    //! Regression coverage for shared field rules.
    use super::*;
    use crate::domain::{CustomerStatus, Frequency, InvestmentStatus};
    use chrono::NaiveDate;
    use rstest::{fixture, rstest};

    #[fixture]
    fn customer_draft() -> CustomerDraft {
        CustomerDraft {
            first_name: "Asha".into(),
            last_name: "Rao".into(),
            email: "asha@example.com".into(),
            mobile: "9876543210".into(),
            date_of_birth: None,
            gender: None,
            tax_status: None,
            occupation: None,
            city: None,
            state: None,
            status: CustomerStatus::Active,
            kyc_status: None,
            account_type: None,
            pan_number: None,
        }
    }

    #[fixture]
    fn sip_draft() -> InvestmentDraft {
        InvestmentDraft {
            customer_id: "cust-1".into(),
            investment_type: InvestmentType::Sip,
            amount: 1_000,
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).expect("date"),
            end_date: None,
            frequency: Some(Frequency::Monthly),
            duration: Some(12),
            status: InvestmentStatus::Active,
        }
    }

    #[rstest]
    fn valid_customer_passes(customer_draft: CustomerDraft) {
        assert!(validate_customer(&customer_draft).is_empty());
    }

    #[rstest]
    #[case("email", "not-an-email", "Enter a valid email address")]
    #[case("email", "", "Email is required")]
    #[case("mobile", "12345", "Enter a valid 10-digit mobile number")]
    #[case("firstName", " ", "First name is required")]
    fn invalid_customer_fields(
        mut customer_draft: CustomerDraft,
        #[case] field: &str,
        #[case] value: &str,
        #[case] expected: &str,
    ) {
        match field {
            "email" => customer_draft.email = value.to_owned(),
            "mobile" => customer_draft.mobile = value.to_owned(),
            _ => customer_draft.first_name = value.to_owned(),
        }
        assert_eq!(validate_customer(&customer_draft).get(field), Some(expected));
    }

    #[rstest]
    fn sip_requires_frequency_and_duration(mut sip_draft: InvestmentDraft) {
        sip_draft.frequency = None;
        sip_draft.duration = Some(0);
        let errors = validate_investment(&sip_draft);
        assert_eq!(errors.get("frequency"), Some("Frequency is required"));
        assert_eq!(errors.get("duration"), Some("Duration must be greater than zero"));
    }

    #[rstest]
    fn lumpsum_ignores_sip_fields(mut sip_draft: InvestmentDraft) {
        sip_draft.investment_type = InvestmentType::Lumpsum;
        sip_draft.frequency = None;
        sip_draft.duration = None;
        assert!(validate_investment(&sip_draft).is_empty());
    }

    #[test]
    fn errors_become_invalid_request_details() {
        let mut errors = FieldErrors::new();
        errors.insert("amount", "Amount must be greater than zero");
        let err = errors.into_result().expect_err("should fail");
        assert_eq!(err.code(), crate::domain::ErrorCode::InvalidRequest);
        assert_eq!(
            err.details().and_then(|d| d.get("amount")).and_then(|v| v.as_str()),
            Some("Amount must be greater than zero")
        );
    }
}
