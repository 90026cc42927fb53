//! Investment form for one product kind.

use chrono::NaiveDate;

use super::{
    FieldKind, FieldSpec, FieldValues, FormMode, FormSchema, SelectOption, input, optional_input,
};
use crate::domain::{
    Customer, FieldErrors, Frequency, Investment, InvestmentDraft, InvestmentStatus, InvestmentType,
    validate_investment,
};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Investment form fixed to SIP or lumpsum.
///
/// SIP forms add frequency, duration, and an optional end date; lumpsum
/// payloads never carry those fields.
#[derive(Debug, Clone)]
pub struct InvestmentFormSchema {
    investment_type: InvestmentType,
    customers: Vec<SelectOption>,
}

impl InvestmentFormSchema {
    /// Schema for `investment_type` with no customer choices yet.
    pub fn new(investment_type: InvestmentType) -> Self {
        Self {
            investment_type,
            customers: Vec::new(),
        }
    }

    /// Product kind this form edits.
    pub fn investment_type(&self) -> InvestmentType {
        self.investment_type
    }

    /// Replace the customer choices.
    pub fn set_customers<'a>(&mut self, customers: impl IntoIterator<Item = &'a Customer>) {
        self.customers = customers
            .into_iter()
            .map(|customer| {
                SelectOption::new(
                    customer.id.clone(),
                    format!("{} ({})", customer.full_name(), customer.customer_code),
                )
            })
            .collect();
    }

    /// Current customer choices.
    pub fn customers(&self) -> &[SelectOption] {
        &self.customers
    }

    fn is_sip(&self) -> bool {
        self.investment_type == InvestmentType::Sip
    }
}

fn choices<T: Copy>(all: &[T], as_str: fn(T) -> &'static str) -> Vec<SelectOption> {
    all.iter()
        .map(|item| SelectOption::new(as_str(*item), as_str(*item)))
        .collect()
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT).ok()
}

impl FormSchema for InvestmentFormSchema {
    type Record = Investment;
    type Payload = InvestmentDraft;

    const NOUN: &'static str = "Investment";

    fn title(&self, mode: FormMode) -> String {
        let kind = match self.investment_type {
            InvestmentType::Sip => "SIP",
            InvestmentType::Lumpsum => "Lumpsum",
        };
        match mode {
            FormMode::Create => format!("Add {kind} Investment"),
            FormMode::Edit => format!("Edit {kind} Investment"),
        }
    }

    fn fields(&self) -> Vec<FieldSpec> {
        let mut fields = vec![
            FieldSpec::new("customerId", "Customer", FieldKind::Select(self.customers.clone()), true),
            FieldSpec::new("amount", "Amount", FieldKind::Number, true),
            FieldSpec::new("startDate", "Start Date", FieldKind::Date, true),
        ];
        if self.is_sip() {
            fields.push(FieldSpec::new(
                "frequency",
                "Frequency",
                FieldKind::Select(choices(&Frequency::ALL, Frequency::as_str)),
                true,
            ));
            fields.push(FieldSpec::new("duration", "Duration (months)", FieldKind::Number, true));
            fields.push(FieldSpec::new("endDate", "End Date", FieldKind::Date, false));
        }
        fields.push(FieldSpec::new(
            "status",
            "Status",
            FieldKind::Select(choices(&InvestmentStatus::ALL, InvestmentStatus::as_str)),
            true,
        ));
        fields
    }

    fn defaults(&self) -> FieldValues {
        let mut values = FieldValues::new();
        values.insert("status".into(), InvestmentStatus::Active.as_str().into());
        if self.is_sip() {
            values.insert("frequency".into(), Frequency::Monthly.as_str().into());
        }
        values
    }

    fn values_of(&self, record: &Investment) -> FieldValues {
        let mut values = FieldValues::new();
        values.insert("customerId".into(), record.customer_id.clone());
        values.insert("amount".into(), record.amount.to_string());
        values.insert("startDate".into(), record.start_date.format(DATE_FORMAT).to_string());
        values.insert("status".into(), record.status.as_str().into());
        if self.is_sip() {
            if let Some(frequency) = record.frequency {
                values.insert("frequency".into(), frequency.as_str().into());
            }
            if let Some(duration) = record.duration {
                values.insert("duration".into(), duration.to_string());
            }
            if let Some(end) = record.end_date {
                values.insert("endDate".into(), end.format(DATE_FORMAT).to_string());
            }
        }
        values
    }

    fn identity(&self, record: &Investment) -> String {
        record.id.clone()
    }

    fn parse(&self, values: &FieldValues) -> Result<InvestmentDraft, FieldErrors> {
        let mut errors = FieldErrors::new();

        let customer_id = input(values, "customerId").to_owned();
        if customer_id.is_empty() {
            errors.insert("customerId", "Customer is required");
        }

        let amount = match input(values, "amount") {
            "" => {
                errors.insert("amount", "Amount is required");
                None
            }
            raw => match raw.parse::<u64>() {
                Ok(0) => {
                    errors.insert("amount", "Amount must be greater than zero");
                    None
                }
                Ok(amount) => Some(amount),
                Err(_) => {
                    errors.insert("amount", "Amount must be a positive number");
                    None
                }
            },
        };

        let start_date = match input(values, "startDate") {
            "" => {
                errors.insert("startDate", "Start date is required");
                None
            }
            raw => parse_date(raw).or_else(|| {
                errors.insert("startDate", "Enter a valid date (YYYY-MM-DD)");
                None
            }),
        };

        let status = match input(values, "status") {
            "" => {
                errors.insert("status", "Status is required");
                None
            }
            raw => raw.parse::<InvestmentStatus>().ok().or_else(|| {
                errors.insert("status", "Select a valid status");
                None
            }),
        };

        let (mut frequency, mut duration, mut end_date) = (None, None, None);
        if self.is_sip() {
            frequency = match input(values, "frequency") {
                "" => {
                    errors.insert("frequency", "Frequency is required");
                    None
                }
                raw => raw.parse::<Frequency>().ok().or_else(|| {
                    errors.insert("frequency", "Select a valid frequency");
                    None
                }),
            };
            duration = match input(values, "duration") {
                "" => {
                    errors.insert("duration", "Duration is required");
                    None
                }
                raw => match raw.parse::<u32>() {
                    Ok(0) => {
                        errors.insert("duration", "Duration must be greater than zero");
                        None
                    }
                    Ok(months) => Some(months),
                    Err(_) => {
                        errors.insert("duration", "Duration must be a whole number of months");
                        None
                    }
                },
            };
            end_date = match optional_input(values, "endDate") {
                None => None,
                Some(raw) => parse_date(&raw).or_else(|| {
                    errors.insert("endDate", "Enter a valid date (YYYY-MM-DD)");
                    None
                }),
            };
        }

        let (Some(amount), Some(start_date), Some(status)) = (amount, start_date, status) else {
            return Err(errors);
        };
        let draft = InvestmentDraft {
            customer_id,
            investment_type: self.investment_type,
            amount,
            start_date,
            end_date,
            frequency,
            duration,
            status,
        };
        errors.extend(validate_investment(&draft));
        if errors.is_empty() {
            Ok(draft.normalized())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use rstest::{fixture, rstest};

    use super::*;
    use crate::view::form::FormPanel;

    fn values(pairs: &[(&str, &str)]) -> FieldValues {
        pairs
            .iter()
            .map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
            .collect()
    }

    #[fixture]
    fn sip_input() -> FieldValues {
        values(&[
            ("customerId", "cust-1"),
            ("amount", "5000"),
            ("startDate", "2024-01-05"),
            ("frequency", "Monthly"),
            ("duration", "12"),
            ("status", "Active"),
        ])
    }

    #[fixture]
    fn stored_sip() -> Investment {
        let now = Utc.with_ymd_and_hms(2024, 1, 5, 0, 0, 0).single().expect("timestamp");
        Investment {
            id: "inv-1".into(),
            investment_id: "INV20001".into(),
            customer_id: "cust-1".into(),
            investment_type: InvestmentType::Sip,
            amount: 5_000,
            start_date: NaiveDate::from_ymd_opt(2024, 1, 5).expect("date"),
            end_date: Some(NaiveDate::from_ymd_opt(2025, 1, 5).expect("date")),
            frequency: Some(Frequency::Quarterly),
            duration: Some(12),
            status: InvestmentStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }

    #[rstest]
    fn sip_input_parses_into_a_draft(sip_input: FieldValues) {
        let draft = InvestmentFormSchema::new(InvestmentType::Sip)
            .parse(&sip_input)
            .expect("valid input");
        assert_eq!(draft.amount, 5_000);
        assert_eq!(draft.frequency, Some(Frequency::Monthly));
        assert_eq!(draft.duration, Some(12));
        assert_eq!(draft.end_date, None);
    }

    #[rstest]
    fn lumpsum_payload_never_carries_sip_fields(sip_input: FieldValues) {
        let draft = InvestmentFormSchema::new(InvestmentType::Lumpsum)
            .parse(&sip_input)
            .expect("valid input");
        assert_eq!(draft.investment_type, InvestmentType::Lumpsum);
        assert!(draft.frequency.is_none() && draft.duration.is_none());
    }

    #[rstest]
    #[case("amount", "", "Amount is required")]
    #[case("amount", "-5", "Amount must be a positive number")]
    #[case("amount", "0", "Amount must be greater than zero")]
    #[case("startDate", "05/01/2024", "Enter a valid date (YYYY-MM-DD)")]
    #[case("duration", "1.5", "Duration must be a whole number of months")]
    #[case("duration", "0", "Duration must be greater than zero")]
    #[case("frequency", "Weekly", "Select a valid frequency")]
    #[case("endDate", "2023-01-01", "End date must not be before the start date")]
    fn reports_field_errors(
        mut sip_input: FieldValues,
        #[case] field: &str,
        #[case] raw: &str,
        #[case] message: &str,
    ) {
        sip_input.insert(field.to_owned(), raw.to_owned());
        let errors = InvestmentFormSchema::new(InvestmentType::Sip)
            .parse(&sip_input)
            .expect_err("invalid input");
        assert_eq!(errors.get(field), Some(message));
    }

    #[test]
    fn empty_form_reports_every_required_field() {
        let errors = InvestmentFormSchema::new(InvestmentType::Sip)
            .parse(&FieldValues::new())
            .expect_err("invalid input");
        for field in ["customerId", "amount", "startDate", "status", "frequency", "duration"] {
            assert!(errors.get(field).is_some(), "missing error for {field}");
        }
    }

    #[rstest]
    fn edit_prefills_and_submits_unchanged(stored_sip: Investment) {
        let mut panel = FormPanel::new(InvestmentFormSchema::new(InvestmentType::Sip));
        panel.open_edit(&stored_sip);
        assert_eq!(panel.mode(), FormMode::Edit);
        assert_eq!(panel.value("frequency"), Some("Quarterly"));
        assert_eq!(panel.view().title, "Edit SIP Investment");

        let submission = panel.submit().expect("unchanged record is valid");
        assert_eq!(submission.id.as_deref(), Some("inv-1"));
        assert_eq!(submission.payload, stored_sip.draft());
    }

    #[test]
    fn lumpsum_form_hides_sip_fields() {
        let names: Vec<_> = InvestmentFormSchema::new(InvestmentType::Lumpsum)
            .fields()
            .into_iter()
            .map(|field| field.name)
            .collect();
        assert_eq!(names, ["customerId", "amount", "startDate", "status"]);
    }
}
