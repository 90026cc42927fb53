//! Customer form backed by the dropdown catalogue.

use chrono::NaiveDate;

use super::{FieldKind, FieldSpec, FieldValues, FormSchema, SelectOption, input, optional_input};
use crate::domain::{
    Customer, CustomerDraft, CustomerStatus, DropdownCatalogue, DropdownKind, DropdownOption,
    FieldErrors, Gender, validate_customer,
};

/// Customer form.
///
/// Occupation and tax status submit catalogue codes; state submits the
/// option name, matching what customer records store.
#[derive(Debug, Clone, Default)]
pub struct CustomerFormSchema {
    catalogue: DropdownCatalogue,
}

impl CustomerFormSchema {
    /// Schema drawing choices from `catalogue`.
    pub fn new(catalogue: DropdownCatalogue) -> Self {
        Self { catalogue }
    }

    /// Replace the catalogue once it has loaded.
    pub fn set_catalogue(&mut self, catalogue: DropdownCatalogue) {
        self.catalogue = catalogue;
    }

    fn coded(&self, kind: DropdownKind) -> FieldKind {
        FieldKind::Select(self.options(kind, |option| option.code.clone()))
    }

    fn named(&self, kind: DropdownKind) -> FieldKind {
        FieldKind::Select(self.options(kind, |option| option.name.clone()))
    }

    fn options(
        &self,
        kind: DropdownKind,
        value: impl Fn(&DropdownOption) -> String,
    ) -> Vec<SelectOption> {
        self.catalogue
            .get(&kind)
            .into_iter()
            .flatten()
            .filter(|option| option.active)
            .map(|option| SelectOption::new(value(option), option.name.clone()))
            .collect()
    }
}

fn enum_choices(values: &[&'static str]) -> FieldKind {
    FieldKind::Select(
        values
            .iter()
            .map(|value| SelectOption::new(*value, *value))
            .collect(),
    )
}

impl FormSchema for CustomerFormSchema {
    type Record = Customer;
    type Payload = CustomerDraft;

    const NOUN: &'static str = "Customer";

    fn fields(&self) -> Vec<FieldSpec> {
        vec![
            FieldSpec::new("firstName", "First Name", FieldKind::Text, true),
            FieldSpec::new("lastName", "Last Name", FieldKind::Text, true),
            FieldSpec::new("email", "Email", FieldKind::Email, true),
            FieldSpec::new("mobile", "Mobile", FieldKind::Phone, true),
            FieldSpec::new("dateOfBirth", "Date of Birth", FieldKind::Date, false),
            FieldSpec::new(
                "gender",
                "Gender",
                enum_choices(&[Gender::Male.as_str(), Gender::Female.as_str(), Gender::Other.as_str()]),
                false,
            ),
            FieldSpec::new("taxStatus", "Tax Status", self.coded(DropdownKind::TaxStatus), false),
            FieldSpec::new("occupation", "Occupation", self.coded(DropdownKind::Occupation), false),
            FieldSpec::new("city", "City", FieldKind::Text, false),
            FieldSpec::new("state", "State", self.named(DropdownKind::State), false),
            FieldSpec::new(
                "status",
                "Status",
                enum_choices(&[CustomerStatus::Active.as_str(), CustomerStatus::Inactive.as_str()]),
                true,
            ),
            FieldSpec::new("kycStatus", "KYC Status", FieldKind::Text, false),
            FieldSpec::new("accountType", "Account Type", FieldKind::Text, false),
            FieldSpec::new("panNumber", "PAN Number", FieldKind::Text, false),
        ]
    }

    fn defaults(&self) -> FieldValues {
        let mut values = FieldValues::new();
        values.insert("status".into(), CustomerStatus::default().as_str().into());
        values
    }

    fn values_of(&self, record: &Customer) -> FieldValues {
        let optional = [
            ("dateOfBirth", record.date_of_birth.map(|date| date.format("%Y-%m-%d").to_string())),
            ("gender", record.gender.map(|gender| gender.as_str().to_owned())),
            ("taxStatus", record.tax_status.clone()),
            ("occupation", record.occupation.clone()),
            ("city", record.city.clone()),
            ("state", record.state.clone()),
            ("kycStatus", record.kyc_status.clone()),
            ("accountType", record.account_type.clone()),
            ("panNumber", record.pan_number.clone()),
        ];
        let mut values: FieldValues = optional
            .into_iter()
            .filter_map(|(name, value)| value.map(|value| (name.to_owned(), value)))
            .collect();
        values.insert("firstName".into(), record.first_name.clone());
        values.insert("lastName".into(), record.last_name.clone());
        values.insert("email".into(), record.email.clone());
        values.insert("mobile".into(), record.mobile.clone());
        values.insert("status".into(), record.status.as_str().into());
        values
    }

    fn identity(&self, record: &Customer) -> String {
        record.id.clone()
    }

    fn parse(&self, values: &FieldValues) -> Result<CustomerDraft, FieldErrors> {
        let mut errors = FieldErrors::new();

        let date_of_birth = optional_input(values, "dateOfBirth").and_then(|raw| {
            NaiveDate::parse_from_str(&raw, "%Y-%m-%d").ok().or_else(|| {
                errors.insert("dateOfBirth", "Enter a valid date (YYYY-MM-DD)");
                None
            })
        });
        let gender = optional_input(values, "gender").and_then(|raw| {
            raw.parse::<Gender>().ok().or_else(|| {
                errors.insert("gender", "Select a valid gender");
                None
            })
        });
        let status = match input(values, "status") {
            "" => CustomerStatus::default(),
            raw => raw.parse::<CustomerStatus>().unwrap_or_else(|_| {
                errors.insert("status", "Select a valid status");
                CustomerStatus::default()
            }),
        };

        let draft = CustomerDraft {
            first_name: input(values, "firstName").to_owned(),
            last_name: input(values, "lastName").to_owned(),
            email: input(values, "email").to_owned(),
            mobile: input(values, "mobile").to_owned(),
            date_of_birth,
            gender,
            tax_status: optional_input(values, "taxStatus"),
            occupation: optional_input(values, "occupation"),
            city: optional_input(values, "city"),
            state: optional_input(values, "state"),
            status,
            kyc_status: optional_input(values, "kycStatus"),
            account_type: optional_input(values, "accountType"),
            pan_number: optional_input(values, "panNumber"),
        };
        errors.extend(validate_customer(&draft));
        if errors.is_empty() {
            Ok(draft)
        } else {
            Err(errors)
        }
    }
}
