//! Validated edit panel.
//!
//! A [`FormPanel`] keeps raw per-field input and per-field errors for one
//! record. The [`FormSchema`] decides which fields exist, how a record maps
//! onto them, and how input turns into a typed payload. The panel never
//! calls a service; a passing submit hands the payload back and the caller
//! closes the panel once persistence succeeds.

mod customer;
mod investment;

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

pub use customer::CustomerFormSchema;
pub use investment::InvestmentFormSchema;

use crate::domain::FieldErrors;

/// Raw input keyed by field name.
pub type FieldValues = BTreeMap<String, String>;

/// One choice in a select field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    /// Submitted value.
    pub value: String,
    /// Displayed text.
    pub label: String,
}

impl SelectOption {
    /// Choice submitting `value` under `label`.
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Input widget for a field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "options", rename_all = "lowercase")]
pub enum FieldKind {
    /// Free text.
    Text,
    /// Email address.
    Email,
    /// Phone number.
    Phone,
    /// Whole number.
    Number,
    /// `YYYY-MM-DD` date.
    Date,
    /// One of a fixed set of choices.
    Select(Vec<SelectOption>),
}

/// Static description of a field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldSpec {
    /// Wire name, matching the payload's camelCase key.
    pub name: &'static str,
    /// Label.
    pub label: &'static str,
    /// Widget.
    pub kind: FieldKind,
    /// Whether the field must be filled in.
    pub required: bool,
}

impl FieldSpec {
    pub(crate) const fn new(name: &'static str, label: &'static str, kind: FieldKind, required: bool) -> Self {
        Self {
            name,
            label,
            kind,
            required,
        }
    }
}

/// Field set, record mapping, and rules for one kind of form.
pub trait FormSchema {
    /// Record being edited.
    type Record;
    /// Typed payload produced by a passing submit.
    type Payload;

    /// Noun used in panel titles, for example `Customer`.
    const NOUN: &'static str;

    /// Fields in display order.
    fn fields(&self) -> Vec<FieldSpec>;

    /// Starting input for a new record.
    fn defaults(&self) -> FieldValues;

    /// Input reproducing `record`'s editable fields.
    fn values_of(&self, record: &Self::Record) -> FieldValues;

    /// Identity carried alongside an edit payload.
    fn identity(&self, record: &Self::Record) -> String;

    /// Panel heading for `mode`.
    fn title(&self, mode: FormMode) -> String {
        match mode {
            FormMode::Create => format!("Add {}", Self::NOUN),
            FormMode::Edit => format!("Edit {}", Self::NOUN),
        }
    }

    /// Validate `values` and assemble the payload.
    ///
    /// # Errors
    /// Returns every failing field with its message.
    fn parse(&self, values: &FieldValues) -> Result<Self::Payload, FieldErrors>;
}

/// Trimmed input for `name`, empty when absent.
pub(crate) fn input<'a>(values: &'a FieldValues, name: &str) -> &'a str {
    values.get(name).map_or("", |value| value.trim())
}

/// Trimmed input for `name`, `None` when blank.
pub(crate) fn optional_input(values: &FieldValues, name: &str) -> Option<String> {
    Some(input(values, name))
        .filter(|value| !value.is_empty())
        .map(str::to_owned)
}

/// Whether the panel creates or edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FormMode {
    /// New record.
    Create,
    /// Existing record.
    Edit,
}

/// A payload that passed every rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSubmission<P> {
    /// Identity of the record being edited; `None` when creating.
    pub id: Option<String>,
    /// Typed payload.
    pub payload: P,
}

/// Field render model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldView {
    /// Static description.
    #[serde(flatten)]
    pub spec: FieldSpec,
    /// Current input.
    pub value: String,
    /// Inline error, if any.
    pub error: Option<String>,
}

/// Form panel render model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormView {
    /// Whether the panel is shown.
    pub open: bool,
    /// Create or edit.
    pub mode: FormMode,
    /// Heading.
    pub title: String,
    /// Fields in display order.
    pub fields: Vec<FieldView>,
    /// Whether a submit is in flight.
    pub submitting: bool,
}

/// Side panel editing one record.
#[derive(Debug, Clone)]
pub struct FormPanel<S> {
    schema: S,
    open: bool,
    editing: Option<String>,
    values: FieldValues,
    errors: FieldErrors,
    touched: BTreeSet<String>,
    submitting: bool,
}

impl<S: FormSchema> FormPanel<S> {
    /// Closed panel over `schema`.
    pub fn new(schema: S) -> Self {
        Self {
            schema,
            open: false,
            editing: None,
            values: FieldValues::new(),
            errors: FieldErrors::new(),
            touched: BTreeSet::new(),
            submitting: false,
        }
    }

    /// The schema, for example to read select options.
    pub fn schema(&self) -> &S {
        &self.schema
    }

    /// Mutable schema, for choices that load after construction.
    pub fn schema_mut(&mut self) -> &mut S {
        &mut self.schema
    }

    /// Open empty for a new record.
    pub fn open_create(&mut self) {
        self.reset(self.schema.defaults(), None);
    }

    /// Open prefilled from `record`.
    pub fn open_edit(&mut self, record: &S::Record) {
        let values = self.schema.values_of(record);
        let id = self.schema.identity(record);
        self.reset(values, Some(id));
    }

    fn reset(&mut self, values: FieldValues, editing: Option<String>) {
        self.open = true;
        self.values = values;
        self.editing = editing;
        self.errors = FieldErrors::new();
        self.touched.clear();
        self.submitting = false;
    }

    /// Hide the panel and drop its state.
    pub fn close(&mut self) {
        self.reset(FieldValues::new(), None);
        self.open = false;
    }

    /// Whether the panel is shown.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Create or edit.
    pub fn mode(&self) -> FormMode {
        if self.editing.is_some() {
            FormMode::Edit
        } else {
            FormMode::Create
        }
    }

    /// Current input for `name`.
    pub fn value(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Current inline errors.
    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Replace the input for `name` and clear its error.
    ///
    /// Returns `false` for names the schema does not define.
    pub fn set_field(&mut self, name: &str, value: impl Into<String>) -> bool {
        if !self.schema.fields().iter().any(|field| field.name == name) {
            return false;
        }
        self.values.insert(name.to_owned(), value.into());
        self.errors.clear(name);
        true
    }

    /// Mark `name` as visited and revalidate it.
    pub fn touch(&mut self, name: &str) {
        self.touched.insert(name.to_owned());
        self.errors.clear(name);
        if let Err(errors) = self.schema.parse(&self.values) {
            if let Some(message) = errors.get(name) {
                self.errors.insert(name, message);
            }
        }
    }

    /// Validate everything and hand back the payload when every rule passes.
    ///
    /// # Errors
    /// Returns the failing fields; they also become the inline errors.
    pub fn submit(&mut self) -> Result<FormSubmission<S::Payload>, FieldErrors> {
        match self.schema.parse(&self.values) {
            Ok(payload) => {
                self.errors = FieldErrors::new();
                Ok(FormSubmission {
                    id: self.editing.clone(),
                    payload,
                })
            }
            Err(errors) => {
                self.errors = errors.clone();
                Err(errors)
            }
        }
    }

    /// Mirror whether a submit is in flight.
    pub fn set_submitting(&mut self, submitting: bool) {
        self.submitting = submitting;
    }

    /// Whether a submit is in flight.
    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Render model for the current state.
    pub fn view(&self) -> FormView {
        let mode = self.mode();
        FormView {
            open: self.open,
            mode,
            title: self.schema.title(mode),
            fields: self
                .schema
                .fields()
                .into_iter()
                .map(|spec| FieldView {
                    value: self.values.get(spec.name).cloned().unwrap_or_default(),
                    error: self.errors.get(spec.name).map(str::to_owned),
                    spec,
                })
                .collect(),
            submitting: self.submitting,
        }
    }
}
