//! Headless presentation layer.
//!
//! Every component here is a state machine producing a serialisable render
//! model. Nothing in this module fetches data or touches the session; page
//! controllers feed components and react to the events they emit.

pub mod detail;
pub mod dialog;
pub mod form;
pub mod format;
pub mod grid;
pub mod text;
pub mod toast;

pub use detail::{DetailField, DetailPanel, DetailRecord, DetailSection, DetailView};
pub use dialog::{ConfirmDialog, ConfirmOutcome, ConfirmRequest, Severity};
pub use form::{
    CustomerFormSchema, FieldKind, FieldSpec, FieldValues, FieldView, FormMode, FormPanel,
    FormSchema, FormSubmission, FormView, InvestmentFormSchema, SelectOption,
};
pub use format::{NOT_AVAILABLE, format_date, format_inr, or_not_available, status_tone};
pub use grid::{
    Action, ActionMenu, Align, Cell, CheckState, Column, ColumnRender, DataGrid, GridBody,
    GridConfig, GridConfigError, GridEvent, GridView, SortState, Tone, default_actions,
};
pub use text::render_grid_text;
pub use toast::{NotificationCentre, NotificationCentreView, Toast, ToastKind, Toaster, time_ago};
