//! Domain primitives, aggregates, and ports.
//!
//! Purpose: define the console's entities, typed list queries, and the
//! ports the service layer is built from. Types here know nothing about
//! HTTP, storage, or rendering; adapters and presentation layers depend on
//! this module, never the reverse.
//!
//! Public surface:
//! - Entities: [`Customer`], [`Investment`], [`Notification`], [`User`],
//!   [`DropdownOption`], plus their drafts, filters, and statistics.
//! - [`ListQuery`] and the per-entity query aliases.
//! - [`Error`] / [`ErrorCode`]: transport-agnostic failures.
//! - Envelope services implementing the driving ports over repositories.

pub mod auth;
pub mod customer;
pub mod dropdown;
pub mod error;
pub mod investment;
pub mod messages;
pub mod notification;
pub mod ports;
pub mod query;
pub mod record;
pub mod services;
pub mod trace_id;
pub mod user;
pub mod validation;

pub use self::auth::{AuthSession, LoginCredentials, LoginRequest, LoginValidationError};
pub use self::customer::{
    Customer, CustomerDraft, CustomerFilter, CustomerStats, CustomerStatus, Gender, UnknownVariant,
};
pub use self::dropdown::{DropdownCatalogue, DropdownKind, DropdownOption, option_label};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::investment::{
    CUSTOMER_NAME_SORT, Frequency, Investment, InvestmentDraft, InvestmentFilter, InvestmentStats,
    InvestmentStatus, InvestmentType,
};
pub use self::notification::{
    Notification, NotificationDraft, NotificationFilter, NotificationKind,
};
pub use self::query::{CustomerQuery, InvestmentQuery, ListQuery, NotificationQuery, QueryFilter};
pub use self::record::{compare_values, record_id, resolve_path, sort_records, value_text};
pub use self::services::{
    AuthEnvelopeService, CustomerEnvelopeService, DropdownEnvelopeService,
    InvestmentEnvelopeService, NotificationEnvelopeService,
};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::User;
pub use self::validation::{FieldErrors, validate_customer, validate_investment};
