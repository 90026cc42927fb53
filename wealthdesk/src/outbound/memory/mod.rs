//! In-memory service adapters backed by seeded example data.
//!
//! Every call waits a configurable simulated latency first, then filters,
//! sorts, and pages against shared state.

mod auth;
mod customers;
mod dropdowns;
mod investments;
mod latency;
mod ledger;
mod notifications;
mod seed;

pub use auth::{FIXTURE_EMAIL, FIXTURE_PASSWORD, FixtureAuthenticator};
pub use dropdowns::{StaticDropdowns, builtin_options};
pub use latency::Latency;
pub use ledger::MemoryLedger;
pub use seed::{SeededRecords, records_from_book};
