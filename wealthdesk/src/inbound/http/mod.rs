//! HTTP inbound adapter exposing the mock REST surface.
//!
//! Handlers translate requests into repository port calls and answer with
//! the same `{ success, message, data }` envelopes the HTTP service adapters
//! consume. Every route except login and `/health` requires a bearer token.

pub mod auth;
pub mod customers;
pub mod dropdowns;
pub mod error;
pub mod health;
pub mod investments;
pub mod notifications;
pub mod params;
pub mod routes;
pub mod state;
#[cfg(test)]
pub mod test_utils;

pub use error::ApiResult;
pub use health::HealthState;
pub use state::HttpState;
