//! Headless core of the WealthDesk investment admin console.
//!
//! - [`domain`]: entities, typed list queries, ports, and envelope services.
//! - [`outbound`]: in-memory and REST adapters behind the ports, plus
//!   session storage.
//! - [`view`]: render models for the data grid, panels, dialogs, and toasts.
//! - [`session`]: the authentication store and route guard.
//! - [`pages`]: page controllers wiring services into the view models.
//! - [`composition`]: picks one adapter set from [`config::AppSettings`].
//! - [`inbound`], [`middleware`], [`server`]: the mock REST server.

pub mod composition;
pub mod config;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod pages;
pub mod server;
pub mod session;
pub mod view;

pub use middleware::Trace;
