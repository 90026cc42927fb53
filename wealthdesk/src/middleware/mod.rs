//! Request middleware for the mock API server.

pub mod trace;

pub use trace::Trace;
