//! Outbound adapters implementing domain ports.
//!
//! - **memory**: seeded in-memory repositories with simulated latency
//! - **http**: service adapters over a generic REST backend
//! - **storage**: persisted session state, in memory or as a JSON file
//!
//! Adapters are thin translators between domain types and their
//! infrastructure. Business rules live in the domain.

pub mod http;
pub mod memory;
pub mod storage;
