//! Deterministic example data for the WealthDesk console.
//!
//! This crate generates believable, reproducible customer, investment, and
//! notification records from a JSON seed registry. It is deliberately
//! independent of the console's domain types; the in-memory service adapters
//! convert the seed records at start-up.
//!
//! # Overview
//!
//! The crate supports:
//!
//! - Loading seed registries from JSON files, or the bundled default
//! - Deterministic book generation using named seeds
//! - Name, email, and mobile validation matching the console's form rules
//!
//! # Example
//!
//! ```
//! use example_data::{SeedRegistry, generate_example_book};
//!
//! let json = r#"{
//!     "version": 1,
//!     "cities": [{"city": "Pune", "state": "Maharashtra"}],
//!     "occupations": ["PROF"],
//!     "taxStatuses": ["IND"],
//!     "seeds": [{"name": "test-seed", "seed": 42, "customerCount": 3,
//!                "investmentCount": 6, "notificationCount": 2}]
//! }"#;
//!
//! let registry = SeedRegistry::from_json(json).expect("valid registry");
//! let seed_def = registry.find_seed("test-seed").expect("seed exists");
//! let book = generate_example_book(&registry, seed_def).expect("generation succeeds");
//!
//! assert_eq!(book.customers.len(), 3);
//! assert_eq!(book.investments.len(), 6);
//! ```

mod error;
mod generator;
mod registry;
mod seed;
mod validation;

pub use error::{GenerationError, RegistryError};
pub use generator::generate_example_book;
pub use registry::{CityEntry, SeedDefinition, SeedRegistry};
pub use seed::{
    ExampleBook, ExampleCustomerSeed, ExampleInvestmentSeed, ExampleNotificationSeed, FrequencySeed,
    GenderSeed, InvestmentKindSeed, InvestmentStatusSeed, NotificationKindSeed, SeedDate,
};
pub use validation::{
    PERSON_NAME_MAX, PERSON_NAME_MIN, is_valid_email, is_valid_mobile, is_valid_person_name,
};
