//! Error types for the example-data crate.
//!
//! This module defines semantic error enums for registry parsing and book
//! generation, using `thiserror`.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when parsing or querying a seed registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// The registry file could not be read.
    #[error("failed to read registry file at '{path}': {message}")]
    IoError {
        /// Path to the registry file.
        path: PathBuf,
        /// Description of the I/O error.
        message: String,
    },

    /// The registry JSON is malformed or missing required fields.
    #[error("invalid registry JSON: {message}")]
    ParseError {
        /// Description of the parse error.
        message: String,
    },

    /// The registry version is not supported.
    #[error("unsupported registry version: expected {expected}, found {actual}")]
    UnsupportedVersion {
        /// Expected version number.
        expected: u32,
        /// Actual version found in the registry.
        actual: u32,
    },

    /// The registry lists no cities to place customers in.
    #[error("registry contains no cities")]
    EmptyCities,

    /// A dropdown code is not an uppercase alphanumeric token.
    #[error("invalid {list} code at index {index}: {value}")]
    InvalidCode {
        /// Which list held the code (`occupations` or `taxStatuses`).
        list: &'static str,
        /// Index of the invalid code in the array.
        index: usize,
        /// The rejected code.
        value: String,
    },

    /// The registry contains no seed definitions.
    #[error("registry contains no seed definitions")]
    EmptySeeds,

    /// The requested seed name was not found in the registry.
    #[error("seed '{name}' not found in registry")]
    SeedNotFound {
        /// The seed name that was not found.
        name: String,
    },
}

/// Errors that can occur during book generation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// Failed to generate a valid customer name after maximum retries.
    #[error("failed to generate valid customer name after {max_attempts} attempts")]
    NameGenerationFailed {
        /// Number of attempts made before giving up.
        max_attempts: usize,
    },

    /// Investments were requested for a seed with no customers to own them.
    #[error("cannot generate {investment_count} investments without customers")]
    NoCustomersForInvestments {
        /// Number of investments requested.
        investment_count: usize,
    },
}
