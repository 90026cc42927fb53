//! Seed registry types and JSON parsing.
//!
//! The registry holds the named seeds plus the reference lists (cities,
//! occupation codes, tax-status codes) that generated customers draw from.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::RegistryError;

/// Current supported registry version.
const SUPPORTED_VERSION: u32 = 1;

/// Registry bundled with the crate, used when no file is configured.
const BUILTIN_REGISTRY: &str = include_str!("../data/seeds.json");

/// A city and the state it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CityEntry {
    /// City name.
    pub city: String,
    /// State name.
    pub state: String,
}

/// A seed registry containing named seeds and reference lists.
///
/// # Example
///
/// ```
/// use example_data::SeedRegistry;
///
/// let registry = SeedRegistry::builtin().expect("bundled registry parses");
/// assert!(registry.find_seed("ledger-lark").is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedRegistry {
    version: u32,
    cities: Vec<CityEntry>,
    occupations: Vec<String>,
    tax_statuses: Vec<String>,
    seeds: Vec<SeedDefinition>,
}

impl SeedRegistry {
    /// Parses the registry bundled with the crate.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if the bundled JSON fails validation.
    pub fn builtin() -> Result<Self, RegistryError> {
        Self::from_json(BUILTIN_REGISTRY)
    }

    /// Parses a seed registry from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if:
    /// - The JSON is malformed
    /// - Required fields are missing
    /// - The version is unsupported
    /// - The city list or seed list is empty
    /// - Any code is not an uppercase alphanumeric token
    pub fn from_json(json: &str) -> Result<Self, RegistryError> {
        let raw: RawSeedRegistry =
            serde_json::from_str(json).map_err(|e| RegistryError::ParseError {
                message: e.to_string(),
            })?;

        Self::from_raw(raw)
    }

    /// Loads a seed registry from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, RegistryError> {
        let contents = fs::read_to_string(path).map_err(|e| RegistryError::IoError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        Self::from_json(&contents)
    }

    fn from_raw(raw: RawSeedRegistry) -> Result<Self, RegistryError> {
        if raw.version != SUPPORTED_VERSION {
            return Err(RegistryError::UnsupportedVersion {
                expected: SUPPORTED_VERSION,
                actual: raw.version,
            });
        }

        if raw.cities.is_empty() {
            return Err(RegistryError::EmptyCities);
        }

        let occupations = validate_codes("occupations", raw.occupations)?;
        let tax_statuses = validate_codes("taxStatuses", raw.tax_statuses)?;

        if raw.seeds.is_empty() {
            return Err(RegistryError::EmptySeeds);
        }

        let seeds = raw
            .seeds
            .into_iter()
            .map(|s| SeedDefinition {
                name: s.name,
                seed: s.seed,
                customer_count: s.customer_count,
                investment_count: s.investment_count,
                notification_count: s.notification_count,
            })
            .collect();

        Ok(Self {
            version: raw.version,
            cities: raw.cities,
            occupations,
            tax_statuses,
            seeds,
        })
    }

    /// Returns the registry version.
    #[must_use]
    pub const fn version(&self) -> u32 {
        self.version
    }

    /// Returns the cities customers may live in.
    #[must_use]
    pub fn cities(&self) -> &[CityEntry] {
        &self.cities
    }

    /// Returns the occupation codes customers may hold.
    #[must_use]
    pub fn occupations(&self) -> &[String] {
        &self.occupations
    }

    /// Returns the tax-status codes customers may hold.
    #[must_use]
    pub fn tax_statuses(&self) -> &[String] {
        &self.tax_statuses
    }

    /// Returns all seed definitions.
    #[must_use]
    pub fn seeds(&self) -> &[SeedDefinition] {
        &self.seeds
    }

    /// Finds a seed definition by name.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::SeedNotFound`] if no seed with the given name
    /// exists.
    pub fn find_seed(&self, name: &str) -> Result<&SeedDefinition, RegistryError> {
        self.seeds
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| RegistryError::SeedNotFound {
                name: name.to_owned(),
            })
    }
}

fn validate_codes(list: &'static str, codes: Vec<String>) -> Result<Vec<String>, RegistryError> {
    for (index, code) in codes.iter().enumerate() {
        let well_formed = !code.is_empty()
            && code
                .chars()
                .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit());
        if !well_formed {
            return Err(RegistryError::InvalidCode {
                list,
                index,
                value: code.clone(),
            });
        }
    }
    Ok(codes)
}

/// A named seed definition for deterministic book generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedDefinition {
    name: String,
    seed: u64,
    customer_count: usize,
    investment_count: usize,
    notification_count: usize,
}

impl SeedDefinition {
    /// Returns the seed name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the RNG seed value.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Returns the number of customers to generate.
    #[must_use]
    pub const fn customer_count(&self) -> usize {
        self.customer_count
    }

    /// Returns the number of investments to generate.
    #[must_use]
    pub const fn investment_count(&self) -> usize {
        self.investment_count
    }

    /// Returns the number of notifications to generate.
    #[must_use]
    pub const fn notification_count(&self) -> usize {
        self.notification_count
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSeedRegistry {
    version: u32,
    cities: Vec<CityEntry>,
    #[serde(default)]
    occupations: Vec<String>,
    #[serde(default)]
    tax_statuses: Vec<String>,
    seeds: Vec<RawSeedDefinition>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSeedDefinition {
    name: String,
    seed: u64,
    customer_count: usize,
    #[serde(default)]
    investment_count: usize,
    #[serde(default)]
    notification_count: usize,
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    const VALID_JSON: &str = r#"{
        "version": 1,
        "cities": [{"city": "Pune", "state": "Maharashtra"}],
        "occupations": ["PROF", "BUS"],
        "taxStatuses": ["IND"],
        "seeds": [
            {"name": "ledger-lark", "seed": 2024, "customerCount": 50, "investmentCount": 100, "notificationCount": 12},
            {"name": "quiet-quokka", "seed": 7, "customerCount": 8}
        ]
    }"#;

    #[test]
    fn parses_valid_registry() {
        let registry = SeedRegistry::from_json(VALID_JSON).expect("valid registry");

        assert_eq!(registry.version(), 1);
        assert_eq!(registry.cities().len(), 1);
        assert_eq!(registry.occupations().len(), 2);
        assert_eq!(registry.seeds().len(), 2);
    }

    #[test]
    fn optional_counts_default_to_zero() {
        let registry = SeedRegistry::from_json(VALID_JSON).expect("valid registry");
        let seed = registry.find_seed("quiet-quokka").expect("seed found");

        assert_eq!(seed.customer_count(), 8);
        assert_eq!(seed.investment_count(), 0);
        assert_eq!(seed.notification_count(), 0);
    }

    #[test]
    fn builtin_registry_parses() {
        let registry = SeedRegistry::builtin().expect("bundled registry");
        let seed = registry.find_seed("ledger-lark").expect("default seed");
        assert_eq!(seed.customer_count(), 50);
        assert_eq!(seed.investment_count(), 100);
    }

    #[rstest]
    #[case::malformed_json("not valid json")]
    #[case::missing_version(
        r#"{"cities": [], "seeds": [{"name": "a", "seed": 1, "customerCount": 1}]}"#
    )]
    fn rejects_json_with_parse_error(#[case] json: &str) {
        let result = SeedRegistry::from_json(json);
        assert!(matches!(result, Err(RegistryError::ParseError { .. })));
    }

    #[rstest]
    #[case::unsupported_version(
        r#"{"version": 99, "cities": [], "seeds": []}"#,
        RegistryError::UnsupportedVersion { expected: 1, actual: 99 }
    )]
    #[case::empty_cities(
        r#"{"version": 1, "cities": [], "seeds": [{"name": "a", "seed": 1, "customerCount": 1}]}"#,
        RegistryError::EmptyCities
    )]
    #[case::lowercase_code(
        r#"{"version": 1, "cities": [{"city": "Pune", "state": "Maharashtra"}], "occupations": ["prof"], "seeds": []}"#,
        RegistryError::InvalidCode { list: "occupations", index: 0, value: "prof".to_owned() }
    )]
    #[case::empty_seeds(
        r#"{"version": 1, "cities": [{"city": "Pune", "state": "Maharashtra"}], "seeds": []}"#,
        RegistryError::EmptySeeds
    )]
    fn rejects_invalid_registry(#[case] json: &str, #[case] expected: RegistryError) {
        let result = SeedRegistry::from_json(json);
        assert_eq!(result, Err(expected));
    }
}
