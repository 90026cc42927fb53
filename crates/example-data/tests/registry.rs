//! Integration tests for loading seed registries from disk.

#![expect(
    clippy::expect_used,
    reason = "test code uses expect for clear failure messages"
)]

use std::fs;
use std::path::Path;

use example_data::{RegistryError, SeedRegistry};
use rstest::rstest;

const VALID_JSON: &str = r#"{
    "version": 1,
    "cities": [{"city": "Jaipur", "state": "Rajasthan"}],
    "occupations": ["SERV"],
    "taxStatuses": ["IND", "HUF"],
    "seeds": [
        {"name": "desk-demo", "seed": 99, "customerCount": 4, "investmentCount": 8, "notificationCount": 2}
    ]
}"#;

#[test]
fn loads_registry_from_file() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("seeds.json");
    fs::write(&path, VALID_JSON).expect("write registry");

    let registry = SeedRegistry::from_file(&path).expect("registry loads");
    let seed = registry.find_seed("desk-demo").expect("seed found");

    assert_eq!(seed.seed(), 99);
    assert_eq!(registry.tax_statuses(), ["IND", "HUF"]);
}

#[rstest]
#[case("missing.json")]
#[case("nested/missing.json")]
fn reports_missing_file_with_path(#[case] relative: &str) {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join(relative);

    let result = SeedRegistry::from_file(&path);

    match result {
        Err(RegistryError::IoError { path: reported, .. }) => {
            assert_eq!(reported.as_path(), Path::new(&path));
        }
        other => panic!("expected IoError, got {other:?}"),
    }
}

#[test]
fn reports_unknown_seed() {
    let registry = SeedRegistry::from_json(VALID_JSON).expect("valid registry");
    assert_eq!(
        registry.find_seed("unknown"),
        Err(RegistryError::SeedNotFound {
            name: "unknown".to_owned()
        })
    );
}
