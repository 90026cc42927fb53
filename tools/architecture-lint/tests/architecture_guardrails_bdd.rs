//! Behaviour tests for the architecture guardrails.

use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use architecture_lint::{ArchitectureLintError, LintSource, Violation};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use tempfile::TempDir;

#[derive(Debug, Default)]
struct LintWorld {
    sources: Vec<LintSource>,
    result: Option<Result<(), ArchitectureLintError>>,
}

#[fixture]
fn world() -> Mutex<LintWorld> {
    Mutex::new(LintWorld::default())
}

fn add_source(world: &Mutex<LintWorld>, file: &str, contents: &str) {
    let mut world = world.lock().expect("world lock");
    world.sources.push(LintSource {
        file: PathBuf::from(file),
        contents: contents.to_owned(),
    });
}

#[given("an inbound module that imports the outbound layer")]
fn inbound_imports_outbound(world: &Mutex<LintWorld>) {
    add_source(
        world,
        "inbound/http/customers.rs",
        "use wealthdesk::outbound::memory::ledger; fn handler() { let _ = ledger::MemoryLedger::empty; }",
    );
}

#[given("a page controller that imports the HTTP adapters")]
fn pages_import_http_adapters(world: &Mutex<LintWorld>) {
    add_source(
        world,
        "pages/customers.rs",
        "use crate::outbound::http::HttpCustomerService; fn page() {}",
    );
}

#[given("a domain module that imports Actix Web")]
fn domain_imports_actix(world: &Mutex<LintWorld>) {
    add_source(
        world,
        "domain/customer.rs",
        "use actix_web::HttpResponse; fn handler() { let _ = HttpResponse::Ok(); }",
    );
}

#[given("an outbound module that imports the inbound layer")]
fn outbound_imports_inbound(world: &Mutex<LintWorld>) {
    add_source(
        world,
        "outbound/memory/bad_cross_boundary.rs",
        "use crate::inbound::http; fn handler() { let _ = 1; }",
    );
}

#[given("a session module whose tests use the in-memory storage adapter")]
fn session_tests_use_memory_storage(world: &Mutex<LintWorld>) {
    add_source(
        world,
        "session/store.rs",
        "use crate::domain::ports::SessionStorage;\n\
         pub fn load(_storage: &dyn SessionStorage) {}\n\
         #[cfg(test)]\n\
         mod tests { use crate::outbound::storage::MemorySessionStorage; }",
    );
}

#[given("valid domain, view, pages, and adapter modules")]
fn valid_modules(world: &Mutex<LintWorld>) {
    add_valid_modules(world);
}

#[given("valid modules mixed with multiple boundary violations")]
fn valid_modules_with_multiple_violations(world: &Mutex<LintWorld>) {
    add_valid_modules(world);
    add_source(
        world,
        "inbound/http/bad_cross_boundary.rs",
        "use wealthdesk::outbound::memory::ledger; fn handler() { let _ = ledger::MemoryLedger::empty; }",
    );
    add_source(
        world,
        "domain/bad.rs",
        "use actix_web::HttpResponse; fn handler() { let _ = HttpResponse::Ok(); }",
    );
}

fn add_valid_modules(world: &Mutex<LintWorld>) {
    add_source(
        world,
        "domain/customer.rs",
        "pub struct Customer { pub id: String } impl Customer { pub fn new(id: &str) -> Self { Self { id: id.to_owned() } } }",
    );
    add_source(
        world,
        "view/grid/mod.rs",
        "use crate::domain::customer::Customer; pub fn row_id(row: &Customer) -> &str { &row.id }",
    );
    add_source(
        world,
        "pages/customers.rs",
        "use crate::view::grid::row_id; use crate::domain::customer::Customer; fn page() { let view = Customer::new(\"ok\"); let _ = row_id(&view); }",
    );
    add_source(
        world,
        "inbound/http/customers.rs",
        "use crate::domain::customer::Customer; fn handler() { let _row = Customer::new(\"ok\"); }",
    );
    add_source(
        world,
        "outbound/memory/customers.rs",
        "use crate::domain::customer::Customer; pub struct Ledger; impl Ledger { pub fn save(&self, _row: Customer) {} }",
    );
}

#[when("the architecture lint runs")]
fn run_architecture_lint(world: &Mutex<LintWorld>) {
    let sources = {
        let world = world.lock().expect("world lock");
        world.sources.clone()
    };

    let temp_dir = TempDir::new().expect("tempdir");
    let crate_dir = temp_dir.path().join("wealthdesk");
    let src_dir = crate_dir.join("src");
    for source in &sources {
        let path = src_dir.join(&source.file);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent directories");
        }
        fs::write(&path, &source.contents).expect("write source file");
    }

    let result = architecture_lint::lint_crate_sources(&crate_dir);
    let mut world = world.lock().expect("world lock");
    world.result = Some(result);
}

#[then("the lint succeeds")]
fn lint_succeeds(world: &Mutex<LintWorld>) {
    let world = world.lock().expect("world lock");
    let outcome = world.result.as_ref().expect("lint must have run");
    assert!(outcome.is_ok(), "expected success, got: {outcome:?}");
}

fn assert_violation_in_file_contains(
    world: &Mutex<LintWorld>,
    expected_file: &str,
    expected_substring: &str,
) {
    let expected_file = PathBuf::from(expected_file);
    let violations = violations(world);
    assert!(
        violations.iter().any(|violation| {
            violation.file == expected_file && violation.message.contains(expected_substring)
        }),
        "expected violation in '{expected_file:?}' containing '{expected_substring}', got: {violations:?}"
    );
}

fn violations(world: &Mutex<LintWorld>) -> Vec<Violation> {
    let world = world.lock().expect("world lock");
    let outcome = world.result.as_ref().expect("lint must have run");
    extract_violations(outcome).expect("expected violations")
}

#[then("the lint fails due to outbound access from inbound")]
fn lint_fails_due_to_outbound_access(world: &Mutex<LintWorld>) {
    assert_violation_in_file_contains(world, "inbound/http/customers.rs", "crate::outbound");
}

#[then("the lint fails due to adapter access from pages")]
fn lint_fails_due_to_adapter_access_from_pages(world: &Mutex<LintWorld>) {
    assert_violation_in_file_contains(world, "pages/customers.rs", "crate::outbound");
}

#[then("the lint fails due to inbound access from outbound")]
fn lint_fails_due_to_inbound_access(world: &Mutex<LintWorld>) {
    assert_violation_in_file_contains(
        world,
        "outbound/memory/bad_cross_boundary.rs",
        "crate::inbound",
    );
}

#[then("the lint fails due to framework crate usage in the domain")]
fn lint_fails_due_to_framework_crate(world: &Mutex<LintWorld>) {
    assert_violation_in_file_contains(world, "domain/customer.rs", "external crate `actix_web`");
}

#[then("the lint fails")]
fn lint_fails(world: &Mutex<LintWorld>) {
    let world = world.lock().expect("world lock");
    let outcome = world.result.as_ref().expect("lint must have run");
    assert!(outcome.is_err(), "expected failure, got: {outcome:?}");
}

#[then("all boundary violations are reported")]
fn all_boundary_violations_are_reported(world: &Mutex<LintWorld>) {
    let violations = violations(world);
    assert!(
        violations.len() >= 2,
        "expected at least 2 violations, got: {violations:?}"
    );
    assert_violation_in_file_contains(
        world,
        "inbound/http/bad_cross_boundary.rs",
        "crate::outbound",
    );
    assert_violation_in_file_contains(world, "domain/bad.rs", "external crate `actix_web`");
}

fn extract_violations(outcome: &Result<(), ArchitectureLintError>) -> Option<Vec<Violation>> {
    match outcome {
        Ok(()) => None,
        Err(ArchitectureLintError::Violations(violations)) => Some(violations.clone()),
        Err(other) => panic!("expected violations error, got: {other:?}"),
    }
}

#[scenario(
    path = "tests/features/architecture_guardrails.feature",
    name = "Inbound handlers may not reach the outbound adapters"
)]
fn inbound_may_not_reach_outbound(world: Mutex<LintWorld>) {
    let _ = world;
}

#[scenario(
    path = "tests/features/architecture_guardrails.feature",
    name = "Page controllers may not name an adapter"
)]
fn pages_may_not_name_adapters(world: Mutex<LintWorld>) {
    let _ = world;
}

#[scenario(
    path = "tests/features/architecture_guardrails.feature",
    name = "The domain stays free of the HTTP framework"
)]
fn domain_stays_framework_free(world: Mutex<LintWorld>) {
    let _ = world;
}

#[scenario(
    path = "tests/features/architecture_guardrails.feature",
    name = "Outbound adapters may not reach the inbound layer"
)]
fn outbound_may_not_reach_inbound(world: Mutex<LintWorld>) {
    let _ = world;
}

#[scenario(
    path = "tests/features/architecture_guardrails.feature",
    name = "Test-only code may wire real adapters"
)]
fn test_only_code_is_exempt(world: Mutex<LintWorld>) {
    let _ = world;
}

#[scenario(
    path = "tests/features/architecture_guardrails.feature",
    name = "Well-layered modules pass"
)]
fn well_layered_modules_pass(world: Mutex<LintWorld>) {
    let _ = world;
}

#[scenario(
    path = "tests/features/architecture_guardrails.feature",
    name = "Every violation is reported at once"
)]
fn every_violation_is_reported(world: Mutex<LintWorld>) {
    let _ = world;
}
