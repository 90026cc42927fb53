//! Behavioural tests driving page controllers through the REST adapters
//! against the mock API server.

#![expect(
    clippy::expect_used,
    reason = "test code uses expect for clear failure messages"
)]

#[path = "support/harness.rs"]
mod harness;

use std::sync::Arc;

use harness::{SharedWorld, WorldFixture, run};
use pagination::PageRequest;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use wealthdesk::domain::ports::{CustomerService, SessionStorage, TOKEN_KEY};
use wealthdesk::domain::{CustomerFilter, CustomerQuery, CustomerStatus};
use wealthdesk::outbound::memory::{FIXTURE_EMAIL, FIXTURE_PASSWORD};
use wealthdesk::pages::{CustomersPage, FetchOutcome};
use wealthdesk::session::Route;
use wealthdesk::view::GridBody;

#[fixture]
fn world() -> WorldFixture {
    harness::world()
}

fn take_page(world: &SharedWorld) -> CustomersPage {
    let existing = world.borrow_mut().customers.take();
    existing.unwrap_or_else(|| world.borrow().registry.customers_page())
}

fn put_page(world: &SharedWorld, page: CustomersPage) {
    world.borrow_mut().customers = Some(page);
}

fn sign_in(world: &SharedWorld, email: &str, password: &str) -> bool {
    let store = Arc::clone(world.borrow().registry.store());
    run(world, async move { store.login(email, password).await })
}

fn column_cells(page: &CustomersPage, label: &str) -> Vec<String> {
    let view = page.grid().view();
    let index = view
        .headers
        .iter()
        .position(|header| header.label == label)
        .expect("column should exist");
    match view.body {
        GridBody::Rows { rows } => rows
            .iter()
            .map(|row| row.cells[index].display().to_owned())
            .collect(),
        GridBody::Empty { .. } => Vec::new(),
    }
}

#[given("a running mock API")]
fn a_running_mock_api(world: &WorldFixture) {
    let world = world.world();
    let ctx = world.borrow();
    assert!(!ctx.registry.store().state().is_authenticated());
}

#[given("the operator is signed in")]
fn the_operator_is_signed_in(world: &WorldFixture) {
    let world = world.world();
    assert!(sign_in(&world, FIXTURE_EMAIL, FIXTURE_PASSWORD), "fixture login");
}

#[given("the operator is on the customers route")]
fn the_operator_is_on_the_customers_route(world: &WorldFixture) {
    let world = world.world();
    world
        .borrow()
        .registry
        .store()
        .navigator()
        .navigate(Route::Customers);
}

#[given("the customers page is loaded")]
fn the_customers_page_is_loaded(world: &WorldFixture) {
    load_customers(&world.world());
}

#[when("the customers page is reloaded")]
fn the_customers_page_is_reloaded(world: &WorldFixture) {
    load_customers(&world.world());
}

fn load_customers(world: &SharedWorld) {
    let mut page = take_page(world);
    let page = run(world, async move {
        page.refresh().await;
        page
    });
    put_page(world, page);
}

#[when("the operator filters customers by status \"{status}\"")]
fn the_operator_filters_by_status(world: &WorldFixture, status: String) {
    let world = world.world();
    let status: CustomerStatus = status.parse().expect("known status");
    let mut page = take_page(&world);
    let (page, outcome) = run(&world, async move {
        let outcome = page.filter_by_status(Some(status)).await;
        (page, outcome)
    });
    assert_eq!(outcome, FetchOutcome::Applied);
    put_page(&world, page);
}

#[when("the operator chooses \"{action}\" on the first row")]
fn the_operator_chooses_on_the_first_row(world: &WorldFixture, action: String) {
    let world = world.world();
    let mut page = take_page(&world);
    let chosen = page.grid().data().first().expect("a first row").id.clone();
    page.grid_mut().open_menu(0).expect("menu opens");
    let event = page.grid_mut().choose_action(&action).expect("action enabled");
    let page = run(&world, async move {
        page.handle(event).await;
        page
    });
    let mut ctx = world.borrow_mut();
    ctx.chosen = Some(chosen);
    ctx.customers = Some(page);
}

#[when("the operator confirms")]
fn the_operator_confirms(world: &WorldFixture) {
    let world = world.world();
    let mut page = take_page(&world);
    let (page, deleted) = run(&world, async move {
        let deleted = page.confirm_delete().await;
        (page, deleted)
    });
    assert!(deleted, "delete should succeed");
    put_page(&world, page);
}

#[when("the stored token is replaced with \"{token}\"")]
fn the_stored_token_is_replaced(world: &WorldFixture, token: String) {
    let world = world.world();
    world
        .borrow()
        .storage
        .set(TOKEN_KEY, &token)
        .expect("storage write");
}

#[when("the operator signs in with \"{email}\" and \"{password}\"")]
fn the_operator_signs_in_with(world: &WorldFixture, email: String, password: String) {
    let world = world.world();
    let accepted = sign_in(&world, &email, &password);
    world.borrow_mut().login_accepted = Some(accepted);
}

#[then("every Status cell reads \"{status}\"")]
fn every_status_cell_reads(world: &WorldFixture, status: String) {
    let world = world.world();
    let ctx = world.borrow();
    let page = ctx.customers.as_ref().expect("page loaded");
    let cells = column_cells(page, "Status");
    assert!(!cells.is_empty(), "seed should have {status} customers");
    assert!(cells.iter().all(|cell| *cell == status), "cells: {cells:?}");
}

#[then("the grid holds every active customer in the store")]
fn the_grid_holds_every_active_customer(world: &WorldFixture) {
    let world = world.world();
    let customers = Arc::clone(&world.borrow().backend.ports().customers);
    let query = CustomerQuery::new(
        PageRequest::new(0, 100).expect("valid request"),
        CustomerFilter {
            status: Some(CustomerStatus::Active),
            ..CustomerFilter::default()
        },
    );
    let direct = run(&world, async move { customers.list(&query).await });
    assert!(direct.success);

    let ctx = world.borrow();
    let page = ctx.customers.as_ref().expect("page loaded");
    let shown = page.grid().data().len();
    let expected = usize::try_from(direct.total()).expect("total fits").min(10);
    assert_eq!(shown, expected);
    assert_eq!(page.grid().view().footer.map(|footer| footer.total), Some(direct.total()));
}

#[then("a confirmation titled \"{title}\" is open")]
fn a_confirmation_is_open(world: &WorldFixture, title: String) {
    let world = world.world();
    let ctx = world.borrow();
    let page = ctx.customers.as_ref().expect("page loaded");
    assert!(page.confirm().is_open());
    let request = page.confirm().request().expect("request shown");
    assert_eq!(request.title, title);
}

#[then("the chosen customer is gone from the store and the grid")]
fn the_chosen_customer_is_gone(world: &WorldFixture) {
    let world = world.world();
    let id = world.borrow().chosen.clone().expect("a chosen row");
    let customers = Arc::clone(&world.borrow().backend.ports().customers);
    let lookup = id.clone();
    let envelope = run(&world, async move { customers.get(&lookup).await });
    assert!(!envelope.success, "{id} should be deleted");

    let ctx = world.borrow();
    let page = ctx.customers.as_ref().expect("page loaded");
    assert!(!page.confirm().is_open());
    assert!(page.grid().data().iter().all(|customer| customer.id != id));
}

#[then("the latest toast reads \"{message}\"")]
fn the_latest_toast_reads(world: &WorldFixture, message: String) {
    let world = world.world();
    let mut ctx = world.borrow_mut();
    let page = ctx.customers.as_mut().expect("page loaded");
    let toasts = page.toaster_mut().visible();
    assert_eq!(toasts.last().map(|toast| toast.message.as_str()), Some(message.as_str()));
}

#[then("the operator is signed out")]
fn the_operator_is_signed_out(world: &WorldFixture) {
    let world = world.world();
    let state = world.borrow().registry.store().state();
    assert!(!state.is_authenticated());
    assert!(state.token.is_none());
}

#[then("the operator is sent to the login route")]
fn the_operator_is_sent_to_login(world: &WorldFixture) {
    let world = world.world();
    let route = world.borrow().registry.store().navigator().current();
    assert_eq!(route, Route::Login);
}

#[then("no token is persisted")]
fn no_token_is_persisted(world: &WorldFixture) {
    let world = world.world();
    let stored = world.borrow().storage.get(TOKEN_KEY).expect("storage read");
    assert_eq!(stored, None);
}

#[then("the login is refused with \"{message}\"")]
fn the_login_is_refused_with(world: &WorldFixture, message: String) {
    let world = world.world();
    let ctx = world.borrow();
    assert_eq!(ctx.login_accepted, Some(false));
    assert_eq!(ctx.registry.store().state().error.as_deref(), Some(message.as_str()));
}

#[scenario(
    path = "tests/features/console_over_http.feature",
    name = "Filtering customers by status"
)]
fn filtering_customers_by_status(world: WorldFixture) {
    drop(world);
}

#[scenario(
    path = "tests/features/console_over_http.feature",
    name = "Deleting a customer from its row menu"
)]
fn deleting_a_customer(world: WorldFixture) {
    drop(world);
}

#[scenario(
    path = "tests/features/console_over_http.feature",
    name = "A rejected token signs the operator out"
)]
fn rejected_token_signs_out(world: WorldFixture) {
    drop(world);
}

#[scenario(
    path = "tests/features/console_over_http.feature",
    name = "Wrong password keeps the operator signed out"
)]
fn wrong_password_keeps_signed_out(world: WorldFixture) {
    drop(world);
}
