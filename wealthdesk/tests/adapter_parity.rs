//! The REST adapters and the in-memory services must agree.
//!
//! Each test signs in over HTTP, asks the mock API a question, and asks the
//! ledger behind that server the same question directly.

#![expect(
    clippy::expect_used,
    reason = "test code uses expect for clear failure messages"
)]

// Page-controller fields of the shared world are only read by the BDD suite.
#[expect(
    dead_code,
    reason = "Shared harness has fields used by other integration suites."
)]
#[path = "support/harness.rs"]
mod harness;

use std::sync::Arc;

use harness::{SharedWorld, WorldFixture, run};
use pagination::PageRequest;
use rstest::{fixture, rstest};
use wealthdesk::composition::PortSet;
use wealthdesk::domain::ports::{DropdownService, InvestmentService, NotificationService};
use wealthdesk::domain::{
    InvestmentFilter, InvestmentQuery, InvestmentType, NotificationFilter, NotificationQuery,
};
use wealthdesk::outbound::memory::{FIXTURE_EMAIL, FIXTURE_PASSWORD};

#[fixture]
fn world() -> WorldFixture {
    harness::world()
}

/// Sign in and return `(over_http, in_memory)` port sets.
fn signed_in(world: &SharedWorld) -> (PortSet, PortSet) {
    let store = Arc::clone(world.borrow().registry.store());
    assert!(
        run(world, async move { store.login(FIXTURE_EMAIL, FIXTURE_PASSWORD).await }),
        "fixture login"
    );
    let ctx = world.borrow();
    (ctx.registry.ports().clone(), ctx.backend.ports())
}

#[rstest]
#[case(InvestmentType::Sip)]
#[case(InvestmentType::Lumpsum)]
fn investment_type_filter_matches_the_store(world: WorldFixture, #[case] kind: InvestmentType) {
    let world = world.world();
    let (http, memory) = signed_in(&world);
    let query = InvestmentQuery::new(
        PageRequest::new(0, 100).expect("valid request"),
        InvestmentFilter::of_type(kind),
    );

    let (remote, local) = run(&world, async move {
        let remote = http.investments.list(&query).await;
        let local = memory.investments.list(&query).await;
        (remote, local)
    });

    assert!(remote.success, "{}", remote.message);
    assert_eq!(remote.total(), local.total());
    assert!(remote.data.iter().all(|row| row.investment_type == kind));
    let ids = |rows: &[wealthdesk::domain::Investment]| -> Vec<String> {
        rows.iter().map(|row| row.id.clone()).collect()
    };
    assert_eq!(ids(&remote.data), ids(&local.data));
}

#[rstest]
fn marking_all_read_over_http_clears_the_store(world: WorldFixture) {
    let world = world.world();
    let (http, memory) = signed_in(&world);

    let (before, changed, after, unread_rows) = run(&world, async move {
        let before = memory.notifications.unread_count().await;
        let changed = http.notifications.mark_all_read().await;
        let after = memory.notifications.unread_count().await;
        let unread = NotificationQuery::new(
            PageRequest::new(0, 100).expect("valid request"),
            NotificationFilter {
                read: Some(false),
                ..NotificationFilter::default()
            },
        );
        let unread_rows = http.notifications.list(&unread).await;
        (before, changed, after, unread_rows)
    });

    assert_eq!(changed.data, before.data);
    assert_eq!(after.data, Some(0));
    assert!(unread_rows.success);
    assert!(unread_rows.data.is_empty());
}

#[rstest]
fn dropdown_catalogue_matches_the_static_lists(world: WorldFixture) {
    let world = world.world();
    let (http, memory) = signed_in(&world);

    let (remote, local) = run(&world, async move {
        (http.dropdowns.all().await, memory.dropdowns.all().await)
    });

    assert!(remote.success, "{}", remote.message);
    assert_eq!(remote.data, local.data);
}

#[rstest]
fn requests_without_a_session_are_refused(world: WorldFixture) {
    let world = world.world();
    let http = world.borrow().registry.ports().clone();

    let envelope = run(&world, async move { http.notifications.unread_count().await });

    assert!(!envelope.success);
    assert!(envelope.data.is_none());
}
