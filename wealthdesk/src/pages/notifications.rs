//! Notifications page and the bell-icon centre it keeps in step.

use std::sync::Arc;

use mockable::Clock;
use pagination::{ListEnvelope, PageRequest};
use tracing::{debug, warn};

use super::listing::{FetchOutcome, Listing, ListingFollowUp};
use super::sequence::Ticket;
use crate::domain::ports::NotificationService;
use crate::domain::{Notification, NotificationFilter, NotificationKind, NotificationQuery};
use crate::view::grid::DELETE_ACTION;
use crate::view::{
    Action, Cell, Column, DataGrid, GridConfig, GridEvent, NotificationCentre, Tone, Toaster,
    time_ago,
};

/// Row action marking one notification read.
pub const MARK_READ_ACTION: &str = "markRead";

/// Notifications listed in the bell popover.
pub const RECENT_LIMIT: u32 = 5;

/// Tabs above the list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NotificationTab {
    /// Everything.
    #[default]
    All,
    /// Unread only.
    Unread,
    /// Read only.
    Read,
}

impl NotificationTab {
    const fn read_filter(self) -> Option<bool> {
        match self {
            Self::All => None,
            Self::Unread => Some(false),
            Self::Read => Some(true),
        }
    }
}

/// Tallies of a bulk action over the selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BulkOutcome {
    /// Rows the service accepted.
    pub succeeded: usize,
    /// Rows the service rejected.
    pub failed: usize,
}

const fn kind_tone(kind: NotificationKind) -> Tone {
    match kind {
        NotificationKind::Info => Tone::Info,
        NotificationKind::Success => Tone::Success,
        NotificationKind::Warning => Tone::Warning,
        NotificationKind::Error => Tone::Error,
    }
}

fn notification_columns(clock: Arc<dyn Clock>) -> Vec<Column<Notification>> {
    vec![
        Column::formatted("type", "Type", |_, row: &Notification| {
            Cell::badge(row.kind.as_str(), kind_tone(row.kind))
        })
        .width(Some(90), None),
        Column::plain("title", "Title").width(Some(160), None),
        Column::plain("message", "Message").width(Some(240), Some(60)),
        Column::formatted("read", "Status", |_, row: &Notification| {
            if row.read {
                Cell::badge("read", Tone::Default)
            } else {
                Cell::badge("unread", Tone::Info)
            }
        }),
        Column::formatted("createdAt", "Received", move |_, row: &Notification| {
            Cell::text(time_ago(row.created_at, clock.utc()))
        })
        .width(Some(120), None),
    ]
}

fn notification_actions() -> Vec<Action<Notification>> {
    vec![
        Action::new(MARK_READ_ACTION, "mark_email_read", "Mark as read")
            .hidden_when(|row: &Notification| row.read),
        Action::new(DELETE_ACTION, "delete", "Delete").tone(Tone::Error),
    ]
}

/// Full notification list with tabs, bulk actions, and the bell centre.
pub struct NotificationsPage {
    notifications: Arc<dyn NotificationService>,
    clock: Arc<dyn Clock>,
    listing: Listing<Notification, NotificationFilter>,
    tab: NotificationTab,
    centre: NotificationCentre,
    toaster: Toaster,
}

impl NotificationsPage {
    /// Page on the "All" tab.
    pub fn new(notifications: Arc<dyn NotificationService>, clock: Arc<dyn Clock>) -> Self {
        let config = GridConfig::new(notification_columns(Arc::clone(&clock)), "id")
            .actions(notification_actions())
            .selectable(true)
            .empty_state_message("No notifications found");
        Self {
            notifications,
            listing: Listing::new(config),
            tab: NotificationTab::All,
            centre: NotificationCentre::new(),
            toaster: Toaster::new(Arc::clone(&clock)),
            clock,
        }
    }

    /// The grid.
    pub fn grid(&self) -> &DataGrid<Notification> {
        self.listing.grid()
    }

    /// Mutable grid, for selection and menus.
    pub fn grid_mut(&mut self) -> &mut DataGrid<Notification> {
        self.listing.grid_mut()
    }

    /// Active tab.
    pub fn tab(&self) -> NotificationTab {
        self.tab
    }

    /// Bell-icon centre.
    pub fn centre(&self) -> &NotificationCentre {
        &self.centre
    }

    /// Mutable centre, for opening and closing the popover.
    pub fn centre_mut(&mut self) -> &mut NotificationCentre {
        &mut self.centre
    }

    /// Toasts raised by this page.
    pub fn toaster_mut(&mut self) -> &mut Toaster {
        &mut self.toaster
    }

    /// Current time from the page clock.
    pub fn now(&self) -> chrono::DateTime<chrono::Utc> {
        self.clock.utc()
    }

    /// Start a fetch for the current tab and cursor.
    pub fn begin_fetch(&mut self) -> (Ticket, NotificationQuery) {
        self.listing.begin_fetch()
    }

    /// Apply a list response, raising a toast when it failed.
    pub fn apply_fetch(&mut self, ticket: Ticket, envelope: ListEnvelope<Notification>) -> FetchOutcome {
        let outcome = self.listing.apply_fetch(ticket, envelope);
        if let FetchOutcome::Failed(message) = &outcome {
            self.toaster.error(message.clone());
        }
        outcome
    }

    /// Fetch the list and resynchronise the bell centre.
    pub async fn refresh(&mut self) -> FetchOutcome {
        let (ticket, query) = self.begin_fetch();
        let envelope = self.notifications.list(&query).await;
        let outcome = self.apply_fetch(ticket, envelope);
        self.refresh_centre().await;
        outcome
    }

    /// Reload the popover's recent items and unread badge.
    pub async fn refresh_centre(&mut self) {
        let recent = PageRequest::new(0, RECENT_LIMIT).unwrap_or_default();
        let envelope = self
            .notifications
            .list(&NotificationQuery::new(recent, NotificationFilter::default()))
            .await;
        if envelope.success {
            self.centre.set_recent(envelope.data);
        } else {
            warn!(message = %envelope.message, "recent notifications unavailable");
        }
        match self.notifications.unread_count().await.into_result() {
            Ok(count) => self.centre.set_unread(count.unwrap_or_default()),
            Err(message) => warn!(%message, "unread count unavailable"),
        }
    }

    /// Switch tab and fetch from the first page.
    pub async fn select_tab(&mut self, tab: NotificationTab) -> FetchOutcome {
        self.tab = tab;
        self.listing.update_filter(|filter| filter.read = tab.read_filter());
        self.refresh().await
    }

    /// React to a grid interaction.
    pub async fn handle(&mut self, event: GridEvent<Notification>) {
        match self.listing.handle(event) {
            ListingFollowUp::Refetch => {
                self.refresh().await;
            }
            ListingFollowUp::Activated(row) if !row.read => {
                self.mark_read(&row.id).await;
            }
            ListingFollowUp::Action { action, row } => match action.as_str() {
                MARK_READ_ACTION => {
                    self.mark_read(&row.id).await;
                }
                DELETE_ACTION => {
                    self.delete(&row.id).await;
                }
                other => debug!(action = other, "unhandled notification action"),
            },
            ListingFollowUp::Activated(_) | ListingFollowUp::Nothing => {}
        }
    }

    /// Mark one notification read.
    pub async fn mark_read(&mut self, id: &str) -> bool {
        let envelope = self.notifications.mark_read(id).await;
        if envelope.success {
            self.centre.mark_read(id);
            self.refresh().await;
            true
        } else {
            self.toaster.error(envelope.message);
            false
        }
    }

    /// Mark every notification read.
    pub async fn mark_all_read(&mut self) -> bool {
        let envelope = self.notifications.mark_all_read().await;
        if envelope.success {
            self.centre.mark_all_read();
            self.toaster.success(envelope.message);
            self.refresh().await;
            true
        } else {
            self.toaster.error(envelope.message);
            false
        }
    }

    /// Delete one notification.
    pub async fn delete(&mut self, id: &str) -> bool {
        let envelope = self.notifications.delete(id).await;
        if envelope.success {
            self.toaster.success(envelope.message);
            self.refresh().await;
            true
        } else {
            self.toaster.error(envelope.message);
            false
        }
    }

    /// Mark every selected row read.
    pub async fn mark_selected_read(&mut self) -> BulkOutcome {
        let ids: Vec<String> = self.listing.grid().selection().iter().cloned().collect();
        let mut outcome = BulkOutcome::default();
        for id in ids {
            if self.notifications.mark_read(&id).await.success {
                self.centre.mark_read(&id);
                outcome.succeeded += 1;
            } else {
                outcome.failed += 1;
            }
        }
        self.finish_bulk(outcome, "marked as read").await;
        outcome
    }

    /// Delete every selected row.
    pub async fn delete_selected(&mut self) -> BulkOutcome {
        let ids: Vec<String> = self.listing.grid().selection().iter().cloned().collect();
        let mut outcome = BulkOutcome::default();
        for id in ids {
            if self.notifications.delete(&id).await.success {
                outcome.succeeded += 1;
            } else {
                outcome.failed += 1;
            }
        }
        self.finish_bulk(outcome, "deleted").await;
        outcome
    }

    async fn finish_bulk(&mut self, outcome: BulkOutcome, verb: &str) {
        if outcome.succeeded > 0 {
            let noun = if outcome.succeeded == 1 { "notification" } else { "notifications" };
            self.toaster.success(format!("{} {noun} {verb}", outcome.succeeded));
        }
        if outcome.failed > 0 {
            self.toaster.error(format!("{} could not be {verb}", outcome.failed));
        }
        self.listing.grid_mut().select_all(false);
        self.refresh().await;
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use mockable::MockClock;
    use pagination::{Envelope, paginate};
    use rstest::{fixture, rstest};

    use super::*;
    use crate::domain::ports::MockNotificationService;
    use crate::view::GridBody;

    fn clock() -> Arc<dyn Clock> {
        let mut clock = MockClock::new();
        clock
            .expect_utc()
            .returning(|| Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).single().expect("timestamp"));
        Arc::new(clock)
    }

    fn notification(id: &str, read: bool, minutes_ago: i64) -> Notification {
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).single().expect("timestamp");
        Notification {
            id: id.into(),
            title: format!("Title {id}"),
            message: "Body".into(),
            kind: NotificationKind::Info,
            read,
            created_at: now - chrono::TimeDelta::minutes(minutes_ago),
        }
    }

    #[fixture]
    fn inbox() -> Vec<Notification> {
        vec![
            notification("n1", false, 5),
            notification("n2", true, 120),
            notification("n3", false, 2_880),
        ]
    }

    fn serve(service: &mut MockNotificationService, inbox: Vec<Notification>) {
        let unread = u64::try_from(inbox.iter().filter(|item| !item.read).count()).expect("count fits");
        service.expect_list().returning(move |query| {
            let rows = inbox
                .iter()
                .filter(|item| query.filter.matches(item))
                .cloned()
                .collect();
            ListEnvelope::from_page("ok", paginate(rows, query.page))
        });
        service
            .expect_unread_count()
            .returning(move || Envelope::ok("ok", unread));
    }

    #[rstest]
    #[tokio::test]
    async fn unread_tab_lists_unread_rows(inbox: Vec<Notification>) {
        let mut service = MockNotificationService::new();
        serve(&mut service, inbox);
        let mut page = NotificationsPage::new(Arc::new(service), clock());

        page.select_tab(NotificationTab::Unread).await;
        let GridBody::Rows { rows } = page.grid().view().body else {
            panic!("expected rows");
        };
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].cells[4].display(), "5 minutes ago");
        assert_eq!(rows[1].cells[4].display(), "2 days ago");
        assert_eq!(page.centre().unread(), 2);
        assert_eq!(page.centre().view(page.now()).items.len(), 3);
    }

    #[rstest]
    #[tokio::test]
    async fn read_rows_hide_mark_read(inbox: Vec<Notification>) {
        let mut service = MockNotificationService::new();
        serve(&mut service, inbox);
        let mut page = NotificationsPage::new(Arc::new(service), clock());
        page.refresh().await;

        let menu = page.grid_mut().open_menu(1).expect("menu");
        let ids: Vec<&str> = menu.items().iter().map(|item| item.id.as_str()).collect();
        assert_eq!(ids, vec![DELETE_ACTION]);
    }

    #[rstest]
    #[tokio::test]
    async fn bulk_mark_read_counts_failures(inbox: Vec<Notification>) {
        let mut service = MockNotificationService::new();
        serve(&mut service, inbox);
        service.expect_mark_read().returning(|id| {
            if id == "n1" {
                Envelope::ok("Notification marked as read", notification("n1", true, 5))
            } else {
                Envelope::failure("Notification not found")
            }
        });
        let mut page = NotificationsPage::new(Arc::new(service), clock());
        page.refresh().await;
        page.grid_mut().toggle_row("n1");
        page.grid_mut().toggle_row("n3");

        let outcome = page.mark_selected_read().await;
        assert_eq!(outcome, BulkOutcome { succeeded: 1, failed: 1 });
        assert!(page.grid().selection().is_empty());
        assert_eq!(
            page.toaster_mut().latest().map(|toast| toast.message.clone()),
            Some("1 could not be marked as read".to_owned())
        );
    }

    #[tokio::test]
    async fn mark_all_read_clears_badge() {
        let mut service = MockNotificationService::new();
        serve(&mut service, Vec::new());
        service
            .expect_mark_all_read()
            .returning(|| Envelope::ok("All notifications marked as read", 2));
        let mut page = NotificationsPage::new(Arc::new(service), clock());
        page.centre_mut().set_unread(2);

        assert!(page.mark_all_read().await);
        assert_eq!(page.centre().unread(), 0);
        assert!(!page.centre().view(page.now()).can_mark_all);
    }
}
