//! In-memory notification repository.

use async_trait::async_trait;
use pagination::Page;

use super::ledger::{LedgerState, MemoryLedger, sort_and_page};
use super::seed::notification_id;
use crate::domain::messages::NOTIFICATION_NOT_FOUND;
use crate::domain::ports::NotificationRepository;
use crate::domain::{Error, Notification, NotificationDraft, NotificationQuery};

fn count(n: usize) -> u64 {
    u64::try_from(n).unwrap_or(u64::MAX)
}

#[async_trait]
impl NotificationRepository for MemoryLedger {
    async fn list(&self, query: &NotificationQuery) -> Result<Page<Notification>, Error> {
        self.latency.wait().await;
        let state = self.state.read().await;
        let matching: Vec<Notification> = state
            .notifications
            .iter()
            .filter(|n| query.filter.matches(n))
            .cloned()
            .collect();
        sort_and_page(matching, query.sort.as_ref(), query.page)
    }

    async fn create(&self, draft: &NotificationDraft) -> Result<Notification, Error> {
        self.latency.wait().await;
        if draft.title.trim().is_empty() {
            return Err(Error::invalid_request("Notification title is required"));
        }
        let now = self.now();
        let mut state = self.state.write().await;
        let n = LedgerState::allocate(&mut state.next_notification);
        let notification = Notification {
            id: notification_id(n),
            title: draft.title.clone(),
            message: draft.message.clone(),
            kind: draft.kind,
            read: false,
            created_at: now,
        };
        state.notifications.insert(0, notification.clone());
        Ok(notification)
    }

    async fn mark_read(&self, id: &str) -> Result<Notification, Error> {
        self.latency.wait().await;
        let mut state = self.state.write().await;
        let notification = state
            .notifications
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or_else(|| Error::not_found(NOTIFICATION_NOT_FOUND))?;
        notification.read = true;
        Ok(notification.clone())
    }

    async fn mark_all_read(&self) -> Result<u64, Error> {
        self.latency.wait().await;
        let mut state = self.state.write().await;
        let mut changed = 0_usize;
        for notification in state.notifications.iter_mut().filter(|n| !n.read) {
            notification.read = true;
            changed = changed.saturating_add(1);
        }
        Ok(count(changed))
    }

    async fn delete(&self, id: &str) -> Result<(), Error> {
        self.latency.wait().await;
        let mut state = self.state.write().await;
        let before = state.notifications.len();
        state.notifications.retain(|n| n.id != id);
        if state.notifications.len() == before {
            return Err(Error::not_found(NOTIFICATION_NOT_FOUND));
        }
        Ok(())
    }

    async fn unread_count(&self) -> Result<u64, Error> {
        self.latency.wait().await;
        let state = self.state.read().await;
        Ok(count(state.notifications.iter().filter(|n| !n.read).count()))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for the in-memory notification store.
    use std::sync::Arc;

    use mockable::DefaultClock;
    use pagination::PageRequest;

    use super::*;
    use crate::domain::{ErrorCode, ListQuery, NotificationFilter, NotificationKind};
    use crate::outbound::memory::Latency;

    fn ledger() -> MemoryLedger {
        MemoryLedger::empty(Arc::new(DefaultClock), Latency::NONE)
    }

    fn draft(title: &str) -> NotificationDraft {
        NotificationDraft {
            title: title.to_owned(),
            message: "body".into(),
            kind: NotificationKind::Info,
        }
    }

    #[tokio::test]
    async fn newest_notifications_list_first() {
        let ledger = ledger();
        ledger.create(&draft("first")).await.expect("create");
        ledger.create(&draft("second")).await.expect("create");

        let page = ledger
            .list(&ListQuery::new(PageRequest::default(), NotificationFilter::default()))
            .await
            .expect("list");

        let titles: Vec<_> = page.items.iter().map(|n| n.title.as_str()).collect();
        assert_eq!(titles, vec!["second", "first"]);
    }

    #[tokio::test]
    async fn unread_count_tracks_mark_operations() {
        let ledger = ledger();
        let first = ledger.create(&draft("a")).await.expect("create");
        ledger.create(&draft("b")).await.expect("create");
        ledger.create(&draft("c")).await.expect("create");

        ledger.mark_read(&first.id).await.expect("mark");
        assert_eq!(ledger.unread_count().await.expect("count"), 2);

        assert_eq!(ledger.mark_all_read().await.expect("mark all"), 2);
        assert_eq!(ledger.unread_count().await.expect("count"), 0);
    }

    #[tokio::test]
    async fn unread_filter_excludes_read_items() {
        let ledger = ledger();
        let read = ledger.create(&draft("read")).await.expect("create");
        ledger.create(&draft("unread")).await.expect("create");
        ledger.mark_read(&read.id).await.expect("mark");

        let query = ListQuery::new(
            PageRequest::default(),
            NotificationFilter {
                read: Some(false),
                kind: None,
            },
        );
        let page = ledger.list(&query).await.expect("list");

        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items.first().map(|n| n.title.as_str()), Some("unread"));
    }

    #[tokio::test]
    async fn deleting_twice_reports_not_found() {
        let ledger = ledger();
        let created = ledger.create(&draft("gone")).await.expect("create");
        ledger.delete(&created.id).await.expect("delete");
        let err = ledger.delete(&created.id).await.expect_err("already gone");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }
}
