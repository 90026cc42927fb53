//! Driving port for the notification centre.

use async_trait::async_trait;
use pagination::{Envelope, ListEnvelope};

use crate::domain::{Notification, NotificationDraft, NotificationQuery};

/// Notification use-cases consumed by the notification centre.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationService: Send + Sync {
    /// Page of notifications, optionally filtered by read state.
    async fn list(&self, query: &NotificationQuery) -> ListEnvelope<Notification>;

    /// Raise a notification.
    async fn create(&self, draft: &NotificationDraft) -> Envelope<Notification>;

    /// Mark one notification read.
    async fn mark_read(&self, id: &str) -> Envelope<Notification>;

    /// Mark everything read; `data` is the number changed.
    async fn mark_all_read(&self) -> Envelope<u64>;

    /// Delete one notification.
    async fn delete(&self, id: &str) -> Envelope<()>;

    /// Number of unread notifications.
    async fn unread_count(&self) -> Envelope<u64>;
}
