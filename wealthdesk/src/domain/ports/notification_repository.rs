//! Driven port over the notification store.

use async_trait::async_trait;
use pagination::Page;

use crate::domain::{Error, Notification, NotificationDraft, NotificationQuery};

/// Store of notifications, newest first.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationRepository: Send + Sync {
    /// One page of notifications matching `query`.
    async fn list(&self, query: &NotificationQuery) -> Result<Page<Notification>, Error>;

    /// Raise a new unread notification.
    async fn create(&self, draft: &NotificationDraft) -> Result<Notification, Error>;

    /// Mark one notification read and return it.
    async fn mark_read(&self, id: &str) -> Result<Notification, Error>;

    /// Mark every notification read, returning how many changed.
    async fn mark_all_read(&self) -> Result<u64, Error>;

    /// Remove a notification.
    async fn delete(&self, id: &str) -> Result<(), Error>;

    /// Number of unread notifications.
    async fn unread_count(&self) -> Result<u64, Error>;
}
