//! Notification service over `/notifications`.

use std::sync::Arc;

use async_trait::async_trait;
use pagination::{Envelope, ListEnvelope};
use reqwest::Method;
use serde::de::DeserializeOwned;

use super::client::{ApiClient, ApiError, Bearer};
use super::{folded, folded_list};
use crate::domain::messages::{
    CREATE_NOTIFICATION_FAILED, DELETE_NOTIFICATION_FAILED, FETCH_NOTIFICATIONS_FAILED,
    UPDATE_NOTIFICATION_FAILED,
};
use crate::domain::ports::NotificationService;
use crate::domain::{Notification, NotificationDraft, NotificationQuery};

const RESOURCE: &str = "notifications";

/// [`NotificationService`] calling the REST backend.
#[derive(Clone)]
pub struct HttpNotificationService {
    api: Arc<ApiClient>,
}

impl HttpNotificationService {
    /// Adapter sharing `api` with the other HTTP services.
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    async fn call<T: DeserializeOwned>(
        &self,
        method: Method,
        segments: &[&str],
        draft: Option<&NotificationDraft>,
    ) -> Result<Envelope<T>, ApiError> {
        let url = self.api.endpoint(segments)?;
        self.api.execute(method, url, draft, Bearer::Stored).await
    }
}

#[async_trait]
impl NotificationService for HttpNotificationService {
    async fn list(&self, query: &NotificationQuery) -> ListEnvelope<Notification> {
        let result: Result<ListEnvelope<Notification>, ApiError> = async {
            let mut url = self.api.endpoint(&[RESOURCE])?;
            query.append_to(&mut url);
            self.api
                .execute(Method::GET, url, None::<&()>, Bearer::Stored)
                .await
        }
        .await;
        folded_list(result, FETCH_NOTIFICATIONS_FAILED)
    }

    async fn create(&self, draft: &NotificationDraft) -> Envelope<Notification> {
        folded(
            self.call(Method::POST, &[RESOURCE], Some(draft)).await,
            CREATE_NOTIFICATION_FAILED,
        )
    }

    async fn mark_read(&self, id: &str) -> Envelope<Notification> {
        folded(
            self.call(Method::PUT, &[RESOURCE, id, "read"], None).await,
            UPDATE_NOTIFICATION_FAILED,
        )
    }

    async fn mark_all_read(&self) -> Envelope<u64> {
        folded(
            self.call(Method::PUT, &[RESOURCE, "read-all"], None).await,
            UPDATE_NOTIFICATION_FAILED,
        )
    }

    async fn delete(&self, id: &str) -> Envelope<()> {
        folded(
            self.call(Method::DELETE, &[RESOURCE, id], None).await,
            DELETE_NOTIFICATION_FAILED,
        )
    }

    async fn unread_count(&self) -> Envelope<u64> {
        folded(
            self.call(Method::GET, &[RESOURCE, "unread-count"], None).await,
            FETCH_NOTIFICATIONS_FAILED,
        )
    }
}
