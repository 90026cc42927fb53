//! Dropdown service over `/dropdowns`.

use std::sync::Arc;

use async_trait::async_trait;
use pagination::Envelope;
use reqwest::Method;
use serde::de::DeserializeOwned;

use super::client::{ApiClient, ApiError, Bearer};
use super::folded;
use crate::domain::messages::FETCH_DROPDOWNS_FAILED;
use crate::domain::ports::DropdownService;
use crate::domain::{DropdownCatalogue, DropdownKind, DropdownOption};

/// [`DropdownService`] calling the REST backend.
#[derive(Clone)]
pub struct HttpDropdownService {
    api: Arc<ApiClient>,
}

impl HttpDropdownService {
    /// Adapter sharing `api` with the other HTTP services.
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    async fn fetch<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<Envelope<T>, ApiError> {
        let url = self.api.endpoint(segments)?;
        self.api
            .execute(Method::GET, url, None::<&()>, Bearer::Stored)
            .await
    }
}

#[async_trait]
impl DropdownService for HttpDropdownService {
    async fn options(&self, kind: DropdownKind) -> Envelope<Vec<DropdownOption>> {
        folded(
            self.fetch(&["dropdowns", kind.as_str()]).await,
            FETCH_DROPDOWNS_FAILED,
        )
    }

    async fn all(&self) -> Envelope<DropdownCatalogue> {
        folded(self.fetch(&["dropdowns"]).await, FETCH_DROPDOWNS_FAILED)
    }
}
