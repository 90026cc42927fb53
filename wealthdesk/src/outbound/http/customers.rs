//! Customer service over `/customers`.

use std::sync::Arc;

use async_trait::async_trait;
use pagination::{Envelope, ListEnvelope};
use reqwest::Method;

use super::client::{ApiClient, ApiError, Bearer};
use super::{folded, folded_list};
use crate::domain::messages::{
    CREATE_CUSTOMER_FAILED, DELETE_CUSTOMER_FAILED, FETCH_CUSTOMER_FAILED,
    FETCH_CUSTOMER_STATS_FAILED, FETCH_CUSTOMERS_FAILED, UPDATE_CUSTOMER_FAILED,
};
use crate::domain::ports::CustomerService;
use crate::domain::{Customer, CustomerDraft, CustomerQuery, CustomerStats};

const RESOURCE: &str = "customers";

/// [`CustomerService`] calling the REST backend.
#[derive(Clone)]
pub struct HttpCustomerService {
    api: Arc<ApiClient>,
}

impl HttpCustomerService {
    /// Adapter sharing `api` with the other HTTP services.
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    async fn fetch_list(&self, query: &CustomerQuery) -> Result<ListEnvelope<Customer>, ApiError> {
        let mut url = self.api.endpoint(&[RESOURCE])?;
        query.append_to(&mut url);
        self.api
            .execute(Method::GET, url, None::<&()>, Bearer::Stored)
            .await
    }

    async fn call<T>(
        &self,
        method: Method,
        segments: &[&str],
        draft: Option<&CustomerDraft>,
    ) -> Result<Envelope<T>, ApiError>
    where
        T: serde::de::DeserializeOwned,
    {
        let url = self.api.endpoint(segments)?;
        self.api.execute(method, url, draft, Bearer::Stored).await
    }
}

#[async_trait]
impl CustomerService for HttpCustomerService {
    async fn list(&self, query: &CustomerQuery) -> ListEnvelope<Customer> {
        folded_list(self.fetch_list(query).await, FETCH_CUSTOMERS_FAILED)
    }

    async fn get(&self, id: &str) -> Envelope<Customer> {
        folded(
            self.call(Method::GET, &[RESOURCE, id], None).await,
            FETCH_CUSTOMER_FAILED,
        )
    }

    async fn create(&self, draft: &CustomerDraft) -> Envelope<Customer> {
        folded(
            self.call(Method::POST, &[RESOURCE], Some(draft)).await,
            CREATE_CUSTOMER_FAILED,
        )
    }

    async fn update(&self, id: &str, draft: &CustomerDraft) -> Envelope<Customer> {
        folded(
            self.call(Method::PUT, &[RESOURCE, id], Some(draft)).await,
            UPDATE_CUSTOMER_FAILED,
        )
    }

    async fn delete(&self, id: &str) -> Envelope<()> {
        folded(
            self.call(Method::DELETE, &[RESOURCE, id], None).await,
            DELETE_CUSTOMER_FAILED,
        )
    }

    async fn stats(&self) -> Envelope<CustomerStats> {
        folded(
            self.call(Method::GET, &[RESOURCE, "statistics"], None).await,
            FETCH_CUSTOMER_STATS_FAILED,
        )
    }
}
