//! Investment service over `/investments`.

use std::sync::Arc;

use async_trait::async_trait;
use pagination::{Envelope, ListEnvelope};
use reqwest::Method;

use super::client::{ApiClient, ApiError, Bearer};
use super::{folded, folded_list};
use crate::domain::messages::{
    CREATE_INVESTMENT_FAILED, DELETE_INVESTMENT_FAILED, FETCH_INVESTMENT_FAILED,
    FETCH_INVESTMENT_STATS_FAILED, FETCH_INVESTMENTS_FAILED, UPDATE_INVESTMENT_FAILED,
};
use crate::domain::ports::InvestmentService;
use crate::domain::{Investment, InvestmentDraft, InvestmentQuery, InvestmentStats};

const RESOURCE: &str = "investments";

/// [`InvestmentService`] calling the REST backend.
#[derive(Clone)]
pub struct HttpInvestmentService {
    api: Arc<ApiClient>,
}

impl HttpInvestmentService {
    /// Adapter sharing `api` with the other HTTP services.
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    async fn fetch_list(&self, query: &InvestmentQuery) -> Result<ListEnvelope<Investment>, ApiError> {
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
        draft: Option<&InvestmentDraft>,
    ) -> Result<Envelope<T>, ApiError>
    where
        T: serde::de::DeserializeOwned,
    {
        let url = self.api.endpoint(segments)?;
        self.api.execute(method, url, draft, Bearer::Stored).await
    }
}

#[async_trait]
impl InvestmentService for HttpInvestmentService {
    async fn list(&self, query: &InvestmentQuery) -> ListEnvelope<Investment> {
        folded_list(self.fetch_list(query).await, FETCH_INVESTMENTS_FAILED)
    }

    async fn get(&self, id: &str) -> Envelope<Investment> {
        folded(
            self.call(Method::GET, &[RESOURCE, id], None).await,
            FETCH_INVESTMENT_FAILED,
        )
    }

    async fn create(&self, draft: &InvestmentDraft) -> Envelope<Investment> {
        folded(
            self.call(Method::POST, &[RESOURCE], Some(draft)).await,
            CREATE_INVESTMENT_FAILED,
        )
    }

    async fn update(&self, id: &str, draft: &InvestmentDraft) -> Envelope<Investment> {
        folded(
            self.call(Method::PUT, &[RESOURCE, id], Some(draft)).await,
            UPDATE_INVESTMENT_FAILED,
        )
    }

    async fn delete(&self, id: &str) -> Envelope<()> {
        folded(
            self.call(Method::DELETE, &[RESOURCE, id], None).await,
            DELETE_INVESTMENT_FAILED,
        )
    }

    async fn stats(&self) -> Envelope<InvestmentStats> {
        folded(
            self.call(Method::GET, &[RESOURCE, "statistics"], None).await,
            FETCH_INVESTMENT_STATS_FAILED,
        )
    }
}
