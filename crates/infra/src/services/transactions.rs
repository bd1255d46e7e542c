//! Transactions, filtered by account, category, type, date range or merchant

use std::sync::Arc;

use authconsole_core::RequestOptions;
use authconsole_domain::{
    ApiResponse, PageRequest, Transaction, TransactionFilter, TransactionRequest,
};
use tracing::instrument;

use super::{Acknowledgement, CrudEndpoint};
use crate::api::{ApiClient, ApiError};

pub const TRANSACTIONS_PATH: &str = "/api/v1/transactions";

#[derive(Debug, Clone)]
pub struct TransactionService {
    endpoint: CrudEndpoint<Transaction, TransactionRequest>,
}

impl TransactionService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { endpoint: CrudEndpoint::new(client, TRANSACTIONS_PATH) }
    }

    #[must_use]
    pub fn with_options(self, options: RequestOptions) -> Self {
        Self { endpoint: self.endpoint.with_options(options) }
    }

    /// One page of transactions matching `filter`
    #[instrument(skip(self))]
    pub async fn list(
        &self,
        page: &PageRequest,
        filter: &TransactionFilter,
    ) -> Result<ApiResponse<Vec<Transaction>>, ApiError> {
        let mut params = page.to_query();
        params.extend(filter.to_query());
        self.endpoint.list_with(params).await
    }

    pub async fn get(&self, id: i64) -> Result<ApiResponse<Transaction>, ApiError> {
        self.endpoint.get(id).await
    }

    pub async fn create(
        &self,
        request: &TransactionRequest,
    ) -> Result<ApiResponse<Transaction>, ApiError> {
        self.endpoint.create(request).await
    }

    pub async fn update(
        &self,
        id: i64,
        request: &TransactionRequest,
    ) -> Result<ApiResponse<Transaction>, ApiError> {
        self.endpoint.update(id, request).await
    }

    pub async fn delete(&self, id: i64) -> Result<Acknowledgement, ApiError> {
        self.endpoint.delete(id).await
    }

    /// Distinct merchant names seen so far, for autocompletion
    #[instrument(skip(self))]
    pub async fn merchants(&self) -> Result<ApiResponse<Vec<String>>, ApiError> {
        let url = self.endpoint.path("merchants");
        self.endpoint.client().get(&url, &[], self.endpoint.options()).await
    }
}
