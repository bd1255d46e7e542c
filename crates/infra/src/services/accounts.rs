//! Bank and cash accounts

use std::sync::Arc;

use authconsole_core::RequestOptions;
use authconsole_domain::{Account, AccountRequest, ApiResponse, PageRequest};
use tracing::instrument;

use super::{Acknowledgement, CrudEndpoint};
use crate::api::{ApiClient, ApiError};

pub const ACCOUNTS_PATH: &str = "/api/v1/accounts";

#[derive(Debug, Clone)]
pub struct AccountService {
    endpoint: CrudEndpoint<Account, AccountRequest>,
}

impl AccountService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { endpoint: CrudEndpoint::new(client, ACCOUNTS_PATH) }
    }

    #[must_use]
    pub fn with_options(self, options: RequestOptions) -> Self {
        Self { endpoint: self.endpoint.with_options(options) }
    }

    pub async fn list(&self, page: &PageRequest) -> Result<ApiResponse<Vec<Account>>, ApiError> {
        self.endpoint.list(page).await
    }

    pub async fn get(&self, id: i64) -> Result<ApiResponse<Account>, ApiError> {
        self.endpoint.get(id).await
    }

    pub async fn create(&self, request: &AccountRequest) -> Result<ApiResponse<Account>, ApiError> {
        self.endpoint.create(request).await
    }

    pub async fn update(
        &self,
        id: i64,
        request: &AccountRequest,
    ) -> Result<ApiResponse<Account>, ApiError> {
        self.endpoint.update(id, request).await
    }

    pub async fn delete(&self, id: i64) -> Result<Acknowledgement, ApiError> {
        self.endpoint.delete(id).await
    }

    pub async fn restore(&self, id: i64) -> Result<Acknowledgement, ApiError> {
        self.endpoint.restore(id).await
    }

    /// Account type names the server accepts in `AccountRequest::account_type`
    #[instrument(skip(self))]
    pub async fn account_types(&self) -> Result<ApiResponse<Vec<String>>, ApiError> {
        let url = self.endpoint.path("types");
        self.endpoint.client().get(&url, &[], self.endpoint.options()).await
    }
}
