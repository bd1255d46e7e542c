//! Typed service modules, one per REST resource
//!
//! Every service goes through the shared [`ApiClient`], so bearer
//! injection, the busy indicator, alerting and refresh-and-replay apply
//! uniformly. Responses are returned as the full [`ApiResponse`] envelope so
//! callers can read page and CRUD metadata.
//!
//! [`ApiResponse`]: authconsole_domain::ApiResponse

pub mod accounts;
pub mod assignments;
pub mod budgets;
pub mod categories;
pub mod insights;
pub mod permissions;
pub mod platforms;
pub mod profiles;
pub mod roles;
pub mod transactions;

use std::marker::PhantomData;
use std::sync::Arc;

use authconsole_core::{RequestDescriptor, RequestOptions};
use authconsole_domain::{ApiResponse, PageRequest};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::instrument;

pub use accounts::AccountService;
pub use assignments::{PlatformProfileRoleService, PlatformRolePermissionService};
pub use budgets::BudgetService;
pub use categories::CategoryService;
pub use insights::InsightsService;
pub use permissions::PermissionService;
pub use platforms::PlatformService;
pub use profiles::ProfileService;
pub use roles::RoleService;
pub use transactions::TransactionService;

use crate::api::{ApiClient, ApiError};

/// Envelope of calls whose payload callers do not need (delete, restore)
pub type Acknowledgement = ApiResponse<serde_json::Value>;

/// Generic list/get/create/update/delete/restore over one resource path
///
/// `T` is the model the server returns and `R` the request body it accepts.
pub struct CrudEndpoint<T, R> {
    client: Arc<ApiClient>,
    base_path: &'static str,
    options: RequestOptions,
    _marker: PhantomData<fn() -> (T, R)>,
}

impl<T, R> CrudEndpoint<T, R>
where
    T: DeserializeOwned,
    R: Serialize + Sync,
{
    pub fn new(client: Arc<ApiClient>, base_path: &'static str) -> Self {
        Self { client, base_path, options: RequestOptions::default(), _marker: PhantomData }
    }

    /// Behavior flags applied to every call made through this endpoint
    #[must_use]
    pub fn with_options(mut self, options: RequestOptions) -> Self {
        self.options = options;
        self
    }

    pub fn base_path(&self) -> &'static str {
        self.base_path
    }

    pub fn options(&self) -> RequestOptions {
        self.options
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// `{base_path}/{suffix}`
    pub fn path(&self, suffix: impl std::fmt::Display) -> String {
        format!("{}/{suffix}", self.base_path)
    }

    #[instrument(skip(self), fields(path = self.base_path))]
    pub async fn list(&self, page: &PageRequest) -> Result<ApiResponse<Vec<T>>, ApiError> {
        self.list_with(page.to_query()).await
    }

    /// List with arbitrary query parameters (pagination plus filters)
    pub async fn list_with(
        &self,
        params: Vec<(String, String)>,
    ) -> Result<ApiResponse<Vec<T>>, ApiError> {
        self.client.get(self.base_path, &params, self.options).await
    }

    #[instrument(skip(self), fields(path = self.base_path))]
    pub async fn get(&self, id: i64) -> Result<ApiResponse<T>, ApiError> {
        self.client.get(&self.path(id), &[], self.options).await
    }

    #[instrument(skip(self, request), fields(path = self.base_path))]
    pub async fn create(&self, request: &R) -> Result<ApiResponse<T>, ApiError> {
        self.client.post(self.base_path, request, self.options).await
    }

    #[instrument(skip(self, request), fields(path = self.base_path))]
    pub async fn update(&self, id: i64, request: &R) -> Result<ApiResponse<T>, ApiError> {
        self.client.put(&self.path(id), request, self.options).await
    }

    #[instrument(skip(self), fields(path = self.base_path))]
    pub async fn delete(&self, id: i64) -> Result<Acknowledgement, ApiError> {
        self.client.delete(&self.path(id), self.options).await
    }

    /// Undo a soft delete
    #[instrument(skip(self), fields(path = self.base_path))]
    pub async fn restore(&self, id: i64) -> Result<Acknowledgement, ApiError> {
        let descriptor =
            RequestDescriptor::patch(self.path(format!("{id}/restore"))).with_options(self.options);
        self.client.send(descriptor).await
    }
}

impl<T, R> Clone for CrudEndpoint<T, R> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
            base_path: self.base_path,
            options: self.options,
            _marker: PhantomData,
        }
    }
}

impl<T, R> std::fmt::Debug for CrudEndpoint<T, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CrudEndpoint")
            .field("base_path", &self.base_path)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}
