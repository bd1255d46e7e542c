//! Permissions

use std::sync::Arc;

use authconsole_core::RequestOptions;
use authconsole_domain::{ApiResponse, PageRequest, Permission, PermissionRequest};

use super::{Acknowledgement, CrudEndpoint};
use crate::api::{ApiClient, ApiError};

pub const PERMISSIONS_PATH: &str = "/api/v1/permissions";

#[derive(Debug, Clone)]
pub struct PermissionService {
    endpoint: CrudEndpoint<Permission, PermissionRequest>,
}

impl PermissionService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { endpoint: CrudEndpoint::new(client, PERMISSIONS_PATH) }
    }

    #[must_use]
    pub fn with_options(self, options: RequestOptions) -> Self {
        Self { endpoint: self.endpoint.with_options(options) }
    }

    pub async fn list(&self, page: &PageRequest) -> Result<ApiResponse<Vec<Permission>>, ApiError> {
        self.endpoint.list(page).await
    }

    pub async fn get(&self, id: i64) -> Result<ApiResponse<Permission>, ApiError> {
        self.endpoint.get(id).await
    }

    pub async fn create(
        &self,
        request: &PermissionRequest,
    ) -> Result<ApiResponse<Permission>, ApiError> {
        self.endpoint.create(request).await
    }

    pub async fn update(
        &self,
        id: i64,
        request: &PermissionRequest,
    ) -> Result<ApiResponse<Permission>, ApiError> {
        self.endpoint.update(id, request).await
    }

    pub async fn delete(&self, id: i64) -> Result<Acknowledgement, ApiError> {
        self.endpoint.delete(id).await
    }

    pub async fn restore(&self, id: i64) -> Result<Acknowledgement, ApiError> {
        self.endpoint.restore(id).await
    }
}
