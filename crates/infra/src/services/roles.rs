//! Roles

use std::sync::Arc;

use authconsole_core::RequestOptions;
use authconsole_domain::{ApiResponse, PageRequest, Role, RoleRequest};

use super::{Acknowledgement, CrudEndpoint};
use crate::api::{ApiClient, ApiError};

pub const ROLES_PATH: &str = "/api/v1/roles";

#[derive(Debug, Clone)]
pub struct RoleService {
    endpoint: CrudEndpoint<Role, RoleRequest>,
}

impl RoleService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { endpoint: CrudEndpoint::new(client, ROLES_PATH) }
    }

    #[must_use]
    pub fn with_options(self, options: RequestOptions) -> Self {
        Self { endpoint: self.endpoint.with_options(options) }
    }

    pub async fn list(&self, page: &PageRequest) -> Result<ApiResponse<Vec<Role>>, ApiError> {
        self.endpoint.list(page).await
    }

    pub async fn get(&self, id: i64) -> Result<ApiResponse<Role>, ApiError> {
        self.endpoint.get(id).await
    }

    pub async fn create(&self, request: &RoleRequest) -> Result<ApiResponse<Role>, ApiError> {
        self.endpoint.create(request).await
    }

    pub async fn update(
        &self,
        id: i64,
        request: &RoleRequest,
    ) -> Result<ApiResponse<Role>, ApiError> {
        self.endpoint.update(id, request).await
    }

    pub async fn delete(&self, id: i64) -> Result<Acknowledgement, ApiError> {
        self.endpoint.delete(id).await
    }

    pub async fn restore(&self, id: i64) -> Result<Acknowledgement, ApiError> {
        self.endpoint.restore(id).await
    }
}
