//! Registered platforms
//!
//! A platform is an application the auth service issues credentials for.
//! Roles and profiles are granted per platform.

use std::sync::Arc;

use authconsole_core::RequestOptions;
use authconsole_domain::{ApiResponse, PageRequest, Platform, PlatformRequest};

use super::{Acknowledgement, CrudEndpoint};
use crate::api::{ApiClient, ApiError};

pub const PLATFORMS_PATH: &str = "/api/v1/platforms";

#[derive(Debug, Clone)]
pub struct PlatformService {
    endpoint: CrudEndpoint<Platform, PlatformRequest>,
}

impl PlatformService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { endpoint: CrudEndpoint::new(client, PLATFORMS_PATH) }
    }

    #[must_use]
    pub fn with_options(self, options: RequestOptions) -> Self {
        Self { endpoint: self.endpoint.with_options(options) }
    }

    pub async fn list(&self, page: &PageRequest) -> Result<ApiResponse<Vec<Platform>>, ApiError> {
        self.endpoint.list(page).await
    }

    pub async fn get(&self, id: i64) -> Result<ApiResponse<Platform>, ApiError> {
        self.endpoint.get(id).await
    }

    pub async fn create(
        &self,
        request: &PlatformRequest,
    ) -> Result<ApiResponse<Platform>, ApiError> {
        self.endpoint.create(request).await
    }

    pub async fn update(
        &self,
        id: i64,
        request: &PlatformRequest,
    ) -> Result<ApiResponse<Platform>, ApiError> {
        self.endpoint.update(id, request).await
    }

    pub async fn delete(&self, id: i64) -> Result<Acknowledgement, ApiError> {
        self.endpoint.delete(id).await
    }

    pub async fn restore(&self, id: i64) -> Result<Acknowledgement, ApiError> {
        self.endpoint.restore(id).await
    }
}
