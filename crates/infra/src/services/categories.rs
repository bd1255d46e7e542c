//! Expense categories

use std::sync::Arc;

use authconsole_core::RequestOptions;
use authconsole_domain::{ApiResponse, PageRequest, Category, CategoryRequest};

use super::{Acknowledgement, CrudEndpoint};
use crate::api::{ApiClient, ApiError};

pub const CATEGORIES_PATH: &str = "/api/v1/categories";

#[derive(Debug, Clone)]
pub struct CategoryService {
    endpoint: CrudEndpoint<Category, CategoryRequest>,
}

impl CategoryService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { endpoint: CrudEndpoint::new(client, CATEGORIES_PATH) }
    }

    #[must_use]
    pub fn with_options(self, options: RequestOptions) -> Self {
        Self { endpoint: self.endpoint.with_options(options) }
    }

    pub async fn list(&self, page: &PageRequest) -> Result<ApiResponse<Vec<Category>>, ApiError> {
        self.endpoint.list(page).await
    }

    pub async fn get(&self, id: i64) -> Result<ApiResponse<Category>, ApiError> {
        self.endpoint.get(id).await
    }

    pub async fn create(
        &self,
        request: &CategoryRequest,
    ) -> Result<ApiResponse<Category>, ApiError> {
        self.endpoint.create(request).await
    }

    pub async fn update(
        &self,
        id: i64,
        request: &CategoryRequest,
    ) -> Result<ApiResponse<Category>, ApiError> {
        self.endpoint.update(id, request).await
    }

    pub async fn delete(&self, id: i64) -> Result<Acknowledgement, ApiError> {
        self.endpoint.delete(id).await
    }
}
