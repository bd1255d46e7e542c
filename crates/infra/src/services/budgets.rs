//! Budgets per category and period

use std::sync::Arc;

use authconsole_core::RequestOptions;
use authconsole_domain::{ApiResponse, PageRequest, Budget, BudgetRequest};

use super::{Acknowledgement, CrudEndpoint};
use crate::api::{ApiClient, ApiError};

pub const BUDGETS_PATH: &str = "/api/v1/budgets";

#[derive(Debug, Clone)]
pub struct BudgetService {
    endpoint: CrudEndpoint<Budget, BudgetRequest>,
}

impl BudgetService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { endpoint: CrudEndpoint::new(client, BUDGETS_PATH) }
    }

    #[must_use]
    pub fn with_options(self, options: RequestOptions) -> Self {
        Self { endpoint: self.endpoint.with_options(options) }
    }

    pub async fn list(&self, page: &PageRequest) -> Result<ApiResponse<Vec<Budget>>, ApiError> {
        self.endpoint.list(page).await
    }

    pub async fn get(&self, id: i64) -> Result<ApiResponse<Budget>, ApiError> {
        self.endpoint.get(id).await
    }

    pub async fn create(&self, request: &BudgetRequest) -> Result<ApiResponse<Budget>, ApiError> {
        self.endpoint.create(request).await
    }

    pub async fn update(
        &self,
        id: i64,
        request: &BudgetRequest,
    ) -> Result<ApiResponse<Budget>, ApiError> {
        self.endpoint.update(id, request).await
    }

    pub async fn delete(&self, id: i64) -> Result<Acknowledgement, ApiError> {
        self.endpoint.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use authconsole_domain::BudgetPeriod;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::services::test_support::{client_for, envelope};

    #[tokio::test]
    async fn update_puts_full_budget() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/api/v1/budgets/8"))
            .and(body_json(serde_json::json!({
                "categoryId": 2,
                "budgetName": "Groceries",
                "budgetAmount": "450.00",
                "budgetPeriod": "monthly",
                "startDate": "2024-01-01"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(envelope(serde_json::json!({
                "id": 8,
                "categoryId": 2,
                "budgetName": "Groceries",
                "budgetAmount": 450,
                "budgetPeriod": "monthly",
                "startDate": "2024-01-01"
            }))))
            .expect(1)
            .mount(&server)
            .await;

        let (client, _) = client_for(&server).await;
        let request = BudgetRequest {
            category_id: 2,
            budget_name: "Groceries".to_string(),
            budget_amount: Decimal::from_str("450.00").unwrap(),
            budget_period: BudgetPeriod::Monthly,
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            end_date: None,
        };

        let response = BudgetService::new(client).update(8, &request).await.unwrap();
        let budget = response.into_data().unwrap();
        assert_eq!(budget.budget_amount, Decimal::from(450));
        assert!(budget.end_date.is_none());
    }
}
