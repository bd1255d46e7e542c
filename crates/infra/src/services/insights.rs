//! Read-only aggregates over transactions for a date range

use std::sync::Arc;

use authconsole_core::RequestOptions;
use authconsole_domain::{
    AccountTrend, ApiResponse, CashFlowSummary, CategoryBreakdown, InsightsQuery,
};
use serde::de::DeserializeOwned;
use tracing::instrument;

use crate::api::{ApiClient, ApiError};

pub const INSIGHTS_PATH: &str = "/api/v1/insights";

#[derive(Debug, Clone)]
pub struct InsightsService {
    client: Arc<ApiClient>,
    options: RequestOptions,
}

impl InsightsService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client, options: RequestOptions::default() }
    }

    #[must_use]
    pub fn with_options(mut self, options: RequestOptions) -> Self {
        self.options = options;
        self
    }

    /// Income, expense and net flow per period
    pub async fn cash_flow(
        &self,
        query: &InsightsQuery,
    ) -> Result<ApiResponse<Vec<CashFlowSummary>>, ApiError> {
        self.fetch("cash-flow", query).await
    }

    /// Totals per category, with each category's share
    pub async fn category_breakdown(
        &self,
        query: &InsightsQuery,
    ) -> Result<ApiResponse<Vec<CategoryBreakdown>>, ApiError> {
        self.fetch("categories", query).await
    }

    /// Balance per account per period
    pub async fn account_trends(
        &self,
        query: &InsightsQuery,
    ) -> Result<ApiResponse<Vec<AccountTrend>>, ApiError> {
        self.fetch("accounts", query).await
    }

    #[instrument(skip(self, query), fields(from = %query.from_date, to = %query.to_date))]
    async fn fetch<T: DeserializeOwned>(
        &self,
        report: &str,
        query: &InsightsQuery,
    ) -> Result<ApiResponse<Vec<T>>, ApiError> {
        let url = format!("{INSIGHTS_PATH}/{report}");
        self.client.get(&url, &query.to_query(), self.options).await
    }
}
