use crate::api::{ApiClient, DASHBOARD_PATH, MONTHLY_PATH, SUMMARY_PATH};
use crate::error::ApiError;
use crate::models::{DashboardData, MonthlyData, TransactionSummary};

pub async fn fetch_dashboard(api: &ApiClient) -> Result<DashboardData, ApiError> {
    api.get_json(DASHBOARD_PATH, &[]).await
}

/// Twelve rows, Jan..Dec, for the given year.
pub async fn fetch_monthly(api: &ApiClient, year: i32) -> Result<Vec<MonthlyData>, ApiError> {
    api.get_json(MONTHLY_PATH, &[("year".to_string(), year.to_string())])
        .await
}

pub async fn fetch_summary(api: &ApiClient) -> Result<TransactionSummary, ApiError> {
    api.get_json(SUMMARY_PATH, &[]).await
}
