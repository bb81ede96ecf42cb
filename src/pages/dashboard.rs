use crate::error::ApiError;
use crate::models::DashboardData;
use crate::services::analytics_service::{
    fetch_dashboard, fetch_monthly, monthly_breakdown, year_options, MonthlyBreakdown, Profit,
};
use crate::services::session_service::SessionContext;
use log::error;

/// Landing page: stat cards, revenue chart and the recent lists.
pub struct DashboardPage {
    ctx: SessionContext,
    data: Option<DashboardData>,
    error: Option<String>,
    loading: bool,
}

impl DashboardPage {
    pub fn new(ctx: SessionContext) -> Self {
        Self {
            ctx,
            data: None,
            error: None,
            loading: true,
        }
    }

    pub async fn mount(&mut self) -> Result<(), ApiError> {
        self.loading = true;
        let result = fetch_dashboard(self.ctx.api()).await;
        self.loading = false;
        match result {
            Ok(data) => {
                self.error = None;
                self.data = Some(data);
                Ok(())
            }
            Err(e) => {
                error!("Failed to load dashboard data: {}", e);
                self.error = Some(e.user_message("Failed to load dashboard data"));
                Err(e)
            }
        }
    }

    pub fn data(&self) -> Option<&DashboardData> {
        self.data.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Profit of each recent order, recomputed rather than trusted.
    pub fn recent_profits(&self) -> Vec<(i64, f64)> {
        self.data
            .iter()
            .flat_map(|d| d.recent_orders.iter())
            .map(|order| (order.id, order.profit()))
            .collect()
    }
}

/// Year-by-year monthly breakdown.
pub struct PreviousMonthsPage {
    ctx: SessionContext,
    year: i32,
    years: Vec<i32>,
    breakdown: Option<MonthlyBreakdown>,
    error: Option<String>,
}

impl PreviousMonthsPage {
    pub fn new(ctx: SessionContext, current_year: i32) -> Self {
        Self {
            ctx,
            year: current_year,
            years: year_options(current_year),
            breakdown: None,
            error: None,
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn years(&self) -> &[i32] {
        &self.years
    }

    pub fn breakdown(&self) -> Option<&MonthlyBreakdown> {
        self.breakdown.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub async fn mount(&mut self) -> Result<(), ApiError> {
        self.load().await
    }

    pub async fn select_year(&mut self, year: i32) -> Result<(), ApiError> {
        self.year = year;
        self.load().await
    }

    async fn load(&mut self) -> Result<(), ApiError> {
        match fetch_monthly(self.ctx.api(), self.year).await {
            Ok(months) => {
                self.error = None;
                self.breakdown = Some(monthly_breakdown(&months));
                Ok(())
            }
            Err(e) => {
                error!("Failed to fetch monthly data for {}: {}", self.year, e);
                self.error = Some(e.user_message("Failed to load monthly data"));
                Err(e)
            }
        }
    }
}
