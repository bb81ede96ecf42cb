use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub monthly_profit: f64,
    pub monthly_revenue: f64,
    pub overall_capital: f64,
    pub total_clients: i64,
    pub ongoing_orders: i64,
}

/// One month of the income/expense series. `pv` is income, `uv` expenses;
/// the names are what the chart widget expects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyData {
    pub month: String,
    pub pv: f64,
    pub uv: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    pub monthly_data: Vec<MonthlyData>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentClient {
    pub id: i64,
    pub name: String,
    pub phone: String,
    pub location: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentOrder {
    pub id: i64,
    pub order_name: String,
    #[serde(default)]
    pub order_link: String,
    pub quantity: i64,
    pub cost: f64,
    pub customer_price: f64,
    pub taxes: f64,
    #[serde(default)]
    pub profit: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardData {
    pub stats: DashboardStats,
    pub chart_data: ChartData,
    pub recent_clients: Vec<RecentClient>,
    pub recent_orders: Vec<RecentOrder>,
}
