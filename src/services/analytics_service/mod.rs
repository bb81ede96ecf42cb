// src/services/analytics_service/mod.rs

pub mod compute;
pub mod reports;

pub use compute::{
    margin_percent, monthly_breakdown, order_profit, transaction_totals, year_options, MonthRow,
    MonthlyBreakdown, Profit, TransactionTotals,
};
pub use reports::{fetch_dashboard, fetch_monthly, fetch_summary};
