pub mod stats;

pub use stats::{
    margin_percent, monthly_breakdown, order_profit, transaction_totals, year_options, MonthRow,
    MonthlyBreakdown, Profit, TransactionTotals,
};
