use crate::models::{MonthlyData, Order, OrderCreate, RecentOrder, Transaction, TransactionSummary, TransactionType};

/// Profit of an order: what the customer pays minus cost and taxes.
pub fn order_profit(cost: f64, customer_price: f64, taxes: f64) -> f64 {
    customer_price - cost - taxes
}

pub trait Profit {
    fn profit(&self) -> f64;
}

impl Profit for Order {
    fn profit(&self) -> f64 {
        order_profit(self.cost, self.customer_price, self.taxes)
    }
}

impl Profit for RecentOrder {
    fn profit(&self) -> f64 {
        order_profit(self.cost, self.customer_price, self.taxes)
    }
}

impl Profit for OrderCreate {
    fn profit(&self) -> f64 {
        order_profit(self.cost, self.customer_price, self.taxes)
    }
}

/// Income/expense totals as shown on the transactions summary cards.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TransactionTotals {
    pub total_income: f64,
    pub total_expenses: f64,
    pub profit: f64,
}

impl TransactionTotals {
    pub fn new(total_income: f64, total_expenses: f64) -> Self {
        Self {
            total_income,
            total_expenses,
            profit: total_income - total_expenses,
        }
    }
}

// The server's `profit` field is ignored; the card always shows income - expenses.
impl From<&TransactionSummary> for TransactionTotals {
    fn from(summary: &TransactionSummary) -> Self {
        TransactionTotals::new(summary.total_income, summary.total_expenses)
    }
}

pub fn transaction_totals(transactions: &[Transaction]) -> TransactionTotals {
    let (income, expenses) = transactions.iter().fold((0.0, 0.0), |(inc, exp), t| match t.kind {
        TransactionType::Income => (inc + t.amount, exp),
        TransactionType::Expense => (inc, exp + t.amount),
    });
    TransactionTotals::new(income, expenses)
}

/// Profit as a percentage of revenue; zero when there was no revenue.
pub fn margin_percent(profit: f64, revenue: f64) -> f64 {
    if revenue > 0.0 {
        profit / revenue * 100.0
    } else {
        0.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonthRow {
    pub month: String,
    pub revenue: f64,
    pub expenses: f64,
    pub profit: f64,
    pub margin: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MonthlyBreakdown {
    pub rows: Vec<MonthRow>,
    pub total_revenue: f64,
    pub total_expenses: f64,
    pub net_profit: f64,
    pub overall_margin: f64,
}

pub fn monthly_breakdown(months: &[MonthlyData]) -> MonthlyBreakdown {
    let rows: Vec<MonthRow> = months
        .iter()
        .map(|m| {
            let profit = m.pv - m.uv;
            MonthRow {
                month: m.month.clone(),
                revenue: m.pv,
                expenses: m.uv,
                profit,
                margin: margin_percent(profit, m.pv),
            }
        })
        .collect();

    let total_revenue: f64 = months.iter().map(|m| m.pv).sum();
    let total_expenses: f64 = months.iter().map(|m| m.uv).sum();
    let net_profit = total_revenue - total_expenses;

    MonthlyBreakdown {
        rows,
        total_revenue,
        total_expenses,
        net_profit,
        overall_margin: margin_percent(net_profit, total_revenue),
    }
}

/// Years offered by the previous-months selector, newest first.
pub fn year_options(current_year: i32) -> Vec<i32> {
    (0..5).map(|i| current_year - i).collect()
}
