use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::utils::de_timestamp;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let type_str = match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        };
        write!(f, "{}", type_str)
    }
}

impl FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(TransactionType::Income),
            "expense" => Ok(TransactionType::Expense),
            other => Err(format!("unknown transaction type: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionCategory {
    OrderPayment,
    DeliveryCost,
    ProductCost,
    Operational,
    Other,
}

impl fmt::Display for TransactionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let category_str = match self {
            TransactionCategory::OrderPayment => "order_payment",
            TransactionCategory::DeliveryCost => "delivery_cost",
            TransactionCategory::ProductCost => "product_cost",
            TransactionCategory::Operational => "operational",
            TransactionCategory::Other => "other",
        };
        write!(f, "{}", category_str)
    }
}

impl FromStr for TransactionCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "order_payment" => Ok(TransactionCategory::OrderPayment),
            "delivery_cost" => Ok(TransactionCategory::DeliveryCost),
            "product_cost" => Ok(TransactionCategory::ProductCost),
            "operational" => Ok(TransactionCategory::Operational),
            "other" => Ok(TransactionCategory::Other),
            other => Err(format!("unknown transaction category: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub category: TransactionCategory,
    pub amount: f64,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub reference_id: Option<String>,
    #[serde(deserialize_with = "de_timestamp")]
    pub created_at: NaiveDateTime,
    #[serde(deserialize_with = "de_timestamp")]
    pub transaction_date: NaiveDateTime,
    #[serde(default)]
    pub created_by: Option<i64>,
    #[serde(default)]
    pub created_by_username: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionCreate {
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub category: TransactionCategory,
    pub amount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_date: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TransactionUpdate {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<TransactionType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<TransactionCategory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_id: Option<String>,
}

/// `GET /transactions/summary`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionSummary {
    pub total_income: f64,
    pub total_expenses: f64,
    #[serde(default)]
    pub profit: f64,
    #[serde(default)]
    pub capital: Option<f64>,
}
