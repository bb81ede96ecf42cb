use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::utils::{de_opt_timestamp, de_timestamp};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Completed,
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status_str = match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Completed => "completed",
        };
        write!(f, "{}", status_str)
    }
}

/// An order as listed by `/orders`, `/orders/pending` and `/orders/completed`.
/// The `client_*` fields are joined in by list endpoints only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub client_id: i64,
    pub order_name: String,
    #[serde(default)]
    pub order_link: Option<String>,
    pub quantity: i64,
    pub cost: f64,
    pub customer_price: f64,
    #[serde(default)]
    pub taxes: f64,
    // server's copy; displays use `Order::profit()`
    #[serde(default)]
    pub profit: Option<f64>,
    pub status: OrderStatus,
    #[serde(deserialize_with = "de_timestamp")]
    pub created_at: NaiveDateTime,
    #[serde(default, deserialize_with = "de_opt_timestamp")]
    pub updated_at: Option<NaiveDateTime>,
    #[serde(default, deserialize_with = "de_opt_timestamp")]
    pub completed_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub created_by: Option<i64>,
    #[serde(default)]
    pub created_by_username: Option<String>,
    #[serde(default)]
    pub assigned_to: Option<i64>,
    #[serde(default)]
    pub assigned_to_username: Option<String>,
    #[serde(default)]
    pub client_name: Option<String>,
    #[serde(default)]
    pub client_phone: Option<String>,
    #[serde(default)]
    pub client_location: Option<String>,
    #[serde(default)]
    pub client_email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderCreate {
    pub client_id: i64,
    pub order_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_link: Option<String>,
    pub quantity: i64,
    pub cost: f64,
    pub customer_price: f64,
    pub taxes: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<i64>,
}

impl Default for OrderCreate {
    fn default() -> Self {
        OrderCreate {
            client_id: 0,
            order_name: String::new(),
            order_link: None,
            quantity: 1,
            cost: 0.0,
            customer_price: 0.0,
            taxes: 0.0,
            assigned_to: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OrderUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub taxes: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<OrderStatus>,
}

impl OrderUpdate {
    pub fn complete() -> Self {
        OrderUpdate {
            status: Some(OrderStatus::Completed),
            ..Default::default()
        }
    }
}

impl From<&Order> for OrderUpdate {
    fn from(order: &Order) -> Self {
        OrderUpdate {
            order_name: Some(order.order_name.clone()),
            order_link: order.order_link.clone(),
            quantity: Some(order.quantity),
            cost: Some(order.cost),
            customer_price: Some(order.customer_price),
            taxes: Some(order.taxes),
            status: None,
        }
    }
}
