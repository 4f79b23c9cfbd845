//! Order model and status progression

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Order status, monotonic: pending → served → billed
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Served,
    Billed,
}

impl OrderStatus {
    /// Status never moves backward, and billed is terminal
    pub fn can_advance_to(self, next: OrderStatus) -> bool {
        self != OrderStatus::Billed && next >= self
    }

    pub fn is_billed(self) -> bool {
        self == OrderStatus::Billed
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Served => "served",
            OrderStatus::Billed => "billed",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Order line item, copied from the menu at creation time so later menu
/// edits never touch existing orders
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    pub item_name: String,
    pub quantity: i32,
    /// Unit price in currency units
    pub price: f64,
    /// quantity × price, computed server-side
    pub subtotal: f64,
}

/// Order placed against a table.
///
/// `customer_id` is `None` for walk-in guest orders, which have no credit
/// ledger. A billed order is immutable and non-deletable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub table_id: i64,
    pub customer_id: Option<i64>,
    pub items: Vec<OrderItem>,
    pub status: OrderStatus,
    /// Sum of item subtotals, computed server-side
    pub total: f64,
    #[serde(default)]
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// New line item payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewOrderItem {
    #[validate(length(min = 1, message = "item name is required"))]
    pub item_name: String,
    #[validate(range(min = 1, message = "quantity must be at least 1"))]
    pub quantity: i32,
    #[validate(range(min = 0.0, message = "price must not be negative"))]
    pub price: f64,
}

/// Create order payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct OrderCreate {
    pub table_id: i64,
    pub customer_id: Option<i64>,
    #[validate(length(min = 1, message = "order needs at least one item"), nested)]
    pub items: Vec<NewOrderItem>,
    #[serde(default)]
    pub notes: String,
}

/// Update order payload; both fields optional
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderUpdate {
    pub status: Option<OrderStatus>,
    pub notes: Option<String>,
}

/// Query filters for `GET /orders`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderFilter {
    pub status: Option<OrderStatus>,
    pub table_id: Option<i64>,
    pub customer_id: Option<i64>,
}

/// Response of `GET /tables/{id}/orders`: unbilled orders plus their sum
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableOrders {
    pub table_id: i64,
    pub orders: Vec<Order>,
    pub total: f64,
}
