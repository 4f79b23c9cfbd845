//! Payment model and payout payloads

use super::table::Table;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// How money was collected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    #[default]
    Cash,
    Online,
    Card,
    Upi,
}

/// Record of money collected against a customer, optionally linked to an
/// order. Append-only; never mutated by normal flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    pub id: i64,
    /// `None` for guest settlements with no ledger
    pub customer_id: Option<i64>,
    pub order_id: Option<i64>,
    pub amount: f64,
    pub method: PaymentMethod,
    #[serde(default)]
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create payment payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PaymentCreate {
    pub customer_id: Option<i64>,
    pub order_id: Option<i64>,
    #[validate(range(min = 0.0, message = "amount must not be negative"))]
    pub amount: f64,
    #[serde(default)]
    pub method: PaymentMethod,
    #[serde(default)]
    pub notes: String,
}

/// Settlement request for `POST /tables/{id}/payout`.
///
/// `method` is `None` when nothing is collected and the whole bill defers
/// to the customer ledger.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PayoutRequest {
    #[validate(range(min = 0.0, message = "amount must not be negative"))]
    pub amount: f64,
    #[serde(default)]
    pub method: Option<PaymentMethod>,
    #[serde(default)]
    pub notes: String,
}

/// Settlement result of `POST /tables/{id}/payout`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayoutResponse {
    pub billed_orders: Vec<i64>,
    pub payment: Option<Payment>,
    /// Shortfall attributed to the customer ledger
    pub deferred_credit: f64,
    pub table: Table,
}
