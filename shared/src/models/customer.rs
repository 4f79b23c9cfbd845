//! Customer model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Registered customer with a running credit balance (amount owed to the
/// cafe). The balance is owned by the backend; clients only read it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub phone: String,
    pub credit_balance: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Customer {
    /// Whether the customer currently owes money
    pub fn has_outstanding_balance(&self) -> bool {
        self.credit_balance > 0.0
    }
}

/// Create customer payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CustomerCreate {
    #[validate(length(min = 1, message = "customer name is required"))]
    pub name: String,
    #[serde(default)]
    pub phone: String,
}

/// Update customer payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CustomerUpdate {
    pub name: Option<String>,
    pub phone: Option<String>,
}

/// Response shape of `GET /customers/{id}/balance`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerBalance {
    pub customer_id: i64,
    pub name: String,
    pub credit_balance: f64,
}
