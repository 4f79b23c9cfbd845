//! Table model and occupancy transitions

use super::customer::Customer;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Table occupancy status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TableStatus {
    #[default]
    Free,
    Occupied,
    Reserved,
}

impl TableStatus {
    /// Whether `next` is a legal occupancy transition from `self`.
    ///
    /// Occupied → Occupied is destructive reassignment and additionally
    /// requires explicit confirmation at the service layer.
    pub fn can_transition_to(self, next: TableStatus) -> bool {
        use TableStatus::*;
        matches!(
            (self, next),
            (Free, Occupied)
                | (Free, Reserved)
                | (Reserved, Occupied)
                | (Reserved, Free)
                | (Occupied, Free)
                | (Occupied, Occupied)
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TableStatus::Free => "free",
            TableStatus::Occupied => "occupied",
            TableStatus::Reserved => "reserved",
        }
    }
}

impl std::fmt::Display for TableStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Dining table with floor-plan geometry and current occupant.
///
/// Invariant (backend-enforced, mirrored by the desk layer): a free table
/// has no customer and no guest attached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Table {
    pub id: i64,
    pub name: String,
    pub position_x: f64,
    pub position_y: f64,
    pub width: f64,
    pub height: f64,
    pub status: TableStatus,
    pub customer_id: Option<i64>,
    /// Occupant customer, embedded on reads
    pub customer: Option<Customer>,
    pub guest_name: Option<String>,
    pub guest_phone: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Table {
    /// Whether any party (registered or walk-in) is attached
    pub fn has_occupant(&self) -> bool {
        self.customer_id.is_some() || self.guest_name.is_some()
    }
}

/// Create table payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TableCreate {
    #[validate(length(min = 1, message = "table name is required"))]
    pub name: String,
    #[serde(default)]
    pub position_x: f64,
    #[serde(default)]
    pub position_y: f64,
    #[serde(default = "default_table_side")]
    pub width: f64,
    #[serde(default = "default_table_side")]
    pub height: f64,
}

fn default_table_side() -> f64 {
    80.0
}

/// Update table payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TableUpdate {
    pub name: Option<String>,
    pub position_x: Option<f64>,
    pub position_y: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
}

/// Assign/clear payload for `POST /tables/{id}/assign`.
///
/// `status: Free` clears the occupant; Occupied/Reserved attach the given
/// customer or walk-in guest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableAssign {
    pub status: TableStatus,
    #[serde(default)]
    pub customer_id: Option<i64>,
    #[serde(default)]
    pub guest_name: Option<String>,
    #[serde(default)]
    pub guest_phone: Option<String>,
}

impl TableAssign {
    /// Clear the occupant and free the table
    pub fn free() -> Self {
        Self {
            status: TableStatus::Free,
            customer_id: None,
            guest_name: None,
            guest_phone: None,
        }
    }
}
