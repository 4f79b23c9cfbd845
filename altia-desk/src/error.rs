//! Front-desk service errors

use altia_client::ClientError;
use shared::models::TableStatus;
use thiserror::Error;

/// Error raised by the front-desk service layer
#[derive(Debug, Error)]
pub enum DeskError {
    /// Input rejected before any request was issued
    #[error("Validation error: {0}")]
    Validation(String),

    /// Business rule refused locally (delete guards, confirmation gates)
    #[error("{0}")]
    BusinessRule(String),

    /// Illegal occupancy transition
    #[error("Table cannot move from {from} to {to}")]
    Transition { from: TableStatus, to: TableStatus },

    /// Failure reported by the backend
    #[error(transparent)]
    Client(#[from] ClientError),

    /// Payout workflow failure
    #[error(transparent)]
    Payout(#[from] crate::payout::PayoutError),
}

impl From<validator::ValidationErrors> for DeskError {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self::Validation(errors.to_string())
    }
}

/// Result type for desk operations
pub type DeskResult<T> = Result<T, DeskError>;
