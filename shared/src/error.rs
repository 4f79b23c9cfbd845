//! Wire-level response bodies for failures and confirmations
//!
//! The backend returns `{"error": "..."}` on every failure and
//! `{"message": "..."}` on delete confirmations.

use serde::{Deserialize, Serialize};

/// Error body attached to non-2xx responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self { error: error.into() }
    }
}

/// Confirmation body returned by delete endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageBody {
    pub message: String,
}

impl MessageBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}
