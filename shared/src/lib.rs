//! Shared types for the Altia cafe admin workspace
//!
//! Domain models, request/response payload schemas, wire-level error
//! bodies, and currency helpers used by the API client, the front-desk
//! service layer, and the mock backend.

pub mod auth;
pub mod error;
pub mod models;
pub mod money;

// Re-exports
pub use serde::{Deserialize, Serialize};
