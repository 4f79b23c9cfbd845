//! Authentication payloads

use crate::models::user::{User, UserRole};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Login payload for `POST /auth/login`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "username is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

/// Signup payload for `POST /auth/signup`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(length(min = 3, message = "username must be at least 3 characters"))]
    pub username: String,
    #[validate(length(min = 6, message = "password must be at least 6 characters"))]
    pub password: String,
    #[validate(length(min = 1, message = "full name is required"))]
    pub full_name: String,
    #[serde(default)]
    pub role: Option<UserRole>,
}

/// Bearer token plus the authenticated user, returned by login and signup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}
