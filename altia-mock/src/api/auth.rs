//! Auth handlers

use crate::auth::{self, Claims};
use crate::error::{ApiError, ApiResult};
use crate::state::{AppState, StoredUser};
use axum::extract::State;
use axum::{Extension, Json};
use chrono::Utc;
use shared::auth::{LoginRequest, LoginResponse, SignupRequest};
use shared::models::User;
use validator::Validate;

/// POST /auth/signup - register a staff account
pub async fn signup(
    State(state): State<AppState>,
    Json(req): Json<SignupRequest>,
) -> ApiResult<Json<LoginResponse>> {
    req.validate()?;

    let mut db = state.db();
    if db.find_user_by_name(&req.username).is_some() {
        return Err(ApiError::conflict("Username already exists"));
    }

    let password_hash = auth::hash_password(&req.password)
        .map_err(|e| ApiError::internal(format!("Password hashing failed: {}", e)))?;

    let now = Utc::now();
    let user = User {
        id: db.next_id(),
        username: req.username,
        full_name: req.full_name,
        role: req.role.unwrap_or_default(),
        created_at: now,
        updated_at: now,
    };
    db.users.push(StoredUser {
        user: user.clone(),
        password_hash,
    });

    let token = auth::mint_token(&state.jwt_secret, user.id, user.role)
        .map_err(|e| ApiError::internal(format!("Token minting failed: {}", e)))?;

    tracing::info!(username = %user.username, "staff account created");
    Ok(Json(LoginResponse { token, user }))
}

/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    req.validate()?;

    let db = state.db();
    let stored = db
        .find_user_by_name(&req.username)
        .ok_or_else(|| ApiError::unauthorized("Invalid username or password"))?;

    let valid = auth::verify_password(&req.password, &stored.password_hash)
        .map_err(|e| ApiError::internal(format!("Password verification failed: {}", e)))?;
    if !valid {
        return Err(ApiError::unauthorized("Invalid username or password"));
    }

    let user = stored.user.clone();
    drop(db);

    let token = auth::mint_token(&state.jwt_secret, user.id, user.role)
        .map_err(|e| ApiError::internal(format!("Token minting failed: {}", e)))?;

    Ok(Json(LoginResponse { token, user }))
}

/// GET /auth/me - the user behind the presented token
pub async fn me(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> ApiResult<Json<User>> {
    let db = state.db();
    let stored = db
        .find_user(claims.sub)
        .ok_or_else(|| ApiError::unauthorized("User no longer exists"))?;
    Ok(Json(stored.user.clone()))
}
