//! Menu handlers

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use axum::Json;
use axum::extract::{Path, Query, State};
use chrono::Utc;
use shared::error::MessageBody;
use shared::models::{MenuFilter, MenuItem, MenuItemCreate, MenuItemUpdate};
use validator::Validate;

/// GET /menu with optional category/availability filters
pub async fn list(
    State(state): State<AppState>,
    Query(filter): Query<MenuFilter>,
) -> ApiResult<Json<Vec<MenuItem>>> {
    let db = state.db();
    let items = db
        .menu
        .iter()
        .filter(|m| filter.category.as_deref().is_none_or(|c| m.category == c))
        .filter(|m| filter.available.is_none_or(|a| m.available == a))
        .cloned()
        .collect();
    Ok(Json(items))
}

/// GET /menu/categories - distinct category names, sorted
pub async fn categories(State(state): State<AppState>) -> ApiResult<Json<Vec<String>>> {
    let db = state.db();
    let mut categories: Vec<String> = db.menu.iter().map(|m| m.category.clone()).collect();
    categories.sort();
    categories.dedup();
    Ok(Json(categories))
}

/// GET /menu/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<MenuItem>> {
    let db = state.db();
    let item = db
        .find_menu_item(id)
        .ok_or_else(|| ApiError::not_found("Menu item", id))?;
    Ok(Json(item.clone()))
}

/// POST /menu
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<MenuItemCreate>,
) -> ApiResult<Json<MenuItem>> {
    payload.validate()?;

    let mut db = state.db();
    let now = Utc::now();
    let item = MenuItem {
        id: db.next_id(),
        name: payload.name,
        category: payload.category,
        price: payload.price,
        description: payload.description,
        available: payload.available,
        created_at: now,
        updated_at: now,
    };
    db.menu.push(item.clone());
    Ok(Json(item))
}

/// PUT /menu/{id} - edits never touch existing orders
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<MenuItemUpdate>,
) -> ApiResult<Json<MenuItem>> {
    let mut db = state.db();
    let item = db
        .find_menu_item_mut(id)
        .ok_or_else(|| ApiError::not_found("Menu item", id))?;

    if let Some(name) = payload.name {
        item.name = name;
    }
    if let Some(category) = payload.category {
        item.category = category;
    }
    if let Some(price) = payload.price {
        item.price = price;
    }
    if let Some(description) = payload.description {
        item.description = description;
    }
    if let Some(available) = payload.available {
        item.available = available;
    }
    item.updated_at = Utc::now();
    Ok(Json(item.clone()))
}

/// DELETE /menu/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<MessageBody>> {
    let mut db = state.db();
    if db.find_menu_item(id).is_none() {
        return Err(ApiError::not_found("Menu item", id));
    }
    db.menu.retain(|m| m.id != id);
    Ok(Json(MessageBody::new("Menu item deleted")))
}
