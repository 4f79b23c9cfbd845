//! Customer handlers

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use axum::Json;
use axum::extract::{Path, State};
use chrono::Utc;
use shared::error::MessageBody;
use shared::models::{Customer, CustomerBalance, CustomerCreate, CustomerUpdate};
use shared::money;
use validator::Validate;

/// GET /customers
pub async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<Customer>>> {
    Ok(Json(state.db().customers.clone()))
}

/// GET /customers/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Customer>> {
    let db = state.db();
    let customer = db
        .find_customer(id)
        .ok_or_else(|| ApiError::not_found("Customer", id))?;
    Ok(Json(customer.clone()))
}

/// POST /customers
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<CustomerCreate>,
) -> ApiResult<Json<Customer>> {
    payload.validate()?;

    let mut db = state.db();
    let now = Utc::now();
    let customer = Customer {
        id: db.next_id(),
        name: payload.name,
        phone: payload.phone,
        credit_balance: 0.0,
        created_at: now,
        updated_at: now,
    };
    db.customers.push(customer.clone());
    Ok(Json(customer))
}

/// PUT /customers/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<CustomerUpdate>,
) -> ApiResult<Json<Customer>> {
    let mut db = state.db();
    let customer = db
        .find_customer_mut(id)
        .ok_or_else(|| ApiError::not_found("Customer", id))?;

    if let Some(name) = payload.name {
        customer.name = name;
    }
    if let Some(phone) = payload.phone {
        customer.phone = phone;
    }
    customer.updated_at = Utc::now();
    Ok(Json(customer.clone()))
}

/// DELETE /customers/{id} - refused while a balance is outstanding
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<MessageBody>> {
    let mut db = state.db();
    let customer = db
        .find_customer(id)
        .ok_or_else(|| ApiError::not_found("Customer", id))?;

    if customer.has_outstanding_balance() {
        return Err(ApiError::conflict(format!(
            "Customer {} has an outstanding balance of {}",
            customer.name,
            money::format_amount(customer.credit_balance)
        )));
    }

    db.customers.retain(|c| c.id != id);
    Ok(Json(MessageBody::new("Customer deleted")))
}

/// GET /customers/{id}/balance
pub async fn balance(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<CustomerBalance>> {
    let db = state.db();
    let customer = db
        .find_customer(id)
        .ok_or_else(|| ApiError::not_found("Customer", id))?;
    Ok(Json(CustomerBalance {
        customer_id: customer.id,
        name: customer.name.clone(),
        credit_balance: customer.credit_balance,
    }))
}
