//! Payment handlers
//!
//! Payments are append-only through normal flow. Creating one debits the
//! customer ledger (clamped at zero); the administrative delete restores
//! the balance.

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use axum::Json;
use axum::extract::{Path, State};
use chrono::Utc;
use shared::error::MessageBody;
use shared::models::{Payment, PaymentCreate};
use shared::money;
use validator::Validate;

/// GET /payments
pub async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<Payment>>> {
    Ok(Json(state.db().payments.clone()))
}

/// GET /payments/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Payment>> {
    let db = state.db();
    let payment = db
        .find_payment(id)
        .ok_or_else(|| ApiError::not_found("Payment", id))?;
    Ok(Json(payment.clone()))
}

/// POST /payments
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<PaymentCreate>,
) -> ApiResult<Json<Payment>> {
    payload.validate()?;

    let mut db = state.db();
    if let Some(customer_id) = payload.customer_id {
        if db.find_customer(customer_id).is_none() {
            return Err(ApiError::not_found("Customer", customer_id));
        }
    }
    if let Some(order_id) = payload.order_id {
        if db.find_order(order_id).is_none() {
            return Err(ApiError::not_found("Order", order_id));
        }
    }

    let amount = money::round_amount(payload.amount);
    let now = Utc::now();
    let payment = Payment {
        id: db.next_id(),
        customer_id: payload.customer_id,
        order_id: payload.order_id,
        amount,
        method: payload.method,
        notes: payload.notes,
        created_at: now,
        updated_at: now,
    };
    db.payments.push(payment.clone());

    // A linked order becomes billed once its payments cover the total
    if let Some(order_id) = payload.order_id {
        let covered = db.find_order(order_id).is_some_and(|order| {
            let paid = money::sum_amounts(
                db.payments
                    .iter()
                    .filter(|p| p.order_id == Some(order_id))
                    .map(|p| p.amount),
            );
            !order.status.is_billed() && paid >= order.total
        });
        if covered {
            db.bill_order(order_id);
        }
    }

    if let Some(customer_id) = payload.customer_id {
        db.debit_customer(customer_id, amount);
    }

    tracing::info!(payment = payment.id, amount, "payment recorded");
    Ok(Json(payment))
}

/// DELETE /payments/{id} - administrative; restores the customer balance
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<MessageBody>> {
    let mut db = state.db();
    let payment = db
        .find_payment(id)
        .ok_or_else(|| ApiError::not_found("Payment", id))?
        .clone();

    if let Some(customer_id) = payment.customer_id {
        if let Some(customer) = db.find_customer_mut(customer_id) {
            customer.credit_balance =
                money::round_amount(customer.credit_balance + payment.amount);
            customer.updated_at = Utc::now();
        }
    }

    db.payments.retain(|p| p.id != id);
    Ok(Json(MessageBody::new("Payment deleted")))
}
