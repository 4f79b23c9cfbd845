//! Order handlers
//!
//! Status is monotonic and billed is terminal: a billed order refuses
//! update and delete, and the ledger is credited exactly once on the
//! edge into billed.

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use axum::Json;
use axum::extract::{Path, Query, State};
use chrono::Utc;
use shared::error::MessageBody;
use shared::models::{
    NewOrderItem, Order, OrderCreate, OrderFilter, OrderItem, OrderStatus, OrderUpdate,
};
use shared::money;
use validator::Validate;

fn line_item(payload: NewOrderItem) -> OrderItem {
    let subtotal = money::round_amount(payload.price * f64::from(payload.quantity));
    OrderItem {
        item_name: payload.item_name,
        quantity: payload.quantity,
        price: payload.price,
        subtotal,
    }
}

/// GET /orders with optional status/table/customer filters
pub async fn list(
    State(state): State<AppState>,
    Query(filter): Query<OrderFilter>,
) -> ApiResult<Json<Vec<Order>>> {
    let db = state.db();
    let orders = db
        .orders
        .iter()
        .filter(|o| filter.status.is_none_or(|s| o.status == s))
        .filter(|o| filter.table_id.is_none_or(|t| o.table_id == t))
        .filter(|o| filter.customer_id.is_none_or(|c| o.customer_id == Some(c)))
        .cloned()
        .collect();
    Ok(Json(orders))
}

/// GET /orders/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Order>> {
    let db = state.db();
    let order = db
        .find_order(id)
        .ok_or_else(|| ApiError::not_found("Order", id))?;
    Ok(Json(order.clone()))
}

/// POST /orders - line items are copied in at creation time; status is
/// forced to pending
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<OrderCreate>,
) -> ApiResult<Json<Order>> {
    payload.validate()?;

    let mut db = state.db();
    if db.find_table(payload.table_id).is_none() {
        return Err(ApiError::not_found("Table", payload.table_id));
    }
    if let Some(customer_id) = payload.customer_id {
        if db.find_customer(customer_id).is_none() {
            return Err(ApiError::not_found("Customer", customer_id));
        }
    }

    let items: Vec<OrderItem> = payload.items.into_iter().map(line_item).collect();
    let total = money::sum_amounts(items.iter().map(|i| i.subtotal));

    let now = Utc::now();
    let order = Order {
        id: db.next_id(),
        table_id: payload.table_id,
        customer_id: payload.customer_id,
        items,
        status: OrderStatus::Pending,
        total,
        notes: payload.notes,
        created_at: now,
        updated_at: now,
    };
    db.orders.push(order.clone());
    Ok(Json(order))
}

/// PUT /orders/{id} - refused once billed; status moves forward only
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<OrderUpdate>,
) -> ApiResult<Json<Order>> {
    let mut db = state.db();
    let order = db
        .find_order(id)
        .ok_or_else(|| ApiError::not_found("Order", id))?;

    if order.status.is_billed() {
        return Err(ApiError::conflict("Cannot modify a billed order"));
    }

    if let Some(next) = payload.status {
        if !order.status.can_advance_to(next) {
            return Err(ApiError::conflict(format!(
                "Order status cannot move from {} to {}",
                order.status, next
            )));
        }
        if next.is_billed() {
            db.bill_order(id);
        } else if let Some(order) = db.find_order_mut(id) {
            order.status = next;
        }
    }

    let order = db
        .find_order_mut(id)
        .ok_or_else(|| ApiError::not_found("Order", id))?;
    if let Some(notes) = payload.notes {
        order.notes = notes;
    }
    order.updated_at = Utc::now();
    Ok(Json(order.clone()))
}

/// DELETE /orders/{id} - refused once billed
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<MessageBody>> {
    let mut db = state.db();
    let order = db
        .find_order(id)
        .ok_or_else(|| ApiError::not_found("Order", id))?;

    if order.status.is_billed() {
        return Err(ApiError::conflict("Cannot delete a billed order"));
    }

    db.orders.retain(|o| o.id != id);
    Ok(Json(MessageBody::new("Order deleted")))
}

/// POST /orders/{id}/items - append a line item and recompute the total
pub async fn add_item(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<NewOrderItem>,
) -> ApiResult<Json<Order>> {
    payload.validate()?;

    let mut db = state.db();
    let order = db
        .find_order_mut(id)
        .ok_or_else(|| ApiError::not_found("Order", id))?;

    if order.status.is_billed() {
        return Err(ApiError::conflict("Cannot modify a billed order"));
    }

    order.items.push(line_item(payload));
    order.total = money::sum_amounts(order.items.iter().map(|i| i.subtotal));
    order.updated_at = Utc::now();
    Ok(Json(order.clone()))
}
