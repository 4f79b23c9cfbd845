//! Table handlers, including the per-table order roll-up and the combined
//! payout endpoint

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use axum::Json;
use axum::extract::{Path, State};
use chrono::Utc;
use shared::error::MessageBody;
use shared::models::{
    Payment, PayoutRequest, PayoutResponse, Table, TableAssign, TableCreate, TableOrders,
    TableStatus, TableUpdate,
};
use shared::money;
use validator::Validate;

/// GET /tables
pub async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<Table>>> {
    let db = state.db();
    let tables = db.tables.iter().map(|t| db.table_view(t)).collect();
    Ok(Json(tables))
}

/// GET /tables/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Table>> {
    let db = state.db();
    let table = db
        .find_table(id)
        .ok_or_else(|| ApiError::not_found("Table", id))?;
    Ok(Json(db.table_view(table)))
}

/// POST /tables
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<TableCreate>,
) -> ApiResult<Json<Table>> {
    payload.validate()?;

    let mut db = state.db();
    let now = Utc::now();
    let table = Table {
        id: db.next_id(),
        name: payload.name,
        position_x: payload.position_x,
        position_y: payload.position_y,
        width: payload.width,
        height: payload.height,
        status: TableStatus::Free,
        customer_id: None,
        customer: None,
        guest_name: None,
        guest_phone: None,
        created_at: now,
        updated_at: now,
    };
    db.tables.push(table.clone());
    Ok(Json(table))
}

/// PUT /tables/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<TableUpdate>,
) -> ApiResult<Json<Table>> {
    let mut db = state.db();
    let table = db
        .find_table_mut(id)
        .ok_or_else(|| ApiError::not_found("Table", id))?;

    if let Some(name) = payload.name {
        table.name = name;
    }
    if let Some(x) = payload.position_x {
        table.position_x = x;
    }
    if let Some(y) = payload.position_y {
        table.position_y = y;
    }
    if let Some(w) = payload.width {
        table.width = w;
    }
    if let Some(h) = payload.height {
        table.height = h;
    }
    table.updated_at = Utc::now();

    let view = table.clone();
    Ok(Json(db.table_view(&view)))
}

/// DELETE /tables/{id} - refused unless the table is free
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<MessageBody>> {
    let mut db = state.db();
    let table = db
        .find_table(id)
        .ok_or_else(|| ApiError::not_found("Table", id))?;

    if table.status != TableStatus::Free {
        return Err(ApiError::conflict(format!(
            "Table {} is {} and cannot be deleted",
            table.name, table.status
        )));
    }

    db.tables.retain(|t| t.id != id);
    Ok(Json(MessageBody::new("Table deleted")))
}

/// POST /tables/{id}/assign - set or clear the occupant.
///
/// Enforces the free-table invariant: status free means no customer and
/// no guest attached.
pub async fn assign(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<TableAssign>,
) -> ApiResult<Json<Table>> {
    let mut db = state.db();

    if payload.status != TableStatus::Free {
        if let Some(customer_id) = payload.customer_id {
            if db.find_customer(customer_id).is_none() {
                return Err(ApiError::not_found("Customer", customer_id));
            }
        }
        let has_guest = payload
            .guest_name
            .as_deref()
            .is_some_and(|n| !n.trim().is_empty());
        if payload.customer_id.is_none() && !has_guest {
            return Err(ApiError::validation(
                "An occupied or reserved table needs a customer or guest",
            ));
        }
    }

    let table = db
        .find_table_mut(id)
        .ok_or_else(|| ApiError::not_found("Table", id))?;

    match payload.status {
        TableStatus::Free => {
            table.status = TableStatus::Free;
            table.customer_id = None;
            table.guest_name = None;
            table.guest_phone = None;
        }
        status => {
            table.status = status;
            table.customer_id = payload.customer_id;
            if payload.customer_id.is_some() {
                table.guest_name = None;
                table.guest_phone = None;
            } else {
                table.guest_name = payload.guest_name;
                table.guest_phone = payload.guest_phone;
            }
        }
    }
    table.updated_at = Utc::now();

    let view = table.clone();
    Ok(Json(db.table_view(&view)))
}

/// GET /tables/{id}/orders - every order not yet billed, plus the sum
pub async fn orders(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<TableOrders>> {
    let db = state.db();
    if db.find_table(id).is_none() {
        return Err(ApiError::not_found("Table", id));
    }

    let orders: Vec<_> = db
        .orders
        .iter()
        .filter(|o| o.table_id == id && !o.status.is_billed())
        .cloned()
        .collect();
    let total = money::sum_amounts(orders.iter().map(|o| o.total));

    Ok(Json(TableOrders {
        table_id: id,
        orders,
        total,
    }))
}

/// POST /tables/{id}/payout - settle the table in one request: bill every
/// unbilled order, record the payment if anything was collected, credit
/// the shortfall, and free the table.
pub async fn payout(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<PayoutRequest>,
) -> ApiResult<Json<PayoutResponse>> {
    payload.validate()?;

    let mut db = state.db();
    let table = db
        .find_table(id)
        .ok_or_else(|| ApiError::not_found("Table", id))?;
    if table.status != TableStatus::Occupied {
        return Err(ApiError::conflict(format!(
            "Table {} is not occupied",
            table.name
        )));
    }
    let customer_id = table.customer_id;

    let unbilled: Vec<i64> = db
        .orders
        .iter()
        .filter(|o| o.table_id == id && !o.status.is_billed())
        .map(|o| o.id)
        .collect();
    let total = money::sum_amounts(
        db.orders
            .iter()
            .filter(|o| unbilled.contains(&o.id))
            .map(|o| o.total),
    );

    for order_id in &unbilled {
        db.bill_order(*order_id);
    }

    let amount = money::round_amount(payload.amount);
    let payment = if amount > 0.0 {
        let now = Utc::now();
        let payment = Payment {
            id: db.next_id(),
            customer_id,
            order_id: None,
            amount,
            method: payload.method.unwrap_or_default(),
            notes: payload.notes,
            created_at: now,
            updated_at: now,
        };
        db.payments.push(payment.clone());
        if let Some(customer_id) = customer_id {
            db.debit_customer(customer_id, amount);
        }
        Some(payment)
    } else {
        None
    };

    let deferred_credit = money::round_amount((total - amount).max(0.0));

    let table = db
        .find_table_mut(id)
        .ok_or_else(|| ApiError::not_found("Table", id))?;
    table.status = TableStatus::Free;
    table.customer_id = None;
    table.guest_name = None;
    table.guest_phone = None;
    table.updated_at = Utc::now();
    let view = table.clone();

    tracing::info!(
        table = id,
        collected = amount,
        deferred = deferred_credit,
        "table settled"
    );

    Ok(Json(PayoutResponse {
        billed_orders: unbilled,
        payment,
        deferred_credit,
        table: db.table_view(&view),
    }))
}
