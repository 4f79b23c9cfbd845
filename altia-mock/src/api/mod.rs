//! Route table for the mock backend

mod auth;
mod customers;
mod menu;
mod orders;
mod payments;
mod tables;

use crate::state::AppState;
use axum::{
    Json, Router, middleware,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Build the full router. Everything except health, login, and signup
/// requires a valid bearer token.
pub fn router(state: AppState) -> Router {
    let open = Router::new()
        .route("/health", get(health))
        .route("/auth/login", post(auth::login))
        .route("/auth/signup", post(auth::signup));

    let protected = Router::new()
        .route("/auth/me", get(auth::me))
        .route("/tables", get(tables::list).post(tables::create))
        .route(
            "/tables/{id}",
            get(tables::get_by_id)
                .put(tables::update)
                .delete(tables::delete),
        )
        .route("/tables/{id}/assign", post(tables::assign))
        .route("/tables/{id}/orders", get(tables::orders))
        .route("/tables/{id}/payout", post(tables::payout))
        .route("/customers", get(customers::list).post(customers::create))
        .route(
            "/customers/{id}",
            get(customers::get_by_id)
                .put(customers::update)
                .delete(customers::delete),
        )
        .route("/customers/{id}/balance", get(customers::balance))
        .route("/orders", get(orders::list).post(orders::create))
        .route(
            "/orders/{id}",
            get(orders::get_by_id)
                .put(orders::update)
                .delete(orders::delete),
        )
        .route("/orders/{id}/items", post(orders::add_item))
        .route("/payments", get(payments::list).post(payments::create))
        .route(
            "/payments/{id}",
            get(payments::get_by_id).delete(payments::delete),
        )
        .route("/menu", get(menu::list).post(menu::create))
        .route("/menu/categories", get(menu::categories))
        .route(
            "/menu/{id}",
            get(menu::get_by_id).put(menu::update).delete(menu::delete),
        )
        .layer(middleware::from_fn_with_state(
            state.clone(),
            crate::auth::require_auth,
        ));

    open.merge(protected)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
