//! API routes for the storefront
//!
//! Thin presentation boundary: handlers deserialize plain data, call into
//! the core, and render whatever it returns.

pub mod catalog;
pub mod health;
pub mod orders;

use axum::Router;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/api/products", get(catalog::list_products))
        .route("/api/orders", post(orders::create_order))
        .route("/api/orders/{id}", get(orders::get_order))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
