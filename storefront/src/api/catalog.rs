//! Catalog handlers

use axum::Json;
use axum::extract::State;

use crate::db::catalog::{self, Product};
use crate::error::StoreError;
use crate::state::AppState;

type ApiResult<T> = Result<Json<T>, StoreError>;

pub async fn list_products(State(state): State<AppState>) -> ApiResult<Vec<Product>> {
    let products = catalog::list_products(&state.pool).await?;
    Ok(Json(products))
}
