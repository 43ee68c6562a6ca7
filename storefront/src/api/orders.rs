//! Order handlers

use axum::Json;
use axum::extract::{Path, State};

use crate::checkout::{self, Confirmation, OrderDraft};
use crate::error::StoreError;
use crate::state::AppState;

type ApiResult<T> = Result<Json<T>, StoreError>;

pub async fn create_order(
    State(state): State<AppState>,
    Json(draft): Json<OrderDraft>,
) -> ApiResult<Confirmation> {
    let confirmation = checkout::place_order(&state.pool, draft).await?;
    Ok(Json(confirmation))
}

pub async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Confirmation> {
    match checkout::order_summary(&state.pool, id).await? {
        Some(summary) => Ok(Json(summary)),
        None => Err(StoreError::NotFound("order")),
    }
}
