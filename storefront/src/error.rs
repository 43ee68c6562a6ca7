//! Unified service-layer error type for the storefront
//!
//! `StoreError` bridges the gap between the storage layer (`sqlx::Error`)
//! and the API layer. It enables `?` propagation through the workflow
//! without manual `.map_err` boilerplate, and maps to an HTTP response at
//! the presentation boundary.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

/// Errors surfaced by the order pricing and persistence core.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Missing or malformed input, rejected before any side effect
    #[error("{0}")]
    Validation(String),

    /// An order referenced a product that does not exist; nothing was written
    #[error("order references unknown product {product_id}")]
    UnknownProduct { product_id: i64 },

    /// A lookup by key yielded nothing
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Engine-level storage failure; propagated, never swallowed
    #[error("storage error: {0}")]
    Storage(#[from] sqlx::Error),
}

impl StoreError {
    pub fn validation(msg: impl Into<String>) -> Self {
        StoreError::Validation(msg.into())
    }

    /// Stable machine-readable code for the API response body
    fn code(&self) -> &'static str {
        match self {
            StoreError::Validation(_) => "validation",
            StoreError::UnknownProduct { .. } => "unknown_product",
            StoreError::NotFound(_) => "not_found",
            StoreError::Storage(_) => "internal",
        }
    }

    fn http_status(&self) -> StatusCode {
        match self {
            StoreError::Validation(_) => StatusCode::BAD_REQUEST,
            StoreError::UnknownProduct { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            StoreError::NotFound(_) => StatusCode::NOT_FOUND,
            StoreError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Error payload returned to the presentation layer
#[derive(Debug, Serialize)]
struct ErrorBody {
    code: &'static str,
    message: String,
}

impl IntoResponse for StoreError {
    fn into_response(self) -> Response {
        let message = match &self {
            // Engine details stay server-side; the client gets an opaque code
            StoreError::Storage(e) => {
                tracing::error!(error = %e, "Storage error");
                "internal error".to_string()
            }
            other => other.to_string(),
        };
        let body = ErrorBody {
            code: self.code(),
            message,
        };
        (self.http_status(), Json(body)).into_response()
    }
}

/// Convenience alias for core results
pub type StoreResult<T> = Result<T, StoreError>;
