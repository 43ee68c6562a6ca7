//! Promotion code queries

use serde::Serialize;
use sqlx::SqlitePool;

/// Discount code mapping to a percentage reduction. Read-only in scope.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct PromotionCode {
    pub id: i64,
    pub code: String,
    pub discount_percent: f64,
}

/// Case-insensitive lookup: the input is trimmed and uppercased, and codes
/// are stored uppercase. Absence is `Ok(None)`, never an error.
pub async fn find_by_code(
    pool: &SqlitePool,
    code: &str,
) -> Result<Option<PromotionCode>, sqlx::Error> {
    let normalized = code.trim().to_uppercase();
    sqlx::query_as("SELECT id, code, discount_percent FROM promotion_codes WHERE code = $1")
        .bind(normalized)
        .fetch_optional(pool)
        .await
}
