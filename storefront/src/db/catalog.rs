//! Product catalog queries

use serde::Serialize;
use sqlx::SqlitePool;

/// Catalog entry: seeded at first run, never mutated or deleted in scope
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub unit_price: f64,
}

/// All products, id ascending. No pagination.
pub async fn list_products(pool: &SqlitePool) -> Result<Vec<Product>, sqlx::Error> {
    sqlx::query_as("SELECT id, name, unit_price FROM products ORDER BY id")
        .fetch_all(pool)
        .await
}

pub async fn find_product(pool: &SqlitePool, id: i64) -> Result<Option<Product>, sqlx::Error> {
    sqlx::query_as("SELECT id, name, unit_price FROM products WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}
