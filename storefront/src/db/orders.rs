//! Order ledger: append-only store of placed orders
//!
//! The ledger owns order-id assignment (SQLite AUTOINCREMENT: unique,
//! monotonically increasing) and the referential guarantee that no order is
//! committed against a product that does not exist.

use sqlx::SqlitePool;

use crate::error::StoreError;
use crate::util::now_millis;

/// An order joined with its product and, if present, its promotion.
/// Prices come from the *current* reference rows, not a snapshot.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct OrderDetails {
    pub id: i64,
    pub product_id: i64,
    pub quantity: i64,
    pub customer_name: String,
    pub placed_at: i64,
    pub product_name: String,
    pub unit_price: f64,
    pub promo_code: Option<String>,
    pub discount_percent: Option<f64>,
}

/// Persist a new order and return its id.
///
/// The product existence check and the insert run in one transaction, so
/// there is no window where a dangling reference can be committed. An
/// unknown product rolls back with `UnknownProduct` and writes nothing.
pub async fn insert_order(
    pool: &SqlitePool,
    product_id: i64,
    quantity: i64,
    customer_name: &str,
    promotion_id: Option<i64>,
) -> Result<i64, StoreError> {
    let mut tx = pool.begin().await?;

    let product: Option<(i64,)> = sqlx::query_as("SELECT id FROM products WHERE id = $1")
        .bind(product_id)
        .fetch_optional(&mut *tx)
        .await?;
    if product.is_none() {
        return Err(StoreError::UnknownProduct { product_id });
    }

    let (order_id,): (i64,) = sqlx::query_as(
        r#"
        INSERT INTO orders (product_id, quantity, customer_name, placed_at, promotion_id)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id
        "#,
    )
    .bind(product_id)
    .bind(quantity)
    .bind(customer_name)
    .bind(now_millis())
    .bind(promotion_id)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(order_id)
}

/// Fetch an order joined with its product (inner join: a missing product
/// yields `None` rather than an error) and its promotion, if any.
pub async fn get_order(pool: &SqlitePool, id: i64) -> Result<Option<OrderDetails>, sqlx::Error> {
    sqlx::query_as(
        r#"
        SELECT o.id, o.product_id, o.quantity, o.customer_name, o.placed_at,
               p.name AS product_name, p.unit_price,
               pc.code AS promo_code, pc.discount_percent
        FROM orders o
        JOIN products p ON o.product_id = p.id
        LEFT JOIN promotion_codes pc ON o.promotion_id = pc.id
        WHERE o.id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}
