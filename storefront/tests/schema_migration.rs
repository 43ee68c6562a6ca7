//! Schema manager tests: idempotent setup and legacy-shape migration

use std::str::FromStr;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use storefront::checkout::{self, OrderDraft};
use storefront::db::{orders, schema};

async fn memory_pool() -> SqlitePool {
    SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("open in-memory store")
}

async fn count(pool: &SqlitePool, table: &str) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await
        .expect("count")
}

#[tokio::test]
async fn ensure_schema_is_idempotent() {
    let pool = memory_pool().await;

    schema::ensure_schema(&pool).await.unwrap();
    schema::ensure_schema(&pool).await.unwrap();

    // No duplicate seed rows, no duplicate structures
    assert_eq!(count(&pool, "products").await, 8);
    assert_eq!(count(&pool, "promotion_codes").await, 2);
    assert_eq!(count(&pool, "orders").await, 0);
}

#[tokio::test]
async fn ensure_schema_is_idempotent_across_restarts() {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite://{}/store.db", dir.path().display());

    for _ in 0..2 {
        let options = SqliteConnectOptions::from_str(&url)
            .unwrap()
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .expect("open on-disk store");

        schema::ensure_schema(&pool).await.unwrap();
        assert_eq!(count(&pool, "products").await, 8);
        assert_eq!(count(&pool, "promotion_codes").await, 2);

        pool.close().await;
    }
}

/// Rebuild of a legacy order ledger (pre customer_name/promotion_id): every
/// row must reappear with the placeholder name, an unset promotion, and its
/// original id, quantity, and timestamp.
#[tokio::test]
async fn legacy_order_ledger_is_widened() {
    let pool = memory_pool().await;

    sqlx::query(
        r#"
        CREATE TABLE products (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            unit_price REAL NOT NULL
        )
        "#,
    )
    .execute(&pool)
    .await
    .unwrap();
    sqlx::query("INSERT INTO products (name, unit_price) VALUES ('Pepperoni', 13.99), ('Margherita', 14.99)")
        .execute(&pool)
        .await
        .unwrap();

    sqlx::query(
        r#"
        CREATE TABLE orders (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            product_id INTEGER NOT NULL,
            quantity INTEGER NOT NULL,
            placed_at INTEGER NOT NULL,
            FOREIGN KEY (product_id) REFERENCES products (id)
        )
        "#,
    )
    .execute(&pool)
    .await
    .unwrap();
    sqlx::query("INSERT INTO orders (product_id, quantity, placed_at) VALUES (1, 2, 1700000000000), (2, 1, 1700000100000)")
        .execute(&pool)
        .await
        .unwrap();

    schema::ensure_schema(&pool).await.unwrap();

    // Row count preserved, shape widened
    assert_eq!(count(&pool, "orders").await, 2);

    let first = orders::get_order(&pool, 1).await.unwrap().expect("order 1");
    assert_eq!(first.customer_name, "Unknown");
    assert!(first.promo_code.is_none());
    assert_eq!(first.product_name, "Pepperoni");
    assert_eq!(first.quantity, 2);
    assert_eq!(first.placed_at, 1_700_000_000_000);

    let second = orders::get_order(&pool, 2).await.unwrap().expect("order 2");
    assert_eq!(second.customer_name, "Unknown");
    assert_eq!(second.product_id, 2);
    assert_eq!(second.placed_at, 1_700_000_100_000);

    // The catalog was not re-seeded over the existing rows
    assert_eq!(count(&pool, "products").await, 2);

    // The widened ledger accepts new orders with the current shape
    let confirmation = checkout::place_order(
        &pool,
        OrderDraft {
            product_id: Some(1),
            quantity: Some(1),
            customer_name: Some("Mallory".into()),
            promo_code: Some("SAVE10".into()),
        },
    )
    .await
    .unwrap();
    assert_eq!(confirmation.order_id, 3);
    assert_eq!(confirmation.promo_code, "SAVE10");
}
