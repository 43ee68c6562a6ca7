//! End-to-end order workflow tests against an in-memory store

use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;
use storefront::checkout::{self, OrderDraft};
use storefront::db::{catalog, orders, promotions, schema};
use storefront::error::StoreError;

/// Single-connection pool so every query sees the same in-memory database
async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("open in-memory store");
    schema::ensure_schema(&pool).await.expect("schema setup");
    pool
}

async fn order_count(pool: &SqlitePool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM orders")
        .fetch_one(pool)
        .await
        .expect("count orders")
}

fn draft(product_id: i64, quantity: i64, name: &str, promo: Option<&str>) -> OrderDraft {
    OrderDraft {
        product_id: Some(product_id),
        quantity: Some(quantity),
        customer_name: Some(name.to_string()),
        promo_code: promo.map(str::to_string),
    }
}

#[tokio::test]
async fn seeded_catalog_is_ordered_by_id() {
    let pool = test_pool().await;
    let products = catalog::list_products(&pool).await.unwrap();

    assert_eq!(products.len(), 8);
    assert_eq!(products[0].name, "Pepperoni");
    assert_eq!(products[0].unit_price, 13.99);
    for pair in products.windows(2) {
        assert!(pair[0].id < pair[1].id);
    }
}

#[tokio::test]
async fn promotion_lookup_is_case_insensitive() {
    let pool = test_pool().await;

    let promo = promotions::find_by_code(&pool, "save10").await.unwrap();
    assert_eq!(promo.as_ref().map(|p| p.discount_percent), Some(10.0));

    let padded = promotions::find_by_code(&pool, "  Save10 ").await.unwrap();
    assert_eq!(padded.map(|p| p.code), Some("SAVE10".to_string()));

    let missing = promotions::find_by_code(&pool, "BOGUS").await.unwrap();
    assert!(missing.is_none());
}

#[tokio::test]
async fn place_order_without_promotion() {
    let pool = test_pool().await;

    let confirmation = checkout::place_order(&pool, draft(1, 2, "Alice", None))
        .await
        .unwrap();

    assert_eq!(confirmation.product_name, "Pepperoni");
    assert_eq!(confirmation.unit_price, 13.99);
    assert_eq!(confirmation.quantity, 2);
    assert_eq!(confirmation.subtotal, 27.98);
    assert_eq!(confirmation.discount_amount, 0.0);
    assert_eq!(confirmation.total, 27.98);
    assert_eq!(confirmation.promo_code, "None");
    assert_eq!(confirmation.discount_percent, 0.0);
    assert_eq!(confirmation.customer_name, "Alice");
}

#[tokio::test]
async fn place_order_with_promotion_rounds_at_display() {
    let pool = test_pool().await;

    // Lowercase input resolves to the stored SAVE10 code
    let confirmation = checkout::place_order(&pool, draft(1, 2, "Bob", Some("save10")))
        .await
        .unwrap();

    assert_eq!(confirmation.promo_code, "SAVE10");
    assert_eq!(confirmation.discount_percent, 10.0);
    assert_eq!(confirmation.subtotal, 27.98);
    // 2.798 / 25.182 exact, rounded only for display
    assert_eq!(confirmation.discount_amount, 2.80);
    assert_eq!(confirmation.total, 25.18);
}

#[tokio::test]
async fn unknown_promotion_code_is_ignored() {
    let pool = test_pool().await;

    let confirmation = checkout::place_order(&pool, draft(1, 2, "Carol", Some("BOGUS")))
        .await
        .unwrap();

    assert_eq!(confirmation.promo_code, "None");
    assert_eq!(confirmation.discount_amount, 0.0);
    assert_eq!(confirmation.total, confirmation.subtotal);

    // The order was persisted with no promotion reference
    let details = orders::get_order(&pool, confirmation.order_id)
        .await
        .unwrap()
        .expect("order persisted");
    assert!(details.promo_code.is_none());
    assert!(details.discount_percent.is_none());
}

#[tokio::test]
async fn insert_order_rejects_unknown_product_atomically() {
    let pool = test_pool().await;
    let before = order_count(&pool).await;

    let err = orders::insert_order(&pool, 999, 1, "Dave", None)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        StoreError::UnknownProduct { product_id: 999 }
    ));
    assert_eq!(order_count(&pool).await, before);
}

#[tokio::test]
async fn workflow_rejects_unknown_product() {
    let pool = test_pool().await;

    let err = checkout::place_order(&pool, draft(999, 1, "Eve", None))
        .await
        .unwrap_err();

    assert!(matches!(err, StoreError::UnknownProduct { .. }));
    assert_eq!(order_count(&pool).await, 0);
}

#[tokio::test]
async fn workflow_rejects_incomplete_input() {
    let pool = test_pool().await;

    let missing_product = OrderDraft {
        quantity: Some(1),
        customer_name: Some("Frank".into()),
        ..Default::default()
    };
    assert!(matches!(
        checkout::place_order(&pool, missing_product).await,
        Err(StoreError::Validation(_))
    ));

    let missing_name = OrderDraft {
        product_id: Some(1),
        quantity: Some(1),
        customer_name: Some("   ".into()),
        ..Default::default()
    };
    assert!(matches!(
        checkout::place_order(&pool, missing_name).await,
        Err(StoreError::Validation(_))
    ));

    assert!(matches!(
        checkout::place_order(&pool, draft(1, 0, "Grace", None)).await,
        Err(StoreError::Validation(_))
    ));

    // Nothing was written by any rejected draft
    assert_eq!(order_count(&pool).await, 0);
}

#[tokio::test]
async fn summary_reflects_current_product_price() {
    let pool = test_pool().await;

    let confirmation = checkout::place_order(&pool, draft(1, 2, "Heidi", None))
        .await
        .unwrap();
    assert_eq!(confirmation.total, 27.98);

    // Reference prices are read live, not snapshotted at order time
    sqlx::query("UPDATE products SET unit_price = 20.0 WHERE id = 1")
        .execute(&pool)
        .await
        .unwrap();

    let summary = checkout::order_summary(&pool, confirmation.order_id)
        .await
        .unwrap()
        .expect("order exists");
    assert_eq!(summary.unit_price, 20.0);
    assert_eq!(summary.subtotal, 40.0);
    assert_eq!(summary.total, 40.0);
}

#[tokio::test]
async fn summary_of_missing_order_is_none() {
    let pool = test_pool().await;

    let summary = checkout::order_summary(&pool, 42).await.unwrap();
    assert!(summary.is_none());
}

#[tokio::test]
async fn order_ids_are_monotonic() {
    let pool = test_pool().await;

    let first = checkout::place_order(&pool, draft(1, 1, "Ivan", None))
        .await
        .unwrap();
    let second = checkout::place_order(&pool, draft(2, 1, "Judy", None))
        .await
        .unwrap();

    assert!(second.order_id > first.order_id);
}
