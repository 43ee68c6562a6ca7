//! Schema manager: idempotent, versioned migration steps
//!
//! Each step declares a precondition probe and a transactional apply. The
//! manager runs pending steps in declaration order, one transaction per
//! step, so a failed apply rolls back to the pre-step state and propagates.
//! Safe to run on every process start; it must complete before any order
//! workflow call is accepted.

use async_trait::async_trait;
use sqlx::{Sqlite, SqlitePool, Transaction};

/// Initial catalog, inserted only when the products table is empty
const SEED_PRODUCTS: &[(&str, f64)] = &[
    ("Pepperoni", 13.99),
    ("Margherita", 14.99),
    ("Hawaiian", 99.99),
    ("Vegetarian", 12.99),
    ("Supreme", 14.99),
    ("BBQ Chicken", 13.99),
    ("Meat Lovers", 15.99),
    ("Buffalo", 16.99),
];

/// Initial promotion codes, stored uppercase (case-insensitive lookup key)
const SEED_PROMOTIONS: &[(&str, f64)] = &[("SAVE10", 10.0), ("WELCOME5", 5.0)];

#[async_trait]
trait MigrationStep: Send + Sync {
    fn name(&self) -> &'static str;

    /// Precondition probe; the step is applied only when this returns true
    async fn needed(&self, pool: &SqlitePool) -> Result<bool, sqlx::Error>;

    /// The schema change, executed inside one transaction
    async fn apply(&self, tx: &mut Transaction<'_, Sqlite>) -> Result<(), sqlx::Error>;
}

/// Run all pending migration steps in order.
///
/// Preconditions are evaluated immediately before each step, so later steps
/// observe the effects of earlier ones. A failure leaves the schema at the
/// last committed step and is fatal to startup.
pub async fn ensure_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    let steps: [&dyn MigrationStep; 5] = [
        &CreateCatalogTables,
        &CreateOrderLedger,
        &WidenOrderLedger,
        &SeedCatalog,
        &SeedPromotions,
    ];

    for step in steps {
        if step.needed(pool).await? {
            let mut tx = pool.begin().await?;
            step.apply(&mut tx).await?;
            tx.commit().await?;
            tracing::info!(step = step.name(), "Applied schema step");
        }
    }
    Ok(())
}

async fn table_exists(pool: &SqlitePool, name: &str) -> Result<bool, sqlx::Error> {
    let count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = $1")
            .bind(name)
            .fetch_one(pool)
            .await?;
    Ok(count > 0)
}

async fn column_exists(pool: &SqlitePool, table: &str, column: &str) -> Result<bool, sqlx::Error> {
    let count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM pragma_table_info($1) WHERE name = $2")
            .bind(table)
            .bind(column)
            .fetch_one(pool)
            .await?;
    Ok(count > 0)
}

async fn table_is_empty(pool: &SqlitePool, table: &str) -> Result<bool, sqlx::Error> {
    // Table names cannot be bound; both callers pass a fixed literal
    let count: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await?;
    Ok(count == 0)
}

struct CreateCatalogTables;

#[async_trait]
impl MigrationStep for CreateCatalogTables {
    fn name(&self) -> &'static str {
        "create-catalog-tables"
    }

    async fn needed(&self, pool: &SqlitePool) -> Result<bool, sqlx::Error> {
        Ok(!table_exists(pool, "products").await? || !table_exists(pool, "promotion_codes").await?)
    }

    async fn apply(&self, tx: &mut Transaction<'_, Sqlite>) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS products (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                unit_price REAL NOT NULL CHECK (unit_price >= 0)
            )
            "#,
        )
        .execute(&mut **tx)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS promotion_codes (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                code TEXT NOT NULL UNIQUE,
                discount_percent REAL NOT NULL
                    CHECK (discount_percent >= 0 AND discount_percent <= 100)
            )
            "#,
        )
        .execute(&mut **tx)
        .await?;

        Ok(())
    }
}

struct CreateOrderLedger;

#[async_trait]
impl MigrationStep for CreateOrderLedger {
    fn name(&self) -> &'static str {
        "create-order-ledger"
    }

    async fn needed(&self, pool: &SqlitePool) -> Result<bool, sqlx::Error> {
        Ok(!table_exists(pool, "orders").await?)
    }

    async fn apply(&self, tx: &mut Transaction<'_, Sqlite>) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            CREATE TABLE orders (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                product_id INTEGER NOT NULL,
                quantity INTEGER NOT NULL CHECK (quantity >= 1),
                customer_name TEXT NOT NULL,
                placed_at INTEGER NOT NULL,
                promotion_id INTEGER,
                FOREIGN KEY (product_id) REFERENCES products (id),
                FOREIGN KEY (promotion_id) REFERENCES promotion_codes (id)
            )
            "#,
        )
        .execute(&mut **tx)
        .await?;
        Ok(())
    }
}

/// Non-destructive upgrade of a legacy order ledger (no `customer_name`,
/// no `promotion_id`): build a shadow table in the current shape, copy every
/// row across with `customer_name = 'Unknown'` and `promotion_id` unset,
/// then swap it into place. Ids, quantities, and timestamps are preserved.
/// The whole step runs in one transaction, so a failed copy leaves the old
/// table intact.
struct WidenOrderLedger;

#[async_trait]
impl MigrationStep for WidenOrderLedger {
    fn name(&self) -> &'static str {
        "widen-order-ledger"
    }

    async fn needed(&self, pool: &SqlitePool) -> Result<bool, sqlx::Error> {
        Ok(table_exists(pool, "orders").await?
            && !column_exists(pool, "orders", "customer_name").await?)
    }

    async fn apply(&self, tx: &mut Transaction<'_, Sqlite>) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            CREATE TABLE orders_migrated (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                product_id INTEGER NOT NULL,
                quantity INTEGER NOT NULL CHECK (quantity >= 1),
                customer_name TEXT NOT NULL,
                placed_at INTEGER NOT NULL,
                promotion_id INTEGER,
                FOREIGN KEY (product_id) REFERENCES products (id),
                FOREIGN KEY (promotion_id) REFERENCES promotion_codes (id)
            )
            "#,
        )
        .execute(&mut **tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO orders_migrated (id, product_id, quantity, customer_name, placed_at, promotion_id)
            SELECT id, product_id, quantity, 'Unknown', placed_at, NULL FROM orders
            "#,
        )
        .execute(&mut **tx)
        .await?;

        sqlx::query("DROP TABLE orders").execute(&mut **tx).await?;
        sqlx::query("ALTER TABLE orders_migrated RENAME TO orders")
            .execute(&mut **tx)
            .await?;

        Ok(())
    }
}

struct SeedCatalog;

#[async_trait]
impl MigrationStep for SeedCatalog {
    fn name(&self) -> &'static str {
        "seed-catalog"
    }

    async fn needed(&self, pool: &SqlitePool) -> Result<bool, sqlx::Error> {
        table_is_empty(pool, "products").await
    }

    async fn apply(&self, tx: &mut Transaction<'_, Sqlite>) -> Result<(), sqlx::Error> {
        for (name, unit_price) in SEED_PRODUCTS {
            sqlx::query("INSERT INTO products (name, unit_price) VALUES ($1, $2)")
                .bind(name)
                .bind(unit_price)
                .execute(&mut **tx)
                .await?;
        }
        Ok(())
    }
}

struct SeedPromotions;

#[async_trait]
impl MigrationStep for SeedPromotions {
    fn name(&self) -> &'static str {
        "seed-promotions"
    }

    async fn needed(&self, pool: &SqlitePool) -> Result<bool, sqlx::Error> {
        table_is_empty(pool, "promotion_codes").await
    }

    async fn apply(&self, tx: &mut Transaction<'_, Sqlite>) -> Result<(), sqlx::Error> {
        for (code, discount_percent) in SEED_PROMOTIONS {
            sqlx::query("INSERT INTO promotion_codes (code, discount_percent) VALUES ($1, $2)")
                .bind(code)
                .bind(discount_percent)
                .execute(&mut **tx)
                .await?;
        }
        Ok(())
    }
}
