//! Order workflow: validate → resolve promotion → price → persist → confirm
//!
//! Single pass, no retries; each placement is one bounded transaction
//! against the store. Totals are computed from the *current* product and
//! promotion rows both at order time and again at display time, so
//! historical totals follow later catalog price changes. Known risk,
//! preserved source behavior.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::db::{catalog, orders, promotions};
use crate::error::StoreError;
use crate::money::to_f64;
use crate::pricing::{self, Quote};

/// Length bound for customer names
const MAX_NAME_LEN: usize = 200;

/// Display timestamp format for confirmation views
const DISPLAY_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Raw order input as received from the presentation layer
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderDraft {
    pub product_id: Option<i64>,
    pub quantity: Option<i64>,
    pub customer_name: Option<String>,
    pub promo_code: Option<String>,
}

/// User-facing summary of a placed order, returned to the presentation
/// layer. Monetary fields are rounded to two decimal places here, at the
/// display boundary, never earlier.
#[derive(Debug, Clone, Serialize)]
pub struct Confirmation {
    pub order_id: i64,
    pub customer_name: String,
    pub product_name: String,
    pub unit_price: f64,
    pub quantity: i64,
    /// Promotion code label; `"None"` when no promotion applied
    pub promo_code: String,
    pub discount_percent: f64,
    pub subtotal: f64,
    pub discount_amount: f64,
    pub total: f64,
    /// Confirmation-view moment ("now"), distinct from the stored placed_at
    pub confirmed_at: String,
}

struct ValidOrder {
    product_id: i64,
    quantity: i64,
    customer_name: String,
    promo_code: Option<String>,
}

fn validate(draft: OrderDraft) -> Result<ValidOrder, StoreError> {
    let product_id = draft
        .product_id
        .ok_or_else(|| StoreError::validation("product_id is required"))?;

    let quantity = draft
        .quantity
        .ok_or_else(|| StoreError::validation("quantity is required"))?;
    if quantity < 1 {
        return Err(StoreError::validation(format!(
            "quantity must be a positive integer, got {quantity}"
        )));
    }

    let customer_name = draft
        .customer_name
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
        .ok_or_else(|| StoreError::validation("customer_name must not be empty"))?;
    if customer_name.len() > MAX_NAME_LEN {
        return Err(StoreError::validation(format!(
            "customer_name is too long ({} chars, max {MAX_NAME_LEN})",
            customer_name.len()
        )));
    }

    let promo_code = draft.promo_code.filter(|c| !c.trim().is_empty());

    Ok(ValidOrder {
        product_id,
        quantity,
        customer_name,
        promo_code,
    })
}

/// Run the full order workflow and return the confirmation record.
pub async fn place_order(
    pool: &SqlitePool,
    draft: OrderDraft,
) -> Result<Confirmation, StoreError> {
    let order = validate(draft)?;

    // An unknown code is silently ignored, not rejected
    let promotion = match &order.promo_code {
        Some(code) => {
            let found = promotions::find_by_code(pool, code).await?;
            if found.is_none() {
                tracing::debug!(code = %code, "Unknown promotion code ignored");
            }
            found
        }
        None => None,
    };

    // Unit price is fetched fresh, not cached
    let product = catalog::find_product(pool, order.product_id)
        .await?
        .ok_or(StoreError::UnknownProduct {
            product_id: order.product_id,
        })?;

    let discount_percent = promotion.as_ref().map(|p| p.discount_percent);
    let quote = pricing::quote(product.unit_price, order.quantity, discount_percent)?;

    let order_id = orders::insert_order(
        pool,
        product.id,
        order.quantity,
        &order.customer_name,
        promotion.as_ref().map(|p| p.id),
    )
    .await?;

    tracing::info!(
        order_id,
        product = %product.name,
        quantity = order.quantity,
        "Order placed"
    );

    Ok(confirmation(
        order_id,
        order.customer_name,
        product.name,
        product.unit_price,
        order.quantity,
        promotion.map(|p| (p.code, p.discount_percent)),
        &quote,
    ))
}

/// Display record for a stored order: the ledger row joined with its
/// product and promotion, re-priced from current values. `None` when the
/// order (or, defensively, its product) is missing.
pub async fn order_summary(
    pool: &SqlitePool,
    order_id: i64,
) -> Result<Option<Confirmation>, StoreError> {
    let Some(details) = orders::get_order(pool, order_id).await? else {
        return Ok(None);
    };

    let quote = pricing::quote(details.unit_price, details.quantity, details.discount_percent)?;

    let promotion = match (details.promo_code, details.discount_percent) {
        (Some(code), Some(percent)) => Some((code, percent)),
        _ => None,
    };

    Ok(Some(confirmation(
        details.id,
        details.customer_name,
        details.product_name,
        details.unit_price,
        details.quantity,
        promotion,
        &quote,
    )))
}

fn confirmation(
    order_id: i64,
    customer_name: String,
    product_name: String,
    unit_price: f64,
    quantity: i64,
    promotion: Option<(String, f64)>,
    quote: &Quote,
) -> Confirmation {
    let (promo_code, discount_percent) =
        promotion.unwrap_or_else(|| ("None".to_string(), 0.0));
    Confirmation {
        order_id,
        customer_name,
        product_name,
        unit_price,
        quantity,
        promo_code,
        discount_percent,
        subtotal: to_f64(quote.subtotal),
        discount_amount: to_f64(quote.discount_amount),
        total: to_f64(quote.total),
        confirmed_at: Utc::now().format(DISPLAY_TIME_FORMAT).to_string(),
    }
}
