//! Pricing engine
//!
//! Pure computation: unit price × quantity with an optional percentage
//! discount. No I/O, no side effects. All arithmetic is `Decimal`; the
//! quote carries unrounded values and rounding to two decimal places
//! happens only at the presentation boundary (`money::to_f64`).

use rust_decimal::Decimal;

use crate::error::StoreError;
use crate::money::{MAX_QUANTITY, MAX_UNIT_PRICE, to_decimal};

/// Priced breakdown of one order line
#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    pub subtotal: Decimal,
    pub discount_amount: Decimal,
    pub total: Decimal,
}

#[inline]
fn require_finite(value: f64, field_name: &str) -> Result<(), StoreError> {
    if !value.is_finite() {
        return Err(StoreError::validation(format!(
            "{} must be a finite number, got {}",
            field_name, value
        )));
    }
    Ok(())
}

/// Price an order line.
///
/// `discount_percent` of `None` and `Some(0.0)` are priced identically:
/// no discount. Rejects negative or oversized unit prices, non-positive or
/// oversized quantities, and discounts outside `[0, 100]`.
pub fn quote(
    unit_price: f64,
    quantity: i64,
    discount_percent: Option<f64>,
) -> Result<Quote, StoreError> {
    require_finite(unit_price, "unit price")?;
    if unit_price < 0.0 {
        return Err(StoreError::validation(format!(
            "unit price must be non-negative, got {}",
            unit_price
        )));
    }
    if unit_price > MAX_UNIT_PRICE {
        return Err(StoreError::validation(format!(
            "unit price exceeds maximum allowed ({}), got {}",
            MAX_UNIT_PRICE, unit_price
        )));
    }

    if quantity < 1 {
        return Err(StoreError::validation(format!(
            "quantity must be positive, got {}",
            quantity
        )));
    }
    if quantity > MAX_QUANTITY {
        return Err(StoreError::validation(format!(
            "quantity exceeds maximum allowed ({}), got {}",
            MAX_QUANTITY, quantity
        )));
    }

    let percent = discount_percent.unwrap_or(0.0);
    require_finite(percent, "discount percent")?;
    if !(0.0..=100.0).contains(&percent) {
        return Err(StoreError::validation(format!(
            "discount percent must be between 0 and 100, got {}",
            percent
        )));
    }

    let subtotal = to_decimal(unit_price) * Decimal::from(quantity);
    let discount_amount = subtotal * to_decimal(percent) / Decimal::ONE_HUNDRED;
    let total = subtotal - discount_amount;

    Ok(Quote {
        subtotal,
        discount_amount,
        total,
    })
}
