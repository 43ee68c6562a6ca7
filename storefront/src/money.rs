//! Money conversion utilities using rust_decimal for precision
//!
//! All pricing arithmetic is done in `Decimal`; `f64` appears only at the
//! storage/serialization boundary. Conversion back to `f64` rounds to two
//! decimal places, so rounding never happens mid-computation.

use rust_decimal::prelude::*;

/// Rounding for monetary values (2 decimal places, half-up)
pub const DECIMAL_PLACES: u32 = 2;

/// Maximum allowed unit price (1,000,000)
pub const MAX_UNIT_PRICE: f64 = 1_000_000.0;
/// Maximum allowed quantity per order
pub const MAX_QUANTITY: i64 = 9999;

/// Convert f64 to Decimal for calculation
///
/// Input values should be pre-validated as finite at the boundary. If
/// NaN/Infinity somehow reaches here, logs an error and returns ZERO to
/// avoid silent corruption in monetary calculations.
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_else(|| {
        tracing::error!(value = ?value, "Non-finite f64 in monetary calculation, defaulting to zero");
        Decimal::ZERO
    })
}

/// Convert Decimal back to f64 for display, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        // SAFETY: Decimal rounded to 2dp with unit price ≤ 1_000_000 and
        // quantity ≤ 9999 (validated at boundary) is always representable
        .expect("Decimal rounded to 2dp is always representable as f64")
}
