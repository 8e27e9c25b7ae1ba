//! Exact decimal-to-minor-unit conversion.
//!
//! The gateway takes money as integer cents. Conversion follows fixed-point
//! formatting semantics: round to exactly two fractional digits (half away
//! from zero), then shift the separator out. Everything stays in
//! [`Decimal`]; binary floating point never touches a money field.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{GatewayError, Result};

/// Converts a decimal amount to integer cents.
///
/// Rounds to two fractional digits half away from zero (`10.005` becomes
/// `10.01`), multiplies by 100, and returns the integral result. Repeated
/// conversion of an already two-digit amount is exact and idempotent.
///
/// # Errors
///
/// Returns [`GatewayError::InvalidAmount`] for negative amounts and for
/// amounts whose cent value does not fit in an `i64`.
///
/// # Examples
///
/// ```
/// use payway_bridge::payment::amount::to_minor_units;
/// use rust_decimal::Decimal;
///
/// assert_eq!(to_minor_units(Decimal::new(123, 1)).unwrap(), 1230); // 12.3
/// assert_eq!(to_minor_units(Decimal::new(5, 2)).unwrap(), 5); // 0.05
/// assert_eq!(to_minor_units(Decimal::from(100)).unwrap(), 10_000);
/// ```
pub fn to_minor_units(amount: Decimal) -> Result<i64> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(GatewayError::InvalidAmount(format!("amount must not be negative: {amount}")));
    }

    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let cents = rounded
        .checked_mul(Decimal::ONE_HUNDRED)
        .ok_or_else(|| GatewayError::InvalidAmount(format!("amount out of range: {amount}")))?;

    cents
        .to_i64()
        .ok_or_else(|| GatewayError::InvalidAmount(format!("amount out of range: {amount}")))
}
