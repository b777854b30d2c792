//! The single decimal context every money computation goes through.
//!
//! Results are rounded to [`DECIMAL_PRECISION`] places with banker's rounding.
//! Mixing rounding modes between operations produces drift between
//! otherwise identical reports, so nothing outside this module rounds.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::constants::DECIMAL_PRECISION;

pub const ROUNDING: RoundingStrategy = RoundingStrategy::MidpointNearestEven;

pub fn round(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PRECISION, ROUNDING)
}

pub fn mul(a: Decimal, b: Decimal) -> Decimal {
    round(a * b)
}

/// Divides under the context, `None` when the divisor is zero.
pub fn div(a: Decimal, b: Decimal) -> Option<Decimal> {
    a.checked_div(b).map(round)
}

pub fn add(a: Decimal, b: Decimal) -> Decimal {
    round(a + b)
}

pub fn sub(a: Decimal, b: Decimal) -> Decimal {
    round(a - b)
}
