//! Decimal rounding for display values.
//!
//! Rounding works on the shortest round-trip decimal form of an `f64`
//! rather than its binary expansion, so a value written as `0.455` in a
//! document rounds the way it reads: half away from zero.

use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Formats `value` with exactly `places` fractional digits.
///
/// Non-finite values are written as `NaN`, `inf` or `-inf`. Magnitudes
/// outside the `Decimal` range fall back to float formatting.
pub fn round_half_up(value: f64, places: u32) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let width = places as usize;
    match shortest_decimal(value) {
        Some(decimal) => {
            let rounded = round(decimal, places);
            format!("{rounded:.width$}")
        }
        None => unsigned_if_zero(format!("{value:.width$}")),
    }
}

/// `value` scaled by 100 and rounded to a whole percentage.
///
/// Out-of-range inputs are not clamped. Magnitudes beyond `i64` saturate
/// and NaN maps to zero; callers reject non-finite input before this point.
pub fn percent(value: f64) -> i64 {
    if value.is_nan() {
        return 0;
    }
    let saturated = if value.is_sign_negative() {
        i64::MIN
    } else {
        i64::MAX
    };

    let Some(decimal) = shortest_decimal(value) else {
        return if value.abs() < 1.0 { 0 } else { saturated };
    };

    decimal
        .checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|scaled| round(scaled, 0).to_i64())
        .unwrap_or(saturated)
}

fn shortest_decimal(value: f64) -> Option<Decimal> {
    if !value.is_finite() {
        return None;
    }
    Decimal::from_str(&value.to_string()).ok()
}

fn round(decimal: Decimal, places: u32) -> Decimal {
    let rounded = decimal.round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero);
    if rounded.is_zero() {
        Decimal::ZERO
    } else {
        rounded
    }
}

fn unsigned_if_zero(text: String) -> String {
    let unsigned = text.trim_start_matches('-');
    if unsigned.chars().all(|c| c == '0' || c == '.') {
        unsigned.to_string()
    } else {
        text
    }
}
