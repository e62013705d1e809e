//! Pricing
//!
//! Minor-unit arithmetic shared by the cart totals and every coupon strategy. Each helper rounds
//! to whole minor units as soon as it produces a value, so results are reproducible to the cent.

use decimal_percentage::Percentage;
use num_traits::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

/// Errors raised by minor-unit arithmetic.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PricingError {
    /// Percentage calculation could not be safely converted.
    #[error("percentage conversion overflowed or was not finite")]
    PercentConversion,

    /// Integer arithmetic on minor units overflowed.
    #[error("minor unit arithmetic overflowed")]
    Overflow,
}

/// Build a [`Percentage`] from percentage points (e.g. `15` for 15%).
pub fn percentage_from_points(points: Decimal) -> Percentage {
    Percentage::from(points / Decimal::ONE_HUNDRED)
}

/// Calculate a percentage of an amount in minor units, rounded half away from zero.
///
/// # Errors
///
/// Returns [`PricingError::PercentConversion`] if the product cannot be represented.
pub fn percent_of_minor(percent: &Percentage, minor: i64) -> Result<i64, PricingError> {
    let minor = Decimal::from_i64(minor).ok_or(PricingError::PercentConversion)?;

    ((*percent) * Decimal::ONE)
        .checked_mul(minor)
        .ok_or(PricingError::PercentConversion)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .ok_or(PricingError::PercentConversion)
}

/// Price of `quantity` units at `unit_minor` each.
///
/// # Errors
///
/// Returns [`PricingError::Overflow`] if the product does not fit in an `i64`.
pub fn line_total(quantity: u32, unit_minor: i64) -> Result<i64, PricingError> {
    unit_minor
        .checked_mul(i64::from(quantity))
        .ok_or(PricingError::Overflow)
}

/// Sum a sequence of minor unit amounts.
///
/// # Errors
///
/// Returns [`PricingError::Overflow`] if the sum does not fit in an `i64`.
pub fn sum_minor(amounts: impl IntoIterator<Item = i64>) -> Result<i64, PricingError> {
    amounts
        .into_iter()
        .try_fold(0i64, |acc, amount| acc.checked_add(amount))
        .ok_or(PricingError::Overflow)
}

/// Convert an amount in major units (e.g. `12.345`) to minor units of a currency with the given
/// exponent, rounding half away from zero.
///
/// Returns `None` when the amount cannot be represented.
pub fn major_to_minor(amount: Decimal, exponent: u32) -> Option<i64> {
    let scale = Decimal::from_i64(10i64.checked_pow(exponent)?)?;

    amount
        .checked_mul(scale)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
}
