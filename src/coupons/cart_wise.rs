//! Cart-wise Coupons
//!
//! A percentage off the whole cart once its total reaches a threshold.

use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};

use crate::{
    cart::Cart,
    engine::{CouponPricing, EngineError},
    pricing::{percent_of_minor, percentage_from_points},
};

/// Cart-wise payload
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CartWise<'a> {
    threshold: Money<'a, Currency>,
    discount_percent: Decimal,
}

impl<'a> CartWise<'a> {
    /// Create a new cart-wise payload. `discount_percent` is in percentage points (`10` is 10%).
    pub fn new(threshold: Money<'a, Currency>, discount_percent: Decimal) -> Self {
        Self {
            threshold,
            discount_percent,
        }
    }

    /// Minimum cart total (inclusive)
    pub fn threshold(&self) -> &Money<'a, Currency> {
        &self.threshold
    }

    /// Discount in percentage points
    pub fn discount_percent(&self) -> Decimal {
        self.discount_percent
    }

    /// Whether the cart total reaches the threshold.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::CurrencyMismatch`] if the threshold and cart currencies differ.
    pub fn is_eligible(&self, cart: &Cart<'a>) -> Result<bool, EngineError> {
        let threshold_currency = self.threshold.currency();

        if threshold_currency != cart.currency() {
            return Err(EngineError::CurrencyMismatch {
                coupon: threshold_currency.iso_alpha_code,
                cart: cart.currency().iso_alpha_code,
            });
        }

        Ok(cart.total_price().to_minor_units() >= self.threshold.to_minor_units())
    }

    /// Price the coupon against the cart total.
    ///
    /// # Errors
    ///
    /// Returns an [`EngineError`] on a currency mismatch or if the percentage can't be applied.
    pub fn price(&self, cart: &Cart<'a>) -> Result<Option<CouponPricing>, EngineError> {
        if !self.is_eligible(cart)? {
            return Ok(None);
        }

        let percent = percentage_from_points(self.discount_percent);
        let discount = percent_of_minor(&percent, cart.total_price().to_minor_units())?;

        Ok(Some(CouponPricing::Cart { discount }))
    }
}
