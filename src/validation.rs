//! Coupon Validation
//!
//! Structural and range checks run before a coupon is accepted by a catalog, and again at the
//! engine boundary.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::coupons::{
    BuyXGetY, CartWise, Coupon, CouponStrategy, ProductQuantity, ProductWise, UnknownCouponType,
};

/// Reasons a coupon definition is rejected.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The payload doesn't match the shape expected for its strategy.
    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    /// Discount percentage outside `0..=100`.
    #[error("discount must be between 0 and 100")]
    InvalidDiscount,

    /// Negative cart-wise threshold.
    #[error("threshold cannot be negative")]
    InvalidThreshold,

    /// A product id that isn't positive, or a product quantity below one.
    #[error("product id must be positive and product quantity must be >= 1")]
    InvalidProductReference,

    /// Negative buy X get Y repetition limit.
    #[error("repetition limit cannot be negative")]
    InvalidRepetitionLimit,

    /// The strategy tag isn't one of the known coupon types.
    #[error("invalid coupon type: {0}")]
    UnknownCouponType(String),
}

impl From<UnknownCouponType> for ValidationError {
    fn from(UnknownCouponType(tag): UnknownCouponType) -> Self {
        Self::UnknownCouponType(tag)
    }
}

/// Validate a coupon's strategy payload.
///
/// # Errors
///
/// Returns the first [`ValidationError`] found.
pub fn validate(coupon: &Coupon<'_>) -> Result<(), ValidationError> {
    validate_strategy(coupon.strategy())
}

/// Validate a strategy payload on its own.
///
/// # Errors
///
/// Returns the first [`ValidationError`] found.
pub fn validate_strategy(strategy: &CouponStrategy<'_>) -> Result<(), ValidationError> {
    match strategy {
        CouponStrategy::CartWise(cart_wise) => validate_cart_wise(cart_wise),
        CouponStrategy::ProductWise(product_wise) => validate_product_wise(product_wise),
        CouponStrategy::BuyXGetY(buy_x_get_y) => validate_buy_x_get_y(buy_x_get_y),
    }
}

fn validate_cart_wise(cart_wise: &CartWise<'_>) -> Result<(), ValidationError> {
    if cart_wise.threshold().is_negative() {
        return Err(ValidationError::InvalidThreshold);
    }

    validate_discount_percent(cart_wise.discount_percent())
}

fn validate_product_wise(product_wise: &ProductWise) -> Result<(), ValidationError> {
    if !product_wise.product_id().is_valid() {
        return Err(ValidationError::InvalidProductReference);
    }

    validate_discount_percent(product_wise.discount_percent())
}

fn validate_buy_x_get_y(buy_x_get_y: &BuyXGetY) -> Result<(), ValidationError> {
    if buy_x_get_y.repetition_limit() < 0 {
        return Err(ValidationError::InvalidRepetitionLimit);
    }

    buy_x_get_y
        .buy_products()
        .iter()
        .chain(buy_x_get_y.get_products())
        .try_for_each(validate_product_quantity)
}

fn validate_product_quantity(entry: &ProductQuantity) -> Result<(), ValidationError> {
    if entry.product_id.is_valid() && entry.quantity > 0 {
        Ok(())
    } else {
        Err(ValidationError::InvalidProductReference)
    }
}

fn validate_discount_percent(percent: Decimal) -> Result<(), ValidationError> {
    if (Decimal::ZERO..=Decimal::ONE_HUNDRED).contains(&percent) {
        Ok(())
    } else {
        Err(ValidationError::InvalidDiscount)
    }
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use rusty_money::{Money, iso::GBP};

    use crate::{coupons::CouponUuid, products::ProductId};

    use super::*;

    fn coupon(strategy: CouponStrategy<'static>) -> Coupon<'static> {
        Coupon::new(CouponUuid::generate(), Timestamp::UNIX_EPOCH, strategy)
    }

    fn cart_wise(threshold_minor: i64, percent: i64) -> Coupon<'static> {
        coupon(CouponStrategy::CartWise(CartWise::new(
            Money::from_minor(threshold_minor, GBP),
            Decimal::from(percent),
        )))
    }

    fn product_wise(product_id: i64, percent: i64) -> Coupon<'static> {
        coupon(CouponStrategy::ProductWise(ProductWise::new(
            ProductId::new(product_id),
            Decimal::from(percent),
        )))
    }

    fn bxgy(buy: (i64, i64), get: (i64, i64), limit: i64) -> Coupon<'static> {
        coupon(CouponStrategy::BuyXGetY(BuyXGetY::new(
            [ProductQuantity::new(ProductId::new(buy.0), buy.1)],
            [ProductQuantity::new(ProductId::new(get.0), get.1)],
            limit,
        )))
    }

    #[test]
    fn accepts_well_formed_coupons() {
        assert_eq!(validate(&cart_wise(10_000, 10)), Ok(()));
        assert_eq!(validate(&cart_wise(0, 0)), Ok(()));
        assert_eq!(validate(&product_wise(1, 100)), Ok(()));
        assert_eq!(validate(&bxgy((1, 2), (2, 1), 0)), Ok(()));
    }

    #[test]
    fn rejects_negative_threshold() {
        assert_eq!(
            validate(&cart_wise(-100, 10)),
            Err(ValidationError::InvalidThreshold)
        );
    }

    #[test]
    fn rejects_discount_out_of_range() {
        assert_eq!(
            validate(&cart_wise(0, 101)),
            Err(ValidationError::InvalidDiscount)
        );
        assert_eq!(
            validate(&product_wise(1, -1)),
            Err(ValidationError::InvalidDiscount)
        );
    }

    #[test]
    fn threshold_is_checked_before_discount() {
        assert_eq!(
            validate(&cart_wise(-1, 200)),
            Err(ValidationError::InvalidThreshold)
        );
    }

    #[test]
    fn rejects_non_positive_product_id() {
        assert_eq!(
            validate(&product_wise(0, 10)),
            Err(ValidationError::InvalidProductReference)
        );
    }

    #[test]
    fn rejects_zero_quantity_buy_entry() {
        assert_eq!(
            validate(&bxgy((1, 0), (2, 1), 1)),
            Err(ValidationError::InvalidProductReference)
        );
    }

    #[test]
    fn rejects_invalid_reward_entry() {
        assert_eq!(
            validate(&bxgy((1, 1), (-2, 1), 1)),
            Err(ValidationError::InvalidProductReference)
        );
    }

    #[test]
    fn rejects_negative_repetition_limit() {
        assert_eq!(
            validate(&bxgy((1, 1), (2, 1), -1)),
            Err(ValidationError::InvalidRepetitionLimit)
        );
    }

    #[test]
    fn unknown_tag_converts_to_validation_error() {
        assert_eq!(
            ValidationError::from(UnknownCouponType("bogo".to_string())),
            ValidationError::UnknownCouponType("bogo".to_string())
        );
    }
}
