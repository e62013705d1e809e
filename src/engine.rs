//! Discount Engine
//!
//! Pure pricing of a single coupon against a cart. [`estimate`] and [`apply`] share one pricing
//! pass, so the estimated discount always equals the discount written by `apply`.

use jiff::Timestamp;
use rusty_money::{Money, iso::Currency};
use smallvec::SmallVec;
use thiserror::Error;
use tracing::{Span, debug};

use crate::{
    cart::{Cart, CartError},
    coupons::{Coupon, CouponUuid},
    pricing::{PricingError, sum_minor},
    validation::{ValidationError, validate},
};

/// Errors raised while estimating or applying a coupon.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    /// No coupon with this id exists.
    #[error("coupon {0} not found")]
    NotFound(CouponUuid),

    /// The coupon expired before the evaluation time.
    #[error("coupon {0} expired")]
    Expired(CouponUuid),

    /// The coupon definition failed validation.
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    /// A coupon amount is in a different currency than the cart.
    #[error("coupon is priced in {coupon}, but cart has currency {cart}")]
    CurrencyMismatch {
        /// Coupon currency code
        coupon: &'static str,
        /// Cart currency code
        cart: &'static str,
    },

    /// Minor unit arithmetic failed.
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// The cart could not be priced.
    #[error(transparent)]
    Cart(#[from] CartError),
}

/// Discount attributed to a single cart line, in minor units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineDiscount {
    /// Index of the line in the cart
    pub item_idx: usize,

    /// Discount on that line
    pub discount: i64,
}

/// Outcome of pricing an eligible coupon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CouponPricing {
    /// A discount on the cart as a whole, not attributed to any line.
    Cart {
        /// Discount in minor units
        discount: i64,
    },

    /// Discounts attributed to individual lines.
    ///
    /// A line may appear more than once. The last entry for a line sets its discount, while the
    /// cart discount counts every entry.
    Lines(SmallVec<[LineDiscount; 10]>),
}

impl CouponPricing {
    /// Total discount across the cart.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::Overflow`] if the line discounts overflow when summed.
    pub fn total_discount(&self) -> Result<i64, PricingError> {
        match self {
            CouponPricing::Cart { discount } => Ok(*discount),
            CouponPricing::Lines(lines) => sum_minor(lines.iter().map(|line| line.discount)),
        }
    }
}

/// Estimate the discount a coupon would give on a cart, without modifying the cart.
///
/// Expiry is not checked here; callers filter expired coupons themselves.
///
/// # Errors
///
/// Returns an [`EngineError`] if the coupon is invalid, the currencies differ, or the
/// arithmetic fails.
pub fn estimate<'a>(
    coupon: &Coupon<'a>,
    cart: &Cart<'a>,
) -> Result<Money<'a, Currency>, EngineError> {
    estimate_prepared(coupon, &cart.cleared()?)
}

/// Estimate against a cart that has already been cleared by [`Cart::cleared`].
pub(crate) fn estimate_prepared<'a>(
    coupon: &Coupon<'a>,
    prepared: &Cart<'a>,
) -> Result<Money<'a, Currency>, EngineError> {
    validate(coupon)?;

    let discount = match coupon.strategy().price(prepared)? {
        Some(pricing) => pricing.total_discount()?,
        None => 0,
    };

    Ok(Money::from_minor(discount, prepared.currency()))
}

/// Apply one coupon to a cart, returning a newly priced cart.
///
/// The pricing pass is fresh: existing discounts on `cart` are discarded and totals are
/// recomputed from its items before the coupon is priced. A coupon that isn't eligible returns
/// the cart with zero discount.
///
/// # Errors
///
/// Returns [`EngineError::Expired`] if the coupon expired before `at`, and any error
/// [`estimate`] can return.
#[tracing::instrument(
    name = "coupons.engine.apply",
    skip(coupon, cart),
    fields(
        coupon_id = %coupon.id(),
        coupon_type = %coupon.coupon_type(),
        total_discount = tracing::field::Empty
    ),
    err
)]
pub fn apply<'a>(
    coupon: &Coupon<'a>,
    cart: &Cart<'a>,
    at: Timestamp,
) -> Result<Cart<'a>, EngineError> {
    if coupon.is_expired_at(at) {
        return Err(EngineError::Expired(coupon.id()));
    }

    validate(coupon)?;

    let mut priced = cart.cleared()?;

    let Some(pricing) = coupon.strategy().price(&priced)? else {
        debug!(coupon_id = %coupon.id(), "coupon not eligible for cart");

        return Ok(priced);
    };

    if let CouponPricing::Lines(lines) = &pricing {
        for line in lines {
            priced.item_mut(line.item_idx)?.set_line_discount(line.discount);
        }
    }

    let total_discount = pricing.total_discount()?;
    priced.set_total_discount(total_discount)?;

    Span::current().record("total_discount", total_discount);

    Ok(priced)
}
