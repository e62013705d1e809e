//! Eligibility Scanner
//!
//! Finds the coupons in a catalog snapshot that would give a discount on a cart.

use jiff::Timestamp;
use rusty_money::{Money, iso::Currency};
use tracing::{Span, debug};

use crate::{
    cart::Cart,
    coupons::{Coupon, CouponType, CouponUuid},
    engine::{EngineError, estimate_prepared},
};

/// A coupon that applies to a cart, and the discount it would give.
#[derive(Debug, Clone, PartialEq)]
pub struct ApplicableCoupon<'a> {
    /// Coupon id
    pub coupon_id: CouponUuid,

    /// Strategy tag
    pub coupon_type: CouponType,

    /// Projected discount
    pub discount: Money<'a, Currency>,
}

/// Estimate every non-expired coupon against the cart and keep those with a discount above zero.
///
/// Results follow the order of `coupons`. The cart is never modified, and every estimate starts
/// from the same zero-discount pricing of it.
///
/// # Errors
///
/// Returns the first [`EngineError`] raised while estimating a coupon.
#[tracing::instrument(
    name = "coupons.scanner.scan_applicable",
    skip(coupons, cart),
    fields(coupons = coupons.len(), applicable = tracing::field::Empty),
    err
)]
pub fn scan_applicable<'a>(
    coupons: &[Coupon<'a>],
    cart: &Cart<'a>,
    at: Timestamp,
) -> Result<Vec<ApplicableCoupon<'a>>, EngineError> {
    let prepared = cart.cleared()?;
    let mut applicable = Vec::new();

    for coupon in coupons {
        if coupon.is_expired_at(at) {
            debug!(coupon_id = %coupon.id(), "skipping expired coupon");

            continue;
        }

        let discount = estimate_prepared(coupon, &prepared)?;

        if discount.to_minor_units() > 0 {
            applicable.push(ApplicableCoupon {
                coupon_id: coupon.id(),
                coupon_type: coupon.coupon_type(),
                discount,
            });
        }
    }

    Span::current().record("applicable", applicable.len());

    Ok(applicable)
}
