//! Coupons
//!
//! A coupon is a discount rule with exactly one strategy payload, fixed when the coupon is
//! constructed. Coupons are read-only once built: the engine never mutates them.

use std::{fmt, str::FromStr};

use jiff::Timestamp;

use crate::{cart::Cart, engine::CouponPricing, engine::EngineError, uuids::TypedUuid};

pub mod buy_x_get_y;
pub mod cart_wise;
pub mod product_wise;

pub use buy_x_get_y::{BuyXGetY, ProductQuantity};
pub use cart_wise::CartWise;
pub use product_wise::ProductWise;

/// Coupon UUID
pub type CouponUuid = TypedUuid<Coupon<'static>>;

/// Strategy tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CouponType {
    /// Percentage off the whole cart above a threshold
    CartWise,

    /// Percentage off every line of one product
    ProductWise,

    /// Buy X, get Y free
    BuyXGetY,
}

impl CouponType {
    /// Tag name as used at the boundary
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::CartWise => "cart-wise",
            Self::ProductWise => "product-wise",
            Self::BuyXGetY => "bxgy",
        }
    }
}

impl fmt::Display for CouponType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The tag was not one of the known strategies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCouponType(pub String);

impl FromStr for CouponType {
    type Err = UnknownCouponType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cart-wise" => Ok(Self::CartWise),
            "product-wise" => Ok(Self::ProductWise),
            "bxgy" => Ok(Self::BuyXGetY),
            other => Err(UnknownCouponType(other.to_string())),
        }
    }
}

/// Strategy payload
#[derive(Debug, Clone, PartialEq)]
pub enum CouponStrategy<'a> {
    /// Cart-wise strategy
    CartWise(CartWise<'a>),

    /// Product-wise strategy
    ProductWise(ProductWise),

    /// Buy X get Y strategy
    BuyXGetY(BuyXGetY),
}

impl<'a> CouponStrategy<'a> {
    /// Return the strategy tag.
    pub const fn coupon_type(&self) -> CouponType {
        match self {
            CouponStrategy::CartWise(_) => CouponType::CartWise,
            CouponStrategy::ProductWise(_) => CouponType::ProductWise,
            CouponStrategy::BuyXGetY(_) => CouponType::BuyXGetY,
        }
    }

    /// Price this strategy against a cart whose totals are current and whose discounts are
    /// cleared. Returns `None` if the coupon is not eligible.
    ///
    /// # Errors
    ///
    /// Returns an [`EngineError`] if the arithmetic fails or the cart currency doesn't match.
    pub fn price(&self, cart: &Cart<'a>) -> Result<Option<CouponPricing>, EngineError> {
        match self {
            CouponStrategy::CartWise(cart_wise) => cart_wise.price(cart),
            CouponStrategy::ProductWise(product_wise) => product_wise.price(cart),
            CouponStrategy::BuyXGetY(buy_x_get_y) => buy_x_get_y.price(cart),
        }
    }
}

/// Coupon
#[derive(Debug, Clone, PartialEq)]
pub struct Coupon<'a> {
    id: CouponUuid,
    strategy: CouponStrategy<'a>,
    created_at: Timestamp,
    expires_at: Option<Timestamp>,
}

impl<'a> Coupon<'a> {
    /// Create a new coupon that never expires.
    pub fn new(id: CouponUuid, created_at: Timestamp, strategy: CouponStrategy<'a>) -> Self {
        Self {
            id,
            strategy,
            created_at,
            expires_at: None,
        }
    }

    /// Set the expiry time.
    #[must_use]
    pub fn with_expires_at(mut self, expires_at: Option<Timestamp>) -> Self {
        self.expires_at = expires_at;
        self
    }

    /// Coupon id
    pub fn id(&self) -> CouponUuid {
        self.id
    }

    /// Strategy payload
    pub fn strategy(&self) -> &CouponStrategy<'a> {
        &self.strategy
    }

    /// Strategy tag
    pub fn coupon_type(&self) -> CouponType {
        self.strategy.coupon_type()
    }

    /// Creation time
    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// Expiry time, if any
    pub fn expires_at(&self) -> Option<Timestamp> {
        self.expires_at
    }

    /// A coupon is expired once its expiry time is strictly before `at`.
    pub fn is_expired_at(&self, at: Timestamp) -> bool {
        self.expires_at.is_some_and(|expires_at| expires_at < at)
    }
}

#[cfg(test)]
mod tests {
    use jiff::{SignedDuration, Timestamp};
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use crate::products::ProductId;

    use super::*;

    fn product_wise(created_at: Timestamp) -> Coupon<'static> {
        Coupon::new(
            CouponUuid::generate(),
            created_at,
            CouponStrategy::ProductWise(ProductWise::new(ProductId::new(1), Decimal::from(10))),
        )
    }

    #[test]
    fn coupon_type_parses_from_its_tag() {
        for coupon_type in [
            CouponType::CartWise,
            CouponType::ProductWise,
            CouponType::BuyXGetY,
        ] {
            assert_eq!(coupon_type.as_str().parse::<CouponType>(), Ok(coupon_type));
        }
    }

    #[test]
    fn unknown_tag_is_rejected() {
        assert_eq!(
            "free-shipping".parse::<CouponType>(),
            Err(UnknownCouponType("free-shipping".to_string()))
        );
    }

    #[test]
    fn coupon_without_expiry_never_expires() {
        let coupon = product_wise(Timestamp::UNIX_EPOCH);

        assert!(!coupon.is_expired_at(Timestamp::MAX));
    }

    #[test]
    fn expiry_is_strictly_before_evaluation_time() -> TestResult {
        let expires_at: Timestamp = "2026-06-01T00:00:00Z".parse()?;
        let coupon = product_wise(Timestamp::UNIX_EPOCH).with_expires_at(Some(expires_at));

        assert!(!coupon.is_expired_at(expires_at));
        assert!(!coupon.is_expired_at(expires_at - SignedDuration::from_secs(1)));
        assert!(coupon.is_expired_at(expires_at + SignedDuration::from_secs(1)));

        Ok(())
    }

    #[test]
    fn coupon_type_delegates_to_strategy() {
        let coupon = product_wise(Timestamp::UNIX_EPOCH);

        assert_eq!(coupon.coupon_type(), CouponType::ProductWise);
    }
}
