//! Coupons prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{Cart, CartError, CartItem},
    catalog::{CatalogError, CouponCatalog},
    coupons::{
        BuyXGetY, CartWise, Coupon, CouponStrategy, CouponType, CouponUuid, ProductQuantity,
        ProductWise,
    },
    definitions::{CartDefinition, CartItemDefinition, CouponDefinition},
    engine::{CouponPricing, EngineError, LineDiscount, apply, estimate},
    fixtures::{Fixture, FixtureError},
    pricing::PricingError,
    products::ProductId,
    scanner::{ApplicableCoupon, scan_applicable},
    validation::{ValidationError, validate},
};
