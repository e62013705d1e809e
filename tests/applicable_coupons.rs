//! Integration test for scanning the default catalog against the default cart.
//!
//! The default cart (INR) holds:
//! - product 1: 6 x 50.00 = 300.00
//! - product 2: 3 x 30.00 =  90.00
//! - product 3: 2 x 25.00 =  50.00
//!
//! Total: 440.00
//!
//! Expected applicable coupons, in catalog order:
//! 1. cart-wise 10% over 100.00: 44.00
//! 2. product-wise 20% on product 1: 60.00
//! 3. bxgy buy 3 x product 1 and 3 x product 2, get 1 x product 3, limit 2:
//!    groups = min(6 / 3, 3 / 3) = 1, so one unit of product 3 is free: 25.00
//!
//! The 50% cart-wise coupon expired at the end of 2024 and the product-wise coupon for
//! product 9 gives nothing, so neither is listed.

use jiff::Timestamp;
use rusty_money::{Money, iso::INR};
use testresult::TestResult;

use coupons::{
    coupons::{CouponType, CouponUuid},
    fixtures::Fixture,
};

fn id(value: &str) -> Result<CouponUuid, uuid::Error> {
    value.parse()
}

#[test]
fn default_catalog_lists_applicable_coupons_in_order() -> TestResult {
    let fixture = Fixture::new();
    let catalog = fixture.load_catalog("default")?;
    let cart = fixture.load_cart("default")?;

    let at: Timestamp = "2025-06-01T00:00:00Z".parse()?;
    let applicable = catalog.applicable(&cart, at)?;

    let summary: Vec<_> = applicable
        .iter()
        .map(|found| (found.coupon_id, found.coupon_type, found.discount))
        .collect();

    assert_eq!(
        summary,
        vec![
            (
                id("0190b3a0-1c00-7000-8000-000000000001")?,
                CouponType::CartWise,
                Money::from_minor(4_400, INR)
            ),
            (
                id("0190b3a0-1c00-7000-8000-000000000002")?,
                CouponType::ProductWise,
                Money::from_minor(6_000, INR)
            ),
            (
                id("0190b3a0-1c00-7000-8000-000000000003")?,
                CouponType::BuyXGetY,
                Money::from_minor(2_500, INR)
            ),
        ]
    );

    Ok(())
}

#[test]
fn coupon_is_applicable_until_its_expiry() -> TestResult {
    let fixture = Fixture::new();
    let catalog = fixture.load_catalog("default")?;
    let cart = fixture.load_cart("default")?;

    let at: Timestamp = "2024-12-31T23:59:59Z".parse()?;
    let applicable = catalog.applicable(&cart, at)?;

    let expiring = id("0190b3a0-1c00-7000-8000-000000000004")?;
    let found = applicable
        .iter()
        .find(|found| found.coupon_id == expiring)
        .ok_or("Expected the expiring coupon to still apply")?;

    assert_eq!(found.discount, Money::from_minor(22_000, INR));

    Ok(())
}

#[test]
fn scanning_leaves_cart_untouched() -> TestResult {
    let fixture = Fixture::new();
    let catalog = fixture.load_catalog("default")?;
    let cart = fixture.load_cart("default")?;
    let snapshot = cart.clone();

    let at: Timestamp = "2025-06-01T00:00:00Z".parse()?;

    let first = catalog.applicable(&cart, at)?;
    let second = catalog.applicable(&cart, at)?;

    assert_eq!(first, second);
    assert_eq!(cart, snapshot);

    Ok(())
}

#[test]
fn small_cart_only_qualifies_for_cart_wise() -> TestResult {
    // 1 x 30.00 + 2 x 25.00 = 80.00: below the 100.00 threshold, but over the expired
    // coupon's 50.00 threshold. No product 1 means neither product-wise nor bxgy applies.
    let fixture = Fixture::new();
    let catalog = fixture.load_catalog("default")?;
    let cart = fixture.load_cart("small")?;

    let at: Timestamp = "2024-06-01T00:00:00Z".parse()?;
    let applicable = catalog.applicable(&cart, at)?;

    let [only] = applicable.as_slice() else {
        return Err("Expected exactly one applicable coupon".into());
    };

    assert_eq!(only.coupon_id, id("0190b3a0-1c00-7000-8000-000000000004")?);
    assert_eq!(only.discount, Money::from_minor(4_000, INR));

    Ok(())
}
