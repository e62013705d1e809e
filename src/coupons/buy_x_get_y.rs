//! Buy X Get Y Coupons
//!
//! Reward items become free in proportion to how many times the buy requirements are met by the
//! cart, capped by the repetition limit.
//!
//! Counting rules:
//! - each requirement divides the quantity of the first cart line carrying its product by the
//!   required quantity; a missing product counts as zero,
//! - requirements referencing the same product each see the full quantity (units are not
//!   partitioned between requirements),
//! - the group count is the minimum over all requirements, then `min(groups, repetition_limit)`,
//!   so a limit of zero yields no groups at all,
//! - an empty buy list places no requirement, so the group count is the repetition limit.
//!
//! Each reward entry prices every matching line on its own. When two entries name the same
//! product, the later one sets that line's discount but both count toward the cart discount.

use smallvec::SmallVec;

use crate::{
    cart::Cart,
    engine::{CouponPricing, EngineError, LineDiscount},
    pricing::PricingError,
    products::ProductId,
};

/// A product and the number of units required or rewarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProductQuantity {
    /// Product
    pub product_id: ProductId,

    /// Units; must be at least one
    pub quantity: i64,
}

impl ProductQuantity {
    /// Create a new product quantity.
    pub const fn new(product_id: ProductId, quantity: i64) -> Self {
        Self {
            product_id,
            quantity,
        }
    }
}

/// Buy X get Y payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuyXGetY {
    buy_products: Vec<ProductQuantity>,
    get_products: Vec<ProductQuantity>,
    repetition_limit: i64,
}

impl BuyXGetY {
    /// Create a new buy X get Y payload.
    pub fn new(
        buy_products: impl Into<Vec<ProductQuantity>>,
        get_products: impl Into<Vec<ProductQuantity>>,
        repetition_limit: i64,
    ) -> Self {
        Self {
            buy_products: buy_products.into(),
            get_products: get_products.into(),
            repetition_limit,
        }
    }

    /// Buy requirements, in order
    pub fn buy_products(&self) -> &[ProductQuantity] {
        &self.buy_products
    }

    /// Reward items, in order
    pub fn get_products(&self) -> &[ProductQuantity] {
        &self.get_products
    }

    /// Maximum number of groups rewarded
    pub fn repetition_limit(&self) -> i64 {
        self.repetition_limit
    }

    /// Number of times the buy requirements are met, capped by the repetition limit.
    pub fn eligible_groups(&self, cart: &Cart<'_>) -> i64 {
        let groups = self
            .buy_products
            .iter()
            .map(|requirement| {
                let on_cart = cart
                    .iter()
                    .find(|item| item.product_id() == requirement.product_id)
                    .map_or(0, |item| i64::from(item.quantity()));

                on_cart.checked_div(requirement.quantity).unwrap_or(0)
            })
            .min()
            .unwrap_or(i64::MAX);

        groups.min(self.repetition_limit).max(0)
    }

    /// Price the free reward units. Every cart line carrying a reward product gets
    /// `min(line quantity, reward quantity x groups)` units for free.
    ///
    /// # Errors
    ///
    /// Returns an [`EngineError`] if the discount overflows.
    pub fn price(&self, cart: &Cart<'_>) -> Result<Option<CouponPricing>, EngineError> {
        let groups = self.eligible_groups(cart);

        if groups == 0 {
            return Ok(None);
        }

        let mut lines: SmallVec<[LineDiscount; 10]> = SmallVec::new();

        for reward in &self.get_products {
            let granted = reward.quantity.saturating_mul(groups).max(0);

            for (item_idx, item) in cart.iter().enumerate() {
                if item.product_id() != reward.product_id {
                    continue;
                }

                let free = i64::from(item.quantity()).min(granted);
                let discount = item
                    .unit_price()
                    .to_minor_units()
                    .checked_mul(free)
                    .ok_or(PricingError::Overflow)?;

                lines.push(LineDiscount { item_idx, discount });
            }
        }

        Ok(Some(CouponPricing::Lines(lines)))
    }
}
