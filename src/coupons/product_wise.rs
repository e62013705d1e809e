//! Product-wise Coupons
//!
//! A percentage off every cart line carrying one product. The discount is attributed to the
//! matching lines.

use rust_decimal::Decimal;
use smallvec::SmallVec;

use crate::{
    cart::Cart,
    engine::{CouponPricing, EngineError, LineDiscount},
    pricing::{percent_of_minor, percentage_from_points},
    products::ProductId,
};

/// Product-wise payload
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProductWise {
    product_id: ProductId,
    discount_percent: Decimal,
}

impl ProductWise {
    /// Create a new product-wise payload. `discount_percent` is in percentage points.
    pub fn new(product_id: ProductId, discount_percent: Decimal) -> Self {
        Self {
            product_id,
            discount_percent,
        }
    }

    /// Targeted product
    pub fn product_id(&self) -> ProductId {
        self.product_id
    }

    /// Discount in percentage points
    pub fn discount_percent(&self) -> Decimal {
        self.discount_percent
    }

    /// Price the coupon line by line. Each matching line's discount is rounded on its own.
    ///
    /// # Errors
    ///
    /// Returns an [`EngineError`] if a line total overflows or the percentage can't be applied.
    pub fn price(&self, cart: &Cart<'_>) -> Result<Option<CouponPricing>, EngineError> {
        let percent = percentage_from_points(self.discount_percent);

        let lines = cart
            .iter()
            .enumerate()
            .filter(|(_, item)| item.product_id() == self.product_id)
            .map(|(item_idx, item)| -> Result<LineDiscount, EngineError> {
                let discount = percent_of_minor(&percent, item.line_total_minor()?)?;

                Ok(LineDiscount { item_idx, discount })
            })
            .collect::<Result<SmallVec<[LineDiscount; 10]>, _>>()?;

        if lines.is_empty() {
            return Ok(None);
        }

        Ok(Some(CouponPricing::Lines(lines)))
    }
}
