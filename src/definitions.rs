//! Definitions
//!
//! Untyped coupon and cart shapes as handed over by a transport layer, and their conversion into
//! validated domain types. Amounts are in major units (`12.50`) and are converted to minor units
//! of the target currency.

use jiff::Timestamp;
use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};
use serde::{Deserialize, de::DeserializeOwned};

use crate::{
    cart::{Cart, CartError, CartItem},
    coupons::{
        BuyXGetY, CartWise, Coupon, CouponStrategy, CouponType, CouponUuid, ProductQuantity,
        ProductWise,
    },
    pricing::major_to_minor,
    products::ProductId,
    validation::{ValidationError, validate},
};

/// Coupon definition before its payload has been decoded
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CouponDefinition {
    /// Strategy tag: `cart-wise`, `product-wise` or `bxgy`
    #[serde(rename = "type")]
    pub coupon_type: String,

    /// Strategy payload, decoded according to `coupon_type`
    pub details: serde_json::Value,

    /// Expiry time
    #[serde(default)]
    pub expires_at: Option<Timestamp>,
}

#[derive(Debug, Deserialize)]
struct CartWiseDetails {
    threshold: Decimal,
    discount: Decimal,
}

#[derive(Debug, Deserialize)]
struct ProductWiseDetails {
    product_id: i64,
    discount: Decimal,
}

#[derive(Debug, Deserialize)]
struct ProductQuantityDetails {
    product_id: i64,
    quantity: i64,
}

#[derive(Debug, Deserialize)]
struct BuyXGetYDetails {
    buy_products: Vec<ProductQuantityDetails>,
    get_products: Vec<ProductQuantityDetails>,
    repetition_limit: i64,
}

impl From<ProductQuantityDetails> for ProductQuantity {
    fn from(details: ProductQuantityDetails) -> Self {
        ProductQuantity::new(ProductId::new(details.product_id), details.quantity)
    }
}

impl CouponDefinition {
    /// Decode the payload for its tag and validate the resulting coupon.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::UnknownCouponType`] for an unknown tag,
    /// [`ValidationError::MalformedPayload`] if the payload doesn't have the tag's shape, and any
    /// other [`ValidationError`] raised by [`validate`].
    pub fn into_coupon(
        self,
        id: CouponUuid,
        created_at: Timestamp,
        currency: &'static Currency,
    ) -> Result<Coupon<'static>, ValidationError> {
        let coupon_type: CouponType = self.coupon_type.parse()?;

        let strategy = match coupon_type {
            CouponType::CartWise => {
                let details: CartWiseDetails = decode_details(self.details)?;

                let threshold = major_to_minor(details.threshold, currency.exponent)
                    .ok_or_else(|| {
                        ValidationError::MalformedPayload(format!(
                            "threshold {} can't be represented in {}",
                            details.threshold, currency.iso_alpha_code
                        ))
                    })?;

                CouponStrategy::CartWise(CartWise::new(
                    Money::from_minor(threshold, currency),
                    details.discount,
                ))
            }
            CouponType::ProductWise => {
                let details: ProductWiseDetails = decode_details(self.details)?;

                CouponStrategy::ProductWise(ProductWise::new(
                    ProductId::new(details.product_id),
                    details.discount,
                ))
            }
            CouponType::BuyXGetY => {
                let details: BuyXGetYDetails = decode_details(self.details)?;

                CouponStrategy::BuyXGetY(BuyXGetY::new(
                    details
                        .buy_products
                        .into_iter()
                        .map(ProductQuantity::from)
                        .collect::<Vec<_>>(),
                    details
                        .get_products
                        .into_iter()
                        .map(ProductQuantity::from)
                        .collect::<Vec<_>>(),
                    details.repetition_limit,
                ))
            }
        };

        let coupon = Coupon::new(id, created_at, strategy).with_expires_at(self.expires_at);

        validate(&coupon)?;

        Ok(coupon)
    }
}

fn decode_details<T: DeserializeOwned>(details: serde_json::Value) -> Result<T, ValidationError> {
    serde_json::from_value(details).map_err(|err| ValidationError::MalformedPayload(err.to_string()))
}

/// Cart line before conversion
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CartItemDefinition {
    /// Product
    pub product_id: i64,

    /// Number of units
    pub quantity: u32,

    /// Unit price in major units
    pub price: Decimal,
}

/// Cart before conversion. Any totals supplied alongside the items are ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CartDefinition {
    /// Cart lines, in order
    pub items: Vec<CartItemDefinition>,
}

impl CartDefinition {
    /// Build a cart priced in `currency`, with totals computed from the items.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] if a price is negative, can't be represented in minor units, or
    /// the totals overflow.
    pub fn into_cart(self, currency: &'static Currency) -> Result<Cart<'static>, CartError> {
        let items = self
            .items
            .into_iter()
            .enumerate()
            .map(|(idx, item)| {
                let unit_minor = major_to_minor(item.price, currency.exponent)
                    .ok_or(CartError::UnrepresentablePrice(idx))?;

                Ok(CartItem::new(
                    ProductId::new(item.product_id),
                    item.quantity,
                    Money::from_minor(unit_minor, currency),
                ))
            })
            .collect::<Result<Vec<_>, CartError>>()?;

        Cart::with_items(items, currency)
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::{GBP, JPY};
    use serde_json::json;
    use testresult::TestResult;

    use super::*;

    fn definition(coupon_type: &str, details: serde_json::Value) -> CouponDefinition {
        CouponDefinition {
            coupon_type: coupon_type.to_string(),
            details,
            expires_at: None,
        }
    }

    fn decode(definition: CouponDefinition) -> Result<Coupon<'static>, ValidationError> {
        definition.into_coupon(CouponUuid::generate(), Timestamp::UNIX_EPOCH, GBP)
    }

    #[test]
    fn decodes_cart_wise_with_major_unit_threshold() -> TestResult {
        let coupon = decode(definition(
            "cart-wise",
            json!({ "threshold": 100.5, "discount": 10 }),
        ))?;

        let CouponStrategy::CartWise(cart_wise) = coupon.strategy() else {
            return Err("expected a cart-wise coupon".into());
        };

        assert_eq!(cart_wise.threshold(), &Money::from_minor(10_050, GBP));
        assert_eq!(cart_wise.discount_percent(), Decimal::from(10));

        Ok(())
    }

    #[test]
    fn threshold_uses_currency_exponent() -> TestResult {
        let coupon = definition("cart-wise", json!({ "threshold": 500, "discount": 5 }))
            .into_coupon(CouponUuid::generate(), Timestamp::UNIX_EPOCH, JPY)?;

        let CouponStrategy::CartWise(cart_wise) = coupon.strategy() else {
            return Err("expected a cart-wise coupon".into());
        };

        assert_eq!(cart_wise.threshold().to_minor_units(), 500);

        Ok(())
    }

    #[test]
    fn decodes_bxgy_and_ignores_top_level_repetition_limit() -> TestResult {
        let definition: CouponDefinition = serde_json::from_value(json!({
            "type": "bxgy",
            "repetition_limit": 99,
            "details": {
                "buy_products": [{ "product_id": 1, "quantity": 3 }],
                "get_products": [{ "product_id": 3, "quantity": 1 }],
                "repetition_limit": 2
            }
        }))?;

        let coupon = decode(definition)?;

        let CouponStrategy::BuyXGetY(bxgy) = coupon.strategy() else {
            return Err("expected a bxgy coupon".into());
        };

        assert_eq!(bxgy.repetition_limit(), 2);
        assert_eq!(
            bxgy.buy_products(),
            &[ProductQuantity::new(ProductId::new(1), 3)]
        );

        Ok(())
    }

    #[test]
    fn expiry_is_carried_over() -> TestResult {
        let expires_at: Timestamp = "2030-01-01T00:00:00Z".parse()?;

        let coupon = decode(CouponDefinition {
            expires_at: Some(expires_at),
            ..definition("product-wise", json!({ "product_id": 4, "discount": 50 }))
        })?;

        assert_eq!(coupon.expires_at(), Some(expires_at));

        Ok(())
    }

    #[test]
    fn unknown_type_is_rejected() {
        assert_eq!(
            decode(definition("free-shipping", json!({}))),
            Err(ValidationError::UnknownCouponType(
                "free-shipping".to_string()
            ))
        );
    }

    #[test]
    fn payload_with_wrong_shape_is_malformed() {
        let result = decode(definition("product-wise", json!({ "threshold": 100 })));

        assert!(matches!(result, Err(ValidationError::MalformedPayload(_))));
    }

    #[test]
    fn payload_with_wrong_field_type_is_malformed() {
        let result = decode(definition(
            "bxgy",
            json!({ "buy_products": "lots", "get_products": [], "repetition_limit": 1 }),
        ));

        assert!(matches!(result, Err(ValidationError::MalformedPayload(_))));
    }

    #[test]
    fn decoded_coupons_are_validated() {
        assert_eq!(
            decode(definition(
                "cart-wise",
                json!({ "threshold": -1, "discount": 10 })
            )),
            Err(ValidationError::InvalidThreshold)
        );

        assert_eq!(
            decode(definition(
                "product-wise",
                json!({ "product_id": 0, "discount": 10 })
            )),
            Err(ValidationError::InvalidProductReference)
        );
    }

    #[test]
    fn cart_definition_builds_priced_cart() -> TestResult {
        let definition: CartDefinition = serde_json::from_value(json!({
            "items": [
                { "product_id": 1, "quantity": 6, "price": 50 },
                { "product_id": 2, "quantity": 3, "price": 30 },
                { "product_id": 3, "quantity": 2, "price": 25 }
            ],
            "total_price": 1
        }))?;

        let cart = definition.into_cart(GBP)?;

        assert_eq!(cart.len(), 3);
        assert_eq!(cart.total_price(), &Money::from_minor(44_000, GBP));
        assert_eq!(cart.final_price(), &Money::from_minor(44_000, GBP));

        Ok(())
    }

    #[test]
    fn cart_definition_rejects_negative_price() -> TestResult {
        let definition: CartDefinition = serde_json::from_value(json!({
            "items": [{ "product_id": 1, "quantity": 1, "price": -2 }]
        }))?;

        assert_eq!(definition.into_cart(GBP), Err(CartError::NegativePrice(0)));

        Ok(())
    }
}
