//! Cart

use rusty_money::{Money, iso::Currency};
use thiserror::Error;

use crate::{
    pricing::{PricingError, line_total, sum_minor},
    products::ProductId,
};

/// Errors related to cart construction or totals.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    /// An item's currency differs from the cart currency (index, item currency, cart currency).
    #[error("Item {0} has currency {1}, but cart has currency {2}")]
    CurrencyMismatch(usize, &'static str, &'static str),

    /// An item has a negative unit price (index).
    #[error("Item {0} has a negative unit price")]
    NegativePrice(usize),

    /// An item's price can't be represented in minor units of the cart currency (index).
    #[error("Item {0} has a price that can't be represented in minor units")]
    UnrepresentablePrice(usize),

    /// An item was not found in the cart.
    #[error("Item {0} not found")]
    ItemNotFound(usize),

    /// Totals could not be computed.
    #[error(transparent)]
    Pricing(#[from] PricingError),
}

/// A single cart line
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CartItem<'a> {
    product_id: ProductId,
    quantity: u32,
    unit_price: Money<'a, Currency>,
    line_discount: Money<'a, Currency>,
}

impl<'a> CartItem<'a> {
    /// Create a new cart line with no discount attributed to it.
    pub fn new(product_id: ProductId, quantity: u32, unit_price: Money<'a, Currency>) -> Self {
        Self {
            product_id,
            quantity,
            unit_price,
            line_discount: Money::from_minor(0, unit_price.currency()),
        }
    }

    /// Product on this line
    pub fn product_id(&self) -> ProductId {
        self.product_id
    }

    /// Number of units on this line
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Price of a single unit
    pub fn unit_price(&self) -> &Money<'a, Currency> {
        &self.unit_price
    }

    /// Portion of the cart discount attributed to this line
    pub fn line_discount(&self) -> &Money<'a, Currency> {
        &self.line_discount
    }

    /// Undiscounted price of the whole line, in minor units.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::Overflow`] if the line total does not fit in minor units.
    pub fn line_total_minor(&self) -> Result<i64, PricingError> {
        line_total(self.quantity, self.unit_price.to_minor_units())
    }

    pub(crate) fn set_line_discount(&mut self, minor: i64) {
        self.line_discount = Money::from_minor(minor, self.unit_price.currency());
    }
}

/// Cart
///
/// Totals are always derived from the items; they are never accepted from a caller.
#[derive(Debug, Clone, PartialEq)]
pub struct Cart<'a> {
    items: Vec<CartItem<'a>>,
    currency: &'static Currency,
    total_price: Money<'a, Currency>,
    total_discount: Money<'a, Currency>,
    final_price: Money<'a, Currency>,
}

impl<'a> Cart<'a> {
    /// Create a new, empty cart.
    #[must_use]
    pub fn new(currency: &'static Currency) -> Self {
        Cart {
            items: Vec::new(),
            currency,
            total_price: Money::from_minor(0, currency),
            total_discount: Money::from_minor(0, currency),
            final_price: Money::from_minor(0, currency),
        }
    }

    /// Create a new cart with the given items and computed totals.
    ///
    /// # Errors
    ///
    /// Returns a `CartError` if an item is priced in another currency or the totals overflow.
    pub fn with_items(
        items: impl Into<Vec<CartItem<'a>>>,
        currency: &'static Currency,
    ) -> Result<Self, CartError> {
        let items = items.into();

        items.iter().enumerate().try_for_each(|(i, item)| {
            let item_currency = item.unit_price().currency();

            if item.unit_price().is_negative() {
                Err(CartError::NegativePrice(i))
            } else if item_currency == currency {
                Ok(())
            } else {
                Err(CartError::CurrencyMismatch(
                    i,
                    item_currency.iso_alpha_code,
                    currency.iso_alpha_code,
                ))
            }
        })?;

        Cart {
            items,
            ..Cart::new(currency)
        }
        .compute_totals()
    }

    /// Return a copy of this cart with `total_price` and `final_price` recomputed from the items.
    ///
    /// The current `total_discount` is kept, so `final_price == total_price - total_discount`.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Pricing`] if the totals overflow.
    pub fn compute_totals(&self) -> Result<Self, CartError> {
        let mut cart = self.clone();
        cart.recompute_totals()?;

        Ok(cart)
    }

    /// Return a copy of this cart with every line discount and the cart discount reset to zero,
    /// and totals recomputed.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Pricing`] if the totals overflow.
    pub fn cleared(&self) -> Result<Self, CartError> {
        let mut cart = self.clone();

        for item in &mut cart.items {
            item.set_line_discount(0);
        }

        cart.total_discount = Money::from_minor(0, cart.currency);
        cart.recompute_totals()?;

        Ok(cart)
    }

    /// Get an item from the cart.
    ///
    /// # Errors
    ///
    /// Returns a `CartError::ItemNotFound` if the item is not found.
    pub fn get_item(&self, item: usize) -> Result<&CartItem<'a>, CartError> {
        self.items.get(item).ok_or(CartError::ItemNotFound(item))
    }

    /// Iterate over the items in the cart.
    pub fn iter(&self) -> impl Iterator<Item = &CartItem<'a>> {
        self.items.iter()
    }

    /// Get the number of lines in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the cart is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get the currency of the cart.
    #[must_use]
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Sum of every line's undiscounted total
    pub fn total_price(&self) -> &Money<'a, Currency> {
        &self.total_price
    }

    /// Discount applied to the cart
    pub fn total_discount(&self) -> &Money<'a, Currency> {
        &self.total_discount
    }

    /// Amount payable after discount
    pub fn final_price(&self) -> &Money<'a, Currency> {
        &self.final_price
    }

    pub(crate) fn item_mut(&mut self, item: usize) -> Result<&mut CartItem<'a>, CartError> {
        self.items.get_mut(item).ok_or(CartError::ItemNotFound(item))
    }

    /// Set the cart discount and recompute the final price.
    pub(crate) fn set_total_discount(&mut self, minor: i64) -> Result<(), CartError> {
        self.total_discount = Money::from_minor(minor, self.currency);
        self.recompute_totals()
    }

    fn recompute_totals(&mut self) -> Result<(), CartError> {
        let line_totals = self
            .items
            .iter()
            .map(CartItem::line_total_minor)
            .collect::<Result<Vec<_>, _>>()?;

        let total_minor = sum_minor(line_totals)?;
        let final_minor = total_minor
            .checked_sub(self.total_discount.to_minor_units())
            .ok_or(PricingError::Overflow)?;

        self.total_price = Money::from_minor(total_minor, self.currency);
        self.final_price = Money::from_minor(final_minor, self.currency);

        Ok(())
    }
}
