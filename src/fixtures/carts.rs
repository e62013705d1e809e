//! Cart Fixtures

use serde::Deserialize;

use crate::{
    cart::Cart,
    definitions::CartDefinition,
    fixtures::{FixtureError, parse_currency},
};

/// Cart in YAML
#[derive(Debug, Deserialize)]
pub struct CartFixture {
    /// Currency code for every item price
    pub currency: String,

    /// Cart lines
    #[serde(flatten)]
    pub cart: CartDefinition,
}

impl CartFixture {
    /// Build the cart, computing its totals from the items.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown currency or a cart that can't be priced.
    pub fn try_into_cart(self) -> Result<Cart<'static>, FixtureError> {
        let currency = parse_currency(&self.currency)?;

        Ok(self.cart.into_cart(currency)?)
    }
}
