//! Fixtures

use std::{fs, path::PathBuf};

use rusty_money::iso::{self, Currency};
use thiserror::Error;

use crate::{
    cart::{Cart, CartError},
    catalog::{CatalogError, CouponCatalog},
    fixtures::{carts::CartFixture, catalogs::CatalogFixture},
    validation::ValidationError,
};

pub mod carts;
pub mod catalogs;

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// A coupon in the fixture failed to decode or validate
    #[error("Invalid coupon at position {position}: {source}")]
    Validation {
        /// Position of the coupon in the fixture
        position: usize,

        /// Underlying validation error
        source: ValidationError,
    },

    /// Cart creation error
    #[error("Failed to create cart: {0}")]
    Cart(#[from] CartError),

    /// Catalog creation error
    #[error("Failed to create catalog: {0}")]
    Catalog(#[from] CatalogError),
}

/// Fixture loader for catalogs and carts stored as YAML
#[derive(Debug, Clone)]
pub struct Fixture {
    /// Base path for fixture files
    base_path: PathBuf,
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}

impl Fixture {
    /// Create a new fixture loader with the default base path
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a new fixture loader with a custom base path
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    /// Load a coupon catalog from `catalogs/<name>.yml`
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if any coupon is invalid.
    pub fn load_catalog(&self, name: &str) -> Result<CouponCatalog<'static>, FixtureError> {
        let fixture: CatalogFixture = self.read("catalogs", name)?;

        fixture.try_into_catalog()
    }

    /// Load a cart from `carts/<name>.yml`
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if the cart can't be priced.
    pub fn load_cart(&self, name: &str) -> Result<Cart<'static>, FixtureError> {
        let fixture: CartFixture = self.read("carts", name)?;

        fixture.try_into_cart()
    }

    fn read<T: serde::de::DeserializeOwned>(
        &self,
        category: &str,
        name: &str,
    ) -> Result<T, FixtureError> {
        let file_path = self.base_path.join(category).join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;

        Ok(serde_norway::from_str(&contents)?)
    }
}

/// Parse an ISO currency code used in fixtures
///
/// # Errors
///
/// Returns [`FixtureError::UnknownCurrency`] for codes the fixtures don't support.
pub fn parse_currency(code: &str) -> Result<&'static Currency, FixtureError> {
    match code {
        "GBP" => Ok(iso::GBP),
        "USD" => Ok(iso::USD),
        "EUR" => Ok(iso::EUR),
        "INR" => Ok(iso::INR),
        other => Err(FixtureError::UnknownCurrency(other.to_string())),
    }
}
