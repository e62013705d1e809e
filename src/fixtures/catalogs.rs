//! Catalog Fixtures

use jiff::Timestamp;
use serde::Deserialize;

use crate::{
    catalog::CouponCatalog,
    coupons::CouponUuid,
    definitions::CouponDefinition,
    fixtures::{FixtureError, parse_currency},
};

/// Catalog snapshot in YAML
#[derive(Debug, Deserialize)]
pub struct CatalogFixture {
    /// Currency code for every monetary amount in the catalog
    pub currency: String,

    /// Coupons, in catalog order
    pub coupons: Vec<CouponFixture>,
}

/// Coupon fixture from YAML
#[derive(Debug, Deserialize)]
pub struct CouponFixture {
    /// Coupon id
    pub id: CouponUuid,

    /// Creation time
    pub created_at: Timestamp,

    /// Strategy tag, payload and expiry
    #[serde(flatten)]
    pub definition: CouponDefinition,
}

impl CatalogFixture {
    /// Decode and validate every coupon, then build the catalog.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown currency, an invalid coupon, or a duplicate id.
    pub fn try_into_catalog(self) -> Result<CouponCatalog<'static>, FixtureError> {
        let currency = parse_currency(&self.currency)?;

        let coupons = self
            .coupons
            .into_iter()
            .enumerate()
            .map(|(position, fixture)| {
                fixture
                    .definition
                    .into_coupon(fixture.id, fixture.created_at, currency)
                    .map_err(|source| FixtureError::Validation { position, source })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(CouponCatalog::with_coupons(coupons)?)
    }
}
