//! Coupon Catalog
//!
//! An ordered, in-memory snapshot of coupons with lookup by id. Insertion order is the order in
//! which coupons are scanned for eligibility.

use jiff::Timestamp;
use rustc_hash::FxHashMap;
use thiserror::Error;
use tracing::info;

use crate::{
    cart::Cart,
    coupons::{Coupon, CouponUuid},
    engine::{self, EngineError},
    scanner::{ApplicableCoupon, scan_applicable},
    validation::{ValidationError, validate},
};

/// Errors raised by catalog mutations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// A coupon with this id is already in the catalog.
    #[error("coupon {0} already exists")]
    AlreadyExists(CouponUuid),

    /// No coupon with this id is in the catalog.
    #[error("coupon {0} not found")]
    NotFound(CouponUuid),

    /// The coupon failed validation.
    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

/// Coupon catalog
#[derive(Debug, Clone, Default)]
pub struct CouponCatalog<'a> {
    coupons: Vec<Coupon<'a>>,
    index: FxHashMap<CouponUuid, usize>,
}

impl<'a> CouponCatalog<'a> {
    /// Create a new, empty catalog.
    pub fn new() -> Self {
        Self {
            coupons: Vec::new(),
            index: FxHashMap::default(),
        }
    }

    /// Create a catalog from coupons, in order.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] for the first coupon that is invalid or has a duplicate id.
    pub fn with_coupons(
        coupons: impl IntoIterator<Item = Coupon<'a>>,
    ) -> Result<Self, CatalogError> {
        let mut catalog = Self::new();

        for coupon in coupons {
            catalog.create(coupon)?;
        }

        Ok(catalog)
    }

    /// Validate a coupon and append it to the catalog.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Invalid`] if the coupon fails validation, or
    /// [`CatalogError::AlreadyExists`] if its id is taken.
    #[tracing::instrument(
        name = "coupons.catalog.create",
        skip(self, coupon),
        fields(coupon_id = %coupon.id(), coupon_type = %coupon.coupon_type()),
        err
    )]
    pub fn create(&mut self, coupon: Coupon<'a>) -> Result<CouponUuid, CatalogError> {
        validate(&coupon)?;

        let id = coupon.id();

        if self.index.contains_key(&id) {
            return Err(CatalogError::AlreadyExists(id));
        }

        self.index.insert(id, self.coupons.len());
        self.coupons.push(coupon);

        info!(coupon_id = %id, "coupon created");

        Ok(id)
    }

    /// Get a coupon by id.
    pub fn get(&self, id: CouponUuid) -> Option<&Coupon<'a>> {
        self.index
            .get(&id)
            .and_then(|&position| self.coupons.get(position))
    }

    /// Iterate over the coupons in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Coupon<'a>> {
        self.coupons.iter()
    }

    /// Coupons in insertion order
    pub fn as_slice(&self) -> &[Coupon<'a>] {
        &self.coupons
    }

    /// Number of coupons in the catalog
    pub fn len(&self) -> usize {
        self.coupons.len()
    }

    /// Whether the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.coupons.is_empty()
    }

    /// Replace the coupon stored under `id`.
    ///
    /// The stored coupon keeps its id, its creation time and its position in the catalog; the
    /// strategy and expiry are taken from `coupon`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Invalid`] if the replacement fails validation, or
    /// [`CatalogError::NotFound`] if no coupon has this id.
    #[tracing::instrument(
        name = "coupons.catalog.update",
        skip(self, coupon),
        fields(coupon_id = %id, coupon_type = %coupon.coupon_type()),
        err
    )]
    pub fn update(&mut self, id: CouponUuid, coupon: Coupon<'a>) -> Result<(), CatalogError> {
        validate(&coupon)?;

        let stored = self
            .index
            .get(&id)
            .and_then(|&position| self.coupons.get_mut(position))
            .ok_or(CatalogError::NotFound(id))?;

        *stored = Coupon::new(id, stored.created_at(), coupon.strategy().clone())
            .with_expires_at(coupon.expires_at());

        info!(coupon_id = %id, "coupon updated");

        Ok(())
    }

    /// Remove the coupon stored under `id`, returning it.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] if no coupon has this id.
    #[tracing::instrument(name = "coupons.catalog.delete", skip(self), err)]
    pub fn delete(&mut self, id: CouponUuid) -> Result<Coupon<'a>, CatalogError> {
        let position = self.index.remove(&id).ok_or(CatalogError::NotFound(id))?;
        let removed = self.coupons.remove(position);

        for (position, coupon) in self.coupons.iter().enumerate().skip(position) {
            self.index.insert(coupon.id(), position);
        }

        info!(coupon_id = %id, "coupon deleted");

        Ok(removed)
    }

    /// Coupons that would give a discount on `cart` at time `at`, in catalog order.
    ///
    /// # Errors
    ///
    /// Returns the first [`EngineError`] raised while estimating a coupon.
    pub fn applicable(
        &self,
        cart: &Cart<'a>,
        at: Timestamp,
    ) -> Result<Vec<ApplicableCoupon<'a>>, EngineError> {
        scan_applicable(&self.coupons, cart, at)
    }

    /// Apply the coupon stored under `id` to `cart` at time `at`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NotFound`] if no coupon has this id, and any error
    /// [`engine::apply`] can return.
    pub fn apply(
        &self,
        id: CouponUuid,
        cart: &Cart<'a>,
        at: Timestamp,
    ) -> Result<Cart<'a>, EngineError> {
        let coupon = self.get(id).ok_or(EngineError::NotFound(id))?;

        engine::apply(coupon, cart, at)
    }
}
