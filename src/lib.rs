//! Coupons
//!
//! Coupons is a discount engine for shopping carts. It validates coupon definitions with one of
//! three strategies (cart-wise, product-wise and buy X get Y), finds the coupons that apply to a
//! cart, and prices a cart with a single coupon, attributing the discount to individual lines.

pub mod cart;
pub mod catalog;
pub mod coupons;
pub mod definitions;
pub mod engine;
pub mod fixtures;
pub mod prelude;
pub mod pricing;
pub mod products;
pub mod report;
pub mod scanner;
pub mod uuids;
pub mod validation;
