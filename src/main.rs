//! Coupons command line

use std::io;

use anyhow::Context;
use jiff::Timestamp;
use tracing::info;

use coupons::{fixtures::Fixture, report};

use crate::config::{CliConfig, Command};

mod config;
mod observability;

fn main() -> anyhow::Result<()> {
    let config = CliConfig::load().unwrap_or_else(|err| err.exit());

    observability::init(&config.logging)?;

    let fixture = Fixture::with_base_path(&config.fixtures);

    let catalog = fixture
        .load_catalog(&config.catalog)
        .with_context(|| format!("failed to load catalog {:?}", config.catalog))?;

    let cart = fixture
        .load_cart(&config.cart)
        .with_context(|| format!("failed to load cart {:?}", config.cart))?;

    let at = config.at.unwrap_or_else(Timestamp::now);

    info!(
        catalog = %config.catalog,
        coupons = catalog.len(),
        cart = %config.cart,
        items = cart.len(),
        %at,
        "evaluating cart"
    );

    match config.command {
        Command::Applicable => {
            let applicable = catalog.applicable(&cart, at)?;

            report::write_applicable(io::stdout().lock(), &applicable)?;
        }
        Command::Apply { coupon_id } => {
            let priced = catalog
                .apply(coupon_id, &cart, at)
                .with_context(|| format!("failed to apply coupon {coupon_id}"))?;

            report::write_priced_cart(io::stdout().lock(), &priced)?;
        }
    }

    Ok(())
}
