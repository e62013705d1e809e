//! Report
//!
//! Table rendering for applicable coupons and priced carts.

use std::io;

use rusty_money::Money;
use tabled::{
    builder::Builder,
    settings::{
        Alignment, Color, Style, Theme,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{cart::Cart, pricing::PricingError, scanner::ApplicableCoupon};

/// Errors that can occur when writing a report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Writing to the output failed.
    #[error("failed to write report: {0}")]
    Io(#[from] io::Error),

    /// A line total could not be computed.
    #[error(transparent)]
    Pricing(#[from] PricingError),
}

/// Write the applicable coupons as a table.
///
/// # Errors
///
/// Returns [`ReportError::Io`] if the output can't be written.
pub fn write_applicable(
    mut out: impl io::Write,
    applicable: &[ApplicableCoupon<'_>],
) -> Result<(), ReportError> {
    if applicable.is_empty() {
        writeln!(out, "\nNo applicable coupons.")?;

        return Ok(());
    }

    let mut builder = Builder::default();

    builder.push_record(["", "Coupon", "Type", "Discount"]);

    for (idx, found) in applicable.iter().enumerate() {
        builder.push_record([
            format!("#{}", idx + 1),
            found.coupon_id.to_string(),
            found.coupon_type.to_string(),
            found.discount.to_string(),
        ]);
    }

    let mut table = builder.build();

    table.with(Theme::from(Style::modern_rounded()));
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(3..4), Alignment::right());

    writeln!(out, "\n{table}")?;

    Ok(())
}

/// Write a priced cart as a table of lines followed by its totals.
///
/// # Errors
///
/// Returns an error if a line total overflows or the output can't be written.
pub fn write_priced_cart(mut out: impl io::Write, cart: &Cart<'_>) -> Result<(), ReportError> {
    let mut builder = Builder::default();

    builder.push_record([
        "",
        "Product",
        "Quantity",
        "Unit Price",
        "Line Total",
        "Discount",
    ]);

    for (idx, item) in cart.iter().enumerate() {
        let line_total = Money::from_minor(item.line_total_minor()?, cart.currency());

        builder.push_record([
            format!("#{}", idx + 1),
            item.product_id().to_string(),
            item.quantity().to_string(),
            item.unit_price().to_string(),
            line_total.to_string(),
            item.line_discount().to_string(),
        ]);
    }

    let mut table = builder.build();

    table.with(Theme::from(Style::modern_rounded()));
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(2..6), Alignment::right());

    writeln!(out, "\n{table}")?;
    writeln!(out, " Subtotal: {}", cart.total_price())?;
    writeln!(out, " Discount: {}", cart.total_discount())?;
    writeln!(out, " Total:    {}", cart.final_price())?;

    Ok(())
}
