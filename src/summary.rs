//! Summary tables
//!
//! Plain-text rendering of the cart and wishlist for terminal output.

use std::io;

use rusty_money::{Money, iso::Currency};
use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};
use thiserror::Error;

use crate::{cart::CartManager, pricing::TotalPriceError, products::Product, wishlist::WishlistManager};

/// Errors that can occur when writing a summary.
#[derive(Debug, Error)]
pub enum SummaryError {
    /// Error calculating totals.
    #[error(transparent)]
    TotalPrice(#[from] TotalPriceError),

    /// Error writing to the output.
    #[error("failed to write summary: {0}")]
    Io(#[from] io::Error),
}

/// Write the cart as a table followed by item count, savings and total.
///
/// # Errors
///
/// Returns a [`SummaryError`] if totals overflow or the output cannot be written.
pub fn write_cart_to(mut out: impl io::Write, cart: &CartManager) -> Result<(), SummaryError> {
    if cart.is_empty() {
        writeln!(out, "Your cart is empty")?;
        return Ok(());
    }

    let currency = cart.currency();
    let mut builder = Builder::default();

    builder.push_record(["", "Item", "Vendor", "Price", "Qty", "Line Total"]);

    for (idx, item) in cart.items().iter().enumerate() {
        let line_total = item.total_minor().ok_or(TotalPriceError::Overflow)?;

        builder.push_record([
            format!("#{:<3}", idx + 1),
            item.product.name.clone(),
            item.product.vendor.clone(),
            price_label(&item.product, currency),
            item.quantity.to_string(),
            Money::from_minor(line_total, currency).to_string(),
        ]);
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Columns::new(3..), Alignment::right());

    writeln!(out, "{table}")?;
    writeln!(out, " Items:   {}", cart.items_count())?;
    writeln!(out, " Savings: {}", cart.savings()?)?;
    writeln!(out, " Total:   {}", cart.total()?)?;

    Ok(())
}

/// Write the wishlist as a table.
///
/// # Errors
///
/// Returns a [`SummaryError`] if the output cannot be written.
pub fn write_wishlist_to(
    mut out: impl io::Write,
    wishlist: &WishlistManager,
    currency: &Currency,
) -> Result<(), SummaryError> {
    if wishlist.is_empty() {
        writeln!(out, "Your wishlist is empty")?;
        return Ok(());
    }

    let mut builder = Builder::default();

    builder.push_record(["", "Item", "Vendor", "Price", "Stock"]);

    for (idx, product) in wishlist.entries().iter().enumerate() {
        builder.push_record([
            format!("#{:<3}", idx + 1),
            product.name.clone(),
            product.vendor.clone(),
            price_label(product, currency),
            stock_label(product).to_string(),
        ]);
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Columns::new(3..4), Alignment::right());

    writeln!(out, "{table}")?;

    let count = wishlist.wishlist_count();
    let plural = if count == 1 { "" } else { "s" };

    writeln!(out, " {count} item{plural}")?;

    Ok(())
}

/// Price with the discount shown when there is one, e.g. `£1.20 (-20%)`.
fn price_label(product: &Product, currency: &Currency) -> String {
    let price = product.unit_price(currency);

    match product.discount_percentage() {
        0 => price.to_string(),
        percent => format!("{price} (-{percent}%)"),
    }
}

fn stock_label(product: &Product) -> &'static str {
    if product.in_stock {
        "In stock"
    } else {
        "Out of stock"
    }
}
