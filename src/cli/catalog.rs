use std::io::Write;

use clap::{Args, Subcommand};
use grooso::catalog::Catalog;
use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};

#[derive(Debug, Args)]
pub(crate) struct CatalogCommand {
    #[command(subcommand)]
    command: CatalogSubcommand,
}

#[derive(Debug, Subcommand)]
enum CatalogSubcommand {
    /// List products with the keys used by the cart and wishlist commands
    List,
}

pub(crate) fn run(
    command: CatalogCommand,
    catalog: &Catalog,
    out: &mut impl Write,
) -> Result<(), String> {
    match command.command {
        CatalogSubcommand::List => list(catalog, out),
    }
}

fn list(catalog: &Catalog, out: &mut impl Write) -> Result<(), String> {
    let currency = catalog.currency();
    let mut builder = Builder::default();

    builder.push_record(["Key", "Item", "Vendor", "Price", "Stock"]);

    for entry in catalog.entries() {
        let product = &entry.product;

        builder.push_record([
            entry.key.clone(),
            product.name.clone(),
            product.vendor.clone(),
            product.unit_price(currency).to_string(),
            if product.in_stock { "yes" } else { "no" }.to_string(),
        ]);
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Columns::new(3..4), Alignment::right());

    writeln!(out, "{table}").map_err(|error| format!("failed to write output: {error}"))
}
