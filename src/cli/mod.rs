use std::{
    io::{self, Write},
    rc::Rc,
    str::FromStr,
};

use clap::{Parser, Subcommand};
use grooso::{
    catalog::Catalog,
    config::Config,
    notifications::{Notifier, ToastQueue},
    observability,
    products::{Product, ProductId},
    storage::{FileStore, KeyValueStore},
    storefront::Storefront,
};
use tracing::debug;

mod cart;
mod catalog;
mod wishlist;

#[derive(Debug, Parser)]
#[command(name = "grooso", about = "Grooso cart and wishlist", long_about = None)]
pub(crate) struct Cli {
    #[command(flatten)]
    config: Config,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Cart(cart::CartCommand),
    Wishlist(wishlist::WishlistCommand),
    Catalog(catalog::CatalogCommand),
}

impl Cli {
    pub(crate) fn run(self) -> Result<(), String> {
        observability::init_subscriber(&self.config.logging)
            .map_err(|error| format!("failed to initialise logging: {error}"))?;

        let catalog = Catalog::load(&self.config.store.catalog).map_err(|error| {
            format!(
                "failed to load catalog {}: {error}",
                self.config.store.catalog.display()
            )
        })?;

        debug!(products = catalog.len(), "catalog loaded");

        let mut out = io::stdout().lock();

        if let Commands::Catalog(command) = self.command {
            return catalog::run(command, &catalog, &mut out);
        }

        let store = FileStore::open(&self.config.store.data_dir)
            .map_err(|error| format!("failed to open data directory: {error}"))?;

        let toasts = Rc::new(ToastQueue::new());
        let mut shop = Storefront::open(
            Rc::new(store) as Rc<dyn KeyValueStore>,
            Rc::clone(&toasts) as Rc<dyn Notifier>,
            catalog.currency(),
        );

        let session = Session {
            catalog: &catalog,
            shop: &mut shop,
            out: &mut out,
        };

        let result = match self.command {
            Commands::Cart(command) => cart::run(command, session),
            Commands::Wishlist(command) => wishlist::run(command, session),
            Commands::Catalog(_) => Ok(()),
        };

        for toast in toasts.drain() {
            writeln!(out, "{toast}").map_err(|error| format!("failed to write output: {error}"))?;
        }

        result
    }
}

/// State shared by the cart and wishlist commands.
pub(crate) struct Session<'a, W> {
    pub(crate) catalog: &'a Catalog,
    pub(crate) shop: &'a mut Storefront,
    pub(crate) out: &'a mut W,
}

/// Catalog product listed under `key`.
pub(crate) fn lookup(catalog: &Catalog, key: &str) -> Result<Product, String> {
    catalog
        .get(key)
        .cloned()
        .ok_or_else(|| format!("no product with key {key} in catalog"))
}

/// Product id for a catalog key, falling back to a raw product id so entries
/// no longer in the catalog can still be removed.
pub(crate) fn resolve_id(catalog: &Catalog, key: &str) -> ProductId {
    catalog.get(key).map_or_else(
        || ProductId::from_str(key).unwrap_or_else(|never| match never {}),
        |product| product.id.clone(),
    )
}
