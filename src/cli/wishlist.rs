use std::io::Write;

use clap::{Args, Subcommand};
use grooso::{storefront::MoveOutcome, summary};

use super::Session;

#[derive(Debug, Args)]
pub(crate) struct WishlistCommand {
    #[command(subcommand)]
    command: WishlistSubcommand,
}

#[derive(Debug, Subcommand)]
enum WishlistSubcommand {
    /// Show saved products
    Show,

    /// Save a catalog product
    Add {
        /// Catalog key
        key: String,
    },

    /// Remove a saved product
    Remove {
        /// Catalog key or product id
        key: String,
    },

    /// Save a catalog product, or remove it if already saved
    Toggle {
        /// Catalog key
        key: String,
    },

    /// Remove every saved product
    Clear,

    /// Move a saved product into the cart
    Move {
        /// Catalog key or product id
        key: String,
    },

    /// Add every in-stock saved product to the cart, keeping the wishlist
    AddAll,

    /// Move every in-stock saved product to the cart
    MoveAll,
}

pub(crate) fn run(
    command: WishlistCommand,
    session: Session<'_, impl Write>,
) -> Result<(), String> {
    let Session { catalog, shop, out } = session;

    match command.command {
        WishlistSubcommand::Show => {
            summary::write_wishlist_to(out, shop.wishlist(), catalog.currency())
                .map_err(|error| format!("failed to show wishlist: {error}"))
        }
        WishlistSubcommand::Add { key } => {
            let product = super::lookup(catalog, &key)?;

            shop.wishlist_mut().add_to_wishlist(product);

            Ok(())
        }
        WishlistSubcommand::Remove { key } => {
            let id = super::resolve_id(catalog, &key);

            shop.wishlist_mut().remove_from_wishlist(&id);

            Ok(())
        }
        WishlistSubcommand::Toggle { key } => {
            let product = super::lookup(catalog, &key)?;

            shop.wishlist_mut().toggle_wishlist(product);

            Ok(())
        }
        WishlistSubcommand::Clear => {
            shop.wishlist_mut().clear_wishlist();

            Ok(())
        }
        WishlistSubcommand::Move { key } => {
            let id = super::resolve_id(catalog, &key);

            match shop.move_to_cart(&id) {
                MoveOutcome::Moved | MoveOutcome::OutOfStock => Ok(()),
                MoveOutcome::NotInWishlist => Err(format!("{key} is not in the wishlist")),
            }
        }
        WishlistSubcommand::AddAll => {
            shop.add_all_available_to_cart();

            Ok(())
        }
        WishlistSubcommand::MoveAll => {
            shop.move_all_available_to_cart();

            Ok(())
        }
    }
}
