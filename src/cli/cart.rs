use std::io::Write;

use clap::{Args, Subcommand};
use grooso::summary;

use super::Session;

#[derive(Debug, Args)]
pub(crate) struct CartCommand {
    #[command(subcommand)]
    command: CartSubcommand,
}

#[derive(Debug, Subcommand)]
enum CartSubcommand {
    /// Show the cart with totals
    Show,

    /// Add one unit of a catalog product
    Add {
        /// Catalog key
        key: String,
    },

    /// Set the quantity of a cart line; zero or less removes it
    Update {
        /// Catalog key or product id
        key: String,

        /// New quantity
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },

    /// Remove a line from the cart
    Remove {
        /// Catalog key or product id
        key: String,
    },

    /// Empty the cart
    Clear,
}

pub(crate) fn run(command: CartCommand, session: Session<'_, impl Write>) -> Result<(), String> {
    let Session { catalog, shop, out } = session;

    match command.command {
        CartSubcommand::Show => summary::write_cart_to(out, shop.cart())
            .map_err(|error| format!("failed to show cart: {error}")),
        CartSubcommand::Add { key } => {
            let product = super::lookup(catalog, &key)?;

            shop.cart_mut().add_to_cart(product);

            Ok(())
        }
        CartSubcommand::Update { key, quantity } => {
            let id = super::resolve_id(catalog, &key);

            if !shop.cart().contains(&id) {
                return Err(format!("{key} is not in the cart"));
            }

            shop.cart_mut().update_quantity(&id, quantity);

            Ok(())
        }
        CartSubcommand::Remove { key } => {
            let id = super::resolve_id(catalog, &key);

            if !shop.cart_mut().remove_from_cart(&id) {
                return Err(format!("{key} is not in the cart"));
            }

            Ok(())
        }
        CartSubcommand::Clear => {
            shop.cart_mut().clear_cart();

            Ok(())
        }
    }
}
