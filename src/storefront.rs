//! Storefront
//!
//! The application-root container: one cart and one wishlist sharing a store
//! and a notifier, plus the operations that move products between them.

use std::{
    fmt::{self, Debug, Formatter},
    rc::Rc,
};

use rusty_money::iso::Currency;
use tracing::debug;

use crate::{
    cart::CartManager,
    notifications::{NotificationKind, Notifier},
    products::ProductId,
    storage::KeyValueStore,
    wishlist::WishlistManager,
};

/// Result of [`Storefront::move_to_cart`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The product is now in the cart and no longer in the wishlist.
    Moved,

    /// The product is out of stock; nothing changed.
    OutOfStock,

    /// The product was not in the wishlist.
    NotInWishlist,
}

/// Cart and wishlist state for one shopper.
pub struct Storefront {
    cart: CartManager,
    wishlist: WishlistManager,
    notifier: Rc<dyn Notifier>,
}

impl Storefront {
    /// Load the cart and wishlist persisted in `store`.
    pub fn open(
        store: Rc<dyn KeyValueStore>,
        notifier: Rc<dyn Notifier>,
        currency: &'static Currency,
    ) -> Self {
        let cart = CartManager::load(Rc::clone(&store), Rc::clone(&notifier), currency);
        let wishlist = WishlistManager::load(store, Rc::clone(&notifier));

        Self {
            cart,
            wishlist,
            notifier,
        }
    }

    /// The cart.
    pub fn cart(&self) -> &CartManager {
        &self.cart
    }

    /// The cart, for mutation.
    pub fn cart_mut(&mut self) -> &mut CartManager {
        &mut self.cart
    }

    /// The wishlist.
    pub fn wishlist(&self) -> &WishlistManager {
        &self.wishlist
    }

    /// The wishlist, for mutation.
    pub fn wishlist_mut(&mut self) -> &mut WishlistManager {
        &mut self.wishlist
    }

    /// Move a saved product into the cart.
    ///
    /// Out-of-stock products stay in the wishlist.
    pub fn move_to_cart(&mut self, id: &ProductId) -> MoveOutcome {
        let Some(entry) = self.wishlist.get(id) else {
            debug!(%id, "move requested for product not in wishlist");
            return MoveOutcome::NotInWishlist;
        };

        if !entry.in_stock {
            let message = format!("{} is out of stock", entry.name);

            self.notifier.notify(NotificationKind::Error, &message);

            return MoveOutcome::OutOfStock;
        }

        let Some(product) = self.wishlist.take(id) else {
            return MoveOutcome::NotInWishlist;
        };

        let message = format!("{} moved to cart", product.name);

        self.cart.insert(product);
        self.notifier.notify(NotificationKind::Success, &message);

        MoveOutcome::Moved
    }

    /// Add one unit of every in-stock saved product to the cart.
    ///
    /// The wishlist is left unchanged. Returns how many products were added.
    pub fn add_all_available_to_cart(&mut self) -> usize {
        let available: Vec<_> = self
            .wishlist
            .entries()
            .iter()
            .filter(|entry| entry.in_stock)
            .cloned()
            .collect();

        let added = available.len();

        for product in available {
            self.cart.insert(product);
        }

        debug!(added, "added available wishlist products to cart");

        self.notifier
            .notify(NotificationKind::Success, "All available items added to cart");

        added
    }

    /// Move every in-stock saved product to the cart.
    ///
    /// Out-of-stock products stay in the wishlist. Returns how many moved.
    pub fn move_all_available_to_cart(&mut self) -> usize {
        let available: Vec<ProductId> = self
            .wishlist
            .entries()
            .iter()
            .filter(|entry| entry.in_stock)
            .map(|entry| entry.id.clone())
            .collect();

        let mut moved = 0;

        for id in &available {
            if let Some(product) = self.wishlist.take(id) {
                self.cart.insert(product);
                moved += 1;
            }
        }

        debug!(moved, "moved available wishlist products to cart");

        self.notifier
            .notify(NotificationKind::Success, "All available items moved to cart");

        moved
    }
}

impl Debug for Storefront {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Storefront")
            .field("cart", &self.cart)
            .field("wishlist", &self.wishlist)
            .finish_non_exhaustive()
    }
}
