//! Cart
//!
//! The cart is an ordered list of line items, one per product, each with a
//! non-zero quantity. Every mutation is written back to the store before
//! subscribers hear about it.

use std::{
    fmt::{self, Debug, Formatter},
    num::NonZeroU32,
    rc::Rc,
};

use rusty_money::{Money, iso::Currency};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{
    events::{CartEvent, SubscriptionKey, Subscribers},
    notifications::{NotificationKind, Notifier},
    persistence::{CART_STORAGE_KEY, load_sequence, save_sequence},
    pricing::{TotalPriceError, line_total, total_price, total_savings},
    products::{Identified, Product, ProductId},
    storage::KeyValueStore,
};

/// A product in the cart together with how many of it.
///
/// Serialized as the product's fields plus a `quantity` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// The product
    #[serde(flatten)]
    pub product: Product,

    /// Quantity, never zero
    pub quantity: NonZeroU32,
}

impl LineItem {
    /// A new line with quantity one.
    pub fn new(product: Product) -> Self {
        Self {
            product,
            quantity: NonZeroU32::MIN,
        }
    }

    /// Unit price times quantity, in minor units.
    pub fn total_minor(&self) -> Option<i64> {
        line_total(self)
    }
}

impl Identified for LineItem {
    fn product_id(&self) -> &ProductId {
        &self.product.id
    }
}

/// Owner of the cart contents and the cart's open/closed flag.
pub struct CartManager {
    items: Vec<LineItem>,
    is_open: bool,
    currency: &'static Currency,
    store: Rc<dyn KeyValueStore>,
    notifier: Rc<dyn Notifier>,
    subscribers: Subscribers<CartEvent>,
}

impl CartManager {
    /// Create a cart from whatever is persisted in `store`.
    ///
    /// Missing or malformed stored data yields an empty cart.
    pub fn load(
        store: Rc<dyn KeyValueStore>,
        notifier: Rc<dyn Notifier>,
        currency: &'static Currency,
    ) -> Self {
        let items = load_sequence(store.as_ref(), CART_STORAGE_KEY);

        Self {
            items,
            is_open: false,
            currency,
            store,
            notifier,
            subscribers: Subscribers::new(),
        }
    }

    /// Add one unit of `product`, appending a new line if it is not in the cart yet.
    ///
    /// Returns the line's quantity after the add.
    pub fn add_to_cart(&mut self, product: Product) -> NonZeroU32 {
        let message = format!("{} added to cart", product.name);
        let quantity = self.insert(product);

        self.notifier.notify(NotificationKind::Success, &message);

        quantity
    }

    /// Set the quantity of a line exactly.
    ///
    /// A quantity of zero or less removes the line; removing a product that
    /// is not in the cart does nothing. Quantities above `u32::MAX` are clamped.
    pub fn update_quantity(&mut self, id: &ProductId, quantity: i64) {
        let Some(quantity) = u64::try_from(quantity)
            .ok()
            .map(|quantity| u32::try_from(quantity).unwrap_or(u32::MAX))
            .and_then(NonZeroU32::new)
        else {
            self.remove_from_cart(id);
            return;
        };

        let Some(item) = self.items.iter_mut().find(|item| item.product.id == *id) else {
            debug!(%id, "quantity update for product not in cart");
            return;
        };

        item.quantity = quantity;

        debug!(%id, quantity = quantity.get(), "cart quantity updated");

        self.persist();
        self.publish(&CartEvent::QuantityChanged {
            id: id.clone(),
            quantity: quantity.get(),
        });
    }

    /// Remove a line; returns whether one was present.
    pub fn remove_from_cart(&mut self, id: &ProductId) -> bool {
        let Some(item) = self.take(id) else {
            return false;
        };

        self.notifier.notify(
            NotificationKind::Success,
            &format!("{} removed from cart", item.product.name),
        );

        true
    }

    /// Remove every line.
    pub fn clear_cart(&mut self) {
        self.items.clear();

        debug!("cart cleared");

        self.persist();
        self.publish(&CartEvent::Cleared);
        self.notifier.notify(NotificationKind::Success, "Cart cleared");
    }

    /// Sum of all line quantities, as shown on the cart badge.
    pub fn items_count(&self) -> u64 {
        self.items
            .iter()
            .map(|item| u64::from(item.quantity.get()))
            .sum()
    }

    /// Sum of price times quantity over all lines.
    ///
    /// # Errors
    ///
    /// Returns [`TotalPriceError::Overflow`] if the total does not fit in minor units.
    pub fn total(&self) -> Result<Money<'static, Currency>, TotalPriceError> {
        total_price(&self.items, self.currency)
    }

    /// Amount saved against original prices over all lines.
    ///
    /// # Errors
    ///
    /// Returns [`TotalPriceError::Overflow`] if the total does not fit in minor units.
    pub fn savings(&self) -> Result<Money<'static, Currency>, TotalPriceError> {
        total_savings(&self.items, self.currency)
    }

    /// Flip the open flag, returning the new value.
    pub fn toggle_cart(&mut self) -> bool {
        self.set_open(!self.is_open);
        self.is_open
    }

    /// Show or hide the cart. Not persisted.
    pub fn set_open(&mut self, open: bool) {
        if self.is_open == open {
            return;
        }

        self.is_open = open;
        self.publish(&CartEvent::VisibilityChanged { open });
    }

    /// Whether the cart surface is shown.
    pub fn is_open(&self) -> bool {
        self.is_open
    }

    /// Line items in insertion order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// The line for `id`, if present.
    pub fn get(&self, id: &ProductId) -> Option<&LineItem> {
        self.items.iter().find(|item| item.product.id == *id)
    }

    /// Whether `id` has a line in the cart.
    pub fn contains(&self, id: &ProductId) -> bool {
        self.get(id).is_some()
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Currency of all cart prices.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Register a callback for cart changes.
    pub fn subscribe(&mut self, callback: impl FnMut(&CartEvent) + 'static) -> SubscriptionKey {
        self.subscribers.subscribe(callback)
    }

    /// Remove a callback registered with [`CartManager::subscribe`].
    pub fn unsubscribe(&mut self, key: SubscriptionKey) -> bool {
        self.subscribers.unsubscribe(key)
    }

    /// Add one unit without raising a notification.
    pub(crate) fn insert(&mut self, product: Product) -> NonZeroU32 {
        let id = product.id.clone();

        let (quantity, event) =
            if let Some(item) = self.items.iter_mut().find(|item| item.product.id == id) {
                item.quantity = item.quantity.saturating_add(1);

                let quantity = item.quantity;

                (
                    quantity,
                    CartEvent::QuantityChanged {
                        id: id.clone(),
                        quantity: quantity.get(),
                    },
                )
            } else {
                self.items.push(LineItem::new(product));

                (NonZeroU32::MIN, CartEvent::ItemAdded { id: id.clone() })
            };

        debug!(%id, quantity = quantity.get(), "added to cart");

        self.persist();
        self.publish(&event);

        quantity
    }

    /// Remove a line without raising a notification.
    pub(crate) fn take(&mut self, id: &ProductId) -> Option<LineItem> {
        let position = self.items.iter().position(|item| item.product.id == *id)?;
        let item = self.items.remove(position);

        debug!(%id, "removed from cart");

        self.persist();
        self.publish(&CartEvent::ItemRemoved { id: id.clone() });

        Some(item)
    }

    fn persist(&self) {
        if let Err(error) = save_sequence(self.store.as_ref(), CART_STORAGE_KEY, &self.items) {
            warn!(%error, "failed to persist cart");
        }
    }

    fn publish(&mut self, event: &CartEvent) {
        self.subscribers.publish(event);
    }
}

impl Debug for CartManager {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartManager")
            .field("items", &self.items)
            .field("is_open", &self.is_open)
            .field("currency", &self.currency.iso_alpha_code)
            .field("store", &self.store)
            .field("subscribers", &self.subscribers)
            .finish_non_exhaustive()
    }
}
