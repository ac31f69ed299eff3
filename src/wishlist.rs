//! Wishlist
//!
//! Saved-for-later product references. Unlike the cart there is no quantity:
//! adding a product that is already saved is rejected.

use std::{
    fmt::{self, Debug, Formatter},
    rc::Rc,
};

use rustc_hash::FxHashSet;
use tracing::{debug, warn};

use crate::{
    events::{SubscriptionKey, Subscribers, WishlistEvent},
    notifications::{NotificationKind, Notifier},
    persistence::{WISHLIST_STORAGE_KEY, load_sequence, save_sequence},
    products::{Product, ProductId},
    storage::KeyValueStore,
};

/// Result of [`WishlistManager::toggle_wishlist`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggled {
    /// The product was saved.
    Added,

    /// The product was removed.
    Removed,
}

/// Owner of the wishlist entries and the sidebar's open/closed flag.
pub struct WishlistManager {
    entries: Vec<Product>,
    index: FxHashSet<ProductId>,
    is_open: bool,
    store: Rc<dyn KeyValueStore>,
    notifier: Rc<dyn Notifier>,
    subscribers: Subscribers<WishlistEvent>,
}

impl WishlistManager {
    /// Create a wishlist from whatever is persisted in `store`.
    ///
    /// Missing or malformed stored data yields an empty wishlist.
    pub fn load(store: Rc<dyn KeyValueStore>, notifier: Rc<dyn Notifier>) -> Self {
        let entries: Vec<Product> = load_sequence(store.as_ref(), WISHLIST_STORAGE_KEY);
        let index = entries.iter().map(|entry| entry.id.clone()).collect();

        Self {
            entries,
            index,
            is_open: false,
            store,
            notifier,
            subscribers: Subscribers::new(),
        }
    }

    /// Save `product`, returning `false` if it was already saved.
    pub fn add_to_wishlist(&mut self, product: Product) -> bool {
        if self.index.contains(&product.id) {
            debug!(id = %product.id, "product already in wishlist");

            self.notifier
                .notify(NotificationKind::Error, "Item already in wishlist");

            return false;
        }

        let id = product.id.clone();

        self.index.insert(id.clone());
        self.entries.push(product);

        debug!(%id, "added to wishlist");

        self.persist();
        self.publish(&WishlistEvent::EntryAdded { id });
        self.notifier
            .notify(NotificationKind::Success, "Added to wishlist");

        true
    }

    /// Remove `id` if present.
    ///
    /// The removal notification is raised even when nothing was saved.
    pub fn remove_from_wishlist(&mut self, id: &ProductId) -> bool {
        let removed = self.take(id).is_some();

        self.notifier
            .notify(NotificationKind::Success, "Removed from wishlist");

        removed
    }

    /// Whether `id` is saved.
    pub fn is_in_wishlist(&self, id: &ProductId) -> bool {
        self.index.contains(id)
    }

    /// Remove `product` if saved, otherwise save it.
    pub fn toggle_wishlist(&mut self, product: Product) -> Toggled {
        if self.is_in_wishlist(&product.id) {
            self.remove_from_wishlist(&product.id);
            Toggled::Removed
        } else {
            self.add_to_wishlist(product);
            Toggled::Added
        }
    }

    /// Remove every entry.
    pub fn clear_wishlist(&mut self) {
        self.entries.clear();
        self.index.clear();

        debug!("wishlist cleared");

        self.persist();
        self.publish(&WishlistEvent::Cleared);
        self.notifier
            .notify(NotificationKind::Success, "Wishlist cleared");
    }

    /// Number of saved entries.
    pub fn wishlist_count(&self) -> usize {
        self.entries.len()
    }

    /// Saved entries in insertion order.
    pub fn entries(&self) -> &[Product] {
        &self.entries
    }

    /// The entry for `id`, if saved.
    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        if !self.index.contains(id) {
            return None;
        }

        self.entries.iter().find(|entry| entry.id == *id)
    }

    /// Check if nothing is saved.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Flip the sidebar flag, returning the new value.
    pub fn toggle_open(&mut self) -> bool {
        self.set_open(!self.is_open);
        self.is_open
    }

    /// Show or hide the sidebar. Not persisted.
    pub fn set_open(&mut self, open: bool) {
        if self.is_open == open {
            return;
        }

        self.is_open = open;
        self.publish(&WishlistEvent::VisibilityChanged { open });
    }

    /// Whether the sidebar is shown.
    pub fn is_open(&self) -> bool {
        self.is_open
    }

    /// Register a callback for wishlist changes.
    pub fn subscribe(
        &mut self,
        callback: impl FnMut(&WishlistEvent) + 'static,
    ) -> SubscriptionKey {
        self.subscribers.subscribe(callback)
    }

    /// Remove a callback registered with [`WishlistManager::subscribe`].
    pub fn unsubscribe(&mut self, key: SubscriptionKey) -> bool {
        self.subscribers.unsubscribe(key)
    }

    /// Remove an entry without raising a notification.
    pub(crate) fn take(&mut self, id: &ProductId) -> Option<Product> {
        if !self.index.remove(id) {
            return None;
        }

        let position = self.entries.iter().position(|entry| entry.id == *id)?;
        let entry = self.entries.remove(position);

        debug!(%id, "removed from wishlist");

        self.persist();
        self.publish(&WishlistEvent::EntryRemoved { id: id.clone() });

        Some(entry)
    }

    fn persist(&self) {
        if let Err(error) = save_sequence(self.store.as_ref(), WISHLIST_STORAGE_KEY, &self.entries)
        {
            warn!(%error, "failed to persist wishlist");
        }
    }

    fn publish(&mut self, event: &WishlistEvent) {
        self.subscribers.publish(event);
    }
}

impl Debug for WishlistManager {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("WishlistManager")
            .field("entries", &self.entries)
            .field("is_open", &self.is_open)
            .field("store", &self.store)
            .field("subscribers", &self.subscribers)
            .finish_non_exhaustive()
    }
}
