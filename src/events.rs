//! Change events
//!
//! Managers publish a typed event after every mutation has been applied and
//! persisted. A view layer subscribes to re-render from the new state.

use std::fmt::{self, Debug, Formatter};

use slotmap::{SlotMap, new_key_type};

use crate::products::ProductId;

new_key_type! {
    /// Handle returned by `subscribe`, used to unsubscribe.
    pub struct SubscriptionKey;
}

/// Something changed in the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartEvent {
    /// A new line item was appended.
    ItemAdded {
        /// Product id of the new line
        id: ProductId,
    },

    /// An existing line item's quantity changed.
    QuantityChanged {
        /// Product id of the line
        id: ProductId,
        /// New quantity
        quantity: u32,
    },

    /// A line item was removed.
    ItemRemoved {
        /// Product id of the removed line
        id: ProductId,
    },

    /// All line items were removed.
    Cleared,

    /// The cart surface was shown or hidden.
    VisibilityChanged {
        /// Whether the cart is now open
        open: bool,
    },
}

/// Something changed in the wishlist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WishlistEvent {
    /// An entry was appended.
    EntryAdded {
        /// Product id of the entry
        id: ProductId,
    },

    /// An entry was removed.
    EntryRemoved {
        /// Product id of the entry
        id: ProductId,
    },

    /// All entries were removed.
    Cleared,

    /// The wishlist sidebar was shown or hidden.
    VisibilityChanged {
        /// Whether the sidebar is now open
        open: bool,
    },
}

type Callback<E> = Box<dyn FnMut(&E)>;

/// Registry of event callbacks.
///
/// Callbacks run synchronously, in subscription order, on the thread that
/// performed the mutation.
pub struct Subscribers<E> {
    callbacks: SlotMap<SubscriptionKey, Callback<E>>,
    order: Vec<SubscriptionKey>,
}

impl<E> Subscribers<E> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            callbacks: SlotMap::with_key(),
            order: Vec::new(),
        }
    }

    /// Register a callback.
    pub fn subscribe(&mut self, callback: impl FnMut(&E) + 'static) -> SubscriptionKey {
        let key = self.callbacks.insert(Box::new(callback));

        self.order.push(key);

        key
    }

    /// Remove a callback, returning whether it was registered.
    pub fn unsubscribe(&mut self, key: SubscriptionKey) -> bool {
        self.order.retain(|existing| *existing != key);

        self.callbacks.remove(key).is_some()
    }

    /// Deliver `event` to every callback.
    pub fn publish(&mut self, event: &E) {
        for key in &self.order {
            if let Some(callback) = self.callbacks.get_mut(*key) {
                callback(event);
            }
        }
    }

    /// Number of registered callbacks.
    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    /// Check if no callbacks are registered.
    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }
}

impl<E> Default for Subscribers<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Debug for Subscribers<E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscribers")
            .field("len", &self.callbacks.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use super::*;

    #[test]
    fn publish_reaches_callbacks_in_subscription_order() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut subscribers = Subscribers::<CartEvent>::new();

        let first = Rc::clone(&seen);
        subscribers.subscribe(move |event| first.borrow_mut().push(("first", event.clone())));

        let second = Rc::clone(&seen);
        subscribers.subscribe(move |event| second.borrow_mut().push(("second", event.clone())));

        subscribers.publish(&CartEvent::Cleared);

        assert_eq!(
            *seen.borrow(),
            vec![("first", CartEvent::Cleared), ("second", CartEvent::Cleared)]
        );
    }

    #[test]
    fn unsubscribe_stops_delivery() {
        let count = Rc::new(RefCell::new(0_u32));
        let mut subscribers = Subscribers::<WishlistEvent>::new();

        let counter = Rc::clone(&count);
        let key = subscribers.subscribe(move |_event| *counter.borrow_mut() += 1);

        subscribers.publish(&WishlistEvent::Cleared);

        assert_eq!(subscribers.len(), 1);
        assert!(subscribers.unsubscribe(key));
        assert!(!subscribers.unsubscribe(key));

        subscribers.publish(&WishlistEvent::Cleared);

        assert_eq!(*count.borrow(), 1);
        assert!(subscribers.is_empty());
    }
}
