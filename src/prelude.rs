//! Grooso prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{CartManager, LineItem},
    catalog::{Catalog, CatalogEntry, CatalogError},
    events::{CartEvent, SubscriptionKey, WishlistEvent},
    notifications::{NotificationKind, Notifier, Toast, ToastQueue, TracingNotifier},
    persistence::{CART_STORAGE_KEY, PersistenceError, WISHLIST_STORAGE_KEY},
    pricing::TotalPriceError,
    products::{Identified, Product, ProductError, ProductId},
    storage::{FileStore, KeyValueStore, MemoryStore, StoreError},
    storefront::{MoveOutcome, Storefront},
    summary::{SummaryError, write_cart_to, write_wishlist_to},
    wishlist::{Toggled, WishlistManager},
};
