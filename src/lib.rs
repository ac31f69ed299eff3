//! Grooso
//!
//! Cart and wishlist state for the Grooso storefront. Both collections are
//! persisted to a key-value store, announce changes to subscribers and report
//! user-facing outcomes through a notifier.

pub mod cart;
pub mod catalog;
pub mod config;
pub mod events;
pub mod notifications;
pub mod observability;
pub mod persistence;
pub mod prelude;
pub mod pricing;
pub mod products;
pub mod storage;
pub mod storefront;
pub mod summary;
#[cfg(test)]
mod test_helpers;
pub mod wishlist;
