//! Persistence
//!
//! Cart and wishlist sequences are stored as JSON arrays under two fixed keys.
//! Reading never fails: a missing key, an unreadable store, malformed JSON or
//! data that breaks the sequence invariants all load as an empty sequence.

use rustc_hash::FxHashSet;
use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    products::{Identified, ProductId},
    storage::{KeyValueStore, StoreError},
};

/// Storage key for cart line items.
pub const CART_STORAGE_KEY: &str = "grooso-cart";

/// Storage key for wishlist entries.
pub const WISHLIST_STORAGE_KEY: &str = "grooso-wishlist";

/// Errors from encoding, decoding or storing a sequence.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// JSON encoding or decoding failed.
    #[error("failed to (de)serialize sequence: {0}")]
    Json(#[from] serde_json::Error),

    /// The decoded sequence contains the same product twice.
    #[error("duplicate product id in stored sequence: {0}")]
    DuplicateId(ProductId),

    /// The backing store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Encode a sequence as a JSON array.
///
/// # Errors
///
/// Returns [`PersistenceError::Json`] if a value cannot be serialized.
pub fn encode_sequence<T: Serialize>(items: &[T]) -> Result<String, PersistenceError> {
    Ok(serde_json::to_string(items)?)
}

/// Decode a JSON array, rejecting duplicate product ids.
///
/// # Errors
///
/// - [`PersistenceError::Json`]: the text is not a valid sequence.
/// - [`PersistenceError::DuplicateId`]: two elements share a product id.
pub fn decode_sequence<T>(json: &str) -> Result<Vec<T>, PersistenceError>
where
    T: DeserializeOwned + Identified,
{
    let items: Vec<T> = serde_json::from_str(json)?;

    if let Some(duplicate) = first_duplicate(&items) {
        return Err(PersistenceError::DuplicateId(duplicate.clone()));
    }

    Ok(items)
}

fn first_duplicate<T: Identified>(items: &[T]) -> Option<&ProductId> {
    let mut seen = FxHashSet::default();

    items
        .iter()
        .map(Identified::product_id)
        .find(|id| !seen.insert(*id))
}

/// Load the sequence stored under `key`, or an empty one.
pub fn load_sequence<T>(store: &dyn KeyValueStore, key: &str) -> Vec<T>
where
    T: DeserializeOwned + Identified,
{
    let stored = match store.get(key) {
        Ok(Some(stored)) => stored,
        Ok(None) => {
            debug!(key, "no stored sequence, starting empty");
            return Vec::new();
        }
        Err(error) => {
            warn!(key, %error, "failed to read stored sequence, starting empty");
            return Vec::new();
        }
    };

    match decode_sequence(&stored) {
        Ok(items) => {
            debug!(key, len = items.len(), "loaded stored sequence");
            items
        }
        Err(error) => {
            warn!(key, %error, "discarding malformed stored sequence");
            Vec::new()
        }
    }
}

/// Store `items` under `key`, replacing any previous value.
///
/// # Errors
///
/// Returns a [`PersistenceError`] if encoding or writing fails.
pub fn save_sequence<T: Serialize>(
    store: &dyn KeyValueStore,
    key: &str,
    items: &[T],
) -> Result<(), PersistenceError> {
    let encoded = encode_sequence(items)?;

    store.set(key, &encoded)?;

    Ok(())
}
