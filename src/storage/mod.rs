//! Key-value storage
//!
//! The cart and wishlist persist through a synchronous, string-keyed store in
//! the spirit of a browser's origin-scoped local storage. Every method takes
//! `&self`; implementations that mutate use interior mutability.

use std::{fmt::Debug, io, path::PathBuf};

use thiserror::Error;

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Errors raised by a [`KeyValueStore`] backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The key contains characters the backend cannot address.
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),

    /// Reading a stored value failed.
    #[error("failed to read {path}: {source}")]
    Read {
        /// Path of the value on disk
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: io::Error,
    },

    /// Writing a value failed.
    #[error("failed to write {path}: {source}")]
    Write {
        /// Path of the value on disk
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: io::Error,
    },

    /// Removing a value failed.
    #[error("failed to remove {path}: {source}")]
    Remove {
        /// Path of the value on disk
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: io::Error,
    },
}

/// Synchronous string key-value store.
pub trait KeyValueStore: Debug {
    /// Retrieve the value stored under `key`.
    ///
    /// Returns `Ok(None)` if the key does not exist.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Insert or replace the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the backend cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Remove the value stored under `key`.
    ///
    /// Returns `Ok(())` even if the key did not exist.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the backend cannot be written.
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// Check that a key only uses `[A-Za-z0-9_.-]` and is not empty or dot-only.
pub(crate) fn validate_key(key: &str) -> Result<(), StoreError> {
    let valid_chars = key
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));

    if key.is_empty() || !valid_chars || key.chars().all(|c| c == '.') {
        return Err(StoreError::InvalidKey(key.to_string()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_key_accepts_storage_keys() {
        assert!(validate_key("grooso-cart").is_ok());
        assert!(validate_key("grooso_wishlist.v2").is_ok());
    }

    #[test]
    fn validate_key_rejects_paths_and_empty_keys() {
        assert!(matches!(validate_key(""), Err(StoreError::InvalidKey(_))));
        assert!(matches!(validate_key(".."), Err(StoreError::InvalidKey(_))));
        assert!(matches!(
            validate_key("../etc/passwd"),
            Err(StoreError::InvalidKey(_))
        ));
        assert!(matches!(
            validate_key("cart items"),
            Err(StoreError::InvalidKey(_))
        ));
    }
}
