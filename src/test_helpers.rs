//! Test helpers.

use crate::storage::{KeyValueStore, StoreError};

/// A store whose every operation fails.
#[derive(Debug)]
pub(crate) struct BrokenStore;

impl KeyValueStore for BrokenStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Err(StoreError::InvalidKey(key.to_string()))
    }

    fn set(&self, key: &str, _value: &str) -> Result<(), StoreError> {
        Err(StoreError::InvalidKey(key.to_string()))
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        Err(StoreError::InvalidKey(key.to_string()))
    }
}
