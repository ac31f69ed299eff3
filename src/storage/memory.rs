//! In-memory store

use std::cell::RefCell;

use rustc_hash::FxHashMap;

use crate::storage::{KeyValueStore, StoreError};

/// A process-local store; values live as long as the store does.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RefCell<FxHashMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently stored.
    pub fn len(&self) -> usize {
        self.values.borrow().len()
    }

    /// Check if the store holds no keys.
    pub fn is_empty(&self) -> bool {
        self.values.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.values.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());

        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.values.borrow_mut().remove(key);

        Ok(())
    }
}
