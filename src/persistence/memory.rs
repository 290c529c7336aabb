//! In-memory fallback store

use std::cell::RefCell;
use std::collections::HashMap;

use super::KeyValueStore;
use crate::error::StorageError;

/// String map that lives as long as the process (or page).
///
/// Used when the durable store is unusable. Each instance is independent, so
/// callers construct one and hand it to the backend.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    data: RefCell<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.data.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.data.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.data
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.data.borrow_mut().remove(key);
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        self.data.borrow_mut().clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_is_none_not_empty() {
        let store = MemoryStorage::new();
        assert_eq!(store.get_item("k").unwrap(), None);
        store.set_item("k", "").unwrap();
        assert_eq!(store.get_item("k").unwrap(), Some(String::new()));
    }

    #[test]
    fn test_remove_and_clear() {
        let store = MemoryStorage::new();
        store.set_item("a", "1").unwrap();
        store.set_item("b", "2").unwrap();

        store.remove_item("a").unwrap();
        store.remove_item("missing").unwrap();
        assert_eq!(store.get_item("a").unwrap(), None);
        assert_eq!(store.len(), 1);

        store.clear().unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_instances_are_isolated() {
        let first = MemoryStorage::new();
        let second = MemoryStorage::new();
        first.set_item("bestScore", "8").unwrap();
        assert_eq!(second.get_item("bestScore").unwrap(), None);
    }
}
