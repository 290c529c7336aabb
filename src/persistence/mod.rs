//! Key-value storage backends
//!
//! Features:
//! - [`KeyValueStore`]: fallible get/set/remove/clear over string keys,
//!   implemented by host stores (LocalStorage on web, a JSON file on native)
//! - [`MemoryStorage`]: in-memory fallback
//! - [`StorageBackend`]: probe-once selection between the two, exposing an
//!   infallible contract to the rest of the crate

#[cfg(not(target_arch = "wasm32"))]
pub mod file;
pub mod memory;

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStorage;
pub use memory::MemoryStorage;

use crate::error::StorageError;

/// Default sentinel key used by the capability probe
pub const PROBE_KEY: &str = "__test__";

/// A host-provided string key-value store
pub trait KeyValueStore {
    /// `Ok(None)` when the key was never set or has been removed.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
    fn clear(&self) -> Result<(), StorageError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove_item(key)
    }

    fn clear(&self) -> Result<(), StorageError> {
        (**self).clear()
    }
}

/// Check that a store accepts a write and a remove
pub fn probe<S: KeyValueStore + ?Sized>(store: &S, probe_key: &str) -> Result<(), StorageError> {
    store.set_item(probe_key, "1")?;
    store.remove_item(probe_key)
}

/// The store chosen at construction, fixed for its lifetime
#[derive(Debug)]
pub enum StorageBackend<P> {
    /// Durable host store that passed the probe
    Persistent(P),
    /// In-memory map used when the durable store is unusable.
    ///
    /// A host store that failed the probe is kept for reading keys owned by
    /// other components; a store that rejects writes (quota) may still
    /// answer reads.
    Fallback { memory: MemoryStorage, host: Option<P> },
}

impl<P: KeyValueStore> StorageBackend<P> {
    /// Probe `candidate` with the default sentinel key, falling back to a
    /// fresh [`MemoryStorage`].
    pub fn select(candidate: Option<P>) -> Self {
        Self::select_with(candidate, PROBE_KEY, MemoryStorage::new())
    }

    /// Probe `candidate` with `probe_key`; use `fallback` if it is missing
    /// or the probe fails.
    pub fn select_with(candidate: Option<P>, probe_key: &str, fallback: MemoryStorage) -> Self {
        match candidate {
            Some(store) => match probe(&store, probe_key) {
                Ok(()) => {
                    log::info!("Using persistent storage");
                    StorageBackend::Persistent(store)
                }
                Err(e) => {
                    log::warn!("Persistent storage unavailable ({e}), using in-memory storage");
                    StorageBackend::Fallback {
                        memory: fallback,
                        host: Some(store),
                    }
                }
            },
            None => {
                log::info!("No persistent storage, using in-memory storage");
                StorageBackend::Fallback {
                    memory: fallback,
                    host: None,
                }
            }
        }
    }

    pub fn is_persistent(&self) -> bool {
        matches!(self, StorageBackend::Persistent(_))
    }

    fn store(&self) -> &dyn KeyValueStore {
        match self {
            StorageBackend::Persistent(store) => store,
            StorageBackend::Fallback { memory, .. } => memory,
        }
    }

    /// The durable host store, whether or not it passed the probe
    pub fn host(&self) -> Option<&P> {
        match self {
            StorageBackend::Persistent(store) => Some(store),
            StorageBackend::Fallback { host, .. } => host.as_ref(),
        }
    }

    /// Read `key` straight from the durable host store, bypassing the
    /// fallback. `None` without a host or when the host cannot be read.
    pub fn get_from_host(&self, key: &str) -> Option<String> {
        match self.host()?.get_item(key) {
            Ok(value) => value,
            Err(e) => {
                log::warn!("Failed to read `{key}` from host storage: {e}");
                None
            }
        }
    }

    /// Stored value, or `None` if absent (or unreadable).
    pub fn get(&self, key: &str) -> Option<String> {
        match self.store().get_item(key) {
            Ok(value) => value,
            Err(e) => {
                log::warn!("Failed to read `{key}`: {e}");
                None
            }
        }
    }

    /// Store the string form of `value`, overwriting any previous value.
    pub fn set(&self, key: &str, value: impl ToString) {
        if let Err(e) = self.store().set_item(key, &value.to_string()) {
            log::warn!("Failed to write `{key}`: {e}");
        }
    }

    pub fn remove(&self, key: &str) {
        if let Err(e) = self.store().remove_item(key) {
            log::warn!("Failed to remove `{key}`: {e}");
        }
    }

    /// Remove every entry, including keys this crate does not own.
    pub fn clear(&self) {
        if let Err(e) = self.store().clear() {
            log::warn!("Failed to clear storage: {e}");
        }
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::{FailingStore, ReadOnlyStore};
    use super::*;

    #[test]
    fn test_probe_success_selects_persistent() {
        let host = MemoryStorage::new();
        let backend = StorageBackend::select(Some(&host));
        assert!(backend.is_persistent());
        // Sentinel must not be left behind
        assert!(host.is_empty());
    }

    #[test]
    fn test_probe_failure_selects_fallback() {
        let host = FailingStore::default();
        let backend = StorageBackend::select(Some(&host));
        assert!(!backend.is_persistent());

        let attempts = host.attempts.get();
        backend.set("bestScore", 64);
        assert_eq!(backend.get("bestScore").as_deref(), Some("64"));
        // No re-probing after selection
        assert_eq!(host.attempts.get(), attempts);
    }

    #[test]
    fn test_missing_host_selects_fallback() {
        let backend: StorageBackend<MemoryStorage> = StorageBackend::select(None);
        assert!(!backend.is_persistent());
    }

    #[test]
    fn test_injected_fallback_is_used() {
        let fallback = MemoryStorage::new();
        fallback.set_item("userId", "7").unwrap();
        let backend =
            StorageBackend::select_with(Some(FailingStore::default()), "__probe__", fallback);
        assert_eq!(backend.get("userId").as_deref(), Some("7"));
    }

    #[test]
    fn test_fallback_keeps_readable_host() {
        let host = ReadOnlyStore::with("userId", "777");
        let backend = StorageBackend::select(Some(&host));
        assert!(!backend.is_persistent());

        // Owned keys go to memory, foreign keys are still read from the host
        backend.set("bestScore", 42);
        assert_eq!(backend.get("bestScore").as_deref(), Some("42"));
        assert_eq!(backend.get("userId"), None);
        assert_eq!(backend.get_from_host("userId").as_deref(), Some("777"));
    }

    #[test]
    fn test_get_from_host_without_host_is_none() {
        let fallback = MemoryStorage::new();
        fallback.set_item("userId", "7").unwrap();
        let backend: StorageBackend<MemoryStorage> =
            StorageBackend::select_with(None, PROBE_KEY, fallback);
        assert_eq!(backend.get_from_host("userId"), None);
    }

    #[test]
    fn test_get_from_host_on_persistent_reads_store() {
        let host = MemoryStorage::new();
        host.set_item("userId", "12").unwrap();
        let backend = StorageBackend::select(Some(&host));
        assert_eq!(backend.get_from_host("userId").as_deref(), Some("12"));
    }

    #[test]
    fn test_set_coerces_to_string() {
        let backend: StorageBackend<MemoryStorage> = StorageBackend::select(None);
        backend.set("n", 1024u64);
        backend.set("flag", true);
        assert_eq!(backend.get("n").as_deref(), Some("1024"));
        assert_eq!(backend.get("flag").as_deref(), Some("true"));
    }

    #[test]
    fn test_empty_string_is_distinct_from_absent() {
        let backend: StorageBackend<MemoryStorage> = StorageBackend::select(None);
        backend.set("k", "");
        assert_eq!(backend.get("k"), Some(String::new()));
        backend.remove("k");
        assert_eq!(backend.get("k"), None);
    }

    #[test]
    fn test_clear_wipes_all_keys() {
        let backend: StorageBackend<MemoryStorage> = StorageBackend::select(None);
        backend.set("bestScore", 4);
        backend.set("gameState", "{}");
        backend.set("userId", "99");
        backend.clear();
        assert_eq!(backend.get("bestScore"), None);
        assert_eq!(backend.get("gameState"), None);
        assert_eq!(backend.get("userId"), None);
    }
}
