//! `window.localStorage` adapter

use wasm_bindgen::JsValue;
use web_sys::Storage;

use crate::error::StorageError;
use crate::persistence::KeyValueStore;

/// Browser LocalStorage as a [`KeyValueStore`]
#[derive(Debug, Clone)]
pub struct LocalStorage {
    storage: Storage,
}

impl LocalStorage {
    /// The page's LocalStorage, if the browser exposes one.
    ///
    /// Accessing it can throw (sandboxed iframes, disabled cookies), which
    /// is reported as `None`.
    pub fn from_window() -> Option<Self> {
        let storage = web_sys::window()?.local_storage().ok().flatten()?;
        Some(Self { storage })
    }
}

fn host_error(e: JsValue) -> StorageError {
    StorageError::Host(format!("{e:?}"))
}

impl KeyValueStore for LocalStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.storage.get_item(key).map_err(host_error)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.storage.set_item(key, value).map_err(host_error)
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.storage.remove_item(key).map_err(host_error)
    }

    fn clear(&self) -> Result<(), StorageError> {
        self.storage.clear().map_err(host_error)
    }
}
