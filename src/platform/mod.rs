//! Platform abstraction layer
//!
//! Picks the durable store for the current target and wires up the
//! default [`StorageManager`]:
//! - Web: LocalStorage, fetch-backed sync to the page origin, JS bindings
//!   and the clear-storage button
//! - Native: a JSON file, sync to `GAME2048_API_URL`

#[cfg(target_arch = "wasm32")]
pub mod bindings;
#[cfg(target_arch = "wasm32")]
pub mod clear_button;
#[cfg(target_arch = "wasm32")]
pub mod storage;

use crate::error::ConfigError;
use crate::manager::StorageManager;
use crate::persistence::{MemoryStorage, StorageBackend};
use crate::settings::Settings;
use crate::sync::HttpScoreSync;

#[cfg(not(target_arch = "wasm32"))]
use crate::persistence::FileStorage;
#[cfg(target_arch = "wasm32")]
use storage::LocalStorage;

/// Durable store for this target
#[cfg(target_arch = "wasm32")]
pub type HostStorage = LocalStorage;
#[cfg(not(target_arch = "wasm32"))]
pub type HostStorage = FileStorage;

/// Manager over the target's durable store with HTTP sync
pub type DefaultManager = StorageManager<HostStorage, HttpScoreSync>;

/// Probe `host` and build a manager with HTTP sync per `settings`
pub fn build(
    host: Option<HostStorage>,
    settings: &Settings,
) -> Result<DefaultManager, ConfigError> {
    settings.validate()?;
    let storage = StorageBackend::select_with(host, &settings.probe_key, MemoryStorage::new());
    let sync = HttpScoreSync::new(settings.api_base());
    Ok(StorageManager::new(settings.keys.clone(), storage, sync))
}

/// Manager over the page's LocalStorage
#[cfg(target_arch = "wasm32")]
pub fn open(settings: &Settings) -> Result<DefaultManager, ConfigError> {
    build(LocalStorage::from_window(), settings)
}

/// Manager over the configured storage file
#[cfg(not(target_arch = "wasm32"))]
pub fn open(settings: &Settings) -> Result<DefaultManager, ConfigError> {
    build(Some(FileStorage::new(settings.data_file())), settings)
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use crate::persistence::KeyValueStore;

    #[test]
    fn test_build_uses_writable_file() {
        let dir = tempfile::tempdir().unwrap();
        let host = FileStorage::new(dir.path().join("scores.json"));
        let manager = build(Some(host), &Settings::default()).unwrap();
        assert!(manager.storage().is_persistent());
    }

    #[test]
    fn test_build_falls_back_on_unwritable_file() {
        let dir = tempfile::tempdir().unwrap();
        let host = FileStorage::new(dir.path());
        let manager = build(Some(host), &Settings::default()).unwrap();
        assert!(!manager.storage().is_persistent());
    }

    #[test]
    fn test_build_rejects_probe_key_naming_stored_value() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scores.json");
        FileStorage::new(&path).set_item("bestScore", "300").unwrap();

        let settings = Settings {
            probe_key: "bestScore".to_string(),
            ..Settings::default()
        };
        let result = build(Some(FileStorage::new(&path)), &settings);
        assert!(matches!(result, Err(ConfigError::KeyCollision(_))));
        // Probe never ran, so the stored score is intact
        assert_eq!(
            FileStorage::new(&path).get_item("bestScore").unwrap().as_deref(),
            Some("300")
        );
    }

    #[test]
    fn test_colliding_keys_never_reach_a_manager() {
        let json = r#"{"keys": {"bestScore": "k", "gameState": "k", "userId": "u"}}"#;
        assert!(serde_json::from_str::<Settings>(json).is_err());
    }

    #[tokio::test]
    async fn test_open_uses_configured_data_file() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings {
            data_file: Some(dir.path().join("configured.json")),
            ..Settings::default()
        };

        open(&settings).unwrap().set_best_score(8).await;

        assert!(dir.path().join("configured.json").exists());
        assert_eq!(open(&settings).unwrap().get_best_score(), 8);
    }

    #[tokio::test]
    async fn test_best_score_persists_across_managers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scores.json");

        let first = build(Some(FileStorage::new(&path)), &Settings::default()).unwrap();
        first.set_best_score(1024).await;

        let second = build(Some(FileStorage::new(&path)), &Settings::default()).unwrap();
        assert_eq!(second.get_best_score(), 1024);
    }
}
