//! 2048 storage - best score and saved game persistence
//!
//! Core modules:
//! - `persistence`: Key-value backends (durable host store, in-memory fallback)
//! - `manager`: Best score / game state facade with best-effort server sync
//! - `sync`: Best score endpoint client
//! - `settings`: Storage keys and server location
//! - `platform`: Browser/native wiring (LocalStorage, JS bindings, UI glue)
//! - `game`: Typed saved-game snapshot

pub mod error;
pub mod game;
pub mod manager;
pub mod persistence;
pub mod platform;
pub mod settings;
pub mod sync;

pub use error::{ConfigError, StateError, StorageError, SyncError};
pub use game::SavedGame;
pub use manager::StorageManager;
pub use persistence::{KeyValueStore, MemoryStorage, StorageBackend};
pub use settings::{Settings, StorageKeys};
pub use sync::{HttpScoreSync, ScoreSync};
