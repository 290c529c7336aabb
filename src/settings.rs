//! Storage and sync configuration
//!
//! Key names, the probe sentinel and where the score server lives.

#[cfg(not(target_arch = "wasm32"))]
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::persistence::PROBE_KEY;

/// Key names as they appear in config, before validation
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawKeys {
    best_score: String,
    game_state: String,
    user_id: String,
}

impl TryFrom<RawKeys> for StorageKeys {
    type Error = ConfigError;

    fn try_from(raw: RawKeys) -> Result<Self, Self::Error> {
        StorageKeys::new(raw.best_score, raw.game_state, raw.user_id)
    }
}

/// Names of the well-known storage keys, guaranteed non-empty and distinct
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawKeys")]
pub struct StorageKeys {
    best_score: String,
    game_state: String,
    user_id: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            best_score: "bestScore".to_string(),
            game_state: "gameState".to_string(),
            user_id: "userId".to_string(),
        }
    }
}

impl StorageKeys {
    /// Build a key set, rejecting empty or colliding names
    pub fn new(
        best_score: impl Into<String>,
        game_state: impl Into<String>,
        user_id: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let keys = Self {
            best_score: best_score.into(),
            game_state: game_state.into(),
            user_id: user_id.into(),
        };
        let named = [
            ("best score", &keys.best_score),
            ("game state", &keys.game_state),
            ("user id", &keys.user_id),
        ];
        for (i, (what, key)) in named.iter().enumerate() {
            if key.is_empty() {
                return Err(ConfigError::EmptyKey(*what));
            }
            if named[..i].iter().any(|(_, other)| other == key) {
                return Err(ConfigError::KeyCollision(key.to_string()));
            }
        }
        Ok(keys)
    }

    /// Best score (owned)
    pub fn best_score(&self) -> &str {
        &self.best_score
    }

    /// Serialized in-progress game (owned)
    pub fn game_state(&self) -> &str {
        &self.game_state
    }

    /// Session user id (read-only, written by the auth collaborator)
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn contains(&self, key: &str) -> bool {
        [self.best_score(), self.game_state(), self.user_id()].contains(&key)
    }
}

/// Storage manager settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub keys: StorageKeys,
    /// Sentinel key written and removed by the capability probe
    pub probe_key: String,
    /// Origin of the score server, e.g. `https://example.org`.
    /// `None` means the page origin on web.
    pub api_base_url: Option<String>,
    /// Storage file for native builds, `None` for the temp dir default
    #[cfg(not(target_arch = "wasm32"))]
    pub data_file: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            keys: StorageKeys::default(),
            probe_key: PROBE_KEY.to_string(),
            api_base_url: None,
            #[cfg(not(target_arch = "wasm32"))]
            data_file: None,
        }
    }
}

impl Settings {
    /// Environment variable naming the score server origin (native only)
    pub const API_URL_VAR: &'static str = "GAME2048_API_URL";
    /// Environment variable naming the storage file (native only)
    pub const DATA_FILE_VAR: &'static str = "GAME2048_DATA_FILE";

    /// Settings with the server origin and storage file taken from the
    /// environment
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_env() -> Self {
        Self {
            api_base_url: std::env::var(Self::API_URL_VAR).ok(),
            data_file: std::env::var_os(Self::DATA_FILE_VAR).map(PathBuf::from),
            ..Self::default()
        }
    }

    /// Path of the native storage file
    #[cfg(not(target_arch = "wasm32"))]
    pub fn data_file(&self) -> PathBuf {
        self.data_file
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join("game2048-storage.json"))
    }

    /// Settings with the server origin set to the page origin
    #[cfg(target_arch = "wasm32")]
    pub fn from_location() -> Self {
        let origin = web_sys::window().and_then(|w| w.location().origin().ok());
        Self {
            api_base_url: origin,
            ..Self::default()
        }
    }

    /// Server origin, or an empty string for same-origin requests
    pub fn api_base(&self) -> &str {
        self.api_base_url.as_deref().unwrap_or("")
    }

    /// The probe removes its key, so it must not name a stored value
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.probe_key.is_empty() {
            return Err(ConfigError::EmptyKey("probe"));
        }
        if self.keys.contains(&self.probe_key) {
            return Err(ConfigError::KeyCollision(self.probe_key.clone()));
        }
        Ok(())
    }
}
