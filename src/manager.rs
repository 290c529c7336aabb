//! Best score and game state facade
//!
//! Local writes always happen first and always stick. Server sync is
//! best-effort: every failure is logged and dropped.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::StateError;
use crate::persistence::{KeyValueStore, StorageBackend};
use crate::settings::StorageKeys;
use crate::sync::ScoreSync;

/// Typed access to the best score and saved game over a [`StorageBackend`]
pub struct StorageManager<P, R> {
    keys: StorageKeys,
    storage: StorageBackend<P>,
    sync: R,
}

impl<P: KeyValueStore, R: ScoreSync> StorageManager<P, R> {
    pub fn new(keys: StorageKeys, storage: StorageBackend<P>, sync: R) -> Self {
        Self {
            keys,
            storage,
            sync,
        }
    }

    pub fn storage(&self) -> &StorageBackend<P> {
        &self.storage
    }

    /// Stored best score, 0 when none has been recorded.
    ///
    /// A value that does not parse as a non-negative integer is treated as
    /// no score at all.
    pub fn get_best_score(&self) -> u64 {
        let Some(raw) = self.storage.get(self.keys.best_score()) else {
            return 0;
        };
        match raw.trim().parse() {
            Ok(score) => score,
            Err(_) => {
                log::warn!("Ignoring non-numeric best score {raw:?}");
                0
            }
        }
    }

    /// Record `score` locally, then push it to the server if a user is
    /// signed in. Never fails.
    pub async fn set_best_score(&self, score: u64) {
        self.storage.set(self.keys.best_score(), score);

        let Some(user_id) = self.user_id() else {
            log::debug!("No user id, best score {score} kept locally");
            return;
        };
        self.push_best_score(&user_id, score).await;
    }

    /// Drop the saved game, keeping the best score
    pub fn clear_game_state(&self) {
        self.storage.remove(self.keys.game_state());
    }

    /// Saved game, or `None` if there is no game in progress
    pub fn get_game_state<T: DeserializeOwned>(&self) -> Result<Option<T>, StateError> {
        match self.storage.get(self.keys.game_state()) {
            Some(json) if !json.is_empty() => serde_json::from_str(&json)
                .map(Some)
                .map_err(StateError::Deserialize),
            _ => Ok(None),
        }
    }

    pub fn set_game_state<T: Serialize + ?Sized>(&self, state: &T) -> Result<(), StateError> {
        let json = serde_json::to_string(state).map_err(StateError::Serialize)?;
        self.storage.set(self.keys.game_state(), json);
        Ok(())
    }

    /// Wipe the whole store and reset the server-side best score to 0.
    ///
    /// The user id is read before the wipe. Without one the server reset is
    /// skipped. Never fails.
    pub async fn clear_storage(&self) {
        let user_id = self.user_id();
        self.storage.clear();

        match user_id {
            Some(user_id) => self.push_best_score(&user_id, 0).await,
            None => log::debug!("No user id, server best score not reset"),
        }
    }

    /// The session user id lives in the durable store even when this
    /// manager writes to the in-memory fallback.
    fn user_id(&self) -> Option<String> {
        self.storage
            .get_from_host(self.keys.user_id())
            .filter(|id| !id.is_empty())
    }

    async fn push_best_score(&self, user_id: &str, score: u64) {
        match self.sync.put_best_score(user_id, score).await {
            Ok(reply) => log::info!("Best score updated on server: {}", reply.best_score),
            Err(e) => log::error!("Failed to update best score on server: {e}"),
        }
    }
}
