//! Error types
//!
//! Only [`StateError`] is ever returned from the public facade operations.
//! Storage and sync failures are logged and swallowed at the layer that
//! sees them.

use thiserror::Error;

/// Failure reported by a host key-value store.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The host store rejected the operation (disabled, quota, privacy mode).
    #[error("host storage error: {0}")]
    Host(String),
    /// Reading or writing the backing file failed.
    #[error("storage file I/O failed")]
    Io(#[from] std::io::Error),
    /// The backing file does not hold a JSON string map.
    #[error("storage file is corrupt")]
    Corrupt(#[source] serde_json::Error),
}

/// Failure while pushing the best score to the server.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The request never produced a response.
    #[error("request to `{url}` failed")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    /// The server answered with a non-success status.
    #[error("server responded {status} for `{url}`")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },
    /// The success body could not be decoded.
    #[error("failed to decode response from `{url}`")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Failure converting game state to or from its stored JSON text.
#[derive(Debug, Error)]
pub enum StateError {
    /// The value cannot be represented as JSON.
    #[error("failed to serialize game state")]
    Serialize(#[source] serde_json::Error),
    /// The stored text is not valid JSON for the requested type.
    #[error("failed to deserialize stored game state")]
    Deserialize(#[source] serde_json::Error),
}

/// Invalid storage configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Two well-known keys share the same name.
    #[error("storage key `{0}` is used for more than one value")]
    KeyCollision(String),
    /// A key name is empty.
    #[error("storage key for {0} is empty")]
    EmptyKey(&'static str),
}
