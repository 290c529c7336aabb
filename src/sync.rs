//! Best score server sync
//!
//! One endpoint: `PUT {base}/api/bestScore/{user_id}` with `{"score": n}`.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::SyncError;

/// Request body for the best score endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetBestScoreRequest {
    pub score: u64,
}

/// Success body from the best score endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetBestScoreResponse {
    #[serde(default)]
    pub status: String,
    /// Score the server now holds for the user
    pub best_score: u64,
}

/// Pushes a user's best score to the server
#[async_trait(?Send)]
pub trait ScoreSync {
    async fn put_best_score(
        &self,
        user_id: &str,
        score: u64,
    ) -> Result<SetBestScoreResponse, SyncError>;
}

#[async_trait(?Send)]
impl<T: ScoreSync + ?Sized> ScoreSync for &T {
    async fn put_best_score(
        &self,
        user_id: &str,
        score: u64,
    ) -> Result<SetBestScoreResponse, SyncError> {
        (**self).put_best_score(user_id, score).await
    }
}

/// [`ScoreSync`] over HTTP (fetch on wasm32)
#[derive(Debug, Clone)]
pub struct HttpScoreSync {
    client: Client,
    base_url: String,
}

impl HttpScoreSync {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn endpoint(&self, user_id: &str) -> String {
        format!("{}/api/bestScore/{}", self.base_url, user_id)
    }
}

#[async_trait(?Send)]
impl ScoreSync for HttpScoreSync {
    async fn put_best_score(
        &self,
        user_id: &str,
        score: u64,
    ) -> Result<SetBestScoreResponse, SyncError> {
        let url = self.endpoint(user_id);
        let response = self
            .client
            .put(&url)
            .json(&SetBestScoreRequest { score })
            .send()
            .await
            .map_err(|source| SyncError::Transport {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(SyncError::Status { url, status });
        }

        response
            .json::<SetBestScoreResponse>()
            .await
            .map_err(|source| SyncError::Decode { url, source })
    }
}
