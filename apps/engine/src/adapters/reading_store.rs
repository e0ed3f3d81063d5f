//! Reading persistence port and HTTP adapter.
//!
//! Best-effort from the engine's perspective: failures are logged by the
//! caller and never surface to the user.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::adapters::ApiError;
use crate::domain::cards::SelectedCard;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadingRecord {
    pub selected_cards: Vec<SelectedCard>,
    pub summary: String,
    pub interpretation_summary: String,
    pub turn_count: u32,
    pub duration_seconds: i64,
}

#[async_trait]
pub trait ReadingStore: Send + Sync {
    async fn record_reading(&self, record: ReadingRecord) -> Result<(), ApiError>;
}

/// Reqwest-backed implementation of [`ReadingStore`].
#[derive(Debug, Clone)]
pub struct HttpReadingStore {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl HttpReadingStore {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl ReadingStore for HttpReadingStore {
    async fn record_reading(&self, record: ReadingRecord) -> Result<(), ApiError> {
        self.client
            .post(format!("{}/readings", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&record)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}
