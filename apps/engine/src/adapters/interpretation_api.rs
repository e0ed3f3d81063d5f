//! Interpretation service port and HTTP adapter.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::adapters::ApiError;
use crate::domain::cards::SelectedCard;
use crate::domain::interpretation::Interpretation;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadingRequest {
    /// The three confirmed, oriented cards in spread order.
    pub selected_cards: Vec<SelectedCard>,
    pub summary: String,
    pub question: String,
}

#[async_trait]
pub trait InterpretationApi: Send + Sync {
    async fn request_reading(&self, request: ReadingRequest) -> Result<Interpretation, ApiError>;
}

/// Reqwest-backed implementation of [`InterpretationApi`].
#[derive(Debug, Clone)]
pub struct HttpInterpretationApi {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl HttpInterpretationApi {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl InterpretationApi for HttpInterpretationApi {
    async fn request_reading(&self, request: ReadingRequest) -> Result<Interpretation, ApiError> {
        let reading = self
            .client
            .post(format!("{}/readings/interpret", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json::<Interpretation>()
            .await?;
        Ok(reading)
    }
}
