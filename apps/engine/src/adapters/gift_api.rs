//! Gift generation port and HTTP adapter.
//!
//! Fired once, detached, when a session closes. Errors are logged and
//! swallowed; the call must never block or delay the close.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::adapters::ApiError;
use crate::domain::interpretation::Interpretation;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GiftRequest {
    pub summary: String,
    pub interpretation: Interpretation,
}

#[async_trait]
pub trait GiftApi: Send + Sync {
    async fn generate_gift(&self, request: GiftRequest) -> Result<(), ApiError>;
}

/// Reqwest-backed implementation of [`GiftApi`].
#[derive(Debug, Clone)]
pub struct HttpGiftApi {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl HttpGiftApi {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl GiftApi for HttpGiftApi {
    async fn generate_gift(&self, request: GiftRequest) -> Result<(), ApiError> {
        self.client
            .post(format!("{}/gifts", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}
