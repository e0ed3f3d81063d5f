//! Ports and HTTP adapters for the engine's external collaborators.
//!
//! Each collaborator is a small `async_trait` port plus a reqwest-backed
//! JSON implementation. The engine only ever sees the traits; tests script
//! them with local fakes.

pub mod chat_api;
pub mod gift_api;
pub mod interpretation_api;
pub mod reading_store;

use std::fmt;

/// Error raised by an external service adapter.
///
/// Never escapes the engine: every call site converts failures into a typed
/// denial or a local fallback per the degradation policy.
#[derive(Debug)]
pub enum ApiError {
    /// Transport-level failure (connect, timeout, TLS, ...).
    Transport(String),
    /// The service answered with a non-success status.
    Status(u16),
    /// The response body could not be decoded.
    Decode(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Transport(msg) => write!(f, "transport error: {msg}"),
            ApiError::Status(code) => write!(f, "service returned status {code}"),
            ApiError::Decode(msg) => write!(f, "decode error: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            ApiError::Status(status.as_u16())
        } else if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}
