//! Environment-driven engine configuration.
//!
//! Service endpoints and pacing delays come from `ARCANA_*` variables.
//! Delays have production defaults and are injectable so tests can run the
//! timer chains at near-zero pace.

use std::env;
use std::time::Duration;

use crate::error::AppError;

/// Pacing of the engine's three timer chains.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timings {
    /// Gap between ambient monologue lines.
    pub monologue_gap: Duration,
    /// Gap between sequential card reveals.
    pub reveal_gap: Duration,
    /// Settle delay after the third reveal before interpretation starts.
    pub settle_delay: Duration,
    /// "Thinking" pause before each reading segment is displayed.
    pub segment_delay: Duration,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            monologue_gap: Duration::from_secs(6),
            reveal_gap: Duration::from_millis(800),
            settle_delay: Duration::from_millis(600),
            segment_delay: Duration::from_millis(1200),
        }
    }
}

#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Base URL of the chat turn service.
    pub chat_url: String,
    /// Base URL of the interpretation service.
    pub interpretation_url: String,
    /// Base URL of the reading persistence service.
    pub reading_store_url: String,
    /// Base URL of the gift generation service.
    pub gift_url: String,
    pub api_key: String,
    pub timings: Timings,
}

impl EngineConfig {
    /// Load configuration from the environment.
    ///
    /// `ARCANA_API_BASE_URL` seeds all four service URLs; each can be
    /// overridden individually. Delay overrides are milliseconds.
    pub fn from_env() -> Result<Self, AppError> {
        let base = require_var("ARCANA_API_BASE_URL")?;
        let api_key = require_var("ARCANA_API_KEY")?;

        let timings = Timings {
            monologue_gap: duration_var("ARCANA_MONOLOGUE_GAP_MS", Timings::default().monologue_gap)?,
            reveal_gap: duration_var("ARCANA_REVEAL_GAP_MS", Timings::default().reveal_gap)?,
            settle_delay: duration_var("ARCANA_SETTLE_DELAY_MS", Timings::default().settle_delay)?,
            segment_delay: duration_var("ARCANA_SEGMENT_DELAY_MS", Timings::default().segment_delay)?,
        };

        Ok(Self {
            chat_url: optional_var("ARCANA_CHAT_URL").unwrap_or_else(|| base.clone()),
            interpretation_url: optional_var("ARCANA_INTERPRETATION_URL")
                .unwrap_or_else(|| base.clone()),
            reading_store_url: optional_var("ARCANA_READING_STORE_URL")
                .unwrap_or_else(|| base.clone()),
            gift_url: optional_var("ARCANA_GIFT_URL").unwrap_or_else(|| base.clone()),
            api_key,
            timings,
        })
    }
}

fn require_var(name: &'static str) -> Result<String, AppError> {
    let value = env::var(name)
        .map_err(|_| AppError::config(format!("{name} must be set")))?;
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::config(format!("{name} must not be empty")));
    }
    Ok(trimmed.to_string())
}

fn optional_var(name: &'static str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn duration_var(name: &'static str, default: Duration) -> Result<Duration, AppError> {
    match optional_var(name) {
        None => Ok(default),
        Some(raw) => raw
            .parse::<u64>()
            .map(Duration::from_millis)
            .map_err(|_| AppError::config(format!("{name} must be an integer millisecond value"))),
    }
}
