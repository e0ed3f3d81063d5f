#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod adapters;
pub mod config;
pub mod domain;
pub mod error;
pub mod errors;
pub mod services;

#[cfg(test)]
pub mod test_bootstrap;

// Re-exports for public API
pub use config::{EngineConfig, Timings};
pub use domain::cards::{Card, CardId, Orientation, SelectedCard, SpreadPosition};
pub use domain::interpretation::{DisplaySegment, Interpretation, SegmentKind};
pub use domain::session::{Message, Phase, Role, Session};
pub use error::AppError;
pub use services::events::SessionEvent;
pub use services::rate_limit::{
    DailyRateLimiter, DenialReason, RateLimitDecision, RateLimitState, RateLimiter, Tier,
};
pub use services::session_flow::{CloseOutcome, EnginePorts, SessionEngine};

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    test_bootstrap::logging::init();
}
