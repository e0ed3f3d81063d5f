//! Daily turn rate limiting.
//!
//! The limiter is a collaborator: the conversation service reads it with
//! `check` before sending and writes it with `increment` strictly after a
//! confirmed successful reply, never speculatively. `check` is synchronous
//! so the check-then-act sequence can never be split across an await point.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};
use tracing::debug;

/// Subscription tier; determines the daily turn allowance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Free,
    Plus,
    Unlimited,
}

impl Tier {
    pub fn daily_limit(self) -> u32 {
        match self {
            Tier::Free => 10,
            Tier::Plus => 50,
            Tier::Unlimited => u32::MAX,
        }
    }
}

/// Snapshot of the limiter state, shared with denial events so the shell
/// can render limit UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitState {
    pub daily_count: u32,
    pub daily_limit: u32,
    pub tier: Tier,
    pub is_onboarding: bool,
}

/// Why a check was denied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenialReason {
    /// Limit data is still being fetched upstream; deny silently.
    Loading,
    /// The daily allowance is exhausted; deny with a visible block.
    LimitReached,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RateLimitDecision {
    Allowed,
    Denied {
        reason: DenialReason,
        state: Option<RateLimitState>,
    },
}

impl RateLimitDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, RateLimitDecision::Allowed)
    }
}

/// Rate limiter collaborator interface.
pub trait RateLimiter: Send + Sync {
    /// Consult the limiter before an action. Must not mutate the counter.
    fn check(&self, action_id: &str) -> RateLimitDecision;

    /// Record one consumed turn. Called only after a confirmed success.
    fn increment(&self);
}

struct DailyWindow {
    day: Date,
    count: u32,
    tier: Tier,
    is_onboarding: bool,
}

/// In-memory tier-aware daily limiter with UTC day rollover.
pub struct DailyRateLimiter {
    window: Mutex<DailyWindow>,
}

impl DailyRateLimiter {
    pub fn new(tier: Tier, is_onboarding: bool) -> Self {
        Self {
            window: Mutex::new(DailyWindow {
                day: OffsetDateTime::now_utc().date(),
                count: 0,
                tier,
                is_onboarding,
            }),
        }
    }

    pub fn state(&self) -> RateLimitState {
        let window = self.window.lock();
        RateLimitState {
            daily_count: window.count,
            daily_limit: window.tier.daily_limit(),
            tier: window.tier,
            is_onboarding: window.is_onboarding,
        }
    }

    fn roll_over(window: &mut DailyWindow) {
        let today = OffsetDateTime::now_utc().date();
        if window.day != today {
            window.day = today;
            window.count = 0;
        }
    }
}

impl RateLimiter for DailyRateLimiter {
    fn check(&self, action_id: &str) -> RateLimitDecision {
        let mut window = self.window.lock();
        Self::roll_over(&mut window);

        // Onboarding turns are free regardless of tier.
        if window.is_onboarding {
            return RateLimitDecision::Allowed;
        }

        if window.count >= window.tier.daily_limit() {
            debug!(action_id, count = window.count, "daily limit reached");
            return RateLimitDecision::Denied {
                reason: DenialReason::LimitReached,
                state: Some(RateLimitState {
                    daily_count: window.count,
                    daily_limit: window.tier.daily_limit(),
                    tier: window.tier,
                    is_onboarding: window.is_onboarding,
                }),
            };
        }
        RateLimitDecision::Allowed
    }

    fn increment(&self) {
        let mut window = self.window.lock();
        Self::roll_over(&mut window);
        window.count = window.count.saturating_add(1);
    }
}
