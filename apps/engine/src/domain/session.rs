//! Session container and phase progression rules.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::domain::cards::{CardId, SelectedCard};
use crate::domain::interpretation::Interpretation;
use crate::domain::selection::SelectionState;
use crate::errors::domain::{DomainError, ValidationKind};

/// Session progression phases.
///
/// Progression is strictly forward; the only backward edge is a full reset
/// to `Monologue` on close.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Phase {
    /// Ambient rotating monologue before the user engages.
    Monologue,
    /// Turn-based guided conversation with the reader.
    Conversation,
    /// Picking 3 of the 9 dealt cards.
    Selection,
    /// Sequential face-up reveal of the confirmed cards.
    Reveal,
    /// Paced display of the reading; terminal until close/reset.
    Interpretation,
}

impl Phase {
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Monologue => "monologue",
            Phase::Conversation => "conversation",
            Phase::Selection => "selection",
            Phase::Reveal => "reveal",
            Phase::Interpretation => "interpretation",
        }
    }
}

/// Check a phase edge.
///
/// Allowed edges are the four forward steps plus reset-to-`Monologue` from
/// anywhere. Everything else is a phase mismatch.
pub fn validate_transition(from: Phase, to: Phase) -> Result<(), DomainError> {
    let allowed = matches!(
        (from, to),
        (Phase::Monologue, Phase::Conversation)
            | (Phase::Conversation, Phase::Selection)
            | (Phase::Selection, Phase::Reveal)
            | (Phase::Reveal, Phase::Interpretation)
            | (_, Phase::Monologue)
    );
    if allowed {
        Ok(())
    } else {
        Err(DomainError::validation(
            ValidationKind::PhaseMismatch,
            format!("Cannot move from {} to {}", from.as_str(), to.as_str()),
        ))
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
}

/// One conversation turn entry. Append-only within a phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Entire per-session state, owned exclusively by the session engine and
/// mutated only through its transition methods.
#[derive(Debug, Clone)]
pub struct Session {
    pub id: Uuid,
    /// Base seed; dealing and orientation streams are derived from it.
    pub seed: u64,
    pub phase: Phase,
    pub history: Vec<Message>,
    /// Rolling summary captured from the chat service.
    pub summary: String,
    /// The user's original question (their first message).
    pub question: String,
    pub turn_count: u32,
    pub started_at: OffsetDateTime,
    /// Set when the assistant reply carried the readiness marker. Never
    /// advances the phase by itself; the user must confirm explicitly.
    pub ready_for_selection: bool,
    pub selection: SelectionState,
    /// Confirmed cards with fixed positions, in selection order.
    pub confirmed: Vec<SelectedCard>,
    /// Revealed card ids; grows one at a time in selection order.
    pub revealed: Vec<CardId>,
    reveal_started: bool,
    reading_requested: bool,
    pub reading: Option<Interpretation>,
}

impl Session {
    pub fn new(seed: u64) -> Self {
        Self {
            id: Uuid::new_v4(),
            seed,
            phase: Phase::Monologue,
            history: Vec::new(),
            summary: String::new(),
            question: String::new(),
            turn_count: 0,
            started_at: OffsetDateTime::now_utc(),
            ready_for_selection: false,
            selection: SelectionState::empty(),
            confirmed: Vec::new(),
            revealed: Vec::new(),
            reveal_started: false,
            reading_requested: false,
            reading: None,
        }
    }

    /// One-shot latch for starting the reveal chain. Returns `true` exactly
    /// once per session.
    pub fn try_latch_reveal(&mut self) -> bool {
        if self.reveal_started {
            return false;
        }
        self.reveal_started = true;
        true
    }

    /// One-shot latch for the interpretation request. The reveal chain may
    /// be re-evaluated; this guarantees a single hand-off per session.
    pub fn try_latch_reading(&mut self) -> bool {
        if self.reading_requested {
            return false;
        }
        self.reading_requested = true;
        true
    }

    pub fn reading_requested(&self) -> bool {
        self.reading_requested
    }

    /// Destroy all per-session fields and start over in `Monologue`.
    pub fn reset(&mut self, next_seed: u64) {
        *self = Session::new(next_seed);
    }
}
