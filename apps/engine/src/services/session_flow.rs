//! Top-level session orchestration: phase transitions, close guards, and
//! session teardown.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{debug, info};

use crate::adapters::chat_api::ChatApi;
use crate::adapters::gift_api::GiftApi;
use crate::adapters::interpretation_api::InterpretationApi;
use crate::adapters::reading_store::ReadingStore;
use crate::config::Timings;
use crate::domain::cards::CardId;
use crate::domain::dealing::deal_spread;
use crate::domain::deck::full_deck;
use crate::domain::seed_derivation::{
    derive_dealing_seed, derive_next_session_seed, derive_orientation_seed,
};
use crate::domain::selection::{SelectionState, ToggleOutcome};
use crate::domain::session::{validate_transition, Phase, Session};
use crate::error::AppError;
use crate::errors::domain::{DomainError, ValidationKind};
use crate::services::conversation::ConversationService;
use crate::services::events::{EventSink, SessionEvent};
use crate::services::interpretation::InterpretationOrchestrator;
use crate::services::monologue;
use crate::services::rate_limit::RateLimiter;
use crate::services::reveal::RevealSequencer;
use crate::services::scheduler::TaskScheduler;
use crate::services::SharedSession;

/// A shell-registered predicate; returns the blocking reason while some
/// higher-priority overlay (tooltip, upgrade sheet, ...) is open.
pub type CloseBlocker = Box<dyn Fn() -> Option<&'static str> + Send + Sync>;

/// Result of a close request. A blocked close is handled, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseOutcome {
    Closed,
    Blocked { reason: &'static str },
}

/// External collaborator bundle for [`SessionEngine::new`].
pub struct EnginePorts {
    pub chat: Arc<dyn ChatApi>,
    pub interpretation: Arc<dyn InterpretationApi>,
    pub reading_store: Arc<dyn ReadingStore>,
    pub gift: Arc<dyn GiftApi>,
    pub limiter: Arc<dyn RateLimiter>,
}

/// The session engine: owns the [`Session`], composes every service, and
/// is the only writer of the phase field.
pub struct SessionEngine {
    session: SharedSession,
    conversation: ConversationService,
    reveal: RevealSequencer,
    orchestrator: Arc<InterpretationOrchestrator>,
    scheduler: Arc<TaskScheduler>,
    events: EventSink,
    timings: Timings,
    blockers: Mutex<Vec<CloseBlocker>>,
}

impl SessionEngine {
    pub fn new(
        ports: EnginePorts,
        timings: Timings,
        seed: u64,
    ) -> (Self, UnboundedReceiver<SessionEvent>) {
        let (events, receiver) = EventSink::channel();
        let session: SharedSession = Arc::new(Mutex::new(Session::new(seed)));
        let scheduler = Arc::new(TaskScheduler::new());

        let orchestrator = Arc::new(InterpretationOrchestrator::new(
            session.clone(),
            ports.interpretation,
            ports.reading_store,
            ports.gift,
            scheduler.clone(),
            events.clone(),
            timings,
        ));
        let conversation =
            ConversationService::new(session.clone(), ports.chat, ports.limiter, events.clone());
        let reveal = RevealSequencer::new(
            session.clone(),
            scheduler.clone(),
            events.clone(),
            timings,
            orchestrator.clone(),
        );

        let engine = Self {
            session,
            conversation,
            reveal,
            orchestrator,
            scheduler,
            events,
            timings,
            blockers: Mutex::new(Vec::new()),
        };
        (engine, receiver)
    }

    /// Open the session: starts the ambient monologue rotation.
    pub fn open(&self) {
        {
            let session = self.session.lock();
            info!(session_id = %session.id, "session opened");
        }
        monologue::start_rotation(
            &self.scheduler,
            self.session.clone(),
            self.events.clone(),
            self.timings.monologue_gap,
        );
    }

    pub fn phase(&self) -> Phase {
        self.session.lock().phase
    }

    /// Whether a chat send is in flight; the shell disables input on this.
    pub fn is_busy(&self) -> bool {
        self.conversation.is_busy()
    }

    /// Read-only access to the session for shells and tests.
    pub fn with_session<R>(&self, f: impl FnOnce(&Session) -> R) -> R {
        f(&self.session.lock())
    }

    /// Send one user message; see [`ConversationService::send_message`].
    pub async fn send_message(&self, text: &str) -> Result<(), AppError> {
        self.conversation.send_message(text).await
    }

    /// Explicit user confirmation to move from conversation to card
    /// selection. Requires the readiness flag; readiness alone never
    /// advances the phase. Clears the chat history (summary and turn count
    /// survive) and deals the 9-card spread.
    pub fn advance_to_selection(&self) -> Result<(), AppError> {
        let mut session = self.session.lock();
        if session.phase != Phase::Conversation {
            return Err(DomainError::validation(
                ValidationKind::PhaseMismatch,
                format!(
                    "Cannot enter selection from {}",
                    session.phase.as_str()
                ),
            )
            .into());
        }
        if !session.ready_for_selection {
            return Err(DomainError::validation(
                ValidationKind::NotReady,
                "The conversation has not signalled readiness yet",
            )
            .into());
        }
        validate_transition(Phase::Conversation, Phase::Selection)?;

        let spread = deal_spread(full_deck(), derive_dealing_seed(session.seed))?;
        session.selection = SelectionState::new(spread, derive_orientation_seed(session.seed));
        session.history.clear();
        session.phase = Phase::Selection;
        debug!(session_id = %session.id, "Transition: -> Selection");
        drop(session);

        self.events.emit(SessionEvent::PhaseChanged {
            phase: Phase::Selection,
        });
        Ok(())
    }

    /// Toggle a dealt card in or out of the selection.
    pub fn toggle_card(&self, card_id: CardId) -> Result<ToggleOutcome, AppError> {
        let (outcome, selected) = {
            let mut session = self.session.lock();
            if session.phase != Phase::Selection {
                return Err(DomainError::validation(
                    ValidationKind::PhaseMismatch,
                    format!("Cannot toggle cards during {}", session.phase.as_str()),
                )
                .into());
            }
            let outcome = session.selection.toggle(card_id)?;
            (outcome, session.selection.selected().len())
        };

        match outcome {
            ToggleOutcome::Added { .. } | ToggleOutcome::Removed => {
                self.events.emit(SessionEvent::SelectionChanged { selected });
            }
            ToggleOutcome::Rejected => {
                self.events.emit(SessionEvent::SelectionRejected { card_id });
            }
        }
        Ok(outcome)
    }

    /// Confirm the full selection: fixes positions, enters Reveal, and
    /// starts the reveal chain.
    pub fn confirm_selection(&self) -> Result<(), AppError> {
        {
            let mut session = self.session.lock();
            if session.phase != Phase::Selection {
                return Err(DomainError::validation(
                    ValidationKind::PhaseMismatch,
                    format!("Cannot confirm a selection during {}", session.phase.as_str()),
                )
                .into());
            }
            let confirmed = session.selection.confirm()?;
            validate_transition(Phase::Selection, Phase::Reveal)?;
            session.confirmed = confirmed.to_vec();
            session.phase = Phase::Reveal;
            debug!(session_id = %session.id, "Transition: -> Reveal");
        }

        self.events.emit(SessionEvent::PhaseChanged {
            phase: Phase::Reveal,
        });
        self.reveal.start();
        Ok(())
    }

    /// Register a shell close blocker. Blockers are consulted in
    /// registration order; the first blocking one wins.
    pub fn register_close_blocker(
        &self,
        blocker: impl Fn() -> Option<&'static str> + Send + Sync + 'static,
    ) {
        self.blockers.lock().push(Box::new(blocker));
    }

    /// Close the session.
    ///
    /// Guard order is fixed: an in-flight reading request blocks first,
    /// then the registered shell blockers top-down. A blocked close is a
    /// handled no-op. On success every tracked timer chain is cancelled,
    /// the gift call is dispatched detached, and all session fields reset
    /// back to Monologue.
    pub fn close(&self) -> CloseOutcome {
        if self.orchestrator.is_in_flight() {
            info!("close refused, reading request in flight");
            return CloseOutcome::Blocked {
                reason: "reading_in_flight",
            };
        }
        {
            let blockers = self.blockers.lock();
            for blocker in blockers.iter() {
                if let Some(reason) = blocker() {
                    info!(reason, "close refused by shell blocker");
                    return CloseOutcome::Blocked { reason };
                }
            }
        }

        // Never blocks the close; failures are logged inside.
        self.orchestrator.dispatch_gift();
        self.scheduler.cancel_all();

        {
            let mut session = self.session.lock();
            let next_seed = derive_next_session_seed(session.seed);
            info!(
                session_id = %session.id,
                turns = session.turn_count,
                phase = session.phase.as_str(),
                "session closed"
            );
            session.reset(next_seed);
        }
        self.events.emit(SessionEvent::SessionClosed);
        CloseOutcome::Closed
    }
}
