//! Turn-based conversation with the external chat service.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::adapters::chat_api::{ChatApi, ChatTurnRequest, SessionContext};
use crate::domain::readiness::strip_readiness_marker;
use crate::domain::session::{validate_transition, Message, Phase};
use crate::error::AppError;
use crate::errors::domain::{DomainError, ValidationKind};
use crate::services::events::{EventSink, SessionEvent};
use crate::services::rate_limit::{DenialReason, RateLimitDecision, RateLimiter};
use crate::services::SharedSession;

/// Action id presented to the rate limiter for one chat turn.
pub const CHAT_TURN_ACTION: &str = "fortune_chat_turn";

/// Fixed local reply substituted when the chat service fails. The user may
/// simply resend; the failed turn consumes no allowance.
pub const FALLBACK_REPLY: &str =
    "The connection to the cards wavers for a moment. Ask me again in a little while.";

pub struct ConversationService {
    session: SharedSession,
    chat: Arc<dyn ChatApi>,
    limiter: Arc<dyn RateLimiter>,
    events: EventSink,
    busy: AtomicBool,
}

impl ConversationService {
    pub fn new(
        session: SharedSession,
        chat: Arc<dyn ChatApi>,
        limiter: Arc<dyn RateLimiter>,
        events: EventSink,
    ) -> Self {
        Self {
            session,
            chat,
            limiter,
            events,
            busy: AtomicBool::new(false),
        }
    }

    /// Whether a send is currently in flight. The shell disables input
    /// while this is set.
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    /// Send one user message through the guided conversation.
    ///
    /// The first message moves the session from Monologue into
    /// Conversation. Exactly one external call is made per invocation; the
    /// limiter is consulted before any mutation and incremented only after
    /// a confirmed successful reply. Service failures degrade to
    /// [`FALLBACK_REPLY`] and are not reported as errors.
    pub async fn send_message(&self, text: &str) -> Result<(), AppError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Ok(());
        }

        // At most one send in flight; a re-entrant call is dropped.
        if self
            .busy
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            debug!("send ignored, another turn is in flight");
            return Ok(());
        }
        let _busy = BusyReset(&self.busy);

        // Check-then-act stays on this side of the await boundary.
        match self.limiter.check(CHAT_TURN_ACTION) {
            RateLimitDecision::Allowed => {}
            RateLimitDecision::Denied {
                reason: DenialReason::Loading,
                ..
            } => {
                // Already reported upstream while limit data loads.
                debug!("limit data still loading, send dropped");
                return Ok(());
            }
            RateLimitDecision::Denied {
                reason: DenialReason::LimitReached,
                state,
            } => {
                info!("chat turn denied, daily limit reached");
                self.events.emit(SessionEvent::SendDenied { state });
                return Err(AppError::rate_limited("Daily turn limit reached"));
            }
        }

        let request = {
            let mut session = self.session.lock();
            match session.phase {
                Phase::Monologue => {
                    validate_transition(Phase::Monologue, Phase::Conversation)?;
                    session.phase = Phase::Conversation;
                    debug!(session_id = %session.id, "Transition: -> Conversation");
                    self.events.emit(SessionEvent::PhaseChanged {
                        phase: Phase::Conversation,
                    });
                }
                Phase::Conversation => {}
                other => {
                    return Err(DomainError::validation(
                        ValidationKind::PhaseMismatch,
                        format!("Cannot send a chat message during {}", other.as_str()),
                    )
                    .into());
                }
            }

            if session.question.is_empty() {
                session.question = trimmed.to_string();
            }
            // Optimistic append; a failed turn keeps the user message.
            session.history.push(Message::user(trimmed));
            session.turn_count += 1;

            ChatTurnRequest {
                history: session.history.clone(),
                new_message: trimmed.to_string(),
                session_context: SessionContext {
                    session_id: session.id,
                    turn_count: session.turn_count,
                },
            }
        };

        // External call with no lock held.
        match self.chat.send_turn(request).await {
            Ok(reply) => {
                let (display, ready) = strip_readiness_marker(&reply.reply_text);
                {
                    let mut session = self.session.lock();
                    // The session may have been reset while we awaited.
                    if session.phase != Phase::Conversation {
                        return Ok(());
                    }
                    session.history.push(Message::assistant(display.clone()));
                    if ready {
                        session.ready_for_selection = true;
                        info!(session_id = %session.id, "conversation signalled readiness");
                    }
                    if let Some(summary) = reply.summary {
                        session.summary = summary;
                    }
                }
                // One consumed turn, strictly after the confirmed success.
                self.limiter.increment();
                self.events.emit(SessionEvent::AssistantReply { text: display });
            }
            Err(err) => {
                warn!(error = %err, "chat turn failed, substituting fallback reply");
                let reply_fallback = {
                    let mut session = self.session.lock();
                    if session.phase == Phase::Conversation {
                        session.history.push(Message::assistant(FALLBACK_REPLY));
                        true
                    } else {
                        false
                    }
                };
                if reply_fallback {
                    self.events.emit(SessionEvent::AssistantReply {
                        text: FALLBACK_REPLY.to_string(),
                    });
                }
            }
        }

        Ok(())
    }
}

struct BusyReset<'a>(&'a AtomicBool);

impl Drop for BusyReset<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}
