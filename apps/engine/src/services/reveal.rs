//! Sequential timed reveal of the confirmed cards.

use std::sync::Arc;

use tokio::time::sleep;
use tracing::debug;

use crate::config::Timings;
use crate::domain::selection::SELECTION_SIZE;
use crate::domain::session::Phase;
use crate::services::events::{EventSink, SessionEvent};
use crate::services::interpretation::InterpretationOrchestrator;
use crate::services::scheduler::TaskScheduler;
use crate::services::SharedSession;

pub struct RevealSequencer {
    session: SharedSession,
    scheduler: Arc<TaskScheduler>,
    events: EventSink,
    timings: Timings,
    orchestrator: Arc<InterpretationOrchestrator>,
}

impl RevealSequencer {
    pub fn new(
        session: SharedSession,
        scheduler: Arc<TaskScheduler>,
        events: EventSink,
        timings: Timings,
        orchestrator: Arc<InterpretationOrchestrator>,
    ) -> Self {
        Self {
            session,
            scheduler,
            events,
            timings,
            orchestrator,
        }
    }

    /// Start the reveal chain.
    ///
    /// Idempotent: the session-level latch makes repeated calls (the shell
    /// may re-evaluate on every render) a no-op after the first. Cards come
    /// up in selection order, one per `reveal_gap`; after the third plus
    /// `settle_delay` the phase moves to Interpretation exactly once and
    /// the orchestrator takes over.
    pub fn start(&self) {
        {
            let mut session = self.session.lock();
            if session.phase != Phase::Reveal {
                debug!(phase = session.phase.as_str(), "reveal start ignored");
                return;
            }
            if !session.try_latch_reveal() {
                debug!("reveal chain already started");
                return;
            }
        }

        let session = self.session.clone();
        let events = self.events.clone();
        let timings = self.timings;
        let orchestrator = self.orchestrator.clone();

        self.scheduler.spawn(move |token| async move {
            for index in 0..SELECTION_SIZE {
                tokio::select! {
                    _ = token.cancelled() => return,
                    _ = sleep(timings.reveal_gap) => {}
                }

                let revealed = {
                    let mut session = session.lock();
                    if session.phase != Phase::Reveal {
                        return;
                    }
                    let Some(selected) = session.confirmed.get(index).cloned() else {
                        return;
                    };
                    session.revealed.push(selected.card.id);
                    selected
                };
                events.emit(SessionEvent::CardRevealed {
                    card_id: revealed.card.id,
                    index,
                    orientation: revealed.orientation,
                });
            }

            tokio::select! {
                _ = token.cancelled() => return,
                _ = sleep(timings.settle_delay) => {}
            }

            {
                let mut session = session.lock();
                if session.phase != Phase::Reveal {
                    return;
                }
                // Exactly one interpretation hand-off per session.
                if !session.try_latch_reading() {
                    return;
                }
                session.phase = Phase::Interpretation;
                debug!(session_id = %session.id, "Transition: -> Interpretation");
            }
            events.emit(SessionEvent::PhaseChanged {
                phase: Phase::Interpretation,
            });

            orchestrator.run().await;
        });
    }
}
