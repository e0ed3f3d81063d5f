//! Interpretation orchestration: request, fallback, persistence, paced
//! display, and the close-time gift dispatch.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use time::OffsetDateTime;
use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::adapters::gift_api::{GiftApi, GiftRequest};
use crate::adapters::interpretation_api::{InterpretationApi, ReadingRequest};
use crate::adapters::reading_store::{ReadingRecord, ReadingStore};
use crate::config::Timings;
use crate::domain::interpretation::{fallback_reading, Interpretation};
use crate::domain::selection::SELECTION_SIZE;
use crate::domain::session::Phase;
use crate::services::events::{EventSink, SessionEvent};
use crate::services::scheduler::TaskScheduler;
use crate::services::SharedSession;

pub struct InterpretationOrchestrator {
    session: SharedSession,
    api: Arc<dyn InterpretationApi>,
    store: Arc<dyn ReadingStore>,
    gift: Arc<dyn GiftApi>,
    scheduler: Arc<TaskScheduler>,
    events: EventSink,
    timings: Timings,
    in_flight: AtomicBool,
}

impl InterpretationOrchestrator {
    pub fn new(
        session: SharedSession,
        api: Arc<dyn InterpretationApi>,
        store: Arc<dyn ReadingStore>,
        gift: Arc<dyn GiftApi>,
        scheduler: Arc<TaskScheduler>,
        events: EventSink,
        timings: Timings,
    ) -> Self {
        Self {
            session,
            api,
            store,
            gift,
            scheduler,
            events,
            timings,
            in_flight: AtomicBool::new(false),
        }
    }

    /// Whether the reading request (including its persistence follow-up) is
    /// currently in flight. Consulted by the close guard.
    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Run the interpretation stage end to end.
    ///
    /// Invoked exactly once per session by the reveal sequencer. Never
    /// fails: a service error degrades to the deterministic local reading,
    /// and the persistence call is best-effort.
    pub async fn run(&self) {
        let (cards, summary, question, turn_count, started_at) = {
            let session = self.session.lock();
            (
                session.confirmed.clone(),
                session.summary.clone(),
                session.question.clone(),
                session.turn_count,
                session.started_at,
            )
        };
        if cards.len() != SELECTION_SIZE {
            warn!(
                confirmed = cards.len(),
                "interpretation requested without a full confirmed selection"
            );
            return;
        }

        self.in_flight.store(true, Ordering::SeqCst);
        let _flight = FlightReset(&self.in_flight);

        let request = ReadingRequest {
            selected_cards: cards.clone(),
            summary: summary.clone(),
            question,
        };
        let reading = match self.api.request_reading(request).await {
            Ok(reading) => reading,
            Err(err) => {
                warn!(error = %err, "interpretation service failed, using local reading");
                fallback_reading(&cards)
            }
        };

        {
            let mut session = self.session.lock();
            // The session may have closed while we awaited; a stale result
            // must not resurrect it.
            if session.phase != Phase::Interpretation {
                debug!("discarding reading for a torn-down session");
                return;
            }
            session.reading = Some(reading.clone());
        }
        self.events.emit(SessionEvent::ReadingReady);

        let duration_seconds = (OffsetDateTime::now_utc() - started_at).whole_seconds();
        let record = ReadingRecord {
            selected_cards: cards,
            summary,
            interpretation_summary: reading.summary.clone(),
            turn_count,
            duration_seconds,
        };
        if let Err(err) = self.store.record_reading(record).await {
            // Logged only; persistence never affects the visible flow.
            warn!(error = %err, "reading persistence failed");
        }

        self.sequence_display(&reading);
    }

    /// Pace the reading onto the display queue, one segment per
    /// `segment_delay`, in the fixed script order. Independent cancellable
    /// chain: close clears it with the rest of the session's timers.
    pub fn sequence_display(&self, reading: &Interpretation) {
        let segments = reading.segments();
        let session = self.session.clone();
        let events = self.events.clone();
        let delay = self.timings.segment_delay;

        self.scheduler.spawn(move |token| async move {
            for segment in segments {
                tokio::select! {
                    _ = token.cancelled() => return,
                    _ = sleep(delay) => {}
                }
                {
                    let session = session.lock();
                    if session.phase != Phase::Interpretation {
                        return;
                    }
                }
                events.emit(SessionEvent::SegmentReady { segment });
            }
        });
    }

    /// Fire-and-forget gift generation from the final reading.
    ///
    /// Called on close. Deliberately spawned untracked so cancelling the
    /// session's timers does not kill it; failure is logged and swallowed.
    pub fn dispatch_gift(&self) {
        let (reading, summary) = {
            let session = self.session.lock();
            (session.reading.clone(), session.summary.clone())
        };
        let Some(interpretation) = reading else {
            debug!("no reading captured, skipping gift generation");
            return;
        };

        let gift = self.gift.clone();
        tokio::spawn(async move {
            if let Err(err) = gift
                .generate_gift(GiftRequest {
                    summary,
                    interpretation,
                })
                .await
            {
                warn!(error = %err, "gift generation failed");
            } else {
                info!("gift generated for closed session");
            }
        });
    }
}

struct FlightReset<'a>(&'a AtomicBool);

impl Drop for FlightReset<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}
