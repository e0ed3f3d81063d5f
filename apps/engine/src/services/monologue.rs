//! Ambient monologue rotation while the session idles.

use std::time::Duration;

use tokio::time::sleep;

use crate::domain::session::Phase;
use crate::services::events::{EventSink, SessionEvent};
use crate::services::scheduler::TaskScheduler;
use crate::services::SharedSession;

/// Lines the reader murmurs before the user engages, rotated in order.
pub const MONOLOGUE_LINES: [&str; 6] = [
    "The cards are restless tonight...",
    "Every shuffle remembers the hands before yours.",
    "Ask when you are ready. The deck does not hurry.",
    "Past, present, future. Three doors, one corridor.",
    "Some answers arrive reversed. They are still answers.",
    "The lamp is lit. Sit, if you like.",
];

/// Start the rotation chain. Each tick re-checks the phase under the
/// session lock and the chain ends itself once the session leaves
/// Monologue, so a stale tick can never touch a later phase.
pub fn start_rotation(
    scheduler: &TaskScheduler,
    session: SharedSession,
    events: EventSink,
    gap: Duration,
) {
    scheduler.spawn(move |token| async move {
        let mut index = 0usize;
        loop {
            tokio::select! {
                _ = token.cancelled() => return,
                _ = sleep(gap) => {}
            }
            {
                let session = session.lock();
                if session.phase != Phase::Monologue {
                    return;
                }
            }
            events.emit(SessionEvent::MonologueLine {
                text: MONOLOGUE_LINES[index % MONOLOGUE_LINES.len()].to_string(),
            });
            index += 1;
        }
    });
}
