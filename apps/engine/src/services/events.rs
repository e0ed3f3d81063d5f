//! Session event fan-out to the shell.
//!
//! The engine pushes every observable effect through one unbounded channel;
//! the shell (UI, tests) drains it. A dropped receiver is not an error: the
//! engine keeps running and the events are discarded.

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::domain::cards::{CardId, Orientation};
use crate::domain::interpretation::DisplaySegment;
use crate::domain::session::Phase;
use crate::services::rate_limit::RateLimitState;

#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    PhaseChanged { phase: Phase },
    /// One rotating ambient line while the session idles in Monologue.
    MonologueLine { text: String },
    AssistantReply { text: String },
    /// A send was refused because the daily limit is exhausted.
    SendDenied { state: Option<RateLimitState> },
    SelectionChanged { selected: usize },
    /// A fourth card was toggled while the selection was full.
    SelectionRejected { card_id: CardId },
    CardRevealed { card_id: CardId, index: usize, orientation: Orientation },
    /// One paced unit of reading text is ready for display.
    SegmentReady { segment: DisplaySegment },
    /// The structured reading is available (service or local fallback).
    ReadingReady,
    SessionClosed,
}

/// Cloneable sending half handed to every service.
#[derive(Clone)]
pub struct EventSink {
    tx: UnboundedSender<SessionEvent>,
}

impl EventSink {
    pub fn channel() -> (EventSink, UnboundedReceiver<SessionEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (EventSink { tx }, rx)
    }

    pub fn emit(&self, event: SessionEvent) {
        // Receiver gone means the shell detached; nothing to do.
        let _ = self.tx.send(event);
    }
}
