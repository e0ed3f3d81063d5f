//! Scripted fake ports and wiring helpers for engine integration tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::sync::Notify;

use engine::adapters::chat_api::{ChatApi, ChatTurnReply, ChatTurnRequest};
use engine::adapters::gift_api::{GiftApi, GiftRequest};
use engine::adapters::interpretation_api::{InterpretationApi, ReadingRequest};
use engine::adapters::reading_store::{ReadingRecord, ReadingStore};
use engine::adapters::ApiError;
use engine::domain::interpretation::{CardMeaning, Interpretation, Judgment};
use engine::{
    EnginePorts, RateLimitDecision, RateLimiter, SessionEngine, SessionEvent, SpreadPosition,
    Timings,
};

#[ctor::ctor]
fn init_logging() {
    engine_test_support::test_logging::init();
}

/// Timings short enough that paused-clock tests finish instantly.
pub fn fast_timings() -> Timings {
    Timings {
        monologue_gap: Duration::from_millis(50),
        reveal_gap: Duration::from_millis(10),
        settle_delay: Duration::from_millis(5),
        segment_delay: Duration::from_millis(5),
    }
}

pub fn sample_reading(with_judgment: bool) -> Interpretation {
    Interpretation {
        overall: "A clear arc from effort to arrival.".into(),
        card_meanings: vec![
            CardMeaning {
                card_name: "The Fool".into(),
                position: SpreadPosition::Past,
                meaning: "You started lighter than you remember.".into(),
            },
            CardMeaning {
                card_name: "Strength".into(),
                position: SpreadPosition::Present,
                meaning: "Patience is doing the heavy lifting now.".into(),
            },
            CardMeaning {
                card_name: "The Sun".into(),
                position: SpreadPosition::Future,
                meaning: "The outcome is warmer than you fear.".into(),
            },
        ],
        advice: "Keep the pace you can keep.".into(),
        judgment: with_judgment.then(|| Judgment {
            short_answer: "Yes, slowly.".into(),
        }),
        summary: "Effort steadies into a good outcome.".into(),
    }
}

/// Chat service fake fed a queue of scripted replies/failures, with an
/// optional gate so tests can overlap sends.
#[derive(Default)]
pub struct ScriptedChatApi {
    replies: Mutex<VecDeque<Result<ChatTurnReply, ApiError>>>,
    calls: AtomicUsize,
    gated: AtomicBool,
    pub started: Notify,
    pub release: Notify,
}

impl ScriptedChatApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next turn wait on `release` after signalling `started`.
    pub fn gate(&self) {
        self.gated.store(true, Ordering::SeqCst);
    }

    pub fn push_reply(&self, text: &str, summary: Option<&str>) {
        self.replies.lock().push_back(Ok(ChatTurnReply {
            reply_text: text.to_string(),
            summary: summary.map(|s| s.to_string()),
        }));
    }

    pub fn push_failure(&self) {
        self.replies
            .lock()
            .push_back(Err(ApiError::Transport("connection refused".into())));
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChatApi for ScriptedChatApi {
    async fn send_turn(&self, _request: ChatTurnRequest) -> Result<ChatTurnReply, ApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.gated.swap(false, Ordering::SeqCst) {
            self.started.notify_one();
            self.release.notified().await;
        }
        self.replies.lock().pop_front().unwrap_or_else(|| {
            Ok(ChatTurnReply {
                reply_text: "Mm. Tell me more.".into(),
                summary: None,
            })
        })
    }
}

/// Interpretation service fake: fixed result or scripted failure, with an
/// optional gate so tests can hold the request in flight.
pub struct ScriptedInterpretationApi {
    reading: Mutex<Interpretation>,
    fail: AtomicBool,
    gated: AtomicBool,
    pub started: Notify,
    pub release: Notify,
    calls: AtomicUsize,
}

impl ScriptedInterpretationApi {
    pub fn new() -> Self {
        Self {
            reading: Mutex::new(sample_reading(false)),
            fail: AtomicBool::new(false),
            gated: AtomicBool::new(false),
            started: Notify::new(),
            release: Notify::new(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn set_reading(&self, reading: Interpretation) {
        *self.reading.lock() = reading;
    }

    pub fn fail_next(&self) {
        self.fail.store(true, Ordering::SeqCst);
    }

    /// Make the next request wait on `release` after signalling `started`.
    pub fn gate(&self) {
        self.gated.store(true, Ordering::SeqCst);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl InterpretationApi for ScriptedInterpretationApi {
    async fn request_reading(&self, _request: ReadingRequest) -> Result<Interpretation, ApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.gated.swap(false, Ordering::SeqCst) {
            self.started.notify_one();
            self.release.notified().await;
        }
        if self.fail.swap(false, Ordering::SeqCst) {
            return Err(ApiError::Status(500));
        }
        Ok(self.reading.lock().clone())
    }
}

/// Reading persistence fake; records everything, optionally failing.
#[derive(Default)]
pub struct RecordingStore {
    pub records: Mutex<Vec<ReadingRecord>>,
    fail: AtomicBool,
}

impl RecordingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_next(&self) {
        self.fail.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl ReadingStore for RecordingStore {
    async fn record_reading(&self, record: ReadingRecord) -> Result<(), ApiError> {
        if self.fail.swap(false, Ordering::SeqCst) {
            return Err(ApiError::Status(503));
        }
        self.records.lock().push(record);
        Ok(())
    }
}

/// Gift generation fake.
#[derive(Default)]
pub struct RecordingGift {
    calls: AtomicUsize,
    fail: AtomicBool,
}

impl RecordingGift {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_next(&self) {
        self.fail.store(true, Ordering::SeqCst);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GiftApi for RecordingGift {
    async fn generate_gift(&self, _request: GiftRequest) -> Result<(), ApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail.swap(false, Ordering::SeqCst) {
            return Err(ApiError::Status(500));
        }
        Ok(())
    }
}

/// Rate limiter stub with a settable decision and an increment counter.
pub struct StubRateLimiter {
    decision: Mutex<RateLimitDecision>,
    increments: AtomicUsize,
}

impl StubRateLimiter {
    pub fn allowing() -> Self {
        Self {
            decision: Mutex::new(RateLimitDecision::Allowed),
            increments: AtomicUsize::new(0),
        }
    }

    pub fn set_decision(&self, decision: RateLimitDecision) {
        *self.decision.lock() = decision;
    }

    pub fn increments(&self) -> usize {
        self.increments.load(Ordering::SeqCst)
    }
}

impl RateLimiter for StubRateLimiter {
    fn check(&self, _action_id: &str) -> RateLimitDecision {
        self.decision.lock().clone()
    }

    fn increment(&self) {
        self.increments.fetch_add(1, Ordering::SeqCst);
    }
}

/// All fakes plus the engine wired over them.
pub struct TestHarness {
    pub chat: Arc<ScriptedChatApi>,
    pub interpretation: Arc<ScriptedInterpretationApi>,
    pub store: Arc<RecordingStore>,
    pub gift: Arc<RecordingGift>,
    pub limiter: Arc<StubRateLimiter>,
    pub engine: Arc<SessionEngine>,
    pub events: UnboundedReceiver<SessionEvent>,
}

impl TestHarness {
    pub fn new() -> Self {
        Self::with_timings(fast_timings())
    }

    pub fn with_timings(timings: Timings) -> Self {
        let chat = Arc::new(ScriptedChatApi::new());
        let interpretation = Arc::new(ScriptedInterpretationApi::new());
        let store = Arc::new(RecordingStore::new());
        let gift = Arc::new(RecordingGift::new());
        let limiter = Arc::new(StubRateLimiter::allowing());

        let ports = EnginePorts {
            chat: chat.clone(),
            interpretation: interpretation.clone(),
            reading_store: store.clone(),
            gift: gift.clone(),
            limiter: limiter.clone(),
        };
        let (engine, events) = SessionEngine::new(ports, timings, 42);

        Self {
            chat,
            interpretation,
            store,
            gift,
            limiter,
            engine: Arc::new(engine),
            events,
        }
    }

    /// Run the conversation to readiness and enter Selection.
    pub async fn drive_to_selection(&self) {
        self.chat
            .push_reply("I have heard enough. [[READY]]", Some("seeker summary"));
        self.engine
            .send_message("Will I find my way?")
            .await
            .expect("scripted turn succeeds");
        self.engine
            .advance_to_selection()
            .expect("readiness was signalled");
    }

    /// Toggle the first three dealt cards and return their ids.
    pub fn select_three(&self) -> Vec<u8> {
        let ids: Vec<u8> = self
            .engine
            .with_session(|s| s.selection.available().iter().take(3).map(|c| c.id).collect());
        for id in &ids {
            self.engine.toggle_card(*id).expect("card is in the spread");
        }
        ids
    }

    /// Drain events until one matches, failing the test after `cap` events.
    pub async fn await_event(
        &mut self,
        cap: usize,
        pred: impl Fn(&SessionEvent) -> bool,
    ) -> SessionEvent {
        for _ in 0..cap {
            let event = self
                .events
                .recv()
                .await
                .expect("event channel stays open while the engine lives");
            if pred(&event) {
                return event;
            }
        }
        panic!("expected event did not arrive within {cap} events");
    }

    /// Collect every event already queued, without waiting.
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        let mut drained = Vec::new();
        while let Ok(event) = self.events.try_recv() {
            drained.push(event);
        }
        drained
    }
}
