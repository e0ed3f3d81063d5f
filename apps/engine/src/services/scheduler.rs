//! Per-session tracking of cancellable scheduled tasks.
//!
//! Every timer chain (monologue rotation, reveal pacing, segment pacing)
//! runs as a spawned task holding a child cancellation token. Close/reset
//! calls `cancel_all`, which cancels the whole generation and aborts the
//! tracked handles, so a stale timer can never mutate a torn-down session.

use parking_lot::Mutex;
use std::future::Future;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

pub struct TaskScheduler {
    inner: Mutex<Inner>,
}

struct Inner {
    root: CancellationToken,
    tasks: Vec<JoinHandle<()>>,
}

impl TaskScheduler {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                root: CancellationToken::new(),
                tasks: Vec::new(),
            }),
        }
    }

    /// Spawn a tracked task. The builder receives a child token that is
    /// cancelled on `cancel_all`; the task must return promptly once the
    /// token fires.
    pub fn spawn<F, Fut>(&self, build: F)
    where
        F: FnOnce(CancellationToken) -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let mut inner = self.inner.lock();
        inner.tasks.retain(|handle| !handle.is_finished());

        let token = inner.root.child_token();
        inner.tasks.push(tokio::spawn(build(token)));
    }

    /// Cancel every tracked task of the current session generation.
    ///
    /// Idempotent; a fresh root token is installed so the next session's
    /// chains start unaffected.
    pub fn cancel_all(&self) {
        let (token, tasks) = {
            let mut inner = self.inner.lock();
            let token = std::mem::replace(&mut inner.root, CancellationToken::new());
            let tasks = std::mem::take(&mut inner.tasks);
            (token, tasks)
        };

        token.cancel();
        for handle in tasks {
            handle.abort();
        }
    }
}

impl Default for TaskScheduler {
    fn default() -> Self {
        Self::new()
    }
}
