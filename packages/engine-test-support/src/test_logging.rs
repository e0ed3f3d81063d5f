//! Shared tracing bootstrap for unit and integration tests.

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

static GUARD: OnceCell<()> = OnceCell::new();

/// Install the test tracing subscriber.
///
/// Idempotent and race-safe: call it from as many tests as you like. The
/// filter is taken from `TEST_LOG`, falling back to `RUST_LOG`, and finally
/// to `warn` so test output stays quiet by default. Timestamps are disabled
/// for stable output and the test writer keeps logs inside cargo's capture.
pub fn init() {
    GUARD.get_or_init(|| {
        let filter = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .map(EnvFilter::new)
            .unwrap_or_else(|_| EnvFilter::new("warn"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time()
            .try_init()
            .ok();
    });
}
