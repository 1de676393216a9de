//! Shared helpers for crackwatch integration tests.

pub mod builders;
pub mod recording;
pub mod script;

use std::future::Future;
use std::sync::Once;
use std::time::Duration;

use tracing_subscriber::{fmt, EnvFilter};

/// Upper bound for any single awaited step in a test.
///
/// Generous enough for the supervisor's escalation and drain timers.
pub const TEST_TIMEOUT: Duration = Duration::from_secs(10);

static TRACING: Once = Once::new();

/// Install a test subscriber once per test binary.
///
/// The filter comes from `CRACKWATCH_LOG` (same variable as the binary),
/// defaulting to `crackwatch=debug` so supervisor and worker logs show up
/// next to a failing test. Output goes through the test writer and is only
/// printed for failures unless `--nocapture` is given.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let filter = EnvFilter::try_from_env("CRACKWATCH_LOG")
            .unwrap_or_else(|_| EnvFilter::new("crackwatch=debug"));

        // Another harness may already own the global subscriber.
        let _ = fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(false)
            .try_init();
    });
}

/// Await `f`, failing the test if it takes longer than [`TEST_TIMEOUT`].
pub async fn with_timeout<F, T>(f: F) -> T
where
    F: Future<Output = T>,
{
    match tokio::time::timeout(TEST_TIMEOUT, f).await {
        Ok(value) => value,
        Err(_) => panic!("test step did not finish within {TEST_TIMEOUT:?}"),
    }
}
