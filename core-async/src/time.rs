//! Time-related abstractions.
//!
//! `Instant` is tokio's, so tests running with a paused clock observe the
//! same virtual time as `sleep`.

use std::future::Future;

use crate::sync::CancellationToken;

pub use std::time::Duration;
pub use tokio::time::{sleep, Instant};

/// Sleep for `duration` unless `token` fires first.
///
/// Returns `true` when the full delay elapsed and `false` when it was cut
/// short by cancellation. An already-cancelled token returns immediately.
pub async fn sleep_or_cancel(duration: Duration, token: &CancellationToken) -> bool {
    tokio::select! {
        biased;
        _ = token.cancelled() => false,
        _ = sleep(duration) => true,
    }
}

/// Drive `future` to completion unless `token` fires first.
///
/// The future is dropped on cancellation, which aborts whatever I/O it was
/// waiting on.
pub async fn run_or_cancel<F>(future: F, token: &CancellationToken) -> Option<F::Output>
where
    F: Future,
{
    tokio::select! {
        biased;
        _ = token.cancelled() => None,
        output = future => Some(output),
    }
}
