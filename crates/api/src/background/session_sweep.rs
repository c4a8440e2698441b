//! Periodic eviction of abandoned matching sessions.
//!
//! A view that closes without unmounting (closed tab, crashed client) would
//! otherwise hold its session slot until restart.

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::matching::MatchingSessionManager;

/// Run the idle-session sweep loop until `cancel` is triggered.
///
/// Every `interval` evicts sessions untouched for longer than `max_idle`.
pub async fn run(
    sessions: Arc<MatchingSessionManager>,
    max_idle: Duration,
    interval: Duration,
    cancel: CancellationToken,
) {
    let max_idle = match chrono::Duration::from_std(max_idle) {
        Ok(d) => d,
        Err(e) => {
            tracing::error!(error = %e, "Session sweep: idle timeout out of range, not starting");
            return;
        }
    };

    tracing::info!(
        max_idle_secs = max_idle.num_seconds(),
        interval_secs = interval.as_secs(),
        "Session sweep job started"
    );

    let mut ticker = tokio::time::interval(interval);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Session sweep job stopping");
                break;
            }
            _ = ticker.tick() => {
                let evicted = sessions.sweep_idle(max_idle).await;
                if evicted > 0 {
                    tracing::info!(evicted, "Session sweep: evicted idle matching sessions");
                } else {
                    tracing::debug!("Session sweep: nothing to evict");
                }
            }
        }
    }
}
