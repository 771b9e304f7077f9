//! Search outbox relay worker.
//!
//! Drains undelivered index operations on a fixed interval until shut down.
//!
//! ```bash
//! catalog-service jobs work     # run the relay
//! catalog-service jobs status   # queue depth
//! catalog-service jobs purge    # drop old delivered rows
//! ```

use std::future::Future;
use std::time::Duration;

use tokio::time::MissedTickBehavior;
use tracing::{error, info};

use crate::search::SearchSync;

/// Run relay passes every `poll_interval` until `shutdown` resolves.
///
/// A failed pass is logged and retried on the next tick.
pub async fn run_relay<S>(sync: &SearchSync, poll_interval: Duration, shutdown: S) -> u64
where
    S: Future<Output = ()>,
{
    let mut ticker = tokio::time::interval(poll_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    tokio::pin!(shutdown);

    let mut passes = 0u64;
    info!(interval_ms = poll_interval.as_millis() as u64, "Search outbox relay started");

    loop {
        tokio::select! {
            _ = &mut shutdown => {
                info!("Received shutdown signal, stopping relay...");
                break;
            }
            _ = ticker.tick() => {
                passes += 1;
                if let Err(e) = sync.drain().await {
                    error!(error = %e, "Search outbox relay pass failed");
                }
            }
        }
    }

    info!(passes, "Search outbox relay stopped");
    passes
}

/// Resolves on Ctrl+C.
pub async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
