//! Timer-driven rescan loop.

use std::sync::Arc;

use tokio::task::JoinError;
use tracing::{error, info};

use sightwatch_core::ReportMonitor;

use super::ShutdownSignal;

/// Run one scan-and-publish cycle on the blocking pool.
///
/// A panic anywhere in the cycle surfaces as the `JoinError`.
pub async fn run_cycle(monitor: &Arc<ReportMonitor>) -> Result<usize, JoinError> {
    let monitor = Arc::clone(monitor);
    tokio::task::spawn_blocking(move || monitor.refresh()).await
}

/// Scan, publish, sleep, repeat until shutdown.
///
/// A failed cycle is logged and followed by the longer backoff pause
/// instead of the poll interval; the loop itself never exits on error.
pub async fn run(monitor: Arc<ReportMonitor>, mut shutdown: ShutdownSignal) {
    info!("Starting wildlife report monitoring...");
    info!("Performing initial scan...");

    let mut outcome = run_cycle(&monitor).await;

    loop {
        let pause = match outcome {
            Ok(_) => monitor.config().poll_interval(),
            Err(e) => {
                error!("Error in monitoring loop: {}", e);
                monitor.config().error_backoff()
            }
        };

        tokio::select! {
            _ = shutdown.wait() => break,
            _ = tokio::time::sleep(pause) => {}
        }

        outcome = run_cycle(&monitor).await;
    }

    info!("Monitor loop stopped");
}
