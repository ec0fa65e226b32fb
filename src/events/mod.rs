//! Events published by the corner monitor and dwell workers
//!
//! Purely diagnostic: nothing in the corner logic consumes them, the main
//! task only logs them.

use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use crate::worker::WorkerOutcome;

/// Something observable happened at the corner
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CornerEvent {
    /// Pointer entered the hot region and a dwell worker started
    Entered,

    /// Pointer left the hot region and the dwell worker was cancelled
    Left,

    /// Pointer entered while a mouse button was held
    DragSuppressed,

    /// The dwell worker thread could not be started
    WorkerFailedToStart { reason: String },

    /// A dwell worker ran to completion
    WorkerFinished { outcome: WorkerOutcome },
}

/// Log every event until all publishers are gone
pub async fn report_events(mut event_rx: broadcast::Receiver<CornerEvent>) -> usize {
    let mut fired = 0;
    loop {
        match event_rx.recv().await {
            Ok(CornerEvent::WorkerFinished {
                outcome: WorkerOutcome::Injected,
            }) => {
                fired += 1;
                info!(fired, "hot corner fired");
            }
            Ok(CornerEvent::WorkerFinished { outcome }) => {
                debug!(?outcome, "dwell worker finished without firing");
            }
            Ok(CornerEvent::WorkerFailedToStart { reason }) => {
                warn!(%reason, "dwell worker failed to start");
            }
            Ok(event) => {
                debug!(?event, "corner event");
            }
            Err(broadcast::error::RecvError::Lagged(n)) => {
                warn!(skipped = n, "corner event receiver lagged");
            }
            Err(broadcast::error::RecvError::Closed) => {
                break;
            }
        }
    }
    fired
}
