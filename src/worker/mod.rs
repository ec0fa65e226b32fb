//! Dwell-then-act workers started by the corner monitor

mod debounce;

pub use debounce::{DebounceSpawner, DebounceWorker};

/// Starts a worker each time the corner turns hot
pub trait Spawner {
    type Handle: WorkerHandle;

    fn spawn(&self) -> Result<Self::Handle, WorkerError>;
}

/// An opaque running worker the monitor can cancel
pub trait WorkerHandle {
    /// Request cancellation and release the handle without waiting
    fn cancel(self);
}

/// How a dwell worker ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkerOutcome {
    /// The chord was injected and fully accepted
    Injected,
    /// Cancelled by the monitor before injection
    Cancelled,
    /// A precondition no longer held after the dwell
    Aborted(AbortReason),
    /// The host accepted fewer events than were submitted
    Underdelivered { sent: usize, accepted: usize },
}

/// Why a worker gave up without injecting
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbortReason {
    /// A mouse button is held, probably a drag
    ButtonHeld,
    /// A modifier key is held
    ModifierHeld,
    /// The pointer is no longer in the hot region
    LeftRegion,
    /// The cursor position query failed
    QueryFailed(String),
}

/// Errors that can occur when starting a worker
#[derive(Debug, thiserror::Error)]
pub enum WorkerError {
    #[error("failed to spawn dwell worker thread: {0}")]
    ThreadSpawn(String),
}
