//! Core corner state machine
//!
//! Classifies pointer movements against the hot region and drives the
//! Cold/Hot transitions. Runs inside the host's hook callback, so every
//! path here must return quickly: no sleeping, no waiting on the worker.

use std::sync::Arc;

use tokio::sync::broadcast;
use tracing::{debug, trace, warn};

use super::region::{HotRegion, Point};
use crate::events::CornerEvent;
use crate::platform::InputBackend;
use crate::worker::{Spawner, WorkerHandle};

/// Whether the pointer is currently armed in the corner
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CornerState {
    /// Pointer outside the region, no worker running
    #[default]
    Cold,
    /// Pointer inside the region, a worker is running
    Hot,
}

impl std::fmt::Display for CornerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CornerState::Cold => write!(f, "Cold"),
            CornerState::Hot => write!(f, "Hot"),
        }
    }
}

/// Kind of pointer notification delivered by the hook
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Move,
    /// Clicks, wheel and anything else
    Other,
}

/// A pointer notification with absolute screen coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub position: Point,
}

impl PointerEvent {
    pub fn moved_to(position: Point) -> Self {
        Self {
            kind: PointerKind::Move,
            position,
        }
    }
}

/// What the monitor must do in response to a movement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Nothing,
    StartWorker,
    CancelWorker,
    /// Entered with a button held; stay cold
    SuppressDrag,
}

/// Transition rule for a single movement
///
/// `buttons_held` is only consulted on a cold to hot edge.
pub fn next_command(
    state: CornerState,
    inside: bool,
    buttons_held: impl FnOnce() -> bool,
) -> Command {
    match (state, inside) {
        (CornerState::Cold, false) | (CornerState::Hot, true) => Command::Nothing,
        (CornerState::Hot, false) => Command::CancelWorker,
        (CornerState::Cold, true) if buttons_held() => Command::SuppressDrag,
        (CornerState::Cold, true) => Command::StartWorker,
    }
}

/// The worker handle exists exactly when the corner is hot
enum Slot<H> {
    Cold,
    Hot(H),
}

/// Owns the corner state and the lifecycle of its dwell worker
pub struct CornerMonitor<S: Spawner, B> {
    region: HotRegion,
    spawner: S,
    backend: Arc<B>,
    slot: Slot<S::Handle>,
    event_tx: broadcast::Sender<CornerEvent>,
}

impl<S: Spawner, B: InputBackend> CornerMonitor<S, B> {
    pub fn new(
        region: HotRegion,
        spawner: S,
        backend: Arc<B>,
        event_tx: broadcast::Sender<CornerEvent>,
    ) -> Self {
        Self {
            region,
            spawner,
            backend,
            slot: Slot::Cold,
            event_tx,
        }
    }

    /// Get the current state
    pub fn state(&self) -> CornerState {
        match self.slot {
            Slot::Cold => CornerState::Cold,
            Slot::Hot(_) => CornerState::Hot,
        }
    }

    /// Handle one pointer notification
    pub fn on_pointer(&mut self, event: &PointerEvent) -> CornerState {
        if event.kind != PointerKind::Move {
            return self.state();
        }

        let inside = self.region.contains(event.position);
        let backend = &self.backend;
        let command = next_command(self.state(), inside, || backend.mouse_buttons().any());

        match command {
            Command::Nothing => {}
            Command::SuppressDrag => {
                trace!(position = ?event.position, "entered corner while dragging");
                self.emit(CornerEvent::DragSuppressed);
            }
            Command::CancelWorker => {
                self.cancel_worker();
                debug!(from = %CornerState::Hot, to = %CornerState::Cold, "corner transition");
                self.emit(CornerEvent::Left);
            }
            Command::StartWorker => match self.spawner.spawn() {
                Ok(handle) => {
                    self.slot = Slot::Hot(handle);
                    debug!(from = %CornerState::Cold, to = %CornerState::Hot, "corner transition");
                    self.emit(CornerEvent::Entered);
                }
                Err(e) => {
                    // Stay cold; the next entry tries again
                    warn!(?e, "could not start dwell worker");
                    self.emit(CornerEvent::WorkerFailedToStart {
                        reason: e.to_string(),
                    });
                }
            },
        }

        self.state()
    }

    /// Cancel any running worker, leaving the corner cold
    pub fn shutdown(&mut self) {
        if self.cancel_worker() {
            debug!("cancelled dwell worker on shutdown");
        }
    }

    fn cancel_worker(&mut self) -> bool {
        match std::mem::replace(&mut self.slot, Slot::Cold) {
            Slot::Hot(handle) => {
                handle.cancel();
                true
            }
            Slot::Cold => false,
        }
    }

    fn emit(&self, event: CornerEvent) {
        let _ = self.event_tx.send(event);
    }
}
