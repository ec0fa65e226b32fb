//! Dwell worker running on its own thread
//!
//! Sleeps for the dwell interval, re-checks that the user still means it,
//! then injects the chord. Cancellation is cooperative: the monitor raises a
//! flag and unparks the thread, which notices at the end of the sleep and
//! once more right before injecting.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use tokio::sync::broadcast;
use tracing::{debug, trace};

use super::{AbortReason, Spawner, WorkerError, WorkerHandle, WorkerOutcome};
use crate::events::CornerEvent;
use crate::hotkey::KeyStroke;
use crate::platform::InputBackend;
use crate::state::HotRegion;

/// Starts a `DebounceWorker` thread on every cold to hot edge
pub struct DebounceSpawner<B> {
    backend: Arc<B>,
    region: HotRegion,
    dwell: Duration,
    chord: &'static [KeyStroke],
    event_tx: broadcast::Sender<CornerEvent>,
}

impl<B: InputBackend> DebounceSpawner<B> {
    pub fn new(
        backend: Arc<B>,
        region: HotRegion,
        dwell: Duration,
        chord: &'static [KeyStroke],
        event_tx: broadcast::Sender<CornerEvent>,
    ) -> Self {
        Self {
            backend,
            region,
            dwell,
            chord,
            event_tx,
        }
    }
}

impl<B: InputBackend> Spawner for DebounceSpawner<B> {
    type Handle = DebounceWorker;

    fn spawn(&self) -> Result<DebounceWorker, WorkerError> {
        let cancelled = Arc::new(AtomicBool::new(false));
        let task = DwellTask {
            backend: Arc::clone(&self.backend),
            region: self.region,
            dwell: self.dwell,
            chord: self.chord,
            cancelled: Arc::clone(&cancelled),
            event_tx: self.event_tx.clone(),
        };

        let thread = thread::Builder::new()
            .name("corner-dwell".to_string())
            .spawn(move || task.run())
            .map_err(|e| WorkerError::ThreadSpawn(e.to_string()))?;

        Ok(DebounceWorker { cancelled, thread })
    }
}

/// Handle to a running dwell thread
pub struct DebounceWorker {
    cancelled: Arc<AtomicBool>,
    thread: JoinHandle<WorkerOutcome>,
}

impl DebounceWorker {
    /// Block until the worker finishes
    #[cfg(test)]
    pub fn join(self) -> WorkerOutcome {
        self.thread.join().expect("dwell worker panicked")
    }
}

impl WorkerHandle for DebounceWorker {
    fn cancel(self) {
        self.cancelled.store(true, Ordering::SeqCst);
        self.thread.thread().unpark();
        // Dropping the JoinHandle detaches the thread
    }
}

struct DwellTask<B> {
    backend: Arc<B>,
    region: HotRegion,
    dwell: Duration,
    chord: &'static [KeyStroke],
    cancelled: Arc<AtomicBool>,
    event_tx: broadcast::Sender<CornerEvent>,
}

impl<B: InputBackend> DwellTask<B> {
    fn run(self) -> WorkerOutcome {
        let outcome = self.dwell_then_inject();
        debug!(?outcome, "dwell worker finished");
        let _ = self.event_tx.send(CornerEvent::WorkerFinished {
            outcome: outcome.clone(),
        });
        outcome
    }

    fn dwell_then_inject(&self) -> WorkerOutcome {
        if !self.sleep_uncancelled() {
            return WorkerOutcome::Cancelled;
        }

        if self.backend.mouse_buttons().any() {
            return WorkerOutcome::Aborted(AbortReason::ButtonHeld);
        }

        if !self.backend.modifiers().is_empty() {
            return WorkerOutcome::Aborted(AbortReason::ModifierHeld);
        }

        let position = match self.backend.cursor_position() {
            Ok(position) => position,
            Err(e) => return WorkerOutcome::Aborted(AbortReason::QueryFailed(e.to_string())),
        };

        if !self.region.contains(position) {
            return WorkerOutcome::Aborted(AbortReason::LeftRegion);
        }

        // Past this point nothing may stop a half-sent chord
        if self.is_cancelled() {
            return WorkerOutcome::Cancelled;
        }

        let sent = self.chord.len();
        let accepted = self.backend.inject(self.chord);
        if accepted != sent {
            return WorkerOutcome::Underdelivered { sent, accepted };
        }

        WorkerOutcome::Injected
    }

    /// Sleep for the dwell interval; false if cancelled meanwhile
    fn sleep_uncancelled(&self) -> bool {
        let deadline = Instant::now() + self.dwell;
        loop {
            if self.is_cancelled() {
                trace!("dwell cancelled");
                return false;
            }
            let now = Instant::now();
            if now >= deadline {
                return true;
            }
            // Spurious wakeups just loop again
            thread::park_timeout(deadline - now);
        }
    }

    fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hotkey::{ModifierState, MouseButtons, TASK_VIEW_CHORD};
    use crate::platform::fake::FakeInput;
    use crate::state::{CornerGeometry, Point, Rect};

    const DWELL: Duration = Duration::from_millis(40);

    fn region() -> HotRegion {
        HotRegion::from_desktop(
            Rect {
                top: 0,
                left: 0,
                right: 1920,
                bottom: 1080,
            },
            CornerGeometry::default(),
        )
    }

    fn create_spawner(
        backend: Arc<FakeInput>,
    ) -> (
        DebounceSpawner<FakeInput>,
        broadcast::Receiver<CornerEvent>,
    ) {
        let (tx, rx) = broadcast::channel(16);
        (
            DebounceSpawner::new(backend, region(), DWELL, &TASK_VIEW_CHORD, tx),
            rx,
        )
    }

    fn corner() -> Point {
        Point::new(0, 1079)
    }

    #[test]
    fn test_injects_chord_after_dwell() {
        let backend = Arc::new(FakeInput::at(corner()));
        let (spawner, mut rx) = create_spawner(Arc::clone(&backend));

        let start = Instant::now();
        let outcome = spawner.spawn().unwrap().join();

        assert_eq!(outcome, WorkerOutcome::Injected);
        assert!(start.elapsed() >= DWELL);
        assert_eq!(backend.injected(), TASK_VIEW_CHORD.to_vec());
        assert_eq!(
            rx.try_recv().unwrap(),
            CornerEvent::WorkerFinished {
                outcome: WorkerOutcome::Injected
            }
        );
    }

    #[test]
    fn test_cancel_before_dwell_injects_nothing() {
        let backend = Arc::new(FakeInput::at(corner()));
        let (spawner, _rx) = create_spawner(Arc::clone(&backend));

        let worker = spawner.spawn().unwrap();
        worker.cancel();
        thread::sleep(DWELL * 3);

        assert!(backend.injected().is_empty());
    }

    #[test]
    fn test_cancel_wakes_worker_early() {
        let backend = Arc::new(FakeInput::at(corner()));
        let (tx, mut rx) = broadcast::channel(16);
        let spawner = DebounceSpawner::new(
            Arc::clone(&backend),
            region(),
            Duration::from_secs(30),
            &TASK_VIEW_CHORD,
            tx,
        );

        spawner.spawn().unwrap().cancel();

        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            match rx.try_recv() {
                Ok(event) => {
                    assert_eq!(
                        event,
                        CornerEvent::WorkerFinished {
                            outcome: WorkerOutcome::Cancelled
                        }
                    );
                    break;
                }
                Err(_) if Instant::now() < deadline => thread::sleep(Duration::from_millis(5)),
                Err(e) => panic!("worker never reported: {e:?}"),
            }
        }
        assert!(backend.injected().is_empty());
    }

    #[test]
    fn test_button_held_aborts() {
        let backend = Arc::new(FakeInput::at(corner()));
        backend.set_buttons(MouseButtons {
            left: true,
            right: false,
        });
        let (spawner, _rx) = create_spawner(Arc::clone(&backend));

        let outcome = spawner.spawn().unwrap().join();

        assert_eq!(outcome, WorkerOutcome::Aborted(AbortReason::ButtonHeld));
        assert!(backend.injected().is_empty());
    }

    #[test]
    fn test_modifier_held_aborts() {
        let backend = Arc::new(FakeInput::at(corner()));
        backend.set_modifiers(ModifierState {
            right_super: true,
            ..Default::default()
        });
        let (spawner, _rx) = create_spawner(Arc::clone(&backend));

        let outcome = spawner.spawn().unwrap().join();

        assert_eq!(outcome, WorkerOutcome::Aborted(AbortReason::ModifierHeld));
        assert!(backend.injected().is_empty());
    }

    #[test]
    fn test_failed_cursor_query_aborts() {
        let backend = Arc::new(FakeInput::at(corner()));
        backend.set_cursor(None);
        let (spawner, _rx) = create_spawner(Arc::clone(&backend));
        assert!(matches!(
            spawner.spawn().unwrap().join(),
            WorkerOutcome::Aborted(AbortReason::QueryFailed(_))
        ));
        assert!(backend.injected().is_empty());
    }

    #[test]
    fn test_pointer_moved_away_aborts() {
        let backend = Arc::new(FakeInput::at(corner()));
        let (spawner, _rx) = create_spawner(Arc::clone(&backend));

        let worker = spawner.spawn().unwrap();
        backend.set_cursor(Some(Point::new(800, 600)));

        assert_eq!(
            worker.join(),
            WorkerOutcome::Aborted(AbortReason::LeftRegion)
        );
        assert!(backend.injected().is_empty());
    }

    #[test]
    fn test_underdelivery_is_reported() {
        let backend = Arc::new(FakeInput::at(corner()));
        backend.set_accept_limit(2);
        let (spawner, _rx) = create_spawner(Arc::clone(&backend));

        assert_eq!(
            spawner.spawn().unwrap().join(),
            WorkerOutcome::Underdelivered {
                sent: 4,
                accepted: 2
            }
        );
    }
}
