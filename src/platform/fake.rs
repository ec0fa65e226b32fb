//! Recording backend for tests

use std::sync::Mutex;

use super::{InputBackend, PlatformError};
use crate::hotkey::{KeyStroke, ModifierState, MouseButtons};
use crate::state::Point;

#[derive(Debug, Default)]
pub struct FakeInput {
    buttons: Mutex<MouseButtons>,
    modifiers: Mutex<ModifierState>,
    cursor: Mutex<Option<Point>>,
    accept_limit: Mutex<Option<usize>>,
    injected: Mutex<Vec<KeyStroke>>,
}

impl FakeInput {
    /// Pointer parked at `cursor`, nothing held
    pub fn at(cursor: Point) -> Self {
        let fake = Self::default();
        fake.set_cursor(Some(cursor));
        fake
    }

    pub fn set_buttons(&self, buttons: MouseButtons) {
        *self.buttons.lock().unwrap() = buttons;
    }

    pub fn set_modifiers(&self, modifiers: ModifierState) {
        *self.modifiers.lock().unwrap() = modifiers;
    }

    /// `None` makes the cursor query fail
    pub fn set_cursor(&self, cursor: Option<Point>) {
        *self.cursor.lock().unwrap() = cursor;
    }

    /// Accept at most `limit` strokes per batch
    pub fn set_accept_limit(&self, limit: usize) {
        *self.accept_limit.lock().unwrap() = Some(limit);
    }

    pub fn injected(&self) -> Vec<KeyStroke> {
        self.injected.lock().unwrap().clone()
    }
}

impl InputBackend for FakeInput {
    fn mouse_buttons(&self) -> MouseButtons {
        *self.buttons.lock().unwrap()
    }

    fn modifiers(&self) -> ModifierState {
        *self.modifiers.lock().unwrap()
    }

    fn cursor_position(&self) -> Result<Point, PlatformError> {
        self.cursor
            .lock()
            .unwrap()
            .ok_or_else(|| PlatformError::CursorPosition("unavailable".to_string()))
    }

    fn inject(&self, strokes: &[KeyStroke]) -> usize {
        let accepted = match *self.accept_limit.lock().unwrap() {
            Some(limit) => strokes.len().min(limit),
            None => strokes.len(),
        };
        self.injected
            .lock()
            .unwrap()
            .extend_from_slice(&strokes[..accepted]);
        accepted
    }
}
