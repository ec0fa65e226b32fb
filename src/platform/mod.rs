//! Host input facilities consumed by the monitor and the dwell worker
//!
//! The corner logic only sees the `InputBackend` trait; the Win32
//! implementation lives in `windows`.

#[cfg(test)]
pub mod fake;
#[cfg(windows)]
pub mod windows;

use crate::hotkey::{KeyStroke, ModifierState, MouseButtons};
use crate::state::Point;

/// Queries and injection the corner needs from the host
pub trait InputBackend: Send + Sync + 'static {
    /// Current state of the left and right mouse buttons
    fn mouse_buttons(&self) -> MouseButtons;

    /// Current state of the modifier keys
    fn modifiers(&self) -> ModifierState;

    /// Current pointer position
    fn cursor_position(&self) -> Result<Point, PlatformError>;

    /// Submit `strokes` as one batch, returning how many the host accepted
    fn inject(&self, strokes: &[KeyStroke]) -> usize;
}

/// Errors reported by host queries
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlatformError {
    #[error("failed to read cursor position: {0}")]
    CursorPosition(String),

    #[error("failed to read desktop bounds: {0}")]
    DesktopBounds(String),
}
