//! Build-time configuration
//!
//! Everything the daemon does is decided here at compile time. Edit and
//! rebuild to change the corner, the delay or the keys.

use std::time::Duration;

use crate::hotkey::{HotkeyBinding, KeyStroke, TASK_VIEW_CHORD};
use crate::state::CornerGeometry;

/// How long the pointer has to linger in the corner
pub const DWELL: Duration = Duration::from_millis(300);

/// Daemon configuration
#[derive(Debug, Clone, Copy)]
pub struct Config {
    /// Size of the trigger strip around the bottom-left corner
    pub corner: CornerGeometry,

    /// Dwell before the chord is injected
    pub dwell: Duration,

    /// Keys injected when the corner fires
    pub chord: &'static [KeyStroke],

    /// Global chord that stops the daemon
    pub exit_hotkey: HotkeyBinding,
}

impl Config {
    /// The compiled-in configuration
    pub fn builtin() -> Self {
        Self {
            corner: CornerGeometry::default(),
            dwell: DWELL,
            chord: &TASK_VIEW_CHORD,
            exit_hotkey: HotkeyBinding::exit(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::builtin()
    }
}
