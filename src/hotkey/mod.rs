//! Keyboard side of the daemon
//!
//! Defines the keys injected when the corner fires and the exit hotkey. On
//! Windows, also runs the message-pump thread that owns the low-level mouse
//! hook and the registered exit hotkey.

mod keys;
#[cfg(windows)]
mod listener;

pub use keys::{
    HotkeyBinding, Key, KeyAction, KeyStroke, ModifierState, MouseButtons, TASK_VIEW_CHORD,
};
#[cfg(windows)]
pub use listener::{HookThread, Win32Monitor};
