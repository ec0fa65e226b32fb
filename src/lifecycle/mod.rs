//! Process lifecycle: shutdown requests and exit codes

mod exit;
mod shutdown;

pub use exit::{classify_message, LoopExit, EXIT_HOTKEY_ID, WM_HOTKEY};
pub use shutdown::ShutdownSignal;
