//! Why the message loop stopped, and the process exit code that follows

use std::process::ExitCode;

/// `WM_HOTKEY`, posted to the registering thread when a hotkey fires
pub const WM_HOTKEY: u32 = 0x0312;

/// Id the exit chord is registered under
pub const EXIT_HOTKEY_ID: i32 = 1;

/// How the hook thread's message loop ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopExit {
    /// The exit hotkey was pressed; carries the message's wParam (the hotkey id)
    Hotkey(i32),
    /// `WM_QUIT` arrived with this exit code
    Quit(i32),
    /// The message pump failed or the hook thread vanished
    Failed,
}

impl LoopExit {
    /// The loop's termination code, which becomes the process status
    pub fn code(&self) -> i32 {
        match self {
            LoopExit::Hotkey(code) | LoopExit::Quit(code) => *code,
            LoopExit::Failed => 1,
        }
    }

    /// Process status byte; codes that do not fit still mean failure
    pub fn status(&self) -> u8 {
        u8::try_from(self.code()).unwrap_or(1)
    }

    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.status())
    }
}

/// Decide whether a `GetMessageW` result ends the loop
///
/// `None` means the message is dispatched as usual.
pub fn classify_message(ret: i32, message: u32, w_param: usize) -> Option<LoopExit> {
    match ret {
        0 => Some(LoopExit::Quit(w_param as i32)),
        -1 => Some(LoopExit::Failed),
        _ if message == WM_HOTKEY && w_param == EXIT_HOTKEY_ID as usize => {
            Some(LoopExit::Hotkey(w_param as i32))
        }
        _ => None,
    }
}
