//! Low-level mouse hook and exit hotkey on a dedicated Win32 thread
//!
//! `WH_MOUSE_LL` callbacks are delivered on the thread that installed the
//! hook, from inside its `GetMessageW` call. That thread therefore owns the
//! corner monitor outright, in a thread-local slot, and also receives the
//! `WM_HOTKEY` for the exit chord.

use std::cell::RefCell;
use std::sync::mpsc::{sync_channel, SyncSender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tokio::sync::oneshot;
use tracing::{debug, error, info, warn};
use windows::Win32::Foundation::{LPARAM, LRESULT, WPARAM};
use windows::Win32::System::LibraryLoader::GetModuleHandleW;
use windows::Win32::System::Threading::GetCurrentThreadId;
use windows::Win32::UI::Input::KeyboardAndMouse::{RegisterHotKey, UnregisterHotKey};
use windows::Win32::UI::WindowsAndMessaging::{
    CallNextHookEx, DispatchMessageW, GetMessageW, PeekMessageW, PostThreadMessageW,
    SetWindowsHookExW, TranslateMessage, UnhookWindowsHookEx, HC_ACTION, HHOOK, MSG,
    MSLLHOOKSTRUCT, PM_NOREMOVE, WH_MOUSE_LL, WM_MOUSEMOVE, WM_QUIT,
};

use super::keys::HotkeyBinding;
use crate::lifecycle::{classify_message, LoopExit, EXIT_HOTKEY_ID, WM_HOTKEY};
use crate::platform::windows::{hotkey_modifiers, Win32Input};
use crate::state::{CornerMonitor, Point, PointerEvent, PointerKind};
use crate::worker::DebounceSpawner;

const _: () = assert!(WM_HOTKEY == windows::Win32::UI::WindowsAndMessaging::WM_HOTKEY);

const READY_TIMEOUT: Duration = Duration::from_secs(2);

/// The monitor as wired up for the live Win32 backend
pub type Win32Monitor = CornerMonitor<DebounceSpawner<Win32Input>, Win32Input>;

thread_local! {
    static MONITOR: RefCell<Option<Win32Monitor>> = const { RefCell::new(None) };
}

/// The thread running the hook, the exit hotkey and their message pump
pub struct HookThread {
    thread_id: u32,
    thread: Option<JoinHandle<()>>,
}

impl HookThread {
    /// Start the hook thread
    ///
    /// Returns once the mouse hook and the exit hotkey are both registered.
    /// The receiver resolves when the message loop ends.
    pub fn start(
        monitor: Win32Monitor,
        exit_hotkey: HotkeyBinding,
    ) -> Result<(Self, oneshot::Receiver<LoopExit>), HookError> {
        let (ready_tx, ready_rx) = sync_channel::<Result<u32, HookError>>(1);
        let (exit_tx, exit_rx) = oneshot::channel();

        let thread = thread::Builder::new()
            .name("corner-hook".to_string())
            .spawn(move || {
                info!("hook thread started");

                if let Some(exit) = run_message_loop(monitor, exit_hotkey, ready_tx) {
                    info!(?exit, "hook thread stopped");
                    let _ = exit_tx.send(exit);
                }
            })
            .map_err(|e| HookError::ThreadSpawn(e.to_string()))?;

        let thread_id = ready_rx
            .recv_timeout(READY_TIMEOUT)
            .map_err(|_| HookError::NotReady)??;

        Ok((
            Self {
                thread_id,
                thread: Some(thread),
            },
            exit_rx,
        ))
    }

    /// Ask the message loop to quit
    pub fn stop(&self) {
        if let Err(e) = unsafe { PostThreadMessageW(self.thread_id, WM_QUIT, WPARAM(0), LPARAM(0)) }
        {
            warn!(?e, "failed to post WM_QUIT to hook thread");
        }
    }

    /// Wait for the thread to finish its cleanup
    pub fn join(mut self) {
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                error!("hook thread panicked");
            }
        }
    }
}

/// Errors that can occur while setting up the hook thread
#[derive(Debug, thiserror::Error)]
pub enum HookError {
    #[error("failed to spawn hook thread: {0}")]
    ThreadSpawn(String),

    #[error("hook thread did not signal readiness")]
    NotReady,

    #[error("failed to get module handle: {0}")]
    ModuleHandle(String),

    #[error("failed to install low-level mouse hook: {0}")]
    MouseHook(String),

    #[error("failed to register hotkey {hotkey}: {reason}")]
    Hotkey { hotkey: String, reason: String },
}

/// Install everything, report readiness, pump messages, then tear down
///
/// Returns `None` if setup failed; the error has gone out through `ready_tx`.
fn run_message_loop(
    monitor: Win32Monitor,
    exit_hotkey: HotkeyBinding,
    ready_tx: SyncSender<Result<u32, HookError>>,
) -> Option<LoopExit> {
    // Make sure the thread has a message queue before anyone posts to it
    let mut msg = MSG::default();
    unsafe {
        let _ = PeekMessageW(&mut msg, None, 0, 0, PM_NOREMOVE);
    }
    let thread_id = unsafe { GetCurrentThreadId() };

    MONITOR.with(|slot| *slot.borrow_mut() = Some(monitor));

    let hook = match install(&exit_hotkey) {
        Ok(hook) => hook,
        Err(e) => {
            MONITOR.with(|slot| slot.borrow_mut().take());
            let _ = ready_tx.send(Err(e));
            return None;
        }
    };
    let _ = ready_tx.send(Ok(thread_id));
    info!(hotkey = %exit_hotkey, "mouse hook and exit hotkey installed");

    let exit = pump(&mut msg);

    uninstall(hook);
    if let Some(mut monitor) = MONITOR.with(|slot| slot.borrow_mut().take()) {
        monitor.shutdown();
    }

    Some(exit)
}

fn install(exit_hotkey: &HotkeyBinding) -> Result<HHOOK, HookError> {
    let hmodule =
        unsafe { GetModuleHandleW(None) }.map_err(|e| HookError::ModuleHandle(e.to_string()))?;

    let hook = match unsafe { SetWindowsHookExW(WH_MOUSE_LL, Some(mouse_hook_proc), hmodule, 0) } {
        Ok(h) if !h.0.is_null() => h,
        Ok(_) => {
            return Err(HookError::MouseHook(
                windows::core::Error::from_win32().to_string(),
            ))
        }
        Err(e) => return Err(HookError::MouseHook(e.to_string())),
    };

    let registered = unsafe {
        RegisterHotKey(
            None,
            EXIT_HOTKEY_ID,
            hotkey_modifiers(exit_hotkey),
            exit_hotkey.virtual_key(),
        )
    };
    if let Err(e) = registered {
        unsafe {
            let _ = UnhookWindowsHookEx(hook);
        }
        return Err(HookError::Hotkey {
            hotkey: exit_hotkey.to_string(),
            reason: e.to_string(),
        });
    }

    Ok(hook)
}

fn uninstall(hook: HHOOK) {
    unsafe {
        if let Err(e) = UnregisterHotKey(None, EXIT_HOTKEY_ID) {
            warn!(?e, "failed to unregister exit hotkey");
        }
        if let Err(e) = UnhookWindowsHookEx(hook) {
            warn!(?e, "failed to remove mouse hook");
        }
    }
    debug!("mouse hook and exit hotkey removed");
}

/// Pump messages until quit, failure or the exit hotkey
fn pump(msg: &mut MSG) -> LoopExit {
    loop {
        let r = unsafe { GetMessageW(msg, None, 0, 0) };
        match classify_message(r.0, msg.message, msg.wParam.0) {
            Some(LoopExit::Failed) => {
                error!(e = %windows::core::Error::from_win32(), "GetMessageW failed");
                return LoopExit::Failed;
            }
            Some(exit @ LoopExit::Hotkey(_)) => {
                info!("exit hotkey pressed");
                return exit;
            }
            Some(exit) => return exit,
            None => {}
        }

        unsafe {
            let _ = TranslateMessage(&*msg);
            DispatchMessageW(&*msg);
        }
    }
}

/// Feeds the monitor and always passes the event down the chain
unsafe extern "system" fn mouse_hook_proc(
    n_code: i32,
    w_param: WPARAM,
    l_param: LPARAM,
) -> LRESULT {
    if n_code == HC_ACTION as i32 {
        let info = &*(l_param.0 as *const MSLLHOOKSTRUCT);
        let kind = if w_param.0 as u32 == WM_MOUSEMOVE {
            PointerKind::Move
        } else {
            PointerKind::Other
        };
        let event = PointerEvent {
            kind,
            position: Point::new(info.pt.x, info.pt.y),
        };

        MONITOR.with(|slot| {
            // A re-entrant callback would find the slot borrowed; skip it
            if let Ok(mut slot) = slot.try_borrow_mut() {
                if let Some(monitor) = slot.as_mut() {
                    monitor.on_pointer(&event);
                }
            }
        });
    }

    CallNextHookEx(HHOOK(std::ptr::null_mut()), n_code, w_param, l_param)
}
