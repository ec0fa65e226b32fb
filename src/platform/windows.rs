//! Win32 implementation of the input facilities

use windows::Win32::Foundation::{POINT, RECT};
use windows::Win32::UI::Input::KeyboardAndMouse::{
    GetAsyncKeyState, SendInput, HOT_KEY_MODIFIERS, INPUT, INPUT_0, INPUT_KEYBOARD, KEYBDINPUT,
    KEYBD_EVENT_FLAGS, KEYEVENTF_KEYUP, MOD_ALT, MOD_CONTROL, MOD_SHIFT, MOD_WIN, VIRTUAL_KEY,
    VK_CONTROL, VK_LBUTTON, VK_LWIN, VK_MENU, VK_RBUTTON, VK_RWIN, VK_SHIFT, VK_TAB,
};
use windows::Win32::UI::WindowsAndMessaging::{GetCursorPos, GetDesktopWindow, GetWindowRect};

use super::{InputBackend, PlatformError};
use crate::hotkey::{HotkeyBinding, Key, KeyAction, KeyStroke, ModifierState, MouseButtons};
use crate::state::{Point, Rect};

/// Live Win32 input state and `SendInput`
#[derive(Debug, Default, Clone, Copy)]
pub struct Win32Input;

impl InputBackend for Win32Input {
    fn mouse_buttons(&self) -> MouseButtons {
        MouseButtons {
            left: is_down(VK_LBUTTON),
            right: is_down(VK_RBUTTON),
        }
    }

    fn modifiers(&self) -> ModifierState {
        // GetAsyncKeyState reads the global state, so it is valid off the hook thread
        ModifierState {
            shift: is_down(VK_SHIFT),
            control: is_down(VK_CONTROL),
            alt: is_down(VK_MENU),
            left_super: is_down(VK_LWIN),
            right_super: is_down(VK_RWIN),
        }
    }

    fn cursor_position(&self) -> Result<Point, PlatformError> {
        let mut pt = POINT::default();
        unsafe { GetCursorPos(&mut pt) }
            .map_err(|e| PlatformError::CursorPosition(e.to_string()))?;
        Ok(Point::new(pt.x, pt.y))
    }

    fn inject(&self, strokes: &[KeyStroke]) -> usize {
        let inputs: Vec<INPUT> = strokes.iter().map(keyboard_input).collect();
        unsafe { SendInput(&inputs, std::mem::size_of::<INPUT>() as i32) as usize }
    }
}

/// Bounds of the primary desktop window
pub fn desktop_bounds() -> Result<Rect, PlatformError> {
    let mut rect = RECT::default();
    unsafe { GetWindowRect(GetDesktopWindow(), &mut rect) }
        .map_err(|e| PlatformError::DesktopBounds(e.to_string()))?;
    Ok(Rect {
        top: rect.top,
        left: rect.left,
        right: rect.right,
        bottom: rect.bottom,
    })
}

/// `RegisterHotKey` modifier mask for `binding`
pub fn hotkey_modifiers(binding: &HotkeyBinding) -> HOT_KEY_MODIFIERS {
    let m = &binding.modifiers;
    let mut mods = HOT_KEY_MODIFIERS(0);
    if m.control {
        mods |= MOD_CONTROL;
    }
    if m.alt {
        mods |= MOD_ALT;
    }
    if m.shift {
        mods |= MOD_SHIFT;
    }
    if m.super_key {
        mods |= MOD_WIN;
    }
    mods
}

fn is_down(vk: VIRTUAL_KEY) -> bool {
    unsafe { (GetAsyncKeyState(vk.0 as i32) as u16 & 0x8000) != 0 }
}

fn virtual_key(key: Key) -> VIRTUAL_KEY {
    match key {
        Key::LeftSuper => VK_LWIN,
        Key::Tab => VK_TAB,
    }
}

fn keyboard_input(stroke: &KeyStroke) -> INPUT {
    let flags = match stroke.action {
        KeyAction::Press => KEYBD_EVENT_FLAGS(0),
        KeyAction::Release => KEYEVENTF_KEYUP,
    };
    INPUT {
        r#type: INPUT_KEYBOARD,
        Anonymous: INPUT_0 {
            ki: KEYBDINPUT {
                wVk: virtual_key(stroke.key),
                wScan: 0,
                dwFlags: flags,
                time: 0,
                dwExtraInfo: 0,
            },
        },
    }
}
