//! Key definitions and input state snapshots
//!
//! Provides the synthetic chord injected when the corner fires, the exit
//! hotkey binding, and structs for tracking which modifiers and mouse
//! buttons are currently held.

/// Keys the daemon ever synthesizes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Left Windows / Super key
    LeftSuper,
    /// Tab key
    Tab,
}

/// Direction of a synthetic key event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Press,
    Release,
}

/// A single synthetic key event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyStroke {
    pub key: Key,
    pub action: KeyAction,
}

impl KeyStroke {
    pub const fn press(key: Key) -> Self {
        Self {
            key,
            action: KeyAction::Press,
        }
    }

    pub const fn release(key: Key) -> Self {
        Self {
            key,
            action: KeyAction::Release,
        }
    }
}

/// Super+Tab, which opens Task View
pub const TASK_VIEW_CHORD: [KeyStroke; 4] = [
    KeyStroke::press(Key::LeftSuper),
    KeyStroke::press(Key::Tab),
    KeyStroke::release(Key::Tab),
    KeyStroke::release(Key::LeftSuper),
];

/// Tracks which modifier keys are currently pressed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModifierState {
    /// Either Shift key is held
    pub shift: bool,
    /// Either Control key is held
    pub control: bool,
    /// Either Alt key is held
    pub alt: bool,
    /// Left Windows / Super key is held
    pub left_super: bool,
    /// Right Windows / Super key is held
    pub right_super: bool,
}

impl ModifierState {
    /// Check if all modifiers are released
    pub fn is_empty(&self) -> bool {
        !self.shift && !self.control && !self.alt && !self.left_super && !self.right_super
    }
}

/// Tracks which mouse buttons are currently pressed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MouseButtons {
    pub left: bool,
    pub right: bool,
}

impl MouseButtons {
    /// A held button usually means a drag is in progress
    pub fn any(&self) -> bool {
        self.left || self.right
    }
}

/// Modifiers that must accompany the hotkey's key
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HotkeyModifiers {
    pub control: bool,
    pub alt: bool,
    pub shift: bool,
    pub super_key: bool,
}

/// A global modifier+key chord
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HotkeyBinding {
    pub modifiers: HotkeyModifiers,
    /// Uppercase ASCII letter or digit, which doubles as its virtual-key code
    pub key: char,
}

impl HotkeyBinding {
    /// Ctrl+Alt+C, which shuts the daemon down
    pub const fn exit() -> Self {
        Self {
            modifiers: HotkeyModifiers {
                control: true,
                alt: true,
                shift: false,
                super_key: false,
            },
            key: 'C',
        }
    }

    /// Virtual-key code for `key`
    pub fn virtual_key(&self) -> u32 {
        self.key.to_ascii_uppercase() as u32
    }
}

impl std::fmt::Display for HotkeyBinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let m = &self.modifiers;
        if m.control {
            write!(f, "Ctrl+")?;
        }
        if m.alt {
            write!(f, "Alt+")?;
        }
        if m.shift {
            write!(f, "Shift+")?;
        }
        if m.super_key {
            write!(f, "Win+")?;
        }
        write!(f, "{}", self.key)
    }
}
