//! Logical input actions.
//!
//! An [`InputAction`] names one half of a gesture (a button going down, a key
//! coming up). Each action maps to exactly one native flag word, which the
//! record builder copies into the outgoing record.

use super::record::flags;

/// One mouse button transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseAction {
    LeftDown,
    LeftUp,
    RightDown,
    RightUp,
    MiddleDown,
    MiddleUp,
}

impl MouseAction {
    /// The `MOUSEEVENTF_*` flag for this transition.
    pub const fn flag(self) -> u32 {
        match self {
            MouseAction::LeftDown => flags::MOUSEEVENTF_LEFTDOWN,
            MouseAction::LeftUp => flags::MOUSEEVENTF_LEFTUP,
            MouseAction::RightDown => flags::MOUSEEVENTF_RIGHTDOWN,
            MouseAction::RightUp => flags::MOUSEEVENTF_RIGHTUP,
            MouseAction::MiddleDown => flags::MOUSEEVENTF_MIDDLEDOWN,
            MouseAction::MiddleUp => flags::MOUSEEVENTF_MIDDLEUP,
        }
    }

    /// Inverse of [`MouseAction::flag`]; `None` for any other flag word.
    pub const fn from_flag(flag: u32) -> Option<Self> {
        match flag {
            flags::MOUSEEVENTF_LEFTDOWN => Some(MouseAction::LeftDown),
            flags::MOUSEEVENTF_LEFTUP => Some(MouseAction::LeftUp),
            flags::MOUSEEVENTF_RIGHTDOWN => Some(MouseAction::RightDown),
            flags::MOUSEEVENTF_RIGHTUP => Some(MouseAction::RightUp),
            flags::MOUSEEVENTF_MIDDLEDOWN => Some(MouseAction::MiddleDown),
            flags::MOUSEEVENTF_MIDDLEUP => Some(MouseAction::MiddleUp),
            _ => None,
        }
    }

    /// Gesture sequences used by the mouse facade.
    pub const LEFT_CLICK: [MouseAction; 2] = [MouseAction::LeftDown, MouseAction::LeftUp];
    pub const RIGHT_CLICK: [MouseAction; 2] = [MouseAction::RightDown, MouseAction::RightUp];
    pub const MIDDLE_CLICK: [MouseAction; 2] = [MouseAction::MiddleDown, MouseAction::MiddleUp];
    pub const LEFT_DOUBLE_CLICK: [MouseAction; 4] = [
        MouseAction::LeftDown,
        MouseAction::LeftUp,
        MouseAction::LeftDown,
        MouseAction::LeftUp,
    ];
}

/// One key transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyboardAction {
    KeyDown,
    KeyUp,
}

impl KeyboardAction {
    /// The `KEYEVENTF_*` direction flag (`0` for key-down).
    pub const fn flag(self) -> u32 {
        match self {
            KeyboardAction::KeyDown => flags::KEYEVENTF_KEYDOWN,
            KeyboardAction::KeyUp => flags::KEYEVENTF_KEYUP,
        }
    }

    /// A full key press: down, then up.
    pub const PUSH: [KeyboardAction; 2] = [KeyboardAction::KeyDown, KeyboardAction::KeyUp];
}

/// A device-tagged input action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputAction {
    Mouse(MouseAction),
    Keyboard(KeyboardAction),
}

impl From<MouseAction> for InputAction {
    fn from(action: MouseAction) -> Self {
        InputAction::Mouse(action)
    }
}

impl From<KeyboardAction> for InputAction {
    fn from(action: KeyboardAction) -> Self {
        InputAction::Keyboard(action)
    }
}
