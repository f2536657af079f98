//! Platform-shaped input records and batches.
//!
//! [`InputRecord`] is the design-level form of the Win32 `INPUT` structure:
//! a tagged variant instead of a C union. The native adapter converts each
//! record into an `INPUT` with the exact field order and size the OS expects,
//! so nothing outside that adapter depends on the union layout.
//!
//! Records are built fresh for every action and are never reused.

use super::action::{KeyboardAction, MouseAction};

/// Native constants copied into records. Values match `winuser.h`.
pub mod flags {
    pub const INPUT_MOUSE: u32 = 0;
    pub const INPUT_KEYBOARD: u32 = 1;

    pub const MOUSEEVENTF_MOVE: u32 = 0x0001;
    pub const MOUSEEVENTF_LEFTDOWN: u32 = 0x0002;
    pub const MOUSEEVENTF_LEFTUP: u32 = 0x0004;
    pub const MOUSEEVENTF_RIGHTDOWN: u32 = 0x0008;
    pub const MOUSEEVENTF_RIGHTUP: u32 = 0x0010;
    pub const MOUSEEVENTF_MIDDLEDOWN: u32 = 0x0020;
    pub const MOUSEEVENTF_MIDDLEUP: u32 = 0x0040;
    pub const MOUSEEVENTF_ABSOLUTE: u32 = 0x8000;

    pub const KEYEVENTF_KEYDOWN: u32 = 0x0000;
    pub const KEYEVENTF_EXTENDEDKEY: u32 = 0x0001;
    pub const KEYEVENTF_KEYUP: u32 = 0x0002;
}

/// Mouse half of an `INPUT` record (`MOUSEINPUT`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseRecord {
    pub dx: i32,
    pub dy: i32,
    pub mouse_data: u32,
    pub flags: u32,
}

impl MouseRecord {
    /// The button transition encoded in `flags`, if it is exactly one.
    pub fn action(&self) -> Option<MouseAction> {
        MouseAction::from_flag(self.flags)
    }
}

/// Keyboard half of an `INPUT` record (`KEYBDINPUT`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyboardRecord {
    pub vk: u16,
    pub scan: u16,
    pub flags: u32,
}

impl KeyboardRecord {
    pub fn action(&self) -> KeyboardAction {
        if self.flags & flags::KEYEVENTF_KEYUP != 0 {
            KeyboardAction::KeyUp
        } else {
            KeyboardAction::KeyDown
        }
    }

    pub fn is_extended(&self) -> bool {
        self.flags & flags::KEYEVENTF_EXTENDEDKEY != 0
    }
}

/// One synthetic input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputRecord {
    Mouse(MouseRecord),
    Keyboard(KeyboardRecord),
}

impl InputRecord {
    /// The `INPUT::type` discriminant.
    pub const fn kind(&self) -> u32 {
        match self {
            InputRecord::Mouse(_) => flags::INPUT_MOUSE,
            InputRecord::Keyboard(_) => flags::INPUT_KEYBOARD,
        }
    }

    pub fn as_mouse(&self) -> Option<&MouseRecord> {
        match self {
            InputRecord::Mouse(record) => Some(record),
            InputRecord::Keyboard(_) => None,
        }
    }

    pub fn as_keyboard(&self) -> Option<&KeyboardRecord> {
        match self {
            InputRecord::Keyboard(record) => Some(record),
            InputRecord::Mouse(_) => None,
        }
    }
}

/// An ordered, non-empty sequence of records submitted in one OS call.
///
/// Order is significant (down before up). An empty batch cannot be
/// constructed, so a dispatcher never sees one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputBatch {
    records: Vec<InputRecord>,
}

impl InputBatch {
    /// Wraps `records`, or returns `None` if there are none.
    pub fn new(records: Vec<InputRecord>) -> Option<Self> {
        if records.is_empty() {
            None
        } else {
            Some(Self { records })
        }
    }

    pub fn records(&self) -> &[InputRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Always `false`; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, InputRecord> {
        self.records.iter()
    }

    pub fn into_records(self) -> Vec<InputRecord> {
        self.records
    }
}

impl<'a> IntoIterator for &'a InputBatch {
    type Item = &'a InputRecord;
    type IntoIter = std::slice::Iter<'a, InputRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
