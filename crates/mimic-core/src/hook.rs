//! Low-level keyboard hook payload decoding.
//!
//! A `WH_KEYBOARD_LL` callback receives `(nCode, wParam, lParam)`: `wParam`
//! is the window message kind and `lParam` points to a `KBDLLHOOKSTRUCT`
//! whose first field is the virtual key code. This module turns the message
//! kind and that key code into a [`RawKeyEvent`]. Reading the struct itself
//! stays in the OS adapter.

use tracing::trace;

use crate::keymap::KeyCode;

/// Window message constants delivered as `wParam`.
pub mod messages {
    pub const WM_KEYDOWN: u32 = 0x0100;
    pub const WM_KEYUP: u32 = 0x0101;
    pub const WM_SYSKEYDOWN: u32 = 0x0104;
    pub const WM_SYSKEYUP: u32 = 0x0105;
}

/// `nCode` value meaning the callback carries an event to process.
pub const HC_ACTION: i32 = 0;

/// Direction of a hooked key transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyDirection {
    Down,
    Up,
}

/// A decoded hook callback. Ephemeral; never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RawKeyEvent {
    pub key_code: KeyCode,
    pub direction: KeyDirection,
}

impl RawKeyEvent {
    pub const fn down(key_code: KeyCode) -> Self {
        Self {
            key_code,
            direction: KeyDirection::Down,
        }
    }

    pub const fn up(key_code: KeyCode) -> Self {
        Self {
            key_code,
            direction: KeyDirection::Up,
        }
    }
}

/// What the hook callback does with the event after handlers have run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HookResult {
    /// Forward to the next hook in the chain.
    #[default]
    Continue,
    /// Swallow the event (the callback returns non-zero without forwarding).
    Suppress,
}

/// Classifies a hook message.
///
/// `WM_KEYDOWN`/`WM_SYSKEYDOWN` become [`KeyDirection::Down`] and
/// `WM_KEYUP`/`WM_SYSKEYUP` become [`KeyDirection::Up`]. Any other message
/// kind yields `None`. The key code is decoded with [`KeyCode::from_raw`], so
/// an unknown value produces [`KeyCode::None`] rather than an error.
pub fn decode_hook_message(message: u32, vk_code: u32) -> Option<RawKeyEvent> {
    let direction = match message {
        messages::WM_KEYDOWN | messages::WM_SYSKEYDOWN => KeyDirection::Down,
        messages::WM_KEYUP | messages::WM_SYSKEYUP => KeyDirection::Up,
        other => {
            trace!(message = other, "ignoring non-key hook message");
            return None;
        }
    };
    let key_code = i32::try_from(vk_code).map_or(KeyCode::None, KeyCode::from_raw);
    Some(RawKeyEvent {
        key_code,
        direction,
    })
}
