//! Key code tables.
//!
//! Virtual key codes are the only key representation in this workspace: the
//! emulator sends them through `SendInput` and the hook listener receives them
//! in `KBDLLHOOKSTRUCT::vkCode`. Hardware scan codes are never stored here;
//! they are derived per keystroke through [`crate::input::ScanCodeSource`].

pub mod key_code;

pub use key_code::{KeyCode, KeyCodeParseError};
