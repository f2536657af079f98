//! # mimic-core
//!
//! Shared, OS-free foundation for InputMimic: the virtual key table, the
//! synthetic input model, screen geometry, the observer type used for every
//! public event, and hook payload decoding.
//!
//! Nothing in this crate calls the operating system. The emulation crate
//! (`mimic-emulate`) and the hook crate (`mimic-hook`) supply the native
//! adapters and depend on the types defined here.
//!
//! - **`keymap`** – [`KeyCode`], a closed enum of virtual key codes with a
//!   total decoder ([`KeyCode::from_raw`] never fails).
//! - **`input`** – [`InputAction`], [`InputRecord`], [`InputBatch`] and the
//!   [`InputRecordBuilder`] that produces one record per action.
//! - **`geometry`** – [`Point`], [`Size`], [`Rect`] and [`Color`].
//! - **`event`** – [`Event<T>`], a synchronous multicast event.
//! - **`hook`** – [`RawKeyEvent`] and [`decode_hook_message`].

pub mod event;
pub mod geometry;
pub mod hook;
pub mod input;
pub mod keymap;

pub use event::{Event, KeyEventArgs, MouseEventArgs, SubscriptionId};
pub use geometry::{Color, Point, Rect, Size};
pub use hook::{decode_hook_message, HookResult, KeyDirection, RawKeyEvent};
pub use input::{
    InputAction, InputBatch, InputRecord, InputRecordBuilder, KeyboardAction, MouseAction,
    ScanCodeSource,
};
pub use keymap::{KeyCode, KeyCodeParseError};
