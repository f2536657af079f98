//! Synthetic input model: actions, native-shaped records, and the builder
//! that turns one into the other.

pub mod action;
pub mod builder;
pub mod record;

pub use action::{InputAction, KeyboardAction, MouseAction};
pub use builder::{InputRecordBuilder, ScanCodeSource};
pub use record::{flags, InputBatch, InputRecord, KeyboardRecord, MouseRecord};
