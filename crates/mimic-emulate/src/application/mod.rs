//! Application layer for synthetic input.
//!
//! - **`dispatcher`** – the [`dispatcher::InputDispatcher`] port through which
//!   every batch reaches the OS.
//! - **`command`** – gestures (push, click, move) turned into batches.
//! - **`emulator`** – the rate limiter shared by the facades.
//! - **`keyboard`**, **`mouse`** – public async facades raising completion
//!   events.
//! - **`display`** – screen bounds, pixel colour and bitmap capture behind
//!   the [`display::ScreenReader`] port.

pub mod command;
pub mod dispatcher;
pub mod display;
pub mod emulator;
pub mod keyboard;
pub mod mouse;

pub use command::{Command, KeyboardActionCommand, MouseActionCommand, MouseMoveCommand};
pub use dispatcher::InputDispatcher;
pub use display::{Display, DisplayError, ScreenReader};
pub use emulator::{Emulator, EmulatorError, DEFAULT_INTERVAL_MS, MIN_INTERVAL_MS};
pub use keyboard::Keyboard;
pub use mouse::Mouse;
