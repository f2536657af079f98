//! Application layer for the keyboard hook.
//!
//! - **`listener`** – [`listener::KeyboardListener`], the
//!   Uninstalled → Installed → Disposed state machine, and the
//!   [`listener::HookInstaller`] port it installs through.
//! - **`receiver`** – [`receiver::KeyboardReceiver`], a listener that starts
//!   hooking as soon as it is built.

pub mod listener;
pub mod receiver;

pub use listener::{
    handle_hook_call, HookError, HookInstaller, HookSink, InstalledHook, KeyboardListener,
    ListenerCore,
};
pub use receiver::KeyboardReceiver;
