//! mimic-hook library entry point.
//!
//! Re-exports all public modules so that integration tests in `tests/`
//! and the `mimic-hook` binary share the same module tree.
//!
//! # How a hooked key press travels
//!
//! ```text
//! OS hook chain
//!  └─ native callback (hook thread)       -- infrastructure::hook::windows
//!      └─ handle_hook_call                -- decode message kind + key code
//!          └─ ListenerCore::on_key_event  -- raise KeyDown / KeyUp
//!              └─ subscribers             -- same thread, must return quickly
//! ```
//!
//! Handlers run on the thread the OS delivers the callback on. Slow handlers
//! risk the OS silently removing the hook.

/// Application layer: listener state machine, receiver facade, port traits.
pub mod application;

/// Infrastructure layer: OS hook adapter and the test installer.
pub mod infrastructure;
