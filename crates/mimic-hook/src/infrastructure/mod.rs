//! Infrastructure layer for the keyboard hook.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `mimic_core`, but MUST NOT be imported by the `application` layer outside
//! of tests.
//!
//! - **`hook`** – implementations of `HookInstaller`. On Windows a
//!   `WH_KEYBOARD_LL` hook on a dedicated message-loop thread;
//!   `MockHookInstaller` lets tests deliver synthetic callbacks.

pub mod hook;
