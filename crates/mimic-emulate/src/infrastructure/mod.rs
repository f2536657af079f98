//! Infrastructure layer for synthetic input.
//!
//! Contains the OS-facing adapters and configuration storage.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `mimic_core`, but MUST NOT be imported by the `application` layer outside
//! of tests.
//!
//! # Sub-modules
//!
//! - **`dispatch`** – implementations of `InputDispatcher`. The Windows
//!   adapter calls `SendInput`; `RecordingDispatcher` records batches.
//! - **`display`** – implementations of `ScreenReader`. The Windows adapter
//!   uses GDI; `MockScreenReader` serves a solid-colour screen.
//! - **`storage`** – TOML configuration file.

pub mod dispatch;
pub mod display;
pub mod storage;
