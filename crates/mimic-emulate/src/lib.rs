//! mimic-emulate library entry point.
//!
//! Re-exports all public modules so that integration tests in `tests/`
//! and the `mimic` binary share the same module tree.
//!
//! # How a synthetic key press travels
//!
//! ```text
//! Keyboard::push(KeyCode::A)
//!  └─ Emulator::execute            -- background worker, then the fixed post-delay
//!      └─ KeyboardActionCommand    -- [KeyDown, KeyUp]
//!          └─ InputRecordBuilder   -- one record per action (mimic-core)
//!              └─ InputDispatcher  -- one SendInput call for the whole batch
//! ```
//!
//! The dispatcher is a port: `infrastructure::dispatch::windows` talks to the
//! OS, `infrastructure::dispatch::mock` records batches for tests.

/// Application layer: facades, commands, the rate limiter and port traits.
pub mod application;

/// Infrastructure layer: OS adapters, mocks and configuration storage.
pub mod infrastructure;
