//! Persistent storage for the emulator.

pub mod config;
