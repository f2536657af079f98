//! Rate limiter shared by the keyboard and mouse facades.
//!
//! [`Emulator::execute`] runs an operation on a blocking worker, then waits
//! the configured interval before returning. The wait happens whether or not
//! the operation succeeded, so back-to-back calls are always spaced by at
//! least the interval.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, trace};

use super::command::Command;

/// Post-operation delay used when none is configured.
pub const DEFAULT_INTERVAL_MS: u64 = 200;

/// Smallest accepted interval.
pub const MIN_INTERVAL_MS: u64 = 100;

/// Error type for emulator operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EmulatorError {
    #[error("interval {value} ms is below the minimum of {min} ms")]
    IntervalOutOfRange { value: u64, min: u64 },
    #[error("no action to execute")]
    MissingAction,
    #[error("input worker failed: {0}")]
    Worker(String),
}

/// Interval-enforcing executor.
#[derive(Debug)]
pub struct Emulator {
    interval_ms: AtomicU64,
}

impl Emulator {
    pub fn new() -> Self {
        Self {
            interval_ms: AtomicU64::new(DEFAULT_INTERVAL_MS),
        }
    }

    /// # Errors
    ///
    /// [`EmulatorError::IntervalOutOfRange`] when `interval_ms` is below
    /// [`MIN_INTERVAL_MS`].
    pub fn with_interval_ms(interval_ms: u64) -> Result<Self, EmulatorError> {
        let emulator = Self::new();
        emulator.set_interval_ms(interval_ms)?;
        Ok(emulator)
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms.load(Ordering::SeqCst)
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms())
    }

    /// Sets the post-operation delay. On error the previous value is kept.
    ///
    /// # Errors
    ///
    /// [`EmulatorError::IntervalOutOfRange`] when `interval_ms` is below
    /// [`MIN_INTERVAL_MS`].
    pub fn set_interval_ms(&self, interval_ms: u64) -> Result<(), EmulatorError> {
        if interval_ms < MIN_INTERVAL_MS {
            return Err(EmulatorError::IntervalOutOfRange {
                value: interval_ms,
                min: MIN_INTERVAL_MS,
            });
        }
        self.interval_ms.store(interval_ms, Ordering::SeqCst);
        debug!(interval_ms, "emulator interval updated");
        Ok(())
    }

    /// Runs `operation` on a blocking worker, then sleeps for the interval.
    ///
    /// # Errors
    ///
    /// [`EmulatorError::Worker`] if the operation panicked. The interval is
    /// still waited out before the error is returned.
    pub async fn execute<F, R>(&self, operation: F) -> Result<R, EmulatorError>
    where
        F: FnOnce() -> R + Send + 'static,
        R: Send + 'static,
    {
        let outcome = tokio::task::spawn_blocking(operation).await;
        let interval = self.interval();
        trace!(?interval, "waiting out emulator interval");
        tokio::time::sleep(interval).await;
        outcome.map_err(|e| EmulatorError::Worker(e.to_string()))
    }

    /// Executes a boxed command.
    ///
    /// # Errors
    ///
    /// [`EmulatorError::MissingAction`] for `None`, returned before any work
    /// or delay. Otherwise as [`Emulator::execute`].
    pub async fn execute_command(
        &self,
        command: Option<Box<dyn Command>>,
    ) -> Result<(), EmulatorError> {
        let command = command.ok_or(EmulatorError::MissingAction)?;
        self.execute(move || command.execute()).await
    }
}

impl Default for Emulator {
    fn default() -> Self {
        Self::new()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
