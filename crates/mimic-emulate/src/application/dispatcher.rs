//! The input dispatcher port.
//!
//! A dispatcher hands a whole [`InputBatch`] to the OS in a single call, so a
//! gesture is never split across two submissions. It also owns the pointer
//! position getter/setter used by move commands and by click commands that
//! capture the position when they are built.
//!
//! Submission is fire-and-forget: the OS-reported injected count is logged,
//! not returned to callers as an error.

use mimic_core::{InputBatch, Point};
use tracing::{trace, warn};

/// Platform-agnostic input submission.
///
/// Each supported OS provides an implementation in the infrastructure layer.
#[cfg_attr(test, mockall::automock)]
pub trait InputDispatcher: Send + Sync {
    /// Submits every record of `batch` in one OS call and returns the number
    /// of events the OS reports as injected.
    fn send_input(&self, batch: &InputBatch) -> u32;

    /// Current pointer position, or `None` if the OS query failed.
    fn cursor_position(&self) -> Option<Point>;

    /// Moves the pointer to an absolute position.
    fn set_cursor_position(&self, position: Point);

    /// Hardware scan code for a virtual key, `0` when the layout has none.
    fn scan_code(&self, vk: u16) -> u16;
}

/// Submits `batch` through `dispatcher` and logs the outcome.
pub fn dispatch(dispatcher: &dyn InputDispatcher, batch: &InputBatch) {
    let submitted = batch.len();
    let injected = dispatcher.send_input(batch);
    trace!(submitted, injected, "input batch dispatched");
    if (injected as usize) < submitted {
        warn!(
            submitted,
            injected, "OS injected fewer input events than submitted"
        );
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
