//! Recording input dispatcher for tests.
//!
//! [`RecordingDispatcher`] keeps every submitted batch and every cursor move
//! in memory instead of touching the OS, so tests can assert exactly what a
//! facade would have injected and in what order.
//!
//! # Usage in tests
//!
//! ```ignore
//! let dispatcher = Arc::new(RecordingDispatcher::new());
//! let keyboard = Keyboard::new(dispatcher.clone());
//!
//! keyboard.push(KeyCode::A).await?;
//!
//! assert_eq!(dispatcher.batches().len(), 1);
//! ```

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Mutex, PoisonError};

use mimic_core::{InputBatch, Point};

use crate::application::dispatcher::InputDispatcher;

/// Sentinel for "report every record as injected".
const INJECT_ALL: u32 = u32::MAX;

/// An in-memory dispatcher with a simulated cursor.
#[derive(Debug)]
pub struct RecordingDispatcher {
    batches: Mutex<Vec<InputBatch>>,
    cursor: Mutex<Point>,
    cursor_moves: Mutex<Vec<Point>>,
    fail_cursor_query: AtomicBool,
    injected_limit: AtomicU32,
}

impl RecordingDispatcher {
    /// Cursor starts at the origin.
    pub fn new() -> Self {
        Self::with_cursor(Point::ORIGIN)
    }

    pub fn with_cursor(cursor: Point) -> Self {
        Self {
            batches: Mutex::new(Vec::new()),
            cursor: Mutex::new(cursor),
            cursor_moves: Mutex::new(Vec::new()),
            fail_cursor_query: AtomicBool::new(false),
            injected_limit: AtomicU32::new(INJECT_ALL),
        }
    }

    /// Every batch passed to `send_input`, oldest first.
    pub fn batches(&self) -> Vec<InputBatch> {
        self.batches
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Every position passed to `set_cursor_position`, oldest first.
    pub fn cursor_moves(&self) -> Vec<Point> {
        self.cursor_moves
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// When `true`, `cursor_position` returns `None`.
    pub fn fail_cursor_query(&self, fail: bool) {
        self.fail_cursor_query.store(fail, Ordering::SeqCst);
    }

    /// Caps the injected count reported by `send_input`.
    pub fn limit_injected(&self, limit: u32) {
        self.injected_limit.store(limit, Ordering::SeqCst);
    }
}

impl Default for RecordingDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl InputDispatcher for RecordingDispatcher {
    fn send_input(&self, batch: &InputBatch) -> u32 {
        self.batches
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(batch.clone());
        let len = u32::try_from(batch.len()).unwrap_or(u32::MAX);
        len.min(self.injected_limit.load(Ordering::SeqCst))
    }

    fn cursor_position(&self) -> Option<Point> {
        if self.fail_cursor_query.load(Ordering::SeqCst) {
            return None;
        }
        Some(*self.cursor.lock().unwrap_or_else(PoisonError::into_inner))
    }

    fn set_cursor_position(&self, position: Point) {
        *self.cursor.lock().unwrap_or_else(PoisonError::into_inner) = position;
        self.cursor_moves
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(position);
    }

    /// Identity mapping: the scan code equals the virtual key.
    fn scan_code(&self, vk: u16) -> u16 {
        vk
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use mimic_core::{InputRecordBuilder, MouseAction};

    #[test]
    fn test_send_input_records_batch_and_reports_full_count() {
        let dispatcher = RecordingDispatcher::new();
        let batch = InputRecordBuilder::mouse_batch(Point::ORIGIN, &MouseAction::LEFT_DOUBLE_CLICK)
            .expect("non-empty");

        let injected = dispatcher.send_input(&batch);

        assert_eq!(injected, 4);
        assert_eq!(dispatcher.batches(), vec![batch]);
    }

    #[test]
    fn test_limit_injected_caps_reported_count() {
        let dispatcher = RecordingDispatcher::new();
        dispatcher.limit_injected(1);
        let batch = InputRecordBuilder::mouse_batch(Point::ORIGIN, &MouseAction::LEFT_CLICK)
            .expect("non-empty");

        assert_eq!(dispatcher.send_input(&batch), 1);
    }

    #[test]
    fn test_set_cursor_updates_simulated_position() {
        let dispatcher = RecordingDispatcher::new();

        dispatcher.set_cursor_position(Point::new(3, 9));

        assert_eq!(dispatcher.cursor_position(), Some(Point::new(3, 9)));
        assert_eq!(dispatcher.cursor_moves(), vec![Point::new(3, 9)]);
    }
}
