//! Builds one [`InputRecord`] per logical action.
//!
//! The builder is total: every action/key combination produces a record.
//!
//! - Mouse records carry the *current* pointer position in `dx`/`dy` and only
//!   the button flag. No `MOUSEEVENTF_MOVE` is set, so the pointer does not
//!   move; moving is a separate operation.
//! - Keyboard records carry the virtual key verbatim, a scan code looked up
//!   through [`ScanCodeSource`], the direction flag, and `KEYEVENTF_EXTENDEDKEY`
//!   on every record so the key is treated as a distinct physical key
//!   regardless of layout ambiguities.

use crate::geometry::Point;
use crate::keymap::KeyCode;

use super::action::{KeyboardAction, MouseAction};
use super::record::{flags, InputBatch, InputRecord, KeyboardRecord, MouseRecord};

/// Virtual-key → hardware scan code translation (`MapVirtualKeyW` with
/// `MAPVK_VK_TO_VSC` on Windows).
pub trait ScanCodeSource {
    /// Returns the scan code for `vk`, or `0` if the layout has none.
    fn scan_code(&self, vk: u16) -> u16;
}

impl<F> ScanCodeSource for F
where
    F: Fn(u16) -> u16,
{
    fn scan_code(&self, vk: u16) -> u16 {
        self(vk)
    }
}

/// Stateless record factory.
pub struct InputRecordBuilder;

impl InputRecordBuilder {
    /// Mouse button record at `position`.
    pub fn for_mouse(position: Point, action: MouseAction) -> InputRecord {
        InputRecord::Mouse(MouseRecord {
            dx: position.x,
            dy: position.y,
            mouse_data: 0,
            flags: action.flag(),
        })
    }

    /// Keyboard record for `key`.
    pub fn for_keyboard(
        key: KeyCode,
        action: KeyboardAction,
        scan_codes: &dyn ScanCodeSource,
    ) -> InputRecord {
        let vk = key.vk();
        InputRecord::Keyboard(KeyboardRecord {
            vk,
            scan: scan_codes.scan_code(vk),
            flags: flags::KEYEVENTF_EXTENDEDKEY | action.flag(),
        })
    }

    /// One keyboard record per action, in order. `None` if `actions` is empty.
    pub fn keyboard_batch(
        key: KeyCode,
        actions: &[KeyboardAction],
        scan_codes: &dyn ScanCodeSource,
    ) -> Option<InputBatch> {
        let records = actions
            .iter()
            .map(|&action| Self::for_keyboard(key, action, scan_codes))
            .collect();
        InputBatch::new(records)
    }

    /// One mouse record per action, in order. `None` if `actions` is empty.
    pub fn mouse_batch(position: Point, actions: &[MouseAction]) -> Option<InputBatch> {
        let records = actions
            .iter()
            .map(|&action| Self::for_mouse(position, action))
            .collect();
        InputBatch::new(records)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
