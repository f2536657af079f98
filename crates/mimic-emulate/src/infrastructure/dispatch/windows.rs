//! Windows input dispatcher via the SendInput API.
//!
//! Each [`InputRecord`] is laid out as a native `INPUT` (the tagged
//! `MOUSEINPUT`/`KEYBDINPUT` union) only here, at the FFI boundary. The whole
//! batch goes to a single `SendInput` call, which the OS applies without
//! interleaving other input.
//!
//! # Safety
//!
//! This module uses `unsafe` code exclusively for Windows API FFI calls.
//! All `unsafe` blocks are annotated with `// SAFETY:` comments.

#![cfg(target_os = "windows")]

use mimic_core::{InputBatch, InputRecord, Point};
use tracing::{debug, warn};
use windows::Win32::Foundation::POINT;
use windows::Win32::UI::Input::KeyboardAndMouse::{
    MapVirtualKeyW, SendInput, INPUT, INPUT_0, INPUT_KEYBOARD, INPUT_MOUSE, KEYBDINPUT,
    KEYBD_EVENT_FLAGS, MAPVK_VK_TO_VSC, MOUSEINPUT, MOUSE_EVENT_FLAGS, VIRTUAL_KEY,
};
use windows::Win32::UI::WindowsAndMessaging::{GetCursorPos, SetCursorPos};

use crate::application::dispatcher::InputDispatcher;

/// Windows implementation of [`InputDispatcher`].
#[derive(Debug, Default)]
pub struct WindowsInputDispatcher;

impl WindowsInputDispatcher {
    pub fn new() -> Self {
        Self
    }
}

impl InputDispatcher for WindowsInputDispatcher {
    fn send_input(&self, batch: &InputBatch) -> u32 {
        let inputs: Vec<INPUT> = batch.iter().map(to_native).collect();
        // SAFETY: `inputs` is a contiguous slice of fully initialised INPUT
        // values and cbsize matches the element layout.
        unsafe { SendInput(&inputs, std::mem::size_of::<INPUT>() as i32) }
    }

    fn cursor_position(&self) -> Option<Point> {
        let mut point = POINT::default();
        // SAFETY: `point` is a valid, writable POINT on the stack.
        match unsafe { GetCursorPos(&mut point) } {
            Ok(()) => Some(Point::new(point.x, point.y)),
            Err(e) => {
                warn!("GetCursorPos failed: {e}");
                None
            }
        }
    }

    fn set_cursor_position(&self, position: Point) {
        // SAFETY: SetCursorPos takes plain integers and has no memory
        // preconditions.
        if let Err(e) = unsafe { SetCursorPos(position.x, position.y) } {
            debug!(%position, "SetCursorPos failed: {e}");
        }
    }

    fn scan_code(&self, vk: u16) -> u16 {
        // SAFETY: MapVirtualKeyW is a pure lookup with no pointer arguments.
        let scan = unsafe { MapVirtualKeyW(u32::from(vk), MAPVK_VK_TO_VSC) };
        u16::try_from(scan).unwrap_or(0)
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Lays out one record as the native tagged union.
fn to_native(record: &InputRecord) -> INPUT {
    match record {
        InputRecord::Mouse(mouse) => INPUT {
            r#type: INPUT_MOUSE,
            Anonymous: INPUT_0 {
                mi: MOUSEINPUT {
                    dx: mouse.dx,
                    dy: mouse.dy,
                    mouseData: mouse.mouse_data,
                    dwFlags: MOUSE_EVENT_FLAGS(mouse.flags),
                    time: 0,
                    dwExtraInfo: 0,
                },
            },
        },
        InputRecord::Keyboard(key) => INPUT {
            r#type: INPUT_KEYBOARD,
            Anonymous: INPUT_0 {
                ki: KEYBDINPUT {
                    wVk: VIRTUAL_KEY(key.vk),
                    wScan: key.scan,
                    dwFlags: KEYBD_EVENT_FLAGS(key.flags),
                    time: 0,
                    dwExtraInfo: 0,
                },
            },
        },
    }
}
