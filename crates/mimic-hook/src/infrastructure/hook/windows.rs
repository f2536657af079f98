//! Windows `WH_KEYBOARD_LL` hook installer.
//!
//! Each installed hook owns a dedicated thread that calls
//! `SetWindowsHookExW`, reports the outcome back to [`WindowsHookInstaller::install`],
//! and then pumps messages until it receives `WM_QUIT`. Low-level hook
//! callbacks are delivered on that thread, so the sink lives in a
//! thread-local and every hook instance is independent.
//!
//! # Safety
//!
//! This module uses `unsafe` code exclusively for Windows API FFI calls.
//! All `unsafe` blocks are annotated with `// SAFETY:` comments.

#![cfg(target_os = "windows")]

use std::cell::RefCell;
use std::fmt;
use std::sync::mpsc;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use tracing::{debug, warn};
use windows::Win32::Foundation::{LPARAM, LRESULT, WPARAM};
use windows::Win32::System::LibraryLoader::GetModuleHandleW;
use windows::Win32::System::Threading::GetCurrentThreadId;
use windows::Win32::UI::WindowsAndMessaging::{
    CallNextHookEx, DispatchMessageW, GetMessageW, PeekMessageW, PostThreadMessageW,
    SetWindowsHookExW, TranslateMessage, UnhookWindowsHookEx, KBDLLHOOKSTRUCT, MSG, PM_NOREMOVE,
    WH_KEYBOARD_LL, WM_QUIT,
};

use mimic_core::HookResult;

use crate::application::listener::{
    handle_hook_call, HookError, HookInstaller, HookSink, InstalledHook,
};

thread_local! {
    /// Sink for the hook installed on the current thread.
    static SINK: RefCell<Option<Arc<dyn HookSink>>> = const { RefCell::new(None) };
}

/// Windows implementation of [`HookInstaller`].
#[derive(Debug, Default)]
pub struct WindowsHookInstaller;

impl WindowsHookInstaller {
    pub fn new() -> Self {
        Self
    }
}

impl HookInstaller for WindowsHookInstaller {
    fn install(&self, sink: Arc<dyn HookSink>) -> Result<Box<dyn InstalledHook>, HookError> {
        let (ready_tx, ready_rx) = mpsc::channel::<Result<u32, String>>();

        let thread = thread::Builder::new()
            .name("mimic-hook-loop".to_string())
            .spawn(move || run_hook_thread(sink, ready_tx))
            .map_err(|e| HookError::InstallFailed(e.to_string()))?;

        let thread_id = match ready_rx.recv() {
            Ok(Ok(thread_id)) => thread_id,
            Ok(Err(reason)) => {
                let _ = thread.join();
                return Err(HookError::InstallFailed(reason));
            }
            Err(_) => {
                let _ = thread.join();
                return Err(HookError::InstallFailed(
                    "hook thread exited before reporting".to_string(),
                ));
            }
        };

        debug!(thread_id, "WH_KEYBOARD_LL hook thread running");
        Ok(Box::new(WindowsInstalledHook {
            thread_id,
            thread: Some(thread),
        }))
    }
}

/// A running hook thread. Uninstalling posts `WM_QUIT` and joins it.
struct WindowsInstalledHook {
    thread_id: u32,
    thread: Option<JoinHandle<()>>,
}

impl InstalledHook for WindowsInstalledHook {
    fn uninstall(&mut self) {
        let thread_id = self.thread_id;
        // SAFETY: GetCurrentThreadId has no preconditions.
        let on_hook_thread = unsafe { GetCurrentThreadId() } == thread_id;
        stop_hook_thread(
            &mut self.thread,
            // SAFETY: posting to a thread id has no memory-safety
            // preconditions; the thread created its message queue before
            // reporting its id.
            || unsafe { PostThreadMessageW(thread_id, WM_QUIT, WPARAM(0), LPARAM(0)) },
            on_hook_thread,
        );
    }
}

/// Asks the hook thread to quit and joins it.
///
/// The handle is only taken once `post_quit` succeeds, so a failed post
/// leaves the hook owned and a later uninstall retries. When called on the
/// hook thread itself (a handler disposing its listener) the join is skipped;
/// the loop exits once the callback returns.
fn stop_hook_thread<E: fmt::Display>(
    thread: &mut Option<JoinHandle<()>>,
    post_quit: impl FnOnce() -> Result<(), E>,
    on_hook_thread: bool,
) {
    if thread.is_none() {
        return;
    }
    if let Err(e) = post_quit() {
        warn!(error = %e, "failed to post WM_QUIT to hook thread");
        return;
    }
    let Some(handle) = thread.take() else {
        return;
    };
    if on_hook_thread {
        return;
    }
    if handle.join().is_err() {
        warn!("hook thread panicked");
    }
}

impl Drop for WindowsInstalledHook {
    fn drop(&mut self) {
        self.uninstall();
    }
}

/// Body of the dedicated hook thread.
fn run_hook_thread(sink: Arc<dyn HookSink>, ready: mpsc::Sender<Result<u32, String>>) {
    SINK.with(|slot| *slot.borrow_mut() = Some(sink));

    let mut msg = MSG::default();
    // SAFETY: forces creation of this thread's message queue so that
    // PostThreadMessageW cannot race ahead of it.
    unsafe {
        let _ = PeekMessageW(&mut msg, None, 0, 0, PM_NOREMOVE);
    }

    // SAFETY: GetModuleHandleW(None) returns this executable's module handle.
    let module = match unsafe { GetModuleHandleW(None) } {
        Ok(module) => module,
        Err(e) => {
            let _ = ready.send(Err(format!("GetModuleHandleW failed: {e}")));
            return;
        }
    };

    // SAFETY: `keyboard_hook_proc` matches HOOKPROC and this thread pumps
    // messages for as long as the hook is installed.
    let hook = match unsafe {
        SetWindowsHookExW(WH_KEYBOARD_LL, Some(keyboard_hook_proc), Some(module.into()), 0)
    } {
        Ok(hook) => hook,
        Err(e) => {
            let _ = ready.send(Err(format!("SetWindowsHookExW failed: {e}")));
            return;
        }
    };

    // SAFETY: GetCurrentThreadId has no preconditions.
    let thread_id = unsafe { GetCurrentThreadId() };
    if ready.send(Ok(thread_id)).is_err() {
        // Installer gave up waiting; remove the hook straight away.
        // SAFETY: `hook` was returned by SetWindowsHookExW on this thread.
        let _ = unsafe { UnhookWindowsHookEx(hook) };
        return;
    }

    // SAFETY: standard Win32 GetMessage/DispatchMessage loop; GetMessageW
    // returns 0 on WM_QUIT and -1 on error, both of which end the loop.
    unsafe {
        while GetMessageW(&mut msg, None, 0, 0).0 > 0 {
            let _ = TranslateMessage(&msg);
            DispatchMessageW(&msg);
        }
        if let Err(e) = UnhookWindowsHookEx(hook) {
            warn!(error = %e, "UnhookWindowsHookEx failed");
        }
    }

    SINK.with(|slot| slot.borrow_mut().take());
    debug!("hook thread exiting");
}

/// Low-level keyboard hook callback.
///
/// # Safety
///
/// Called by Windows on the hook thread. Must return quickly or the OS
/// silently removes the hook.
unsafe extern "system" fn keyboard_hook_proc(
    n_code: i32,
    w_param: WPARAM,
    l_param: LPARAM,
) -> LRESULT {
    if n_code >= 0 {
        // SAFETY: for n_code >= 0, l_param points to a KBDLLHOOKSTRUCT.
        let vk_code = unsafe { (*(l_param.0 as *const KBDLLHOOKSTRUCT)).vkCode };
        let message = w_param.0 as u32;
        let result = SINK.with(|slot| {
            slot.borrow()
                .as_ref()
                .map_or(HookResult::Continue, |sink| {
                    handle_hook_call(sink.as_ref(), n_code, message, vk_code)
                })
        });
        if result == HookResult::Suppress {
            return LRESULT(1);
        }
    }

    // SAFETY: forwards to the next hook with the arguments we received.
    unsafe { CallNextHookEx(None, n_code, w_param, l_param) }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
