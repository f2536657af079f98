//! In-memory hook installer for tests.
//!
//! [`MockHookInstaller`] stands in for the OS: installing stores the sink,
//! and [`MockHookInstaller::inject`] plays a hook callback through
//! [`handle_hook_call`] exactly as the native hook procedure would.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use mimic_core::hook::HC_ACTION;
use mimic_core::HookResult;

use crate::application::listener::{
    handle_hook_call, HookError, HookInstaller, HookSink, InstalledHook,
};

type SinkSlot = Arc<Mutex<Option<Arc<dyn HookSink>>>>;

/// Records installs and delivers synthetic callbacks to the installed sink.
#[derive(Default)]
pub struct MockHookInstaller {
    sink: SinkSlot,
    installs: AtomicUsize,
    uninstalls: Arc<AtomicUsize>,
    next_failure: Mutex<Option<String>>,
}

impl MockHookInstaller {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the next `install` fail with `reason`.
    pub fn fail_next_install(&self, reason: &str) {
        *self
            .next_failure
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(reason.to_string());
    }

    pub fn install_count(&self) -> usize {
        self.installs.load(Ordering::SeqCst)
    }

    pub fn uninstall_count(&self) -> usize {
        self.uninstalls.load(Ordering::SeqCst)
    }

    pub fn is_installed(&self) -> bool {
        self.sink
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Delivers an `HC_ACTION` callback. `None` when no hook is installed.
    pub fn inject(&self, message: u32, vk_code: u32) -> Option<HookResult> {
        self.inject_raw(HC_ACTION, message, vk_code)
    }

    /// Delivers a callback with an arbitrary `n_code`.
    pub fn inject_raw(&self, n_code: i32, message: u32, vk_code: u32) -> Option<HookResult> {
        // Clone out of the lock so a handler may dispose the listener.
        let sink = self
            .sink
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()?;
        Some(handle_hook_call(sink.as_ref(), n_code, message, vk_code))
    }
}

impl HookInstaller for MockHookInstaller {
    fn install(&self, sink: Arc<dyn HookSink>) -> Result<Box<dyn InstalledHook>, HookError> {
        if let Some(reason) = self
            .next_failure
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        {
            return Err(HookError::InstallFailed(reason));
        }

        self.installs.fetch_add(1, Ordering::SeqCst);
        *self.sink.lock().unwrap_or_else(PoisonError::into_inner) = Some(sink);
        Ok(Box::new(MockInstalledHook {
            sink: Arc::clone(&self.sink),
            uninstalls: Arc::clone(&self.uninstalls),
            removed: false,
        }))
    }
}

struct MockInstalledHook {
    sink: SinkSlot,
    uninstalls: Arc<AtomicUsize>,
    removed: bool,
}

impl InstalledHook for MockInstalledHook {
    fn uninstall(&mut self) {
        if self.removed {
            return;
        }
        self.removed = true;
        self.sink
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        self.uninstalls.fetch_add(1, Ordering::SeqCst);
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
