//! Global keyboard hook listener.
//!
//! # Lifecycle
//!
//! ```text
//! Uninstalled ──start_hook──▶ Installed ──dispose──▶ Disposed
//!      └──────────────────dispose──────────────────────▲
//! ```
//!
//! - Building a [`KeyboardListener`] installs nothing.
//! - [`KeyboardListener::start_hook`] installs through the [`HookInstaller`].
//!   Calling it again while installed is a no-op.
//! - [`KeyboardListener::dispose`] removes the hook. It is idempotent, and
//!   `Drop` calls it, so a forgotten listener never leaks a system-wide hook.
//! - A disposed listener cannot be restarted; build a new one.
//!
//! The callback side is [`ListenerCore`]. It is shared with the installed
//! hook through an `Arc`, and stops raising events the moment the listener is
//! disposed, even if the OS still delivers a late callback.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use mimic_core::hook::HC_ACTION;
use mimic_core::{decode_hook_message, Event, HookResult, KeyDirection, KeyEventArgs, RawKeyEvent};
use thiserror::Error;
use tracing::{debug, info, trace};

/// Error type for hook lifecycle operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HookError {
    #[error("failed to install keyboard hook: {0}")]
    InstallFailed(String),
    #[error("keyboard listener has been disposed")]
    Disposed,
}

/// Receives decoded hook callbacks.
#[cfg_attr(test, mockall::automock)]
pub trait HookSink: Send + Sync {
    /// Called on the OS hook thread for every key message.
    fn on_key_event(&self, event: RawKeyEvent) -> HookResult;
}

/// Installs a process-wide keyboard hook bound to a sink.
pub trait HookInstaller: Send + Sync {
    fn install(&self, sink: Arc<dyn HookSink>) -> Result<Box<dyn InstalledHook>, HookError>;
}

/// Ownership of one installed hook.
pub trait InstalledHook: Send {
    /// Removes the hook. Implementations tolerate repeated calls.
    fn uninstall(&mut self);
}

/// The body of a low-level hook callback, shared by every installer.
///
/// Calls with `n_code != HC_ACTION` and non-key messages are passed along
/// untouched. The caller forwards to the next hook unless this returns
/// [`HookResult::Suppress`].
pub fn handle_hook_call(sink: &dyn HookSink, n_code: i32, message: u32, vk_code: u32) -> HookResult {
    if n_code != HC_ACTION {
        return HookResult::Continue;
    }
    match decode_hook_message(message, vk_code) {
        Some(event) => sink.on_key_event(event),
        None => HookResult::Continue,
    }
}

/// Event fan-out for one listener.
#[derive(Debug, Default)]
pub struct ListenerCore {
    active: AtomicBool,
    key_down: Event<KeyEventArgs>,
    key_up: Event<KeyEventArgs>,
}

impl ListenerCore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_down(&self) -> &Event<KeyEventArgs> {
        &self.key_down
    }

    pub fn key_up(&self) -> &Event<KeyEventArgs> {
        &self.key_up
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    fn set_active(&self, active: bool) {
        self.active.store(active, Ordering::SeqCst);
    }
}

impl HookSink for ListenerCore {
    /// Raises KeyDown or KeyUp, then always lets the event continue down the
    /// hook chain.
    fn on_key_event(&self, event: RawKeyEvent) -> HookResult {
        if !self.is_active() {
            trace!(?event, "listener inactive; event not raised");
            return HookResult::Continue;
        }
        let args = KeyEventArgs::new(event.key_code);
        match event.direction {
            KeyDirection::Down => self.key_down.raise(&args),
            KeyDirection::Up => self.key_up.raise(&args),
        }
        HookResult::Continue
    }
}

enum HookState {
    Uninstalled,
    Installed(Box<dyn InstalledHook>),
    Disposed,
}

/// A global keyboard listener owning at most one installed hook.
pub struct KeyboardListener {
    installer: Arc<dyn HookInstaller>,
    core: Arc<ListenerCore>,
    state: Mutex<HookState>,
}

impl KeyboardListener {
    pub fn new(installer: Arc<dyn HookInstaller>) -> Self {
        Self {
            installer,
            core: Arc::new(ListenerCore::new()),
            state: Mutex::new(HookState::Uninstalled),
        }
    }

    /// Raised on the hook thread when a key goes down.
    pub fn key_down(&self) -> &Event<KeyEventArgs> {
        self.core.key_down()
    }

    /// Raised on the hook thread when a key goes up.
    pub fn key_up(&self) -> &Event<KeyEventArgs> {
        self.core.key_up()
    }

    pub fn is_installed(&self) -> bool {
        matches!(*self.lock_state(), HookState::Installed(_))
    }

    pub fn is_disposed(&self) -> bool {
        matches!(*self.lock_state(), HookState::Disposed)
    }

    /// Installs the hook.
    ///
    /// # Errors
    ///
    /// [`HookError::Disposed`] after [`KeyboardListener::dispose`], or
    /// [`HookError::InstallFailed`] if the OS refused the hook. A failed
    /// install leaves the listener uninstalled, so it may be retried.
    pub fn start_hook(&self) -> Result<(), HookError> {
        let mut state = self.lock_state();
        match *state {
            HookState::Disposed => return Err(HookError::Disposed),
            HookState::Installed(_) => {
                debug!("keyboard hook already installed");
                return Ok(());
            }
            HookState::Uninstalled => {}
        }

        self.core.set_active(true);
        let sink: Arc<dyn HookSink> = self.core.clone();
        match self.installer.install(sink) {
            Ok(hook) => {
                *state = HookState::Installed(hook);
                info!("keyboard hook installed");
                Ok(())
            }
            Err(e) => {
                self.core.set_active(false);
                Err(e)
            }
        }
    }

    /// Removes the hook if installed and marks the listener disposed.
    /// Further calls do nothing.
    ///
    /// The hook is removed after the state lock is released, so a handler
    /// still running on the hook thread may query or dispose the listener
    /// while uninstall waits for that thread.
    pub fn dispose(&self) {
        let previous = {
            let mut state = self.lock_state();
            self.core.set_active(false);
            std::mem::replace(&mut *state, HookState::Disposed)
        };
        match previous {
            HookState::Installed(mut hook) => {
                hook.uninstall();
                info!("keyboard hook uninstalled");
            }
            HookState::Uninstalled => debug!("keyboard listener disposed before install"),
            HookState::Disposed => trace!("keyboard listener already disposed"),
        }
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, HookState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for KeyboardListener {
    fn drop(&mut self) {
        self.dispose();
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
