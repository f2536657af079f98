//! Convenience wrapper that owns a started [`KeyboardListener`].
//!
//! A [`KeyboardReceiver`] installs its hook on construction and re-raises
//! the listener's KeyDown/KeyUp as its own events, so callers never touch
//! the listener's lifecycle directly.

use std::sync::Arc;

use mimic_core::{Event, KeyEventArgs};
use tracing::debug;

use super::listener::{HookError, HookInstaller, KeyboardListener};

/// A listening keyboard: installed from construction until dispose or drop.
pub struct KeyboardReceiver {
    listener: KeyboardListener,
    key_down: Arc<Event<KeyEventArgs>>,
    key_up: Arc<Event<KeyEventArgs>>,
}

impl KeyboardReceiver {
    /// Builds a listener over `installer` and starts it.
    ///
    /// # Errors
    ///
    /// [`HookError::InstallFailed`] if the hook cannot be installed.
    pub fn new(installer: Arc<dyn HookInstaller>) -> Result<Self, HookError> {
        let listener = KeyboardListener::new(installer);
        let key_down = Arc::new(Event::new());
        let key_up = Arc::new(Event::new());

        let forward = Arc::clone(&key_down);
        listener.key_down().subscribe(move |args| forward.raise(args));
        let forward = Arc::clone(&key_up);
        listener.key_up().subscribe(move |args| forward.raise(args));

        listener.start_hook()?;
        debug!("keyboard receiver listening");
        Ok(Self {
            listener,
            key_down,
            key_up,
        })
    }

    pub fn key_down(&self) -> &Event<KeyEventArgs> {
        &self.key_down
    }

    pub fn key_up(&self) -> &Event<KeyEventArgs> {
        &self.key_up
    }

    pub fn is_listening(&self) -> bool {
        self.listener.is_installed()
    }

    /// Stops listening. Idempotent.
    pub fn dispose(&self) {
        self.listener.dispose();
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
