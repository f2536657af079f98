//! Keyboard facade.

use std::sync::Arc;

use mimic_core::{Event, KeyCode, KeyEventArgs};
use tracing::debug;

use super::command::{Command, KeyboardActionCommand};
use super::dispatcher::InputDispatcher;
use super::emulator::{Emulator, EmulatorError};

/// Emulated keyboard.
///
/// Every operation runs through the [`Emulator`], so it completes only after
/// the configured interval has elapsed.
pub struct Keyboard {
    emulator: Emulator,
    dispatcher: Arc<dyn InputDispatcher>,
    key_pushed: Arc<Event<KeyEventArgs>>,
}

impl Keyboard {
    pub fn new(dispatcher: Arc<dyn InputDispatcher>) -> Self {
        Self::with_emulator(dispatcher, Emulator::new())
    }

    pub fn with_emulator(dispatcher: Arc<dyn InputDispatcher>, emulator: Emulator) -> Self {
        Self {
            emulator,
            dispatcher,
            key_pushed: Arc::new(Event::new()),
        }
    }

    pub fn emulator(&self) -> &Emulator {
        &self.emulator
    }

    /// Raised after each push with the pushed key.
    pub fn key_pushed(&self) -> &Event<KeyEventArgs> {
        &self.key_pushed
    }

    /// Presses and releases `key` in one dispatch, then raises
    /// [`Keyboard::key_pushed`].
    ///
    /// # Errors
    ///
    /// [`EmulatorError::Worker`] if the input worker failed.
    pub async fn push(&self, key: KeyCode) -> Result<(), EmulatorError> {
        debug!(%key, "push");
        let command = KeyboardActionCommand::push(Arc::clone(&self.dispatcher), key);
        let key_pushed = Arc::clone(&self.key_pushed);
        self.emulator
            .execute(move || {
                command.execute();
                key_pushed.raise(&KeyEventArgs::new(key));
            })
            .await
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
