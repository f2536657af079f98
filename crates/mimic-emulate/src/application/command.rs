//! Gesture commands.
//!
//! A command holds everything one logical gesture needs (key or pointer
//! position plus the ordered action list) and, when executed, turns it into a
//! single [`InputBatch`](mimic_core::InputBatch) for the dispatcher. Commands
//! with an empty action list do nothing. Nothing is retried.

use std::sync::Arc;

use mimic_core::{InputRecordBuilder, KeyCode, KeyboardAction, MouseAction, Point};
use tracing::debug;

use super::dispatcher::{dispatch, InputDispatcher};

/// A unit of synthetic input that runs to completion.
pub trait Command: Send {
    fn execute(&self);
}

/// Sends a key through a fixed sequence of down/up actions.
pub struct KeyboardActionCommand {
    dispatcher: Arc<dyn InputDispatcher>,
    key: KeyCode,
    actions: Vec<KeyboardAction>,
}

impl KeyboardActionCommand {
    pub fn new(
        dispatcher: Arc<dyn InputDispatcher>,
        key: KeyCode,
        actions: &[KeyboardAction],
    ) -> Self {
        Self {
            dispatcher,
            key,
            actions: actions.to_vec(),
        }
    }

    /// The standard push: [`KeyboardAction::PUSH`].
    pub fn push(dispatcher: Arc<dyn InputDispatcher>, key: KeyCode) -> Self {
        Self::new(dispatcher, key, &KeyboardAction::PUSH)
    }

    pub fn key(&self) -> KeyCode {
        self.key
    }
}

impl Command for KeyboardActionCommand {
    fn execute(&self) {
        let dispatcher = &*self.dispatcher;
        let scan_codes = |vk: u16| dispatcher.scan_code(vk);
        match InputRecordBuilder::keyboard_batch(self.key, &self.actions, &scan_codes) {
            Some(batch) => dispatch(dispatcher, &batch),
            None => debug!(key = %self.key, "keyboard command has no actions"),
        }
    }
}

/// Sends a sequence of button actions at the pointer position captured when
/// the command was built.
pub struct MouseActionCommand {
    dispatcher: Arc<dyn InputDispatcher>,
    position: Point,
    actions: Vec<MouseAction>,
}

impl MouseActionCommand {
    /// Captures the live pointer position. A failed query falls back to the
    /// origin.
    pub fn new(dispatcher: Arc<dyn InputDispatcher>, actions: &[MouseAction]) -> Self {
        let position = dispatcher.cursor_position().unwrap_or(Point::ORIGIN);
        Self::at(dispatcher, position, actions)
    }

    pub fn at(dispatcher: Arc<dyn InputDispatcher>, position: Point, actions: &[MouseAction]) -> Self {
        Self {
            dispatcher,
            position,
            actions: actions.to_vec(),
        }
    }

    pub fn position(&self) -> Point {
        self.position
    }
}

impl Command for MouseActionCommand {
    fn execute(&self) {
        match InputRecordBuilder::mouse_batch(self.position, &self.actions) {
            Some(batch) => dispatch(&*self.dispatcher, &batch),
            None => debug!(position = %self.position, "mouse command has no actions"),
        }
    }
}

/// Moves the pointer to a held position.
pub struct MouseMoveCommand {
    dispatcher: Arc<dyn InputDispatcher>,
    point: Point,
}

impl MouseMoveCommand {
    /// With `None` the current OS position is read so it can be reported by
    /// [`MouseMoveCommand::point`]; executing then re-applies it.
    pub fn new(dispatcher: Arc<dyn InputDispatcher>, target: Option<Point>) -> Self {
        let point = match target {
            Some(point) => point,
            None => dispatcher.cursor_position().unwrap_or(Point::ORIGIN),
        };
        Self { dispatcher, point }
    }

    pub fn point(&self) -> Point {
        self.point
    }
}

impl Command for MouseMoveCommand {
    fn execute(&self) {
        debug!(point = %self.point, "setting cursor position");
        self.dispatcher.set_cursor_position(self.point);
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::dispatcher::MockInputDispatcher;
    use crate::infrastructure::dispatch::mock::RecordingDispatcher;

    #[test]
    fn test_keyboard_push_command_dispatches_down_then_up() {
        // Arrange
        let dispatcher = Arc::new(RecordingDispatcher::new());
        let command = KeyboardActionCommand::push(dispatcher.clone(), KeyCode::Enter);

        // Act
        command.execute();

        // Assert
        let batches = dispatcher.batches();
        assert_eq!(batches.len(), 1);
        let records: Vec<_> = batches[0]
            .iter()
            .filter_map(|r| r.as_keyboard().copied())
            .collect();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].action(), KeyboardAction::KeyDown);
        assert_eq!(records[1].action(), KeyboardAction::KeyUp);
        assert!(records.iter().all(|r| r.vk == KeyCode::Enter.vk()));
    }

    #[test]
    fn test_keyboard_command_uses_dispatcher_scan_codes() {
        let mut mock = MockInputDispatcher::new();
        mock.expect_scan_code().returning(|vk| vk + 0x100);
        mock.expect_send_input()
            .withf(|batch| {
                batch
                    .iter()
                    .filter_map(|r| r.as_keyboard())
                    .all(|k| k.scan == KeyCode::A.vk() + 0x100)
            })
            .times(1)
            .return_const(2u32);

        KeyboardActionCommand::push(Arc::new(mock), KeyCode::A).execute();
    }

    #[test]
    fn test_empty_keyboard_command_does_not_dispatch() {
        let dispatcher = Arc::new(RecordingDispatcher::new());

        KeyboardActionCommand::new(dispatcher.clone(), KeyCode::A, &[]).execute();

        assert!(dispatcher.batches().is_empty());
    }

    #[test]
    fn test_mouse_command_captures_position_at_construction() {
        // Arrange
        let dispatcher = Arc::new(RecordingDispatcher::with_cursor(Point::new(40, 50)));
        let command = MouseActionCommand::new(dispatcher.clone(), &MouseAction::LEFT_CLICK);
        dispatcher.set_cursor_position(Point::new(900, 900));

        // Act
        command.execute();

        // Assert
        let batches = dispatcher.batches();
        let first = batches[0].records()[0].as_mouse().copied().expect("mouse record");
        assert_eq!((first.dx, first.dy), (40, 50));
        assert_eq!(command.position(), Point::new(40, 50));
    }

    #[test]
    fn test_mouse_command_falls_back_to_origin_when_query_fails() {
        let dispatcher = Arc::new(RecordingDispatcher::new());
        dispatcher.fail_cursor_query(true);

        let command = MouseActionCommand::new(dispatcher, &MouseAction::RIGHT_CLICK);

        assert_eq!(command.position(), Point::ORIGIN);
    }

    #[test]
    fn test_empty_mouse_command_does_not_dispatch() {
        let dispatcher = Arc::new(RecordingDispatcher::new());

        MouseActionCommand::at(dispatcher.clone(), Point::new(1, 1), &[]).execute();

        assert!(dispatcher.batches().is_empty());
    }

    #[test]
    fn test_move_command_with_target_sets_cursor() {
        let dispatcher = Arc::new(RecordingDispatcher::new());
        let command = MouseMoveCommand::new(dispatcher.clone(), Some(Point::new(12, 34)));

        command.execute();

        assert_eq!(dispatcher.cursor_moves(), vec![Point::new(12, 34)]);
        assert_eq!(command.point(), Point::new(12, 34));
    }

    #[test]
    fn test_move_command_without_target_reads_current_position() {
        let dispatcher = Arc::new(RecordingDispatcher::with_cursor(Point::new(7, 8)));

        let command = MouseMoveCommand::new(dispatcher, None);

        assert_eq!(command.point(), Point::new(7, 8));
    }
}
