//! Mouse facade.
//!
//! The facade tracks the last position it moved the pointer to. That value
//! is what click events report; it is not refreshed from the OS unless
//! [`Mouse::sync_position`] is called. Click commands themselves still use
//! the live OS position.

use std::sync::{Arc, Mutex, PoisonError};

use mimic_core::{Event, MouseAction, MouseEventArgs, Point};
use tracing::debug;

use super::command::{Command, MouseActionCommand, MouseMoveCommand};
use super::dispatcher::InputDispatcher;
use super::emulator::{Emulator, EmulatorError};

type MouseEvent = Arc<Event<MouseEventArgs>>;

/// Emulated mouse.
pub struct Mouse {
    emulator: Emulator,
    dispatcher: Arc<dyn InputDispatcher>,
    position: Arc<Mutex<Point>>,
    moved: MouseEvent,
    left_clicked: MouseEvent,
    right_clicked: MouseEvent,
    middle_clicked: MouseEvent,
}

impl Mouse {
    pub fn new(dispatcher: Arc<dyn InputDispatcher>) -> Self {
        Self::with_emulator(dispatcher, Emulator::new())
    }

    pub fn with_emulator(dispatcher: Arc<dyn InputDispatcher>, emulator: Emulator) -> Self {
        Self {
            emulator,
            dispatcher,
            position: Arc::new(Mutex::new(Point::ORIGIN)),
            moved: Arc::default(),
            left_clicked: Arc::default(),
            right_clicked: Arc::default(),
            middle_clicked: Arc::default(),
        }
    }

    pub fn emulator(&self) -> &Emulator {
        &self.emulator
    }

    /// Raised after every position change with the applied position.
    pub fn moved(&self) -> &Event<MouseEventArgs> {
        &self.moved
    }

    pub fn left_clicked(&self) -> &Event<MouseEventArgs> {
        &self.left_clicked
    }

    pub fn right_clicked(&self) -> &Event<MouseEventArgs> {
        &self.right_clicked
    }

    pub fn middle_clicked(&self) -> &Event<MouseEventArgs> {
        &self.middle_clicked
    }

    /// Last position applied by this facade.
    pub fn position(&self) -> Point {
        *self.position.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Replaces the tracked position with the live OS position and returns
    /// it. Keeps the tracked value if the OS query fails.
    pub fn sync_position(&self) -> Point {
        let mut tracked = self.position.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(live) = self.dispatcher.cursor_position() {
            *tracked = live;
        }
        *tracked
    }

    /// Moves the pointer to `point`. Negative coordinates are replaced by
    /// their absolute value rather than rejected.
    ///
    /// # Errors
    ///
    /// [`EmulatorError::Worker`] if the input worker failed.
    pub async fn set_position(&self, point: Point) -> Result<(), EmulatorError> {
        let apply = self.position_applier();
        self.emulator.execute(move || apply.apply(point)).await
    }

    pub async fn set_position_xy(&self, x: i32, y: i32) -> Result<(), EmulatorError> {
        self.set_position(Point::new(x, y)).await
    }

    /// Moves the pointer by `(dx, dy)` from the tracked position, with the
    /// same coercion as [`Mouse::set_position`].
    ///
    /// # Errors
    ///
    /// [`EmulatorError::Worker`] if the input worker failed.
    pub async fn move_by(&self, dx: i32, dy: i32) -> Result<(), EmulatorError> {
        let apply = self.position_applier();
        let delta = Point::new(dx, dy);
        self.emulator
            .execute(move || {
                let target = apply.current().saturating_add(delta);
                apply.apply(target);
            })
            .await
    }

    pub async fn move_by_point(&self, delta: Point) -> Result<(), EmulatorError> {
        self.move_by(delta.x, delta.y).await
    }

    pub async fn left_click(&self) -> Result<(), EmulatorError> {
        self.click(&MouseAction::LEFT_CLICK, &self.left_clicked, 1)
            .await
    }

    pub async fn right_click(&self) -> Result<(), EmulatorError> {
        self.click(&MouseAction::RIGHT_CLICK, &self.right_clicked, 1)
            .await
    }

    pub async fn middle_click(&self) -> Result<(), EmulatorError> {
        self.click(&MouseAction::MIDDLE_CLICK, &self.middle_clicked, 1)
            .await
    }

    /// Sends down/up/down/up in a single dispatch, then raises
    /// [`Mouse::left_clicked`] twice.
    pub async fn left_double_click(&self) -> Result<(), EmulatorError> {
        self.click(&MouseAction::LEFT_DOUBLE_CLICK, &self.left_clicked, 2)
            .await
    }

    async fn click(
        &self,
        actions: &[MouseAction],
        event: &MouseEvent,
        raises: usize,
    ) -> Result<(), EmulatorError> {
        debug!(?actions, "click");
        let dispatcher = Arc::clone(&self.dispatcher);
        let actions = actions.to_vec();
        let position = Arc::clone(&self.position);
        let event = Arc::clone(event);
        self.emulator
            .execute(move || {
                MouseActionCommand::new(dispatcher, &actions).execute();
                let args = MouseEventArgs::new(*position.lock().unwrap_or_else(PoisonError::into_inner));
                for _ in 0..raises {
                    event.raise(&args);
                }
            })
            .await
    }

    fn position_applier(&self) -> PositionApplier {
        PositionApplier {
            dispatcher: Arc::clone(&self.dispatcher),
            position: Arc::clone(&self.position),
            moved: Arc::clone(&self.moved),
        }
    }
}

/// The body of a move, detached from `&Mouse` so it can run on the worker.
struct PositionApplier {
    dispatcher: Arc<dyn InputDispatcher>,
    position: Arc<Mutex<Point>>,
    moved: MouseEvent,
}

impl PositionApplier {
    fn current(&self) -> Point {
        *self.position.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn apply(&self, requested: Point) {
        let command = MouseMoveCommand::new(Arc::clone(&self.dispatcher), Some(requested.abs()));
        command.execute();
        let applied = command.point();
        *self.position.lock().unwrap_or_else(PoisonError::into_inner) = applied;
        debug!(%requested, %applied, "cursor moved");
        self.moved.raise(&MouseEventArgs::new(applied));
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::dispatch::mock::RecordingDispatcher;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn fast_mouse(dispatcher: Arc<RecordingDispatcher>) -> Mouse {
        Mouse::with_emulator(
            dispatcher,
            Emulator::with_interval_ms(100).expect("valid interval"),
        )
    }

    fn count(event: &Event<MouseEventArgs>) -> Arc<AtomicUsize> {
        let counter = Arc::new(AtomicUsize::new(0));
        let c = Arc::clone(&counter);
        event.subscribe(move |_| {
            c.fetch_add(1, Ordering::SeqCst);
        });
        counter
    }

    #[tokio::test]
    async fn test_set_position_coerces_negative_coordinates() {
        // Arrange
        let dispatcher = Arc::new(RecordingDispatcher::new());
        let mouse = fast_mouse(dispatcher.clone());
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        mouse
            .moved()
            .subscribe(move |args: &MouseEventArgs| sink.lock().unwrap().push(args.point));

        // Act
        mouse.set_position_xy(-15, 20).await.expect("move succeeds");

        // Assert
        assert_eq!(dispatcher.cursor_moves(), vec![Point::new(15, 20)]);
        assert_eq!(mouse.position(), Point::new(15, 20));
        assert_eq!(*seen.lock().unwrap(), vec![Point::new(15, 20)]);
    }

    #[tokio::test]
    async fn test_move_by_adds_delta_to_tracked_position() {
        let dispatcher = Arc::new(RecordingDispatcher::new());
        let mouse = fast_mouse(dispatcher.clone());
        mouse.set_position(Point::new(100, 100)).await.expect("move");

        mouse.move_by(-30, 5).await.expect("move_by");

        assert_eq!(mouse.position(), Point::new(70, 105));
        assert_eq!(dispatcher.cursor_moves().len(), 2);
    }

    #[tokio::test]
    async fn test_move_by_past_origin_is_coerced() {
        let dispatcher = Arc::new(RecordingDispatcher::new());
        let mouse = fast_mouse(dispatcher);
        mouse.set_position_xy(10, 10).await.expect("move");

        mouse.move_by_point(Point::new(-25, 0)).await.expect("move_by");

        assert_eq!(mouse.position(), Point::new(15, 10));
    }

    #[tokio::test]
    async fn test_left_click_dispatches_down_up_and_raises_once() {
        let dispatcher = Arc::new(RecordingDispatcher::new());
        let mouse = fast_mouse(dispatcher.clone());
        let clicks = count(mouse.left_clicked());

        mouse.left_click().await.expect("click");

        let batches = dispatcher.batches();
        assert_eq!(batches.len(), 1);
        let actions: Vec<_> = batches[0]
            .iter()
            .filter_map(|r| r.as_mouse().and_then(|m| m.action()))
            .collect();
        assert_eq!(actions, MouseAction::LEFT_CLICK.to_vec());
        assert_eq!(clicks.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_right_and_middle_click_raise_their_own_events() {
        let dispatcher = Arc::new(RecordingDispatcher::new());
        let mouse = fast_mouse(dispatcher.clone());
        let left = count(mouse.left_clicked());
        let right = count(mouse.right_clicked());
        let middle = count(mouse.middle_clicked());

        mouse.right_click().await.expect("right");
        mouse.middle_click().await.expect("middle");

        assert_eq!(left.load(Ordering::SeqCst), 0);
        assert_eq!(right.load(Ordering::SeqCst), 1);
        assert_eq!(middle.load(Ordering::SeqCst), 1);
        assert_eq!(dispatcher.batches().len(), 2);
    }

    #[tokio::test]
    async fn test_click_event_reports_tracked_position() {
        let dispatcher = Arc::new(RecordingDispatcher::new());
        let mouse = fast_mouse(dispatcher);
        mouse.set_position_xy(5, 6).await.expect("move");
        let seen = Arc::new(Mutex::new(None));
        let sink = Arc::clone(&seen);
        mouse
            .right_clicked()
            .subscribe(move |args: &MouseEventArgs| *sink.lock().unwrap() = Some(args.point));

        mouse.right_click().await.expect("click");

        assert_eq!(*seen.lock().unwrap(), Some(Point::new(5, 6)));
    }

    #[test]
    fn test_sync_position_reads_live_cursor() {
        let dispatcher = Arc::new(RecordingDispatcher::with_cursor(Point::new(640, 360)));
        let mouse = Mouse::new(dispatcher.clone());
        assert_eq!(mouse.position(), Point::ORIGIN);

        assert_eq!(mouse.sync_position(), Point::new(640, 360));
        assert_eq!(mouse.position(), Point::new(640, 360));

        dispatcher.fail_cursor_query(true);
        assert_eq!(mouse.sync_position(), Point::new(640, 360));
    }
}
