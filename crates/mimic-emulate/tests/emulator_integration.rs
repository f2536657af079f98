//! End-to-end tests of the emulation facades over the recording dispatcher.
//!
//! Each test builds facades exactly as the `mimic` binary does, but with
//! `RecordingDispatcher` / `MockScreenReader` in place of the OS adapters.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use mimic_core::{
    input::flags, KeyCode, KeyEventArgs, KeyboardAction, MouseAction, MouseEventArgs, Point, Rect,
    Size,
};
use mimic_emulate::application::{
    Display, DisplayError, Emulator, EmulatorError, Keyboard, Mouse, MIN_INTERVAL_MS,
};
use mimic_emulate::infrastructure::dispatch::mock::RecordingDispatcher;
use mimic_emulate::infrastructure::display::mock::MockScreenReader;

fn fast_emulator() -> Emulator {
    Emulator::with_interval_ms(MIN_INTERVAL_MS).expect("floor interval is valid")
}

fn mouse_actions(dispatcher: &RecordingDispatcher) -> Vec<Vec<MouseAction>> {
    dispatcher
        .batches()
        .iter()
        .map(|batch| {
            batch
                .iter()
                .filter_map(|r| r.as_mouse().and_then(|m| m.action()))
                .collect()
        })
        .collect()
}

// ── Rate limiter ──────────────────────────────────────────────────────────────

#[test]
fn test_every_interval_below_floor_is_rejected() {
    let emulator = Emulator::new();
    for value in [0, 1, 50, 99] {
        assert_eq!(
            emulator.set_interval_ms(value),
            Err(EmulatorError::IntervalOutOfRange { value, min: 100 })
        );
        assert_eq!(emulator.interval_ms(), 200, "previous value kept for {value}");
    }
}

#[tokio::test]
async fn test_push_takes_at_least_the_configured_interval() {
    // Arrange
    let dispatcher = Arc::new(RecordingDispatcher::new());
    let keyboard = Keyboard::with_emulator(dispatcher, Emulator::with_interval_ms(150).unwrap());
    let start = Instant::now();

    // Act
    keyboard.push(KeyCode::A).await.unwrap();

    // Assert
    assert!(start.elapsed() >= Duration::from_millis(150));
}

#[tokio::test]
async fn test_interval_change_applies_to_next_operation() {
    let dispatcher = Arc::new(RecordingDispatcher::new());
    let keyboard = Keyboard::with_emulator(dispatcher, fast_emulator());
    keyboard.emulator().set_interval_ms(250).unwrap();
    let start = Instant::now();

    keyboard.push(KeyCode::B).await.unwrap();

    assert!(start.elapsed() >= Duration::from_millis(250));
}

// ── Keyboard ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_push_sends_down_then_up_batch_with_extended_flag() {
    // Arrange
    let dispatcher = Arc::new(RecordingDispatcher::new());
    let keyboard = Keyboard::with_emulator(dispatcher.clone(), fast_emulator());
    let (_id, pushed) = keyboard.key_pushed().subscribe_channel();

    // Act
    keyboard.push(KeyCode::F5).await.unwrap();

    // Assert
    let batches = dispatcher.batches();
    assert_eq!(batches.len(), 1);
    let records: Vec<_> = batches[0].iter().filter_map(|r| r.as_keyboard().copied()).collect();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].action(), KeyboardAction::KeyDown);
    assert_eq!(records[1].action(), KeyboardAction::KeyUp);
    assert!(records.iter().all(|r| r.vk == 0x74));
    assert!(records.iter().all(|r| r.flags & flags::KEYEVENTF_EXTENDEDKEY != 0));
    assert_eq!(pushed.try_recv().unwrap(), KeyEventArgs::new(KeyCode::F5));
}

#[tokio::test]
async fn test_pushes_are_dispatched_in_call_order() {
    let dispatcher = Arc::new(RecordingDispatcher::new());
    let keyboard = Keyboard::with_emulator(dispatcher.clone(), fast_emulator());

    for key in [KeyCode::H, KeyCode::I, KeyCode::Enter] {
        keyboard.push(key).await.unwrap();
    }

    let vks: Vec<u16> = dispatcher
        .batches()
        .iter()
        .filter_map(|b| b.records()[0].as_keyboard().map(|k| k.vk))
        .collect();
    assert_eq!(vks, vec![0x48, 0x49, 0x0D]);
}

// ── Mouse ─────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_left_click_is_one_two_record_batch() {
    let dispatcher = Arc::new(RecordingDispatcher::with_cursor(Point::new(300, 200)));
    let mouse = Mouse::with_emulator(dispatcher.clone(), fast_emulator());

    mouse.left_click().await.unwrap();

    assert_eq!(
        mouse_actions(&dispatcher),
        vec![vec![MouseAction::LeftDown, MouseAction::LeftUp]]
    );
    let first = dispatcher.batches()[0].records()[0];
    let record = first.as_mouse().unwrap();
    assert_eq!((record.dx, record.dy), (300, 200));
    assert_eq!(record.flags & flags::MOUSEEVENTF_MOVE, 0, "click must not move");
}

#[tokio::test]
async fn test_double_click_is_one_batch_and_raises_left_clicked_twice() {
    // Arrange
    let dispatcher = Arc::new(RecordingDispatcher::new());
    let mouse = Mouse::with_emulator(dispatcher.clone(), fast_emulator());
    let clicks = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&clicks);
    mouse.left_clicked().subscribe(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    // Act
    mouse.left_double_click().await.unwrap();

    // Assert
    assert_eq!(mouse_actions(&dispatcher), vec![MouseAction::LEFT_DOUBLE_CLICK.to_vec()]);
    assert_eq!(clicks.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_negative_position_is_coerced_and_tracked() {
    let dispatcher = Arc::new(RecordingDispatcher::new());
    let mouse = Mouse::with_emulator(dispatcher.clone(), fast_emulator());
    let moved = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&moved);
    mouse
        .moved()
        .subscribe(move |args: &MouseEventArgs| sink.lock().unwrap().push(args.point));

    mouse.set_position_xy(-10, -20).await.unwrap();

    let applied = dispatcher.cursor_moves()[0];
    assert!(applied.is_non_negative());
    assert_eq!(applied, Point::new(10, 20));
    assert_eq!(mouse.position(), applied);
    assert_eq!(*moved.lock().unwrap(), vec![applied]);
}

#[tokio::test]
async fn test_move_by_equals_set_position_of_sum() {
    let dispatcher = Arc::new(RecordingDispatcher::new());
    let mouse = Mouse::with_emulator(dispatcher.clone(), fast_emulator());
    mouse.set_position_xy(50, 60).await.unwrap();

    mouse.move_by(7, -8).await.unwrap();

    assert_eq!(mouse.position(), Point::new(57, 52));
    assert_eq!(dispatcher.cursor_moves().last(), Some(&Point::new(57, 52)));
}

#[tokio::test]
async fn test_short_injection_is_not_an_error() {
    let dispatcher = Arc::new(RecordingDispatcher::new());
    dispatcher.limit_injected(0);
    let mouse = Mouse::with_emulator(dispatcher.clone(), fast_emulator());

    let result = mouse.right_click().await;

    assert!(result.is_ok());
    assert_eq!(dispatcher.batches().len(), 1);
}

// ── Display ───────────────────────────────────────────────────────────────────

#[test]
fn test_out_of_bounds_queries_never_reach_reader() {
    // Arrange
    let reader = Arc::new(MockScreenReader::new(Size::new(800, 600)));
    let display = Display::new(reader.clone()).unwrap();

    // Act
    let pixel = display.get_color(-1, 0);
    let region = display.get_bitmap_region(Rect::new(700, 500, 200, 200));

    // Assert
    assert!(matches!(pixel, Err(DisplayError::OutOfRange { .. })));
    assert!(matches!(region, Err(DisplayError::OutOfRange { .. })));
    assert_eq!(reader.pixel_calls(), 0);
    assert_eq!(reader.capture_calls(), 0);
}

#[test]
fn test_region_capture_has_requested_dimensions() {
    let reader = Arc::new(MockScreenReader::full_hd());
    let display = Display::new(reader).unwrap();

    let bitmap = display.get_bitmap_region(Rect::new(10, 10, 64, 32)).unwrap();

    assert_eq!(bitmap.dimensions(), (64, 32));
}
