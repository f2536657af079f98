//! Criterion benchmarks for the key table and record builder.
//!
//! `KeyCode::from_raw` runs inside the low-level hook callback, which the OS
//! removes if it is slow, so its cost is tracked here alongside the builder.
//!
//! Run with:
//! ```bash
//! cargo bench --package mimic-core --bench keycode_bench
//! ```

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use mimic_core::{
    decode_hook_message, hook::messages, InputRecordBuilder, KeyCode, KeyboardAction, MouseAction,
    Point,
};

/// Raw values covering named codes, unassigned slots and out-of-range input.
const BENCH_RAW_CODES: &[i32] = &[
    0x41, // A
    0x0D, // Enter
    0x1B, // Escape
    0x70, // F1
    0xA2, // LCtrl
    0x07, // unassigned
    0xFF, // unassigned
    -1,   // out of range
    4096, // out of range
];

fn bench_from_raw(c: &mut Criterion) {
    let mut group = c.benchmark_group("keycode_from_raw");
    for &raw in BENCH_RAW_CODES {
        group.bench_with_input(BenchmarkId::from_parameter(raw), &raw, |b, &raw| {
            b.iter(|| KeyCode::from_raw(black_box(raw)))
        });
    }
    group.finish();
}

fn bench_decode_hook_message(c: &mut Criterion) {
    c.bench_function("decode_hook_message_key_down", |b| {
        b.iter(|| decode_hook_message(black_box(messages::WM_KEYDOWN), black_box(0x41)))
    });
}

fn bench_parse_key_name(c: &mut Criterion) {
    c.bench_function("keycode_parse_alias", |b| {
        b.iter(|| black_box("return").parse::<KeyCode>())
    });
}

fn bench_build_batches(c: &mut Criterion) {
    let scan = |vk: u16| vk;
    c.bench_function("keyboard_push_batch", |b| {
        b.iter(|| {
            InputRecordBuilder::keyboard_batch(
                black_box(KeyCode::Enter),
                &KeyboardAction::PUSH,
                &scan,
            )
        })
    });
    c.bench_function("mouse_double_click_batch", |b| {
        b.iter(|| {
            InputRecordBuilder::mouse_batch(
                black_box(Point::new(800, 600)),
                &MouseAction::LEFT_DOUBLE_CLICK,
            )
        })
    });
}

criterion_group!(
    benches,
    bench_from_raw,
    bench_decode_hook_message,
    bench_parse_key_name,
    bench_build_batches
);
criterion_main!(benches);
