//! Benchmarks for the per-frame tracking path

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use hand_pointer::{
    config::TrackingConfig,
    constants::{INDEX_TIP, NUM_HAND_LANDMARKS, THUMB_TIP},
    landmarks::{Landmark, LandmarkSet},
    mapping::{CoordinateMapper, DisplaySize, MappingParams},
    smoothing::ExponentialSmoother,
    tracker::{FrameInput, Tracker},
};

const DISPLAY: DisplaySize = DisplaySize::new(1920, 1080);

/// Hand drifting in a circle, with a pinch every 30 frames
fn generate_hands(num_samples: usize) -> Vec<LandmarkSet> {
    (0..num_samples)
        .map(|i| {
            let t = i as f32 * 0.05;
            let x = 0.2 + 0.1 * t.cos();
            let y = 0.2 + 0.1 * t.sin();
            let mut points = [Landmark::new(x, y + 0.2, 0.0); NUM_HAND_LANDMARKS];
            points[INDEX_TIP] = Landmark::new(x, y, 0.0);
            points[THUMB_TIP] = if i % 30 < 3 {
                Landmark::new(x + 0.01, y, 0.0)
            } else {
                Landmark::new(x - 0.15, y + 0.05, 0.0)
            };
            LandmarkSet::new(points)
        })
        .collect()
}

fn benchmark_tracker(c: &mut Criterion) {
    let mut group = c.benchmark_group("tracker");
    let hands = generate_hands(300);

    for frame_skip in [1u32, 3, 5] {
        let mut params = TrackingConfig::default().to_params();
        params.frame_skip = frame_skip;

        group.bench_with_input(BenchmarkId::new("sequence_300", frame_skip), &hands, |b, hands| {
            b.iter(|| {
                let mut tracker = Tracker::new(params, DISPLAY).unwrap();
                for hand in hands {
                    let input = if tracker.should_detect() {
                        FrameInput::Detected(*hand)
                    } else {
                        FrameInput::Skipped
                    };
                    black_box(tracker.advance(black_box(input)));
                }
            });
        });
    }

    group.bench_function("absent_cycle", |b| {
        let mut tracker = Tracker::new(TrackingConfig::default().to_params(), DISPLAY).unwrap();
        b.iter(|| black_box(tracker.advance(black_box(FrameInput::NoHand))));
    });

    group.finish();
}

fn benchmark_stages(c: &mut Criterion) {
    let mut group = c.benchmark_group("stages");

    let mapper = CoordinateMapper::new(
        MappingParams {
            scale: 2.4,
            horizontal_offset: 0.0,
            vertical_offset: 0.0,
            margin: 10.0,
        },
        DISPLAY,
    )
    .unwrap();
    let landmark = Landmark::new(0.31, 0.27, -0.02);
    group.bench_function("map", |b| b.iter(|| black_box(mapper.map(black_box(&landmark)))));

    let mut smoother = ExponentialSmoother::new(0.5, DISPLAY.center()).unwrap();
    group.bench_function("smooth", |b| {
        b.iter(|| black_box(smoother.apply(black_box((744.0, 291.0)))));
    });

    let hand = generate_hands(1)[0];
    group.bench_function("pinch_distance", |b| b.iter(|| black_box(black_box(&hand).pinch_distance())));

    group.finish();
}

criterion_group!(benches, benchmark_tracker, benchmark_stages);
criterion_main!(benches);
