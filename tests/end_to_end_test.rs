//! End-to-end tests of the orchestration loop with fake devices


use hand_pointer::{
    app::{run_cycle, run_loop, LoopControl, RunSummary, StopSignal},
    clock::SteppingClock,
    mapping::DisplaySize,
    persistence::TrackingStatus,
    tracker::Tracker,
    Error,
};
use test_helpers::{
    hand_at, unit_params, CountingFrames, FailingFrames, RecordingSink, ScriptedDetector,
};

fn tracker(alpha: f64, frame_skip: u32, persist_frames: u32) -> Tracker {
    Tracker::new(unit_params(alpha, frame_skip, persist_frames), DisplaySize::new(1000, 1000)).unwrap()
}

#[test]
fn test_steady_hand_at_center() {
    let mut tracker = tracker(0.5, 1, 5);
    let mut frames = CountingFrames::new(10);
    let mut detector = ScriptedDetector::always(hand_at(0.5, 0.5, false), 10);
    let mut sink = RecordingSink::new(1000, 1000);
    let mut clock = SteppingClock::new(0, 33);
    let mut reports = Vec::new();

    let summary = run_loop(
        &mut tracker,
        &mut frames,
        &mut detector,
        &mut sink,
        &mut clock,
        &StopSignal::new(),
        |_, report| {
            reports.push(*report);
            Ok(LoopControl::Continue)
        },
    )
    .unwrap();

    assert_eq!(reports.len(), 10);
    for report in &reports {
        assert_eq!(report.status, TrackingStatus::Fresh);
        assert!((report.target.0 - 500.0).abs() < 1e-9);
        assert!((report.target.1 - 500.0).abs() < 1e-9);
        assert!((report.position.0 - 500.0).abs() < 1e-9);
        assert!((report.position.1 - 500.0).abs() < 1e-9);
        assert!(!report.click);
    }

    assert_eq!(
        summary,
        RunSummary {
            cycles: 10,
            detections: 10,
            clicks: 0,
            sink_failures: 0,
        }
    );
    assert_eq!(sink.moves.len(), 10);
    assert_eq!(sink.clicks, 0);
}

#[test]
fn test_capture_failure_ends_run() {
    let mut tracker = tracker(0.5, 1, 5);
    let mut frames = FailingFrames::new(3);
    let mut detector = ScriptedDetector::new(Vec::new());
    let mut sink = RecordingSink::new(1000, 1000);
    let mut clock = SteppingClock::new(0, 33);

    let result = run_loop(
        &mut tracker,
        &mut frames,
        &mut detector,
        &mut sink,
        &mut clock,
        &StopSignal::new(),
        |_, _| Ok(LoopControl::Continue),
    );

    assert!(matches!(result, Err(Error::Capture(_))));
    assert_eq!(sink.moves.len(), 3);
}

#[test]
fn test_sink_failures_are_counted_not_fatal() {
    let mut tracker = tracker(0.5, 1, 5);
    let mut frames = CountingFrames::new(4);
    let mut detector = ScriptedDetector::always(hand_at(0.4, 0.4, true), 4);
    let mut sink = RecordingSink::new(1000, 1000);
    sink.fail_moves = true;
    sink.fail_clicks = true;
    let mut clock = SteppingClock::new(0, 33);

    let summary = run_loop(
        &mut tracker,
        &mut frames,
        &mut detector,
        &mut sink,
        &mut clock,
        &StopSignal::new(),
        |_, _| Ok(LoopControl::Continue),
    )
    .unwrap();

    assert_eq!(summary.cycles, 4);
    // Four failed moves plus the one click on the first pinch
    assert_eq!(summary.clicks, 1);
    assert_eq!(summary.sink_failures, 5);
}

#[test]
fn test_detector_error_counts_as_no_hand() {
    let mut tracker = tracker(0.5, 1, 5);
    let mut frames = CountingFrames::new(3);
    let mut detector = ScriptedDetector::with_results(vec![
        Err(Error::ModelError("inference failed".to_string())),
        Ok(Some(hand_at(0.2, 0.2, false))),
        Err(Error::ModelOutputError("bad shape".to_string())),
    ]);
    let mut sink = RecordingSink::new(1000, 1000);
    let mut clock = SteppingClock::new(0, 33);
    let mut statuses = Vec::new();

    let summary = run_loop(
        &mut tracker,
        &mut frames,
        &mut detector,
        &mut sink,
        &mut clock,
        &StopSignal::new(),
        |_, report| {
            statuses.push(report.status);
            Ok(LoopControl::Continue)
        },
    )
    .unwrap();

    assert_eq!(
        statuses,
        vec![TrackingStatus::Absent, TrackingStatus::Fresh, TrackingStatus::Persisted]
    );
    assert_eq!(summary.detections, 1);
}

#[test]
fn test_stop_signal_checked_before_each_cycle() {
    let mut tracker = tracker(0.5, 1, 5);
    let mut frames = CountingFrames::new(100);
    let mut detector = ScriptedDetector::new(Vec::new());
    let mut sink = RecordingSink::new(1000, 1000);
    let mut clock = SteppingClock::new(0, 33);
    let stop = StopSignal::new();
    let handle = stop.clone();

    let summary = run_loop(
        &mut tracker,
        &mut frames,
        &mut detector,
        &mut sink,
        &mut clock,
        &stop,
        |frame, _| {
            if *frame == 4 {
                handle.stop();
            }
            Ok(LoopControl::Continue)
        },
    )
    .unwrap();

    assert_eq!(summary.cycles, 5);
}

#[test]
fn test_observer_can_stop_loop() {
    let mut tracker = tracker(0.5, 1, 5);
    let mut frames = CountingFrames::new(100);
    let mut detector = ScriptedDetector::new(Vec::new());
    let mut sink = RecordingSink::new(1000, 1000);
    let mut clock = SteppingClock::new(0, 33);

    let summary = run_loop(
        &mut tracker,
        &mut frames,
        &mut detector,
        &mut sink,
        &mut clock,
        &StopSignal::new(),
        |frame, _| Ok(if *frame == 2 { LoopControl::Stop } else { LoopControl::Continue }),
    )
    .unwrap();

    assert_eq!(summary.cycles, 3);
}

#[test]
fn test_observer_error_ends_run() {
    let mut tracker = tracker(0.5, 1, 5);
    let mut frames = CountingFrames::new(100);
    let mut detector = ScriptedDetector::new(Vec::new());
    let mut sink = RecordingSink::new(1000, 1000);
    let mut clock = SteppingClock::new(0, 33);

    let result = run_loop(
        &mut tracker,
        &mut frames,
        &mut detector,
        &mut sink,
        &mut clock,
        &StopSignal::new(),
        |_, _| Err(Error::InvalidInput("window closed".to_string())),
    );

    assert!(matches!(result, Err(Error::InvalidInput(_))));
}

#[test]
fn test_timestamps_strictly_increase() {
    let mut tracker = tracker(0.5, 1, 5);
    let mut detector = ScriptedDetector::new(Vec::new());
    let mut sink = RecordingSink::new(1000, 1000);
    let mut clock = SteppingClock::new(1_000, 1);
    let mut summary = RunSummary::default();

    for frame in 0..20u64 {
        run_cycle(&mut tracker, &frame, &mut detector, &mut sink, &mut clock, &mut summary);
    }

    assert_eq!(detector.calls.len(), 20);
    assert_eq!(detector.calls[0].1, 1_000);
    assert!(detector.calls.windows(2).all(|w| w[0].1 < w[1].1));
}

#[test]
fn test_skipped_frames_do_not_read_clock() {
    let mut tracker = tracker(0.5, 4, 5);
    let mut detector = ScriptedDetector::new(Vec::new());
    let mut sink = RecordingSink::new(1000, 1000);
    let mut clock = SteppingClock::new(0, 10);
    let mut summary = RunSummary::default();

    for frame in 0..8u64 {
        run_cycle(&mut tracker, &frame, &mut detector, &mut sink, &mut clock, &mut summary);
    }

    assert_eq!(detector.calls, vec![(0, 0), (4, 10)]);
    assert_eq!(summary.cycles, 8);
}
