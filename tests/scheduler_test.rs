//! Frame scheduling tests


use hand_pointer::{
    app::{run_loop, LoopControl, StopSignal},
    clock::SteppingClock,
    mapping::DisplaySize,
    scheduler::{should_process, FrameScheduler},
    tracker::Tracker,
};
use test_helpers::{hand_at, unit_params, CountingFrames, RecordingSink, ScriptedDetector};

#[test]
fn test_stride_three_schedules_every_third_frame() {
    let scheduled: Vec<u64> = (0..9).filter(|&i| should_process(i, 3)).collect();
    assert_eq!(scheduled, vec![0, 3, 6]);

    let scheduler = FrameScheduler::new(3).unwrap();
    let scheduled: Vec<u64> = (0..9).filter(|&i| scheduler.should_process(i)).collect();
    assert_eq!(scheduled, vec![0, 3, 6]);
}

#[test]
fn test_detector_only_runs_on_scheduled_frames() {
    let mut tracker = Tracker::new(unit_params(0.5, 3, 5), DisplaySize::new(1000, 1000)).unwrap();
    let mut frames = CountingFrames::new(9);
    let mut detector = ScriptedDetector::always(hand_at(0.5, 0.5, false), 9);
    let mut sink = RecordingSink::new(1000, 1000);
    let mut clock = SteppingClock::new(500, 10);
    let mut scheduled = Vec::new();

    run_loop(
        &mut tracker,
        &mut frames,
        &mut detector,
        &mut sink,
        &mut clock,
        &StopSignal::new(),
        |frame, report| {
            if report.scheduled {
                scheduled.push(*frame);
            }
            Ok(LoopControl::Continue)
        },
    )
    .unwrap();

    let called: Vec<u64> = detector.calls.iter().map(|&(frame, _)| frame).collect();
    assert_eq!(called, vec![0, 3, 6]);
    assert_eq!(scheduled, vec![0, 3, 6]);

    // Timestamps only advance
    let stamps: Vec<u64> = detector.calls.iter().map(|&(_, ts)| ts).collect();
    assert!(stamps.windows(2).all(|w| w[0] <= w[1]));

    // Every frame still moved the pointer
    assert_eq!(sink.moves.len(), 9);
}
