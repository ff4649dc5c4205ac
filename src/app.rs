//! Main application module: the per-frame orchestration loop.
//!
//! [`run_loop`] is generic over the frame source, detector, pointer sink and
//! clock so the same loop drives the camera application and the tests.

use crate::{
    capture::FrameSource,
    clock::Clock,
    cursor_control::PointerSink,
    hand_detection::LandmarkSource,
    tracker::{CycleReport, FrameInput, Tracker},
    Result,
};
use log::{info, warn};
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

/// Cooperative stop request, checked between cycles
#[derive(Debug, Clone, Default)]
pub struct StopSignal {
    stopped: Arc<AtomicBool>,
}

impl StopSignal {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask the loop to stop after the current cycle
    pub fn stop(&self) {
        self.stopped.store(true, Ordering::SeqCst);
    }

    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }
}

/// Whether the loop should keep going after a cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Stop,
}

/// Counters for a finished run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub cycles: u64,
    pub detections: u64,
    pub clicks: u64,
    pub sink_failures: u64,
}

/// Run one cycle on an already captured frame
///
/// Detector errors count as "no hand" for this cycle and sink errors are
/// logged and skipped; neither stops the loop.
pub fn run_cycle<D, S, C>(
    tracker: &mut Tracker,
    frame: &D::Frame,
    detector: &mut D,
    sink: &mut S,
    clock: &mut C,
    summary: &mut RunSummary,
) -> CycleReport
where
    D: LandmarkSource,
    S: PointerSink,
    C: Clock,
{
    let input = if tracker.should_detect() {
        let timestamp_ms = clock.now_ms();
        match detector.detect(frame, timestamp_ms) {
            Ok(detection) => FrameInput::from_detection(detection),
            Err(e) => {
                warn!("Hand detection failed: {}", e);
                FrameInput::NoHand
            }
        }
    } else {
        FrameInput::Skipped
    };

    let report = tracker.advance(input);
    summary.cycles += 1;
    if matches!(input, FrameInput::Detected(_)) {
        summary.detections += 1;
    }

    let (x, y) = report.position;
    if let Err(e) = sink.move_to(x, y) {
        warn!("Failed to move cursor: {}", e);
        summary.sink_failures += 1;
    }

    if report.click {
        summary.clicks += 1;
        if let Err(e) = sink.click_primary() {
            warn!("Failed to click: {}", e);
            summary.sink_failures += 1;
        }
    }

    report
}

/// Drive the tracker until the stream ends, `stop` is raised, or the observer
/// asks to stop
///
/// The observer receives every frame with its report, for diagnostics.
///
/// # Errors
///
/// Returns capture failures and observer errors; both end the run.
pub fn run_loop<F, D, S, C, O>(
    tracker: &mut Tracker,
    frames: &mut F,
    detector: &mut D,
    sink: &mut S,
    clock: &mut C,
    stop: &StopSignal,
    mut observer: O,
) -> Result<RunSummary>
where
    F: FrameSource,
    D: LandmarkSource<Frame = F::Frame>,
    S: PointerSink,
    C: Clock,
    O: FnMut(&F::Frame, &CycleReport) -> Result<LoopControl>,
{
    info!("Entering main loop");
    let mut summary = RunSummary::default();

    while !stop.is_stopped() {
        let Some(frame) = frames.next_frame()? else {
            info!("Frame stream ended");
            break;
        };

        let report = run_cycle(tracker, &frame, detector, sink, clock, &mut summary);

        if observer(&frame, &report)? == LoopControl::Stop {
            break;
        }
    }

    info!(
        "Loop finished after {} cycles ({} detections, {} clicks, {} sink failures)",
        summary.cycles, summary.detections, summary.clicks, summary.sink_failures
    );
    Ok(summary)
}

#[cfg(feature = "hardware")]
pub use self::hardware::HandPointerApp;

#[cfg(feature = "hardware")]
mod hardware {
    use super::{run_loop, LoopControl, RunSummary, StopSignal};
    use crate::{
        capture::CameraCapture, clock::MonotonicClock, config::Config, cursor_control::CursorController,
        cursor_control::PointerSink, hand_detection::HandLandmarkDetector, overlay::Overlay, tracker::Tracker,
        Result,
    };
    use log::info;

    /// Camera-to-pointer application
    pub struct HandPointerApp {
        tracker: Tracker,
        capture: CameraCapture,
        detector: HandLandmarkDetector,
        cursor: CursorController,
        overlay: Option<Overlay>,
        stop: StopSignal,
    }

    impl HandPointerApp {
        /// Open every device and model named in `config`
        ///
        /// # Errors
        ///
        /// Returns an error if the configuration is invalid for the display
        /// or any device or model fails to initialize.
        pub fn new(config: &Config) -> Result<Self> {
            info!("Initializing Hand Pointer application");

            config.validate()?;
            let cursor = CursorController::new()?;
            let tracker = Tracker::new(config.tracking.to_params(), cursor.display_size())?;
            let detector = HandLandmarkDetector::new(&config.detector)?;
            let capture = CameraCapture::open(&config.camera)?;
            let overlay = if config.display.show_overlay {
                Some(Overlay::new(&config.display.window_name)?)
            } else {
                None
            };

            Ok(Self {
                tracker,
                capture,
                detector,
                cursor,
                overlay,
                stop: StopSignal::new(),
            })
        }

        /// Handle for stopping the loop from elsewhere
        #[must_use]
        pub fn stop_signal(&self) -> StopSignal {
            self.stop.clone()
        }

        /// Run until quit, end of stream, or a capture failure
        ///
        /// # Errors
        ///
        /// Returns capture and overlay failures.
        pub fn run(&mut self) -> Result<RunSummary> {
            info!("Move index finger to steer, pinch thumb and index to click. Press 'q' to quit.");
            let mut clock = MonotonicClock::new();
            let overlay = &mut self.overlay;

            run_loop(
                &mut self.tracker,
                &mut self.capture,
                &mut self.detector,
                &mut self.cursor,
                &mut clock,
                &self.stop,
                |frame, report| match overlay {
                    Some(overlay) => overlay.show(frame, report),
                    None => Ok(LoopControl::Continue),
                },
            )
        }
    }
}
