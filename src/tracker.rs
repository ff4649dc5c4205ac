//! Per-cycle state transition from detector output to pointer emissions.
//!
//! [`Tracker::advance`] is the whole control layer: it takes what the detector
//! produced this frame (or that it was not run) and returns where the pointer
//! should be and whether a click fired. No camera, model or display is needed,
//! which is what makes the loop testable.

use crate::{
    click::ClickDebouncer,
    landmarks::LandmarkSet,
    mapping::{CoordinateMapper, DisplaySize, MappingParams},
    persistence::{DetectionState, TrackingStatus},
    scheduler::FrameScheduler,
    smoothing::ExponentialSmoother,
    Result,
};
use log::{debug, info};

/// Validated-at-construction tracking parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackerParams {
    /// Weight of the previous pointer position, in (0, 1)
    pub smoothing_alpha: f64,
    pub mapping: MappingParams,
    /// Detection runs on every `frame_skip`-th frame
    pub frame_skip: u32,
    /// Cycles a stale pose may be reused
    pub persist_frames: u32,
    /// Thumb/index distance below which the hand counts as pinched
    pub click_threshold: f64,
}

/// What happened on the detector side this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrameInput {
    /// Frame was not scheduled for detection
    Skipped,
    /// Detector found a hand
    Detected(LandmarkSet),
    /// Detector ran and found nothing
    NoHand,
}

impl FrameInput {
    #[must_use]
    pub fn from_detection(detection: Option<LandmarkSet>) -> Self {
        detection.map_or(Self::NoHand, Self::Detected)
    }

    #[must_use]
    pub const fn landmarks(&self) -> Option<LandmarkSet> {
        match self {
            Self::Detected(landmarks) => Some(*landmarks),
            Self::Skipped | Self::NoHand => None,
        }
    }
}

/// Pointer position state; the smoothed position is always defined
#[derive(Debug, Clone)]
pub struct CursorState {
    smoother: ExponentialSmoother,
    last_target: (f64, f64),
}

impl CursorState {
    #[must_use]
    pub const fn smoothed_position(&self) -> (f64, f64) {
        self.smoother.position()
    }

    #[must_use]
    pub const fn last_target(&self) -> (f64, f64) {
        self.last_target
    }
}

/// Everything the loop mutates, owned by exactly one tracker
#[derive(Debug, Clone)]
pub struct TrackerState {
    pub detection: DetectionState,
    pub cursor: CursorState,
    pub click: ClickDebouncer,
    pub frame_index: u64,
}

/// Result of one cycle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CycleReport {
    pub frame_index: u64,
    /// Whether this frame was handed to the detector
    pub scheduled: bool,
    pub status: TrackingStatus,
    /// Pose in effect this cycle (fresh or persisted)
    pub landmarks: Option<LandmarkSet>,
    pub target: (f64, f64),
    /// Smoothed pointer position to emit
    pub position: (f64, f64),
    /// A click fired this cycle
    pub click: bool,
}

impl CycleReport {
    #[must_use]
    pub const fn detected(&self) -> bool {
        self.status.is_detected()
    }
}

/// Hand tracking control layer
#[derive(Debug, Clone)]
pub struct Tracker {
    scheduler: FrameScheduler,
    mapper: CoordinateMapper,
    state: TrackerState,
}

impl Tracker {
    /// Create a tracker with the pointer at the display center
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if any parameter is out of range for `display`.
    pub fn new(params: TrackerParams, display: DisplaySize) -> Result<Self> {
        let scheduler = FrameScheduler::new(params.frame_skip)?;
        let mapper = CoordinateMapper::new(params.mapping, display)?;
        let center = display.center();
        let smoother = ExponentialSmoother::new(params.smoothing_alpha, center)?;
        let click = ClickDebouncer::new(params.click_threshold)?;

        info!(
            "Tracker ready: display {}x{}, alpha {}, stride {}, persist {}",
            display.width, display.height, params.smoothing_alpha, params.frame_skip, params.persist_frames
        );

        Ok(Self {
            scheduler,
            mapper,
            state: TrackerState {
                detection: DetectionState::new(params.persist_frames),
                cursor: CursorState {
                    smoother,
                    last_target: center,
                },
                click,
                frame_index: 0,
            },
        })
    }

    /// Whether the detector should run on the upcoming frame
    #[must_use]
    pub const fn should_detect(&self) -> bool {
        self.scheduler.should_process(self.state.frame_index)
    }

    /// Run one cycle and advance to the next frame
    pub fn advance(&mut self, input: FrameInput) -> CycleReport {
        let frame_index = self.state.frame_index;
        let scheduled = !matches!(input, FrameInput::Skipped);

        let (status, landmarks) = self.state.detection.update(input.landmarks());

        let mut click = false;
        if let (TrackingStatus::Fresh, Some(hand)) = (status, landmarks.as_ref()) {
            self.state.cursor.last_target = self.mapper.map(hand.index_tip());
            click = self.state.click.evaluate(hand);
        }

        let position = self.state.cursor.smoother.apply(self.state.cursor.last_target);
        self.state.frame_index = frame_index.wrapping_add(1);

        debug!(
            "Frame {}: {} target=({:.1}, {:.1}) pos=({:.1}, {:.1}){}",
            frame_index,
            status.as_str(),
            self.state.cursor.last_target.0,
            self.state.cursor.last_target.1,
            position.0,
            position.1,
            if click { " click" } else { "" }
        );

        CycleReport {
            frame_index,
            scheduled,
            status,
            landmarks,
            target: self.state.cursor.last_target,
            position,
            click,
        }
    }

    #[must_use]
    pub const fn state(&self) -> &TrackerState {
        &self.state
    }

    #[must_use]
    pub const fn mapper(&self) -> &CoordinateMapper {
        &self.mapper
    }

    #[must_use]
    pub const fn scheduler(&self) -> &FrameScheduler {
        &self.scheduler
    }
}
