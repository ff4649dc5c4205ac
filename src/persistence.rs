//! Gap tolerance for intermittent detections.
//!
//! A single missed detection (occlusion, motion blur, a skipped frame) should
//! not make the pointer jump or a pinch misfire, so the last pose is reused for
//! a bounded number of cycles before the hand is treated as gone.

use crate::landmarks::LandmarkSet;
use log::debug;

/// Outcome of one persistence update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackingStatus {
    /// New detection this cycle
    Fresh,
    /// Reusing a recent stale pose
    Persisted,
    /// No usable pose
    Absent,
}

impl TrackingStatus {
    /// Fresh and persisted cycles both count as "hand detected"
    #[must_use]
    pub const fn is_detected(self) -> bool {
        matches!(self, Self::Fresh | Self::Persisted)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fresh => "fresh",
            Self::Persisted => "persisted",
            Self::Absent => "absent",
        }
    }
}

/// Persistence window state
#[derive(Debug, Clone)]
pub struct DetectionState {
    last_landmarks: Option<LandmarkSet>,
    missed_frames: u32,
    max_persist: u32,
}

impl DetectionState {
    /// Create an empty state reusing stale poses for up to `max_persist` cycles
    #[must_use]
    pub const fn new(max_persist: u32) -> Self {
        Self {
            last_landmarks: None,
            missed_frames: 0,
            max_persist,
        }
    }

    /// Feed this cycle's detection result
    ///
    /// `detection` is `None` both when the frame was not scheduled and when the
    /// detector found no hand. Returns the status and the landmarks to use.
    pub fn update(&mut self, detection: Option<LandmarkSet>) -> (TrackingStatus, Option<LandmarkSet>) {
        if let Some(landmarks) = detection {
            self.last_landmarks = Some(landmarks);
            self.missed_frames = 0;
            return (TrackingStatus::Fresh, self.last_landmarks);
        }

        self.missed_frames = self.missed_frames.saturating_add(1);
        match self.last_landmarks {
            Some(landmarks) if self.missed_frames <= self.max_persist => {
                debug!("Persisting last pose ({}/{})", self.missed_frames, self.max_persist);
                (TrackingStatus::Persisted, Some(landmarks))
            }
            _ => (TrackingStatus::Absent, None),
        }
    }

    #[must_use]
    pub const fn missed_frames(&self) -> u32 {
        self.missed_frames
    }

    #[must_use]
    pub const fn max_persist(&self) -> u32 {
        self.max_persist
    }

    #[must_use]
    pub const fn last_landmarks(&self) -> Option<&LandmarkSet> {
        self.last_landmarks.as_ref()
    }
}
