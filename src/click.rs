//! Pinch-to-click edge detection.
//!
//! A click fires once when the thumb tip and index fingertip come together,
//! never while the pinch is held and never on release. The debouncer is only
//! evaluated on fresh detections, so a held pinch survives detection gaps and
//! can only be released by the next real detection.

use crate::{landmarks::LandmarkSet, Error, Result};
use log::debug;

/// Debounce state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PinchState {
    #[default]
    Released,
    Pressed,
}

impl PinchState {
    /// Transition table; the flag is true only for `Released -> Pressed`
    ///
    /// | state    | pinched | next     | click |
    /// |----------|---------|----------|-------|
    /// | Released | false   | Released | no    |
    /// | Released | true    | Pressed  | yes   |
    /// | Pressed  | true    | Pressed  | no    |
    /// | Pressed  | false   | Released | no    |
    #[must_use]
    pub const fn transition(self, pinched: bool) -> (Self, bool) {
        match (self, pinched) {
            (Self::Released, true) => (Self::Pressed, true),
            (Self::Pressed, true) => (Self::Pressed, false),
            (_, false) => (Self::Released, false),
        }
    }

    #[must_use]
    pub const fn is_pressed(self) -> bool {
        matches!(self, Self::Pressed)
    }
}

/// Edge-triggered pinch detector
#[derive(Debug, Clone)]
pub struct ClickDebouncer {
    threshold: f64,
    state: PinchState,
}

impl ClickDebouncer {
    /// Create a debouncer treating distances below `threshold` as a pinch
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` unless `threshold` is a positive number.
    pub fn new(threshold: f64) -> Result<Self> {
        if !(threshold.is_finite() && threshold > 0.0) {
            return Err(Error::ConfigError(format!(
                "Click threshold must be positive, got {threshold}"
            )));
        }
        Ok(Self {
            threshold,
            state: PinchState::Released,
        })
    }

    /// Evaluate a freshly detected pose; returns true if a click fired
    pub fn evaluate(&mut self, landmarks: &LandmarkSet) -> bool {
        let distance = landmarks.pinch_distance();
        let clicked = self.update(distance < self.threshold);
        if clicked {
            debug!("Pinch detected at distance {distance:.4}");
        }
        clicked
    }

    /// Advance with an already computed pinch flag
    pub fn update(&mut self, pinched: bool) -> bool {
        let (next, clicked) = self.state.transition(pinched);
        self.state = next;
        clicked
    }

    #[must_use]
    pub const fn state(&self) -> PinchState {
        self.state
    }

    #[must_use]
    pub const fn threshold(&self) -> f64 {
        self.threshold
    }
}
