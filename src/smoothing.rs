//! Exponential easing of the pointer toward its target.
//!
//! The filter runs once per cycle whether or not a hand was seen, so the
//! pointer keeps gliding toward the last known target instead of freezing.

use crate::{Error, Result};

/// Exponential smoothing filter over a 2D position
///
/// `alpha` is the weight of the previous position: higher values are smoother
/// and lag more, lower values respond faster.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExponentialSmoother {
    alpha: f64,
    position: (f64, f64),
}

impl ExponentialSmoother {
    /// Create a filter starting at `start`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` unless `alpha` is strictly between 0 and 1.
    pub fn new(alpha: f64, start: (f64, f64)) -> Result<Self> {
        if !(alpha > 0.0 && alpha < 1.0) {
            return Err(Error::ConfigError(format!(
                "Smoothing alpha must be in (0, 1), got {alpha}"
            )));
        }
        Ok(Self { alpha, position: start })
    }

    /// Move one step toward `target` and return the new position
    pub fn apply(&mut self, target: (f64, f64)) -> (f64, f64) {
        let keep = self.alpha;
        let take = 1.0 - self.alpha;
        self.position = (
            keep * self.position.0 + take * target.0,
            keep * self.position.1 + take * target.1,
        );
        self.position
    }

    #[must_use]
    pub const fn position(&self) -> (f64, f64) {
        self.position
    }

    #[must_use]
    pub const fn alpha(&self) -> f64 {
        self.alpha
    }
}
