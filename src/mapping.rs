//! Mapping from normalized landmark coordinates to display coordinates.

use crate::{landmarks::Landmark, Error, Result};

/// Display dimensions in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplaySize {
    pub width: u32,
    pub height: u32,
}

impl DisplaySize {
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Center of the display, where the pointer starts
    #[must_use]
    pub fn center(&self) -> (f64, f64) {
        (f64::from(self.width) / 2.0, f64::from(self.height) / 2.0)
    }
}

/// Calibration applied to the index fingertip before clamping
///
/// Scale and offsets are tuning constants; nothing about them is geometric.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MappingParams {
    /// Amplification so a small physical range covers the whole display
    pub scale: f64,
    pub horizontal_offset: f64,
    pub vertical_offset: f64,
    /// Minimum distance in pixels kept from every display edge
    pub margin: f64,
}

/// Pure landmark-to-display transform
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateMapper {
    params: MappingParams,
    display: DisplaySize,
}

impl CoordinateMapper {
    /// Create a mapper for a display
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the display has a zero dimension, the margin is
    /// negative or leaves no room on the display, or scale/offsets are not finite.
    pub fn new(params: MappingParams, display: DisplaySize) -> Result<Self> {
        if display.width == 0 || display.height == 0 {
            return Err(Error::ConfigError(format!(
                "Display size must be non-zero, got {}x{}",
                display.width, display.height
            )));
        }
        if !params.margin.is_finite() || params.margin < 0.0 {
            return Err(Error::ConfigError(format!(
                "Edge margin must be a non-negative number, got {}",
                params.margin
            )));
        }
        let smallest = f64::from(display.width.min(display.height));
        if params.margin * 2.0 > smallest {
            return Err(Error::ConfigError(format!(
                "Edge margin {} leaves no room on a {}x{} display",
                params.margin, display.width, display.height
            )));
        }
        if !(params.scale.is_finite()
            && params.horizontal_offset.is_finite()
            && params.vertical_offset.is_finite())
        {
            return Err(Error::ConfigError(
                "Movement scale and offsets must be finite".to_string(),
            ));
        }
        Ok(Self { params, display })
    }

    /// Unclamped display position of a landmark
    #[must_use]
    pub fn raw_target(&self, landmark: &Landmark) -> (f64, f64) {
        let width = f64::from(self.display.width);
        let height = f64::from(self.display.height);
        (
            width * (self.params.horizontal_offset + self.params.scale * f64::from(landmark.x)),
            height * (self.params.vertical_offset + self.params.scale * f64::from(landmark.y)),
        )
    }

    /// Display position of a landmark, kept `margin` pixels off every edge
    #[must_use]
    pub fn map(&self, landmark: &Landmark) -> (f64, f64) {
        let (raw_x, raw_y) = self.raw_target(landmark);
        let margin = self.params.margin;
        let max_x = f64::from(self.display.width) - margin;
        let max_y = f64::from(self.display.height) - margin;
        // NaN input stays NaN through clamp; pin it to the margin instead
        let x = if raw_x.is_nan() { margin } else { raw_x.clamp(margin, max_x) };
        let y = if raw_y.is_nan() { margin } else { raw_y.clamp(margin, max_y) };
        (x, y)
    }

    #[must_use]
    pub const fn display(&self) -> DisplaySize {
        self.display
    }

    #[must_use]
    pub const fn params(&self) -> &MappingParams {
        &self.params
    }
}
