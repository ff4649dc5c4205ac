//! Hand landmark types produced by the detector.
//!
//! A [`LandmarkSet`] is one complete hand pose sample of 21 normalized points.
//! Ids follow the usual hand landmark convention (0 = wrist, 4 = thumb tip,
//! 8 = index fingertip, ...).

use crate::{
    constants::{INDEX_TIP, NUM_HAND_LANDMARKS, THUMB_TIP},
    Error, Result,
};

/// One normalized 3D hand point
///
/// `x` and `y` are roughly in `[0, 1]` relative to the camera frame, `z` is
/// depth relative to the wrist.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Landmark {
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Euclidean distance in normalized 3D space
    #[must_use]
    pub fn distance_to(&self, other: &Self) -> f64 {
        let dx = f64::from(self.x) - f64::from(other.x);
        let dy = f64::from(self.y) - f64::from(other.y);
        let dz = f64::from(self.z) - f64::from(other.z);
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}

/// Complete 21-point hand pose sample
///
/// Immutable once built; it is `Copy` so persistence can keep the last pose
/// without borrowing from the detector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LandmarkSet {
    points: [Landmark; NUM_HAND_LANDMARKS],
}

impl LandmarkSet {
    /// Build a set from exactly 21 points
    #[must_use]
    pub const fn new(points: [Landmark; NUM_HAND_LANDMARKS]) -> Self {
        Self { points }
    }

    /// Build a set from a slice, rejecting anything but 21 points
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when the slice length is not 21.
    pub fn from_slice(points: &[Landmark]) -> Result<Self> {
        let points: [Landmark; NUM_HAND_LANDMARKS] = points.try_into().map_err(|_| {
            Error::InvalidInput(format!(
                "Expected {NUM_HAND_LANDMARKS} hand landmarks, got {}",
                points.len()
            ))
        })?;
        Ok(Self { points })
    }

    /// Build a set from flat `[x0, y0, z0, x1, ...]` values
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when the value count is not 63.
    pub fn from_flat(values: &[f32]) -> Result<Self> {
        if values.len() != NUM_HAND_LANDMARKS * 3 {
            return Err(Error::InvalidInput(format!(
                "Expected {} landmark values, got {}",
                NUM_HAND_LANDMARKS * 3,
                values.len()
            )));
        }
        let points: Vec<Landmark> = values
            .chunks_exact(3)
            .map(|c| Landmark::new(c[0], c[1], c[2]))
            .collect();
        Self::from_slice(&points)
    }

    /// Landmark by anatomical id, `None` if the id is out of range
    #[must_use]
    pub fn get(&self, id: usize) -> Option<&Landmark> {
        self.points.get(id)
    }

    #[must_use]
    pub const fn thumb_tip(&self) -> &Landmark {
        &self.points[THUMB_TIP]
    }

    #[must_use]
    pub const fn index_tip(&self) -> &Landmark {
        &self.points[INDEX_TIP]
    }

    /// Distance between thumb tip and index fingertip
    #[must_use]
    pub fn pinch_distance(&self) -> f64 {
        self.thumb_tip().distance_to(self.index_tip())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Landmark> {
        self.points.iter()
    }

    #[must_use]
    pub const fn points(&self) -> &[Landmark; NUM_HAND_LANDMARKS] {
        &self.points
    }
}

impl Default for LandmarkSet {
    fn default() -> Self {
        Self::new([Landmark::default(); NUM_HAND_LANDMARKS])
    }
}
