//! Numeric and image conversion helpers.

pub mod safe_cast;

#[cfg(feature = "hardware")]
pub mod image_conversion;
