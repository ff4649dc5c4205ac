//! Frame scheduling for the landmark detector.
//!
//! Detection is the expensive part of a cycle, so it only runs on every
//! `stride`-th frame. Skipped frames still advance the tracker.

use crate::{Error, Result};

/// Returns whether detection should run on `frame_index`
///
/// `stride` of zero never schedules anything; [`FrameScheduler::new`] rejects it.
#[must_use]
pub const fn should_process(frame_index: u64, stride: u32) -> bool {
    stride != 0 && frame_index % stride as u64 == 0
}

/// Fixed-stride frame scheduler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameScheduler {
    stride: u32,
}

impl FrameScheduler {
    /// Create a scheduler running detection every `stride` frames
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when `stride` is zero.
    pub fn new(stride: u32) -> Result<Self> {
        if stride == 0 {
            return Err(Error::ConfigError(
                "Frame skip stride must be at least 1".to_string(),
            ));
        }
        Ok(Self { stride })
    }

    #[must_use]
    pub const fn should_process(&self, frame_index: u64) -> bool {
        should_process(frame_index, self.stride)
    }

    #[must_use]
    pub const fn stride(&self) -> u32 {
        self.stride
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stride_one_processes_everything() {
        let scheduler = FrameScheduler::new(1).unwrap();
        assert!((0..50).all(|i| scheduler.should_process(i)));
    }

    #[test]
    fn test_zero_stride_rejected() {
        assert!(matches!(FrameScheduler::new(0), Err(Error::ConfigError(_))));
        assert!(!should_process(0, 0));
    }

    #[test]
    fn test_first_frame_is_scheduled() {
        let scheduler = FrameScheduler::new(4).unwrap();
        assert!(scheduler.should_process(0));
        assert!(!scheduler.should_process(1));
        assert!(scheduler.should_process(8));
    }
}
