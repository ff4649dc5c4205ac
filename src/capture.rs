//! Camera frame acquisition.

#[cfg(feature = "hardware")]
use crate::{config::CameraConfig, Error};
use crate::Result;

/// Source of camera frames
pub trait FrameSource {
    type Frame;

    /// Block until the next frame is available
    ///
    /// `Ok(None)` means the stream ended (e.g. a video file ran out); an error
    /// is a capture failure and ends the run.
    fn next_frame(&mut self) -> Result<Option<Self::Frame>>;
}

#[cfg(feature = "hardware")]
pub use self::camera::CameraCapture;

#[cfg(feature = "hardware")]
mod camera {
    use super::{CameraConfig, Error, FrameSource, Result};
    use log::info;
    use opencv::{
        core::{self, Mat},
        prelude::*,
        videoio::{self, VideoCapture, CAP_PROP_BUFFERSIZE, CAP_PROP_FRAME_HEIGHT, CAP_PROP_FRAME_WIDTH},
    };

    /// `OpenCV` webcam or video file reader
    pub struct CameraCapture {
        capture: VideoCapture,
        mirror: bool,
        from_file: bool,
    }

    impl CameraCapture {
        /// Open the camera or video file named by `config`
        ///
        /// # Errors
        ///
        /// Returns `Capture` if the device or file cannot be opened.
        pub fn open(config: &CameraConfig) -> Result<Self> {
            let capture = match &config.video {
                Some(path) => {
                    info!("Opening video file: {}", path.display());
                    VideoCapture::from_file(&path.to_string_lossy(), videoio::CAP_ANY)?
                }
                None => {
                    info!("Opening camera {}", config.index);
                    let mut cap = VideoCapture::new(config.index, videoio::CAP_ANY)?;
                    cap.set(CAP_PROP_FRAME_WIDTH, f64::from(config.width))?;
                    cap.set(CAP_PROP_FRAME_HEIGHT, f64::from(config.height))?;

                    // Reduce buffer size for lower latency (webcam only)
                    cap.set(CAP_PROP_BUFFERSIZE, 1.0)?;
                    cap
                }
            };

            if !capture.is_opened()? {
                return Err(Error::Capture(match &config.video {
                    Some(path) => format!("Cannot open video file {}", path.display()),
                    None => format!("Cannot open camera {}", config.index),
                }));
            }

            Ok(Self {
                capture,
                mirror: config.mirror,
                from_file: config.video.is_some(),
            })
        }
    }

    impl FrameSource for CameraCapture {
        type Frame = Mat;

        fn next_frame(&mut self) -> Result<Option<Mat>> {
            let mut frame = Mat::default();
            let grabbed = self
                .capture
                .read(&mut frame)
                .map_err(|e| Error::Capture(format!("Failed to read frame: {e}")))?;

            if !grabbed || frame.empty() {
                if self.from_file {
                    info!("End of video file reached");
                    return Ok(None);
                }
                return Err(Error::Capture("Camera returned no frame".to_string()));
            }

            if self.mirror {
                let mut mirrored = Mat::default();
                core::flip(&frame, &mut mirrored, 1)?;
                return Ok(Some(mirrored));
            }
            Ok(Some(frame))
        }
    }
}
