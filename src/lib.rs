//! Hand-landmark driven pointer control.
//!
//! This library turns a noisy, intermittently available stream of hand
//! landmarks into stable pointer motion and pinch clicks:
//! - Frame scheduling to bound detector cost
//! - Persistence of the last pose across short detection gaps
//! - Mapping of the index fingertip to display coordinates
//! - Exponential smoothing of the pointer, every cycle
//! - Edge-triggered pinch-to-click
//!
//! The camera, the landmark model and the pointer device are behind the
//! [`capture::FrameSource`], [`hand_detection::LandmarkSource`] and
//! [`cursor_control::PointerSink`] traits. Concrete `OpenCV`, `ONNX` Runtime
//! and X11 implementations are compiled with the `hardware` feature.
//!
//! # Examples
//!
//! ## Driving the tracker directly
//!
//! ```
//! use hand_pointer::{
//!     config::Config,
//!     landmarks::{Landmark, LandmarkSet},
//!     mapping::DisplaySize,
//!     tracker::{FrameInput, Tracker},
//! };
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::default();
//! config.validate()?;
//! let mut tracker = Tracker::new(config.tracking.to_params(), DisplaySize::new(1920, 1080))?;
//!
//! let hand = LandmarkSet::new([Landmark::new(0.2, 0.3, 0.0); 21]);
//! let input = if tracker.should_detect() {
//!     FrameInput::Detected(hand)
//! } else {
//!     FrameInput::Skipped
//! };
//!
//! let report = tracker.advance(input);
//! println!("Pointer at ({:.0}, {:.0})", report.position.0, report.position.1);
//! // Thumb and index tip coincide in this pose, so it counts as a pinch
//! assert!(report.click);
//! # Ok(())
//! # }
//! ```
//!
//! ## Running the camera application
//!
//! ```no_run
//! # #[cfg(feature = "hardware")]
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use hand_pointer::{app::HandPointerApp, config::Config};
//!
//! let config = Config::from_file("hand_pointer.yaml")?;
//! let mut app = HandPointerApp::new(&config)?;
//! let summary = app.run()?;
//! println!("{} clicks", summary.clicks);
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "hardware"))]
//! # fn main() {}
//! ```

/// Hand landmark types
pub mod landmarks;

/// Frame scheduling for the detector
pub mod scheduler;

/// Bounded reuse of the last pose across detection gaps
pub mod persistence;

/// Landmark to display coordinate mapping
pub mod mapping;

/// Exponential pointer smoothing
pub mod smoothing;

/// Pinch-to-click debouncing
pub mod click;

/// Per-cycle tracking state machine
pub mod tracker;

/// Timestamp sources
pub mod clock;

/// Camera frame acquisition
pub mod capture;

/// Hand landmark detection
pub mod hand_detection;

/// Pointer output
pub mod cursor_control;

/// Diagnostic overlay window
pub mod overlay;

/// Main application loop
pub mod app;

/// Command line interface
pub mod cli;

/// Configuration management
pub mod config;

/// Constants used throughout the application
pub mod constants;

/// Error types and result handling
pub mod error;

/// Numeric and image conversion helpers
pub mod utils;

pub use error::{Error, Result};
