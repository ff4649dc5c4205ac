//! Configuration management for the hand pointer application

use crate::{
    constants::{
        DEFAULT_CAMERA_HEIGHT, DEFAULT_CAMERA_WIDTH, DEFAULT_CLICK_THRESHOLD, DEFAULT_DETECTOR_INPUT_SIZE,
        DEFAULT_EDGE_MARGIN, DEFAULT_FRAME_SKIP, DEFAULT_MOVEMENT_SCALE, DEFAULT_PERSIST_FRAMES,
        DEFAULT_PRESENCE_THRESHOLD, DEFAULT_SMOOTHING_ALPHA,
    },
    mapping::MappingParams,
    tracker::TrackerParams,
    Error, Result,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
///
/// Read once at startup and never changed while the loop runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Pointer control tuning
    pub tracking: TrackingConfig,

    /// Camera capture configuration
    pub camera: CameraConfig,

    /// Hand landmark model configuration
    pub detector: DetectorConfig,

    /// Overlay window configuration
    pub display: DisplayConfig,
}

/// Pointer control tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackingConfig {
    /// Weight of the previous pointer position (0.0-1.0, exclusive)
    pub smoothing_alpha: f64,

    /// Amplification of normalized hand motion
    pub movement_scale: f64,

    /// Horizontal calibration offset, in display widths
    pub horizontal_offset: f64,

    /// Vertical calibration offset, in display heights
    pub vertical_offset: f64,

    /// Run detection on every n-th frame
    pub frame_skip: u32,

    /// Frames to reuse the last pose after a missed detection
    pub persist_frames: u32,

    /// Normalized thumb/index distance below which a pinch clicks
    pub click_threshold: f64,

    /// Pixels kept between the pointer and the display edge
    pub edge_margin: f64,
}

/// Camera capture configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Webcam index
    pub index: i32,

    /// Video file to read instead of the webcam
    pub video: Option<PathBuf>,

    /// Requested frame width
    pub width: i32,

    /// Requested frame height
    pub height: i32,

    /// Mirror frames horizontally so hand motion matches pointer motion
    pub mirror: bool,
}

/// Hand landmark model configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Path to the hand landmark ONNX model
    pub model: PathBuf,

    /// Square model input size in pixels
    pub input_size: i32,

    /// Minimum hand presence score (0.0-1.0)
    pub presence_threshold: f32,

    /// Model expects NCHW input instead of NHWC
    pub channels_first: bool,
}

/// Overlay window configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Show the camera window with the hand wireframe
    pub show_overlay: bool,

    /// Window title
    pub window_name: String,
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            smoothing_alpha: DEFAULT_SMOOTHING_ALPHA,
            movement_scale: DEFAULT_MOVEMENT_SCALE,
            horizontal_offset: 0.0,
            vertical_offset: 0.0,
            frame_skip: DEFAULT_FRAME_SKIP,
            persist_frames: DEFAULT_PERSIST_FRAMES,
            click_threshold: DEFAULT_CLICK_THRESHOLD,
            edge_margin: DEFAULT_EDGE_MARGIN,
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            index: 0,
            video: None,
            width: DEFAULT_CAMERA_WIDTH,
            height: DEFAULT_CAMERA_HEIGHT,
            mirror: true,
        }
    }
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            model: PathBuf::from("assets/hand_landmark.onnx"),
            input_size: DEFAULT_DETECTOR_INPUT_SIZE,
            presence_threshold: DEFAULT_PRESENCE_THRESHOLD,
            channels_first: false,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            show_overlay: true,
            window_name: "Hand Pointer".to_string(),
        }
    }
}

impl TrackingConfig {
    /// Tracker parameters for this configuration
    #[must_use]
    pub const fn to_params(&self) -> TrackerParams {
        TrackerParams {
            smoothing_alpha: self.smoothing_alpha,
            mapping: MappingParams {
                scale: self.movement_scale,
                horizontal_offset: self.horizontal_offset,
                vertical_offset: self.vertical_offset,
                margin: self.edge_margin,
            },
            frame_skip: self.frame_skip,
            persist_frames: self.persist_frames,
            click_threshold: self.click_threshold,
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML text
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the text is not a valid configuration.
    pub fn from_yaml(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| Error::ConfigError(format!("Failed to parse config: {e}")))
    }

    /// Save configuration to a YAML file
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        std::fs::write(path, self.to_yaml()?)?;
        Ok(())
    }

    /// Serialize configuration to YAML text
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if serialization fails.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| Error::ConfigError(format!("Failed to serialize config: {e}")))
    }

    /// Validate configuration
    ///
    /// Out-of-range values are rejected, never clamped. Checks that need the
    /// display size happen again when the tracker is built.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` naming the first invalid parameter.
    pub fn validate(&self) -> Result<()> {
        let tracking = &self.tracking;

        if !(tracking.smoothing_alpha > 0.0 && tracking.smoothing_alpha < 1.0) {
            return Err(Error::ConfigError(
                "Smoothing alpha must be between 0.0 and 1.0 (exclusive)".to_string(),
            ));
        }
        if !tracking.movement_scale.is_finite() {
            return Err(Error::ConfigError("Movement scale must be finite".to_string()));
        }
        if !(tracking.horizontal_offset.is_finite() && tracking.vertical_offset.is_finite()) {
            return Err(Error::ConfigError("Offsets must be finite".to_string()));
        }
        if tracking.frame_skip == 0 {
            return Err(Error::ConfigError("Frame skip must be at least 1".to_string()));
        }
        if !(tracking.click_threshold.is_finite() && tracking.click_threshold > 0.0) {
            return Err(Error::ConfigError(
                "Click threshold must be greater than 0".to_string(),
            ));
        }
        if !(tracking.edge_margin.is_finite() && tracking.edge_margin >= 0.0) {
            return Err(Error::ConfigError("Edge margin must not be negative".to_string()));
        }

        if self.camera.width <= 0 || self.camera.height <= 0 {
            return Err(Error::ConfigError(
                "Camera resolution must be greater than 0".to_string(),
            ));
        }

        if self.detector.input_size <= 0 {
            return Err(Error::ConfigError(
                "Detector input size must be greater than 0".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.detector.presence_threshold) {
            return Err(Error::ConfigError(
                "Presence threshold must be between 0.0 and 1.0".to_string(),
            ));
        }

        Ok(())
    }
}

/// Example configuration file content
pub const EXAMPLE_CONFIG: &str = r#"# Hand Pointer Configuration

# Pointer control
tracking:
  smoothing_alpha: 0.5      # lower = snappier, higher = smoother (0.3-0.7)
  movement_scale: 2.4
  horizontal_offset: 0.0
  vertical_offset: 0.0
  frame_skip: 3             # raise if the frame rate drops
  persist_frames: 5
  click_threshold: 0.05     # 0.03-0.07 works for most hands
  edge_margin: 10.0

# Camera capture
camera:
  index: 0
  width: 480
  height: 360
  mirror: true

# Hand landmark model
detector:
  model: "assets/hand_landmark.onnx"
  input_size: 224
  presence_threshold: 0.4
  channels_first: false

# Overlay window
display:
  show_overlay: true
  window_name: "Hand Pointer"
"#;
