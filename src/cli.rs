//! Command line interface.

use crate::config::Config;
use clap::Parser;
use std::path::PathBuf;

/// Control the mouse pointer with your index finger; pinch to click
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "hand-pointer", author, version, about, long_about = None)]
pub struct Args {
    /// Path to configuration file (YAML format)
    #[arg(short = 'C', long)]
    pub config: Option<PathBuf>,

    /// Camera index to use
    #[arg(long)]
    pub cam: Option<i32>,

    /// Video file to process instead of the camera
    #[arg(short, long)]
    pub video: Option<PathBuf>,

    /// Hand landmark ONNX model
    #[arg(short, long)]
    pub model: Option<PathBuf>,

    /// Smoothing factor (0-1, higher is smoother)
    #[arg(long)]
    pub alpha: Option<f64>,

    /// Movement scale
    #[arg(long)]
    pub scale: Option<f64>,

    /// Run detection on every n-th frame
    #[arg(long)]
    pub frame_skip: Option<u32>,

    /// Frames to keep the last hand pose after losing it
    #[arg(long)]
    pub persist: Option<u32>,

    /// Pinch distance that triggers a click
    #[arg(long)]
    pub click_threshold: Option<f64>,

    /// Do not open the overlay window
    #[arg(long)]
    pub no_gui: bool,

    /// Enable debug output
    #[arg(short, long)]
    pub debug: bool,

    /// Print the effective configuration as YAML and exit
    #[arg(long)]
    pub print_config: bool,
}

impl Args {
    /// Apply command line overrides on top of a loaded configuration
    pub fn apply_to(&self, config: &mut Config) {
        if let Some(cam) = self.cam {
            config.camera.index = cam;
        }
        if let Some(video) = &self.video {
            config.camera.video = Some(video.clone());
        }
        if let Some(model) = &self.model {
            config.detector.model = model.clone();
        }
        if let Some(alpha) = self.alpha {
            config.tracking.smoothing_alpha = alpha;
        }
        if let Some(scale) = self.scale {
            config.tracking.movement_scale = scale;
        }
        if let Some(frame_skip) = self.frame_skip {
            config.tracking.frame_skip = frame_skip;
        }
        if let Some(persist) = self.persist {
            config.tracking.persist_frames = persist;
        }
        if let Some(threshold) = self.click_threshold {
            config.tracking.click_threshold = threshold;
        }
        if self.no_gui {
            config.display.show_overlay = false;
        }
    }
}
