//! Hand landmark detection.
//!
//! The detector is a black box to the tracker: it either returns one complete
//! [`LandmarkSet`] for a frame or nothing. With the `hardware` feature,
//! [`HandLandmarkDetector`] runs a 21-point hand landmark ONNX model on the
//! whole frame.

use crate::{
    constants::{LANDMARK_DIMENSIONS, NUM_HAND_LANDMARKS},
    landmarks::{Landmark, LandmarkSet},
    Error, Result,
};

/// Producer of hand poses
pub trait LandmarkSource {
    type Frame;

    /// Detect a hand in `frame`
    ///
    /// `timestamp_ms` must not decrease between calls. `Ok(None)` means no
    /// hand was found, which is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if inference itself fails.
    fn detect(&mut self, frame: &Self::Frame, timestamp_ms: u64) -> Result<Option<LandmarkSet>>;
}

/// Turn raw model output into a normalized landmark set
///
/// `values` holds `x, y, z` per landmark in model-input pixels; `presence` is
/// the model's hand score. Returns `None` below `presence_threshold`.
///
/// # Errors
///
/// Returns `ModelOutputError` for a wrong value count or a non-positive input size.
#[allow(clippy::cast_precision_loss)] // input sizes are small
pub fn decode_landmarks(
    values: &[f32],
    presence: f32,
    presence_threshold: f32,
    input_size: i32,
) -> Result<Option<LandmarkSet>> {
    if values.len() != NUM_HAND_LANDMARKS * LANDMARK_DIMENSIONS {
        return Err(Error::ModelOutputError(format!(
            "Expected {} landmark values, got {}",
            NUM_HAND_LANDMARKS * LANDMARK_DIMENSIONS,
            values.len()
        )));
    }
    if input_size <= 0 {
        return Err(Error::ModelOutputError(format!("Invalid input size: {input_size}")));
    }
    if presence.is_nan() || presence < presence_threshold {
        return Ok(None);
    }

    let size = input_size as f32;
    let points: Vec<Landmark> = values
        .chunks_exact(LANDMARK_DIMENSIONS)
        .map(|v| Landmark::new(v[0] / size, v[1] / size, v[2] / size))
        .collect();
    LandmarkSet::from_slice(&points).map(Some)
}

#[cfg(feature = "hardware")]
pub use self::onnx::HandLandmarkDetector;

#[cfg(feature = "hardware")]
mod onnx {
    use super::{decode_landmarks, LandmarkSource, Result, LANDMARK_DIMENSIONS, NUM_HAND_LANDMARKS};
    use crate::{
        config::DetectorConfig, error::Error, landmarks::LandmarkSet, utils::image_conversion::frame_to_tensor,
    };
    use log::{debug, info};
    use ndarray::{Array4, CowArray};
    use opencv::core::Mat;
    use ort::{Environment, Session, Value};
    use std::sync::Arc;

    /// Hand landmark detector using `ONNX` Runtime
    pub struct HandLandmarkDetector {
        session: Session,
        input_size: i32,
        presence_threshold: f32,
        channels_first: bool,
    }

    impl HandLandmarkDetector {
        /// Load the model named in `config`
        ///
        /// # Errors
        ///
        /// Returns an error if:
        /// - The model file does not exist or cannot be loaded
        /// - The model has no inputs
        /// - The ONNX runtime environment cannot be created
        pub fn new(config: &DetectorConfig) -> Result<Self> {
            if !config.model.exists() {
                return Err(Error::ModelError(format!(
                    "Hand landmark model not found: {}",
                    config.model.display()
                )));
            }
            info!("Initializing HandLandmarkDetector with model: {}", config.model.display());

            let environment = Arc::new(
                Environment::builder()
                    .with_name("hand_landmarks")
                    .with_log_level(ort::LoggingLevel::Warning)
                    .build()?,
            );

            let session = ort::SessionBuilder::new(&environment)?
                .with_optimization_level(ort::GraphOptimizationLevel::Level3)?
                .with_model_from_file(&config.model)?;

            if session.inputs.is_empty() {
                return Err(Error::ModelInputError("Model has no inputs".to_string()));
            }

            Ok(Self {
                session,
                input_size: config.input_size,
                presence_threshold: config.presence_threshold,
                channels_first: config.channels_first,
            })
        }

        /// Run inference; returns flattened landmarks and the presence score
        fn forward(&self, inputs: Array4<f32>) -> Result<(Vec<f32>, f32)> {
            let cow_array = CowArray::from(inputs.into_dyn());
            let input_tensor = Value::from_array(self.session.allocator(), &cow_array)?;
            let outputs = self.session.run(vec![input_tensor])?;

            // Screen landmarks come first among the 63-value outputs, the
            // presence flag first among the scalar ones
            let mut landmarks = None;
            let mut presence = None;
            for output in &outputs {
                let tensor = output.try_extract::<f32>()?;
                let values: Vec<f32> = tensor.view().iter().copied().collect();
                match values.len() {
                    n if n == NUM_HAND_LANDMARKS * LANDMARK_DIMENSIONS && landmarks.is_none() => {
                        landmarks = Some(values);
                    }
                    1 if presence.is_none() => presence = Some(values[0]),
                    _ => {}
                }
            }

            let landmarks = landmarks
                .ok_or_else(|| Error::ModelOutputError("Model produced no 21-point landmark output".to_string()))?;
            let presence =
                presence.ok_or_else(|| Error::ModelOutputError("Model produced no presence score".to_string()))?;
            Ok((landmarks, presence))
        }
    }

    impl LandmarkSource for HandLandmarkDetector {
        type Frame = Mat;

        fn detect(&mut self, frame: &Mat, timestamp_ms: u64) -> Result<Option<LandmarkSet>> {
            let inputs = frame_to_tensor(frame, self.input_size, self.channels_first)?;
            let (values, presence) = self.forward(inputs)?;
            debug!("Hand presence {:.3} at {} ms", presence, timestamp_ms);
            decode_landmarks(&values, presence, self.presence_threshold, self.input_size)
        }
    }
}
