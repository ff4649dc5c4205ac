//! Diagnostic camera window: hand wireframe, tracking status and FPS.

use crate::{landmarks::Landmark, utils::safe_cast::f32_to_i32_clamp};

/// Pixel position of a normalized landmark in a `width` x `height` image
#[must_use]
#[allow(clippy::cast_precision_loss)] // frame sizes are small
pub fn landmark_to_pixel(landmark: &Landmark, width: i32, height: i32) -> (i32, i32) {
    (
        f32_to_i32_clamp(landmark.x * width as f32, 0, (width - 1).max(0)),
        f32_to_i32_clamp(landmark.y * height as f32, 0, (height - 1).max(0)),
    )
}

#[cfg(feature = "hardware")]
pub use self::window::Overlay;

#[cfg(feature = "hardware")]
mod window {
    use super::landmark_to_pixel;
    use crate::{app::LoopControl, constants::HAND_CONNECTIONS, tracker::CycleReport, Result};
    use log::info;
    use opencv::{
        core::{Mat, Point, Scalar},
        highgui::{self, WINDOW_NORMAL},
        imgproc::{self, FONT_HERSHEY_SIMPLEX, LINE_8},
        prelude::*,
    };
    use std::time::Instant;

    const KEY_ESCAPE: i32 = 27;

    /// `OpenCV` window showing what the tracker sees
    pub struct Overlay {
        window_name: String,
        last_frame: Instant,
    }

    impl Overlay {
        /// Create the window
        ///
        /// # Errors
        ///
        /// Returns an error if the window cannot be created.
        pub fn new(window_name: &str) -> Result<Self> {
            highgui::named_window(window_name, WINDOW_NORMAL)?;
            Ok(Self {
                window_name: window_name.to_string(),
                last_frame: Instant::now(),
            })
        }

        /// Draw the cycle on a copy of `frame`, show it, and poll the quit key
        ///
        /// # Errors
        ///
        /// Returns an error if drawing or display fails.
        pub fn show(&mut self, frame: &Mat, report: &CycleReport) -> Result<LoopControl> {
            let mut canvas = frame.clone();
            let (width, height) = (canvas.cols(), canvas.rows());

            if let Some(hand) = &report.landmarks {
                let points: Vec<Point> = hand
                    .iter()
                    .map(|lm| {
                        let (x, y) = landmark_to_pixel(lm, width, height);
                        Point::new(x, y)
                    })
                    .collect();

                for &(from, to) in &HAND_CONNECTIONS {
                    imgproc::line(
                        &mut canvas,
                        points[from],
                        points[to],
                        Scalar::new(255.0, 255.0, 255.0, 0.0),
                        2,
                        LINE_8,
                        0,
                    )?;
                }
                for point in &points {
                    imgproc::circle(&mut canvas, *point, 4, Scalar::new(0.0, 255.0, 0.0, 0.0), -1, LINE_8, 0)?;
                }

                let (x, y) = landmark_to_pixel(hand.index_tip(), width, height);
                imgproc::circle(
                    &mut canvas,
                    Point::new(x, y),
                    12,
                    Scalar::new(0.0, 0.0, 255.0, 0.0),
                    -1,
                    LINE_8,
                    0,
                )?;
            }

            let (status, color) = if report.detected() {
                ("Hand OK - move index finger", Scalar::new(0.0, 255.0, 0.0, 0.0))
            } else {
                ("Show hand (palm facing camera)", Scalar::new(0.0, 0.0, 255.0, 0.0))
            };
            imgproc::put_text(
                &mut canvas,
                status,
                Point::new(20, 40),
                FONT_HERSHEY_SIMPLEX,
                0.75,
                color,
                2,
                LINE_8,
                false,
            )?;

            let elapsed = self.last_frame.elapsed().as_secs_f64();
            self.last_frame = Instant::now();
            let fps_text = format!("FPS: {:.1}", 1.0 / (elapsed + 1e-8));
            imgproc::put_text(
                &mut canvas,
                &fps_text,
                Point::new(20, 80),
                FONT_HERSHEY_SIMPLEX,
                0.8,
                Scalar::new(0.0, 255.0, 255.0, 0.0),
                2,
                LINE_8,
                false,
            )?;

            highgui::imshow(&self.window_name, &canvas)?;

            let key = highgui::wait_key(1)?;
            if key == KEY_ESCAPE || key == i32::from(b'q') {
                info!("Exit requested by user");
                return Ok(LoopControl::Stop);
            }
            Ok(LoopControl::Continue)
        }
    }

    impl Drop for Overlay {
        fn drop(&mut self) {
            let _ = highgui::destroy_window(&self.window_name);
        }
    }
}
