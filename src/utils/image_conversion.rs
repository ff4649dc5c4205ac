//! Conversion of `OpenCV` frames into model input tensors.

use super::safe_cast::usize_to_i32;
use crate::{Error, Result};
use ndarray::Array4;
use opencv::{
    core::{Mat, Size, Vec3f, CV_32F},
    imgproc::{self, InterpolationFlags},
    prelude::*,
};

/// Resize a BGR frame to a square RGB tensor with values in `[0, 1]`
///
/// The result has shape `(1, size, size, 3)`, or `(1, 3, size, size)` when
/// `channels_first` is set.
///
/// # Errors
///
/// Returns an error if the frame is empty, `size` is not positive, or an
/// `OpenCV` operation fails.
#[allow(clippy::cast_sign_loss)] // size is checked positive
pub fn frame_to_tensor(frame: &Mat, size: i32, channels_first: bool) -> Result<Array4<f32>> {
    if frame.empty() {
        return Err(Error::InvalidInput("Cannot convert an empty frame".to_string()));
    }
    if size <= 0 {
        return Err(Error::InvalidInput(format!("Invalid tensor size: {size}")));
    }

    let mut resized = Mat::default();
    imgproc::resize(
        frame,
        &mut resized,
        Size::new(size, size),
        0.0,
        0.0,
        InterpolationFlags::INTER_LINEAR as i32,
    )?;

    let mut rgb = Mat::default();
    imgproc::cvt_color(&resized, &mut rgb, imgproc::COLOR_BGR2RGB, 0)?;

    let mut float_image = Mat::default();
    rgb.convert_to(&mut float_image, CV_32F, 1.0 / 255.0, 0.0)?;

    let side = size as usize;
    let mut tensor = if channels_first {
        Array4::<f32>::zeros((1, 3, side, side))
    } else {
        Array4::<f32>::zeros((1, side, side, 3))
    };

    for row in 0..side {
        for col in 0..side {
            let pixel = float_image.at_2d::<Vec3f>(usize_to_i32(row)?, usize_to_i32(col)?)?;
            for ch in 0..3 {
                if channels_first {
                    tensor[[0, ch, row, col]] = pixel[ch];
                } else {
                    tensor[[0, row, col, ch]] = pixel[ch];
                }
            }
        }
    }

    Ok(tensor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use opencv::core::{Scalar, CV_8UC3};

    #[test]
    fn test_layout_and_normalization() {
        // Pure blue in BGR becomes (0, 0, 1) in RGB
        let frame = Mat::new_rows_cols_with_default(48, 64, CV_8UC3, Scalar::new(255.0, 0.0, 0.0, 0.0)).unwrap();

        let nhwc = frame_to_tensor(&frame, 16, false).unwrap();
        assert_eq!(nhwc.shape(), &[1, 16, 16, 3]);
        assert!((nhwc[[0, 5, 5, 2]] - 1.0).abs() < 1e-6);
        assert!(nhwc[[0, 5, 5, 0]].abs() < 1e-6);

        let nchw = frame_to_tensor(&frame, 16, true).unwrap();
        assert_eq!(nchw.shape(), &[1, 3, 16, 16]);
        assert!((nchw[[0, 2, 5, 5]] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_empty_frame_rejected() {
        assert!(frame_to_tensor(&Mat::default(), 16, false).is_err());
    }
}
