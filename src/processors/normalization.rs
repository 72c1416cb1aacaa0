//! Image normalization utilities.
//!
//! This module folds pixel scaling and channel-wise standardization into one
//! affine transform per channel, `value * alpha + beta`, and writes the result
//! into a batch-of-one NHWC tensor.

use crate::core::constants::{IMAGENET_MEAN, IMAGENET_STD, PIXEL_SCALE};
use crate::core::{GrainError, Tensor4D};
use image::RgbImage;
use rayon::prelude::*;

/// Normalizes images for the classifier.
///
/// Holds the per-channel affine coefficients derived from the ImageNet
/// statistics the classifier was trained with.
#[derive(Debug, Clone)]
pub struct NormalizeImage {
    /// Scaling factors for each channel (alpha = scale / std)
    pub alpha: [f32; 3],
    /// Offset values for each channel (beta = -mean / std)
    pub beta: [f32; 3],
}

impl NormalizeImage {
    /// ImageNet statistics, the classifier's input contract.
    pub fn imagenet() -> Self {
        let mut alpha = [0.0f32; 3];
        let mut beta = [0.0f32; 3];
        for c in 0..3 {
            alpha[c] = PIXEL_SCALE / IMAGENET_STD[c];
            beta[c] = -IMAGENET_MEAN[c] / IMAGENET_STD[c];
        }
        Self { alpha, beta }
    }

    /// Normalized value of one 8-bit channel sample.
    #[inline]
    pub fn normalize_value(&self, value: u8, channel: usize) -> f32 {
        value as f32 * self.alpha[channel] + self.beta[channel]
    }

    /// Normalizes a single RGB image and returns it as a `[1, H, W, 3]` tensor.
    ///
    /// Rows are processed in parallel; the output is identical regardless of
    /// thread scheduling.
    pub fn normalize_to(&self, img: &RgbImage) -> Result<Tensor4D, GrainError> {
        let (width, height) = img.dimensions();
        let (width, height) = (width as usize, height as usize);
        let channels = 3usize;
        let src = img.as_raw();

        let mut result = vec![0.0f32; channels * height * width];
        let row_len = width * channels;
        if row_len > 0 {
            result
                .par_chunks_mut(row_len)
                .zip(src.par_chunks(row_len))
                .for_each(|(dst_row, src_row)| {
                    for (i, (dst, &value)) in dst_row.iter_mut().zip(src_row).enumerate() {
                        *dst = self.normalize_value(value, i % channels);
                    }
                });
        }

        Tensor4D::from_shape_vec((1, height, width, channels), result).map_err(|e| {
            GrainError::tensor_operation(
                &format!(
                    "Failed to create normalization tensor for {}x{} image",
                    width, height
                ),
                e,
            )
        })
    }
}

impl Default for NormalizeImage {
    fn default() -> Self {
        Self::imagenet()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn test_imagenet_coefficients() {
        let normalize = NormalizeImage::imagenet();
        for c in 0..3 {
            assert!((normalize.normalize_value(0, c) + IMAGENET_MEAN[c] / IMAGENET_STD[c]).abs() < 1e-6);
            let white = (1.0 - IMAGENET_MEAN[c]) / IMAGENET_STD[c];
            assert!((normalize.normalize_value(255, c) - white).abs() < 1e-5);
        }
    }

    #[test]
    fn test_hwc_layout() {
        let mut img = RgbImage::new(2, 1);
        img.put_pixel(0, 0, Rgb([255, 0, 0]));
        img.put_pixel(1, 0, Rgb([0, 0, 255]));

        let tensor = NormalizeImage::imagenet().normalize_to(&img).unwrap();
        assert_eq!(tensor.shape(), &[1, 1, 2, 3]);

        let expected_red = (1.0 - IMAGENET_MEAN[0]) / IMAGENET_STD[0];
        let expected_blue_zero = -IMAGENET_MEAN[2] / IMAGENET_STD[2];
        assert!((tensor[[0, 0, 0, 0]] - expected_red).abs() < 1e-5);
        assert!((tensor[[0, 0, 0, 2]] - expected_blue_zero).abs() < 1e-5);
        assert!((tensor[[0, 0, 1, 2]] - (1.0 - IMAGENET_MEAN[2]) / IMAGENET_STD[2]).abs() < 1e-5);
    }
}
