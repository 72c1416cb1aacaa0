//! Turns a decoded image into the classifier's input tensor.

use super::normalization::NormalizeImage;
use crate::core::constants::MODEL_INPUT_SIZE;
use crate::core::{GrainError, Tensor4D};
use image::DynamicImage;
use image::imageops::{self, FilterType};
use tracing::debug;

/// Resizes, converts and standardizes images for the rice classifier.
///
/// The pipeline is fixed by the model contract:
///
/// 1. Conversion to 3-channel RGB (grayscale is expanded, alpha is dropped).
/// 2. Bilinear resize to exactly 224x224. Aspect ratio is not preserved.
/// 3. Scaling to `[0, 1]` and standardization with the ImageNet mean and std.
/// 4. A leading batch dimension, giving `[1, 224, 224, 3]`.
///
/// The transform is pure: the same image always yields the same tensor.
#[derive(Debug, Clone)]
pub struct ImagePreprocessor {
    target_size: u32,
    filter: FilterType,
    normalize: NormalizeImage,
}

impl Default for ImagePreprocessor {
    fn default() -> Self {
        Self {
            target_size: MODEL_INPUT_SIZE,
            filter: FilterType::Triangle,
            normalize: NormalizeImage::imagenet(),
        }
    }
}

impl ImagePreprocessor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Produces the `[1, 224, 224, 3]` tensor for an image.
    ///
    /// # Errors
    ///
    /// Returns [`GrainError::InvalidImage`] when the image has zero width or height.
    pub fn process(&self, image: &DynamicImage) -> Result<Tensor4D, GrainError> {
        let (width, height) = (image.width(), image.height());
        if width == 0 || height == 0 {
            return Err(GrainError::invalid_image(format!(
                "image has zero area ({}x{})",
                width, height
            )));
        }

        let rgb = image.to_rgb8();
        let resized = if width == self.target_size && height == self.target_size {
            rgb
        } else {
            imageops::resize(&rgb, self.target_size, self.target_size, self.filter)
        };

        let tensor = self.normalize.normalize_to(&resized)?;
        debug!(
            "preprocessed {}x{} {:?} image into {:?}",
            width,
            height,
            image.color(),
            tensor.shape()
        );
        Ok(tensor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::constants::{IMAGENET_MEAN, IMAGENET_STD, MODEL_INPUT_SHAPE};
    use image::{GrayImage, Luma, Rgb, RgbImage, Rgba, RgbaImage};

    #[test]
    fn test_output_shape_for_any_input_size() {
        let preprocessor = ImagePreprocessor::new();
        for (w, h) in [(1, 1), (224, 224), (640, 17), (1200, 900)] {
            let image = DynamicImage::ImageRgb8(RgbImage::new(w, h));
            let tensor = preprocessor.process(&image).unwrap();
            assert_eq!(tensor.shape(), &MODEL_INPUT_SHAPE);
        }
    }

    #[test]
    fn test_zero_area_is_invalid_image() {
        let image = DynamicImage::ImageRgb8(RgbImage::new(0, 10));
        let error = ImagePreprocessor::new().process(&image).unwrap_err();
        assert!(matches!(error, GrainError::InvalidImage { .. }));
    }

    #[test]
    fn test_grayscale_expands_to_three_channels() {
        let image = DynamicImage::ImageLuma8(GrayImage::from_pixel(50, 40, Luma([255])));
        let tensor = ImagePreprocessor::new().process(&image).unwrap();
        for c in 0..3 {
            let expected = (1.0 - IMAGENET_MEAN[c]) / IMAGENET_STD[c];
            assert!((tensor[[0, 10, 10, c]] - expected).abs() < 1e-4);
        }
    }

    #[test]
    fn test_alpha_is_dropped() {
        let opaque = DynamicImage::ImageRgb8(RgbImage::from_pixel(30, 30, Rgb([10, 120, 200])));
        let translucent =
            DynamicImage::ImageRgba8(RgbaImage::from_pixel(30, 30, Rgba([10, 120, 200, 7])));

        let preprocessor = ImagePreprocessor::new();
        assert_eq!(
            preprocessor.process(&opaque).unwrap(),
            preprocessor.process(&translucent).unwrap()
        );
    }

    #[test]
    fn test_deterministic() {
        let image = DynamicImage::ImageRgb8(RgbImage::from_fn(97, 61, |x, y| {
            Rgb([(x * 2) as u8, (y * 3) as u8, ((x + y) % 256) as u8])
        }));
        let preprocessor = ImagePreprocessor::new();
        assert_eq!(
            preprocessor.process(&image).unwrap(),
            preprocessor.process(&image).unwrap()
        );
    }
}
