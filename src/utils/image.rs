//! Utility functions for image decoding and loading.
//!
//! Uploads arrive as raw bytes; these helpers sniff and decode them into
//! [`DynamicImage`]s before preprocessing. Decoding is synchronous and reports
//! failures as [`GrainError::InvalidImage`].

use crate::core::GrainError;
use image::{DynamicImage, ImageFormat};
use std::path::Path;

/// Guesses the image format from the leading magic bytes.
pub fn sniff_format(bytes: &[u8]) -> Option<ImageFormat> {
    image::guess_format(bytes).ok()
}

/// True when the payload starts with the signature of a known image format.
///
/// This only inspects the header; a truncated or corrupted body still fails in
/// [`decode_image`].
pub fn is_supported_image(bytes: &[u8]) -> bool {
    sniff_format(bytes).is_some()
}

/// Decodes raw image bytes.
///
/// # Errors
///
/// Returns [`GrainError::InvalidImage`] when the payload is empty, has an
/// unrecognized format, or fails to decode.
pub fn decode_image(bytes: &[u8]) -> Result<DynamicImage, GrainError> {
    if bytes.is_empty() {
        return Err(GrainError::invalid_image("empty payload"));
    }

    let format = sniff_format(bytes).ok_or_else(|| {
        GrainError::invalid_image(format!(
            "unrecognized image format ({} bytes)",
            bytes.len()
        ))
    })?;

    image::load_from_memory_with_format(bytes, format).map_err(|e| {
        GrainError::invalid_image_with_source(format!("failed to decode {:?} image", format), e)
    })
}

/// Loads and decodes an image file.
///
/// # Errors
///
/// Returns [`GrainError::Io`] when the file cannot be read and
/// [`GrainError::InvalidImage`] when its contents cannot be decoded.
pub fn load_image(path: &Path) -> Result<DynamicImage, GrainError> {
    let bytes = std::fs::read(path)?;
    decode_image(&bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage, Rgba, RgbaImage};
    use std::io::Cursor;

    fn encode_png(image: &DynamicImage) -> Vec<u8> {
        let mut bytes = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn test_decode_png_roundtrip_dimensions() {
        let image = DynamicImage::ImageRgba8(RgbaImage::from_pixel(12, 7, Rgba([1, 2, 3, 4])));
        let decoded = decode_image(&encode_png(&image)).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (12, 7));
    }

    #[test]
    fn test_empty_payload_is_invalid() {
        let error = decode_image(&[]).unwrap_err();
        assert!(matches!(error, GrainError::InvalidImage { .. }));
        assert!(!is_supported_image(&[]));
    }

    #[test]
    fn test_text_payload_is_invalid() {
        let bytes = b"name,variety\nsample,basmati\n";
        assert!(!is_supported_image(bytes));
        assert!(matches!(
            decode_image(bytes),
            Err(GrainError::InvalidImage { .. })
        ));
    }

    #[test]
    fn test_truncated_png_is_invalid() {
        let image = DynamicImage::ImageRgb8(RgbImage::from_pixel(64, 64, Rgb([9, 9, 9])));
        let bytes = encode_png(&image);
        let truncated = &bytes[..bytes.len() / 2];

        assert!(is_supported_image(truncated));
        assert!(matches!(
            decode_image(truncated),
            Err(GrainError::InvalidImage { .. })
        ));
    }

    #[test]
    fn test_load_image_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grains.png");
        let image = DynamicImage::ImageRgb8(RgbImage::from_pixel(5, 5, Rgb([200, 180, 150])));
        std::fs::write(&path, encode_png(&image)).unwrap();

        let loaded = load_image(&path).unwrap();
        assert_eq!(loaded.to_rgb8().get_pixel(2, 2), &Rgb([200, 180, 150]));

        let missing = load_image(&dir.path().join("missing.png"));
        assert!(matches!(missing, Err(GrainError::Io(_))));
    }
}
