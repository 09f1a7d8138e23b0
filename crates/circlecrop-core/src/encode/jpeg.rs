//! JPEG encoding via the `image` crate's encoder.

use image::codecs::jpeg::JpegEncoder;
use image::ExtendedColorType;
use image::ImageEncoder;
use std::io::Cursor;
use thiserror::Error;

/// Errors that can occur during JPEG encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 3), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// JPEG encoding failed
    #[error("JPEG encoding failed: {0}")]
    EncodingFailed(String),
}

/// Encode RGB pixel data to JPEG bytes.
///
/// # Arguments
///
/// * `pixels` - RGB pixel data (3 bytes per pixel, row-major order)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `quality` - JPEG quality (1-100; the crop session passes its configured
///   quality, 82 by default)
///
/// Out-of-range quality values are clamped rather than rejected.
pub fn encode_jpeg(
    pixels: &[u8],
    width: u32,
    height: u32,
    quality: u8,
) -> Result<Vec<u8>, EncodeError> {
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let expected_len = (width as usize) * (height as usize) * 3;
    if pixels.len() != expected_len {
        return Err(EncodeError::InvalidPixelData {
            expected: expected_len,
            actual: pixels.len(),
        });
    }

    let quality = quality.clamp(1, 100);

    let mut buffer = Cursor::new(Vec::new());
    let encoder = JpegEncoder::new_with_quality(&mut buffer, quality);
    encoder
        .write_image(pixels, width, height, ExtendedColorType::Rgb8)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: any valid input at any quality yields a well-formed JPEG.
        #[test]
        fn prop_valid_input_produces_valid_jpeg(
            width in 1u32..=50,
            height in 1u32..=50,
            quality in 0u8..=255,
        ) {
            let pixels = vec![128u8; (width * height * 3) as usize];
            let jpeg = encode_jpeg(&pixels, width, height, quality).unwrap();

            prop_assert!(jpeg.len() >= 4);
            prop_assert_eq!(&jpeg[0..2], &[0xFF, 0xD8]);
            prop_assert_eq!(&jpeg[jpeg.len() - 2..], &[0xFF, 0xD9]);
        }

        /// Property: mismatched pixel length is always rejected.
        #[test]
        fn prop_invalid_pixel_length_returns_error(
            width in 1u32..=50,
            height in 1u32..=50,
            delta in -10i32..=10,
        ) {
            prop_assume!(delta != 0);

            let expected = (width as usize) * (height as usize) * 3;
            let actual = if delta > 0 {
                expected + delta as usize
            } else {
                expected.saturating_sub((-delta) as usize)
            };
            prop_assume!(actual != expected);

            let pixels = vec![128u8; actual];
            let result = encode_jpeg(&pixels, width, height, 82);
            prop_assert!(
                matches!(result, Err(EncodeError::InvalidPixelData { .. })),
                "expected InvalidPixelData error, got {:?}",
                result
            );
        }
    }
}
