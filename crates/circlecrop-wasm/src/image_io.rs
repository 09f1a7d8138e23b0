//! Decode/encode bindings.
//!
//! These free functions cover callers that want the image pipeline without a
//! crop session, e.g. probing a file's dimensions before opening the cropper
//! (the dimension validation the core's `DegenerateDimensions` error asks
//! callers to do).

use crate::types::JsSourceImage;
use circlecrop_core::geometry::Offset;
use circlecrop_core::{decode, encode, render};
use wasm_bindgen::prelude::*;

/// Decode an image (JPEG or PNG) from raw file bytes.
///
/// EXIF orientation is applied, so the reported dimensions match what the
/// user sees in an `<img>` tag.
///
/// # Errors
///
/// Returns an error for unrecognized/corrupt files and for images that
/// decode to zero width or height.
///
/// # Example (TypeScript)
///
/// ```typescript
/// const bytes = new Uint8Array(await file.arrayBuffer());
/// const image = decode_image(bytes);
/// console.log(`${image.width}x${image.height}`);
/// ```
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8]) -> Result<JsSourceImage, JsValue> {
    decode::decode_image(bytes)
        .map(JsSourceImage::from_decoded)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Encode RGB pixel data to JPEG bytes.
///
/// # Arguments
///
/// * `pixels` - RGB pixel data as a `Uint8Array` (3 bytes per pixel)
/// * `width`, `height` - Image dimensions in pixels
/// * `quality` - JPEG quality (1-100; the cropper default is 82)
#[wasm_bindgen]
pub fn encode_jpeg(
    pixels: &[u8],
    width: u32,
    height: u32,
    quality: u8,
) -> Result<Vec<u8>, JsValue> {
    encode::encode_jpeg(pixels, width, height, quality)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Render the source pixels under the crop circle into a square
/// `diameter x diameter` raster, without going through a session.
///
/// Useful for re-generating an avatar from a persisted viewport transform
/// (e.g. server-side or when re-cropping at a different output size).
///
/// # Arguments
///
/// * `image` - The decoded source image
/// * `scale` - Display scale the transform was captured at
/// * `offset_x`, `offset_y` - Pan offset in container pixels
/// * `diameter` - Crop circle diameter; also the output side length
#[wasm_bindgen]
pub fn render_crop(
    image: &JsSourceImage,
    scale: f64,
    offset_x: f64,
    offset_y: f64,
    diameter: u32,
) -> JsSourceImage {
    let src = image.to_decoded();
    let out = render::render_crop(&src, scale, Offset::new(offset_x, offset_y), diameter);
    JsSourceImage::from_decoded(out)
}
