//! Rasterizing the pixels under the crop circle into the output image.
//!
//! The renderer uses inverse mapping: for each pixel of the fixed `D x D`
//! output it computes the fractional source coordinate it corresponds to and
//! interpolates the four surrounding source pixels (bilinear). Sampling works
//! at full source resolution; the display scale only determines *which*
//! source region is sampled, never the output resolution.

use crate::decode::DecodedImage;
use crate::geometry::{crop_source_rect, Offset, SourceRect};

/// Render the source pixels currently under the crop circle into a square
/// `diameter x diameter` output image.
///
/// # Arguments
///
/// * `image` - The decoded source image
/// * `scale` - Current display scale
/// * `offset` - Current pan offset in container pixels
/// * `diameter` - Crop circle diameter; also the output side length
///
/// # Behavior
///
/// The output is always exactly `diameter x diameter` pixels, independent of
/// scale, offset, and container size. Source coordinates at the image
/// boundary clamp to the edge texel instead of reading out of bounds.
pub fn render_crop(
    image: &DecodedImage,
    scale: f64,
    offset: Offset,
    diameter: u32,
) -> DecodedImage {
    let rect = crop_source_rect(image.width, image.height, scale, offset, diameter);
    sample_rect(image, rect, diameter)
}

/// Resample a fractional source rectangle into a square output raster.
pub fn sample_rect(image: &DecodedImage, rect: SourceRect, out_size: u32) -> DecodedImage {
    let out = out_size as usize;
    let mut output = vec![0u8; out * out * 3];

    if image.is_empty() || out_size == 0 {
        return DecodedImage {
            width: out_size,
            height: out_size,
            pixels: output,
        };
    }

    let step_x = rect.width / out_size as f64;
    let step_y = rect.height / out_size as f64;

    for dst_y in 0..out {
        // Sample at output pixel centers
        let src_y = rect.y + (dst_y as f64 + 0.5) * step_y - 0.5;
        for dst_x in 0..out {
            let src_x = rect.x + (dst_x as f64 + 0.5) * step_x - 0.5;

            let pixel = sample_bilinear(image, src_x, src_y);
            let dst_idx = (dst_y * out + dst_x) * 3;
            output[dst_idx] = pixel[0];
            output[dst_idx + 1] = pixel[1];
            output[dst_idx + 2] = pixel[2];
        }
    }

    DecodedImage {
        width: out_size,
        height: out_size,
        pixels: output,
    }
}

/// Get a pixel as [f64; 3] from an image at the given coordinates.
#[inline]
fn get_pixel_f64(image: &DecodedImage, px: usize, py: usize) -> [f64; 3] {
    let idx = (py * image.width as usize + px) * 3;
    [
        image.pixels[idx] as f64,
        image.pixels[idx + 1] as f64,
        image.pixels[idx + 2] as f64,
    ]
}

/// Sample a pixel using bilinear interpolation with edge clamping.
///
/// Coordinates outside the image clamp to the nearest edge texel. The crop
/// rect is in-bounds by construction, so clamping only triggers for the
/// half-texel band at the borders and for float drift.
fn sample_bilinear(image: &DecodedImage, x: f64, y: f64) -> [u8; 3] {
    let max_x = (image.width - 1) as f64;
    let max_y = (image.height - 1) as f64;

    let x = x.clamp(0.0, max_x);
    let y = y.clamp(0.0, max_y);

    let x0 = x.floor() as usize;
    let y0 = y.floor() as usize;
    let x1 = (x0 + 1).min(image.width as usize - 1);
    let y1 = (y0 + 1).min(image.height as usize - 1);

    let fx = x - x0 as f64;
    let fy = y - y0 as f64;

    let p00 = get_pixel_f64(image, x0, y0);
    let p10 = get_pixel_f64(image, x1, y0);
    let p01 = get_pixel_f64(image, x0, y1);
    let p11 = get_pixel_f64(image, x1, y1);

    let mut result = [0u8; 3];
    for c in 0..3 {
        let top = p00[c] * (1.0 - fx) + p10[c] * fx;
        let bottom = p01[c] * (1.0 - fx) + p11[c] * fx;
        let value = top * (1.0 - fy) + bottom * fy;
        result[c] = value.round().clamp(0.0, 255.0) as u8;
    }
    result
}


// ============================================================================
// Property-Based Tests
// ============================================================================
