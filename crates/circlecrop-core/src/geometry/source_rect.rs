//! Mapping the crop circle back into source-image pixel space.

use super::{Offset, SourceRect};

/// Compute the square region of the source image that lies under the crop
/// circle, in natural pixel coordinates.
///
/// Derivation, working in container coordinates with the origin at the
/// container center:
///
/// ```text
/// image top-left  = offset - (W*scale/2, H*scale/2)
/// crop top-left   = -(D/2, D/2)
/// crop - image    = (W*scale/2 - D/2 - offset.x, H*scale/2 - D/2 - offset.y)
/// ```
///
/// Dividing by `scale` converts the difference into natural pixels, and the
/// crop's source-space side length is `D / scale`. The container center
/// cancels out of the subtraction, so the result is independent of container
/// size.
///
/// The rectangle is then clamped to `[0, W] x [0, H]`, shrinking at the
/// boundary instead of sampling out of bounds. With a clamped offset the
/// rectangle is already in-bounds by construction; the clamp only absorbs
/// floating-point drift accumulated over repeated pan/zoom.
pub fn crop_source_rect(
    width: u32,
    height: u32,
    scale: f64,
    offset: Offset,
    diameter: u32,
) -> SourceRect {
    let w = width as f64;
    let h = height as f64;
    let radius = diameter as f64 / 2.0;

    let x = (w * scale / 2.0 - radius - offset.x) / scale;
    let y = (h * scale / 2.0 - radius - offset.y) / scale;
    let size = diameter as f64 / scale;

    // Clamp each edge independently, shrinking the rect at the boundary
    let x0 = x.max(0.0);
    let y0 = y.max(0.0);
    let x1 = (x + size).min(w);
    let y1 = (y + size).min(h);

    SourceRect {
        x: x0,
        y: y0,
        width: (x1 - x0).max(0.0),
        height: (y1 - y0).max(0.0),
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::geometry::{clamp_offset, min_scale, pan_bounds};
    use proptest::prelude::*;

    proptest! {
        /// Property: with a clamped offset and legal scale, the source rect
        /// is a full-size square (no boundary shrinking needed).
        #[test]
        fn prop_clamped_offset_gives_full_square(
            width in 300u32..=4_000,
            height in 300u32..=4_000,
            scale_factor in 1.0f64..=3.0,
            x in -10_000.0f64..=10_000.0,
            y in -10_000.0f64..=10_000.0,
        ) {
            let diameter = 300u32;
            let scale = min_scale(width, height, diameter) * scale_factor;
            let bounds = pan_bounds(width, height, scale, diameter);
            let offset = clamp_offset(Offset::new(x, y), bounds);

            let rect = crop_source_rect(width, height, scale, offset, diameter);
            let expected = diameter as f64 / scale;

            prop_assert!((rect.width - expected).abs() < 1e-6);
            prop_assert!((rect.height - expected).abs() < 1e-6);
        }

        /// Property: the rect never extends outside the image, clamped
        /// offset or not.
        #[test]
        fn prop_rect_always_in_bounds(
            width in 1u32..=4_000,
            height in 1u32..=4_000,
            scale in 0.01f64..=10.0,
            x in -10_000.0f64..=10_000.0,
            y in -10_000.0f64..=10_000.0,
        ) {
            let rect = crop_source_rect(width, height, scale, Offset::new(x, y), 300);

            prop_assert!(rect.x >= 0.0);
            prop_assert!(rect.y >= 0.0);
            prop_assert!(rect.right() <= width as f64 + 1e-9);
            prop_assert!(rect.bottom() <= height as f64 + 1e-9);
            prop_assert!(rect.width >= 0.0);
            prop_assert!(rect.height >= 0.0);
        }
    }
}
