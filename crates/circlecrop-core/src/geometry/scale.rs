//! Display-scale computation: minimum scale, initial scale, and zoom stepping.

/// Compute the smallest legal display scale for an image.
///
/// At the minimum scale the image's shorter displayed dimension exactly equals
/// the crop circle's diameter, so the circle touches the image boundary on
/// that axis with no gap and no overflow.
///
/// # Arguments
///
/// * `width`, `height` - Natural dimensions of the source image
/// * `diameter` - Crop circle diameter in container pixels
///
/// # Degenerate Input
///
/// Returns `1.0` when any argument is zero (image not yet loaded, or a
/// corrupt file reporting zero dimensions). Callers must not run real
/// geometry until the image reports its natural dimensions; this default
/// only keeps the math finite in the meantime.
pub fn min_scale(width: u32, height: u32, diameter: u32) -> f64 {
    if width == 0 || height == 0 || diameter == 0 {
        return 1.0;
    }
    diameter as f64 / width.min(height) as f64
}

/// Compute the scale a freshly loaded image starts at.
///
/// A margin factor above 1.0 zooms in slightly past the minimum so the user
/// sees image content extending beyond the crop edge, which reads as "there
/// is room to pan".
pub fn initial_scale(width: u32, height: u32, diameter: u32, margin_factor: f64) -> f64 {
    min_scale(width, height, diameter) * margin_factor
}

/// Apply one zoom step and clamp the result to the legal range.
///
/// `step` is a multiplier (e.g. 1.05 to zoom in, 0.95 to zoom out). The
/// result always lands in `[min, max]`, so no sequence of steps can escape
/// the range.
pub fn zoom_scale(current: f64, step: f64, min: f64, max: f64) -> f64 {
    (current * step).clamp(min, max)
}


// ============================================================================
// Property-Based Tests
// ============================================================================
