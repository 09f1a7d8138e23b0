//! Pan clamping: keep the crop circle inside the displayed image.

use super::{Offset, PanBounds};

/// Compute the legal pan half-extents for an image at a given scale.
///
/// The crop circle is fixed at the container center, so the image may move at
/// most half its displayed size minus half the circle before the circle's
/// boundary crosses the image edge:
///
/// ```text
/// max_x = width * scale / 2 - diameter / 2
/// max_y = height * scale / 2 - diameter / 2
/// ```
///
/// Both extents are floored at zero. At exactly the minimum scale the shorter
/// axis yields 0.0, which correctly forbids panning on that axis.
pub fn pan_bounds(width: u32, height: u32, scale: f64, diameter: u32) -> PanBounds {
    let radius = diameter as f64 / 2.0;
    PanBounds {
        max_x: (width as f64 * scale / 2.0 - radius).max(0.0),
        max_y: (height as f64 * scale / 2.0 - radius).max(0.0),
    }
}

/// Clamp a proposed pan offset into the legal range.
///
/// Applied after every pan delta and after every zoom change, since the
/// bounds depend on the scale. Clamping is idempotent: a value already in
/// range is returned unchanged.
pub fn clamp_offset(proposed: Offset, bounds: PanBounds) -> Offset {
    Offset {
        x: proposed.x.clamp(-bounds.max_x, bounds.max_x),
        y: proposed.y.clamp(-bounds.max_y, bounds.max_y),
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
