//! Pure geometry for the circular crop viewport.
//!
//! Everything in this module is a pure function over scalars: no pixel data,
//! no state. The functions here enforce the one invariant the cropper has:
//! the crop circle (fixed diameter, centered in the container) must always lie
//! inside the displayed image.
//!
//! # Coordinate System
//!
//! - Image dimensions are natural pixels.
//! - `scale` is display pixels per natural pixel.
//! - `Offset` is the image's displacement from container center, in container
//!   pixels; (0, 0) means centered.
//!
//! Note that the container's own size never appears in these formulas. The
//! circle and the image are both positioned relative to the container center,
//! so the center cancels out of every difference.

mod clamp;
mod scale;
mod source_rect;

pub use clamp::{clamp_offset, pan_bounds};
pub use scale::{initial_scale, min_scale, zoom_scale};
pub use source_rect::crop_source_rect;

use serde::{Deserialize, Serialize};

/// Pan offset in container pixels, relative to the container center.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Offset {
    pub x: f64,
    pub y: f64,
}

impl Offset {
    pub const ZERO: Offset = Offset { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Legal pan half-extents at a given scale.
///
/// The offset is valid iff `|x| <= max_x` and `|y| <= max_y`. Both bounds are
/// zero when the displayed image exactly matches the circle on that axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PanBounds {
    pub max_x: f64,
    pub max_y: f64,
}

/// Axis-aligned rectangle in natural (source image) pixel coordinates.
///
/// Fractional coordinates are expected; rasterization samples sub-pixel
/// positions rather than rounding to texel boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SourceRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl SourceRect {
    /// Right edge of the rectangle.
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge of the rectangle.
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}
