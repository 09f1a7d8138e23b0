//! Viewport state: the mutable pan/zoom transform for one loaded image.

use serde::{Deserialize, Serialize};

use crate::geometry::{
    clamp_offset, crop_source_rect, initial_scale, min_scale, pan_bounds, zoom_scale, Offset,
    PanBounds, SourceRect,
};
use crate::CropConfig;

/// Direction of a discrete zoom input event (wheel tick, button press).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZoomDirection {
    In,
    Out,
}

/// The display transform for a loaded source image.
///
/// A `Viewport` is created when the image's natural dimensions become known
/// and is dropped with the crop session. Every mutating method re-establishes
/// the invariant: the scale stays in `[min_scale, max_scale]` and the offset
/// keeps the crop circle inside the displayed image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    width: u32,
    height: u32,
    config: CropConfig,
    min_scale: f64,
    scale: f64,
    offset: Offset,
}

impl Viewport {
    /// Initialize the viewport for a freshly loaded image.
    ///
    /// The scale starts at `min_scale * margin_factor` with the image
    /// centered, which satisfies the invariant immediately.
    pub fn new(width: u32, height: u32, config: CropConfig) -> Self {
        let min = min_scale(width, height, config.diameter);
        let scale = initial_scale(width, height, config.diameter, config.margin_factor)
            .clamp(min, config.max_scale.max(min));
        Self {
            width,
            height,
            config,
            min_scale: min,
            scale,
            offset: Offset::ZERO,
        }
    }

    /// Natural width of the source image.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Natural height of the source image.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Current display scale.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Smallest legal scale for this image.
    pub fn min_scale(&self) -> f64 {
        self.min_scale
    }

    /// Current pan offset in container pixels.
    pub fn offset(&self) -> Offset {
        self.offset
    }

    /// Legal pan half-extents at the current scale.
    pub fn pan_bounds(&self) -> PanBounds {
        pan_bounds(self.width, self.height, self.scale, self.config.diameter)
    }

    /// Move the image to a proposed offset, clamped into the legal range.
    pub fn set_offset(&mut self, proposed: Offset) {
        self.offset = clamp_offset(proposed, self.pan_bounds());
    }

    /// Apply one zoom step in the given direction.
    ///
    /// The offset is re-clamped afterwards: zooming out shrinks the legal pan
    /// range, so a previously valid offset may have become invalid.
    pub fn zoom(&mut self, direction: ZoomDirection) {
        let step = match direction {
            ZoomDirection::In => self.config.zoom_in_step,
            ZoomDirection::Out => self.config.zoom_out_step,
        };
        self.scale = zoom_scale(
            self.scale,
            step,
            self.min_scale,
            self.config.max_scale.max(self.min_scale),
        );
        self.set_offset(self.offset);
    }

    /// Restore the initial scale and centered position.
    pub fn reset(&mut self) {
        *self = Self::new(self.width, self.height, self.config);
    }

    /// The source-image region currently under the crop circle.
    pub fn source_rect(&self) -> SourceRect {
        crop_source_rect(
            self.width,
            self.height,
            self.scale,
            self.offset,
            self.config.diameter,
        )
    }
}
