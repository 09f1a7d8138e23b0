//! Circlecrop Core - circular avatar crop engine
//!
//! This crate implements the geometry and rendering behind the profile-photo
//! cropper: pan/zoom of a source image under a fixed circular viewport,
//! invariant enforcement (the circle never leaves the image), and rasterization
//! of the pixels under the circle into a fixed-size JPEG.
//!
//! # Coordinate System
//!
//! - Natural dimensions are the true pixel size of the source image.
//! - The display scale is the ratio of on-screen size to natural size.
//! - The pan offset is in container pixels; (0, 0) means the image is
//!   centered under the crop circle.

pub mod decode;
pub mod encode;
pub mod geometry;
pub mod render;
pub mod session;
pub mod viewport;

pub use decode::{decode_image, DecodeError, DecodedImage, Orientation};
pub use encode::{encode_jpeg, EncodeError};
pub use geometry::{
    clamp_offset, crop_source_rect, min_scale, pan_bounds, zoom_scale, Offset, PanBounds,
    SourceRect,
};
pub use render::render_crop;
pub use session::{CropError, CropSession, LoadToken, SessionState};
pub use viewport::{Viewport, ZoomDirection};

/// Tunable constants for a crop session.
///
/// The defaults reproduce the reference cropper's behavior. All of these are
/// empirical values with no derivation; callers may override them but the
/// defaults are what users have been looking at.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CropConfig {
    /// Diameter of the crop circle and side length of the output, in pixels.
    pub diameter: u32,
    /// Initial scale is `min_scale * margin_factor`, so the user sees some
    /// context beyond the crop edge by default.
    pub margin_factor: f64,
    /// Multiplier applied to the scale per zoom-in input event.
    pub zoom_in_step: f64,
    /// Multiplier applied to the scale per zoom-out input event.
    pub zoom_out_step: f64,
    /// Upper bound on the display scale.
    pub max_scale: f64,
    /// JPEG quality (1-100) for the encoded output.
    pub jpeg_quality: u8,
}

impl Default for CropConfig {
    fn default() -> Self {
        Self {
            diameter: 300,
            margin_factor: 1.2,
            zoom_in_step: 1.05,
            zoom_out_step: 0.95,
            max_scale: 3.0,
            jpeg_quality: 82,
        }
    }
}

impl CropConfig {
    /// Create a config with the default reference constants.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a config with a non-default output diameter.
    pub fn with_diameter(diameter: u32) -> Self {
        Self {
            diameter,
            ..Self::default()
        }
    }
}
