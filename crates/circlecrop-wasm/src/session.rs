//! Crop session bindings.
//!
//! [`JsCropSession`] owns both the state machine and the decoded source
//! image, so JavaScript only ever moves raw bytes across the boundary once
//! (on load) and gets bytes back once (on crop). Everything in between is
//! scalar getters and event forwarding.

use circlecrop_core::decode::{self, DecodedImage};
use circlecrop_core::{CropConfig, CropSession, SessionState, ZoomDirection};
use wasm_bindgen::prelude::*;

/// One cropper dialog's worth of state.
#[wasm_bindgen]
pub struct JsCropSession {
    session: CropSession,
    source: Option<DecodedImage>,
}

#[wasm_bindgen]
impl JsCropSession {
    /// Create a session.
    ///
    /// `config` may be `undefined`/`null` for the defaults, or an object with
    /// any subset of `{ diameter, margin_factor, zoom_in_step, zoom_out_step,
    /// max_scale, jpeg_quality }`.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<JsCropSession, JsValue> {
        let config: CropConfig = if config.is_undefined() || config.is_null() {
            CropConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)
                .map_err(|e| JsValue::from_str(&format!("invalid crop config: {e}")))?
        };
        Ok(JsCropSession {
            session: CropSession::new(config),
            source: None,
        })
    }

    /// Decode raw file bytes and load them as the session's source image.
    ///
    /// Replaces any previously loaded image and resets the viewport. On
    /// decode failure the session is left in the `loading` state, mirroring
    /// a network image that never fires onload; the caller owns error UI.
    pub fn load_image(&mut self, bytes: &[u8]) -> Result<(), JsValue> {
        let token = self.session.begin_load();
        self.source = None;

        let decoded = decode::decode_image(bytes).map_err(|e| JsValue::from_str(&e.to_string()))?;
        self.session
            .image_loaded(token, decoded.width, decoded.height);
        self.source = Some(decoded);
        Ok(())
    }

    /// Current state: "empty", "loading", "ready", "dragging" or "cropped".
    #[wasm_bindgen(getter)]
    pub fn state(&self) -> String {
        match self.session.state() {
            SessionState::Empty => "empty",
            SessionState::Loading => "loading",
            SessionState::Ready => "ready",
            SessionState::Dragging => "dragging",
            SessionState::Cropped => "cropped",
        }
        .to_string()
    }

    /// Natural width of the loaded image, or 0 before load.
    #[wasm_bindgen(getter)]
    pub fn image_width(&self) -> u32 {
        self.session.viewport().map_or(0, |vp| vp.width())
    }

    /// Natural height of the loaded image, or 0 before load.
    #[wasm_bindgen(getter)]
    pub fn image_height(&self) -> u32 {
        self.session.viewport().map_or(0, |vp| vp.height())
    }

    /// Current display scale, or 0 before load.
    #[wasm_bindgen(getter)]
    pub fn scale(&self) -> f64 {
        self.session.viewport().map_or(0.0, |vp| vp.scale())
    }

    /// Smallest legal scale for the loaded image, or 0 before load.
    #[wasm_bindgen(getter)]
    pub fn min_scale(&self) -> f64 {
        self.session.viewport().map_or(0.0, |vp| vp.min_scale())
    }

    /// Horizontal pan offset in container pixels.
    #[wasm_bindgen(getter)]
    pub fn offset_x(&self) -> f64 {
        self.session.viewport().map_or(0.0, |vp| vp.offset().x)
    }

    /// Vertical pan offset in container pixels.
    #[wasm_bindgen(getter)]
    pub fn offset_y(&self) -> f64 {
        self.session.viewport().map_or(0.0, |vp| vp.offset().y)
    }

    /// Forward a pointer-down event (mouse or single-finger touch).
    pub fn drag_start(&mut self, x: f64, y: f64) {
        self.session.drag_start(x, y);
    }

    /// Forward a pointer-move event while dragging.
    pub fn drag_move(&mut self, x: f64, y: f64) {
        self.session.drag_move(x, y);
    }

    /// Forward a pointer-up/leave event.
    pub fn drag_end(&mut self) {
        self.session.drag_end();
    }

    /// Forward a wheel event. Positive `delta_y` (scrolling down) zooms out,
    /// negative zooms in, one step either way regardless of magnitude.
    pub fn wheel(&mut self, delta_y: f64) {
        if delta_y > 0.0 {
            self.session.zoom(ZoomDirection::Out);
        } else if delta_y < 0.0 {
            self.session.zoom(ZoomDirection::In);
        }
    }

    /// Apply one zoom-in step.
    pub fn zoom_in(&mut self) {
        self.session.zoom(ZoomDirection::In);
    }

    /// Apply one zoom-out step.
    pub fn zoom_out(&mut self) {
        self.session.zoom(ZoomDirection::Out);
    }

    /// Record a container resize from the UI's resize observer.
    pub fn container_resized(&mut self, width: u32, height: u32) {
        self.session.container_resized(width, height);
    }

    /// Render and encode the crop.
    ///
    /// Returns the JPEG bytes as a `Uint8Array`. Fails if called outside the
    /// `ready` state (callers should treat that as a no-op) or if no source
    /// image is loaded.
    pub fn crop(&mut self) -> Result<Vec<u8>, JsValue> {
        let source = self
            .source
            .as_ref()
            .ok_or_else(|| JsValue::from_str("no source image loaded"))?;
        self.session
            .crop(source)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Dismiss the session and drop the source image.
    pub fn cancel(&mut self) {
        self.session.cancel();
        self.source = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let rgb = image::RgbImage::from_pixel(width, height, image::Rgb([100, 150, 200]));
        let mut bytes = Vec::new();
        rgb.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        bytes
    }

    fn new_session() -> JsCropSession {
        JsCropSession {
            session: CropSession::new(CropConfig::default()),
            source: None,
        }
    }

    #[test]
    fn test_load_and_crop() {
        let mut session = new_session();
        assert_eq!(session.state(), "empty");

        session.load_image(&png_bytes(1000, 1000)).unwrap();
        assert_eq!(session.state(), "ready");
        assert_eq!(session.image_width(), 1000);
        assert!((session.min_scale() - 0.3).abs() < 1e-12);
        assert!((session.scale() - 0.36).abs() < 1e-12);

        let jpeg = session.crop().unwrap();
        assert_eq!(&jpeg[0..2], &[0xFF, 0xD8]);
        assert_eq!(session.state(), "cropped");
    }

    // Error paths construct JsValue and run in the wasm_tests module below;
    // the equivalent state-machine behavior is covered in circlecrop-core.

    #[test]
    fn test_pointer_and_wheel_forwarding() {
        let mut session = new_session();
        session.load_image(&png_bytes(800, 300)).unwrap();

        session.drag_start(100.0, 100.0);
        assert_eq!(session.state(), "dragging");
        session.drag_move(160.0, 120.0);
        session.drag_end();
        assert_eq!(session.offset_x(), 60.0);
        assert_eq!(session.offset_y(), 20.0);

        let before = session.scale();
        session.wheel(120.0); // scroll down: zoom out
        assert!(session.scale() < before);
        session.wheel(-120.0);
        session.wheel(0.0); // no-op
        assert!((session.scale() - before).abs() < 1e-2);
    }

    #[test]
    fn test_cancel_drops_source() {
        let mut session = new_session();
        session.load_image(&png_bytes(400, 400)).unwrap();
        session.cancel();
        assert_eq!(session.state(), "empty");
        assert!(session.source.is_none());
    }
}
