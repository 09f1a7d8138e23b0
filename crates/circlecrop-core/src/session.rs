//! Crop session lifecycle and state machine.
//!
//! A session walks `Empty -> Loading -> Ready <-> Dragging -> Cropped`.
//! Pan and zoom are only legal in `Ready`/`Dragging`; cropping only in
//! `Ready`. Each session owns its viewport exclusively; nothing is shared
//! across sessions.
//!
//! Image loading is the one asynchronous boundary: `begin_load` hands out a
//! generation token and `image_loaded` ignores completions carrying a stale
//! token, so a load finishing after the user picked a different file (or
//! cancelled) cannot clobber the current state.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::decode::DecodedImage;
use crate::encode::{encode_jpeg, EncodeError};
use crate::geometry::Offset;
use crate::render::render_crop;
use crate::viewport::{Viewport, ZoomDirection};
use crate::CropConfig;

/// Observable session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// No image loaded.
    Empty,
    /// An image is being fetched/decoded; dimensions not yet known.
    Loading,
    /// Dimensions known, viewport initialized; pan/zoom/crop legal.
    Ready,
    /// A drag is in progress; re-enters `Ready` on release.
    Dragging,
    /// Rasterization produced; terminal for this session.
    Cropped,
}

/// Errors surfaced by crop session operations.
#[derive(Debug, Error)]
pub enum CropError {
    /// Crop was requested outside the `Ready` state. Callers treat this as a
    /// no-op; it exists so misuse is visible rather than silent.
    #[error("crop is only legal in the ready state (current: {0:?})")]
    NotReady(SessionState),

    /// The supplied source image does not match the dimensions the session
    /// was initialized with.
    #[error("source image is {actual_width}x{actual_height}, session expects {expected_width}x{expected_height}")]
    SourceMismatch {
        expected_width: u32,
        expected_height: u32,
        actual_width: u32,
        actual_height: u32,
    },

    /// JPEG encoding of the rendered output failed.
    #[error(transparent)]
    Encode(#[from] EncodeError),
}

/// Token identifying one load attempt.
///
/// Returned by [`CropSession::begin_load`] and checked by
/// [`CropSession::image_loaded`]; a token from a superseded load is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadToken(u64);

#[derive(Debug, Clone, Copy)]
struct DragBaseline {
    pointer: Offset,
    offset: Offset,
}

#[derive(Debug, Clone)]
enum State {
    Empty,
    Loading,
    Ready(Viewport),
    Dragging(Viewport, DragBaseline),
    Cropped,
}

/// One crop interaction, from file selection to an encoded output blob.
#[derive(Debug, Clone)]
pub struct CropSession {
    config: CropConfig,
    generation: u64,
    container: Option<(u32, u32)>,
    state: State,
}

impl CropSession {
    /// Create a session in the `Empty` state.
    pub fn new(config: CropConfig) -> Self {
        Self {
            config,
            generation: 0,
            container: None,
            state: State::Empty,
        }
    }

    /// The configuration this session was created with.
    pub fn config(&self) -> &CropConfig {
        &self.config
    }

    /// The observable state.
    pub fn state(&self) -> SessionState {
        match self.state {
            State::Empty => SessionState::Empty,
            State::Loading => SessionState::Loading,
            State::Ready(_) => SessionState::Ready,
            State::Dragging(..) => SessionState::Dragging,
            State::Cropped => SessionState::Cropped,
        }
    }

    /// The viewport, if an image is loaded.
    pub fn viewport(&self) -> Option<&Viewport> {
        match &self.state {
            State::Ready(vp) | State::Dragging(vp, _) => Some(vp),
            _ => None,
        }
    }

    /// Start loading an image, superseding any load in flight.
    ///
    /// Picking a new file (or re-cropping an existing photo) restarts the
    /// lifecycle from any state. Returns the token the completion must
    /// present.
    pub fn begin_load(&mut self) -> LoadToken {
        self.generation += 1;
        self.state = State::Loading;
        LoadToken(self.generation)
    }

    /// Complete a load: the image reported its natural dimensions.
    ///
    /// Returns `true` if the session accepted the completion. A stale token
    /// (superseded load, or the session was cancelled) is ignored and returns
    /// `false`; the caller should drop the decoded data.
    pub fn image_loaded(&mut self, token: LoadToken, width: u32, height: u32) -> bool {
        if token.0 != self.generation || !matches!(self.state, State::Loading) {
            return false;
        }
        self.state = State::Ready(Viewport::new(width, height, self.config));
        true
    }

    /// Record the container size. The crop geometry is independent of it;
    /// the session only tracks it for callers laying out the UI.
    pub fn container_resized(&mut self, width: u32, height: u32) {
        self.container = Some((width, height));
    }

    /// Last observed container size, if any.
    pub fn container(&self) -> Option<(u32, u32)> {
        self.container
    }

    /// Begin a drag at the given pointer position (container pixels).
    ///
    /// Mouse and single-finger touch both funnel into this; the engine only
    /// sees pointer coordinates. No-op outside `Ready`.
    pub fn drag_start(&mut self, x: f64, y: f64) {
        if let State::Ready(vp) = &self.state {
            let baseline = DragBaseline {
                pointer: Offset::new(x, y),
                offset: vp.offset(),
            };
            self.state = State::Dragging(vp.clone(), baseline);
        }
    }

    /// Continue a drag: propose `baseline + pointer delta`, clamped.
    /// No-op outside `Dragging`.
    pub fn drag_move(&mut self, x: f64, y: f64) {
        if let State::Dragging(vp, baseline) = &mut self.state {
            let proposed = Offset::new(
                baseline.offset.x + (x - baseline.pointer.x),
                baseline.offset.y + (y - baseline.pointer.y),
            );
            vp.set_offset(proposed);
        }
    }

    /// End a drag. State is left as-is; no further computation happens.
    pub fn drag_end(&mut self) {
        if let State::Dragging(vp, _) = &self.state {
            self.state = State::Ready(vp.clone());
        }
    }

    /// Apply one zoom step. Legal in `Ready` and `Dragging`; no-op elsewhere.
    pub fn zoom(&mut self, direction: ZoomDirection) {
        match &mut self.state {
            State::Ready(vp) | State::Dragging(vp, _) => vp.zoom(direction),
            _ => {}
        }
    }

    /// Render and encode the pixels under the crop circle.
    ///
    /// Only legal in `Ready`. On success the session moves to the terminal
    /// `Cropped` state and the JPEG bytes are returned for upload.
    pub fn crop(&mut self, image: &DecodedImage) -> Result<Vec<u8>, CropError> {
        let vp = match &self.state {
            State::Ready(vp) => vp,
            _ => return Err(CropError::NotReady(self.state())),
        };

        if image.width != vp.width() || image.height != vp.height() {
            return Err(CropError::SourceMismatch {
                expected_width: vp.width(),
                expected_height: vp.height(),
                actual_width: image.width,
                actual_height: image.height,
            });
        }

        let rendered = render_crop(image, vp.scale(), vp.offset(), self.config.diameter);
        let jpeg = encode_jpeg(
            &rendered.pixels,
            rendered.width,
            rendered.height,
            self.config.jpeg_quality,
        )?;

        self.state = State::Cropped;
        Ok(jpeg)
    }

    /// Dismiss the session: drop all viewport state and return to `Empty`.
    ///
    /// Also invalidates any load in flight, so a completion arriving after
    /// cancellation is ignored.
    pub fn cancel(&mut self) {
        self.generation += 1;
        self.state = State::Empty;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gray_image(width: u32, height: u32) -> DecodedImage {
        DecodedImage::new(width, height, vec![128u8; (width * height * 3) as usize])
    }

    fn ready_session(width: u32, height: u32) -> CropSession {
        let mut session = CropSession::new(CropConfig::default());
        let token = session.begin_load();
        assert!(session.image_loaded(token, width, height));
        session
    }

    #[test]
    fn test_lifecycle_happy_path() {
        let mut session = CropSession::new(CropConfig::default());
        assert_eq!(session.state(), SessionState::Empty);

        let token = session.begin_load();
        assert_eq!(session.state(), SessionState::Loading);

        assert!(session.image_loaded(token, 1000, 1000));
        assert_eq!(session.state(), SessionState::Ready);

        session.drag_start(100.0, 100.0);
        assert_eq!(session.state(), SessionState::Dragging);
        session.drag_move(110.0, 95.0);
        session.drag_end();
        assert_eq!(session.state(), SessionState::Ready);

        let jpeg = session.crop(&gray_image(1000, 1000)).unwrap();
        assert_eq!(&jpeg[0..2], &[0xFF, 0xD8]);
        assert_eq!(session.state(), SessionState::Cropped);
    }

    #[test]
    fn test_stale_load_token_ignored() {
        let mut session = CropSession::new(CropConfig::default());
        let first = session.begin_load();
        let second = session.begin_load();

        // The superseded load completes late; it must not take effect
        assert!(!session.image_loaded(first, 640, 480));
        assert_eq!(session.state(), SessionState::Loading);

        assert!(session.image_loaded(second, 800, 600));
        assert_eq!(session.viewport().unwrap().width(), 800);
    }

    #[test]
    fn test_load_completion_after_cancel_ignored() {
        let mut session = CropSession::new(CropConfig::default());
        let token = session.begin_load();
        session.cancel();

        assert!(!session.image_loaded(token, 640, 480));
        assert_eq!(session.state(), SessionState::Empty);
    }

    #[test]
    fn test_crop_rejected_outside_ready() {
        let img = gray_image(400, 400);

        let mut session = CropSession::new(CropConfig::default());
        assert!(matches!(
            session.crop(&img),
            Err(CropError::NotReady(SessionState::Empty))
        ));

        session.begin_load();
        assert!(matches!(
            session.crop(&img),
            Err(CropError::NotReady(SessionState::Loading))
        ));

        let mut session = ready_session(400, 400);
        session.drag_start(0.0, 0.0);
        assert!(matches!(
            session.crop(&img),
            Err(CropError::NotReady(SessionState::Dragging))
        ));
    }

    #[test]
    fn test_crop_rejects_mismatched_source() {
        let mut session = ready_session(400, 400);
        let result = session.crop(&gray_image(500, 400));
        assert!(matches!(result, Err(CropError::SourceMismatch { .. })));
        // Session stays usable
        assert_eq!(session.state(), SessionState::Ready);
    }

    #[test]
    fn test_drag_move_applies_clamped_delta() {
        let mut session = ready_session(800, 300);
        // min scale 1.0, initial 1.2: max_x = 330, max_y = 30
        session.drag_start(500.0, 500.0);
        session.drag_move(560.0, 520.0);

        let vp = session.viewport().unwrap();
        assert_eq!(vp.offset(), Offset::new(60.0, 20.0));

        // Dragging far past the bound clamps
        session.drag_move(2000.0, 2000.0);
        let vp = session.viewport().unwrap();
        let bounds = vp.pan_bounds();
        assert_eq!(vp.offset().x, bounds.max_x);
        assert_eq!(vp.offset().y, bounds.max_y);
    }

    #[test]
    fn test_drag_inputs_ignored_when_not_applicable() {
        let mut session = CropSession::new(CropConfig::default());
        // None of these panic or change state before an image is loaded
        session.drag_start(1.0, 1.0);
        session.drag_move(2.0, 2.0);
        session.drag_end();
        session.zoom(ZoomDirection::In);
        assert_eq!(session.state(), SessionState::Empty);

        // drag_move without drag_start is a no-op
        let mut session = ready_session(400, 400);
        session.drag_move(50.0, 50.0);
        assert_eq!(session.viewport().unwrap().offset(), Offset::ZERO);
    }

    #[test]
    fn test_zoom_during_drag() {
        let mut session = ready_session(1000, 1000);
        session.drag_start(0.0, 0.0);
        let before = session.viewport().unwrap().scale();
        session.zoom(ZoomDirection::In);
        let after = session.viewport().unwrap().scale();
        assert!(after > before);
        assert_eq!(session.state(), SessionState::Dragging);
    }

    #[test]
    fn test_crop_output_decodes_to_diameter() {
        let mut session = ready_session(1000, 700);
        let jpeg = session.crop(&gray_image(1000, 700)).unwrap();

        let decoded = crate::decode::decode_image(&jpeg).unwrap();
        assert_eq!(decoded.width, 300);
        assert_eq!(decoded.height, 300);
    }

    #[test]
    fn test_custom_diameter_respected() {
        let config = CropConfig::with_diameter(150);
        let mut session = CropSession::new(config);
        let token = session.begin_load();
        session.image_loaded(token, 600, 600);

        let jpeg = session.crop(&gray_image(600, 600)).unwrap();
        let decoded = crate::decode::decode_image(&jpeg).unwrap();
        assert_eq!(decoded.width, 150);
    }

    #[test]
    fn test_reload_from_ready_restarts_lifecycle() {
        let mut session = ready_session(400, 400);
        let token = session.begin_load();
        assert_eq!(session.state(), SessionState::Loading);
        assert!(session.image_loaded(token, 900, 600));
        assert_eq!(session.viewport().unwrap().width(), 900);
        assert_eq!(session.viewport().unwrap().offset(), Offset::ZERO);
    }

    #[test]
    fn test_container_resize_does_not_touch_geometry() {
        let mut session = ready_session(1000, 1000);
        let before = session.viewport().unwrap().clone();
        session.container_resized(480, 320);
        assert_eq!(session.container(), Some((480, 320)));
        assert_eq!(session.viewport().unwrap(), &before);
    }

    #[test]
    fn test_cropped_is_terminal() {
        let mut session = ready_session(400, 400);
        let img = gray_image(400, 400);
        session.crop(&img).unwrap();

        assert!(matches!(
            session.crop(&img),
            Err(CropError::NotReady(SessionState::Cropped))
        ));
        session.zoom(ZoomDirection::In);
        session.drag_start(0.0, 0.0);
        assert_eq!(session.state(), SessionState::Cropped);
    }
}
