//! Encoding the cropped output for upload.
//!
//! The crop result leaves this crate as a JPEG blob; the caller hands it to
//! the photo-storage layer. Quality defaults to 82, matching the reference
//! cropper's 0.82 canvas export factor.

mod jpeg;

pub use jpeg::{encode_jpeg, EncodeError};
