//! Decoding uploaded photos into RGB pixel data.
//!
//! The cropper receives whatever the file picker hands it, which in practice
//! means JPEG or PNG, and for phone photos a JPEG whose real orientation
//! lives in EXIF. Browsers apply that orientation implicitly when displaying;
//! since we sample natural pixels ourselves, we apply it explicitly here so
//! the geometry sees the image the way the user does.
//!
//! Decoding is the one asynchronous boundary of a crop session: the caller
//! feeds bytes in whenever its fetch completes, and everything after that is
//! synchronous.

mod reader;
mod types;

pub use reader::{decode_image, image_orientation};
pub use types::{DecodeError, DecodedImage, Orientation};
