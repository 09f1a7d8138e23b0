//! Image decoding with EXIF orientation handling.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::DynamicImage;
use image::ImageReader;

use super::{DecodeError, DecodedImage, Orientation};

/// Decode an image (JPEG or PNG) from bytes, applying EXIF orientation.
///
/// # Arguments
///
/// * `bytes` - Raw file bytes as received from the file picker or fetch
///
/// # Returns
///
/// A `DecodedImage` with RGB pixel data, oriented the way the photo is meant
/// to be viewed.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if the bytes are not a recognized
/// image container, `DecodeError::CorruptedFile` if a recognized image fails
/// to decode, and `DecodeError::DegenerateDimensions` if the decoded image
/// has zero width or height.
pub fn decode_image(bytes: &[u8]) -> Result<DecodedImage, DecodeError> {
    // Extract EXIF orientation before decoding; the pixel decoder ignores it
    let orientation = extract_orientation(bytes);

    let cursor = Cursor::new(bytes);
    let reader = ImageReader::new(cursor)
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    // Magic-byte sniffing found no known container: not an image file
    if reader.format().is_none() {
        return Err(DecodeError::InvalidFormat);
    }

    let img = reader
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    let oriented = apply_orientation(img, orientation);
    let rgb = oriented.into_rgb8();

    let decoded = DecodedImage::from_rgb_image(rgb);
    if decoded.is_empty() {
        return Err(DecodeError::DegenerateDimensions {
            width: decoded.width,
            height: decoded.height,
        });
    }
    Ok(decoded)
}

/// Extract the EXIF orientation from image bytes, if any.
///
/// Returns `Orientation::Normal` when there is no EXIF data or the tag is
/// missing; PNG files land here.
pub fn image_orientation(bytes: &[u8]) -> Orientation {
    extract_orientation(bytes)
}

fn extract_orientation(bytes: &[u8]) -> Orientation {
    let exif_reader = Reader::new();
    let mut cursor = Cursor::new(bytes);

    match exif_reader.read_from_container(&mut cursor) {
        Ok(exif) => {
            if let Some(field) = exif.get_field(Tag::Orientation, In::PRIMARY) {
                if let Some(value) = field.value.get_uint(0) {
                    return Orientation::from(value);
                }
            }
            Orientation::Normal
        }
        Err(_) => Orientation::Normal,
    }
}

/// Apply EXIF orientation transformation to an image.
fn apply_orientation(img: DynamicImage, orientation: Orientation) -> DynamicImage {
    match orientation {
        Orientation::Normal => img,
        Orientation::FlipHorizontal => img.fliph(),
        Orientation::Rotate180 => img.rotate180(),
        Orientation::FlipVertical => img.flipv(),
        Orientation::Transpose => img.rotate90().fliph(),
        Orientation::Rotate90CW => img.rotate90(),
        Orientation::Transverse => img.rotate270().fliph(),
        Orientation::Rotate270CW => img.rotate270(),
    }
}
