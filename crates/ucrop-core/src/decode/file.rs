//! Image decoding from files or bytes, with EXIF orientation handling.

use std::io::Cursor;
use std::path::Path;

use exif::{In, Reader, Tag};
use image::DynamicImage;
use image::ImageReader;
use log::{debug, warn};

use super::{DecodeError, DecodedImage, Orientation};

/// Decode an image file.
///
/// The format is sniffed from the content, not the extension. When
/// `apply_orientation` is set, the EXIF orientation tag is applied so the
/// result matches what a gallery displays.
///
/// # Errors
///
/// Returns `DecodeError::Io` if the file cannot be read, and the errors of
/// [`decode_bytes`] otherwise.
pub fn decode_file(path: &Path, apply_orientation: bool) -> Result<DecodedImage, DecodeError> {
    let bytes = std::fs::read(path)?;
    debug!("read {} bytes from {}", bytes.len(), path.display());
    decode_bytes(&bytes, apply_orientation)
}

/// Decode an encoded image from bytes.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if the format is not recognized,
/// `DecodeError::CorruptedFile` if the data is damaged, and
/// `DecodeError::OutOfMemory` if the image exceeds decoder limits.
pub fn decode_bytes(bytes: &[u8], apply_orientation: bool) -> Result<DecodedImage, DecodeError> {
    let orientation = if apply_orientation {
        extract_orientation(bytes)
    } else {
        Orientation::Normal
    };

    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    if reader.format().is_none() {
        return Err(DecodeError::InvalidFormat);
    }

    let img = reader.decode()?;
    debug!(
        "decoded {}x{} {:?}, orientation {:?}",
        img.width(),
        img.height(),
        img.color(),
        orientation
    );

    Ok(DecodedImage::from_dynamic(apply_exif_orientation(
        img,
        orientation,
    )))
}

/// Extract EXIF orientation from encoded image bytes.
///
/// Returns `Orientation::Normal` if no EXIF data is found or orientation
/// cannot be determined.
pub fn get_orientation(bytes: &[u8]) -> Orientation {
    extract_orientation(bytes)
}

fn extract_orientation(bytes: &[u8]) -> Orientation {
    let mut cursor = Cursor::new(bytes);

    match Reader::new().read_from_container(&mut cursor) {
        Ok(exif) => exif
            .get_field(Tag::Orientation, In::PRIMARY)
            .and_then(|field| field.value.get_uint(0))
            .map(Orientation::from)
            .unwrap_or_default(),
        Err(exif::Error::NotFound(_)) => Orientation::Normal,
        Err(e) => {
            warn!("ignoring unreadable EXIF block: {}", e);
            Orientation::Normal
        }
    }
}

/// Apply EXIF orientation: rotate clockwise, then mirror horizontally.
fn apply_exif_orientation(img: DynamicImage, orientation: Orientation) -> DynamicImage {
    let rotated = match orientation.degrees() {
        90 => img.rotate90(),
        180 => img.rotate180(),
        270 => img.rotate270(),
        _ => img,
    };
    if orientation.is_mirrored() {
        rotated.fliph()
    } else {
        rotated
    }
}
