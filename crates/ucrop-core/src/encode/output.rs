//! Encoding a decoded image in the requested format and writing it out.

use std::io::Write;
use std::path::Path;

use log::debug;
use tempfile::NamedTempFile;

use super::types::{EncodeError, SaveFormat};
use super::{encode_jpeg, encode_png};
use crate::decode::DecodedImage;

/// Encode `image` as `format`. `quality` only affects JPEG.
pub fn encode_image(
    image: &DecodedImage,
    format: SaveFormat,
    quality: u8,
) -> Result<Vec<u8>, EncodeError> {
    match format {
        SaveFormat::Jpeg => encode_jpeg(
            &image.pixels,
            image.width,
            image.height,
            image.layout,
            quality,
        ),
        SaveFormat::Png => encode_png(&image.pixels, image.width, image.height, image.layout),
    }
}

/// Encode `image` and write it to `path`, replacing any existing file.
///
/// The bytes go to a temporary file in the same directory, which is then
/// renamed over `path`. If encoding or writing fails, an existing file at
/// `path` is left as it was.
///
/// # Returns
///
/// Number of bytes written.
pub fn write_image(
    image: &DecodedImage,
    path: &Path,
    format: SaveFormat,
    quality: u8,
) -> Result<u64, EncodeError> {
    let bytes = encode_image(image, format, quality)?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut staged = NamedTempFile::new_in(dir)?;
    staged.write_all(&bytes)?;
    staged.as_file().sync_all()?;
    staged.persist(path).map_err(|e| e.error)?;

    debug!(
        "wrote {} bytes of {:?} to {}",
        bytes.len(),
        format,
        path.display()
    );
    Ok(bytes.len() as u64)
}
