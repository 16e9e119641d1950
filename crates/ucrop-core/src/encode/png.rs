//! PNG encoding for crop results.
//!
//! PNG is lossless, so there is no quality knob. Alpha is preserved.

use image::codecs::png::PngEncoder;
use image::ExtendedColorType;
use image::ImageEncoder;

use super::types::{validate_pixels, EncodeError};
use crate::decode::ColorLayout;

/// Encode pixel data to PNG bytes.
///
/// # Errors
///
/// Returns `EncodeError::InvalidDimensions` or
/// `EncodeError::InvalidPixelData` for malformed input, and the encoder's
/// error otherwise.
pub fn encode_png(
    pixels: &[u8],
    width: u32,
    height: u32,
    layout: ColorLayout,
) -> Result<Vec<u8>, EncodeError> {
    validate_pixels(pixels, width, height, layout)?;

    let color = match layout {
        ColorLayout::Rgb8 => ExtendedColorType::Rgb8,
        ColorLayout::Rgba8 => ExtendedColorType::Rgba8,
    };

    let mut buffer = Vec::new();
    PngEncoder::new(&mut buffer).write_image(pixels, width, height, color)?;

    Ok(buffer)
}
