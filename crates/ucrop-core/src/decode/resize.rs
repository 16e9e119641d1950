//! Image resizing for downscaling crop results.
//!
//! Provides resize operations using the `image` crate's algorithms.
//! All functions return new `DecodedImage` instances without modifying the input.

use super::{DecodeError, DecodedImage, FilterType};

/// Resize an image to exact dimensions.
///
/// # Arguments
///
/// * `image` - The source image to resize
/// * `width` - Target width in pixels
/// * `height` - Target height in pixels
/// * `filter` - Interpolation filter to use
///
/// # Returns
///
/// A new `DecodedImage` with the specified dimensions and the same layout.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` for zero target dimensions, and
/// `DecodeError::CorruptedFile` if the pixel buffer does not match its size.
pub fn resize(
    image: &DecodedImage,
    width: u32,
    height: u32,
    filter: FilterType,
) -> Result<DecodedImage, DecodeError> {
    if width == 0 || height == 0 {
        return Err(DecodeError::InvalidFormat);
    }

    // Fast path: if dimensions match, just clone
    if image.width == width && image.height == height {
        return Ok(image.clone());
    }

    let dynamic = image
        .to_dynamic()
        .ok_or_else(|| DecodeError::CorruptedFile("Pixel buffer does not match dimensions".to_string()))?;

    let resized = dynamic.resize_exact(width, height, filter.to_image_filter());

    Ok(DecodedImage::from_dynamic(resized))
}

/// Scale an image by `factor`, preserving aspect ratio.
///
/// Each dimension is rounded and kept at least 1 pixel. A factor of 1.0
/// returns a copy.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if `factor` is not a positive
/// finite number.
pub fn scale(image: &DecodedImage, factor: f32, filter: FilterType) -> Result<DecodedImage, DecodeError> {
    if !factor.is_finite() || factor <= 0.0 {
        return Err(DecodeError::InvalidFormat);
    }

    let (width, height) = scaled_dimensions(image.width, image.height, factor);
    resize(image, width, height, filter)
}

/// Dimensions of a `width x height` image scaled by `factor`.
fn scaled_dimensions(width: u32, height: u32, factor: f32) -> (u32, u32) {
    let w = (width as f64 * factor as f64).round() as u32;
    let h = (height as f64 * factor as f64).round() as u32;
    (w.max(1), h.max(1))
}
