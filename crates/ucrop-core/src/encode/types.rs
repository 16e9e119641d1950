//! Shared types for image encoding.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::decode::ColorLayout;

/// Errors that can occur during encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes, got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The encoder rejected the image
    #[error("Encoding failed: {0}")]
    EncodingFailed(String),

    /// The encoder ran out of memory or hit a size limit
    #[error("Out of memory during encoding")]
    OutOfMemory,

    /// Writing the output failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<image::ImageError> for EncodeError {
    fn from(err: image::ImageError) -> Self {
        match err {
            image::ImageError::IoError(e) => EncodeError::Io(e),
            image::ImageError::Limits(_) => EncodeError::OutOfMemory,
            other => EncodeError::EncodingFailed(other.to_string()),
        }
    }
}

/// Output format, numbered like `android.graphics.Bitmap.CompressFormat`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[repr(i32)]
pub enum SaveFormat {
    /// Lossy JPEG; honours the quality setting.
    #[default]
    Jpeg = 0,
    /// Lossless PNG; quality is ignored.
    Png = 1,
}

impl SaveFormat {
    /// Map a `CompressFormat` ordinal. Anything other than JPEG or PNG
    /// (including WEBP) is unsupported.
    pub fn from_ordinal(ordinal: i32) -> Option<Self> {
        match ordinal {
            0 => Some(SaveFormat::Jpeg),
            1 => Some(SaveFormat::Png),
            _ => None,
        }
    }
}

/// Check dimensions and buffer length before handing pixels to an encoder.
pub(crate) fn validate_pixels(
    pixels: &[u8],
    width: u32,
    height: u32,
    layout: ColorLayout,
) -> Result<(), EncodeError> {
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let expected = width as usize * height as usize * layout.channels();
    if pixels.len() != expected {
        return Err(EncodeError::InvalidPixelData {
            expected,
            actual: pixels.len(),
        });
    }
    Ok(())
}
