//! Requests, options, outcomes and errors of the crop pipeline.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::decode::{DecodeError, FilterType};
use crate::encode::{EncodeError, SaveFormat};
use crate::transform::{Boundary, CropRect, GeometryError, Interpolation};

/// One rotate-and-crop job.
#[derive(Debug, Clone, PartialEq)]
pub struct CropRequest {
    /// Source image file
    pub input_path: PathBuf,
    /// Destination file, overwritten if present
    pub output_path: PathBuf,
    /// Crop window in the rotated bounding-box frame
    pub rect: CropRect,
    /// Rotation in degrees, positive is clockwise on screen
    pub angle_degrees: f32,
    /// Downscale factor applied after cropping; values >= 1 keep the crop size
    pub resize_scale: f32,
    /// Output encoding
    pub format: SaveFormat,
    /// JPEG quality (ignored for PNG)
    pub quality: u8,
}

impl CropRequest {
    /// Request with no downscale, JPEG output at quality 90.
    pub fn new(
        input_path: impl Into<PathBuf>,
        output_path: impl Into<PathBuf>,
        rect: CropRect,
        angle_degrees: f32,
    ) -> Self {
        Self {
            input_path: input_path.into(),
            output_path: output_path.into(),
            rect,
            angle_degrees,
            resize_scale: 1.0,
            format: SaveFormat::Jpeg,
            quality: 90,
        }
    }
}

/// Tunables shared by every request a [`Cropper`](super::Cropper) serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CropOptions {
    /// Sampling used by the rotate-and-crop pass
    pub interpolation: Interpolation,
    /// Handling of samples outside the source
    pub boundary: Boundary,
    /// Rotate/flip the source according to its EXIF orientation tag
    pub apply_exif_orientation: bool,
    /// Filter used when `resize_scale` shrinks the result
    pub resize_filter: FilterType,
}

impl Default for CropOptions {
    fn default() -> Self {
        Self {
            interpolation: Interpolation::Linear,
            boundary: Boundary::Periodic,
            apply_exif_orientation: true,
            resize_filter: FilterType::Bilinear,
        }
    }
}

/// What a successful crop produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropOutcome {
    pub width: u32,
    pub height: u32,
    pub bytes_written: u64,
}

/// Coarse failure class, used by hosts that map errors onto their own
/// exception types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidArgument,
    Io,
    OutOfMemory,
}

/// Errors that can occur while serving a [`CropRequest`].
#[derive(Debug, Error)]
pub enum CropError {
    /// The request itself is malformed
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The source could not be read or decoded
    #[error("Failed to decode source: {0}")]
    Decode(#[from] DecodeError),

    /// The result could not be encoded or written
    #[error("Failed to encode result: {0}")]
    Encode(#[from] EncodeError),

    /// The crop buffers could not be allocated
    #[error("Out of memory: {0}")]
    OutOfMemory(String),
}

impl From<GeometryError> for CropError {
    fn from(err: GeometryError) -> Self {
        match err {
            GeometryError::TooLarge { .. } => CropError::OutOfMemory(err.to_string()),
            _ => CropError::InvalidArgument(err.to_string()),
        }
    }
}

impl CropError {
    /// Failure class of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            CropError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            CropError::Decode(_) => ErrorKind::Io,
            CropError::Encode(EncodeError::Io(_)) => ErrorKind::Io,
            CropError::Encode(_) | CropError::OutOfMemory(_) => ErrorKind::OutOfMemory,
        }
    }
}
