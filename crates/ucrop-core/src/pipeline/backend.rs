//! Pluggable image I/O for the crop pipeline.

use std::path::Path;

use super::CropOptions;
use crate::decode::{decode_file, DecodeError, DecodedImage};
use crate::encode::{write_image, EncodeError, SaveFormat};

/// Reads source images and writes results.
///
/// The geometry does not depend on how pixels get in and out, so hosts with
/// their own codecs can plug them in here.
pub trait ImageBackend: Send + Sync {
    /// Decode the image at `path` into an RGB or RGBA buffer.
    fn decode(&self, path: &Path, options: &CropOptions) -> Result<DecodedImage, DecodeError>;

    /// Encode `image` to `path`, returning the number of bytes written.
    fn encode(
        &self,
        image: &DecodedImage,
        path: &Path,
        format: SaveFormat,
        quality: u8,
    ) -> Result<u64, EncodeError>;
}

/// Backend built on the `image` crate codecs.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageCrateBackend;

impl ImageBackend for ImageCrateBackend {
    fn decode(&self, path: &Path, options: &CropOptions) -> Result<DecodedImage, DecodeError> {
        decode_file(path, options.apply_exif_orientation)
    }

    fn encode(
        &self,
        image: &DecodedImage,
        path: &Path,
        format: SaveFormat,
        quality: u8,
    ) -> Result<u64, EncodeError> {
        write_image(image, path, format, quality)
    }
}
