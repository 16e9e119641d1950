//! uCrop Core - native rotate-and-crop for the uCrop image cropper
//!
//! This crate does the pixel work behind the cropper UI: decode a source
//! file, rotate it about its center, cut out the crop window in the rotated
//! frame, optionally downscale, and write a JPEG or PNG.
//!
//! Rotation and crop happen in a single resampling pass driven by a warp
//! field, so the full rotated image is never materialized.
//!
//! # Modules
//!
//! - [`transform`] - warp-field geometry and resampling
//! - [`decode`] - file decoding, EXIF orientation, resizing
//! - [`encode`] - JPEG/PNG encoding and file output
//! - [`pipeline`] - the end-to-end [`Cropper`]

pub mod decode;
pub mod encode;
pub mod pipeline;
pub mod transform;

pub use decode::{ColorLayout, DecodedImage};
pub use encode::SaveFormat;
pub use pipeline::{
    compute_resize_scale, crop_file, CropError, CropOptions, CropOutcome, CropRequest, Cropper,
    ErrorKind, ImageBackend, ImageCrateBackend,
};
pub use transform::{build_warp_field, Boundary, CropRect, Interpolation, WarpField};
