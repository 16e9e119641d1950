//! End-to-end rotate-and-crop: decode, warp, resample, downscale, encode.
//!
//! [`Cropper`] wires the pieces together around an [`ImageBackend`], which
//! owns file I/O and codecs. [`crop_file`] covers the common case.

mod backend;
mod cropper;
mod types;

pub use backend::{ImageBackend, ImageCrateBackend};
pub use cropper::{compute_resize_scale, crop_file, Cropper};
pub use types::{CropError, CropOptions, CropOutcome, CropRequest, ErrorKind};
