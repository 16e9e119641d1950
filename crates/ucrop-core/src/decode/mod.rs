//! Image decoding for the crop pipeline.
//!
//! This module provides functionality for:
//! - Decoding JPEG and PNG files (format sniffed from content)
//! - Applying EXIF orientation so crop coordinates match the displayed image
//! - Resizing decoded images
//!
//! All operations are synchronous; callers on Android run them from a worker
//! thread.
//!
//! # Examples
//!
//! ```ignore
//! use std::path::Path;
//! use ucrop_core::decode::decode_file;
//!
//! let image = decode_file(Path::new("photo.jpg"), true)?;
//! println!("Decoded {}x{} image", image.width, image.height);
//! ```

mod file;
mod resize;
mod types;

pub use file::{decode_bytes, decode_file, get_orientation};
pub use resize::{resize, scale};
pub use types::{ColorLayout, DecodeError, DecodedImage, FilterType, Orientation};
