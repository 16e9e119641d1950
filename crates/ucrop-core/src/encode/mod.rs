//! Image encoding for crop results.
//!
//! This module provides functionality for:
//! - Encoding images to JPEG format with configurable quality
//! - Encoding images to PNG format, keeping alpha
//! - Writing the encoded result to a destination file
//!
//! # Examples
//!
//! ```ignore
//! use ucrop_core::encode::encode_jpeg;
//! use ucrop_core::decode::ColorLayout;
//!
//! let pixels = vec![128u8; 100 * 100 * 3]; // Gray image
//! let jpeg_bytes = encode_jpeg(&pixels, 100, 100, ColorLayout::Rgb8, 90).unwrap();
//! println!("Encoded {} bytes", jpeg_bytes.len());
//! ```

mod jpeg;
mod output;
mod png;
mod types;

pub use jpeg::encode_jpeg;
pub use output::{encode_image, write_image};
pub use png::encode_png;
pub use types::{EncodeError, SaveFormat};
