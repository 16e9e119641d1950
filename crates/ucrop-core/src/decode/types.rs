//! Core types for image decoding.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error types for image decoding operations.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The file format is not recognized or supported.
    #[error("Invalid or unsupported image format")]
    InvalidFormat,

    /// The image file is corrupted or incomplete.
    #[error("Corrupted or incomplete image file: {0}")]
    CorruptedFile(String),

    /// Out of memory during decoding, or the image exceeds decoder limits.
    #[error("Out of memory during decoding")]
    OutOfMemory,

    /// I/O error during file reading.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<image::ImageError> for DecodeError {
    fn from(err: image::ImageError) -> Self {
        match err {
            image::ImageError::IoError(e) => DecodeError::Io(e),
            image::ImageError::Unsupported(_) => DecodeError::InvalidFormat,
            image::ImageError::Limits(_) => DecodeError::OutOfMemory,
            other => DecodeError::CorruptedFile(other.to_string()),
        }
    }
}

/// Filter type for image resizing operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FilterType {
    /// Nearest neighbor interpolation (fastest, lowest quality).
    Nearest,
    /// Bilinear interpolation (fast, acceptable quality).
    #[default]
    Bilinear,
    /// Lanczos3 interpolation (slower, highest quality).
    Lanczos3,
}

impl FilterType {
    /// Convert to the image crate's FilterType.
    pub fn to_image_filter(self) -> image::imageops::FilterType {
        match self {
            FilterType::Nearest => image::imageops::FilterType::Nearest,
            FilterType::Bilinear => image::imageops::FilterType::Triangle,
            FilterType::Lanczos3 => image::imageops::FilterType::Lanczos3,
        }
    }
}

/// EXIF orientation values (1-8).
/// See: https://exiftool.org/TagNames/EXIF.html
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum Orientation {
    /// Normal (no transformation needed).
    #[default]
    Normal = 1,
    /// Horizontal flip.
    FlipHorizontal = 2,
    /// Rotate 180 degrees.
    Rotate180 = 3,
    /// Vertical flip.
    FlipVertical = 4,
    /// Transpose (flip horizontal + rotate 270 CW).
    Transpose = 5,
    /// Rotate 90 degrees clockwise.
    Rotate90CW = 6,
    /// Transverse (flip horizontal + rotate 90 CW).
    Transverse = 7,
    /// Rotate 270 degrees clockwise (90 CCW).
    Rotate270CW = 8,
}

impl Orientation {
    /// Clockwise rotation in degrees the viewer applies for this tag.
    pub fn degrees(self) -> u32 {
        match self {
            Orientation::Rotate90CW | Orientation::Transpose => 90,
            Orientation::Rotate180 | Orientation::FlipVertical => 180,
            Orientation::Rotate270CW | Orientation::Transverse => 270,
            Orientation::Normal | Orientation::FlipHorizontal => 0,
        }
    }

    /// Returns true if a horizontal flip follows the rotation.
    pub fn is_mirrored(self) -> bool {
        matches!(
            self,
            Orientation::FlipHorizontal
                | Orientation::FlipVertical
                | Orientation::Transpose
                | Orientation::Transverse
        )
    }
}

impl From<u32> for Orientation {
    fn from(value: u32) -> Self {
        match value {
            1 => Orientation::Normal,
            2 => Orientation::FlipHorizontal,
            3 => Orientation::Rotate180,
            4 => Orientation::FlipVertical,
            5 => Orientation::Transpose,
            6 => Orientation::Rotate90CW,
            7 => Orientation::Transverse,
            8 => Orientation::Rotate270CW,
            _ => Orientation::Normal,
        }
    }
}

/// Channel layout of a decoded pixel buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ColorLayout {
    /// 3 bytes per pixel.
    #[default]
    Rgb8,
    /// 4 bytes per pixel, straight alpha.
    Rgba8,
}

impl ColorLayout {
    /// Bytes per pixel.
    #[inline]
    pub fn channels(self) -> usize {
        match self {
            ColorLayout::Rgb8 => 3,
            ColorLayout::Rgba8 => 4,
        }
    }

    /// Returns true if the layout carries an alpha channel.
    pub fn has_alpha(self) -> bool {
        self == ColorLayout::Rgba8
    }
}

/// A decoded image with 8-bit RGB or RGBA pixel data.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Channel layout of `pixels`.
    pub layout: ColorLayout,
    /// Pixel data in row-major order.
    /// Length should be width * height * layout.channels().
    pub pixels: Vec<u8>,
}

impl DecodedImage {
    /// Create a new RGB DecodedImage with the given dimensions and pixel data.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        Self::with_layout(width, height, ColorLayout::Rgb8, pixels)
    }

    /// Create a new DecodedImage with an explicit channel layout.
    pub fn with_layout(width: u32, height: u32, layout: ColorLayout, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(
            pixels.len(),
            width as usize * height as usize * layout.channels(),
            "Pixel buffer size mismatch"
        );
        Self {
            width,
            height,
            layout,
            pixels,
        }
    }

    /// Create a DecodedImage from any `image` crate buffer.
    ///
    /// Images with an alpha channel become RGBA8, everything else RGB8.
    pub fn from_dynamic(img: image::DynamicImage) -> Self {
        if img.color().has_alpha() {
            let rgba = img.into_rgba8();
            let (width, height) = rgba.dimensions();
            Self::with_layout(width, height, ColorLayout::Rgba8, rgba.into_raw())
        } else {
            let rgb = img.into_rgb8();
            let (width, height) = rgb.dimensions();
            Self::with_layout(width, height, ColorLayout::Rgb8, rgb.into_raw())
        }
    }

    /// Convert to an `image::DynamicImage` for further processing.
    ///
    /// Returns `None` if the buffer length does not match the dimensions.
    pub fn to_dynamic(&self) -> Option<image::DynamicImage> {
        let pixels = self.pixels.clone();
        match self.layout {
            ColorLayout::Rgb8 => image::RgbImage::from_raw(self.width, self.height, pixels)
                .map(image::DynamicImage::ImageRgb8),
            ColorLayout::Rgba8 => image::RgbaImage::from_raw(self.width, self.height, pixels)
                .map(image::DynamicImage::ImageRgba8),
        }
    }

    /// Check if this is an empty/invalid image.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.pixels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_type_conversion() {
        assert!(matches!(
            FilterType::Nearest.to_image_filter(),
            image::imageops::FilterType::Nearest
        ));
        assert!(matches!(
            FilterType::Bilinear.to_image_filter(),
            image::imageops::FilterType::Triangle
        ));
        assert!(matches!(
            FilterType::Lanczos3.to_image_filter(),
            image::imageops::FilterType::Lanczos3
        ));
    }

    #[test]
    fn test_orientation_from_u32() {
        assert_eq!(Orientation::from(1), Orientation::Normal);
        assert_eq!(Orientation::from(6), Orientation::Rotate90CW);
        assert_eq!(Orientation::from(99), Orientation::Normal); // Invalid defaults to Normal
    }

    #[test]
    fn test_orientation_degrees_and_mirror() {
        assert_eq!(Orientation::Normal.degrees(), 0);
        assert_eq!(Orientation::Rotate90CW.degrees(), 90);
        assert_eq!(Orientation::Transpose.degrees(), 90);
        assert_eq!(Orientation::FlipVertical.degrees(), 180);
        assert_eq!(Orientation::Transverse.degrees(), 270);

        assert!(!Orientation::Rotate90CW.is_mirrored());
        assert!(Orientation::FlipHorizontal.is_mirrored());
        assert!(Orientation::Transverse.is_mirrored());
    }

    #[test]
    fn test_color_layout_channels() {
        assert_eq!(ColorLayout::Rgb8.channels(), 3);
        assert_eq!(ColorLayout::Rgba8.channels(), 4);
        assert!(ColorLayout::Rgba8.has_alpha());
        assert!(!ColorLayout::Rgb8.has_alpha());
    }

    #[test]
    fn test_decoded_image_creation() {
        let pixels = vec![0u8; 100 * 50 * 3];
        let img = DecodedImage::new(100, 50, pixels);

        assert_eq!(img.width, 100);
        assert_eq!(img.height, 50);
        assert_eq!(img.layout, ColorLayout::Rgb8);
        assert_eq!(img.pixels.len(), 15000);
        assert!(!img.is_empty());
    }

    #[test]
    fn test_decoded_image_empty() {
        let img = DecodedImage::new(0, 0, vec![]);
        assert!(img.is_empty());
    }

    #[test]
    fn test_from_dynamic_keeps_alpha() {
        let rgba = image::RgbaImage::from_pixel(2, 3, image::Rgba([1, 2, 3, 128]));
        let img = DecodedImage::from_dynamic(image::DynamicImage::ImageRgba8(rgba));
        assert_eq!(img.layout, ColorLayout::Rgba8);
        assert_eq!(img.pixels.len(), 2 * 3 * 4);

        let gray = image::GrayImage::from_pixel(2, 2, image::Luma([7]));
        let img = DecodedImage::from_dynamic(image::DynamicImage::ImageLuma8(gray));
        assert_eq!(img.layout, ColorLayout::Rgb8);
        assert_eq!(&img.pixels[0..3], &[7, 7, 7]);
    }

    #[test]
    fn test_to_dynamic_round_trip_dimensions() {
        let img = DecodedImage::with_layout(4, 2, ColorLayout::Rgba8, vec![9u8; 4 * 2 * 4]);
        let dynamic = img.to_dynamic().unwrap();
        assert_eq!((dynamic.width(), dynamic.height()), (4, 2));
        assert!(dynamic.color().has_alpha());
    }

    #[test]
    fn test_decode_error_display() {
        let err = DecodeError::CorruptedFile("bad marker".to_string());
        assert_eq!(err.to_string(), "Corrupted or incomplete image file: bad marker");

        let err = DecodeError::InvalidFormat;
        assert_eq!(err.to_string(), "Invalid or unsupported image format");
    }

    #[test]
    fn test_decode_error_from_io() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: DecodeError = image::ImageError::IoError(io).into();
        assert!(matches!(err, DecodeError::Io(_)));
    }
}
