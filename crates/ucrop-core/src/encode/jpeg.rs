//! JPEG encoding for crop results.
//!
//! This module provides JPEG encoding using the `image` crate's JPEG encoder.
//! JPEG has no alpha channel, so RGBA input is written as RGB.

use image::codecs::jpeg::JpegEncoder;
use image::ExtendedColorType;
use image::ImageEncoder;
use std::borrow::Cow;
use std::io::Cursor;

use super::types::{validate_pixels, EncodeError};
use crate::decode::ColorLayout;

/// Encode pixel data to JPEG bytes.
///
/// # Arguments
///
/// * `pixels` - Pixel data in `layout` (row-major order)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `layout` - Channel layout of `pixels`; alpha is dropped
/// * `quality` - JPEG quality (0-100; 0 is treated as 1)
///
/// # Returns
///
/// JPEG-encoded bytes on success, or an error if encoding fails.
pub fn encode_jpeg(
    pixels: &[u8],
    width: u32,
    height: u32,
    layout: ColorLayout,
    quality: u8,
) -> Result<Vec<u8>, EncodeError> {
    validate_pixels(pixels, width, height, layout)?;

    // The encoder accepts 1-100
    let quality = quality.clamp(1, 100);

    let rgb: Cow<'_, [u8]> = match layout {
        ColorLayout::Rgb8 => Cow::Borrowed(pixels),
        ColorLayout::Rgba8 => Cow::Owned(
            pixels
                .chunks_exact(4)
                .flat_map(|p| [p[0], p[1], p[2]])
                .collect(),
        ),
    };

    let mut buffer = Cursor::new(Vec::new());
    let encoder = JpegEncoder::new_with_quality(&mut buffer, quality);
    encoder.write_image(&rgb, width, height, ExtendedColorType::Rgb8)?;

    Ok(buffer.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_jpeg_basic() {
        let pixels = vec![128u8; 100 * 100 * 3];

        let jpeg_bytes = encode_jpeg(&pixels, 100, 100, ColorLayout::Rgb8, 90).unwrap();

        // SOI marker
        assert_eq!(&jpeg_bytes[0..2], &[0xFF, 0xD8]);
        // EOI marker
        let len = jpeg_bytes.len();
        assert_eq!(&jpeg_bytes[len - 2..], &[0xFF, 0xD9]);
    }

    #[test]
    fn test_encode_jpeg_drops_alpha() {
        let pixels = [255u8, 0, 0, 10].repeat(16 * 16);

        let jpeg_bytes = encode_jpeg(&pixels, 16, 16, ColorLayout::Rgba8, 95).unwrap();
        let decoded = image::load_from_memory(&jpeg_bytes).unwrap();
        assert!(!decoded.color().has_alpha());

        let rgb = decoded.into_rgb8();
        let p = rgb.get_pixel(8, 8).0;
        assert!(p[0] > 200 && p[1] < 50 && p[2] < 50, "pixel was {:?}", p);
    }

    #[test]
    fn test_encode_jpeg_quality_clamping() {
        let pixels = vec![128u8; 10 * 10 * 3];

        assert!(encode_jpeg(&pixels, 10, 10, ColorLayout::Rgb8, 0).is_ok());
        assert!(encode_jpeg(&pixels, 10, 10, ColorLayout::Rgb8, 255).is_ok());
    }

    #[test]
    fn test_encode_jpeg_invalid_pixel_data() {
        let short = vec![128u8; 99 * 100 * 3];
        assert!(matches!(
            encode_jpeg(&short, 100, 100, ColorLayout::Rgb8, 90),
            Err(EncodeError::InvalidPixelData { .. })
        ));

        // RGB-sized buffer declared as RGBA
        let rgb_sized = vec![128u8; 10 * 10 * 3];
        assert!(matches!(
            encode_jpeg(&rgb_sized, 10, 10, ColorLayout::Rgba8, 90),
            Err(EncodeError::InvalidPixelData { .. })
        ));
    }

    #[test]
    fn test_encode_jpeg_zero_dimensions() {
        assert!(matches!(
            encode_jpeg(&[], 0, 100, ColorLayout::Rgb8, 90),
            Err(EncodeError::InvalidDimensions { .. })
        ));
        assert!(matches!(
            encode_jpeg(&[], 100, 0, ColorLayout::Rgb8, 90),
            Err(EncodeError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_encode_jpeg_small_image() {
        let pixels = vec![255, 0, 0]; // Red pixel

        let jpeg_bytes = encode_jpeg(&pixels, 1, 1, ColorLayout::Rgb8, 90).unwrap();
        assert_eq!(&jpeg_bytes[0..2], &[0xFF, 0xD8]);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Strategy for generating image dimensions (keep small for speed).
    fn dimensions_strategy() -> impl Strategy<Value = (u32, u32)> {
        (1u32..=40, 1u32..=40)
    }

    proptest! {
        /// Property: Encoding always produces valid JPEG when given valid input.
        #[test]
        fn prop_valid_input_produces_valid_jpeg(
            (width, height) in dimensions_strategy(),
            quality in 0u8..=100,
            alpha in any::<bool>(),
        ) {
            let layout = if alpha { ColorLayout::Rgba8 } else { ColorLayout::Rgb8 };
            let size = (width as usize) * (height as usize) * layout.channels();
            let pixels = vec![128u8; size];

            let jpeg_bytes = encode_jpeg(&pixels, width, height, layout, quality);
            prop_assert!(jpeg_bytes.is_ok(), "Valid input should produce valid output");
            let jpeg_bytes = jpeg_bytes.unwrap();

            prop_assert_eq!(&jpeg_bytes[0..2], &[0xFF, 0xD8], "Should have SOI marker");
            let len = jpeg_bytes.len();
            prop_assert_eq!(&jpeg_bytes[len - 2..], &[0xFF, 0xD9], "Should have EOI marker");
        }

        /// Property: Same input always produces same output (deterministic).
        #[test]
        fn prop_deterministic_output(
            (width, height) in (1u32..=20, 1u32..=20),
            quality in 1u8..=100,
        ) {
            let pixels = vec![100u8; (width as usize) * (height as usize) * 3];

            let first = encode_jpeg(&pixels, width, height, ColorLayout::Rgb8, quality).unwrap();
            let second = encode_jpeg(&pixels, width, height, ColorLayout::Rgb8, quality).unwrap();
            prop_assert_eq!(first, second, "Same input should produce same output");
        }

        /// Property: Invalid pixel data length always returns error.
        #[test]
        fn prop_invalid_pixel_length_returns_error(
            (width, height) in dimensions_strategy(),
            extra_or_missing in -10i32..=10,
        ) {
            prop_assume!(extra_or_missing != 0);

            let expected_size = (width as usize) * (height as usize) * 3;
            let actual_size = if extra_or_missing > 0 {
                expected_size + extra_or_missing as usize
            } else {
                expected_size.saturating_sub((-extra_or_missing) as usize)
            };
            prop_assume!(actual_size != expected_size);

            let pixels = vec![128u8; actual_size];
            let result = encode_jpeg(&pixels, width, height, ColorLayout::Rgb8, 90);

            prop_assert!(
                matches!(result, Err(EncodeError::InvalidPixelData { .. })),
                "Mismatched pixel data should return InvalidPixelData error"
            );
        }
    }
}
