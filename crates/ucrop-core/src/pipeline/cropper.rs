//! The rotate-and-crop pipeline.

use std::time::Instant;

use log::debug;

use super::{CropError, CropOptions, CropOutcome, CropRequest, ImageBackend, ImageCrateBackend};
use crate::decode::{scale, DecodedImage};
use crate::transform::{build_warp_field, resample};

/// Serves crop requests with a fixed backend and option set.
///
/// A `Cropper` holds no per-request state, so one instance can serve
/// requests from several threads when its backend allows it.
#[derive(Debug, Clone, Default)]
pub struct Cropper<B = ImageCrateBackend> {
    backend: B,
    options: CropOptions,
}

impl<B: ImageBackend> Cropper<B> {
    pub fn new(backend: B, options: CropOptions) -> Self {
        Self { backend, options }
    }

    pub fn options(&self) -> &CropOptions {
        &self.options
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Rotate the source of `request` about its center, cut out
    /// `request.rect`, optionally downscale, and write the result.
    ///
    /// The output file is only touched once everything before encoding has
    /// succeeded.
    ///
    /// # Errors
    ///
    /// - `CropError::InvalidArgument` for a non-positive or non-finite
    ///   `resize_scale`, a non-finite angle, or an empty source
    /// - `CropError::Decode` if the source cannot be read
    /// - `CropError::OutOfMemory` if the crop buffers cannot be allocated
    /// - `CropError::Encode` if the result cannot be encoded or written
    pub fn crop(&self, request: &CropRequest) -> Result<CropOutcome, CropError> {
        validate(request)?;
        debug!(
            "crop {} -> {}: rect {:?}, angle {}, scale {}, {:?} q{}",
            request.input_path.display(),
            request.output_path.display(),
            request.rect,
            request.angle_degrees,
            request.resize_scale,
            request.format,
            request.quality
        );

        let start = Instant::now();
        let source = self.backend.decode(&request.input_path, &self.options)?;
        debug!(
            "decoded {}x{} in {:?}",
            source.width,
            source.height,
            start.elapsed()
        );

        let start = Instant::now();
        let cropped = self.rotate_and_crop(&source, request)?;
        drop(source);
        debug!(
            "warped to {}x{} in {:?}",
            cropped.width,
            cropped.height,
            start.elapsed()
        );

        let result = if request.resize_scale < 1.0 {
            let start = Instant::now();
            let scaled = scale(&cropped, request.resize_scale, self.options.resize_filter)?;
            debug!(
                "scaled to {}x{} in {:?}",
                scaled.width,
                scaled.height,
                start.elapsed()
            );
            scaled
        } else {
            cropped
        };

        let start = Instant::now();
        let bytes_written = self.backend.encode(
            &result,
            &request.output_path,
            request.format,
            request.quality,
        )?;
        debug!("encoded in {:?}", start.elapsed());

        Ok(CropOutcome {
            width: result.width,
            height: result.height,
            bytes_written,
        })
    }

    fn rotate_and_crop(
        &self,
        source: &DecodedImage,
        request: &CropRequest,
    ) -> Result<DecodedImage, CropError> {
        let warp = build_warp_field(
            source.width,
            source.height,
            request.angle_degrees,
            &request.rect,
        )?;
        resample(
            source,
            &warp,
            self.options.interpolation,
            self.options.boundary,
        )
        .map_err(CropError::from)
    }
}

fn validate(request: &CropRequest) -> Result<(), CropError> {
    if !request.angle_degrees.is_finite() {
        return Err(CropError::InvalidArgument(format!(
            "angle must be finite, got {}",
            request.angle_degrees
        )));
    }
    if !request.resize_scale.is_finite() || request.resize_scale <= 0.0 {
        return Err(CropError::InvalidArgument(format!(
            "resize scale must be positive, got {}",
            request.resize_scale
        )));
    }
    Ok(())
}

/// Serve `request` with the `image` crate backend and default options.
pub fn crop_file(request: &CropRequest) -> Result<CropOutcome, CropError> {
    Cropper::<ImageCrateBackend>::default().crop(request)
}

/// Downscale factor that fits a `crop_width x crop_height` crop into
/// `max_width x max_height`.
///
/// Returns 1.0 when no limit is set (either maximum is not positive) or the
/// crop already fits.
pub fn compute_resize_scale(crop_width: u32, crop_height: u32, max_width: i32, max_height: i32) -> f32 {
    if max_width <= 0 || max_height <= 0 || crop_width == 0 || crop_height == 0 {
        return 1.0;
    }
    let (max_width, max_height) = (max_width as u32, max_height as u32);
    if crop_width <= max_width && crop_height <= max_height {
        return 1.0;
    }
    let scale_x = max_width as f32 / crop_width as f32;
    let scale_y = max_height as f32 / crop_height as f32;
    scale_x.min(scale_y)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// The scale never enlarges and always fits the crop into the limit.
        #[test]
        fn prop_resize_scale_fits(
            crop_w in 1u32..=8000,
            crop_h in 1u32..=8000,
            max_w in 1i32..=4000,
            max_h in 1i32..=4000,
        ) {
            let s = compute_resize_scale(crop_w, crop_h, max_w, max_h);
            prop_assert!(s > 0.0 && s <= 1.0);
            prop_assert!((crop_w as f32 * s) <= max_w as f32 + 0.01);
            prop_assert!((crop_h as f32 * s) <= max_h as f32 + 0.01);
        }
    }
}
