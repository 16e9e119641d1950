//! Warp field construction for a fused rotate-and-crop.
//!
//! Rotating a full image and then cropping it needs an intermediate buffer
//! the size of the rotated bounding box. Instead, this module computes, for
//! every pixel of the crop rectangle, the position in the *unrotated* source
//! image it comes from. A single resampling pass over that table produces
//! the rotated crop directly.
//!
//! # Coordinate System
//!
//! - The crop rectangle lives in the frame of the rotated bounding box:
//!   `(0, 0)` is the top-left corner of the axis-aligned box that encloses
//!   the source image after rotating it about its own center.
//! - `left`/`top` may be negative and the rectangle may extend past the
//!   rotated bounds; the resampler decides what those pixels contain.
//! - Angles are in degrees. With the y axis pointing down, a positive angle
//!   turns the picture clockwise as displayed (counter-clockwise in the
//!   usual y-up convention), matching `android.graphics.Matrix#postRotate`.
//!
//! # Algorithm
//!
//! ```text
//! ca, sa   = cos(angle), sin(angle)
//! dw2, dh2 = half extent of the rotated bounding box
//! w2, h2   = half extent of the source
//!
//! u = x + left - dw2
//! v = y + top  - dh2
//! sx = w2 + u*ca + v*sa
//! sy = h2 - u*sa + v*ca
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when a crop request has unusable geometry.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GeometryError {
    /// Crop width or height is zero or negative.
    #[error("Invalid crop size: width ({width}) and height ({height}) must be positive")]
    InvalidCropSize { width: i64, height: i64 },

    /// Source image has a zero dimension.
    #[error("Invalid source dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidSourceDimensions { width: u32, height: u32 },

    /// The output buffers for this size cannot be allocated.
    #[error("Crop of {width}x{height} is too large to allocate")]
    TooLarge { width: u32, height: u32 },
}

/// Crop rectangle expressed in the rotated bounding-box frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropRect {
    /// Left edge; may be negative.
    pub left: i32,
    /// Top edge; may be negative.
    pub top: i32,
    /// Width in pixels (always > 0).
    pub width: u32,
    /// Height in pixels (always > 0).
    pub height: u32,
}

impl CropRect {
    /// Create a crop rectangle, rejecting non-positive sizes.
    ///
    /// Sizes are taken as signed values so that whatever the host passed in
    /// can be checked here rather than silently wrapped.
    pub fn new(left: i32, top: i32, width: i32, height: i32) -> Result<Self, GeometryError> {
        if width <= 0 || height <= 0 {
            return Err(GeometryError::InvalidCropSize {
                width: width as i64,
                height: height as i64,
            });
        }
        Ok(Self {
            left,
            top,
            width: width as u32,
            height: height as u32,
        })
    }

    /// Number of cells a warp field for this rectangle holds, or `None`
    /// if that does not fit in `usize`.
    pub fn area(&self) -> Option<usize> {
        (self.width as usize).checked_mul(self.height as usize)
    }

    fn too_large(&self) -> GeometryError {
        GeometryError::TooLarge {
            width: self.width,
            height: self.height,
        }
    }
}

/// Per-request constants of the rotation: trig values and the half extents
/// of both the source and its rotated bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotatedFrame {
    cos: f32,
    sin: f32,
    w2: f32,
    h2: f32,
    dw2: f32,
    dh2: f32,
}

impl RotatedFrame {
    /// Compute the frame for rotating a `src_width x src_height` image by
    /// `angle_degrees` about its center.
    pub fn new(src_width: u32, src_height: u32, angle_degrees: f32) -> Self {
        let rad = angle_degrees * std::f32::consts::PI / 180.0;
        let (sa, ca) = rad.sin_cos();
        let (w, h) = (src_width as f32, src_height as f32);

        let ux = (w * ca).abs();
        let uy = (w * sa).abs();
        let vx = (h * sa).abs();
        let vy = (h * ca).abs();

        Self {
            cos: ca,
            sin: sa,
            w2: 0.5 * w,
            h2: 0.5 * h,
            dw2: 0.5 * (ux + vx),
            dh2: 0.5 * (uy + vy),
        }
    }

    /// Cosine of the rotation angle.
    pub fn cos(&self) -> f32 {
        self.cos
    }

    /// Sine of the rotation angle.
    pub fn sin(&self) -> f32 {
        self.sin
    }

    /// Half extents `(w2, h2)` of the source image.
    pub fn source_half_extent(&self) -> (f32, f32) {
        (self.w2, self.h2)
    }

    /// Half extents `(dw2, dh2)` of the rotated bounding box.
    pub fn rotated_half_extent(&self) -> (f32, f32) {
        (self.dw2, self.dh2)
    }

    /// Size of the rotated bounding box, unrounded.
    pub fn bounds(&self) -> (f32, f32) {
        (2.0 * self.dw2, 2.0 * self.dh2)
    }

    /// Map a point of the rotated bounding-box frame back into the source.
    #[inline]
    pub fn source_coord(&self, x: f32, y: f32) -> (f32, f32) {
        let u = x - self.dw2;
        let v = y - self.dh2;
        (
            self.w2 + u * self.cos + v * self.sin,
            self.h2 - u * self.sin + v * self.cos,
        )
    }

    /// Map a source point forward into the rotated bounding-box frame.
    ///
    /// Inverse of [`RotatedFrame::source_coord`].
    #[inline]
    pub fn rotated_coord(&self, sx: f32, sy: f32) -> (f32, f32) {
        let dx = sx - self.w2;
        let dy = sy - self.h2;
        (
            self.dw2 + dx * self.cos - dy * self.sin,
            self.dh2 + dx * self.sin + dy * self.cos,
        )
    }
}

/// Dense table of source coordinates, one `(sx, sy)` per output pixel.
///
/// Row-major; cell `(0, 0)` is the top-left corner of the crop rectangle.
#[derive(Debug, Clone, PartialEq)]
pub struct WarpField {
    width: u32,
    height: u32,
    coords: Vec<(f32, f32)>,
}

impl WarpField {
    /// Wrap precomputed cells; `coords.len()` must equal `width * height`.
    pub(crate) fn from_coords(width: u32, height: u32, coords: Vec<(f32, f32)>) -> Self {
        debug_assert_eq!(coords.len(), width as usize * height as usize);
        Self {
            width,
            height,
            coords,
        }
    }

    /// Output width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Output height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// All cells in row-major order.
    pub fn coords(&self) -> &[(f32, f32)] {
        &self.coords
    }

    /// Source coordinate for output cell `(x, y)`, if inside the grid.
    pub fn get(&self, x: u32, y: u32) -> Option<(f32, f32)> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.coords
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    /// Iterate over rows of the field.
    pub fn rows(&self) -> impl Iterator<Item = &[(f32, f32)]> {
        self.coords.chunks_exact(self.width as usize)
    }
}

/// Build the warp field for rotating a source image by `angle_degrees` and
/// cropping `rect` out of the rotated result.
///
/// # Errors
///
/// Returns `GeometryError::InvalidSourceDimensions` if either source
/// dimension is zero, and `GeometryError::TooLarge` if the field cannot be
/// allocated. The crop rectangle is validated by [`CropRect::new`].
pub fn build_warp_field(
    src_width: u32,
    src_height: u32,
    angle_degrees: f32,
    rect: &CropRect,
) -> Result<WarpField, GeometryError> {
    if src_width == 0 || src_height == 0 {
        return Err(GeometryError::InvalidSourceDimensions {
            width: src_width,
            height: src_height,
        });
    }
    if rect.width == 0 || rect.height == 0 {
        return Err(GeometryError::InvalidCropSize {
            width: rect.width as i64,
            height: rect.height as i64,
        });
    }

    let frame = RotatedFrame::new(src_width, src_height, angle_degrees);
    let cells = rect.area().ok_or_else(|| rect.too_large())?;
    let mut coords = Vec::new();
    coords
        .try_reserve_exact(cells)
        .map_err(|_| rect.too_large())?;

    for y in 0..rect.height as i64 {
        let ry = (y + rect.top as i64) as f32;
        for x in 0..rect.width as i64 {
            let rx = (x + rect.left as i64) as f32;
            coords.push(frame.source_coord(rx, ry));
        }
    }

    Ok(WarpField::from_coords(rect.width, rect.height, coords))
}

/// Pixel size of the bounding box of a `width x height` image rotated by
/// `angle_degrees`, rounded and never smaller than 1x1.
///
/// A crop rectangle of `(0, 0, w, h)` with these dimensions keeps the whole
/// rotated image.
pub fn rotated_bounds(width: u32, height: u32, angle_degrees: f32) -> (u32, u32) {
    let (bw, bh) = RotatedFrame::new(width, height, angle_degrees).bounds();
    ((bw.round() as u32).max(1), (bh.round() as u32).max(1))
}


// ============================================================================
// Property-Based Tests
// ============================================================================
