//! Geometric transforms: fused rotate-and-crop.
//!
//! A crop request is served in two steps:
//! 1. [`build_warp_field`] computes, for every output pixel, where it comes
//!    from in the unrotated source.
//! 2. [`resample`] reads the source at those coordinates.
//!
//! # Coordinate System
//!
//! - Rotation angles are in degrees; positive turns the picture clockwise on
//!   screen (y axis pointing down)
//! - Crop rectangles are integer pixels in the rotated bounding-box frame
//! - Origin is top-left corner

mod resample;
mod warp;

pub use resample::{resample, Boundary, Interpolation};
pub use warp::{build_warp_field, rotated_bounds, CropRect, GeometryError, RotatedFrame, WarpField};
