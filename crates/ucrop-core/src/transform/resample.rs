//! Resampling a source image through a warp field.
//!
//! Each output pixel is looked up in the source at the (possibly fractional)
//! coordinate stored in the matching warp cell. Pixel centers sit on integer
//! coordinates, so a warp cell of `(3.0, 7.0)` reads source pixel `(3, 7)`
//! exactly.
//!
//! Coordinates outside the source are resolved per [`Boundary`].

use serde::{Deserialize, Serialize};

use super::warp::{GeometryError, WarpField};
use crate::decode::DecodedImage;

/// Interpolation used when a warp cell falls between source pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Interpolation {
    /// Take the closest source pixel.
    Nearest,
    /// Blend the four surrounding source pixels.
    #[default]
    Linear,
}

/// How source coordinates outside the image are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Boundary {
    /// Outside pixels are zero (black, or transparent with alpha).
    Dirichlet,
    /// Outside pixels repeat the nearest edge pixel.
    Neumann,
    /// The source tiles the plane.
    #[default]
    Periodic,
}

impl Boundary {
    /// Resolve an integer coordinate against an axis of length `len`.
    #[inline]
    fn resolve(self, i: i64, len: i64) -> Option<usize> {
        match self {
            Boundary::Dirichlet => (0..len).contains(&i).then_some(i as usize),
            Boundary::Neumann => Some(i.clamp(0, len - 1) as usize),
            Boundary::Periodic => Some(i.rem_euclid(len) as usize),
        }
    }
}

/// Resample `image` through `warp`.
///
/// The result has the warp's dimensions and the source's color layout.
/// Non-finite warp cells produce zero pixels.
///
/// # Errors
///
/// Returns `GeometryError::TooLarge` if the output buffer cannot be
/// allocated.
pub fn resample(
    image: &DecodedImage,
    warp: &WarpField,
    interpolation: Interpolation,
    boundary: Boundary,
) -> Result<DecodedImage, GeometryError> {
    let channels = image.layout.channels();
    let mut output = zeroed_buffer(warp.width(), warp.height(), channels)?;

    if !image.is_empty() {
        let sampler = Sampler {
            image,
            channels,
            boundary,
        };
        for (dst, &(sx, sy)) in output.chunks_exact_mut(channels).zip(warp.coords()) {
            if !sx.is_finite() || !sy.is_finite() {
                continue;
            }
            match interpolation {
                Interpolation::Nearest => sampler.nearest(sx, sy, dst),
                Interpolation::Linear => sampler.linear(sx, sy, dst),
            }
        }
    }

    Ok(DecodedImage::with_layout(
        warp.width(),
        warp.height(),
        image.layout,
        output,
    ))
}

fn zeroed_buffer(width: u32, height: u32, channels: usize) -> Result<Vec<u8>, GeometryError> {
    let too_large = || GeometryError::TooLarge { width, height };
    let len = (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(channels))
        .ok_or_else(too_large)?;

    let mut buffer = Vec::new();
    buffer.try_reserve_exact(len).map_err(|_| too_large())?;
    buffer.resize(len, 0);
    Ok(buffer)
}

struct Sampler<'a> {
    image: &'a DecodedImage,
    channels: usize,
    boundary: Boundary,
}

impl Sampler<'_> {
    /// Pixel at integer coordinates, or `None` when outside under Dirichlet.
    #[inline]
    fn pixel(&self, x: i64, y: i64) -> Option<&[u8]> {
        let px = self.boundary.resolve(x, self.image.width as i64)?;
        let py = self.boundary.resolve(y, self.image.height as i64)?;
        let idx = (py * self.image.width as usize + px) * self.channels;
        self.image.pixels.get(idx..idx + self.channels)
    }

    fn nearest(&self, x: f32, y: f32, dst: &mut [u8]) {
        if let Some(p) = self.pixel(x.round() as i64, y.round() as i64) {
            dst.copy_from_slice(p);
        }
    }

    fn linear(&self, x: f32, y: f32, dst: &mut [u8]) {
        let x0 = x.floor();
        let y0 = y.floor();
        let fx = x - x0;
        let fy = y - y0;
        let (x0, y0) = (x0 as i64, y0 as i64);
        let (x1, y1) = (x0.saturating_add(1), y0.saturating_add(1));

        let taps = [
            (x0, y0, (1.0 - fx) * (1.0 - fy)),
            (x1, y0, fx * (1.0 - fy)),
            (x0, y1, (1.0 - fx) * fy),
            (x1, y1, fx * fy),
        ];

        let mut acc = [0.0f32; 4];
        for (tx, ty, weight) in taps {
            if weight == 0.0 {
                continue;
            }
            if let Some(p) = self.pixel(tx, ty) {
                for (a, &v) in acc.iter_mut().zip(p) {
                    *a += v as f32 * weight;
                }
            }
        }

        for (d, a) in dst.iter_mut().zip(acc) {
            *d = a.round().clamp(0.0, 255.0) as u8;
        }
    }
}
