//! Conversion of raw JNI arguments into a crop request.

use ucrop_core::{CropError, CropRect, CropRequest, SaveFormat};

/// Arguments of `BitmapCropTask.cropCImg` after string marshalling.
#[derive(Debug, Clone, PartialEq)]
pub struct CropArgs {
    pub input_path: String,
    pub output_path: String,
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
    pub angle: f32,
    pub resize_scale: f32,
    pub format: i32,
    pub quality: i32,
}

impl CropArgs {
    /// Validate the arguments and build the request.
    ///
    /// # Errors
    ///
    /// Returns `CropError::InvalidArgument` for empty paths, a non-positive
    /// crop size, an unknown format ordinal, or a quality outside 0-100.
    pub fn into_request(self) -> Result<CropRequest, CropError> {
        if self.input_path.is_empty() || self.output_path.is_empty() {
            return Err(CropError::InvalidArgument(
                "input and output paths must not be empty".to_string(),
            ));
        }

        let rect = CropRect::new(self.left, self.top, self.width, self.height)?;

        let format = SaveFormat::from_ordinal(self.format).ok_or_else(|| {
            CropError::InvalidArgument(format!("unsupported format ordinal {}", self.format))
        })?;

        let quality = u8::try_from(self.quality)
            .ok()
            .filter(|q| *q <= 100)
            .ok_or_else(|| {
                CropError::InvalidArgument(format!("quality must be 0-100, got {}", self.quality))
            })?;

        Ok(CropRequest {
            input_path: self.input_path.into(),
            output_path: self.output_path.into(),
            rect,
            angle_degrees: self.angle,
            resize_scale: self.resize_scale,
            format,
            quality,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ucrop_core::ErrorKind;

    fn args() -> CropArgs {
        CropArgs {
            input_path: "/sdcard/in.jpg".to_string(),
            output_path: "/sdcard/out.png".to_string(),
            left: -10,
            top: 20,
            width: 300,
            height: 200,
            angle: 12.5,
            resize_scale: 0.75,
            format: 1,
            quality: 90,
        }
    }

    #[test]
    fn test_into_request() {
        let request = args().into_request().unwrap();

        assert_eq!(request.input_path.to_str(), Some("/sdcard/in.jpg"));
        assert_eq!(request.output_path.to_str(), Some("/sdcard/out.png"));
        assert_eq!(request.rect, CropRect::new(-10, 20, 300, 200).unwrap());
        assert_eq!(request.angle_degrees, 12.5);
        assert_eq!(request.resize_scale, 0.75);
        assert_eq!(request.format, SaveFormat::Png);
        assert_eq!(request.quality, 90);
    }

    #[test]
    fn test_rejects_non_positive_size() {
        for (width, height) in [(0, 10), (10, 0), (-5, 10), (10, -1)] {
            let mut a = args();
            a.width = width;
            a.height = height;
            let err = a.into_request().unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidArgument, "{}x{}", width, height);
        }
    }

    #[test]
    fn test_rejects_unknown_format() {
        let mut a = args();
        a.format = 2;
        assert!(matches!(a.into_request(), Err(CropError::InvalidArgument(_))));

        let mut a = args();
        a.format = -1;
        assert!(matches!(a.into_request(), Err(CropError::InvalidArgument(_))));
    }

    #[test]
    fn test_quality_range() {
        for quality in [0, 100] {
            let mut a = args();
            a.quality = quality;
            assert_eq!(a.into_request().unwrap().quality, quality as u8);
        }
        for quality in [-1, 101, 1000] {
            let mut a = args();
            a.quality = quality;
            assert!(matches!(a.into_request(), Err(CropError::InvalidArgument(_))));
        }
    }

    #[test]
    fn test_rejects_empty_paths() {
        let mut a = args();
        a.output_path.clear();
        assert!(matches!(a.into_request(), Err(CropError::InvalidArgument(_))));
    }
}
