//! Translation of failures into Java exceptions.

use thiserror::Error;
use ucrop_core::{CropError, ErrorKind};

/// Thrown when a Rust panic is caught at the boundary.
pub const RUNTIME_EXCEPTION: &str = "java/lang/RuntimeException";

/// Anything that can go wrong inside the native call.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// A JNI call failed
    #[error("JNI error: {0}")]
    Jni(#[from] jni::errors::Error),

    /// The crop itself failed
    #[error(transparent)]
    Crop(#[from] CropError),
}

impl BridgeError {
    /// Java exception class to throw for this error, or `None` when a Java
    /// exception is already pending.
    pub fn exception_class(&self) -> Option<&'static str> {
        match self {
            BridgeError::Jni(jni::errors::Error::JavaException) => None,
            BridgeError::Jni(jni::errors::Error::NullPtr(_)) => {
                Some("java/lang/NullPointerException")
            }
            BridgeError::Jni(_) => Some(RUNTIME_EXCEPTION),
            BridgeError::Crop(err) => Some(exception_class(err.kind())),
        }
    }
}

/// Java exception class for a crop failure class.
pub fn exception_class(kind: ErrorKind) -> &'static str {
    match kind {
        ErrorKind::InvalidArgument => "java/lang/IllegalArgumentException",
        ErrorKind::Io => "java/io/IOException",
        ErrorKind::OutOfMemory => "java/lang/OutOfMemoryError",
    }
}

/// Best-effort text of a caught panic payload.
pub fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "native crop panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ucrop_core::decode::DecodeError;
    use ucrop_core::encode::EncodeError;
    use ucrop_core::{build_warp_field, CropRect};

    #[test]
    fn test_exception_classes() {
        assert_eq!(
            exception_class(ErrorKind::InvalidArgument),
            "java/lang/IllegalArgumentException"
        );
        assert_eq!(exception_class(ErrorKind::Io), "java/io/IOException");
        assert_eq!(
            exception_class(ErrorKind::OutOfMemory),
            "java/lang/OutOfMemoryError"
        );
    }

    #[test]
    fn test_crop_errors_map_through_kind() {
        let err = BridgeError::from(CropError::from(DecodeError::InvalidFormat));
        assert_eq!(err.exception_class(), Some("java/io/IOException"));

        let err = BridgeError::from(CropError::from(EncodeError::OutOfMemory));
        assert_eq!(err.exception_class(), Some("java/lang/OutOfMemoryError"));

        let rect = CropRect::new(0, 0, 1 << 20, 1 << 20).unwrap();
        let too_large = build_warp_field(2, 2, 0.0, &rect).unwrap_err();
        let err = BridgeError::from(CropError::from(too_large));
        assert_eq!(err.exception_class(), Some("java/lang/OutOfMemoryError"));
    }

    #[test]
    fn test_pending_java_exception_is_not_rethrown() {
        let err = BridgeError::from(jni::errors::Error::JavaException);
        assert_eq!(err.exception_class(), None);

        let err = BridgeError::from(jni::errors::Error::NullPtr("get_string obj argument"));
        assert_eq!(err.exception_class(), Some("java/lang/NullPointerException"));
    }

    #[test]
    fn test_panic_message() {
        let payload = std::panic::catch_unwind(|| panic!("boom")).unwrap_err();
        assert_eq!(panic_message(payload.as_ref()), "boom");

        let payload = std::panic::catch_unwind(|| panic!("{} {}", "formatted", 1)).unwrap_err();
        assert_eq!(panic_message(payload.as_ref()), "formatted 1");

        let payload = std::panic::catch_unwind(|| std::panic::panic_any(7u32)).unwrap_err();
        assert_eq!(panic_message(payload.as_ref()), "native crop panicked");
    }
}
