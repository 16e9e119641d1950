//! uCrop JNI - native entry point for the Android cropper
//!
//! Exposes `BitmapCropTask.cropCImg` to Java. The library is built as
//! `libucrop.so` and loaded with `System.loadLibrary("ucrop")`.
//!
//! # Module Structure
//!
//! - `args` - validation of the raw JNI arguments
//! - `error` - mapping of failures onto Java exceptions
//!
//! Failures are reported by throwing and returning `false`:
//!
//! | Failure                         | Java exception              |
//! |---------------------------------|-----------------------------|
//! | bad crop size, format, quality  | `IllegalArgumentException`  |
//! | unreadable or undecodable input | `IOException`               |
//! | encoding failure                | `OutOfMemoryError`          |
//! | panic in native code            | `RuntimeException`          |

use std::ffi::c_void;
use std::panic::{self, AssertUnwindSafe};

use jni::objects::{JObject, JString};
use jni::sys::{jboolean, jfloat, jint, JNI_FALSE, JNI_TRUE, JNI_VERSION_1_6};
use jni::{JNIEnv, JavaVM};
use log::{debug, error};
use ucrop_core::{crop_file, CropOutcome};

mod args;
mod error;

pub use args::CropArgs;
pub use error::{exception_class, BridgeError};

use error::{panic_message, RUNTIME_EXCEPTION};

/// Called by the VM when the library is loaded.
#[no_mangle]
pub extern "system" fn JNI_OnLoad(_vm: JavaVM, _reserved: *mut c_void) -> jint {
    init_logging();
    debug!("loaded ucrop {}", env!("CARGO_PKG_VERSION"));
    JNI_VERSION_1_6
}

#[cfg(target_os = "android")]
fn init_logging() {
    android_logger::init_once(
        android_logger::Config::default()
            .with_max_level(log::LevelFilter::Debug)
            .with_tag("uCrop JNI"),
    );
}

#[cfg(not(target_os = "android"))]
fn init_logging() {}

/// `native boolean cropCImg(String inputPath, String outputPath, int left,
/// int top, int width, int height, float angle, float resizeScale,
/// int format, int quality)`
#[no_mangle]
#[allow(clippy::too_many_arguments)]
pub extern "system" fn Java_com_yalantis_ucrop_task_BitmapCropTask_cropCImg<'local>(
    mut env: JNIEnv<'local>,
    _this: JObject<'local>,
    input_path: JString<'local>,
    output_path: JString<'local>,
    left: jint,
    top: jint,
    width: jint,
    height: jint,
    angle: jfloat,
    resize_scale: jfloat,
    format: jint,
    quality: jint,
) -> jboolean {
    let result = panic::catch_unwind(AssertUnwindSafe(|| -> Result<CropOutcome, BridgeError> {
        let args = CropArgs {
            input_path: java_string(&mut env, &input_path)?,
            output_path: java_string(&mut env, &output_path)?,
            left,
            top,
            width,
            height,
            angle,
            resize_scale,
            format,
            quality,
        };
        debug!("cropCImg {:?}", args);
        Ok(crop_file(&args.into_request()?)?)
    }));

    match result {
        Ok(Ok(outcome)) => {
            debug!(
                "cropped to {}x{}, {} bytes",
                outcome.width, outcome.height, outcome.bytes_written
            );
            JNI_TRUE
        }
        Ok(Err(err)) => {
            error!("crop failed: {}", err);
            if let Some(class) = err.exception_class() {
                throw(&mut env, class, &err.to_string());
            }
            JNI_FALSE
        }
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            error!("crop panicked: {}", message);
            throw(&mut env, RUNTIME_EXCEPTION, &message);
            JNI_FALSE
        }
    }
}

/// Copy a Java string. The borrowed UTF chars are released when the
/// `JavaStr` guard drops, on success and error alike.
fn java_string(env: &mut JNIEnv, value: &JString) -> Result<String, BridgeError> {
    Ok(env.get_string(value)?.into())
}

fn throw(env: &mut JNIEnv, class: &str, message: &str) {
    if let Err(e) = env.throw_new(class, message) {
        error!("failed to throw {}: {}", class, e);
    }
}
