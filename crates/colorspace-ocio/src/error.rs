use std::ffi::{CStr, NulError};

use colorspace_node::LibraryError;

use crate::sys;

#[derive(Debug, thiserror::Error)]
pub enum OcioError {
    #[error("string contains interior NUL: {0}")]
    Nul(#[from] NulError),
    #[error("OCIO error: {0}")]
    Ocio(String),
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
}

impl From<OcioError> for LibraryError {
    fn from(err: OcioError) -> Self {
        match err {
            // Keep the library's own wording; the node surfaces it verbatim.
            OcioError::Ocio(message) => LibraryError::new(message),
            other => LibraryError::new(other),
        }
    }
}

pub(crate) fn last_error_message() -> String {
    // SAFETY: FFI returns either null or a valid NUL-terminated string.
    unsafe {
        let ptr = sys::ocio_get_last_error();
        if ptr.is_null() {
            return "unknown OCIO error".to_string();
        }
        CStr::from_ptr(ptr).to_string_lossy().into_owned()
    }
}

pub(crate) fn ffi_error() -> OcioError {
    OcioError::Ocio(last_error_message())
}

pub(crate) fn check_status(status: std::ffi::c_int) -> Result<(), OcioError> {
    if status == 0 { Ok(()) } else { Err(ffi_error()) }
}
