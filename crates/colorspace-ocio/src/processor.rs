use std::ffi::c_long;
use std::ptr::NonNull;

use crate::error::{OcioError, check_status, ffi_error};
use crate::sys;

/// A resolved transform together with its default CPU processor.
pub struct OcioProcessor {
    ptr: NonNull<sys::OcioProcessor>,
}

// SAFETY: the handle only holds const OCIO processors, which the library
// documents as safe to apply from multiple threads at once. No method
// mutates the wrapped objects.
unsafe impl Send for OcioProcessor {}
// SAFETY: see `Send` above.
unsafe impl Sync for OcioProcessor {}

impl OcioProcessor {
    pub(crate) fn from_raw(raw: *mut sys::OcioProcessor) -> Result<Self, OcioError> {
        NonNull::new(raw)
            .map(|ptr| Self { ptr })
            .ok_or_else(ffi_error)
    }

    pub fn is_noop(&self) -> bool {
        // SAFETY: `self.ptr` is valid while `self` is alive.
        unsafe { sys::ocio_processor_is_noop(self.ptr.as_ptr()) != 0 }
    }

    /// Applies the transform in place to three planes of one scanline.
    pub fn apply_planar(
        &self,
        red: &mut [f32],
        green: &mut [f32],
        blue: &mut [f32],
    ) -> Result<(), OcioError> {
        if red.len() != green.len() || green.len() != blue.len() {
            return Err(OcioError::InvalidArgument("planes must have equal length"));
        }
        if red.is_empty() {
            return Ok(());
        }
        let width = c_long::try_from(red.len())
            .map_err(|_| OcioError::InvalidArgument("plane too wide"))?;

        // SAFETY: three distinct, writable f32 planes of `width` samples each.
        check_status(unsafe {
            sys::ocio_processor_apply_planar(
                self.ptr.as_ptr(),
                red.as_mut_ptr(),
                green.as_mut_ptr(),
                blue.as_mut_ptr(),
                width,
                1,
            )
        })
    }
}

impl Drop for OcioProcessor {
    fn drop(&mut self) {
        // SAFETY: pointer came from FFI constructor and is owned by this wrapper.
        unsafe { sys::ocio_processor_destroy(self.ptr.as_ptr()) };
    }
}
