use std::ffi::CString;
use std::ptr::NonNull;

use crate::config::cstr_to_string;
use crate::error::{OcioError, check_status, ffi_error};
use crate::sys;

/// String variables used when resolving transforms.
///
/// Contexts taken from a config are read-only; edit an
/// [`editable_copy`](Self::editable_copy).
pub struct OcioContext {
    ptr: NonNull<sys::OcioContext>,
}

impl OcioContext {
    pub(crate) fn from_raw(raw: *mut sys::OcioContext) -> Result<Self, OcioError> {
        NonNull::new(raw)
            .map(|ptr| Self { ptr })
            .ok_or_else(ffi_error)
    }

    pub(crate) fn as_ptr(&self) -> *mut sys::OcioContext {
        self.ptr.as_ptr()
    }

    pub fn editable_copy(&self) -> Result<Self, OcioError> {
        // SAFETY: `self.ptr` is valid while `self` is alive.
        let ptr = unsafe { sys::ocio_context_create_editable_copy(self.ptr.as_ptr()) };
        Self::from_raw(ptr)
    }

    pub fn set_string_var(&mut self, name: &str, value: &str) -> Result<(), OcioError> {
        let name = CString::new(name)?;
        let value = CString::new(value)?;
        // SAFETY: pointers are valid while called; `&mut self` excludes aliasing edits.
        check_status(unsafe {
            sys::ocio_context_set_string_var(self.ptr.as_ptr(), name.as_ptr(), value.as_ptr())
        })
    }

    /// Value of `name`, or `None` when unset or empty.
    pub fn string_var(&self, name: &str) -> Option<String> {
        let name = CString::new(name).ok()?;
        // SAFETY: pointers are valid while called.
        let ptr = unsafe { sys::ocio_context_get_string_var(self.ptr.as_ptr(), name.as_ptr()) };
        cstr_to_string(ptr)
    }
}

impl Drop for OcioContext {
    fn drop(&mut self) {
        // SAFETY: pointer came from FFI constructor and is owned by this wrapper.
        unsafe { sys::ocio_context_destroy(self.ptr.as_ptr()) };
    }
}
