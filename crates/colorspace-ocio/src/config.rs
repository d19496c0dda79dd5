use std::ffi::{CStr, CString, c_int};
use std::path::Path;
use std::ptr::NonNull;

use crate::context::OcioContext;
use crate::error::{OcioError, check_status, ffi_error};
use crate::processor::OcioProcessor;
use crate::sys;

/// A shared handle to an OpenColorIO configuration.
pub struct OcioConfig {
    pub(crate) ptr: NonNull<sys::OcioConfig>,
}

impl OcioConfig {
    /// The process-wide current configuration. Loaded by the library from
    /// the `OCIO` environment variable on first use.
    pub fn current() -> Result<Self, OcioError> {
        // SAFETY: FFI constructor returns owned opaque pointer or null on error.
        let ptr = unsafe { sys::ocio_config_get_current() };
        NonNull::new(ptr)
            .map(|ptr| Self { ptr })
            .ok_or_else(ffi_error)
    }

    pub fn from_env() -> Result<Self, OcioError> {
        // SAFETY: FFI constructor returns owned opaque pointer or null on error.
        let ptr = unsafe { sys::ocio_config_create_from_env() };
        NonNull::new(ptr)
            .map(|ptr| Self { ptr })
            .ok_or_else(ffi_error)
    }

    pub fn from_file(path: &Path) -> Result<Self, OcioError> {
        tracing::debug!("loading OCIO config from {}", path.display());
        let path = CString::new(path.to_string_lossy().as_bytes())?;
        // SAFETY: FFI constructor returns owned opaque pointer or null on error.
        let ptr = unsafe { sys::ocio_config_create_from_file(path.as_ptr()) };
        NonNull::new(ptr)
            .map(|ptr| Self { ptr })
            .ok_or_else(ffi_error)
    }

    pub fn builtin(uri: &str) -> Result<Self, OcioError> {
        tracing::debug!("loading builtin OCIO config {uri}");
        let uri = CString::new(uri)?;
        // SAFETY: FFI constructor returns owned opaque pointer or null on error.
        let ptr = unsafe { sys::ocio_config_create_builtin(uri.as_ptr()) };
        NonNull::new(ptr)
            .map(|ptr| Self { ptr })
            .ok_or_else(ffi_error)
    }

    /// Makes this configuration the process-wide current one.
    pub fn set_current(&self) -> Result<(), OcioError> {
        // SAFETY: `self.ptr` is valid for the life of `self`.
        check_status(unsafe { sys::ocio_config_set_current(self.ptr.as_ptr()) })?;
        tracing::info!(
            color_spaces = self.num_color_spaces(),
            "installed current OCIO config"
        );
        Ok(())
    }

    pub fn num_color_spaces(&self) -> usize {
        // SAFETY: `self.ptr` is valid for the life of `self`.
        let count = unsafe { sys::ocio_config_get_num_color_spaces(self.ptr.as_ptr()) };
        usize::try_from(count).unwrap_or(0)
    }

    pub fn color_space_name(&self, index: usize) -> Option<String> {
        let index = c_int::try_from(index).ok()?;
        // SAFETY: `self` alive; the shim range-checks the index.
        let ptr = unsafe { sys::ocio_config_get_color_space_name(self.ptr.as_ptr(), index) };
        cstr_to_string(ptr)
    }

    pub fn color_space_names(&self) -> Vec<String> {
        (0..self.num_color_spaces())
            .filter_map(|i| self.color_space_name(i))
            .collect()
    }

    /// Colour space bound to `role`.
    pub fn role(&self, role: &str) -> Option<String> {
        let role = CString::new(role).ok()?;
        // SAFETY: pointers are valid while called.
        let ptr =
            unsafe { sys::ocio_config_get_role_color_space(self.ptr.as_ptr(), role.as_ptr()) };
        cstr_to_string(ptr)
    }

    /// Runs the library's consistency checks on the configuration.
    pub fn validate(&self) -> Result<(), OcioError> {
        // SAFETY: `self.ptr` is valid for the life of `self`.
        check_status(unsafe { sys::ocio_config_validate(self.ptr.as_ptr()) })
    }

    pub fn current_context(&self) -> Result<OcioContext, OcioError> {
        // SAFETY: FFI constructor returns owned opaque pointer or null on error.
        let ptr = unsafe { sys::ocio_config_get_current_context(self.ptr.as_ptr()) };
        OcioContext::from_raw(ptr)
    }

    pub fn cache_id(&self, context: &OcioContext) -> Result<String, OcioError> {
        // SAFETY: both handles are alive for the duration of the call.
        let ptr = unsafe { sys::ocio_config_get_cache_id(self.ptr.as_ptr(), context.as_ptr()) };
        if ptr.is_null() {
            return Err(ffi_error());
        }
        // SAFETY: non-null pointers from the shim are NUL-terminated.
        Ok(unsafe { CStr::from_ptr(ptr) }.to_string_lossy().into_owned())
    }

    pub fn processor(
        &self,
        context: &OcioContext,
        src: &str,
        dst: &str,
    ) -> Result<OcioProcessor, OcioError> {
        let src = CString::new(src)?;
        let dst = CString::new(dst)?;

        // SAFETY: pointers are valid while called.
        let ptr = unsafe {
            sys::ocio_config_get_processor(
                self.ptr.as_ptr(),
                context.as_ptr(),
                src.as_ptr(),
                dst.as_ptr(),
            )
        };

        OcioProcessor::from_raw(ptr)
    }
}

impl Drop for OcioConfig {
    fn drop(&mut self) {
        // SAFETY: pointer came from FFI constructor and is owned by this wrapper.
        unsafe { sys::ocio_config_destroy(self.ptr.as_ptr()) };
    }
}

pub(crate) fn cstr_to_string(ptr: *const std::ffi::c_char) -> Option<String> {
    if ptr.is_null() {
        return None;
    }
    // SAFETY: FFI contract returns valid NUL-terminated strings.
    let s = unsafe { CStr::from_ptr(ptr) }.to_string_lossy();
    if s.is_empty() {
        None
    } else {
        Some(s.into_owned())
    }
}
