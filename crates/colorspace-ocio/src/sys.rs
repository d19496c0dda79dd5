use std::ffi::{c_char, c_int, c_long};

#[repr(C)]
pub struct OcioConfig {
    _private: [u8; 0],
}

#[repr(C)]
pub struct OcioContext {
    _private: [u8; 0],
}

#[repr(C)]
pub struct OcioProcessor {
    _private: [u8; 0],
}

unsafe extern "C" {
    pub fn ocio_get_last_error() -> *const c_char;

    pub fn ocio_config_get_current() -> *mut OcioConfig;
    pub fn ocio_config_set_current(config: *const OcioConfig) -> c_int;
    pub fn ocio_config_create_from_env() -> *mut OcioConfig;
    pub fn ocio_config_create_from_file(path: *const c_char) -> *mut OcioConfig;
    pub fn ocio_config_create_builtin(uri: *const c_char) -> *mut OcioConfig;
    pub fn ocio_config_destroy(config: *mut OcioConfig);

    pub fn ocio_config_get_num_color_spaces(config: *const OcioConfig) -> c_int;
    pub fn ocio_config_get_color_space_name(
        config: *const OcioConfig,
        index: c_int,
    ) -> *const c_char;
    pub fn ocio_config_get_role_color_space(
        config: *const OcioConfig,
        role: *const c_char,
    ) -> *const c_char;
    pub fn ocio_config_validate(config: *const OcioConfig) -> c_int;
    pub fn ocio_config_get_current_context(config: *const OcioConfig) -> *mut OcioContext;
    pub fn ocio_config_get_cache_id(
        config: *const OcioConfig,
        context: *const OcioContext,
    ) -> *const c_char;
    pub fn ocio_config_get_processor(
        config: *const OcioConfig,
        context: *const OcioContext,
        src: *const c_char,
        dst: *const c_char,
    ) -> *mut OcioProcessor;

    pub fn ocio_context_create_editable_copy(context: *const OcioContext) -> *mut OcioContext;
    pub fn ocio_context_set_string_var(
        context: *mut OcioContext,
        name: *const c_char,
        value: *const c_char,
    ) -> c_int;
    pub fn ocio_context_get_string_var(
        context: *const OcioContext,
        name: *const c_char,
    ) -> *const c_char;
    pub fn ocio_context_destroy(context: *mut OcioContext);

    pub fn ocio_processor_is_noop(processor: *const OcioProcessor) -> c_int;
    pub fn ocio_processor_apply_planar(
        processor: *const OcioProcessor,
        red: *mut f32,
        green: *mut f32,
        blue: *mut f32,
        width: c_long,
        height: c_long,
    ) -> c_int;
    pub fn ocio_processor_destroy(processor: *mut OcioProcessor);
}
