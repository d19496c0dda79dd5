//! Binds the node's library interface to OpenColorIO.

use colorspace_node::{ColorConfig, ColorContext, ColorLibrary, ColorProcessor, LibraryError};

use crate::config::OcioConfig;
use crate::context::OcioContext;
use crate::processor::OcioProcessor;

/// OpenColorIO's process-wide current configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct OcioLibrary;

impl ColorLibrary for OcioLibrary {
    type Config = OcioConfig;

    fn current_config(&self) -> Result<OcioConfig, LibraryError> {
        Ok(OcioConfig::current()?)
    }
}

impl ColorConfig for OcioConfig {
    type Context = OcioContext;
    type Processor = OcioProcessor;

    fn color_space_count(&self) -> usize {
        self.num_color_spaces()
    }

    fn color_space_name(&self, index: usize) -> Option<String> {
        OcioConfig::color_space_name(self, index)
    }

    fn role_color_space(&self, role: &str) -> Option<String> {
        self.role(role)
    }

    fn current_context(&self) -> Result<OcioContext, LibraryError> {
        Ok(OcioConfig::current_context(self)?)
    }

    fn cache_id(&self, context: &OcioContext) -> Result<String, LibraryError> {
        Ok(OcioConfig::cache_id(self, context)?)
    }

    fn sanity_check(&self) -> Result<(), LibraryError> {
        Ok(self.validate()?)
    }

    fn processor(
        &self,
        context: &OcioContext,
        src: &str,
        dst: &str,
    ) -> Result<OcioProcessor, LibraryError> {
        Ok(OcioConfig::processor(self, context, src, dst)?)
    }
}

impl ColorContext for OcioContext {
    fn editable_copy(&self) -> Result<Self, LibraryError> {
        Ok(OcioContext::editable_copy(self)?)
    }

    fn set_string_var(&mut self, name: &str, value: &str) -> Result<(), LibraryError> {
        Ok(OcioContext::set_string_var(self, name, value)?)
    }

    fn string_var(&self, name: &str) -> Option<String> {
        OcioContext::string_var(self, name)
    }
}

impl ColorProcessor for OcioProcessor {
    fn is_noop(&self) -> bool {
        OcioProcessor::is_noop(self)
    }

    fn apply_planar(
        &self,
        red: &mut [f32],
        green: &mut [f32],
        blue: &mut [f32],
    ) -> Result<(), LibraryError> {
        Ok(OcioProcessor::apply_planar(self, red, green, blue)?)
    }
}
