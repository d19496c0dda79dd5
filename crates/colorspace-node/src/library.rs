//! The narrow interface the node needs from a colour-management library.
//!
//! All colour science lives behind these traits. The node never converts
//! pixel values itself; it only enumerates colour spaces, resolves a
//! processor and hands row buffers to it.

use std::fmt;

/// Name of the role whose colour space is the default selection.
pub const ROLE_SCENE_LINEAR: &str = "scene_linear";

/// An error reported by the colour-management library.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct LibraryError {
    message: String,
}

impl LibraryError {
    pub fn new(message: impl fmt::Display) -> Self {
        Self {
            message: message.to_string(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Entry point into a colour-management library.
pub trait ColorLibrary: Send + Sync {
    type Config: ColorConfig;

    /// The active configuration. Queried again on every hash and validation
    /// so that configuration changes are picked up.
    fn current_config(&self) -> Result<Self::Config, LibraryError>;
}

/// A loaded library configuration.
pub trait ColorConfig {
    type Context: ColorContext;
    type Processor: ColorProcessor + 'static;

    fn color_space_count(&self) -> usize;

    fn color_space_name(&self, index: usize) -> Option<String>;

    /// Name of the colour space bound to `role`, if the role is defined.
    fn role_color_space(&self, role: &str) -> Option<String>;

    fn current_context(&self) -> Result<Self::Context, LibraryError>;

    /// Fingerprint of the configuration as seen through `context`.
    fn cache_id(&self, context: &Self::Context) -> Result<String, LibraryError>;

    fn sanity_check(&self) -> Result<(), LibraryError>;

    fn processor(
        &self,
        context: &Self::Context,
        src: &str,
        dst: &str,
    ) -> Result<Self::Processor, LibraryError>;
}

/// Named string variables that steer transform resolution.
pub trait ColorContext: Sized {
    /// A detached copy that may be edited without affecting `self`.
    fn editable_copy(&self) -> Result<Self, LibraryError>;

    fn set_string_var(&mut self, name: &str, value: &str) -> Result<(), LibraryError>;

    fn string_var(&self, name: &str) -> Option<String>;
}

/// A resolved transform between two colour spaces.
///
/// Shared read-only across the host's worker threads once resolved.
pub trait ColorProcessor: Send + Sync {
    /// `true` when the transform is the identity.
    fn is_noop(&self) -> bool;

    /// Transforms three equally long planes in place, treating them as a
    /// single packed RGB strip one pixel high.
    fn apply_planar(
        &self,
        red: &mut [f32],
        green: &mut [f32],
        blue: &mut [f32],
    ) -> Result<(), LibraryError>;
}
