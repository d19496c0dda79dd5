//! Editable state of a node instance.
//!
//! `ColorSpaceParams` is what a host persists and what its knobs edit.
//! Selector indices are stored unchecked; validation rejects indices that
//! fall outside the catalog.

use serde::{Deserialize, Serialize};

use crate::channel::ChannelSet;
use crate::context::{ContextOverrides, ContextPair};
use crate::error::ColorSpaceError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorSpaceParams {
    input_index: i32,
    output_index: i32,
    #[serde(default)]
    context: ContextOverrides,
    #[serde(default = "default_layer")]
    layer: ChannelSet,
}

fn default_layer() -> ChannelSet {
    ChannelSet::RGB
}

impl Default for ColorSpaceParams {
    fn default() -> Self {
        Self::with_default_index(0)
    }
}

impl ColorSpaceParams {
    /// Both selectors on `index`, no context overrides, `rgb` layer.
    pub fn with_default_index(index: usize) -> Self {
        let index = i32::try_from(index).unwrap_or(i32::MAX);
        Self {
            input_index: index,
            output_index: index,
            context: ContextOverrides::default(),
            layer: default_layer(),
        }
    }

    pub fn input_index(&self) -> i32 {
        self.input_index
    }

    pub fn set_input_index(&mut self, index: i32) {
        self.input_index = index;
    }

    pub fn output_index(&self) -> i32 {
        self.output_index
    }

    pub fn set_output_index(&mut self, index: i32) {
        self.output_index = index;
    }

    pub fn context(&self) -> &ContextOverrides {
        &self.context
    }

    /// Sets slot `slot` (0-based) of the context overrides.
    pub fn set_context_pair(
        &mut self,
        slot: usize,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<(), ColorSpaceError> {
        let pair = self
            .context
            .get_mut(slot)
            .ok_or(ColorSpaceError::ContextSlot(slot))?;
        *pair = ContextPair::new(key, value);
        Ok(())
    }

    pub fn clear_context(&mut self) {
        self.context = ContextOverrides::default();
    }

    /// Channels eligible for transformation.
    pub fn layer(&self) -> ChannelSet {
        self.layer
    }

    pub fn set_layer(&mut self, layer: ChannelSet) {
        self.layer = layer;
    }
}
