//! Per-node context overrides.

use serde::{Deserialize, Serialize};

use crate::library::{ColorContext, LibraryError};

/// Number of key/value slots a node exposes.
pub const CONTEXT_SLOTS: usize = 4;

/// One key/value slot. An empty key leaves the slot unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextPair {
    pub key: String,
    pub value: String,
}

impl ContextPair {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn is_set(&self) -> bool {
        !self.key.is_empty()
    }
}

/// The four context slots of a node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextOverrides {
    pairs: [ContextPair; CONTEXT_SLOTS],
}

impl ContextOverrides {
    pub fn pairs(&self) -> &[ContextPair; CONTEXT_SLOTS] {
        &self.pairs
    }

    pub fn get(&self, slot: usize) -> Option<&ContextPair> {
        self.pairs.get(slot)
    }

    pub fn get_mut(&mut self, slot: usize) -> Option<&mut ContextPair> {
        self.pairs.get_mut(slot)
    }

    pub fn is_empty(&self) -> bool {
        !self.pairs.iter().any(ContextPair::is_set)
    }

    /// Applies the set slots on top of `base`.
    ///
    /// When no slot is set, `base` is returned as-is without a copy. Slots
    /// are applied in order, so a key repeated in a later slot wins.
    pub fn apply<C: ColorContext>(&self, base: C) -> Result<C, LibraryError> {
        if self.is_empty() {
            return Ok(base);
        }

        let mut context = base.editable_copy()?;
        for pair in self.pairs.iter().filter(|p| p.is_set()) {
            context.set_string_var(&pair.key, &pair.value)?;
        }
        Ok(context)
    }
}
