//! Colour-space discovery.

use std::panic::{self, AssertUnwindSafe};

use crate::error::ColorSpaceError;
use crate::library::{ColorConfig, ColorLibrary, ROLE_SCENE_LINEAR};

/// Ordered colour-space names of the active configuration, captured once
/// when a node is constructed. Both selectors index into this list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColorSpaceCatalog {
    names: Vec<String>,
    default_index: usize,
}

impl ColorSpaceCatalog {
    /// Builds a catalog from a list of names. The default selection is the
    /// position of `default_name`, or 0 when it is absent.
    pub fn new(names: Vec<String>, default_name: Option<&str>) -> Self {
        let default_index = default_name
            .and_then(|wanted| names.iter().position(|name| name == wanted))
            .unwrap_or(0);
        Self {
            names,
            default_index,
        }
    }

    /// Enumerates the colour spaces of `library`'s active configuration.
    ///
    /// Library errors become [`ColorSpaceError::Configuration`]; a panic
    /// escaping the library becomes [`ColorSpaceError::Unknown`].
    pub fn discover<L: ColorLibrary>(library: &L) -> Result<Self, ColorSpaceError> {
        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            let config = library
                .current_config()
                .map_err(ColorSpaceError::configuration)?;
            Ok(Self::from_config(&config))
        }));

        match result {
            Ok(catalog) => catalog,
            Err(payload) => {
                let detail = payload
                    .downcast_ref::<&str>()
                    .map(|s| s.to_string())
                    .or_else(|| payload.downcast_ref::<String>().cloned())
                    .unwrap_or_default();
                Err(ColorSpaceError::Unknown(format!(
                    "Unknown exception during OCIO setup. {detail}"
                )))
            }
        }
    }

    fn from_config<C: ColorConfig>(config: &C) -> Self {
        let default_name = config.role_color_space(ROLE_SCENE_LINEAR);
        if default_name.is_none() {
            tracing::warn!(
                role = ROLE_SCENE_LINEAR,
                "role not defined; defaulting to first colour space"
            );
        }

        let names = (0..config.color_space_count())
            .filter_map(|i| config.color_space_name(i))
            .collect();
        Self::new(names, default_name.as_deref())
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Index selected for both selectors on a new node.
    pub fn default_index(&self) -> usize {
        self.default_index
    }

    /// Name at a selector index. Negative and out-of-range indices yield `None`.
    pub fn name(&self, index: i32) -> Option<&str> {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.names.get(i))
            .map(String::as_str)
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }
}
