use std::fmt;

use crate::channel::ChannelSet;
use crate::library::LibraryError;

/// Which colour-space selector a range error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selector {
    Input,
    Output,
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Input => write!(f, "Input"),
            Self::Output => write!(f, "Output"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ColorSpaceError {
    #[error("{0}")]
    Configuration(String),
    #[error("{selector} colorspace index ({index}) out of range.")]
    Range { selector: Selector, index: i32 },
    #[error("{0}")]
    TransformResolution(String),
    #[error("transform failed for {channels}: {message}")]
    TransformApply {
        channels: ChannelSet,
        message: String,
    },
    #[error("{0}")]
    Unknown(String),
    #[error("node has no resolved transform; validate it first")]
    NotValidated,
    #[error("span [{x}, {r}) lies outside the input or output row")]
    SpanOutsideRow { x: i32, r: i32 },
    #[error("colorspace \"{0}\" is not in the catalog")]
    UnknownColorSpace(String),
    #[error("context slot {0} out of range")]
    ContextSlot(usize),
}

impl ColorSpaceError {
    pub(crate) fn no_color_spaces() -> Self {
        Self::Configuration("No colorspaces available for input and/or output.".to_string())
    }

    pub(crate) fn configuration(err: LibraryError) -> Self {
        Self::Configuration(err.message().to_string())
    }

    pub(crate) fn resolution(err: LibraryError) -> Self {
        Self::TransformResolution(err.message().to_string())
    }
}
