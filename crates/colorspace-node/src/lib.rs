//! OCIO ColorSpace node: a host-agnostic pixel operator.
//!
//! Converts the RGB channels of a selected layer between two named colour
//! spaces of a colour-management library. The library is reached only
//! through the traits in [`library`]; the compositing host only through
//! [`host::PixelIop`]. Both can be replaced without touching the node.

pub mod catalog;
pub mod channel;
pub mod context;
pub mod error;
pub mod host;
pub mod knobs;
pub mod library;
pub mod op;
pub mod params;
pub mod row;

// Re-exports for convenience.
pub use catalog::ColorSpaceCatalog;
pub use channel::{Channel, ChannelSet};
pub use context::{ContextOverrides, ContextPair};
pub use error::{ColorSpaceError, Selector};
pub use host::{ImageInfo, OpDescription, OpHash, PixelIop, RowOutcome, Validated};
pub use library::{ColorConfig, ColorContext, ColorLibrary, ColorProcessor, LibraryError};
pub use op::{ColorSpaceOp, description};
pub use params::ColorSpaceParams;
pub use row::Row;
