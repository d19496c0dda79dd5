//! OpenColorIO binding for the colour-space node.
//!
//! This crate provides a minimal safe wrapper over a thin C ABI layer built on
//! top of OpenColorIO's C++ API, and implements the node's library traits on
//! it. [`OcioLibrary`] follows the process-wide current configuration.
#![allow(unsafe_code)]
// FFI wrappers necessarily use unsafe externs and raw pointers.

mod config;
mod context;
mod error;
mod library;
mod processor;
mod sys;

pub use config::OcioConfig;
pub use context::OcioContext;
pub use error::OcioError;
pub use library::OcioLibrary;
pub use processor::OcioProcessor;

/// A colour-space node backed by OpenColorIO.
pub type OcioColorSpaceOp = colorspace_node::ColorSpaceOp<OcioLibrary>;
