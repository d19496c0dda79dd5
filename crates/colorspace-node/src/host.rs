//! The host-facing side of a node.
//!
//! Everything a compositing host needs to drive a pixel operator goes
//! through [`PixelIop`]. Host bindings translate their own callback ABI into
//! calls on this trait; the node logic never sees host types.

use std::collections::BTreeMap;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::channel::ChannelSet;
use crate::error::ColorSpaceError;
use crate::knobs::KnobSpec;
use crate::row::Row;

/// Pixel bounding box `[x, r) x [y, t)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Format {
    pub x: i32,
    pub y: i32,
    pub r: i32,
    pub t: i32,
}

impl Format {
    pub fn new(x: i32, y: i32, r: i32, t: i32) -> Self {
        Self { x, y, r, t }
    }
}

/// What an operator knows about its image after validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageInfo {
    pub format: Format,
    pub channels: ChannelSet,
    pub metadata: BTreeMap<String, String>,
}

/// Result of validating an operator against its upstream info.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validated {
    /// Info handed downstream.
    pub info: ImageInfo,
    /// Channels the operator writes. Empty means the host must not call
    /// the pixel engine and should pass upstream rows through.
    pub out_channels: ChannelSet,
}

/// Accumulates an operator's identity for the host's cache.
#[derive(Debug, Default)]
pub struct OpHash {
    hasher: DefaultHasher,
    parts: usize,
}

impl OpHash {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, value: impl Hash) {
        value.hash(&mut self.hasher);
        self.parts += 1;
    }

    /// Number of values appended so far.
    pub fn parts(&self) -> usize {
        self.parts
    }

    pub fn value(&self) -> u64 {
        self.hasher.finish()
    }
}

/// Controls of the host's generic wrapper that an operator opts out of.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WrapperFlags {
    pub mix: bool,
    pub mask: bool,
    pub channels: bool,
    pub unpremult: bool,
}

/// Registration record a host uses to discover and build an operator.
pub struct OpDescription<L> {
    pub name: &'static str,
    pub help: &'static str,
    pub wrapper: WrapperFlags,
    pub build: fn(L) -> Box<dyn PixelIop>,
}

impl<L> std::fmt::Debug for OpDescription<L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpDescription")
            .field("name", &self.name)
            .field("wrapper", &self.wrapper)
            .finish_non_exhaustive()
    }
}

/// Callbacks a host invokes on a per-pixel operator.
///
/// `validate` runs single-threaded before any `pixel_engine` call of the
/// same cycle. `pixel_engine` may then be called concurrently from worker
/// threads on disjoint rows.
pub trait PixelIop: Send + Sync {
    fn class(&self) -> &'static str;

    fn node_help(&self) -> &'static str;

    fn knobs(&self) -> Vec<KnobSpec>;

    /// Adds everything besides knob values that affects the output.
    fn append(&self, hash: &mut OpHash) -> Result<(), ColorSpaceError>;

    fn validate(&mut self, input: &ImageInfo, for_real: bool)
    -> Result<Validated, ColorSpaceError>;

    /// Widens `mask` to the input channels needed to produce it.
    fn in_channels(&self, mask: &mut ChannelSet);

    fn pixel_engine(
        &self,
        input: &Row,
        y: i32,
        x: i32,
        r: i32,
        channels: ChannelSet,
        out: &mut Row,
    ) -> Result<RowOutcome, ColorSpaceError>;
}

/// Accounting of one `pixel_engine` call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowOutcome {
    /// Channels written through the processor.
    pub transformed: ChannelSet,
    /// Channels copied unchanged.
    pub passed_through: ChannelSet,
    /// Number of RGB triplets handed to the processor.
    pub groups: usize,
    /// Triplets whose transform failed. Other triplets are still processed.
    pub failures: Vec<ColorSpaceError>,
}

impl RowOutcome {
    pub fn is_ok(&self) -> bool {
        self.failures.is_empty()
    }
}
