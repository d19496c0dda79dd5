//! Minimal model of the host's channel algebra.
//!
//! Channels are grouped into layers of up to four. The first three channels
//! of a layer are its colour channels (red, green, blue); the fourth is
//! whatever the layer stores next (alpha for `rgba`). A [`ChannelSet`] is a
//! 64-bit mask over every addressable channel.

use std::fmt;
use std::ops::{Add, AddAssign, BitAnd, BitOr, Sub};

use serde::{Deserialize, Serialize};

/// Number of channels per layer.
pub const CHANNELS_PER_LAYER: u8 = 4;
/// Number of addressable layers.
pub const MAX_LAYERS: u8 = 16;

/// A single image channel, identified by its layer and its position in it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Channel(u8);

impl Channel {
    pub const RED: Self = Self(0);
    pub const GREEN: Self = Self(1);
    pub const BLUE: Self = Self(2);
    pub const ALPHA: Self = Self(3);

    /// Channel `index` of `layer`. Returns `None` outside the addressable range.
    pub const fn new(layer: u8, index: u8) -> Option<Self> {
        if layer >= MAX_LAYERS || index >= CHANNELS_PER_LAYER {
            return None;
        }
        Some(Self(layer * CHANNELS_PER_LAYER + index))
    }

    pub(crate) const fn from_id(id: u8) -> Self {
        Self(id)
    }

    /// Dense identifier in `0..64`.
    pub const fn id(self) -> u8 {
        self.0
    }

    pub const fn layer(self) -> u8 {
        self.0 / CHANNELS_PER_LAYER
    }

    /// Position inside the layer: 0, 1 and 2 are the colour channels.
    pub const fn colour_index(self) -> u8 {
        self.0 % CHANNELS_PER_LAYER
    }

    pub const fn is_colour(self) -> bool {
        self.colour_index() < 3
    }

    /// The channel at `index` in the same layer.
    pub const fn brother(self, index: u8) -> Self {
        Self(self.layer() * CHANNELS_PER_LAYER + (index % CHANNELS_PER_LAYER))
    }

    const fn bit(self) -> u64 {
        1 << self.0
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let suffix = ["red", "green", "blue", "alpha"][self.colour_index() as usize];
        match self.layer() {
            0 => write!(f, "rgba.{suffix}"),
            layer => write!(f, "layer{layer}.{suffix}"),
        }
    }
}

/// A set of channels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChannelSet(u64);

impl ChannelSet {
    pub const NONE: Self = Self(0);
    pub const RGB: Self = Self(0b0111);
    pub const RGBA: Self = Self(0b1111);
    pub const ALL: Self = Self(u64::MAX);

    /// The red, green and blue channels of `layer`.
    pub const fn layer_rgb(layer: u8) -> Self {
        if layer >= MAX_LAYERS {
            return Self::NONE;
        }
        Self(0b0111 << (layer * CHANNELS_PER_LAYER))
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn contains(self, channel: Channel) -> bool {
        self.0 & channel.bit() != 0
    }

    pub fn insert(&mut self, channel: Channel) {
        self.0 |= channel.bit();
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Adds the first `count` channels of `channel`'s layer.
    pub fn add_brothers(&mut self, channel: Channel, count: u8) {
        for index in 0..count.min(CHANNELS_PER_LAYER) {
            self.insert(channel.brother(index));
        }
    }

    /// Channels in ascending id order.
    pub fn iter(self) -> impl Iterator<Item = Channel> {
        let bits = self.0;
        (0..64u8)
            .filter(move |id| bits & (1 << id) != 0)
            .map(Channel::from_id)
    }
}

impl From<Channel> for ChannelSet {
    fn from(channel: Channel) -> Self {
        Self(channel.bit())
    }
}

impl FromIterator<Channel> for ChannelSet {
    fn from_iter<I: IntoIterator<Item = Channel>>(iter: I) -> Self {
        let mut set = Self::NONE;
        for channel in iter {
            set.insert(channel);
        }
        set
    }
}

impl BitOr for ChannelSet {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitAnd for ChannelSet {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl Sub for ChannelSet {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0 & !rhs.0)
    }
}

impl Add<Channel> for ChannelSet {
    type Output = Self;

    fn add(mut self, rhs: Channel) -> Self {
        self.insert(rhs);
        self
    }
}

impl AddAssign<Channel> for ChannelSet {
    fn add_assign(&mut self, rhs: Channel) {
        self.insert(rhs);
    }
}

impl AddAssign for ChannelSet {
    fn add_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl fmt::Display for ChannelSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self.iter().map(|c| c.to_string()).collect();
        write!(f, "{{{}}}", names.join(", "))
    }
}
