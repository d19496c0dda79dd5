//! Scanline buffers handed to the pixel engine.

use crate::channel::{Channel, ChannelSet};

const SLOTS: usize = 64;

/// One scanline's worth of planar float data over the span `[x, r)`.
///
/// Buffers are indexed by absolute x coordinate. Channels without a buffer
/// read as absent; [`Row::writable`] allocates a zeroed buffer on demand.
#[derive(Debug, Clone)]
pub struct Row {
    x: i32,
    r: i32,
    buffers: Vec<Option<Vec<f32>>>,
}

impl Row {
    pub fn new(x: i32, r: i32) -> Self {
        Self {
            x,
            r: r.max(x),
            buffers: vec![None; SLOTS],
        }
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn r(&self) -> i32 {
        self.r
    }

    pub fn width(&self) -> usize {
        self.r.abs_diff(self.x) as usize
    }

    /// `true` when `[x, r)` is a well-formed span inside the row.
    pub fn covers(&self, x: i32, r: i32) -> bool {
        self.range(x, r).is_some()
    }

    /// Channels that currently hold a buffer.
    pub fn channels(&self) -> ChannelSet {
        self.buffers
            .iter()
            .enumerate()
            .filter(|(_, buffer)| buffer.is_some())
            .map(|(id, _)| Channel::from_id(id as u8))
            .collect()
    }

    /// Stores `values` as the full span of `channel`, truncated or
    /// zero-padded to the row width.
    pub fn set(&mut self, channel: Channel, values: &[f32]) {
        let mut buffer = vec![0.0; self.width()];
        let n = values.len().min(buffer.len());
        buffer[..n].copy_from_slice(&values[..n]);
        self.buffers[channel.id() as usize] = Some(buffer);
    }

    /// The full span of `channel`, if present.
    pub fn get(&self, channel: Channel) -> Option<&[f32]> {
        self.buffers[channel.id() as usize].as_deref()
    }

    /// `channel` restricted to `[x, r)`, if present and inside the row.
    pub fn span(&self, channel: Channel, x: i32, r: i32) -> Option<&[f32]> {
        let range = self.range(x, r)?;
        self.get(channel).map(|buffer| &buffer[range])
    }

    /// Writable span of `channel`, allocating a zeroed buffer if needed.
    pub fn writable(&mut self, channel: Channel) -> &mut [f32] {
        let width = self.width();
        self.buffers[channel.id() as usize].get_or_insert_with(|| vec![0.0; width])
    }

    /// Three distinct writable buffers at once, each restricted to `[x, r)`.
    ///
    /// Returns `None` when the channels are not distinct or the span lies
    /// outside the row.
    pub fn writable_triplet(
        &mut self,
        channels: [Channel; 3],
        x: i32,
        r: i32,
    ) -> Option<[&mut [f32]; 3]> {
        let [a, b, c] = channels.map(|ch| ch.id() as usize);
        if a == b || b == c || a == c {
            return None;
        }
        let range = self.range(x, r)?;
        for id in [a, b, c] {
            self.writable(Channel::from_id(id as u8));
        }

        let mut slots: [Option<&mut [f32]>; 3] = [None, None, None];
        for (id, buffer) in self.buffers.iter_mut().enumerate() {
            let position = [a, b, c].iter().position(|&wanted| wanted == id);
            if let (Some(position), Some(buffer)) = (position, buffer.as_mut()) {
                slots[position] = Some(&mut buffer[range.clone()]);
            }
        }
        let [ra, rb, rc] = slots;
        Some([ra?, rb?, rc?])
    }

    /// Copies `channel` over `[x, r)` from `src`. A channel missing in `src`
    /// is written as zeros.
    ///
    /// Returns `false` and writes nothing when the span is not inside both
    /// rows.
    #[must_use]
    pub fn copy(&mut self, src: &Row, channel: Channel, x: i32, r: i32) -> bool {
        let (Some(range), Some(src_range)) = (self.range(x, r), src.range(x, r)) else {
            return false;
        };
        let source = src.get(channel).map(|buffer| &buffer[src_range]);
        let dst = &mut self.writable(channel)[range];
        match source {
            Some(values) => dst.copy_from_slice(values),
            None => dst.fill(0.0),
        }
        true
    }

    fn range(&self, x: i32, r: i32) -> Option<std::ops::Range<usize>> {
        if x < self.x || r > self.r || x > r {
            return None;
        }
        Some(x.abs_diff(self.x) as usize..r.abs_diff(self.x) as usize)
    }
}
