//! Non-interleaved multi-channel sample storage.
//!
//! [`ChannelBuffers`] is the block type the kernel contract reads from and
//! writes to: one contiguous `Vec<f32>` per channel, all the same length.
//! Processing works on a window of it given by a frame count and a buffer
//! offset, so one allocation can hold an entire file or a host's render
//! buffer.

use alloc::vec;
use alloc::vec::Vec;

/// Equal-length `f32` channels.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChannelBuffers {
    data: Vec<Vec<f32>>,
    frames: usize,
}

impl ChannelBuffers {
    /// Creates `channels` zeroed channels of `frames` samples each.
    pub fn new(channels: usize, frames: usize) -> Self {
        Self {
            data: vec![vec![0.0; frames]; channels],
            frames,
        }
    }

    /// Builds buffers from per-channel vectors.
    ///
    /// Channels shorter than the longest are zero-padded.
    pub fn from_channels(mut data: Vec<Vec<f32>>) -> Self {
        let frames = data.iter().map(Vec::len).max().unwrap_or(0);
        for channel in &mut data {
            channel.resize(frames, 0.0);
        }
        Self { data, frames }
    }

    /// De-interleaves `samples` (frame-major) into `channels` channels.
    ///
    /// A trailing partial frame is dropped. Zero channels yields an empty
    /// buffer.
    ///
    /// ```rust
    /// use shelf_core::ChannelBuffers;
    ///
    /// let buffers = ChannelBuffers::from_interleaved(&[1.0, -1.0, 2.0, -2.0], 2);
    /// assert_eq!(buffers.channel(0), &[1.0, 2.0]);
    /// assert_eq!(buffers.channel(1), &[-1.0, -2.0]);
    /// ```
    pub fn from_interleaved(samples: &[f32], channels: usize) -> Self {
        if channels == 0 {
            return Self::default();
        }
        let frames = samples.len() / channels;
        let mut buffers = Self::new(channels, frames);
        for (frame, chunk) in samples.chunks_exact(channels).enumerate() {
            for (ch, &sample) in chunk.iter().enumerate() {
                buffers.data[ch][frame] = sample;
            }
        }
        buffers
    }

    /// Interleaves all channels into one frame-major vector.
    pub fn to_interleaved(&self) -> Vec<f32> {
        let mut out = Vec::with_capacity(self.frames * self.data.len());
        for frame in 0..self.frames {
            for channel in &self.data {
                out.push(channel[frame]);
            }
        }
        out
    }

    /// Samples of channel `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.channels()`.
    #[inline]
    pub fn channel(&self, index: usize) -> &[f32] {
        &self.data[index]
    }

    /// Mutable samples of channel `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.channels()`.
    #[inline]
    pub fn channel_mut(&mut self, index: usize) -> &mut [f32] {
        &mut self.data[index]
    }

    /// Iterates over all channels.
    pub fn iter(&self) -> impl Iterator<Item = &[f32]> {
        self.data.iter().map(Vec::as_slice)
    }

    /// Number of channels.
    #[inline]
    pub fn channels(&self) -> usize {
        self.data.len()
    }

    /// Samples per channel.
    #[inline]
    pub fn frames(&self) -> usize {
        self.frames
    }

    /// Returns true if there are no channels or no frames.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty() || self.frames == 0
    }

    /// Zeroes every sample.
    pub fn clear(&mut self) {
        for channel in &mut self.data {
            channel.fill(0.0);
        }
    }

    /// Resizes every channel to `frames`, zeroing new samples.
    pub fn resize(&mut self, frames: usize) {
        for channel in &mut self.data {
            channel.resize(frames, 0.0);
        }
        self.frames = frames;
    }

    /// Consumes the buffers, returning the per-channel vectors.
    pub fn into_channels(self) -> Vec<Vec<f32>> {
        self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_is_zeroed() {
        let buffers = ChannelBuffers::new(3, 16);
        assert_eq!(buffers.channels(), 3);
        assert_eq!(buffers.frames(), 16);
        assert!(buffers.iter().all(|ch| ch.iter().all(|&s| s == 0.0)));
    }

    #[test]
    fn from_channels_pads_short_channels() {
        let buffers = ChannelBuffers::from_channels(vec![vec![1.0, 2.0, 3.0], vec![4.0]]);
        assert_eq!(buffers.frames(), 3);
        assert_eq!(buffers.channel(1), &[4.0, 0.0, 0.0]);
    }

    #[test]
    fn interleave_roundtrip() {
        let interleaved = [0.1, 0.2, 0.3, 0.4, 0.5, 0.6];
        let buffers = ChannelBuffers::from_interleaved(&interleaved, 3);
        assert_eq!(buffers.frames(), 2);
        assert_eq!(buffers.channel(2), &[0.3, 0.6]);
        assert_eq!(buffers.to_interleaved(), interleaved);
    }

    #[test]
    fn from_interleaved_drops_partial_frame() {
        let buffers = ChannelBuffers::from_interleaved(&[1.0, 2.0, 3.0], 2);
        assert_eq!(buffers.frames(), 1);
    }

    #[test]
    fn from_interleaved_zero_channels() {
        let buffers = ChannelBuffers::from_interleaved(&[1.0, 2.0], 0);
        assert!(buffers.is_empty());
        assert_eq!(buffers.channels(), 0);
    }

    #[test]
    fn resize_and_clear() {
        let mut buffers = ChannelBuffers::from_channels(vec![vec![1.0; 4], vec![2.0; 4]]);
        buffers.resize(6);
        assert_eq!(buffers.frames(), 6);
        assert_eq!(buffers.channel(0), &[1.0, 1.0, 1.0, 1.0, 0.0, 0.0]);

        buffers.clear();
        assert!(buffers.iter().all(|ch| ch.iter().all(|&s| s == 0.0)));
    }

    #[test]
    fn channel_mut_writes() {
        let mut buffers = ChannelBuffers::new(2, 2);
        buffers.channel_mut(1)[1] = 0.5;
        assert_eq!(buffers.into_channels(), vec![vec![0.0, 0.0], vec![0.0, 0.5]]);
    }
}
