//! Offline block rendering.

use shelf_core::{AudioKernel, ChannelBuffers, RenderEvent};

/// Block size used when none is given.
pub const DEFAULT_BLOCK_SIZE: usize = 512;

/// Renders whole files through a kernel, one host-sized block at a time.
///
/// Each block is a window of the full input and output buffers, so the
/// kernel sees the same `buffer_offset` contract a live host would give it.
pub struct ProcessingEngine<K> {
    kernel: K,
    block_size: usize,
    events: Vec<RenderEvent>,
}

impl<K: AudioKernel> ProcessingEngine<K> {
    /// Wraps an initialized kernel. A block size of zero becomes one frame.
    pub fn new(kernel: K, block_size: usize) -> Self {
        Self {
            kernel,
            block_size: block_size.max(1),
            events: Vec::new(),
        }
    }

    /// Frames per block.
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// The wrapped kernel.
    pub fn kernel(&self) -> &K {
        &self.kernel
    }

    /// Mutable access to the wrapped kernel.
    pub fn kernel_mut(&mut self) -> &mut K {
        &mut self.kernel
    }

    /// Unwraps the kernel.
    pub fn into_kernel(self) -> K {
        self.kernel
    }

    /// Renders all of `input` and returns the output.
    ///
    /// Before each block, `schedule(block_start, frames, &mut events)` fills
    /// the block's events (offsets relative to the block). `progress` gets
    /// the number of frames rendered after each block.
    pub fn process_file<S, P>(
        &mut self,
        input: &ChannelBuffers,
        mut schedule: S,
        mut progress: P,
    ) -> ChannelBuffers
    where
        S: FnMut(u64, usize, &mut Vec<RenderEvent>),
        P: FnMut(usize),
    {
        let frames = input.frames();
        let mut output = ChannelBuffers::new(input.channels(), frames);

        tracing::debug!(
            frames,
            channels = input.channels(),
            block_size = self.block_size,
            "rendering"
        );

        let mut pos = 0;
        while pos < frames {
            let n = self.block_size.min(frames - pos);
            self.events.clear();
            schedule(pos as u64, n, &mut self.events);
            self.kernel
                .process_with_events(input, &mut output, n, pos, &self.events);
            pos += n;
            progress(n);
        }

        output
    }
}

/// Level statistics of a set of buffers, over all channels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SignalStats {
    /// Root mean square level (linear).
    pub rms: f32,
    /// Largest absolute sample (linear).
    pub peak: f32,
}

impl SignalStats {
    /// Measures `buffers`. Empty buffers measure as silence.
    pub fn measure(buffers: &ChannelBuffers) -> Self {
        let mut sum_sq = 0.0f64;
        let mut peak = 0.0f32;
        let mut count = 0usize;
        for channel in buffers.iter() {
            for &s in channel {
                sum_sq += f64::from(s) * f64::from(s);
                peak = peak.max(s.abs());
            }
            count += channel.len();
        }

        let rms = if count == 0 {
            0.0
        } else {
            (sum_sq / count as f64).sqrt() as f32
        };
        Self { rms, peak }
    }
}
