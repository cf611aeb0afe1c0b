//! Host-shaped kernel contract.
//!
//! The [`AudioKernel`] trait is the interface an audio host drives a node
//! through: a lifecycle (init, start/stop, reset, deallocate), parameter
//! access by numeric address, explicit ramp scheduling, and block
//! processing over a window of non-interleaved buffers.
//!
//! ## Design Decisions
//!
//! - **No error returns**: every call is valid at every point of the
//!   lifecycle. Out-of-range values clamp, unknown addresses are ignored and
//!   an uninitialized kernel passes audio through.
//!
//! - **Allocation only in `init`/`deallocate`**: everything else may run on
//!   the audio thread.
//!
//! - **Sample-accurate events**: [`process_with_events`](AudioKernel::process_with_events)
//!   splits a block at each [`RenderEvent`] so parameter changes land on the
//!   exact frame the host scheduled them for.

use crate::buffer::ChannelBuffers;

/// Numeric parameter address, as hosts identify parameters.
pub type ParamAddress = u64;

/// A parameter change scheduled at a frame inside a render block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderEvent {
    /// Frame offset relative to the start of the block.
    pub frame_offset: usize,
    /// Target parameter.
    pub address: ParamAddress,
    /// New value (clamped by the kernel).
    pub value: f32,
    /// Ramp length in frames; `0` jumps immediately.
    pub ramp_frames: u32,
}

impl RenderEvent {
    /// An immediate parameter change at `frame_offset`.
    pub const fn parameter(frame_offset: usize, address: ParamAddress, value: f32) -> Self {
        Self {
            frame_offset,
            address,
            value,
            ramp_frames: 0,
        }
    }

    /// A ramp to `value` over `ramp_frames`, starting at `frame_offset`.
    pub const fn ramp(
        frame_offset: usize,
        address: ParamAddress,
        value: f32,
        ramp_frames: u32,
    ) -> Self {
        Self {
            frame_offset,
            address,
            value,
            ramp_frames,
        }
    }
}

/// Lifecycle, parameter and rendering contract of a host-driven node.
///
/// # Example
///
/// ```rust
/// use shelf_core::{AudioKernel, ChannelBuffers, ParamAddress, RenderEvent};
///
/// struct Trim {
///     gain: f32,
///     started: bool,
/// }
///
/// impl AudioKernel for Trim {
///     fn init(&mut self, _channels: usize, _sample_rate: f32) {}
///     fn start(&mut self) { self.started = true; }
///     fn stop(&mut self) { self.started = false; }
///     fn is_started(&self) -> bool { self.started }
///     fn reset(&mut self) {}
///     fn deallocate(&mut self) {}
///
///     fn set_parameter(&mut self, address: ParamAddress, value: f32) {
///         if address == 0 { self.gain = value.clamp(0.0, 4.0); }
///     }
///     fn get_parameter(&self, address: ParamAddress) -> f32 {
///         if address == 0 { self.gain } else { 0.0 }
///     }
///     fn start_ramp(&mut self, address: ParamAddress, value: f32, _frames: u32) {
///         self.set_parameter(address, value);
///     }
///
///     fn process(
///         &mut self,
///         input: &ChannelBuffers,
///         output: &mut ChannelBuffers,
///         frame_count: usize,
///         buffer_offset: usize,
///     ) {
///         for ch in 0..input.channels().min(output.channels()) {
///             let end = (buffer_offset + frame_count).min(input.frames()).min(output.frames());
///             for i in buffer_offset..end {
///                 output.channel_mut(ch)[i] = input.channel(ch)[i] * self.gain;
///             }
///         }
///     }
/// }
///
/// let mut trim = Trim { gain: 1.0, started: true };
/// let input = ChannelBuffers::from_channels(vec![vec![1.0; 4]]);
/// let mut output = ChannelBuffers::new(1, 4);
///
/// trim.process_with_events(&input, &mut output, 4, 0, &[RenderEvent::parameter(2, 0, 0.5)]);
/// assert_eq!(output.channel(0), &[1.0, 1.0, 0.5, 0.5]);
/// ```
pub trait AudioKernel {
    /// Allocates per-channel state for `channels` at `sample_rate` and loads
    /// defaults.
    fn init(&mut self, channels: usize, sample_rate: f32);

    /// Resumes processing.
    fn start(&mut self);

    /// Switches to pass-through; parameters keep moving.
    fn stop(&mut self);

    /// Whether the kernel is processing (as opposed to passing through).
    fn is_started(&self) -> bool;

    /// Clears processing state and pending parameter changes.
    fn reset(&mut self);

    /// Releases per-channel state.
    fn deallocate(&mut self);

    /// Sets a parameter from the control side. Takes effect at the start of
    /// the next render call.
    fn set_parameter(&mut self, address: ParamAddress, value: f32);

    /// Last value set for a parameter; `0.0` for unknown addresses.
    fn get_parameter(&self, address: ParamAddress) -> f32;

    /// Ramps a parameter to `value` over `duration_frames` samples.
    fn start_ramp(&mut self, address: ParamAddress, value: f32, duration_frames: u32);

    /// Renders frames `buffer_offset..buffer_offset + frame_count`.
    ///
    /// Frames past the end of either buffer are not touched, and only
    /// channels present in both buffers are written.
    fn process(
        &mut self,
        input: &ChannelBuffers,
        output: &mut ChannelBuffers,
        frame_count: usize,
        buffer_offset: usize,
    );

    /// Renders a block, applying `events` at their frame offsets.
    ///
    /// Events are expected in ascending `frame_offset` order; one earlier
    /// than the previous event is applied at the current position. Events at
    /// or past `frame_count` are applied after the last frame is rendered.
    fn process_with_events(
        &mut self,
        input: &ChannelBuffers,
        output: &mut ChannelBuffers,
        frame_count: usize,
        buffer_offset: usize,
        events: &[RenderEvent],
    ) {
        let mut now = 0;
        for event in events {
            let at = event.frame_offset.min(frame_count);
            if at > now {
                self.process(input, output, at - now, buffer_offset + now);
                now = at;
            }
            self.start_ramp(event.address, event.value, event.ramp_frames);
        }
        if now < frame_count {
            self.process(input, output, frame_count - now, buffer_offset + now);
        }
    }
}
