//! Low-shelf parametric equalizer node.
//!
//! A Zölzer low-shelf section whose corner frequency, gain and Q are driven
//! by per-sample [`ParameterRamper`]s. The node follows the host kernel
//! contract ([`AudioKernel`]): parameters are addressed by number, control
//! writes are dezippered into short ramps, and processing works on a window
//! of non-interleaved buffers.

use shelf_core::{
    AudioKernel, ChannelBuffers, EqMode, ParamAddress, ParamDescriptor, ParamId, ParameterInfo,
    ParameterRamper, ParametricEqFilter, RamperHandle, ms_to_samples,
};

/// Address of the corner frequency parameter.
pub const CORNER_FREQUENCY: ParamAddress = 0;
/// Address of the gain parameter.
pub const GAIN: ParamAddress = 1;
/// Address of the Q parameter.
pub const Q: ParamAddress = 2;

/// Lowest corner frequency in Hz.
pub const CORNER_FREQUENCY_MIN: f32 = 12.0;
/// Highest corner frequency in Hz.
pub const CORNER_FREQUENCY_MAX: f32 = 20_000.0;
/// Default corner frequency in Hz.
pub const CORNER_FREQUENCY_DEFAULT: f32 = 1000.0;

/// Lowest shelf gain (linear).
pub const GAIN_MIN: f32 = 0.0;
/// Highest shelf gain (linear).
pub const GAIN_MAX: f32 = 10.0;
/// Default shelf gain (flat).
pub const GAIN_DEFAULT: f32 = 1.0;

/// Lowest Q.
pub const Q_MIN: f32 = 0.0;
/// Highest Q.
pub const Q_MAX: f32 = 2.0;
/// Default Q.
pub const Q_DEFAULT: f32 = 0.707;

/// Dezipper ramp length used when none is set explicitly.
pub const DEFAULT_DEZIPPER_MS: f32 = 20.0;

/// Sample rate assumed before `init`.
const DEFAULT_SAMPLE_RATE: f32 = 44100.0;

const PARAM_COUNT: usize = 3;

/// Descriptor for the parameter at `address`.
///
/// The single source of the node's ranges and defaults.
pub fn descriptor(address: ParamAddress) -> Option<ParamDescriptor> {
    match address {
        CORNER_FREQUENCY => Some(
            ParamDescriptor::frequency_hz(
                "Corner Frequency",
                "Freq",
                CORNER_FREQUENCY_MIN,
                CORNER_FREQUENCY_MAX,
                CORNER_FREQUENCY_DEFAULT,
            )
            .with_id(ParamId(1), "corner_frequency"),
        ),
        GAIN => Some(
            ParamDescriptor::linear_gain("Gain", "Gain", GAIN_MIN, GAIN_MAX, GAIN_DEFAULT)
                .with_id(ParamId(2), "gain"),
        ),
        Q => Some(
            ParamDescriptor::unitless("Q", "Q", Q_MIN, Q_MAX, Q_DEFAULT).with_id(ParamId(3), "q"),
        ),
        _ => None,
    }
}

/// Looks up a parameter address by string id, name or short name
/// (case-insensitive).
///
/// ```rust
/// use shelf_effects::low_shelf::{self, address_by_name};
///
/// assert_eq!(address_by_name("corner_frequency"), Some(low_shelf::CORNER_FREQUENCY));
/// assert_eq!(address_by_name("Freq"), Some(low_shelf::CORNER_FREQUENCY));
/// assert_eq!(address_by_name("drive"), None);
/// ```
pub fn address_by_name(name: &str) -> Option<ParamAddress> {
    (0..PARAM_COUNT as ParamAddress).find(|&address| {
        descriptor(address).is_some_and(|d| {
            d.string_id.eq_ignore_ascii_case(name)
                || d.name.eq_ignore_ascii_case(name)
                || d.short_name.eq_ignore_ascii_case(name)
        })
    })
}

/// Low-shelf parametric equalizer node.
///
/// Boosts (gain > 1) or cuts (gain < 1) everything below the corner
/// frequency; Q shapes the transition. Gain is a linear amplitude at DC, so
/// 1.0 is transparent.
///
/// ## Parameter Addresses
///
/// | Address | Name | Range | Default |
/// |---------|------|-------|---------|
/// | 0 | Corner Frequency | 12.0–20000.0 Hz | 1000.0 |
/// | 1 | Gain | 0.0–10.0 | 1.0 |
/// | 2 | Q | 0.0–2.0 | 0.707 |
///
/// Unknown addresses are ignored on write and read as `0.0`.
///
/// ## Parameter paths
///
/// - Direct setters ([`set_gain`](Self::set_gain) etc.) jump immediately.
/// - [`AudioKernel::set_parameter`] and [`LowShelfControl`] write the UI
///   value; the next `process` call ramps to it over the dezipper length.
/// - [`AudioKernel::start_ramp`] ramps over an explicit number of frames.
///
/// Every path clamps to the ranges above.
///
/// # Example
///
/// ```rust
/// use shelf_core::{AudioKernel, ChannelBuffers};
/// use shelf_effects::LowShelfParametricEq;
///
/// let mut eq = LowShelfParametricEq::new();
/// eq.init(2, 48000.0);
/// eq.set_corner_frequency(150.0);
/// eq.set_gain(2.0);
///
/// let input = ChannelBuffers::from_channels(vec![vec![0.5; 256], vec![0.5; 256]]);
/// let mut output = ChannelBuffers::new(2, 256);
/// eq.process(&input, &mut output, 256, 0);
/// assert!(output.channel(0).iter().all(|s| s.is_finite()));
/// ```
#[derive(Debug)]
pub struct LowShelfParametricEq {
    corner_frequency: ParameterRamper,
    gain: ParameterRamper,
    q: ParameterRamper,

    /// Shared coefficients, one history per channel. `None` until `init`.
    filter: Option<ParametricEqFilter>,

    sample_rate: f32,
    channels: usize,
    started: bool,
    was_reset: bool,
    /// Explicit dezipper length; `None` means [`DEFAULT_DEZIPPER_MS`].
    dezipper_frames: Option<u32>,
}

impl LowShelfParametricEq {
    /// Creates an uninitialized, started node at default settings.
    pub fn new() -> Self {
        Self {
            corner_frequency: ParameterRamper::new(CORNER_FREQUENCY_DEFAULT),
            gain: ParameterRamper::new(GAIN_DEFAULT),
            q: ParameterRamper::new(Q_DEFAULT),
            filter: None,
            sample_rate: DEFAULT_SAMPLE_RATE,
            channels: 0,
            started: true,
            was_reset: false,
            dezipper_frames: None,
        }
    }

    /// Sets the corner frequency in Hz immediately.
    ///
    /// Range: 12.0 to 20000.0 Hz.
    pub fn set_corner_frequency(&mut self, hz: f32) {
        self.corner_frequency.set_immediate(clamp_param(CORNER_FREQUENCY, hz));
    }

    /// Returns the corner frequency the node is at or ramping to.
    pub fn corner_frequency(&self) -> f32 {
        self.corner_frequency.goal()
    }

    /// Sets the shelf gain (linear) immediately.
    ///
    /// Range: 0.0 to 10.0.
    pub fn set_gain(&mut self, gain: f32) {
        self.gain.set_immediate(clamp_param(GAIN, gain));
    }

    /// Returns the gain the node is at or ramping to.
    pub fn gain(&self) -> f32 {
        self.gain.goal()
    }

    /// Sets Q immediately.
    ///
    /// Range: 0.0 to 2.0.
    pub fn set_q(&mut self, q: f32) {
        self.q.set_immediate(clamp_param(Q, q));
    }

    /// Returns the Q the node is at or ramping to.
    pub fn q(&self) -> f32 {
        self.q.goal()
    }

    /// Sets the ramp length applied to control-side writes.
    pub fn set_dezipper_frames(&mut self, frames: u32) {
        self.dezipper_frames = Some(frames);
    }

    /// Ramp length applied to control-side writes, in frames.
    pub fn dezipper_frames(&self) -> u32 {
        self.dezipper_frames
            .unwrap_or_else(|| ms_to_samples(DEFAULT_DEZIPPER_MS, self.sample_rate) as u32)
    }

    /// Whether [`reset`](AudioKernel::reset) has been called.
    pub fn was_reset(&self) -> bool {
        self.was_reset
    }

    /// Channel count given to `init`; `0` when not initialized.
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Sample rate in Hz.
    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Whether per-channel state is allocated.
    pub fn is_initialized(&self) -> bool {
        self.filter.is_some()
    }

    /// Corner frequency, gain and Q most recently applied to the filter.
    pub fn applied_values(&self) -> Option<(f32, f32, f32)> {
        self.filter
            .as_ref()
            .map(|f| (f.frequency(), f.gain(), f.q()))
    }

    /// Magnitude response (linear) at `frequency` Hz for the applied values.
    pub fn magnitude_at(&self, frequency: f32) -> Option<f32> {
        self.filter.as_ref().map(|f| f.magnitude_at(frequency))
    }

    /// Returns a handle for writing parameters from a control thread.
    pub fn control(&self) -> LowShelfControl {
        LowShelfControl {
            corner_frequency: self.corner_frequency.handle(),
            gain: self.gain.handle(),
            q: self.q.handle(),
        }
    }

    fn ramper(&self, address: ParamAddress) -> Option<&ParameterRamper> {
        match address {
            CORNER_FREQUENCY => Some(&self.corner_frequency),
            GAIN => Some(&self.gain),
            Q => Some(&self.q),
            _ => None,
        }
    }

    fn ramper_mut(&mut self, address: ParamAddress) -> Option<&mut ParameterRamper> {
        match address {
            CORNER_FREQUENCY => Some(&mut self.corner_frequency),
            GAIN => Some(&mut self.gain),
            Q => Some(&mut self.q),
            _ => None,
        }
    }
}

impl Default for LowShelfParametricEq {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioKernel for LowShelfParametricEq {
    fn init(&mut self, channels: usize, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.channels = channels;
        self.filter = Some(ParametricEqFilter::new(
            EqMode::LowShelf,
            sample_rate,
            channels,
        ));

        self.corner_frequency.init();
        self.gain.init();
        self.q.init();

        #[cfg(feature = "tracing")]
        tracing::debug!(channels, sample_rate, "low shelf init");
    }

    fn start(&mut self) {
        self.started = true;
    }

    fn stop(&mut self) {
        self.started = false;
    }

    fn is_started(&self) -> bool {
        self.started
    }

    fn reset(&mut self) {
        self.was_reset = true;
        self.corner_frequency.reset();
        self.gain.reset();
        self.q.reset();
        if let Some(filter) = &mut self.filter {
            filter.clear();
        }

        #[cfg(feature = "tracing")]
        tracing::debug!("low shelf reset");
    }

    fn deallocate(&mut self) {
        self.filter = None;
        self.channels = 0;

        #[cfg(feature = "tracing")]
        tracing::debug!("low shelf deallocate");
    }

    fn set_parameter(&mut self, address: ParamAddress, value: f32) {
        if let Some(ramper) = self.ramper(address) {
            ramper.set_ui_value(clamp_param(address, value));
        }
    }

    fn get_parameter(&self, address: ParamAddress) -> f32 {
        self.ramper(address).map_or(0.0, ParameterRamper::ui_value)
    }

    fn start_ramp(&mut self, address: ParamAddress, value: f32, duration_frames: u32) {
        let value = clamp_param(address, value);
        if let Some(ramper) = self.ramper_mut(address) {
            ramper.start_ramp(value, duration_frames);
        }
    }

    fn process(
        &mut self,
        input: &ChannelBuffers,
        output: &mut ChannelBuffers,
        frame_count: usize,
        buffer_offset: usize,
    ) {
        let end = buffer_offset
            .saturating_add(frame_count)
            .min(input.frames())
            .min(output.frames());
        let channels = input.channels().min(output.channels());

        let ramp_frames = self.dezipper_frames();
        self.corner_frequency.dezipper_check(ramp_frames);
        self.gain.dezipper_check(ramp_frames);
        self.q.dezipper_check(ramp_frames);

        for frame in buffer_offset..end {
            let corner_frequency = self.corner_frequency.get_and_step();
            let gain = self.gain.get_and_step();
            let q = self.q.get_and_step();

            match &mut self.filter {
                Some(filter) => {
                    filter.set(corner_frequency, gain, q);
                    for ch in 0..channels {
                        let x = input.channel(ch)[frame];
                        output.channel_mut(ch)[frame] =
                            if self.started { filter.process(ch, x) } else { x };
                    }
                }
                None => {
                    for ch in 0..channels {
                        output.channel_mut(ch)[frame] = input.channel(ch)[frame];
                    }
                }
            }
        }
    }
}

impl ParameterInfo for LowShelfParametricEq {
    fn param_count(&self) -> usize {
        PARAM_COUNT
    }

    fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
        descriptor(index as ParamAddress)
    }

    fn get_param(&self, index: usize) -> f32 {
        self.get_parameter(index as ParamAddress)
    }

    /// Jumps immediately, like the direct setters.
    fn set_param(&mut self, index: usize, value: f32) {
        match index as ParamAddress {
            CORNER_FREQUENCY => self.set_corner_frequency(value),
            GAIN => self.set_gain(value),
            Q => self.set_q(value),
            _ => {}
        }
    }
}

/// Control-thread handle to a [`LowShelfParametricEq`].
///
/// Writes are lock-free and reach the audio thread as dezippered ramps at
/// the start of its next `process` call.
#[derive(Debug, Clone)]
pub struct LowShelfControl {
    corner_frequency: RamperHandle,
    gain: RamperHandle,
    q: RamperHandle,
}

impl LowShelfControl {
    /// Clamps and publishes a parameter value. Unknown addresses are ignored.
    pub fn set_parameter(&self, address: ParamAddress, value: f32) {
        if let Some(handle) = self.handle(address) {
            handle.set(clamp_param(address, value));
        }
    }

    /// Latest published value; `0.0` for unknown addresses.
    pub fn get_parameter(&self, address: ParamAddress) -> f32 {
        self.handle(address).map_or(0.0, RamperHandle::get)
    }

    fn handle(&self, address: ParamAddress) -> Option<&RamperHandle> {
        match address {
            CORNER_FREQUENCY => Some(&self.corner_frequency),
            GAIN => Some(&self.gain),
            Q => Some(&self.q),
            _ => None,
        }
    }
}

#[inline]
fn clamp_param(address: ParamAddress, value: f32) -> f32 {
    descriptor(address).map_or(value, |d| d.clamp(value))
}
