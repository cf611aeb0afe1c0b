//! Biquad (bi-quadratic) filter structure and the parametric EQ section.
//!
//! [`Biquad`] is a plain second-order IIR section. [`ParametricEqFilter`]
//! drives one biquad history per channel from a shared set of Zölzer
//! parametric-EQ coefficients, recomputing them only when a control value
//! actually changes.
//!
//! Reference: U. Zölzer, *Digital Audio Signal Processing*, 2nd ed., §5.2
//! (second-order shelving and peak filters).

use alloc::vec::Vec;
use core::f32::consts::{PI, TAU};
use libm::{cosf, sinf, sqrtf, tanf};

use crate::math::flush_denormal;

/// Lower bound applied to Q inside coefficient computation.
///
/// The low-shelf node accepts Q down to 0.0; the `k / q` term would divide
/// by zero there, so the filter floors it.
pub const MIN_Q: f32 = 0.01;

/// Fraction of the sample rate the corner frequency is limited to.
///
/// `tan(π·fc/sr)` diverges at Nyquist; 0.475 keeps the bilinear warping
/// finite at low sample rates.
const NYQUIST_LIMIT: f32 = 0.475;

/// Generic biquad filter coefficients and state.
///
/// Implements the Direct Form I biquad structure:
/// ```text
/// y[n] = b0*x[n] + b1*x[n-1] + b2*x[n-2]
///                - a1*y[n-1] - a2*y[n-2]
/// ```
#[derive(Debug, Clone)]
pub struct Biquad {
    /// Feedforward coefficients
    b0: f32,
    b1: f32,
    b2: f32,

    /// Feedback coefficients (normalized by a0)
    a1: f32,
    a2: f32,

    /// Input delay line: x[n-1], x[n-2]
    x1: f32,
    x2: f32,

    /// Output delay line: y[n-1], y[n-2]
    y1: f32,
    y2: f32,
}

impl Biquad {
    /// Creates a new biquad with passthrough coefficients.
    ///
    /// Initial state: `y[n] = x[n]` (no filtering)
    pub fn new() -> Self {
        Self {
            b0: 1.0,
            b1: 0.0,
            b2: 0.0,
            a1: 0.0,
            a2: 0.0,
            x1: 0.0,
            x2: 0.0,
            y1: 0.0,
            y2: 0.0,
        }
    }

    /// Sets the biquad coefficients.
    ///
    /// # Arguments
    ///
    /// * `b0, b1, b2` - Feedforward coefficients
    /// * `a0, a1, a2` - Feedback coefficients
    ///
    /// Normalizes by `a0` internally.
    pub fn set_coefficients(&mut self, b0: f32, b1: f32, b2: f32, a0: f32, a1: f32, a2: f32) {
        let a0_inv = 1.0 / a0;
        self.b0 = b0 * a0_inv;
        self.b1 = b1 * a0_inv;
        self.b2 = b2 * a0_inv;
        self.a1 = a1 * a0_inv;
        self.a2 = a2 * a0_inv;
    }

    /// Returns the normalized coefficients as `[b0, b1, b2, a1, a2]`.
    pub fn coefficients(&self) -> [f32; 5] {
        [self.b0, self.b1, self.b2, self.a1, self.a2]
    }

    /// Processes a single sample through the biquad filter.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let output = self.b0 * input + self.b1 * self.x1 + self.b2 * self.x2
            - self.a1 * self.y1
            - self.a2 * self.y2;

        self.x2 = self.x1;
        self.x1 = input;
        self.y2 = self.y1;
        self.y1 = flush_denormal(output);

        output
    }

    /// Clears the filter state (delay lines) without touching coefficients.
    pub fn clear(&mut self) {
        self.x1 = 0.0;
        self.x2 = 0.0;
        self.y1 = 0.0;
        self.y2 = 0.0;
    }
}

impl Default for Biquad {
    fn default() -> Self {
        Self::new()
    }
}

/// Response shape of a [`ParametricEqFilter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EqMode {
    /// Bell around the corner frequency; `gain` applies at the centre.
    #[default]
    Peak,
    /// Shelf below the corner frequency; `gain` applies at DC.
    LowShelf,
    /// Shelf above the corner frequency; `gain` applies at Nyquist.
    HighShelf,
}

/// Calculates Zölzer parametric EQ coefficients.
///
/// # Arguments
///
/// * `mode` - Peak, low-shelf or high-shelf response
/// * `frequency` - Corner (shelf) or centre (peak) frequency in Hz
/// * `gain` - Linear gain applied in the shelf / at the peak (1.0 = flat)
/// * `q` - Quality factor, floored at [`MIN_Q`]
/// * `sample_rate` - Sample rate in Hz
///
/// # Returns
///
/// (b0, b1, b2, a0, a1, a2) coefficients, not yet normalized
pub fn parametric_eq_coefficients(
    mode: EqMode,
    frequency: f32,
    gain: f32,
    q: f32,
    sample_rate: f32,
) -> (f32, f32, f32, f32, f32, f32) {
    let q = q.max(MIN_Q);
    let v = gain.max(0.0);
    let omega = TAU * frequency / sample_rate;

    match mode {
        EqMode::LowShelf => {
            let sq = sqrtf(2.0 * v);
            let k = tanf(omega * 0.5);
            let kk = k * k;
            let vkk = v * kk;

            let b0 = 1.0 + sq * k + vkk;
            let b1 = 2.0 * (vkk - 1.0);
            let b2 = 1.0 - sq * k + vkk;
            let a0 = 1.0 + k / q + kk;
            let a1 = 2.0 * (kk - 1.0);
            let a2 = 1.0 - k / q + kk;

            (b0, b1, b2, a0, a1, a2)
        }
        EqMode::HighShelf => {
            // Low-shelf prototype mirrored around fs/4 (z -> -z).
            let sq = sqrtf(2.0 * v);
            let k = tanf((PI - omega) * 0.5);
            let kk = k * k;
            let vkk = v * kk;

            let b0 = 1.0 + sq * k + vkk;
            let b1 = -2.0 * (vkk - 1.0);
            let b2 = 1.0 - sq * k + vkk;
            let a0 = 1.0 + k / q + kk;
            let a1 = -2.0 * (kk - 1.0);
            let a2 = 1.0 - k / q + kk;

            (b0, b1, b2, a0, a1, a2)
        }
        EqMode::Peak => {
            let k = tanf(omega * 0.5);
            let kk = k * k;
            let vkdq = v * k / q;

            let b0 = 1.0 + vkdq + kk;
            let b1 = 2.0 * (kk - 1.0);
            let b2 = 1.0 - vkdq + kk;
            let a0 = 1.0 + k / q + kk;
            let a1 = 2.0 * (kk - 1.0);
            let a2 = 1.0 - k / q + kk;

            (b0, b1, b2, a0, a1, a2)
        }
    }
}

/// Multi-channel parametric EQ section.
///
/// Coefficients are shared by every channel; each channel keeps its own
/// biquad history so channels never bleed into one another. Calling
/// [`set`](Self::set) every sample is cheap: coefficients are only
/// recomputed when frequency, gain or Q differ from the values they were
/// last computed for.
#[derive(Debug, Clone)]
pub struct ParametricEqFilter {
    mode: EqMode,
    sample_rate: f32,
    frequency: f32,
    gain: f32,
    q: f32,
    /// Values the current coefficients were computed for.
    computed_for: Option<(f32, f32, f32)>,
    sections: Vec<Biquad>,
}

impl ParametricEqFilter {
    /// Creates a filter with `channels` independent histories.
    ///
    /// Starts at 1 kHz, unity gain, Q = 0.707.
    pub fn new(mode: EqMode, sample_rate: f32, channels: usize) -> Self {
        let mut filter = Self {
            mode,
            sample_rate,
            frequency: 1000.0,
            gain: 1.0,
            q: 0.707,
            computed_for: None,
            sections: alloc::vec![Biquad::new(); channels],
        };
        filter.update_coefficients();
        filter
    }

    /// Sets corner frequency (Hz), linear gain and Q.
    #[inline]
    pub fn set(&mut self, frequency: f32, gain: f32, q: f32) {
        self.frequency = frequency;
        self.gain = gain;
        self.q = q;
        if self.computed_for != Some((frequency, gain, q)) {
            self.update_coefficients();
        }
    }

    /// Changes the sample rate and recomputes coefficients.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.update_coefficients();
    }

    /// Changes the response shape and recomputes coefficients.
    pub fn set_mode(&mut self, mode: EqMode) {
        self.mode = mode;
        self.update_coefficients();
    }

    /// Resizes the per-channel histories. Allocates; keep off the audio path.
    pub fn set_channels(&mut self, channels: usize) {
        let template = self.sections.first().cloned().unwrap_or_default();
        self.sections.resize(channels, template);
        self.update_coefficients();
        self.clear();
    }

    /// Processes one sample of `channel`.
    ///
    /// A channel index past the allocated histories passes the sample
    /// through unchanged.
    #[inline]
    pub fn process(&mut self, channel: usize, input: f32) -> f32 {
        match self.sections.get_mut(channel) {
            Some(section) => section.process(input),
            None => input,
        }
    }

    /// Clears every channel's history.
    pub fn clear(&mut self) {
        for section in &mut self.sections {
            section.clear();
        }
    }

    /// Magnitude response (linear) at `frequency` Hz for the current settings.
    pub fn magnitude_at(&self, frequency: f32) -> f32 {
        let (b0, b1, b2, a0, a1, a2) = parametric_eq_coefficients(
            self.mode,
            self.effective_frequency(),
            self.gain,
            self.q,
            self.sample_rate,
        );
        let w = TAU * frequency / self.sample_rate;
        let (c1, s1) = (cosf(w), sinf(w));
        let (c2, s2) = (cosf(2.0 * w), sinf(2.0 * w));

        let num_re = b0 + b1 * c1 + b2 * c2;
        let num_im = -(b1 * s1 + b2 * s2);
        let den_re = a0 + a1 * c1 + a2 * c2;
        let den_im = -(a1 * s1 + a2 * s2);

        sqrtf(num_re * num_re + num_im * num_im) / sqrtf(den_re * den_re + den_im * den_im)
    }

    /// Response shape.
    pub fn mode(&self) -> EqMode {
        self.mode
    }

    /// Number of channel histories.
    pub fn channels(&self) -> usize {
        self.sections.len()
    }

    /// Sample rate in Hz.
    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Requested corner frequency (before the Nyquist limit is applied).
    pub fn frequency(&self) -> f32 {
        self.frequency
    }

    /// Linear gain.
    pub fn gain(&self) -> f32 {
        self.gain
    }

    /// Q as requested (before the [`MIN_Q`] floor is applied).
    pub fn q(&self) -> f32 {
        self.q
    }

    /// Normalized coefficients currently loaded, `[b0, b1, b2, a1, a2]`.
    pub fn coefficients(&self) -> Option<[f32; 5]> {
        self.sections.first().map(Biquad::coefficients)
    }

    fn effective_frequency(&self) -> f32 {
        self.frequency.min(self.sample_rate * NYQUIST_LIMIT)
    }

    fn update_coefficients(&mut self) {
        let (b0, b1, b2, a0, a1, a2) = parametric_eq_coefficients(
            self.mode,
            self.effective_frequency(),
            self.gain,
            self.q,
            self.sample_rate,
        );
        for section in &mut self.sections {
            section.set_coefficients(b0, b1, b2, a0, a1, a2);
        }
        self.computed_for = Some((self.frequency, self.gain, self.q));
    }
}
