//! Integration tests for shelf-core DSP primitives.
//!
//! Verifies filter accuracy with signal-level measurements (sine RMS through
//! the parametric sections) and checks ramper timing when a ramper drives a
//! filter sample by sample.

use shelf_core::{
    Biquad, ChannelBuffers, EqMode, ParameterRamper, ParametricEqFilter, db_to_linear,
    parametric_eq_coefficients,
};

const SAMPLE_RATE: f32 = 48000.0;
const TAU: f32 = core::f32::consts::TAU;

/// Generate a sine wave buffer at the given frequency and sample rate.
fn generate_sine(freq_hz: f32, sample_rate: f32, num_samples: usize) -> Vec<f32> {
    (0..num_samples)
        .map(|n| libm::sinf(TAU * freq_hz * n as f32 / sample_rate))
        .collect()
}

/// Measure RMS amplitude of a signal buffer.
fn rms(signal: &[f32]) -> f32 {
    let sum_sq: f32 = signal.iter().map(|&s| s * s).sum();
    libm::sqrtf(sum_sq / signal.len() as f32)
}

/// Convert linear amplitude to dB.
fn to_db(linear: f32) -> f32 {
    20.0 * libm::log10f(linear.max(1e-10))
}

// ============================================================================
// 1. Filter frequency responses
// ============================================================================

/// Feed a sine through a fresh single-channel section and return gain in dB.
fn measure_response(mode: EqMode, fc: f32, gain: f32, q: f32, freq_hz: f32) -> f32 {
    let num_samples = 48000; // 1 s, long enough for a 20 Hz tone to settle
    let settle_samples = 24000;
    let mut filter = ParametricEqFilter::new(mode, SAMPLE_RATE, 1);
    filter.set(fc, gain, q);

    let input = generate_sine(freq_hz, SAMPLE_RATE, num_samples);
    let output: Vec<f32> = input.iter().map(|&s| filter.process(0, s)).collect();
    to_db(rms(&output[settle_samples..]) / rms(&input[settle_samples..]))
}

#[test]
fn low_shelf_boost_frequency_response() {
    // +12 dB shelf at 200 Hz
    let gain = db_to_linear(12.0);
    let low = measure_response(EqMode::LowShelf, 200.0, gain, 0.707, 20.0);
    let high = measure_response(EqMode::LowShelf, 200.0, gain, 0.707, 8000.0);

    assert!((low - 12.0).abs() < 0.5, "20 Hz should be boosted ~12 dB, got {low:.2} dB");
    assert!(high.abs() < 0.2, "8 kHz should be untouched, got {high:.2} dB");
}

#[test]
fn low_shelf_cut_frequency_response() {
    let gain = db_to_linear(-12.0);
    let low = measure_response(EqMode::LowShelf, 500.0, gain, 0.707, 30.0);
    let high = measure_response(EqMode::LowShelf, 500.0, gain, 0.707, 10000.0);

    assert!((low + 12.0).abs() < 0.5, "30 Hz should be cut ~12 dB, got {low:.2} dB");
    assert!(high.abs() < 0.2, "10 kHz should be untouched, got {high:.2} dB");
}

#[test]
fn low_shelf_response_matches_magnitude_at() {
    let mut filter = ParametricEqFilter::new(EqMode::LowShelf, SAMPLE_RATE, 1);
    filter.set(300.0, 3.0, 1.0);
    for &freq in &[50.0, 300.0, 1000.0, 4000.0] {
        let measured = measure_response(EqMode::LowShelf, 300.0, 3.0, 1.0, freq);
        let predicted = to_db(filter.magnitude_at(freq));
        assert!(
            (measured - predicted).abs() < 0.3,
            "{freq} Hz: measured {measured:.2} dB, predicted {predicted:.2} dB"
        );
    }
}

#[test]
fn q_shapes_the_transition_not_the_plateau() {
    let gain = db_to_linear(6.0);
    for &q in &[0.3, 0.707, 1.5] {
        let plateau = measure_response(EqMode::LowShelf, 1000.0, gain, q, 30.0);
        assert!((plateau - 6.0).abs() < 0.5, "Q {q}: plateau {plateau:.2} dB");
    }
}

#[test]
fn section_matches_raw_biquad() {
    let (b0, b1, b2, a0, a1, a2) =
        parametric_eq_coefficients(EqMode::LowShelf, 250.0, 2.5, 0.9, SAMPLE_RATE);
    let mut biquad = Biquad::new();
    biquad.set_coefficients(b0, b1, b2, a0, a1, a2);

    let mut filter = ParametricEqFilter::new(EqMode::LowShelf, SAMPLE_RATE, 1);
    filter.set(250.0, 2.5, 0.9);

    for &s in &generate_sine(100.0, SAMPLE_RATE, 512) {
        assert_eq!(filter.process(0, s), biquad.process(s));
    }
}

// ============================================================================
// 2. Ramper driving a filter
// ============================================================================

#[test]
fn ramped_gain_reaches_target_response() {
    let mut gain = ParameterRamper::new(1.0);
    let mut filter = ParametricEqFilter::new(EqMode::LowShelf, SAMPLE_RATE, 1);
    gain.start_ramp(4.0, 4800);

    for _ in 0..4800 {
        filter.set(200.0, gain.get_and_step(), 0.707);
        filter.process(0, 1.0);
    }
    assert!(!gain.is_ramping());
    assert_eq!(gain.get(), 4.0);

    let mut last = 0.0;
    for _ in 0..20000 {
        filter.set(200.0, gain.get_and_step(), 0.707);
        last = filter.process(0, 1.0);
    }
    assert!((last - 4.0).abs() < 0.05, "DC settled at {last}");
}

#[test]
fn ramping_corner_frequency_stays_finite() {
    let mut freq = ParameterRamper::new(12.0);
    let mut filter = ParametricEqFilter::new(EqMode::LowShelf, SAMPLE_RATE, 1);
    freq.start_ramp(20000.0, 2048);

    for &s in &generate_sine(440.0, SAMPLE_RATE, 4096) {
        filter.set(freq.get_and_step(), 10.0, 2.0);
        let y = filter.process(0, s);
        assert!(y.is_finite());
    }
}

// ============================================================================
// 3. Channel buffers through the section
// ============================================================================

#[test]
fn stereo_buffers_filter_independently() {
    let left = generate_sine(50.0, SAMPLE_RATE, 2048);
    let right = vec![0.0; 2048];
    let mut buffers = ChannelBuffers::from_channels(vec![left, right]);

    let mut filter = ParametricEqFilter::new(EqMode::LowShelf, SAMPLE_RATE, 2);
    filter.set(200.0, 4.0, 0.707);
    for ch in 0..buffers.channels() {
        for s in buffers.channel_mut(ch) {
            *s = filter.process(ch, *s);
        }
    }

    assert!(rms(buffers.channel(0)) > 1.0);
    assert!(buffers.channel(1).iter().all(|&s| s == 0.0));
}
