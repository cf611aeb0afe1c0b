//! WAV file reading and writing for multichannel buffers.
//!
//! Samples are `f32` in `[-1.0, 1.0)` on the Rust side. Integer files are
//! scaled by `2^(bits - 1)` in both directions; 32-bit files are IEEE float.

use crate::{Error, Result};
use hound::{SampleFormat, WavReader, WavWriter};
use shelf_core::ChannelBuffers;
use std::path::Path;

/// Sample encoding of a WAV file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WavFormat {
    /// Integer PCM.
    Pcm,
    /// IEEE 754 float.
    IeeeFloat,
}

impl From<SampleFormat> for WavFormat {
    fn from(format: SampleFormat) -> Self {
        match format {
            SampleFormat::Float => WavFormat::IeeeFloat,
            SampleFormat::Int => WavFormat::Pcm,
        }
    }
}

/// Header summary of a WAV file.
#[derive(Debug, Clone)]
pub struct WavInfo {
    /// Channel count.
    pub channels: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Bits per sample.
    pub bits_per_sample: u16,
    /// Frames (samples per channel).
    pub num_frames: u64,
    /// Length in seconds.
    pub duration_secs: f64,
    /// Sample encoding.
    pub format: WavFormat,
}

/// Reads only the header of a WAV file.
pub fn read_wav_info<P: AsRef<Path>>(path: P) -> Result<WavInfo> {
    let reader = WavReader::open(path)?;
    let spec = reader.spec();
    let num_frames = u64::from(reader.duration());

    Ok(WavInfo {
        channels: spec.channels,
        sample_rate: spec.sample_rate,
        bits_per_sample: spec.bits_per_sample,
        num_frames,
        duration_secs: num_frames as f64 / f64::from(spec.sample_rate),
        format: spec.sample_format.into(),
    })
}

/// Output file layout.
///
/// Only 16, 24 (integer) and 32 (float) bits are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavSpec {
    /// Channel count.
    pub channels: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Bits per sample.
    pub bits_per_sample: u16,
}

impl WavSpec {
    /// Encoding implied by the bit depth.
    pub fn format(&self) -> WavFormat {
        if self.bits_per_sample == 32 {
            WavFormat::IeeeFloat
        } else {
            WavFormat::Pcm
        }
    }

    fn to_hound(self) -> hound::WavSpec {
        hound::WavSpec {
            channels: self.channels,
            sample_rate: self.sample_rate,
            bits_per_sample: self.bits_per_sample,
            sample_format: match self.format() {
                WavFormat::IeeeFloat => SampleFormat::Float,
                WavFormat::Pcm => SampleFormat::Int,
            },
        }
    }
}

impl Default for WavSpec {
    fn default() -> Self {
        Self {
            channels: 1,
            sample_rate: 48000,
            bits_per_sample: 32,
        }
    }
}

impl From<hound::WavSpec> for WavSpec {
    fn from(spec: hound::WavSpec) -> Self {
        Self {
            channels: spec.channels,
            sample_rate: spec.sample_rate,
            bits_per_sample: spec.bits_per_sample,
        }
    }
}

/// Full-scale value of an integer sample of `bits` bits.
fn int_full_scale(bits: u16) -> f32 {
    (1i64 << (bits.clamp(1, 32) - 1)) as f32
}

/// Reads a WAV file into one buffer per channel.
///
/// A trailing partial frame is dropped.
pub fn read_wav<P: AsRef<Path>>(path: P) -> Result<(ChannelBuffers, WavSpec)> {
    let path = path.as_ref();
    let reader = WavReader::open(path)?;
    let spec = WavSpec::from(reader.spec());

    let interleaved: Vec<f32> = match reader.spec().sample_format {
        SampleFormat::Float => reader
            .into_samples::<f32>()
            .collect::<std::result::Result<_, _>>()?,
        SampleFormat::Int => {
            let scale = int_full_scale(spec.bits_per_sample).recip();
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| v as f32 * scale))
                .collect::<std::result::Result<_, _>>()?
        }
    };

    let buffers = ChannelBuffers::from_interleaved(&interleaved, usize::from(spec.channels));
    tracing::debug!(
        path = %path.display(),
        channels = spec.channels,
        sample_rate = spec.sample_rate,
        frames = buffers.frames(),
        "read wav"
    );
    Ok((buffers, spec))
}

/// Writes `buffers` as a WAV file.
///
/// The channel count is taken from `buffers`, not `spec`. Integer output
/// clips at full scale.
pub fn write_wav<P: AsRef<Path>>(path: P, buffers: &ChannelBuffers, spec: WavSpec) -> Result<()> {
    let path = path.as_ref();
    if !matches!(spec.bits_per_sample, 16 | 24 | 32) {
        return Err(Error::UnsupportedFormat(format!(
            "{}-bit output (use 16, 24 or 32)",
            spec.bits_per_sample
        )));
    }
    let channels = match u16::try_from(buffers.channels()) {
        Ok(c) if c > 0 => c,
        _ => {
            return Err(Error::UnsupportedFormat(format!(
                "{} channels",
                buffers.channels()
            )));
        }
    };

    let spec = WavSpec { channels, ..spec };
    let mut writer = WavWriter::create(path, spec.to_hound())?;
    let interleaved = buffers.to_interleaved();

    match spec.format() {
        WavFormat::IeeeFloat => {
            for &sample in &interleaved {
                writer.write_sample(sample)?;
            }
        }
        WavFormat::Pcm => {
            let full_scale = int_full_scale(spec.bits_per_sample);
            for &sample in &interleaved {
                let value = (sample * full_scale).clamp(-full_scale, full_scale - 1.0);
                writer.write_sample(value as i32)?;
            }
        }
    }

    writer.finalize()?;
    tracing::debug!(
        path = %path.display(),
        channels,
        bits = spec.bits_per_sample,
        frames = buffers.frames(),
        "wrote wav"
    );
    Ok(())
}
