//! Audio file I/O and offline rendering for shelf.
//!
//! This crate provides:
//!
//! - **WAV file I/O**: [`read_wav`] and [`write_wav`] for multichannel
//!   [`ChannelBuffers`](shelf_core::ChannelBuffers)
//! - **Offline rendering**: [`ProcessingEngine`] drives any
//!   [`AudioKernel`](shelf_core::AudioKernel) through a file in fixed-size
//!   blocks with sample-accurate events
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use shelf_io::{ProcessingEngine, read_wav, write_wav};
//! use shelf_effects::LowShelfParametricEq;
//! use shelf_core::AudioKernel;
//!
//! let (input, spec) = read_wav("input.wav")?;
//!
//! let mut eq = LowShelfParametricEq::new();
//! eq.init(input.channels(), spec.sample_rate as f32);
//! eq.set_gain(2.0);
//!
//! let mut engine = ProcessingEngine::new(eq, 512);
//! let output = engine.process_file(&input, |_, _, _| {}, |_| {});
//!
//! write_wav("output.wav", &output, spec)?;
//! ```

mod engine;
mod wav;

pub use engine::{DEFAULT_BLOCK_SIZE, ProcessingEngine, SignalStats};
pub use wav::{WavFormat, WavInfo, WavSpec, read_wav, read_wav_info, write_wav};

/// Error types for audio I/O operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// WAV file read/write error.
    #[error("WAV file error: {0}")]
    Wav(#[from] hound::Error),

    /// The requested sample format is not supported.
    #[error("Unsupported sample format: {0}")]
    UnsupportedFormat(String),

    /// Standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type for audio I/O operations.
pub type Result<T> = std::result::Result<T, Error>;
