//! Shelf Core - DSP primitives for the low-shelf equalizer node
//!
//! This crate provides the building blocks the equalizer node is assembled
//! from, designed for real-time audio processing with zero allocation in the
//! audio path.
//!
//! # Core Abstractions
//!
//! ## Kernel Contract
//!
//! - [`AudioKernel`] - Host-shaped lifecycle, parameter and block-processing trait
//! - [`RenderEvent`] - Sample-accurate parameter/ramp event inside a block
//! - [`ChannelBuffers`] - Non-interleaved multi-channel sample storage
//!
//! ## Parameter Ramping
//!
//! - [`ParameterRamper`] - Linear ramps with a lock-free control-thread slot
//! - [`RamperHandle`] - `Send + Sync` view of a ramper's UI slot
//!
//! ## Filters
//!
//! - [`Biquad`] - Direct Form I second-order IIR section
//! - [`ParametricEqFilter`] - Peak / low-shelf / high-shelf section with
//!   coefficient caching and per-channel history
//!
//! ## Parameter Metadata
//!
//! - [`ParameterInfo`] - Index-based parameter discovery
//! - [`ParamDescriptor`] - Range, unit and scaling for one parameter
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible. Disable the default `std` feature:
//!
//! ```toml
//! [dependencies]
//! shelf-core = { version = "0.1", default-features = false }
//! ```
//!
//! # Example
//!
//! ```rust
//! use shelf_core::{EqMode, ParametricEqFilter};
//!
//! let mut filter = ParametricEqFilter::new(EqMode::LowShelf, 48000.0, 2);
//! filter.set(200.0, 2.0, 0.707);
//!
//! let left = filter.process(0, 0.5);
//! let right = filter.process(1, 0.5);
//! assert_eq!(left, right);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod biquad;
pub mod buffer;
pub mod kernel;
pub mod math;
pub mod param_info;
pub mod ramper;

// Re-export main types at crate root
pub use biquad::{Biquad, EqMode, MIN_Q, ParametricEqFilter, parametric_eq_coefficients};
pub use buffer::ChannelBuffers;
pub use kernel::{AudioKernel, ParamAddress, RenderEvent};
pub use math::{db_to_linear, flush_denormal, linear_to_db, ms_to_samples};
pub use param_info::{ParamDescriptor, ParamFlags, ParamId, ParamScale, ParamUnit, ParameterInfo};
pub use ramper::{ParameterRamper, RamperHandle};
