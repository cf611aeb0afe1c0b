//! Shelf Effects - The low-shelf equalizer node
//!
//! This crate provides the node built on shelf-core:
//!
//! - [`LowShelfParametricEq`] - Time-varying low-shelf EQ implementing
//!   [`AudioKernel`](shelf_core::AudioKernel)
//! - [`LowShelfControl`] - Lock-free control-thread handle to it
//!
//! Parameter addresses and ranges live in [`low_shelf`] as constants, with
//! [`low_shelf::descriptor`] as the metadata for each.
//!
//! ## Example
//!
//! ```rust
//! use shelf_core::{AudioKernel, ChannelBuffers, RenderEvent};
//! use shelf_effects::{LowShelfParametricEq, low_shelf};
//!
//! let mut eq = LowShelfParametricEq::new();
//! eq.init(1, 48000.0);
//! eq.set_gain(2.0);
//!
//! let input = ChannelBuffers::from_channels(vec![vec![0.25; 512]]);
//! let mut output = ChannelBuffers::new(1, 512);
//!
//! // Sweep the corner up over the second half of the block.
//! let events = [RenderEvent::ramp(256, low_shelf::CORNER_FREQUENCY, 400.0, 256)];
//! eq.process_with_events(&input, &mut output, 512, 0, &events);
//! assert_eq!(eq.corner_frequency(), 400.0);
//! ```
//!
//! ## Logging
//!
//! With the `tracing` feature, lifecycle calls (`init`, `reset`,
//! `deallocate`) emit `debug` events. The render path never logs.

#![cfg_attr(not(feature = "std"), no_std)]

pub mod low_shelf;

// Re-export main types at crate root
pub use low_shelf::{LowShelfControl, LowShelfParametricEq};
