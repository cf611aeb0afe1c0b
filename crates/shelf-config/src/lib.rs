//! Presets, parameter parsing and automation for the shelf equalizer.
//!
//! # Features
//!
//! - **Presets**: load and save node settings as TOML
//! - **Values**: unit-aware parameter strings (`"180Hz"`, `"+6dB"`, `"50%"`)
//! - **Automation**: ramps at absolute times, handed out per block as
//!   render events
//! - **Validation**: report unknown names and values that would be clamped
//! - **Paths**: platform preset directories
//! - **Factory Presets**: built-in starting points
//!
//! # Example
//!
//! ```rust
//! use shelf_config::{AutomationPoint, Preset};
//! use shelf_core::AudioKernel;
//! use shelf_effects::LowShelfParametricEq;
//!
//! let preset = Preset::new("Warm")
//!     .with_param("corner_frequency", "180Hz")
//!     .with_param("gain", "+6dB")
//!     .with_automation(AutomationPoint::new("1s", "gain", "1.0").with_ramp("500ms"));
//!
//! let mut eq = LowShelfParametricEq::new();
//! eq.init(2, 48000.0);
//! preset.apply(&mut eq).unwrap();
//! assert_eq!(eq.corner_frequency(), 180.0);
//!
//! let schedule = preset.schedule(48000).unwrap();
//! assert_eq!(schedule.ramps()[0].frame, 48000);
//! ```

mod automation;
mod error;
mod preset;
mod value;

/// Platform-specific paths for presets and configuration.
#[cfg(feature = "std")]
pub mod paths;

/// Preset and parameter validation.
pub mod validation;

/// Factory presets bundled with the library.
pub mod factory_presets;

pub use automation::{AutomationPoint, AutomationSchedule, ScheduledRamp};
pub use error::{ConfigError, IoOp};
pub use factory_presets::{
    FACTORY_PRESET_NAMES, factory_preset_names, factory_presets, get_factory_preset,
    is_factory_preset,
};
#[cfg(feature = "std")]
pub use paths::{
    ensure_user_presets_dir, find_preset, list_user_presets, preset_name_from_path,
    user_config_dir, user_presets_dir,
};
pub use preset::Preset;
pub use validation::{
    ValidationError, ValidationResult, validate_automation_length, validate_param,
    validate_preset,
};
pub use value::{parse_param_value, parse_time};
