//! Parameter introspection for discoverable node parameters.
//!
//! The [`ParameterInfo`] trait and [`ParamDescriptor`] let hosts, the CLI and
//! preset validation discover a node's parameters at runtime: their ranges,
//! defaults, units and how to map them to a normalized `[0, 1]` control.
//!
//! Parameters are accessed by zero-based index. For the equalizer node the
//! index is the host parameter address.
//!
//! # Example
//!
//! ```rust
//! use shelf_core::{ParameterInfo, ParamDescriptor, ParamId};
//!
//! struct Trim {
//!     gain: f32,
//! }
//!
//! impl ParameterInfo for Trim {
//!     fn param_count(&self) -> usize { 1 }
//!
//!     fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
//!         match index {
//!             0 => Some(ParamDescriptor::linear_gain("Gain", "Gain", 0.0, 4.0, 1.0)
//!                 .with_id(ParamId(10), "trim_gain")),
//!             _ => None,
//!         }
//!     }
//!
//!     fn get_param(&self, index: usize) -> f32 {
//!         match index {
//!             0 => self.gain,
//!             _ => 0.0,
//!         }
//!     }
//!
//!     fn set_param(&mut self, index: usize, value: f32) {
//!         if let Some(desc) = self.param_info(index) {
//!             self.gain = desc.clamp(value);
//!         }
//!     }
//! }
//!
//! let mut trim = Trim { gain: 1.0 };
//! trim.set_param(0, 9.0);
//! assert_eq!(trim.get_param(0), 4.0);
//! ```

use alloc::format;
use alloc::string::String;

/// Scaling curve for parameter normalization.
///
/// - **Linear**: `normalized = (value - min) / (max - min)`
/// - **Logarithmic**: `normalized = ln(value/min) / ln(max/min)`, requires `min > 0`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParamScale {
    /// Equal resolution across the range.
    #[default]
    Linear,
    /// More resolution at low values. Suits frequency controls.
    Logarithmic,
}

/// Stable parameter identifier that survives reordering.
///
/// Used for automation recording and preset persistence. Once assigned, a
/// `ParamId` must never change for a given parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParamId(pub u32);

/// Parameter capability flags for host communication.
///
/// ```rust
/// use shelf_core::ParamFlags;
///
/// let flags = ParamFlags::AUTOMATABLE.union(ParamFlags::CAN_RAMP);
/// assert!(flags.contains(ParamFlags::CAN_RAMP));
/// assert!(!flags.contains(ParamFlags::READ_ONLY));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamFlags(u8);

impl ParamFlags {
    /// No flags set.
    pub const NONE: Self = Self(0);
    /// Host can automate this parameter.
    pub const AUTOMATABLE: Self = Self(1 << 0);
    /// Parameter accepts ramped changes (`start_ramp`).
    pub const CAN_RAMP: Self = Self(1 << 1);
    /// Parameter is display only.
    pub const READ_ONLY: Self = Self(1 << 2);

    /// Returns `true` if all bits in `other` are set in `self`.
    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns the union of two flag sets.
    #[inline]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

impl Default for ParamFlags {
    fn default() -> Self {
        Self::AUTOMATABLE.union(Self::CAN_RAMP)
    }
}

/// Trait for nodes that expose introspectable parameters.
///
/// Implementations clamp in [`set_param`](Self::set_param), ignore
/// out-of-range indices, and return `0.0` from
/// [`get_param`](Self::get_param) for them.
pub trait ParameterInfo {
    /// Number of parameters; valid indices are `0..param_count()`.
    fn param_count(&self) -> usize;

    /// Descriptor for the parameter at `index`, `None` if out of range.
    fn param_info(&self, index: usize) -> Option<ParamDescriptor>;

    /// Current value of the parameter at `index`.
    fn get_param(&self, index: usize) -> f32;

    /// Sets the parameter at `index`, clamped to its range.
    fn set_param(&mut self, index: usize, value: f32);

    /// Find a parameter index by name (case-insensitive).
    ///
    /// Matches against [`ParamDescriptor::name`],
    /// [`ParamDescriptor::short_name`] and [`ParamDescriptor::string_id`].
    fn find_param_by_name(&self, name: &str) -> Option<usize> {
        (0..self.param_count()).find(|&i| {
            self.param_info(i).is_some_and(|desc| {
                desc.name.eq_ignore_ascii_case(name)
                    || desc.short_name.eq_ignore_ascii_case(name)
                    || desc.string_id.eq_ignore_ascii_case(name)
            })
        })
    }

    /// Finds a parameter index by its stable [`ParamId`].
    fn param_index_by_id(&self, id: ParamId) -> Option<usize> {
        (0..self.param_count()).find(|&i| self.param_info(i).is_some_and(|d| d.id == id))
    }
}

/// Describes a single parameter's metadata for display and validation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamDescriptor {
    /// Full parameter name for display (e.g., "Corner Frequency").
    pub name: &'static str,

    /// Short name for narrow displays, 8 characters or less.
    pub short_name: &'static str,

    /// Unit type for formatting the parameter value.
    pub unit: ParamUnit,

    /// Minimum allowed value.
    pub min: f32,

    /// Maximum allowed value.
    pub max: f32,

    /// Value after construction.
    pub default: f32,

    /// Recommended step increment for encoder-based control.
    pub step: f32,

    /// Stable numeric ID for automation and preset persistence.
    pub id: ParamId,

    /// Stable string ID used as the preset key (e.g., `"corner_frequency"`).
    pub string_id: &'static str,

    /// Normalization curve.
    pub scale: ParamScale,

    /// Capability flags.
    pub flags: ParamFlags,
}

impl ParamDescriptor {
    /// Frequency parameter in Hz with logarithmic scaling.
    pub fn frequency_hz(
        name: &'static str,
        short_name: &'static str,
        min: f32,
        max: f32,
        default: f32,
    ) -> Self {
        Self {
            name,
            short_name,
            unit: ParamUnit::Hertz,
            min,
            max,
            default,
            step: 1.0,
            id: ParamId(0),
            string_id: "",
            scale: ParamScale::Logarithmic,
            flags: ParamFlags::default(),
        }
    }

    /// Linear amplitude gain (1.0 = unity).
    pub fn linear_gain(
        name: &'static str,
        short_name: &'static str,
        min: f32,
        max: f32,
        default: f32,
    ) -> Self {
        Self {
            name,
            short_name,
            unit: ParamUnit::LinearGain,
            min,
            max,
            default,
            step: 0.01,
            id: ParamId(0),
            string_id: "",
            scale: ParamScale::Linear,
            flags: ParamFlags::default(),
        }
    }

    /// Dimensionless parameter such as Q.
    pub fn unitless(
        name: &'static str,
        short_name: &'static str,
        min: f32,
        max: f32,
        default: f32,
    ) -> Self {
        Self {
            name,
            short_name,
            unit: ParamUnit::None,
            min,
            max,
            default,
            step: 0.01,
            id: ParamId(0),
            string_id: "",
            scale: ParamScale::Linear,
            flags: ParamFlags::default(),
        }
    }

    /// Sets the stable parameter ID and string ID.
    pub const fn with_id(mut self, id: ParamId, string_id: &'static str) -> Self {
        self.id = id;
        self.string_id = string_id;
        self
    }

    /// Sets the normalization scale.
    pub const fn with_scale(mut self, scale: ParamScale) -> Self {
        self.scale = scale;
        self
    }

    /// Sets the parameter flags.
    pub const fn with_flags(mut self, flags: ParamFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Sets the recommended step.
    pub const fn with_step(mut self, step: f32) -> Self {
        self.step = step;
        self
    }

    /// Clamps a value to this parameter's valid range.
    ///
    /// NaN clamps to `min`.
    ///
    /// ```rust
    /// use shelf_core::ParamDescriptor;
    ///
    /// let desc = ParamDescriptor::unitless("Q", "Q", 0.0, 2.0, 0.707);
    /// assert_eq!(desc.clamp(3.0), 2.0);
    /// assert_eq!(desc.clamp(-1.0), 0.0);
    /// assert_eq!(desc.clamp(f32::NAN), 0.0);
    /// ```
    #[inline]
    pub fn clamp(&self, value: f32) -> f32 {
        if value.is_nan() || value < self.min {
            self.min
        } else if value > self.max {
            self.max
        } else {
            value
        }
    }

    /// Returns `true` if `value` lies inside `[min, max]`.
    #[inline]
    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }

    /// Converts a plain value to normalized range (0.0 to 1.0).
    #[inline]
    pub fn normalize(&self, value: f32) -> f32 {
        let range = self.max - self.min;
        if range == 0.0 {
            return 0.0;
        }
        match self.scale {
            ParamScale::Linear => (value - self.min) / range,
            ParamScale::Logarithmic => {
                if self.min <= 0.0 || value <= 0.0 {
                    return 0.0;
                }
                libm::logf(value / self.min) / libm::logf(self.max / self.min)
            }
        }
    }

    /// Converts a normalized value (0.0 to 1.0) to the parameter range.
    #[inline]
    pub fn denormalize(&self, normalized: f32) -> f32 {
        match self.scale {
            ParamScale::Linear => self.min + normalized * (self.max - self.min),
            ParamScale::Logarithmic => {
                if self.min <= 0.0 {
                    return self.min;
                }
                self.min * libm::powf(self.max / self.min, normalized)
            }
        }
    }

    /// Formats a value with this parameter's unit.
    ///
    /// ```rust
    /// use shelf_core::ParamDescriptor;
    ///
    /// let desc = ParamDescriptor::frequency_hz("Freq", "Freq", 12.0, 20000.0, 1000.0);
    /// assert_eq!(desc.format_value(440.0), "440 Hz");
    /// assert_eq!(desc.format_value(2500.0), "2.50 kHz");
    /// ```
    pub fn format_value(&self, value: f32) -> String {
        match self.unit {
            ParamUnit::Hertz if value >= 1000.0 => format!("{:.2} kHz", value / 1000.0),
            ParamUnit::Hertz => format!("{value:.0} Hz"),
            ParamUnit::LinearGain => format!(
                "{value:.2}x ({:+.1} dB)",
                crate::math::linear_to_db(value)
            ),
            ParamUnit::Decibels => format!("{value:.1} dB"),
            ParamUnit::None => format!("{value:.3}"),
        }
    }
}

/// Unit type for parameter display and formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamUnit {
    /// Hertz, for frequencies.
    Hertz,
    /// Linear amplitude multiplier.
    LinearGain,
    /// Decibels.
    Decibels,
    /// Dimensionless.
    None,
}

impl ParamUnit {
    /// Returns the unit suffix string for display.
    pub const fn suffix(&self) -> &'static str {
        match self {
            ParamUnit::Hertz => " Hz",
            ParamUnit::LinearGain => "x",
            ParamUnit::Decibels => " dB",
            ParamUnit::None => "",
        }
    }
}
