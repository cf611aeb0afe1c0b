//! Preset and parameter validation.
//!
//! The node itself never rejects a value: it clamps. Validation reports the
//! things a preset author would want to know about before that happens:
//! unknown parameter names, unparseable values, values that would be
//! clamped, and automation that starts after the audio ends.
//!
//! # Example
//!
//! ```rust
//! use shelf_config::{Preset, ValidationError, validate_preset};
//!
//! let preset = Preset::new("Hot").with_param("gain", "12");
//! let err = validate_preset(&preset).unwrap_err();
//! assert!(matches!(err, ValidationError::OutOfRange { .. }));
//! ```

use shelf_effects::low_shelf;
use thiserror::Error;

use crate::preset::Preset;
use crate::value::{parse_param_value, parse_time};

/// Validation error types.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// Unknown parameter name.
    #[error("unknown parameter '{param}'")]
    UnknownParameter {
        /// Name of the unrecognized parameter.
        param: String,
    },

    /// Parameter value out of range.
    #[error("parameter '{param}' value {value} out of range [{min}, {max}]")]
    OutOfRange {
        /// Name of the parameter.
        param: String,
        /// The value that was out of range.
        value: f32,
        /// Minimum allowed value.
        min: f32,
        /// Maximum allowed value.
        max: f32,
    },

    /// Invalid value or time format.
    #[error("invalid format for '{param}': {reason}")]
    InvalidFormat {
        /// Name of the parameter or field.
        param: String,
        /// Description of the format error.
        reason: String,
    },

    /// Automation entry that starts after the last frame of the audio.
    #[error("automation for '{param}' at frame {frame} starts after the end ({total_frames} frames)")]
    AutomationPastEnd {
        /// Parameter the entry targets.
        param: String,
        /// Start frame of the entry.
        frame: u64,
        /// Length of the audio in frames.
        total_frames: u64,
    },

    /// Multiple validation errors.
    #[error("multiple validation errors: {}", .0.iter().map(|e| e.to_string()).collect::<Vec<_>>().join("; "))]
    Multiple(Vec<ValidationError>),
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validates one parameter and returns its parsed value.
///
/// ```rust
/// use shelf_config::validate_param;
///
/// assert_eq!(validate_param("corner_frequency", "2kHz"), Ok(2000.0));
/// assert!(validate_param("q", "3").is_err());
/// ```
pub fn validate_param(name: &str, value: &str) -> ValidationResult<f32> {
    let desc = low_shelf::address_by_name(name)
        .and_then(low_shelf::descriptor)
        .ok_or_else(|| ValidationError::UnknownParameter {
            param: name.to_string(),
        })?;

    let parsed = parse_param_value(value).ok_or_else(|| ValidationError::InvalidFormat {
        param: name.to_string(),
        reason: format!("cannot parse '{value}'"),
    })?;

    if desc.contains(parsed) {
        Ok(parsed)
    } else {
        Err(ValidationError::OutOfRange {
            param: name.to_string(),
            value: parsed,
            min: desc.min,
            max: desc.max,
        })
    }
}

/// Validates every parameter, the dezipper length and every automation
/// entry of a preset. All problems are reported, not just the first.
pub fn validate_preset(preset: &Preset) -> ValidationResult<()> {
    let mut errors = Vec::new();

    for (name, value) in &preset.params {
        if let Err(e) = validate_param(name, value) {
            errors.push(e);
        }
    }

    if let Some(ms) = preset.dezipper_ms
        && !(ms.is_finite() && ms >= 0.0)
    {
        errors.push(ValidationError::InvalidFormat {
            param: "dezipper_ms".to_string(),
            reason: format!("{ms} is not a non-negative duration"),
        });
    }

    for point in &preset.automation {
        if let Err(e) = validate_param(&point.param, &point.value) {
            errors.push(e);
        }
        if parse_time(&point.at, preset.sample_rate).is_none() {
            errors.push(ValidationError::InvalidFormat {
                param: format!("{}.at", point.param),
                reason: format!("cannot parse time '{}'", point.at),
            });
        }
        if let Some(ramp) = &point.ramp
            && parse_time(ramp, preset.sample_rate).is_none_or(|f| u32::try_from(f).is_err())
        {
            errors.push(ValidationError::InvalidFormat {
                param: format!("{}.ramp", point.param),
                reason: format!("cannot parse duration '{ramp}'"),
            });
        }
    }

    collect(errors)
}

/// Reports automation entries that start at or after `total_frames` of
/// audio at `sample_rate`. Entries with unparseable times are skipped
/// (see [`validate_preset`]).
pub fn validate_automation_length(
    preset: &Preset,
    sample_rate: u32,
    total_frames: u64,
) -> ValidationResult<()> {
    let errors = preset
        .automation
        .iter()
        .filter_map(|point| {
            let frame = parse_time(&point.at, sample_rate)?;
            (frame >= total_frames).then(|| ValidationError::AutomationPastEnd {
                param: point.param.clone(),
                frame,
                total_frames,
            })
        })
        .collect();
    collect(errors)
}

fn collect(mut errors: Vec<ValidationError>) -> ValidationResult<()> {
    match errors.len() {
        0 => Ok(()),
        1 => Err(errors.remove(0)),
        _ => Err(ValidationError::Multiple(errors)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automation::AutomationPoint;

    #[test]
    fn test_validate_param_ok() {
        assert_eq!(validate_param("gain", "1.5"), Ok(1.5));
        assert_eq!(validate_param("Freq", "12Hz"), Ok(12.0));
        assert_eq!(validate_param("q", "0"), Ok(0.0));
    }

    #[test]
    fn test_validate_param_unknown() {
        assert_eq!(
            validate_param("drive", "1"),
            Err(ValidationError::UnknownParameter {
                param: "drive".to_string()
            })
        );
    }

    #[test]
    fn test_validate_param_format() {
        assert!(matches!(
            validate_param("gain", "lots"),
            Err(ValidationError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn test_validate_param_range() {
        let err = validate_param("corner_frequency", "5Hz").unwrap_err();
        assert_eq!(
            err,
            ValidationError::OutOfRange {
                param: "corner_frequency".to_string(),
                value: 5.0,
                min: 12.0,
                max: 20000.0,
            }
        );
        assert!(err.to_string().contains("out of range"));
    }

    #[test]
    fn test_validate_preset_collects_everything() {
        let preset = Preset::new("Messy")
            .with_param("gain", "20")
            .with_param("drive", "1")
            .with_dezipper_ms(-5.0)
            .with_automation(AutomationPoint::new("whenever", "q", "1"));

        match validate_preset(&preset) {
            Err(ValidationError::Multiple(errors)) => assert_eq!(errors.len(), 4),
            other => panic!("expected multiple errors, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_preset_clean() {
        let preset = Preset::new("Clean")
            .with_param("corner_frequency", "200Hz")
            .with_param("gain", "-3dB")
            .with_automation(AutomationPoint::new("1s", "q", "1.1").with_ramp("100ms"));
        assert_eq!(validate_preset(&preset), Ok(()));
    }

    #[test]
    fn test_validate_preset_bad_ramp() {
        let preset = Preset::new("Ramp")
            .with_automation(AutomationPoint::new("0", "gain", "2").with_ramp("soon"));
        assert!(matches!(
            validate_preset(&preset),
            Err(ValidationError::InvalidFormat { ref param, .. }) if param == "gain.ramp"
        ));
    }

    #[test]
    fn test_automation_past_end() {
        let preset = Preset::new("Late")
            .with_automation(AutomationPoint::new("0.5s", "gain", "2"))
            .with_automation(AutomationPoint::new("2s", "q", "1"));

        assert_eq!(validate_automation_length(&preset, 48000, 96001), Ok(()));

        let err = validate_automation_length(&preset, 48000, 48000).unwrap_err();
        assert_eq!(
            err,
            ValidationError::AutomationPastEnd {
                param: "q".to_string(),
                frame: 96000,
                total_frames: 48000,
            }
        );
    }

    #[test]
    fn test_multiple_display_joins_messages() {
        let err = ValidationError::Multiple(vec![
            ValidationError::UnknownParameter {
                param: "a".to_string(),
            },
            ValidationError::UnknownParameter {
                param: "b".to_string(),
            },
        ]);
        assert_eq!(
            err.to_string(),
            "multiple validation errors: unknown parameter 'a'; unknown parameter 'b'"
        );
    }
}
