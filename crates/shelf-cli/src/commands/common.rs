//! Shared CLI helpers used across multiple commands.

use shelf_config::{AutomationPoint, Preset, find_preset, get_factory_preset, parse_param_value};
use shelf_core::linear_to_db;

/// Parse a unit-aware parameter value for clap's `value_parser`.
pub fn parse_value(s: &str) -> Result<f32, String> {
    parse_param_value(s).ok_or_else(|| format!("Invalid value: '{s}'"))
}

/// Parse `at:param=value[:duration]` into an automation entry.
///
/// ```text
/// 1.5s:corner_frequency=400Hz:250ms
/// 48000:gain=+6dB
/// ```
pub fn parse_ramp(s: &str) -> Result<AutomationPoint, String> {
    let parts: Vec<&str> = s.split(':').collect();
    let (at, assignment, ramp) = match parts.as_slice() {
        [at, assignment] => (*at, *assignment, None),
        [at, assignment, ramp] => (*at, *assignment, Some(*ramp)),
        _ => {
            return Err(format!(
                "Invalid ramp format: '{s}' (expected at:param=value[:duration])"
            ));
        }
    };

    let (param, value) = assignment
        .split_once('=')
        .filter(|(p, v)| !p.is_empty() && !v.is_empty())
        .ok_or_else(|| format!("Invalid ramp assignment: '{assignment}' (expected param=value)"))?;

    let point = AutomationPoint::new(at.trim(), param.trim(), value.trim());
    Ok(match ramp {
        Some(ramp) => point.with_ramp(ramp.trim()),
        None => point,
    })
}

/// Load a preset by factory name, user preset name or file path.
pub fn load_preset(name: &str) -> anyhow::Result<Preset> {
    if let Some(preset) = get_factory_preset(name) {
        return Ok(preset);
    }

    if let Some(path) = find_preset(name) {
        return Ok(Preset::load(&path)?);
    }

    anyhow::bail!(
        "Preset '{}' not found (factory presets: {})",
        name,
        shelf_config::FACTORY_PRESET_NAMES.join(", ")
    )
}

/// Format a linear level in dBFS.
pub fn format_db(linear: f32) -> String {
    if linear <= 0.0 {
        "-inf dB".to_string()
    } else {
        format!("{:.1} dB", linear_to_db(linear))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ramp_with_duration() {
        let point = parse_ramp("1.5s:corner_frequency=400Hz:250ms").unwrap();
        assert_eq!(point.at, "1.5s");
        assert_eq!(point.param, "corner_frequency");
        assert_eq!(point.value, "400Hz");
        assert_eq!(point.ramp.as_deref(), Some("250ms"));
    }

    #[test]
    fn test_parse_ramp_immediate() {
        let point = parse_ramp("48000:gain=+6dB").unwrap();
        assert_eq!(point.value, "+6dB");
        assert!(point.ramp.is_none());
    }

    #[test]
    fn test_parse_ramp_rejects_bad_input() {
        assert!(parse_ramp("gain=2").is_err());
        assert!(parse_ramp("0:gain").is_err());
        assert!(parse_ramp("0:=2").is_err());
        assert!(parse_ramp("0:gain=2:1s:extra").is_err());
    }

    #[test]
    fn test_parse_value() {
        assert_eq!(parse_value("2kHz"), Ok(2000.0));
        assert!(parse_value("loud").is_err());
    }

    #[test]
    fn test_load_factory_preset() {
        assert_eq!(load_preset("warm_bass").unwrap().name, "Warm Bass");
        assert!(load_preset("no_such_preset_here").is_err());
    }

    #[test]
    fn test_format_db() {
        assert_eq!(format_db(1.0), "0.0 dB");
        assert_eq!(format_db(0.0), "-inf dB");
    }
}
