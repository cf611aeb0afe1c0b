//! Parsing of parameter value and time strings.
//!
//! Preset values are strings so they can carry units: `"180Hz"`, `"1.2kHz"`,
//! `"+6dB"`, `"150%"`, or a plain number. Times for automation accept plain
//! frame counts, `"ms"` or `"s"`.

/// Parse a parameter value string into an f32.
///
/// Supports:
/// - Plain numbers: "0.5", "1000", "-0.3"
/// - Percentages: "50%", "120%" (divided by 100)
/// - Decibels: "-6dB", "+3dB" (converted to linear gain)
/// - Frequency in Hz: "440Hz"
/// - Frequency in kHz: "1.2kHz" (converted to Hz)
///
/// ```rust
/// use shelf_config::parse_param_value;
///
/// assert_eq!(parse_param_value("1.2kHz"), Some(1200.0));
/// assert_eq!(parse_param_value("150%"), Some(1.5));
/// assert!((parse_param_value("+6dB").unwrap() - 1.995).abs() < 0.001);
/// assert_eq!(parse_param_value("loud"), None);
/// ```
pub fn parse_param_value(value: &str) -> Option<f32> {
    let value = value.trim();

    // Percentages
    if let Some(pct) = value.strip_suffix('%') {
        return parse_number(pct).map(|v| v / 100.0);
    }

    // Decibels
    if let Some(db) = value
        .strip_suffix("dB")
        .or_else(|| value.strip_suffix("db"))
    {
        return parse_number(db).map(|v| libm::powf(10.0, v / 20.0));
    }

    // Kilohertz
    if let Some(khz) = value
        .strip_suffix("kHz")
        .or_else(|| value.strip_suffix("khz"))
    {
        return parse_number(khz).map(|v| v * 1000.0);
    }

    // Hertz
    if let Some(hz) = value
        .strip_suffix("Hz")
        .or_else(|| value.strip_suffix("hz"))
    {
        return parse_number(hz);
    }

    parse_number(value)
}

/// Parse a time string into a frame count at `sample_rate`.
///
/// Supports:
/// - Plain numbers: frames, "4800"
/// - Milliseconds: "250ms"
/// - Seconds: "1.5s"
///
/// Negative or non-finite times return `None`. Fractional frames round to
/// the nearest frame.
///
/// ```rust
/// use shelf_config::parse_time;
///
/// assert_eq!(parse_time("1.5s", 48000), Some(72000));
/// assert_eq!(parse_time("20ms", 44100), Some(882));
/// assert_eq!(parse_time("512", 48000), Some(512));
/// assert_eq!(parse_time("-1s", 48000), None);
/// ```
pub fn parse_time(value: &str, sample_rate: u32) -> Option<u64> {
    let value = value.trim();
    let sr = f64::from(sample_rate);

    let frames = if let Some(ms) = value.strip_suffix("ms") {
        ms.trim().parse::<f64>().ok()? * sr / 1000.0
    } else if let Some(s) = value.strip_suffix('s') {
        s.trim().parse::<f64>().ok()? * sr
    } else {
        value.parse::<f64>().ok()?
    };

    if frames.is_finite() && frames >= 0.0 {
        Some(frames.round() as u64)
    } else {
        None
    }
}

fn parse_number(text: &str) -> Option<f32> {
    text.trim().parse::<f32>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_numbers() {
        assert_eq!(parse_param_value("0.5"), Some(0.5));
        assert_eq!(parse_param_value("1000"), Some(1000.0));
        assert_eq!(parse_param_value("-0.3"), Some(-0.3));
        assert_eq!(parse_param_value("  0.707  "), Some(0.707));
    }

    #[test]
    fn test_parse_percentages() {
        assert_eq!(parse_param_value("50%"), Some(0.5));
        assert_eq!(parse_param_value("100%"), Some(1.0));
        assert_eq!(parse_param_value("0%"), Some(0.0));
    }

    #[test]
    fn test_parse_decibels() {
        let val = parse_param_value("0dB").unwrap();
        assert!((val - 1.0).abs() < 0.001);

        let val = parse_param_value("-6dB").unwrap();
        assert!((val - 0.5).abs() < 0.05);

        let val = parse_param_value("+12 dB").unwrap();
        assert!((val - 3.98).abs() < 0.01);

        let val = parse_param_value("-6db").unwrap();
        assert!((val - 0.5).abs() < 0.05);
    }

    #[test]
    fn test_parse_frequency() {
        assert_eq!(parse_param_value("440Hz"), Some(440.0));
        assert_eq!(parse_param_value("440 hz"), Some(440.0));
        assert_eq!(parse_param_value("1.2kHz"), Some(1200.0));
        assert_eq!(parse_param_value("20khz"), Some(20000.0));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse_param_value(""), None);
        assert_eq!(parse_param_value("abc"), None);
        assert_eq!(parse_param_value("Hz"), None);
        assert_eq!(parse_param_value("inf"), None);
        assert_eq!(parse_param_value("NaN"), None);
    }

    #[test]
    fn test_parse_time_units() {
        assert_eq!(parse_time("0", 48000), Some(0));
        assert_eq!(parse_time("100ms", 48000), Some(4800));
        assert_eq!(parse_time("2s", 44100), Some(88200));
        assert_eq!(parse_time(" 0.5 s ", 48000), Some(24000));
        assert_eq!(parse_time("1000", 48000), Some(1000));
    }

    #[test]
    fn test_parse_time_rounds() {
        assert_eq!(parse_time("0.01ms", 48000), Some(0));
        assert_eq!(parse_time("10.6", 48000), Some(11));
    }

    #[test]
    fn test_parse_time_rejects_invalid() {
        assert_eq!(parse_time("-5", 48000), None);
        assert_eq!(parse_time("soon", 48000), None);
        assert_eq!(parse_time("ms", 48000), None);
    }
}
