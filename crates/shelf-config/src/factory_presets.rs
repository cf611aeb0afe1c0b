//! Factory presets compiled into the library.

use crate::Preset;

/// Names of the factory presets, in listing order.
pub static FACTORY_PRESET_NAMES: &[&str] = &["flat", "warm_bass", "rumble_cut", "sweep"];

static FACTORY_PRESETS_TOML: &[(&str, &str)] = &[
    ("flat", FLAT_PRESET),
    ("warm_bass", WARM_BASS_PRESET),
    ("rumble_cut", RUMBLE_CUT_PRESET),
    ("sweep", SWEEP_PRESET),
];

const FLAT_PRESET: &str = r#"
name = "Flat"
description = "Unity gain at the default corner"

[params]
corner_frequency = "1kHz"
gain = "1.0"
q = "0.707"
"#;

const WARM_BASS_PRESET: &str = r#"
name = "Warm Bass"
description = "Gentle low boost below 180 Hz"

[params]
corner_frequency = "180Hz"
gain = "+6dB"
q = "0.707"
"#;

const RUMBLE_CUT_PRESET: &str = r#"
name = "Rumble Cut"
description = "Strong cut below 60 Hz"

[params]
corner_frequency = "60Hz"
gain = "-18dB"
q = "0.5"
"#;

const SWEEP_PRESET: &str = r#"
name = "Sweep"
description = "Boosted shelf swept up over four seconds"
dezipper_ms = 10.0

[params]
corner_frequency = "80Hz"
gain = "+9dB"
q = "0.9"

[[automation]]
at = "0s"
param = "corner_frequency"
value = "2kHz"
ramp = "4s"
"#;

/// All factory presets, parsed.
///
/// Presets that fail to parse are skipped; the crate's tests keep the list
/// complete.
pub fn factory_presets() -> Vec<Preset> {
    FACTORY_PRESETS_TOML
        .iter()
        .filter_map(|(_, toml)| Preset::from_toml(toml).ok())
        .collect()
}

/// A factory preset by name (case-insensitive).
pub fn get_factory_preset(name: &str) -> Option<Preset> {
    FACTORY_PRESETS_TOML
        .iter()
        .find(|(id, _)| id.eq_ignore_ascii_case(name))
        .and_then(|(_, toml)| Preset::from_toml(toml).ok())
}

/// Factory preset names.
pub fn factory_preset_names() -> Vec<&'static str> {
    FACTORY_PRESET_NAMES.to_vec()
}

/// Returns true if `name` names a factory preset.
pub fn is_factory_preset(name: &str) -> bool {
    FACTORY_PRESET_NAMES
        .iter()
        .any(|id| id.eq_ignore_ascii_case(name))
}
