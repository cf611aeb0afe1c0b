//! Preset file format and operations.

use serde::{Deserialize, Serialize};
use shelf_core::{AudioKernel, ParamAddress, ms_to_samples};
use shelf_effects::{LowShelfParametricEq, low_shelf};
use std::collections::BTreeMap;
use std::path::Path;

use crate::automation::{AutomationPoint, AutomationSchedule};
use crate::error::ConfigError;
use crate::value::parse_param_value;

/// Preset file format for the low-shelf node.
///
/// Presets are stored as TOML files holding the node's parameters and an
/// optional automation list. They can be loaded from files, created
/// programmatically, and saved to disk.
///
/// # TOML Format
///
/// ```toml
/// name = "Warm Bass"
/// description = "Gentle low boost"
/// sample_rate = 48000
/// bypassed = false
/// dezipper_ms = 20.0
///
/// [params]
/// corner_frequency = "180Hz"
/// gain = "+6dB"
/// q = "0.707"
///
/// [[automation]]
/// at = "1.5s"
/// param = "corner_frequency"
/// value = "400Hz"
/// ramp = "250ms"
/// ```
///
/// Parameter values are strings so they can carry units; see
/// [`parse_param_value`]. Missing parameters keep the node's defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Preset {
    /// Name of the preset.
    pub name: String,

    /// Optional description of the preset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Sample rate the automation times are resolved at when the audio's
    /// own rate is unknown (defaults to 48000).
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,

    /// Whether the node starts stopped (pass-through).
    #[serde(default)]
    pub bypassed: bool,

    /// Dezipper length for control writes; absent uses the node default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dezipper_ms: Option<f32>,

    /// Parameter values keyed by parameter name.
    #[serde(default)]
    pub params: BTreeMap<String, String>,

    /// Scheduled parameter changes.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub automation: Vec<AutomationPoint>,
}

fn default_sample_rate() -> u32 {
    48000
}

impl Preset {
    /// Create a new preset with default parameters.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            sample_rate: default_sample_rate(),
            bypassed: false,
            dezipper_ms: None,
            params: BTreeMap::new(),
            automation: Vec::new(),
        }
    }

    /// Create a preset with a description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the sample rate hint.
    pub fn with_sample_rate(mut self, sample_rate: u32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    /// Set whether the node starts bypassed.
    pub fn with_bypass(mut self, bypassed: bool) -> Self {
        self.bypassed = bypassed;
        self
    }

    /// Set the dezipper length in milliseconds.
    pub fn with_dezipper_ms(mut self, ms: f32) -> Self {
        self.dezipper_ms = Some(ms);
        self
    }

    /// Add a parameter value.
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Add an automation entry.
    pub fn with_automation(mut self, point: AutomationPoint) -> Self {
        self.automation.push(point);
        self
    }

    /// Load a preset from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        let preset: Preset = toml::from_str(&content)?;
        Ok(preset)
    }

    /// Load a preset from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Save the preset to a TOML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))?;
        Ok(())
    }

    /// Convert the preset to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Get a raw parameter value.
    pub fn get_param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// Set a raw parameter value.
    pub fn set_param(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.params.insert(key.into(), value.into());
    }

    /// Parse a parameter value as f32.
    pub fn parse_param(&self, key: &str) -> Option<f32> {
        self.params.get(key).and_then(|v| parse_param_value(v))
    }

    /// Resolves every parameter to an address and an unclamped value.
    pub fn resolved_params(&self) -> Result<Vec<(ParamAddress, f32)>, ConfigError> {
        self.params
            .iter()
            .map(|(key, raw)| {
                let address = low_shelf::address_by_name(key)
                    .ok_or_else(|| ConfigError::UnknownParameter(key.clone()))?;
                let value =
                    parse_param_value(raw).ok_or_else(|| ConfigError::invalid_value(key, raw))?;
                Ok((address, value))
            })
            .collect()
    }

    /// Resolves the automation list at `sample_rate`.
    pub fn schedule(&self, sample_rate: u32) -> Result<AutomationSchedule, ConfigError> {
        AutomationSchedule::resolve(&self.automation, sample_rate)
    }

    /// Loads the preset into an initialized node.
    ///
    /// Parameters jump immediately (and clamp). `bypassed` stops the node.
    /// The dezipper length is converted at the node's sample rate.
    pub fn apply(&self, eq: &mut LowShelfParametricEq) -> Result<(), ConfigError> {
        for (address, value) in self.resolved_params()? {
            match address {
                low_shelf::CORNER_FREQUENCY => eq.set_corner_frequency(value),
                low_shelf::GAIN => eq.set_gain(value),
                low_shelf::Q => eq.set_q(value),
                _ => {}
            }
        }

        if let Some(ms) = self.dezipper_ms {
            if !(ms.is_finite() && ms >= 0.0) {
                return Err(ConfigError::invalid_value("dezipper_ms", ms.to_string()));
            }
            eq.set_dezipper_frames(ms_to_samples(ms, eq.sample_rate()) as u32);
        }

        if self.bypassed {
            eq.stop();
        }
        Ok(())
    }
}

impl Default for Preset {
    fn default() -> Self {
        Self::new("Untitled")
    }
}
