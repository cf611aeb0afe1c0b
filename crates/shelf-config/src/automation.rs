//! Parameter automation: ramps scheduled at absolute positions in a file.
//!
//! A preset's `[[automation]]` entries are resolved against a sample rate
//! into an [`AutomationSchedule`], which then hands out per-block
//! [`RenderEvent`]s with block-relative frame offsets.

use serde::{Deserialize, Serialize};
use shelf_core::{ParamAddress, RenderEvent};
use shelf_effects::low_shelf;

use crate::error::ConfigError;
use crate::value::{parse_param_value, parse_time};

/// One automation entry as written in a preset.
///
/// ```toml
/// [[automation]]
/// at = "1.5s"
/// param = "corner_frequency"
/// value = "400Hz"
/// ramp = "250ms"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AutomationPoint {
    /// Start position: frames, `"ms"` or `"s"`.
    pub at: String,

    /// Parameter name (string id, name or short name).
    pub param: String,

    /// Target value, same syntax as preset parameters.
    pub value: String,

    /// Ramp duration; absent means an immediate change.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ramp: Option<String>,
}

impl AutomationPoint {
    /// Create an immediate change.
    pub fn new(at: impl Into<String>, param: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            at: at.into(),
            param: param.into(),
            value: value.into(),
            ramp: None,
        }
    }

    /// Turn the change into a ramp of the given duration.
    pub fn with_ramp(mut self, ramp: impl Into<String>) -> Self {
        self.ramp = Some(ramp.into());
        self
    }

    /// Resolves names, values and times at `sample_rate`.
    ///
    /// The value is not clamped here; the node clamps when the event is
    /// applied.
    pub fn resolve(&self, sample_rate: u32) -> Result<ScheduledRamp, ConfigError> {
        let address = low_shelf::address_by_name(&self.param)
            .ok_or_else(|| ConfigError::UnknownParameter(self.param.clone()))?;
        let value = parse_param_value(&self.value)
            .ok_or_else(|| ConfigError::invalid_value(&self.param, &self.value))?;
        let frame = parse_time(&self.at, sample_rate)
            .ok_or_else(|| ConfigError::invalid_value("at", &self.at))?;
        let ramp_frames = match &self.ramp {
            Some(ramp) => parse_time(ramp, sample_rate)
                .and_then(|f| u32::try_from(f).ok())
                .ok_or_else(|| ConfigError::invalid_value("ramp", ramp))?,
            None => 0,
        };

        Ok(ScheduledRamp {
            frame,
            address,
            value,
            ramp_frames,
        })
    }
}

/// A resolved automation entry at an absolute frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScheduledRamp {
    /// Absolute start frame.
    pub frame: u64,
    /// Target parameter.
    pub address: ParamAddress,
    /// Target value.
    pub value: f32,
    /// Ramp length in frames.
    pub ramp_frames: u32,
}

/// Time-ordered automation for one render pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AutomationSchedule {
    ramps: Vec<ScheduledRamp>,
}

impl AutomationSchedule {
    /// Resolves `points` at `sample_rate` and sorts them by start frame.
    ///
    /// Entries at the same frame keep their written order.
    pub fn resolve(points: &[AutomationPoint], sample_rate: u32) -> Result<Self, ConfigError> {
        let mut ramps = points
            .iter()
            .map(|p| p.resolve(sample_rate))
            .collect::<Result<Vec<_>, _>>()?;
        ramps.sort_by_key(|r| r.frame);
        Ok(Self { ramps })
    }

    /// Builds a schedule from already-resolved ramps.
    pub fn from_ramps(mut ramps: Vec<ScheduledRamp>) -> Self {
        ramps.sort_by_key(|r| r.frame);
        Self { ramps }
    }

    /// Adds a ramp, keeping frame order.
    pub fn push(&mut self, ramp: ScheduledRamp) {
        let index = self.ramps.partition_point(|r| r.frame <= ramp.frame);
        self.ramps.insert(index, ramp);
    }

    /// All ramps in start order.
    pub fn ramps(&self) -> &[ScheduledRamp] {
        &self.ramps
    }

    /// Number of scheduled ramps.
    pub fn len(&self) -> usize {
        self.ramps.len()
    }

    /// Returns true if nothing is scheduled.
    pub fn is_empty(&self) -> bool {
        self.ramps.is_empty()
    }

    /// Last start frame, if any.
    pub fn last_frame(&self) -> Option<u64> {
        self.ramps.last().map(|r| r.frame)
    }

    /// Writes the events starting inside `block_start..block_start + frames`
    /// into `out` with block-relative offsets. `out` is cleared first.
    pub fn block_events(&self, block_start: u64, frames: usize, out: &mut Vec<RenderEvent>) {
        out.clear();
        let block_end = block_start + frames as u64;
        let first = self.ramps.partition_point(|r| r.frame < block_start);
        out.extend(
            self.ramps[first..]
                .iter()
                .take_while(|r| r.frame < block_end)
                .map(|r| {
                    RenderEvent::ramp(
                        (r.frame - block_start) as usize,
                        r.address,
                        r.value,
                        r.ramp_frames,
                    )
                }),
        );
    }
}
