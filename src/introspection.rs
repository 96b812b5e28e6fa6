//! Parameter Introspection
//!
//! Range, unit, scaling and display metadata for every control, so a host can
//! map normalized (0-1) automation lanes onto real values and print them.

use crate::params::{ParamId, ParameterSet, MIN_GAIN_DB};
use libm::Libm;
use serde::{Deserialize, Serialize};

// =============================================================================
// Parameter Value Formatting
// =============================================================================

/// How to format parameter values for display
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum ValueFormat {
    /// Time in ms
    Milliseconds,
    /// Frequency in Hz
    Frequency,
    /// Level in decibels, with the silence floor shown as -inf
    Decibels,
    /// Angle in degrees
    Degrees,
}

impl ValueFormat {
    /// Format a value for display
    pub fn format(&self, value: f64) -> String {
        match self {
            ValueFormat::Milliseconds => format!("{:.1} ms", value),
            ValueFormat::Frequency => format!("{:.2} Hz", value),
            ValueFormat::Decibels => {
                if value <= MIN_GAIN_DB {
                    "-inf dB".into()
                } else {
                    format!("{:.1} dB", value)
                }
            }
            ValueFormat::Degrees => format!("{:.0}°", value),
        }
    }
}

// =============================================================================
// Parameter Curve (Value Scaling)
// =============================================================================

/// How normalized values are spread between min and max
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ParamCurve {
    #[default]
    Linear,
    /// Equal ratios per equal knob travel (rate, time)
    Exponential,
}

impl ParamCurve {
    /// Knob scaling used for each control: exponential for times and rates,
    /// linear for levels and angles
    pub fn for_id(id: ParamId) -> Self {
        match id {
            ParamId::Delay | ParamId::Rate | ParamId::Depth => ParamCurve::Exponential,
            ParamId::Feedback | ParamId::WetMix | ParamId::DryMix | ParamId::StereoOffset => {
                ParamCurve::Linear
            }
        }
    }

    /// Apply the curve to a normalized (0-1) value, returning the actual value
    pub fn apply(&self, normalized: f64, min: f64, max: f64) -> f64 {
        let n = if normalized.is_nan() {
            0.0
        } else {
            normalized.clamp(0.0, 1.0)
        };
        match self {
            ParamCurve::Linear => min + n * (max - min),
            ParamCurve::Exponential => {
                if min <= 0.0 {
                    min + n * (max - min)
                } else {
                    min * Libm::<f64>::pow(max / min, n)
                }
            }
        }
    }

    /// Convert an actual value to normalized (0-1) based on this curve
    pub fn normalize(&self, value: f64, min: f64, max: f64) -> f64 {
        if (max - min).abs() < 1e-10 {
            return 0.0;
        }

        match self {
            ParamCurve::Exponential if min > 0.0 && value > 0.0 => {
                let ratio = Libm::<f64>::log(value / min) / Libm::<f64>::log(max / min);
                ratio.clamp(0.0, 1.0)
            }
            _ => ((value - min) / (max - min)).clamp(0.0, 1.0),
        }
    }
}

// =============================================================================
// Parameter Information
// =============================================================================

/// Complete descriptor for one control of one instance
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParamInfo {
    pub id: ParamId,
    /// Display name (e.g., "Delay", "Feedback")
    pub name: String,
    pub value: f64,
    pub min: f64,
    pub max: f64,
    pub default: f64,
    pub curve: ParamCurve,
    pub unit: String,
    pub format: ValueFormat,
}

impl ParamInfo {
    /// Describe `id` using the limits, current value and kind defaults of `params`.
    ///
    /// Allocates the display strings; for host UIs, not the audio thread.
    pub fn describe(id: ParamId, params: &ParameterSet) -> Self {
        let range = params.limits().range(id);
        let (name, unit, format) = match id {
            ParamId::Delay => ("Delay", "ms", ValueFormat::Milliseconds),
            ParamId::Rate => ("Rate", "Hz", ValueFormat::Frequency),
            ParamId::Depth => ("Depth", "ms", ValueFormat::Milliseconds),
            ParamId::Feedback => ("Feedback", "dB", ValueFormat::Decibels),
            ParamId::WetMix => ("Wet", "dB", ValueFormat::Decibels),
            ParamId::DryMix => ("Dry", "dB", ValueFormat::Decibels),
            ParamId::StereoOffset => ("Stereo", "deg", ValueFormat::Degrees),
        };

        Self {
            id,
            name: name.into(),
            value: params.get_param(id),
            min: range.min,
            max: range.max,
            default: params.kind().default_values().get(id),
            curve: ParamCurve::for_id(id),
            unit: unit.into(),
            format,
        }
    }

    /// Get the normalized (0-1) value
    pub fn normalized(&self) -> f64 {
        self.curve.normalize(self.value, self.min, self.max)
    }

    /// Map a normalized (0-1) input onto this control's range
    pub fn denormalize(&self, normalized: f64) -> f64 {
        self.curve.apply(normalized, self.min, self.max)
    }

    /// Format the current value for display
    pub fn format_value(&self) -> String {
        self.format.format(self.value)
    }
}

/// Descriptors for every control, in `ParamId::ALL` order
pub fn param_infos(params: &ParameterSet) -> Vec<ParamInfo> {
    ParamId::ALL
        .iter()
        .map(|&id| ParamInfo::describe(id, params))
        .collect()
}
