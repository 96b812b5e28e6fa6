//! Error types for the effects engine
//!
//! Only configuration-time operations can fail: preset lookup, preset table
//! loading and the block length check that runs before any sample is
//! processed. Out-of-range parameter values are clamped, never reported.

use crate::params::ParamId;
use thiserror::Error;

/// Errors raised at the edges of the engine
#[derive(Debug, Error)]
pub enum EngineError {
    /// No preset with this name exists in the table
    #[error("Unknown preset '{name}'")]
    UnknownPreset { name: String },

    /// A preset literal holds a value outside its effect kind's limits
    #[error("Preset '{name}' has {param} = {value}, outside the allowed range")]
    InvalidPreset {
        name: String,
        param: ParamId,
        value: f64,
    },

    /// A preset table holds the same name twice
    #[error("Duplicate preset name '{name}'")]
    DuplicatePreset { name: String },

    /// Stereo input/output slices of a block differ in length
    #[error("Block length mismatch: left {left}, right {right}, out_left {out_left}, out_right {out_right}")]
    BlockLengthMismatch {
        left: usize,
        right: usize,
        out_left: usize,
        out_right: usize,
    },

    /// Preset table JSON could not be parsed or written
    #[cfg(feature = "json")]
    #[error("Preset JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl EngineError {
    pub(crate) fn unknown_preset(name: impl Into<String>) -> Self {
        EngineError::UnknownPreset { name: name.into() }
    }
}
