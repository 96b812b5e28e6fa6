//! Preset Library
//!
//! Named, pre-validated parameter bundles and a factory that builds a fresh
//! [`EffectInstance`] from a name. Every preset is checked against its effect
//! kind's clamp ranges once, when the table is built; lookups afterwards never
//! re-validate.
//!
//! # Example
//!
//! ```ignore
//! use modfx::prelude::*;
//!
//! let table = PresetTable::new()?;
//!
//! for preset in table.list() {
//!     println!("{}: {}", preset.name, preset.description);
//! }
//!
//! let mut chorus = table.create("classic", 48_000)?;
//! let lush = table.search_tags(&["lush"]);
//! ```

use crate::engine::EffectInstance;
use crate::error::EngineError;
use crate::params::{EffectKind, ParameterSet, ParameterValues, MIN_GAIN_DB};
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Light doubling, barely modulated
pub const SUBTLE: ParameterValues = ParameterValues {
    delay_ms: 15.0,
    rate_hz: 0.5,
    depth_ms: 2.0,
    feedback_db: -60.0,
    wet_mix_db: -12.0,
    dry_mix_db: -3.0,
    stereo_offset_deg: 90.0,
};

/// The textbook stereo chorus
pub const CLASSIC: ParameterValues = ParameterValues {
    delay_ms: 20.0,
    rate_hz: 1.5,
    depth_ms: 5.0,
    feedback_db: -40.0,
    wet_mix_db: -6.0,
    dry_mix_db: -6.0,
    stereo_offset_deg: 90.0,
};

/// Deeper, slower sweep with some regeneration
pub const RICH: ParameterValues = ParameterValues {
    delay_ms: 30.0,
    rate_hz: 1.0,
    depth_ms: 10.0,
    feedback_db: -20.0,
    wet_mix_db: -4.0,
    dry_mix_db: -6.0,
    stereo_offset_deg: 120.0,
};

/// Bucket-brigade style warble
pub const VINTAGE: ParameterValues = ParameterValues {
    delay_ms: 25.0,
    rate_hz: 0.8,
    depth_ms: 8.0,
    feedback_db: -12.0,
    wet_mix_db: -6.0,
    dry_mix_db: -4.0,
    stereo_offset_deg: 90.0,
};

/// Wide ensemble, channels in anti-phase
pub const THICK: ParameterValues = ParameterValues {
    delay_ms: 40.0,
    rate_hz: 2.0,
    depth_ms: 15.0,
    feedback_db: -10.0,
    wet_mix_db: -3.0,
    dry_mix_db: -6.0,
    stereo_offset_deg: 180.0,
};

/// Slow jet-plane flanger sweep
pub const JET: ParameterValues = ParameterValues {
    delay_ms: 2.5,
    rate_hz: 0.2,
    depth_ms: 2.0,
    feedback_db: -3.0,
    wet_mix_db: -3.0,
    dry_mix_db: -3.0,
    stereo_offset_deg: 90.0,
};

/// Wet-only pitch vibrato
pub const WARBLE: ParameterValues = ParameterValues {
    delay_ms: 6.0,
    rate_hz: 6.0,
    depth_ms: 1.5,
    feedback_db: MIN_GAIN_DB,
    wet_mix_db: 0.0,
    dry_mix_db: MIN_GAIN_DB,
    stereo_offset_deg: 0.0,
};

/// A named parameter literal for one effect kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preset {
    pub name: String,
    #[serde(default)]
    pub kind: EffectKind,
    #[serde(default)]
    pub description: String,
    /// Tags for searching
    #[serde(default)]
    pub tags: Vec<String>,
    pub values: ParameterValues,
}

impl Preset {
    pub fn new(name: impl Into<String>, kind: EffectKind, values: ParameterValues) -> Self {
        Self {
            name: name.into(),
            kind,
            description: String::new(),
            tags: Vec::new(),
            values,
        }
    }

    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = desc.into();
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Check every field against the kind's clamp ranges
    pub fn validate(&self) -> Result<(), EngineError> {
        self.kind
            .limits()
            .validate(&self.values)
            .map_err(|(param, value)| EngineError::InvalidPreset {
                name: self.name.clone(),
                param,
                value,
            })
    }

    /// Parameters for this preset at the given sample rate (a copy of the literal)
    pub fn params(&self, sample_rate_hz: u32) -> ParameterSet {
        ParameterSet::from_values(self.kind, sample_rate_hz, self.values)
    }

    /// Build a fresh instance from this preset
    pub fn build(&self, sample_rate_hz: u32) -> EffectInstance {
        EffectInstance::from_params(self.params(sample_rate_hz))
    }
}

/// The built-in presets, unvalidated
fn builtin_presets() -> Vec<Preset> {
    vec![
        Preset::new("subtle", EffectKind::Chorus, SUBTLE)
            .with_description("Light doubling with a slow, shallow sweep")
            .with_tag("doubling")
            .with_tag("gentle"),
        Preset::new("classic", EffectKind::Chorus, CLASSIC)
            .with_description("Standard stereo chorus")
            .with_tag("stereo")
            .with_tag("bread-and-butter"),
        Preset::new("rich", EffectKind::Chorus, RICH)
            .with_description("Deep sweep with light regeneration")
            .with_tag("lush")
            .with_tag("deep"),
        Preset::new("vintage", EffectKind::Chorus, VINTAGE)
            .with_description("Bucket-brigade style warble")
            .with_tag("analog")
            .with_tag("warm"),
        Preset::new("thick", EffectKind::Chorus, THICK)
            .with_description("Wide anti-phase ensemble")
            .with_tag("lush")
            .with_tag("wide")
            .with_tag("ensemble"),
        Preset::new("jet", EffectKind::Flanger, JET)
            .with_description("Slow resonant flanger sweep")
            .with_tag("flanger")
            .with_tag("resonant"),
        Preset::new("warble", EffectKind::Vibrato, WARBLE)
            .with_description("Wet-only pitch vibrato")
            .with_tag("vibrato")
            .with_tag("pitch"),
    ]
}

/// Validated mapping of preset name to parameter literal
#[derive(Debug, Clone, PartialEq)]
pub struct PresetTable {
    presets: Vec<Preset>,
}

impl PresetTable {
    /// The built-in table
    pub fn new() -> Result<Self, EngineError> {
        Self::with_presets(builtin_presets())
    }

    /// Build a table from custom presets, validating each one and rejecting
    /// duplicate names
    pub fn with_presets(presets: Vec<Preset>) -> Result<Self, EngineError> {
        for (i, preset) in presets.iter().enumerate() {
            if let Err(err) = preset.validate() {
                log::error!("Rejecting preset table: {}", err);
                return Err(err);
            }
            if presets[..i].iter().any(|p| p.name == preset.name) {
                return Err(EngineError::DuplicatePreset {
                    name: preset.name.clone(),
                });
            }
        }
        Ok(Self { presets })
    }

    /// Build a fresh instance from the named preset
    pub fn create(&self, name: &str, sample_rate_hz: u32) -> Result<EffectInstance, EngineError> {
        let preset = self
            .get(name)
            .ok_or_else(|| EngineError::unknown_preset(name))?;
        log::debug!("Creating instance from preset '{}'", name);
        Ok(preset.build(sample_rate_hz))
    }

    /// Get a preset by name
    pub fn get(&self, name: &str) -> Option<&Preset> {
        self.presets.iter().find(|p| p.name == name)
    }

    pub fn list(&self) -> &[Preset] {
        &self.presets
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.presets.iter().map(|p| p.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }

    /// Presets of one effect kind
    pub fn by_kind(&self, kind: EffectKind) -> Vec<&Preset> {
        self.presets.iter().filter(|p| p.kind == kind).collect()
    }

    /// Search presets by multiple tags (matches any)
    pub fn search_tags(&self, tags: &[&str]) -> Vec<&Preset> {
        self.presets
            .iter()
            .filter(|p| {
                tags.iter().any(|search_tag| {
                    let search_lower = search_tag.to_lowercase();
                    p.tags.iter().any(|t| t.to_lowercase().contains(&search_lower))
                })
            })
            .collect()
    }

    /// Serialize the table as a JSON array of presets
    #[cfg(feature = "json")]
    pub fn to_json(&self) -> Result<String, EngineError> {
        Ok(serde_json::to_string_pretty(&self.presets)?)
    }

    /// Load and validate a table from a JSON array of presets
    #[cfg(feature = "json")]
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        let presets: Vec<Preset> = serde_json::from_str(json)?;
        Self::with_presets(presets)
    }
}

static BUILTIN: OnceLock<PresetTable> = OnceLock::new();

/// The shared built-in table, built and validated on first access
pub fn builtin() -> Result<&'static PresetTable, EngineError> {
    if let Some(table) = BUILTIN.get() {
        return Ok(table);
    }
    let table = PresetTable::new()?;
    Ok(BUILTIN.get_or_init(|| table))
}

/// Build an instance from a built-in preset name
pub fn create_from_preset(name: &str, sample_rate_hz: u32) -> Result<EffectInstance, EngineError> {
    builtin()?.create(name, sample_rate_hz)
}
