//! Parameter Set and Clamp Ranges
//!
//! Every user-facing control is clamped to its documented range on every
//! mutation and the derived linear gains and sample counts are recomputed
//! immediately, so the per-sample path never sees an out-of-range or stale
//! value. Out-of-range input is silently bounded: automation curves that
//! overshoot must never interrupt playback.

use core::fmt;
use libm::Libm;
use serde::{Deserialize, Serialize};

/// Lowest gain in dB; anything at or below is treated as silence
pub const MIN_GAIN_DB: f64 = -120.0;

/// Highest gain in dB
pub const MAX_GAIN_DB: f64 = 6.0;

/// Hard ceiling on the linear feedback coefficient
pub const MAX_FEEDBACK: f64 = 0.99;

/// Lowest supported sample rate in Hz
pub const MIN_SAMPLE_RATE_HZ: u32 = 8_000;

/// Highest supported sample rate in Hz
pub const MAX_SAMPLE_RATE_HZ: u32 = 384_000;

/// Convert decibels to a linear gain. The [`MIN_GAIN_DB`] floor maps to 0.
#[inline]
pub fn db_to_gain(db: f64) -> f64 {
    if db <= MIN_GAIN_DB {
        0.0
    } else {
        Libm::<f64>::pow(10.0, db / 20.0)
    }
}

/// Convert milliseconds to a (fractional) sample count
#[inline]
pub fn ms_to_samples(ms: f64, sample_rate: f64) -> f64 {
    ms * sample_rate / 1000.0
}

/// Inclusive clamp range for one control
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParamRange {
    pub min: f64,
    pub max: f64,
}

impl ParamRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Bound a value into the range. NaN collapses to `min`.
    #[inline]
    pub fn clamp(&self, value: f64) -> f64 {
        if value.is_nan() {
            self.min
        } else {
            value.clamp(self.min, self.max)
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Identifies one user-facing control, for automation and introspection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamId {
    Delay,
    Rate,
    Depth,
    Feedback,
    WetMix,
    DryMix,
    StereoOffset,
}

impl ParamId {
    pub const ALL: [ParamId; 7] = [
        ParamId::Delay,
        ParamId::Rate,
        ParamId::Depth,
        ParamId::Feedback,
        ParamId::WetMix,
        ParamId::DryMix,
        ParamId::StereoOffset,
    ];

    /// Field name including the unit suffix (e.g. `delay_ms`)
    pub fn name(&self) -> &'static str {
        match self {
            ParamId::Delay => "delay_ms",
            ParamId::Rate => "rate_hz",
            ParamId::Depth => "depth_ms",
            ParamId::Feedback => "feedback_db",
            ParamId::WetMix => "wet_mix_db",
            ParamId::DryMix => "dry_mix_db",
            ParamId::StereoOffset => "stereo_offset_deg",
        }
    }
}

impl fmt::Display for ParamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which member of the modulated-delay family an instance behaves as.
///
/// All kinds run the same signal path; they differ only in clamp ranges and
/// defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectKind {
    #[default]
    Chorus,
    Flanger,
    Vibrato,
}

impl EffectKind {
    pub fn limits(&self) -> ParamLimits {
        match self {
            EffectKind::Chorus => ParamLimits::CHORUS,
            EffectKind::Flanger => ParamLimits::FLANGER,
            EffectKind::Vibrato => ParamLimits::VIBRATO,
        }
    }

    pub fn default_values(&self) -> ParameterValues {
        match self {
            EffectKind::Chorus => ParameterValues::default(),
            EffectKind::Flanger => ParameterValues {
                delay_ms: 2.0,
                rate_hz: 0.3,
                depth_ms: 1.5,
                feedback_db: -6.0,
                wet_mix_db: -6.0,
                dry_mix_db: -6.0,
                stereo_offset_deg: 90.0,
            },
            // Wet only, no feedback: pure pitch wobble
            EffectKind::Vibrato => ParameterValues {
                delay_ms: 5.0,
                rate_hz: 5.0,
                depth_ms: 2.0,
                feedback_db: MIN_GAIN_DB,
                wet_mix_db: 0.0,
                dry_mix_db: MIN_GAIN_DB,
                stereo_offset_deg: 0.0,
            },
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            EffectKind::Chorus => "chorus",
            EffectKind::Flanger => "flanger",
            EffectKind::Vibrato => "vibrato",
        }
    }
}

/// Clamp ranges for every control of one effect kind
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParamLimits {
    pub delay_ms: ParamRange,
    pub rate_hz: ParamRange,
    pub depth_ms: ParamRange,
    /// Shared by feedback, wet and dry mix
    pub gain_db: ParamRange,
    pub stereo_offset_deg: ParamRange,
}

impl ParamLimits {
    pub const CHORUS: ParamLimits = ParamLimits {
        delay_ms: ParamRange::new(10.0, 200.0),
        rate_hz: ParamRange::new(0.1, 10.0),
        depth_ms: ParamRange::new(1.0, 50.0),
        gain_db: ParamRange::new(MIN_GAIN_DB, MAX_GAIN_DB),
        stereo_offset_deg: ParamRange::new(0.0, 360.0),
    };

    pub const FLANGER: ParamLimits = ParamLimits {
        delay_ms: ParamRange::new(0.5, 20.0),
        rate_hz: ParamRange::new(0.05, 10.0),
        depth_ms: ParamRange::new(0.1, 10.0),
        gain_db: ParamRange::new(MIN_GAIN_DB, MAX_GAIN_DB),
        stereo_offset_deg: ParamRange::new(0.0, 360.0),
    };

    pub const VIBRATO: ParamLimits = ParamLimits {
        delay_ms: ParamRange::new(1.0, 20.0),
        rate_hz: ParamRange::new(0.1, 14.0),
        depth_ms: ParamRange::new(0.5, 10.0),
        gain_db: ParamRange::new(MIN_GAIN_DB, MAX_GAIN_DB),
        stereo_offset_deg: ParamRange::new(0.0, 360.0),
    };

    pub fn range(&self, id: ParamId) -> ParamRange {
        match id {
            ParamId::Delay => self.delay_ms,
            ParamId::Rate => self.rate_hz,
            ParamId::Depth => self.depth_ms,
            ParamId::Feedback | ParamId::WetMix | ParamId::DryMix => self.gain_db,
            ParamId::StereoOffset => self.stereo_offset_deg,
        }
    }

    /// Longest delay the signal path can request: max base delay plus max depth
    pub fn max_modulated_delay_ms(&self) -> f64 {
        self.delay_ms.max + self.depth_ms.max
    }

    /// Check every field of a literal, returning the first violation
    pub fn validate(&self, values: &ParameterValues) -> Result<(), (ParamId, f64)> {
        for id in ParamId::ALL {
            let value = values.get(id);
            if !self.range(id).contains(value) {
                return Err((id, value));
            }
        }
        Ok(())
    }
}

/// The user-facing controls alone, without derived state.
///
/// This is the serializable payload of a preset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParameterValues {
    pub delay_ms: f64,
    pub rate_hz: f64,
    pub depth_ms: f64,
    pub feedback_db: f64,
    pub wet_mix_db: f64,
    pub dry_mix_db: f64,
    pub stereo_offset_deg: f64,
}

impl Default for ParameterValues {
    fn default() -> Self {
        Self {
            delay_ms: 40.0,
            rate_hz: 1.5,
            depth_ms: 10.0,
            feedback_db: -60.0,
            wet_mix_db: -6.0,
            dry_mix_db: -6.0,
            stereo_offset_deg: 90.0,
        }
    }
}

impl ParameterValues {
    pub fn get(&self, id: ParamId) -> f64 {
        match id {
            ParamId::Delay => self.delay_ms,
            ParamId::Rate => self.rate_hz,
            ParamId::Depth => self.depth_ms,
            ParamId::Feedback => self.feedback_db,
            ParamId::WetMix => self.wet_mix_db,
            ParamId::DryMix => self.dry_mix_db,
            ParamId::StereoOffset => self.stereo_offset_deg,
        }
    }
}

/// Clamped controls plus the derived values the signal path consumes.
///
/// Fields are private: the only way in is through the clamping setters, so a
/// `ParameterSet` is always in range and its derived fields always current.
/// It is `Copy` so whole snapshots can cross threads without allocation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParameterSet {
    kind: EffectKind,
    limits: ParamLimits,
    sample_rate_hz: u32,
    values: ParameterValues,

    feedback_linear: f64,
    wet_linear: f64,
    dry_linear: f64,
    delay_samples: f64,
    depth_samples: f64,
}

impl ParameterSet {
    /// Chorus parameters with the documented defaults
    pub fn new(sample_rate_hz: u32) -> Self {
        Self::for_kind(EffectKind::Chorus, sample_rate_hz)
    }

    /// Defaults for the given effect kind
    pub fn for_kind(kind: EffectKind, sample_rate_hz: u32) -> Self {
        Self::from_values(kind, sample_rate_hz, kind.default_values())
    }

    /// Build from a literal, clamping every field into the kind's limits
    pub fn from_values(kind: EffectKind, sample_rate_hz: u32, values: ParameterValues) -> Self {
        let limits = kind.limits();
        let mut params = Self {
            kind,
            limits,
            sample_rate_hz: sample_rate_hz.clamp(MIN_SAMPLE_RATE_HZ, MAX_SAMPLE_RATE_HZ),
            values,
            feedback_linear: 0.0,
            wet_linear: 0.0,
            dry_linear: 0.0,
            delay_samples: 0.0,
            depth_samples: 0.0,
        };
        for id in ParamId::ALL {
            params.store(id, values.get(id));
        }
        params.recompute();
        params
    }

    pub fn with_delay(mut self, ms: f64) -> Self {
        self.set_delay(ms);
        self
    }

    pub fn with_rate(mut self, hz: f64) -> Self {
        self.set_rate(hz);
        self
    }

    pub fn with_depth(mut self, ms: f64) -> Self {
        self.set_depth(ms);
        self
    }

    pub fn with_feedback(mut self, db: f64) -> Self {
        self.set_feedback(db);
        self
    }

    pub fn with_wet_mix(mut self, db: f64) -> Self {
        self.set_wet_mix(db);
        self
    }

    pub fn with_dry_mix(mut self, db: f64) -> Self {
        self.set_dry_mix(db);
        self
    }

    pub fn with_stereo_offset(mut self, deg: f64) -> Self {
        self.set_stereo_offset(deg);
        self
    }

    pub fn set_delay(&mut self, ms: f64) {
        self.set_param(ParamId::Delay, ms);
    }

    pub fn set_rate(&mut self, hz: f64) {
        self.set_param(ParamId::Rate, hz);
    }

    pub fn set_depth(&mut self, ms: f64) {
        self.set_param(ParamId::Depth, ms);
    }

    pub fn set_feedback(&mut self, db: f64) {
        self.set_param(ParamId::Feedback, db);
    }

    pub fn set_wet_mix(&mut self, db: f64) {
        self.set_param(ParamId::WetMix, db);
    }

    pub fn set_dry_mix(&mut self, db: f64) {
        self.set_param(ParamId::DryMix, db);
    }

    pub fn set_stereo_offset(&mut self, deg: f64) {
        self.set_param(ParamId::StereoOffset, deg);
    }

    /// Clamp and store one control, then refresh the derived values
    pub fn set_param(&mut self, id: ParamId, value: f64) {
        self.store(id, value);
        self.recompute();
    }

    /// Current (clamped) value of one control
    pub fn get_param(&self, id: ParamId) -> f64 {
        self.values.get(id)
    }

    fn store(&mut self, id: ParamId, value: f64) {
        let clamped = self.limits.range(id).clamp(value);
        let slot = match id {
            ParamId::Delay => &mut self.values.delay_ms,
            ParamId::Rate => &mut self.values.rate_hz,
            ParamId::Depth => &mut self.values.depth_ms,
            ParamId::Feedback => &mut self.values.feedback_db,
            ParamId::WetMix => &mut self.values.wet_mix_db,
            ParamId::DryMix => &mut self.values.dry_mix_db,
            ParamId::StereoOffset => &mut self.values.stereo_offset_deg,
        };
        *slot = clamped;
    }

    fn recompute(&mut self) {
        let sr = self.sample_rate();
        self.delay_samples = ms_to_samples(self.values.delay_ms, sr);
        self.depth_samples = ms_to_samples(self.values.depth_ms, sr);
        self.feedback_linear = db_to_gain(self.values.feedback_db).clamp(0.0, MAX_FEEDBACK);
        self.wet_linear = db_to_gain(self.values.wet_mix_db);
        self.dry_linear = db_to_gain(self.values.dry_mix_db);
    }

    /// Check the stored values against the limits
    pub fn validate(&self) -> Result<(), (ParamId, f64)> {
        self.limits.validate(&self.values)
    }

    pub fn kind(&self) -> EffectKind {
        self.kind
    }

    pub fn limits(&self) -> &ParamLimits {
        &self.limits
    }

    pub fn values(&self) -> ParameterValues {
        self.values
    }

    pub fn sample_rate_hz(&self) -> u32 {
        self.sample_rate_hz
    }

    pub fn sample_rate(&self) -> f64 {
        self.sample_rate_hz as f64
    }

    pub fn delay_ms(&self) -> f64 {
        self.values.delay_ms
    }

    pub fn rate_hz(&self) -> f64 {
        self.values.rate_hz
    }

    pub fn depth_ms(&self) -> f64 {
        self.values.depth_ms
    }

    pub fn feedback_db(&self) -> f64 {
        self.values.feedback_db
    }

    pub fn wet_mix_db(&self) -> f64 {
        self.values.wet_mix_db
    }

    pub fn dry_mix_db(&self) -> f64 {
        self.values.dry_mix_db
    }

    pub fn stereo_offset_deg(&self) -> f64 {
        self.values.stereo_offset_deg
    }

    #[inline]
    pub fn feedback_linear(&self) -> f64 {
        self.feedback_linear
    }

    #[inline]
    pub fn wet_linear(&self) -> f64 {
        self.wet_linear
    }

    #[inline]
    pub fn dry_linear(&self) -> f64 {
        self.dry_linear
    }

    #[inline]
    pub fn delay_samples(&self) -> f64 {
        self.delay_samples
    }

    #[inline]
    pub fn depth_samples(&self) -> f64 {
        self.depth_samples
    }
}

impl Default for ParameterSet {
    fn default() -> Self {
        Self::new(44_100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_defaults() {
        let p = ParameterSet::new(44_100);
        assert_eq!(p.kind(), EffectKind::Chorus);
        assert_eq!(p.delay_ms(), 40.0);
        assert_eq!(p.rate_hz(), 1.5);
        assert_eq!(p.depth_ms(), 10.0);
        assert_eq!(p.feedback_db(), -60.0);
        assert_eq!(p.wet_mix_db(), -6.0);
        assert_eq!(p.dry_mix_db(), -6.0);
        assert_eq!(p.stereo_offset_deg(), 90.0);
        assert!(p.validate().is_ok());
    }

    #[test]
    fn test_setters_clamp() {
        let mut p = ParameterSet::new(44_100);
        p.set_delay(300.0);
        assert_eq!(p.delay_ms(), 200.0);
        p.set_delay(-5.0);
        assert_eq!(p.delay_ms(), 10.0);

        p.set_rate(20.0);
        assert_eq!(p.rate_hz(), 10.0);
        p.set_rate(0.0);
        assert_eq!(p.rate_hz(), 0.1);

        p.set_depth(0.0);
        assert_eq!(p.depth_ms(), 1.0);
        p.set_depth(99.0);
        assert_eq!(p.depth_ms(), 50.0);

        p.set_feedback(40.0);
        assert_eq!(p.feedback_db(), 6.0);
        p.set_wet_mix(-500.0);
        assert_eq!(p.wet_mix_db(), -120.0);
        p.set_dry_mix(7.0);
        assert_eq!(p.dry_mix_db(), 6.0);
    }

    #[test]
    fn test_nan_clamps_to_min() {
        let mut p = ParameterSet::new(44_100);
        p.set_rate(f64::NAN);
        assert_eq!(p.rate_hz(), 0.1);
        p.set_wet_mix(f64::NAN);
        assert_eq!(p.wet_linear(), 0.0);
    }

    #[test]
    fn test_derived_fields_follow_setters() {
        let mut p = ParameterSet::new(48_000);
        assert_relative_eq!(p.delay_samples(), 1920.0, epsilon = 1e-9);
        assert_relative_eq!(p.depth_samples(), 480.0, epsilon = 1e-9);

        p.set_delay(20.0);
        assert_relative_eq!(p.delay_samples(), 960.0, epsilon = 1e-9);

        p.set_wet_mix(0.0);
        assert_relative_eq!(p.wet_linear(), 1.0, epsilon = 1e-12);

        p.set_dry_mix(-6.0);
        assert_relative_eq!(p.dry_linear(), 0.501187, epsilon = 1e-6);
    }

    #[test]
    fn test_feedback_hard_clamped() {
        let mut p = ParameterSet::new(44_100);
        p.set_feedback(6.0);
        assert_eq!(p.feedback_linear(), MAX_FEEDBACK);
        p.set_feedback(0.0);
        assert_eq!(p.feedback_linear(), MAX_FEEDBACK);
        p.set_feedback(-0.1);
        assert!(p.feedback_linear() < MAX_FEEDBACK);
        p.set_feedback(-120.0);
        assert_eq!(p.feedback_linear(), 0.0);
    }

    #[test]
    fn test_gain_floor_is_silence() {
        assert_eq!(db_to_gain(MIN_GAIN_DB), 0.0);
        assert_eq!(db_to_gain(-200.0), 0.0);
        assert_relative_eq!(db_to_gain(-20.0), 0.1, epsilon = 1e-12);
        assert_relative_eq!(db_to_gain(0.0), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_sample_rate_clamped() {
        assert_eq!(ParameterSet::new(0).sample_rate_hz(), MIN_SAMPLE_RATE_HZ);
        assert_eq!(ParameterSet::new(1_000_000).sample_rate_hz(), MAX_SAMPLE_RATE_HZ);
        assert_eq!(ParameterSet::new(96_000).sample_rate_hz(), 96_000);
    }

    #[test]
    fn test_from_values_clamps_literal() {
        let values = ParameterValues {
            delay_ms: 1000.0,
            ..ParameterValues::default()
        };
        assert!(ParamLimits::CHORUS.validate(&values).is_err());

        let p = ParameterSet::from_values(EffectKind::Chorus, 44_100, values);
        assert_eq!(p.delay_ms(), 200.0);
        assert!(p.validate().is_ok());
    }

    #[test]
    fn test_kind_limits_differ() {
        let mut flanger = ParameterSet::for_kind(EffectKind::Flanger, 44_100);
        flanger.set_delay(40.0);
        assert_eq!(flanger.delay_ms(), 20.0);

        let vibrato = ParameterSet::for_kind(EffectKind::Vibrato, 44_100);
        assert_eq!(vibrato.dry_linear(), 0.0);
        assert_eq!(vibrato.feedback_linear(), 0.0);
    }

    #[test]
    fn test_kind_defaults_are_valid() {
        for kind in [EffectKind::Chorus, EffectKind::Flanger, EffectKind::Vibrato] {
            assert!(kind.limits().validate(&kind.default_values()).is_ok());
        }
    }

    #[test]
    fn test_set_param_by_id() {
        let mut p = ParameterSet::new(44_100).with_rate(2.0);
        assert_eq!(p.get_param(ParamId::Rate), 2.0);
        p.set_param(ParamId::StereoOffset, 400.0);
        assert_eq!(p.get_param(ParamId::StereoOffset), 360.0);
    }

    #[test]
    fn test_validate_reports_field() {
        let values = ParameterValues {
            rate_hz: 50.0,
            ..ParameterValues::default()
        };
        assert_eq!(ParamLimits::CHORUS.validate(&values), Err((ParamId::Rate, 50.0)));
    }

    #[test]
    fn test_max_modulated_delay() {
        assert_eq!(ParamLimits::CHORUS.max_modulated_delay_ms(), 250.0);
    }
}
