//! Modulated-Delay Effect Instance
//!
//! One [`EffectInstance`] is one effect slot: it exclusively owns its
//! parameters, a delay line per channel and the stereo LFO. The per-sample
//! path is purely numeric: every validation happened in the setters or at
//! construction, and nothing here allocates, locks or fails.
//!
//! # Signal path (per sample)
//!
//! ```text
//!            ┌──────────────┐
//!  in ──┬───►│ + ──► delay  ├──┬──► × wet ──┐
//!       │    │ ▲     line   │  │            ├──► out
//!       │    └─┼────────────┘  │            │
//!       │      └── × feedback ◄┘            │
//!       └──────────────────────► × dry ─────┘
//!                  ▲
//!         LFO ─────┘ (delay = base + sin · depth)
//! ```

use crate::block::StereoBlock;
use crate::delay_line::DelayLine;
use crate::error::EngineError;
use crate::introspection::{param_infos, ParamCurve, ParamInfo};
use crate::oscillator::Oscillator;
use crate::params::{EffectKind, ParamId, ParameterSet};
use crate::remote::{parameter_channel, ParameterReceiver, ParameterSender};

/// A chorus-family processor for one stereo effect slot
pub struct EffectInstance {
    params: ParameterSet,
    left: DelayLine,
    right: DelayLine,
    oscillator: Oscillator,
    remote: Option<ParameterReceiver>,
}

impl EffectInstance {
    /// Chorus with the documented defaults
    pub fn new(sample_rate_hz: u32) -> Self {
        Self::from_params(ParameterSet::new(sample_rate_hz))
    }

    /// Default parameters for the given effect kind
    pub fn for_kind(kind: EffectKind, sample_rate_hz: u32) -> Self {
        Self::from_params(ParameterSet::for_kind(kind, sample_rate_hz))
    }

    /// Build an instance around an already clamped parameter set.
    ///
    /// Delay lines are sized for the largest delay plus depth the kind's
    /// limits allow, so later parameter changes never need a bigger buffer.
    pub fn from_params(params: ParameterSet) -> Self {
        let sample_rate = params.sample_rate();
        let max_delay_ms = params.limits().max_modulated_delay_ms();
        let left = DelayLine::with_max_delay_ms(max_delay_ms, sample_rate);
        let right = DelayLine::with_max_delay_ms(max_delay_ms, sample_rate);
        let oscillator = Oscillator::new(params.rate_hz(), params.stereo_offset_deg(), sample_rate);

        log::debug!(
            "Created {} instance at {} Hz, delay capacity {} samples",
            params.kind().name(),
            params.sample_rate_hz(),
            left.capacity()
        );

        Self {
            params,
            left,
            right,
            oscillator,
            remote: None,
        }
    }

    pub fn params(&self) -> &ParameterSet {
        &self.params
    }

    pub fn kind(&self) -> EffectKind {
        self.params.kind()
    }

    pub fn sample_rate_hz(&self) -> u32 {
        self.params.sample_rate_hz()
    }

    pub fn set_delay(&mut self, ms: f64) {
        self.params.set_delay(ms);
    }

    pub fn set_rate(&mut self, hz: f64) {
        self.params.set_rate(hz);
        self.oscillator.set_rate(self.params.rate_hz());
    }

    pub fn set_depth(&mut self, ms: f64) {
        self.params.set_depth(ms);
    }

    pub fn set_feedback(&mut self, db: f64) {
        self.params.set_feedback(db);
    }

    pub fn set_wet_mix(&mut self, db: f64) {
        self.params.set_wet_mix(db);
    }

    pub fn set_dry_mix(&mut self, db: f64) {
        self.params.set_dry_mix(db);
    }

    /// Set any control by id (automation entry point). Call between blocks.
    pub fn set_param(&mut self, id: ParamId, value: f64) {
        self.params.set_param(id, value);
        match id {
            ParamId::Rate => self.oscillator.set_rate(self.params.rate_hz()),
            ParamId::StereoOffset => self
                .oscillator
                .set_stereo_offset(self.params.stereo_offset_deg()),
            _ => {}
        }
    }

    pub fn get_param(&self, id: ParamId) -> f64 {
        self.params.get_param(id)
    }

    /// Set a control from a normalized (0-1) automation value
    pub fn set_param_normalized(&mut self, id: ParamId, normalized: f64) {
        let range = self.params.limits().range(id);
        let value = ParamCurve::for_id(id).apply(normalized, range.min, range.max);
        self.set_param(id, value);
    }

    /// Range and display metadata for every control.
    ///
    /// Allocates; call from the host UI, not the audio callback.
    pub fn param_infos(&self) -> Vec<ParamInfo> {
        param_infos(&self.params)
    }

    /// Replace the whole parameter snapshot at once.
    ///
    /// The snapshot's values are re-clamped into this instance's kind and
    /// sample rate, so a mismatched snapshot can never outgrow the buffers.
    pub fn apply_parameters(&mut self, snapshot: ParameterSet) {
        let previous_offset = self.params.stereo_offset_deg();
        self.params = ParameterSet::from_values(
            self.params.kind(),
            self.params.sample_rate_hz(),
            snapshot.values(),
        );
        self.oscillator.set_rate(self.params.rate_hz());
        if self.params.stereo_offset_deg() != previous_offset {
            self.oscillator
                .set_stereo_offset(self.params.stereo_offset_deg());
        }
    }

    /// Attach a lock-free control channel and return its sending side.
    ///
    /// Snapshots sent through it are applied at the start of each block call.
    /// Attaching again disconnects the previous sender. Allocates the queue,
    /// so call it during setup, not from the audio callback.
    pub fn remote(&mut self, capacity: usize) -> ParameterSender {
        let (sender, receiver) = parameter_channel(self.params, capacity);
        self.remote = Some(receiver);
        sender
    }

    /// Apply the newest pending remote snapshot, if any
    #[inline]
    fn poll_remote(&mut self) {
        let latest = self.remote.as_mut().and_then(ParameterReceiver::latest);
        if let Some(snapshot) = latest {
            self.apply_parameters(snapshot);
        }
    }

    /// Process one stereo sample
    #[inline]
    pub fn process_sample(&mut self, left_in: f64, right_in: f64) -> (f64, f64) {
        let p = &self.params;
        let (lfo_l, lfo_r) = self.oscillator.step();

        let delay_l = p.delay_samples() + lfo_l * p.depth_samples();
        let delay_r = p.delay_samples() + lfo_r * p.depth_samples();

        let delayed_l = self.left.read_interpolated(delay_l);
        let delayed_r = self.right.read_interpolated(delay_r);

        self.left.write(left_in + delayed_l * p.feedback_linear());
        self.right.write(right_in + delayed_r * p.feedback_linear());

        let out_l = left_in * p.dry_linear() + delayed_l * p.wet_linear();
        let out_r = right_in * p.dry_linear() + delayed_r * p.wet_linear();

        debug_assert!(
            out_l.is_finite() && out_r.is_finite(),
            "non-finite output: feedback or delay capacity is broken"
        );
        (out_l, out_r)
    }

    /// Process equal-length stereo input into equal-length output slices.
    ///
    /// All four lengths are checked before any sample is touched.
    pub fn process_block(
        &mut self,
        left: &[f64],
        right: &[f64],
        out_left: &mut [f64],
        out_right: &mut [f64],
    ) -> Result<(), EngineError> {
        let n = left.len();
        if right.len() != n || out_left.len() != n || out_right.len() != n {
            return Err(EngineError::BlockLengthMismatch {
                left: n,
                right: right.len(),
                out_left: out_left.len(),
                out_right: out_right.len(),
            });
        }

        self.poll_remote();
        for i in 0..n {
            let (l, r) = self.process_sample(left[i], right[i]);
            out_left[i] = l;
            out_right[i] = r;
        }
        Ok(())
    }

    /// Process a stereo block in place
    pub fn process_block_in_place(
        &mut self,
        left: &mut [f64],
        right: &mut [f64],
    ) -> Result<(), EngineError> {
        if left.len() != right.len() {
            return Err(EngineError::BlockLengthMismatch {
                left: left.len(),
                right: right.len(),
                out_left: left.len(),
                out_right: right.len(),
            });
        }

        self.poll_remote();
        for (l, r) in left.iter_mut().zip(right.iter_mut()) {
            let (out_l, out_r) = self.process_sample(*l, *r);
            *l = out_l;
            *r = out_r;
        }
        Ok(())
    }

    /// Process a preallocated stereo block in place (lengths match by construction)
    pub fn process_stereo_block(&mut self, block: &mut StereoBlock) {
        self.poll_remote();
        let (left, right) = block.channels_mut();
        for (l, r) in left.iter_mut().zip(right.iter_mut()) {
            let (out_l, out_r) = self.process_sample(*l, *r);
            *l = out_l;
            *r = out_r;
        }
    }

    /// Offline convenience: process whole buffers into newly allocated output.
    ///
    /// Allocates, so keep it out of the audio callback.
    pub fn render(&mut self, left: &[f64], right: &[f64]) -> Result<(Vec<f64>, Vec<f64>), EngineError> {
        let mut out_left = vec![0.0; left.len()];
        let mut out_right = vec![0.0; right.len()];
        self.process_block(left, right, &mut out_left, &mut out_right)?;
        Ok((out_left, out_right))
    }

    /// Clear both delay lines and rewind the LFO; parameters are kept
    pub fn reset(&mut self) {
        self.left.clear();
        self.right.clear();
        self.oscillator.reset();
    }

    pub fn delay_lines(&self) -> (&DelayLine, &DelayLine) {
        (&self.left, &self.right)
    }

    pub fn oscillator(&self) -> &Oscillator {
        &self.oscillator
    }
}

impl Default for EffectInstance {
    fn default() -> Self {
        Self::new(44_100)
    }
}

impl core::fmt::Debug for EffectInstance {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("EffectInstance")
            .field("params", &self.params)
            .field("capacity", &self.left.capacity())
            .field("remote", &self.remote.is_some())
            .finish()
    }
}
