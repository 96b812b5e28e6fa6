//! Stereo Sine LFO
//!
//! A phase-accumulator oscillator producing one sine per channel. The right
//! channel runs a fixed phase offset ahead of the left; both phases advance by
//! the same increment, so the offset is preserved by construction and never
//! recomputed per sample.

use core::f64::consts::TAU;
use libm::Libm;

/// Wrap a phase into `[0, TAU)`
#[inline]
fn wrap_phase(phase: f64) -> f64 {
    let wrapped = phase - TAU * Libm::<f64>::floor(phase / TAU);
    // floor rounding can land exactly on TAU for tiny negative inputs
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

/// Two-channel phase-accumulator sine LFO
#[derive(Debug, Clone)]
pub struct Oscillator {
    phase_left: f64,
    phase_right: f64,
    phase_increment: f64,
    stereo_offset_rad: f64,
    sample_rate: f64,
}

impl Oscillator {
    pub fn new(rate_hz: f64, stereo_offset_deg: f64, sample_rate: f64) -> Self {
        let stereo_offset_rad = wrap_phase(stereo_offset_deg.to_radians());
        Self {
            phase_left: 0.0,
            phase_right: stereo_offset_rad,
            phase_increment: TAU * rate_hz / sample_rate,
            stereo_offset_rad,
            sample_rate,
        }
    }

    /// Advance both phases and return `(sin(left), sin(right))`
    #[inline]
    pub fn step(&mut self) -> (f64, f64) {
        self.phase_left = wrap_phase(self.phase_left + self.phase_increment);
        self.phase_right = wrap_phase(self.phase_right + self.phase_increment);
        (
            Libm::<f64>::sin(self.phase_left),
            Libm::<f64>::sin(self.phase_right),
        )
    }

    /// Change the rate without touching the phase
    pub fn set_rate(&mut self, rate_hz: f64) {
        self.phase_increment = TAU * rate_hz / self.sample_rate;
    }

    /// Re-align the right channel to a new offset from the left.
    ///
    /// Only called between blocks.
    pub fn set_stereo_offset(&mut self, stereo_offset_deg: f64) {
        self.stereo_offset_rad = wrap_phase(stereo_offset_deg.to_radians());
        self.phase_right = wrap_phase(self.phase_left + self.stereo_offset_rad);
    }

    /// Return to the constructed phase: left at 0, right at the offset
    pub fn reset(&mut self) {
        self.phase_left = 0.0;
        self.phase_right = self.stereo_offset_rad;
    }

    pub fn phase_left(&self) -> f64 {
        self.phase_left
    }

    pub fn phase_right(&self) -> f64 {
        self.phase_right
    }

    pub fn phase_increment(&self) -> f64 {
        self.phase_increment
    }

    pub fn stereo_offset_rad(&self) -> f64 {
        self.stereo_offset_rad
    }
}
