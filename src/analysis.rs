//! Signal Analysis Helpers
//!
//! Offline measurements for checking rendered output: level, DC, stereo
//! correlation and finiteness. Not meant for the audio callback.

use libm::Libm;

/// Static measurements over sample slices
pub struct AudioAnalysis;

impl AudioAnalysis {
    /// Calculate RMS (root mean square) of a signal
    pub fn rms(samples: &[f64]) -> f64 {
        if samples.is_empty() {
            return 0.0;
        }
        let sum_sq: f64 = samples.iter().map(|s| s * s).sum();
        Libm::<f64>::sqrt(sum_sq / samples.len() as f64)
    }

    /// Calculate peak amplitude
    pub fn peak(samples: &[f64]) -> f64 {
        samples.iter().map(|s| s.abs()).fold(0.0, f64::max)
    }

    /// Calculate DC offset (average)
    pub fn dc_offset(samples: &[f64]) -> f64 {
        if samples.is_empty() {
            return 0.0;
        }
        samples.iter().sum::<f64>() / samples.len() as f64
    }

    /// Pearson correlation of two channels over their common length.
    ///
    /// Returns 0 when either channel has no variance.
    pub fn correlation(a: &[f64], b: &[f64]) -> f64 {
        let n = a.len().min(b.len());
        if n == 0 {
            return 0.0;
        }
        let (a, b) = (&a[..n], &b[..n]);
        let mean_a = Self::dc_offset(a);
        let mean_b = Self::dc_offset(b);

        let mut cov = 0.0;
        let mut var_a = 0.0;
        let mut var_b = 0.0;
        for (&x, &y) in a.iter().zip(b) {
            let dx = x - mean_a;
            let dy = y - mean_b;
            cov += dx * dy;
            var_a += dx * dx;
            var_b += dy * dy;
        }

        let denom = Libm::<f64>::sqrt(var_a * var_b);
        if denom < 1e-20 {
            0.0
        } else {
            cov / denom
        }
    }

    /// True when no sample is NaN or infinite
    pub fn all_finite(samples: &[f64]) -> bool {
        samples.iter().all(|s| s.is_finite())
    }

    /// Check if signal is approximately silent
    pub fn is_silent(samples: &[f64], threshold: f64) -> bool {
        Self::peak(samples) < threshold
    }

    /// Index of the largest absolute sample
    pub fn peak_index(samples: &[f64]) -> Option<usize> {
        samples
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.abs().total_cmp(&b.abs()))
            .map(|(i, _)| i)
    }
}
