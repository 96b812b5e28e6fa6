//! Preallocated Stereo Blocks
//!
//! A pair of equal-length channel buffers. Equal length is guaranteed by
//! construction, so processing a `StereoBlock` needs no length check.

use crate::error::EngineError;

/// Default processing block size
pub const DEFAULT_BLOCK_SIZE: usize = 64;

/// Stereo audio block pair
#[derive(Debug, Clone, PartialEq)]
pub struct StereoBlock {
    left: Vec<f64>,
    right: Vec<f64>,
}

impl StereoBlock {
    /// Create a silent stereo block with the given size
    pub fn new(size: usize) -> Self {
        Self {
            left: vec![0.0; size],
            right: vec![0.0; size],
        }
    }

    /// Take ownership of two channel buffers, which must be the same length
    pub fn from_channels(left: Vec<f64>, right: Vec<f64>) -> Result<Self, EngineError> {
        if left.len() != right.len() {
            return Err(EngineError::BlockLengthMismatch {
                left: left.len(),
                right: right.len(),
                out_left: left.len(),
                out_right: right.len(),
            });
        }
        Ok(Self { left, right })
    }

    /// Give back the channel buffers
    pub fn into_channels(self) -> (Vec<f64>, Vec<f64>) {
        (self.left, self.right)
    }

    pub fn len(&self) -> usize {
        self.left.len()
    }

    pub fn is_empty(&self) -> bool {
        self.left.is_empty()
    }

    pub fn left(&self) -> &[f64] {
        &self.left
    }

    pub fn right(&self) -> &[f64] {
        &self.right
    }

    /// Both channels mutably at once
    pub fn channels_mut(&mut self) -> (&mut [f64], &mut [f64]) {
        (&mut self.left, &mut self.right)
    }

    /// Silence both channels
    pub fn clear(&mut self) {
        self.left.fill(0.0);
        self.right.fill(0.0);
    }

    /// Get the peak level (max of both channels)
    pub fn peak(&self) -> f64 {
        self.left
            .iter()
            .chain(self.right.iter())
            .fold(0.0, |m, s| m.max(s.abs()))
    }

    /// Get a stereo sample at the given index
    pub fn get_sample(&self, index: usize) -> Option<(f64, f64)> {
        Some((*self.left.get(index)?, *self.right.get(index)?))
    }

    /// Set a stereo sample at the given index; out-of-range indices are ignored
    pub fn set_sample(&mut self, index: usize, left: f64, right: f64) {
        if index < self.len() {
            self.left[index] = left;
            self.right[index] = right;
        }
    }
}

impl Default for StereoBlock {
    fn default() -> Self {
        Self::new(DEFAULT_BLOCK_SIZE)
    }
}
