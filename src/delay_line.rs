//! Circular Delay Line
//!
//! A fixed-capacity ring buffer of samples with a fractional, linearly
//! interpolated read. Capacity is chosen once at construction from the longest
//! delay the owning instance can ever request, so the buffer never grows.

use libm::Libm;

/// Slots added on top of the longest nominal delay.
///
/// Covers the rounding of the sample count, the second interpolation tap and
/// the slot that is about to be overwritten.
pub const GUARD: usize = 3;

/// Circular sample buffer for one channel
#[derive(Debug, Clone)]
pub struct DelayLine {
    buffer: Vec<f64>,
    write_pos: usize,
}

impl DelayLine {
    /// Create a delay line holding exactly `capacity` samples (at least `GUARD`)
    pub fn new(capacity: usize) -> Self {
        Self {
            buffer: vec![0.0; capacity.max(GUARD)],
            write_pos: 0,
        }
    }

    /// Create a delay line long enough for `max_delay_ms` at `sample_rate`
    pub fn with_max_delay_ms(max_delay_ms: f64, sample_rate: f64) -> Self {
        Self::new(Self::capacity_for(max_delay_ms, sample_rate))
    }

    /// `floor(max_delay_ms * sample_rate / 1000) + GUARD`
    pub fn capacity_for(max_delay_ms: f64, sample_rate: f64) -> usize {
        let samples = Libm::<f64>::floor(max_delay_ms.max(0.0) * sample_rate / 1000.0);
        samples as usize + GUARD
    }

    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    pub fn write_pos(&self) -> usize {
        self.write_pos
    }

    /// Longest delay (in samples) that `read_interpolated` will honour
    pub fn max_delay(&self) -> f64 {
        (self.buffer.len() - 2) as f64
    }

    /// Store a sample and advance the write head
    #[inline]
    pub fn write(&mut self, value: f64) {
        self.buffer[self.write_pos] = value;
        self.write_pos = (self.write_pos + 1) % self.buffer.len();
    }

    /// Read `delay_samples` behind the write head with linear interpolation.
    ///
    /// The delay is bounded to `[1, capacity - 2]`, so the read never touches
    /// the slot the next `write` will overwrite.
    #[inline]
    pub fn read_interpolated(&self, delay_samples: f64) -> f64 {
        let capacity = self.buffer.len();
        let delay = delay_samples.clamp(1.0, self.max_delay());

        // Offset by one capacity so the position is never negative
        let read_pos = self.write_pos as f64 + capacity as f64 - delay;
        let index = read_pos as usize;
        let frac = read_pos - index as f64;

        let a = self.buffer[index % capacity];
        let b = self.buffer[(index + 1) % capacity];
        a + frac * (b - a)
    }

    /// Zero the buffer and rewind the write head
    pub fn clear(&mut self) {
        self.buffer.fill(0.0);
        self.write_pos = 0;
    }

    /// Raw buffer contents, oldest slot first at `write_pos`
    pub fn as_slice(&self) -> &[f64] {
        &self.buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_capacity_formula() {
        assert_eq!(DelayLine::capacity_for(250.0, 44_100.0), 11_025 + GUARD);
        assert_eq!(DelayLine::capacity_for(50.0, 48_000.0), 2_400 + GUARD);
        // 10.5 samples floors to 10
        assert_eq!(DelayLine::capacity_for(1.0, 10_500.0), 10 + GUARD);

        let line = DelayLine::with_max_delay_ms(250.0, 44_100.0);
        assert_eq!(line.capacity(), 11_028);
    }

    #[test]
    fn test_write_wraps() {
        let mut line = DelayLine::new(4);
        for i in 0..4 {
            line.write(i as f64);
        }
        assert_eq!(line.write_pos(), 0);
        line.write(9.0);
        assert_eq!(line.write_pos(), 1);
        assert_eq!(line.as_slice(), &[9.0, 1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_integer_delay() {
        let mut line = DelayLine::new(16);
        for i in 1..=8 {
            line.write(i as f64);
        }
        // Most recent write is one sample behind the head
        assert_relative_eq!(line.read_interpolated(1.0), 8.0);
        assert_relative_eq!(line.read_interpolated(3.0), 6.0);
    }

    #[test]
    fn test_fractional_delay_interpolates() {
        let mut line = DelayLine::new(16);
        for i in 1..=8 {
            line.write(i as f64);
        }
        assert_relative_eq!(line.read_interpolated(1.5), 7.5, epsilon = 1e-12);
        assert_relative_eq!(line.read_interpolated(2.25), 6.75, epsilon = 1e-12);
    }

    #[test]
    fn test_read_across_wrap() {
        let mut line = DelayLine::new(5);
        for i in 1..=7 {
            line.write(i as f64);
        }
        // write_pos = 2, newest sample (7.0) sits at index 1
        assert_eq!(line.write_pos(), 2);
        assert_relative_eq!(line.read_interpolated(1.0), 7.0);
        assert_relative_eq!(line.read_interpolated(2.5), 5.5, epsilon = 1e-12);
    }

    #[test]
    fn test_delay_bounds() {
        let mut line = DelayLine::new(8);
        for i in 1..=8 {
            line.write(i as f64);
        }
        // Below one sample reads the newest sample
        assert_relative_eq!(line.read_interpolated(0.0), 8.0);
        assert_relative_eq!(line.read_interpolated(-4.0), 8.0);
        // Beyond the limit reads at capacity - 2
        assert_relative_eq!(line.read_interpolated(100.0), line.read_interpolated(6.0));
    }

    #[test]
    fn test_clear() {
        let mut line = DelayLine::new(8);
        line.write(1.0);
        line.write(2.0);
        line.clear();
        assert_eq!(line.write_pos(), 0);
        assert!(line.as_slice().iter().all(|&s| s == 0.0));
    }
}
