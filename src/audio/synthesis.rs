//! Deterministic test-tone source.

use std::f32::consts::TAU;

/// Continuous sine oscillator producing fixed-size blocks
#[derive(Debug, Clone)]
pub struct ToneGenerator {
    frequency_hz: f32,
    amplitude: f32,
    sample_rate_hz: f32,
    /// Current phase in cycles, kept in [0, 1)
    phase: f32,
}

impl ToneGenerator {
    pub fn new(frequency_hz: f32, amplitude: f32, sample_rate_hz: usize) -> Self {
        Self {
            frequency_hz,
            amplitude,
            sample_rate_hz: sample_rate_hz as f32,
            phase: 0.0,
        }
    }

    pub fn frequency_hz(&self) -> f32 {
        self.frequency_hz
    }

    /// Fill `out` with the next samples, continuing the phase across calls
    pub fn fill(&mut self, out: &mut [f32]) {
        let step = self.frequency_hz / self.sample_rate_hz;
        for sample in out.iter_mut() {
            *sample = self.amplitude * (TAU * self.phase).sin();
            self.phase = (self.phase + step).fract();
        }
    }

    pub fn next_block(&mut self, len: usize) -> Vec<f32> {
        let mut block = vec![0.0; len];
        self.fill(&mut block);
        block
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_tone_stays_within_amplitude() {
        let mut tone = ToneGenerator::new(440.0, 0.5, 44100);
        let block = tone.next_block(1024);
        assert!(block.iter().all(|s| s.abs() <= 0.5 + 1e-6));
    }

    #[test]
    fn test_phase_continues_across_blocks() {
        let mut split = ToneGenerator::new(1000.0, 1.0, 8000);
        let mut whole = split.clone();

        let mut first = split.next_block(5);
        first.extend(split.next_block(5));
        let reference = whole.next_block(10);

        for (a, b) in first.iter().zip(&reference) {
            assert_abs_diff_eq!(*a, *b, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_quarter_rate_tone_pattern() {
        // fs/4 produces 0, 1, 0, -1
        let mut tone = ToneGenerator::new(2000.0, 1.0, 8000);
        let block = tone.next_block(4);
        assert_abs_diff_eq!(block[0], 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(block[1], 1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(block[2], 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(block[3], -1.0, epsilon = 1e-6);
    }
}
