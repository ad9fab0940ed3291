//! Forward FFT over fixed-size audio blocks.

use std::sync::Arc;

use log::debug;
use rustfft::{num_complex::Complex, Fft, FftPlanner};

use super::window::WindowFunction;
use crate::error::BlockError;

/// Real and imaginary coefficients of one transformed block
#[derive(Debug, Clone, PartialEq)]
pub struct FrequencyDomain {
    real: Vec<f32>,
    imag: Vec<f32>,
}

impl FrequencyDomain {
    fn zeroed(len: usize) -> Self {
        Self {
            real: vec![0.0; len],
            imag: vec![0.0; len],
        }
    }

    pub fn real(&self) -> &[f32] {
        &self.real
    }

    pub fn imag(&self) -> &[f32] {
        &self.imag
    }

    /// Number of bins (always equal to the block size)
    pub fn len(&self) -> usize {
        self.real.len()
    }

    pub fn is_empty(&self) -> bool {
        self.real.is_empty()
    }

    /// Magnitude of a single bin
    pub fn magnitude(&self, bin: usize) -> f32 {
        self.real[bin].hypot(self.imag[bin])
    }
}

/// Forward transform planned once for a fixed block size
///
/// All buffers are allocated at construction, so `transform` is safe to
/// call from an audio callback.
pub struct SpectralTransformer {
    fft: Arc<dyn Fft<f32>>,
    block_size: usize,
    window: WindowFunction,
    /// Precomputed window weights, `None` for rectangular
    weights: Option<Vec<f32>>,
    buffer: Vec<Complex<f32>>,
    scratch: Vec<Complex<f32>>,
    output: FrequencyDomain,
}

impl SpectralTransformer {
    /// Plan a forward transform for blocks of `block_size` samples
    ///
    /// The caller validates `block_size > 0` (see `AnalyzerConfig::validate`).
    pub fn new(block_size: usize, window: WindowFunction) -> Self {
        if !block_size.is_power_of_two() {
            debug!(
                "Planning FFT for non power-of-two block size {}",
                block_size
            );
        }

        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(block_size);
        let scratch = vec![Complex::new(0.0, 0.0); fft.get_inplace_scratch_len()];

        let weights = (!window.is_rectangular()).then(|| window.coefficients(block_size));

        Self {
            fft,
            block_size,
            window,
            weights,
            buffer: vec![Complex::new(0.0, 0.0); block_size],
            scratch,
            output: FrequencyDomain::zeroed(block_size),
        }
    }

    pub fn block_size(&self) -> usize {
        self.block_size
    }

    pub fn window(&self) -> WindowFunction {
        self.window
    }

    /// Transform one block; the input is treated as real with zero imaginary part
    pub fn transform(&mut self, block: &[f32]) -> Result<&FrequencyDomain, BlockError> {
        if block.len() != self.block_size {
            return Err(BlockError::ShapeMismatch {
                expected: self.block_size,
                actual: block.len(),
            });
        }

        match &self.weights {
            Some(weights) => {
                for ((slot, &sample), &weight) in self.buffer.iter_mut().zip(block).zip(weights) {
                    *slot = Complex::new(sample * weight, 0.0);
                }
            }
            None => {
                for (slot, &sample) in self.buffer.iter_mut().zip(block) {
                    *slot = Complex::new(sample, 0.0);
                }
            }
        }

        self.fft
            .process_with_scratch(&mut self.buffer, &mut self.scratch);

        for (i, c) in self.buffer.iter().enumerate() {
            self.output.real[i] = c.re;
            self.output.imag[i] = c.im;
        }

        Ok(&self.output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f32::consts::PI;

    fn cosine(bin: usize, size: usize) -> Vec<f32> {
        (0..size)
            .map(|n| (2.0 * PI * bin as f32 * n as f32 / size as f32).cos())
            .collect()
    }

    #[test]
    fn test_output_length_matches_block_size() {
        for size in [1, 7, 64, 1024] {
            let mut transformer = SpectralTransformer::new(size, WindowFunction::Rectangular);
            let spectrum = transformer.transform(&vec![0.25; size]).unwrap();
            assert_eq!(spectrum.real().len(), size);
            assert_eq!(spectrum.imag().len(), size);
        }
    }

    #[test]
    fn test_mis_sized_block_is_rejected() {
        let mut transformer = SpectralTransformer::new(64, WindowFunction::Rectangular);
        let result = transformer.transform(&[0.0; 63]);
        assert_eq!(
            result.unwrap_err(),
            BlockError::ShapeMismatch {
                expected: 64,
                actual: 63
            }
        );
    }

    #[test]
    fn test_dc_input() {
        let mut transformer = SpectralTransformer::new(8, WindowFunction::Rectangular);
        let spectrum = transformer.transform(&[1.0; 8]).unwrap();

        // All energy lands in bin 0 with value N
        assert_abs_diff_eq!(spectrum.real()[0], 8.0, epsilon = 1e-5);
        for bin in 1..8 {
            assert_abs_diff_eq!(spectrum.magnitude(bin), 0.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_cosine_matches_unnormalized_dft() {
        let size = 64;
        let mut transformer = SpectralTransformer::new(size, WindowFunction::Rectangular);
        let spectrum = transformer.transform(&cosine(5, size)).unwrap();

        // A unit cosine splits into N/2 at +bin and N/2 at the mirrored bin
        assert_abs_diff_eq!(spectrum.real()[5], 32.0, epsilon = 1e-3);
        assert_abs_diff_eq!(spectrum.real()[size - 5], 32.0, epsilon = 1e-3);
        assert_abs_diff_eq!(spectrum.imag()[5], 0.0, epsilon = 1e-3);
    }

    #[test]
    fn test_hann_window_reduces_dc_gain() {
        let size = 256;
        let mut rectangular = SpectralTransformer::new(size, WindowFunction::Rectangular);
        let mut hann = SpectralTransformer::new(size, WindowFunction::Hann);

        let flat = vec![1.0; size];
        let raw = rectangular.transform(&flat).unwrap().real()[0];
        let windowed = hann.transform(&flat).unwrap().real()[0];

        // Hann window sums to roughly half the block length
        assert_abs_diff_eq!(raw, size as f32, epsilon = 1e-3);
        assert_abs_diff_eq!(windowed, (size as f32 - 1.0) / 2.0, epsilon = 1e-2);
    }

    #[test]
    fn test_transform_is_deterministic() {
        let mut transformer = SpectralTransformer::new(128, WindowFunction::Hamming);
        let block = cosine(3, 128);
        let first = transformer.transform(&block).unwrap().clone();
        let second = transformer.transform(&block).unwrap().clone();
        assert_eq!(first, second);
    }
}
