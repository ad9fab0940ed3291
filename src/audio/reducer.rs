//! Reduction of a transformed block to display bands.

use super::fft::FrequencyDomain;
use crate::error::ConfigError;

/// Keeps the lowest `band_count` bins (DC included) as scaled magnitudes
#[derive(Debug, Clone)]
pub struct MagnitudeReducer {
    band_count: usize,
    gain: f32,
}

impl MagnitudeReducer {
    /// Create a reducer for spectra of `block_size` bins
    pub fn new(band_count: usize, block_size: usize, gain: f32) -> Result<Self, ConfigError> {
        if block_size == 0 {
            return Err(ConfigError::ZeroBlockSize);
        }
        if band_count == 0 {
            return Err(ConfigError::ZeroBandCount);
        }
        if band_count > block_size {
            return Err(ConfigError::BandCountExceedsBlockSize {
                band_count,
                block_size,
            });
        }
        if !gain.is_finite() || gain < 0.0 {
            return Err(ConfigError::InvalidGain(gain));
        }
        Ok(Self { band_count, gain })
    }

    pub fn band_count(&self) -> usize {
        self.band_count
    }

    pub fn gain(&self) -> f32 {
        self.gain
    }

    /// Write `band_count` magnitudes into `out` without allocating
    ///
    /// # Panics
    /// If the spectrum has fewer bins than `band_count`.
    pub fn reduce_into(&self, spectrum: &FrequencyDomain, out: &mut [f32]) {
        debug_assert_eq!(out.len(), self.band_count);

        let bins = spectrum.real()[..self.band_count]
            .iter()
            .zip(&spectrum.imag()[..self.band_count]);

        for (slot, (re, im)) in out.iter_mut().zip(bins) {
            *slot = re.hypot(*im) * self.gain;
        }
    }

    /// Allocate and return the magnitude vector for one spectrum
    pub fn reduce(&self, spectrum: &FrequencyDomain) -> Vec<f32> {
        let mut out = vec![0.0; self.band_count];
        self.reduce_into(spectrum, &mut out);
        out
    }
}
