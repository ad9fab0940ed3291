//! Spectrum analyzer configuration and constants.

use std::time::Duration;

use crate::audio::WindowFunction;
use crate::error::ConfigError;

/// Spectral analysis configuration, fixed for the lifetime of a pipeline
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyzerConfig {
    /// Samples per audio block (N)
    /// Any positive size works; powers of two transform fastest
    pub block_size: usize,

    /// Number of low-frequency bins exposed as bars (K)
    /// Valid range: 1..=block_size
    pub band_count: usize,

    /// Scalar applied to every magnitude before publication
    /// Must be finite and >= 0
    pub gain: f32,

    /// Window applied to each block before the transform
    /// Rectangular reproduces the unwindowed output of the visualizer
    pub window: WindowFunction,

    /// Sample rate of the incoming blocks (Hz)
    /// Only used to convert between bins and frequencies
    pub sample_rate_hz: usize,

    /// Display poll interval (milliseconds)
    /// 50 ms = 20 Hz refresh
    pub refresh_interval_ms: u64,

    /// Bar height ceiling applied on the display side
    pub magnitude_limit: f32,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            block_size: audio_constants::BLOCK_SIZE,
            band_count: audio_constants::BAND_COUNT,
            gain: 1.0,
            window: WindowFunction::Rectangular,
            sample_rate_hz: 44100,
            refresh_interval_ms: 50,
            magnitude_limit: 100.0,
        }
    }
}

impl AnalyzerConfig {
    /// Width of one frequency bin (Hz)
    pub fn bin_resolution_hz(&self) -> f32 {
        self.sample_rate_hz as f32 / self.block_size as f32
    }

    /// Convert frequency (Hz) to the nearest lower FFT bin index
    pub fn hz_to_bin(&self, hz: f32) -> usize {
        ((hz * self.block_size as f32) / self.sample_rate_hz as f32) as usize
    }

    /// Center frequency of a bin (Hz)
    pub fn bin_to_hz(&self, bin: usize) -> f32 {
        bin as f32 * self.bin_resolution_hz()
    }

    /// Display refresh cadence
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_millis(self.refresh_interval_ms)
    }

    /// Wall-clock length of one block at the configured sample rate
    pub fn block_duration(&self) -> Duration {
        Duration::from_secs_f64(self.block_size as f64 / self.sample_rate_hz as f64)
    }

    /// Validate configuration (K within 1..=N, finite gain, etc.)
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.block_size == 0 {
            return Err(ConfigError::ZeroBlockSize);
        }
        if self.band_count == 0 {
            return Err(ConfigError::ZeroBandCount);
        }
        if self.band_count > self.block_size {
            return Err(ConfigError::BandCountExceedsBlockSize {
                band_count: self.band_count,
                block_size: self.block_size,
            });
        }
        if !self.gain.is_finite() || self.gain < 0.0 {
            return Err(ConfigError::InvalidGain(self.gain));
        }
        if self.sample_rate_hz == 0 {
            return Err(ConfigError::ZeroSampleRate);
        }
        if self.refresh_interval_ms == 0 {
            return Err(ConfigError::ZeroRefreshInterval);
        }
        if !self.magnitude_limit.is_finite() || self.magnitude_limit <= 0.0 {
            return Err(ConfigError::InvalidMagnitudeLimit(self.magnitude_limit));
        }
        Ok(())
    }
}

/// Default sizes used by the bar visualizer
pub mod audio_constants {
    /// Audio block size (samples per callback)
    /// 1024 = 23.2ms @ 44.1kHz
    pub const BLOCK_SIZE: usize = 1024;

    /// Number of bars drawn
    pub const BAND_COUNT: usize = 48;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = AnalyzerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.block_size, 1024);
        assert_eq!(config.band_count, 48);
        assert_eq!(config.gain, 1.0);
    }

    #[test]
    fn test_hz_to_bin() {
        let config = AnalyzerConfig::default();

        // At 44100 Hz sample rate and 1024 block size:
        // Bin resolution = 44100 / 1024 ≈ 43.07 Hz per bin
        assert_eq!(config.hz_to_bin(0.0), 0);
        assert_eq!(config.hz_to_bin(43.07), 1);
        assert_eq!(config.hz_to_bin(440.0), 10);
        assert!((config.bin_to_hz(10) - 430.66).abs() < 0.01);
    }

    #[test]
    fn test_band_count_exceeding_block_size_is_rejected() {
        let config = AnalyzerConfig {
            block_size: 64,
            band_count: 100,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::BandCountExceedsBlockSize {
                band_count: 100,
                block_size: 64
            })
        );
    }

    #[test]
    fn test_zero_sizes_are_rejected() {
        let zero_block = AnalyzerConfig {
            block_size: 0,
            ..Default::default()
        };
        assert_eq!(zero_block.validate(), Err(ConfigError::ZeroBlockSize));

        let zero_bands = AnalyzerConfig {
            band_count: 0,
            ..Default::default()
        };
        assert_eq!(zero_bands.validate(), Err(ConfigError::ZeroBandCount));

        let zero_refresh = AnalyzerConfig {
            refresh_interval_ms: 0,
            ..Default::default()
        };
        assert_eq!(zero_refresh.validate(), Err(ConfigError::ZeroRefreshInterval));
    }

    #[test]
    fn test_gain_and_limit_must_be_finite() {
        let negative_gain = AnalyzerConfig {
            gain: -1.0,
            ..Default::default()
        };
        assert!(matches!(
            negative_gain.validate(),
            Err(ConfigError::InvalidGain(_))
        ));

        let nan_limit = AnalyzerConfig {
            magnitude_limit: f32::NAN,
            ..Default::default()
        };
        assert!(matches!(
            nan_limit.validate(),
            Err(ConfigError::InvalidMagnitudeLimit(_))
        ));
    }

    #[test]
    fn test_block_size_equal_to_band_count_is_valid() {
        let config = AnalyzerConfig {
            block_size: 16,
            band_count: 16,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_block_duration() {
        let config = AnalyzerConfig {
            block_size: 441,
            sample_rate_hz: 44100,
            ..Default::default()
        };
        assert_eq!(config.block_duration(), Duration::from_millis(10));
        assert_eq!(config.refresh_interval(), Duration::from_millis(50));
    }
}
