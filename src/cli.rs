//! Command-line argument parsing.

use clap::Parser;

use crate::audio::WindowFunction;
use crate::error::ConfigError;
use crate::params::{audio_constants, AnalyzerConfig};

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "barscope")]
#[command(about = "Live bar-chart spectrum of an audio signal", long_about = None)]
pub struct Args {
    /// Samples per analyzed block
    #[arg(long, value_name = "SAMPLES", default_value_t = audio_constants::BLOCK_SIZE)]
    pub block_size: usize,

    /// Number of low-frequency bins shown as bars
    #[arg(long, value_name = "COUNT", default_value_t = audio_constants::BAND_COUNT)]
    pub bands: usize,

    /// Scalar applied to every magnitude
    #[arg(long, default_value_t = 1.0)]
    pub gain: f32,

    /// Window before the transform: rectangular (default), hann, hamming
    #[arg(long, value_name = "WINDOW", default_value = "rectangular")]
    pub window: WindowFunction,

    /// Sample rate of the analyzed signal (Hz)
    #[arg(long, value_name = "HZ", default_value_t = 44100)]
    pub sample_rate: usize,

    /// Display refresh interval (milliseconds)
    #[arg(long, value_name = "MS", default_value_t = 50)]
    pub refresh_ms: u64,

    /// Bar height ceiling
    #[arg(long, value_name = "MAGNITUDE", default_value_t = 100.0)]
    pub limit: f32,

    /// Test tone frequency (Hz)
    #[arg(long, value_name = "HZ", default_value_t = 440.0)]
    pub tone_hz: f32,

    /// Test tone amplitude (0..1)
    #[arg(long, default_value_t = 0.5)]
    pub amplitude: f32,

    /// How long to run (seconds)
    #[arg(long, value_name = "SECONDS", default_value_t = 5.0)]
    pub seconds: f32,

    /// Pause analysis after this many seconds; the display freezes
    #[arg(long, value_name = "SECONDS")]
    pub pause_after: Option<f32>,

    /// Analyze the default input device instead of a test tone
    #[cfg(feature = "capture")]
    #[arg(long)]
    pub capture: bool,
}

impl Args {
    /// Build and validate the analyzer configuration
    pub fn analyzer_config(&self) -> Result<AnalyzerConfig, ConfigError> {
        let config = AnalyzerConfig {
            block_size: self.block_size,
            band_count: self.bands,
            gain: self.gain,
            window: self.window,
            sample_rate_hz: self.sample_rate,
            refresh_interval_ms: self.refresh_ms,
            magnitude_limit: self.limit,
        };
        config.validate()?;
        Ok(config)
    }
}
