//! Error types for configuration and block handling.

use thiserror::Error;

/// Invalid analyzer configuration, detected at construction
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("block size must be > 0")]
    ZeroBlockSize,

    #[error("band count must be > 0")]
    ZeroBandCount,

    #[error("band count {band_count} exceeds block size {block_size}")]
    BandCountExceedsBlockSize { band_count: usize, block_size: usize },

    #[error("gain must be finite and >= 0, got {0}")]
    InvalidGain(f32),

    #[error("sample rate must be > 0")]
    ZeroSampleRate,

    #[error("refresh interval must be > 0 ms")]
    ZeroRefreshInterval,

    #[error("magnitude limit must be finite and > 0, got {0}")]
    InvalidMagnitudeLimit(f32),

    #[error("channel count must be > 0")]
    ZeroChannels,
}

/// A block handed to the pipeline did not have the configured length
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BlockError {
    #[error("expected a block of {expected} samples, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },
}

/// Unified error type for the crate.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("invalid block: {0}")]
    Block(#[from] BlockError),

    #[cfg(feature = "capture")]
    #[error("audio capture error: {0}")]
    Capture(String),
}

pub type Result<T> = std::result::Result<T, Error>;
