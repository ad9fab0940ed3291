//! Spectral analysis of live audio blocks.
//!
//! Blocks flow source -> transformer -> reducer -> published state on the
//! audio thread; the display polls the published state on its own timer.

mod accumulator;
#[cfg(feature = "capture")]
mod capture;
mod fft;
mod pipeline;
mod published;
mod reducer;
mod synthesis;
mod window;

// Re-export public types
pub use accumulator::BlockAccumulator;
#[cfg(feature = "capture")]
pub use capture::AudioCapture;
pub use fft::{FrequencyDomain, SpectralTransformer};
pub use pipeline::{PipelineState, SpectrumPipeline};
pub use published::{MagnitudeVector, PlaybackHandle, SharedSpectrum, SpectrumReader};
pub use reducer::MagnitudeReducer;
pub use synthesis::ToneGenerator;
pub use window::WindowFunction;
