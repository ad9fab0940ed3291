//! Block-by-block spectrum pipeline: transform, reduce, publish.

use log::{info, trace};

use super::fft::SpectralTransformer;
use super::published::{MagnitudeVector, PlaybackHandle, SharedSpectrum, SpectrumReader};
use super::reducer::MagnitudeReducer;
use crate::error::{BlockError, ConfigError};
use crate::params::AnalyzerConfig;

/// Whether incoming blocks are published
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    /// No audio flowing; the last published vector is retained
    Idle,
    /// Each processed block replaces the published vector
    Active,
}

/// Orchestrates transformer, reducer and published state
///
/// Owned by the audio callback. The display side holds a
/// [`SpectrumReader`], the transport side a [`PlaybackHandle`].
pub struct SpectrumPipeline {
    config: AnalyzerConfig,
    transformer: SpectralTransformer,
    reducer: MagnitudeReducer,
    spectrum: SharedSpectrum,
    /// Reused output buffer for the reducer
    bands: Vec<f32>,
}

impl SpectrumPipeline {
    /// Create an idle pipeline, failing fast on invalid configuration
    pub fn new(config: &AnalyzerConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let transformer = SpectralTransformer::new(config.block_size, config.window);
        let reducer = MagnitudeReducer::new(config.band_count, config.block_size, config.gain)?;

        info!(
            "Spectrum pipeline: {} samples/block, {} bands, gain {}, {} window ({:.2} Hz/bin)",
            config.block_size,
            config.band_count,
            config.gain,
            config.window,
            config.bin_resolution_hz()
        );

        Ok(Self {
            config: config.clone(),
            transformer,
            reducer,
            spectrum: SharedSpectrum::new(config.band_count),
            bands: vec![0.0; config.band_count],
        })
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    pub fn state(&self) -> PipelineState {
        if self.spectrum.is_active() {
            PipelineState::Active
        } else {
            PipelineState::Idle
        }
    }

    /// Idle -> Active (playback started)
    pub fn start(&self) {
        self.spectrum.set_active(true);
    }

    /// Active -> Idle (playback stopped or paused); the last vector is kept
    pub fn stop(&self) {
        self.spectrum.set_active(false);
    }

    pub fn reader(&self) -> SpectrumReader {
        self.spectrum.reader()
    }

    pub fn playback_handle(&self) -> PlaybackHandle {
        self.spectrum.playback_handle()
    }

    /// Process one audio block
    ///
    /// The block must be exactly `block_size` samples long. While idle the
    /// block is validated and then dropped.
    pub fn process_block(&mut self, block: &[f32]) -> Result<(), BlockError> {
        if !self.spectrum.is_active() {
            if block.len() != self.config.block_size {
                return Err(BlockError::ShapeMismatch {
                    expected: self.config.block_size,
                    actual: block.len(),
                });
            }
            trace!("Dropping block while idle");
            return Ok(());
        }

        let spectrum = self.transformer.transform(block)?;

        self.reducer.reduce_into(spectrum, &mut self.bands);
        self.spectrum
            .publish(MagnitudeVector::from(self.bands.as_slice()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config() -> AnalyzerConfig {
        AnalyzerConfig {
            block_size: 64,
            band_count: 8,
            ..Default::default()
        }
    }

    #[test]
    fn test_new_pipeline_is_idle_with_zeros() {
        let pipeline = SpectrumPipeline::new(&small_config()).unwrap();
        assert_eq!(pipeline.state(), PipelineState::Idle);
        assert_eq!(pipeline.reader().latest().to_vec(), vec![0.0; 8]);
    }

    #[test]
    fn test_invalid_config_fails_fast() {
        let config = AnalyzerConfig {
            block_size: 64,
            band_count: 100,
            ..Default::default()
        };
        assert!(matches!(
            SpectrumPipeline::new(&config),
            Err(ConfigError::BandCountExceedsBlockSize { .. })
        ));
    }

    #[test]
    fn test_active_pipeline_publishes() {
        let mut pipeline = SpectrumPipeline::new(&small_config()).unwrap();
        let reader = pipeline.reader();

        pipeline.start();
        pipeline.process_block(&[0.5; 64]).unwrap();

        let latest = reader.latest();
        assert_eq!(latest.len(), 8);
        assert!((latest[0] - 32.0).abs() < 1e-4);
        assert_eq!(reader.frames_published(), 1);
    }

    #[test]
    fn test_stop_freezes_last_vector() {
        let mut pipeline = SpectrumPipeline::new(&small_config()).unwrap();
        let reader = pipeline.reader();

        pipeline.start();
        pipeline.process_block(&[1.0; 64]).unwrap();
        let frozen = reader.latest();

        pipeline.stop();
        assert_eq!(pipeline.state(), PipelineState::Idle);
        pipeline.process_block(&[0.0; 64]).unwrap();

        assert_eq!(reader.latest(), frozen);
        assert_eq!(reader.frames_published(), 1);
    }

    #[test]
    fn test_mis_sized_block_rejected_in_any_state() {
        let mut pipeline = SpectrumPipeline::new(&small_config()).unwrap();
        let expected = Err(BlockError::ShapeMismatch {
            expected: 64,
            actual: 32,
        });

        assert_eq!(pipeline.process_block(&[0.0; 32]), expected);
        pipeline.start();
        assert_eq!(pipeline.process_block(&[0.0; 32]), expected);
        assert_eq!(pipeline.reader().frames_published(), 0);
    }

    #[test]
    fn test_playback_handle_drives_state() {
        let pipeline = SpectrumPipeline::new(&small_config()).unwrap();
        let handle = pipeline.playback_handle();

        handle.start();
        assert_eq!(pipeline.state(), PipelineState::Active);
        handle.stop();
        assert_eq!(pipeline.state(), PipelineState::Idle);
    }
}
