//! Live input capture feeding the spectrum pipeline.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use log::{error, info, warn};

use super::accumulator::BlockAccumulator;
use super::pipeline::SpectrumPipeline;
use super::published::{PlaybackHandle, SpectrumReader};
use crate::error::{Error, Result};
use crate::params::AnalyzerConfig;

/// Input stream from the default device, analyzed block by block
pub struct AudioCapture {
    reader: SpectrumReader,
    playback: PlaybackHandle,
    device_name: String,

    /// Input stream (kept alive)
    stream: cpal::Stream,
}

impl AudioCapture {
    /// Open the default input device and start publishing spectra
    pub fn start(config: &AnalyzerConfig) -> Result<Self> {
        let mut pipeline = SpectrumPipeline::new(config)?;

        let host = cpal::default_host();
        let device = host
            .default_input_device()
            .ok_or_else(|| Error::Capture("No audio input device found".to_string()))?;

        let supported = device
            .default_input_config()
            .map_err(|e| Error::Capture(format!("Failed to get input config: {}", e)))?;

        if supported.sample_format() != cpal::SampleFormat::F32 {
            return Err(Error::Capture(format!(
                "Unsupported sample format {:?}, expected f32",
                supported.sample_format()
            )));
        }

        let stream_config: cpal::StreamConfig = supported.into();
        let channels = stream_config.channels as usize;
        let device_rate = stream_config.sample_rate.0 as usize;
        if device_rate != config.sample_rate_hz {
            warn!(
                "Device runs at {} Hz but analyzer expects {} Hz; bin frequencies will be off",
                device_rate, config.sample_rate_hz
            );
        }

        let device_name = device.name().unwrap_or_else(|_| "Unknown".to_string());
        info!("Capture: {} @ {}Hz, {} channel(s)", device_name, device_rate, channels);

        let mut accumulator = BlockAccumulator::new(config.block_size, channels)?;
        let reader = pipeline.reader();
        let playback = pipeline.playback_handle();

        let stream = device
            .build_input_stream(
                &stream_config,
                move |data: &[f32], _: &cpal::InputCallbackInfo| {
                    accumulator.push_interleaved(data, |block| {
                        if let Err(e) = pipeline.process_block(block) {
                            error!("Dropped block: {}", e);
                        }
                    });
                },
                |err| error!("Audio stream error: {}", err),
                None,
            )
            .map_err(|e| Error::Capture(format!("Failed to build input stream: {}", e)))?;

        stream
            .play()
            .map_err(|e| Error::Capture(format!("Failed to start input stream: {}", e)))?;
        playback.start();

        Ok(Self {
            reader,
            playback,
            device_name,
            stream,
        })
    }

    pub fn reader(&self) -> SpectrumReader {
        self.reader.clone()
    }

    pub fn device_name(&self) -> &str {
        &self.device_name
    }

    /// Stop the callback; the last spectrum stays readable
    pub fn pause(&self) -> Result<()> {
        self.playback.stop();
        self.stream
            .pause()
            .map_err(|e| Error::Capture(format!("Failed to pause input stream: {}", e)))
    }

    pub fn resume(&self) -> Result<()> {
        self.stream
            .play()
            .map_err(|e| Error::Capture(format!("Failed to resume input stream: {}", e)))?;
        self.playback.start();
        Ok(())
    }
}
