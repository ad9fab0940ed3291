//! Copies the latest spectrum into a display frame on the UI's own cadence.

use std::thread;
use std::time::{Duration, Instant};

use log::trace;

use crate::audio::SpectrumReader;

/// Display-side poller with its own frame buffer
pub struct DisplayBridge {
    reader: SpectrumReader,
    magnitude_limit: f32,
    frame: Vec<f32>,
}

impl DisplayBridge {
    /// Create a bridge whose frame starts as all zeros
    pub fn new(reader: SpectrumReader, magnitude_limit: f32) -> Self {
        let frame = vec![0.0; reader.band_count()];
        Self {
            reader,
            magnitude_limit,
            frame,
        }
    }

    pub fn frame(&self) -> &[f32] {
        &self.frame
    }

    pub fn magnitude_limit(&self) -> f32 {
        self.magnitude_limit
    }

    /// Refresh the frame from the latest snapshot
    ///
    /// Only copies while the pipeline is active; an idle pipeline leaves the
    /// previous frame on screen. Returns whether the frame was refreshed.
    pub fn tick(&mut self) -> bool {
        if !self.reader.is_active() {
            return false;
        }

        let latest = self.reader.latest();
        for (bar, &magnitude) in self.frame.iter_mut().zip(latest.iter()) {
            *bar = magnitude.min(self.magnitude_limit);
        }
        true
    }

    /// Tick every `interval` for `duration`, handing each frame to `on_frame`
    pub fn run_for(
        &mut self,
        duration: Duration,
        interval: Duration,
        mut on_frame: impl FnMut(&[f32]),
    ) {
        let start = Instant::now();
        let mut next_tick = start;

        while start.elapsed() < duration {
            let refreshed = self.tick();
            trace!("Display tick (refreshed: {})", refreshed);
            on_frame(&self.frame);

            next_tick += interval;
            if let Some(wait) = next_tick.checked_duration_since(Instant::now()) {
                thread::sleep(wait);
            }
        }
    }
}
