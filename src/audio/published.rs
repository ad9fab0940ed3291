//! Latest-value snapshot shared between the audio callback and the display.
//!
//! The writer replaces the whole snapshot under a lock whose critical
//! section is a single pointer swap. Readers clone the `Arc` and never see
//! a partially written vector.

use std::ops::Deref;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use log::debug;
use parking_lot::Mutex;

/// Immutable band magnitudes for one processed block
#[derive(Debug, Clone, PartialEq)]
pub struct MagnitudeVector(Arc<[f32]>);

impl MagnitudeVector {
    pub fn zeros(band_count: usize) -> Self {
        Self(vec![0.0; band_count].into())
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    pub fn to_vec(&self) -> Vec<f32> {
        self.0.to_vec()
    }
}

impl From<&[f32]> for MagnitudeVector {
    fn from(values: &[f32]) -> Self {
        Self(values.into())
    }
}

impl Deref for MagnitudeVector {
    type Target = [f32];

    fn deref(&self) -> &[f32] {
        &self.0
    }
}

struct Inner {
    band_count: usize,
    latest: Mutex<MagnitudeVector>,
    active: AtomicBool,
    frames: AtomicU64,
}

/// Published state: most recent magnitude vector plus playback activity
#[derive(Clone)]
pub struct SharedSpectrum {
    inner: Arc<Inner>,
}

impl SharedSpectrum {
    /// Create an idle spectrum holding `band_count` zeros
    pub fn new(band_count: usize) -> Self {
        Self {
            inner: Arc::new(Inner {
                band_count,
                latest: Mutex::new(MagnitudeVector::zeros(band_count)),
                active: AtomicBool::new(false),
                frames: AtomicU64::new(0),
            }),
        }
    }

    /// Replace the current snapshot
    ///
    /// The previous snapshot is dropped after the lock is released.
    pub(crate) fn publish(&self, magnitudes: MagnitudeVector) {
        debug_assert_eq!(magnitudes.len(), self.inner.band_count);
        let previous = std::mem::replace(&mut *self.inner.latest.lock(), magnitudes);
        self.inner.frames.fetch_add(1, Ordering::Release);
        drop(previous);
    }

    pub(crate) fn set_active(&self, active: bool) {
        let was_active = self.inner.active.swap(active, Ordering::AcqRel);
        if was_active != active {
            debug!(
                "Spectrum {}",
                if active { "active" } else { "idle (last frame retained)" }
            );
        }
    }

    pub(crate) fn is_active(&self) -> bool {
        self.inner.active.load(Ordering::Acquire)
    }

    pub fn reader(&self) -> SpectrumReader {
        SpectrumReader {
            inner: Arc::clone(&self.inner),
        }
    }

    pub fn playback_handle(&self) -> PlaybackHandle {
        PlaybackHandle {
            spectrum: self.clone(),
        }
    }
}

/// Read-only view for the presentation side
#[derive(Clone)]
pub struct SpectrumReader {
    inner: Arc<Inner>,
}

impl SpectrumReader {
    /// Most recent complete snapshot
    pub fn latest(&self) -> MagnitudeVector {
        self.inner.latest.lock().clone()
    }

    /// Whether blocks are currently being published
    pub fn is_active(&self) -> bool {
        self.inner.active.load(Ordering::Acquire)
    }

    /// Total snapshots published since construction
    pub fn frames_published(&self) -> u64 {
        self.inner.frames.load(Ordering::Acquire)
    }

    pub fn band_count(&self) -> usize {
        self.inner.band_count
    }
}

/// Idle/Active control for the transport side
///
/// Lets playback code start and stop publication while the pipeline
/// itself is owned by the audio callback.
#[derive(Clone)]
pub struct PlaybackHandle {
    spectrum: SharedSpectrum,
}

impl PlaybackHandle {
    pub fn start(&self) {
        self.spectrum.set_active(true);
    }

    pub fn stop(&self) {
        self.spectrum.set_active(false);
    }

    pub fn is_active(&self) -> bool {
        self.spectrum.is_active()
    }
}
