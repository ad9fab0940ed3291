//! Chunking of arbitrary callback buffers into fixed-size blocks.

use log::trace;

use crate::error::ConfigError;

/// Collects the first channel of interleaved audio into `block_size` blocks
///
/// Capacity is fixed at construction; pushing never grows the buffer.
#[derive(Debug, Clone)]
pub struct BlockAccumulator {
    block_size: usize,
    channels: usize,
    pending: Vec<f32>,
}

impl BlockAccumulator {
    pub fn new(block_size: usize, channels: usize) -> Result<Self, ConfigError> {
        if block_size == 0 {
            return Err(ConfigError::ZeroBlockSize);
        }
        if channels == 0 {
            return Err(ConfigError::ZeroChannels);
        }
        Ok(Self {
            block_size,
            channels,
            pending: Vec::with_capacity(block_size),
        })
    }

    pub fn block_size(&self) -> usize {
        self.block_size
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Samples waiting for the next block
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Push interleaved frames, calling `on_block` for every completed block
    ///
    /// A trailing partial frame is ignored. Returns the number of blocks
    /// emitted.
    pub fn push_interleaved(&mut self, data: &[f32], mut on_block: impl FnMut(&[f32])) -> usize {
        let mut emitted = 0;
        for frame in data.chunks_exact(self.channels) {
            self.pending.push(frame[0]);
            if self.pending.len() == self.block_size {
                on_block(&self.pending);
                self.pending.clear();
                emitted += 1;
            }
        }
        emitted
    }

    /// Zero-pad the pending samples into one final block
    ///
    /// Returns `false` when nothing was pending.
    pub fn flush_padded(&mut self, mut on_block: impl FnMut(&[f32])) -> bool {
        if self.pending.is_empty() {
            return false;
        }
        trace!(
            "Padding final block ({} of {} samples)",
            self.pending.len(),
            self.block_size
        );
        self.pending.resize(self.block_size, 0.0);
        on_block(&self.pending);
        self.pending.clear();
        true
    }

    /// Drop pending samples (e.g. on seek or restart)
    pub fn clear(&mut self) {
        self.pending.clear();
    }
}
