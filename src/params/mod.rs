//! Parameter definitions with physical units and documented semantics.
//!
//! All tuning constants live here with:
//! - Units in the field names (Hz, milliseconds, samples)
//! - Documented ranges and meanings
//! - Validation that fails fast instead of clamping

mod analyzer;

// Re-export all types
pub use analyzer::{audio_constants, AnalyzerConfig};
