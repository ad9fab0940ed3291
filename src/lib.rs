//! Barscope library - live bar-chart spectrum of an audio stream

pub mod audio;
pub mod cli;
pub mod display;
pub mod error;
pub mod params;

pub use error::{BlockError, ConfigError, Error, Result};
