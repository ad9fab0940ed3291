//! Presentation-side access to the published spectrum.

mod bridge;

pub use bridge::DisplayBridge;
