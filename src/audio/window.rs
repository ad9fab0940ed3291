//! Window functions applied to a block before the transform.

use std::f32::consts::PI;
use std::fmt;
use std::str::FromStr;

/// Window shape used by the spectral transformer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WindowFunction {
    /// No windowing: samples enter the transform unchanged
    #[default]
    Rectangular,

    /// Raised cosine, zero at both edges
    Hann,

    /// Raised cosine on a 0.08 pedestal
    Hamming,
}

impl WindowFunction {
    /// Weight of sample `index` in a window of `size` samples
    pub fn coefficient(self, index: usize, size: usize) -> f32 {
        if size <= 1 {
            return 1.0;
        }
        let phase = (2.0 * PI * index as f32) / (size as f32 - 1.0);
        match self {
            Self::Rectangular => 1.0,
            Self::Hann => 0.5 * (1.0 - phase.cos()),
            Self::Hamming => 0.54 - 0.46 * phase.cos(),
        }
    }

    /// Full table of weights for a window of `size` samples
    pub fn coefficients(self, size: usize) -> Vec<f32> {
        (0..size).map(|i| self.coefficient(i, size)).collect()
    }

    pub fn is_rectangular(self) -> bool {
        self == Self::Rectangular
    }
}

impl fmt::Display for WindowFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Rectangular => "rectangular",
            Self::Hann => "hann",
            Self::Hamming => "hamming",
        };
        f.write_str(name)
    }
}

impl FromStr for WindowFunction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "rectangular" | "none" => Ok(Self::Rectangular),
            "hann" | "hanning" => Ok(Self::Hann),
            "hamming" => Ok(Self::Hamming),
            other => Err(format!(
                "unknown window '{}', expected rectangular, hann or hamming",
                other
            )),
        }
    }
}
