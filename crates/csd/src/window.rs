//! Segment tapers.

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use crate::error::CsdError;

/// Taper applied to each segment before the FFT.
///
/// Coefficients are periodic (DFT-even), so a window of length `L` is the
/// first `L` points of a symmetric window of length `L + 1`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Window {
    /// Hamming window.
    #[default]
    Hamming,
    /// Hann window.
    Hann,
    /// No taper.
    Rectangular,
}

impl Window {
    /// Returns the window coefficients for a segment of length `n`.
    pub fn coefficients(self, n: usize) -> Vec<f64> {
        let step = 2.0 * PI / n as f64;
        (0..n)
            .map(|i| match self {
                Self::Hamming => 0.54 - 0.46 * (step * i as f64).cos(),
                Self::Hann => 0.5 - 0.5 * (step * i as f64).cos(),
                Self::Rectangular => 1.0,
            })
            .collect()
    }

    fn name(self) -> &'static str {
        match self {
            Self::Hamming => "hamming",
            Self::Hann => "hann",
            Self::Rectangular => "rectangular",
        }
    }
}

impl fmt::Display for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Window {
    type Err = CsdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "hamming" => Ok(Self::Hamming),
            "hann" | "hanning" => Ok(Self::Hann),
            "rectangular" | "boxcar" | "none" => Ok(Self::Rectangular),
            _ => Err(CsdError::UnknownWindow(s.to_string())),
        }
    }
}
