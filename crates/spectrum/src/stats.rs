//! Summary statistics of a directional spectrum.

use crate::spectrum::DirectionalSpectrum;

/// Integral wave parameters of a directional spectrum.
///
/// | Field | Meaning | Unit |
/// |-------|---------|------|
/// | `hsig` | significant wave height `4 sqrt(m0)` | m |
/// | `tp` | period of the peak of the frequency spectrum | s |
/// | `dtp` | direction of the maximum of `S(f_p, ·)` | grid direction unit |
/// | `dp` | direction of the maximum of the frequency-integrated spectrum | grid direction unit |
///
/// Directions are reported in the spectrum grid's own unit and convention.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WaveStatistics {
    /// Significant wave height.
    pub hsig: f64,
    /// Peak period.
    pub tp: f64,
    /// Direction of the spectral peak.
    pub dtp: f64,
    /// Dominant direction.
    pub dp: f64,
}

impl WaveStatistics {
    /// All four values NaN: the result for spectra without energy.
    pub const UNDEFINED: WaveStatistics = WaveStatistics {
        hsig: f64::NAN,
        tp: f64::NAN,
        dtp: f64::NAN,
        dp: f64::NAN,
    };

    /// Computes the statistics of `spectrum`.
    ///
    /// Returns [`WaveStatistics::UNDEFINED`] if the spectrum carries no
    /// energy. Ties resolve to the lowest index.
    pub fn from_spectrum(spectrum: &DirectionalSpectrum) -> Self {
        let m0 = spectrum.energy();
        if m0.is_nan() || m0 <= 0.0 || spectrum.values().iter().all(|&v| v == 0.0) {
            return Self::UNDEFINED;
        }
        let grid = spectrum.grid();

        let Some(fp) = argmax(&spectrum.frequency_spectrum()) else {
            return Self::UNDEFINED;
        };
        let Some(dtp) = argmax(spectrum.row(fp)) else {
            return Self::UNDEFINED;
        };
        let Some(dp) = argmax(&spectrum.direction_distribution()) else {
            return Self::UNDEFINED;
        };

        let f_hz = grid.frequency_hz(fp);
        Self {
            hsig: 4.0 * m0.sqrt(),
            tp: if f_hz > 0.0 { 1.0 / f_hz } else { f64::INFINITY },
            dtp: grid.directions()[dtp],
            dp: grid.directions()[dp],
        }
    }

    /// Returns `true` if the statistics are defined.
    pub fn is_defined(&self) -> bool {
        self.hsig.is_finite()
    }
}

/// Index of the first maximum, ignoring NaN.
fn argmax(values: &[f64]) -> Option<usize> {
    values
        .iter()
        .enumerate()
        .filter(|(_, v)| !v.is_nan())
        .fold(None, |best: Option<(usize, f64)>, (i, &v)| match best {
            Some((_, b)) if b >= v => best,
            _ => Some((i, v)),
        })
        .map(|(i, _)| i)
}
