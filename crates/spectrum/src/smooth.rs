//! Cross-shaped smoothing of directional spectra.

use crate::error::SpectrumError;
use crate::spectrum::DirectionalSpectrum;

/// Weights of a cross-shaped smoothing kernel.
///
/// Each arm holds the weights of the centre cell and of the first and second
/// neighbours along that axis. The centre cell receives the sum of both
/// centre weights.
///
/// # Example
///
/// ```
/// use nereus_spectrum::SmoothingKernel;
///
/// let k = SmoothingKernel::default();
/// assert_eq!(k.frequency_arm(), [1.0, 0.5, 0.25]);
/// assert_eq!(SmoothingKernel::direction_only().frequency_arm(), [0.0; 3]);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SmoothingKernel {
    frequency: [f64; 3],
    direction: [f64; 3],
}

impl SmoothingKernel {
    /// Creates a kernel from its frequency and direction arms.
    ///
    /// # Errors
    ///
    /// Returns [`SpectrumError::InvalidKernel`] if a weight is negative or
    /// non-finite, or if all weights are zero.
    pub fn new(frequency: [f64; 3], direction: [f64; 3]) -> Result<Self, SpectrumError> {
        if let Some(&w) = frequency
            .iter()
            .chain(&direction)
            .find(|w| !w.is_finite() || **w < 0.0)
        {
            return Err(SpectrumError::InvalidKernel(w));
        }
        if frequency.iter().chain(&direction).all(|&w| w == 0.0) {
            return Err(SpectrumError::InvalidKernel(0.0));
        }
        Ok(Self {
            frequency,
            direction,
        })
    }

    /// Kernel that smooths along direction only.
    pub fn direction_only() -> Self {
        Self {
            frequency: [0.0; 3],
            direction: [1.0, 0.5, 0.25],
        }
    }

    /// Returns the frequency arm weights.
    pub fn frequency_arm(&self) -> [f64; 3] {
        self.frequency
    }

    /// Returns the direction arm weights.
    pub fn direction_arm(&self) -> [f64; 3] {
        self.direction
    }
}

impl Default for SmoothingKernel {
    fn default() -> Self {
        Self {
            frequency: [1.0, 0.5, 0.25],
            direction: [1.0, 0.5, 0.25],
        }
    }
}

/// Smooths `spectrum` with `kernel`.
///
/// Neighbours wrap around in direction. In frequency, neighbours past the
/// first or last bin are dropped and the remaining weights renormalized.
/// When the first and last directions coincide on the circle (e.g. -180
/// and 180 degrees) they are treated as one cell.
pub fn smooth(spectrum: &DirectionalSpectrum, kernel: &SmoothingKernel) -> DirectionalSpectrum {
    let nf = spectrum.n_frequencies();
    let nd = spectrum.n_directions();
    let ring = if has_duplicate_wrap(spectrum) { nd - 1 } else { nd };
    let [f0, f1, f2] = kernel.frequency;
    let [d0, d1, d2] = kernel.direction;

    let mut out = vec![0.0; nf * nd];
    for i in 0..nf {
        for j in 0..ring {
            let mut sum = (f0 + d0) * spectrum.get(i, j);
            let mut total = f0 + d0;

            for (offset, w) in [(1, f1), (2, f2)] {
                if w == 0.0 {
                    continue;
                }
                if i >= offset {
                    sum += w * spectrum.get(i - offset, j);
                    total += w;
                }
                if i + offset < nf {
                    sum += w * spectrum.get(i + offset, j);
                    total += w;
                }
            }
            for (offset, w) in [(1, d1), (2, d2)] {
                if w == 0.0 {
                    continue;
                }
                sum += w * spectrum.get(i, (j + offset) % ring);
                sum += w * spectrum.get(i, (j + ring - offset % ring) % ring);
                total += 2.0 * w;
            }
            out[i * nd + j] = if total > 0.0 { sum / total } else { 0.0 };
        }
        if ring < nd {
            out[i * nd + nd - 1] = out[i * nd];
        }
    }
    DirectionalSpectrum::from_parts(spectrum.grid().clone(), out)
}

fn has_duplicate_wrap(spectrum: &DirectionalSpectrum) -> bool {
    let dirs = spectrum.grid().directions();
    let period = spectrum.grid().direction_period();
    if dirs.len() < 2 {
        return false;
    }
    let gap = (dirs[dirs.len() - 1] - dirs[0]).rem_euclid(period);
    gap < 1e-9 * period || period - gap < 1e-9 * period
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{DirectionUnit, SpectrumGrid};
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    fn spectrum(nf: usize, nd: usize, values: Vec<f64>) -> DirectionalSpectrum {
        let freqs = (1..=nf).map(|i| 0.05 * i as f64).collect();
        let dirs = (0..nd).map(|j| 2.0 * PI * j as f64 / nd as f64).collect();
        DirectionalSpectrum::new(SpectrumGrid::new(freqs, dirs).unwrap(), values).unwrap()
    }

    #[test]
    fn kernel_validation() {
        assert!(SmoothingKernel::new([1.0, 0.5, 0.25], [1.0, 0.5, 0.25]).is_ok());
        assert_eq!(
            SmoothingKernel::new([1.0, -0.5, 0.25], [1.0, 0.5, 0.25]).unwrap_err(),
            SpectrumError::InvalidKernel(-0.5)
        );
        assert!(SmoothingKernel::new([0.0; 3], [0.0; 3]).is_err());
    }

    #[test]
    fn constant_spectrum_is_unchanged() {
        let s = spectrum(6, 12, vec![3.0; 72]);
        let out = smooth(&s, &SmoothingKernel::default());
        for v in out.values() {
            assert_relative_eq!(*v, 3.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn interior_weights_match_cross_kernel() {
        let nf = 9;
        let nd = 12;
        let mut values = vec![0.0; nf * nd];
        values[4 * nd + 5] = 5.0;
        let out = smooth(&spectrum(nf, nd, values), &SmoothingKernel::default());
        // Total weight 5: centre 2, first neighbours 0.5 x 4, second 0.25 x 4.
        assert_relative_eq!(out.get(4, 5), 2.0, epsilon = 1e-12);
        assert_relative_eq!(out.get(3, 5), 0.5, epsilon = 1e-12);
        assert_relative_eq!(out.get(4, 6), 0.5, epsilon = 1e-12);
        assert_relative_eq!(out.get(4, 7), 0.25, epsilon = 1e-12);
        assert_relative_eq!(out.get(2, 5), 0.25, epsilon = 1e-12);
        assert_eq!(out.get(3, 6), 0.0);
    }

    #[test]
    fn direction_wraps() {
        let nd = 8;
        let mut values = vec![0.0; nd];
        values[0] = 1.0;
        let out = smooth(&spectrum(1, nd, values), &SmoothingKernel::direction_only());
        assert_relative_eq!(out.get(0, 7), out.get(0, 1), epsilon = 1e-12);
        assert!(out.get(0, 7) > 0.0);
        assert_relative_eq!(out.values().iter().sum::<f64>(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn direction_only_preserves_frequency_spectrum() {
        let nf = 4;
        let nd = 10;
        let values: Vec<f64> = (0..nf * nd).map(|i| ((i * 7) % 11) as f64).collect();
        let s = spectrum(nf, nd, values);
        let out = smooth(&s, &SmoothingKernel::direction_only());
        for (a, b) in s.frequency_spectrum().iter().zip(out.frequency_spectrum()) {
            assert_relative_eq!(*a, b, epsilon = 1e-9);
        }
    }

    #[test]
    fn duplicate_wrap_points_stay_equal() {
        let dirs: Vec<f64> = (0..9).map(|j| -180.0 + 45.0 * j as f64).collect();
        let grid = SpectrumGrid::new(vec![0.1], dirs)
            .unwrap()
            .with_direction_unit(DirectionUnit::Degrees);
        let mut values = vec![0.0; 9];
        values[0] = 1.0;
        values[8] = 1.0;
        values[1] = 2.0;
        let out = smooth(
            &DirectionalSpectrum::new(grid, values).unwrap(),
            &SmoothingKernel::direction_only(),
        );
        assert_eq!(out.get(0, 0), out.get(0, 8));
        // Index 7 sees index 0 as its first neighbour and index 1 as its second.
        assert_relative_eq!(out.get(0, 7), (0.5 * 1.0 + 0.25 * 2.0) / 2.5, epsilon = 1e-12);
    }
}
