//! Interpolation of a spectrum onto another grid.

use std::f64::consts::PI;

use tracing::warn;

use crate::grid::SpectrumGrid;
use crate::spectrum::DirectionalSpectrum;

/// Relative change in significant wave height above which the target grid is
/// reported as too coarse.
pub const HSIG_TOLERANCE: f64 = 0.02;

/// Significant wave heights before and after a lossy resampling.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridTooCoarse {
    /// Hsig of the input spectrum.
    pub hsig_in: f64,
    /// Hsig of the resampled spectrum.
    pub hsig_out: f64,
}

/// Result of [`resample`].
#[derive(Clone, Debug)]
pub struct Resampled {
    /// Spectrum on the target grid, in the target grid's units.
    pub spectrum: DirectionalSpectrum,
    /// Set when the target grid lost more than [`HSIG_TOLERANCE`] of Hsig.
    pub coarse: Option<GridTooCoarse>,
}

/// Interpolates `spectrum` onto `target`.
///
/// Both grids are converted to Hz and Cartesian radians, the density is
/// interpolated bilinearly (linear in frequency, periodic in direction) and
/// converted to the target's density units. Target frequencies outside the
/// source range get zero density.
///
/// Never fails: a grid too coarse to carry the input energy is reported in
/// [`Resampled::coarse`] and logged.
#[tracing::instrument(skip_all, fields(nf = target.n_frequencies(), nd = target.n_directions()))]
pub fn resample(spectrum: &DirectionalSpectrum, target: &SpectrumGrid) -> Resampled {
    let source = BasisLookup::new(spectrum);
    let out_factor = target.density_factor();
    let target_dirs = target.directions_cartesian_rad();

    let mut values = Vec::with_capacity(target.n_frequencies() * target.n_directions());
    for f in target.frequencies_hz() {
        values.extend(target_dirs.iter().map(|&d| source.density(f, d) * out_factor));
    }
    let out = DirectionalSpectrum::from_parts(target.clone(), values);

    let hsig_in = spectrum.hsig();
    let hsig_out = out.hsig();
    let coarse = if hsig_in > 0.0 && ((hsig_out - hsig_in) / hsig_in).abs() > HSIG_TOLERANCE {
        warn!(
            hsig_in,
            hsig_out, "output grid may be too coarse; increase frequency or direction resolution"
        );
        Some(GridTooCoarse { hsig_in, hsig_out })
    } else {
        None
    };

    Resampled {
        spectrum: out,
        coarse,
    }
}

/// Source spectrum re-expressed in basis units with directions sorted on
/// `[0, 2π)`.
struct BasisLookup {
    frequencies: Vec<f64>,
    /// Distinct wrapped directions, ascending.
    angles: Vec<f64>,
    /// `rows[f][a]`: basis density at frequency `f`, angle index `a`.
    rows: Vec<Vec<f64>>,
}

impl BasisLookup {
    fn new(spectrum: &DirectionalSpectrum) -> Self {
        let grid = spectrum.grid();
        let to_basis = 1.0 / grid.density_factor();
        let period = 2.0 * PI;
        let tol = 1e-9 * period;

        let mut order: Vec<(f64, usize)> = grid
            .directions_cartesian_rad()
            .into_iter()
            .enumerate()
            .map(|(i, d)| {
                let w = d.rem_euclid(period);
                (if period - w < tol { 0.0 } else { w }, i)
            })
            .collect();
        order.sort_by(|a, b| a.0.total_cmp(&b.0));

        let mut groups: Vec<(f64, Vec<usize>)> = Vec::new();
        for (a, i) in order {
            match groups.last_mut() {
                Some((u, members)) if a - *u < tol => members.push(i),
                _ => groups.push((a, vec![i])),
            }
        }

        let rows = (0..spectrum.n_frequencies())
            .map(|f| {
                let row = spectrum.row(f);
                groups
                    .iter()
                    .map(|(_, members)| {
                        members.iter().map(|&i| row[i]).sum::<f64>() / members.len() as f64
                            * to_basis
                    })
                    .collect()
            })
            .collect();

        Self {
            frequencies: grid.frequencies_hz(),
            angles: groups.into_iter().map(|(a, _)| a).collect(),
            rows,
        }
    }

    /// Bilinear density at frequency `f` (Hz) and direction `theta` (rad).
    fn density(&self, f: f64, theta: f64) -> f64 {
        let freqs = &self.frequencies;
        let n = freqs.len();
        let tol = 1e-12 * freqs[n - 1].abs().max(1.0);
        if f < freqs[0] - tol || f > freqs[n - 1] + tol {
            return 0.0;
        }
        let hi = freqs.partition_point(|&x| x < f).min(n - 1);
        if hi == 0 || (freqs[hi] - f).abs() <= tol {
            return self.directional(hi, theta);
        }
        let lo = hi - 1;
        let t = (f - freqs[lo]) / (freqs[hi] - freqs[lo]);
        (1.0 - t) * self.directional(lo, theta) + t * self.directional(hi, theta)
    }

    /// Periodic linear interpolation along direction at frequency index `f`.
    fn directional(&self, f: usize, theta: f64) -> f64 {
        let row = &self.rows[f];
        let m = self.angles.len();
        if m == 1 {
            return row[0];
        }
        let period = 2.0 * PI;
        let a = theta.rem_euclid(period);
        // Index of the last angle <= a, wrapping below the first angle.
        let k = match self.angles.partition_point(|&x| x <= a) {
            0 => m - 1,
            p => p - 1,
        };
        let next = (k + 1) % m;
        let start = self.angles[k];
        let mut gap = self.angles[next] - start;
        let mut offset = a - start;
        if next == 0 {
            gap += period;
        }
        if offset < 0.0 {
            offset += period;
        }
        let t = if gap > 0.0 { offset / gap } else { 0.0 };
        (1.0 - t) * row[k] + t * row[next]
    }
}
