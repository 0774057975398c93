//! Directional spectrum matrices and bin-width quadrature.

use crate::error::SpectrumError;
use crate::grid::SpectrumGrid;

/// A non-negative energy density `S(f, θ)` on a [`SpectrumGrid`].
///
/// Values are stored row-major: one row of `n_directions` values per
/// frequency. Density units follow the grid, e.g. m²/(Hz·rad) for a basis
/// grid or m²/(rad/s·deg) for a rad/s, degree grid.
#[derive(Clone, Debug, PartialEq)]
pub struct DirectionalSpectrum {
    grid: SpectrumGrid,
    values: Vec<f64>,
}

impl DirectionalSpectrum {
    /// Creates a spectrum from row-major values.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`SpectrumError::ShapeMismatch`] | `values.len() != nf * nd` |
    /// | [`SpectrumError::NonFiniteValue`] | a value is NaN or infinite |
    pub fn new(grid: SpectrumGrid, values: Vec<f64>) -> Result<Self, SpectrumError> {
        let expected = grid.n_frequencies() * grid.n_directions();
        if values.len() != expected {
            return Err(SpectrumError::ShapeMismatch {
                expected,
                got: values.len(),
            });
        }
        if let Some(index) = values.iter().position(|v| !v.is_finite()) {
            return Err(SpectrumError::NonFiniteValue { index });
        }
        Ok(Self { grid, values })
    }

    /// Creates an all-zero spectrum on `grid`.
    pub fn zeros(grid: SpectrumGrid) -> Self {
        let n = grid.n_frequencies() * grid.n_directions();
        Self {
            grid,
            values: vec![0.0; n],
        }
    }

    /// Returns the grid.
    pub fn grid(&self) -> &SpectrumGrid {
        &self.grid
    }

    /// Returns all values, row-major.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Returns the number of frequencies.
    pub fn n_frequencies(&self) -> usize {
        self.grid.n_frequencies()
    }

    /// Returns the number of directions.
    pub fn n_directions(&self) -> usize {
        self.grid.n_directions()
    }

    /// Returns the density at frequency index `f` and direction index `d`.
    pub fn get(&self, f: usize, d: usize) -> f64 {
        self.values[f * self.n_directions() + d]
    }

    /// Returns the directional row at frequency index `f`.
    pub fn row(&self, f: usize) -> &[f64] {
        let nd = self.n_directions();
        &self.values[f * nd..(f + 1) * nd]
    }

    /// Wraps values already known to match the grid.
    pub(crate) fn from_parts(grid: SpectrumGrid, values: Vec<f64>) -> Self {
        debug_assert_eq!(values.len(), grid.n_frequencies() * grid.n_directions());
        Self { grid, values }
    }

    /// Frequency bin widths in the grid's unit.
    pub fn frequency_widths(&self) -> Vec<f64> {
        linear_widths(self.grid.frequencies())
    }

    /// Direction bin widths in the grid's unit.
    pub fn direction_widths(&self) -> Vec<f64> {
        periodic_widths(self.grid.directions(), self.grid.direction_period())
    }

    /// Frequency spectrum: `S` integrated over direction at each frequency.
    pub fn frequency_spectrum(&self) -> Vec<f64> {
        let dw = self.direction_widths();
        (0..self.n_frequencies())
            .map(|f| self.row(f).iter().zip(&dw).map(|(s, w)| s * w).sum())
            .collect()
    }

    /// Directional distribution: `S` integrated over frequency at each
    /// direction.
    pub fn direction_distribution(&self) -> Vec<f64> {
        let fw = self.frequency_widths();
        let nd = self.n_directions();
        let mut out = vec![0.0; nd];
        for (f, w) in fw.iter().enumerate() {
            for (o, s) in out.iter_mut().zip(self.row(f)) {
                *o += s * w;
            }
        }
        out
    }

    /// Zeroth moment `m0`, the total variance in m².
    pub fn energy(&self) -> f64 {
        self.frequency_spectrum()
            .iter()
            .zip(self.frequency_widths())
            .map(|(s, w)| s * w)
            .sum()
    }

    /// Significant wave height `4 sqrt(m0)`.
    pub fn hsig(&self) -> f64 {
        4.0 * self.energy().max(0.0).sqrt()
    }
}

/// Midpoint-rule widths for a monotonic axis.
///
/// End points get half an interval. A single point has zero width.
pub fn linear_widths(x: &[f64]) -> Vec<f64> {
    let n = x.len();
    if n < 2 {
        return vec![0.0; n];
    }
    (0..n)
        .map(|i| {
            let lo = x[i.saturating_sub(1)];
            let hi = x[(i + 1).min(n - 1)];
            (hi - lo) / 2.0
        })
        .collect()
}

/// Midpoint-rule widths on a periodic axis.
///
/// Values are wrapped onto one period; points that coincide after wrapping
/// (such as -180 and 180 degrees) split a single width between them. When
/// the points only cover an arc, the largest gap is treated as the arc's
/// boundary and the end points get half their inner interval on that side.
pub fn periodic_widths(x: &[f64], period: f64) -> Vec<f64> {
    let n = x.len();
    if n == 0 {
        return Vec::new();
    }
    let tol = 1e-9 * period;
    let mut order: Vec<(f64, usize)> = x
        .iter()
        .enumerate()
        .map(|(i, &v)| {
            let w = v.rem_euclid(period);
            (if period - w < tol { 0.0 } else { w }, i)
        })
        .collect();
    order.sort_by(|a, b| a.0.total_cmp(&b.0));

    // Distinct wrapped positions and the original indices at each.
    let mut groups: Vec<(f64, Vec<usize>)> = Vec::new();
    for (v, i) in order {
        match groups.last_mut() {
            Some((u, members)) if v - *u < tol => members.push(i),
            _ => groups.push((v, vec![i])),
        }
    }

    let m = groups.len();
    let mut widths = vec![0.0; n];
    if m == 1 {
        for &i in &groups[0].1 {
            widths[i] = period / groups[0].1.len() as f64;
        }
        return widths;
    }

    // gaps[k] runs from groups[k] to groups[k + 1] (cyclically).
    let gaps: Vec<f64> = (0..m)
        .map(|k| {
            let next = if k + 1 == m {
                groups[0].0 + period
            } else {
                groups[k + 1].0
            };
            next - groups[k].0
        })
        .collect();
    let mut sorted = gaps.clone();
    sorted.sort_by(f64::total_cmp);
    let median = sorted[m / 2];
    let (edge, largest) = gaps
        .iter()
        .enumerate()
        .fold((0, f64::NEG_INFINITY), |acc, (k, &g)| {
            if g > acc.1 { (k, g) } else { acc }
        });
    let open_arc = m >= 3 && largest > 1.5 * median;

    for (k, (_, members)) in groups.iter().enumerate() {
        let left_k = (k + m - 1) % m;
        let mut left = gaps[left_k];
        let mut right = gaps[k];
        if open_arc && left_k == edge {
            left = right;
        }
        if open_arc && k == edge {
            right = left;
        }
        let width = (left + right) / 2.0 / members.len() as f64;
        for &i in members {
            widths[i] = width;
        }
    }
    widths
}
