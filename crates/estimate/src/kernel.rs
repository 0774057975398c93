//! Per-frequency estimation sub-problem.
//!
//! A [`BinProblem`] holds the cross-spectral matrix and transfer functions of
//! the channels that carry usable energy at one frequency, together with the
//! model kernel `G_mn(theta) = conj(T_m) T_n`. For a directional distribution
//! `E` with unit integral the model cross-spectrum is
//! `C_mn = P * sum_theta G_mn E dtheta`.

use std::f64::consts::PI;

use num_complex::Complex64;

use nereus_array::TransferMatrix;

use crate::error::EstimateError;
use crate::linalg::invert;

/// Minimum number of valid channels per frequency.
pub const MIN_VALID_CHANNELS: usize = 3;

/// Auto-spectra below this fraction of the bin's largest are treated as
/// empty.
const VALID_FRACTION: f64 = 1e-12;

/// Diagonal loading relative to the mean auto-spectrum.
const DIAGONAL_LOADING: f64 = 1e-6;

pub(crate) struct BinProblem {
    frequency: f64,
    n: usize,
    n_dirs: usize,
    ddir: f64,
    csd: Vec<Complex64>,
    /// `n x D` responses of the valid channels.
    transfer: Vec<Complex64>,
    /// `n x n x D`.
    kernel: Vec<Complex64>,
}

impl BinProblem {
    /// Selects the valid channels of `csd` (row-major `N x N`) and builds
    /// their kernels from row `f` of `transfer`.
    ///
    /// A channel is valid if its auto-spectrum is finite, positive and at
    /// least `1e-12` times the largest auto-spectrum in the bin.
    pub(crate) fn new(
        frequency: f64,
        csd: &[Complex64],
        transfer: &TransferMatrix,
        f: usize,
    ) -> Result<Self, EstimateError> {
        let n_all = transfer.n_instruments();
        debug_assert_eq!(csd.len(), n_all * n_all);
        let auto = |i: usize| csd[i * n_all + i].re;
        let largest = (0..n_all)
            .map(auto)
            .filter(|v| v.is_finite())
            .fold(0.0_f64, f64::max);
        let valid: Vec<usize> = (0..n_all)
            .filter(|&i| {
                let a = auto(i);
                a.is_finite() && a > 0.0 && a >= VALID_FRACTION * largest
            })
            .collect();
        if valid.len() < MIN_VALID_CHANNELS {
            return Err(EstimateError::UnderdeterminedEstimation {
                frequency,
                valid: valid.len(),
            });
        }

        let n = valid.len();
        let n_dirs = transfer.n_directions();
        let sub = valid
            .iter()
            .flat_map(|&i| valid.iter().map(move |&j| csd[i * n_all + j]))
            .collect();
        let rows: Vec<Complex64> = valid
            .iter()
            .flat_map(|&i| transfer.row(f, i).iter().copied())
            .collect();
        let mut kernel = Vec::with_capacity(n * n * n_dirs);
        for m in 0..n {
            for p in 0..n {
                let tm = &rows[m * n_dirs..(m + 1) * n_dirs];
                let tp = &rows[p * n_dirs..(p + 1) * n_dirs];
                kernel.extend(tm.iter().zip(tp).map(|(a, b)| a.conj() * b));
            }
        }

        Ok(Self {
            frequency,
            n,
            n_dirs,
            ddir: 2.0 * PI / n_dirs as f64,
            csd: sub,
            transfer: rows,
            kernel,
        })
    }

    pub(crate) fn frequency(&self) -> f64 {
        self.frequency
    }

    pub(crate) fn n_channels(&self) -> usize {
        self.n
    }

    pub(crate) fn n_directions(&self) -> usize {
        self.n_dirs
    }

    pub(crate) fn ddir(&self) -> f64 {
        self.ddir
    }

    /// Observed cross-spectrum of valid channels `m` and `p`.
    pub(crate) fn csd(&self, m: usize, p: usize) -> Complex64 {
        self.csd[m * self.n + p]
    }

    /// Kernel `G_mp` over all directions.
    pub(crate) fn kernel(&self, m: usize, p: usize) -> &[Complex64] {
        let start = (m * self.n + p) * self.n_dirs;
        &self.kernel[start..start + self.n_dirs]
    }

    fn transfer(&self, m: usize) -> &[Complex64] {
        &self.transfer[m * self.n_dirs..(m + 1) * self.n_dirs]
    }

    /// Inverse of the observed cross-spectral matrix.
    pub(crate) fn observed_inverse(&self) -> Option<Vec<Complex64>> {
        loaded_inverse(&self.csd, self.n)
    }

    /// Model cross-spectral matrix of the distribution `e`.
    pub(crate) fn model_csd(&self, e: &[f64]) -> Vec<Complex64> {
        (0..self.n * self.n)
            .map(|mp| {
                let g = &self.kernel[mp * self.n_dirs..(mp + 1) * self.n_dirs];
                g.iter().zip(e).map(|(g, &e)| g * e).sum::<Complex64>() * self.ddir
            })
            .collect()
    }

    /// Maximum-likelihood distribution `1 / Re(sum_mp invC_mp conj(G_mp))`,
    /// normalized to unit integral.
    pub(crate) fn mlm(&self, inverse: &[Complex64]) -> Vec<f64> {
        let mut denom = vec![0.0; self.n_dirs];
        for m in 0..self.n {
            for p in 0..self.n {
                let w = inverse[m * self.n + p];
                for (d, g) in denom.iter_mut().zip(self.kernel(m, p)) {
                    *d += (w * g.conj()).re;
                }
            }
        }
        let mut e: Vec<f64> = denom
            .into_iter()
            .map(|d| if d > 0.0 && d.is_finite() { 1.0 / d } else { 0.0 })
            .collect();
        normalize(&mut e, self.ddir);
        e
    }

    /// Energy scale for a distribution `e`: the mean over valid channels of
    /// `C_ii / sum_theta |T_i|^2 e dtheta`.
    pub(crate) fn energy_scale(&self, e: &[f64]) -> f64 {
        let total: f64 = (0..self.n)
            .map(|i| {
                let response: f64 = self
                    .transfer(i)
                    .iter()
                    .zip(e)
                    .map(|(t, &e)| t.norm_sqr() * e)
                    .sum::<f64>()
                    * self.ddir;
                self.csd(i, i).re / response
            })
            .sum();
        total / self.n as f64
    }

    /// Energy scale assuming an isotropic distribution.
    pub(crate) fn isotropic_scale(&self) -> f64 {
        self.energy_scale(&uniform(self.n_dirs))
    }

    /// Scales the unit-integral distribution `e` to a spectral row. NaN and
    /// negative values become zero.
    pub(crate) fn finish(&self, e: &[f64]) -> Vec<f64> {
        let scale = self.energy_scale(e);
        e.iter()
            .map(|&v| {
                let s = scale * v;
                if s.is_nan() || s < 0.0 { 0.0 } else { s }
            })
            .collect()
    }
}

/// Inverts `c` after adding `1e-6` times its mean diagonal to the diagonal.
pub(crate) fn loaded_inverse(c: &[Complex64], n: usize) -> Option<Vec<Complex64>> {
    let mean_auto = (0..n).map(|i| c[i * n + i].re).sum::<f64>() / n as f64;
    let loading = DIAGONAL_LOADING * mean_auto;
    let mut loaded = c.to_vec();
    for i in 0..n {
        loaded[i * n + i] += loading;
    }
    invert(&loaded, n)
}

/// Rescales `e` so that `sum e * ddir == 1`. A distribution without mass
/// becomes isotropic.
pub(crate) fn normalize(e: &mut [f64], ddir: f64) {
    let mass: f64 = e.iter().sum::<f64>() * ddir;
    if mass > 0.0 && mass.is_finite() {
        e.iter_mut().for_each(|v| *v /= mass);
    } else {
        let flat = 1.0 / (ddir * e.len() as f64);
        e.iter_mut().for_each(|v| *v = flat);
    }
}

/// Isotropic unit-integral distribution over `n` directions.
pub(crate) fn uniform(n: usize) -> Vec<f64> {
    vec![1.0 / (2.0 * PI); n]
}
