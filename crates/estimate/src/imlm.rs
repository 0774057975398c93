//! Iterated maximum likelihood method.

use tracing::debug;

use crate::kernel::{BinProblem, loaded_inverse, normalize, uniform};

/// Step size of each correction.
const GAMMA: f64 = 0.1;
/// Weight of the change in the model estimate between iterations.
const ALPHA: f64 = 0.1;

/// Estimates the unit-integral directional distribution of one bin.
///
/// Starts from the maximum-likelihood estimate `E0` of the observed
/// cross-spectra and runs exactly `iterations` corrections: the MLM
/// estimate `T` of the model cross-spectra of `E` is compared with `E0` and
///
/// ```text
/// E += gamma ((E0 - T) + alpha (T - T_prev))
/// ```
///
/// after which negative densities are clamped to zero and `E` is
/// renormalized. An iteration whose model matrix cannot be inverted leaves
/// `E` unchanged.
pub(crate) fn imlm(problem: &BinProblem, iterations: usize) -> Vec<f64> {
    let n = problem.n_channels();
    let ddir = problem.ddir();
    let Some(observed) = problem.observed_inverse() else {
        debug!(
            frequency = problem.frequency(),
            "singular cross-spectral matrix, isotropic estimate"
        );
        return uniform(problem.n_directions());
    };

    let e0 = problem.mlm(&observed);
    let mut e = e0.clone();
    let mut t = e0.clone();
    for it in 0..iterations {
        let model = problem.model_csd(&e);
        let Some(inverse) = loaded_inverse(&model, n) else {
            debug!(
                frequency = problem.frequency(),
                iteration = it,
                "singular model matrix, correction skipped"
            );
            continue;
        };
        let t_prev = std::mem::replace(&mut t, problem.mlm(&inverse));
        for (j, ej) in e.iter_mut().enumerate() {
            let step = (e0[j] - t[j]) + ALPHA * (t[j] - t_prev[j]);
            *ej = (*ej + GAMMA * step).max(0.0);
        }
        normalize(&mut e, ddir);
    }
    e
}
