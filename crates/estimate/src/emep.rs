//! Extended maximum entropy principle.
//!
//! The distribution is modelled as
//! `E(theta) = exp(sum_{k<=order} a_k cos(k theta) + b_k sin(k theta))`
//! and fitted to the normalized co- and quadrature spectra of every sensor
//! pair. The order is chosen by AIC.

use std::f64::consts::PI;

use tracing::debug;

use crate::kernel::{BinProblem, normalize, uniform};
use crate::linalg::least_squares;
use crate::warning::EstimationWarning;

/// Largest coefficient update accepted as converged.
const STEP_TOLERANCE: f64 = 0.01;
/// Coefficient growth between iterations treated as divergence.
const DIVERGENCE: f64 = 100.0;
/// Smallest relaxation factor tried before an order is abandoned.
const MIN_RELAXATION: f64 = 0.0625;

/// Observed moments and their direction kernels.
struct Moments {
    phi: Vec<f64>,
    /// `M x D`.
    h: Vec<f64>,
    n_dirs: usize,
}

impl Moments {
    fn from_problem(problem: &BinProblem) -> Self {
        let n = problem.n_channels();
        let n_dirs = problem.n_directions();
        let scale = problem.isotropic_scale();
        let mut phi = Vec::new();
        let mut h = Vec::new();

        for m in 0..n {
            for p in m..n {
                let c = problem.csd(m, p);
                let auto = problem.csd(m, m).re * problem.csd(p, p).re;
                let (co, quad) = (c.re, c.im);
                let sig_co = (0.5 * (auto + co * co - quad * quad)).max(0.0).sqrt();
                let sig_quad = (0.5 * (auto - co * co + quad * quad)).max(0.0).sqrt();
                let g = problem.kernel(m, p);

                let re: Vec<f64> = g.iter().map(|g| g.re).collect();
                if varies(&re) && sig_co > 0.0 {
                    phi.push(co / (sig_co * scale));
                    h.extend(re.iter().map(|v| v / sig_co));
                }
                let im: Vec<f64> = g.iter().map(|g| g.im).collect();
                if varies(&im) && sig_quad > 0.0 {
                    phi.push(quad / (sig_quad * scale));
                    h.extend(im.iter().map(|v| v / sig_quad));
                }
            }
        }
        Self { phi, h, n_dirs }
    }

    fn len(&self) -> usize {
        self.phi.len()
    }

    fn row(&self, i: usize) -> &[f64] {
        &self.h[i * self.n_dirs..(i + 1) * self.n_dirs]
    }
}

/// Returns `true` if `row` carries directional information.
fn varies(row: &[f64]) -> bool {
    let (lo, hi, mag) = row.iter().fold(
        (f64::INFINITY, f64::NEG_INFINITY, 0.0_f64),
        |(lo, hi, mag), &v| (lo.min(v), hi.max(v), mag.max(v.abs())),
    );
    hi - lo > 1e-9 * mag
}

/// Fourier coefficients of the log-distribution.
#[derive(Clone, Debug, PartialEq)]
struct Coefficients {
    a: Vec<f64>,
    b: Vec<f64>,
}

impl Coefficients {
    fn zeros(order: usize) -> Self {
        Self {
            a: vec![0.0; order],
            b: vec![0.0; order],
        }
    }

    /// Unit-integral distribution over `directions`.
    fn distribution(&self, directions: &[f64], ddir: f64) -> Vec<f64> {
        let log: Vec<f64> = directions
            .iter()
            .map(|&theta| {
                self.a
                    .iter()
                    .zip(&self.b)
                    .enumerate()
                    .map(|(k, (a, b))| {
                        let kt = (k + 1) as f64 * theta;
                        a * kt.cos() + b * kt.sin()
                    })
                    .sum::<f64>()
            })
            .collect();
        let top = log.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let mut e: Vec<f64> = log.iter().map(|l| (l - top).exp()).collect();
        normalize(&mut e, ddir);
        e
    }
}

/// Converged fit of one model order.
struct OrderFit {
    coefficients: Coefficients,
    aic: f64,
}

/// Estimates the unit-integral directional distribution of one bin.
///
/// Returns the distribution of the AIC-selected order and, if an order's fit
/// diverged even at the smallest relaxation, a warning naming that order.
pub(crate) fn emep(
    problem: &BinProblem,
    iterations: usize,
) -> (Vec<f64>, Option<EstimationWarning>) {
    let n_dirs = problem.n_directions();
    let ddir = problem.ddir();
    let directions: Vec<f64> = (0..n_dirs)
        .map(|j| -PI + 2.0 * PI * j as f64 / n_dirs as f64)
        .collect();
    let moments = Moments::from_problem(problem);
    if moments.phi.is_empty() {
        debug!(
            frequency = problem.frequency(),
            "no directional moments, isotropic estimate"
        );
        return (uniform(n_dirs), None);
    }

    let max_order = moments.len() / 2 + 1;
    let trig = Trig::new(&directions, max_order);
    let mut best: Option<Coefficients> = None;
    let mut last_aic: Option<f64> = None;
    let mut warning = None;

    for order in 1..=max_order {
        let Some(fit) = fit_order(&moments, &trig, order, iterations) else {
            warning = Some(EstimationWarning::EntropyFitAbandoned {
                frequency: problem.frequency(),
                order,
            });
            break;
        };
        if let Some(prev) = last_aic
            && (fit.aic > prev || fit.aic.is_nan())
        {
            break;
        }
        last_aic = Some(fit.aic);
        best = Some(fit.coefficients);
    }
    debug!(
        frequency = problem.frequency(),
        order = best.as_ref().map_or(0, |c| c.a.len()),
        "entropy model selected"
    );

    let e = match best {
        Some(c) => c.distribution(&directions, ddir),
        None => uniform(n_dirs),
    };
    (e, warning)
}

/// `cos(k theta)` and `sin(k theta)` for `k = 1..=max_order`.
struct Trig {
    cos: Vec<Vec<f64>>,
    sin: Vec<Vec<f64>>,
}

impl Trig {
    fn new(directions: &[f64], max_order: usize) -> Self {
        let table = |f: fn(f64) -> f64| -> Vec<Vec<f64>> {
            (1..=max_order)
                .map(|k| directions.iter().map(|&t| f(k as f64 * t)).collect())
                .collect()
        };
        Self {
            cos: table(f64::cos),
            sin: table(f64::sin),
        }
    }
}

/// Fits a model of `order` by relaxed Gauss-Newton iteration.
///
/// Returns `None` if the iteration diverges at every relaxation factor down
/// to 1/16.
fn fit_order(
    moments: &Moments,
    trig: &Trig,
    order: usize,
    iterations: usize,
) -> Option<OrderFit> {
    let m = moments.len();
    let n_dirs = moments.n_dirs;
    let cols = 2 * order;

    let mut coeffs = Coefficients::zeros(order);
    let mut step = vec![DIVERGENCE; cols];
    let mut relax = 1.0;
    let mut count = 0;
    let mut z = vec![0.0; m];
    let mut design = vec![0.0; m * cols];

    while step.iter().any(|s| s.abs() > STEP_TOLERANCE) {
        count += 1;
        let log: Vec<f64> = (0..n_dirs)
            .map(|d| {
                (0..order)
                    .map(|k| coeffs.a[k] * trig.cos[k][d] + coeffs.b[k] * trig.sin[k][d])
                    .sum::<f64>()
            })
            .collect();
        let top = log.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let w: Vec<f64> = log.iter().map(|l| (l - top).exp()).collect();
        let sum_w: f64 = w.iter().sum();
        let mean_w = |table: &[f64]| -> f64 {
            w.iter().zip(table).map(|(w, t)| w * t).sum::<f64>() / sum_w
        };
        let w_cos: Vec<f64> = trig.cos[..order].iter().map(|c| mean_w(c.as_slice())).collect();
        let w_sin: Vec<f64> = trig.sin[..order].iter().map(|s| mean_w(s.as_slice())).collect();

        for i in 0..m {
            let r: Vec<f64> = moments
                .row(i)
                .iter()
                .zip(&w)
                .map(|(h, w)| (moments.phi[i] - h) * w)
                .collect();
            let sum_r: f64 = r.iter().sum();
            z[i] = sum_r / sum_w;
            let mean_r = |table: &[f64]| -> f64 {
                r.iter().zip(table).map(|(r, t)| r * t).sum::<f64>() / sum_r
            };
            for k in 0..order {
                design[i * cols + k] = z[i] * (w_cos[k] - mean_r(trig.cos[k].as_slice()));
                design[i * cols + order + k] = z[i] * (w_sin[k] - mean_r(trig.sin[k].as_slice()));
            }
        }

        let next = least_squares(&design, &z, m, cols).unwrap_or_else(|| vec![0.0; cols]);
        let diverged = next
            .iter()
            .zip(&step)
            .any(|(new, old)| new.abs() - old.abs() > DIVERGENCE)
            || count > iterations;
        step = next;

        if diverged {
            if relax <= MIN_RELAXATION {
                return None;
            }
            relax *= 0.5;
            count = 0;
            coeffs = Coefficients::zeros(order);
            step = vec![DIVERGENCE; cols];
            debug!(order, relax, "entropy fit diverging, relaxing");
        } else {
            for k in 0..order {
                coeffs.a[k] += relax * step[k];
                coeffs.b[k] += relax * step[order + k];
            }
        }
    }

    let residual: Vec<f64> = (0..m)
        .map(|i| {
            let fitted: f64 = (0..cols).map(|c| design[i * cols + c] * step[c]).sum();
            z[i] - fitted
        })
        .collect();
    let mean = residual.iter().sum::<f64>() / m as f64;
    let var = residual.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / m as f64;
    let aic = m as f64 * ((2.0 * PI * var).ln() + 1.0) + 4.0 * order as f64 + 2.0;

    Some(OrderFit {
        coefficients: coeffs,
        aic,
    })
}
