//! Newton-Raphson solution of the dispersion relation.

use std::f64::consts::PI;

/// Gravitational acceleration (m/s²).
pub const GRAVITY: f64 = 9.81;

/// Iteration cap for the Newton-Raphson solve.
pub const MAX_ITERATIONS: usize = 100;

/// Relative step size at which the iteration is considered converged.
const REL_TOL: f64 = 1e-12;

/// Result of a single wavenumber solve.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WavenumberSolution {
    k: f64,
    iterations: usize,
    converged: bool,
}

impl WavenumberSolution {
    /// Returns the wavenumber (rad/m).
    pub fn k(&self) -> f64 {
        self.k
    }

    /// Returns the number of Newton iterations performed.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Returns `false` if the iteration cap was hit or the inputs were not
    /// physical. The wavenumber is still the best available estimate.
    pub fn converged(&self) -> bool {
        self.converged
    }
}

/// Deep-water wavenumber `ω²/g` for a frequency in Hz.
pub fn deep_water_wavenumber(frequency: f64) -> f64 {
    let omega = 2.0 * PI * frequency;
    omega * omega / GRAVITY
}

/// Solves `ω² = g·k·tanh(k·h)` for `k`.
///
/// `frequency` is in Hz and `depth` in metres. The iteration is seeded from
/// the deep-water approximation and stops when the relative Newton step drops
/// below `1e-12` or after [`MAX_ITERATIONS`] steps, in which case the last
/// iterate is returned with `converged = false`.
///
/// A zero frequency yields `k = 0`. Negative or non-finite frequencies and
/// non-positive depths yield `k = NaN` with `converged = false`.
///
/// # Example
///
/// ```
/// use nereus_dispersion::{GRAVITY, solve_wavenumber};
///
/// let sol = solve_wavenumber(0.1, 20.0);
/// let omega = 2.0 * std::f64::consts::PI * 0.1;
/// let residual = omega * omega - GRAVITY * sol.k() * (sol.k() * 20.0).tanh();
/// assert!(residual.abs() < 1e-9);
/// ```
pub fn solve_wavenumber(frequency: f64, depth: f64) -> WavenumberSolution {
    if !frequency.is_finite() || frequency < 0.0 || !depth.is_finite() || depth <= 0.0 {
        return WavenumberSolution {
            k: f64::NAN,
            iterations: 0,
            converged: false,
        };
    }
    if frequency == 0.0 {
        return WavenumberSolution {
            k: 0.0,
            iterations: 0,
            converged: true,
        };
    }

    let omega = 2.0 * PI * frequency;
    let omega2 = omega * omega;
    let mut k = omega2 / GRAVITY;

    for iter in 1..=MAX_ITERATIONS {
        let kh = k * depth;
        let th = kh.tanh();
        // sech² underflows to zero for large kh, which is the deep-water limit.
        let sech2 = 1.0 / kh.cosh().powi(2);
        let f = GRAVITY * k * th - omega2;
        let df = GRAVITY * (th + kh * sech2);
        let step = f / df;
        k -= step;

        if step.abs() <= REL_TOL * k.abs() {
            return WavenumberSolution {
                k,
                iterations: iter,
                converged: true,
            };
        }
    }

    WavenumberSolution {
        k,
        iterations: MAX_ITERATIONS,
        converged: false,
    }
}

/// Element-wise [`solve_wavenumber`] over a slice of frequencies.
pub fn solve_wavenumbers(frequencies: &[f64], depth: f64) -> Vec<WavenumberSolution> {
    frequencies
        .iter()
        .map(|&f| solve_wavenumber(f, depth))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn residual(f: f64, h: f64, k: f64) -> f64 {
        let omega = 2.0 * PI * f;
        omega * omega - GRAVITY * k * (k * h).tanh()
    }

    #[test]
    fn zero_frequency_is_zero() {
        let sol = solve_wavenumber(0.0, 10.0);
        assert_eq!(sol.k(), 0.0);
        assert!(sol.converged());
        assert_eq!(sol.iterations(), 0);
    }

    #[test]
    fn satisfies_relation_over_range() {
        for &h in &[0.5, 2.0, 10.0, 50.0, 500.0] {
            for i in 1..=60 {
                let f = i as f64 * 0.01;
                let sol = solve_wavenumber(f, h);
                assert!(sol.converged(), "f={f}, h={h}");
                assert!(residual(f, h, sol.k()).abs() < 1e-6, "f={f}, h={h}");
            }
        }
    }

    #[test]
    fn deep_water_limit() {
        // 0.5 Hz in 100 m: kh far above 3.
        let sol = solve_wavenumber(0.5, 100.0);
        assert!(sol.k() * 100.0 > 3.0);
        assert_relative_eq!(sol.k(), deep_water_wavenumber(0.5), max_relative = 0.01);
    }

    #[test]
    fn shallow_water_limit() {
        // kh << 1: k ≈ ω / sqrt(g h).
        let f = 0.02;
        let h = 1.0;
        let sol = solve_wavenumber(f, h);
        let expected = 2.0 * PI * f / (GRAVITY * h).sqrt();
        assert_relative_eq!(sol.k(), expected, max_relative = 0.01);
    }

    #[test]
    fn non_physical_inputs() {
        assert!(solve_wavenumber(0.1, 0.0).k().is_nan());
        assert!(solve_wavenumber(0.1, -3.0).k().is_nan());
        assert!(solve_wavenumber(-0.1, 10.0).k().is_nan());
        assert!(!solve_wavenumber(f64::NAN, 10.0).converged());
    }

    #[test]
    fn vectorized_matches_scalar() {
        let freqs = [0.0, 0.05, 0.1, 0.2];
        let sols = solve_wavenumbers(&freqs, 8.0);
        assert_eq!(sols.len(), 4);
        for (f, sol) in freqs.iter().zip(&sols) {
            assert_eq!(*sol, solve_wavenumber(*f, 8.0));
        }
    }

    #[test]
    fn monotone_in_frequency() {
        let sols = solve_wavenumbers(&[0.05, 0.1, 0.15, 0.2, 0.3], 12.0);
        for w in sols.windows(2) {
            assert!(w[1].k() > w[0].k());
        }
    }
}
