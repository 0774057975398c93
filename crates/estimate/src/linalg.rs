//! Small dense linear algebra for per-frequency sub-problems.
//!
//! Matrices are row-major `Vec`s. Sizes are the number of valid channels
//! (inverse) or moments (least squares), so plain Gauss-Jordan elimination
//! is sufficient.

use num_complex::Complex64;

/// Inverts the `n x n` complex matrix `a` by Gauss-Jordan elimination with
/// partial pivoting.
///
/// Returns `None` if a pivot vanishes or the result is not finite.
pub(crate) fn invert(a: &[Complex64], n: usize) -> Option<Vec<Complex64>> {
    debug_assert_eq!(a.len(), n * n);
    let mut m = a.to_vec();
    let mut inv = vec![Complex64::new(0.0, 0.0); n * n];
    for i in 0..n {
        inv[i * n + i] = Complex64::new(1.0, 0.0);
    }

    for col in 0..n {
        let pivot = (col..n)
            .max_by(|&r, &s| m[r * n + col].norm().total_cmp(&m[s * n + col].norm()))?;
        let p = m[pivot * n + col];
        if p.norm() == 0.0 || !p.is_finite() {
            return None;
        }
        if pivot != col {
            for c in 0..n {
                m.swap(pivot * n + c, col * n + c);
                inv.swap(pivot * n + c, col * n + c);
            }
        }
        let scale = p.inv();
        for c in 0..n {
            m[col * n + c] *= scale;
            inv[col * n + c] *= scale;
        }
        for r in 0..n {
            if r == col {
                continue;
            }
            let factor = m[r * n + col];
            if factor == Complex64::new(0.0, 0.0) {
                continue;
            }
            for c in 0..n {
                let mc = m[col * n + c];
                let ic = inv[col * n + c];
                m[r * n + c] -= factor * mc;
                inv[r * n + c] -= factor * ic;
            }
        }
    }
    inv.iter().all(|v| v.is_finite()).then_some(inv)
}

/// Solves `a x = b` in the least-squares sense for the `rows x cols` real
/// matrix `a`.
///
/// Uses the normal equations with a ridge of `1e-10` times their mean
/// diagonal, which also gives a small-norm answer when `rows < cols`.
/// Returns `None` if the inputs are not finite or the system is singular.
pub(crate) fn least_squares(
    a: &[f64],
    b: &[f64],
    rows: usize,
    cols: usize,
) -> Option<Vec<f64>> {
    debug_assert_eq!(a.len(), rows * cols);
    debug_assert_eq!(b.len(), rows);
    if a.iter().chain(b).any(|v| !v.is_finite()) {
        return None;
    }

    // Augmented [A^T A | A^T b].
    let w = cols + 1;
    let mut m = vec![0.0; cols * w];
    for i in 0..cols {
        for j in 0..cols {
            m[i * w + j] = (0..rows).map(|r| a[r * cols + i] * a[r * cols + j]).sum();
        }
        m[i * w + cols] = (0..rows).map(|r| a[r * cols + i] * b[r]).sum();
    }
    let trace: f64 = (0..cols).map(|i| m[i * w + i]).sum();
    let ridge = 1e-10 * trace / cols as f64;
    if ridge == 0.0 {
        return None;
    }
    for i in 0..cols {
        m[i * w + i] += ridge;
    }

    for col in 0..cols {
        let pivot = (col..cols)
            .max_by(|&r, &s| m[r * w + col].abs().total_cmp(&m[s * w + col].abs()))?;
        if m[pivot * w + col] == 0.0 {
            return None;
        }
        if pivot != col {
            for c in 0..w {
                m.swap(pivot * w + c, col * w + c);
            }
        }
        for r in col + 1..cols {
            let factor = m[r * w + col] / m[col * w + col];
            for c in col..w {
                m[r * w + c] -= factor * m[col * w + c];
            }
        }
    }

    let mut x = vec![0.0; cols];
    for i in (0..cols).rev() {
        let tail: f64 = (i + 1..cols).map(|j| m[i * w + j] * x[j]).sum();
        x[i] = (m[i * w + cols] - tail) / m[i * w + i];
    }
    x.iter().all(|v| v.is_finite()).then_some(x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn c(re: f64, im: f64) -> Complex64 {
        Complex64::new(re, im)
    }

    #[test]
    fn inverse_of_hermitian_matrix() {
        let a = vec![
            c(4.0, 0.0),
            c(1.0, 2.0),
            c(0.0, -1.0),
            c(1.0, -2.0),
            c(6.0, 0.0),
            c(0.5, 0.5),
            c(0.0, 1.0),
            c(0.5, -0.5),
            c(3.0, 0.0),
        ];
        let inv = invert(&a, 3).unwrap();
        for i in 0..3 {
            for j in 0..3 {
                let p: Complex64 = (0..3).map(|k| a[i * 3 + k] * inv[k * 3 + j]).sum();
                let expected = if i == j { 1.0 } else { 0.0 };
                assert_relative_eq!(p.re, expected, epsilon = 1e-12);
                assert_relative_eq!(p.im, 0.0, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn inverse_needs_pivoting() {
        let a = vec![c(0.0, 0.0), c(1.0, 0.0), c(1.0, 0.0), c(0.0, 0.0)];
        let inv = invert(&a, 2).unwrap();
        assert_eq!(inv, a);
    }

    #[test]
    fn singular_matrix_has_no_inverse() {
        let a = vec![c(1.0, 1.0), c(2.0, 2.0), c(1.0, 1.0), c(2.0, 2.0)];
        assert!(invert(&a, 2).is_none());
    }

    #[test]
    fn least_squares_exact_system() {
        // x + y = 3, x - y = 1
        let x = least_squares(&[1.0, 1.0, 1.0, -1.0], &[3.0, 1.0], 2, 2).unwrap();
        assert_relative_eq!(x[0], 2.0, epsilon = 1e-8);
        assert_relative_eq!(x[1], 1.0, epsilon = 1e-8);
    }

    #[test]
    fn least_squares_overdetermined_line_fit() {
        // y = 2t + 1 sampled at t = 0..4 with symmetric noise.
        let t = [0.0, 1.0, 2.0, 3.0, 4.0];
        let y = [1.1, 2.9, 5.0, 7.1, 8.9];
        let a: Vec<f64> = t.iter().flat_map(|&t| [t, 1.0]).collect();
        let x = least_squares(&a, &y, 5, 2).unwrap();
        assert_relative_eq!(x[0], 1.98, epsilon = 1e-7);
        assert_relative_eq!(x[1], 1.04, epsilon = 1e-7);
    }

    #[test]
    fn least_squares_rejects_nan() {
        assert!(least_squares(&[f64::NAN], &[1.0], 1, 1).is_none());
        assert!(least_squares(&[0.0], &[1.0], 1, 1).is_none());
    }
}
