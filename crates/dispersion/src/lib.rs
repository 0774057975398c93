//! # nereus-dispersion
//!
//! Solves the linear (Airy) wave dispersion relation
//!
//! ```text
//! ω² = g·k·tanh(k·h),   ω = 2πf
//! ```
//!
//! for the wavenumber `k` given a frequency `f` in Hz and a water depth `h`
//! in metres.
//!
//! ## Quick Start
//!
//! ```
//! use nereus_dispersion::solve_wavenumber;
//!
//! let sol = solve_wavenumber(0.125, 10.0);
//! assert!(sol.converged());
//! assert!(sol.k() > 0.0);
//! ```
//!
//! The solver never fails. Non-convergence within the iteration cap is
//! reported through [`WavenumberSolution::converged`] so callers can attach a
//! warning to their own results.

mod solver;

pub use solver::{
    GRAVITY, MAX_ITERATIONS, WavenumberSolution, deep_water_wavenumber, solve_wavenumber,
    solve_wavenumbers,
};
