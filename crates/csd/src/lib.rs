//! # nereus-csd
//!
//! Cross-spectral density matrices of multi-channel records by Welch's
//! method of averaged, tapered periodograms.
//!
//! ## Pipeline
//!
//! ```mermaid
//! graph LR
//!     A["TimeSeriesBlock"] -->|"detrend"| B["segments"]
//!     B -->|"window + FFT"| C["X_i(f)"]
//!     C -->|"average X_i conj(X_j)"| D["CrossSpectra"]
//! ```
//!
//! ## Windows
//!
//! | Window | Coefficient `w[n]`, `n = 0..L` |
//! |--------|-------------------------------|
//! | [`Window::Hamming`] (default) | `0.54 - 0.46 cos(2πn/L)` |
//! | [`Window::Hann`] | `0.5 - 0.5 cos(2πn/L)` |
//! | [`Window::Rectangular`] | `1` |
//!
//! ## Scaling
//!
//! Spectra are one-sided densities in units²/Hz: the sum of an
//! auto-spectrum over all bins times the bin width recovers the variance of
//! the detrended channel.
//!
//! ## Quick Start
//!
//! ```
//! use nereus_array::TimeSeriesBlock;
//! use nereus_csd::{CsdConfig, cross_spectra};
//!
//! let t: Vec<f64> = (0..1024).map(|n| (0.2 * n as f64).sin()).collect();
//! let block = TimeSeriesBlock::new(vec![t.clone(), t]).unwrap();
//! let csd = cross_spectra(&block, 1.0, &CsdConfig::new(128)).unwrap();
//! assert_eq!(csd.n_bins(), 65);
//! ```

mod detrend;
mod error;
mod welch;
mod window;

pub use detrend::detrend_linear;
pub use error::CsdError;
pub use welch::{CrossSpectra, CsdConfig, cross_spectra};
pub use window::Window;
