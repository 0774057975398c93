//! # nereus-estimate
//!
//! Directional wave spectra from instrument arrays: cross-spectra,
//! transfer functions and a per-frequency directional estimator, wired
//! into a single [`dirspec`] call.
//!
//! ## Pipeline
//!
//! ```mermaid
//! graph LR
//!     A["EstimationConfig"] -->|"resolve(fs)"| B["EffectiveConfig"]
//!     C["TimeSeriesBlock"] -->|"cross_spectra"| D["CrossSpectra"]
//!     D --> E["per-bin IMLM / EMEP (rayon)"]
//!     F["TransferMatrix"] --> E
//!     E --> G["native spectrum"]
//!     G -->|"resample + smooth"| H["DirspecOutput"]
//! ```
//!
//! ## Methods
//!
//! | Method | Distribution | Iterations |
//! |--------|--------------|------------|
//! | [`Method::Imlm`] | maximum likelihood, refined against its own model cross-spectra | exactly `iterations` |
//! | [`Method::Emep`] | `exp` of a Fourier series, order chosen by AIC | cap per relaxation step |
//!
//! Both methods produce a distribution with unit directional integral that
//! is scaled so its integral matches the measured auto-spectra after
//! transfer correction. Frequencies with fewer than three usable channels
//! fail with [`EstimateError::UnderdeterminedEstimation`].
//!
//! ## Warnings
//!
//! Conditions that do not stop the estimate are returned in
//! [`DirspecOutput::warnings`] as [`EstimationWarning`] values and logged
//! with `tracing::warn!`.

mod config;
mod dirspec;
mod emep;
mod error;
mod imlm;
mod kernel;
mod linalg;
mod warning;

pub use config::{EffectiveConfig, EstimationConfig, MIN_FFT_LENGTH, MIN_RESOLUTION, Method};
pub use dirspec::{DirspecOutput, dirspec};
pub use error::{DirspecError, EstimateError};
pub use kernel::MIN_VALID_CHANNELS;
pub use warning::EstimationWarning;
