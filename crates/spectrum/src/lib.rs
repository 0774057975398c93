//! # nereus-spectrum
//!
//! Directional wave spectra on frequency-direction grids: unit conventions,
//! interpolation between grids, smoothing, integral statistics and the
//! DIWASP text format.
//!
//! ## Workflow
//!
//! ```mermaid
//! graph LR
//!     A["native DirectionalSpectrum (Hz, rad)"] -->|"resample(&s, &grid)"| B["Resampled"]
//!     B -->|".spectrum"| C["DirectionalSpectrum (caller units)"]
//!     C -->|"smooth(&s, &kernel)"| C
//!     C -->|"WaveStatistics::from_spectrum"| D["Hsig, Tp, DTp, Dp"]
//!     C -->|"write_spectrum(path, &s)?"| E["DIWASP text file"]
//! ```
//!
//! ## Units
//!
//! | Axis | Options | Density factor from basis |
//! |------|---------|---------------------------|
//! | frequency | [`FrequencyUnit::Hz`], [`FrequencyUnit::RadPerSec`] | `1`, `1/(2π)` |
//! | direction | [`DirectionUnit::Radians`], [`DirectionUnit::Degrees`] | `1`, `π/180` |
//! | convention | [`DirectionConvention::Cartesian`], [`DirectionConvention::Nautical`] | `1` |
//!
//! Cartesian directions are propagation directions counter-clockwise from
//! the array x-axis. Nautical directions are compass bearings the waves come
//! from; the conversion uses the grid's x-axis bearing (default 90, East).
//!
//! ## Quadrature
//!
//! Integrals use midpoint-rule bin widths: linear in frequency, periodic in
//! direction. Coincident wrap points such as -180 and 180 degrees share one
//! width, so a closed direction axis integrates to exactly one turn.

mod error;
mod format;
mod grid;
mod resample;
mod smooth;
mod spectrum;
mod stats;

pub use error::SpectrumError;
pub use format::{read_spectrum, read_spectrum_as, write_spectrum};
pub use grid::{
    DEFAULT_X_AXIS_BEARING, DirectionConvention, DirectionUnit, FrequencyUnit, SpectrumGrid,
    compass_bearing,
};
pub use resample::{GridTooCoarse, HSIG_TOLERANCE, Resampled, resample};
pub use smooth::{SmoothingKernel, smooth};
pub use spectrum::{DirectionalSpectrum, linear_widths, periodic_widths};
pub use stats::WaveStatistics;
