//! Estimation parameters and their resolution into an effective set.

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use nereus_csd::{CsdConfig, Window};

use crate::error::EstimateError;
use crate::warning::EstimationWarning;

/// Smallest FFT segment length used for the cross-spectra.
pub const MIN_FFT_LENGTH: usize = 64;

/// Smallest number of native directions.
pub const MIN_RESOLUTION: usize = 10;

/// Directional estimation method.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Method {
    /// Iterated maximum likelihood.
    #[default]
    Imlm,
    /// Extended maximum entropy.
    Emep,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Imlm => "IMLM",
            Self::Emep => "EMEP",
        })
    }
}

impl FromStr for Method {
    type Err = EstimateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "imlm" => Ok(Self::Imlm),
            "emep" => Ok(Self::Emep),
            _ => Err(EstimateError::InvalidConfig {
                reason: format!("unknown method '{s}' (expected IMLM or EMEP)"),
            }),
        }
    }
}

/// Estimation parameters as requested by the caller.
///
/// Unset or out-of-range values are filled in by
/// [`EstimationConfig::resolve`], which reports every adjustment.
///
/// # Example
///
/// ```
/// use nereus_estimate::{EstimationConfig, Method};
///
/// let config = EstimationConfig::new()
///     .with_method(Method::Emep)
///     .with_fft_length(256)
///     .with_smoothing(false);
/// let (effective, warnings) = config.resolve(2.0).unwrap();
/// assert_eq!(effective.fft_length(), 256);
/// assert_eq!(effective.resolution(), 180);
/// assert!(warnings.is_empty());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct EstimationConfig {
    method: Method,
    fft_length: Option<usize>,
    iterations: usize,
    resolution: usize,
    smoothing: bool,
    window: Window,
    overlap: f64,
}

impl EstimationConfig {
    /// Creates a configuration with default values.
    ///
    /// | Parameter | Default |
    /// |-----------|---------|
    /// | method | IMLM |
    /// | fft_length | `2^(8 + round(log2 fs))` |
    /// | iterations | 100 |
    /// | resolution | 180 directions |
    /// | smoothing | on |
    /// | window | Hamming |
    /// | overlap | 0.5 |
    pub fn new() -> Self {
        Self {
            method: Method::Imlm,
            fft_length: None,
            iterations: 100,
            resolution: 180,
            smoothing: true,
            window: Window::Hamming,
            overlap: 0.5,
        }
    }

    /// Sets the estimation method.
    pub fn with_method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Sets the FFT segment length.
    pub fn with_fft_length(mut self, fft_length: usize) -> Self {
        self.fft_length = Some(fft_length);
        self
    }

    /// Sets the iteration count (IMLM) or iteration cap (EMEP).
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Sets the number of native directions.
    pub fn with_resolution(mut self, resolution: usize) -> Self {
        self.resolution = resolution;
        self
    }

    /// Enables or disables smoothing of the output spectrum.
    pub fn with_smoothing(mut self, smoothing: bool) -> Self {
        self.smoothing = smoothing;
        self
    }

    /// Sets the cross-spectral window.
    pub fn with_window(mut self, window: Window) -> Self {
        self.window = window;
        self
    }

    /// Sets the cross-spectral segment overlap.
    pub fn with_overlap(mut self, overlap: f64) -> Self {
        self.overlap = overlap;
        self
    }

    /// Returns the estimation method.
    pub fn method(&self) -> Method {
        self.method
    }

    /// Returns the requested FFT length, if any.
    pub fn fft_length(&self) -> Option<usize> {
        self.fft_length
    }

    /// Returns the iteration count.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Returns the requested number of native directions.
    pub fn resolution(&self) -> usize {
        self.resolution
    }

    /// Returns whether smoothing is enabled.
    pub fn smoothing(&self) -> bool {
        self.smoothing
    }

    /// Returns the cross-spectral window.
    pub fn window(&self) -> Window {
        self.window
    }

    /// Returns the cross-spectral segment overlap.
    pub fn overlap(&self) -> f64 {
        self.overlap
    }

    /// Validates the parameters that cannot be repaired by clamping.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`EstimateError::InvalidConfig`] | `iterations == 0`, overlap outside `[0, 1)`, or a requested FFT length that is not a power of two |
    pub fn validate(&self) -> Result<(), EstimateError> {
        if self.iterations == 0 {
            return Err(EstimateError::InvalidConfig {
                reason: "iterations must be at least 1".into(),
            });
        }
        if !(0.0..1.0).contains(&self.overlap) {
            return Err(EstimateError::InvalidConfig {
                reason: format!("overlap must be in [0, 1), got {}", self.overlap),
            });
        }
        if let Some(n) = self.fft_length
            && !n.is_power_of_two()
        {
            return Err(EstimateError::InvalidConfig {
                reason: format!("fft_length must be a power of two, got {n}"),
            });
        }
        Ok(())
    }

    /// Fills in defaults and clamps parameters for a record sampled at
    /// `sample_rate` Hz.
    ///
    /// Pure: the same inputs always give the same output. Every clamped value
    /// is reported as [`EstimationWarning::ParameterClamped`].
    ///
    /// # Errors
    ///
    /// Returns [`EstimateError::InvalidConfig`] if [`Self::validate`] fails
    /// or `sample_rate` is not a positive finite number.
    pub fn resolve(
        &self,
        sample_rate: f64,
    ) -> Result<(EffectiveConfig, Vec<EstimationWarning>), EstimateError> {
        self.validate()?;
        if !sample_rate.is_finite() || sample_rate <= 0.0 {
            return Err(EstimateError::InvalidConfig {
                reason: format!("sample rate must be positive, got {sample_rate}"),
            });
        }

        let mut warnings = Vec::new();
        let requested_nfft = self
            .fft_length
            .unwrap_or_else(|| default_fft_length(sample_rate));
        let fft_length =
            clamp_up("fft_length", requested_nfft, MIN_FFT_LENGTH, &mut warnings);
        let resolution =
            clamp_up("resolution", self.resolution, MIN_RESOLUTION, &mut warnings);

        let effective = EffectiveConfig {
            method: self.method,
            fft_length,
            iterations: self.iterations,
            resolution,
            smoothing: self.smoothing,
            window: self.window,
            overlap: self.overlap,
        };
        Ok((effective, warnings))
    }
}

impl Default for EstimationConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Fully populated parameters actually used for an estimate.
#[derive(Clone, Debug, PartialEq)]
pub struct EffectiveConfig {
    method: Method,
    fft_length: usize,
    iterations: usize,
    resolution: usize,
    smoothing: bool,
    window: Window,
    overlap: f64,
}

impl EffectiveConfig {
    /// Returns the estimation method.
    pub fn method(&self) -> Method {
        self.method
    }

    /// Returns the FFT segment length.
    pub fn fft_length(&self) -> usize {
        self.fft_length
    }

    /// Returns the iteration count.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Returns the number of native directions.
    pub fn resolution(&self) -> usize {
        self.resolution
    }

    /// Returns whether smoothing is applied.
    pub fn smoothing(&self) -> bool {
        self.smoothing
    }

    /// Returns the cross-spectral window.
    pub fn window(&self) -> Window {
        self.window
    }

    /// Returns the cross-spectral segment overlap.
    pub fn overlap(&self) -> f64 {
        self.overlap
    }

    /// Cross-spectral configuration derived from these parameters.
    pub fn csd_config(&self) -> CsdConfig {
        CsdConfig::new(self.fft_length)
            .with_window(self.window)
            .with_overlap(self.overlap)
    }

    /// Native directions `-pi + 2 pi j / D`, radians.
    pub fn native_directions(&self) -> Vec<f64> {
        let d = self.resolution as f64;
        (0..self.resolution)
            .map(|j| -PI + 2.0 * PI * j as f64 / d)
            .collect()
    }
}

/// `2^(8 + round(log2 fs))`.
fn default_fft_length(sample_rate: f64) -> usize {
    let exponent = (8.0 + sample_rate.log2().round()).clamp(0.0, 40.0);
    1usize << (exponent as u32)
}

fn clamp_up(
    parameter: &'static str,
    requested: usize,
    min: usize,
    warnings: &mut Vec<EstimationWarning>,
) -> usize {
    if requested >= min {
        return requested;
    }
    warnings.push(EstimationWarning::ParameterClamped {
        parameter,
        requested,
        used: min,
    });
    min
}
