//! Welch-averaged cross-spectral density matrices.

use num_complex::Complex64;
use rustfft::FftPlanner;
use tracing::debug;

use nereus_array::TimeSeriesBlock;

use crate::detrend::detrend_linear;
use crate::error::CsdError;
use crate::window::Window;

/// Configuration for [`cross_spectra`].
///
/// # Example
///
/// ```
/// use nereus_csd::{CsdConfig, Window};
///
/// let config = CsdConfig::new(256)
///     .with_window(Window::Hann)
///     .with_overlap(0.0);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct CsdConfig {
    nfft: usize,
    window: Window,
    overlap: f64,
}

impl CsdConfig {
    /// Creates a configuration with segment length `nfft`.
    ///
    /// Defaults: Hamming window, 50 % overlap.
    pub fn new(nfft: usize) -> Self {
        Self {
            nfft,
            window: Window::Hamming,
            overlap: 0.5,
        }
    }

    /// Sets the segment taper.
    pub fn with_window(mut self, window: Window) -> Self {
        self.window = window;
        self
    }

    /// Sets the fractional overlap between consecutive segments.
    pub fn with_overlap(mut self, overlap: f64) -> Self {
        self.overlap = overlap;
        self
    }

    /// Returns the segment (FFT) length.
    pub fn nfft(&self) -> usize {
        self.nfft
    }

    /// Returns the segment taper.
    pub fn window(&self) -> Window {
        self.window
    }

    /// Returns the overlap fraction.
    pub fn overlap(&self) -> f64 {
        self.overlap
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`CsdError::InvalidFftLength`] | `nfft < 2` or not a power of two |
    /// | [`CsdError::InvalidOverlap`] | overlap outside `[0, 1)` or NaN |
    pub fn validate(&self) -> Result<(), CsdError> {
        if self.nfft < 2 || !self.nfft.is_power_of_two() {
            return Err(CsdError::InvalidFftLength(self.nfft));
        }
        if !(0.0..1.0).contains(&self.overlap) {
            return Err(CsdError::InvalidOverlap(self.overlap));
        }
        Ok(())
    }

    /// Distance in samples between consecutive segment starts.
    fn step(&self) -> usize {
        ((self.nfft as f64 * (1.0 - self.overlap)).round() as usize).max(1)
    }
}

impl Default for CsdConfig {
    fn default() -> Self {
        Self::new(256)
    }
}

/// Cross-spectral density matrices for every one-sided frequency bin.
///
/// `get(bin, i, j)` is the averaged `X_i conj(X_j)` density, so each matrix
/// is Hermitian with a real, non-negative diagonal.
#[derive(Clone, Debug)]
pub struct CrossSpectra {
    frequencies: Vec<f64>,
    data: Vec<Complex64>,
    n_channels: usize,
    n_segments: usize,
}

impl CrossSpectra {
    /// Returns the bin frequencies (Hz), `k fs / L` for `k = 0..=L/2`.
    pub fn frequencies(&self) -> &[f64] {
        &self.frequencies
    }

    /// Returns the number of frequency bins.
    pub fn n_bins(&self) -> usize {
        self.frequencies.len()
    }

    /// Returns the number of channels.
    pub fn n_channels(&self) -> usize {
        self.n_channels
    }

    /// Returns the number of averaged segments.
    pub fn n_segments(&self) -> usize {
        self.n_segments
    }

    /// Returns the bin spacing (Hz).
    pub fn resolution(&self) -> f64 {
        self.frequencies.get(1).copied().unwrap_or(0.0)
    }

    /// Returns the cross-spectrum of channels `i` and `j` at `bin`.
    pub fn get(&self, bin: usize, i: usize, j: usize) -> Complex64 {
        self.data[(bin * self.n_channels + i) * self.n_channels + j]
    }

    /// Returns the auto-spectrum of channel `i` at `bin`.
    pub fn auto(&self, bin: usize, i: usize) -> f64 {
        self.get(bin, i, i).re
    }

    /// Returns the row-major `N x N` matrix at `bin`.
    pub fn matrix(&self, bin: usize) -> &[Complex64] {
        let n2 = self.n_channels * self.n_channels;
        &self.data[bin * n2..(bin + 1) * n2]
    }
}

/// Estimates cross-spectral density matrices of all channel pairs.
///
/// Each channel is linearly detrended over the full record, split into
/// segments of `config.nfft()` samples with the configured overlap, tapered
/// and transformed. Outer products are averaged over segments and scaled to
/// a one-sided density.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`CsdError::InvalidSampleRate`] | `sample_rate` non-finite or `<= 0` |
/// | [`CsdError::InvalidFftLength`] | see [`CsdConfig::validate`] |
/// | [`CsdError::InvalidOverlap`] | see [`CsdConfig::validate`] |
/// | [`CsdError::InsufficientData`] | record shorter than one segment |
pub fn cross_spectra(
    block: &TimeSeriesBlock,
    sample_rate: f64,
    config: &CsdConfig,
) -> Result<CrossSpectra, CsdError> {
    if !sample_rate.is_finite() || sample_rate <= 0.0 {
        return Err(CsdError::InvalidSampleRate(sample_rate));
    }
    config.validate()?;

    let nfft = config.nfft();
    let len = block.n_samples();
    if len < nfft {
        return Err(CsdError::InsufficientData { len, nfft });
    }

    let n_ch = block.n_channels();
    let n_bins = nfft / 2 + 1;
    let step = config.step();
    let n_segments = (len - nfft) / step + 1;
    debug!(nfft, n_segments, n_ch, "estimating cross-spectra");

    let window = config.window().coefficients(nfft);
    let detrended: Vec<Vec<f64>> = block.channels().iter().map(|c| detrend_linear(c)).collect();

    let mut planner = FftPlanner::new();
    let fft = planner.plan_fft_forward(nfft);

    let mut acc = vec![Complex64::new(0.0, 0.0); n_bins * n_ch * n_ch];
    let mut spectra = vec![vec![Complex64::new(0.0, 0.0); nfft]; n_ch];
    for seg in 0..n_segments {
        let start = seg * step;
        for (buf, series) in spectra.iter_mut().zip(&detrended) {
            for (b, (&x, &w)) in buf
                .iter_mut()
                .zip(series[start..start + nfft].iter().zip(&window))
            {
                *b = Complex64::new(x * w, 0.0);
            }
            fft.process(buf);
        }
        for bin in 0..n_bins {
            let base = bin * n_ch * n_ch;
            for i in 0..n_ch {
                let xi = spectra[i][bin];
                for j in i..n_ch {
                    acc[base + i * n_ch + j] += xi * spectra[j][bin].conj();
                }
            }
        }
    }

    // One-sided density: the Nyquist and DC bins are not doubled.
    let w_energy: f64 = window.iter().map(|w| w * w).sum();
    let base_scale = 1.0 / (sample_rate * w_energy * n_segments as f64);
    for bin in 0..n_bins {
        let scale = if bin == 0 || 2 * bin == nfft {
            base_scale
        } else {
            2.0 * base_scale
        };
        let base = bin * n_ch * n_ch;
        for i in 0..n_ch {
            for j in i..n_ch {
                let v = acc[base + i * n_ch + j] * scale;
                acc[base + i * n_ch + j] = v;
                acc[base + j * n_ch + i] = v.conj();
            }
            // Auto-spectra are real by construction; drop rounding noise.
            acc[base + i * n_ch + i].im = 0.0;
        }
    }

    let df = sample_rate / nfft as f64;
    Ok(CrossSpectra {
        frequencies: (0..n_bins).map(|k| k as f64 * df).collect(),
        data: acc,
        n_channels: n_ch,
        n_segments,
    })
}
