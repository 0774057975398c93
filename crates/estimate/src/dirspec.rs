//! End-to-end directional spectrum estimation.

use rayon::prelude::*;
use tracing::{debug, warn};

use nereus_array::{InstrumentArray, TimeSeriesBlock, TransferMatrix};
use nereus_csd::{CrossSpectra, cross_spectra};
use nereus_dispersion::solve_wavenumbers;
use nereus_spectrum::{
    DirectionalSpectrum, SmoothingKernel, SpectrumGrid, WaveStatistics, resample, smooth,
};

use crate::config::{EffectiveConfig, EstimationConfig, Method};
use crate::emep::emep;
use crate::error::{DirspecError, EstimateError};
use crate::imlm::imlm;
use crate::kernel::BinProblem;
use crate::warning::EstimationWarning;

/// Result of [`dirspec`].
#[derive(Clone, Debug)]
pub struct DirspecOutput {
    /// Estimate on the caller's grid, in the caller's units.
    pub spectrum: DirectionalSpectrum,
    /// Estimate on the native grid (Hz, Cartesian radians).
    pub native: DirectionalSpectrum,
    /// Parameters actually used.
    pub config: EffectiveConfig,
    /// Non-fatal conditions met along the way, in the order they occurred.
    pub warnings: Vec<EstimationWarning>,
}

impl DirspecOutput {
    /// Summary statistics of [`DirspecOutput::spectrum`].
    pub fn statistics(&self) -> WaveStatistics {
        WaveStatistics::from_spectrum(&self.spectrum)
    }
}

/// Estimates the directional spectrum of `block`, recorded by `array`, on
/// `grid`.
///
/// Stages:
///
/// 1. resolve `config` against the array's sample rate and check the block;
/// 2. Welch cross-spectra, keeping bins `1..=L/2` inside the grid's
///    frequency range;
/// 3. wavenumbers and the transfer matrix on the native directions;
/// 4. per-frequency IMLM or EMEP, in parallel;
/// 5. resampling onto `grid`, then optional smoothing.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`DirspecError::Estimate`] | invalid configuration, no bins in the frequency range, or fewer than 3 usable channels at some frequency |
/// | [`DirspecError::Array`] | block does not match the array |
/// | [`DirspecError::Csd`] | record shorter than one FFT segment |
/// | [`DirspecError::Spectrum`] | native spectrum could not be assembled |
#[tracing::instrument(
    skip_all,
    fields(
        method = %config.method(),
        channels = block.n_channels(),
        samples = block.n_samples(),
    )
)]
pub fn dirspec(
    array: &InstrumentArray,
    block: &TimeSeriesBlock,
    grid: &SpectrumGrid,
    config: &EstimationConfig,
) -> Result<DirspecOutput, DirspecError> {
    let (effective, clamped) = config.resolve(array.sample_rate())?;
    let mut warnings = Vec::new();
    for w in clamped {
        attach(&mut warnings, w);
    }
    array.check_block(block)?;

    let csd = cross_spectra(block, array.sample_rate(), &effective.csd_config())?;
    let bins = bins_in_range(&csd, grid)?;
    let frequencies: Vec<f64> = bins.iter().map(|&b| csd.frequencies()[b]).collect();
    debug!(
        nfft = effective.fft_length(),
        segments = csd.n_segments(),
        bins = bins.len(),
        "cross-spectra estimated"
    );

    let solutions = solve_wavenumbers(&frequencies, array.depth());
    for (s, &frequency) in solutions.iter().zip(&frequencies) {
        if !s.converged() {
            attach(
                &mut warnings,
                EstimationWarning::WavenumberNotConverged { frequency },
            );
        }
    }
    let wavenumbers: Vec<f64> = solutions.iter().map(|s| s.k()).collect();
    let directions = effective.native_directions();
    let transfer = TransferMatrix::build(array, &frequencies, &wavenumbers, &directions)?;

    let rows = estimate_rows(&csd, &bins, &transfer, &effective)?;
    let mut values = Vec::with_capacity(frequencies.len() * directions.len());
    for (row, warning) in rows {
        values.extend(row);
        if let Some(w) = warning {
            attach(&mut warnings, w);
        }
    }
    let native = DirectionalSpectrum::new(SpectrumGrid::basis(frequencies, directions)?, values)?;
    debug!(hsig = native.hsig(), "native spectrum estimated");

    let resampled = resample(&native, grid);
    if let Some(c) = resampled.coarse {
        warnings.push(EstimationWarning::GridTooCoarse {
            hsig_in: c.hsig_in,
            hsig_out: c.hsig_out,
        });
    }
    let spectrum = if effective.smoothing() {
        smooth(&resampled.spectrum, &SmoothingKernel::default())
    } else {
        resampled.spectrum
    };

    Ok(DirspecOutput {
        spectrum,
        native,
        config: effective,
        warnings,
    })
}

/// Indices of the non-zero bins whose frequency lies in the grid's range.
fn bins_in_range(csd: &CrossSpectra, grid: &SpectrumGrid) -> Result<Vec<usize>, EstimateError> {
    let hz = grid.frequencies_hz();
    let (low, high) = (hz[0], hz[hz.len() - 1]);
    let bins: Vec<usize> = (1..csd.n_bins())
        .filter(|&b| (low..=high).contains(&csd.frequencies()[b]))
        .collect();
    if bins.is_empty() {
        return Err(EstimateError::EmptyFrequencyBand { low, high });
    }
    Ok(bins)
}

/// Spectral rows of the selected bins, one independent problem per bin.
fn estimate_rows(
    csd: &CrossSpectra,
    bins: &[usize],
    transfer: &TransferMatrix,
    config: &EffectiveConfig,
) -> Result<Vec<(Vec<f64>, Option<EstimationWarning>)>, EstimateError> {
    bins.par_iter()
        .enumerate()
        .map(|(f, &bin)| {
            let problem = BinProblem::new(csd.frequencies()[bin], csd.matrix(bin), transfer, f)?;
            let (e, warning) = match config.method() {
                Method::Imlm => (imlm(&problem, config.iterations()), None),
                Method::Emep => emep(&problem, config.iterations()),
            };
            Ok((problem.finish(&e), warning))
        })
        .collect()
}

fn attach(warnings: &mut Vec<EstimationWarning>, warning: EstimationWarning) {
    warn!("{warning}");
    warnings.push(warning);
}
