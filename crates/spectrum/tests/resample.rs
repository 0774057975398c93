//! Integration tests for nereus-spectrum: resampling onto caller grids.

use std::f64::consts::PI;

use approx::assert_relative_eq;
use nereus_spectrum::{
    DirectionConvention, DirectionUnit, DirectionalSpectrum, FrequencyUnit, SmoothingKernel,
    SpectrumGrid, WaveStatistics, read_spectrum, resample, smooth, write_spectrum,
};

fn linspace(lo: f64, hi: f64, n: usize) -> Vec<f64> {
    (0..n)
        .map(|i| lo + (hi - lo) * i as f64 / (n - 1) as f64)
        .collect()
}

/// Native-style basis grid: frequencies at `df` spacing, `nd` directions
/// starting at -pi.
fn native_grid(f_lo: f64, f_hi: f64, df: f64, nd: usize) -> SpectrumGrid {
    let nf = ((f_hi - f_lo) / df).round() as usize + 1;
    let freqs = (0..nf).map(|i| f_lo + df * i as f64).collect();
    let dirs = (0..nd)
        .map(|j| -PI + 2.0 * PI * j as f64 / nd as f64)
        .collect();
    SpectrumGrid::basis(freqs, dirs).unwrap()
}

fn degree_grid(nf: usize, nd: usize) -> SpectrumGrid {
    SpectrumGrid::new(linspace(0.05, 0.5, nf), linspace(-180.0, 180.0, nd))
        .unwrap()
        .with_direction_unit(DirectionUnit::Degrees)
}

#[test]
fn flat_spectrum_energy_preserved_within_two_percent() {
    let native = native_grid(0.05, 0.5, 0.45 / 120.0, 180);
    let n = native.n_frequencies() * native.n_directions();
    let s = DirectionalSpectrum::new(native, vec![0.3; n]).unwrap();

    for (nf, nd) in [(50, 36), (20, 73), (100, 10)] {
        let out = resample(&s, &degree_grid(nf, nd));
        let rel = (out.spectrum.energy() - s.energy()).abs() / s.energy();
        assert!(rel < 0.02, "grid {nf}x{nd}: relative energy change {rel}");
        assert!(out.coarse.is_none());
    }
}

#[test]
fn resampled_values_are_periodic_in_direction() {
    let native = native_grid(0.05, 0.5, 0.01, 72);
    let values: Vec<f64> = (0..native.n_frequencies())
        .flat_map(|f| {
            native
                .directions()
                .iter()
                .map(move |d| (1.0 + f as f64) * (1.0 + (d - 0.7).cos()).powi(2))
        })
        .collect();
    let s = DirectionalSpectrum::new(native, values).unwrap();

    let dirs: Vec<f64> = linspace(-PI, PI, 41);
    let shifted: Vec<f64> = dirs.iter().map(|d| d + 2.0 * PI).collect();
    let freqs = linspace(0.06, 0.49, 17);
    let a = resample(&s, &SpectrumGrid::basis(freqs.clone(), dirs).unwrap());
    let b = resample(&s, &SpectrumGrid::basis(freqs, shifted).unwrap());
    for (x, y) in a.spectrum.values().iter().zip(b.spectrum.values()) {
        assert_relative_eq!(*x, *y, max_relative = 1e-9, epsilon = 1e-12);
    }
}

#[test]
fn nautical_grid_places_peak_at_incoming_bearing() {
    // Energy travelling toward +y (axis angle 90 degrees) with x pointing East
    // is travelling North, so it comes from the South (180).
    let native = native_grid(0.05, 0.3, 0.01, 72);
    let values: Vec<f64> = (0..native.n_frequencies())
        .flat_map(|_| {
            native
                .directions()
                .iter()
                .map(|d| (d - PI / 2.0).cos().max(0.0).powi(8))
        })
        .collect();
    let s = DirectionalSpectrum::new(native, values).unwrap();

    let target = SpectrumGrid::new(linspace(0.05, 0.3, 26), linspace(0.0, 350.0, 36))
        .unwrap()
        .with_direction_unit(DirectionUnit::Degrees)
        .with_convention(DirectionConvention::Nautical);
    let out = resample(&s, &target);
    let stats = WaveStatistics::from_spectrum(&out.spectrum);
    assert_relative_eq!(stats.dp, 180.0, epsilon = 1e-9);
    assert_relative_eq!(out.spectrum.energy(), s.energy(), max_relative = 0.02);
}

#[test]
fn angular_frequency_grid_conserves_energy() {
    let native = native_grid(0.05, 0.5, 0.005, 90);
    let n = native.n_frequencies() * native.n_directions();
    let s = DirectionalSpectrum::new(native, vec![1.0; n]).unwrap();
    let target = SpectrumGrid::new(
        linspace(2.0 * PI * 0.05, 2.0 * PI * 0.5, 60),
        linspace(0.0, 2.0 * PI, 48),
    )
    .unwrap()
    .with_frequency_unit(FrequencyUnit::RadPerSec);
    let out = resample(&s, &target);
    assert_relative_eq!(out.spectrum.energy(), s.energy(), max_relative = 0.02);
    assert_relative_eq!(out.spectrum.get(10, 3), 1.0 / (2.0 * PI), epsilon = 1e-12);
}

#[test]
fn smoothing_then_file_round_trip() {
    let grid = degree_grid(12, 37);
    let values: Vec<f64> = (0..12 * 37).map(|i| ((i * 13) % 17) as f64 * 0.01).collect();
    let s = DirectionalSpectrum::new(grid, values).unwrap();
    let smoothed = smooth(&s, &SmoothingKernel::default());
    assert_relative_eq!(smoothed.energy(), s.energy(), max_relative = 0.1);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("smoothed.spec");
    write_spectrum(&path, &smoothed).unwrap();
    let back = read_spectrum(&path).unwrap();
    assert_eq!(back, smoothed);
}
