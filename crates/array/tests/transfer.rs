//! Integration tests for nereus-array: geometry validation feeding the
//! transfer-function bank.

use std::f64::consts::PI;

use approx::assert_relative_eq;
use nereus_array::{
    ArrayError, Instrument, InstrumentArray, InstrumentKind, Position, TimeSeriesBlock,
    TransferMatrix,
};
use nereus_dispersion::solve_wavenumbers;
use num_complex::Complex;

fn triangle(kind: InstrumentKind, z: f64) -> InstrumentArray {
    let h = 10.0 * (3.0_f64).sqrt() / 2.0;
    let instruments = [(0.0, 0.0), (10.0, 0.0), (5.0, h)]
        .into_iter()
        .map(|(x, y)| Instrument::new(kind, Position::new(x, y, z)))
        .collect();
    InstrumentArray::new(instruments, 10.0, 2.0).unwrap()
}

#[test]
fn parsed_kinds_build_an_array() {
    let kinds: Vec<InstrumentKind> = ["pres", "velx", "vely"]
        .iter()
        .map(|s| s.parse().unwrap())
        .collect();
    let instruments = kinds
        .into_iter()
        .map(|k| Instrument::new(k, Position::new(0.0, 0.0, 1.5)))
        .collect();
    let array = InstrumentArray::new(instruments, 8.0, 4.0).unwrap();
    assert_eq!(array.instruments()[2].kind(), InstrumentKind::VelocityY);
}

#[test]
fn unknown_kind_fails_before_array_construction() {
    let result: Result<Vec<InstrumentKind>, ArrayError> =
        ["pres", "radar"].iter().map(|s| s.parse()).collect();
    assert_eq!(
        result.unwrap_err(),
        ArrayError::UnsupportedInstrument("radar".into())
    );
}

#[test]
fn phase_difference_follows_wavenumber_projection() {
    let array = triangle(InstrumentKind::Elevation, 10.0);
    let freqs = [0.125];
    let ks: Vec<f64> = solve_wavenumbers(&freqs, array.depth())
        .iter()
        .map(|s| s.k())
        .collect();
    let theta = PI / 4.0;
    let tm = TransferMatrix::build(&array, &freqs, &ks, &[theta]).unwrap();

    // Sensor 1 is 10 m along x: its phase leads sensor 0 by k * 10 * cos(theta).
    let ratio = tm.get(0, 1, 0) / tm.get(0, 0, 0);
    let expected = Complex::from_polar(1.0, ks[0] * 10.0 * theta.cos());
    assert_relative_eq!(ratio.re, expected.re, epsilon = 1e-12);
    assert_relative_eq!(ratio.im, expected.im, epsilon = 1e-12);
}

#[test]
fn pressure_attenuation_grows_with_frequency() {
    let array = triangle(InstrumentKind::Pressure, 0.0);
    let freqs = [0.05, 0.1, 0.2, 0.3];
    let ks: Vec<f64> = solve_wavenumbers(&freqs, array.depth())
        .iter()
        .map(|s| s.k())
        .collect();
    let tm = TransferMatrix::build(&array, &freqs, &ks, &[0.0]).unwrap();
    let gains: Vec<f64> = (0..freqs.len()).map(|f| tm.get(f, 0, 0).norm()).collect();
    for w in gains.windows(2) {
        assert!(w[1] <= w[0], "gains not decreasing: {gains:?}");
    }
    assert!(gains.iter().all(|&g| g >= 0.1 - 1e-12));
}

#[test]
fn block_must_match_array() {
    let array = triangle(InstrumentKind::Pressure, 1.0);
    let block = TimeSeriesBlock::new(vec![vec![0.0; 16]; 4]).unwrap();
    assert!(matches!(
        array.check_block(&block),
        Err(ArrayError::ChannelCountMismatch {
            channels: 4,
            instruments: 3
        })
    ));
}
