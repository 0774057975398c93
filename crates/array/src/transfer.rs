//! Transfer-function bank evaluated over a frequency-direction grid.

use std::f64::consts::PI;

use num_complex::Complex64;

use crate::array::InstrumentArray;
use crate::error::ArrayError;

/// Complex instrument responses indexed by `(frequency, instrument, direction)`.
///
/// Stored flat in frequency-major order so that [`TransferMatrix::row`]
/// returns a contiguous direction slice for one instrument at one frequency.
#[derive(Clone, Debug)]
pub struct TransferMatrix {
    data: Vec<Complex64>,
    frequencies: Vec<f64>,
    directions: Vec<f64>,
    n_instruments: usize,
}

impl TransferMatrix {
    /// Evaluates every instrument's response at each frequency (Hz) and
    /// direction (radians, propagation direction counter-clockwise from x).
    ///
    /// `wavenumbers[i]` must be the solution of the dispersion relation at
    /// `frequencies[i]` for the array's depth.
    ///
    /// # Errors
    ///
    /// Returns [`ArrayError::WavenumberCountMismatch`] if the two slices
    /// differ in length.
    pub fn build(
        array: &InstrumentArray,
        frequencies: &[f64],
        wavenumbers: &[f64],
        directions: &[f64],
    ) -> Result<Self, ArrayError> {
        if frequencies.len() != wavenumbers.len() {
            return Err(ArrayError::WavenumberCountMismatch {
                frequencies: frequencies.len(),
                wavenumbers: wavenumbers.len(),
            });
        }
        let depth = array.depth();
        let n_instruments = array.len();
        let mut data =
            Vec::with_capacity(frequencies.len() * n_instruments * directions.len());
        for (&f, &k) in frequencies.iter().zip(wavenumbers) {
            let omega = 2.0 * PI * f;
            for inst in array.instruments() {
                data.extend(
                    directions
                        .iter()
                        .map(|&theta| inst.response(omega, k, depth, theta)),
                );
            }
        }
        Ok(Self {
            data,
            frequencies: frequencies.to_vec(),
            directions: directions.to_vec(),
            n_instruments,
        })
    }

    /// Returns the response of instrument `inst` at frequency index `f` and
    /// direction index `d`.
    pub fn get(&self, f: usize, inst: usize, d: usize) -> Complex64 {
        self.data[self.offset(f, inst) + d]
    }

    /// Returns the responses of instrument `inst` at frequency index `f` over
    /// all directions.
    pub fn row(&self, f: usize, inst: usize) -> &[Complex64] {
        let start = self.offset(f, inst);
        &self.data[start..start + self.directions.len()]
    }

    /// Returns the frequencies (Hz).
    pub fn frequencies(&self) -> &[f64] {
        &self.frequencies
    }

    /// Returns the directions (radians).
    pub fn directions(&self) -> &[f64] {
        &self.directions
    }

    /// Returns the number of frequencies.
    pub fn n_frequencies(&self) -> usize {
        self.frequencies.len()
    }

    /// Returns the number of instruments.
    pub fn n_instruments(&self) -> usize {
        self.n_instruments
    }

    /// Returns the number of directions.
    pub fn n_directions(&self) -> usize {
        self.directions.len()
    }

    fn offset(&self, f: usize, inst: usize) -> usize {
        (f * self.n_instruments + inst) * self.directions.len()
    }
}
