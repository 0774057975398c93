//! DIWASP text matrix format.
//!
//! One number per line:
//!
//! ```text
//! x-axis bearing
//! nf
//! nd
//! nf frequencies
//! nd directions
//! 999
//! nf x nd densities, frequency-major
//! ```
//!
//! The format carries no units; readers assume Hz and Cartesian degrees
//! unless told otherwise.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::SpectrumError;
use crate::grid::{DirectionConvention, DirectionUnit, FrequencyUnit, SpectrumGrid};
use crate::spectrum::DirectionalSpectrum;

/// Separator between the axes and the densities.
const SENTINEL: f64 = 999.0;

/// Writes `spectrum` to `path` in DIWASP text format.
pub fn write_spectrum(path: &Path, spectrum: &DirectionalSpectrum) -> Result<(), SpectrumError> {
    let io_err = |e: std::io::Error| SpectrumError::Io {
        path: path.to_path_buf(),
        reason: e.to_string(),
    };
    let file = File::create(path).map_err(io_err)?;
    let mut w = BufWriter::new(file);
    let grid = spectrum.grid();

    writeln!(w, "{}", grid.x_axis_bearing()).map_err(io_err)?;
    writeln!(w, "{}", grid.n_frequencies()).map_err(io_err)?;
    writeln!(w, "{}", grid.n_directions()).map_err(io_err)?;
    for v in grid.frequencies().iter().chain(grid.directions()) {
        writeln!(w, "{v}").map_err(io_err)?;
    }
    writeln!(w, "{SENTINEL}").map_err(io_err)?;
    for v in spectrum.values() {
        writeln!(w, "{v}").map_err(io_err)?;
    }
    w.flush().map_err(io_err)
}

/// Reads a DIWASP text spectrum in Hz and Cartesian degrees.
pub fn read_spectrum(path: &Path) -> Result<DirectionalSpectrum, SpectrumError> {
    read_spectrum_as(
        path,
        FrequencyUnit::Hz,
        DirectionUnit::Degrees,
        DirectionConvention::Cartesian,
    )
}

/// Reads a DIWASP text spectrum whose axes are in the given units.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`SpectrumError::Io`] | the file cannot be read |
/// | [`SpectrumError::Format`] | a token is not a number, a count is invalid, the sentinel is missing, or the file is truncated or too long |
/// | any grid or spectrum error | the axes or values fail validation |
pub fn read_spectrum_as(
    path: &Path,
    frequency_unit: FrequencyUnit,
    direction_unit: DirectionUnit,
    convention: DirectionConvention,
) -> Result<DirectionalSpectrum, SpectrumError> {
    let text = std::fs::read_to_string(path).map_err(|e| SpectrumError::Io {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let mut tokens = Tokens::new(path, &text);

    let bearing = tokens.number()?;
    let nf = tokens.count()?;
    let nd = tokens.count()?;
    let frequencies = tokens.numbers(nf)?;
    let directions = tokens.numbers(nd)?;
    let (line, sentinel) = tokens.next_number()?;
    if sentinel != SENTINEL {
        return Err(tokens.error(line, format!("expected {SENTINEL} separator, got {sentinel}")));
    }
    let values = tokens.numbers(nf * nd)?;
    if let Some((line, extra)) = tokens.peek() {
        return Err(tokens.error(line, format!("unexpected trailing value '{extra}'")));
    }

    let grid = SpectrumGrid::new(frequencies, directions)?
        .with_frequency_unit(frequency_unit)
        .with_direction_unit(direction_unit)
        .with_convention(convention)
        .with_x_axis_bearing(bearing);
    DirectionalSpectrum::new(grid, values)
}

/// Whitespace-separated tokens with their one-based line numbers.
struct Tokens<'a> {
    path: &'a Path,
    items: std::iter::Peekable<Box<dyn Iterator<Item = (usize, &'a str)> + 'a>>,
    last_line: usize,
}

impl<'a> Tokens<'a> {
    fn new(path: &'a Path, text: &'a str) -> Self {
        let iter: Box<dyn Iterator<Item = (usize, &'a str)> + 'a> = Box::new(
            text.lines()
                .enumerate()
                .flat_map(|(i, line)| line.split_whitespace().map(move |t| (i + 1, t))),
        );
        Self {
            path,
            items: iter.peekable(),
            last_line: 0,
        }
    }

    fn error(&self, line: usize, reason: String) -> SpectrumError {
        SpectrumError::Format {
            path: self.path.to_path_buf(),
            line,
            reason,
        }
    }

    fn peek(&mut self) -> Option<(usize, &'a str)> {
        self.items.peek().copied()
    }

    fn next_number(&mut self) -> Result<(usize, f64), SpectrumError> {
        let Some((line, token)) = self.items.next() else {
            return Err(self.error(self.last_line + 1, "unexpected end of file".into()));
        };
        self.last_line = line;
        token
            .parse::<f64>()
            .map(|v| (line, v))
            .map_err(|_| self.error(line, format!("expected a number, got '{token}'")))
    }

    fn number(&mut self) -> Result<f64, SpectrumError> {
        self.next_number().map(|(_, v)| v)
    }

    fn count(&mut self) -> Result<usize, SpectrumError> {
        let (line, v) = self.next_number()?;
        if v < 1.0 || v.fract() != 0.0 || !v.is_finite() {
            return Err(self.error(line, format!("expected a positive count, got {v}")));
        }
        Ok(v as usize)
    }

    fn numbers(&mut self, n: usize) -> Result<Vec<f64>, SpectrumError> {
        (0..n).map(|_| self.number()).collect()
    }
}
