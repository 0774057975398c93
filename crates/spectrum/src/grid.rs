//! Frequency-direction grids and their unit conventions.

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use crate::error::SpectrumError;

/// Compass bearing of the x-axis when none is given (x points East).
pub const DEFAULT_X_AXIS_BEARING: f64 = 90.0;

/// Unit of the frequency axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FrequencyUnit {
    /// Cycles per second.
    #[default]
    Hz,
    /// Radians per second.
    RadPerSec,
}

/// Unit of the direction axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DirectionUnit {
    /// Radians.
    #[default]
    Radians,
    /// Degrees.
    Degrees,
}

/// Meaning of a direction value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DirectionConvention {
    /// Direction of propagation, counter-clockwise from the array x-axis.
    #[default]
    Cartesian,
    /// Compass bearing the waves come from, clockwise from North.
    Nautical,
}

impl FrequencyUnit {
    /// Angular frequency units per Hz.
    fn per_hz(self) -> f64 {
        match self {
            Self::Hz => 1.0,
            Self::RadPerSec => 2.0 * PI,
        }
    }
}

impl DirectionUnit {
    /// Radians per unit.
    fn to_radians(self) -> f64 {
        match self {
            Self::Radians => 1.0,
            Self::Degrees => PI / 180.0,
        }
    }

    /// Length of a full turn in this unit.
    pub fn period(self) -> f64 {
        match self {
            Self::Radians => 2.0 * PI,
            Self::Degrees => 360.0,
        }
    }
}

impl fmt::Display for FrequencyUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Hz => "hz",
            Self::RadPerSec => "rad/s",
        })
    }
}

impl fmt::Display for DirectionUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Radians => "rad",
            Self::Degrees => "deg",
        })
    }
}

impl fmt::Display for DirectionConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Cartesian => "cartesian",
            Self::Nautical => "nautical",
        })
    }
}

impl FromStr for FrequencyUnit {
    type Err = SpectrumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "hz" => Ok(Self::Hz),
            "rad/s" | "rad" | "radps" => Ok(Self::RadPerSec),
            _ => Err(SpectrumError::UnknownUnit(s.to_string())),
        }
    }
}

impl FromStr for DirectionUnit {
    type Err = SpectrumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "rad" | "radians" => Ok(Self::Radians),
            "deg" | "degrees" => Ok(Self::Degrees),
            _ => Err(SpectrumError::UnknownUnit(s.to_string())),
        }
    }
}

impl FromStr for DirectionConvention {
    type Err = SpectrumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cartesian" | "car" => Ok(Self::Cartesian),
            "nautical" | "naut" => Ok(Self::Nautical),
            _ => Err(SpectrumError::UnknownUnit(s.to_string())),
        }
    }
}

/// The axes of a directional spectrum together with their units.
///
/// The basis representation used by estimators is Hz and Cartesian
/// radians ([`SpectrumGrid::basis`]); caller grids may use any combination
/// of [`FrequencyUnit`], [`DirectionUnit`] and [`DirectionConvention`].
///
/// # Example
///
/// ```
/// use nereus_spectrum::{DirectionConvention, DirectionUnit, SpectrumGrid};
///
/// let grid = SpectrumGrid::new(vec![0.05, 0.1, 0.2], vec![0.0, 90.0, 180.0, 270.0])
///     .unwrap()
///     .with_direction_unit(DirectionUnit::Degrees)
///     .with_convention(DirectionConvention::Nautical);
/// assert_eq!(grid.n_frequencies(), 3);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct SpectrumGrid {
    frequencies: Vec<f64>,
    directions: Vec<f64>,
    frequency_unit: FrequencyUnit,
    direction_unit: DirectionUnit,
    convention: DirectionConvention,
    x_axis_bearing: f64,
}

impl SpectrumGrid {
    /// Creates a grid in Hz and Cartesian radians.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`SpectrumError::EmptyAxis`] | either axis is empty |
    /// | [`SpectrumError::NonFiniteAxis`] | an axis value is NaN or infinite |
    /// | [`SpectrumError::FrequenciesNotIncreasing`] | frequencies not strictly increasing, or negative |
    pub fn new(frequencies: Vec<f64>, directions: Vec<f64>) -> Result<Self, SpectrumError> {
        if frequencies.is_empty() {
            return Err(SpectrumError::EmptyAxis("frequencies"));
        }
        if directions.is_empty() {
            return Err(SpectrumError::EmptyAxis("directions"));
        }
        if frequencies.iter().any(|v| !v.is_finite()) {
            return Err(SpectrumError::NonFiniteAxis("frequencies"));
        }
        if directions.iter().any(|v| !v.is_finite()) {
            return Err(SpectrumError::NonFiniteAxis("directions"));
        }
        if frequencies[0] < 0.0 || frequencies.windows(2).any(|w| w[1] <= w[0]) {
            return Err(SpectrumError::FrequenciesNotIncreasing);
        }
        Ok(Self {
            frequencies,
            directions,
            frequency_unit: FrequencyUnit::Hz,
            direction_unit: DirectionUnit::Radians,
            convention: DirectionConvention::Cartesian,
            x_axis_bearing: DEFAULT_X_AXIS_BEARING,
        })
    }

    /// Creates a basis grid (Hz, Cartesian radians).
    pub fn basis(frequencies: Vec<f64>, directions: Vec<f64>) -> Result<Self, SpectrumError> {
        Self::new(frequencies, directions)
    }

    /// Sets the frequency unit.
    pub fn with_frequency_unit(mut self, unit: FrequencyUnit) -> Self {
        self.frequency_unit = unit;
        self
    }

    /// Sets the direction unit.
    pub fn with_direction_unit(mut self, unit: DirectionUnit) -> Self {
        self.direction_unit = unit;
        self
    }

    /// Sets the direction convention.
    pub fn with_convention(mut self, convention: DirectionConvention) -> Self {
        self.convention = convention;
        self
    }

    /// Sets the compass bearing of the x-axis (degrees).
    pub fn with_x_axis_bearing(mut self, bearing: f64) -> Self {
        self.x_axis_bearing = bearing;
        self
    }

    /// Returns the frequencies in the grid's unit.
    pub fn frequencies(&self) -> &[f64] {
        &self.frequencies
    }

    /// Returns the directions in the grid's unit and convention.
    pub fn directions(&self) -> &[f64] {
        &self.directions
    }

    /// Returns the number of frequencies.
    pub fn n_frequencies(&self) -> usize {
        self.frequencies.len()
    }

    /// Returns the number of directions.
    pub fn n_directions(&self) -> usize {
        self.directions.len()
    }

    /// Returns the frequency unit.
    pub fn frequency_unit(&self) -> FrequencyUnit {
        self.frequency_unit
    }

    /// Returns the direction unit.
    pub fn direction_unit(&self) -> DirectionUnit {
        self.direction_unit
    }

    /// Returns the direction convention.
    pub fn convention(&self) -> DirectionConvention {
        self.convention
    }

    /// Returns the compass bearing of the x-axis (degrees).
    pub fn x_axis_bearing(&self) -> f64 {
        self.x_axis_bearing
    }

    /// Returns `true` if the grid is in Hz and Cartesian radians.
    pub fn is_basis(&self) -> bool {
        self.frequency_unit == FrequencyUnit::Hz
            && self.direction_unit == DirectionUnit::Radians
            && self.convention == DirectionConvention::Cartesian
    }

    /// Frequencies converted to Hz.
    pub fn frequencies_hz(&self) -> Vec<f64> {
        let per_hz = self.frequency_unit.per_hz();
        self.frequencies.iter().map(|f| f / per_hz).collect()
    }

    /// Directions converted to Cartesian radians (propagation direction,
    /// counter-clockwise from the x-axis).
    pub fn directions_cartesian_rad(&self) -> Vec<f64> {
        let to_rad = self.direction_unit.to_radians();
        match self.convention {
            DirectionConvention::Cartesian => self.directions.iter().map(|d| d * to_rad).collect(),
            DirectionConvention::Nautical => {
                let bearing = self.x_axis_bearing.to_radians();
                self.directions
                    .iter()
                    .map(|d| bearing + PI - d * to_rad)
                    .collect()
            }
        }
    }

    /// Factor converting a basis density (per Hz per radian) into this
    /// grid's density units.
    pub fn density_factor(&self) -> f64 {
        self.direction_unit.to_radians() / self.frequency_unit.per_hz()
    }

    /// Compass bearing (degrees) the waves come from for a direction value
    /// expressed in this grid's unit and convention.
    pub fn bearing_from(&self, direction: f64) -> f64 {
        let to_rad = self.direction_unit.to_radians();
        match self.convention {
            DirectionConvention::Nautical => (direction * to_rad).to_degrees().rem_euclid(360.0),
            DirectionConvention::Cartesian => {
                compass_bearing((direction * to_rad).to_degrees(), self.x_axis_bearing)
            }
        }
    }

    /// Period of the direction axis in this grid's unit.
    pub fn direction_period(&self) -> f64 {
        self.direction_unit.period()
    }

    /// Peak frequency value in Hz, given its grid index.
    pub(crate) fn frequency_hz(&self, index: usize) -> f64 {
        self.frequencies[index] / self.frequency_unit.per_hz()
    }
}

/// Converts a Cartesian axis angle (degrees) to the compass bearing the
/// waves come from, given the compass bearing of the x-axis.
///
/// The result lies in `[0, 360)`.
///
/// ```
/// use nereus_spectrum::compass_bearing;
///
/// // Waves travelling along +x (East) come from the West.
/// assert_eq!(compass_bearing(0.0, 90.0), 270.0);
/// ```
pub fn compass_bearing(axis_angle_deg: f64, x_axis_bearing: f64) -> f64 {
    (180.0 + x_axis_bearing - axis_angle_deg).rem_euclid(360.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn rejects_bad_axes() {
        assert_eq!(
            SpectrumGrid::new(vec![], vec![0.0]).unwrap_err(),
            SpectrumError::EmptyAxis("frequencies")
        );
        assert_eq!(
            SpectrumGrid::new(vec![0.1], vec![]).unwrap_err(),
            SpectrumError::EmptyAxis("directions")
        );
        assert_eq!(
            SpectrumGrid::new(vec![0.2, 0.1], vec![0.0]).unwrap_err(),
            SpectrumError::FrequenciesNotIncreasing
        );
        assert_eq!(
            SpectrumGrid::new(vec![0.1, 0.1], vec![0.0]).unwrap_err(),
            SpectrumError::FrequenciesNotIncreasing
        );
        assert_eq!(
            SpectrumGrid::new(vec![0.1], vec![f64::NAN]).unwrap_err(),
            SpectrumError::NonFiniteAxis("directions")
        );
    }

    #[test]
    fn defaults_are_basis() {
        let g = SpectrumGrid::new(vec![0.1], vec![0.0]).unwrap();
        assert!(g.is_basis());
        assert_eq!(g.x_axis_bearing(), DEFAULT_X_AXIS_BEARING);
        assert_eq!(g.density_factor(), 1.0);
    }

    #[test]
    fn rad_per_sec_and_degrees() {
        let g = SpectrumGrid::new(vec![2.0 * PI * 0.1], vec![90.0])
            .unwrap()
            .with_frequency_unit(FrequencyUnit::RadPerSec)
            .with_direction_unit(DirectionUnit::Degrees);
        assert_relative_eq!(g.frequencies_hz()[0], 0.1, epsilon = 1e-12);
        assert_relative_eq!(g.directions_cartesian_rad()[0], PI / 2.0, epsilon = 1e-12);
        assert_relative_eq!(g.density_factor(), (PI / 180.0) / (2.0 * PI));
        assert_eq!(g.direction_period(), 360.0);
    }

    #[test]
    fn nautical_to_cartesian() {
        // x-axis East: waves from the West (270) travel toward +x.
        let g = SpectrumGrid::new(vec![0.1], vec![270.0, 180.0])
            .unwrap()
            .with_direction_unit(DirectionUnit::Degrees)
            .with_convention(DirectionConvention::Nautical);
        let dirs = g.directions_cartesian_rad();
        assert_relative_eq!(dirs[0].sin(), 0.0, epsilon = 1e-12);
        assert_relative_eq!(dirs[0].cos(), 1.0, epsilon = 1e-12);
        // From the South: travelling North, i.e. +y.
        assert_relative_eq!(dirs[1].sin(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn nautical_with_rotated_axis() {
        // x-axis points North; waves from the South travel along +x.
        let g = SpectrumGrid::new(vec![0.1], vec![180.0])
            .unwrap()
            .with_direction_unit(DirectionUnit::Degrees)
            .with_convention(DirectionConvention::Nautical)
            .with_x_axis_bearing(0.0);
        assert_relative_eq!(g.directions_cartesian_rad()[0].cos(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn compass_bearing_inverts_nautical() {
        for bearing in [0.0, 45.0, 90.0, 200.0] {
            for axis in [-170.0, -45.0, 0.0, 30.0, 180.0] {
                let from = compass_bearing(axis, bearing);
                assert!((0.0..360.0).contains(&from));
                let g = SpectrumGrid::new(vec![0.1], vec![from])
                    .unwrap()
                    .with_direction_unit(DirectionUnit::Degrees)
                    .with_convention(DirectionConvention::Nautical)
                    .with_x_axis_bearing(bearing);
                let back = g.directions_cartesian_rad()[0];
                let axis_rad: f64 = f64::to_radians(axis);
                assert_relative_eq!(back.cos(), axis_rad.cos(), epsilon = 1e-9);
                assert_relative_eq!(back.sin(), axis_rad.sin(), epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn bearing_from_either_convention() {
        let cart = SpectrumGrid::new(vec![0.1], vec![0.0])
            .unwrap()
            .with_direction_unit(DirectionUnit::Degrees);
        assert_relative_eq!(cart.bearing_from(45.0), 225.0, epsilon = 1e-9);
        let naut = cart.with_convention(DirectionConvention::Nautical);
        assert_relative_eq!(naut.bearing_from(-90.0), 270.0, epsilon = 1e-9);
        let rad = SpectrumGrid::new(vec![0.1], vec![0.0]).unwrap();
        assert_relative_eq!(rad.bearing_from(PI / 2.0), 180.0, epsilon = 1e-9);
    }

    #[test]
    fn parse_units() {
        assert_eq!("Hz".parse::<FrequencyUnit>().unwrap(), FrequencyUnit::Hz);
        assert_eq!(
            "rad/s".parse::<FrequencyUnit>().unwrap(),
            FrequencyUnit::RadPerSec
        );
        assert_eq!(
            "degrees".parse::<DirectionUnit>().unwrap(),
            DirectionUnit::Degrees
        );
        assert_eq!(
            "naut".parse::<DirectionConvention>().unwrap(),
            DirectionConvention::Nautical
        );
        assert!(matches!(
            "furlongs".parse::<DirectionUnit>(),
            Err(SpectrumError::UnknownUnit(_))
        ));
    }
}
