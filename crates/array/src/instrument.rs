//! Instrument kinds, positions and their linear-wave-theory responses.

use std::fmt;
use std::str::FromStr;

use nereus_dispersion::GRAVITY;
use num_complex::Complex64;

use crate::error::ArrayError;

/// Lower bound on depth-attenuation ratios.
///
/// Caps the amplification applied to deep sensors at high frequencies,
/// where the measured signal is mostly noise.
const MIN_ATTENUATION: f64 = 0.1;

/// The closed set of supported measurement types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InstrumentKind {
    /// Free-surface elevation (wave staff, buoy heave).
    Elevation,
    /// Dynamic pressure, expressed as head of water.
    Pressure,
    /// Horizontal orbital velocity along the x-axis.
    VelocityX,
    /// Horizontal orbital velocity along the y-axis.
    VelocityY,
    /// Surface vertical velocity (DIWASP `vels`).
    VelocityMagnitude,
    /// Surface vertical acceleration (DIWASP `accs`).
    Acceleration,
}

impl InstrumentKind {
    /// All supported kinds, in declaration order.
    pub const ALL: [InstrumentKind; 6] = [
        Self::Elevation,
        Self::Pressure,
        Self::VelocityX,
        Self::VelocityY,
        Self::VelocityMagnitude,
        Self::Acceleration,
    ];

    /// Returns the short DIWASP code for this kind.
    pub fn code(self) -> &'static str {
        match self {
            Self::Elevation => "elev",
            Self::Pressure => "pres",
            Self::VelocityX => "velx",
            Self::VelocityY => "vely",
            Self::VelocityMagnitude => "vels",
            Self::Acceleration => "accs",
        }
    }

    /// Returns `true` if the response depends on the sensor's height above
    /// the seabed.
    pub fn is_depth_attenuated(self) -> bool {
        matches!(self, Self::Pressure | Self::VelocityX | Self::VelocityY)
    }

    /// Complex amplitude of the response to a unit surface wave, excluding
    /// the horizontal phase term.
    ///
    /// `omega` is the angular frequency (rad/s), `k` the wavenumber, `z` the
    /// sensor height above the seabed, `depth` the water depth and `theta`
    /// the propagation direction (rad). The time convention is `exp(-iωt)`.
    pub fn amplitude(self, omega: f64, k: f64, z: f64, depth: f64, theta: f64) -> Complex64 {
        match self {
            Self::Elevation => Complex64::new(1.0, 0.0),
            Self::Pressure => Complex64::new(cosh_ratio(k, z, depth).max(MIN_ATTENUATION), 0.0),
            Self::VelocityX => Complex64::new(orbital_speed(omega, k, z, depth) * theta.cos(), 0.0),
            Self::VelocityY => Complex64::new(orbital_speed(omega, k, z, depth) * theta.sin(), 0.0),
            Self::VelocityMagnitude => Complex64::new(0.0, -omega),
            Self::Acceleration => Complex64::new(-omega * omega, 0.0),
        }
    }
}

impl fmt::Display for InstrumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for InstrumentKind {
    type Err = ArrayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "elev" | "elevation" => Ok(Self::Elevation),
            "pres" | "pressure" => Ok(Self::Pressure),
            "velx" | "velocity-x" => Ok(Self::VelocityX),
            "vely" | "velocity-y" => Ok(Self::VelocityY),
            "vels" | "velocity-magnitude" => Ok(Self::VelocityMagnitude),
            "accs" | "acceleration" => Ok(Self::Acceleration),
            _ => Err(ArrayError::UnsupportedInstrument(s.to_string())),
        }
    }
}

/// Instrument position in metres.
///
/// `x` and `y` are horizontal coordinates in the array frame; `z` is the
/// height above the seabed, so `z == depth` is the free surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Position {
    /// Horizontal x coordinate.
    pub x: f64,
    /// Horizontal y coordinate.
    pub y: f64,
    /// Height above the seabed.
    pub z: f64,
}

impl Position {
    /// Creates a new position.
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Returns `true` if all coordinates are finite.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

/// A single instrument: what it measures and where it is.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Instrument {
    kind: InstrumentKind,
    position: Position,
}

impl Instrument {
    /// Creates a new instrument descriptor.
    pub fn new(kind: InstrumentKind, position: Position) -> Self {
        Self { kind, position }
    }

    /// Returns the measurement kind.
    pub fn kind(&self) -> InstrumentKind {
        self.kind
    }

    /// Returns the position.
    pub fn position(&self) -> Position {
        self.position
    }

    /// Complex response to a unit surface wave propagating toward `theta`.
    ///
    /// Combines the kind-specific amplitude with the horizontal phase factor
    /// `exp(i·k·(x·cosθ + y·sinθ))`.
    pub fn response(&self, omega: f64, k: f64, depth: f64, theta: f64) -> Complex64 {
        let p = self.position;
        let phase = k * (p.x * theta.cos() + p.y * theta.sin());
        self.kind.amplitude(omega, k, p.z, depth, theta) * Complex64::from_polar(1.0, phase)
    }
}

/// `cosh(k z) / cosh(k h)` without overflow for large `k h`.
fn cosh_ratio(k: f64, z: f64, h: f64) -> f64 {
    let a = k * z;
    let b = k * h;
    (a - b).exp() * (1.0 + (-2.0 * a).exp()) / (1.0 + (-2.0 * b).exp())
}

/// Horizontal orbital velocity amplitude per unit surface elevation,
/// `ω cosh(k z) / sinh(k h)`, with the attenuation ratio floored.
fn orbital_speed(omega: f64, k: f64, z: f64, h: f64) -> f64 {
    let b = k * h;
    if b <= f64::EPSILON {
        // Shallow-water limit of ω / sinh(k h).
        return (GRAVITY / h).sqrt();
    }
    let a = k * z;
    let ratio = (a - b).exp() * (1.0 + (-2.0 * a).exp()) / (1.0 - (-2.0 * b).exp());
    omega * ratio.max(MIN_ATTENUATION)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    #[test]
    fn parse_codes_and_long_names() {
        for kind in InstrumentKind::ALL {
            assert_eq!(kind.code().parse::<InstrumentKind>().unwrap(), kind);
        }
        assert_eq!(
            "Pressure".parse::<InstrumentKind>().unwrap(),
            InstrumentKind::Pressure
        );
        assert_eq!(
            "velocity_x".parse::<InstrumentKind>().unwrap(),
            InstrumentKind::VelocityX
        );
        assert_eq!(
            " VELS ".parse::<InstrumentKind>().unwrap(),
            InstrumentKind::VelocityMagnitude
        );
    }

    #[test]
    fn parse_unknown_kind_names_it() {
        let err = "slpx".parse::<InstrumentKind>().unwrap_err();
        assert_eq!(err, ArrayError::UnsupportedInstrument("slpx".into()));
    }

    #[test]
    fn display_is_code() {
        assert_eq!(InstrumentKind::Acceleration.to_string(), "accs");
    }

    #[test]
    fn elevation_is_identity() {
        let a = InstrumentKind::Elevation.amplitude(1.0, 0.1, 0.0, 10.0, 0.3);
        assert_eq!(a, Complex64::new(1.0, 0.0));
    }

    #[test]
    fn pressure_matches_cosh_ratio() {
        let k = 0.2;
        let a = InstrumentKind::Pressure.amplitude(1.0, k, 4.0, 10.0, 0.0);
        assert_relative_eq!(a.re, (k * 4.0).cosh() / (k * 10.0).cosh(), epsilon = 1e-12);
        assert_eq!(a.im, 0.0);
    }

    #[test]
    fn pressure_at_surface_is_one() {
        let a = InstrumentKind::Pressure.amplitude(1.0, 0.3, 10.0, 10.0, 0.0);
        assert_relative_eq!(a.re, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn pressure_is_floored_in_deep_water() {
        let a = InstrumentKind::Pressure.amplitude(1.0, 5.0, 0.0, 100.0, 0.0);
        assert_relative_eq!(a.re, MIN_ATTENUATION);
    }

    #[test]
    fn velocity_components_follow_direction() {
        let omega = 2.0 * PI * 0.1;
        let k = 0.08;
        let ux = InstrumentKind::VelocityX.amplitude(omega, k, 5.0, 10.0, 0.0);
        let uy = InstrumentKind::VelocityY.amplitude(omega, k, 5.0, 10.0, PI / 2.0);
        let expected = omega * (k * 5.0).cosh() / (k * 10.0).sinh();
        assert_relative_eq!(ux.re, expected, epsilon = 1e-12);
        assert_relative_eq!(uy.re, expected, epsilon = 1e-12);

        let ux_cross = InstrumentKind::VelocityX.amplitude(omega, k, 5.0, 10.0, PI / 2.0);
        assert!(ux_cross.re.abs() < 1e-12);
    }

    #[test]
    fn velocity_shallow_limit_is_finite() {
        let u = InstrumentKind::VelocityX.amplitude(0.0, 0.0, 2.0, 4.0, 0.0);
        assert_relative_eq!(u.re, (GRAVITY / 4.0).sqrt());
    }

    #[test]
    fn surface_kinematics() {
        let omega = 1.5;
        let w = InstrumentKind::VelocityMagnitude.amplitude(omega, 0.2, 0.0, 10.0, 1.0);
        assert_eq!(w, Complex64::new(0.0, -omega));
        let a = InstrumentKind::Acceleration.amplitude(omega, 0.2, 0.0, 10.0, 1.0);
        assert_eq!(a, Complex64::new(-omega * omega, 0.0));
    }

    #[test]
    fn response_phase_tracks_position() {
        let inst = Instrument::new(InstrumentKind::Elevation, Position::new(10.0, 0.0, 0.0));
        let k = 0.1;
        let r = inst.response(1.0, k, 10.0, 0.0);
        assert_relative_eq!(r.norm(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(r.arg(), 1.0, epsilon = 1e-12);

        // Perpendicular propagation sees no phase shift.
        let r = inst.response(1.0, k, 10.0, PI / 2.0);
        assert!(r.arg().abs() < 1e-12);
    }

    #[test]
    fn cosh_ratio_is_stable_for_large_kh() {
        let r = cosh_ratio(100.0, 9.0, 10.0);
        assert!(r.is_finite());
        assert_relative_eq!(r, (-100.0_f64).exp(), max_relative = 1e-9);
    }
}
