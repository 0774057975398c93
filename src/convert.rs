//! Pure conversion functions: TOML config structs -> crate API config types.

use anyhow::{Context, Result, bail};

use nereus_array::{Instrument, InstrumentArray, InstrumentKind, Position};
use nereus_csd::Window;
use nereus_estimate::{EstimationConfig, Method};
use nereus_spectrum::{DirectionConvention, DirectionUnit, FrequencyUnit, SpectrumGrid};

use crate::config::{ArrayToml, EstimationToml, GridToml};

/// `n` evenly spaced values from `range[0]` to `range[1]` inclusive.
pub fn linspace(range: [f64; 2], n: usize) -> Result<Vec<f64>> {
    match n {
        0 => bail!("grid axis needs at least one point"),
        1 => Ok(vec![range[0]]),
        _ => {
            let step = (range[1] - range[0]) / (n - 1) as f64;
            Ok((0..n).map(|i| range[0] + step * i as f64).collect())
        }
    }
}

/// Builds an [`InstrumentArray`] from the TOML array section.
pub fn build_array(array: &ArrayToml) -> Result<InstrumentArray> {
    let instruments = array
        .instruments
        .iter()
        .enumerate()
        .map(|(i, inst)| {
            let kind: InstrumentKind = inst
                .kind
                .parse()
                .with_context(|| format!("instrument {i}"))?;
            Ok(Instrument::new(kind, Position::new(inst.x, inst.y, inst.z)))
        })
        .collect::<Result<Vec<_>>>()?;
    InstrumentArray::new(instruments, array.depth, array.sample_rate)
        .context("invalid instrument array")
}

/// Builds the output [`SpectrumGrid`] from the TOML grid section.
pub fn build_grid(grid: &GridToml) -> Result<SpectrumGrid> {
    let frequencies = match &grid.frequencies {
        Some(f) => f.clone(),
        None => linspace(grid.frequency_range, grid.n_frequencies)?,
    };
    let directions = match &grid.directions {
        Some(d) => d.clone(),
        None => linspace(grid.direction_range, grid.n_directions)?,
    };
    let frequency_unit: FrequencyUnit = grid.frequency_unit.parse()?;
    let direction_unit: DirectionUnit = grid.direction_unit.parse()?;
    let convention: DirectionConvention = grid.convention.parse()?;
    Ok(SpectrumGrid::new(frequencies, directions)
        .context("invalid output grid")?
        .with_frequency_unit(frequency_unit)
        .with_direction_unit(direction_unit)
        .with_convention(convention)
        .with_x_axis_bearing(grid.x_axis_bearing))
}

/// Builds an [`EstimationConfig`] from the TOML estimation section.
pub fn build_estimation_config(est: &EstimationToml) -> Result<EstimationConfig> {
    let method: Method = est.method.parse()?;
    let window: Window = est.window.parse()?;
    let mut cfg = EstimationConfig::new()
        .with_method(method)
        .with_iterations(est.iterations)
        .with_resolution(est.resolution)
        .with_smoothing(est.smoothing)
        .with_window(window)
        .with_overlap(est.overlap);
    if let Some(n) = est.fft_length {
        cfg = cfg.with_fft_length(n);
    }
    cfg.validate()?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::InstrumentToml;
    use approx::assert_relative_eq;

    #[test]
    fn linspace_endpoints() {
        let v = linspace([-180.0, 180.0], 37).unwrap();
        assert_eq!(v.len(), 37);
        assert_eq!(v[0], -180.0);
        assert_relative_eq!(v[36], 180.0, epsilon = 1e-9);
        for pair in v.windows(2) {
            assert_relative_eq!(pair[1] - pair[0], 10.0, epsilon = 1e-9);
        }
        assert_eq!(linspace([0.1, 0.5], 1).unwrap(), vec![0.1]);
        assert!(linspace([0.1, 0.5], 0).is_err());
    }

    #[test]
    fn array_from_toml() {
        let toml = ArrayToml {
            depth: 10.0,
            sample_rate: 2.0,
            data: "x.txt".into(),
            instruments: ["pres", "velx", "vely"]
                .iter()
                .map(|k| InstrumentToml {
                    kind: k.to_string(),
                    x: 0.0,
                    y: 0.0,
                    z: 1.0,
                })
                .collect(),
        };
        let array = build_array(&toml).unwrap();
        assert_eq!(array.len(), 3);
        assert_eq!(array.instruments()[1].kind(), InstrumentKind::VelocityX);
    }

    #[test]
    fn unknown_instrument_is_rejected() {
        let toml = ArrayToml {
            depth: 10.0,
            sample_rate: 2.0,
            data: "x.txt".into(),
            instruments: vec![InstrumentToml {
                kind: "lidar".into(),
                x: 0.0,
                y: 0.0,
                z: 0.0,
            }],
        };
        let err = build_array(&toml).unwrap_err();
        assert!(format!("{err:#}").contains("lidar"), "{err:#}");
    }

    #[test]
    fn grid_units_are_parsed() {
        let grid = GridToml {
            convention: "nautical".into(),
            frequency_unit: "rad/s".into(),
            n_directions: 36,
            direction_range: [0.0, 350.0],
            ..GridToml::default()
        };
        let g = build_grid(&grid).unwrap();
        assert_eq!(g.convention(), DirectionConvention::Nautical);
        assert_eq!(g.frequency_unit(), FrequencyUnit::RadPerSec);
        assert_eq!(g.direction_unit(), DirectionUnit::Degrees);
        assert_eq!(g.n_directions(), 36);
        assert_eq!(g.n_frequencies(), 50);
    }

    #[test]
    fn explicit_axes_override_ranges() {
        let grid = GridToml {
            frequencies: Some(vec![0.1, 0.2]),
            directions: Some(vec![0.0, 90.0, 180.0]),
            ..GridToml::default()
        };
        let g = build_grid(&grid).unwrap();
        assert_eq!(g.frequencies(), &[0.1, 0.2]);
        assert_eq!(g.n_directions(), 3);
    }

    #[test]
    fn estimation_config_from_toml() {
        let est = EstimationToml {
            method: "EMEP".into(),
            fft_length: Some(256),
            window: "hann".into(),
            ..EstimationToml::default()
        };
        let cfg = build_estimation_config(&est).unwrap();
        assert_eq!(cfg.method(), Method::Emep);
        assert_eq!(cfg.fft_length(), Some(256));
        assert_eq!(cfg.window(), Window::Hann);

        let bad = EstimationToml {
            method: "bdm".into(),
            ..EstimationToml::default()
        };
        assert!(build_estimation_config(&bad).is_err());
    }
}
