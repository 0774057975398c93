//! Info command: summary statistics of a DIWASP spectrum file.

use anyhow::{Context, Result};

use nereus_spectrum::{
    DirectionConvention, DirectionUnit, DirectionalSpectrum, FrequencyUnit, WaveStatistics,
    read_spectrum_as,
};

use crate::cli::InfoArgs;

/// Print Hsig, Tp, DTp and Dp of a spectrum file.
pub fn run(args: InfoArgs) -> Result<()> {
    let frequency_unit: FrequencyUnit = args.frequency_unit.parse()?;
    let direction_unit: DirectionUnit = args.direction_unit.parse()?;
    let convention: DirectionConvention = args.convention.parse()?;
    let spectrum = read_spectrum_as(&args.path, frequency_unit, direction_unit, convention)
        .with_context(|| format!("failed to read spectrum: {}", args.path.display()))?;
    for line in describe(&spectrum) {
        println!("{line}");
    }
    Ok(())
}

/// Human-readable summary lines for `spectrum`.
pub fn describe(spectrum: &DirectionalSpectrum) -> Vec<String> {
    let stats = WaveStatistics::from_spectrum(spectrum);
    if !stats.is_defined() {
        return vec!["spectrum carries no energy".to_string()];
    }
    let grid = spectrum.grid();
    let unit = match grid.direction_unit() {
        DirectionUnit::Degrees => "deg",
        DirectionUnit::Radians => "rad",
    };
    vec![
        format!("Hsig: {:.3} m", stats.hsig),
        format!("Tp:   {:.2} s", stats.tp),
        format!(
            "DTp:  {:.1} {unit} (from {:.0} deg compass)",
            stats.dtp,
            grid.bearing_from(stats.dtp)
        ),
        format!(
            "Dp:   {:.1} {unit} (from {:.0} deg compass)",
            stats.dp,
            grid.bearing_from(stats.dp)
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use nereus_spectrum::{SpectrumGrid, write_spectrum};

    fn spectrum() -> DirectionalSpectrum {
        let grid = SpectrumGrid::new(vec![0.1, 0.125, 0.15], vec![-90.0, 0.0, 90.0, 180.0])
            .unwrap()
            .with_direction_unit(DirectionUnit::Degrees);
        let mut values = vec![0.0; 12];
        values[4 + 1] = 2.0;
        DirectionalSpectrum::new(grid, values).unwrap()
    }

    #[test]
    fn summary_reports_peak_and_bearing() {
        let lines = describe(&spectrum());
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[1], "Tp:   8.00 s");
        // Travelling along +x with x pointing East: from the West.
        assert_eq!(lines[2], "DTp:  0.0 deg (from 270 deg compass)");
    }

    #[test]
    fn empty_spectrum_summary() {
        let grid = SpectrumGrid::new(vec![0.1], vec![0.0]).unwrap();
        let lines = describe(&DirectionalSpectrum::zeros(grid));
        assert_eq!(lines, vec!["spectrum carries no energy".to_string()]);
    }

    #[test]
    fn run_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("s.spec");
        write_spectrum(&path, &spectrum()).unwrap();
        let args = InfoArgs {
            path,
            frequency_unit: "hz".into(),
            direction_unit: "deg".into(),
            convention: "cartesian".into(),
        };
        assert!(run(args).is_ok());
    }
}
