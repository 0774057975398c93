//! Estimate command: records + TOML config -> DIWASP spectrum file.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{info, info_span};

use nereus_estimate::dirspec;
use nereus_spectrum::write_spectrum;

use crate::cli::EstimateArgs;
use crate::config::NereusConfig;
use crate::convert;
use crate::data::read_columns;
use crate::info_cmd::describe;

/// Output path when neither the CLI nor the config names one.
const DEFAULT_OUTPUT: &str = "nereus.spec";

/// Run the estimation pipeline.
pub fn run(args: EstimateArgs) -> Result<()> {
    let _cmd = info_span!("estimate").entered();
    // 1. Load project TOML
    let toml_str = std::fs::read_to_string(&args.config)
        .with_context(|| format!("failed to read config file: {}", args.config.display()))?;
    let config: NereusConfig =
        toml::from_str(&toml_str).context("failed to parse TOML config")?;

    // 2. Build library inputs
    let array = convert::build_array(&config.array)?;
    let grid = convert::build_grid(&config.grid)?;
    let est_config = convert::build_estimation_config(&config.estimation)?;

    // 3. Read records; relative paths resolve against the config file
    let data_path = args
        .data
        .unwrap_or_else(|| relative_to(&args.config, &config.array.data));
    info!(path = %data_path.display(), "reading records");
    let block = read_columns(&data_path)?;
    info!(
        channels = block.n_channels(),
        samples = block.n_samples(),
        "records loaded"
    );

    // 4. Estimate
    let out = dirspec(&array, &block, &grid, &est_config).context("estimation failed")?;
    info!(
        method = %out.config.method(),
        fft_length = out.config.fft_length(),
        resolution = out.config.resolution(),
        warnings = out.warnings.len(),
        "directional spectrum estimated"
    );
    for line in describe(&out.spectrum) {
        info!("{line}");
    }

    // 5. Write spectrum
    let output = args
        .output
        .or(config.output)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));
    write_spectrum(&output, &out.spectrum)
        .with_context(|| format!("failed to write spectrum: {}", output.display()))?;
    info!(path = %output.display(), "spectrum written");
    Ok(())
}

fn relative_to(config: &std::path::Path, path: &std::path::Path) -> PathBuf {
    match config.parent() {
        Some(dir) if path.is_relative() => dir.join(path),
        _ => path.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn data_path_resolves_against_config_dir() {
        assert_eq!(
            relative_to(Path::new("runs/a/nereus.toml"), Path::new("rec.txt")),
            PathBuf::from("runs/a/rec.txt")
        );
        assert_eq!(
            relative_to(Path::new("runs/nereus.toml"), Path::new("/abs/rec.txt")),
            PathBuf::from("/abs/rec.txt")
        );
    }
}
