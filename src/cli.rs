use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Nereus directional wave spectrum estimator.
#[derive(Parser)]
#[command(
    name = "nereus",
    version,
    about = "Directional wave spectra from instrument arrays"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Estimate a directional spectrum from array records.
    Estimate(EstimateArgs),
    /// Print summary statistics of a spectrum file.
    Info(InfoArgs),
}

/// Arguments for the `estimate` subcommand.
#[derive(clap::Args)]
pub struct EstimateArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "nereus.toml")]
    pub config: PathBuf,

    /// Override the data file named in the config.
    #[arg(short, long)]
    pub data: Option<PathBuf>,

    /// Override the output spectrum path from config.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the `info` subcommand.
#[derive(clap::Args)]
pub struct InfoArgs {
    /// Spectrum file in DIWASP text format.
    pub path: PathBuf,

    /// Frequency unit of the file (hz or rad/s).
    #[arg(long, default_value = "hz")]
    pub frequency_unit: String,

    /// Direction unit of the file (deg or rad).
    #[arg(long, default_value = "deg")]
    pub direction_unit: String,

    /// Direction convention of the file (cartesian or nautical).
    #[arg(long, default_value = "cartesian")]
    pub convention: String,
}
