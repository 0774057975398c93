use std::path::PathBuf;

use serde::Deserialize;

/// Top-level Nereus configuration.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NereusConfig {
    /// Instrument layout and record settings.
    pub array: ArrayToml,

    /// Output grid.
    #[serde(default)]
    pub grid: GridToml,

    /// Estimation parameters.
    #[serde(default)]
    pub estimation: EstimationToml,

    /// Output spectrum path.
    #[serde(default)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ArrayToml {
    /// Water depth (m).
    pub depth: f64,
    /// Sample rate (Hz).
    pub sample_rate: f64,
    /// Column file with one channel per instrument.
    pub data: PathBuf,
    /// Instruments in column order.
    pub instruments: Vec<InstrumentToml>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InstrumentToml {
    pub kind: String,
    pub x: f64,
    pub y: f64,
    /// Height above the seabed (m).
    #[serde(default)]
    pub z: f64,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GridToml {
    /// Explicit frequencies; overrides the range.
    #[serde(default)]
    pub frequencies: Option<Vec<f64>>,
    #[serde(default = "default_frequency_range")]
    pub frequency_range: [f64; 2],
    #[serde(default = "default_n_frequencies")]
    pub n_frequencies: usize,
    /// Explicit directions; overrides the range.
    #[serde(default)]
    pub directions: Option<Vec<f64>>,
    #[serde(default = "default_direction_range")]
    pub direction_range: [f64; 2],
    #[serde(default = "default_n_directions")]
    pub n_directions: usize,
    #[serde(default = "default_frequency_unit")]
    pub frequency_unit: String,
    #[serde(default = "default_direction_unit")]
    pub direction_unit: String,
    #[serde(default = "default_convention")]
    pub convention: String,
    #[serde(default = "default_x_axis_bearing")]
    pub x_axis_bearing: f64,
}

impl Default for GridToml {
    fn default() -> Self {
        Self {
            frequencies: None,
            frequency_range: default_frequency_range(),
            n_frequencies: default_n_frequencies(),
            directions: None,
            direction_range: default_direction_range(),
            n_directions: default_n_directions(),
            frequency_unit: default_frequency_unit(),
            direction_unit: default_direction_unit(),
            convention: default_convention(),
            x_axis_bearing: default_x_axis_bearing(),
        }
    }
}

fn default_frequency_range() -> [f64; 2] {
    [0.05, 0.5]
}
fn default_n_frequencies() -> usize {
    50
}
fn default_direction_range() -> [f64; 2] {
    [-180.0, 180.0]
}
fn default_n_directions() -> usize {
    73
}
fn default_frequency_unit() -> String {
    "hz".to_string()
}
fn default_direction_unit() -> String {
    "deg".to_string()
}
fn default_convention() -> String {
    "cartesian".to_string()
}
fn default_x_axis_bearing() -> f64 {
    nereus_spectrum::DEFAULT_X_AXIS_BEARING
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EstimationToml {
    #[serde(default = "default_method")]
    pub method: String,
    /// FFT segment length; derived from the sample rate when omitted.
    #[serde(default)]
    pub fft_length: Option<usize>,
    #[serde(default = "default_iterations")]
    pub iterations: usize,
    #[serde(default = "default_resolution")]
    pub resolution: usize,
    #[serde(default = "default_true")]
    pub smoothing: bool,
    #[serde(default = "default_window")]
    pub window: String,
    #[serde(default = "default_overlap")]
    pub overlap: f64,
}

impl Default for EstimationToml {
    fn default() -> Self {
        Self {
            method: default_method(),
            fft_length: None,
            iterations: default_iterations(),
            resolution: default_resolution(),
            smoothing: true,
            window: default_window(),
            overlap: default_overlap(),
        }
    }
}

fn default_method() -> String {
    "imlm".to_string()
}
fn default_iterations() -> usize {
    100
}
fn default_resolution() -> usize {
    180
}
fn default_true() -> bool {
    true
}
fn default_window() -> String {
    "hamming".to_string()
}
fn default_overlap() -> f64 {
    0.5
}
