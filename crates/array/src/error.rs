//! Error types for the nereus-array crate.

/// Error type for all fallible operations in the nereus-array crate.
///
/// Every variant is a structural validation failure detected before any
/// spectral estimation starts, and names the offending parameter.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ArrayError {
    /// Returned when the array has fewer instruments than required.
    #[error("instrument array needs at least {min} instruments, got {n}")]
    TooFewInstruments {
        /// Number of instruments provided.
        n: usize,
        /// Minimum number of instruments required.
        min: usize,
    },

    /// Returned when the water depth is not finite and positive.
    #[error("invalid depth: {0} (must be finite and > 0)")]
    InvalidDepth(f64),

    /// Returned when the sample rate is not finite and positive.
    #[error("invalid sample rate: {0} (must be finite and > 0)")]
    InvalidSampleRate(f64),

    /// Returned when an instrument position has a NaN or infinite coordinate.
    #[error("instrument {index} has a non-finite position")]
    NonFinitePosition {
        /// Index of the offending instrument.
        index: usize,
    },

    /// Returned when a depth-attenuated sensor sits outside the water column.
    #[error("instrument {index} at z={z} lies outside the water column [0, {depth}]")]
    OutsideWaterColumn {
        /// Index of the offending instrument.
        index: usize,
        /// Height of the sensor above the seabed.
        z: f64,
        /// Water depth.
        depth: f64,
    },

    /// Returned when an instrument type name is not recognised.
    #[error("unsupported instrument type: {0}")]
    UnsupportedInstrument(String),

    /// Returned when a time-series block has no channels.
    #[error("time-series block has no channels")]
    EmptyBlock,

    /// Returned when a channel is shorter than the minimum length.
    #[error("series too short: got {len} samples, need at least {min}")]
    SeriesTooShort {
        /// Number of samples provided.
        len: usize,
        /// Minimum number of samples required.
        min: usize,
    },

    /// Returned when channels of a block differ in length.
    #[error("channel {channel} has {len} samples, expected {expected}")]
    ChannelLengthMismatch {
        /// Index of the offending channel.
        channel: usize,
        /// Length of the offending channel.
        len: usize,
        /// Length of the first channel.
        expected: usize,
    },

    /// Returned when a sample-major row has the wrong number of columns.
    #[error("row {row} has {len} columns, expected {expected}")]
    RaggedRow {
        /// Index of the offending row.
        row: usize,
        /// Number of columns in the offending row.
        len: usize,
        /// Number of columns in the first row.
        expected: usize,
    },

    /// Returned when a sample is NaN or infinite.
    #[error("channel {channel} contains a non-finite value at sample {sample}")]
    NonFiniteSample {
        /// Index of the offending channel.
        channel: usize,
        /// Index of the first offending sample.
        sample: usize,
    },

    /// Returned when the number of data channels differs from the number of
    /// instruments.
    #[error("block has {channels} channels but the array has {instruments} instruments")]
    ChannelCountMismatch {
        /// Number of data channels.
        channels: usize,
        /// Number of instruments.
        instruments: usize,
    },

    /// Returned when frequency and wavenumber slices differ in length.
    #[error("{frequencies} frequencies but {wavenumbers} wavenumbers")]
    WavenumberCountMismatch {
        /// Number of frequencies.
        frequencies: usize,
        /// Number of wavenumbers.
        wavenumbers: usize,
    },
}
