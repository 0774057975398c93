//! Error types for the nereus-estimate crate.

use nereus_array::ArrayError;
use nereus_csd::CsdError;
use nereus_spectrum::SpectrumError;

/// Error type for configuration and per-frequency estimation failures.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EstimateError {
    /// Returned when fewer than three channels carry usable energy at a
    /// frequency.
    #[error(
        "underdetermined estimation at {frequency} Hz: {valid} valid channels, need at least 3"
    )]
    UnderdeterminedEstimation {
        /// Frequency of the failing bin (Hz).
        frequency: f64,
        /// Number of channels that passed the validity check.
        valid: usize,
    },

    /// Returned when no cross-spectral bin lies inside the output frequency
    /// range.
    #[error("no spectral bins between {low} and {high} Hz")]
    EmptyFrequencyBand {
        /// Lowest output frequency (Hz).
        low: f64,
        /// Highest output frequency (Hz).
        high: f64,
    },

    /// Returned when a configuration parameter is invalid.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// Description of the problem.
        reason: String,
    },
}

/// Error type for [`crate::dirspec`].
///
/// Each stage's error is wrapped unchanged so callers can match on the
/// stage that failed.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DirspecError {
    /// Array geometry or data block rejected.
    #[error(transparent)]
    Array(#[from] ArrayError),

    /// Cross-spectral estimation failed.
    #[error(transparent)]
    Csd(#[from] CsdError),

    /// Spectrum construction failed.
    #[error(transparent)]
    Spectrum(#[from] SpectrumError),

    /// Configuration or directional estimation failed.
    #[error(transparent)]
    Estimate(#[from] EstimateError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_underdetermined() {
        let err = EstimateError::UnderdeterminedEstimation {
            frequency: 0.25,
            valid: 2,
        };
        assert_eq!(
            err.to_string(),
            "underdetermined estimation at 0.25 Hz: 2 valid channels, need at least 3"
        );
    }

    #[test]
    fn error_empty_band() {
        let err = EstimateError::EmptyFrequencyBand {
            low: 0.01,
            high: 0.02,
        };
        assert_eq!(err.to_string(), "no spectral bins between 0.01 and 0.02 Hz");
    }

    #[test]
    fn error_invalid_config() {
        let err = EstimateError::InvalidConfig {
            reason: "iterations must be at least 1".into(),
        };
        assert_eq!(
            err.to_string(),
            "invalid configuration: iterations must be at least 1"
        );
    }

    #[test]
    fn dirspec_error_is_transparent() {
        let err = DirspecError::from(CsdError::InsufficientData {
            len: 100,
            nfft: 256,
        });
        assert_eq!(
            err.to_string(),
            CsdError::InsufficientData {
                len: 100,
                nfft: 256
            }
            .to_string()
        );
        assert!(matches!(err, DirspecError::Csd(_)));
    }

    #[test]
    fn error_is_std_error() {
        fn assert_impl<T: std::error::Error>() {}
        assert_impl::<EstimateError>();
        assert_impl::<DirspecError>();
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<EstimateError>();
        assert_impl::<DirspecError>();
    }
}
