//! Error types for the nereus-csd crate.

/// Error type for all fallible operations in the nereus-csd crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CsdError {
    /// Returned when the record is shorter than one FFT segment.
    #[error("insufficient data: {len} samples, need at least {nfft} for one segment")]
    InsufficientData {
        /// Number of samples per channel.
        len: usize,
        /// FFT segment length.
        nfft: usize,
    },

    /// Returned when the FFT length is not a power of two of at least 2.
    #[error("invalid FFT length: {0} (must be a power of two >= 2)")]
    InvalidFftLength(usize),

    /// Returned when the overlap fraction is outside `[0, 1)`.
    #[error("invalid overlap: {0} (must be in [0, 1))")]
    InvalidOverlap(f64),

    /// Returned when the sample rate is not finite and positive.
    #[error("invalid sample rate: {0} (must be finite and > 0)")]
    InvalidSampleRate(f64),

    /// Returned when a window name is not recognised.
    #[error("unknown window: {0}")]
    UnknownWindow(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_insufficient_data() {
        let err = CsdError::InsufficientData {
            len: 100,
            nfft: 256,
        };
        assert_eq!(
            err.to_string(),
            "insufficient data: 100 samples, need at least 256 for one segment"
        );
    }

    #[test]
    fn error_invalid_fft_length() {
        assert_eq!(
            CsdError::InvalidFftLength(100).to_string(),
            "invalid FFT length: 100 (must be a power of two >= 2)"
        );
    }

    #[test]
    fn error_is_std_error() {
        fn assert_impl<T: std::error::Error>() {}
        assert_impl::<CsdError>();
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<CsdError>();
    }
}
