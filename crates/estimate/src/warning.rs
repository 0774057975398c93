//! Non-fatal conditions reported alongside an estimate.

use std::fmt;

/// A condition that did not stop the estimation but may affect the result.
///
/// Every warning attached to a [`crate::DirspecOutput`] has also been logged
/// with `tracing::warn!`.
#[derive(Clone, Debug, PartialEq)]
pub enum EstimationWarning {
    /// The dispersion solver hit its iteration cap; the best estimate was
    /// used.
    WavenumberNotConverged {
        /// Frequency of the affected bin (Hz).
        frequency: f64,
    },
    /// The output grid lost more than 2 % of the significant wave height.
    GridTooCoarse {
        /// Hsig of the native estimate.
        hsig_in: f64,
        /// Hsig after resampling.
        hsig_out: f64,
    },
    /// A requested parameter was outside its usable range and was replaced.
    ParameterClamped {
        /// Name of the parameter.
        parameter: &'static str,
        /// Value that was asked for.
        requested: usize,
        /// Value that was used.
        used: usize,
    },
    /// The entropy fit diverged at `order`; the previous order (or an
    /// isotropic distribution) was kept.
    EntropyFitAbandoned {
        /// Frequency of the affected bin (Hz).
        frequency: f64,
        /// Model order that failed.
        order: usize,
    },
}

impl fmt::Display for EstimationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WavenumberNotConverged { frequency } => {
                write!(f, "wavenumber did not converge at {frequency} Hz")
            }
            Self::GridTooCoarse { hsig_in, hsig_out } => write!(
                f,
                "output grid too coarse: Hsig {hsig_in:.4} m became {hsig_out:.4} m"
            ),
            Self::ParameterClamped {
                parameter,
                requested,
                used,
            } => write!(f, "{parameter} {requested} too small, using {used}"),
            Self::EntropyFitAbandoned { frequency, order } => write!(
                f,
                "entropy fit abandoned at order {order} for {frequency} Hz"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_clamped() {
        let w = EstimationWarning::ParameterClamped {
            parameter: "fft_length",
            requested: 16,
            used: 64,
        };
        assert_eq!(w.to_string(), "fft_length 16 too small, using 64");
    }

    #[test]
    fn display_coarse() {
        let w = EstimationWarning::GridTooCoarse {
            hsig_in: 1.0,
            hsig_out: 0.9,
        };
        assert_eq!(
            w.to_string(),
            "output grid too coarse: Hsig 1.0000 m became 0.9000 m"
        );
    }

    #[test]
    fn display_abandoned() {
        let w = EstimationWarning::EntropyFitAbandoned {
            frequency: 0.1,
            order: 3,
        };
        assert_eq!(w.to_string(), "entropy fit abandoned at order 3 for 0.1 Hz");
    }
}
