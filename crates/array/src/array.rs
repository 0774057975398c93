//! Validated instrument array.

use crate::block::TimeSeriesBlock;
use crate::error::ArrayError;
use crate::instrument::Instrument;

/// Minimum number of instruments needed to resolve direction.
pub const MIN_INSTRUMENTS: usize = 3;

/// An ordered set of instruments sharing a water depth and sample rate.
///
/// Guarantees, checked by [`InstrumentArray::new`]:
/// - at least [`MIN_INSTRUMENTS`] instruments
/// - finite, positive depth and sample rate
/// - finite positions, with depth-attenuated sensors inside `[0, depth]`
///
/// # Example
///
/// ```
/// use nereus_array::{Instrument, InstrumentArray, InstrumentKind, Position};
///
/// let instruments = vec![
///     Instrument::new(InstrumentKind::Pressure, Position::new(0.0, 0.0, 0.0)),
///     Instrument::new(InstrumentKind::Pressure, Position::new(10.0, 0.0, 0.0)),
///     Instrument::new(InstrumentKind::Pressure, Position::new(5.0, 8.66, 0.0)),
/// ];
/// let array = InstrumentArray::new(instruments, 10.0, 2.0).unwrap();
/// assert_eq!(array.len(), 3);
/// ```
#[derive(Clone, Debug)]
pub struct InstrumentArray {
    instruments: Vec<Instrument>,
    depth: f64,
    sample_rate: f64,
}

impl InstrumentArray {
    /// Creates a new array after validating its geometry.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`ArrayError::TooFewInstruments`] | fewer than [`MIN_INSTRUMENTS`] instruments |
    /// | [`ArrayError::InvalidDepth`] | depth is non-finite or `<= 0` |
    /// | [`ArrayError::InvalidSampleRate`] | sample rate is non-finite or `<= 0` |
    /// | [`ArrayError::NonFinitePosition`] | a coordinate is NaN or infinite |
    /// | [`ArrayError::OutsideWaterColumn`] | a depth-attenuated sensor has `z` outside `[0, depth]` |
    pub fn new(
        instruments: Vec<Instrument>,
        depth: f64,
        sample_rate: f64,
    ) -> Result<Self, ArrayError> {
        if instruments.len() < MIN_INSTRUMENTS {
            return Err(ArrayError::TooFewInstruments {
                n: instruments.len(),
                min: MIN_INSTRUMENTS,
            });
        }
        if !depth.is_finite() || depth <= 0.0 {
            return Err(ArrayError::InvalidDepth(depth));
        }
        if !sample_rate.is_finite() || sample_rate <= 0.0 {
            return Err(ArrayError::InvalidSampleRate(sample_rate));
        }
        for (index, inst) in instruments.iter().enumerate() {
            let p = inst.position();
            if !p.is_finite() {
                return Err(ArrayError::NonFinitePosition { index });
            }
            if inst.kind().is_depth_attenuated() && !(0.0..=depth).contains(&p.z) {
                return Err(ArrayError::OutsideWaterColumn {
                    index,
                    z: p.z,
                    depth,
                });
            }
        }
        Ok(Self {
            instruments,
            depth,
            sample_rate,
        })
    }

    /// Returns the instruments in channel order.
    pub fn instruments(&self) -> &[Instrument] {
        &self.instruments
    }

    /// Returns the water depth (m).
    pub fn depth(&self) -> f64 {
        self.depth
    }

    /// Returns the sample rate (Hz).
    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    /// Returns the number of instruments.
    pub fn len(&self) -> usize {
        self.instruments.len()
    }

    /// Returns `true` if the array has no instruments.
    ///
    /// Note: a valid `InstrumentArray` is never empty.
    pub fn is_empty(&self) -> bool {
        self.instruments.is_empty()
    }

    /// Checks that a data block has one channel per instrument.
    pub fn check_block(&self, block: &TimeSeriesBlock) -> Result<(), ArrayError> {
        if block.n_channels() != self.len() {
            return Err(ArrayError::ChannelCountMismatch {
                channels: block.n_channels(),
                instruments: self.len(),
            });
        }
        Ok(())
    }
}
