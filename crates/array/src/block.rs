//! Validated multi-channel time-series block.

use crate::error::ArrayError;

/// Minimum number of samples per channel.
const MIN_SAMPLES: usize = 2;

/// An N-channel, M-sample block of finite measurements.
///
/// Stored channel-major: `channel(i)` is the full record of instrument `i`.
/// Guarantees:
/// - at least one channel
/// - every channel has the same length, at least 2
/// - all values are finite (no NaN or infinity)
#[derive(Clone, Debug)]
pub struct TimeSeriesBlock {
    channels: Vec<Vec<f64>>,
}

impl TimeSeriesBlock {
    /// Creates a block from channel-major data.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`ArrayError::EmptyBlock`] | `channels` is empty |
    /// | [`ArrayError::SeriesTooShort`] | first channel has fewer than 2 samples |
    /// | [`ArrayError::ChannelLengthMismatch`] | channels differ in length |
    /// | [`ArrayError::NonFiniteSample`] | a value is NaN or infinite |
    pub fn new(channels: Vec<Vec<f64>>) -> Result<Self, ArrayError> {
        let expected = channels.first().ok_or(ArrayError::EmptyBlock)?.len();
        if expected < MIN_SAMPLES {
            return Err(ArrayError::SeriesTooShort {
                len: expected,
                min: MIN_SAMPLES,
            });
        }
        for (channel, data) in channels.iter().enumerate() {
            if data.len() != expected {
                return Err(ArrayError::ChannelLengthMismatch {
                    channel,
                    len: data.len(),
                    expected,
                });
            }
            if let Some(sample) = data.iter().position(|v| !v.is_finite()) {
                return Err(ArrayError::NonFiniteSample { channel, sample });
            }
        }
        Ok(Self { channels })
    }

    /// Creates a block from sample-major rows (one row per time step, one
    /// column per channel), as produced by column-oriented text loaders.
    ///
    /// Returns [`ArrayError::RaggedRow`] if rows differ in width, otherwise
    /// the same errors as [`TimeSeriesBlock::new`].
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self, ArrayError> {
        let n_channels = rows.first().map_or(0, Vec::len);
        let mut channels = vec![Vec::with_capacity(rows.len()); n_channels];
        for (row_index, row) in rows.iter().enumerate() {
            if row.len() != n_channels {
                return Err(ArrayError::RaggedRow {
                    row: row_index,
                    len: row.len(),
                    expected: n_channels,
                });
            }
            for (ch, &v) in row.iter().enumerate() {
                channels[ch].push(v);
            }
        }
        Self::new(channels)
    }

    /// Returns the record of channel `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i >= n_channels()`.
    pub fn channel(&self, i: usize) -> &[f64] {
        &self.channels[i]
    }

    /// Returns all channels.
    pub fn channels(&self) -> &[Vec<f64>] {
        &self.channels
    }

    /// Returns the number of channels.
    pub fn n_channels(&self) -> usize {
        self.channels.len()
    }

    /// Returns the number of samples per channel.
    pub fn n_samples(&self) -> usize {
        self.channels.first().map_or(0, Vec::len)
    }
}
