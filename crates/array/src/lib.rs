//! # nereus-array
//!
//! Instrument array geometry, multi-channel time-series blocks and the
//! transfer-function bank that maps a surface wave onto each instrument's
//! expected response.
//!
//! ## Workflow
//!
//! ```mermaid
//! graph LR
//!     A["Instrument::new(kind, position)"] --> B["InstrumentArray::new(..)?"]
//!     C["TimeSeriesBlock::new(channels)?"] --> D["array.check_block(&block)?"]
//!     B --> D
//!     B -->|"TransferMatrix::build(..)?"| E["TransferMatrix"]
//! ```
//!
//! ## Supported Instruments
//!
//! | Kind | Code | Response |
//! |------|------|----------|
//! | [`InstrumentKind::Elevation`] | `elev` | surface elevation |
//! | [`InstrumentKind::Pressure`] | `pres` | pressure head, depth-attenuated |
//! | [`InstrumentKind::VelocityX`] | `velx` | horizontal orbital velocity along x |
//! | [`InstrumentKind::VelocityY`] | `vely` | horizontal orbital velocity along y |
//! | [`InstrumentKind::VelocityMagnitude`] | `vels` | surface vertical velocity |
//! | [`InstrumentKind::Acceleration`] | `accs` | surface vertical acceleration |
//!
//! Kinds are parsed once with [`std::str::FromStr`]; unknown names are
//! rejected with [`ArrayError::UnsupportedInstrument`] before any estimation
//! work starts.

mod array;
mod block;
mod error;
mod instrument;
mod transfer;

pub use array::{InstrumentArray, MIN_INSTRUMENTS};
pub use block::TimeSeriesBlock;
pub use error::ArrayError;
pub use instrument::{Instrument, InstrumentKind, Position};
pub use transfer::TransferMatrix;
