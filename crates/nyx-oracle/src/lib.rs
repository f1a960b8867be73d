//! Crystal ball, tarot, and ouija divinations for the Nyx companion.
//!
//! Each divination wraps a validated [`nyx_core::Catalog`] in a
//! [`DivinationTable`] that runs the draw flow: cooldown check, weighted
//! pick, a timed reveal played through a [`Sequencer`], then history and
//! cooldown bookkeeping. The ouija board layers a question, a weighted
//! answer, and a planchette path on the same pieces.

pub mod config;
pub mod crystal;
pub mod error;
pub mod ouija;
pub mod sequence;
pub mod table;
pub mod tarot;

pub use config::{FeatureConfig, OracleConfig, OuijaConfig};
pub use error::{OracleError, OracleResult};
pub use ouija::{ConsultOutcome, OuijaBoard, OuijaEvent, OuijaReading, Planchette};
pub use sequence::{Sequencer, Step};
pub use table::{BeginOutcome, Divination, DivinationTable};
