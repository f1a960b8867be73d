//! Weighted draw engine for the Nyx companion.
//!
//! Provides the effect catalog (weighted categories partitioning draw
//! entries), the two-stage weighted selector, the orientation roll used for
//! reversed cards, a wall-clock cooldown gate, and a bounded newest-first
//! history of draws. Randomness and time are injected through the
//! [`RandomSource`] and [`Clock`] seams so every draw can be replayed.

pub mod catalog;
pub mod clock;
pub mod cooldown;
pub mod error;
pub mod history;
pub mod orientation;
pub mod random;
pub mod result;
pub mod select;

pub use catalog::{Catalog, Category, CategoryStats, DrawEntry};
pub use clock::{Clock, ManualClock, SystemClock};
pub use cooldown::CooldownGate;
pub use error::{CoreError, CoreResult};
pub use history::HistoryBuffer;
pub use orientation::is_reversed;
pub use random::{RandomSource, ScriptedRandom};
pub use result::DrawResult;
pub use select::{select_category, select_entry};
