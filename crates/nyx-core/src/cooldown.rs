//! Time-gated re-entry for repeatable actions.
//!
//! The gate holds a single expiry timestamp. There is no timer: whether an
//! action is allowed is always a comparison against the caller's `now`, so
//! the gate clears itself as time passes.

use serde::{Deserialize, Serialize};

/// Default cooldown for the crystal ball, in milliseconds.
pub const DEFAULT_CRYSTAL_COOLDOWN_MS: u64 = 60_000;

/// A single expiring timestamp blocking an action until it passes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CooldownGate {
    expires_at: Option<u64>,
}

impl CooldownGate {
    /// A gate that is open.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the action is permitted at `now`.
    pub fn can_act(&self, now: u64) -> bool {
        self.expires_at.is_none_or(|at| now >= at)
    }

    /// Block the action until `now + duration_ms`.
    pub fn arm(&mut self, now: u64, duration_ms: u64) {
        self.expires_at = Some(now.saturating_add(duration_ms));
    }

    /// Milliseconds left before the action is permitted again.
    pub fn remaining_ms(&self, now: u64) -> u64 {
        self.expires_at.map_or(0, |at| at.saturating_sub(now))
    }

    /// The expiry timestamp, if the gate was ever armed.
    pub fn expires_at(&self) -> Option<u64> {
        self.expires_at
    }
}
