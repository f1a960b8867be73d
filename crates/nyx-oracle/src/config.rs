//! Configuration for divinations.

use nyx_core::cooldown::DEFAULT_CRYSTAL_COOLDOWN_MS;
use nyx_core::history::DEFAULT_HISTORY_CAP;
use nyx_core::orientation::DEFAULT_REVERSAL_CHANCE;

/// Per-divination switches.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureConfig {
    /// Whether the divination can be used at all.
    pub enabled: bool,
    /// Cooldown armed after each reveal. `None` means no cooldown.
    pub cooldown_ms: Option<u64>,
    /// Chance in percent (0-100) that a draw is reversed. `None` means
    /// draws have no orientation.
    pub reversal_chance: Option<f64>,
}

impl FeatureConfig {
    /// Crystal ball defaults: one-minute cooldown, no orientation.
    pub fn crystal_ball() -> Self {
        Self {
            enabled: true,
            cooldown_ms: Some(DEFAULT_CRYSTAL_COOLDOWN_MS),
            reversal_chance: None,
        }
    }

    /// Tarot defaults: no cooldown, even chance of reversal.
    pub fn tarot() -> Self {
        Self {
            enabled: true,
            cooldown_ms: None,
            reversal_chance: Some(DEFAULT_REVERSAL_CHANCE),
        }
    }

    /// Enable or disable the divination.
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Set or remove the cooldown.
    pub fn with_cooldown(mut self, cooldown_ms: Option<u64>) -> Self {
        self.cooldown_ms = cooldown_ms;
        self
    }

    /// Set the reversal chance (clamped to 0-100).
    pub fn with_reversal_chance(mut self, chance: f64) -> Self {
        self.reversal_chance = Some(if chance.is_nan() {
            0.0
        } else {
            chance.clamp(0.0, 100.0)
        });
        self
    }
}

/// Timings and limits for ouija consultations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OuijaConfig {
    /// Pause before the planchette starts moving.
    pub initial_hold_ms: u64,
    /// Time per planchette move.
    pub move_ms: u64,
    /// Pause on the last position before the reading completes.
    pub final_hold_ms: u64,
    /// Longest accepted question, in characters.
    pub max_question_len: usize,
}

impl Default for OuijaConfig {
    fn default() -> Self {
        Self {
            initial_hold_ms: 1500,
            move_ms: 850,
            final_hold_ms: 1000,
            max_question_len: 200,
        }
    }
}

/// Configuration shared by every divination in a panel.
#[derive(Debug, Clone)]
pub struct OracleConfig {
    /// RNG seed for reproducible draws.
    pub seed: u64,
    /// Dramatic pause between starting a draw and revealing it.
    pub reveal_delay_ms: u64,
    /// Number of draws kept in each history.
    pub history_cap: usize,
    /// Crystal ball settings.
    pub crystal: FeatureConfig,
    /// Tarot settings.
    pub tarot: FeatureConfig,
    /// Ouija settings.
    pub ouija: OuijaConfig,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            reveal_delay_ms: 1500,
            history_cap: DEFAULT_HISTORY_CAP,
            crystal: FeatureConfig::crystal_ball(),
            tarot: FeatureConfig::tarot(),
            ouija: OuijaConfig::default(),
        }
    }
}

impl OracleConfig {
    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the reveal delay.
    pub fn with_reveal_delay(mut self, ms: u64) -> Self {
        self.reveal_delay_ms = ms;
        self
    }

    /// Set the history cap (at least 1).
    pub fn with_history_cap(mut self, cap: usize) -> Self {
        self.history_cap = cap.max(1);
        self
    }

    /// Replace the crystal ball settings.
    pub fn with_crystal(mut self, feature: FeatureConfig) -> Self {
        self.crystal = feature;
        self
    }

    /// Replace the tarot settings.
    pub fn with_tarot(mut self, feature: FeatureConfig) -> Self {
        self.tarot = feature;
        self
    }

    /// Replace the ouija settings.
    pub fn with_ouija(mut self, ouija: OuijaConfig) -> Self {
        self.ouija = ouija;
        self
    }
}
