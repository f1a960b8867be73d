//! Independent binary variant roll (upright or reversed).

use crate::random::RandomSource;

/// Default chance, in percent, that a card lands reversed.
pub const DEFAULT_REVERSAL_CHANCE: f64 = 50.0;

/// Roll whether a draw is reversed.
///
/// Draws a uniform value in `[0, 100)` and compares it against
/// `chance_percent`, which is clamped to `[0, 100]`. A NaN chance is
/// treated as zero.
pub fn is_reversed(chance_percent: f64, rng: &mut dyn RandomSource) -> bool {
    let chance = if chance_percent.is_nan() {
        0.0
    } else {
        chance_percent.clamp(0.0, 100.0)
    };
    rng.next_f64() * 100.0 < chance
}
