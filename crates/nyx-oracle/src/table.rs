//! The draw flow shared by the crystal ball and tarot.
//!
//! A draw goes: re-entrancy guard, enabled check, cooldown check, weighted
//! pick (plus orientation for cards), a timed reveal, then the result is
//! recorded into history and the cooldown is armed. Only one draw may be
//! in flight at a time; a second `begin` during the reveal is a no-op.

use nyx_core::{Catalog, CategoryStats, CooldownGate, DrawResult, HistoryBuffer, RandomSource};

use crate::config::{FeatureConfig, OracleConfig};
use crate::crystal::crystal_ball_catalog;
use crate::error::OracleResult;
use crate::sequence::{Sequencer, Step};
use crate::tarot::{draw_card, tarot_catalog};

/// Which divination a table runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Divination {
    /// Weighted effects with a cooldown.
    CrystalBall,
    /// Major arcana draws, upright or reversed.
    Tarot,
}

impl std::fmt::Display for Divination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CrystalBall => write!(f, "Crystal Ball"),
            Self::Tarot => write!(f, "Tarot"),
        }
    }
}

/// What happened when a draw was requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BeginOutcome {
    /// The draw is underway and reveals at `reveal_at`.
    Started {
        /// Time the result becomes visible.
        reveal_at: u64,
    },
    /// Another draw is still revealing; nothing changed.
    Busy,
    /// The divination is switched off.
    Disabled,
    /// The cooldown has not expired yet.
    CoolingDown {
        /// Time left until the next draw is allowed.
        remaining_ms: u64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RevealStep {
    Reveal,
}

#[derive(Debug)]
struct InFlight {
    sequence: Sequencer<RevealStep>,
    result: DrawResult,
}

/// A catalog plus the draw flow around it.
#[derive(Debug)]
pub struct DivinationTable {
    kind: Divination,
    catalog: Catalog,
    feature: FeatureConfig,
    reveal_delay_ms: u64,
    cooldown: CooldownGate,
    history: HistoryBuffer<DrawResult>,
    in_flight: Option<InFlight>,
}

impl DivinationTable {
    /// Create a table over any catalog.
    pub fn new(
        kind: Divination,
        catalog: Catalog,
        feature: FeatureConfig,
        reveal_delay_ms: u64,
        history_cap: usize,
    ) -> Self {
        Self {
            kind,
            catalog,
            feature,
            reveal_delay_ms,
            cooldown: CooldownGate::new(),
            history: HistoryBuffer::new(history_cap),
            in_flight: None,
        }
    }

    /// The built-in crystal ball.
    pub fn crystal_ball(config: &OracleConfig) -> OracleResult<Self> {
        Ok(Self::new(
            Divination::CrystalBall,
            crystal_ball_catalog()?,
            config.crystal.clone(),
            config.reveal_delay_ms,
            config.history_cap,
        ))
    }

    /// The built-in tarot deck.
    pub fn tarot(config: &OracleConfig) -> OracleResult<Self> {
        Ok(Self::new(
            Divination::Tarot,
            tarot_catalog()?,
            config.tarot.clone(),
            config.reveal_delay_ms,
            config.history_cap,
        ))
    }

    /// Which divination this is.
    pub fn kind(&self) -> Divination {
        self.kind
    }

    /// The catalog drawn from.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Current feature settings.
    pub fn feature(&self) -> &FeatureConfig {
        &self.feature
    }

    /// Replace feature settings. An armed cooldown keeps its expiry.
    pub fn set_feature(&mut self, feature: FeatureConfig) {
        self.feature = feature;
    }

    /// Recent reveals, newest-first.
    pub fn history(&self) -> &HistoryBuffer<DrawResult> {
        &self.history
    }

    /// The cooldown gate.
    pub fn cooldown(&self) -> &CooldownGate {
        &self.cooldown
    }

    /// Time left on the cooldown; zero when the feature has none.
    pub fn remaining_ms(&self, now: u64) -> u64 {
        if self.feature.cooldown_ms.is_some() {
            self.cooldown.remaining_ms(now)
        } else {
            0
        }
    }

    /// Whether a draw is currently revealing.
    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    /// When the in-flight draw reveals.
    pub fn reveal_at(&self) -> Option<u64> {
        self.in_flight
            .as_ref()
            .and_then(|f| f.sequence.next_due_at())
    }

    /// Per-category weight and entry counts.
    pub fn pool_stats(&self) -> Vec<CategoryStats> {
        self.catalog.pool_stats()
    }

    /// Draw immediately, without the guard, cooldown, reveal, or history.
    pub fn draw(&self, now: u64, rng: &mut dyn RandomSource) -> DrawResult {
        match self.feature.reversal_chance {
            Some(chance) => draw_card(&self.catalog, chance, rng, now),
            None => DrawResult::new(self.catalog.draw(rng).clone(), now),
        }
    }

    /// Start a draw. The result is picked now and revealed after the delay.
    pub fn begin(&mut self, now: u64, rng: &mut dyn RandomSource) -> BeginOutcome {
        if self.in_flight.is_some() {
            tracing::debug!(divination = %self.kind, "draw already in progress");
            return BeginOutcome::Busy;
        }
        if !self.feature.enabled {
            return BeginOutcome::Disabled;
        }
        if self.feature.cooldown_ms.is_some() && !self.cooldown.can_act(now) {
            let remaining_ms = self.cooldown.remaining_ms(now);
            tracing::debug!(divination = %self.kind, remaining_ms, "draw blocked by cooldown");
            return BeginOutcome::CoolingDown { remaining_ms };
        }

        let result = self.draw(now, rng);
        let reveal_at = now.saturating_add(self.reveal_delay_ms);
        tracing::debug!(
            divination = %self.kind,
            entry = %result.entry.id,
            reveal_at,
            "draw started"
        );
        self.in_flight = Some(InFlight {
            sequence: Sequencer::start(now, [Step::new(self.reveal_delay_ms, RevealStep::Reveal)]),
            result,
        });
        BeginOutcome::Started { reveal_at }
    }

    /// Advance the reveal. Returns the result once, when it is revealed.
    pub fn poll(&mut self, now: u64) -> Option<DrawResult> {
        let flight = self.in_flight.as_mut()?;
        if !flight.sequence.due(now).contains(&RevealStep::Reveal) {
            return None;
        }
        let flight = self.in_flight.take()?;
        let result = flight.result;
        self.history.push(result.clone());
        if let Some(duration) = self.feature.cooldown_ms {
            self.cooldown.arm(now, duration);
        }
        tracing::debug!(divination = %self.kind, entry = %result.entry.id, "draw revealed");
        Some(result)
    }

    /// Abandon an in-flight draw. Nothing is recorded and no cooldown is
    /// armed. Returns whether a draw was dropped.
    pub fn cancel(&mut self) -> bool {
        match self.in_flight.take() {
            Some(_) => {
                tracing::debug!(divination = %self.kind, "draw cancelled");
                true
            }
            None => false,
        }
    }

    /// Forget all recorded draws.
    pub fn clear_history(&mut self) {
        self.history.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nyx_core::ScriptedRandom;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn crystal() -> DivinationTable {
        DivinationTable::crystal_ball(&OracleConfig::default()).unwrap()
    }

    fn tarot() -> DivinationTable {
        DivinationTable::tarot(&OracleConfig::default()).unwrap()
    }

    #[test]
    fn begin_then_reveal_records_history() {
        let mut table = crystal();
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            table.begin(0, &mut rng),
            BeginOutcome::Started { reveal_at: 1500 }
        );
        assert!(table.is_busy());
        assert_eq!(table.poll(1499), None);
        let result = table.poll(1500).unwrap();
        assert!(!table.is_busy());
        assert_eq!(table.history().len(), 1);
        assert_eq!(table.history().latest(), Some(&result));
        assert_eq!(result.timestamp_ms, 0);
        assert_eq!(table.poll(5000), None);
    }

    #[test]
    fn double_begin_appends_once() {
        let mut table = crystal();
        let mut rng = StdRng::seed_from_u64(2);
        table.begin(0, &mut rng);
        assert_eq!(table.begin(10, &mut rng), BeginOutcome::Busy);
        assert!(table.poll(1500).is_some());
        assert_eq!(table.history().len(), 1);
    }

    #[test]
    fn crystal_cooldown_armed_at_reveal() {
        let mut table = crystal();
        let mut rng = StdRng::seed_from_u64(3);
        table.begin(0, &mut rng);
        table.poll(1500);
        assert_eq!(
            table.begin(31_500, &mut rng),
            BeginOutcome::CoolingDown {
                remaining_ms: 30_000
            }
        );
        assert_eq!(table.remaining_ms(61_499), 1);
        assert_eq!(
            table.begin(61_500, &mut rng),
            BeginOutcome::Started { reveal_at: 63_000 }
        );
    }

    #[test]
    fn tarot_has_no_cooldown_by_default() {
        let mut table = tarot();
        let mut rng = StdRng::seed_from_u64(4);
        for i in 0..7u64 {
            let now = i * 1500;
            assert!(matches!(
                table.begin(now, &mut rng),
                BeginOutcome::Started { .. }
            ));
            assert!(table.poll(now + 1500).is_some());
        }
        assert_eq!(table.history().len(), 5);
        assert_eq!(table.remaining_ms(0), 0);
    }

    #[test]
    fn tarot_cooldown_is_configurable() {
        let config = OracleConfig::default()
            .with_tarot(crate::config::FeatureConfig::tarot().with_cooldown(Some(10_000)));
        let mut table = DivinationTable::tarot(&config).unwrap();
        let mut rng = StdRng::seed_from_u64(5);
        table.begin(0, &mut rng);
        table.poll(1500);
        assert!(matches!(
            table.begin(2000, &mut rng),
            BeginOutcome::CoolingDown { .. }
        ));
    }

    #[test]
    fn disabled_feature_refuses() {
        let mut table = crystal();
        let off = table.feature().clone().with_enabled(false);
        table.set_feature(off);
        let mut rng = StdRng::seed_from_u64(6);
        assert_eq!(table.begin(0, &mut rng), BeginOutcome::Disabled);
        assert!(!table.is_busy());
    }

    #[test]
    fn cancel_clears_guard_without_recording() {
        let mut table = crystal();
        let mut rng = StdRng::seed_from_u64(7);
        table.begin(0, &mut rng);
        assert!(table.cancel());
        assert!(!table.cancel());
        assert_eq!(table.poll(10_000), None);
        assert!(table.history().is_empty());
        assert!(matches!(table.begin(1, &mut rng), BeginOutcome::Started { .. }));
    }

    #[test]
    fn crystal_draw_has_no_orientation() {
        let table = crystal();
        let mut rng = StdRng::seed_from_u64(8);
        for _ in 0..50 {
            assert_eq!(table.draw(0, &mut rng).reversed, None);
        }
    }

    #[test]
    fn tarot_draw_reports_orientation() {
        let table = tarot();
        // First value picks the only category, second the card, third the orientation.
        let mut rng = ScriptedRandom::new([0.0, 0.0, 0.1]);
        let result = table.draw(0, &mut rng);
        assert_eq!(result.entry.id, "the_fool");
        assert_eq!(result.reversed, Some(true));
        let mut rng = ScriptedRandom::new([0.0, 0.99, 0.9]);
        let result = table.draw(0, &mut rng);
        assert_eq!(result.entry.id, "the_world");
        assert_eq!(result.reversed, Some(false));
    }

    #[test]
    fn zero_reveal_delay_reveals_on_first_poll() {
        let config = OracleConfig::default().with_reveal_delay(0);
        let mut table = DivinationTable::tarot(&config).unwrap();
        let mut rng = StdRng::seed_from_u64(9);
        assert_eq!(table.begin(100, &mut rng), BeginOutcome::Started { reveal_at: 100 });
        assert!(table.poll(100).is_some());
    }
}
