//! The outcome of a single draw.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::DrawEntry;

/// One draw: the entry picked, its category, when, and for cards whether
/// it came up reversed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawResult {
    /// The drawn entry.
    pub entry: DrawEntry,
    /// Category the entry was drawn from.
    pub category_id: String,
    /// Draw time in epoch milliseconds.
    pub timestamp_ms: u64,
    /// Orientation for card draws; `None` for draws without one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reversed: Option<bool>,
}

impl DrawResult {
    /// Record a draw of `entry` at `timestamp_ms`.
    pub fn new(entry: DrawEntry, timestamp_ms: u64) -> Self {
        Self {
            category_id: entry.category_id.clone(),
            entry,
            timestamp_ms,
            reversed: None,
        }
    }

    /// Set the orientation.
    pub fn with_orientation(mut self, reversed: bool) -> Self {
        self.reversed = Some(reversed);
        self
    }

    /// Whether the draw came up reversed.
    pub fn is_reversed(&self) -> bool {
        self.reversed.unwrap_or(false)
    }

    /// Draw time as a UTC datetime.
    pub fn drawn_at(&self) -> Option<DateTime<Utc>> {
        i64::try_from(self.timestamp_ms)
            .ok()
            .and_then(DateTime::from_timestamp_millis)
    }

    /// Text for the host conversation, reflecting the orientation.
    pub fn injection_text(&self) -> String {
        match (self.reversed, &self.entry.reversed_text) {
            (Some(true), Some(reading)) => format!(
                "{} (reversed): {reading}",
                self.entry.display_text
            ),
            (Some(true), None) => format!("{} (reversed)", self.entry.injection_text),
            _ => self.entry.injection_text.clone(),
        }
    }
}

impl std::fmt::Display for DrawResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_reversed() {
            write!(f, "{} (reversed)", self.entry.display_text)
        } else {
            write!(f, "{}", self.entry.display_text)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card() -> DrawEntry {
        DrawEntry::new(
            "the_tower",
            "major_arcana",
            "The Tower",
            "Lightning splits the crown.",
            "Sudden upheaval shakes the scene.",
        )
        .with_reversed("Disaster narrowly averted.")
    }

    #[test]
    fn category_copied_from_entry() {
        let r = DrawResult::new(card(), 1_000);
        assert_eq!(r.category_id, "major_arcana");
        assert_eq!(r.reversed, None);
        assert!(!r.is_reversed());
    }

    #[test]
    fn injection_follows_orientation() {
        let upright = DrawResult::new(card(), 0).with_orientation(false);
        assert_eq!(upright.injection_text(), "Sudden upheaval shakes the scene.");
        let reversed = DrawResult::new(card(), 0).with_orientation(true);
        assert_eq!(
            reversed.injection_text(),
            "The Tower (reversed): Disaster narrowly averted."
        );
        let mut plain = card();
        plain.reversed_text = None;
        let reversed = DrawResult::new(plain, 0).with_orientation(true);
        assert_eq!(
            reversed.injection_text(),
            "Sudden upheaval shakes the scene. (reversed)"
        );
    }

    #[test]
    fn display_marks_reversal() {
        assert_eq!(DrawResult::new(card(), 0).to_string(), "The Tower");
        assert_eq!(
            DrawResult::new(card(), 0).with_orientation(true).to_string(),
            "The Tower (reversed)"
        );
    }

    #[test]
    fn drawn_at_converts_millis() {
        let r = DrawResult::new(card(), 1_700_000_000_000);
        assert_eq!(r.drawn_at().unwrap().timestamp(), 1_700_000_000);
    }

    #[test]
    fn round_trip_serde() {
        let r = DrawResult::new(card(), 42).with_orientation(true);
        let json = serde_json::to_string(&r).unwrap();
        let r2: DrawResult = serde_json::from_str(&json).unwrap();
        assert_eq!(r2, r);
    }
}
