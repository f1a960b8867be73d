//! The tarot tab.

use nyx_oracle::{DivinationTable, OracleConfig, OracleResult};

use super::divination::{DivinationStyle, DivinationTab};
use crate::events::{Control, Feature};

/// Tab id.
pub const TAB_ID: &str = "tarot";

static STYLE: DivinationStyle = DivinationStyle {
    id: TAB_ID,
    title: "Tarot",
    control: Control::DrawCard,
    feature: Feature::Tarot,
    prompt: "Focus on your question and draw a card.",
    revealing: "Nyx shuffles the deck...",
    resting: "The deck needs a moment to settle.",
    show_odds: false,
};

/// Build the tarot tab from the built-in deck.
pub fn tarot_tab(config: &OracleConfig) -> OracleResult<DivinationTab> {
    Ok(DivinationTab::new(&STYLE, DivinationTable::tarot(config)?))
}
