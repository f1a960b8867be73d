//! The crystal ball tab.

use nyx_oracle::{DivinationTable, OracleConfig, OracleResult};

use super::divination::{DivinationStyle, DivinationTab};
use crate::events::{Control, Feature};

/// Tab id.
pub const TAB_ID: &str = "crystal";

static STYLE: DivinationStyle = DivinationStyle {
    id: TAB_ID,
    title: "Crystal Ball",
    control: Control::Gaze,
    feature: Feature::Crystal,
    prompt: "Gaze into the crystal ball.",
    revealing: "The mists begin to swirl...",
    resting: "The mists are still settling.",
    show_odds: true,
};

/// Build the crystal ball tab from the built-in effects.
pub fn crystal_tab(config: &OracleConfig) -> OracleResult<DivinationTab> {
    Ok(DivinationTab::new(&STYLE, DivinationTable::crystal_ball(config)?))
}
