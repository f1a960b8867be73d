//! The settings tab: theme, feature switches, and tarot odds.

use super::{Feedback, Tab, TabContent, TabContext, TabResponse};
use crate::events::{Control, Feature, PanelEvent, SubscriptionScope};
use crate::settings::{PanelSettings, THEMES};

/// Tab id.
pub const TAB_ID: &str = "settings";

const FEATURES: [Feature; 4] = [
    Feature::Crystal,
    Feature::Tarot,
    Feature::Ouija,
    Feature::Injection,
];

/// Edits [`PanelSettings`]. Holds no state of its own.
#[derive(Debug, Default)]
pub struct SettingsTab;

impl Tab for SettingsTab {
    fn id(&self) -> &str {
        TAB_ID
    }

    fn title(&self) -> &str {
        "Settings"
    }

    fn content(&self, settings: &PanelSettings, _now: u64) -> TabContent {
        let themes = THEMES.iter().map(|t| {
            let mark = if *t == settings.theme { "*" } else { " " };
            format!("  [{mark}] {t}")
        });
        let features = FEATURES.iter().map(|f| {
            let state = if settings.features.get(*f) { "on" } else { "off" };
            format!("  {f}: {state}")
        });
        TabContent::new(TAB_ID, "Settings")
            .line("Theme:")
            .lines(themes)
            .line("Features:")
            .lines(features)
            .line(format!(
                "Reversed cards: {}%",
                settings.tarot_reversal_chance.min(100)
            ))
            .control(Control::SelectTheme)
            .control(Control::ToggleFeature)
            .control(Control::SetReversalChance)
    }

    fn attach(&mut self, scope: &mut SubscriptionScope<'_>) {
        scope.listen(Control::SelectTheme);
        scope.listen(Control::ToggleFeature);
        scope.listen(Control::SetReversalChance);
    }

    fn handle(&mut self, event: &PanelEvent, ctx: &mut TabContext<'_>) -> TabResponse {
        match event {
            PanelEvent::SelectTheme(theme) => {
                if !PanelSettings::is_known_theme(theme) {
                    return TabResponse::feedback(Feedback::Warning(format!(
                        "Unknown theme: {theme}"
                    )));
                }
                if ctx.settings.theme == *theme {
                    return TabResponse::none();
                }
                ctx.settings.theme = theme.clone();
                changed()
            }
            PanelEvent::ToggleFeature(feature) => {
                ctx.settings.features.toggle(*feature);
                changed()
            }
            PanelEvent::SetReversalChance(chance) => {
                ctx.settings.tarot_reversal_chance = (*chance).min(100);
                changed()
            }
            _ => TabResponse::none(),
        }
    }
}

fn changed() -> TabResponse {
    TabResponse {
        settings_changed: true,
        rerender: true,
        ..TabResponse::default()
    }
}
