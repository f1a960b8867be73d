//! Shared tab behavior for draw-based divinations.

use nyx_core::DrawResult;
use nyx_oracle::{BeginOutcome, DivinationTable};

use super::{Feedback, Tab, TabContent, TabContext, TabResponse, format_countdown};
use crate::events::{Control, Feature, PanelEvent, SubscriptionScope};
use crate::settings::PanelSettings;

/// Fixed wording and wiring for one divination tab.
#[derive(Debug)]
pub struct DivinationStyle {
    /// Tab id.
    pub id: &'static str,
    /// Tab bar label.
    pub title: &'static str,
    /// The button that starts a draw.
    pub control: Control,
    /// The switch that enables the divination.
    pub feature: Feature,
    /// Shown while idle.
    pub prompt: &'static str,
    /// Shown during the reveal.
    pub revealing: &'static str,
    /// Shown when the cooldown refuses a draw.
    pub resting: &'static str,
    /// Whether the content lists category odds.
    pub show_odds: bool,
}

/// A tab running a [`DivinationTable`].
#[derive(Debug)]
pub struct DivinationTab {
    style: &'static DivinationStyle,
    table: DivinationTable,
}

impl DivinationTab {
    /// Wrap a table.
    pub fn new(style: &'static DivinationStyle, table: DivinationTable) -> Self {
        Self { style, table }
    }

    /// The underlying table.
    pub fn table(&self) -> &DivinationTable {
        &self.table
    }

    fn sync_feature(&mut self, settings: &PanelSettings) {
        let mut feature = self
            .table
            .feature()
            .clone()
            .with_enabled(settings.features.get(self.style.feature));
        if feature.reversal_chance.is_some() {
            feature = feature.with_reversal_chance(settings.reversal_chance());
        }
        self.table.set_feature(feature);
    }

    fn draw(&mut self, ctx: &mut TabContext<'_>) -> TabResponse {
        self.sync_feature(ctx.settings);
        match self.table.begin(ctx.now, ctx.rng) {
            BeginOutcome::Started { .. } => {
                TabResponse::feedback(Feedback::Info(self.style.revealing.to_string()))
            }
            BeginOutcome::Busy => TabResponse::none(),
            BeginOutcome::Disabled => TabResponse::feedback(Feedback::Warning(format!(
                "{} is switched off in settings.",
                self.style.feature
            ))),
            BeginOutcome::CoolingDown { remaining_ms } => {
                TabResponse::feedback(Feedback::Warning(format!(
                    "{} Try again in {}.",
                    self.style.resting,
                    format_countdown(remaining_ms)
                )))
            }
        }
    }

    fn revealed(&self, result: &DrawResult, settings: &PanelSettings) -> TabResponse {
        let injections = if settings.features.inject_results {
            vec![result.injection_text()]
        } else {
            Vec::new()
        };
        TabResponse {
            injections,
            feedback: Some(Feedback::Info(format!(
                "{}: {}",
                self.table.kind(),
                result
            ))),
            settings_changed: false,
            rerender: true,
        }
    }
}

impl Tab for DivinationTab {
    fn id(&self) -> &str {
        self.style.id
    }

    fn title(&self) -> &str {
        self.style.title
    }

    fn content(&self, settings: &PanelSettings, now: u64) -> TabContent {
        let mut content = TabContent::new(self.style.id, self.style.title);

        if !settings.features.get(self.style.feature) {
            return content.line(format!("{} is switched off in settings.", self.style.feature));
        }

        let remaining = self.table.remaining_ms(now);
        content = if self.table.is_busy() {
            content.line(self.style.revealing)
        } else if remaining > 0 {
            content.line(format!(
                "{} Ready in {}.",
                self.style.resting,
                format_countdown(remaining)
            ))
        } else {
            content.line(self.style.prompt).control(self.style.control)
        };

        if let Some(latest) = self.table.history().latest() {
            content = content
                .line(format!("Latest: {latest}"))
                .line(latest.entry.flavor_text.clone());
        }

        if self.table.history().len() > 1 {
            content = content.line("Recent:").lines(
                self.table
                    .history()
                    .iter()
                    .skip(1)
                    .map(|r| format!("  {r}")),
            );
        }
        if !self.table.history().is_empty() {
            content = content.control(Control::ClearHistory);
        }

        if self.style.show_odds {
            content = content.line("Odds:").lines(self.table.pool_stats().into_iter().map(|s| {
                format!(
                    "  {} {:.0}% ({} {})",
                    s.id,
                    s.share * 100.0,
                    s.count,
                    if s.count == 1 { "vision" } else { "visions" }
                )
            }));
        }

        content
    }

    fn attach(&mut self, scope: &mut SubscriptionScope<'_>) {
        scope.listen(self.style.control);
        scope.listen(Control::ClearHistory);
    }

    fn handle(&mut self, event: &PanelEvent, ctx: &mut TabContext<'_>) -> TabResponse {
        match event {
            PanelEvent::DrawCard | PanelEvent::Gaze if event.control() == self.style.control => {
                self.draw(ctx)
            }
            PanelEvent::ClearHistory => {
                self.table.clear_history();
                TabResponse::rerender()
            }
            _ => TabResponse::none(),
        }
    }

    fn tick(&mut self, ctx: &mut TabContext<'_>) -> TabResponse {
        match self.table.poll(ctx.now) {
            Some(result) => self.revealed(&result, ctx.settings),
            None => TabResponse::none(),
        }
    }

    fn cleanup(&mut self) {
        self.table.cancel();
    }
}
