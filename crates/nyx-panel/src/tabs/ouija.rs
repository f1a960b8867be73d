//! The ouija tab.

use nyx_oracle::{ConsultOutcome, OracleConfig, OracleResult, OuijaBoard, OuijaEvent, Planchette};

use super::{Feedback, Tab, TabContent, TabContext, TabResponse};
use crate::events::{Control, Feature, PanelEvent, SubscriptionScope};
use crate::settings::PanelSettings;

/// Tab id.
pub const TAB_ID: &str = "ouija";

/// A tab running an [`OuijaBoard`].
#[derive(Debug)]
pub struct OuijaTab {
    board: OuijaBoard,
    spelled: String,
}

impl OuijaTab {
    /// Build the tab from the built-in answers.
    pub fn new(config: &OracleConfig) -> OracleResult<Self> {
        Ok(Self {
            board: OuijaBoard::builtin(config)?,
            spelled: String::new(),
        })
    }

    /// The underlying board.
    pub fn board(&self) -> &OuijaBoard {
        &self.board
    }

    fn consult(&mut self, question: &str, ctx: &mut TabContext<'_>) -> TabResponse {
        if !ctx.settings.features.ouija {
            return TabResponse::feedback(Feedback::Warning(format!(
                "{} is switched off in settings.",
                Feature::Ouija
            )));
        }
        match self.board.consult(question, ctx.now, ctx.rng) {
            Ok(ConsultOutcome::Started { .. }) => {
                self.spelled.clear();
                TabResponse::feedback(Feedback::Info(
                    "The planchette trembles beneath your fingers...".to_string(),
                ))
            }
            Ok(ConsultOutcome::Busy) => TabResponse::none(),
            Err(e) => TabResponse::feedback(Feedback::Warning(e.to_string())),
        }
    }
}

impl Tab for OuijaTab {
    fn id(&self) -> &str {
        TAB_ID
    }

    fn title(&self) -> &str {
        "Ouija"
    }

    fn content(&self, settings: &PanelSettings, _now: u64) -> TabContent {
        let mut content = TabContent::new(TAB_ID, "Ouija");
        if !settings.features.ouija {
            return content.line(format!("{} is switched off in settings.", Feature::Ouija));
        }

        content = match self.board.current_question() {
            Some(question) => {
                let mut c = content.line(format!("You asked: {question}"));
                if !self.spelled.is_empty() {
                    c = c.line(format!("The spirits spell: {}", self.spelled));
                }
                c.line(format!("Planchette: {}", self.board.position()))
            }
            None => content
                .line("Ask the spirits a question.")
                .control(Control::Consult),
        };

        if !self.board.history().is_empty() {
            content = content
                .line("Past sessions:")
                .lines(self.board.history().iter().map(|r| {
                    format!("  {} -> {}", r.question, r.answer.entry.display_text)
                }))
                .control(Control::ClearHistory);
        }
        content
    }

    fn attach(&mut self, scope: &mut SubscriptionScope<'_>) {
        scope.listen(Control::Consult);
        scope.listen(Control::ClearHistory);
    }

    fn handle(&mut self, event: &PanelEvent, ctx: &mut TabContext<'_>) -> TabResponse {
        match event {
            PanelEvent::Consult(question) => self.consult(question, ctx),
            PanelEvent::ClearHistory => {
                self.board.clear_history();
                TabResponse::rerender()
            }
            _ => TabResponse::none(),
        }
    }

    fn tick(&mut self, ctx: &mut TabContext<'_>) -> TabResponse {
        let mut response = TabResponse::none();
        for event in self.board.poll(ctx.now) {
            response.rerender = true;
            match event {
                OuijaEvent::Stirred => {}
                OuijaEvent::Moved(Planchette::Letter(c) | Planchette::Digit(c)) => {
                    self.spelled.push(c);
                }
                OuijaEvent::Moved(_) => {}
                OuijaEvent::Finished(reading) => {
                    if ctx.settings.features.inject_results {
                        response.injections.push(reading.injection_text());
                    }
                    response.feedback = Some(Feedback::Info(format!(
                        "The spirits have answered: {}",
                        reading.answer.entry.display_text
                    )));
                    self.spelled.clear();
                }
            }
        }
        response
    }

    fn cleanup(&mut self) {
        self.board.cancel();
        self.spelled.clear();
    }
}
