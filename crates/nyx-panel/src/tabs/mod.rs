//! Tab definitions and the trait every tab implements.

pub mod crystal;
pub mod divination;
pub mod ouija;
pub mod placeholder;
pub mod settings;
pub mod tarot;

use nyx_core::RandomSource;

use crate::events::{Control, PanelEvent, SubscriptionScope};
use crate::settings::PanelSettings;

/// A description of what a tab shows. The embedder decides how to draw it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabContent {
    /// Id of the tab that produced the content.
    pub tab_id: String,
    /// Heading.
    pub title: String,
    /// Body lines, top to bottom.
    pub lines: Vec<String>,
    /// Controls to render as buttons or inputs.
    pub controls: Vec<Control>,
}

impl TabContent {
    /// Start content with a title.
    pub fn new(tab_id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            tab_id: tab_id.into(),
            title: title.into(),
            lines: Vec::new(),
            controls: Vec::new(),
        }
    }

    /// Append a body line.
    pub fn line(mut self, text: impl Into<String>) -> Self {
        self.lines.push(text.into());
        self
    }

    /// Append several body lines.
    pub fn lines(mut self, lines: impl IntoIterator<Item = String>) -> Self {
        self.lines.extend(lines);
        self
    }

    /// Offer a control.
    pub fn control(mut self, control: Control) -> Self {
        self.controls.push(control);
        self
    }
}

/// A short, non-blocking message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feedback {
    /// Something happened.
    Info(String),
    /// The action was refused.
    Warning(String),
}

impl Feedback {
    /// The message text.
    pub fn message(&self) -> &str {
        match self {
            Self::Info(m) | Self::Warning(m) => m,
        }
    }
}

/// What a tab wants the panel to do after handling an event or tick.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TabResponse {
    /// Text for the host conversation.
    pub injections: Vec<String>,
    /// Message for the user.
    pub feedback: Option<Feedback>,
    /// Settings were changed and should be persisted.
    pub settings_changed: bool,
    /// The tab's content changed.
    pub rerender: bool,
}

impl TabResponse {
    /// Nothing to do.
    pub fn none() -> Self {
        Self::default()
    }

    /// Just redraw.
    pub fn rerender() -> Self {
        Self {
            rerender: true,
            ..Self::default()
        }
    }

    /// Show a message and redraw.
    pub fn feedback(feedback: Feedback) -> Self {
        Self {
            feedback: Some(feedback),
            rerender: true,
            ..Self::default()
        }
    }

    /// Inject text and redraw.
    pub fn inject(text: String) -> Self {
        Self {
            injections: vec![text],
            rerender: true,
            ..Self::default()
        }
    }
}

/// Mutable state handed to a tab while it handles an event.
pub struct TabContext<'a> {
    /// Current time in epoch milliseconds.
    pub now: u64,
    /// Randomness for draws.
    pub rng: &'a mut dyn RandomSource,
    /// Panel settings; tabs may change them and report `settings_changed`.
    pub settings: &'a mut PanelSettings,
}

/// A self-contained feature module owning the panel's content area.
pub trait Tab {
    /// Stable id used for lookup and persistence.
    fn id(&self) -> &str;

    /// Label for the tab bar.
    fn title(&self) -> &str;

    /// Describe the tab's content. Must not change any state.
    fn content(&self, settings: &PanelSettings, now: u64) -> TabContent;

    /// Register the controls this tab reacts to.
    fn attach(&mut self, scope: &mut SubscriptionScope<'_>);

    /// React to an event on one of the attached controls.
    fn handle(&mut self, event: &PanelEvent, ctx: &mut TabContext<'_>) -> TabResponse;

    /// Advance timed work. Called regularly while the tab is active.
    fn tick(&mut self, _ctx: &mut TabContext<'_>) -> TabResponse {
        TabResponse::none()
    }

    /// Drop in-flight work when the tab loses the content area. Must be
    /// safe to call on a tab that is already clean.
    fn cleanup(&mut self) {}
}

/// Format a millisecond duration as a countdown, rounding up to whole seconds.
pub(crate) fn format_countdown(ms: u64) -> String {
    let secs = ms.div_ceil(1000);
    if secs >= 60 {
        format!("{}m {:02}s", secs / 60, secs % 60)
    } else {
        format!("{secs}s")
    }
}
