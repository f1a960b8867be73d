//! Stand-in for tabs that are not implemented.

use super::{Tab, TabContent, TabContext, TabResponse};
use crate::events::{PanelEvent, SubscriptionScope};
use crate::settings::PanelSettings;

/// Tab id.
pub const TAB_ID: &str = "placeholder";

/// Shown for any tab id nobody registered. Attaches nothing and ignores
/// every event.
#[derive(Debug, Default)]
pub struct PlaceholderTab;

impl Tab for PlaceholderTab {
    fn id(&self) -> &str {
        TAB_ID
    }

    fn title(&self) -> &str {
        "Coming Soon"
    }

    fn content(&self, _settings: &PanelSettings, _now: u64) -> TabContent {
        TabContent::new(TAB_ID, "Coming Soon")
            .line("Nyx is still working on this page.")
            .line("Check back after the next full moon.")
    }

    fn attach(&mut self, _scope: &mut SubscriptionScope<'_>) {}

    fn handle(&mut self, _event: &PanelEvent, _ctx: &mut TabContext<'_>) -> TabResponse {
        TabResponse::none()
    }
}
