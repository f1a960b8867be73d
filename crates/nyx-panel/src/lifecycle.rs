//! Tab registry and lifecycle.
//!
//! At most one tab is attached at a time. Switching tabs cleans up the
//! previous tab (disposing its listeners and dropping in-flight work)
//! before the next one is attached. Attaching is guarded, so attaching the
//! same tab twice without a cleanup registers its listeners only once.
//! Unknown tab ids resolve to a placeholder instead of failing. An id that
//! is attached as the placeholder and registered later counts as not
//! initialized until its real tab attaches.

use crate::events::{Disposer, EventRouter, PanelEvent};
use crate::settings::PanelSettings;
use crate::tabs::placeholder::PlaceholderTab;
use crate::tabs::{Tab, TabContent, TabContext, TabResponse};

/// Owns every tab and tracks which one is attached.
pub struct TabManager {
    tabs: Vec<Box<dyn Tab>>,
    fallback: PlaceholderTab,
    active: Option<String>,
    attached: Option<Disposer>,
    attached_fallback: bool,
}

impl Default for TabManager {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TabManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TabManager")
            .field("tabs", &self.tab_ids())
            .field("active", &self.active)
            .field("attached", &self.attached.is_some())
            .field("attached_fallback", &self.attached_fallback)
            .finish()
    }
}

impl TabManager {
    /// An empty manager with nothing attached.
    pub fn new() -> Self {
        Self {
            tabs: Vec::new(),
            fallback: PlaceholderTab,
            active: None,
            attached: None,
            attached_fallback: false,
        }
    }

    /// Add a tab. Returns `false` and keeps the existing tab if the id is
    /// already taken.
    pub fn register(&mut self, tab: Box<dyn Tab>) -> bool {
        if self.is_tab_implemented(tab.id()) {
            tracing::warn!(tab = tab.id(), "tab already registered, ignoring");
            return false;
        }
        self.tabs.push(tab);
        true
    }

    /// Registered tab ids in registration order.
    pub fn tab_ids(&self) -> Vec<&str> {
        self.tabs.iter().map(|t| t.id()).collect()
    }

    /// Whether `id` has a registered tab.
    pub fn is_tab_implemented(&self, id: &str) -> bool {
        self.tabs.iter().any(|t| t.id() == id)
    }

    /// The tab that currently owns the content area.
    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Whether `id`'s own tab is attached.
    pub fn is_initialized(&self, id: &str) -> bool {
        self.attached.is_some()
            && self.active.as_deref() == Some(id)
            && !(self.attached_fallback && self.is_tab_implemented(id))
    }

    fn tab(&self, id: &str) -> &dyn Tab {
        match self.tabs.iter().find(|t| t.id() == id) {
            Some(tab) => tab.as_ref(),
            None => &self.fallback,
        }
    }

    fn tab_mut(&mut self, id: &str) -> &mut dyn Tab {
        match self.tabs.iter_mut().find(|t| t.id() == id) {
            Some(tab) => tab.as_mut(),
            None => &mut self.fallback,
        }
    }

    /// Content for `id`, or the placeholder's content for unknown ids.
    pub fn get_tab_content(&self, id: &str, settings: &PanelSettings, now: u64) -> TabContent {
        self.tab(id).content(settings, now)
    }

    /// Attach `id`'s listeners. Any other attached tab is cleaned up first.
    /// Returns `false` if `id` was already attached.
    pub fn init_tab(&mut self, id: &str, router: &mut EventRouter) -> bool {
        if self.is_initialized(id) {
            return false;
        }
        if let Some(previous) = self.active.clone() {
            self.cleanup_tab(&previous, router);
        }

        let mut scope = router.scope(id);
        self.tab_mut(id).attach(&mut scope);
        let disposer = scope.finish();
        tracing::debug!(tab = id, listeners = disposer.len(), "tab attached");

        self.attached = Some(disposer);
        self.attached_fallback = !self.is_tab_implemented(id);
        self.active = Some(id.to_string());
        true
    }

    /// Tear `id` down: dispose its listeners and drop its in-flight work.
    /// Safe to call on a tab that is not attached. Returns whether
    /// listeners were removed.
    pub fn cleanup_tab(&mut self, id: &str, router: &mut EventRouter) -> bool {
        self.tab_mut(id).cleanup();
        if self.active.as_deref() != Some(id) {
            return false;
        }
        self.active = None;
        self.attached_fallback = false;
        match self.attached.take() {
            Some(disposer) => {
                let removed = disposer.dispose(router);
                tracing::debug!(tab = id, removed, "tab cleaned up");
                true
            }
            None => false,
        }
    }

    /// Make `id` the active tab and return its content.
    pub fn switch_to(
        &mut self,
        id: &str,
        router: &mut EventRouter,
        settings: &PanelSettings,
        now: u64,
    ) -> TabContent {
        if let Some(previous) = self.active.clone().filter(|p| p != id) {
            self.cleanup_tab(&previous, router);
        }
        if !self.is_tab_implemented(id) {
            tracing::warn!(tab = id, "unknown tab, showing placeholder");
        }
        let content = self.get_tab_content(id, settings, now);
        self.init_tab(id, router);
        tracing::debug!(tab = id, "switched tab");
        content
    }

    /// Deliver an event to `id`. Tabs that are not attached ignore events.
    pub fn handle(
        &mut self,
        id: &str,
        event: &PanelEvent,
        ctx: &mut TabContext<'_>,
    ) -> TabResponse {
        if !self.is_initialized(id) {
            return TabResponse::none();
        }
        self.tab_mut(id).handle(event, ctx)
    }

    /// Advance the active tab's timed work.
    pub fn tick(&mut self, ctx: &mut TabContext<'_>) -> TabResponse {
        match self.active.clone() {
            Some(id) if self.attached.is_some() => self.tab_mut(&id).tick(ctx),
            _ => TabResponse::none(),
        }
    }

    /// Clean up whatever is attached.
    pub fn shutdown(&mut self, router: &mut EventRouter) {
        if let Some(id) = self.active.clone() {
            self.cleanup_tab(&id, router);
        }
    }
}
