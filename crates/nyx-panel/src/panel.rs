//! The panel controller.
//!
//! One `Panel` exists per open panel. It owns every piece of state the tabs
//! share (settings, randomness, listeners, the active tab) so independent
//! panels never interfere with each other.

use nyx_core::{CategoryStats, Clock};
use nyx_oracle::OracleConfig;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::error::PanelResult;
use crate::events::{EventRouter, PanelEvent};
use crate::inject::InjectionSink;
use crate::lifecycle::TabManager;
use crate::settings::{PanelSettings, SettingsStore};
use crate::tabs::crystal::crystal_tab;
use crate::tabs::ouija::OuijaTab;
use crate::tabs::settings::SettingsTab;
use crate::tabs::tarot::tarot_tab;
use crate::tabs::{Feedback, Tab, TabContent, TabContext, TabResponse};

/// A tabbed panel wired to a settings store, an injection sink, and a clock.
pub struct Panel<S: SettingsStore, K: InjectionSink, C: Clock> {
    store: S,
    sink: K,
    clock: C,
    rng: StdRng,
    settings: PanelSettings,
    manager: TabManager,
    router: EventRouter,
    content: Option<TabContent>,
    feedback: Option<Feedback>,
    effect_stats: Vec<CategoryStats>,
}

impl<S: SettingsStore, K: InjectionSink, C: Clock> Panel<S, K, C> {
    /// Build a panel with the built-in tabs and open the stored active tab.
    ///
    /// A store that cannot be read is logged and replaced by defaults.
    pub fn new(mut store: S, sink: K, clock: C, config: OracleConfig) -> PanelResult<Self> {
        let tarot = tarot_tab(&config)?;
        let crystal = crystal_tab(&config)?;
        let ouija = OuijaTab::new(&config)?;
        let effect_stats = crystal.table().pool_stats();

        let mut manager = TabManager::new();
        manager.register(Box::new(tarot));
        manager.register(Box::new(crystal));
        manager.register(Box::new(ouija));
        manager.register(Box::new(SettingsTab));

        let settings = match store.load() {
            Ok(Some(settings)) => settings,
            Ok(None) => PanelSettings::default(),
            Err(e) => {
                tracing::warn!(error = %e, "could not load settings, using defaults");
                PanelSettings::default()
            }
        };

        let mut panel = Self {
            store,
            sink,
            clock,
            rng: StdRng::seed_from_u64(config.seed),
            settings,
            manager,
            router: EventRouter::new(),
            content: None,
            feedback: None,
            effect_stats,
        };
        let initial = panel.settings.active_tab.clone();
        panel.open(&initial);
        tracing::info!(tab = %initial, theme = %panel.settings.theme, "panel opened");
        Ok(panel)
    }

    /// Add a custom tab. Returns `false` if the id is taken.
    ///
    /// If the placeholder is standing in for this id, the new tab takes
    /// over the content area right away.
    pub fn register_tab(&mut self, tab: Box<dyn Tab>) -> bool {
        let id = tab.id().to_string();
        if !self.manager.register(tab) {
            return false;
        }
        if self.manager.active() == Some(id.as_str()) {
            self.open(&id);
        }
        true
    }

    /// Current settings.
    pub fn settings(&self) -> &PanelSettings {
        &self.settings
    }

    /// What the active tab shows.
    pub fn content(&self) -> Option<&TabContent> {
        self.content.as_ref()
    }

    /// The latest message for the user.
    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    /// Take the latest message, clearing it.
    pub fn take_feedback(&mut self) -> Option<Feedback> {
        self.feedback.take()
    }

    /// The active tab id.
    pub fn active_tab(&self) -> Option<&str> {
        self.manager.active()
    }

    /// Registered tab ids in tab bar order.
    pub fn tab_ids(&self) -> Vec<&str> {
        self.manager.tab_ids()
    }

    /// Whether `id` has a real tab behind it.
    pub fn is_tab_implemented(&self, id: &str) -> bool {
        self.manager.is_tab_implemented(id)
    }

    /// Crystal ball category weights and entry counts.
    pub fn effect_pool_stats(&self) -> &[CategoryStats] {
        &self.effect_stats
    }

    /// Content for any tab without switching to it.
    pub fn get_tab_content(&self, id: &str) -> TabContent {
        self.manager
            .get_tab_content(id, &self.settings, self.clock.now_ms())
    }

    /// Attach `id` without re-rendering. See [`TabManager::init_tab`].
    pub fn init_tab(&mut self, id: &str) -> bool {
        self.manager.init_tab(id, &mut self.router)
    }

    /// Tear `id` down. See [`TabManager::cleanup_tab`].
    pub fn cleanup_tab(&mut self, id: &str) -> bool {
        self.manager.cleanup_tab(id, &mut self.router)
    }

    /// Number of listeners currently attached.
    pub fn listener_count(&self) -> usize {
        self.router.listener_count()
    }

    /// The injection sink.
    pub fn sink(&self) -> &K {
        &self.sink
    }

    /// The settings store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The clock.
    pub fn clock(&self) -> &C {
        &self.clock
    }

    fn open(&mut self, id: &str) {
        let now = self.clock.now_ms();
        self.content = Some(
            self.manager
                .switch_to(id, &mut self.router, &self.settings, now),
        );
        self.feedback = None;
    }

    /// Switch tabs and remember the choice. Unknown ids show the
    /// placeholder and are not persisted.
    pub fn switch_tab(&mut self, id: &str) -> Option<&TabContent> {
        self.open(id);
        if self.manager.is_tab_implemented(id) && self.settings.active_tab != id {
            self.settings.active_tab = id.to_string();
            self.persist();
        }
        self.content.as_ref()
    }

    /// Deliver a user action to every listener on its control. Returns how
    /// many listeners ran.
    pub fn dispatch(&mut self, event: PanelEvent) -> usize {
        let now = self.clock.now_ms();
        let targets = self.router.listeners_for(event.control());
        for tab in &targets {
            let mut ctx = TabContext {
                now,
                rng: &mut self.rng,
                settings: &mut self.settings,
            };
            let response = self.manager.handle(tab, &event, &mut ctx);
            self.apply(response);
        }
        targets.len()
    }

    /// Advance timed work on the active tab: reveals, planchette moves.
    pub fn tick(&mut self) {
        let now = self.clock.now_ms();
        let mut ctx = TabContext {
            now,
            rng: &mut self.rng,
            settings: &mut self.settings,
        };
        let response = self.manager.tick(&mut ctx);
        self.apply(response);
    }

    fn apply(&mut self, response: TabResponse) {
        for text in &response.injections {
            tracing::info!(chars = text.len(), "injecting into conversation");
            self.sink.inject(text);
        }
        if response.feedback.is_some() {
            self.feedback = response.feedback;
        }
        if response.settings_changed {
            self.persist();
        }
        if response.rerender || response.settings_changed {
            self.refresh();
        }
    }

    fn refresh(&mut self) {
        if let Some(id) = self.manager.active() {
            self.content = Some(self.manager.get_tab_content(
                id,
                &self.settings,
                self.clock.now_ms(),
            ));
        }
    }

    fn persist(&mut self) {
        if let Err(e) = self.store.save(&self.settings) {
            tracing::warn!(error = %e, "could not save settings, keeping them in memory");
        }
    }

    /// Clean up the active tab. Also runs when the panel is dropped.
    pub fn shutdown(&mut self) {
        self.manager.shutdown(&mut self.router);
        self.content = None;
    }
}

impl<S: SettingsStore, K: InjectionSink, C: Clock> Drop for Panel<S, K, C> {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl<S: SettingsStore, K: InjectionSink, C: Clock> std::fmt::Debug for Panel<S, K, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Panel")
            .field("settings", &self.settings)
            .field("manager", &self.manager)
            .field("listeners", &self.router.listener_count())
            .finish_non_exhaustive()
    }
}
