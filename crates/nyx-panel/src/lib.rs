//! Tabbed panel controller for the Nyx companion.
//!
//! The panel owns a [`TabManager`] that keeps at most one tab attached at a
//! time, an [`EventRouter`] that delivers user actions to the attached tab's
//! listeners, and the seams to the host: a [`SettingsStore`] for persisted
//! preferences and an [`InjectionSink`] for text merged into the
//! conversation. Rendering is left to the embedder; tabs only describe
//! their content.

pub mod error;
pub mod events;
pub mod inject;
pub mod lifecycle;
pub mod panel;
pub mod settings;
pub mod tabs;

pub use error::{PanelError, PanelResult};
pub use events::{Control, Disposer, EventRouter, Feature, PanelEvent, SubscriptionScope};
pub use inject::{InjectionSink, RecordingSink};
pub use lifecycle::TabManager;
pub use panel::Panel;
pub use settings::{JsonFileStore, MemoryStore, PanelSettings, SettingsStore};
pub use tabs::{Feedback, Tab, TabContent, TabContext, TabResponse};
