//! Persisted panel preferences and the stores that hold them.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::PanelResult;
use crate::events::Feature;

/// Theme ids the panel ships with.
pub const THEMES: &[&str] = &["nyx", "moonlight", "blood_moon", "emerald", "rose_quartz"];

/// Theme used when none is stored.
pub const DEFAULT_THEME: &str = "nyx";

/// Tab opened when none is stored.
pub const DEFAULT_TAB: &str = "tarot";

/// Tarot reversal chance in percent when none is stored.
pub const DEFAULT_REVERSAL_PERCENT: u8 = 50;

/// Where the floating button sits, in pixels from the top-left corner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelPosition {
    /// Horizontal offset.
    pub x: i32,
    /// Vertical offset.
    pub y: i32,
}

/// On/off switches for each divination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureToggles {
    /// Crystal ball enabled.
    pub crystal: bool,
    /// Tarot enabled.
    pub tarot: bool,
    /// Ouija enabled.
    pub ouija: bool,
    /// Send results to the host conversation.
    pub inject_results: bool,
}

impl Default for FeatureToggles {
    fn default() -> Self {
        Self {
            crystal: true,
            tarot: true,
            ouija: true,
            inject_results: true,
        }
    }
}

impl FeatureToggles {
    /// Whether `feature` is on.
    pub fn get(&self, feature: Feature) -> bool {
        match feature {
            Feature::Crystal => self.crystal,
            Feature::Tarot => self.tarot,
            Feature::Ouija => self.ouija,
            Feature::Injection => self.inject_results,
        }
    }

    /// Flip `feature`, returning its new state.
    pub fn toggle(&mut self, feature: Feature) -> bool {
        let slot = match feature {
            Feature::Crystal => &mut self.crystal,
            Feature::Tarot => &mut self.tarot,
            Feature::Ouija => &mut self.ouija,
            Feature::Injection => &mut self.inject_results,
        };
        *slot = !*slot;
        *slot
    }
}

/// Everything the panel remembers between sessions.
///
/// Missing fields fall back to their defaults so older documents keep
/// loading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelSettings {
    /// Current theme id.
    pub theme: String,
    /// Tab shown when the panel opens.
    pub active_tab: String,
    /// Floating button position.
    pub position: PanelPosition,
    /// Per-feature switches.
    pub features: FeatureToggles,
    /// Chance in percent that a tarot card is drawn reversed.
    #[serde(deserialize_with = "lenient_percent")]
    pub tarot_reversal_chance: u8,
}

impl Default for PanelSettings {
    fn default() -> Self {
        Self {
            theme: DEFAULT_THEME.to_string(),
            active_tab: DEFAULT_TAB.to_string(),
            position: PanelPosition::default(),
            features: FeatureToggles::default(),
            tarot_reversal_chance: DEFAULT_REVERSAL_PERCENT,
        }
    }
}

/// Accept any number, clamped and rounded to 0-100. Anything else falls
/// back to the default instead of failing the whole document.
fn lenient_percent<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u8, D::Error> {
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value
        .as_f64()
        .filter(|p| p.is_finite())
        .map_or(DEFAULT_REVERSAL_PERCENT, |p| p.clamp(0.0, 100.0).round() as u8))
}

impl PanelSettings {
    /// Whether `theme` is one the panel knows.
    pub fn is_known_theme(theme: &str) -> bool {
        THEMES.contains(&theme)
    }

    /// Reversal chance clamped to 0-100.
    pub fn reversal_chance(&self) -> f64 {
        f64::from(self.tarot_reversal_chance.min(100))
    }
}

/// The host application's settings storage.
pub trait SettingsStore {
    /// Read stored settings. `Ok(None)` means nothing has been stored yet.
    fn load(&mut self) -> PanelResult<Option<PanelSettings>>;

    /// Persist settings.
    fn save(&mut self, settings: &PanelSettings) -> PanelResult<()>;
}

/// A store that lives only in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    saved: Option<PanelSettings>,
    saves: usize,
}

impl MemoryStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-populated with `settings`.
    pub fn with(settings: PanelSettings) -> Self {
        Self {
            saved: Some(settings),
            saves: 0,
        }
    }

    /// The last saved settings.
    pub fn saved(&self) -> Option<&PanelSettings> {
        self.saved.as_ref()
    }

    /// How many times `save` was called.
    pub fn save_count(&self) -> usize {
        self.saves
    }
}

impl SettingsStore for MemoryStore {
    fn load(&mut self) -> PanelResult<Option<PanelSettings>> {
        Ok(self.saved.clone())
    }

    fn save(&mut self, settings: &PanelSettings) -> PanelResult<()> {
        self.saved = Some(settings.clone());
        self.saves += 1;
        Ok(())
    }
}

impl<T: SettingsStore + ?Sized> SettingsStore for &mut T {
    fn load(&mut self) -> PanelResult<Option<PanelSettings>> {
        (**self).load()
    }

    fn save(&mut self, settings: &PanelSettings) -> PanelResult<()> {
        (**self).save(settings)
    }
}

/// A store backed by a JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Store settings at `path`. The file is created on first save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingsStore for JsonFileStore {
    fn load(&mut self) -> PanelResult<Option<PanelSettings>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let text = fs::read_to_string(&self.path)?;
        Ok(Some(serde_json::from_str(&text)?))
    }

    fn save(&mut self, settings: &PanelSettings) -> PanelResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(settings)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PanelError;

    #[test]
    fn default_settings() {
        let s = PanelSettings::default();
        assert_eq!(s.theme, "nyx");
        assert_eq!(s.active_tab, "tarot");
        assert!(s.features.crystal && s.features.tarot && s.features.ouija);
        assert_eq!(s.reversal_chance(), 50.0);
    }

    #[test]
    fn reversal_chance_clamped() {
        let s = PanelSettings {
            tarot_reversal_chance: 250,
            ..PanelSettings::default()
        };
        assert_eq!(s.reversal_chance(), 100.0);
    }

    #[test]
    fn partial_document_fills_defaults() {
        let s: PanelSettings =
            serde_json::from_str(r#"{ "theme": "emerald", "features": { "ouija": false } }"#)
                .unwrap();
        assert_eq!(s.theme, "emerald");
        assert_eq!(s.active_tab, "tarot");
        assert!(!s.features.ouija);
        assert!(s.features.tarot);
    }

    #[test]
    fn odd_reversal_chance_keeps_document() {
        let load = |chance: &str| -> PanelSettings {
            let json = format!(
                r#"{{"theme":"emerald","active_tab":"ouija","tarot_reversal_chance":{chance}}}"#
            );
            serde_json::from_str(&json).unwrap()
        };
        let s = load("42.4");
        assert_eq!(s.tarot_reversal_chance, 42);
        assert_eq!(s.theme, "emerald");
        assert_eq!(s.active_tab, "ouija");
        assert_eq!(load("300").tarot_reversal_chance, 100);
        assert_eq!(load("-5").tarot_reversal_chance, 0);
        assert_eq!(load(r#""high""#).tarot_reversal_chance, 50);
        assert_eq!(load("null").tarot_reversal_chance, 50);
    }

    #[test]
    fn toggles_flip() {
        let mut t = FeatureToggles::default();
        assert!(!t.toggle(Feature::Crystal));
        assert!(!t.get(Feature::Crystal));
        assert!(t.toggle(Feature::Crystal));
    }

    #[test]
    fn known_themes() {
        assert!(PanelSettings::is_known_theme("blood_moon"));
        assert!(!PanelSettings::is_known_theme("neon"));
    }

    #[test]
    fn memory_store_round_trip() {
        let mut store = MemoryStore::new();
        assert!(store.load().unwrap().is_none());
        let s = PanelSettings {
            theme: "moonlight".to_string(),
            ..PanelSettings::default()
        };
        store.save(&s).unwrap();
        assert_eq!(store.load().unwrap(), Some(s));
        assert_eq!(store.save_count(), 1);
    }

    #[test]
    fn file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::new(dir.path().join("nested").join("nyx.json"));
        assert!(store.load().unwrap().is_none());
        let s = PanelSettings {
            active_tab: "ouija".to_string(),
            position: PanelPosition { x: 40, y: -12 },
            ..PanelSettings::default()
        };
        store.save(&s).unwrap();
        assert_eq!(store.load().unwrap(), Some(s));
    }

    #[test]
    fn file_store_reports_corrupt_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nyx.json");
        fs::write(&path, "{ not json").unwrap();
        let mut store = JsonFileStore::new(path);
        assert!(matches!(store.load().unwrap_err(), PanelError::Json(_)));
    }
}
