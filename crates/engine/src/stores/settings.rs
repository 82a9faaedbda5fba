//! Settings store - theme and dice preferences.
//!
//! Each setting persists under its own key so one corrupt value degrades
//! that setting to its default instead of invalidating the rest. Setters
//! write through immediately; the in-memory value is authoritative either
//! way.

use std::sync::Arc;

use crate::infrastructure::KeyValueStore;

/// Storage keys, one file/entry per setting.
const APP_THEME: &str = "APP_THEME";
const USE_ADVANCED_DICE_ROLL: &str = "USE_ADVANCED_DICE_ROLL";

/// UI theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }
}

/// User preferences, persisted one key per setting.
pub struct SettingsStore {
    kv: Arc<dyn KeyValueStore>,
    theme: Theme,
    use_advanced_dice_roll: bool,
}

impl SettingsStore {
    /// Load settings, falling back to `system_theme` when no stored theme
    /// exists or the stored value does not parse.
    pub fn new(kv: Arc<dyn KeyValueStore>, system_theme: Theme) -> Self {
        let theme = match kv.get(APP_THEME) {
            Some(value) => Theme::parse(&value).unwrap_or_else(|| {
                tracing::warn!(value = %value, "unrecognized stored theme, using system theme");
                system_theme
            }),
            None => system_theme,
        };

        let use_advanced_dice_roll = match kv.get(USE_ADVANCED_DICE_ROLL).as_deref() {
            Some("true") => true,
            Some("false") | None => false,
            Some(other) => {
                tracing::warn!(value = other, "unrecognized dice preference, using default");
                false
            }
        };

        Self {
            kv,
            theme,
            use_advanced_dice_roll,
        }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
        self.kv.set(APP_THEME, theme.as_str());
    }

    pub fn use_advanced_dice_roll(&self) -> bool {
        self.use_advanced_dice_roll
    }

    pub fn set_use_advanced_dice_roll(&mut self, enabled: bool) {
        self.use_advanced_dice_roll = enabled;
        self.kv
            .set(USE_ADVANCED_DICE_ROLL, if enabled { "true" } else { "false" });
    }

    /// Drop stored values and return to defaults (system theme, plain dice).
    pub fn reset(&mut self, system_theme: Theme) {
        self.kv.remove(APP_THEME);
        self.kv.remove(USE_ADVANCED_DICE_ROLL);
        self.theme = system_theme;
        self.use_advanced_dice_roll = false;
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::test_fixtures::MemoryKeyValueStore;

    #[test]
    fn falls_back_to_system_theme_when_nothing_stored() {
        let kv = Arc::new(MemoryKeyValueStore::default());
        let settings = SettingsStore::new(kv, Theme::Dark);
        assert_eq!(settings.theme(), Theme::Dark);
        assert!(!settings.use_advanced_dice_roll());
    }

    #[test]
    fn stored_values_win_over_system_theme() {
        let kv = Arc::new(MemoryKeyValueStore::default());
        kv.set(APP_THEME, "dark");
        kv.set(USE_ADVANCED_DICE_ROLL, "true");

        let settings = SettingsStore::new(kv, Theme::Light);
        assert_eq!(settings.theme(), Theme::Dark);
        assert!(settings.use_advanced_dice_roll());
    }

    #[test]
    fn setters_write_through_per_key() {
        let kv = Arc::new(MemoryKeyValueStore::default());
        let mut settings = SettingsStore::new(kv.clone(), Theme::Light);

        settings.set_theme(Theme::Dark);
        settings.set_use_advanced_dice_roll(true);

        assert_eq!(kv.get(APP_THEME).as_deref(), Some("dark"));
        assert_eq!(kv.get(USE_ADVANCED_DICE_ROLL).as_deref(), Some("true"));
    }

    #[test]
    fn corrupt_theme_degrades_to_system_theme_only() {
        let kv = Arc::new(MemoryKeyValueStore::default());
        kv.set(APP_THEME, "solarized");
        kv.set(USE_ADVANCED_DICE_ROLL, "true");

        let settings = SettingsStore::new(kv, Theme::Light);
        assert_eq!(settings.theme(), Theme::Light);
        // The other key is unaffected by the corrupt one.
        assert!(settings.use_advanced_dice_roll());
    }

    #[test]
    fn reset_removes_stored_keys() {
        let kv = Arc::new(MemoryKeyValueStore::default());
        let mut settings = SettingsStore::new(kv.clone(), Theme::Light);
        settings.set_theme(Theme::Dark);

        settings.reset(Theme::Light);
        assert!(kv.get(APP_THEME).is_none());
        assert_eq!(settings.theme(), Theme::Light);
    }
}
