use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::ThemeError;

/// Key the theme preference is stored under.
pub const THEME_KEY: &str = "theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }

    pub fn toggled(self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    fn parse(value: &str) -> Option<Theme> {
        match value {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }
}

/// Durable key-value storage for user preferences. The rendering host
/// decides where this actually lives.
pub trait PreferenceStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, ThemeError>;
    fn set(&self, key: &str, value: &str) -> Result<(), ThemeError>;
}

/// In-memory store for tests and ephemeral sessions.
#[derive(Default)]
pub struct MemoryPreferences {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryPreferences {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryPreferences {
    fn get(&self, key: &str) -> Result<Option<String>, ThemeError> {
        let values = self
            .values
            .lock()
            .map_err(|e| ThemeError::Store(e.to_string()))?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), ThemeError> {
        let mut values = self
            .values
            .lock()
            .map_err(|e| ThemeError::Store(e.to_string()))?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// File-backed store: a small JSON object of key-value pairs. A missing
/// file reads as empty.
pub struct FilePreferences {
    path: PathBuf,
}

impl FilePreferences {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn load(&self) -> Result<HashMap<String, String>, ThemeError> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }
        let raw = std::fs::read_to_string(&self.path)
            .map_err(|e| ThemeError::Store(e.to_string()))?;
        serde_json::from_str(&raw).map_err(|e| ThemeError::Store(e.to_string()))
    }
}

impl PreferenceStore for FilePreferences {
    fn get(&self, key: &str) -> Result<Option<String>, ThemeError> {
        Ok(self.load()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), ThemeError> {
        let mut values = self.load()?;
        values.insert(key.to_string(), value.to_string());
        let raw = serde_json::to_string_pretty(&values)
            .map_err(|e| ThemeError::Store(e.to_string()))?;
        std::fs::write(&self.path, raw).map_err(|e| ThemeError::Store(e.to_string()))
    }
}

/// Owns the dark/light flag: reads the stored preference at startup,
/// falls back to the host's system preference, and writes through on
/// toggle.
pub struct ThemeManager {
    store: Box<dyn PreferenceStore>,
    current: Theme,
}

impl ThemeManager {
    pub fn new(store: Box<dyn PreferenceStore>, system_default: Theme) -> Self {
        let current = match store.get(THEME_KEY) {
            Ok(Some(value)) => match Theme::parse(&value) {
                Some(theme) => {
                    debug!(theme = ?theme, "Loaded stored theme");
                    theme
                }
                None => {
                    warn!(value = %value, "Unrecognized stored theme, using system default");
                    system_default
                }
            },
            Ok(None) => system_default,
            Err(e) => {
                warn!(error = %e, "Preference store unreadable, using system default");
                system_default
            }
        };
        Self { store, current }
    }

    pub fn current(&self) -> Theme {
        self.current
    }

    pub fn toggle(&mut self) -> Result<Theme, ThemeError> {
        self.current = self.current.toggled();
        self.store.set(THEME_KEY, self.current.as_str())?;
        info!(theme = ?self.current, "Theme toggled");
        Ok(self.current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn falls_back_to_system_default_when_unset() {
        let manager = ThemeManager::new(Box::new(MemoryPreferences::new()), Theme::Dark);
        assert_eq!(manager.current(), Theme::Dark);
    }

    #[test]
    fn toggle_writes_through_and_survives_reload() {
        let store = std::sync::Arc::new(MemoryPreferences::new());

        struct Shared(std::sync::Arc<MemoryPreferences>);
        impl PreferenceStore for Shared {
            fn get(&self, key: &str) -> Result<Option<String>, ThemeError> {
                self.0.get(key)
            }
            fn set(&self, key: &str, value: &str) -> Result<(), ThemeError> {
                self.0.set(key, value)
            }
        }

        let mut manager = ThemeManager::new(Box::new(Shared(store.clone())), Theme::Light);
        assert_eq!(manager.toggle().unwrap(), Theme::Dark);

        let reloaded = ThemeManager::new(Box::new(Shared(store)), Theme::Light);
        assert_eq!(reloaded.current(), Theme::Dark);
    }

    #[test]
    fn stored_value_beats_system_default() {
        let store = MemoryPreferences::new();
        store.set(THEME_KEY, "dark").unwrap();
        let manager = ThemeManager::new(Box::new(store), Theme::Light);
        assert!(manager.current().is_dark());
    }
}
