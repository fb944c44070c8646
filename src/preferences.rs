use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::error::PreferencesError;

const PREFERENCES_DIR: &str = "goalplan";
const PREFERENCES_FILE: &str = "preferences.json";

/// Persisted client-local settings
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    /// Stored as "light-theme", "dark-theme" or "pink-theme"
    #[serde(
        rename = "selectedTheme",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub selected_theme: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// JSON file holding [`Preferences`]
#[derive(Debug, Clone)]
pub struct PreferenceStore {
    path: PathBuf,
}

impl PreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<config dir>/goalplan/preferences.json`
    pub fn default_location() -> Result<Self, PreferencesError> {
        let dir = dirs::config_dir().ok_or(PreferencesError::NoConfigDir)?;
        Ok(Self::new(dir.join(PREFERENCES_DIR).join(PREFERENCES_FILE)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load preferences; a missing or unreadable file yields defaults
    pub fn load(&self) -> Preferences {
        if !self.path.exists() {
            return Preferences::default();
        }
        match fs::read_to_string(&self.path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                warn!("Ignoring malformed preferences {}: {}", self.path.display(), e);
                Preferences::default()
            }),
            Err(e) => {
                warn!("Failed to read preferences {}: {}", self.path.display(), e);
                Preferences::default()
            }
        }
    }

    /// Save preferences, replacing the file atomically
    pub fn save(&self, preferences: &Preferences) -> Result<(), PreferencesError> {
        let write_err = |source: std::io::Error| PreferencesError::Write {
            path: self.path.clone(),
            source,
        };

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir).map_err(write_err)?;

        let json = serde_json::to_string_pretty(preferences)?;
        let mut file = tempfile::NamedTempFile::new_in(&dir).map_err(write_err)?;
        file.write_all(json.as_bytes()).map_err(write_err)?;
        file.persist(&self.path).map_err(|e| write_err(e.error))?;
        Ok(())
    }

    pub fn theme(&self) -> Option<String> {
        self.load().selected_theme
    }

    pub fn set_theme(&self, theme: &str) -> Result<(), PreferencesError> {
        let mut preferences = self.load();
        preferences.selected_theme = Some(theme.to_string());
        preferences.updated_at = Some(Utc::now());
        self.save(&preferences)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = PreferenceStore::new(dir.path().join("prefs.json"));
        assert_eq!(store.load(), Preferences::default());
        assert_eq!(store.theme(), None);
    }

    #[test]
    fn test_theme_survives_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("prefs.json");

        PreferenceStore::new(&path).set_theme("dark-theme").unwrap();

        let reopened = PreferenceStore::new(&path);
        assert_eq!(reopened.theme().as_deref(), Some("dark-theme"));
        assert!(reopened.load().updated_at.is_some());

        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"selectedTheme\": \"dark-theme\""));
    }

    #[test]
    fn test_malformed_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        fs::write(&path, "{not json").unwrap();

        let store = PreferenceStore::new(&path);
        assert_eq!(store.theme(), None);

        store.set_theme("pink-theme").unwrap();
        assert_eq!(store.theme().as_deref(), Some("pink-theme"));
    }
}
