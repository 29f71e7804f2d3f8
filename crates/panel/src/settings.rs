//! Persisted panel settings.
//!
//! The browser variants kept these key/value pairs in local storage:
//! the backend URL and key, and the theme preference. Here they live in
//! a small JSON file, read at startup and written whenever changed.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Env var overriding where the settings file lives.
pub const ENV_SETTINGS_PATH: &str = "INCNOC_SETTINGS_PATH";

/// Default settings file, relative to the working directory.
pub const DEFAULT_SETTINGS_FILE: &str = "incnoc-settings.json";

/// Theme values, matching the original UI's wording.
pub const THEME_DARK: &str = "escuro";
pub const THEME_LIGHT: &str = "claro";

/// Errors from loading or saving the settings file.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Failed to access settings file: {0}")]
    Io(#[from] io::Error),

    #[error("Settings file is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// The persisted key/value pairs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Backend project URL; absent until the operator configures it.
    #[serde(default)]
    pub supabase_url: Option<String>,
    /// Backend anon key; absent until the operator configures it.
    #[serde(default)]
    pub supabase_key: Option<String>,
    /// Theme preference (`escuro` or `claro`).
    #[serde(default = "default_theme")]
    pub theme: String,
}

fn default_theme() -> String {
    THEME_DARK.to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            supabase_url: None,
            supabase_key: None,
            theme: default_theme(),
        }
    }
}

impl Settings {
    /// Flip between dark and light, returning the new value.
    pub fn toggle_theme(&mut self) -> &str {
        self.theme = if self.theme == THEME_LIGHT {
            THEME_DARK.to_string()
        } else {
            THEME_LIGHT.to_string()
        };
        &self.theme
    }
}

/// Reads and writes the settings file.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn at(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Settings file location from [`ENV_SETTINGS_PATH`], falling back
    /// to [`DEFAULT_SETTINGS_FILE`] in the working directory.
    pub fn from_env() -> Self {
        let path = std::env::var(ENV_SETTINGS_PATH)
            .unwrap_or_else(|_| DEFAULT_SETTINGS_FILE.to_string());
        Self::at(path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load settings; a missing file yields the defaults.
    pub fn load(&self) -> Result<Settings, SettingsError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(serde_json::from_str(&contents)?),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Settings::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// Write settings back to the file.
    pub fn save(&self, settings: &Settings) -> Result<(), SettingsError> {
        let contents = serde_json::to_string_pretty(settings)?;
        fs::write(&self.path, contents)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
