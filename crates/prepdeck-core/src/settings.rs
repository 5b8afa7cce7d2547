//! Client settings persisted as JSON in the user config directory.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

fn default_backend_url() -> String {
    "http://localhost:8080/api".to_string()
}

fn default_prep_seconds() -> u32 {
    5
}

fn default_answer_seconds() -> u32 {
    60
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Settings {
    /// Base URL of the backend API
    #[serde(default = "default_backend_url")]
    pub backend_url: String,

    /// Selected microphone device name (None = system default)
    #[serde(default)]
    pub microphone_device: Option<String>,

    /// Seconds of prep time before each interview answer
    #[serde(default = "default_prep_seconds")]
    pub prep_seconds: u32,

    /// Per-answer time budget in seconds
    #[serde(default = "default_answer_seconds")]
    pub answer_seconds: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            backend_url: default_backend_url(),
            microphone_device: None,
            prep_seconds: default_prep_seconds(),
            answer_seconds: default_answer_seconds(),
        }
    }
}

impl Settings {
    /// Load settings, falling back to defaults when the file is missing or
    /// unreadable. `PREPDECK_BACKEND_URL` overrides the stored backend URL.
    pub fn load() -> Self {
        let mut settings = match default_path() {
            Ok(path) => Self::load_from(&path),
            Err(_) => Self::default(),
        };
        if let Ok(url) = std::env::var("PREPDECK_BACKEND_URL")
            && !url.is_empty()
        {
            settings.backend_url = url;
        }
        settings
    }

    pub fn load_from(path: &Path) -> Self {
        std::fs::read_to_string(path)
            .ok()
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default()
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&default_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let raw = serde_json::to_string_pretty(self)?;
        std::fs::write(path, raw).with_context(|| format!("Failed to write {}", path.display()))
    }
}

fn default_path() -> Result<PathBuf> {
    let config_dir = dirs::config_dir().context("Could not determine config directory")?;
    Ok(config_dir.join("prepdeck").join("settings.json"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let settings = Settings::load_from(Path::new("/nonexistent/settings.json"));
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.prep_seconds, 5);
        assert_eq!(settings.answer_seconds, 60);
    }

    #[test]
    fn save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");

        let settings = Settings {
            backend_url: "http://backend:9000/api".into(),
            microphone_device: Some("USB Mic".into()),
            prep_seconds: 3,
            answer_seconds: 90,
        };
        settings.save_to(&path).unwrap();

        assert_eq!(Settings::load_from(&path), settings);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"backend_url":"http://x/api"}"#).unwrap();

        let settings = Settings::load_from(&path);
        assert_eq!(settings.backend_url, "http://x/api");
        assert_eq!(settings.answer_seconds, 60);
    }
}
