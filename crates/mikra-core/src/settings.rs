//! Persisted CLI settings.
//!
//! Stored as JSON under the platform config directory
//! (`~/.config/mikra/settings.json` on Linux). Environment variables win
//! over the file for credentials so CI and one-off runs never have to touch
//! the settings: `GEMINI_API_KEY` and `MIKRA_PROXY_URL`.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::request::{DEFAULT_MODEL, DEFAULT_TEMPERATURE};

/// Environment variable consulted for the provider API key.
pub const API_KEY_ENV_VAR: &str = "GEMINI_API_KEY";
/// Environment variable consulted for the proxy URL.
pub const PROXY_URL_ENV_VAR: &str = "MIKRA_PROXY_URL";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    #[serde(default)]
    pub proxy_url: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_temperature() -> f64 {
    DEFAULT_TEMPERATURE
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            model: default_model(),
            temperature: default_temperature(),
            proxy_url: None,
            api_key: None,
        }
    }
}

impl Settings {
    /// Load settings from disk, falling back to defaults when the file is
    /// missing or unreadable.
    pub fn load() -> Self {
        let Some(path) = Self::path() else {
            return Self::default();
        };
        match std::fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|e| {
                crate::verbose!("settings file unreadable ({e}), using defaults");
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Write settings to disk, creating the config directory if needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::path().context("could not determine config directory")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, contents)
            .with_context(|| format!("failed to write {}", path.display()))?;
        Ok(())
    }

    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("mikra").join("settings.json"))
    }

    /// API key from settings, with environment fallback.
    pub fn api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .or_else(|| std::env::var(API_KEY_ENV_VAR).ok().filter(|k| !k.is_empty()))
    }

    /// Proxy URL from settings, with environment fallback.
    pub fn proxy_url(&self) -> Option<String> {
        self.proxy_url
            .clone()
            .filter(|u| !u.trim().is_empty())
            .or_else(|| {
                std::env::var(PROXY_URL_ENV_VAR)
                    .ok()
                    .filter(|u| !u.is_empty())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_analysis_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.model, "gemini-3-flash-preview");
        assert_eq!(settings.temperature, 0.2);
        assert!(settings.proxy_url.is_none());
    }

    #[test]
    fn partial_settings_file_fills_in_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"model":"gemini-2.5-pro"}"#).unwrap();
        assert_eq!(settings.model, "gemini-2.5-pro");
        assert_eq!(settings.temperature, 0.2);
    }

    #[test]
    fn blank_stored_key_does_not_mask_the_environment() {
        let settings = Settings {
            api_key: Some("   ".into()),
            ..Default::default()
        };
        // A blank stored key falls through to the env var (unset here, so None
        // unless the environment provides one).
        let resolved = settings.api_key();
        assert_eq!(resolved, std::env::var(API_KEY_ENV_VAR).ok().filter(|k| !k.is_empty()));
    }
}
