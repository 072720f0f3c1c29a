//! The per-submission analysis request and its routing choice.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::audio::AudioAsset;
use crate::error::AnalysisError;

/// Default model when none is configured.
pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";

/// Default sampling temperature.
pub const DEFAULT_TEMPERATURE: f64 = 0.2;

/// Whether the target text carries niqqud.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextMode {
    #[default]
    Pointed,
    Unpointed,
}

impl TextMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextMode::Pointed => "pointed",
            TextMode::Unpointed => "unpointed",
        }
    }
}

impl fmt::Display for TextMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for TextMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pointed" | "menukad" => Ok(TextMode::Pointed),
            "unpointed" => Ok(TextMode::Unpointed),
            _ => Err(format!("unknown text mode: {s}. Available: pointed, unpointed")),
        }
    }
}

/// Where the generation request goes.
///
/// A configured proxy always wins over a direct API key; with neither the
/// submission fails synchronously, before any network activity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Routing {
    /// POST the envelope (including the model name) to this URL.
    Proxy(String),
    /// Call the provider's generation endpoint directly with this key.
    Direct(String),
}

impl Routing {
    pub fn from_options(
        proxy_url: Option<&str>,
        api_key: Option<&str>,
    ) -> Result<Self, AnalysisError> {
        if let Some(url) = proxy_url.map(str::trim).filter(|u| !u.is_empty()) {
            return Ok(Routing::Proxy(url.to_string()));
        }
        if let Some(key) = api_key.map(str::trim).filter(|k| !k.is_empty()) {
            return Ok(Routing::Direct(key.to_string()));
        }
        Err(AnalysisError::Configuration)
    }
}

/// Everything one submission needs. Built fresh per analysis; never
/// persisted.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub target_text: String,
    pub text_mode: TextMode,
    pub grade: Option<String>,
    pub age: Option<String>,
    pub dialect: Option<String>,
    pub teacher_notes: Option<String>,
    /// Computed by [`crate::text::count_words`] over the target text.
    pub word_count: usize,
    pub audio: AudioAsset,
    pub model: String,
    pub temperature: f64,
    pub routing: Routing,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn proxy_wins_over_api_key() {
        let routing =
            Routing::from_options(Some("https://proxy.example/api"), Some("AIza-key")).unwrap();
        assert_eq!(routing, Routing::Proxy("https://proxy.example/api".into()));
    }

    #[test]
    fn api_key_used_when_no_proxy() {
        let routing = Routing::from_options(None, Some("AIza-key")).unwrap();
        assert_eq!(routing, Routing::Direct("AIza-key".into()));
    }

    #[test]
    fn blank_values_count_as_missing() {
        let routing = Routing::from_options(Some("   "), Some("AIza-key")).unwrap();
        assert_eq!(routing, Routing::Direct("AIza-key".into()));

        let err = Routing::from_options(Some(""), Some("  ")).unwrap_err();
        assert!(matches!(err, AnalysisError::Configuration));
    }

    #[test]
    fn neither_configured_is_a_configuration_error() {
        let err = Routing::from_options(None, None).unwrap_err();
        assert!(matches!(err, AnalysisError::Configuration));
    }

    #[test]
    fn text_mode_parses_case_insensitively() {
        assert_eq!("Pointed".parse::<TextMode>().unwrap(), TextMode::Pointed);
        assert_eq!("unpointed".parse::<TextMode>().unwrap(), TextMode::Unpointed);
        assert!("vowels".parse::<TextMode>().is_err());
    }
}
