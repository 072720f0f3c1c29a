//! Submission of an analysis request to the generation provider.
//!
//! Two routing modes, mutually exclusive by precedence: a configured proxy
//! URL wins over a direct API key (see [`crate::request::Routing`]). Exactly
//! one network attempt is made per submission — no retry, and no client-side
//! timeout: a hung call blocks until the transport itself errors.

mod gemini;
mod proxy;
pub mod wire;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;

use crate::error::AnalysisError;
use crate::prompt::build_prompt;
use crate::request::{AnalysisRequest, Routing};

use wire::{Blob, Content, GenerateContentRequest, GenerationConfig, Part};

/// HTTP client wrapper for analysis submissions.
pub struct AnalysisClient {
    http: reqwest::Client,
}

impl AnalysisClient {
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
        }
    }

    /// Submit one analysis request and return the raw completion text.
    ///
    /// The prompt and the base64-encoded audio travel as the two parts of a
    /// single user turn. A missing or empty completion is an error
    /// ([`AnalysisError::EmptyCompletion`]); decoding the completion into a
    /// report happens later, in [`crate::report::parse_completion`].
    pub async fn submit(&self, request: &AnalysisRequest) -> Result<String, AnalysisError> {
        let envelope = build_envelope(request);

        crate::verbose!(
            "submitting {} words + {:.1} KB audio to {}",
            request.word_count,
            request.audio.data.len() as f64 / 1024.0,
            match &request.routing {
                Routing::Proxy(_) => "proxy",
                Routing::Direct(_) => "provider",
            }
        );

        let response = match &request.routing {
            Routing::Proxy(url) => proxy::generate(&self.http, url, &envelope).await?,
            Routing::Direct(api_key) => {
                gemini::generate(&self.http, &request.model, api_key, &envelope).await?
            }
        };

        response
            .completion_text()
            .map(str::to_string)
            .ok_or(AnalysisError::EmptyCompletion)
    }
}

impl Default for AnalysisClient {
    fn default() -> Self {
        Self::new()
    }
}

fn build_envelope(request: &AnalysisRequest) -> GenerateContentRequest {
    let model = match &request.routing {
        Routing::Proxy(_) => Some(request.model.clone()),
        Routing::Direct(_) => None,
    };

    GenerateContentRequest {
        model,
        contents: vec![Content {
            role: "user",
            parts: vec![
                Part::Text {
                    text: build_prompt(request),
                },
                Part::InlineData {
                    inline_data: Blob {
                        mime_type: request.audio.mime_type.clone(),
                        data: BASE64.encode(&request.audio.data),
                    },
                },
            ],
        }],
        generation_config: GenerationConfig::for_analysis(request.temperature),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::AudioAsset;
    use crate::request::TextMode;

    fn request(routing: Routing) -> AnalysisRequest {
        AnalysisRequest {
            target_text: "שלום עולם".into(),
            text_mode: TextMode::Pointed,
            grade: None,
            age: None,
            dialect: None,
            teacher_notes: None,
            word_count: 2,
            audio: AudioAsset::with_duration(vec![1, 2, 3], "audio/webm", 6.0),
            model: "gemini-3-flash-preview".into(),
            temperature: 0.2,
            routing,
        }
    }

    #[test]
    fn proxy_envelope_carries_the_model() {
        let envelope = build_envelope(&request(Routing::Proxy("https://p.example".into())));
        assert_eq!(envelope.model.as_deref(), Some("gemini-3-flash-preview"));
    }

    #[test]
    fn direct_envelope_omits_the_model() {
        let envelope = build_envelope(&request(Routing::Direct("AIza-test".into())));
        assert!(envelope.model.is_none());
    }

    #[test]
    fn envelope_has_prompt_then_inline_audio() {
        let envelope = build_envelope(&request(Routing::Direct("AIza-test".into())));
        assert_eq!(envelope.contents.len(), 1);
        let parts = &envelope.contents[0].parts;
        assert_eq!(parts.len(), 2);
        assert!(matches!(&parts[0], Part::Text { text } if text.contains("שלום עולם")));
        match &parts[1] {
            Part::InlineData { inline_data } => {
                assert_eq!(inline_data.mime_type, "audio/webm");
                assert_eq!(inline_data.data, BASE64.encode([1u8, 2, 3]));
            }
            other => panic!("expected inline data part, got {other:?}"),
        }
    }
}
