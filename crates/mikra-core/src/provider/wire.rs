//! Wire types for the generateContent request/response contract.
//!
//! The envelope mixes casings on purpose: `generationConfig` and its fields
//! are camelCase, while the inline-data part uses `inline_data` and
//! `mime_type` — this matches what the provider accepts for both and what a
//! proxy written against the browser client expects.

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct GenerateContentRequest {
    /// Present in proxy envelopes; omitted on direct calls, where the model
    /// is part of the URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    pub contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    pub generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
pub struct Content {
    pub role: &'static str,
    pub parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Part {
    Text { text: String },
    InlineData { inline_data: Blob },
}

#[derive(Debug, Serialize)]
pub struct Blob {
    pub mime_type: String,
    /// Base64-encoded audio bytes.
    pub data: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f64,
    pub top_p: f64,
    pub max_output_tokens: u32,
}

impl GenerationConfig {
    pub fn for_analysis(temperature: f64) -> Self {
        Self {
            temperature,
            top_p: 0.9,
            max_output_tokens: 8192,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    /// Absent when the provider suppresses the content (safety stops and
    /// the like); decodes to an empty content rather than failing.
    #[serde(default)]
    pub content: CandidateContent,
}

#[derive(Debug, Default, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
pub struct CandidatePart {
    #[serde(default)]
    pub text: Option<String>,
}

impl GenerateContentResponse {
    /// The completion lives at a fixed path:
    /// `candidates[0].content.parts[0].text`.
    pub fn completion_text(&self) -> Option<&str> {
        self.candidates
            .first()?
            .content
            .parts
            .first()?
            .text
            .as_deref()
            .filter(|t| !t.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_serializes_with_mixed_casing() {
        let request = GenerateContentRequest {
            model: Some("gemini-3-flash-preview".into()),
            contents: vec![Content {
                role: "user",
                parts: vec![
                    Part::Text {
                        text: "prompt".into(),
                    },
                    Part::InlineData {
                        inline_data: Blob {
                            mime_type: "audio/webm".into(),
                            data: "AAAA".into(),
                        },
                    },
                ],
            }],
            generation_config: GenerationConfig::for_analysis(0.2),
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "gemini-3-flash-preview");
        assert_eq!(json["contents"][0]["role"], "user");
        assert_eq!(json["contents"][0]["parts"][0]["text"], "prompt");
        assert_eq!(
            json["contents"][0]["parts"][1]["inline_data"]["mime_type"],
            "audio/webm"
        );
        assert_eq!(json["generationConfig"]["temperature"], 0.2);
        assert_eq!(json["generationConfig"]["topP"], 0.9);
        assert_eq!(json["generationConfig"]["maxOutputTokens"], 8192);
    }

    #[test]
    fn model_is_omitted_for_direct_calls() {
        let request = GenerateContentRequest {
            model: None,
            contents: vec![],
            generation_config: GenerationConfig::for_analysis(0.2),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("model").is_none());
    }

    #[test]
    fn completion_text_follows_the_fixed_path() {
        let response: GenerateContentResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[{"text":"{\"meta\":{}}"}]}}]}"#,
        )
        .unwrap();
        assert_eq!(response.completion_text(), Some("{\"meta\":{}}"));
    }

    #[test]
    fn missing_or_empty_completion_is_none() {
        let empty: GenerateContentResponse = serde_json::from_str(r#"{"candidates":[]}"#).unwrap();
        assert_eq!(empty.completion_text(), None);

        let blank: GenerateContentResponse =
            serde_json::from_str(r#"{"candidates":[{"content":{"parts":[{"text":""}]}}]}"#)
                .unwrap();
        assert_eq!(blank.completion_text(), None);

        let no_parts: GenerateContentResponse =
            serde_json::from_str(r#"{"candidates":[{"content":{"parts":[]}}]}"#).unwrap();
        assert_eq!(no_parts.completion_text(), None);
    }

    #[test]
    fn content_less_candidate_still_decodes() {
        // A safety stop returns a candidate with no content at all.
        let stopped: GenerateContentResponse =
            serde_json::from_str(r#"{"candidates":[{"finishReason":"SAFETY"}]}"#).unwrap();
        assert_eq!(stopped.completion_text(), None);
    }
}
