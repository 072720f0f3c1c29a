//! Error taxonomy for the analysis pipeline.
//!
//! Validation and configuration failures are detected before any network
//! activity; HTTP failures carry the status (and, for direct provider calls,
//! the response body). A completion that is not valid JSON is *not* an error
//! here: it degrades to the raw-text path in `report::parse`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("target text is empty — nothing to align the reading against")]
    MissingTargetText,

    #[error("no audio captured — record or load a file first")]
    MissingAudio,

    #[error("microphone unavailable: {0}")]
    Microphone(String),

    #[error("audio capture failed: {0}")]
    Audio(String),

    #[error("no proxy URL and no API key configured — one of them is required")]
    Configuration,

    #[error("proxy error {status}")]
    Proxy { status: u16 },

    #[error("provider error {status}: {body}")]
    Provider { status: u16, body: String },

    #[error("the model returned no completion text")]
    EmptyCompletion,

    #[error("network request failed: {0}")]
    Transport(#[from] reqwest::Error),
}
