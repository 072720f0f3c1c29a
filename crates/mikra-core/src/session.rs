//! Session state for one analysis flow.
//!
//! The current audio asset is the only shared mutable resource in the
//! system. It lives here, owned explicitly, rather than in module-level
//! state: capture actions replace it wholesale, `clear` drops it, and
//! `prepare_request` is the single gate through which a submission can be
//! built.

use crate::audio::AudioAsset;
use crate::error::AnalysisError;
use crate::request::{AnalysisRequest, Routing, TextMode};
use crate::text::count_words;

/// Optional context fields a teacher may attach to a submission.
#[derive(Debug, Clone, Default)]
pub struct StudentContext {
    pub grade: Option<String>,
    pub age: Option<String>,
    pub dialect: Option<String>,
    pub teacher_notes: Option<String>,
}

/// Holds the current audio asset between capture and submission.
#[derive(Debug, Default)]
pub struct ReadingSession {
    audio: Option<AudioAsset>,
}

impl ReadingSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace any previously held asset with a new capture.
    pub fn replace_audio(&mut self, asset: AudioAsset) {
        self.audio = Some(asset);
    }

    /// Drop the held asset.
    pub fn clear(&mut self) {
        self.audio = None;
    }

    pub fn audio(&self) -> Option<&AudioAsset> {
        self.audio.as_ref()
    }

    /// Validate inputs and assemble an [`AnalysisRequest`].
    ///
    /// Fails before any network activity when the target text is empty or no
    /// audio has been captured; no partial state changes occur on failure.
    #[allow(clippy::too_many_arguments)]
    pub fn prepare_request(
        &self,
        target_text: &str,
        text_mode: TextMode,
        context: StudentContext,
        model: &str,
        temperature: f64,
        routing: Routing,
    ) -> Result<AnalysisRequest, AnalysisError> {
        let target_text = target_text.trim();
        if target_text.is_empty() {
            return Err(AnalysisError::MissingTargetText);
        }
        let audio = self.audio.clone().ok_or(AnalysisError::MissingAudio)?;

        Ok(AnalysisRequest {
            target_text: target_text.to_string(),
            text_mode,
            grade: context.grade,
            age: context.age,
            dialect: context.dialect,
            teacher_notes: context.teacher_notes,
            word_count: count_words(target_text),
            audio,
            model: model.to_string(),
            temperature,
            routing,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_asset() -> AudioAsset {
        AudioAsset::with_duration(vec![0u8; 64], "audio/wav", 6.0)
    }

    fn test_routing() -> Routing {
        Routing::Direct("AIza-test".into())
    }

    #[test]
    fn empty_target_text_blocks_submission() {
        let mut session = ReadingSession::new();
        session.replace_audio(test_asset());

        let err = session
            .prepare_request(
                "   ",
                TextMode::Pointed,
                StudentContext::default(),
                "gemini-3-flash-preview",
                0.2,
                test_routing(),
            )
            .unwrap_err();
        assert!(matches!(err, AnalysisError::MissingTargetText));
    }

    #[test]
    fn missing_audio_blocks_submission() {
        let session = ReadingSession::new();
        let err = session
            .prepare_request(
                "שלום עולם",
                TextMode::Pointed,
                StudentContext::default(),
                "gemini-3-flash-preview",
                0.2,
                test_routing(),
            )
            .unwrap_err();
        assert!(matches!(err, AnalysisError::MissingAudio));
    }

    #[test]
    fn word_count_is_computed_at_prepare_time() {
        let mut session = ReadingSession::new();
        session.replace_audio(test_asset());

        let request = session
            .prepare_request(
                "  שלום עולם  ",
                TextMode::Unpointed,
                StudentContext::default(),
                "gemini-3-flash-preview",
                0.2,
                test_routing(),
            )
            .unwrap();
        assert_eq!(request.word_count, 2);
        assert_eq!(request.target_text, "שלום עולם");
    }

    #[test]
    fn new_capture_replaces_previous_asset() {
        let mut session = ReadingSession::new();
        session.replace_audio(test_asset());
        session.replace_audio(AudioAsset::with_duration(vec![1u8; 8], "audio/ogg", 2.0));

        let audio = session.audio().unwrap();
        assert_eq!(audio.mime_type, "audio/ogg");
        assert_eq!(audio.data.len(), 8);

        session.clear();
        assert!(session.audio().is_none());
    }
}
