//! Audio capture and loading.
//!
//! Everything the analysis needs from audio is a single in-memory
//! [`AudioAsset`]: encoded bytes, a MIME type for the provider's inline-data
//! part, and a best-effort duration for the WPM metric.

mod encoder;
mod loader;
mod probe;
mod recorder;

pub use encoder::{EncodingCandidate, pick_encoding};
pub use loader::load_audio_file;
pub use probe::duration_secs;
pub use recorder::Recorder;

/// One captured or loaded audio clip.
///
/// Immutable once created; a new capture or file selection replaces the
/// asset wholesale (see [`crate::session::ReadingSession`]).
#[derive(Debug, Clone)]
pub struct AudioAsset {
    pub data: Vec<u8>,
    pub mime_type: String,
    /// Seconds, when determinable. `None` is an accepted degraded mode, not
    /// an error: the prompt then carries an explicit "unknown" placeholder
    /// and the model is told it cannot compute WPM.
    pub duration_secs: Option<f64>,
}

impl AudioAsset {
    /// Wrap encoded bytes, probing the duration as a best effort.
    pub fn new(data: Vec<u8>, mime_type: impl Into<String>) -> Self {
        let mime_type = mime_type.into();
        let duration_secs = probe::duration_secs(&data, &mime_type);
        Self {
            data,
            mime_type,
            duration_secs,
        }
    }

    /// Wrap encoded bytes with a duration already known exactly (used for
    /// recordings, where we count the samples ourselves).
    pub fn with_duration(data: Vec<u8>, mime_type: impl Into<String>, duration_secs: f64) -> Self {
        Self {
            data,
            mime_type: mime_type.into(),
            duration_secs: Some(duration_secs),
        }
    }
}
