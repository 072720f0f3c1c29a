//! Loading a pre-recorded audio file as the current asset.

use anyhow::{Context, Result};
use std::path::Path;

use super::AudioAsset;

/// Load an audio file as-is, inferring the MIME type from the extension.
///
/// Supported formats: wav, mp3, webm, ogg, opus, m4a, aac, flac. The bytes
/// are sent to the provider unmodified; duration is probed best-effort.
pub fn load_audio_file(path: &Path) -> Result<AudioAsset> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let mime_type = mime_for_extension(&extension).with_context(|| {
        format!(
            "unsupported audio format: '{extension}'. Supported: wav, mp3, webm, ogg, opus, m4a, aac, flac"
        )
    })?;

    let data = std::fs::read(path)
        .with_context(|| format!("failed to read audio file {}", path.display()))?;

    crate::verbose!(
        "loaded {} ({:.1} KB, {})",
        path.display(),
        data.len() as f64 / 1024.0,
        mime_type
    );

    Ok(AudioAsset::new(data, mime_type))
}

fn mime_for_extension(extension: &str) -> Option<&'static str> {
    match extension {
        "wav" => Some("audio/wav"),
        "mp3" => Some("audio/mpeg"),
        "webm" => Some("audio/webm"),
        "ogg" => Some("audio/ogg"),
        "opus" => Some("audio/ogg;codecs=opus"),
        "m4a" => Some("audio/mp4"),
        "aac" => Some("audio/aac"),
        "flac" => Some("audio/flac"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_extensions_map_to_mime_types() {
        assert_eq!(mime_for_extension("wav"), Some("audio/wav"));
        assert_eq!(mime_for_extension("mp3"), Some("audio/mpeg"));
        assert_eq!(mime_for_extension("webm"), Some("audio/webm"));
        assert_eq!(mime_for_extension("xyz"), None);
    }

    #[test]
    fn unsupported_extension_fails() {
        let dir = std::env::temp_dir();
        let path = dir.join("mikra_loader_test.txt");
        std::fs::write(&path, b"not audio").unwrap();
        let result = load_audio_file(&path);
        let _ = std::fs::remove_file(&path);
        assert!(result.is_err());
    }
}
