//! Best-effort duration probing.
//!
//! Duration is only ever an input to the WPM metric and a prompt field, so
//! probing failures are an accepted approximation: the probe answers `None`
//! and the rest of the pipeline carries on with an "unknown" placeholder.
//! There is no guaranteed-accurate duration source for arbitrary encoded
//! audio without fully decoding it.

use std::io::Cursor;
use std::process::Command;

/// Probe the duration of encoded audio, in seconds.
///
/// WAV is parsed directly with hound; everything else goes through an
/// ffprobe subprocess on a temp file, which is removed afterwards. Any
/// failure yields `None` rather than an error.
pub fn duration_secs(data: &[u8], mime_type: &str) -> Option<f64> {
    if mime_type == "audio/wav" || mime_type == "audio/x-wav" {
        return wav_duration(data);
    }
    ffprobe_duration(data, mime_type)
}

fn wav_duration(data: &[u8]) -> Option<f64> {
    let reader = hound::WavReader::new(Cursor::new(data)).ok()?;
    let spec = reader.spec();
    if spec.sample_rate == 0 || spec.channels == 0 {
        return None;
    }
    let frames = reader.duration() as f64;
    Some(frames / spec.sample_rate as f64)
}

fn ffprobe_duration(data: &[u8], mime_type: &str) -> Option<f64> {
    let extension = extension_for_mime(mime_type);
    let path = std::env::temp_dir().join(format!(
        "mikra_probe_{}_{}.{extension}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or(0),
    ));

    if std::fs::write(&path, data).is_err() {
        return None;
    }

    let output = Command::new("ffprobe")
        .args([
            "-v",
            "error",
            "-show_entries",
            "format=duration",
            "-of",
            "default=noprint_wrappers=1:nokey=1",
        ])
        .arg(&path)
        .output();

    let _ = std::fs::remove_file(&path);

    let output = output.ok()?;
    if !output.status.success() {
        crate::verbose!("ffprobe failed, duration unknown");
        return None;
    }

    let text = String::from_utf8_lossy(&output.stdout);
    let secs: f64 = text.trim().parse().ok()?;
    secs.is_finite().then_some(secs)
}

fn extension_for_mime(mime_type: &str) -> &'static str {
    // Strip codec parameters like ";codecs=opus" before matching.
    match mime_type.split(';').next().unwrap_or("") {
        "audio/webm" => "webm",
        "audio/ogg" => "ogg",
        "audio/mpeg" => "mp3",
        "audio/mp4" => "m4a",
        "audio/aac" => "aac",
        "audio/flac" => "flac",
        _ => "bin",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wav_bytes(sample_rate: u32, frames: usize) -> Vec<u8> {
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut cursor = Cursor::new(Vec::new());
        {
            let mut writer = hound::WavWriter::new(&mut cursor, spec).unwrap();
            for _ in 0..frames {
                writer.write_sample(0i16).unwrap();
            }
            writer.finalize().unwrap();
        }
        cursor.into_inner()
    }

    #[test]
    fn wav_duration_from_header() {
        let data = wav_bytes(16000, 48000); // three seconds
        let secs = duration_secs(&data, "audio/wav").unwrap();
        assert!((secs - 3.0).abs() < 0.01);
    }

    #[test]
    fn garbage_input_probes_to_none() {
        assert_eq!(duration_secs(b"not a wav file", "audio/wav"), None);
    }

    #[test]
    fn mime_parameters_are_ignored_for_extension() {
        assert_eq!(extension_for_mime("audio/ogg;codecs=opus"), "ogg");
        assert_eq!(extension_for_mime("audio/webm"), "webm");
    }
}
