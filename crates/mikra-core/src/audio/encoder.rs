//! Encoding of recorded samples into a compressed container.
//!
//! Recordings prefer Opus-in-WebM, then plain WebM, then Opus-in-Ogg, then
//! Ogg — the first candidate whose encoder this ffmpeg build actually lists
//! wins. All four go through an ffmpeg subprocess; when ffmpeg is missing
//! (or carries neither opus nor vorbis) the recording falls back to
//! uncompressed WAV via hound, which needs no external tools.

use anyhow::{Context, Result};
use std::io::Cursor;
use std::path::Path;
use std::process::Command;

/// One entry in the ordered encoding preference list.
#[derive(Debug, Clone, Copy)]
pub struct EncodingCandidate {
    pub mime_type: &'static str,
    pub extension: &'static str,
    /// ffmpeg encoder name this candidate depends on.
    codec: &'static str,
    codec_args: &'static [&'static str],
}

/// Preference order for recorded audio.
const CANDIDATES: &[EncodingCandidate] = &[
    EncodingCandidate {
        mime_type: "audio/webm;codecs=opus",
        extension: "webm",
        codec: "libopus",
        codec_args: &["-c:a", "libopus", "-b:a", "48k"],
    },
    EncodingCandidate {
        mime_type: "audio/webm",
        extension: "webm",
        codec: "libvorbis",
        codec_args: &["-c:a", "libvorbis"],
    },
    EncodingCandidate {
        mime_type: "audio/ogg;codecs=opus",
        extension: "ogg",
        codec: "libopus",
        codec_args: &["-c:a", "libopus", "-b:a", "48k"],
    },
    EncodingCandidate {
        mime_type: "audio/ogg",
        extension: "ogg",
        codec: "libvorbis",
        codec_args: &["-c:a", "libvorbis"],
    },
];

/// Pick the first candidate whose encoder this ffmpeg build supports, or
/// `None` when ffmpeg is unavailable (or carries neither opus nor vorbis)
/// and the caller should fall back to WAV.
pub fn pick_encoding() -> Option<&'static EncodingCandidate> {
    let encoders = ffmpeg_encoders()?;
    first_supported(&encoders)
}

/// `ffmpeg -encoders` output, or `None` when ffmpeg cannot be run.
fn ffmpeg_encoders() -> Option<String> {
    let out = Command::new("ffmpeg")
        .args(["-hide_banner", "-encoders"])
        .output()
        .ok()?;
    if !out.status.success() {
        return None;
    }
    Some(String::from_utf8_lossy(&out.stdout).into_owned())
}

fn first_supported(encoders: &str) -> Option<&'static EncodingCandidate> {
    CANDIDATES.iter().find(|c| encoders.contains(c.codec))
}

/// Encode raw f32 PCM samples into `(bytes, mime_type)` using the preferred
/// encoding, or WAV when no compressed encoder is available.
pub fn encode_samples(
    samples: &[f32],
    sample_rate: u32,
    channels: u16,
) -> Result<(Vec<u8>, &'static str)> {
    let wav = samples_to_wav(samples, sample_rate, channels)?;

    match pick_encoding() {
        Some(candidate) => {
            let data = convert_wav(&wav, candidate)
                .with_context(|| format!("encoding to {} failed", candidate.mime_type))?;
            Ok((data, candidate.mime_type))
        }
        None => {
            crate::verbose!("ffmpeg not found, keeping recording as WAV");
            Ok((wav, "audio/wav"))
        }
    }
}

/// Write samples into an in-memory 16-bit PCM WAV.
fn samples_to_wav(samples: &[f32], sample_rate: u32, channels: u16) -> Result<Vec<u8>> {
    let spec = hound::WavSpec {
        channels,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut cursor = Cursor::new(Vec::new());
    {
        let mut writer =
            hound::WavWriter::new(&mut cursor, spec).context("failed to create WAV writer")?;
        for &sample in samples {
            let clamped = sample.clamp(-1.0, 1.0);
            writer.write_sample((clamped * i16::MAX as f32) as i16)?;
        }
        writer.finalize().context("failed to finalize WAV data")?;
    }
    Ok(cursor.into_inner())
}

/// Convert in-memory WAV to the candidate container via an ffmpeg subprocess.
fn convert_wav(wav: &[u8], candidate: &EncodingCandidate) -> Result<Vec<u8>> {
    let temp_dir = std::env::temp_dir();
    let unique_id = format!(
        "{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or(0),
    );
    let wav_path = temp_dir.join(format!("mikra_rec_{unique_id}.wav"));
    let out_path = temp_dir.join(format!("mikra_rec_{unique_id}.{}", candidate.extension));

    std::fs::write(&wav_path, wav).context("failed to write temporary WAV file")?;
    let result = run_ffmpeg(&wav_path, &out_path, candidate);
    let _ = std::fs::remove_file(&wav_path);
    let data = result;
    let _ = std::fs::remove_file(&out_path);
    data
}

fn run_ffmpeg(input: &Path, output: &Path, candidate: &EncodingCandidate) -> Result<Vec<u8>> {
    let mut args: Vec<&str> = vec!["-hide_banner", "-loglevel", "error", "-i"];
    args.push(input.to_str().context("temp path is not valid UTF-8")?);
    args.extend_from_slice(candidate.codec_args);
    args.push("-y");
    args.push(output.to_str().context("temp path is not valid UTF-8")?);

    let out = Command::new("ffmpeg")
        .args(&args)
        .output()
        .context("failed to execute ffmpeg")?;

    if !out.status.success() {
        let stderr = String::from_utf8_lossy(&out.stderr);
        anyhow::bail!("ffmpeg conversion failed: {stderr}");
    }

    std::fs::read(output).context("failed to read encoded audio")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wav_fallback_roundtrips_through_hound() {
        let samples: Vec<f32> = (0..1600).map(|i| (i as f32 / 100.0).sin() * 0.5).collect();
        let wav = samples_to_wav(&samples, 16000, 1).unwrap();

        let reader = hound::WavReader::new(Cursor::new(&wav)).unwrap();
        assert_eq!(reader.spec().sample_rate, 16000);
        assert_eq!(reader.spec().channels, 1);
        assert_eq!(reader.len() as usize, samples.len());
    }

    #[test]
    fn preference_list_starts_with_opus_webm() {
        assert_eq!(CANDIDATES[0].mime_type, "audio/webm;codecs=opus");
        assert_eq!(CANDIDATES[3].mime_type, "audio/ogg");
    }

    #[test]
    fn candidate_selection_follows_encoder_availability() {
        let both = "A..... libopus    Opus\nA..... libvorbis  Vorbis\n";
        assert_eq!(
            first_supported(both).unwrap().mime_type,
            "audio/webm;codecs=opus"
        );

        // A build without libopus falls through to the vorbis candidate.
        let vorbis_only = "A..... libvorbis  Vorbis\n";
        assert_eq!(first_supported(vorbis_only).unwrap().mime_type, "audio/webm");

        let neither = "A..... aac  AAC\n";
        assert!(first_supported(neither).is_none());
    }
}
