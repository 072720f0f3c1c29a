//! Microphone capture via cpal.
//!
//! Samples are buffered in memory for the duration of the take; `stop()`
//! encodes them into a single [`AudioAsset`] and releases the input stream.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{SampleFormat, Stream, StreamConfig};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use super::{AudioAsset, encoder};
use crate::error::AnalysisError;

/// Stream errors during the current take (non-fatal, rate-limited logging).
static STREAM_ERROR_COUNT: AtomicU64 = AtomicU64::new(0);

/// An in-progress microphone recording.
pub struct Recorder {
    stream: Stream,
    samples: Arc<Mutex<Vec<f32>>>,
    sample_rate: u32,
    channels: u16,
}

impl Recorder {
    /// Open the default input device and start buffering audio.
    ///
    /// Fails with [`AnalysisError::Microphone`] when no device is available
    /// or the stream cannot be opened (the CLI equivalent of a denied
    /// microphone permission).
    pub fn start() -> Result<Self, AnalysisError> {
        STREAM_ERROR_COUNT.store(0, Ordering::Relaxed);

        let host = cpal::default_host();
        let device = host
            .default_input_device()
            .ok_or_else(|| AnalysisError::Microphone("no input device found".into()))?;

        let config = device
            .default_input_config()
            .map_err(|e| AnalysisError::Microphone(e.to_string()))?;
        let sample_format = config.sample_format();
        let stream_config: StreamConfig = config.into();
        let sample_rate = stream_config.sample_rate.0;
        let channels = stream_config.channels;

        crate::verbose!(
            "recording from {:?} at {} Hz, {} channel(s)",
            device.name().unwrap_or_else(|_| "unknown".into()),
            sample_rate,
            channels
        );

        let samples = Arc::new(Mutex::new(Vec::new()));

        let stream = match sample_format {
            SampleFormat::F32 => build_stream::<f32>(&device, &stream_config, samples.clone()),
            SampleFormat::I16 => build_stream::<i16>(&device, &stream_config, samples.clone()),
            SampleFormat::U16 => build_stream::<u16>(&device, &stream_config, samples.clone()),
            other => Err(AnalysisError::Microphone(format!(
                "unsupported sample format {other:?}"
            ))),
        }?;

        stream
            .play()
            .map_err(|e| AnalysisError::Microphone(e.to_string()))?;

        Ok(Self {
            stream,
            samples,
            sample_rate,
            channels,
        })
    }

    /// Stop capturing, release the microphone, and encode the take.
    ///
    /// The duration is exact here: it comes from the sample count, not from
    /// a decoder probe.
    pub fn stop(self) -> Result<AudioAsset, AnalysisError> {
        drop(self.stream); // releases the input device

        let samples = self
            .samples
            .lock()
            .map_err(|_| AnalysisError::Audio("sample buffer poisoned".into()))?
            .clone();

        if samples.is_empty() {
            return Err(AnalysisError::Audio("recording produced no audio".into()));
        }

        let duration_secs =
            samples.len() as f64 / (self.sample_rate as f64 * self.channels as f64);

        let (data, mime_type) = encoder::encode_samples(&samples, self.sample_rate, self.channels)
            .map_err(|e| AnalysisError::Audio(e.to_string()))?;

        crate::verbose!(
            "captured {:.1}s of audio, {:.1} KB as {}",
            duration_secs,
            data.len() as f64 / 1024.0,
            mime_type
        );

        Ok(AudioAsset::with_duration(data, mime_type, duration_secs))
    }
}

fn build_stream<T>(
    device: &cpal::Device,
    config: &StreamConfig,
    samples: Arc<Mutex<Vec<f32>>>,
) -> Result<Stream, AnalysisError>
where
    T: cpal::Sample + cpal::SizedSample,
    f32: cpal::FromSample<T>,
{
    // ALSA streams report occasional non-fatal errors; log the first and
    // suppress the rest.
    let err_fn = |err| {
        let count = STREAM_ERROR_COUNT.fetch_add(1, Ordering::Relaxed);
        if count == 0 {
            crate::verbose!("audio stream error (non-fatal): {err}");
        }
    };

    device
        .build_input_stream(
            config,
            move |data: &[T], _: &cpal::InputCallbackInfo| {
                let mut buffer = match samples.lock() {
                    Ok(buffer) => buffer,
                    Err(_) => return,
                };
                buffer.extend(data.iter().map(|&s| -> f32 { cpal::Sample::from_sample(s) }));
            },
            err_fn,
            None,
        )
        .map_err(|e| AnalysisError::Microphone(e.to_string()))
}
