//! Microphone recording with an explicit start/stop lifecycle.
//!
//! The recorder owns the input stream for the duration of one recording and
//! releases the device on every exit path, including acquisition failure
//! (a failed `start` holds no stream). `stop` returns the captured audio
//! exactly once per start/stop cycle.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Instant;

use anyhow::{Context, Result};
use cpal::traits::{DeviceTrait, StreamTrait};
use cpal::{SampleFormat, Stream, StreamConfig};

use super::devices::find_input_device;
use super::encoder::encode_wav;

/// Stream errors from the current recording, reset on each start.
/// Used for rate-limited reporting; these are common on Linux and non-fatal.
static STREAM_ERROR_COUNT: AtomicU64 = AtomicU64::new(0);

/// Configuration for the microphone recorder.
#[derive(Debug, Clone, Default)]
pub struct RecorderConfig {
    /// Device name to use (None = system default)
    pub device_name: Option<String>,
}

impl RecorderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_device(mut self, device_name: impl Into<String>) -> Self {
        self.device_name = Some(device_name.into());
        self
    }
}

/// Captured audio plus elapsed wall-clock duration.
#[derive(Debug, Clone)]
pub struct RecordingOutput {
    pub wav_data: Vec<u8>,
    pub duration_sec: u32,
}

pub struct MicRecorder {
    config: RecorderConfig,
    stream: Option<Stream>,
    samples: Arc<Mutex<Vec<f32>>>,
    sample_rate: u32,
    started_at: Option<Instant>,
}

impl MicRecorder {
    pub fn new(config: RecorderConfig) -> Self {
        Self {
            config,
            stream: None,
            samples: Arc::new(Mutex::new(Vec::new())),
            sample_rate: 0,
            started_at: None,
        }
    }

    pub fn is_recording(&self) -> bool {
        self.stream.is_some()
    }

    /// Acquire the input device and begin buffering samples.
    pub fn start(&mut self) -> Result<()> {
        if self.stream.is_some() {
            anyhow::bail!("Recording already in progress");
        }
        STREAM_ERROR_COUNT.store(0, Ordering::Relaxed);

        let device = find_input_device(self.config.device_name.as_deref())?;
        let supported = device
            .default_input_config()
            .context("Failed to query default input config")?;
        self.sample_rate = supported.sample_rate();
        let channels = supported.channels();
        let stream_config: StreamConfig = supported.clone().into();

        self.samples.lock().unwrap().clear();
        let samples = Arc::clone(&self.samples);

        let stream = match supported.sample_format() {
            SampleFormat::F32 => {
                build_input_stream::<f32>(&device, &stream_config, channels, samples)
            }
            SampleFormat::I16 => {
                build_input_stream::<i16>(&device, &stream_config, channels, samples)
            }
            SampleFormat::U16 => {
                build_input_stream::<u16>(&device, &stream_config, channels, samples)
            }
            other => anyhow::bail!("Unsupported sample format: {other:?}"),
        }?;

        stream.play().context("Failed to start audio stream")?;
        self.started_at = Some(Instant::now());
        self.stream = Some(stream);
        crate::verbose!("Recording started at {} Hz", self.sample_rate);
        Ok(())
    }

    /// Stop capture, release the device, and return the captured audio.
    pub fn stop(&mut self) -> Result<RecordingOutput> {
        let stream = self.stream.take().context("No recording in progress")?;
        // Close the device before any encoding work.
        drop(stream);

        let duration_sec = self
            .started_at
            .take()
            .map(|t| t.elapsed().as_secs_f64().round() as u32)
            .unwrap_or(0);

        let captured: Vec<f32> = std::mem::take(&mut *self.samples.lock().unwrap());
        let errors = STREAM_ERROR_COUNT.load(Ordering::Relaxed);
        if errors > 0 {
            crate::verbose!("Audio stream reported {errors} non-fatal errors during recording");
        }

        let wav_data = encode_wav(&captured, self.sample_rate)?;
        Ok(RecordingOutput {
            wav_data,
            duration_sec,
        })
    }
}

/// Build an input stream that downmixes interleaved frames to mono f32 and
/// appends them to the shared buffer.
fn build_input_stream<T>(
    device: &cpal::Device,
    config: &StreamConfig,
    channels: u16,
    samples: Arc<Mutex<Vec<f32>>>,
) -> Result<Stream>
where
    T: cpal::Sample + cpal::SizedSample,
    f32: cpal::FromSample<T>,
{
    // Rate-limited handler for stream errors (buffer timing, USB hiccups).
    let err_fn = |err: cpal::StreamError| {
        let count = STREAM_ERROR_COUNT.fetch_add(1, Ordering::Relaxed);
        if count == 0 {
            crate::verbose!("Audio stream error (non-fatal): {err}");
        } else if count.is_multiple_of(1000) {
            crate::verbose!("Audio stream: {count} non-fatal errors (recording continues)");
        }
    };

    let channels = channels.max(1) as usize;
    let stream = device.build_input_stream(
        config,
        move |data: &[T], _: &cpal::InputCallbackInfo| {
            let mut buffer = samples.lock().unwrap();
            for frame in data.chunks(channels) {
                let mut sum = 0.0f32;
                for &sample in frame {
                    let converted: f32 = cpal::Sample::from_sample(sample);
                    sum += converted;
                }
                buffer.push(sum / frame.len() as f32);
            }
        },
        err_fn,
        None,
    )?;

    Ok(stream)
}
