//! Microphone capture using cpal
//!
//! Captures mono PCM at the transcription service's 16kHz rate,
//! resampling when the device cannot open at 16kHz directly. Capture
//! runs open-ended: the controller opens the stream, holds it for the
//! listen window, then stops it and takes the encoded WAV clip.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Mutex as StdMutex};

use async_trait::async_trait;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{SampleFormat, SampleRate, StreamConfig};
use rubato::{FftFixedIn, Resampler};
use tokio::time::Duration as TokioDuration;

use super::wav::{encode_to_wav, TARGET_SAMPLE_RATE};
use crate::application::ports::{AudioCapture, CaptureError};
use crate::domain::speech::AudioClip;

/// Microphone capture adapter.
///
/// cpal streams are not Send, so the stream lives on a thread of its
/// own and the port talks to it through the shared buffer and flags.
pub struct CpalCapture {
    /// Mono samples at the device rate, filled by the stream callback
    audio_buffer: Arc<StdMutex<Vec<i16>>>,
    /// Rate the device actually opened at
    device_sample_rate: Arc<AtomicU32>,
    /// Capture state
    is_capturing: Arc<AtomicBool>,
    /// Why the stream thread bailed, if it did
    start_failure: Arc<StdMutex<Option<CaptureError>>>,
}

impl CpalCapture {
    /// Create a new cpal-based capture
    pub fn new() -> Self {
        Self {
            audio_buffer: Arc::new(StdMutex::new(Vec::new())),
            device_sample_rate: Arc::new(AtomicU32::new(0)),
            is_capturing: Arc::new(AtomicBool::new(false)),
            start_failure: Arc::new(StdMutex::new(None)),
        }
    }

    /// Map a device error message onto the capture error taxonomy
    fn classify_device_error(message: &str) -> CaptureError {
        let lower = message.to_lowercase();
        if lower.contains("denied") || lower.contains("permission") {
            CaptureError::PermissionDenied
        } else if lower.contains("busy") || lower.contains("in use") {
            CaptureError::DeviceBusy
        } else {
            CaptureError::DeviceError(message.to_string())
        }
    }

    /// Pick an input config: i16 or f32 only, the fewest channels the
    /// device offers, and a rate range covering 16kHz when available.
    fn pick_input_config(
        device: &cpal::Device,
    ) -> Result<(StreamConfig, SampleFormat), CaptureError> {
        let covers_target = |range: &cpal::SupportedStreamConfigRange| {
            range.min_sample_rate().0 <= TARGET_SAMPLE_RATE
                && range.max_sample_rate().0 >= TARGET_SAMPLE_RATE
        };

        let range = device
            .supported_input_configs()
            .map_err(|e| Self::classify_device_error(&e.to_string()))?
            .filter(|range| {
                matches!(range.sample_format(), SampleFormat::I16 | SampleFormat::F32)
            })
            .min_by_key(|range| (range.channels(), !covers_target(range)))
            .ok_or_else(|| CaptureError::DeviceError("No usable input config found".into()))?;

        let sample_rate = if covers_target(&range) {
            SampleRate(TARGET_SAMPLE_RATE)
        } else {
            range.min_sample_rate()
        };

        let sample_format = range.sample_format();
        let config = StreamConfig {
            channels: range.channels(),
            sample_rate,
            buffer_size: cpal::BufferSize::Default,
        };

        Ok((config, sample_format))
    }

    /// Append a callback's PCM to the shared buffer, mixed to mono.
    /// Dropped once capture stops so a draining stream adds nothing.
    fn append_samples(
        buffer: &StdMutex<Vec<i16>>,
        live: &AtomicBool,
        channels: u16,
        pcm: &[i16],
    ) {
        if !live.load(Ordering::SeqCst) {
            return;
        }
        let mono = Self::mix_to_mono(pcm, channels);
        if let Ok(mut buffer) = buffer.lock() {
            buffer.extend_from_slice(&mono);
        }
    }

    /// Average interleaved frames down to one channel
    fn mix_to_mono(samples: &[i16], channels: u16) -> Vec<i16> {
        if channels == 1 {
            return samples.to_vec();
        }

        samples
            .chunks(channels as usize)
            .map(|frame| {
                let sum: i32 = frame.iter().map(|&s| i32::from(s)).sum();
                (sum / i32::from(channels)) as i16
            })
            .collect()
    }

    /// Resample device-rate audio to 16kHz
    fn resample_to_16k(samples: &[i16], source_rate: u32) -> Result<Vec<i16>, CaptureError> {
        if source_rate == TARGET_SAMPLE_RATE {
            return Ok(samples.to_vec());
        }

        let mut resampler = FftFixedIn::<f32>::new(
            source_rate as usize,
            TARGET_SAMPLE_RATE as usize,
            1024, // chunk size
            2,    // sub-chunks
            1,    // mono
        )
        .map_err(|e| CaptureError::Encoding(format!("Resampler init failed: {}", e)))?;

        let ratio = TARGET_SAMPLE_RATE as f64 / source_rate as f64;
        let expected_len = (samples.len() as f64 * ratio).ceil() as usize;

        // FftFixedIn consumes fixed-size chunks; zero-pad the tail so
        // the last partial chunk still goes through.
        let chunk_len = resampler.input_frames_next();
        let mut input: Vec<f32> = samples.iter().map(|&s| f32::from(s) / 32768.0).collect();
        let remainder = input.len() % chunk_len;
        if remainder != 0 {
            input.resize(input.len() + chunk_len - remainder, 0.0);
        }

        let mut output = Vec::with_capacity(expected_len);
        for chunk in input.chunks(chunk_len) {
            let resampled = resampler
                .process(&[chunk.to_vec()], None)
                .map_err(|e| CaptureError::Encoding(format!("Resampling failed: {}", e)))?;
            output.extend(resampled[0].iter().map(|&s| (s * 32767.0) as i16));
        }

        // Drop the samples the tail padding produced
        output.truncate(expected_len);

        Ok(output)
    }

    /// Encode PCM samples to a WAV clip at the service rate
    fn encode_clip(samples: &[i16], sample_rate: u32) -> Result<AudioClip, CaptureError> {
        let resampled = Self::resample_to_16k(samples, sample_rate)?;

        let wav_data =
            encode_to_wav(&resampled).map_err(|e| CaptureError::Encoding(e.to_string()))?;

        Ok(AudioClip::wav(wav_data))
    }
}

impl Default for CpalCapture {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AudioCapture for CpalCapture {
    async fn start(&self) -> Result<(), CaptureError> {
        if self.is_capturing.load(Ordering::SeqCst) {
            return Err(CaptureError::DeviceBusy);
        }

        // Clear state from the previous capture
        self.audio_buffer
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clear();
        self.start_failure
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .take();

        self.is_capturing.store(true, Ordering::SeqCst);

        let audio_buffer = Arc::clone(&self.audio_buffer);
        let device_sample_rate = Arc::clone(&self.device_sample_rate);
        let is_capturing = Arc::clone(&self.is_capturing);
        let start_failure = Arc::clone(&self.start_failure);

        std::thread::spawn(move || {
            let bail = |error: CaptureError| {
                if let Ok(mut failure) = start_failure.lock() {
                    *failure = Some(error);
                }
                is_capturing.store(false, Ordering::SeqCst);
            };

            let device = match cpal::default_host().default_input_device() {
                Some(device) => device,
                None => return bail(CaptureError::NoAudioDevice),
            };

            let (config, sample_format) = match CpalCapture::pick_input_config(&device) {
                Ok(picked) => picked,
                Err(e) => return bail(e),
            };

            let channels = config.channels;
            device_sample_rate.store(config.sample_rate.0, Ordering::SeqCst);

            let buffer = Arc::clone(&audio_buffer);
            let live = Arc::clone(&is_capturing);
            let on_error = |err| eprintln!("Warning: capture stream error: {}", err);

            let stream_result = match sample_format {
                SampleFormat::I16 => device.build_input_stream(
                    &config,
                    move |data: &[i16], _: &cpal::InputCallbackInfo| {
                        CpalCapture::append_samples(&buffer, &live, channels, data);
                    },
                    on_error,
                    None,
                ),

                SampleFormat::F32 => device.build_input_stream(
                    &config,
                    move |data: &[f32], _: &cpal::InputCallbackInfo| {
                        let pcm: Vec<i16> = data.iter().map(|&s| (s * 32767.0) as i16).collect();
                        CpalCapture::append_samples(&buffer, &live, channels, &pcm);
                    },
                    on_error,
                    None,
                ),

                _ => {
                    return bail(CaptureError::DeviceError(
                        "Unsupported sample format".into(),
                    ))
                }
            };

            let stream = match stream_result {
                Ok(stream) => stream,
                Err(e) => return bail(CpalCapture::classify_device_error(&e.to_string())),
            };

            if let Err(e) = stream.play() {
                return bail(CpalCapture::classify_device_error(&e.to_string()));
            }

            // Hold the stream open until stop or cancel flips the flag
            while is_capturing.load(Ordering::SeqCst) {
                std::thread::sleep(std::time::Duration::from_millis(100));
            }

            drop(stream);
        });

        // Let the thread open the device, then surface its verdict
        tokio::time::sleep(TokioDuration::from_millis(50)).await;

        if !self.is_capturing.load(Ordering::SeqCst) {
            let failure = self
                .start_failure
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .take();
            return Err(failure
                .unwrap_or_else(|| CaptureError::DeviceError("Failed to start capture".into())));
        }

        Ok(())
    }

    async fn stop(&self) -> Result<Option<AudioClip>, CaptureError> {
        if !self.is_capturing.load(Ordering::SeqCst) {
            return Ok(None);
        }

        self.is_capturing.store(false, Ordering::SeqCst);

        // Give the stream thread a moment to wind down
        tokio::time::sleep(TokioDuration::from_millis(100)).await;

        let sample_rate = self.device_sample_rate.load(Ordering::SeqCst);
        if sample_rate == 0 {
            return Ok(None);
        }

        let samples = {
            let mut buffer = self.audio_buffer.lock().unwrap_or_else(|e| e.into_inner());
            std::mem::take(&mut *buffer)
        };

        if samples.is_empty() {
            return Ok(None);
        }

        // Resampling is CPU work; keep it off the dialogue's thread
        let clip = tokio::task::spawn_blocking(move || Self::encode_clip(&samples, sample_rate))
            .await
            .map_err(|e| CaptureError::Encoding(format!("Encode task error: {}", e)))??;

        Ok(Some(clip))
    }

    async fn cancel(&self) -> Result<(), CaptureError> {
        let was_capturing = self.is_capturing.swap(false, Ordering::SeqCst);

        if was_capturing {
            tokio::time::sleep(TokioDuration::from_millis(100)).await;
        }

        self.audio_buffer
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clear();

        Ok(())
    }

    fn is_capturing(&self) -> bool {
        self.is_capturing.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mix_to_mono_single_channel() {
        let mono = vec![100i16, 200, 300];
        let result = CpalCapture::mix_to_mono(&mono, 1);
        assert_eq!(result, mono);
    }

    #[test]
    fn mix_to_mono_averages_pairs() {
        let stereo = vec![100i16, 200, 300, 400];
        let result = CpalCapture::mix_to_mono(&stereo, 2);
        assert_eq!(result, vec![150, 350]);
    }

    #[test]
    fn resample_same_rate_is_identity() {
        let samples = vec![1i16, 2, 3, 4];
        let result = CpalCapture::resample_to_16k(&samples, TARGET_SAMPLE_RATE).unwrap();
        assert_eq!(result, samples);
    }

    #[test]
    fn resample_thirds_48k_input() {
        let samples = vec![1000i16; 4800];
        let result = CpalCapture::resample_to_16k(&samples, 48000).unwrap();
        assert_eq!(result.len(), 1600);
    }

    #[test]
    fn classify_permission_messages() {
        assert!(matches!(
            CpalCapture::classify_device_error("Access denied by the OS"),
            CaptureError::PermissionDenied
        ));
        assert!(matches!(
            CpalCapture::classify_device_error("device is busy"),
            CaptureError::DeviceBusy
        ));
        assert!(matches!(
            CpalCapture::classify_device_error("something else"),
            CaptureError::DeviceError(_)
        ));
    }

    #[test]
    fn sample_append_respects_the_live_flag() {
        let buffer = StdMutex::new(Vec::new());
        let live = AtomicBool::new(true);

        CpalCapture::append_samples(&buffer, &live, 2, &[100, 200]);
        live.store(false, Ordering::SeqCst);
        CpalCapture::append_samples(&buffer, &live, 2, &[300, 400]);

        assert_eq!(*buffer.lock().unwrap(), vec![150]);
    }

    #[tokio::test]
    async fn stop_without_start_is_noop() {
        let capture = CpalCapture::new();
        assert!(!capture.is_capturing());
        let clip = capture.stop().await.unwrap();
        assert!(clip.is_none());
    }

    #[tokio::test]
    async fn cancel_without_start_is_noop() {
        let capture = CpalCapture::new();
        assert!(capture.cancel().await.is_ok());
    }
}
