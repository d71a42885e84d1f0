//! Audio capture port interface

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::speech::AudioClip;

/// Capture errors
#[derive(Debug, Clone, Error)]
pub enum CaptureError {
    #[error("Microphone access was denied")]
    PermissionDenied,

    #[error("Another capture is already active")]
    DeviceBusy,

    #[error("No audio input device available")]
    NoAudioDevice,

    #[error("Audio device error: {0}")]
    DeviceError(String),

    #[error("Failed to encode captured audio: {0}")]
    Encoding(String),
}

impl CaptureError {
    /// Fatal errors abort the session instead of feeding the retry loop
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::PermissionDenied | Self::DeviceBusy | Self::NoAudioDevice
        )
    }
}

/// Port for exclusive microphone capture.
///
/// One capture may be live at a time; the controller guarantees it
/// never starts a second one before stopping the first. The capture
/// path must leave audio playback free so prompts and cues can sound
/// while the microphone is open.
#[async_trait]
pub trait AudioCapture: Send + Sync {
    /// Open the microphone and start buffering audio.
    async fn start(&self) -> Result<(), CaptureError>;

    /// Stop the capture and return the encoded clip.
    ///
    /// # Returns
    /// The captured clip, or None when nothing was captured. Calling
    /// stop with no live capture is a no-op returning None.
    async fn stop(&self) -> Result<Option<AudioClip>, CaptureError>;

    /// Discard the capture without returning a clip. Idempotent.
    async fn cancel(&self) -> Result<(), CaptureError>;

    /// Check if a capture is currently live
    fn is_capturing(&self) -> bool;
}

#[async_trait]
impl AudioCapture for Box<dyn AudioCapture> {
    async fn start(&self) -> Result<(), CaptureError> {
        self.as_ref().start().await
    }

    async fn stop(&self) -> Result<Option<AudioClip>, CaptureError> {
        self.as_ref().stop().await
    }

    async fn cancel(&self) -> Result<(), CaptureError> {
        self.as_ref().cancel().await
    }

    fn is_capturing(&self) -> bool {
        self.as_ref().is_capturing()
    }
}
