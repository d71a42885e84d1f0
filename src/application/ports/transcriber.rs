//! Transcription port interface

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::speech::AudioClip;

/// Transcription errors
#[derive(Debug, Clone, Error)]
pub enum TranscriptionError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Transcription service returned HTTP {0}")]
    Http(u16),

    #[error("Transcription service reported failure: {0}")]
    ServiceFailed(String),

    #[error("Failed to parse transcription response: {0}")]
    Parse(String),

    #[error("Transcription service returned no text")]
    EmptyResponse,
}

/// Port for turning a captured clip into text
#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Transcribe an audio clip.
    ///
    /// # Arguments
    /// * `clip` - The captured audio to transcribe
    ///
    /// # Returns
    /// The transcribed text or an error
    async fn transcribe(&self, clip: &AudioClip) -> Result<String, TranscriptionError>;
}

#[async_trait]
impl Transcriber for Box<dyn Transcriber> {
    async fn transcribe(&self, clip: &AudioClip) -> Result<String, TranscriptionError> {
        self.as_ref().transcribe(clip).await
    }
}
