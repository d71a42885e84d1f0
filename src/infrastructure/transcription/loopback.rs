//! Loopback transcriber for text mode
//!
//! Decodes the clip bytes as UTF-8 instead of calling the remote
//! service. Paired with the scripted capture so the whole dialogue
//! runs offline.

use async_trait::async_trait;

use crate::application::ports::{Transcriber, TranscriptionError};
use crate::domain::speech::AudioClip;

/// Transcriber that treats clip bytes as the spoken text
pub struct LoopbackTranscriber;

impl LoopbackTranscriber {
    /// Create a new loopback transcriber
    pub fn new() -> Self {
        Self
    }
}

impl Default for LoopbackTranscriber {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transcriber for LoopbackTranscriber {
    async fn transcribe(&self, clip: &AudioClip) -> Result<String, TranscriptionError> {
        let text = String::from_utf8(clip.data().to_vec())
            .map_err(|e| TranscriptionError::Parse(e.to_string()))?;

        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(TranscriptionError::EmptyResponse);
        }

        Ok(trimmed.to_string())
    }
}
