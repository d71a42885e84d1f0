//! Speech synthesis port interface

use async_trait::async_trait;
use thiserror::Error;

/// Synthesis errors
#[derive(Debug, Clone, Error)]
pub enum SynthesisError {
    #[error("Speech tool '{0}' not found. Install espeak-ng or set synth = \"off\"")]
    ToolNotFound(String),

    #[error("Speech was interrupted")]
    Interrupted,

    #[error("Speech synthesis failed: {0}")]
    Failed(String),

    #[error("Speech process error: {0}")]
    Io(String),
}

/// Port for the spoken half of the dialogue.
///
/// The speech channel is a process-wide singleton: starting a new
/// utterance silences whatever is still playing, so the most recent
/// caller always wins.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Speak text and resolve when playback finishes.
    ///
    /// # Returns
    /// Ok on natural completion. Err(Interrupted) when stop cut the
    /// utterance short, so an interrupted prompt is never mistaken
    /// for a delivered one.
    async fn speak(&self, text: &str) -> Result<(), SynthesisError>;

    /// Silence the current utterance immediately. After stop returns
    /// no completion signal for that utterance will fire.
    async fn stop(&self);

    /// Check if an utterance is currently playing
    fn is_speaking(&self) -> bool;
}

#[async_trait]
impl SpeechSynthesizer for Box<dyn SpeechSynthesizer> {
    async fn speak(&self, text: &str) -> Result<(), SynthesisError> {
        self.as_ref().speak(text).await
    }

    async fn stop(&self) {
        self.as_ref().stop().await
    }

    fn is_speaking(&self) -> bool {
        self.as_ref().is_speaking()
    }
}
