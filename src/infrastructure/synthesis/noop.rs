//! No-op synthesizer for silent operation

use async_trait::async_trait;

use crate::application::ports::{SpeechSynthesizer, SynthesisError};

/// Synthesizer that swallows every utterance.
///
/// Used in text mode and when no speech tool is installed; prompts
/// still reach the terminal through the presenter.
pub struct NoOpSynthesizer;

impl NoOpSynthesizer {
    /// Create a new no-op synthesizer
    pub fn new() -> Self {
        Self
    }
}

impl Default for NoOpSynthesizer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SpeechSynthesizer for NoOpSynthesizer {
    async fn speak(&self, _text: &str) -> Result<(), SynthesisError> {
        Ok(())
    }

    async fn stop(&self) {}

    fn is_speaking(&self) -> bool {
        false
    }
}
