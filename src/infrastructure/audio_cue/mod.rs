//! Tone adapters behind the chime port

mod rodio;

pub use rodio::RodioChime;

use crate::application::ports::AudioCue;

/// Build the chime player when cues are enabled
pub fn create_audio_cue(enabled: bool) -> Option<Box<dyn AudioCue>> {
    enabled.then(|| Box::new(RodioChime::new()) as Box<dyn AudioCue>)
}
