//! Listen-window chimes played through rodio

use std::time::Duration;

use async_trait::async_trait;
use rodio::source::{SineWave, Source};
use rodio::{OutputStream, Sink};

use crate::application::ports::{AudioCue, AudioCueError, AudioCueType};

/// Chime player for the default audio output device
pub struct RodioChime;

impl RodioChime {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RodioChime {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AudioCue for RodioChime {
    async fn play(&self, cue_type: AudioCueType) -> Result<(), AudioCueError> {
        // Playback sleeps until the chime ends, so it runs off the async thread
        tokio::task::spawn_blocking(move || play_chime(cue_type))
            .await
            .map_err(|e| AudioCueError::Playback(format!("Task join error: {}", e)))?
    }
}

/// Short sine note, faded in so the edge does not click
fn chime_note(freq: f32, duration_ms: u64, amplitude: f32) -> impl Source<Item = f32> + Send {
    let fade_ms = (duration_ms / 5).min(30);
    SineWave::new(freq)
        .take_duration(Duration::from_millis(duration_ms))
        .fade_in(Duration::from_millis(fade_ms))
        .amplify(amplitude)
}

fn play_chime(cue_type: AudioCueType) -> Result<(), AudioCueError> {
    let (_stream, stream_handle) = OutputStream::try_default()
        .map_err(|e| AudioCueError::NoOutputDevice(e.to_string()))?;

    let sink =
        Sink::try_new(&stream_handle).map_err(|e| AudioCueError::Playback(e.to_string()))?;

    // Quiet next to the synthesized speech around it
    const CUE_VOLUME: f32 = 0.3;

    // A rising A4/E5 pair opens the window, the reverse closes it
    let (first, second) = match cue_type {
        AudioCueType::ListenStart => (440.0, 660.0),
        AudioCueType::ListenStop => (660.0, 440.0),
    };

    sink.append(chime_note(first, 60, CUE_VOLUME));
    sink.append(chime_note(second, 120, CUE_VOLUME));
    sink.sleep_until_end();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    #[ignore = "Requires audio hardware"]
    async fn start_chime_plays() {
        let cue = RodioChime::new();
        assert!(cue.play(AudioCueType::ListenStart).await.is_ok());
    }

    #[tokio::test]
    #[ignore = "Requires audio hardware"]
    async fn stop_chime_plays() {
        let cue = RodioChime::new();
        assert!(cue.play(AudioCueType::ListenStop).await.is_ok());
    }
}
