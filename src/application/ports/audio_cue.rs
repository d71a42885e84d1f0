//! Chime port marking the edges of the listen window
//!
//! The tones tell the user when the app starts and stops hearing them.

use async_trait::async_trait;
use thiserror::Error;

/// Which edge of the listen window a chime marks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioCueType {
    /// Rising chime when the listen window opens
    ListenStart,
    /// Falling chime when the listen window closes
    ListenStop,
}

/// Chime playback problems
#[derive(Error, Debug)]
pub enum AudioCueError {
    #[error("Cue playback failed: {0}")]
    Playback(String),

    #[error("No audio output device: {0}")]
    NoOutputDevice(String),
}

/// Plays the listen-window chimes.
///
/// A failed chime never fails the session; callers log and move on.
#[async_trait]
pub trait AudioCue: Send + Sync {
    /// Sound the cue, returning once playback ends
    async fn play(&self, cue_type: AudioCueType) -> Result<(), AudioCueError>;
}
