//! Capture infrastructure module
//!
//! Provides microphone capture using cpal, encoded to WAV for the
//! transcription service, plus a text-mode capture for running the
//! shell without audio hardware.

mod cpal_capture;
mod scripted;
mod wav;

pub use cpal_capture::CpalCapture;
pub use scripted::ScriptedCapture;
pub use wav::{encode_to_wav, TARGET_SAMPLE_RATE};

/// Create the default microphone capture for the current platform
pub fn create_capture() -> CpalCapture {
    CpalCapture::new()
}
