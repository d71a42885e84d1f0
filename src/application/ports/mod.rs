//! Trait seams between the session logic and the adapters

pub mod actions;
pub mod audio_cue;
pub mod capture;
pub mod config;
pub mod payment;
pub mod synthesizer;
pub mod transcriber;

pub use actions::{ActionError, ActionSink, NavigationBridge};
pub use audio_cue::{AudioCue, AudioCueError, AudioCueType};
pub use capture::{AudioCapture, CaptureError};
pub use config::ConfigStore;
pub use payment::{PaymentError, PaymentGateway, PaymentRequest};
pub use synthesizer::{SpeechSynthesizer, SynthesisError};
pub use transcriber::{Transcriber, TranscriptionError};
