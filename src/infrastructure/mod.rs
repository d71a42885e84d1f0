//! Adapters behind the application ports: microphone, speech tools,
//! chimes, the bank HTTP service and the settings file.

pub mod audio_cue;
pub mod capture;
pub mod config;
pub mod payment;
pub mod synthesis;
pub mod transcription;

pub use audio_cue::{create_audio_cue, RodioChime};
pub use capture::{create_capture, CpalCapture, ScriptedCapture};
pub use config::XdgConfigStore;
pub use payment::HttpPaymentGateway;
pub use synthesis::{
    create_synthesizer, detect_synth_tool, EspeakSynthesizer, NoOpSynthesizer, SynthPreference,
    SynthTool,
};
pub use transcription::{HttpTranscriber, LoopbackTranscriber};
