//! Speech synthesis infrastructure module
//!
//! Spoken prompts go through a subprocess speech tool (espeak-ng,
//! espeak or say). The factory detects what is installed and falls
//! back to silent operation.

mod espeak;
mod factory;
mod noop;

pub use espeak::{EspeakSynthesizer, SynthTool};
pub use factory::{
    create_synthesizer, detect_synth_tool, ParseSynthPreferenceError, SynthPreference,
};
pub use noop::NoOpSynthesizer;
