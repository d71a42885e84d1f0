//! Core types of the voice shell: dialogue state, intents, speech
//! values and settings. Nothing here touches the microphone, the
//! terminal or the network.

pub mod config;
pub mod dialogue;
pub mod error;
pub mod intent;
pub mod speech;

pub use config::AppConfig;
pub use dialogue::{Duration, Session, SessionPhase};
pub use error::*;
pub use intent::{Catalog, Command, IntentGrammar, ScreenTarget};
pub use speech::{AudioClip, AudioMimeType, Utterance};
