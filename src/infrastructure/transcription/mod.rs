//! Transcription infrastructure module
//!
//! Speech-to-text goes through the hosted HTTP service; text mode
//! short-circuits it with a loopback decoder.

mod http;
mod loopback;

pub use http::HttpTranscriber;
pub use loopback::LoopbackTranscriber;
