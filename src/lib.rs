//! VoicePay - voice-first shell for a demo banking service
//!
//! This crate drives a spoken dialogue over the screens of a small
//! banking app: it speaks each screen's prompt, listens on the
//! microphone, transcribes the reply remotely and turns it into
//! navigation, form input or a payment.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Dialogue state machine, intent grammars, value objects, errors
//! - **Application**: The interaction session use case and port interfaces (traits)
//! - **Infrastructure**: Adapter implementations (cpal, espeak, HTTP services, etc.)
//! - **Screens**: One dialogue script per banking screen, all driven by the one controller
//! - **CLI**: Command-line interface, argument parsing, and signal handling

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod screens;
