//! The session controller, dialogue scripts and the ports they drive

pub mod controller;
pub mod ports;
pub mod script;

pub use controller::{
    ControllerConfig, InteractionController, SessionCallbacks, SessionCancellation,
    SessionFailure, SessionOutcome,
};
pub use script::{DialogueScript, DialogueStep};
