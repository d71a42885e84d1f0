//! Dialogue domain module

mod duration;
mod session;

pub use duration::{Duration, DEFAULT_LISTEN_WINDOW_SECS, DEFAULT_SETTLE_DELAY_MS};
pub use session::{InvalidPhaseTransition, Session, SessionPhase, DEFAULT_MAX_ATTEMPTS};
