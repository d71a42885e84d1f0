//! Voice session state machine

use std::fmt;
use std::time::Instant;

use thiserror::Error;

use crate::domain::dialogue::Duration;

/// Default number of recoverable failures tolerated before a session gives up
pub const DEFAULT_MAX_ATTEMPTS: u32 = 4;

/// Phases of a voice session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SessionPhase {
    #[default]
    Idle,
    Speaking,
    Listening,
    Processing,
    Terminal,
    Cancelled,
}

impl SessionPhase {
    /// Get the string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Speaking => "speaking",
            Self::Listening => "listening",
            Self::Processing => "processing",
            Self::Terminal => "terminal",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error when an invalid phase transition is attempted
#[derive(Debug, Clone, Error)]
#[error("Invalid phase transition: cannot {action} while in {current_phase} phase")]
pub struct InvalidPhaseTransition {
    pub current_phase: SessionPhase,
    pub action: String,
}

/// Voice session entity.
/// Tracks the conversational phase, the retry budget, and the listen
/// deadline for one screen activation.
///
/// Phase machine:
///   IDLE -> SPEAKING (begin_speaking)
///   SPEAKING -> SPEAKING (begin_speaking, re-prompt)
///   SPEAKING -> LISTENING (begin_listening)
///   LISTENING -> PROCESSING (begin_processing)
///   PROCESSING -> SPEAKING (begin_speaking, feedback or confirmation)
///   SPEAKING -> TERMINAL (complete)
///   any non-terminal -> CANCELLED (cancel)
///
/// The cancelled flag is monotonic: once set it never clears, and every
/// transition after it is rejected so no side effect can slip through.
#[derive(Debug)]
pub struct Session {
    phase: SessionPhase,
    attempts: u32,
    max_attempts: u32,
    cancelled: bool,
    deadline: Option<Instant>,
}

impl Session {
    /// Create a new session in idle phase with the given retry budget
    pub fn new(max_attempts: u32) -> Self {
        Self {
            phase: SessionPhase::Idle,
            attempts: 0,
            max_attempts: max_attempts.max(1),
            cancelled: false,
            deadline: None,
        }
    }

    /// Get the current phase
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Check if the session was cancelled
    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Check if the session reached its terminal phase
    pub fn is_terminal(&self) -> bool {
        self.phase == SessionPhase::Terminal
    }

    /// Failures recorded so far in the current step
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Retry budget for this session
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    fn reject(&self, action: &str) -> InvalidPhaseTransition {
        InvalidPhaseTransition {
            current_phase: self.phase,
            action: action.to_string(),
        }
    }

    /// Transition to SPEAKING. Valid from IDLE (opening prompt),
    /// PROCESSING (feedback or confirmation) and SPEAKING (re-prompt).
    pub fn begin_speaking(&mut self) -> Result<(), InvalidPhaseTransition> {
        if self.cancelled {
            return Err(self.reject("begin speaking"));
        }
        match self.phase {
            SessionPhase::Idle | SessionPhase::Speaking | SessionPhase::Processing => {
                self.phase = SessionPhase::Speaking;
                Ok(())
            }
            _ => Err(self.reject("begin speaking")),
        }
    }

    /// Transition from SPEAKING to LISTENING and arm the capture deadline
    pub fn begin_listening(&mut self, window: Duration) -> Result<(), InvalidPhaseTransition> {
        if self.cancelled || self.phase != SessionPhase::Speaking {
            return Err(self.reject("begin listening"));
        }
        self.phase = SessionPhase::Listening;
        self.deadline = Some(Instant::now() + window.as_std());
        Ok(())
    }

    /// Transition from LISTENING to PROCESSING and disarm the deadline
    pub fn begin_processing(&mut self) -> Result<(), InvalidPhaseTransition> {
        if self.cancelled || self.phase != SessionPhase::Listening {
            return Err(self.reject("begin processing"));
        }
        self.phase = SessionPhase::Processing;
        self.deadline = None;
        Ok(())
    }

    /// Transition from SPEAKING to TERMINAL after the resolved action ran
    pub fn complete(&mut self) -> Result<(), InvalidPhaseTransition> {
        if self.cancelled || self.phase != SessionPhase::Speaking {
            return Err(self.reject("complete"));
        }
        self.phase = SessionPhase::Terminal;
        Ok(())
    }

    /// Cancel the session. Idempotent; a no-op once the session is
    /// terminal. Never fails so teardown paths can always call it.
    pub fn cancel(&mut self) {
        if self.phase == SessionPhase::Terminal {
            return;
        }
        self.cancelled = true;
        self.deadline = None;
        self.phase = SessionPhase::Cancelled;
    }

    /// Record a recoverable failure. Returns true when the retry
    /// budget is exhausted.
    pub fn record_failure(&mut self) -> bool {
        self.attempts = self.attempts.saturating_add(1);
        self.attempts >= self.max_attempts
    }

    /// Reset the retry budget after a step completes
    pub fn reset_attempts(&mut self) {
        self.attempts = 0;
    }

    /// Remaining time on the armed listen deadline, if any
    pub fn remaining_listen_time(&self) -> Option<std::time::Duration> {
        self.deadline
            .map(|d| d.saturating_duration_since(Instant::now()))
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ATTEMPTS)
    }
}
