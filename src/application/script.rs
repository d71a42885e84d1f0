//! Dialogue scripts driven by the interaction controller

use crate::domain::dialogue::Duration;
use crate::domain::intent::{Command, IntentGrammar, ScreenTarget};

/// One conversational step: what to ask, how to interpret the answer,
/// and what to say when the answer goes wrong.
pub struct DialogueStep {
    /// Opening prompt for this step
    pub prompt: String,
    /// Re-prompt after an utterance no rule claimed
    pub help: String,
    /// Re-prompt after capture or transcription trouble and after
    /// partial field values
    pub retry: String,
    /// Grammar active while this step listens
    pub grammar: IntentGrammar,
    /// Listen window override; None uses the session default
    pub listen_window: Option<Duration>,
}

impl DialogueStep {
    /// Create a step with default retry wording
    pub fn new(prompt: impl Into<String>, grammar: IntentGrammar) -> Self {
        let prompt = prompt.into();
        Self {
            help: format!("Sorry, I did not catch that. {}", prompt),
            retry: "Please repeat clearly.".to_string(),
            prompt,
            grammar,
            listen_window: None,
        }
    }

    /// Replace the help wording
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = help.into();
        self
    }

    /// Replace the retry wording
    pub fn with_retry(mut self, retry: impl Into<String>) -> Self {
        self.retry = retry.into();
        self
    }

    /// Override the listen window for this step
    pub fn with_listen_window(mut self, window: Duration) -> Self {
        self.listen_window = Some(window);
        self
    }
}

/// A screen's dialogue, described as data the controller can drive.
///
/// Steps run in order; each complete SetField advances to the next
/// one and the finale fires once the last step completes. Screens
/// whose grammars only navigate never reach the finale.
pub trait DialogueScript: Send + Sync {
    /// Screen this script speaks for
    fn screen(&self) -> ScreenTarget;

    /// Dialogue steps in conversation order. Never empty.
    fn steps(&self) -> &[DialogueStep];

    /// Terminal command issued after the last form step completes.
    ///
    /// # Arguments
    /// * `fields` - Every (name, value) pair delivered this session
    fn finale(&self, fields: &[(String, String)]) -> Command {
        let _ = fields;
        Command::GoBack
    }

    /// Spoken confirmation for a terminal command.
    fn confirmation(&self, command: &Command) -> String {
        match command {
            Command::Navigate { target, .. } => format!("Opening {}.", target.label()),
            Command::SubmitAmount(amount) => format!("Sending {} rupees.", amount),
            _ => "Going back.".to_string(),
        }
    }

    /// Spoken feedback when a terminal action fails recoverably.
    fn action_failed(&self, command: &Command) -> String {
        let _ = command;
        "That did not go through. Please try again.".to_string()
    }
}
