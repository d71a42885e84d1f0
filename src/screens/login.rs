//! Login screen dialogue

use crate::application::{DialogueScript, DialogueStep};
use crate::domain::intent::{Command, IntentGrammar, ScreenTarget};

use super::phone_command;

/// Phrasings the transcription service returns for "sign up"
const SIGN_UP_ALIASES: &[&str] = &["sign up", "signup", "sign app", "sinup", "signap"];

/// The login screen: a ten digit mobile number logs in, a sign-up
/// phrase opens the sign-up form.
pub struct LoginScreen {
    steps: Vec<DialogueStep>,
}

impl LoginScreen {
    pub fn new() -> Self {
        let grammar = IntentGrammar::new()
            .rule("sign up", |text| {
                SIGN_UP_ALIASES
                    .iter()
                    .any(|alias| text.contains(alias))
                    .then(|| Command::navigate(ScreenTarget::SignUp))
            })
            .rule("phone", phone_command);

        let step = DialogueStep::new(
            "Welcome. Say your ten digit mobile number or say sign up.",
            grammar,
        );

        Self { steps: vec![step] }
    }
}

impl Default for LoginScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl DialogueScript for LoginScreen {
    fn screen(&self) -> ScreenTarget {
        ScreenTarget::Login
    }

    fn steps(&self) -> &[DialogueStep] {
        &self.steps
    }

    fn finale(&self, fields: &[(String, String)]) -> Command {
        let params = fields
            .iter()
            .filter(|(name, _)| name == "phone")
            .cloned()
            .collect();
        Command::navigate_with(ScreenTarget::Home, params)
    }

    fn confirmation(&self, command: &Command) -> String {
        match command {
            Command::Navigate {
                target: ScreenTarget::SignUp,
                ..
            } => "Opening sign up page.".to_string(),
            Command::Navigate {
                target: ScreenTarget::Home,
                ..
            } => "Login successful.".to_string(),
            Command::Navigate { target, .. } => format!("Opening {}.", target.label()),
            _ => "Going back.".to_string(),
        }
    }
}
