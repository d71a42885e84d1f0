//! Profile read-out dialogue

use crate::application::{DialogueScript, DialogueStep};
use crate::domain::intent::ScreenTarget;

use super::menu_return_grammar;

// Demo profile until real user data exists
const DEMO_NAME: &str = "Rahul Sharma";
const DEMO_MOBILE: &str = "9876543210";
const DEMO_EMAIL: &str = "rahul dot sharma92 at gmail dot com";
const DEMO_BANK: &str = "State Bank of India";

/// The profile screen reads the account holder's details out loud,
/// then waits for a navigation phrase.
pub struct ProfileScreen {
    steps: Vec<DialogueStep>,
}

impl ProfileScreen {
    pub fn new() -> Self {
        let prompt = format!(
            "Your profile. Name, {}. Mobile number, {}. Email, {}. Bank, {}. Say home or back.",
            DEMO_NAME,
            spell_out(DEMO_MOBILE),
            DEMO_EMAIL,
            DEMO_BANK
        );
        let step = DialogueStep::new(prompt, menu_return_grammar())
            .with_help("Say home for the home screen, or back to leave.");
        Self { steps: vec![step] }
    }
}

impl Default for ProfileScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl DialogueScript for ProfileScreen {
    fn screen(&self) -> ScreenTarget {
        ScreenTarget::Profile
    }

    fn steps(&self) -> &[DialogueStep] {
        &self.steps
    }
}

/// Space out digits so the synthesizer reads them one at a time
fn spell_out(digits: &str) -> String {
    digits
        .chars()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::intent::Command;
    use crate::domain::speech::Utterance;

    #[test]
    fn spell_out_spaces_digits() {
        assert_eq!(spell_out("987"), "9 8 7");
        assert_eq!(spell_out(""), "");
    }

    #[test]
    fn prompt_reads_the_profile() {
        let screen = ProfileScreen::new();
        let prompt = &screen.steps()[0].prompt;
        assert!(prompt.contains("Rahul Sharma"));
        assert!(prompt.contains("9 8 7 6 5 4 3 2 1 0"));
        assert!(prompt.contains("at gmail dot com"));
    }

    #[test]
    fn navigation_phrases_work() {
        let screen = ProfileScreen::new();
        let grammar = &screen.steps()[0].grammar;
        assert_eq!(
            grammar.interpret(&Utterance::from_raw("home please")),
            Command::navigate(ScreenTarget::Home)
        );
        assert_eq!(
            grammar.interpret(&Utterance::from_raw("previous screen")),
            Command::GoBack
        );
    }
}
