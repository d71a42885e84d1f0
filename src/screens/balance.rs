//! Balance read-out dialogue

use crate::application::{DialogueScript, DialogueStep};
use crate::domain::intent::ScreenTarget;

use super::menu_return_grammar;

// Demo account until a real account feed exists
const DEMO_BALANCE: u64 = 22;
const DEMO_BANK: &str = "State Bank of India";
const DEMO_ACCOUNT_TAIL: &str = "1234";

/// The balance screen reads the account summary out loud, then waits
/// for a navigation phrase.
pub struct BalanceScreen {
    steps: Vec<DialogueStep>,
}

impl BalanceScreen {
    pub fn new() -> Self {
        let prompt = format!(
            "Your available balance is {} rupees, in your {} account ending {}. Say home or back.",
            DEMO_BALANCE, DEMO_BANK, DEMO_ACCOUNT_TAIL
        );
        let step = DialogueStep::new(prompt, menu_return_grammar())
            .with_help("Say home for the home screen, or back to leave.");
        Self { steps: vec![step] }
    }
}

impl Default for BalanceScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl DialogueScript for BalanceScreen {
    fn screen(&self) -> ScreenTarget {
        ScreenTarget::Balance
    }

    fn steps(&self) -> &[DialogueStep] {
        &self.steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::intent::Command;
    use crate::domain::speech::Utterance;

    fn interpret(text: &str) -> Command {
        let screen = BalanceScreen::new();
        screen.steps()[0].grammar.interpret(&Utterance::from_raw(text))
    }

    #[test]
    fn prompt_reads_the_account_summary() {
        let screen = BalanceScreen::new();
        let prompt = &screen.steps()[0].prompt;
        assert!(prompt.contains("22 rupees"));
        assert!(prompt.contains("State Bank of India"));
        assert!(prompt.contains("1234"));
    }

    #[test]
    fn home_returns_to_the_menu() {
        assert_eq!(interpret("home"), Command::navigate(ScreenTarget::Home));
        assert_eq!(
            interpret("main menu"),
            Command::navigate(ScreenTarget::Home)
        );
    }

    #[test]
    fn back_pops_the_screen() {
        assert_eq!(interpret("back"), Command::GoBack);
    }
}
