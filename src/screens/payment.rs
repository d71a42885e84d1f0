//! Payment screen dialogue: hear an amount, submit it

use crate::application::{DialogueScript, DialogueStep};
use crate::domain::intent::{extract_amount, Command, IntentGrammar, ScreenTarget};

/// The payment screen for one receiver. The amount comes from spoken
/// numerals or number words; anything else re-prompts.
pub struct PaymentScreen {
    receiver: String,
    steps: Vec<DialogueStep>,
}

impl PaymentScreen {
    pub fn new(receiver: impl Into<String>) -> Self {
        let receiver = receiver.into();
        let grammar = IntentGrammar::new().rule("amount", |text| match extract_amount(text) {
            Some(amount) if amount > 0 => Some(Command::SubmitAmount(amount)),
            Some(_) => Some(Command::invalid("Please say an amount greater than zero.")),
            None => Some(Command::invalid(
                "I did not get the amount. Say a number, like five hundred.",
            )),
        });

        let step = DialogueStep::new(
            format!(
                "How much do you want to send to {}? Say an amount in rupees.",
                receiver
            ),
            grammar,
        );

        Self {
            receiver,
            steps: vec![step],
        }
    }
}

impl DialogueScript for PaymentScreen {
    fn screen(&self) -> ScreenTarget {
        ScreenTarget::Payment
    }

    fn steps(&self) -> &[DialogueStep] {
        &self.steps
    }

    fn confirmation(&self, command: &Command) -> String {
        match command {
            Command::SubmitAmount(amount) => {
                format!("Sending {} rupees to {}.", amount, self.receiver)
            }
            Command::Navigate { target, .. } => format!("Opening {}.", target.label()),
            _ => "Going back.".to_string(),
        }
    }

    fn action_failed(&self, _command: &Command) -> String {
        "The payment could not be completed. Please try again.".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::speech::Utterance;

    fn interpret(text: &str) -> Command {
        let screen = PaymentScreen::new("Alice Kumar");
        screen.steps()[0].grammar.interpret(&Utterance::from_raw(text))
    }

    #[test]
    fn numerals_submit() {
        assert_eq!(interpret("500"), Command::SubmitAmount(500));
        assert_eq!(interpret("send 500 rupees"), Command::SubmitAmount(500));
    }

    #[test]
    fn number_words_submit() {
        assert_eq!(interpret("five hundred"), Command::SubmitAmount(500));
        assert_eq!(
            interpret("twenty five thousand"),
            Command::SubmitAmount(25_000)
        );
    }

    #[test]
    fn zero_is_invalid() {
        assert!(matches!(interpret("0"), Command::Invalid { .. }));
        assert!(matches!(interpret("zero"), Command::Invalid { .. }));
    }

    #[test]
    fn wordless_utterance_is_invalid() {
        assert!(matches!(
            interpret("a nice dinner"),
            Command::Invalid { .. }
        ));
    }

    #[test]
    fn back_cancels_the_payment() {
        assert_eq!(interpret("go back"), Command::GoBack);
    }

    #[test]
    fn prompt_and_confirmation_name_the_receiver() {
        let screen = PaymentScreen::new("Alice Kumar");
        assert!(screen.steps()[0].prompt.contains("Alice Kumar"));
        assert_eq!(
            screen.confirmation(&Command::SubmitAmount(500)),
            "Sending 500 rupees to Alice Kumar."
        );
    }

    #[test]
    fn failure_wording() {
        let screen = PaymentScreen::new("Alice Kumar");
        assert_eq!(
            screen.action_failed(&Command::SubmitAmount(500)),
            "The payment could not be completed. Please try again."
        );
    }
}
