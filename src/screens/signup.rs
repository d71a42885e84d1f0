//! Sign-up screen dialogue: name, email, mobile number, then bank

use crate::application::{DialogueScript, DialogueStep};
use crate::domain::intent::{match_catalog, Catalog, Command, IntentGrammar, ScreenTarget};
use crate::domain::speech::spell_email_words;

use super::phone_command;

/// Tokens stripped before bank matching, so "bank of baroda" does not
/// match the "Bank" token of every entry.
const BANK_FILLERS: &[&str] = &["bank", "of", "the"];

/// The sign-up form as a four step conversation
pub struct SignUpScreen {
    steps: Vec<DialogueStep>,
}

impl SignUpScreen {
    pub fn new(catalog: &Catalog) -> Self {
        let steps = vec![
            name_step(),
            email_step(),
            phone_step(),
            bank_step(catalog.bank_names().map(String::from).collect()),
        ];
        Self { steps }
    }
}

impl DialogueScript for SignUpScreen {
    fn screen(&self) -> ScreenTarget {
        ScreenTarget::SignUp
    }

    fn steps(&self) -> &[DialogueStep] {
        &self.steps
    }

    fn finale(&self, fields: &[(String, String)]) -> Command {
        Command::navigate_with(ScreenTarget::Home, fields.to_vec())
    }

    fn confirmation(&self, command: &Command) -> String {
        match command {
            Command::Navigate {
                target: ScreenTarget::Home,
                ..
            } => "Account created. Welcome.".to_string(),
            Command::Navigate { target, .. } => format!("Opening {}.", target.label()),
            _ => "Going back.".to_string(),
        }
    }
}

fn name_step() -> DialogueStep {
    let grammar =
        IntentGrammar::new().rule("name", |text| Some(Command::set_field("name", text)));
    DialogueStep::new("Let us create your account. What is your name?", grammar)
        .with_help("Sorry, I did not catch your name. Please say your full name.")
}

fn email_step() -> DialogueStep {
    let grammar = IntentGrammar::new().rule("email", |text| {
        let address = spell_email_words(text);
        if looks_like_email(&address) {
            Some(Command::set_field("email", address))
        } else {
            Some(Command::invalid(
                "That does not sound like an email address. Say it like name at gmail dot com.",
            ))
        }
    });
    DialogueStep::new("Say your email address, like name at gmail dot com.", grammar)
}

fn phone_step() -> DialogueStep {
    let grammar = IntentGrammar::new().rule("phone", phone_command);
    DialogueStep::new("Say your ten digit mobile number.", grammar)
        .with_retry("I need all ten digits. Please say the full number.")
}

fn bank_step(banks: Vec<String>) -> DialogueStep {
    let grammar = IntentGrammar::new().rule("bank", move |text| {
        let salient = text
            .split_whitespace()
            .filter(|token| !BANK_FILLERS.contains(token))
            .collect::<Vec<_>>()
            .join(" ");
        match_catalog(&salient, banks.iter().map(String::as_str))
            .map(|index| Command::set_field("bank", banks[index].clone()))
    });
    DialogueStep::new(
        "Which bank do you use? Say the bank name, like State Bank of India.",
        grammar,
    )
    .with_help("I do not know that bank. Say a bank name, like HDFC Bank or Axis Bank.")
}

/// Minimal shape check on a spoken address: one @ with a dotted domain
fn looks_like_email(address: &str) -> bool {
    let Some((local, domain)) = address.split_once('@') else {
        return false;
    };
    !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::speech::Utterance;

    fn interpret(step: usize, text: &str) -> Command {
        let screen = SignUpScreen::new(&Catalog::demo());
        screen.steps()[step]
            .grammar
            .interpret(&Utterance::from_raw(text))
    }

    #[test]
    fn four_steps_in_form_order() {
        let screen = SignUpScreen::new(&Catalog::demo());
        assert_eq!(screen.steps().len(), 4);
        assert!(screen.steps()[0].prompt.contains("name"));
        assert!(screen.steps()[1].prompt.contains("email"));
        assert!(screen.steps()[2].prompt.contains("mobile"));
        assert!(screen.steps()[3].prompt.contains("bank"));
    }

    #[test]
    fn name_step_takes_any_speech() {
        assert_eq!(
            interpret(0, "Rahul Sharma"),
            Command::set_field("name", "rahul sharma")
        );
    }

    #[test]
    fn email_step_joins_spoken_connectors() {
        assert_eq!(
            interpret(1, "rahul sharma at gmail dot com"),
            Command::set_field("email", "rahulsharma@gmail.com")
        );
    }

    #[test]
    fn email_step_rejects_malformed_addresses() {
        assert!(matches!(
            interpret(1, "rahul sharma"),
            Command::Invalid { .. }
        ));
        assert!(matches!(
            interpret(1, "rahul at gmail"),
            Command::Invalid { .. }
        ));
    }

    #[test]
    fn phone_step_accepts_digit_words() {
        assert_eq!(
            interpret(2, "nine eight seven six five four three two one zero"),
            Command::set_field("phone", "9876543210")
        );
    }

    #[test]
    fn phone_step_partial_repeats() {
        assert_eq!(
            interpret(2, "nine eight seven"),
            Command::partial_field("phone", "987")
        );
    }

    #[test]
    fn bank_step_matches_catalog_names() {
        assert_eq!(
            interpret(3, "state bank of india"),
            Command::set_field("bank", "State Bank of India")
        );
        assert_eq!(
            interpret(3, "axis"),
            Command::set_field("bank", "Axis Bank")
        );
        assert_eq!(
            interpret(3, "bank of baroda"),
            Command::set_field("bank", "Bank of Baroda")
        );
    }

    #[test]
    fn bank_step_fillers_alone_do_not_match() {
        assert_eq!(interpret(3, "the bank"), Command::Unrecognized);
    }

    #[test]
    fn bank_step_unknown_bank_is_unrecognized() {
        assert_eq!(interpret(3, "monzo"), Command::Unrecognized);
    }

    #[test]
    fn back_works_on_every_step() {
        for step in 0..4 {
            assert_eq!(interpret(step, "go back"), Command::GoBack, "step {}", step);
        }
    }

    #[test]
    fn finale_carries_all_fields_home() {
        let screen = SignUpScreen::new(&Catalog::demo());
        let fields = vec![
            ("name".to_string(), "rahul sharma".to_string()),
            ("email".to_string(), "rahul@gmail.com".to_string()),
            ("phone".to_string(), "9876543210".to_string()),
            ("bank".to_string(), "Axis Bank".to_string()),
        ];
        let finale = screen.finale(&fields);
        match &finale {
            Command::Navigate { target, params } => {
                assert_eq!(*target, ScreenTarget::Home);
                assert_eq!(params.len(), 4);
            }
            other => panic!("unexpected finale: {:?}", other),
        }
        assert_eq!(screen.confirmation(&finale), "Account created. Welcome.");
    }
}
