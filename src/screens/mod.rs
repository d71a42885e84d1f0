//! Screen dialogue scripts
//!
//! Each screen supplies data to the one interaction controller: dialogue
//! steps, a grammar per step, and confirmation wording. None of them
//! carry their own loop.

mod balance;
mod contacts;
mod history;
mod home;
mod login;
mod payment;
mod profile;
mod signup;

pub use balance::BalanceScreen;
pub use contacts::ContactsScreen;
pub use history::HistoryScreen;
pub use home::HomeScreen;
pub use login::LoginScreen;
pub use payment::PaymentScreen;
pub use profile::ProfileScreen;
pub use signup::SignUpScreen;

use crate::application::DialogueScript;
use crate::domain::intent::{extract_phone, Catalog, Command, IntentGrammar, PhoneValue, ScreenTarget};

/// Build the dialogue script for a screen. Payment reads its receiver
/// from the navigation params it was opened with.
pub fn create_script(
    target: ScreenTarget,
    params: &[(String, String)],
    catalog: &Catalog,
) -> Box<dyn DialogueScript> {
    match target {
        ScreenTarget::Login => Box::new(LoginScreen::new()),
        ScreenTarget::SignUp => Box::new(SignUpScreen::new(catalog)),
        ScreenTarget::Home => Box::new(HomeScreen::new()),
        ScreenTarget::Contacts => Box::new(ContactsScreen::new(catalog)),
        ScreenTarget::Payment => {
            let receiver = params
                .iter()
                .find(|(key, _)| key == "contactName")
                .map(|(_, value)| value.clone())
                .unwrap_or_else(|| "this contact".to_string());
            Box::new(PaymentScreen::new(receiver))
        }
        ScreenTarget::History => Box::new(HistoryScreen::new()),
        ScreenTarget::Balance => Box::new(BalanceScreen::new()),
        ScreenTarget::Profile => Box::new(ProfileScreen::new()),
    }
}

/// Phone-number rule shared by login and sign-up: ten digits complete
/// the field, fewer land as a partial value that repeats the step.
pub(crate) fn phone_command(text: &str) -> Option<Command> {
    match extract_phone(text) {
        PhoneValue::Complete(digits) => Some(Command::set_field("phone", digits)),
        PhoneValue::Partial(digits) => Some(Command::partial_field("phone", digits)),
        PhoneValue::Empty => None,
    }
}

/// Grammar for read-out screens: home and menu phrases return to the
/// home screen, back phrases pop the stack.
pub(crate) fn menu_return_grammar() -> IntentGrammar {
    IntentGrammar::new().rule("home", |text| {
        (text.contains("home") || text.contains("menu"))
            .then(|| Command::navigate(ScreenTarget::Home))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_script_covers_every_screen() {
        let catalog = Catalog::demo();
        for target in crate::domain::intent::ALL_SCREENS {
            let script = create_script(*target, &[], &catalog);
            assert_eq!(script.screen(), *target);
            assert!(!script.steps().is_empty());
        }
    }

    #[test]
    fn payment_script_reads_receiver_from_params() {
        let catalog = Catalog::demo();
        let params = vec![
            ("contactName".to_string(), "Priya Patel".to_string()),
            ("mobile".to_string(), "9812345670".to_string()),
        ];
        let script = create_script(ScreenTarget::Payment, &params, &catalog);
        assert!(script.steps()[0].prompt.contains("Priya Patel"));
    }

    #[test]
    fn phone_command_complete_partial_empty() {
        assert_eq!(
            phone_command("9876543210"),
            Some(Command::set_field("phone", "9876543210"))
        );
        assert_eq!(
            phone_command("98765"),
            Some(Command::partial_field("phone", "98765"))
        );
        assert_eq!(phone_command("hello"), None);
    }
}
