//! Contact list dialogue: pick a payee by name

use crate::application::{DialogueScript, DialogueStep};
use crate::domain::intent::{match_catalog, Catalog, Command, Contact, IntentGrammar, ScreenTarget};

/// The contact list. A matched name opens the payment screen with the
/// contact's name and mobile number as params.
pub struct ContactsScreen {
    steps: Vec<DialogueStep>,
}

impl ContactsScreen {
    pub fn new(catalog: &Catalog) -> Self {
        let contacts: Vec<Contact> = catalog.contacts.clone();
        let example = contacts
            .first()
            .map(|contact| contact.name.clone())
            .unwrap_or_else(|| "Alice Kumar".to_string());

        let grammar = IntentGrammar::new().rule("contact", move |text| {
            match_catalog(text, contacts.iter().map(|contact| contact.name.as_str())).map(
                |index| {
                    let contact = &contacts[index];
                    Command::navigate_with(
                        ScreenTarget::Payment,
                        vec![
                            ("contactName".to_string(), contact.name.clone()),
                            ("mobile".to_string(), contact.mobile.clone()),
                        ],
                    )
                },
            )
        });

        let step = DialogueStep::new("Who do you want to pay? Say a contact name.", grammar)
            .with_help(format!(
                "Sorry, I do not have that contact. Say a name, like {}.",
                example
            ));

        Self { steps: vec![step] }
    }
}

impl DialogueScript for ContactsScreen {
    fn screen(&self) -> ScreenTarget {
        ScreenTarget::Contacts
    }

    fn steps(&self) -> &[DialogueStep] {
        &self.steps
    }

    fn confirmation(&self, command: &Command) -> String {
        match command {
            Command::Navigate {
                target: ScreenTarget::Payment,
                params,
            } => {
                let receiver = params
                    .iter()
                    .find(|(key, _)| key == "contactName")
                    .map(|(_, value)| value.as_str())
                    .unwrap_or("this contact");
                format!("Starting a payment to {}.", receiver)
            }
            Command::Navigate { target, .. } => format!("Opening {}.", target.label()),
            _ => "Going back.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::speech::Utterance;

    fn interpret(text: &str) -> Command {
        let screen = ContactsScreen::new(&Catalog::demo());
        screen.steps()[0].grammar.interpret(&Utterance::from_raw(text))
    }

    #[test]
    fn shared_first_name_picks_the_earlier_contact() {
        // Two Alices in the demo catalog; first entry wins.
        match interpret("alice") {
            Command::Navigate { target, params } => {
                assert_eq!(target, ScreenTarget::Payment);
                assert!(params.contains(&("contactName".to_string(), "Alice Kumar".to_string())));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn last_name_disambiguates() {
        match interpret("pay mehta") {
            Command::Navigate { params, .. } => {
                assert!(params.contains(&("contactName".to_string(), "Alice Mehta".to_string())));
                assert!(params.contains(&("mobile".to_string(), "9876502345".to_string())));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn unknown_name_is_unrecognized() {
        assert_eq!(interpret("bob"), Command::Unrecognized);
    }

    #[test]
    fn back_leaves_the_list() {
        assert_eq!(interpret("go back"), Command::GoBack);
    }

    #[test]
    fn confirmation_names_the_receiver() {
        let screen = ContactsScreen::new(&Catalog::demo());
        let command = interpret("priya");
        assert_eq!(
            screen.confirmation(&command),
            "Starting a payment to Priya Patel."
        );
    }
}
