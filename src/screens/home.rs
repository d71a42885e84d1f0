//! Home screen menu dialogue

use crate::application::{DialogueScript, DialogueStep};
use crate::domain::intent::{Command, IntentGrammar, ScreenTarget};

/// The home menu. Pay phrases open the contact list, because a payment
/// always starts by picking a payee.
pub struct HomeScreen {
    steps: Vec<DialogueStep>,
}

impl HomeScreen {
    pub fn new() -> Self {
        let grammar = IntentGrammar::new()
            .rule("pay", |text| {
                (text.contains("pay") || text.contains("send money"))
                    .then(|| Command::navigate(ScreenTarget::Contacts))
            })
            .rule("history", |text| {
                (text.contains("history") || text.contains("transaction"))
                    .then(|| Command::navigate(ScreenTarget::History))
            })
            .rule("balance", |text| {
                text.contains("balance")
                    .then(|| Command::navigate(ScreenTarget::Balance))
            })
            .rule("profile", |text| {
                (text.contains("profile") || text.contains("account"))
                    .then(|| Command::navigate(ScreenTarget::Profile))
            })
            .rule("contacts", |text| {
                text.contains("contact")
                    .then(|| Command::navigate(ScreenTarget::Contacts))
            });

        let step = DialogueStep::new(
            "Welcome. Say pay, history, balance, contacts, or profile.",
            grammar,
        )
        .with_help(
            "You can say pay, history, balance, contacts, or profile. Say back to log out.",
        );

        Self { steps: vec![step] }
    }
}

impl Default for HomeScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl DialogueScript for HomeScreen {
    fn screen(&self) -> ScreenTarget {
        ScreenTarget::Home
    }

    fn steps(&self) -> &[DialogueStep] {
        &self.steps
    }
}
