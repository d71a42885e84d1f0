//! Transaction history read-out dialogue

use crate::application::{DialogueScript, DialogueStep};
use crate::domain::intent::ScreenTarget;

use super::menu_return_grammar;

// Demo feed until a real transaction feed exists: (name, amount, sent)
const DEMO_HISTORY: &[(&str, u64, bool)] = &[
    ("Alice Kumar", 500, true),
    ("Priya Patel", 1200, false),
    ("Rahul Sharma", 250, true),
];

/// The history screen reads recent transactions out loud, then waits
/// for a navigation phrase.
pub struct HistoryScreen {
    steps: Vec<DialogueStep>,
}

impl HistoryScreen {
    pub fn new() -> Self {
        let step = DialogueStep::new(summary(), menu_return_grammar())
            .with_help("Say home for the home screen, or back to leave.");
        Self { steps: vec![step] }
    }
}

impl Default for HistoryScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl DialogueScript for HistoryScreen {
    fn screen(&self) -> ScreenTarget {
        ScreenTarget::History
    }

    fn steps(&self) -> &[DialogueStep] {
        &self.steps
    }
}

fn summary() -> String {
    let mut lines = vec!["Here are your recent transactions.".to_string()];
    for (name, amount, sent) in DEMO_HISTORY {
        let (verb, connector) = if *sent { ("sent", "to") } else { ("received", "from") };
        lines.push(format!("You {} {} rupees {} {}.", verb, amount, connector, name));
    }
    lines.push("Say home or back.".to_string());
    lines.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::intent::Command;
    use crate::domain::speech::Utterance;

    #[test]
    fn summary_reads_both_directions() {
        let text = summary();
        assert!(text.contains("You sent 500 rupees to Alice Kumar."));
        assert!(text.contains("You received 1200 rupees from Priya Patel."));
    }

    #[test]
    fn navigation_phrases_work() {
        let screen = HistoryScreen::new();
        let grammar = &screen.steps()[0].grammar;
        assert_eq!(
            grammar.interpret(&Utterance::from_raw("take me home")),
            Command::navigate(ScreenTarget::Home)
        );
        assert_eq!(
            grammar.interpret(&Utterance::from_raw("go back")),
            Command::GoBack
        );
    }
}
