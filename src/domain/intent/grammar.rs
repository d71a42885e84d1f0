//! Utterance-to-command grammar

use crate::domain::intent::Command;
use crate::domain::speech::{normalize, parse_number_words, spell_digit_words, Utterance};

/// Number of digits in a complete mobile number
pub const PHONE_DIGITS: usize = 10;

/// Phrases that resolve to GoBack ahead of every screen rule.
/// Matched by containment in the normalized text.
pub const BACK_PHRASES: &[&str] = &["go back", "back", "previous", "return"];

/// Check whether normalized text contains any back phrase
pub fn contains_back_phrase(text: &str) -> bool {
    BACK_PHRASES.iter().any(|phrase| text.contains(phrase))
}

/// Digits extracted from normalized text, with digit words spelled
/// out first ("nine eight 7" yields "987").
pub fn extract_digits(text: &str) -> String {
    spell_digit_words(text)
        .chars()
        .filter(char::is_ascii_digit)
        .collect()
}

/// A mobile number heard in an utterance
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhoneValue {
    /// At least ten digits; truncated to the first ten
    Complete(String),
    /// Some digits, but fewer than ten
    Partial(String),
    /// No digits at all
    Empty,
}

/// Extract a mobile number from normalized text. Ten or more digits
/// make a complete number (extras beyond ten are dropped), fewer make
/// a partial one.
pub fn extract_phone(text: &str) -> PhoneValue {
    let digits = extract_digits(text);
    if digits.is_empty() {
        PhoneValue::Empty
    } else if digits.len() >= PHONE_DIGITS {
        PhoneValue::Complete(digits[..PHONE_DIGITS].to_string())
    } else {
        PhoneValue::Partial(digits)
    }
}

/// Extract a money amount from normalized text. Plain digits win
/// ("send 500" is 500); otherwise spoken number words are parsed
/// ("five hundred"). Returns None when neither form is present.
pub fn extract_amount(text: &str) -> Option<u64> {
    let digits: String = text.chars().filter(char::is_ascii_digit).collect();
    if !digits.is_empty() {
        return digits.parse().ok();
    }
    parse_number_words(text)
}

/// Find the first catalog entry whose name matches the utterance.
/// An entry matches when any utterance token is a substring of one of
/// the entry's name tokens. First match in catalog order wins, so
/// shared first names resolve to the earlier entry.
pub fn match_catalog<'a, I>(text: &str, names: I) -> Option<usize>
where
    I: IntoIterator<Item = &'a str>,
{
    let tokens: Vec<&str> = text.split_whitespace().collect();
    if tokens.is_empty() {
        return None;
    }
    for (index, name) in names.into_iter().enumerate() {
        let name = normalize(name);
        let matches = name.split_whitespace().any(|name_token| {
            tokens.iter().any(|token| name_token.contains(token))
        });
        if matches {
            return Some(index);
        }
    }
    None
}

type RuleFn = Box<dyn Fn(&str) -> Option<Command> + Send + Sync>;

struct GrammarRule {
    name: &'static str,
    matcher: RuleFn,
}

/// Ordered grammar mapping normalized utterances to commands.
///
/// Rules are tried in insertion order and the first match wins. Back
/// phrases are checked before any rule, so "go back" resolves to
/// GoBack on every screen regardless of what else was said. Empty
/// utterances and utterances no rule claims resolve to Unrecognized.
pub struct IntentGrammar {
    rules: Vec<GrammarRule>,
}

impl IntentGrammar {
    /// Create an empty grammar (back phrases still match)
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Append a named rule. Order of insertion is priority order.
    pub fn rule<F>(mut self, name: &'static str, matcher: F) -> Self
    where
        F: Fn(&str) -> Option<Command> + Send + Sync + 'static,
    {
        self.rules.push(GrammarRule {
            name,
            matcher: Box::new(matcher),
        });
        self
    }

    /// Names of the registered rules, in priority order
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|rule| rule.name).collect()
    }

    /// Resolve an utterance to a command
    pub fn interpret(&self, utterance: &Utterance) -> Command {
        let text = utterance.normalized();
        if text.is_empty() {
            return Command::Unrecognized;
        }
        if contains_back_phrase(text) {
            return Command::GoBack;
        }
        for rule in &self.rules {
            if let Some(command) = (rule.matcher)(text) {
                return command;
            }
        }
        Command::Unrecognized
    }
}

impl Default for IntentGrammar {
    fn default() -> Self {
        Self::new()
    }
}
