//! Utterance value object and spoken-text normalization

/// A transcribed utterance.
/// Keeps the raw service text for display and a normalized form for
/// grammar matching. Normalization lowercases, strips everything
/// outside `[a-z0-9 ]` and collapses whitespace runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Utterance {
    raw: String,
    normalized: String,
}

impl Utterance {
    /// Build an utterance from raw transcription text
    pub fn from_raw(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let normalized = normalize(&raw);
        Self { raw, normalized }
    }

    /// The text exactly as the transcription service returned it
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The normalized form used for grammar matching
    pub fn normalized(&self) -> &str {
        &self.normalized
    }
}

/// Normalize spoken text for matching: lowercase, strip punctuation,
/// collapse whitespace.
pub fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase();
    let stripped: String = lowered
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() {
                c
            } else {
                ' '
            }
        })
        .collect();
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Replace standalone digit words with digit characters, leaving every
/// other token untouched ("nine eight seven" becomes "9 8 7").
pub fn spell_digit_words(text: &str) -> String {
    text.split_whitespace()
        .map(|token| digit_word(token).map(str::to_string).unwrap_or_else(|| token.to_string()))
        .collect::<Vec<_>>()
        .join(" ")
}

fn digit_word(token: &str) -> Option<&'static str> {
    match token {
        "zero" | "oh" => Some("0"),
        "one" => Some("1"),
        "two" => Some("2"),
        "three" => Some("3"),
        "four" => Some("4"),
        "five" => Some("5"),
        "six" => Some("6"),
        "seven" => Some("7"),
        "eight" => Some("8"),
        "nine" => Some("9"),
        _ => None,
    }
}

enum NumberWord {
    Unit(u64),
    Teen(u64),
    Tens(u64),
    Hundred,
    Scale(u64),
}

fn number_word(token: &str) -> Option<NumberWord> {
    let word = match token {
        "zero" | "oh" => NumberWord::Unit(0),
        "one" => NumberWord::Unit(1),
        "two" => NumberWord::Unit(2),
        "three" => NumberWord::Unit(3),
        "four" => NumberWord::Unit(4),
        "five" => NumberWord::Unit(5),
        "six" => NumberWord::Unit(6),
        "seven" => NumberWord::Unit(7),
        "eight" => NumberWord::Unit(8),
        "nine" => NumberWord::Unit(9),
        "ten" => NumberWord::Teen(10),
        "eleven" => NumberWord::Teen(11),
        "twelve" => NumberWord::Teen(12),
        "thirteen" => NumberWord::Teen(13),
        "fourteen" => NumberWord::Teen(14),
        "fifteen" => NumberWord::Teen(15),
        "sixteen" => NumberWord::Teen(16),
        "seventeen" => NumberWord::Teen(17),
        "eighteen" => NumberWord::Teen(18),
        "nineteen" => NumberWord::Teen(19),
        "twenty" => NumberWord::Tens(20),
        "thirty" => NumberWord::Tens(30),
        "forty" => NumberWord::Tens(40),
        "fifty" => NumberWord::Tens(50),
        "sixty" => NumberWord::Tens(60),
        "seventy" => NumberWord::Tens(70),
        "eighty" => NumberWord::Tens(80),
        "ninety" => NumberWord::Tens(90),
        "hundred" => NumberWord::Hundred,
        "thousand" => NumberWord::Scale(1_000),
        "lakh" | "lakhs" => NumberWord::Scale(100_000),
        _ => return None,
    };
    Some(word)
}

/// Parse a spoken number from normalized text, skipping filler words.
/// Handles arithmetic forms ("five hundred", "twenty five thousand")
/// and per-digit dictation ("five zero zero" is 500). Returns None
/// when no number word is present.
pub fn parse_number_words(text: &str) -> Option<u64> {
    let mut total: u64 = 0;
    let mut current: u64 = 0;
    let mut dictated = String::new();
    let mut all_units = true;
    let mut matched_any = false;

    for token in text.split_whitespace() {
        if token == "and" {
            continue;
        }
        let Some(word) = number_word(token) else {
            continue;
        };
        matched_any = true;
        match word {
            NumberWord::Unit(n) => {
                current = current.saturating_add(n);
                dictated.push((b'0' + n as u8) as char);
            }
            NumberWord::Teen(n) | NumberWord::Tens(n) => {
                current = current.saturating_add(n);
                all_units = false;
            }
            NumberWord::Hundred => {
                current = current.max(1).saturating_mul(100);
                all_units = false;
            }
            NumberWord::Scale(mult) => {
                total = total.saturating_add(current.max(1).saturating_mul(mult));
                current = 0;
                all_units = false;
            }
        }
    }

    if !matched_any {
        return None;
    }
    if all_units && dictated.len() > 1 {
        return dictated.parse().ok();
    }
    Some(total.saturating_add(current))
}

/// Rewrite spoken email connectors and join the tokens without spaces:
/// "john smith at gmail dot com" becomes "johnsmith@gmail.com".
pub fn spell_email_words(text: &str) -> String {
    text.split_whitespace()
        .map(|token| match token {
            "at" => "@",
            "dot" => ".",
            other => other,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_lowercases_and_strips_punctuation() {
        assert_eq!(normalize("Sign UP, please!"), "sign up please");
    }

    #[test]
    fn normalize_keeps_digits() {
        assert_eq!(normalize("send 500 rupees"), "send 500 rupees");
    }

    #[test]
    fn normalize_collapses_whitespace() {
        assert_eq!(normalize("  pay \t Alice \n now  "), "pay alice now");
    }

    #[test]
    fn normalize_empty_and_punctuation_only() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("?!..."), "");
    }

    #[test]
    fn utterance_keeps_raw_text() {
        let u = Utterance::from_raw("Sign Up!");
        assert_eq!(u.raw(), "Sign Up!");
        assert_eq!(u.normalized(), "sign up");
    }

    #[test]
    fn spell_digit_words_replaces_only_digit_tokens() {
        assert_eq!(
            spell_digit_words("nine eight seven six five four three two one zero"),
            "9 8 7 6 5 4 3 2 1 0"
        );
        assert_eq!(spell_digit_words("my number is nine"), "my number is 9");
    }

    #[test]
    fn spell_digit_words_handles_oh() {
        assert_eq!(spell_digit_words("nine oh one"), "9 0 1");
    }

    #[test]
    fn parse_number_words_arithmetic() {
        assert_eq!(parse_number_words("five hundred"), Some(500));
        assert_eq!(parse_number_words("twenty five"), Some(25));
        assert_eq!(parse_number_words("two thousand five hundred"), Some(2500));
        assert_eq!(parse_number_words("one lakh"), Some(100_000));
    }

    #[test]
    fn parse_number_words_with_fillers() {
        assert_eq!(parse_number_words("send five hundred rupees"), Some(500));
        assert_eq!(parse_number_words("one hundred and fifty"), Some(150));
    }

    #[test]
    fn parse_number_words_dictated_digits() {
        assert_eq!(parse_number_words("five zero zero"), Some(500));
        assert_eq!(parse_number_words("one oh one"), Some(101));
    }

    #[test]
    fn parse_number_words_single_unit() {
        assert_eq!(parse_number_words("five"), Some(5));
    }

    #[test]
    fn parse_number_words_bare_hundred() {
        assert_eq!(parse_number_words("hundred"), Some(100));
    }

    #[test]
    fn parse_number_words_none_without_numbers() {
        assert_eq!(parse_number_words("pay alice"), None);
        assert_eq!(parse_number_words(""), None);
    }

    #[test]
    fn spell_email_words_builds_address() {
        assert_eq!(
            spell_email_words("john smith at gmail dot com"),
            "johnsmith@gmail.com"
        );
        assert_eq!(spell_email_words("rahul at yahoo dot in"), "rahul@yahoo.in");
    }
}
