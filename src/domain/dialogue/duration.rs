//! Dialogue timing value object

use std::fmt;
use std::str::FromStr;
use std::time::Duration as StdDuration;

use crate::domain::error::DurationParseError;

/// Default listen window after each prompt (8 seconds)
pub const DEFAULT_LISTEN_WINDOW_SECS: u64 = 8;

/// Default settle delay between prompt end and capture start (300 ms)
pub const DEFAULT_SETTLE_DELAY_MS: u64 = 300;

/// A dialogue timing span, stored in milliseconds.
///
/// Parsed from the human-readable config forms "300ms", "8s", "1m"
/// and "1m30s". Zero spans are rejected so a bad config value can
/// never produce an instantly-closed listen window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Duration {
    milliseconds: u64,
}

impl Duration {
    pub const fn from_millis(ms: u64) -> Self {
        Self { milliseconds: ms }
    }

    pub const fn from_secs(secs: u64) -> Self {
        Self {
            milliseconds: secs * 1000,
        }
    }

    /// Listen window used when neither config nor flags set one
    pub const fn default_listen_window() -> Self {
        Self::from_secs(DEFAULT_LISTEN_WINDOW_SECS)
    }

    /// Settle delay used when neither config nor flags set one
    pub const fn default_settle_delay() -> Self {
        Self::from_millis(DEFAULT_SETTLE_DELAY_MS)
    }

    pub const fn as_secs(&self) -> u64 {
        self.milliseconds / 1000
    }

    pub const fn as_millis(&self) -> u64 {
        self.milliseconds
    }

    pub const fn as_std(&self) -> StdDuration {
        StdDuration::from_millis(self.milliseconds)
    }
}

impl FromStr for Duration {
    type Err = DurationParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim().to_ascii_lowercase();
        let fail = || DurationParseError {
            input: s.to_string(),
        };

        let total_ms = if let Some(number) = text.strip_suffix("ms") {
            number.parse::<u64>().map_err(|_| fail())?
        } else {
            // "8s", "1m" or "1m30s"
            let (minutes, rest) = match text.split_once('m') {
                Some((number, rest)) => (number.parse::<u64>().map_err(|_| fail())?, rest),
                None => (0, text.as_str()),
            };
            let seconds = match rest.strip_suffix('s') {
                Some(number) => number.parse::<u64>().map_err(|_| fail())?,
                None if rest.is_empty() && minutes > 0 => 0,
                None => return Err(fail()),
            };
            (minutes * 60 + seconds) * 1000
        };

        if total_ms == 0 {
            return Err(fail());
        }

        Ok(Self {
            milliseconds: total_ms,
        })
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.milliseconds % 1000 != 0 {
            return write!(f, "{}ms", self.milliseconds);
        }
        match (self.as_secs() / 60, self.as_secs() % 60) {
            (0, s) => write!(f, "{}s", s),
            (m, 0) => write!(f, "{}m", m),
            (m, s) => write!(f, "{}m{}s", m, s),
        }
    }
}

impl Default for Duration {
    fn default() -> Self {
        Self::default_listen_window()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_accepted_form() {
        let cases = [
            ("300ms", 300),
            ("8s", 8_000),
            ("45s", 45_000),
            ("1m", 60_000),
            ("1m30s", 90_000),
            ("2m15s", 135_000),
            ("500MS", 500),
            ("  8s  ", 8_000),
        ];
        for (text, expected_ms) in cases {
            let parsed: Duration = text.parse().unwrap();
            assert_eq!(parsed.as_millis(), expected_ms, "input {:?}", text);
        }
    }

    #[test]
    fn rejects_zero_spans() {
        for text in ["0ms", "0s", "0m", "0m0s"] {
            assert!(text.parse::<Duration>().is_err(), "input {:?}", text);
        }
    }

    #[test]
    fn rejects_malformed_input() {
        for text in ["", "30", "abc", "30x", "m30s", "1m30", "s", "ms"] {
            assert!(text.parse::<Duration>().is_err(), "input {:?}", text);
        }
    }

    #[test]
    fn parse_error_names_the_input() {
        let err = "five".parse::<Duration>().unwrap_err();
        assert!(err.to_string().contains("five"));
    }

    #[test]
    fn display_round_trips() {
        for text in ["300ms", "8s", "2m", "1m30s"] {
            let parsed: Duration = text.parse().unwrap();
            assert_eq!(parsed.to_string(), text);
        }
    }

    #[test]
    fn sub_second_spans_display_as_millis() {
        assert_eq!(Duration::from_millis(250).to_string(), "250ms");
        assert_eq!(Duration::from_millis(1500).to_string(), "1500ms");
    }

    #[test]
    fn unit_conversions() {
        let span = Duration::from_secs(90);
        assert_eq!(span.as_secs(), 90);
        assert_eq!(span.as_millis(), 90_000);
        assert_eq!(span.as_std(), StdDuration::from_secs(90));
    }

    #[test]
    fn defaults() {
        assert_eq!(Duration::default_listen_window().as_secs(), 8);
        assert_eq!(Duration::default_settle_delay().as_millis(), 300);
        assert_eq!(Duration::default(), Duration::default_listen_window());
    }
}
