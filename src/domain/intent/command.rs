//! Commands resolved from spoken utterances

use std::fmt;
use std::str::FromStr;

use crate::domain::error::InvalidScreenError;

/// All navigable screens, in menu order
pub const ALL_SCREENS: &[ScreenTarget] = &[
    ScreenTarget::Login,
    ScreenTarget::SignUp,
    ScreenTarget::Home,
    ScreenTarget::Contacts,
    ScreenTarget::Payment,
    ScreenTarget::History,
    ScreenTarget::Balance,
    ScreenTarget::Profile,
];

/// Screens a command can navigate to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScreenTarget {
    Login,
    SignUp,
    Home,
    Contacts,
    Payment,
    History,
    Balance,
    Profile,
}

impl ScreenTarget {
    /// Get the screen ID used on the command line and in config
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::SignUp => "signup",
            Self::Home => "home",
            Self::Contacts => "contacts",
            Self::Payment => "payment",
            Self::History => "history",
            Self::Balance => "balance",
            Self::Profile => "profile",
        }
    }

    /// Human-readable screen title
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Login => "Login",
            Self::SignUp => "Sign Up",
            Self::Home => "Home",
            Self::Contacts => "Contacts",
            Self::Payment => "Payment",
            Self::History => "Transaction History",
            Self::Balance => "Balance",
            Self::Profile => "Profile",
        }
    }
}

impl fmt::Display for ScreenTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ScreenTarget {
    type Err = InvalidScreenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = s.trim().to_lowercase();
        ALL_SCREENS
            .iter()
            .find(|screen| screen.as_str() == id)
            .copied()
            .ok_or(InvalidScreenError { input: s.to_string() })
    }
}

/// The result of interpreting one utterance.
///
/// Navigate, GoBack and SubmitAmount end the session once their action
/// runs. SetField keeps the conversation going: a complete value
/// advances to the next step, a partial one repeats the current step.
/// Unrecognized and Invalid feed the retry loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Navigate {
        target: ScreenTarget,
        params: Vec<(String, String)>,
    },
    SetField {
        name: String,
        value: String,
        complete: bool,
    },
    SubmitAmount(u64),
    GoBack,
    Unrecognized,
    Invalid {
        message: String,
    },
}

impl Command {
    /// Navigate without parameters
    pub fn navigate(target: ScreenTarget) -> Self {
        Self::Navigate {
            target,
            params: Vec::new(),
        }
    }

    /// Navigate carrying parameters for the destination screen
    pub fn navigate_with(target: ScreenTarget, params: Vec<(String, String)>) -> Self {
        Self::Navigate { target, params }
    }

    /// A field value that completes the current step
    pub fn set_field(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::SetField {
            name: name.into(),
            value: value.into(),
            complete: true,
        }
    }

    /// A partial field value; delivered to the form but the step repeats
    pub fn partial_field(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::SetField {
            name: name.into(),
            value: value.into(),
            complete: false,
        }
    }

    /// A recognized but rejected value, with the feedback to speak
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid {
            message: message.into(),
        }
    }

    /// Whether this command ends the session once performed
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Navigate { .. } | Self::SubmitAmount(_) | Self::GoBack
        )
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Navigate { target, .. } => write!(f, "navigate to {}", target),
            Self::SetField { name, complete, .. } => {
                if *complete {
                    write!(f, "set {}", name)
                } else {
                    write!(f, "set {} (partial)", name)
                }
            }
            Self::SubmitAmount(amount) => write!(f, "submit amount {}", amount),
            Self::GoBack => write!(f, "go back"),
            Self::Unrecognized => write!(f, "unrecognized"),
            Self::Invalid { .. } => write!(f, "invalid"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn screen_from_str() {
        assert_eq!("login".parse::<ScreenTarget>().unwrap(), ScreenTarget::Login);
        assert_eq!("HOME".parse::<ScreenTarget>().unwrap(), ScreenTarget::Home);
        assert_eq!(
            " signup ".parse::<ScreenTarget>().unwrap(),
            ScreenTarget::SignUp
        );
    }

    #[test]
    fn screen_from_str_invalid() {
        let err = "settings".parse::<ScreenTarget>().unwrap_err();
        assert!(err.to_string().contains("settings"));
    }

    #[test]
    fn screen_round_trip() {
        for screen in ALL_SCREENS {
            assert_eq!(screen.as_str().parse::<ScreenTarget>().unwrap(), *screen);
        }
    }

    #[test]
    fn terminal_commands() {
        assert!(Command::navigate(ScreenTarget::Home).is_terminal());
        assert!(Command::GoBack.is_terminal());
        assert!(Command::SubmitAmount(500).is_terminal());
        assert!(!Command::set_field("phone", "9876543210").is_terminal());
        assert!(!Command::Unrecognized.is_terminal());
        assert!(!Command::invalid("try again").is_terminal());
    }

    #[test]
    fn set_field_constructors() {
        let complete = Command::set_field("phone", "9876543210");
        assert_eq!(
            complete,
            Command::SetField {
                name: "phone".to_string(),
                value: "9876543210".to_string(),
                complete: true,
            }
        );

        let partial = Command::partial_field("phone", "98765");
        assert!(matches!(partial, Command::SetField { complete: false, .. }));
    }

    #[test]
    fn command_display() {
        assert_eq!(
            Command::navigate(ScreenTarget::Balance).to_string(),
            "navigate to balance"
        );
        assert_eq!(Command::SubmitAmount(500).to_string(), "submit amount 500");
        assert_eq!(Command::GoBack.to_string(), "go back");
        assert_eq!(
            Command::partial_field("phone", "98").to_string(),
            "set phone (partial)"
        );
    }
}
