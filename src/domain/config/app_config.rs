//! Application configuration value object

use serde::{Deserialize, Serialize};

use crate::domain::dialogue::{Duration, DEFAULT_MAX_ATTEMPTS};

/// Default base URL of the transcription and payment service
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:5000";

/// Default speech engine preference
pub const DEFAULT_SYNTH: &str = "auto";

/// Application configuration.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub server_url: Option<String>,
    pub listen_window: Option<String>,
    pub settle_delay: Option<String>,
    pub max_attempts: Option<u32>,
    pub synth: Option<String>,
    pub cues: Option<bool>,
    pub catalog: Option<String>,
}

impl AppConfig {
    /// Create config with default values
    pub fn defaults() -> Self {
        Self {
            server_url: Some(DEFAULT_SERVER_URL.to_string()),
            listen_window: Some("8s".to_string()),
            settle_delay: Some("300ms".to_string()),
            max_attempts: Some(DEFAULT_MAX_ATTEMPTS),
            synth: Some(DEFAULT_SYNTH.to_string()),
            cues: Some(true),
            catalog: None,
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    /// Only non-None values from other will override this.
    pub fn merge(self, other: Self) -> Self {
        Self {
            server_url: other.server_url.or(self.server_url),
            listen_window: other.listen_window.or(self.listen_window),
            settle_delay: other.settle_delay.or(self.settle_delay),
            max_attempts: other.max_attempts.or(self.max_attempts),
            synth: other.synth.or(self.synth),
            cues: other.cues.or(self.cues),
            catalog: other.catalog.or(self.catalog),
        }
    }

    /// Get server_url, or the default if not set
    pub fn server_url_or_default(&self) -> &str {
        self.server_url.as_deref().unwrap_or(DEFAULT_SERVER_URL)
    }

    /// Get listen_window as parsed Duration, or default if not set/invalid
    pub fn listen_window_or_default(&self) -> Duration {
        self.listen_window
            .as_ref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(Duration::default_listen_window)
    }

    /// Get settle_delay as parsed Duration, or default if not set/invalid
    pub fn settle_delay_or_default(&self) -> Duration {
        self.settle_delay
            .as_ref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(Duration::default_settle_delay)
    }

    /// Get max_attempts, or the default budget if not set
    pub fn max_attempts_or_default(&self) -> u32 {
        self.max_attempts.unwrap_or(DEFAULT_MAX_ATTEMPTS).max(1)
    }

    /// Get the speech engine preference, or "auto" if not set
    pub fn synth_or_default(&self) -> &str {
        self.synth.as_deref().unwrap_or(DEFAULT_SYNTH)
    }

    /// Get the listen cue setting, or true if not set
    pub fn cues_or_default(&self) -> bool {
        self.cues.unwrap_or(true)
    }
}
