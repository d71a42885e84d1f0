//! CLI argument definitions using Clap

use clap::{Parser, Subcommand};

use crate::domain::dialogue::Duration;
use crate::domain::intent::{Catalog, ScreenTarget};
use crate::infrastructure::SynthPreference;

/// VoicePay - voice-first shell for the demo banking service
#[derive(Parser, Debug)]
#[command(name = "voicepay")]
#[command(version = "0.1.0")]
#[command(about = "Voice-first banking shell: speaks each screen, listens for commands")]
#[command(long_about = None)]
pub struct Cli {
    /// Base URL of the speech and banking service
    #[arg(short = 's', long, global = true, value_name = "URL", env = "VOICEPAY_SERVER_URL")]
    pub server_url: Option<String>,

    /// How long the microphone stays open per attempt (e.g., 8s, 500ms)
    #[arg(short = 'w', long, global = true, value_name = "TIME")]
    pub listen_window: Option<String>,

    /// Pause between a prompt and the listen tone (e.g., 300ms)
    #[arg(long, global = true, value_name = "TIME")]
    pub settle_delay: Option<String>,

    /// Failed attempts tolerated per question before the screen gives up
    #[arg(long, global = true, value_name = "N")]
    pub max_attempts: Option<u32>,

    /// Speech tool (auto, espeak-ng, espeak, say, off)
    #[arg(long, global = true, value_name = "TOOL", env = "VOICEPAY_SYNTH")]
    pub synth: Option<String>,

    /// Disable the listen start and stop tones
    #[arg(long, global = true)]
    pub no_cues: bool,

    /// Type answers instead of speaking them (reads lines from stdin)
    #[arg(short = 't', long, global = true)]
    pub text: bool,

    /// Screen to start on (login, signup, home, contacts, payment,
    /// history, balance, profile)
    #[arg(long, global = true, value_name = "SCREEN")]
    pub screen: Option<String>,

    /// Catalog JSON file with banks and contacts
    #[arg(long, global = true, value_name = "FILE")]
    pub catalog: Option<String>,

    /// Subcommand (the voice shell runs when none is given)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the voice shell (the default)
    Run,
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config action subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create config file with defaults
    Init,
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// Config value
        value: String,
    },
    /// Get a config value
    Get {
        /// Config key
        key: String,
    },
    /// List all config values
    List,
    /// Show config file path
    Path,
}

/// Parsed shell options after config merging
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub server_url: String,
    pub listen_window: Duration,
    pub settle_delay: Duration,
    pub max_attempts: u32,
    pub synth: SynthPreference,
    pub cues: bool,
    pub text: bool,
    pub start_screen: ScreenTarget,
    pub catalog: Catalog,
}

/// Valid config keys
pub const VALID_CONFIG_KEYS: &[&str] = &[
    "server_url",
    "listen_window",
    "settle_delay",
    "max_attempts",
    "synth",
    "cues",
    "catalog",
];

/// Check if a config key is valid
pub fn is_valid_config_key(key: &str) -> bool {
    VALID_CONFIG_KEYS.contains(&key)
}
