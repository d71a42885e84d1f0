//! Speech tool factory with automatic detection

use std::fmt;
use std::process::Stdio;
use std::str::FromStr;

use tokio::process::Command;

use crate::application::ports::{SpeechSynthesizer, SynthesisError};

use super::espeak::{EspeakSynthesizer, SynthTool};
use super::noop::NoOpSynthesizer;

/// User preference for speech tool selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SynthPreference {
    /// Auto-detect the best available tool, silent when none is
    #[default]
    Auto,
    /// Use espeak-ng
    EspeakNg,
    /// Use classic espeak
    Espeak,
    /// Use macOS say
    Say,
    /// No spoken prompts
    Off,
}

impl fmt::Display for SynthPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SynthPreference::Auto => write!(f, "auto"),
            SynthPreference::EspeakNg => write!(f, "espeak-ng"),
            SynthPreference::Espeak => write!(f, "espeak"),
            SynthPreference::Say => write!(f, "say"),
            SynthPreference::Off => write!(f, "off"),
        }
    }
}

/// Error type for parsing speech tool preference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseSynthPreferenceError {
    pub value: String,
}

impl fmt::Display for ParseSynthPreferenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid speech tool '{}'. Valid options: auto, espeak-ng, espeak, say, off",
            self.value
        )
    }
}

impl std::error::Error for ParseSynthPreferenceError {}

impl FromStr for SynthPreference {
    type Err = ParseSynthPreferenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(SynthPreference::Auto),
            "espeak-ng" => Ok(SynthPreference::EspeakNg),
            "espeak" => Ok(SynthPreference::Espeak),
            "say" => Ok(SynthPreference::Say),
            "off" | "none" => Ok(SynthPreference::Off),
            _ => Err(ParseSynthPreferenceError {
                value: s.to_string(),
            }),
        }
    }
}

/// Check if a tool binary is available using `which`
async fn is_tool_available(tool: &str) -> bool {
    Command::new("which")
        .arg(tool)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .await
        .map(|s| s.success())
        .unwrap_or(false)
}

/// Detect the best available speech tool
///
/// Priority is espeak-ng -> espeak -> say.
pub async fn detect_synth_tool() -> Option<SynthTool> {
    for tool in [SynthTool::EspeakNg, SynthTool::Espeak, SynthTool::Say] {
        if is_tool_available(tool.binary()).await {
            return Some(tool);
        }
    }
    None
}

/// Create a speech synthesizer for the given preference.
///
/// Returns the synthesizer and the detected tool (None when silent).
/// Auto falls back to silent operation when no tool is installed; a
/// specific preference fails instead so the user learns why.
pub async fn create_synthesizer(
    preference: SynthPreference,
) -> Result<(Box<dyn SpeechSynthesizer>, Option<SynthTool>), SynthesisError> {
    match preference {
        SynthPreference::Off => Ok((Box::new(NoOpSynthesizer::new()), None)),
        SynthPreference::Auto => match detect_synth_tool().await {
            Some(tool) => Ok((Box::new(EspeakSynthesizer::new(tool)), Some(tool))),
            None => Ok((Box::new(NoOpSynthesizer::new()), None)),
        },
        SynthPreference::EspeakNg => create_specific_tool(SynthTool::EspeakNg).await,
        SynthPreference::Espeak => create_specific_tool(SynthTool::Espeak).await,
        SynthPreference::Say => create_specific_tool(SynthTool::Say).await,
    }
}

/// Create a specific speech tool adapter, failing when it is absent
async fn create_specific_tool(
    tool: SynthTool,
) -> Result<(Box<dyn SpeechSynthesizer>, Option<SynthTool>), SynthesisError> {
    if is_tool_available(tool.binary()).await {
        Ok((Box::new(EspeakSynthesizer::new(tool)), Some(tool)))
    } else {
        Err(SynthesisError::ToolNotFound(tool.binary().to_string()))
    }
}
