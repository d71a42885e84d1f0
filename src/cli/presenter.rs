//! Terminal output: status glyphs and the busy spinner

use std::sync::Mutex;
use std::time::Duration;

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};

/// Presenter for CLI output formatting.
///
/// The session callbacks hold shared references, so the spinner sits
/// behind a mutex and every method takes &self.
pub struct Presenter {
    spinner: Mutex<Option<ProgressBar>>,
}

fn busy_style() -> ProgressStyle {
    ProgressStyle::default_spinner()
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
        .template("{spinner:.cyan} {msg}")
        .unwrap()
}

fn status(glyph: ColoredString, message: &str) {
    eprintln!("{} {}", glyph, message);
}

impl Presenter {
    pub fn new() -> Self {
        Self {
            spinner: Mutex::new(None),
        }
    }

    /// Show a spinner until end_busy, replacing any running one
    pub fn begin_busy(&self, message: &str) {
        let spinner = ProgressBar::new_spinner()
            .with_style(busy_style())
            .with_message(message.to_string());
        spinner.enable_steady_tick(Duration::from_millis(80));

        let mut slot = self.spinner.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(old) = slot.replace(spinner) {
            old.finish_and_clear();
        }
    }

    /// Swap the spinner message in place
    pub fn update_busy(&self, message: &str) {
        let slot = self.spinner.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(ref spinner) = *slot {
            spinner.set_message(message.to_string());
        }
    }

    /// Clear the spinner, if one is running
    pub fn end_busy(&self) {
        let mut slot = self.spinner.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(spinner) = slot.take() {
            spinner.finish_and_clear();
        }
    }

    /// Print a line the assistant is speaking
    pub fn say(&self, line: &str) {
        eprintln!("{} {}", "»".cyan(), line);
    }

    /// Print a transcribed user utterance
    pub fn heard(&self, text: &str) {
        eprintln!("{} {}", "«".green(), text.italic());
    }

    /// Print the screen banner when a session starts
    pub fn screen(&self, label: &str) {
        eprintln!("{} {}", "●".cyan(), label.bold());
    }

    /// Neutral status line on stderr
    pub fn info(&self, message: &str) {
        status("ℹ".cyan(), message);
    }

    /// Confirmation line on stderr
    pub fn success(&self, message: &str) {
        status("✓".green(), message);
    }

    /// Recoverable-problem line on stderr
    pub fn warn(&self, message: &str) {
        status("⚠".yellow(), message);
    }

    /// Failure line on stderr
    pub fn error(&self, message: &str) {
        status("✗".red(), message);
    }

    /// Bare line on stdout, for values scripts consume
    pub fn output(&self, text: &str) {
        println!("{}", text);
    }

    /// Config listing row on stdout
    pub fn key_value(&self, key: &str, value: &str) {
        println!("{}: {}", key.cyan(), value);
    }
}

impl Default for Presenter {
    fn default() -> Self {
        Self::new()
    }
}

/// Format the retry status line shown after a failed attempt
pub fn attempt_note(attempts: u32, budget: u32) -> String {
    format!("Attempt {} of {} failed", attempts, budget)
}
