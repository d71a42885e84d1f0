//! Subprocess speech synthesizer adapter
//!
//! Drives espeak-ng, espeak or say (macOS) one utterance at a time.
//! Speech is a process-wide singleton: starting a new utterance kills
//! whatever is still playing, so the most recent caller always wins.

use std::process::Stdio;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
#[cfg(unix)]
use nix::sys::signal::{self, Signal};
#[cfg(unix)]
use nix::unistd::Pid;
use tokio::process::Command;
use tokio::sync::Mutex;

use crate::application::ports::{SpeechSynthesizer, SynthesisError};

/// Available speech tools
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SynthTool {
    /// espeak-ng (preferred on Linux)
    EspeakNg,
    /// Classic espeak
    Espeak,
    /// macOS built-in say
    Say,
}

impl SynthTool {
    /// Binary name for this tool
    pub fn binary(&self) -> &'static str {
        match self {
            Self::EspeakNg => "espeak-ng",
            Self::Espeak => "espeak",
            Self::Say => "say",
        }
    }
}

impl std::fmt::Display for SynthTool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.binary())
    }
}

/// Speech synthesizer backed by a subprocess speech tool
pub struct EspeakSynthesizer {
    tool: SynthTool,
    /// Pid of the live utterance, 0 when silent
    current_pid: Arc<AtomicU32>,
    /// Pid of the most recently stopped utterance, so its waiter can
    /// tell interruption apart from natural completion
    stopped_pid: Arc<AtomicU32>,
    is_speaking: Arc<AtomicBool>,
    /// Serializes the kill-previous-then-spawn handover
    turn: Mutex<()>,
}

impl EspeakSynthesizer {
    /// Create a synthesizer for the given tool
    pub fn new(tool: SynthTool) -> Self {
        Self {
            tool,
            current_pid: Arc::new(AtomicU32::new(0)),
            stopped_pid: Arc::new(AtomicU32::new(0)),
            is_speaking: Arc::new(AtomicBool::new(false)),
            turn: Mutex::new(()),
        }
    }

    /// Send SIGTERM to an utterance process. On non-unix platforms a
    /// playing utterance runs to its natural end instead.
    fn terminate(pid: u32) {
        #[cfg(unix)]
        {
            let _ = signal::kill(Pid::from_raw(pid as i32), Signal::SIGTERM);
        }
        #[cfg(not(unix))]
        {
            let _ = pid;
        }
    }

    /// Mark a pid stopped and signal it
    fn silence(&self, pid: u32) {
        self.stopped_pid.store(pid, Ordering::SeqCst);
        Self::terminate(pid);
    }
}

#[async_trait]
impl SpeechSynthesizer for EspeakSynthesizer {
    async fn speak(&self, text: &str) -> Result<(), SynthesisError> {
        // Take the turn: kill whatever is still playing, then spawn.
        // The lock is not held while waiting for playback.
        let child = {
            let _turn = self.turn.lock().await;

            let previous = self.current_pid.swap(0, Ordering::SeqCst);
            if previous != 0 {
                self.silence(previous);
            }

            let child = Command::new(self.tool.binary())
                .arg(text)
                .stdin(Stdio::null())
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .kill_on_drop(true)
                .spawn()
                .map_err(|e| {
                    if e.kind() == std::io::ErrorKind::NotFound {
                        SynthesisError::ToolNotFound(self.tool.binary().to_string())
                    } else {
                        SynthesisError::Io(e.to_string())
                    }
                })?;

            let pid = child.id().unwrap_or(0);
            self.current_pid.store(pid, Ordering::SeqCst);
            self.is_speaking.store(true, Ordering::SeqCst);
            (child, pid)
        };

        let (mut child, pid) = child;
        let status = child
            .wait()
            .await
            .map_err(|e| SynthesisError::Io(e.to_string()))?;

        // Only the utterance that still owns the channel clears it;
        // a barged-in waiter must not silence its successor.
        if self
            .current_pid
            .compare_exchange(pid, 0, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
        {
            self.is_speaking.store(false, Ordering::SeqCst);
        }

        if pid != 0
            && self
                .stopped_pid
                .compare_exchange(pid, 0, Ordering::SeqCst, Ordering::SeqCst)
                .is_ok()
        {
            return Err(SynthesisError::Interrupted);
        }

        if !status.success() {
            return Err(SynthesisError::Failed(format!(
                "{} exited with status: {}",
                self.tool.binary(),
                status
            )));
        }

        Ok(())
    }

    async fn stop(&self) {
        let pid = self.current_pid.swap(0, Ordering::SeqCst);
        if pid != 0 {
            self.silence(pid);
        }
        self.is_speaking.store(false, Ordering::SeqCst);
    }

    fn is_speaking(&self) -> bool {
        self.is_speaking.load(Ordering::SeqCst)
    }
}
