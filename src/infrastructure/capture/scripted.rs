//! Text-mode capture that replays typed lines instead of microphone audio
//!
//! Each listen window consumes one line: whatever arrived on stdin
//! (or was queued up front) while the window was open. The clip's
//! bytes are the line's UTF-8, paired with the loopback transcriber.

use std::collections::VecDeque;
use std::io::BufRead;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex as StdMutex};

use async_trait::async_trait;

use crate::application::ports::{AudioCapture, CaptureError};
use crate::domain::speech::AudioClip;

/// Capture adapter fed by lines of text
pub struct ScriptedCapture {
    lines: Arc<StdMutex<VecDeque<String>>>,
    live: Arc<AtomicBool>,
}

impl ScriptedCapture {
    /// Create a capture backed by a fixed queue of lines
    pub fn with_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: Arc::new(StdMutex::new(
                lines.into_iter().map(Into::into).collect(),
            )),
            live: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Create a capture fed by stdin.
    ///
    /// A reader thread queues lines as they arrive; each listen
    /// window drains one. Lines typed between windows stay queued.
    pub fn from_stdin() -> Self {
        let capture = Self::with_lines(Vec::<String>::new());
        let lines = Arc::clone(&capture.lines);

        std::thread::spawn(move || {
            let stdin = std::io::stdin();
            for line in stdin.lock().lines() {
                match line {
                    Ok(line) => lines
                        .lock()
                        .unwrap_or_else(|e| e.into_inner())
                        .push_back(line),
                    Err(_) => break,
                }
            }
        });

        capture
    }
}

#[async_trait]
impl AudioCapture for ScriptedCapture {
    async fn start(&self) -> Result<(), CaptureError> {
        self.live.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn stop(&self) -> Result<Option<AudioClip>, CaptureError> {
        if !self.live.swap(false, Ordering::SeqCst) {
            return Ok(None);
        }

        let line = self
            .lines
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop_front();
        Ok(line.map(|l| AudioClip::wav(l.into_bytes())))
    }

    async fn cancel(&self) -> Result<(), CaptureError> {
        self.live.store(false, Ordering::SeqCst);
        Ok(())
    }

    fn is_capturing(&self) -> bool {
        self.live.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn replays_lines_in_order() {
        let capture = ScriptedCapture::with_lines(["balance", "back"]);

        capture.start().await.unwrap();
        let first = capture.stop().await.unwrap().unwrap();
        assert_eq!(first.data(), b"balance");

        capture.start().await.unwrap();
        let second = capture.stop().await.unwrap().unwrap();
        assert_eq!(second.data(), b"back");
    }

    #[tokio::test]
    async fn exhausted_queue_yields_silence() {
        let capture = ScriptedCapture::with_lines(Vec::<String>::new());
        capture.start().await.unwrap();
        assert!(capture.stop().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn stop_without_start_is_noop() {
        let capture = ScriptedCapture::with_lines(["queued"]);
        assert!(capture.stop().await.unwrap().is_none());
        // The queued line survives for the next real window.
        capture.start().await.unwrap();
        assert!(capture.stop().await.unwrap().is_some());
    }
}
