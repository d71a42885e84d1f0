//! Voice interaction session use case
//!
//! Drives one screen's dialogue end to end: speak the prompt, open the
//! microphone, transcribe what was heard, interpret it against the
//! screen's grammar and perform the resolved command. Every await is
//! raced against the cancellation token so a shutdown request lands
//! between any two side effects.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::Notify;

use crate::domain::dialogue::{Duration, InvalidPhaseTransition, Session, DEFAULT_MAX_ATTEMPTS};
use crate::domain::intent::Command;
use crate::domain::speech::Utterance;

use super::ports::{
    ActionError, ActionSink, AudioCapture, AudioCue, AudioCueType, CaptureError, NavigationBridge,
    SpeechSynthesizer, SynthesisError, Transcriber,
};
use super::script::DialogueScript;

/// Cancellation token shared between a session and the outside world.
///
/// Cancellation is monotonic: once requested it never clears, so a
/// token covers a whole shell run across many sessions.
#[derive(Clone, Default)]
pub struct SessionCancellation {
    flag: Arc<AtomicBool>,
    notify: Arc<Notify>,
}

impl SessionCancellation {
    /// Create a fresh, uncancelled token
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Idempotent.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
        self.notify.notify_waiters();
    }

    /// Check if cancellation was requested
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    /// Resolve once cancellation is requested
    pub async fn cancelled(&self) {
        loop {
            if self.is_cancelled() {
                return;
            }
            let notified = self.notify.notified();
            tokio::pin!(notified);
            // Register before re-checking so a cancel between the
            // check and the await still wakes us.
            notified.as_mut().enable();
            if self.is_cancelled() {
                return;
            }
            notified.await;
        }
    }
}

/// Callbacks for session progress and status updates
#[derive(Default)]
#[allow(clippy::type_complexity)]
pub struct SessionCallbacks {
    /// Called with each line as the assistant starts speaking it
    pub on_speaking: Option<Box<dyn Fn(&str) + Send + Sync>>,
    /// Called when the microphone opens
    pub on_listening: Option<Box<dyn Fn() + Send + Sync>>,
    /// Called when a captured clip heads to transcription
    pub on_processing: Option<Box<dyn Fn() + Send + Sync>>,
    /// Called with each transcribed utterance
    pub on_utterance: Option<Box<dyn Fn(&str) + Send + Sync>>,
    /// Called with (attempts, budget) when an attempt fails and the
    /// session re-prompts
    pub on_retry: Option<Box<dyn Fn(u32, u32) + Send + Sync>>,
}

/// Timing and retry policy for interaction sessions
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    /// How long the microphone stays open per attempt
    pub listen_window: Duration,
    /// Pause between prompt playback and microphone open
    pub settle_delay: Duration,
    /// Recoverable failures tolerated per dialogue step
    pub max_attempts: u32,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            listen_window: Duration::default_listen_window(),
            settle_delay: Duration::default_settle_delay(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

/// Errors that end a session without a command
#[derive(Debug, Error)]
pub enum SessionFailure {
    #[error("Audio capture unavailable: {0}")]
    CaptureUnavailable(#[from] CaptureError),

    #[error("No usable answer after {0} attempts")]
    AttemptsExhausted(u32),

    #[error("Session state error: {0}")]
    Internal(#[from] InvalidPhaseTransition),
}

/// How a session ended
#[derive(Debug)]
pub enum SessionOutcome {
    /// A terminal command was confirmed and performed
    Completed(Command),
    /// The session gave up
    Failed(SessionFailure),
    /// Cancellation arrived before any command completed
    Cancelled,
}

/// Why the drive loop stopped early
enum Halt {
    Cancelled,
    Failed(SessionFailure),
}

impl From<InvalidPhaseTransition> for Halt {
    fn from(err: InvalidPhaseTransition) -> Self {
        Self::Failed(SessionFailure::Internal(err))
    }
}

impl From<CaptureError> for Halt {
    fn from(err: CaptureError) -> Self {
        Self::Failed(SessionFailure::CaptureUnavailable(err))
    }
}

/// What became of a terminal command
enum Concluded {
    /// Confirmed, performed, session complete
    Done(Command),
    /// The action refused; re-prompt with this wording
    Retry(String),
}

/// Race a future against the cancellation token.
/// Resolves to None as soon as cancellation is requested.
async fn or_cancelled<F>(cancellation: &SessionCancellation, future: F) -> Option<F::Output>
where
    F: std::future::Future,
{
    tokio::select! {
        biased;
        _ = cancellation.cancelled() => None,
        value = future => Some(value),
    }
}

/// Voice interaction session use case
pub struct InteractionController<C, S, T, N, A>
where
    C: AudioCapture,
    S: SpeechSynthesizer,
    T: Transcriber,
    N: NavigationBridge,
    A: ActionSink,
{
    capture: C,
    synthesizer: S,
    transcriber: T,
    navigation: N,
    actions: A,
    cue: Option<Box<dyn AudioCue>>,
    config: ControllerConfig,
}

impl<C, S, T, N, A> InteractionController<C, S, T, N, A>
where
    C: AudioCapture,
    S: SpeechSynthesizer,
    T: Transcriber,
    N: NavigationBridge,
    A: ActionSink,
{
    /// Create a new controller instance
    pub fn new(
        capture: C,
        synthesizer: S,
        transcriber: T,
        navigation: N,
        actions: A,
        config: ControllerConfig,
    ) -> Self {
        Self {
            capture,
            synthesizer,
            transcriber,
            navigation,
            actions,
            cue: None,
            config,
        }
    }

    /// Attach earcons marking the edges of the listen window
    pub fn with_audio_cue(mut self, cue: Box<dyn AudioCue>) -> Self {
        self.cue = Some(cue);
        self
    }

    /// Run one screen's dialogue to its outcome.
    ///
    /// # Arguments
    /// * `script` - The dialogue for the active screen
    /// * `cancellation` - Token that aborts the session when cancelled
    /// * `callbacks` - Progress hooks for the hosting UI
    pub async fn run(
        &self,
        script: &dyn DialogueScript,
        cancellation: &SessionCancellation,
        callbacks: &SessionCallbacks,
    ) -> SessionOutcome {
        let mut session = Session::new(self.config.max_attempts);
        match self
            .drive(script, &mut session, cancellation, callbacks)
            .await
        {
            Ok(command) => SessionOutcome::Completed(command),
            Err(Halt::Cancelled) => {
                self.shut_down(&mut session).await;
                SessionOutcome::Cancelled
            }
            Err(Halt::Failed(failure)) => {
                self.shut_down(&mut session).await;
                SessionOutcome::Failed(failure)
            }
        }
    }

    /// The speak -> listen -> transcribe -> interpret loop
    async fn drive(
        &self,
        script: &dyn DialogueScript,
        session: &mut Session,
        cancellation: &SessionCancellation,
        callbacks: &SessionCallbacks,
    ) -> Result<Command, Halt> {
        let steps = script.steps();
        let mut step_index = 0usize;
        let mut fields: Vec<(String, String)> = Vec::new();
        let mut line = match steps.first() {
            Some(step) => step.prompt.clone(),
            None => String::new(),
        };

        loop {
            if cancellation.is_cancelled() {
                return Err(Halt::Cancelled);
            }

            let Some(step) = steps.get(step_index) else {
                // Every form step is answered; the script decides the
                // terminal command.
                let command = script.finale(&fields);
                match self
                    .conclude(script, session, cancellation, callbacks, command)
                    .await?
                {
                    Concluded::Done(command) => return Ok(command),
                    Concluded::Retry(wording) => {
                        // Replay the last question so the user can
                        // answer their way out.
                        step_index = steps.len().saturating_sub(1);
                        line = wording;
                        continue;
                    }
                }
            };

            // Speak the current line
            session.begin_speaking()?;
            if let Some(ref cb) = callbacks.on_speaking {
                cb(&line);
            }
            let Some(spoken) = or_cancelled(cancellation, self.synthesizer.speak(&line)).await
            else {
                return Err(Halt::Cancelled);
            };
            match spoken {
                Ok(()) | Err(SynthesisError::Interrupted) => {}
                Err(e) => eprintln!("Warning: speech playback failed: {}", e),
            }
            if cancellation.is_cancelled() {
                return Err(Halt::Cancelled);
            }

            // Let the prompt's tail fade before the microphone opens
            let settle = tokio::time::sleep(self.config.settle_delay.as_std());
            if or_cancelled(cancellation, settle).await.is_none() {
                return Err(Halt::Cancelled);
            }

            // Open the microphone before the session is told to
            // listen, so a failed start leaves it in SPEAKING for the
            // retry prompt.
            match self.capture.start().await {
                Ok(()) => {}
                Err(e) if e.is_fatal() => return Err(e.into()),
                Err(e) => {
                    eprintln!("Warning: audio capture failed to start: {}", e);
                    line = self.note_failure(session, callbacks, &step.retry)?;
                    continue;
                }
            }

            let window = step.listen_window.unwrap_or(self.config.listen_window);
            session.begin_listening(window)?;
            if let Some(ref cb) = callbacks.on_listening {
                cb();
            }
            if let Some(ref cue) = self.cue {
                let _ = cue.play(AudioCueType::ListenStart).await;
            }

            // Hold the window open. The deadline was armed before the
            // cue played, so cue latency never stretches the window.
            let open = session
                .remaining_listen_time()
                .unwrap_or_else(|| window.as_std());
            if or_cancelled(cancellation, tokio::time::sleep(open))
                .await
                .is_none()
            {
                return Err(Halt::Cancelled);
            }

            if let Some(ref cue) = self.cue {
                let _ = cue.play(AudioCueType::ListenStop).await;
            }

            // Close the stream and collect the clip
            let clip = match self.capture.stop().await {
                Ok(clip) => clip.filter(|c| !c.is_empty()),
                Err(e) if e.is_fatal() => return Err(e.into()),
                Err(e) => {
                    eprintln!("Warning: audio capture failed: {}", e);
                    None
                }
            };

            session.begin_processing()?;
            if let Some(ref cb) = callbacks.on_processing {
                cb();
            }
            if cancellation.is_cancelled() {
                return Err(Halt::Cancelled);
            }

            let Some(clip) = clip else {
                line = self.note_failure(session, callbacks, &step.retry)?;
                continue;
            };

            // Transcribe
            let Some(transcribed) =
                or_cancelled(cancellation, self.transcriber.transcribe(&clip)).await
            else {
                return Err(Halt::Cancelled);
            };
            let text = match transcribed {
                Ok(text) => text,
                Err(e) => {
                    eprintln!("Warning: transcription failed: {}", e);
                    line = self.note_failure(session, callbacks, &step.retry)?;
                    continue;
                }
            };
            if let Some(ref cb) = callbacks.on_utterance {
                cb(&text);
            }

            // Interpret
            let utterance = Utterance::from_raw(text);
            match step.grammar.interpret(&utterance) {
                Command::Unrecognized => {
                    line = self.note_failure(session, callbacks, &step.help)?;
                }
                Command::Invalid { message } => {
                    line = self.note_failure(session, callbacks, &message)?;
                }
                Command::SetField {
                    name,
                    value,
                    complete,
                } => {
                    if !complete {
                        // A partial answer still lands in the form, and
                        // counts as progress so the budget resets, but
                        // the step repeats.
                        if let Err(e) = self.actions.set_field(&name, &value).await {
                            eprintln!("Warning: {}", e);
                        }
                        session.reset_attempts();
                        line = step.retry.clone();
                        continue;
                    }
                    match self.actions.set_field(&name, &value).await {
                        Ok(()) => {
                            fields.push((name, value));
                            session.reset_attempts();
                            step_index += 1;
                            if let Some(next) = steps.get(step_index) {
                                line = next.prompt.clone();
                            }
                        }
                        Err(e) => {
                            eprintln!("Warning: {}", e);
                            let command = Command::SetField {
                                name,
                                value,
                                complete,
                            };
                            line = self.note_failure(
                                session,
                                callbacks,
                                &script.action_failed(&command),
                            )?;
                        }
                    }
                }
                terminal => {
                    match self
                        .conclude(script, session, cancellation, callbacks, terminal)
                        .await?
                    {
                        Concluded::Done(command) => return Ok(command),
                        Concluded::Retry(wording) => line = wording,
                    }
                }
            }
        }
    }

    /// Confirm a terminal command out loud, then perform it.
    async fn conclude(
        &self,
        script: &dyn DialogueScript,
        session: &mut Session,
        cancellation: &SessionCancellation,
        callbacks: &SessionCallbacks,
        command: Command,
    ) -> Result<Concluded, Halt> {
        session.begin_speaking()?;
        let wording = script.confirmation(&command);
        if let Some(ref cb) = callbacks.on_speaking {
            cb(&wording);
        }
        let Some(spoken) = or_cancelled(cancellation, self.synthesizer.speak(&wording)).await
        else {
            return Err(Halt::Cancelled);
        };
        match spoken {
            Ok(()) => {}
            // An interrupted confirmation never commits the action.
            Err(SynthesisError::Interrupted) => return Err(Halt::Cancelled),
            Err(e) => eprintln!("Warning: speech playback failed: {}", e),
        }
        if cancellation.is_cancelled() {
            return Err(Halt::Cancelled);
        }

        match self.perform(&command).await {
            Ok(()) => {
                session.complete()?;
                Ok(Concluded::Done(command))
            }
            Err(e) => {
                eprintln!("Warning: {}", e);
                let wording =
                    self.note_failure(session, callbacks, &script.action_failed(&command))?;
                Ok(Concluded::Retry(wording))
            }
        }
    }

    /// Hand a terminal command to the shell
    async fn perform(&self, command: &Command) -> Result<(), ActionError> {
        match command {
            Command::Navigate { target, params } => self.navigation.navigate(*target, params).await,
            Command::GoBack => self.navigation.go_back().await,
            Command::SubmitAmount(amount) => self.actions.submit_amount(*amount).await,
            _ => Ok(()),
        }
    }

    /// Record a recoverable failure and pick the next line to speak.
    /// Fails the session once the retry budget is gone.
    fn note_failure(
        &self,
        session: &mut Session,
        callbacks: &SessionCallbacks,
        wording: &str,
    ) -> Result<String, Halt> {
        if session.record_failure() {
            return Err(Halt::Failed(SessionFailure::AttemptsExhausted(
                session.max_attempts(),
            )));
        }
        if let Some(ref cb) = callbacks.on_retry {
            cb(session.attempts(), session.max_attempts());
        }
        Ok(wording.to_string())
    }

    /// Halt every live side effect so nothing keeps sounding or
    /// recording after the session ends.
    async fn shut_down(&self, session: &mut Session) {
        session.cancel();
        self.synthesizer.stop().await;
        if let Err(e) = self.capture.cancel().await {
            eprintln!("Warning: failed to release audio capture: {}", e);
        }
    }
}
