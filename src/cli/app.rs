//! The hosting app shell for the voice sessions
//!
//! Owns the screen stack the navigation port mutates. Each pass of the
//! shell loop runs one session against the top of the stack; navigation
//! commands decide what the next pass sees. Popping the last screen
//! ends the shell.

use std::process::ExitCode;
use std::sync::{Arc, Mutex as StdMutex};

use async_trait::async_trait;
use tokio::fs;

use crate::application::ports::{
    ActionError, ActionSink, AudioCapture, ConfigStore, NavigationBridge, PaymentGateway,
    PaymentRequest, SpeechSynthesizer, Transcriber,
};
use crate::application::{
    ControllerConfig, InteractionController, SessionCallbacks, SessionCancellation,
    SessionFailure, SessionOutcome,
};
use crate::domain::config::AppConfig;
use crate::domain::intent::{Catalog, Command, ScreenTarget};
use crate::infrastructure::{
    create_audio_cue, create_capture, create_synthesizer, HttpPaymentGateway, HttpTranscriber,
    LoopbackTranscriber, NoOpSynthesizer, ScriptedCapture, XdgConfigStore,
};
use crate::screens::create_script;

use super::args::RunOptions;
use super::presenter::{attempt_note, Presenter};
use super::signals::install_shutdown_handlers;

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_USAGE_ERROR: u8 = 2;

/// One entry on the screen stack
#[derive(Debug, Clone)]
struct ScreenEntry {
    target: ScreenTarget,
    params: Vec<(String, String)>,
}

/// Shell state shared between the navigation and action ports.
///
/// `user_phone` is captured from the phone param the login and sign-up
/// screens carry to Home, and becomes the sender of every payment.
#[derive(Debug)]
struct ShellState {
    stack: Vec<ScreenEntry>,
    user_phone: Option<String>,
}

impl ShellState {
    fn new(start: ScreenTarget) -> Self {
        Self {
            stack: vec![ScreenEntry {
                target: start,
                params: Vec::new(),
            }],
            user_phone: None,
        }
    }
}

type SharedState = Arc<StdMutex<ShellState>>;

fn lock_state(state: &SharedState) -> std::sync::MutexGuard<'_, ShellState> {
    state.lock().unwrap_or_else(|e| e.into_inner())
}

/// Navigation port backed by the in-process screen stack
struct ShellNavigator {
    state: SharedState,
}

#[async_trait]
impl NavigationBridge for ShellNavigator {
    async fn navigate(
        &self,
        target: ScreenTarget,
        params: &[(String, String)],
    ) -> Result<(), ActionError> {
        let mut state = lock_state(&self.state);
        if let Some((_, phone)) = params.iter().find(|(key, _)| key == "phone") {
            state.user_phone = Some(phone.clone());
        }
        // Home restarts the stack: logging in or returning to the menu
        // leaves no screens to back into except Home itself.
        if target == ScreenTarget::Home {
            state.stack.clear();
        }
        state.stack.push(ScreenEntry {
            target,
            params: params.to_vec(),
        });
        Ok(())
    }

    async fn go_back(&self) -> Result<(), ActionError> {
        let mut state = lock_state(&self.state);
        state.stack.pop();
        Ok(())
    }
}

/// Action port recording field values and submitting payments
struct ShellSink<G: PaymentGateway> {
    state: SharedState,
    gateway: G,
}

#[async_trait]
impl<G: PaymentGateway> ActionSink for ShellSink<G> {
    async fn set_field(&self, name: &str, value: &str) -> Result<(), ActionError> {
        let mut state = lock_state(&self.state);
        let Some(entry) = state.stack.last_mut() else {
            return Err(ActionError::Field {
                name: name.to_string(),
                message: "no active screen".to_string(),
            });
        };
        match entry.params.iter_mut().find(|(key, _)| key == name) {
            Some(slot) => slot.1 = value.to_string(),
            None => entry.params.push((name.to_string(), value.to_string())),
        }
        Ok(())
    }

    async fn submit_amount(&self, amount: u64) -> Result<(), ActionError> {
        let (sender, receiver) = {
            let state = lock_state(&self.state);
            let sender = state.user_phone.clone();
            let receiver = state
                .stack
                .last()
                .and_then(|entry| entry.params.iter().find(|(key, _)| key == "mobile"))
                .map(|(_, mobile)| mobile.clone());
            (sender, receiver)
        };

        let Some(sender_phone) = sender else {
            return Err(ActionError::Payment("not logged in".to_string()));
        };
        let Some(receiver_phone) = receiver else {
            return Err(ActionError::Payment("no receiver selected".to_string()));
        };

        let request = PaymentRequest {
            sender_phone,
            receiver_phone,
            amount,
        };
        self.gateway
            .submit(&request)
            .await
            .map_err(|e| ActionError::Payment(e.to_string()))
    }
}

/// Load and merge configuration from file and CLI.
///
/// Env fallbacks (VOICEPAY_SERVER_URL, VOICEPAY_SYNTH) ride the CLI
/// values through clap, so the order is defaults < file < env < cli.
pub async fn load_merged_config(cli_config: AppConfig) -> AppConfig {
    let store = XdgConfigStore::new();
    let file_config = store.load().await.unwrap_or_else(|_| AppConfig::empty());

    AppConfig::defaults().merge(file_config).merge(cli_config)
}

/// Load the catalog from a JSON file, or fall back to the demo data
pub async fn load_catalog(path: Option<&str>) -> Result<Catalog, String> {
    match path {
        Some(path) => {
            let json = fs::read_to_string(path)
                .await
                .map_err(|e| format!("Failed to read catalog file '{}': {}", path, e))?;
            Catalog::from_json_str(&json).map_err(|e| e.to_string())
        }
        None => Ok(Catalog::demo()),
    }
}

/// Wire session progress callbacks to the presenter
fn make_callbacks(presenter: &Arc<Presenter>) -> SessionCallbacks {
    let on_speaking = Arc::clone(presenter);
    let on_listening = Arc::clone(presenter);
    let on_processing = Arc::clone(presenter);
    let on_utterance = Arc::clone(presenter);
    let on_retry = Arc::clone(presenter);

    SessionCallbacks {
        on_speaking: Some(Box::new(move |line| on_speaking.say(line))),
        on_listening: Some(Box::new(move || on_listening.begin_busy("Listening..."))),
        on_processing: Some(Box::new(move || {
            on_processing.update_busy("Transcribing...")
        })),
        on_utterance: Some(Box::new(move |text| {
            on_utterance.end_busy();
            on_utterance.heard(text);
        })),
        on_retry: Some(Box::new(move |attempts, budget| {
            on_retry.end_busy();
            on_retry.warn(&attempt_note(attempts, budget));
        })),
    }
}

/// Run the voice shell until the user backs out of the last screen
pub async fn run_shell(options: RunOptions) -> ExitCode {
    let presenter = Arc::new(Presenter::new());
    let cancellation = SessionCancellation::new();

    if let Err(e) = install_shutdown_handlers(&cancellation) {
        presenter.error(&format!("Failed to setup signal handler: {}", e));
        return ExitCode::from(EXIT_ERROR);
    }

    let state = Arc::new(StdMutex::new(ShellState::new(options.start_screen)));
    let config = ControllerConfig {
        listen_window: options.listen_window,
        settle_delay: options.settle_delay,
        max_attempts: options.max_attempts,
    };

    let navigator = ShellNavigator {
        state: Arc::clone(&state),
    };
    let sink = ShellSink {
        state: Arc::clone(&state),
        gateway: HttpPaymentGateway::new(&options.server_url),
    };

    if options.text {
        presenter.info("Text mode: type an answer and press Enter. Ctrl+C exits.");

        let controller = InteractionController::new(
            ScriptedCapture::from_stdin(),
            NoOpSynthesizer::new(),
            LoopbackTranscriber::new(),
            navigator,
            sink,
            config,
        );
        shell_loop(&controller, &state, &options, &cancellation, &presenter).await
    } else {
        let (synthesizer, tool) = match create_synthesizer(options.synth).await {
            Ok(pair) => pair,
            Err(e) => {
                presenter.error(&e.to_string());
                return ExitCode::from(EXIT_ERROR);
            }
        };
        match tool {
            Some(tool) => presenter.info(&format!("Speaking through {}. Ctrl+C exits.", tool.binary())),
            None => presenter.warn("No speech tool found; prompts are shown only"),
        }

        let mut controller = InteractionController::new(
            create_capture(),
            synthesizer,
            HttpTranscriber::new(&options.server_url),
            navigator,
            sink,
            config,
        );
        if let Some(cue) = create_audio_cue(options.cues) {
            controller = controller.with_audio_cue(cue);
        }
        shell_loop(&controller, &state, &options, &cancellation, &presenter).await
    }
}

/// One session per pass, against whatever screen tops the stack
async fn shell_loop<C, S, T, N, A>(
    controller: &InteractionController<C, S, T, N, A>,
    state: &SharedState,
    options: &RunOptions,
    cancellation: &SessionCancellation,
    presenter: &Arc<Presenter>,
) -> ExitCode
where
    C: AudioCapture,
    S: SpeechSynthesizer,
    T: Transcriber,
    N: NavigationBridge,
    A: ActionSink,
{
    let callbacks = make_callbacks(presenter);

    loop {
        let Some(entry) = lock_state(state).stack.last().cloned() else {
            presenter.info("Goodbye.");
            return ExitCode::from(EXIT_SUCCESS);
        };

        presenter.screen(entry.target.label());
        let script = create_script(entry.target, &entry.params, &options.catalog);

        match controller.run(script.as_ref(), cancellation, &callbacks).await {
            SessionOutcome::Completed(command) => {
                // Navigation already moved the stack through the ports;
                // a payment stays on its screen like the original form.
                if let Command::SubmitAmount(amount) = command {
                    presenter.success(&format!("Sent {} rupees", amount));
                }
            }
            SessionOutcome::Cancelled => {
                presenter.end_busy();
                presenter.warn("Cancelled");
                return ExitCode::from(EXIT_SUCCESS);
            }
            SessionOutcome::Failed(SessionFailure::CaptureUnavailable(e)) => {
                presenter.end_busy();
                presenter.error(&format!("Audio capture unavailable: {}", e));
                return ExitCode::from(EXIT_ERROR);
            }
            SessionOutcome::Failed(failure) => {
                presenter.end_busy();
                presenter.warn(&failure.to_string());
                // Give up on this screen and fall back one level.
                lock_state(state).stack.pop();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shared(start: ScreenTarget) -> SharedState {
        Arc::new(StdMutex::new(ShellState::new(start)))
    }

    struct RecordingGateway {
        requests: StdMutex<Vec<PaymentRequest>>,
    }

    impl RecordingGateway {
        fn new() -> Self {
            Self {
                requests: StdMutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl PaymentGateway for RecordingGateway {
        async fn submit(
            &self,
            request: &PaymentRequest,
        ) -> Result<(), crate::application::ports::PaymentError> {
            self.requests.lock().unwrap().push(request.clone());
            Ok(())
        }
    }

    #[tokio::test]
    async fn navigate_pushes_and_go_back_pops() {
        let state = shared(ScreenTarget::Home);
        let navigator = ShellNavigator {
            state: Arc::clone(&state),
        };

        navigator
            .navigate(ScreenTarget::Balance, &[])
            .await
            .unwrap();
        assert_eq!(lock_state(&state).stack.len(), 2);

        navigator.go_back().await.unwrap();
        assert_eq!(
            lock_state(&state).stack.last().unwrap().target,
            ScreenTarget::Home
        );
    }

    #[tokio::test]
    async fn navigating_home_resets_the_stack() {
        let state = shared(ScreenTarget::Home);
        let navigator = ShellNavigator {
            state: Arc::clone(&state),
        };

        navigator
            .navigate(ScreenTarget::Contacts, &[])
            .await
            .unwrap();
        navigator
            .navigate(ScreenTarget::Payment, &[])
            .await
            .unwrap();
        navigator.navigate(ScreenTarget::Home, &[]).await.unwrap();

        let state = lock_state(&state);
        assert_eq!(state.stack.len(), 1);
        assert_eq!(state.stack[0].target, ScreenTarget::Home);
    }

    #[tokio::test]
    async fn login_phone_param_becomes_the_sender() {
        let state = shared(ScreenTarget::Login);
        let navigator = ShellNavigator {
            state: Arc::clone(&state),
        };

        let params = vec![("phone".to_string(), "9876543210".to_string())];
        navigator
            .navigate(ScreenTarget::Home, &params)
            .await
            .unwrap();

        assert_eq!(
            lock_state(&state).user_phone.as_deref(),
            Some("9876543210")
        );
    }

    #[tokio::test]
    async fn go_back_on_last_screen_empties_the_stack() {
        let state = shared(ScreenTarget::Login);
        let navigator = ShellNavigator {
            state: Arc::clone(&state),
        };

        navigator.go_back().await.unwrap();
        assert!(lock_state(&state).stack.is_empty());
    }

    #[tokio::test]
    async fn set_field_overwrites_existing_param() {
        let state = shared(ScreenTarget::Login);
        let sink = ShellSink {
            state: Arc::clone(&state),
            gateway: RecordingGateway::new(),
        };

        sink.set_field("phone", "98765").await.unwrap();
        sink.set_field("phone", "9876543210").await.unwrap();

        let state = lock_state(&state);
        let params = &state.stack[0].params;
        assert_eq!(params.len(), 1);
        assert_eq!(params[0], ("phone".to_string(), "9876543210".to_string()));
    }

    #[tokio::test]
    async fn submit_amount_builds_the_transfer_from_shell_state() {
        let state = shared(ScreenTarget::Home);
        {
            let mut guard = lock_state(&state);
            guard.user_phone = Some("9876543210".to_string());
            guard.stack.push(ScreenEntry {
                target: ScreenTarget::Payment,
                params: vec![
                    ("contactName".to_string(), "Alice Kumar".to_string()),
                    ("mobile".to_string(), "9876501234".to_string()),
                ],
            });
        }

        let gateway = RecordingGateway::new();
        let sink = ShellSink {
            state: Arc::clone(&state),
            gateway,
        };

        sink.submit_amount(500).await.unwrap();

        let requests = sink.gateway.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].sender_phone, "9876543210");
        assert_eq!(requests[0].receiver_phone, "9876501234");
        assert_eq!(requests[0].amount, 500);
    }

    #[tokio::test]
    async fn submit_amount_without_login_is_refused() {
        let state = shared(ScreenTarget::Payment);
        let sink = ShellSink {
            state: Arc::clone(&state),
            gateway: RecordingGateway::new(),
        };

        let err = sink.submit_amount(500).await.unwrap_err();
        assert!(err.to_string().contains("not logged in"));
        assert!(sink.gateway.requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn submit_amount_without_receiver_is_refused() {
        let state = shared(ScreenTarget::Payment);
        lock_state(&state).user_phone = Some("9876543210".to_string());
        let sink = ShellSink {
            state: Arc::clone(&state),
            gateway: RecordingGateway::new(),
        };

        let err = sink.submit_amount(500).await.unwrap_err();
        assert!(err.to_string().contains("no receiver"));
    }

    #[tokio::test]
    async fn load_catalog_defaults_to_demo() {
        let catalog = load_catalog(None).await.unwrap();
        assert_eq!(catalog, Catalog::demo());
    }

    #[tokio::test]
    async fn load_catalog_reports_missing_file() {
        let err = load_catalog(Some("/nonexistent/catalog.json"))
            .await
            .unwrap_err();
        assert!(err.contains("Failed to read catalog file"));
    }
}
