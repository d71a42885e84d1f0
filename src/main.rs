//! VoicePay CLI entry point

use std::process::ExitCode;

use clap::Parser;

use voicepay::cli::{
    app::{load_catalog, load_merged_config, run_shell, EXIT_ERROR, EXIT_USAGE_ERROR},
    args::{Cli, Commands, RunOptions},
    config_cmd::handle_config_command,
    presenter::Presenter,
};
use voicepay::domain::config::AppConfig;
use voicepay::domain::dialogue::Duration;
use voicepay::domain::intent::ScreenTarget;
use voicepay::infrastructure::{SynthPreference, XdgConfigStore};

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let presenter = Presenter::new();

    // Handle subcommands
    match cli.command {
        Some(Commands::Config { action }) => {
            let store = XdgConfigStore::new();
            if let Err(e) = handle_config_command(action, &store, &presenter).await {
                presenter.error(&e.to_string());
                return ExitCode::from(EXIT_ERROR);
            }
            return ExitCode::SUCCESS;
        }
        Some(Commands::Run) | None => {}
    }

    // Build CLI config from args
    let cli_config = AppConfig {
        server_url: cli.server_url.clone(),
        listen_window: cli.listen_window.clone(),
        settle_delay: cli.settle_delay.clone(),
        max_attempts: cli.max_attempts,
        synth: cli.synth.clone(),
        cues: if cli.no_cues { Some(false) } else { None },
        catalog: cli.catalog.clone(),
    };

    // Merge config
    let config = load_merged_config(cli_config).await;

    // Parse timing values
    let listen_window = match config.listen_window.as_ref() {
        Some(s) => match s.parse::<Duration>() {
            Ok(d) => d,
            Err(e) => {
                presenter.error(&format!("Invalid listen-window: {}", e));
                return ExitCode::from(EXIT_USAGE_ERROR);
            }
        },
        None => Duration::default_listen_window(),
    };

    let settle_delay = match config.settle_delay.as_ref() {
        Some(s) => match s.parse::<Duration>() {
            Ok(d) => d,
            Err(e) => {
                presenter.error(&format!("Invalid settle-delay: {}", e));
                return ExitCode::from(EXIT_USAGE_ERROR);
            }
        },
        None => Duration::default_settle_delay(),
    };

    // Parse the speech tool preference
    let synth = match config.synth_or_default().parse::<SynthPreference>() {
        Ok(preference) => preference,
        Err(e) => {
            presenter.error(&e.to_string());
            return ExitCode::from(EXIT_USAGE_ERROR);
        }
    };

    // Parse the start screen
    let start_screen = match cli.screen.as_deref() {
        Some(s) => match s.parse::<ScreenTarget>() {
            Ok(screen) => screen,
            Err(e) => {
                presenter.error(&e.to_string());
                return ExitCode::from(EXIT_USAGE_ERROR);
            }
        },
        None => ScreenTarget::Login,
    };

    // Load the catalog
    let catalog = match load_catalog(config.catalog.as_deref()).await {
        Ok(catalog) => catalog,
        Err(e) => {
            presenter.error(&e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let options = RunOptions {
        server_url: config.server_url_or_default().to_string(),
        listen_window,
        settle_delay,
        max_attempts: config.max_attempts_or_default(),
        synth,
        cues: config.cues_or_default(),
        text: cli.text,
        start_screen,
        catalog,
    };

    run_shell(options).await
}
