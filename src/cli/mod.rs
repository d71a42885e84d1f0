//! Terminal front end: argument parsing, output formatting, signal
//! handling and the shell runner.

pub mod app;
pub mod args;
pub mod config_cmd;
pub mod presenter;
pub mod signals;

pub use app::{run_shell, EXIT_ERROR, EXIT_SUCCESS, EXIT_USAGE_ERROR};
pub use args::{Cli, Commands, ConfigAction, RunOptions};
pub use presenter::Presenter;
