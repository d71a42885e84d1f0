//! Signal handling for the voice shell

use crate::application::SessionCancellation;

/// Forward Ctrl+C (and SIGTERM on Unix) to the cancellation token.
///
/// The token is monotonic, so the first signal ends the shell and any
/// further ones are no-ops. Handlers stay installed for the process
/// lifetime.
pub fn install_shutdown_handlers(
    cancellation: &SessionCancellation,
) -> Result<(), std::io::Error> {
    let on_interrupt = cancellation.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_interrupt.cancel();
        }
    });

    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        let mut sigterm = signal(SignalKind::terminate())?;
        let on_terminate = cancellation.clone();
        tokio::spawn(async move {
            sigterm.recv().await;
            on_terminate.cancel();
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn handlers_install_cleanly() {
        let cancellation = SessionCancellation::new();
        assert!(install_shutdown_handlers(&cancellation).is_ok());
        assert!(!cancellation.is_cancelled());
    }

    #[tokio::test]
    async fn token_stays_cancellable_after_install() {
        let cancellation = SessionCancellation::new();
        install_shutdown_handlers(&cancellation).unwrap();
        cancellation.cancel();
        assert!(cancellation.is_cancelled());
    }
}
