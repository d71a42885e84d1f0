//! Screen action port interfaces

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::intent::ScreenTarget;

/// Errors from performing a resolved command
#[derive(Debug, Clone, Error)]
pub enum ActionError {
    #[error("Navigation failed: {0}")]
    Navigation(String),

    #[error("Could not update field '{name}': {message}")]
    Field { name: String, message: String },

    #[error("Payment failed: {0}")]
    Payment(String),
}

/// Port for moving between screens.
///
/// The hosting shell owns the screen stack; the controller only asks
/// for transitions and never inspects the stack itself.
#[async_trait]
pub trait NavigationBridge: Send + Sync {
    /// Open a screen, carrying parameters for it.
    async fn navigate(
        &self,
        target: ScreenTarget,
        params: &[(String, String)],
    ) -> Result<(), ActionError>;

    /// Return to the previous screen.
    async fn go_back(&self) -> Result<(), ActionError>;
}

/// Port for mutating the hosting screen's form state
#[async_trait]
pub trait ActionSink: Send + Sync {
    /// Deliver a field value heard from the user.
    async fn set_field(&self, name: &str, value: &str) -> Result<(), ActionError>;

    /// Submit a payment amount on the active payment screen.
    async fn submit_amount(&self, amount: u64) -> Result<(), ActionError>;
}
