//! Payment gateway port interface

use async_trait::async_trait;
use thiserror::Error;

/// Payment errors
#[derive(Debug, Clone, Error)]
pub enum PaymentError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Payment service returned HTTP {0}")]
    Http(u16),

    #[error("Payment was declined: {0}")]
    Declined(String),

    #[error("Failed to parse payment response: {0}")]
    Parse(String),
}

/// One transfer request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentRequest {
    pub sender_phone: String,
    pub receiver_phone: String,
    pub amount: u64,
}

/// Port for submitting transfers to the banking service
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Submit a transfer.
    ///
    /// # Returns
    /// Ok when the service confirmed the transfer, an error otherwise
    async fn submit(&self, request: &PaymentRequest) -> Result<(), PaymentError>;
}
