//! Banking service payment gateway adapter

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::application::ports::{PaymentError, PaymentGateway, PaymentRequest};

/// Wire format for the payment endpoint
#[derive(Debug, Serialize)]
struct PayRequest<'a> {
    sender_phone: &'a str,
    receiver_phone: &'a str,
    amount: u64,
}

/// Envelope returned by the payment endpoint
#[derive(Debug, Deserialize)]
struct PayResponse {
    status: String,
    #[serde(default)]
    message: Option<String>,
}

/// Payment gateway backed by the banking service
pub struct HttpPaymentGateway {
    base_url: String,
    client: reqwest::Client,
}

impl HttpPaymentGateway {
    /// Create a new gateway against the given server
    pub fn new(server_url: impl Into<String>) -> Self {
        let server_url: String = server_url.into();
        Self {
            base_url: server_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Build the payment endpoint URL
    fn pay_url(&self) -> String {
        format!("{}/pay", self.base_url)
    }
}

#[async_trait]
impl PaymentGateway for HttpPaymentGateway {
    async fn submit(&self, request: &PaymentRequest) -> Result<(), PaymentError> {
        let body = PayRequest {
            sender_phone: &request.sender_phone,
            receiver_phone: &request.receiver_phone,
            amount: request.amount,
        };

        let response = self
            .client
            .post(self.pay_url())
            .json(&body)
            .send()
            .await
            .map_err(|e| PaymentError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PaymentError::Http(status.as_u16()));
        }

        let envelope: PayResponse = response
            .json()
            .await
            .map_err(|e| PaymentError::Parse(e.to_string()))?;

        if envelope.status != "success" {
            let detail = envelope.message.unwrap_or(envelope.status);
            return Err(PaymentError::Declined(detail));
        }

        Ok(())
    }
}
