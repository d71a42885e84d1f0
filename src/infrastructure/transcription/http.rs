//! Remote speech-to-text service adapter
//!
//! Posts captured clips to the hosted transcription endpoint as
//! multipart form data and unwraps its JSON envelope.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;

use crate::application::ports::{Transcriber, TranscriptionError};
use crate::domain::speech::AudioClip;

/// Envelope returned by the speech-to-text endpoint
#[derive(Debug, Deserialize)]
struct SttResponse {
    status: String,
    #[serde(default)]
    text: String,
    #[serde(default)]
    message: Option<String>,
}

/// Transcriber backed by the remote speech-to-text service
pub struct HttpTranscriber {
    base_url: String,
    client: reqwest::Client,
}

impl HttpTranscriber {
    /// Create a new transcriber against the given server
    pub fn new(server_url: impl Into<String>) -> Self {
        let server_url: String = server_url.into();
        Self {
            base_url: server_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Build the transcription endpoint URL
    fn stt_url(&self) -> String {
        format!("{}/stt", self.base_url)
    }

    /// Build the multipart form carrying the clip
    fn build_form(clip: &AudioClip) -> Result<Form, TranscriptionError> {
        let part = Part::bytes(clip.data().to_vec())
            .file_name(clip.mime_type().file_name())
            .mime_str(clip.mime_type().as_str())
            .map_err(|e| TranscriptionError::Parse(e.to_string()))?;

        Ok(Form::new().part("audio", part))
    }
}

#[async_trait]
impl Transcriber for HttpTranscriber {
    async fn transcribe(&self, clip: &AudioClip) -> Result<String, TranscriptionError> {
        if clip.is_empty() {
            return Err(TranscriptionError::EmptyResponse);
        }

        let form = Self::build_form(clip)?;

        let response = self
            .client
            .post(self.stt_url())
            .multipart(form)
            .send()
            .await
            .map_err(|e| TranscriptionError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TranscriptionError::Http(status.as_u16()));
        }

        let envelope: SttResponse = response
            .json()
            .await
            .map_err(|e| TranscriptionError::Parse(e.to_string()))?;

        if envelope.status != "success" {
            let detail = envelope.message.unwrap_or(envelope.status);
            return Err(TranscriptionError::ServiceFailed(detail));
        }

        let trimmed = envelope.text.trim();
        if trimmed.is_empty() {
            return Err(TranscriptionError::EmptyResponse);
        }

        Ok(trimmed.to_string())
    }
}
