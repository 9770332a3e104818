use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use sw_core::ports::SuggestionPort;
use sw_core::SuggestionError;

use super::{build_client, endpoint_url};

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    prompt: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    response: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Sends `{ "prompt": ... }` and expects `{ "success": true, "response": ... }`.
pub struct HttpSuggestionClient {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpSuggestionClient {
    pub fn new(base_url: &str, path: &str, timeout: Duration) -> anyhow::Result<Self> {
        Ok(Self {
            client: build_client(timeout)?,
            endpoint: endpoint_url(base_url, path),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

fn classify(err: reqwest::Error) -> SuggestionError {
    if err.is_timeout() {
        return SuggestionError::Timeout;
    }
    match err.status() {
        Some(status) => SuggestionError::from_status(status.as_u16()),
        None => SuggestionError::other(err.to_string()),
    }
}

#[async_trait]
impl SuggestionPort for HttpSuggestionClient {
    async fn request_suggestion(&self, prompt: &str) -> Result<String, SuggestionError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&ChatRequest { prompt })
            .send()
            .await
            .map_err(classify)?;

        let status = response.status();
        if !status.is_success() {
            return Err(SuggestionError::from_status(status.as_u16()));
        }

        let body: ChatResponse = response.json().await.map_err(classify)?;
        match body {
            ChatResponse {
                success: true,
                response: Some(text),
                ..
            } if !text.trim().is_empty() => {
                debug!(endpoint = %self.endpoint, chars = text.len(), "suggestion received");
                Ok(text)
            }
            ChatResponse { error, .. } => Err(SuggestionError::other(
                error.unwrap_or_else(|| "no suggestion received".to_string()),
            )),
        }
    }
}
