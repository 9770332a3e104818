use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use sw_core::ports::ApplicationSubmissionPort;
use sw_core::{ApplicationData, SubmissionError, SubmissionReceipt};

use super::{build_client, endpoint_url};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SubmissionResponse {
    #[serde(default)]
    reference_number: Option<String>,
}

/// POSTs the application as JSON and reads `referenceNumber` from the reply.
pub struct HttpSubmissionClient {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpSubmissionClient {
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

fn classify(err: reqwest::Error) -> SubmissionError {
    if err.is_timeout() {
        SubmissionError::Timeout
    } else if err.is_decode() {
        SubmissionError::InvalidResponse {
            message: err.to_string(),
        }
    } else {
        SubmissionError::Transport {
            message: err.to_string(),
        }
    }
}

#[async_trait]
impl ApplicationSubmissionPort for HttpSubmissionClient {
    async fn submit(&self, data: &ApplicationData) -> Result<SubmissionReceipt, SubmissionError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(data)
            .send()
            .await
            .map_err(classify)?;

        let status = response.status();
        if !status.is_success() {
            return Err(SubmissionError::Rejected {
                status: status.as_u16(),
            });
        }

        let body: SubmissionResponse = response.json().await.map_err(classify)?;
        debug!(endpoint = %self.endpoint, status = status.as_u16(), "application accepted");
        // An empty reference is left to the caller to replace.
        Ok(SubmissionReceipt::new(
            body.reference_number.unwrap_or_default(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};

    fn client(url: &str) -> HttpSubmissionClient {
        HttpSubmissionClient::new(url, "/api/applications", Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn submit_posts_camel_case_payload_and_reads_reference() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/api/applications")
            .match_header("content-type", "application/json")
            .match_body(Matcher::PartialJsonString(
                r#"{"personalInfo":{"name":"Alice"}}"#.to_string(),
            ))
            .with_status(201)
            .with_header("content-type", "application/json")
            .with_body(r#"{"referenceNumber":"APP-2024-001"}"#)
            .create_async()
            .await;

        let mut data = ApplicationData::default();
        data.personal_info.name = "Alice".into();

        let receipt = client(&server.url()).submit(&data).await.unwrap();

        mock.assert_async().await;
        assert_eq!(receipt.reference_number, "APP-2024-001");
    }

    #[tokio::test]
    async fn non_success_status_is_rejected() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/api/applications")
            .with_status(422)
            .create_async()
            .await;

        let err = client(&server.url())
            .submit(&ApplicationData::default())
            .await
            .unwrap_err();

        assert_eq!(err, SubmissionError::Rejected { status: 422 });
    }

    #[tokio::test]
    async fn missing_reference_yields_empty_receipt() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/api/applications")
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;

        let receipt = client(&server.url())
            .submit(&ApplicationData::default())
            .await
            .unwrap();

        assert!(receipt.reference_number.is_empty());
    }

    #[tokio::test]
    async fn malformed_body_is_invalid_response() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/api/applications")
            .with_status(200)
            .with_body("<html>")
            .create_async()
            .await;

        let err = client(&server.url())
            .submit(&ApplicationData::default())
            .await
            .unwrap_err();

        assert_eq!(err.kind(), "invalid_response");
    }
}
