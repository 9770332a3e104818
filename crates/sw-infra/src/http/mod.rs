//! reqwest-backed adapters for the submission and suggestion endpoints.

mod submission_client;
mod suggestion_client;

use std::time::Duration;

use anyhow::Context;

pub use submission_client::HttpSubmissionClient;
pub use suggestion_client::HttpSuggestionClient;

/// Join a base URL and an endpoint path with exactly one `/` between them.
pub fn endpoint_url(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

fn build_client(timeout: Duration) -> anyhow::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .context("Failed to build HTTP client")
}
