use async_trait::async_trait;

use crate::application::ApplicationData;
use crate::submission::{SubmissionError, SubmissionReceipt};

/// Backend endpoint that accepts a completed application.
#[async_trait]
pub trait ApplicationSubmissionPort: Send + Sync {
    /// Send the full payload once; the caller owns timeouts and retries.
    async fn submit(&self, data: &ApplicationData) -> Result<SubmissionReceipt, SubmissionError>;
}
