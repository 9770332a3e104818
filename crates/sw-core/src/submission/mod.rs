//! Submission domain module.
//!
//! Receipt, failure taxonomy and the configured failure policy.

use serde::{Deserialize, Serialize};

/// Server acknowledgement of a submitted application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionReceipt {
    pub reference_number: String,
}

impl SubmissionReceipt {
    pub fn new(reference_number: impl Into<String>) -> Self {
        Self {
            reference_number: reference_number.into(),
        }
    }

    /// Locally generated reference in the `SSA-<epoch millis>` format.
    pub fn synthesized(now_ms: i64) -> Self {
        Self::new(format!("SSA-{now_ms}"))
    }
}

/// Transport-level failure talking to the submission endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SubmissionError {
    #[error("submission timed out")]
    Timeout,
    #[error("submission rejected with status {status}")]
    Rejected { status: u16 },
    #[error("submission response was not understood: {message}")]
    InvalidResponse { message: String },
    #[error("submission transport failed: {message}")]
    Transport { message: String },
}

impl SubmissionError {
    pub fn kind(&self) -> &'static str {
        match self {
            SubmissionError::Timeout => "timeout",
            SubmissionError::Rejected { .. } => "rejected",
            SubmissionError::InvalidResponse { .. } => "invalid_response",
            SubmissionError::Transport { .. } => "transport",
        }
    }
}

/// What to do when the endpoint cannot be reached or refuses the payload.
///
/// 提交失败时的处理策略。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionFailurePolicy {
    /// Return the failure to the caller; nothing is cleared.
    #[default]
    Surface,
    /// Demo mode: pretend the submission succeeded with a local reference.
    SynthesizeReference,
}

impl SubmissionFailurePolicy {
    /// Parse the config spelling; unknown values yield `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "surface" => Some(Self::Surface),
            "synthesize_reference" => Some(Self::SynthesizeReference),
            _ => None,
        }
    }
}
