use serde::Serialize;

/// Classified failure of a suggestion request.
///
/// The UI only needs [`SuggestionError::kind`]; the message is resolved by
/// the i18n layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SuggestionError {
    #[error("suggestion request timed out")]
    Timeout,
    #[error("suggestion service rejected the credentials")]
    Unauthorized,
    #[error("suggestion service rate limit exceeded")]
    RateLimited,
    #[error("suggestion service error (status {status})")]
    Server { status: u16 },
    #[error("suggestion request failed: {message}")]
    Other { message: String },
}

impl SuggestionError {
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }

    /// Map a non-success HTTP status to its error class.
    pub fn from_status(status: u16) -> Self {
        match status {
            401 | 403 => Self::Unauthorized,
            429 => Self::RateLimited,
            500..=599 => Self::Server { status },
            _ => Self::other(format!("unexpected status {status}")),
        }
    }

    /// Stable identifier for the error class.
    pub fn kind(&self) -> &'static str {
        match self {
            SuggestionError::Timeout => "timeout",
            SuggestionError::Unauthorized => "auth",
            SuggestionError::RateLimited => "rate_limit",
            SuggestionError::Server { .. } => "server",
            SuggestionError::Other { .. } => "other",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_map_to_kinds() {
        assert_eq!(SuggestionError::from_status(401).kind(), "auth");
        assert_eq!(SuggestionError::from_status(429).kind(), "rate_limit");
        assert_eq!(SuggestionError::from_status(500).kind(), "server");
        assert_eq!(SuggestionError::from_status(503).kind(), "server");
        assert_eq!(SuggestionError::from_status(404).kind(), "other");
        assert_eq!(SuggestionError::Timeout.kind(), "timeout");
    }
}
