use async_trait::async_trait;

use crate::assist::SuggestionError;

/// Text-generation service behind the "help me write" button.
#[async_trait]
pub trait SuggestionPort: Send + Sync {
    /// Send a fully composed prompt and return the suggested text.
    async fn request_suggestion(&self, prompt: &str) -> Result<String, SuggestionError>;
}
