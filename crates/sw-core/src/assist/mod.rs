//! AI writing assistance domain module.
//!
//! Prompt composition, transient assistance state and the classified error
//! taxonomy. Nothing here is ever persisted.

pub mod error;
pub mod prompt;
pub mod state;

pub use error::SuggestionError;
pub use prompt::{compose_prompt, situation_context, SuggestionField, SYSTEM_PROMPT};
pub use state::AiAssistanceState;
