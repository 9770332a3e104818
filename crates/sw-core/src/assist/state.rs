use std::collections::BTreeSet;

use serde::Serialize;

use super::{SuggestionError, SuggestionField};

/// Transient state of the writing-assistance feature.
///
/// One suggestion is tracked at a time; loading is tracked per field so
/// several fields can wait on the service at once.
///
/// 写作辅助的瞬时状态，从不持久化。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AiAssistanceState {
    pub loading_fields: BTreeSet<SuggestionField>,
    pub suggestion: String,
    pub current_field: Option<SuggestionField>,
    pub popup_open: bool,
    pub error: Option<SuggestionError>,
}

impl AiAssistanceState {
    pub fn is_loading(&self, field: SuggestionField) -> bool {
        self.loading_fields.contains(&field)
    }

    pub fn any_loading(&self) -> bool {
        !self.loading_fields.is_empty()
    }

    pub fn has_suggestion(&self) -> bool {
        self.current_field.is_some()
    }

    /// Drop the current suggestion and any error; loading flags are left alone.
    pub fn clear_suggestion(&mut self) {
        self.suggestion.clear();
        self.current_field = None;
        self.popup_open = false;
        self.error = None;
    }
}
