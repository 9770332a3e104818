//! Writing assistance use case.
//!
//! Requests a suggestion for one free-text field, tracks loading per field,
//! and hands the accepted text back to the wizard. Only the most recently
//! issued request may update the suggestion or the error.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tracing::{debug, info_span, warn, Instrument};

use sw_core::assist::{compose_prompt, situation_context};
use sw_core::ports::SuggestionPort;
use sw_core::{AiAssistanceState, SituationDescriptions, SuggestionError, SuggestionField};

use crate::usecases::wizard::WizardCoordinator;

pub const DEFAULT_SUGGESTION_TIMEOUT: Duration = Duration::from_secs(30);

/// Suggestion text the user accepted, bound to the field that asked for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceptedSuggestion {
    pub field: SuggestionField,
    pub text: String,
}

#[derive(Default)]
struct Shared {
    view: AiAssistanceState,
    /// Request currently responsible for each loading flag.
    loading_owner: BTreeMap<SuggestionField, u64>,
}

pub struct AiSuggestionCoordinator {
    suggestion: Arc<dyn SuggestionPort>,
    timeout: Duration,
    shared: Arc<Mutex<Shared>>,
    latest_request: AtomicU64,
}

impl AiSuggestionCoordinator {
    pub fn new(suggestion: Arc<dyn SuggestionPort>) -> Self {
        Self {
            suggestion,
            timeout: DEFAULT_SUGGESTION_TIMEOUT,
            shared: Arc::new(Mutex::new(Shared::default())),
            latest_request: AtomicU64::new(0),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn snapshot(&self) -> AiAssistanceState {
        self.lock_state().view.clone()
    }

    pub fn is_loading(&self, field: SuggestionField) -> bool {
        self.lock_state().view.is_loading(field)
    }

    /// Ask the service for text for `field`.
    ///
    /// On success the suggestion is stored and the popup opens; on failure the
    /// classified error is stored and the popup stays closed. The field's
    /// loading flag is cleared either way, even if this future is dropped.
    pub async fn generate_suggestion(
        &self,
        field: SuggestionField,
        current_value: &str,
        context: &str,
    ) -> Result<String, SuggestionError> {
        let request_id = self.latest_request.fetch_add(1, Ordering::SeqCst) + 1;
        {
            let mut shared = self.lock_state();
            shared.view.loading_fields.insert(field);
            shared.view.error = None;
            shared.loading_owner.insert(field, request_id);
        }
        let _loading = LoadingGuard {
            shared: Arc::clone(&self.shared),
            field,
            request_id,
        };

        let prompt = compose_prompt(field, current_value, context);
        let span = info_span!(
            "usecase.ai_suggestion.generate",
            field = field.field_name(),
            request_id
        );
        let outcome = async {
            match tokio::time::timeout(self.timeout, self.suggestion.request_suggestion(&prompt)).await {
                Ok(outcome) => outcome,
                Err(_) => Err(SuggestionError::Timeout),
            }
        }
        .instrument(span)
        .await
        .and_then(|text| {
            let text = text.trim();
            if text.is_empty() {
                Err(SuggestionError::other("no suggestion received"))
            } else {
                Ok(text.to_string())
            }
        });

        if self.latest_request.load(Ordering::SeqCst) != request_id {
            debug!(field = field.field_name(), request_id, "discarding superseded suggestion response");
            return outcome;
        }

        let mut shared = self.lock_state();
        let state = &mut shared.view;
        match &outcome {
            Ok(text) => {
                state.suggestion = text.clone();
                state.current_field = Some(field);
                state.popup_open = true;
                state.error = None;
                debug!(field = field.field_name(), chars = text.len(), "suggestion ready");
            }
            Err(err) => {
                state.error = Some(err.clone());
                warn!(field = field.field_name(), kind = err.kind(), error = %err, "suggestion request failed");
            }
        }
        outcome
    }

    /// Request a suggestion for one of the situation fields, using the other
    /// descriptions as context.
    pub async fn generate_for(
        &self,
        field: SuggestionField,
        data: &SituationDescriptions,
    ) -> Result<String, SuggestionError> {
        let current_value = field.value_in(data).to_string();
        let context = situation_context(data);
        self.generate_suggestion(field, &current_value, &context).await
    }

    /// Take the current suggestion, optionally as edited by the user, and
    /// close the popup. `None` when no suggestion is showing.
    pub fn accept(&self, edited_text: Option<String>) -> Option<AcceptedSuggestion> {
        let mut shared = self.lock_state();
        let state = &mut shared.view;
        let accepted = state.current_field.map(|field| AcceptedSuggestion {
            field,
            text: edited_text.unwrap_or_else(|| state.suggestion.clone()),
        });
        state.clear_suggestion();
        accepted
    }

    /// Accept the current suggestion and write it into the wizard.
    pub fn accept_into(&self, wizard: &mut WizardCoordinator, edited_text: Option<String>) -> bool {
        match self.accept(edited_text) {
            Some(accepted) => {
                wizard.apply_suggestion(accepted);
                true
            }
            None => false,
        }
    }

    pub fn discard(&self) {
        self.lock_state().view.clear_suggestion();
    }

    /// Reopen the popup for a suggestion that is still held.
    pub fn open_popup(&self) -> bool {
        let mut shared = self.lock_state();
        let state = &mut shared.view;
        if state.has_suggestion() {
            state.popup_open = true;
        }
        state.popup_open
    }

    pub fn close_popup(&self) {
        self.lock_state().view.popup_open = false;
    }

    pub fn clear_error(&self) {
        self.lock_state().view.error = None;
    }

    fn lock_state(&self) -> MutexGuard<'_, Shared> {
        self.shared.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Clears a field's loading flag unless a newer request for the same field
/// has taken it over.
struct LoadingGuard {
    shared: Arc<Mutex<Shared>>,
    field: SuggestionField,
    request_id: u64,
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        let mut shared = self.shared.lock().unwrap_or_else(PoisonError::into_inner);
        if shared.loading_owner.get(&self.field) == Some(&self.request_id) {
            shared.loading_owner.remove(&self.field);
            shared.view.loading_fields.remove(&self.field);
        }
    }
}
