//! # Dependency Injection / 依赖注入模块
//!
//! Creates the infra adapters from [`Settings`] and hands them to the
//! application layer as port trait objects. Assembly only; no decisions.

use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};

use sw_app::{
    AiSuggestionCoordinator, SubmitApplication, SubmitError, WizardCoordinator, WizardOptions,
};
use sw_core::ports::KeyValueStorePort;
use sw_core::{SubmissionReceipt, SuggestionError, SuggestionField};
use sw_infra::{FileKeyValueStore, HttpSubmissionClient, HttpSuggestionClient, SystemClock};

use super::config::Settings;

/// Everything a front end needs to drive one application.
///
/// Shared by reference: the wizard sits behind an async mutex so a submit
/// in flight does not block reads or a second (refused) submit.
pub struct WizardSession {
    wizard: Mutex<WizardCoordinator>,
    submission: SubmitApplication,
    assist: AiSuggestionCoordinator,
}

impl WizardSession {
    pub async fn wizard(&self) -> MutexGuard<'_, WizardCoordinator> {
        self.wizard.lock().await
    }

    pub fn assist(&self) -> &AiSuggestionCoordinator {
        &self.assist
    }

    pub fn is_submitting(&self) -> bool {
        self.submission.is_submitting()
    }

    pub async fn submit(&self) -> Result<SubmissionReceipt, SubmitError> {
        self.submission.execute(&self.wizard).await
    }

    /// Request a suggestion for `field` from the current situation values.
    pub async fn suggest(&self, field: SuggestionField) -> Result<String, SuggestionError> {
        let situation = self.wizard.lock().await.situation().values().clone();
        self.assist.generate_for(field, &situation).await
    }

    /// Accept the showing suggestion (optionally edited) into its field.
    pub async fn accept_suggestion(&self, edited_text: Option<String>) -> bool {
        let mut wizard = self.wizard.lock().await;
        self.assist.accept_into(&mut wizard, edited_text)
    }
}

/// Build a session persisting to files under `settings.data_dir`.
pub async fn build_session(settings: &Settings) -> anyhow::Result<WizardSession> {
    let store: Arc<dyn KeyValueStorePort> =
        Arc::new(FileKeyValueStore::new(settings.data_dir.clone()));
    build_session_with_store(settings, store).await
}

/// Build a session on top of an explicit store.
pub async fn build_session_with_store(
    settings: &Settings,
    store: Arc<dyn KeyValueStorePort>,
) -> anyhow::Result<WizardSession> {
    let submission_client = HttpSubmissionClient::new(
        &settings.api_base_url,
        &settings.submission_path,
        settings.request_timeout,
    )?;
    let suggestion_client = HttpSuggestionClient::new(
        &settings.api_base_url,
        &settings.suggestion_path,
        settings.request_timeout,
    )?;

    let wizard = WizardCoordinator::start(
        store,
        WizardOptions {
            namespace: settings.namespace.clone(),
            debounce: settings.debounce,
        },
    )
    .await;

    let submission = SubmitApplication::new(
        Arc::new(submission_client),
        Arc::new(SystemClock),
        settings.failure_policy,
    )
    .with_timeout(settings.request_timeout);

    let assist =
        AiSuggestionCoordinator::new(Arc::new(suggestion_client)).with_timeout(settings.request_timeout);

    Ok(WizardSession {
        wizard: Mutex::new(wizard),
        submission,
        assist,
    })
}
