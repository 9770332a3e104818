//! Wizard coordinator.
//!
//! Owns the three step forms, drives the navigation state machine and runs
//! the storage side effects it asks for.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, info_span, warn, Instrument};

use sw_core::{
    ports::KeyValueStorePort, ApplicationData, FamilyFinancialInfo, PersonalInfo,
    SituationDescriptions, StepRecord, StorageNamespace, WizardAction, WizardEvent, WizardState,
    WizardStateMachine, WizardStep,
};

use crate::usecases::assist::AcceptedSuggestion;
use crate::usecases::form::{PersistenceAdapter, StepForm, StepFormController, DEFAULT_DEBOUNCE};

/// Construction options for [`WizardCoordinator`].
#[derive(Debug, Clone)]
pub struct WizardOptions {
    pub namespace: StorageNamespace,
    pub debounce: Duration,
}

impl Default for WizardOptions {
    fn default() -> Self {
        Self {
            namespace: StorageNamespace::default(),
            debounce: DEFAULT_DEBOUNCE,
        }
    }
}

pub struct WizardCoordinator {
    state: WizardState,
    personal: StepFormController<PersonalInfo>,
    family: StepFormController<FamilyFinancialInfo>,
    situation: StepFormController<SituationDescriptions>,
    store: Arc<dyn KeyValueStorePort>,
    namespace: StorageNamespace,
}

impl WizardCoordinator {
    /// Restore the saved step index, mount every form, and flag a pending
    /// restore decision when any step has saved data.
    pub async fn start(store: Arc<dyn KeyValueStorePort>, options: WizardOptions) -> Self {
        let WizardOptions {
            namespace,
            debounce,
        } = options;

        let current_step = Self::load_current_step(store.as_ref(), &namespace).await;

        let personal = StepFormController::mount(Self::adapter(&store, &namespace, debounce)).await;
        let family = StepFormController::mount(Self::adapter(&store, &namespace, debounce)).await;
        let situation =
            StepFormController::mount(Self::adapter(&store, &namespace, debounce)).await;

        let mut coordinator = Self {
            state: WizardState::at(current_step),
            personal,
            family,
            situation,
            store,
            namespace,
        };

        if coordinator.has_stored_data().await {
            coordinator.dispatch(WizardEvent::SavedSessionDetected).await;
        }
        info!(
            step = ?coordinator.state.current_step,
            restore_pending = coordinator.state.restore_pending,
            "wizard started"
        );
        coordinator
    }

    fn adapter<T: StepRecord>(
        store: &Arc<dyn KeyValueStorePort>,
        namespace: &StorageNamespace,
        debounce: Duration,
    ) -> PersistenceAdapter<T> {
        PersistenceAdapter::new(Arc::clone(store), namespace.step_key(T::STEP), debounce)
    }

    async fn load_current_step(store: &dyn KeyValueStorePort, namespace: &StorageNamespace) -> WizardStep {
        let key = namespace.current_step_key();
        match store.get_item(&key).await {
            Ok(Some(raw)) => WizardStep::parse_stored(&raw).unwrap_or_else(|| {
                warn!(key = %key, raw = %raw, "ignoring unparsable step index");
                WizardStep::FIRST
            }),
            Ok(None) => WizardStep::FIRST,
            Err(err) => {
                warn!(key = %key, error = %err, "failed to read step index");
                WizardStep::FIRST
            }
        }
    }

    pub fn state(&self) -> WizardState {
        self.state
    }

    pub fn active_step(&self) -> WizardStep {
        self.state.current_step
    }

    pub fn restore_pending(&self) -> bool {
        self.state.restore_pending
    }

    pub fn namespace(&self) -> &StorageNamespace {
        &self.namespace
    }

    pub fn personal(&self) -> &StepFormController<PersonalInfo> {
        &self.personal
    }

    pub fn personal_mut(&mut self) -> &mut StepFormController<PersonalInfo> {
        &mut self.personal
    }

    pub fn family(&self) -> &StepFormController<FamilyFinancialInfo> {
        &self.family
    }

    pub fn family_mut(&mut self) -> &mut StepFormController<FamilyFinancialInfo> {
        &mut self.family
    }

    pub fn situation(&self) -> &StepFormController<SituationDescriptions> {
        &self.situation
    }

    pub fn situation_mut(&mut self) -> &mut StepFormController<SituationDescriptions> {
        &mut self.situation
    }

    pub fn form(&self, step: WizardStep) -> &dyn StepForm {
        match step {
            WizardStep::Personal => &self.personal,
            WizardStep::Family => &self.family,
            WizardStep::Situation => &self.situation,
        }
    }

    pub fn form_mut(&mut self, step: WizardStep) -> &mut dyn StepForm {
        match step {
            WizardStep::Personal => &mut self.personal,
            WizardStep::Family => &mut self.family,
            WizardStep::Situation => &mut self.situation,
        }
    }

    /// Whether the active step currently passes full validation. Does not
    /// reveal errors.
    pub fn can_proceed(&self) -> bool {
        self.form(self.active_step()).is_valid()
    }

    /// Validate the active step (revealing its errors) and advance when it
    /// passes.
    pub async fn next(&mut self) -> WizardState {
        let step_valid = self.form_mut(self.active_step()).trigger_validation();
        self.dispatch(WizardEvent::Advance { step_valid }).await
    }

    pub async fn previous(&mut self) -> WizardState {
        self.dispatch(WizardEvent::Retreat).await
    }

    /// Jump to `index` without validating; out-of-range indices are ignored.
    pub async fn goto(&mut self, index: usize) -> WizardState {
        self.dispatch(WizardEvent::GoTo { index }).await
    }

    /// Keep the data loaded at startup.
    pub async fn restore(&mut self) -> WizardState {
        self.dispatch(WizardEvent::RestoreSession).await
    }

    /// Discard everything saved and return to the first step.
    pub async fn start_fresh(&mut self) -> WizardState {
        self.dispatch(WizardEvent::StartFresh).await
    }

    /// Clear storage and forms after the backend accepted the application.
    pub(crate) async fn complete_submission(&mut self) -> WizardState {
        self.dispatch(WizardEvent::Submitted).await
    }

    pub async fn has_stored_data(&self) -> bool {
        for step in WizardStep::ALL {
            if self.form(step).has_saved_data().await {
                return true;
            }
        }
        false
    }

    /// Snapshot of all three records, in submission shape.
    pub fn application_data(&self) -> ApplicationData {
        ApplicationData {
            personal_info: self.personal.values().clone(),
            family_financial_info: self.family.values().clone(),
            situation_descriptions: self.situation.values().clone(),
        }
    }

    /// Write an accepted suggestion into the field that requested it.
    pub fn apply_suggestion(&mut self, accepted: AcceptedSuggestion) {
        let AcceptedSuggestion { field, text } = accepted;
        debug!(field = field.field_name(), "applying accepted suggestion");
        self.situation.update(|data| *field.slot_in(data) = text);
    }

    async fn dispatch(&mut self, event: WizardEvent) -> WizardState {
        let span = info_span!("usecase.wizard_coordinator.dispatch", event = ?event);
        async {
            let from = self.state;
            let (next, actions) = WizardStateMachine::transition(from, event);
            if from != next {
                info!(from = ?from, to = ?next, "wizard state transition");
            }
            self.execute_actions(actions).await;
            self.state = next;
            next
        }
        .instrument(span)
        .await
    }

    async fn execute_actions(&mut self, actions: Vec<WizardAction>) {
        for action in actions {
            debug!(?action, "wizard executing action");
            match action {
                WizardAction::PersistCurrentStep(step) => {
                    let key = self.namespace.current_step_key();
                    if let Err(err) = self.store.set_item(&key, &step.index().to_string()).await {
                        warn!(key = %key, error = %err, "failed to persist step index");
                    }
                }
                WizardAction::ClearSavedSteps => {
                    for step in WizardStep::ALL {
                        self.form(step).clear_saved_data().await;
                    }
                }
                WizardAction::ClearCurrentStep => {
                    let key = self.namespace.current_step_key();
                    if let Err(err) = self.store.remove_item(&key).await {
                        warn!(key = %key, error = %err, "failed to clear step index");
                    }
                }
                WizardAction::ResetForms => {
                    for step in WizardStep::ALL {
                        self.form_mut(step).reset();
                    }
                }
            }
        }
    }
}
